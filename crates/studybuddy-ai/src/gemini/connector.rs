//! Connector that opens Gemini chat handles.

use std::sync::Arc;

use tracing::info;

use crate::{AiClient, AiError, ChatSetup, Connector};

use super::client::GeminiClient;
use super::config::GeminiConfig;

/// Opens a [`GeminiClient`] per session.
///
/// The API key is optional here so that a missing credential surfaces as a
/// connection failure when a session is created, not at startup.
#[derive(Debug, Clone)]
pub struct GeminiConnector {
    config: Option<GeminiConfig>,
}

impl GeminiConnector {
    pub fn new(config: GeminiConfig) -> Self {
        Self {
            config: Some(config),
        }
    }

    /// A connector with no credential; every `connect` fails.
    pub fn unconfigured() -> Self {
        Self { config: None }
    }
}

impl Connector for GeminiConnector {
    fn connect(&self, setup: &ChatSetup) -> Result<Arc<dyn AiClient>, AiError> {
        let config = self.config.clone().ok_or_else(|| {
            AiError::NotConfigured(
                "missing Gemini API key (set GEMINI_API_KEY or model.api_key)".into(),
            )
        })?;

        let client = GeminiClient::new(config, setup.clone())?;
        info!(model = %client.model(), "Gemini chat handle ready");
        Ok(Arc::new(client))
    }
}
