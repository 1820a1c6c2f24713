//! Builds the chat backend and controller inputs from configuration.

use std::time::Duration;

use studybuddy_ai::{ChatSetup, GeminiConfig, GeminiConnector, GenerationSettings};
use studybuddy_config::{ModelConfig, StudyBuddyConfig, API_KEY_ENV};
use tracing::warn;

use crate::controller::ControllerOptions;

/// The chat setup every session is opened with.
pub fn chat_setup(config: &StudyBuddyConfig, model_override: Option<&str>) -> ChatSetup {
    let model = model_override
        .map(str::trim)
        .filter(|m| !m.is_empty())
        .unwrap_or(&config.model.name);
    let generation = &config.generation;

    ChatSetup::new(model, config.persona.system_instruction.clone()).with_generation(
        GenerationSettings {
            temperature: generation.temperature,
            top_p: generation.top_p,
            top_k: generation.top_k,
            max_output_tokens: generation.max_output_tokens,
            response_mime_type: generation.response_mime_type.clone(),
        },
    )
}

/// A Gemini connector for `model`.
///
/// Without a credential the connector is still returned; the failure then
/// surfaces once, when the first session is opened.
pub fn connector(model: &ModelConfig) -> GeminiConnector {
    let Some(api_key) = model.resolve_api_key() else {
        warn!("no API key configured; set {API_KEY_ENV} or model.api_key");
        return GeminiConnector::unconfigured();
    };

    let request_timeout =
        (model.request_timeout_secs > 0).then(|| Duration::from_secs(model.request_timeout_secs));
    GeminiConnector::new(
        GeminiConfig::new(api_key)
            .with_base_url(model.base_url.clone())
            .with_connect_timeout(Duration::from_secs(model.connect_timeout_secs))
            .with_request_timeout(request_timeout),
    )
}

pub fn controller_options(config: &StudyBuddyConfig, model_override: Option<&str>) -> ControllerOptions {
    ControllerOptions {
        setup: chat_setup(config, model_override),
        welcome_message: config.persona.welcome_message.clone(),
        apology_message: config.persona.apology_message.clone(),
    }
}
