//! Upstream model connection and generation parameters.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Environment variable consulted when `model.api_key` is empty.
pub const API_KEY_ENV: &str = "GEMINI_API_KEY";

pub const DEFAULT_MODEL: &str = "gemini-2.0-flash";
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Which model to talk to and how to reach it.
#[derive(Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelConfig {
    pub name: String,
    pub base_url: String,
    /// Leave empty to read the key from `GEMINI_API_KEY`.
    pub api_key: String,
    pub connect_timeout_secs: u64,
    /// Whole-request timeout in seconds. `0` waits indefinitely.
    pub request_timeout_secs: u64,
}

impl fmt::Debug for ModelConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModelConfig")
            .field("name", &self.name)
            .field("base_url", &self.base_url)
            .field("api_key", &"[REDACTED]")
            .field("connect_timeout_secs", &self.connect_timeout_secs)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .finish()
    }
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            name: DEFAULT_MODEL.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: String::new(),
            connect_timeout_secs: 10,
            request_timeout_secs: 0,
        }
    }
}

impl ModelConfig {
    /// The credential to use: the configured key, else `GEMINI_API_KEY`.
    ///
    /// Returns `None` when neither is set to a non-blank value.
    pub fn resolve_api_key(&self) -> Option<String> {
        let configured = self.api_key.trim();
        if !configured.is_empty() {
            return Some(configured.to_string());
        }
        std::env::var(API_KEY_ENV)
            .ok()
            .map(|key| key.trim().to_string())
            .filter(|key| !key.is_empty())
    }
}

/// Sampling and output parameters sent with every request.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct GenerationConfig {
    /// Valid range: 0.0-2.0.
    pub temperature: f64,
    /// Valid range: 0.0-1.0.
    pub top_p: f64,
    pub top_k: u32,
    /// Valid range: 1-65536.
    pub max_output_tokens: u32,
    pub response_mime_type: String,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            temperature: 0.8,
            top_p: 0.95,
            top_k: 40,
            max_output_tokens: 8192,
            response_mime_type: "text/plain".to_string(),
        }
    }
}
