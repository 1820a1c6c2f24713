//! AI engine for Study Buddy.
//!
//! Provides:
//! - The conversation message model (`Message`, `Speaker`)
//! - The request-shaped view of a history sent upstream (`request_history`)
//! - Backend capabilities (`Connector`, `AiClient`) with a Gemini implementation
//! - `ChatSession`, the owner of one conversation's authoritative history

pub mod gemini;
pub mod request;
pub mod session;
pub mod usage;

use std::sync::Arc;

use async_trait::async_trait;

pub use gemini::{GeminiClient, GeminiConfig, GeminiConnector};
pub use request::{request_history, Content, ContentRole, Part};
pub use session::{ChatSession, Reply, SessionError};
pub use usage::UsageTracker;

/// Opens chat handles against a generation backend.
///
/// Called once per session; a failure here is a configuration problem
/// (missing credential, unusable endpoint) rather than a per-message one.
pub trait Connector: Send + Sync {
    fn connect(&self, setup: &ChatSetup) -> Result<Arc<dyn AiClient>, AiError>;
}

/// A live handle bound to one model, persona and generation configuration.
#[async_trait]
pub trait AiClient: Send + Sync {
    /// Generate the next model turn. `contents` begins with a user turn and
    /// ends with the newest user message.
    async fn generate(&self, contents: &[Content]) -> Result<AiResponse, AiError>;
}

/// Fixed parameters a chat handle is opened with.
#[derive(Debug, Clone, PartialEq)]
pub struct ChatSetup {
    pub model: String,
    pub system_instruction: String,
    pub generation: GenerationSettings,
}

impl ChatSetup {
    pub fn new(model: impl Into<String>, system_instruction: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            system_instruction: system_instruction.into(),
            generation: GenerationSettings::default(),
        }
    }

    pub fn with_generation(mut self, generation: GenerationSettings) -> Self {
        self.generation = generation;
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct GenerationSettings {
    pub temperature: f64,
    pub top_p: f64,
    pub top_k: u32,
    pub max_output_tokens: u32,
    pub response_mime_type: String,
}

impl Default for GenerationSettings {
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

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Message {
    pub role: Speaker,
    pub content: String,
}

impl Message {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Speaker::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Speaker::Assistant,
            content: content.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Speaker {
    User,
    Assistant,
}

#[derive(Debug, Clone)]
pub struct AiResponse {
    pub content: String,
    pub usage: TokenUsage,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TokenUsage {
    pub input_tokens: u64,
    pub output_tokens: u64,
}

impl TokenUsage {
    pub fn total_tokens(&self) -> u64 {
        self.input_tokens.saturating_add(self.output_tokens)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum AiError {
    #[error("not configured: {0}")]
    NotConfigured(String),
    #[error("API error: {0}")]
    ApiError(String),
    #[error("Rate limited")]
    RateLimited,
    #[error("Network error: {0}")]
    NetworkError(String),
    #[error("Parse error: {0}")]
    ParseError(String),
    #[error("response blocked: {0}")]
    Blocked(String),
    #[error("response contained no text")]
    EmptyResponse,
    #[error("Timeout")]
    Timeout,
}
