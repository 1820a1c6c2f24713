//! Google Gemini API client.
//!
//! Implements `Connector` and `AiClient` for Gemini models via the
//! Generative Language API `generateContent` endpoint.

mod api;
mod client;
mod config;
mod connector;

pub use client::GeminiClient;
pub use config::GeminiConfig;
pub use connector::GeminiConnector;
