//! Gemini API client struct, request building, and response parsing.

use crate::{AiError, AiResponse, ChatSetup, Content, TokenUsage};

use super::config::GeminiConfig;

/// Gemini API client bound to one chat setup.
pub struct GeminiClient {
    pub(crate) config: GeminiConfig,
    pub(crate) setup: ChatSetup,
    pub(crate) http: reqwest::Client,
}

impl std::fmt::Debug for GeminiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiClient")
            .field("config", &self.config)
            .field("model", &self.setup.model)
            .finish_non_exhaustive()
    }
}

impl GeminiClient {
    /// Build a client for `setup`.
    ///
    /// Fails with [`AiError::NotConfigured`] when the API key is blank, the
    /// base URL does not parse, or the HTTP client cannot be constructed.
    pub fn new(config: GeminiConfig, setup: ChatSetup) -> Result<Self, AiError> {
        if config.api_key.trim().is_empty() {
            return Err(AiError::NotConfigured(
                "missing Gemini API key (set GEMINI_API_KEY or model.api_key)".into(),
            ));
        }
        if setup.model.trim().is_empty() {
            return Err(AiError::NotConfigured("model name is empty".into()));
        }
        reqwest::Url::parse(&config.base_url).map_err(|e| {
            AiError::NotConfigured(format!("invalid base URL {:?}: {e}", config.base_url))
        })?;

        let mut builder = reqwest::Client::builder().connect_timeout(config.connect_timeout);
        if let Some(timeout) = config.request_timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder
            .build()
            .map_err(|e| AiError::NotConfigured(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            config,
            setup,
            http,
        })
    }

    pub fn model(&self) -> &str {
        &self.setup.model
    }

    pub(crate) fn api_url(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.config.base_url.trim_end_matches('/'),
            self.setup.model
        )
    }

    /// Build the JSON request body for the Gemini API.
    pub(crate) fn build_request_body(&self, contents: &[Content]) -> serde_json::Value {
        let generation = &self.setup.generation;
        let mut body = serde_json::json!({
            "contents": contents,
            "generationConfig": {
                "temperature": generation.temperature,
                "topP": generation.top_p,
                "topK": generation.top_k,
                "maxOutputTokens": generation.max_output_tokens,
                "responseMimeType": generation.response_mime_type,
            }
        });

        if !self.setup.system_instruction.trim().is_empty() {
            body["systemInstruction"] = serde_json::json!({
                "parts": [{ "text": self.setup.system_instruction }]
            });
        }

        body
    }

    /// Parse a Gemini response.
    pub(crate) fn parse_response(&self, json: serde_json::Value) -> Result<AiResponse, AiError> {
        let first = match json["candidates"].as_array().and_then(|c| c.first()) {
            Some(candidate) => candidate,
            None => {
                if let Some(reason) = json["promptFeedback"]["blockReason"].as_str() {
                    return Err(AiError::Blocked(reason.to_string()));
                }
                return Err(AiError::ParseError("no candidates in response".to_string()));
            }
        };

        let content: String = first["content"]["parts"]
            .as_array()
            .map(|parts| parts.iter().filter_map(|p| p["text"].as_str()).collect())
            .unwrap_or_default();

        if content.trim().is_empty() {
            return match first["finishReason"].as_str() {
                Some(reason) if reason != "STOP" => Err(AiError::Blocked(reason.to_string())),
                _ => Err(AiError::EmptyResponse),
            };
        }

        let usage = TokenUsage {
            input_tokens: json["usageMetadata"]["promptTokenCount"]
                .as_u64()
                .unwrap_or(0),
            output_tokens: json["usageMetadata"]["candidatesTokenCount"]
                .as_u64()
                .unwrap_or(0),
        };

        Ok(AiResponse { content, usage })
    }
}
