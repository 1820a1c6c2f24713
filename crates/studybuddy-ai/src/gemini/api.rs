//! AiClient trait implementation for GeminiClient.

use async_trait::async_trait;
use tracing::debug;

use crate::{AiClient, AiError, AiResponse, Content};

use super::client::GeminiClient;

fn transport_error(e: reqwest::Error) -> AiError {
    if e.is_timeout() {
        AiError::Timeout
    } else {
        AiError::NetworkError(e.to_string())
    }
}

#[async_trait]
impl AiClient for GeminiClient {
    async fn generate(&self, contents: &[Content]) -> Result<AiResponse, AiError> {
        let body = self.build_request_body(contents);
        let url = self.api_url();

        debug!(model = %self.setup.model, turns = contents.len(), "Gemini API request");

        let response = self
            .http
            .post(&url)
            .header("content-type", "application/json")
            .header("x-goog-api-key", &self.config.api_key)
            .json(&body)
            .send()
            .await
            .map_err(transport_error)?;

        let status = response.status();
        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(AiError::RateLimited);
        }
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(AiError::ApiError(format!("HTTP {status}: {text}")));
        }

        let json: serde_json::Value = response
            .json()
            .await
            .map_err(|e| AiError::ParseError(e.to_string()))?;

        let parsed = self.parse_response(json)?;
        debug!(
            model = %self.setup.model,
            input_tokens = parsed.usage.input_tokens,
            output_tokens = parsed.usage.output_tokens,
            "Gemini API response"
        );
        Ok(parsed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ChatSetup, GeminiConfig, Message};

    #[tokio::test]
    async fn unreachable_endpoint_is_network_error() {
        // Port 9 (discard) is closed on loopback in practice.
        let config = GeminiConfig::new("key").with_base_url("http://127.0.0.1:9/v1beta");
        let client = GeminiClient::new(config, ChatSetup::new("gemini-2.0-flash", "")).unwrap();

        let contents = crate::request_history(&[Message::user("hello")]);
        let err = client.generate(&contents).await.unwrap_err();
        assert!(matches!(err, AiError::NetworkError(_) | AiError::Timeout));
    }
}
