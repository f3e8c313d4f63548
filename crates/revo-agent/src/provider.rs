//! Remote text-generation providers

use async_trait::async_trait;
use revo_core::{Result, RevoConfig, RevoError};
use std::time::Duration;

use crate::types::{ChatCompletionResponse, Completion, CompletionRequest};

// Longest error body echoed back in a provider error
const MAX_ERROR_BODY_CHARS: usize = 300;

/// One request/response round trip against a text-generation service
///
/// Implementations perform exactly one network call per invocation and keep
/// no state between calls.
#[async_trait]
pub trait CompletionProvider: Send + Sync {
    async fn complete(&self, request: &CompletionRequest) -> Result<Completion>;
}

/// OpenAI-compatible chat completions provider
#[derive(Debug, Clone)]
pub struct OpenAiProvider {
    http: reqwest::Client,
    endpoint: String,
    api_key: String,
}

impl OpenAiProvider {
    /// Build a provider from the configured base URL and request deadline
    pub fn new(config: &RevoConfig, api_key: impl Into<String>) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.review.request_timeout_secs))
            .build()
            .map_err(|e| RevoError::Config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            http,
            endpoint: format!(
                "{}/chat/completions",
                config.models.base_url.trim_end_matches('/')
            ),
            api_key: api_key.into(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl CompletionProvider for OpenAiProvider {
    async fn complete(&self, request: &CompletionRequest) -> Result<Completion> {
        let response = self
            .http
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(request)
            .send()
            .await
            .map_err(|e| RevoError::Provider(format!("Failed to send request: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown".to_string());
            return Err(RevoError::Provider(format!(
                "API error {}: {}",
                status,
                truncate(&error_text, MAX_ERROR_BODY_CHARS)
            )));
        }

        let parsed: ChatCompletionResponse = response
            .json()
            .await
            .map_err(|e| RevoError::Provider(format!("Failed to parse response: {}", e)))?;

        Ok(Completion {
            text: parsed.choices.into_iter().next().and_then(|c| c.message.content),
            usage: parsed.usage,
        })
    }
}

fn truncate(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => format!("{}...", &text[..idx]),
        None => text.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ChatMessage, REVIEW_MAX_TOKENS, REVIEW_TEMPERATURE};
    use mockito::Matcher;
    use serde_json::json;

    fn request() -> CompletionRequest {
        CompletionRequest {
            model: "gpt-4o-mini".to_string(),
            messages: vec![ChatMessage::system("sys"), ChatMessage::user("review me")],
            temperature: REVIEW_TEMPERATURE,
            max_tokens: REVIEW_MAX_TOKENS,
        }
    }

    fn provider_for(server: &mockito::Server) -> OpenAiProvider {
        let mut config = RevoConfig::default();
        config.models.base_url = format!("{}/", server.url());
        OpenAiProvider::new(&config, "sk-test").unwrap()
    }

    #[test]
    fn test_endpoint_from_config() {
        let provider = OpenAiProvider::new(&RevoConfig::default(), "sk-test").unwrap();
        assert_eq!(provider.endpoint(), "https://api.openai.com/v1/chat/completions");
    }

    #[tokio::test]
    async fn test_complete_success() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/chat/completions")
            .match_header("authorization", "Bearer sk-test")
            .match_body(Matcher::PartialJson(json!({
                "model": "gpt-4o-mini",
                "max_tokens": 1200,
                "messages": [
                    {"role": "system", "content": "sys"},
                    {"role": "user", "content": "review me"}
                ]
            })))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                json!({
                    "choices": [{"message": {"role": "assistant", "content": "  **Bugs**\n- none  "}}],
                    "usage": {"prompt_tokens": 12, "completion_tokens": 4, "total_tokens": 16}
                })
                .to_string(),
            )
            .create_async()
            .await;

        let completion = provider_for(&server).complete(&request()).await.unwrap();

        assert_eq!(completion.text.as_deref(), Some("  **Bugs**\n- none  "));
        assert_eq!(completion.usage.unwrap().total_tokens, 16);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_complete_null_content() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/chat/completions")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"choices":[{"message":{"role":"assistant","content":null}}]}"#)
            .create_async()
            .await;

        let completion = provider_for(&server).complete(&request()).await.unwrap();
        assert_eq!(completion.text, None);
    }

    #[tokio::test]
    async fn test_complete_http_error() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/chat/completions")
            .with_status(429)
            .with_body("rate limited")
            .create_async()
            .await;

        let err = provider_for(&server).complete(&request()).await.unwrap_err();
        assert!(matches!(err, RevoError::Provider(_)));
        assert!(err.to_string().contains("429"));
        assert!(err.to_string().contains("rate limited"));
    }

    #[tokio::test]
    async fn test_complete_malformed_body() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/chat/completions")
            .with_status(200)
            .with_body("not json")
            .create_async()
            .await;

        let err = provider_for(&server).complete(&request()).await.unwrap_err();
        assert!(matches!(err, RevoError::Provider(_)));
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("ééééé", 2), "éé...");
    }
}
