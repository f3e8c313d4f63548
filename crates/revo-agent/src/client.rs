//! Completion client with bounded exponential-backoff retry
//!
//! One logical call is at most `max_attempts` provider round trips. Every
//! provider error is retried the same way: rate limits and network faults
//! are not told apart from bad requests. A malformed request therefore costs
//! the full attempt budget before it surfaces.

use chrono::Utc;
use revo_core::{Result, RevoConfig};
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::provider::CompletionProvider;
use crate::retry::{RetryPolicy, Sleeper, TokioSleeper};
use crate::types::{
    ChatMessage, CompletionRequest, CompletionResult, REVIEW_MAX_TOKENS, REVIEW_TEMPERATURE,
};

/// Reviewer persona sent as the system message of every request
pub const REVIEWER_SYSTEM_PROMPT: &str = "\
Você é um revisor sênior para projetos Node (frontend) e Python (backend).
1. Identifique bugs, vulnerabilidades e breaking changes.
2. Sugira refatorações (Clean Code, PEP 8, ESLint).
3. Sugira testes automatizados.
Saída em Markdown com seções: **Bugs · Melhorias · Testes · TL;DR**.";

/// Client for single review completions
#[derive(Clone)]
pub struct CompletionClient {
    provider: Arc<dyn CompletionProvider>,
    sleeper: Arc<dyn Sleeper>,
    policy: RetryPolicy,
    model: String,
    system_prompt: String,
    temperature: f64,
    max_tokens: u32,
}

impl CompletionClient {
    /// Create a client for the configured model
    pub fn new(config: &RevoConfig, provider: Arc<dyn CompletionProvider>) -> Self {
        Self {
            provider,
            sleeper: Arc::new(TokioSleeper),
            policy: RetryPolicy::default(),
            model: config.models.default.clone(),
            system_prompt: REVIEWER_SYSTEM_PROMPT.to_string(),
            temperature: REVIEW_TEMPERATURE,
            max_tokens: REVIEW_MAX_TOKENS,
        }
    }

    /// Replace the backoff delay implementation
    pub fn with_sleeper(mut self, sleeper: Arc<dyn Sleeper>) -> Self {
        self.sleeper = sleeper;
        self
    }

    /// Replace the retry policy
    pub fn with_retry_policy(mut self, policy: RetryPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Build the request sent for `prompt`
    pub fn build_request(&self, prompt: &str) -> CompletionRequest {
        CompletionRequest {
            model: self.model.clone(),
            messages: vec![
                ChatMessage::system(self.system_prompt.as_str()),
                ChatMessage::user(prompt),
            ],
            temperature: self.temperature,
            max_tokens: self.max_tokens,
        }
    }

    /// Run one logical completion and return the trimmed text
    ///
    /// Returns an empty string when the provider sent no content.
    pub async fn complete(&self, prompt: &str) -> Result<String> {
        Ok(self.complete_detailed(prompt).await?.text)
    }

    /// Run one logical completion, keeping attempt count and usage
    pub async fn complete_detailed(&self, prompt: &str) -> Result<CompletionResult> {
        let request = self.build_request(prompt);
        let max_attempts = self.policy.max_attempts();
        let mut attempt = 0;

        loop {
            debug!(
                "Sending completion request ({} chars, attempt {}/{})",
                prompt.chars().count(),
                attempt + 1,
                max_attempts
            );

            match self.provider.complete(&request).await {
                Ok(completion) => {
                    let result = CompletionResult {
                        text: completion
                            .text
                            .map(|t| t.trim().to_string())
                            .unwrap_or_default(),
                        attempts: attempt + 1,
                        timestamp: Utc::now(),
                        usage: completion.usage,
                    };

                    match result.usage {
                        Some(ref usage) => info!(
                            "Completion done at {} after {} attempt(s) ({} chars, {} prompt tokens, {} completion tokens)",
                            result.timestamp.format("%H:%M:%S"),
                            result.attempts,
                            result.text.len(),
                            usage.prompt_tokens,
                            usage.completion_tokens
                        ),
                        None => info!(
                            "Completion done at {} after {} attempt(s) ({} chars)",
                            result.timestamp.format("%H:%M:%S"),
                            result.attempts,
                            result.text.len()
                        ),
                    }

                    return Ok(result);
                }
                Err(e) if self.policy.should_retry(attempt) => {
                    let delay = self.policy.delay_for(attempt);
                    warn!(
                        "Completion attempt {}/{} failed: {}. Retrying in {:?}",
                        attempt + 1,
                        max_attempts,
                        e,
                        delay
                    );
                    self.sleeper.sleep(delay).await;
                    attempt += 1;
                }
                Err(e) => {
                    warn!("Completion failed after {} attempts: {}", max_attempts, e);
                    return Err(e);
                }
            }
        }
    }
}

impl std::fmt::Debug for CompletionClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CompletionClient")
            .field("policy", &self.policy)
            .field("model", &self.model)
            .field("temperature", &self.temperature)
            .field("max_tokens", &self.max_tokens)
            .finish_non_exhaustive()
    }
}
