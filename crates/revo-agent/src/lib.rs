//! # revo-agent
//!
//! Completion client for the revo review pipeline.
//!
//! Every completion call is stateless: one system message, one user prompt,
//! no conversation history. The client wraps a [`CompletionProvider`] with a
//! bounded retry loop whose backoff delay goes through a pluggable
//! [`Sleeper`], so tests can run failure sequences without waiting.

mod auth;
mod client;
mod mock;
mod provider;
mod retry;
mod types;

pub use auth::{get_api_key, get_api_key_from};
pub use client::{CompletionClient, REVIEWER_SYSTEM_PROMPT};
pub use mock::ScriptedProvider;
pub use provider::{CompletionProvider, OpenAiProvider};
pub use retry::{NoSleep, RecordingSleeper, RetryPolicy, Sleeper, TokioSleeper};
pub use types::*;
