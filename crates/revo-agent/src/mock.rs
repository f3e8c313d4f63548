//! Scripted provider for tests

use async_trait::async_trait;
use revo_core::{Result, RevoError};
use std::collections::VecDeque;
use std::sync::{Mutex, MutexGuard};

use crate::provider::CompletionProvider;
use crate::types::{Completion, CompletionRequest};

type Step = std::result::Result<Completion, String>;

/// Provider that replays a script of responses and records every request
///
/// Scripted steps are consumed in order. Once the script is exhausted the
/// fallback (if any) answers every further call; without one, the call fails.
#[derive(Default)]
pub struct ScriptedProvider {
    script: Mutex<VecDeque<Step>>,
    fallback: Option<Step>,
    requests: Mutex<Vec<CompletionRequest>>,
}

impl ScriptedProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Provider that answers every call with `text`
    pub fn always(text: impl Into<String>) -> Self {
        Self::new().otherwise(text)
    }

    /// Provider that fails every call with `message`
    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            fallback: Some(Err(message.into())),
            ..Self::default()
        }
    }

    pub fn then_ok(self, text: impl Into<String>) -> Self {
        self.lock_script().push_back(Ok(Completion::text(text)));
        self
    }

    pub fn then_empty(self) -> Self {
        self.lock_script().push_back(Ok(Completion::default()));
        self
    }

    pub fn then_err(self, message: impl Into<String>) -> Self {
        self.lock_script().push_back(Err(message.into()));
        self
    }

    pub fn otherwise(mut self, text: impl Into<String>) -> Self {
        self.fallback = Some(Ok(Completion::text(text)));
        self
    }

    /// Number of calls made so far
    pub fn calls(&self) -> usize {
        self.lock_requests().len()
    }

    /// Every request received, in order
    pub fn requests(&self) -> Vec<CompletionRequest> {
        self.lock_requests().clone()
    }

    /// User prompts received, in order
    pub fn prompts(&self) -> Vec<String> {
        self.lock_requests()
            .iter()
            .filter_map(|r| r.user_prompt().map(str::to_string))
            .collect()
    }

    fn lock_script(&self) -> MutexGuard<'_, VecDeque<Step>> {
        self.script
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn lock_requests(&self) -> MutexGuard<'_, Vec<CompletionRequest>> {
        self.requests
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[async_trait]
impl CompletionProvider for ScriptedProvider {
    async fn complete(&self, request: &CompletionRequest) -> Result<Completion> {
        self.lock_requests().push(request.clone());

        let step = self
            .lock_script()
            .pop_front()
            .or_else(|| self.fallback.clone())
            .unwrap_or_else(|| Err("No scripted response left".to_string()));

        step.map_err(RevoError::Provider)
    }
}
