//! Single-shot or map/reduce review of one blob

use revo_agent::{CompletionClient, Usage};
use revo_core::{Result, RevoConfig, RevoError};
use std::num::NonZeroUsize;
use tracing::info;

use crate::blob::Blob;
use crate::prompt::{consolidation_prompt, segment_prompt, single_shot_prompt};
use crate::segment::segment;

/// How a report was produced
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    /// The whole blob went out in one call
    SingleShot,
    /// The blob was segmented, then consolidated
    Chunked { segments: usize },
}

/// The consolidated review
#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    /// Markdown text
    pub text: String,
    pub strategy: Strategy,
    /// Completion calls that succeeded (retries not counted)
    pub calls: usize,
    /// Provider round trips, retries included
    pub attempts: u32,
    /// Token usage summed over every call
    pub usage: Usage,
}

/// Result of reviewing one blob
#[derive(Debug, Clone, PartialEq)]
pub enum ReviewOutcome {
    /// Empty blob; no calls were made
    NoInput,
    Reviewed(Report),
}

impl ReviewOutcome {
    pub fn report(&self) -> Option<&Report> {
        match self {
            ReviewOutcome::NoInput => None,
            ReviewOutcome::Reviewed(report) => Some(report),
        }
    }
}

/// Review pipeline
///
/// Segments are reviewed strictly one after another; the partial reports
/// belong to a single `review` call and are dropped with it.
#[derive(Debug, Clone)]
pub struct ReviewPipeline {
    client: CompletionClient,
    max_chars: NonZeroUsize,
}

impl ReviewPipeline {
    /// Create a pipeline using the configured `review.max_chars`
    pub fn new(config: &RevoConfig, client: CompletionClient) -> Result<Self> {
        let max_chars = NonZeroUsize::new(config.review.max_chars).ok_or_else(|| {
            RevoError::Config("review.max_chars must be at least 1".to_string())
        })?;

        Ok(Self { client, max_chars })
    }

    pub fn max_chars(&self) -> usize {
        self.max_chars.get()
    }

    /// Review `blob` and return the consolidated report
    pub async fn review(&self, blob: &Blob) -> Result<ReviewOutcome> {
        if blob.is_empty() {
            info!("No input detected, skipping review");
            return Ok(ReviewOutcome::NoInput);
        }

        let len = blob.char_len();
        let report = if len <= self.max_chars.get() {
            info!("Reviewing {} chars in a single call", len);
            self.review_single(blob).await?
        } else {
            self.review_chunked(blob).await?
        };

        info!(
            "Review complete ({} calls, {} attempts, {} total tokens)",
            report.calls, report.attempts, report.usage.total_tokens
        );
        Ok(ReviewOutcome::Reviewed(report))
    }

    async fn review_single(&self, blob: &Blob) -> Result<Report> {
        let prompt = single_shot_prompt(blob.framing(), blob.text());
        let result = self
            .client
            .complete_detailed(&prompt)
            .await
            .map_err(|e| RevoError::pipeline("single-shot review", e))?;

        Ok(Report {
            text: result.text,
            strategy: Strategy::SingleShot,
            calls: 1,
            attempts: result.attempts,
            usage: result.usage.unwrap_or_default(),
        })
    }

    async fn review_chunked(&self, blob: &Blob) -> Result<Report> {
        let segments = segment(blob.text(), self.max_chars);
        let total = segments.len();
        info!(
            "Input is {} chars, reviewing in {} segments of up to {}",
            blob.char_len(),
            total,
            self.max_chars
        );

        let mut usage = Usage::default();
        let mut attempts = 0;
        let mut partials = Vec::with_capacity(total);

        for (i, part) in segments.iter().enumerate() {
            info!("Reviewing segment {}/{}", i + 1, total);
            let prompt = segment_prompt(blob.framing(), part);
            let result = self
                .client
                .complete_detailed(&prompt)
                .await
                .map_err(|e| RevoError::pipeline(format!("segment {}/{}", i + 1, total), e))?;

            if let Some(ref u) = result.usage {
                usage.accumulate(u);
            }
            attempts += result.attempts;
            partials.push(result.text);
        }

        info!("Consolidating {} partial reports", partials.len());
        let result = self
            .client
            .complete_detailed(&consolidation_prompt(&partials))
            .await
            .map_err(|e| RevoError::pipeline("consolidation", e))?;

        if let Some(ref u) = result.usage {
            usage.accumulate(u);
        }
        attempts += result.attempts;

        Ok(Report {
            text: result.text,
            strategy: Strategy::Chunked { segments: total },
            calls: total + 1,
            attempts,
            usage,
        })
    }
}
