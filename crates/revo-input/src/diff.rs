//! Diff resolution
//!
//! Staged changes win. When nothing is staged (or the index cannot be read),
//! a CI-provided `base...head` range is diffed instead. With neither, the
//! resolved diff is empty and the caller reports that nothing was found.

use revo_core::{CiContext, Result, RevoError};
use tracing::{debug, info};

use crate::command::GitExecutor;

/// Resolves the diff to review
pub struct DiffResolver<E: GitExecutor> {
    git: E,
    range: Option<(String, String)>,
}

impl<E: GitExecutor> DiffResolver<E> {
    pub fn new(git: E) -> Self {
        Self { git, range: None }
    }

    /// Fall back to `git diff base...head` when nothing is staged
    pub fn with_range(mut self, base: impl Into<String>, head: impl Into<String>) -> Self {
        self.range = Some((base.into(), head.into()));
        self
    }

    /// Take the commit range from CI context, if both ends are set
    pub fn with_ci_context(self, ci: &CiContext) -> Self {
        match ci.commit_range() {
            Some((base, head)) => self.with_range(base, head),
            None => self,
        }
    }

    /// Get the diff text, or an empty string if there is none
    pub async fn get_diff(&self) -> Result<String> {
        match self.git.exec(&["diff", "--cached"]).await {
            Ok(output) if output.success => {
                let staged = output.stdout.trim_end_matches('\n');
                if !staged.is_empty() {
                    info!("Using staged diff ({} chars)", staged.chars().count());
                    return Ok(staged.to_string());
                }
                debug!("Nothing staged");
            }
            Ok(output) => debug!("Could not read staged diff: {}", output.stderr.trim()),
            Err(e) => debug!("Could not read staged diff: {}", e),
        }

        let Some((base, head)) = &self.range else {
            return Ok(String::new());
        };

        let range = format!("{}...{}", base, head);
        let output = self.git.exec(&["diff", range.as_str()]).await?;
        if !output.success {
            return Err(RevoError::Git(format!(
                "git diff {} failed: {}",
                range,
                output.stderr.trim()
            )));
        }

        let diff = output.stdout.trim_end_matches('\n').to_string();
        info!("Using diff {} ({} chars)", range, diff.chars().count());
        Ok(diff)
    }
}
