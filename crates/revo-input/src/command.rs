//! Git command execution abstraction

use async_trait::async_trait;
use revo_core::{Result, RevoError};
use std::collections::HashMap;
use std::path::PathBuf;
use std::process::Output;
use std::sync::{Arc, Mutex};
use tokio::process::Command;
use tracing::{debug, instrument};

/// Output from a git command
#[derive(Debug, Clone, Default)]
pub struct GitOutput {
    pub stdout: String,
    pub stderr: String,
    pub success: bool,
}

impl GitOutput {
    /// Successful output with the given stdout
    pub fn ok(stdout: impl Into<String>) -> Self {
        Self {
            stdout: stdout.into(),
            stderr: String::new(),
            success: true,
        }
    }

    /// Failed output with the given stderr
    pub fn failed(stderr: impl Into<String>) -> Self {
        Self {
            stdout: String::new(),
            stderr: stderr.into(),
            success: false,
        }
    }
}

impl From<Output> for GitOutput {
    fn from(output: Output) -> Self {
        Self {
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
            success: output.status.success(),
        }
    }
}

/// Trait for executing git commands (allows mocking in tests)
///
/// A command that runs but exits non-zero is an `Ok` output with
/// `success == false`. `Err` is reserved for failing to spawn git at all.
#[async_trait]
pub trait GitExecutor: Send + Sync {
    /// Execute a git command with the given arguments
    async fn exec(&self, args: &[&str]) -> Result<GitOutput>;

    /// Get the repository root
    fn repo_root(&self) -> &PathBuf;
}

/// Real git command executor
#[derive(Debug, Clone)]
pub struct GitCommand {
    repo_root: PathBuf,
}

impl GitCommand {
    /// Create a new git executor for the given repository
    pub fn new(repo_root: impl Into<PathBuf>) -> Self {
        Self {
            repo_root: repo_root.into(),
        }
    }

    /// Auto-detect repository root from the current directory
    pub async fn detect() -> Result<Self> {
        let output = Command::new("git")
            .args(["rev-parse", "--show-toplevel"])
            .output()
            .await
            .map_err(|e| RevoError::Git(format!("Failed to run git rev-parse: {}", e)))?;

        if !output.status.success() {
            return Err(RevoError::Git("Not in a git repository".to_string()));
        }

        let root = String::from_utf8_lossy(&output.stdout).trim().to_string();
        Ok(Self::new(root))
    }

    /// Detect the repository root, falling back to the current directory
    pub async fn detect_or_cwd() -> Result<Self> {
        match Self::detect().await {
            Ok(git) => Ok(git),
            Err(e) => {
                debug!("{}; using current directory", e);
                Ok(Self::new(std::env::current_dir()?))
            }
        }
    }
}

#[async_trait]
impl GitExecutor for GitCommand {
    #[instrument(skip(self), fields(repo = %self.repo_root.display()))]
    async fn exec(&self, args: &[&str]) -> Result<GitOutput> {
        debug!("Executing git {:?}", args);

        let output = Command::new("git")
            .args(args)
            .current_dir(&self.repo_root)
            .output()
            .await
            .map_err(|e| RevoError::Git(format!("Failed to execute git: {}", e)))?;

        let git_output = GitOutput::from(output);

        if !git_output.success {
            debug!("git command failed: {}", git_output.stderr.trim());
        }

        Ok(git_output)
    }

    fn repo_root(&self) -> &PathBuf {
        &self.repo_root
    }
}

/// Mock git executor for testing
///
/// Answers from canned responses keyed by the joined argument list and
/// records every command it is asked to run. Clones share the record, so a
/// test can hand one clone to the code under test and inspect the other.
#[derive(Clone)]
pub struct MockGitExecutor {
    repo_root: PathBuf,
    responses: HashMap<String, GitOutput>,
    received: Arc<Mutex<Vec<String>>>,
}

impl Default for MockGitExecutor {
    fn default() -> Self {
        Self::new()
    }
}

impl MockGitExecutor {
    pub fn new() -> Self {
        Self {
            repo_root: PathBuf::from("/mock/repo"),
            responses: HashMap::new(),
            received: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn with_response(mut self, command: &str, output: GitOutput) -> Self {
        self.responses.insert(command.to_string(), output);
        self
    }

    /// Commands received so far, in order, as space-joined arguments
    pub fn received(&self) -> Vec<String> {
        self.received
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    /// Whether no command has been run yet
    pub fn is_untouched(&self) -> bool {
        self.received().is_empty()
    }
}

#[async_trait]
impl GitExecutor for MockGitExecutor {
    async fn exec(&self, args: &[&str]) -> Result<GitOutput> {
        let key = args.join(" ");
        self.received
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(key.clone());

        self.responses
            .get(&key)
            .cloned()
            .ok_or_else(|| RevoError::Git(format!("No mock response for: {}", key)))
    }

    fn repo_root(&self) -> &PathBuf {
        &self.repo_root
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_executor() {
        let executor = MockGitExecutor::new().with_response("diff --cached", GitOutput::ok("+x"));

        let output = executor.exec(&["diff", "--cached"]).await.unwrap();
        assert!(output.success);
        assert_eq!(output.stdout, "+x");
    }

    #[tokio::test]
    async fn test_mock_executor_unknown_command() {
        let executor = MockGitExecutor::new();
        assert!(executor.exec(&["status"]).await.is_err());
        // unanswered commands are still recorded
        assert_eq!(executor.received(), vec!["status"]);
    }

    #[tokio::test]
    async fn test_mock_executor_clones_share_record() {
        let executor = MockGitExecutor::new()
            .with_response("diff --cached", GitOutput::ok(""))
            .with_response("diff a...b", GitOutput::ok("+x"));
        let handle = executor.clone();
        assert!(handle.is_untouched());

        executor.exec(&["diff", "--cached"]).await.unwrap();
        executor.exec(&["diff", "a...b"]).await.unwrap();

        assert!(!handle.is_untouched());
        assert_eq!(handle.received(), vec!["diff --cached", "diff a...b"]);
    }

    #[test]
    fn test_git_command_root() {
        let dir = tempfile::tempdir().unwrap();
        let git = GitCommand::new(dir.path());
        assert_eq!(git.repo_root(), &dir.path().to_path_buf());
    }

    #[test]
    fn test_output_constructors() {
        let ok = GitOutput::ok("out");
        assert!(ok.success);
        assert_eq!(ok.stdout, "out");

        let failed = GitOutput::failed("fatal: bad revision");
        assert!(!failed.success);
        assert!(failed.stdout.is_empty());
    }
}
