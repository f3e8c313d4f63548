//! Configuration management for revo
//!
//! [`RevoConfig`] is built once at startup and handed by reference to the
//! provider, the completion client and the review pipeline. Layers, lowest
//! precedence first:
//!
//! 1. Built-in defaults
//! 2. `.revo/config.toml` in the repo root
//! 3. Environment variables (see [`RevoConfig::apply_env`])
//! 4. CLI flags, applied by the binary

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::{Result, RevoError};

/// Default character threshold for a single completion call (~8k tokens)
pub const DEFAULT_MAX_CHARS: usize = 12_000;

/// Repository-level revo configuration
///
/// Loaded from `.revo/config.toml` in the repo root.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RevoConfig {
    /// Model and provider selection
    #[serde(default)]
    pub models: ModelConfig,

    /// Review pipeline tuning
    #[serde(default)]
    pub review: ReviewConfig,

    /// CI context, only ever taken from the environment
    #[serde(skip)]
    pub ci: CiContext,
}

/// Model configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelConfig {
    /// Model identifier sent with every request
    #[serde(default = "default_model")]
    pub default: String,

    /// Environment variable containing the API key
    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,

    /// Base URL of the OpenAI-compatible API
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

/// Review pipeline configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReviewConfig {
    /// Blobs longer than this many characters are segmented
    #[serde(default = "default_max_chars")]
    pub max_chars: usize,

    /// Per-request HTTP deadline
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

/// CI-provided context (GitHub Actions style)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CiContext {
    /// Base commit of the range to diff when nothing is staged
    pub base_sha: Option<String>,
    /// Head commit of the range to diff when nothing is staged
    pub head_sha: Option<String>,
    /// Step summary file the report is written to
    pub step_summary: Option<PathBuf>,
}

impl CiContext {
    /// Both ends of the commit range, if both are set
    pub fn commit_range(&self) -> Option<(&str, &str)> {
        match (self.base_sha.as_deref(), self.head_sha.as_deref()) {
            (Some(base), Some(head)) => Some((base, head)),
            _ => None,
        }
    }
}

// Default value providers
fn default_model() -> String {
    "gpt-4o-mini".to_string()
}

fn default_api_key_env() -> String {
    "OPENAI_API_KEY".to_string()
}

fn default_base_url() -> String {
    "https://api.openai.com/v1".to_string()
}

fn default_max_chars() -> usize {
    DEFAULT_MAX_CHARS
}

fn default_request_timeout_secs() -> u64 {
    120
}

impl RevoConfig {
    /// Path of the config file relative to a repo root
    pub fn config_path(repo_root: &Path) -> PathBuf {
        repo_root.join(".revo/config.toml")
    }

    /// Load configuration from `.revo/config.toml` or use defaults
    pub fn load_or_default(repo_root: &Path) -> Result<Self> {
        let config_path = Self::config_path(repo_root);

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let config: Self = toml::from_str(&content).map_err(|e| {
                RevoError::Config(format!(
                    "Failed to parse {}: {}",
                    config_path.display(),
                    e
                ))
            })?;
            tracing::debug!("Loaded config from {}", config_path.display());
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    /// Write default configuration to `.revo/config.toml`
    pub fn write_default(repo_root: &Path) -> Result<PathBuf> {
        let config_dir = repo_root.join(".revo");
        std::fs::create_dir_all(&config_dir)?;

        let config_path = Self::config_path(repo_root);
        let content = toml::to_string_pretty(&Self::default())
            .map_err(|e| RevoError::Other(format!("Failed to serialize config: {}", e)))?;
        std::fs::write(&config_path, content)?;
        Ok(config_path)
    }

    /// Overlay environment variables read through `lookup`
    ///
    /// Recognized: `OPENAI_MODEL`, `OPENAI_BASE_URL`, `REVO_MAX_CHARS`,
    /// `GITHUB_BASE_SHA`, `GITHUB_HEAD_SHA`, `GITHUB_STEP_SUMMARY`.
    /// Empty values are treated as unset.
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(model) = get("OPENAI_MODEL") {
            self.models.default = model;
        }
        if let Some(base_url) = get("OPENAI_BASE_URL") {
            self.models.base_url = base_url;
        }
        if let Some(raw) = get("REVO_MAX_CHARS") {
            self.review.max_chars = raw.trim().parse().map_err(|_| {
                RevoError::Config(format!("REVO_MAX_CHARS must be a positive integer, got '{}'", raw))
            })?;
        }

        self.ci = CiContext {
            base_sha: get("GITHUB_BASE_SHA"),
            head_sha: get("GITHUB_HEAD_SHA"),
            step_summary: get("GITHUB_STEP_SUMMARY").map(PathBuf::from),
        };

        Ok(())
    }

    /// Reject settings the pipeline cannot run with
    pub fn validate(&self) -> Result<()> {
        if self.review.max_chars == 0 {
            return Err(RevoError::Config(
                "review.max_chars must be at least 1".to_string(),
            ));
        }
        if self.models.default.trim().is_empty() {
            return Err(RevoError::Config("models.default must not be empty".to_string()));
        }
        Ok(())
    }
}

impl Default for RevoConfig {
    fn default() -> Self {
        Self {
            models: ModelConfig::default(),
            review: ReviewConfig::default(),
            ci: CiContext::default(),
        }
    }
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            default: default_model(),
            api_key_env: default_api_key_env(),
            base_url: default_base_url(),
        }
    }
}

impl Default for ReviewConfig {
    fn default() -> Self {
        Self {
            max_chars: default_max_chars(),
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}
