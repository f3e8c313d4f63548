//! Shared data types

use serde::{Deserialize, Serialize};
use std::path::Path;

/// A file captured for file-mode review
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceFile {
    /// Path as given on the command line
    pub path: String,
    /// Full UTF-8 content
    pub content: String,
}

impl SourceFile {
    pub fn new(path: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            content: content.into(),
        }
    }

    /// Language tag used for the fenced code block of this file
    pub fn language(&self) -> SourceLanguage {
        SourceLanguage::from_path(&self.path)
    }
}

/// Language tag inferred from a file extension
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceLanguage {
    Python,
    TypeScript,
    JavaScript,
}

impl SourceLanguage {
    /// `.py` is python, `.ts` is typescript, anything else is javascript
    pub fn from_path(path: &str) -> Self {
        match Path::new(path).extension().and_then(|e| e.to_str()) {
            Some("py") => SourceLanguage::Python,
            Some("ts") => SourceLanguage::TypeScript,
            _ => SourceLanguage::JavaScript,
        }
    }

    /// Fence tag for Markdown code blocks
    pub fn fence_tag(&self) -> &'static str {
        match self {
            SourceLanguage::Python => "python",
            SourceLanguage::TypeScript => "typescript",
            SourceLanguage::JavaScript => "javascript",
        }
    }
}

impl std::fmt::Display for SourceLanguage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.fence_tag())
    }
}
