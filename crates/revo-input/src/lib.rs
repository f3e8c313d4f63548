//! # revo-input
//!
//! Input resolution for revo reviews.
//!
//! This crate provides:
//! - Git command execution abstraction (mockable in tests)
//! - Diff resolution: staged changes first, then a CI commit range
//! - File loading for file-mode reviews

mod command;
mod diff;
mod files;

pub use command::{GitCommand, GitExecutor, GitOutput, MockGitExecutor};
pub use diff::DiffResolver;
pub use files::get_files;
