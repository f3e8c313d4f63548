//! # revo-core
//!
//! Core types for the revo chunked code-review pipeline.
//!
//! Everything the other crates share lives here:
//! - [`RevoError`], the unified error taxonomy
//! - [`RevoConfig`], the explicit configuration object built once at startup
//! - [`SourceFile`], a file captured for file-mode review

pub mod config;
mod error;
mod types;

pub use config::{CiContext, ModelConfig, ReviewConfig, RevoConfig};
pub use error::{RevoError, Result};
pub use types::*;
