//! revo CLI - chunked AI code review
//!
//! Usage:
//!   revo review                     Review the staged diff (or the CI commit range)
//!   revo review --mode file <paths> Review whole files
//!   revo init                       Write a default .revo/config.toml

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use revo_agent::{get_api_key_from, CompletionClient, OpenAiProvider};
use revo_core::RevoConfig;
use revo_input::{get_files, DiffResolver, GitCommand, GitExecutor};
use revo_review::{Blob, OutputSink, ReviewPipeline};
use std::io::{self, Write};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser)]
#[command(name = "revo")]
#[command(author, version, about = "Chunked AI code review for diffs and files")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Review a diff or a set of files
    Review {
        /// What to review
        #[arg(long, value_enum, default_value = "diff")]
        mode: Mode,

        /// Files to review (file mode)
        paths: Vec<PathBuf>,

        /// Model identifier (overrides config and OPENAI_MODEL)
        #[arg(short, long)]
        model: Option<String>,

        /// Segment size in characters (overrides config and REVO_MAX_CHARS)
        #[arg(long)]
        max_chars: Option<usize>,
    },

    /// Write a default .revo/config.toml
    Init {
        /// Repository path (defaults to current directory)
        #[arg(default_value = ".")]
        path: PathBuf,
    },
}

/// Review input mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Mode {
    /// Staged diff, falling back to GITHUB_BASE_SHA...GITHUB_HEAD_SHA
    Diff,
    /// The files given as arguments
    File,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    // Logs go to stderr; stdout carries only the report
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(io::stderr))
        .with(filter)
        .init();

    match cli.command {
        Commands::Review {
            mode,
            paths,
            model,
            max_chars,
        } => cmd_review(mode, paths, model, max_chars).await,
        Commands::Init { path } => cmd_init(path),
    }
}

async fn cmd_review(
    mode: Mode,
    paths: Vec<PathBuf>,
    model: Option<String>,
    max_chars: Option<usize>,
) -> Result<()> {
    let git = GitCommand::detect_or_cwd().await?;

    let mut config = RevoConfig::load_or_default(git.repo_root())?;
    config.apply_env(|key| std::env::var(key).ok())?;
    apply_overrides(&mut config, model, max_chars);
    config.validate()?;

    let mut stdout = io::stdout();
    run_review(
        &config,
        mode,
        &paths,
        git,
        |key| std::env::var(key).ok(),
        &mut stdout,
    )
    .await
}

/// Check the credential, resolve input, review it and write the result to `out`
///
/// The credential is read through `lookup` before `git` or any path is
/// touched, so a missing key never costs an input resolution.
async fn run_review<E, F, W>(
    config: &RevoConfig,
    mode: Mode,
    paths: &[PathBuf],
    git: E,
    lookup: F,
    out: &mut W,
) -> Result<()>
where
    E: GitExecutor,
    F: Fn(&str) -> Option<String>,
    W: Write,
{
    let api_key = get_api_key_from(&config.models.api_key_env, lookup)?;

    let provider = OpenAiProvider::new(config, api_key)?;
    let client = CompletionClient::new(config, Arc::new(provider));
    let pipeline = ReviewPipeline::new(config, client)?;

    info!(
        "Reviewing with model {} (max {} chars per call)",
        config.models.default,
        pipeline.max_chars()
    );

    let blob = match mode {
        Mode::Diff => {
            let diff = DiffResolver::new(git)
                .with_ci_context(&config.ci)
                .get_diff()
                .await
                .context("Failed to resolve diff")?;
            Blob::diff(diff)
        }
        Mode::File => {
            let files = get_files(paths).await?;
            Blob::files(&files)
        }
    };

    let outcome = pipeline.review(&blob).await?;

    OutputSink::from_config(config)
        .emit(&outcome, blob.framing(), out)
        .context("Failed to write report")?;

    Ok(())
}

fn cmd_init(path: PathBuf) -> Result<()> {
    let config_path = RevoConfig::config_path(&path);
    if config_path.exists() {
        println!("Config already exists at {}", config_path.display());
        return Ok(());
    }

    let written = RevoConfig::write_default(&path)
        .with_context(|| format!("Failed to write config under {}", path.display()))?;
    println!("Created {}", written.display());
    Ok(())
}

/// Apply CLI flags on top of file and environment settings
fn apply_overrides(config: &mut RevoConfig, model: Option<String>, max_chars: Option<usize>) {
    if let Some(model) = model {
        config.models.default = model;
    }
    if let Some(max_chars) = max_chars {
        config.review.max_chars = max_chars;
    }
}
