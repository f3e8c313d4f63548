//! Report output: console and CI step summary

use revo_core::{Result, RevoConfig};
use std::io::Write;
use std::path::PathBuf;

use crate::blob::Framing;
use crate::pipeline::ReviewOutcome;

/// Where a finished review goes
#[derive(Debug, Clone, Default)]
pub struct OutputSink {
    step_summary: Option<PathBuf>,
}

impl OutputSink {
    pub fn new(step_summary: Option<PathBuf>) -> Self {
        Self { step_summary }
    }

    /// Use the step summary path from CI context, if any
    pub fn from_config(config: &RevoConfig) -> Self {
        Self::new(config.ci.step_summary.clone())
    }

    pub fn step_summary(&self) -> Option<&PathBuf> {
        self.step_summary.as_ref()
    }

    /// Notice printed when there was nothing to review
    pub fn no_input_notice(framing: Framing) -> &'static str {
        match framing {
            Framing::Diff => "⚠️  Nenhum diff detectado.",
            Framing::Files => "⚠️  Nenhum arquivo informado.",
        }
    }

    /// Print the outcome to `out` and mirror a report to the step summary
    ///
    /// The summary file is overwritten with the report text verbatim. A
    /// `NoInput` outcome prints a notice and leaves the summary untouched.
    pub fn emit<W: Write>(&self, outcome: &ReviewOutcome, framing: Framing, out: &mut W) -> Result<()> {
        let report = match outcome {
            ReviewOutcome::NoInput => {
                writeln!(out, "{}", Self::no_input_notice(framing))?;
                return Ok(());
            }
            ReviewOutcome::Reviewed(report) => report,
        };

        writeln!(out, "{}", report.text)?;

        if let Some(path) = &self.step_summary {
            std::fs::write(path, &report.text)?;
            tracing::info!("Wrote step summary to {}", path.display());
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::{Report, Strategy};
    use revo_agent::Usage;

    fn reviewed(text: &str) -> ReviewOutcome {
        ReviewOutcome::Reviewed(Report {
            text: text.to_string(),
            strategy: Strategy::SingleShot,
            calls: 1,
            attempts: 1,
            usage: Usage::default(),
        })
    }

    #[test]
    fn test_prints_report() {
        let mut out = Vec::new();
        OutputSink::default()
            .emit(&reviewed("**Bugs**\n- none"), Framing::Diff, &mut out)
            .unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "**Bugs**\n- none\n");
    }

    #[test]
    fn test_writes_step_summary_verbatim() {
        let dir = tempfile::tempdir().unwrap();
        let summary = dir.path().join("summary.md");
        std::fs::write(&summary, "stale").unwrap();

        let sink = OutputSink::new(Some(summary.clone()));
        let mut out = Vec::new();
        sink.emit(&reviewed("# TL;DR\nok"), Framing::Diff, &mut out).unwrap();

        assert_eq!(std::fs::read_to_string(&summary).unwrap(), "# TL;DR\nok");
    }

    #[test]
    fn test_no_input_prints_notice_only() {
        let dir = tempfile::tempdir().unwrap();
        let summary = dir.path().join("summary.md");

        let sink = OutputSink::new(Some(summary.clone()));
        let mut out = Vec::new();
        sink.emit(&ReviewOutcome::NoInput, Framing::Diff, &mut out).unwrap();

        assert_eq!(String::from_utf8(out).unwrap(), "⚠️  Nenhum diff detectado.\n");
        assert!(!summary.exists());
    }

    #[test]
    fn test_no_input_notice_per_framing() {
        let mut out = Vec::new();
        OutputSink::default()
            .emit(&ReviewOutcome::NoInput, Framing::Files, &mut out)
            .unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "⚠️  Nenhum arquivo informado.\n");
    }

    #[test]
    fn test_from_config() {
        let mut config = RevoConfig::default();
        assert!(OutputSink::from_config(&config).step_summary().is_none());

        config.ci.step_summary = Some(PathBuf::from("/tmp/s.md"));
        assert_eq!(
            OutputSink::from_config(&config).step_summary(),
            Some(&PathBuf::from("/tmp/s.md"))
        );
    }
}
