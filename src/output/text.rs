//! Text output formatter for human-readable display
//!
//! Conflicts are printed between 50-dash banners:
//!
//! ```text
//! --------------------------------------------------
//!  Conflicts Detected
//! --------------------------------------------------
//!  - one(1.0) three(>=2.0)
//! --------------------------------------------------
//! ```

use crate::orchestrator::OrchestratorResult;
use crate::output::{OutputFormatter, Verbosity};
use colored::Colorize;
use std::io::Write;

const BANNER_WIDTH: usize = 50;

/// Text formatter for human-readable output
pub struct TextFormatter {
    /// Verbosity level
    verbosity: Verbosity,
    /// Whether to use colors
    color: bool,
}

impl TextFormatter {
    /// Create a new text formatter
    pub fn new(verbosity: Verbosity) -> Self {
        Self {
            verbosity,
            color: true,
        }
    }

    /// Create a new text formatter with color option
    pub fn with_color(verbosity: Verbosity, color: bool) -> Self {
        Self { verbosity, color }
    }

    fn heading(&self, title: &str) -> String {
        if self.color {
            format!(" {}", title.red().bold())
        } else {
            format!(" {}", title)
        }
    }

    /// Write a titled block of ` - ` lines framed by banners
    fn write_section<I>(&self, title: &str, lines: I, writer: &mut dyn Write) -> std::io::Result<()>
    where
        I: IntoIterator<Item = String>,
    {
        let banner = "-".repeat(BANNER_WIDTH);
        writeln!(writer, "{}", banner)?;
        writeln!(writer, "{}", self.heading(title))?;
        writeln!(writer, "{}", banner)?;
        for line in lines {
            writeln!(writer, " - {}", line)?;
        }
        writeln!(writer, "{}", banner)
    }
}

impl OutputFormatter for TextFormatter {
    fn format(&self, result: &OrchestratorResult, writer: &mut dyn Write) -> std::io::Result<()> {
        let outcome = &result.outcome;

        if !outcome.conflicts.is_empty() {
            self.write_section(
                "Conflicts Detected",
                outcome.conflicts.iter().map(ToString::to_string),
                writer,
            )?;
        }

        if !outcome.errors.is_empty() {
            self.write_section(
                "Unverifiable Requirements",
                outcome.errors.iter().map(ToString::to_string),
                writer,
            )?;
        }

        self.format_summary(result, writer)
    }

    fn format_summary(
        &self,
        result: &OrchestratorResult,
        writer: &mut dyn Write,
    ) -> std::io::Result<()> {
        if self.verbosity != Verbosity::Verbose {
            return Ok(());
        }

        let outcome = &result.outcome;
        if outcome.is_clean() {
            let message = "No conflicts detected";
            if self.color {
                write!(writer, "{}", message.green())?;
            } else {
                write!(writer, "{}", message)?;
            }
        } else {
            write!(
                writer,
                "{} conflict(s), {} unverifiable",
                outcome.conflicts.len(),
                outcome.errors.len()
            )?;
        }

        writeln!(
            writer,
            " ({} packages, {} requirements checked, {})",
            result.packages, outcome.checked_pairs, result.scheme
        )
    }
}
