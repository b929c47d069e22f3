//! JSON output formatter for machine processing
//!
//! This module provides:
//! - JSON serialization of conflicts and unverifiable requirements
//! - Run metadata (timestamp, scheme, counts)

use crate::domain::{Conflict, ValidationFailure, VersionConstraint};
use crate::orchestrator::OrchestratorResult;
use crate::output::{OutputFormatter, Verbosity};
use crate::version::SchemeKind;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::io::Write;

/// JSON formatter for machine-readable output
pub struct JsonFormatter {
    /// Verbose output adds the structured constraint list to each conflict
    verbosity: Verbosity,
}

impl JsonFormatter {
    /// Create a new JSON formatter
    pub fn new(verbosity: Verbosity) -> Self {
        Self { verbosity }
    }

    fn conflict_to_json<'a>(&self, conflict: &'a Conflict) -> JsonConflict<'a> {
        let specs = if self.verbosity == Verbosity::Verbose {
            conflict.constraints().iter().collect()
        } else {
            Vec::new()
        };

        JsonConflict {
            dependency: conflict.dependency(),
            requirer: conflict.requirer(),
            installed_version: conflict.installed_version(),
            constraints: conflict.readable_constraints(),
            specs,
        }
    }
}

/// JSON representation of the full result
#[derive(Serialize)]
struct JsonOutput<'a> {
    /// When the audit ran
    generated_at: DateTime<Utc>,
    /// Version scheme used for range checks
    scheme: SchemeKind,
    /// Installed packages seen
    packages: usize,
    /// (dependency, requirer) pairs validated
    checked_pairs: usize,
    conflicts: Vec<JsonConflict<'a>>,
    errors: Vec<JsonError<'a>>,
}

/// JSON summary without the per-pair details
#[derive(Serialize)]
struct JsonSummary {
    scheme: SchemeKind,
    packages: usize,
    checked_pairs: usize,
    conflicts: usize,
    errors: usize,
}

#[derive(Serialize)]
struct JsonConflict<'a> {
    dependency: &'a str,
    requirer: &'a str,
    installed_version: &'a str,
    /// Comma-joined constraints, e.g. `>=1.0,<2.0`
    constraints: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    specs: Vec<&'a VersionConstraint>,
}

#[derive(Serialize)]
struct JsonError<'a> {
    dependency: &'a str,
    requirer: &'a str,
    literal: &'a str,
    message: String,
}

impl<'a> From<&'a ValidationFailure> for JsonError<'a> {
    fn from(failure: &'a ValidationFailure) -> Self {
        Self {
            dependency: &failure.dependency,
            requirer: &failure.requirer,
            literal: &failure.error.literal,
            message: failure.error.to_string(),
        }
    }
}

impl OutputFormatter for JsonFormatter {
    fn format(&self, result: &OrchestratorResult, writer: &mut dyn Write) -> std::io::Result<()> {
        let outcome = &result.outcome;

        let output = JsonOutput {
            generated_at: Utc::now(),
            scheme: result.scheme,
            packages: result.packages,
            checked_pairs: outcome.checked_pairs,
            conflicts: outcome
                .conflicts
                .iter()
                .map(|c| self.conflict_to_json(c))
                .collect(),
            errors: outcome.errors.iter().map(JsonError::from).collect(),
        };

        let json = serde_json::to_string_pretty(&output).map_err(std::io::Error::other)?;

        writeln!(writer, "{}", json)?;

        Ok(())
    }

    fn format_summary(
        &self,
        result: &OrchestratorResult,
        writer: &mut dyn Write,
    ) -> std::io::Result<()> {
        let output = JsonSummary {
            scheme: result.scheme,
            packages: result.packages,
            checked_pairs: result.outcome.checked_pairs,
            conflicts: result.outcome.conflicts.len(),
            errors: result.outcome.errors.len(),
        };

        let json = serde_json::to_string_pretty(&output).map_err(std::io::Error::other)?;

        writeln!(writer, "{}", json)?;

        Ok(())
    }
}
