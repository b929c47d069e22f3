//! Version ordering schemes
//!
//! This module provides:
//! - The `VersionScheme` trait used by the validator to order version literals
//! - PEP 440 ordering for Python distributions (via pep440_rs)
//! - Semantic version ordering (via semver)

mod pep440;
mod semantic;

pub use pep440::Pep440Scheme;
pub use semantic::SemverScheme;

use crate::error::VersionError;
use serde::Serialize;
use std::cmp::Ordering;
use std::fmt;

/// A total ordering over version literals
pub trait VersionScheme {
    /// Parsed, comparable representation of a literal
    type Version: Ord;

    /// Scheme name used in messages and reports
    fn name(&self) -> &'static str;

    /// Parse a literal, failing when the scheme cannot order it
    fn parse(&self, literal: &str) -> Result<Self::Version, VersionError>;

    /// Compare two literals
    fn compare(&self, a: &str, b: &str) -> Result<Ordering, VersionError> {
        Ok(self.parse(a)?.cmp(&self.parse(b)?))
    }
}

/// Selectable version schemes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum SchemeKind {
    /// PEP 440 (Python packaging)
    #[default]
    Pep440,
    /// Semantic Versioning 2.0
    Semver,
}

impl SchemeKind {
    pub fn name(&self) -> &'static str {
        match self {
            SchemeKind::Pep440 => Pep440Scheme.name(),
            SchemeKind::Semver => SemverScheme.name(),
        }
    }
}

impl fmt::Display for SchemeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
