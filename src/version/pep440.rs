//! PEP 440 version ordering backed by pep440_rs

use super::VersionScheme;
use crate::error::VersionError;
use pep440_rs::Version;
use std::str::FromStr;

/// Orders Python distribution versions (`1.0`, `1.0a1`, `1.0.post2`, `2!1.0`)
#[derive(Debug, Clone, Copy, Default)]
pub struct Pep440Scheme;

impl VersionScheme for Pep440Scheme {
    type Version = Version;

    fn name(&self) -> &'static str {
        "pep440"
    }

    fn parse(&self, literal: &str) -> Result<Version, VersionError> {
        Version::from_str(literal.trim())
            .map_err(|e| VersionError::new(literal, self.name(), e.to_string()))
    }
}
