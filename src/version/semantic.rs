//! Semantic version ordering backed by the semver crate

use super::VersionScheme;
use crate::error::VersionError;
use semver::Version;
use std::borrow::Cow;

/// Orders semantic versions (`1.2.3`, `1.2.3-beta.1`)
///
/// A leading `v` is stripped and missing minor/patch components are
/// treated as zero, so `v1.2` orders as `1.2.0`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SemverScheme;

impl VersionScheme for SemverScheme {
    type Version = Version;

    fn name(&self) -> &'static str {
        "semver"
    }

    fn parse(&self, literal: &str) -> Result<Version, VersionError> {
        let trimmed = literal.trim();
        let trimmed = trimmed.strip_prefix('v').unwrap_or(trimmed);
        Version::parse(&pad_components(trimmed))
            .map_err(|e| VersionError::new(literal, self.name(), e.to_string()))
    }
}

/// Pad `1` / `1.2` to `1.0.0` / `1.2.0`, keeping any pre-release or build suffix
fn pad_components(s: &str) -> Cow<'_, str> {
    let core_end = s.find(['-', '+']).unwrap_or(s.len());
    let (core, suffix) = s.split_at(core_end);
    let parts = core.split('.').count();
    if parts >= 3 {
        return Cow::Borrowed(s);
    }
    let mut padded = core.to_string();
    for _ in parts..3 {
        padded.push_str(".0");
    }
    padded.push_str(suffix);
    Cow::Owned(padded)
}
