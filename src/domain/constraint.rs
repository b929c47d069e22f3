//! Version constraints and constraint sets
//!
//! A constraint is one comparator applied to one version literal
//! (e.g., `>=1.0`, `!=1.5`). A constraint set collects every constraint a
//! single requirer declares on a single dependency.

use super::Comparator;
use crate::error::ConstraintError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Characters that can make up a comparator symbol
const OPERATOR_CHARS: &[char] = &['<', '>', '=', '!', '~', '^'];

/// A single (comparator, version literal) pair
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct VersionConstraint {
    /// The comparator
    pub comparator: Comparator,
    /// The version literal exactly as declared
    pub version: String,
}

impl VersionConstraint {
    /// Creates a new constraint
    pub fn new(comparator: Comparator, version: impl Into<String>) -> Self {
        Self {
            comparator,
            version: version.into(),
        }
    }

    /// Builds a constraint from a separate symbol and literal, as found in snapshots
    pub fn from_parts(symbol: &str, version: &str) -> Result<Self, ConstraintError> {
        let raw = format!("{}{}", symbol, version);
        let comparator = symbol
            .trim()
            .parse::<Comparator>()
            .map_err(|_| ConstraintError::unknown_comparator(symbol.trim(), &raw))?;
        let version = version.trim();
        if version.is_empty() {
            return Err(ConstraintError::missing_version(raw));
        }
        Ok(Self::new(comparator, version))
    }
}

impl FromStr for VersionConstraint {
    type Err = ConstraintError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let symbol_len = trimmed
            .find(|c: char| !OPERATOR_CHARS.contains(&c))
            .unwrap_or(trimmed.len());
        let (symbol, version) = trimmed.split_at(symbol_len);

        if symbol.is_empty() {
            return Err(ConstraintError::unknown_comparator("", trimmed));
        }

        Self::from_parts(symbol, version).map_err(|e| match e {
            ConstraintError::UnknownComparator { symbol, .. } => {
                ConstraintError::unknown_comparator(symbol, trimmed)
            }
            ConstraintError::MissingVersion { .. } => ConstraintError::missing_version(trimmed),
        })
    }
}

impl fmt::Display for VersionConstraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.comparator, self.version)
    }
}

/// All constraints one requirer places on one dependency
///
/// Duplicates are ignored on insert; declaration order is kept for display.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConstraintSet {
    constraints: Vec<VersionConstraint>,
}

impl ConstraintSet {
    /// Creates an empty constraint set
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a comma-separated list such as `>=1.0,<2.0,!=1.5`
    pub fn parse(s: &str) -> Result<Self, ConstraintError> {
        s.split(',')
            .map(str::trim)
            .filter(|item| !item.is_empty())
            .map(str::parse::<VersionConstraint>)
            .collect()
    }

    /// Adds a constraint unless an identical one is already present
    pub fn insert(&mut self, constraint: VersionConstraint) -> bool {
        if self.constraints.contains(&constraint) {
            return false;
        }
        self.constraints.push(constraint);
        true
    }

    /// Adds every constraint from another set
    pub fn extend(&mut self, other: ConstraintSet) {
        for constraint in other.constraints {
            self.insert(constraint);
        }
    }

    /// Iterates over the constraints in declaration order
    pub fn iter(&self) -> std::slice::Iter<'_, VersionConstraint> {
        self.constraints.iter()
    }

    pub fn len(&self) -> usize {
        self.constraints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.constraints.is_empty()
    }

    /// Human-readable rendering: each constraint as comparator + literal, comma-joined
    pub fn readable(&self) -> String {
        self.constraints
            .iter()
            .map(|c| c.to_string())
            .collect::<Vec<_>>()
            .join(",")
    }
}

impl FromIterator<VersionConstraint> for ConstraintSet {
    fn from_iter<I: IntoIterator<Item = VersionConstraint>>(iter: I) -> Self {
        let mut set = ConstraintSet::new();
        for constraint in iter {
            set.insert(constraint);
        }
        set
    }
}

impl<'a> IntoIterator for &'a ConstraintSet {
    type Item = &'a VersionConstraint;
    type IntoIter = std::slice::Iter<'a, VersionConstraint>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl fmt::Display for ConstraintSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.readable())
    }
}
