//! Installed package records as reported by a package provider

use super::ConstraintSet;
use serde::Serialize;
use std::fmt;

/// A requirement one package declares on another
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Requirement {
    /// Name of the required package
    pub name: String,
    /// Version constraints placed on it (may be empty)
    pub constraints: ConstraintSet,
}

impl Requirement {
    /// Creates a new requirement
    pub fn new(name: impl Into<String>, constraints: ConstraintSet) -> Self {
        Self {
            name: name.into(),
            constraints,
        }
    }

    /// Creates a requirement with no version constraint
    pub fn any(name: impl Into<String>) -> Self {
        Self::new(name, ConstraintSet::new())
    }
}

impl fmt::Display for Requirement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.name, self.constraints)
    }
}

/// An installed package with its own declared requirements
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PackageRecord {
    /// Package name as published
    pub name: String,
    /// Installed version literal
    pub version: String,
    /// Requirements declared by this package
    pub requires: Vec<Requirement>,
}

impl PackageRecord {
    /// Creates a package record without requirements
    pub fn new(name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
            requires: Vec::new(),
        }
    }

    /// Adds a requirement (builder pattern)
    pub fn with_requirement(mut self, requirement: Requirement) -> Self {
        self.requires.push(requirement);
        self
    }
}

impl fmt::Display for PackageRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}=={}", self.name, self.version)
    }
}
