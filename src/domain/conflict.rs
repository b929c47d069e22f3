//! Conflict records produced by an audit

use super::ConstraintSet;
use crate::error::VersionError;
use serde::Serialize;
use std::fmt;

/// An installed dependency that fails the constraints of one requirer
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Conflict {
    dependency: String,
    requirer: String,
    installed_version: String,
    constraints: ConstraintSet,
}

impl Conflict {
    /// Creates a new conflict record
    pub fn new(
        dependency: impl Into<String>,
        requirer: impl Into<String>,
        installed_version: impl Into<String>,
        constraints: ConstraintSet,
    ) -> Self {
        Self {
            dependency: dependency.into(),
            requirer: requirer.into(),
            installed_version: installed_version.into(),
            constraints,
        }
    }

    /// Name of the package whose installed version failed
    pub fn dependency(&self) -> &str {
        &self.dependency
    }

    /// Name of the package that declared the constraints
    pub fn requirer(&self) -> &str {
        &self.requirer
    }

    pub fn installed_version(&self) -> &str {
        &self.installed_version
    }

    pub fn constraints(&self) -> &ConstraintSet {
        &self.constraints
    }

    /// The failing constraints, e.g. `>=1.0,<2.0`
    pub fn readable_constraints(&self) -> String {
        self.constraints.readable()
    }
}

impl fmt::Display for Conflict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}({}) {}({})",
            self.dependency,
            self.installed_version,
            self.requirer,
            self.readable_constraints()
        )
    }
}

/// A (dependency, requirer) pair that could not be checked
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationFailure {
    /// Name of the dependency being checked
    pub dependency: String,
    /// Name of the package that declared the constraints
    pub requirer: String,
    /// The comparison error
    pub error: VersionError,
}

impl ValidationFailure {
    pub fn new(
        dependency: impl Into<String>,
        requirer: impl Into<String>,
        error: VersionError,
    ) -> Self {
        Self {
            dependency: dependency.into(),
            requirer: requirer.into(),
            error,
        }
    }
}

impl fmt::Display for ValidationFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} required by {}: {}", self.dependency, self.requirer, self.error)
    }
}
