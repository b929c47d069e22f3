//! Dependency name filter configuration
//!
//! This module provides the PackageFilter struct that encapsulates the
//! `--only` / `--exclude` options applied before conflicts are searched.

use super::normalize_name;

/// Filter configuration for the dependencies being audited
#[derive(Debug, Clone, Default)]
pub struct PackageFilter {
    /// Dependencies to leave out of the audit
    pub exclude: Vec<String>,
    /// If non-empty, only audit these dependencies
    pub only: Vec<String>,
}

impl PackageFilter {
    /// Create a new PackageFilter with default settings (audit all)
    pub fn new() -> Self {
        Self::default()
    }

    /// Set dependencies to exclude
    pub fn with_exclude(mut self, exclude: Vec<String>) -> Self {
        self.exclude = exclude;
        self
    }

    /// Set dependencies to include (only list)
    pub fn with_only(mut self, only: Vec<String>) -> Self {
        self.only = only;
        self
    }

    /// Check if a dependency should be audited; names compare normalized
    pub fn should_process_package(&self, name: &str) -> bool {
        let name = normalize_name(name);
        if !self.only.is_empty() {
            return self.only.iter().any(|p| normalize_name(p) == name);
        }
        !self.exclude.iter().any(|p| normalize_name(p) == name)
    }
}
