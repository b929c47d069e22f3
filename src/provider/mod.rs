//! Package providers for installed package metadata
//!
//! This module provides:
//! - The PackageProvider trait the orchestrator reads packages through
//! - A site-packages scanner for Python environments
//! - A snapshot file reader (JSON or TOML)
//! - Core metadata and PEP 508 requirement parsing
//! - Environment marker evaluation for a target interpreter

mod marker;
mod metadata;
mod requirement;
mod site_packages;
mod snapshot;

pub use marker::{python_version_from_path, TargetEnvironment};
pub use requirement::parse_requirement;
pub use site_packages::SitePackagesProvider;
pub use snapshot::SnapshotProvider;

use crate::domain::PackageRecord;
use crate::error::ProviderError;
use std::path::PathBuf;

/// Source of installed packages and their declared requirements
pub trait PackageProvider {
    /// Provider name for diagnostics
    fn name(&self) -> &'static str;

    /// List every installed package with its requirements
    fn list_installed_packages(&self) -> Result<Vec<PackageRecord>, ProviderError>;
}

/// Where installed package metadata comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PackageSource {
    /// site-packages directories
    Directories(Vec<PathBuf>),
    /// A snapshot file
    Snapshot(PathBuf),
}

/// Create a package provider for the given source
///
/// `target` fixes the environment requirement markers are evaluated for;
/// snapshots carry no markers and ignore it.
pub fn create_provider(
    source: &PackageSource,
    target: Option<TargetEnvironment>,
) -> Box<dyn PackageProvider> {
    match source {
        PackageSource::Directories(dirs) => {
            Box::new(SitePackagesProvider::new(dirs.clone()).with_target(target))
        }
        PackageSource::Snapshot(path) => Box::new(SnapshotProvider::new(path.clone())),
    }
}

/// A fixed package list, useful for embedding and tests
impl PackageProvider for Vec<PackageRecord> {
    fn name(&self) -> &'static str {
        "static"
    }

    fn list_installed_packages(&self) -> Result<Vec<PackageRecord>, ProviderError> {
        Ok(self.clone())
    }
}
