//! Installed distribution discovery in `site-packages` directories
//!
//! Recognized entries:
//! - `*.dist-info/METADATA` (wheels, modern installs)
//! - `*.egg-info/PKG-INFO` with optional `requires.txt` (setuptools)
//! - `*.egg-info` single files (legacy distutils installs)
//!
//! Requirement markers are evaluated for the configured target environment,
//! or for the interpreter named by a `lib/pythonX.Y/site-packages` path.

use super::marker::TargetEnvironment;
use super::metadata::{parse_metadata, parse_requires_txt};
use super::requirement::parse_requirement;
use super::PackageProvider;
use crate::domain::PackageRecord;
use crate::error::ProviderError;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Reads installed packages from one or more site-packages directories
pub struct SitePackagesProvider {
    dirs: Vec<PathBuf>,
    /// Environment for marker evaluation; detected per directory when unset
    target: Option<TargetEnvironment>,
}

impl SitePackagesProvider {
    /// Create a provider scanning `dirs` in order
    pub fn new(dirs: Vec<PathBuf>) -> Self {
        Self { dirs, target: None }
    }

    /// Evaluate requirement markers for `target` instead of detecting it
    pub fn with_target(mut self, target: Option<TargetEnvironment>) -> Self {
        self.target = target;
        self
    }

    fn scan_dir(
        &self,
        dir: &Path,
        packages: &mut Vec<PackageRecord>,
    ) -> Result<(), ProviderError> {
        if !dir.is_dir() {
            return Err(ProviderError::directory_not_found(dir));
        }

        let mut entries: Vec<PathBuf> = fs::read_dir(dir)
            .map_err(|e| ProviderError::read_error(dir, e))?
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .collect();
        entries.sort();

        let detected;
        let target = match self.target {
            Some(ref target) => Some(target),
            None => {
                detected = TargetEnvironment::detect(dir);
                detected.as_ref()
            }
        };
        match target {
            Some(target) => debug!(
                "Evaluating markers for Python {} in {}",
                target.python_version(),
                dir.display()
            ),
            None => debug!(
                "Unknown interpreter for {}, marker-guarded requirements are skipped",
                dir.display()
            ),
        }

        for path in entries {
            let record = match distribution_kind(&path) {
                Some(DistributionKind::DistInfo) => read_dist_info(&path, target),
                Some(DistributionKind::EggInfoDir) => read_egg_info_dir(&path, target),
                Some(DistributionKind::EggInfoFile) => read_metadata_file(&path, None, target),
                None => continue,
            };

            match record {
                Ok(Some(record)) => {
                    debug!("Found {} ({} requirements)", record, record.requires.len());
                    packages.push(record);
                }
                Ok(None) => warn!("Skipping {}: missing Name or Version", path.display()),
                Err(e) => warn!("Skipping {}: {}", path.display(), e),
            }
        }

        Ok(())
    }
}

impl PackageProvider for SitePackagesProvider {
    fn name(&self) -> &'static str {
        "site-packages"
    }

    fn list_installed_packages(&self) -> Result<Vec<PackageRecord>, ProviderError> {
        let mut packages = Vec::new();
        for dir in &self.dirs {
            self.scan_dir(dir, &mut packages)?;
        }
        Ok(packages)
    }
}

enum DistributionKind {
    DistInfo,
    EggInfoDir,
    EggInfoFile,
}

fn distribution_kind(path: &Path) -> Option<DistributionKind> {
    let extension = path.extension()?.to_str()?;
    match (extension, path.is_dir()) {
        ("dist-info", true) => Some(DistributionKind::DistInfo),
        ("egg-info", true) => Some(DistributionKind::EggInfoDir),
        ("egg-info", false) => Some(DistributionKind::EggInfoFile),
        _ => None,
    }
}

fn read_dist_info(
    dir: &Path,
    target: Option<&TargetEnvironment>,
) -> Result<Option<PackageRecord>, ProviderError> {
    read_metadata_file(&dir.join("METADATA"), None, target)
}

fn read_egg_info_dir(
    dir: &Path,
    target: Option<&TargetEnvironment>,
) -> Result<Option<PackageRecord>, ProviderError> {
    let requires_path = dir.join("requires.txt");
    let requires = if requires_path.is_file() {
        let content = fs::read_to_string(&requires_path)
            .map_err(|e| ProviderError::read_error(&requires_path, e))?;
        Some(parse_requires_txt(&content))
    } else {
        None
    };
    read_metadata_file(&dir.join("PKG-INFO"), requires, target)
}

/// Build a record from a metadata file; `requires` overrides its Requires-Dist headers
fn read_metadata_file(
    path: &Path,
    requires: Option<Vec<String>>,
    target: Option<&TargetEnvironment>,
) -> Result<Option<PackageRecord>, ProviderError> {
    let content = fs::read_to_string(path).map_err(|e| ProviderError::read_error(path, e))?;
    let metadata = parse_metadata(&content);

    let (Some(name), Some(version)) = (metadata.name, metadata.version) else {
        return Ok(None);
    };

    let lines = requires.unwrap_or(metadata.requires_dist);
    let record = lines
        .iter()
        .filter_map(|line| parse_requirement(line, target))
        .fold(PackageRecord::new(name, version), PackageRecord::with_requirement);
    Ok(Some(record))
}
