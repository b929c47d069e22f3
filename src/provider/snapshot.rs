//! Package snapshot files (JSON or TOML)
//!
//! A snapshot lists installed packages with structured requirements:
//!
//! ```toml
//! [[packages]]
//! name = "app"
//! version = "1.0"
//! requires = [{ name = "requests", specs = [[">=", "2.0"], ["<", "3.0"]] }]
//! ```
//!
//! The JSON form has the same shape under a top-level `"packages"` key.

use super::PackageProvider;
use crate::domain::{ConstraintSet, PackageRecord, Requirement, VersionConstraint};
use crate::error::ProviderError;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize)]
struct Snapshot {
    #[serde(default)]
    packages: Vec<SnapshotPackage>,
}

#[derive(Debug, Deserialize)]
struct SnapshotPackage {
    name: String,
    version: String,
    #[serde(default)]
    requires: Vec<SnapshotRequirement>,
}

#[derive(Debug, Deserialize)]
struct SnapshotRequirement {
    name: String,
    #[serde(default)]
    specs: Vec<(String, String)>,
}

/// Reads installed packages from a snapshot file
pub struct SnapshotProvider {
    path: PathBuf,
}

impl SnapshotProvider {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn is_json(&self) -> bool {
        self.path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"))
    }
}

impl PackageProvider for SnapshotProvider {
    fn name(&self) -> &'static str {
        "snapshot"
    }

    fn list_installed_packages(&self) -> Result<Vec<PackageRecord>, ProviderError> {
        let content =
            fs::read_to_string(&self.path).map_err(|e| ProviderError::read_error(&self.path, e))?;

        let snapshot = if self.is_json() {
            parse_json(&self.path, &content)?
        } else {
            parse_toml(&self.path, &content)?
        };

        snapshot
            .packages
            .into_iter()
            .map(into_record)
            .collect()
    }
}

fn parse_json(path: &Path, content: &str) -> Result<Snapshot, ProviderError> {
    serde_json::from_str(content).map_err(|e| ProviderError::json_parse_error(path, e.to_string()))
}

fn parse_toml(path: &Path, content: &str) -> Result<Snapshot, ProviderError> {
    toml::from_str(content).map_err(|e| ProviderError::toml_parse_error(path, e.to_string()))
}

fn into_record(package: SnapshotPackage) -> Result<PackageRecord, ProviderError> {
    let mut record = PackageRecord::new(package.name, package.version);

    for requirement in package.requires {
        let constraints = requirement
            .specs
            .iter()
            .map(|(symbol, version)| VersionConstraint::from_parts(symbol, version))
            .collect::<Result<ConstraintSet, _>>()
            .map_err(|e| ProviderError::invalid_constraint(&record.name, e))?;
        record = record.with_requirement(Requirement::new(requirement.name, constraints));
    }

    Ok(record)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ConstraintError;
    use tempfile::TempDir;

    fn write(temp: &TempDir, file: &str, content: &str) -> PathBuf {
        let path = temp.path().join(file);
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_load_json_snapshot() {
        let temp = TempDir::new().unwrap();
        let path = write(
            &temp,
            "packages.json",
            r#"{"packages": [
                {"name": "one", "version": "1.0"},
                {"name": "three", "version": "3.0",
                 "requires": [{"name": "one", "specs": [[">=", "2.0"]]}]}
            ]}"#,
        );

        let packages = SnapshotProvider::new(path).list_installed_packages().unwrap();
        assert_eq!(packages.len(), 2);
        assert!(packages[0].requires.is_empty());
        assert_eq!(packages[1].requires[0].to_string(), "one>=2.0");
    }

    #[test]
    fn test_load_toml_snapshot() {
        let temp = TempDir::new().unwrap();
        let path = write(
            &temp,
            "packages.toml",
            r#"
[[packages]]
name = "app"
version = "1.0"
requires = [{ name = "requests", specs = [[">=", "2.0"], ["<", "3.0"]] }, { name = "six" }]

[[packages]]
name = "requests"
version = "2.31.0"
"#,
        );

        let packages = SnapshotProvider::new(path).list_installed_packages().unwrap();
        assert_eq!(packages.len(), 2);
        assert_eq!(packages[0].requires.len(), 2);
        assert_eq!(packages[0].requires[0].constraints.readable(), ">=2.0,<3.0");
        assert!(packages[0].requires[1].constraints.is_empty());
    }

    #[test]
    fn test_unknown_comparator_rejected() {
        let temp = TempDir::new().unwrap();
        let path = write(
            &temp,
            "bad.json",
            r#"{"packages": [{"name": "app", "version": "1.0",
                "requires": [{"name": "lib", "specs": [["=>", "1.0"]]}]}]}"#,
        );

        let err = SnapshotProvider::new(path)
            .list_installed_packages()
            .unwrap_err();
        match err {
            ProviderError::InvalidConstraint { package, source } => {
                assert_eq!(package, "app");
                assert_eq!(source, ConstraintError::unknown_comparator("=>", "=>1.0"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_invalid_json() {
        let temp = TempDir::new().unwrap();
        let path = write(&temp, "broken.json", "{not json");
        let err = SnapshotProvider::new(path)
            .list_installed_packages()
            .unwrap_err();
        assert!(matches!(err, ProviderError::JsonParseError { .. }));
    }

    #[test]
    fn test_invalid_toml() {
        let temp = TempDir::new().unwrap();
        let path = write(&temp, "broken.toml", "packages = [[");
        let err = SnapshotProvider::new(path)
            .list_installed_packages()
            .unwrap_err();
        assert!(matches!(err, ProviderError::TomlParseError { .. }));
    }

    #[test]
    fn test_missing_file() {
        let err = SnapshotProvider::new("/nonexistent/snapshot.json")
            .list_installed_packages()
            .unwrap_err();
        assert!(matches!(err, ProviderError::ReadError { .. }));
    }

    #[test]
    fn test_empty_snapshot() {
        let temp = TempDir::new().unwrap();
        let path = write(&temp, "empty.toml", "");
        let packages = SnapshotProvider::new(path).list_installed_packages().unwrap();
        assert!(packages.is_empty());
    }
}
