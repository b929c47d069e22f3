//! Installed versions and the requirement graph
//!
//! This module provides:
//! - Package name normalization
//! - The installed version table (one version per dependency)
//! - The requirement graph: dependency → requirer → constraint set
//! - Construction of both from provider records
//! - Dependency filters (`--only` / `--exclude`)
//!
//! Both tables are keyed by normalized dependency name and ordered, so
//! iteration is stable between runs.

mod filter;

pub use filter::PackageFilter;

use crate::domain::{ConstraintSet, PackageRecord};
use regex::Regex;
use std::collections::btree_map;
use std::collections::BTreeMap;
use std::sync::LazyLock;
use tracing::debug;

static SEPARATOR_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[-_.]+").unwrap());

/// Normalize a package name: lowercase, runs of `-`, `_`, `.` become `-`
pub fn normalize_name(name: &str) -> String {
    SEPARATOR_RE
        .replace_all(name.trim(), "-")
        .to_lowercase()
}

/// An installed package as recorded in the version table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstalledPackage {
    /// Name as reported by the package
    pub name: String,
    /// Installed version literal
    pub version: String,
}

/// One installed version per dependency; later registrations replace earlier ones
#[derive(Debug, Clone, Default)]
pub struct InstalledVersions {
    packages: BTreeMap<String, InstalledPackage>,
}

impl InstalledVersions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an installed version, returning the one it replaced
    pub fn insert(
        &mut self,
        name: impl Into<String>,
        version: impl Into<String>,
    ) -> Option<InstalledPackage> {
        let name = name.into();
        let package = InstalledPackage {
            version: version.into(),
            name: name.clone(),
        };
        self.packages.insert(normalize_name(&name), package)
    }

    /// Look up the installed package for a dependency name
    pub fn get(&self, name: &str) -> Option<&InstalledPackage> {
        self.packages.get(&normalize_name(name))
    }

    pub fn len(&self) -> usize {
        self.packages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.packages.is_empty()
    }

    pub fn iter(&self) -> btree_map::Values<'_, String, InstalledPackage> {
        self.packages.values()
    }
}

impl<N: Into<String>, V: Into<String>> FromIterator<(N, V)> for InstalledVersions {
    fn from_iter<I: IntoIterator<Item = (N, V)>>(iter: I) -> Self {
        let mut installed = InstalledVersions::new();
        for (name, version) in iter {
            installed.insert(name, version);
        }
        installed
    }
}

/// Requirers of one dependency with the constraints each declares
pub type Requirers = BTreeMap<String, ConstraintSet>;

/// dependency → requirer → constraint set
#[derive(Debug, Clone, Default)]
pub struct RequirementGraph {
    dependencies: BTreeMap<String, Requirers>,
}

impl RequirementGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a dependency without adding a requirer
    pub fn add_dependency(&mut self, dependency: &str) {
        self.dependencies
            .entry(normalize_name(dependency))
            .or_default();
    }

    /// Record that `requirer` constrains `dependency`; repeated calls merge sets
    pub fn require(&mut self, dependency: &str, requirer: &str, constraints: ConstraintSet) {
        self.dependencies
            .entry(normalize_name(dependency))
            .or_default()
            .entry(requirer.to_string())
            .or_default()
            .extend(constraints);
    }

    /// Requirers of a dependency, if it is present in the graph
    pub fn requirers(&self, dependency: &str) -> Option<&Requirers> {
        self.dependencies.get(&normalize_name(dependency))
    }

    /// Iterate over (normalized dependency name, requirers) in name order
    pub fn iter(&self) -> btree_map::Iter<'_, String, Requirers> {
        self.dependencies.iter()
    }

    /// Keep only the dependencies accepted by `filter`
    pub fn retain(&mut self, filter: &PackageFilter) {
        self.dependencies
            .retain(|name, _| filter.should_process_package(name));
    }

    /// Number of dependencies in the graph
    pub fn len(&self) -> usize {
        self.dependencies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dependencies.is_empty()
    }

    /// Number of (dependency, requirer) pairs
    pub fn pair_count(&self) -> usize {
        self.dependencies.values().map(BTreeMap::len).sum()
    }
}

/// Installed versions and requirements gathered from one provider listing
#[derive(Debug, Clone, Default)]
pub struct PackageGraph {
    pub installed: InstalledVersions,
    pub requirements: RequirementGraph,
}

impl PackageGraph {
    /// Build both tables from provider records
    pub fn from_packages(packages: &[PackageRecord]) -> Self {
        let mut graph = PackageGraph::default();

        for package in packages {
            if let Some(previous) = graph.installed.insert(&package.name, &package.version) {
                debug!(
                    "{} registered twice ({} then {}), keeping the latest",
                    package.name, previous.version, package.version
                );
            }
            graph.requirements.add_dependency(&package.name);

            for requirement in &package.requires {
                graph.requirements.require(
                    &requirement.name,
                    &package.name,
                    requirement.constraints.clone(),
                );
            }
        }

        debug!(
            "Built requirement graph: {} installed, {} dependencies, {} pairs",
            graph.installed.len(),
            graph.requirements.len(),
            graph.requirements.pair_count()
        );
        graph
    }
}
