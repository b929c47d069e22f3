//! PEP 508 environment markers
//!
//! A requirement such as `numpy>=1.26; python_version >= "3.12"` only applies
//! to some interpreters. Markers are evaluated against a target environment
//! built from the interpreter version and the host platform; requirements
//! whose marker is false are not checked.

use crate::error::ConfigError;
use pep508_rs::{MarkerEnvironment, MarkerEnvironmentBuilder, MarkerTree};
use regex::Regex;
use std::path::Path;
use std::str::FromStr;
use std::sync::LazyLock;
use tracing::warn;

static PYTHON_DIR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^python(\d+\.\d+)$").unwrap());
static PYTHON_VERSION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d+)\.(\d+)(?:\.(\d+))?$").unwrap());

/// The interpreter and platform that installed packages are checked for
#[derive(Debug, Clone)]
pub struct TargetEnvironment {
    python_version: String,
    markers: MarkerEnvironment,
}

impl TargetEnvironment {
    /// Target a Python `X.Y` or `X.Y.Z` interpreter on the host platform
    pub fn for_python(version: &str) -> Result<Self, ConfigError> {
        let invalid = |message: String| ConfigError::invalid_python_version(version, message);

        let caps = PYTHON_VERSION_RE
            .captures(version.trim())
            .ok_or_else(|| invalid("expected X.Y or X.Y.Z".to_string()))?;
        let python_version = format!("{}.{}", &caps[1], &caps[2]);
        let python_full_version = format!(
            "{}.{}",
            python_version,
            caps.get(3).map_or("0", |patch| patch.as_str())
        );

        let (os_name, sys_platform, platform_system) = host_platform();
        let markers = MarkerEnvironment::try_from(MarkerEnvironmentBuilder {
            implementation_name: "cpython",
            implementation_version: &python_full_version,
            os_name,
            platform_machine: std::env::consts::ARCH,
            platform_python_implementation: "CPython",
            platform_release: "",
            platform_system,
            platform_version: "",
            python_full_version: &python_full_version,
            python_version: &python_version,
            sys_platform,
        })
        .map_err(|e| invalid(e.to_string()))?;

        Ok(Self {
            python_version,
            markers,
        })
    }

    /// Detect the interpreter from a `lib/pythonX.Y/site-packages` layout
    pub fn detect(site_packages: &Path) -> Option<Self> {
        let version = python_version_from_path(site_packages)?;
        Self::for_python(&version).ok()
    }

    /// Interpreter version as `X.Y`
    pub fn python_version(&self) -> &str {
        &self.python_version
    }

    /// Whether a requirement guarded by `marker` applies to this environment
    ///
    /// Optional (`extra`) requirements never apply. A marker that cannot be
    /// parsed is treated as applying.
    pub fn applies(&self, marker: &str) -> bool {
        match MarkerTree::from_str(marker) {
            Ok(tree) => tree.evaluate(&self.markers, &[]),
            Err(e) => {
                warn!("Cannot evaluate marker '{}': {}", marker, e);
                true
            }
        }
    }
}

/// `X.Y` from the nearest `pythonX.Y` path component
pub fn python_version_from_path(path: &Path) -> Option<String> {
    path.components().rev().find_map(|component| {
        let name = component.as_os_str().to_str()?;
        PYTHON_DIR_RE
            .captures(name)
            .map(|caps| caps[1].to_string())
    })
}

/// (`os_name`, `sys_platform`, `platform_system`) for the host OS
fn host_platform() -> (&'static str, &'static str, &'static str) {
    match std::env::consts::OS {
        "windows" => ("nt", "win32", "Windows"),
        "macos" => ("posix", "darwin", "Darwin"),
        "freebsd" => ("posix", "freebsd", "FreeBSD"),
        _ => ("posix", "linux", "Linux"),
    }
}
