//! CLI argument parsing module for depconflict

use crate::error::ConfigError;
use crate::graph::PackageFilter;
use crate::provider::{PackageSource, TargetEnvironment};
use crate::version::SchemeKind;
use clap::{ArgAction, Parser};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// Installed package conflict checker
#[derive(Parser, Debug, Clone)]
#[command(
    name = "depconflict",
    version,
    about = "Check installed Python packages for version conflicts"
)]
pub struct CliArgs {
    /// site-packages directories to scan (default: the active virtualenv)
    pub paths: Vec<PathBuf>,

    /// Read packages from a JSON or TOML snapshot instead of directories
    #[arg(long, value_name = "FILE", conflicts_with = "paths")]
    pub snapshot: Option<PathBuf>,

    /// Version ordering used for range constraints
    #[arg(long, value_enum, default_value_t = SchemeKind::Pep440)]
    pub scheme: SchemeKind,

    /// Python version requirement markers are evaluated for (default: detected from the site-packages path)
    #[arg(long, value_name = "X.Y")]
    pub python_version: Option<String>,

    // Package filters
    /// Skip a dependency (can be specified multiple times)
    #[arg(long, action = ArgAction::Append)]
    pub exclude: Vec<String>,

    /// Check only specific dependencies (can be specified multiple times)
    #[arg(long, action = ArgAction::Append)]
    pub only: Vec<String>,

    // Output options
    /// Output results in JSON format
    #[arg(long)]
    pub json: bool,

    /// Enable verbose output
    #[arg(long)]
    pub verbose: bool,

    /// Enable quiet mode - minimal output
    #[arg(short, long)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,

    /// Enable debug logging on stderr
    #[arg(long)]
    pub debug: bool,
}

impl CliArgs {
    /// Reject option combinations that clap cannot express
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.quiet && self.verbose {
            return Err(ConfigError::ConflictingOptions {
                message: "--quiet and --verbose cannot be used together".to_string(),
            });
        }
        Ok(())
    }

    /// Resolve where installed packages are read from
    pub fn package_source(&self) -> Result<PackageSource, ConfigError> {
        self.resolve_source(env::var_os("VIRTUAL_ENV").map(PathBuf::from))
    }

    fn resolve_source(&self, virtual_env: Option<PathBuf>) -> Result<PackageSource, ConfigError> {
        if let Some(ref snapshot) = self.snapshot {
            return Ok(PackageSource::Snapshot(snapshot.clone()));
        }
        if !self.paths.is_empty() {
            return Ok(PackageSource::Directories(self.paths.clone()));
        }

        let dirs = virtual_env
            .as_deref()
            .map(virtualenv_site_packages)
            .unwrap_or_default();
        if dirs.is_empty() {
            return Err(ConfigError::NoPackageSource);
        }
        Ok(PackageSource::Directories(dirs))
    }

    /// Interpreter that `--python-version` names, if given
    pub fn target(&self) -> Result<Option<TargetEnvironment>, ConfigError> {
        self.python_version
            .as_deref()
            .map(TargetEnvironment::for_python)
            .transpose()
    }

    /// Build the dependency filter from `--only` / `--exclude`
    pub fn build_filter(&self) -> PackageFilter {
        PackageFilter::new()
            .with_exclude(self.exclude.clone())
            .with_only(self.only.clone())
    }
}

/// site-packages directories of a virtual environment
///
/// POSIX layouts use `lib/pythonX.Y/site-packages`, Windows uses
/// `Lib/site-packages`.
pub fn virtualenv_site_packages(venv: &Path) -> Vec<PathBuf> {
    let mut dirs: Vec<PathBuf> = fs::read_dir(venv.join("lib"))
        .into_iter()
        .flatten()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_name().to_string_lossy().starts_with("python"))
        .map(|entry| entry.path().join("site-packages"))
        .chain(std::iter::once(venv.join("Lib").join("site-packages")))
        .filter(|dir| dir.is_dir())
        .collect();
    dirs.sort();
    dirs.dedup();
    dirs
}
