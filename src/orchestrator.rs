//! Audit orchestrator coordinating the whole check
//!
//! This module provides:
//! - Workflow coordination: list packages → build graph → filter → find conflicts
//! - Version scheme selection
//! - Progress display while metadata is read

use crate::aggregate::{find_conflicts, AuditOutcome};
use crate::cli::CliArgs;
use crate::error::{AppError, ProviderError};
use crate::graph::{PackageFilter, PackageGraph};
use crate::progress::ReadProgress;
use crate::provider::{create_provider, PackageProvider};
use crate::version::{Pep440Scheme, SchemeKind, SemverScheme};
use tracing::debug;

/// Exit code when at least one conflict was found
pub const EXIT_CONFLICTS: u8 = 1;

/// Exit code for validation failures and fatal errors
pub const EXIT_ERROR: u8 = 2;

/// Orchestrator for one audit run
pub struct Orchestrator {
    /// Source of installed packages
    provider: Box<dyn PackageProvider>,
    /// Version ordering used for range checks
    scheme: SchemeKind,
    /// Dependency filter
    filter: PackageFilter,
    /// Whether to show a spinner while reading packages
    show_progress: bool,
}

/// Result of running the orchestrator
#[derive(Debug, Clone)]
pub struct OrchestratorResult {
    /// Scheme the versions were compared with
    pub scheme: SchemeKind,
    /// Number of installed packages reported by the provider
    pub packages: usize,
    /// Conflicts and validation failures
    pub outcome: AuditOutcome,
}

impl OrchestratorResult {
    /// Process exit code: conflicts first, then unverifiable requirements
    pub fn exit_code(&self) -> u8 {
        if !self.outcome.conflicts.is_empty() {
            EXIT_CONFLICTS
        } else if !self.outcome.errors.is_empty() {
            EXIT_ERROR
        } else {
            0
        }
    }
}

impl Orchestrator {
    /// Create an orchestrator reading from `provider` with default settings
    pub fn new(provider: Box<dyn PackageProvider>) -> Self {
        Self {
            provider,
            scheme: SchemeKind::default(),
            filter: PackageFilter::default(),
            show_progress: false,
        }
    }

    /// Create an orchestrator configured from CLI arguments
    pub fn from_cli(args: &CliArgs) -> Result<Self, AppError> {
        args.validate()?;
        let source = args.package_source()?;
        debug!("Package source: {:?}", source);
        let target = args.target()?;

        Ok(Self::new(create_provider(&source, target))
            .with_scheme(args.scheme)
            .with_filter(args.build_filter())
            .with_progress(!args.quiet && !args.json))
    }

    /// Set the version scheme
    pub fn with_scheme(mut self, scheme: SchemeKind) -> Self {
        self.scheme = scheme;
        self
    }

    /// Set the dependency filter
    pub fn with_filter(mut self, filter: PackageFilter) -> Self {
        self.filter = filter;
        self
    }

    /// Enable or disable the progress spinner
    pub fn with_progress(mut self, show_progress: bool) -> Self {
        self.show_progress = show_progress;
        self
    }

    /// Run the audit
    pub fn run(&self) -> Result<OrchestratorResult, ProviderError> {
        let progress = ReadProgress::start(self.show_progress, self.provider.name());
        let packages = self.provider.list_installed_packages()?;
        progress.finish(packages.len());

        let PackageGraph {
            installed,
            mut requirements,
        } = PackageGraph::from_packages(&packages);
        requirements.retain(&self.filter);

        let outcome = match self.scheme {
            SchemeKind::Pep440 => find_conflicts(&Pep440Scheme, &installed, &requirements),
            SchemeKind::Semver => find_conflicts(&SemverScheme, &installed, &requirements),
        };

        debug!(
            "Checked {} pairs: {} conflicts, {} unverifiable",
            outcome.checked_pairs,
            outcome.conflicts.len(),
            outcome.errors.len()
        );

        Ok(OrchestratorResult {
            scheme: self.scheme,
            packages: packages.len(),
            outcome,
        })
    }
}
