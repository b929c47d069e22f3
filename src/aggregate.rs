//! Conflict aggregation across the requirement graph
//!
//! Every (dependency, requirer) pair whose dependency is installed is
//! validated. A pair that cannot be compared is recorded as a
//! ValidationFailure and the remaining pairs are still checked.

use crate::domain::{Conflict, ValidationFailure};
use crate::graph::{InstalledVersions, RequirementGraph};
use crate::validate::Validator;
use crate::version::VersionScheme;
use tracing::{debug, warn};

/// Result of one aggregation pass
#[derive(Debug, Clone, Default)]
pub struct AuditOutcome {
    /// Pairs whose installed version fails the declared constraints
    pub conflicts: Vec<Conflict>,
    /// Pairs that could not be compared
    pub errors: Vec<ValidationFailure>,
    /// Number of pairs that were validated
    pub checked_pairs: usize,
}

impl AuditOutcome {
    /// True when no conflict and no validation failure was found
    pub fn is_clean(&self) -> bool {
        self.conflicts.is_empty() && self.errors.is_empty()
    }
}

/// Validate every installed dependency against each of its requirers
///
/// Dependencies that are declared but not installed are skipped. Conflicts
/// come out in dependency-name then requirer-name order.
pub fn find_conflicts<S: VersionScheme>(
    scheme: &S,
    installed: &InstalledVersions,
    requirements: &RequirementGraph,
) -> AuditOutcome {
    let validator = Validator::new(scheme);
    let mut outcome = AuditOutcome::default();

    for (dependency, requirers) in requirements.iter() {
        let Some(package) = installed.get(dependency) else {
            debug!("{} is required but not installed, skipping", dependency);
            continue;
        };

        for (requirer, constraints) in requirers {
            outcome.checked_pairs += 1;

            match validator.is_valid(&package.version, constraints) {
                Ok(true) => {}
                Ok(false) => {
                    debug!(
                        "{} {} does not satisfy {} required by {}",
                        package.name, package.version, constraints, requirer
                    );
                    outcome.conflicts.push(Conflict::new(
                        &package.name,
                        requirer,
                        &package.version,
                        constraints.clone(),
                    ));
                }
                Err(error) => {
                    warn!(
                        "Cannot check {} required by {}: {}",
                        package.name, requirer, error
                    );
                    outcome
                        .errors
                        .push(ValidationFailure::new(&package.name, requirer, error));
                }
            }
        }
    }

    outcome
}
