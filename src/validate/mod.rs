//! Constraint validation for a single (dependency, requirer) pair
//!
//! This module provides:
//! - Range grouping of sorted bound constraints
//! - The validator that decides whether an installed version satisfies a
//!   requirer's constraint set
//!
//! A version is accepted when it falls in at least one range or matches an
//! exact pin, and matches no exclusion. Ranges compare by version order;
//! exact pins and exclusions compare the literal strings.

use crate::domain::{Comparator, ConstraintSet, Range, VersionConstraint};
use crate::error::VersionError;
use crate::version::VersionScheme;

/// Validates installed versions against constraint sets using one version scheme
pub struct Validator<'s, S: VersionScheme> {
    scheme: &'s S,
}

impl<'s, S: VersionScheme> Validator<'s, S> {
    /// Create a validator ordering versions with `scheme`
    pub fn new(scheme: &'s S) -> Self {
        Self { scheme }
    }

    /// Check whether `installed` satisfies every requirement in `constraints`
    ///
    /// Fails only when a literal that has to be ordered cannot be parsed.
    pub fn is_valid(
        &self,
        installed: &str,
        constraints: &ConstraintSet,
    ) -> Result<bool, VersionError> {
        let sorted = self.sort_constraints(constraints)?;
        let ranges = group_ranges(&sorted);

        let in_ranges = self.in_ranges(installed, &ranges)?;
        let in_exacts = matches_literal(installed, &sorted, Comparator::Eq);
        let in_excludes = matches_literal(installed, &sorted, Comparator::Ne);

        Ok((in_ranges || in_exacts) && !in_excludes)
    }

    /// Sort ascending by parsed version; equal versions keep declaration order
    fn sort_constraints<'c>(
        &self,
        constraints: &'c ConstraintSet,
    ) -> Result<Vec<&'c VersionConstraint>, VersionError> {
        let mut keyed = constraints
            .iter()
            .map(|c| Ok((self.scheme.parse(&c.version)?, c)))
            .collect::<Result<Vec<_>, VersionError>>()?;
        keyed.sort_by(|a, b| a.0.cmp(&b.0));
        Ok(keyed.into_iter().map(|(_, c)| c).collect())
    }

    fn in_ranges(&self, installed: &str, ranges: &[Range<'_>]) -> Result<bool, VersionError> {
        if ranges.is_empty() {
            return Ok(true);
        }

        let installed = self.scheme.parse(installed)?;
        for range in ranges {
            if self.range_contains(&installed, range)? {
                return Ok(true);
            }
        }
        Ok(false)
    }

    fn range_contains(
        &self,
        installed: &S::Version,
        range: &Range<'_>,
    ) -> Result<bool, VersionError> {
        for bound in range.bounds() {
            let required = self.scheme.parse(&bound.version)?;
            if !bound.comparator.accepts(installed.cmp(&required)) {
                return Ok(false);
            }
        }
        Ok(true)
    }
}

/// Pair bound constraints into ranges in a single left-to-right pass
///
/// `sorted` must already be ordered by version. A pending lower or upper bound
/// is overwritten by a later bound of the same kind; whenever both are pending
/// they are emitted as one range. A single leftover bound becomes a one-sided
/// range. Non-bound constraints are ignored.
pub fn group_ranges<'a>(sorted: &[&'a VersionConstraint]) -> Vec<Range<'a>> {
    let mut ranges = Vec::new();
    let mut lower: Option<&'a VersionConstraint> = None;
    let mut upper: Option<&'a VersionConstraint> = None;

    for &constraint in sorted {
        if constraint.comparator.is_upper_bound() {
            upper = Some(constraint);
        } else if constraint.comparator.is_lower_bound() {
            lower = Some(constraint);
        }

        if lower.is_some() && upper.is_some() {
            ranges.extend(Range::new(lower.take(), upper.take()));
        }
    }

    ranges.extend(Range::new(lower, upper));
    ranges
}

fn matches_literal(installed: &str, constraints: &[&VersionConstraint], kind: Comparator) -> bool {
    constraints
        .iter()
        .any(|c| c.comparator == kind && c.version == installed)
}
