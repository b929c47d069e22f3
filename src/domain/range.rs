//! Derived lower/upper bound pairs used for interval membership

use super::VersionConstraint;

/// A lower bound (`>`/`>=`) and an upper bound (`<`/`<=`), either optional but not both
///
/// Ranges borrow their bounds from the constraint set being validated and
/// never outlive a single validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Range<'a> {
    lower: Option<&'a VersionConstraint>,
    upper: Option<&'a VersionConstraint>,
}

impl<'a> Range<'a> {
    /// Pairs two bounds. Returns `None` when both are absent or a bound has the wrong kind.
    pub fn new(
        lower: Option<&'a VersionConstraint>,
        upper: Option<&'a VersionConstraint>,
    ) -> Option<Self> {
        if lower.is_none() && upper.is_none() {
            return None;
        }
        if lower.is_some_and(|c| !c.comparator.is_lower_bound()) {
            return None;
        }
        if upper.is_some_and(|c| !c.comparator.is_upper_bound()) {
            return None;
        }
        Some(Self { lower, upper })
    }

    pub fn lower(&self) -> Option<&'a VersionConstraint> {
        self.lower
    }

    pub fn upper(&self) -> Option<&'a VersionConstraint> {
        self.upper
    }

    /// The bounds that are present, lower first
    pub fn bounds(&self) -> impl Iterator<Item = &'a VersionConstraint> {
        self.lower.into_iter().chain(self.upper)
    }
}
