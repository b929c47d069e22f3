//! Comparison operators used in version constraints

use crate::error::ConstraintError;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// The comparator of a version constraint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Comparator {
    /// Exact pin (`==`)
    #[serde(rename = "==")]
    Eq,
    /// Exclusion (`!=`)
    #[serde(rename = "!=")]
    Ne,
    /// Greater than or equal (`>=`)
    #[serde(rename = ">=")]
    Ge,
    /// Less than or equal (`<=`)
    #[serde(rename = "<=")]
    Le,
    /// Greater than (`>`)
    #[serde(rename = ">")]
    Gt,
    /// Less than (`<`)
    #[serde(rename = "<")]
    Lt,
}

impl Comparator {
    /// All comparators
    pub const ALL: [Comparator; 6] = [
        Comparator::Eq,
        Comparator::Ne,
        Comparator::Ge,
        Comparator::Le,
        Comparator::Gt,
        Comparator::Lt,
    ];

    /// Returns the operator symbol
    pub fn symbol(&self) -> &'static str {
        match self {
            Comparator::Eq => "==",
            Comparator::Ne => "!=",
            Comparator::Ge => ">=",
            Comparator::Le => "<=",
            Comparator::Gt => ">",
            Comparator::Lt => "<",
        }
    }

    /// Returns true for `>` and `>=`
    pub fn is_lower_bound(&self) -> bool {
        matches!(self, Comparator::Gt | Comparator::Ge)
    }

    /// Returns true for `<` and `<=`
    pub fn is_upper_bound(&self) -> bool {
        matches!(self, Comparator::Lt | Comparator::Le)
    }

    /// Returns true for any range bound
    pub fn is_bound(&self) -> bool {
        self.is_lower_bound() || self.is_upper_bound()
    }

    /// Whether `installed.cmp(required)` satisfies this comparator
    pub fn accepts(&self, ordering: Ordering) -> bool {
        match self {
            Comparator::Eq => ordering == Ordering::Equal,
            Comparator::Ne => ordering != Ordering::Equal,
            Comparator::Ge => ordering != Ordering::Less,
            Comparator::Le => ordering != Ordering::Greater,
            Comparator::Gt => ordering == Ordering::Greater,
            Comparator::Lt => ordering == Ordering::Less,
        }
    }
}

impl FromStr for Comparator {
    type Err = ConstraintError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Comparator::ALL
            .into_iter()
            .find(|c| c.symbol() == s)
            .ok_or_else(|| ConstraintError::unknown_comparator(s, s))
    }
}

impl fmt::Display for Comparator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}
