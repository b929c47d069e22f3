//! Core domain models for depconflict
//!
//! This module contains the fundamental types used throughout the application:
//! - Comparators and version constraints
//! - Derived ranges used during validation
//! - Installed package records and their requirements
//! - Conflict records produced by an audit

mod comparator;
mod conflict;
mod constraint;
mod package;
mod range;

pub use comparator::Comparator;
pub use conflict::{Conflict, ValidationFailure};
pub use constraint::{ConstraintSet, VersionConstraint};
pub use package::{PackageRecord, Requirement};
pub use range::Range;
