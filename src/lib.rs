//! depconflict - installed package conflict checker library
//!
//! This library provides the core functionality for auditing an
//! environment's installed packages:
//! - Constraint validation against an installed version (PEP 440 or semver)
//! - Conflict aggregation over the requirement graph
//! - Package discovery from site-packages directories or snapshot files

pub mod aggregate;
pub mod cli;
pub mod domain;
pub mod error;
pub mod graph;
pub mod orchestrator;
pub mod output;
pub mod progress;
pub mod provider;
pub mod validate;
pub mod version;
