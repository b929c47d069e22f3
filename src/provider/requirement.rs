//! PEP 508 requirement line parser
//!
//! Handles requirement formats found in distribution metadata:
//! - `name`, `name>=1.0,<2.0`, `name (>=1.0,<2.0)`
//! - Extras: `name[socks]>=2.0`
//! - Markers: `name>=1.0; python_version < "3.8"`
//! - Direct references: `name @ https://...`
//!
//! Requirements guarded by a marker are only kept when the marker holds
//! for the target environment. Without a known target interpreter only
//! unconditional requirements are kept. `extra` markers never hold.
//! Specifiers outside `== != >= <= > <` are rewritten where an equivalent
//! bound pair exists:
//! - `~=1.4.5` → `>=1.4.5`, `<1.5`
//! - `==1.4.*` → `>=1.4`, `<1.5`
//!
//! `===` and `!=X.*` have no such form and are dropped with a warning.

use super::marker::TargetEnvironment;
use crate::domain::{Comparator, ConstraintSet, Requirement, VersionConstraint};
use regex::Regex;
use std::sync::LazyLock;
use tracing::{debug, warn};

static NAME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9](?:[A-Za-z0-9._-]*[A-Za-z0-9])?").unwrap());
static SPECIFIER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(===|~=|==|!=|<=|>=|<|>)\s*(\S+)$").unwrap());

/// Parse one requirement line
///
/// `None` for blank lines, comments and requirements whose marker does not
/// apply to `target`.
pub fn parse_requirement(line: &str, target: Option<&TargetEnvironment>) -> Option<Requirement> {
    let line = line.split('#').next().unwrap_or("").trim();
    if line.is_empty() {
        return None;
    }

    let (spec, marker) = match line.split_once(';') {
        Some((spec, marker)) => (spec.trim(), Some(marker.trim())),
        None => (line, None),
    };

    if let Some(marker) = marker {
        if !target.is_some_and(|target| target.applies(marker)) {
            debug!("Skipping '{}': marker does not apply", line);
            return None;
        }
    }

    let Some(name) = NAME_RE.find(spec) else {
        warn!("Ignoring unparsable requirement '{}'", line);
        return None;
    };
    let name = name.as_str();
    let mut rest = spec[name.len()..].trim_start();

    // Extras do not affect the version constraint
    if rest.starts_with('[') {
        rest = match rest.find(']') {
            Some(end) => rest[end + 1..].trim_start(),
            None => {
                warn!("Ignoring requirement with unterminated extras '{}'", line);
                return None;
            }
        };
    }

    if rest.starts_with('@') {
        return Some(Requirement::any(name));
    }

    let rest = rest
        .strip_prefix('(')
        .map(|r| r.trim_end().trim_end_matches(')'))
        .unwrap_or(rest);

    let constraints: ConstraintSet = rest
        .split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .flat_map(|item| parse_specifier(name, item))
        .collect();

    Some(Requirement::new(name, constraints))
}

/// Translate one specifier into zero or more constraints
fn parse_specifier(package: &str, item: &str) -> Vec<VersionConstraint> {
    let Some(caps) = SPECIFIER_RE.captures(item) else {
        warn!("Ignoring unparsable specifier '{}' of {}", item, package);
        return Vec::new();
    };
    let operator = &caps[1];
    let version = &caps[2];

    match (operator, version.strip_suffix(".*")) {
        ("~=", None) => match compatible_upper(version) {
            Some(upper) => vec![
                VersionConstraint::new(Comparator::Ge, version),
                VersionConstraint::new(Comparator::Lt, upper),
            ],
            None => {
                warn!("Ignoring invalid compatible release '{}' of {}", item, package);
                Vec::new()
            }
        },
        ("==", Some(prefix)) => match next_release(prefix) {
            Some(upper) => vec![
                VersionConstraint::new(Comparator::Ge, prefix),
                VersionConstraint::new(Comparator::Lt, upper),
            ],
            None => {
                warn!("Ignoring invalid wildcard '{}' of {}", item, package);
                Vec::new()
            }
        },
        ("===", _) | ("!=", Some(_)) => {
            warn!("Ignoring unsupported specifier '{}' of {}", item, package);
            Vec::new()
        }
        (_, Some(_)) => {
            warn!("Ignoring wildcard in ordered specifier '{}' of {}", item, package);
            Vec::new()
        }
        (operator, None) => match operator.parse::<Comparator>() {
            Ok(comparator) => vec![VersionConstraint::new(comparator, version)],
            Err(e) => {
                warn!("Ignoring specifier of {}: {}", package, e);
                Vec::new()
            }
        },
    }
}

/// Upper bound of a compatible release: drop the last release segment and bump the new last one
///
/// Pre, post and dev suffixes are not part of the release, so `~=2.2.post3`
/// is bounded by `<3`. An epoch is carried over.
fn compatible_upper(version: &str) -> Option<String> {
    let (epoch, rest) = match version.split_once('!') {
        Some((epoch, rest)) => (Some(epoch), rest),
        None => (None, version),
    };
    let release_end = rest
        .find(|c: char| !(c.is_ascii_digit() || c == '.'))
        .unwrap_or(rest.len());
    let release = rest[..release_end].trim_end_matches('.');

    let (head, _) = release.rsplit_once('.')?;
    let upper = next_release(head)?;
    Some(match epoch {
        Some(epoch) => format!("{}!{}", epoch, upper),
        None => upper,
    })
}

/// Increment the last numeric release segment (`1.4` → `1.5`, `2` → `3`)
fn next_release(prefix: &str) -> Option<String> {
    let (head, last) = match prefix.rsplit_once('.') {
        Some((head, last)) => (Some(head), last),
        None => (None, prefix),
    };
    let bumped = last.parse::<u64>().ok()? + 1;
    Some(match head {
        Some(head) => format!("{}.{}", head, bumped),
        None => bumped.to_string(),
    })
}
