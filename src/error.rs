//! Application error types using thiserror
//!
//! Error hierarchy:
//! - ConstraintError: Malformed version constraints
//! - VersionError: Version literals the active scheme cannot order
//! - ProviderError: Failures while reading installed package metadata
//! - ConfigError: Issues with CLI configuration

use std::path::PathBuf;
use thiserror::Error;

/// Application-level error type
#[derive(Error, Debug)]
pub enum AppError {
    /// Constraint construction errors
    #[error(transparent)]
    Constraint(#[from] ConstraintError),

    /// Version parsing errors
    #[error(transparent)]
    Version(#[from] VersionError),

    /// Package metadata errors
    #[error(transparent)]
    Provider(#[from] ProviderError),

    /// Configuration related errors
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Errors raised while building constraints
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConstraintError {
    /// Comparator symbol outside `== != >= <= > <`
    #[error("unknown comparator '{symbol}' in constraint '{constraint}'")]
    UnknownComparator { symbol: String, constraint: String },

    /// Constraint without a version literal
    #[error("constraint '{constraint}' has no version")]
    MissingVersion { constraint: String },
}

/// A version literal that could not be ordered
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unparsable {scheme} version '{literal}': {message}")]
pub struct VersionError {
    /// The offending literal
    pub literal: String,
    /// Name of the version scheme that rejected it
    pub scheme: &'static str,
    /// Parser message
    pub message: String,
}

/// Errors related to reading installed package metadata
#[derive(Error, Debug)]
pub enum ProviderError {
    /// Package directory not found
    #[error("package directory not found: {path}")]
    DirectoryNotFound { path: PathBuf },

    /// Failed to read a metadata or snapshot file
    #[error("failed to read {path}: {source}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Snapshot JSON parsing error
    #[error("failed to parse JSON in {path}: {message}")]
    JsonParseError { path: PathBuf, message: String },

    /// Snapshot TOML parsing error
    #[error("failed to parse TOML in {path}: {message}")]
    TomlParseError { path: PathBuf, message: String },

    /// A declared requirement carries a malformed constraint
    #[error("invalid constraint in requirements of '{package}': {source}")]
    InvalidConstraint {
        package: String,
        #[source]
        source: ConstraintError,
    },
}

/// Errors related to configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Neither a directory nor a snapshot was given and none could be detected
    #[error("no package source: pass site-packages directories, --snapshot, or activate a virtualenv")]
    NoPackageSource,

    /// Conflicting options
    #[error("conflicting options: {message}")]
    ConflictingOptions { message: String },

    /// `--python-version` that cannot describe an interpreter
    #[error("invalid python version '{version}': {message}")]
    InvalidPythonVersion { version: String, message: String },
}

impl ConfigError {
    /// Creates a new InvalidPythonVersion error
    pub fn invalid_python_version(version: impl Into<String>, message: impl Into<String>) -> Self {
        ConfigError::InvalidPythonVersion {
            version: version.into(),
            message: message.into(),
        }
    }
}

impl ConstraintError {
    /// Creates a new UnknownComparator error
    pub fn unknown_comparator(symbol: impl Into<String>, constraint: impl Into<String>) -> Self {
        ConstraintError::UnknownComparator {
            symbol: symbol.into(),
            constraint: constraint.into(),
        }
    }

    /// Creates a new MissingVersion error
    pub fn missing_version(constraint: impl Into<String>) -> Self {
        ConstraintError::MissingVersion {
            constraint: constraint.into(),
        }
    }
}

impl VersionError {
    /// Creates a new VersionError
    pub fn new(
        literal: impl Into<String>,
        scheme: &'static str,
        message: impl Into<String>,
    ) -> Self {
        Self {
            literal: literal.into(),
            scheme,
            message: message.into(),
        }
    }
}

impl ProviderError {
    /// Creates a new DirectoryNotFound error
    pub fn directory_not_found(path: impl Into<PathBuf>) -> Self {
        ProviderError::DirectoryNotFound { path: path.into() }
    }

    /// Creates a new ReadError
    pub fn read_error(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ProviderError::ReadError {
            path: path.into(),
            source,
        }
    }

    /// Creates a new JsonParseError
    pub fn json_parse_error(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        ProviderError::JsonParseError {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Creates a new TomlParseError
    pub fn toml_parse_error(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        ProviderError::TomlParseError {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Creates a new InvalidConstraint error
    pub fn invalid_constraint(package: impl Into<String>, source: ConstraintError) -> Self {
        ProviderError::InvalidConstraint {
            package: package.into(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constraint_error_unknown_comparator() {
        let err = ConstraintError::unknown_comparator("~=", "~=1.0");
        let msg = format!("{}", err);
        assert!(msg.contains("unknown comparator '~='"));
        assert!(msg.contains("~=1.0"));
    }

    #[test]
    fn test_constraint_error_missing_version() {
        let err = ConstraintError::missing_version(">=");
        assert_eq!(err.to_string(), "constraint '>=' has no version");
    }

    #[test]
    fn test_version_error_display() {
        let err = VersionError::new("not.a.version!", "pep440", "unexpected character");
        let msg = format!("{}", err);
        assert!(msg.contains("unparsable pep440 version 'not.a.version!'"));
        assert!(msg.contains("unexpected character"));
    }

    #[test]
    fn test_provider_error_directory_not_found() {
        let err = ProviderError::directory_not_found("/missing/site-packages");
        let msg = format!("{}", err);
        assert!(msg.contains("package directory not found"));
        assert!(msg.contains("site-packages"));
    }

    #[test]
    fn test_provider_error_json_parse() {
        let err = ProviderError::json_parse_error("/tmp/snapshot.json", "expected value");
        let msg = format!("{}", err);
        assert!(msg.contains("failed to parse JSON"));
        assert!(msg.contains("expected value"));
    }

    #[test]
    fn test_provider_error_invalid_constraint() {
        let err = ProviderError::invalid_constraint(
            "requests",
            ConstraintError::unknown_comparator("=>", "=>2.0"),
        );
        let msg = format!("{}", err);
        assert!(msg.contains("requirements of 'requests'"));
        assert!(msg.contains("=>"));
    }

    #[test]
    fn test_config_error_conflicting_options() {
        let err = ConfigError::ConflictingOptions {
            message: "--quiet and --verbose cannot be used together".to_string(),
        };
        assert!(err.to_string().contains("conflicting options"));
    }

    #[test]
    fn test_config_error_invalid_python_version() {
        let err = ConfigError::invalid_python_version("3", "expected X.Y or X.Y.Z");
        assert_eq!(
            err.to_string(),
            "invalid python version '3': expected X.Y or X.Y.Z"
        );
    }

    #[test]
    fn test_app_error_from_version_error() {
        let app_err: AppError = VersionError::new("x", "semver", "bad").into();
        assert!(app_err.to_string().contains("unparsable semver version 'x'"));
    }

    #[test]
    fn test_app_error_from_config_error() {
        let app_err: AppError = ConfigError::NoPackageSource.into();
        assert!(app_err.to_string().contains("no package source"));
    }

    #[test]
    fn test_error_debug_trait() {
        let err = ProviderError::directory_not_found("/test");
        let debug = format!("{:?}", err);
        assert!(debug.contains("DirectoryNotFound"));
    }
}
