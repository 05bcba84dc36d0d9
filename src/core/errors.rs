//! PGD-prefixed error types with structured error codes.

#![allow(missing_docs)]

use std::path::{Path, PathBuf};

use thiserror::Error;

/// Shared `Result` alias for the project.
pub type Result<T> = std::result::Result<T, PgdError>;

/// Top-level error type for poolguard.
#[derive(Debug, Error)]
pub enum PgdError {
    #[error("[PGD-1001] invalid configuration: {details}")]
    InvalidConfig { details: String },

    #[error("[PGD-1002] configuration parse failure in {context}: {details}")]
    ConfigParse {
        context: &'static str,
        details: String,
    },

    #[error("[PGD-2001] required command not found on PATH: {name}")]
    MissingCollaborator { name: String },

    #[error("[PGD-2002] insufficient privilege: indicator control requires root")]
    InsufficientPrivilege,

    #[error("[PGD-2003] no storage pools found to monitor")]
    NoPools,

    #[error("[PGD-3001] status query failed for pool {pool}: {details}")]
    StatusQuery { pool: String, details: String },

    #[error("[PGD-3002] indicator command failed: {details}")]
    IndicatorCommand { details: String },

    #[error("[PGD-3101] IO failure at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl PgdError {
    /// Stable machine-parseable error code.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::InvalidConfig { .. } => "PGD-1001",
            Self::ConfigParse { .. } => "PGD-1002",
            Self::MissingCollaborator { .. } => "PGD-2001",
            Self::InsufficientPrivilege => "PGD-2002",
            Self::NoPools => "PGD-2003",
            Self::StatusQuery { .. } => "PGD-3001",
            Self::IndicatorCommand { .. } => "PGD-3002",
            Self::Io { .. } => "PGD-3101",
        }
    }

    /// Whether the failure must abort startup. Everything else is a
    /// transient per-cycle condition the loop absorbs.
    #[must_use]
    pub const fn is_fatal(&self) -> bool {
        matches!(
            self,
            Self::InvalidConfig { .. }
                | Self::ConfigParse { .. }
                | Self::MissingCollaborator { .. }
                | Self::InsufficientPrivilege
                | Self::NoPools
        )
    }

    /// Convenience constructor for IO errors with a known path.
    #[must_use]
    pub fn io(path: impl AsRef<Path>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }
}

impl From<toml::de::Error> for PgdError {
    fn from(value: toml::de::Error) -> Self {
        Self::ConfigParse {
            context: "toml",
            details: value.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::PgdError;

    #[test]
    fn codes_are_stable_and_embedded_in_messages() {
        let err = PgdError::MissingCollaborator {
            name: "zpool".to_string(),
        };
        assert_eq!(err.code(), "PGD-2001");
        assert!(err.to_string().contains("PGD-2001"));
        assert!(err.to_string().contains("zpool"));
    }

    #[test]
    fn startup_failures_are_fatal_poll_failures_are_not() {
        assert!(PgdError::NoPools.is_fatal());
        assert!(PgdError::InsufficientPrivilege.is_fatal());
        assert!(
            !PgdError::StatusQuery {
                pool: "tank".to_string(),
                details: "timeout".to_string(),
            }
            .is_fatal()
        );
        assert!(
            !PgdError::io("/var/run/poolguard.alarm", std::io::Error::other("boom")).is_fatal()
        );
    }
}
