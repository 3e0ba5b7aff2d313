//! Shared error type across promsim crates.

use thiserror::Error;

/// Stable error kinds, used in log fields and test assertions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Invalid or inconsistent configuration.
    Config,
    /// Endpoint profile with out-of-range parameters.
    InvalidProfile,
    /// Startup / runtime failure outside the request path.
    Internal,
}

impl ErrorKind {
    /// String representation used in structured logs.
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorKind::Config => "CONFIG",
            ErrorKind::InvalidProfile => "INVALID_PROFILE",
            ErrorKind::Internal => "INTERNAL",
        }
    }
}

/// Shared result type.
pub type Result<T> = std::result::Result<T, PromsimError>;

/// Unified error type used by core and harness.
#[derive(Debug, Error)]
pub enum PromsimError {
    #[error("config: {0}")]
    Config(String),
    #[error("invalid profile for {method} {path}: {reason}")]
    InvalidProfile {
        path: String,
        method: String,
        reason: String,
    },
    #[error("internal: {0}")]
    Internal(String),
}

impl PromsimError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            PromsimError::Config(_) => ErrorKind::Config,
            PromsimError::InvalidProfile { .. } => ErrorKind::InvalidProfile,
            PromsimError::Internal(_) => ErrorKind::Internal,
        }
    }
}
