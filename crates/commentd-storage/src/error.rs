//! Error types for comment storage operations.

use std::fmt;

/// Errors that can occur while reading or writing comments.
///
/// Every backend failure surfaces to the caller as exactly one of these;
/// partial results are never returned alongside an error.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// A single-comment lookup matched no row. List lookups return an empty
    /// list instead and never produce this.
    #[error("comment not found: {id}")]
    NotFound {
        /// The identifier that matched nothing.
        id: String,
    },

    /// The relational store or the cache could not serve the call — a
    /// connection or query failure that is not a normal cache miss.
    #[error("backend unavailable: {message}")]
    Unavailable {
        /// Description of the backend failure.
        message: String,
    },

    /// A payload could not be encoded or decoded. Steady-state operation
    /// never produces this; it indicates a defect or corrupted cache data.
    #[error("serialization failure: {message}")]
    Serialization {
        /// Description of the codec failure.
        message: String,
    },

    /// A write request is missing required fields.
    #[error("invalid write request: {message}")]
    Validation {
        /// Description of what was missing.
        message: String,
    },
}

impl StoreError {
    /// Creates a new `NotFound` error.
    #[must_use]
    pub fn not_found(id: impl Into<String>) -> Self {
        Self::NotFound { id: id.into() }
    }

    /// Creates a new `Unavailable` error.
    #[must_use]
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::Unavailable {
            message: message.into(),
        }
    }

    /// Creates a new `Serialization` error.
    #[must_use]
    pub fn serialization(message: impl Into<String>) -> Self {
        Self::Serialization {
            message: message.into(),
        }
    }

    /// Creates a new `Validation` error.
    #[must_use]
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Returns `true` if this is a not-found error.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Returns `true` if this is a backend availability error.
    #[must_use]
    pub fn is_unavailable(&self) -> bool {
        matches!(self, Self::Unavailable { .. })
    }

    /// Returns the error kind for logging and metric labels.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::NotFound { .. } => ErrorKind::NotFound,
            Self::Unavailable { .. } => ErrorKind::Unavailable,
            Self::Serialization { .. } => ErrorKind::Serialization,
            Self::Validation { .. } => ErrorKind::Validation,
        }
    }
}

/// Kinds of storage errors, used as logging and metric labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    NotFound,
    Unavailable,
    Serialization,
    Validation,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound => write!(f, "not_found"),
            Self::Unavailable => write!(f, "unavailable"),
            Self::Serialization => write!(f, "serialization"),
            Self::Validation => write!(f, "validation"),
        }
    }
}
