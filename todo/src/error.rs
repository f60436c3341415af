//! Error types for todo operations.
//!
//! Message text is part of the contract with callers: the HTTP layer returns
//! it verbatim, so variants render fixed strings.

use crate::types::TodoId;
use thiserror::Error;

/// Result type alias for todo operations.
pub type Result<T> = std::result::Result<T, TodoError>;

/// Every way a todo operation can fail.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TodoError {
    /// Input failed a structural or length constraint.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// No live record has the requested id.
    #[error("Todo not found")]
    NotFound {
        /// The id that was looked up
        id: TodoId,
    },

    /// The request is well formed but a domain rule forbids it.
    #[error(transparent)]
    BusinessRule(#[from] BusinessRuleViolation),

    /// A storage invariant was violated. Not caused by caller input.
    #[error("Internal error: {message}")]
    Internal {
        /// Description for logs
        message: String,
    },
}

impl TodoError {
    /// Builds an [`TodoError::Internal`]
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// Coarse category of the error
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Validation(_) => ErrorKind::Validation,
            Self::NotFound { .. } => ErrorKind::NotFound,
            Self::BusinessRule(_) => ErrorKind::BusinessRule,
            Self::Internal { .. } => ErrorKind::Internal,
        }
    }
}

/// Structural and length constraint failures.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    /// Title is empty after trimming.
    #[error("Title cannot be empty")]
    EmptyTitle,

    /// Title is longer than the configured limit.
    #[error("Title cannot exceed {max} characters")]
    TitleTooLong {
        /// Limit in characters
        max: usize,
    },

    /// Description is longer than the configured limit.
    #[error("Description cannot exceed {max} characters")]
    DescriptionTooLong {
        /// Limit in characters
        max: usize,
    },
}

/// Domain rules that reject otherwise valid requests.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum BusinessRuleViolation {
    /// Completed todos are frozen.
    #[error("Cannot update completed todo")]
    CompletedTodoImmutable,
}

/// Category of a [`TodoError`], used for logging, metrics and status mapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// See [`TodoError::Validation`]
    Validation,
    /// See [`TodoError::NotFound`]
    NotFound,
    /// See [`TodoError::BusinessRule`]
    BusinessRule,
    /// See [`TodoError::Internal`]
    Internal,
}

impl ErrorKind {
    /// Stable lowercase label
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Validation => "validation",
            Self::NotFound => "not_found",
            Self::BusinessRule => "business_rule",
            Self::Internal => "internal",
        }
    }
}
