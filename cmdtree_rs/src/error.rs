//! Error types for tree construction and selector parsing.
//!
//! Routing misses are not errors (they are data on [`crate::router::Resolution`]);
//! the only failures this crate surfaces as `Err` are programmer-level
//! configuration mistakes and malformed selector strings.

use thiserror::Error;

/// A mistake in the declared command tree. Fatal at construction time:
/// it means the embedding application is misconfigured, not that an end
/// user mistyped something.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// A variadic positional argument was declared before the last position.
    #[error("variadic positional argument '{name}' must be declared last")]
    VariadicNotLast { name: String },

    /// Two children of the same group were declared under one name.
    #[error("duplicate child name '{name}' in group")]
    DuplicateChild { name: String },
}

/// A malformed selector string. Carries the character offset at which
/// parsing gave up so callers can point at the problem.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("selector syntax error at offset {offset}: {message}")]
pub struct SelectorError {
    /// Character offset into the selector string.
    pub offset: usize,
    /// What was expected or found there.
    pub message: String,
}

impl SelectorError {
    pub(crate) fn new(offset: usize, message: impl Into<String>) -> Self {
        Self {
            offset,
            message: message.into(),
        }
    }
}
