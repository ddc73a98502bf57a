//! Boundary errors for user-supplied input.
//!
//! "Not found" and "out of range" are never errors in this crate — lookups
//! return `Option`. `DomError` covers the cases where a caller handed us
//! something malformed and a script bridge would raise a typed exception.

/// Errors raised when validating user-supplied strings or tree operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DomError {
    /// Empty token or name where one is required.
    #[error("syntax error: {0}")]
    Syntax(&'static str),

    /// A token or name contains a character it must not contain.
    #[error("invalid character in {what}: {value:?}")]
    InvalidCharacter {
        what: &'static str,
        value: String,
    },

    /// An index argument is outside the valid range for the operation.
    #[error("index {index} out of range (length {length})")]
    IndexSize { index: usize, length: usize },

    /// A tree operation would violate the node hierarchy.
    #[error("hierarchy request error: {0}")]
    HierarchyRequest(&'static str),
}

pub type Result<T> = std::result::Result<T, DomError>;
