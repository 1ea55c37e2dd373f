use thiserror::Error;

/// Represents all errors that can occur while scanning an expression.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScanError {
    /// A character appeared where it cannot be accepted: a closing delimiter
    /// whose partner is not on top of the delimiter stack, or an operator
    /// with no preceding token to operate on.
    #[error("Error at position {position}: Unexpected token: {token}.")]
    UnexpectedToken {
        /// The character encountered.
        token:    char,
        /// The byte offset where the error occurred.
        position: usize,
    },
    /// The input ended while a delimiter was still open.
    #[error("Error at position {position}: Delimiter '{delimiter}' is never closed.")]
    UnclosedDelimiter {
        /// The innermost delimiter still open.
        delimiter: char,
        /// The byte offset of that delimiter.
        position:  usize,
    },
}

impl ScanError {
    /// Returns the byte offset where the error occurred.
    #[must_use]
    pub const fn position(&self) -> usize {
        match self {
            Self::UnexpectedToken { position, .. } | Self::UnclosedDelimiter { position, .. } => {
                *position
            },
        }
    }
}
