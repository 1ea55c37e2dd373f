/// Scanning errors.
///
/// Defines all error types that can occur while characters are being
/// classified and grouped into tokens: mismatched delimiters, operators with
/// nothing to their left and subexpressions that never close.
pub mod scan_error;
/// Runtime errors.
///
/// Contains all error types that can be raised while completed tokens are
/// reduced: unresolved members, malformed literals and rejected calls.
pub mod runtime_error;

pub use runtime_error::RuntimeError;
pub use scan_error::ScanError;
use thiserror::Error;

/// Any failure produced by a single run of the interpreter.
///
/// Both phases abort on their first error, so a run reports at most one.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// The scanner rejected the input.
    #[error(transparent)]
    Scan(#[from] ScanError),
    /// The reducer rejected a completed token sequence.
    #[error(transparent)]
    Runtime(#[from] RuntimeError),
}

/// The kind of an [`Error`], without its details.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// A closing delimiter did not match, or an operator had no left operand.
    UnexpectedToken,
    /// The input ended inside a subexpression.
    UnclosedDelimiter,
    /// A dotted access named a member its receiver does not expose.
    MemberNotFound,
    /// A dotted access started from a name that is not bound.
    UnknownReference,
    /// A captured subexpression could not be turned into a literal.
    MalformedLiteral,
    /// A callable received the wrong number of arguments.
    ArgumentCountMismatch,
}

impl Error {
    /// Returns the kind of this error.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Scan(ScanError::UnexpectedToken { .. }) => ErrorKind::UnexpectedToken,
            Self::Scan(ScanError::UnclosedDelimiter { .. }) => ErrorKind::UnclosedDelimiter,
            Self::Runtime(RuntimeError::MemberNotFound { .. }) => ErrorKind::MemberNotFound,
            Self::Runtime(RuntimeError::UnknownReference { .. }) => ErrorKind::UnknownReference,
            Self::Runtime(RuntimeError::MalformedLiteral { .. }) => ErrorKind::MalformedLiteral,
            Self::Runtime(RuntimeError::ArgumentCountMismatch { .. }) => {
                ErrorKind::ArgumentCountMismatch
            },
        }
    }

    /// Returns the byte offset in the input where the error was detected.
    #[must_use]
    pub const fn position(&self) -> usize {
        match self {
            Self::Scan(e) => e.position(),
            Self::Runtime(e) => e.position(),
        }
    }
}
