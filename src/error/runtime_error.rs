use thiserror::Error;

/// Represents all errors that can occur while reducing completed tokens.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RuntimeError {
    /// A dotted access named a member that its receiver does not expose.
    #[error("Error at position {position}: Member '{member}' not found.")]
    MemberNotFound {
        /// The member name, or the literal text used as a member.
        member:   String,
        /// The byte offset of the member token.
        position: usize,
    },
    /// A dotted access started from a name that is not bound.
    #[error("Error at position {position}: Unknown reference '{name}'.")]
    UnknownReference {
        /// The unbound name.
        name:     String,
        /// The byte offset of the name.
        position: usize,
    },
    /// A captured subexpression could not be turned into a literal.
    #[error("Error at position {position}: Malformed literal: {details}.")]
    MalformedLiteral {
        /// What went wrong while reading the literal.
        details:  String,
        /// The byte offset of the opening delimiter.
        position: usize,
    },
    /// A callable was invoked with the wrong number of arguments.
    #[error("Error at position {position}: '{name}' expects at least {expected} argument(s), found {found}.")]
    ArgumentCountMismatch {
        /// The callable's name.
        name:     String,
        /// The minimum number of arguments.
        expected: usize,
        /// The number of arguments supplied.
        found:    usize,
        /// The byte offset of the argument tuple.
        position: usize,
    },
}

impl RuntimeError {
    /// Returns the byte offset where the error occurred.
    #[must_use]
    pub const fn position(&self) -> usize {
        match self {
            Self::MemberNotFound { position, .. }
            | Self::UnknownReference { position, .. }
            | Self::MalformedLiteral { position, .. }
            | Self::ArgumentCountMismatch { position, .. } => *position,
        }
    }
}
