use std::{fmt, rc::Rc};

use crate::interpreter::{
    dictionary::Materializer,
    environment::{Callable, Entry},
    value::core::Value,
};

/// The kind of a token, or of a character in the token dictionary.
///
/// Every kind shares this single tag type. `Control` is reserved: the
/// dictionary carries no entries for it and the scanner never produces it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// `;`, terminates the expression.
    End,
    /// Whitespace between two tokens.
    Space,
    /// A name resolved against the environment.
    Reference,
    /// An opening delimiter or quote.
    DelimLeft,
    /// A closing delimiter or quote.
    DelimRight,
    /// A callable reached through a dotted access.
    Function,
    /// `!`
    UnaryOperator,
    /// A one or two character binary operator.
    BinaryOperator,
    /// A character that may begin a two character operator (`&`, `|`, `<`,
    /// `>`).
    DoubleBinaryOperator,
    /// A decimal digit.
    LiteralDigit,
    /// Reserved for control keywords.
    Control,
    /// Raw text not yet resolved.
    Unevaluated,
    /// A materialized literal value.
    Literal,
}

/// Describes how an [`Token::Unevaluated`] token should be evaluated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EvalHint {
    /// Plain text; resolved as a name (or a number).
    Reference,
    /// Raw text captured between a matched delimiter pair.
    Subexpression {
        /// The character that closed the subexpression.
        closing:      char,
        /// The materializer the closing character is bound to.
        materializer: Materializer,
    },
}

/// A binary operator recognized by the scanner.
///
/// Only [`Operator::Dot`] and [`Operator::Assign`] take part in evaluation;
/// the rest are scanned and disambiguated but never applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
    /// `.`
    Dot,
    /// `=`
    Assign,
    /// `+`
    Add,
    /// `-`
    Subtract,
    /// `*`
    Multiply,
    /// `/`
    Divide,
    /// `%`
    Modulo,
    /// `<`
    Less,
    /// `>`
    Greater,
    /// `&`
    Ampersand,
    /// `|`
    Pipe,
    /// `!`
    Bang,
    /// `==`
    EqualEqual,
    /// `!=`
    BangEqual,
    /// `>=`
    GreaterEqual,
    /// `<=`
    LessEqual,
    /// `!!`
    BangBang,
    /// `&&`
    And,
    /// `||`
    Or,
}

impl Operator {
    /// Returns the operator's source text.
    ///
    /// # Example
    /// ```
    /// use shellexpr::interpreter::token::Operator;
    ///
    /// assert_eq!(Operator::BangEqual.symbol(), "!=");
    /// assert_eq!(Operator::Dot.symbol(), ".");
    /// ```
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::Dot => ".",
            Self::Assign => "=",
            Self::Add => "+",
            Self::Subtract => "-",
            Self::Multiply => "*",
            Self::Divide => "/",
            Self::Modulo => "%",
            Self::Less => "<",
            Self::Greater => ">",
            Self::Ampersand => "&",
            Self::Pipe => "|",
            Self::Bang => "!",
            Self::EqualEqual => "==",
            Self::BangEqual => "!=",
            Self::GreaterEqual => ">=",
            Self::LessEqual => "<=",
            Self::BangBang => "!!",
            Self::And => "&&",
            Self::Or => "||",
        }
    }

    /// Returns `true` for the two character operators.
    #[must_use]
    pub const fn is_double(self) -> bool {
        self.symbol().len() == 2
    }
}

/// Where a [`Token::Reference`] was found.
///
/// Only environment bindings can be the target of an assignment; a member is
/// owned by the entry it was reached through.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Binding {
    /// Bound directly in the environment.
    Environment,
    /// Reached through a dotted access.
    Member,
}

/// A classified unit of input.
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    /// One or more whitespace characters between two tokens.
    Space,
    /// Raw text that has not been resolved yet.
    Unevaluated {
        /// The accumulated text.
        text: String,
        /// How the text should be evaluated.
        hint: EvalHint,
    },
    /// A name bound in the environment, or a member reached through it.
    Reference {
        /// The name the entry was found under.
        name:    String,
        /// The bound entry.
        entry:   Rc<Entry>,
        /// Where `name` was looked up.
        binding: Binding,
    },
    /// A callable reached through a dotted access.
    Function(Callable),
    /// A binary operator.
    BinaryOperator(Operator),
    /// A materialized literal.
    Literal(Value),
}

impl Token {
    /// Shorthand for an unevaluated plain name.
    #[must_use]
    pub fn name(text: impl Into<String>) -> Self {
        Self::Unevaluated { text: text.into(),
                            hint: EvalHint::Reference, }
    }

    /// Returns the kind of this token.
    #[must_use]
    pub const fn kind(&self) -> TokenKind {
        match self {
            Self::Space => TokenKind::Space,
            Self::Unevaluated { .. } => TokenKind::Unevaluated,
            Self::Reference { .. } => TokenKind::Reference,
            Self::Function(_) => TokenKind::Function,
            Self::BinaryOperator(_) => TokenKind::BinaryOperator,
            Self::Literal(_) => TokenKind::Literal,
        }
    }

    /// Returns the name this token stands for when it is used as a member or
    /// an assignment target: the trimmed text of a plain unevaluated token or
    /// the name of an environment reference.
    ///
    /// A member reference has no name of its own, so `a.b` is never mistaken
    /// for a top-level `b`.
    #[must_use]
    pub fn as_name(&self) -> Option<&str> {
        match self {
            Self::Unevaluated { text,
                                hint: EvalHint::Reference, } => Some(text.trim()),
            Self::Reference { name,
                              binding: Binding::Environment,
                              .. } => Some(name),
            _ => None,
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Space => write!(f, " "),
            Self::Unevaluated { text, .. } => write!(f, "{text}"),
            Self::Reference { name, .. } => write!(f, "{name}"),
            Self::Function(callable) => write!(f, "{}", callable.name),
            Self::BinaryOperator(op) => write!(f, "{}", op.symbol()),
            Self::Literal(value) => write!(f, "{value}"),
        }
    }
}
