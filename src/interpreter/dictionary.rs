use std::collections::HashMap;

use crate::interpreter::{
    token::{Operator, TokenKind},
    value::core::Value,
};

/// Identifies the routine that turns a captured subexpression into a literal.
///
/// Closing delimiters are bound to one of these in the dictionary; the
/// routines themselves live in [`crate::interpreter::literal`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Materializer {
    /// `{ ... }`
    Object,
    /// `[ ... ]`
    Array,
    /// `( ... )`
    Tuple,
    /// `" ... "` or `' ... '`
    String,
}

/// What a dictionary entry means once its character has been classified.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Ends the expression.
    Terminate,
    /// Separates two tokens.
    Separate,
    /// Opens a subexpression.
    Open,
    /// Closes a subexpression opened by `partner`.
    Close {
        /// The opening delimiter this character closes.
        partner:      char,
        /// The materializer for the captured text.
        materializer: Materializer,
    },
    /// Starts an operator.
    Operator(Operator),
    /// A decimal digit and its value.
    Digit(u8),
}

/// The context a character is classified in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanMode {
    /// Outside of any subexpression.
    Global,
    /// Inside a bracketed subexpression. Quotes open rather than close here.
    Subexpression,
    /// Inside a quoted subexpression opened by the given quote. Only that
    /// quote is significant.
    Quoted(char),
}

/// Lookup order used when classifying a character outside subexpressions.
const GLOBAL_ORDER: &[TokenKind] = &[TokenKind::End,
                                     TokenKind::Space,
                                     TokenKind::DelimLeft,
                                     TokenKind::DelimRight,
                                     TokenKind::BinaryOperator,
                                     TokenKind::DoubleBinaryOperator,
                                     TokenKind::UnaryOperator,
                                     TokenKind::LiteralDigit];

/// Defines the dictionary table.
///
/// Each kind lists the characters it matches together with their action.
/// Actions name operators and materializers by identifier, so an entry can
/// only refer to a handler that exists.
macro_rules! token_dictionary {
    (
        $(
            $kind:ident => [ $( $ch:literal => $action:expr ),* $(,)? ]
        ),* $(,)?
    ) => {
        fn dictionary_table() -> Vec<(TokenKind, Vec<(char, Action)>)> {
            vec![
                $(
                    (TokenKind::$kind, vec![ $( ($ch, $action), )* ]),
                )*
            ]
        }
    };
}

token_dictionary! {
    End => [';' => Action::Terminate],
    Space => [
        ' ' => Action::Separate,
        '\n' => Action::Separate,
        '\t' => Action::Separate,
        '\r' => Action::Separate,
    ],
    Reference => [],
    DelimLeft => [
        '{' => Action::Open,
        '[' => Action::Open,
        '(' => Action::Open,
        '"' => Action::Open,
        '\'' => Action::Open,
    ],
    DelimRight => [
        '}' => Action::Close { partner: '{', materializer: Materializer::Object },
        ']' => Action::Close { partner: '[', materializer: Materializer::Array },
        ')' => Action::Close { partner: '(', materializer: Materializer::Tuple },
        '"' => Action::Close { partner: '"', materializer: Materializer::String },
        '\'' => Action::Close { partner: '\'', materializer: Materializer::String },
    ],
    Function => [],
    UnaryOperator => ['!' => Action::Operator(Operator::Bang)],
    BinaryOperator => [
        '.' => Action::Operator(Operator::Dot),
        '=' => Action::Operator(Operator::Assign),
        '+' => Action::Operator(Operator::Add),
        '-' => Action::Operator(Operator::Subtract),
        '*' => Action::Operator(Operator::Multiply),
        '/' => Action::Operator(Operator::Divide),
        '%' => Action::Operator(Operator::Modulo),
    ],
    DoubleBinaryOperator => [
        '&' => Action::Operator(Operator::Ampersand),
        '|' => Action::Operator(Operator::Pipe),
        '<' => Action::Operator(Operator::Less),
        '>' => Action::Operator(Operator::Greater),
    ],
    LiteralDigit => [
        '0' => Action::Digit(0),
        '1' => Action::Digit(1),
        '2' => Action::Digit(2),
        '3' => Action::Digit(3),
        '4' => Action::Digit(4),
        '5' => Action::Digit(5),
        '6' => Action::Digit(6),
        '7' => Action::Digit(7),
        '8' => Action::Digit(8),
        '9' => Action::Digit(9),
    ],
    Control => [],
}

/// The static table mapping characters to token kinds and actions.
///
/// Built once when the interpreter is constructed and never mutated.
#[derive(Debug, Clone)]
pub struct TokenDictionary {
    table: HashMap<TokenKind, HashMap<char, Action>>,
}

impl Default for TokenDictionary {
    fn default() -> Self {
        Self::new()
    }
}

impl TokenDictionary {
    /// Builds the dictionary from the static table.
    #[must_use]
    pub fn new() -> Self {
        let table = dictionary_table().into_iter()
                                      .map(|(kind, entries)| (kind, entries.into_iter().collect()))
                                      .collect();
        Self { table }
    }

    /// Returns the action bound to `c` under `kind`, if any.
    #[must_use]
    pub fn action(&self, kind: TokenKind, c: char) -> Option<Action> {
        self.table.get(&kind).and_then(|entries| entries.get(&c)).copied()
    }

    fn contains(&self, kind: TokenKind, c: char) -> bool {
        self.action(kind, c).is_some()
    }

    /// Classifies a character in the given mode.
    ///
    /// Returns `None` for ordinary text.
    ///
    /// # Example
    /// ```
    /// use shellexpr::interpreter::{
    ///     dictionary::{ScanMode, TokenDictionary},
    ///     token::TokenKind,
    /// };
    ///
    /// let dictionary = TokenDictionary::new();
    ///
    /// assert_eq!(dictionary.classify('"', ScanMode::Global), Some(TokenKind::DelimLeft));
    /// assert_eq!(dictionary.classify('"', ScanMode::Quoted('"')), Some(TokenKind::DelimRight));
    /// assert_eq!(dictionary.classify(')', ScanMode::Quoted('"')), None);
    /// assert_eq!(dictionary.classify('x', ScanMode::Global), None);
    /// ```
    #[must_use]
    pub fn classify(&self, c: char, mode: ScanMode) -> Option<TokenKind> {
        match mode {
            ScanMode::Quoted(quote) => (c == quote).then_some(TokenKind::DelimRight),
            ScanMode::Subexpression => {
                [TokenKind::DelimLeft, TokenKind::DelimRight].into_iter()
                                                             .find(|kind| self.contains(*kind, c))
            },
            ScanMode::Global => GLOBAL_ORDER.iter().copied().find(|kind| self.contains(*kind, c)),
        }
    }

    /// Returns `true` if `c` is both an opener and a closer, as quotes are.
    #[must_use]
    pub fn is_quote(&self, c: char) -> bool {
        matches!(self.action(TokenKind::DelimRight, c),
                 Some(Action::Close { partner, .. }) if partner == c)
    }

    /// Returns the opening delimiter that `close` is required to match.
    #[must_use]
    pub fn partner(&self, close: char) -> Option<char> {
        match self.action(TokenKind::DelimRight, close) {
            Some(Action::Close { partner, .. }) => Some(partner),
            _ => None,
        }
    }

    /// Reads a number made only of dictionary digits, optionally with a
    /// single `.` followed by more digits.
    ///
    /// Returns `None` if the text is not such a number or the integer part
    /// overflows.
    ///
    /// # Example
    /// ```
    /// use shellexpr::interpreter::{dictionary::TokenDictionary, value::core::Value};
    ///
    /// let dictionary = TokenDictionary::new();
    ///
    /// assert_eq!(dictionary.number("42"), Some(Value::Integer(42)));
    /// assert_eq!(dictionary.number("1.5"), Some(Value::Real(1.5)));
    /// assert_eq!(dictionary.number("1."), None);
    /// assert_eq!(dictionary.number("x1"), None);
    /// ```
    #[must_use]
    pub fn number(&self, text: &str) -> Option<Value> {
        let (whole, fraction) = match text.split_once('.') {
            Some((whole, fraction)) => (whole, Some(fraction)),
            None => (text, None),
        };

        if whole.is_empty() {
            return None;
        }

        let mut integer: i64 = 0;
        for c in whole.chars() {
            let Some(Action::Digit(digit)) = self.action(TokenKind::LiteralDigit, c) else {
                return None;
            };
            integer = integer.checked_mul(10)?.checked_add(i64::from(digit))?;
        }

        match fraction {
            None => Some(Value::Integer(integer)),
            Some(fraction) => {
                if fraction.is_empty()
                   || !fraction.chars().all(|c| self.contains(TokenKind::LiteralDigit, c))
                {
                    return None;
                }
                text.parse().ok().map(Value::Real)
            },
        }
    }
}
