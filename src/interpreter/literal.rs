use std::iter::Peekable;

use logos::{Logos, SpannedIter};

use crate::{
    error::RuntimeError,
    interpreter::{
        dictionary::Materializer,
        environment::{Environment, EvalResult},
        lexer::{LiteralToken, unescape},
        value::core::Value,
    },
};

/// Turns the raw text captured between a delimiter pair into one value.
///
/// `raw` is the text between the delimiters, without them. Strings keep
/// their text verbatim apart from escapes; tuples, arrays and objects are
/// read as comma separated lists. Identifiers inside a list evaluate to the
/// `source` of the entry they name, or to `undefined`.
///
/// # Parameters
/// - `materializer`: The materializer the closing delimiter is bound to.
/// - `raw`: The captured text.
/// - `env`: Environment used to evaluate identifiers.
/// - `position`: Position of the opening delimiter, for error reporting.
///
/// # Errors
/// Returns `MalformedLiteral` if the text is not a valid literal of the
/// requested shape.
///
/// # Example
/// ```
/// use shellexpr::interpreter::{
///     dictionary::Materializer,
///     environment::Environment,
///     literal::materialize,
///     value::core::Value,
/// };
///
/// let env = Environment::new();
/// let tuple = materialize(Materializer::Tuple, r#""hi", 2"#, &env, 0).unwrap();
///
/// assert_eq!(tuple, Value::Tuple(vec![Value::from("hi"), Value::Integer(2)]));
/// ```
pub fn materialize(materializer: Materializer,
                   raw: &str,
                   env: &Environment,
                   position: usize)
                   -> EvalResult<Value> {
    tracing::trace!(?materializer, raw, "materialize");

    let parser = || LiteralParser { tokens: LiteralToken::lexer(raw).spanned().peekable(),
                                    env,
                                    position };

    match materializer {
        Materializer::String => Ok(Value::Str(unescape(raw))),
        Materializer::Tuple => parser().parse_sequence(None).map(Value::Tuple),
        Materializer::Array => parser().parse_sequence(None).map(Value::Array),
        Materializer::Object => parser().parse_members(None).map(Value::Object),
    }
}

/// Recursive descent reader over the tokens of one captured subexpression.
struct LiteralParser<'s, 'e> {
    tokens:   Peekable<SpannedIter<'s, LiteralToken>>,
    env:      &'e Environment,
    position: usize,
}

impl LiteralParser<'_, '_> {
    fn malformed(&self, details: impl Into<String>) -> RuntimeError {
        RuntimeError::MalformedLiteral { details:  details.into(),
                                         position: self.position, }
    }

    /// Returns the next token, turning lexing failures into errors.
    fn next_token(&mut self) -> EvalResult<Option<LiteralToken>> {
        match self.tokens.next() {
            Some((Ok(token), _)) => Ok(Some(token)),
            Some((Err(()), span)) => {
                Err(self.malformed(format!("unrecognized text at offset {}", span.start)))
            },
            None => Ok(None),
        }
    }

    fn peek_is(&mut self, expected: &LiteralToken) -> bool {
        matches!(self.tokens.peek(), Some((Ok(token), _)) if token == expected)
    }

    /// Checks that the list ends here: either at `closing` or, for the
    /// outermost list, at the end of the text.
    fn at_end(&mut self, closing: Option<&LiteralToken>) -> bool {
        match closing {
            Some(closing) => self.peek_is(closing),
            None => self.tokens.peek().is_none(),
        }
    }

    fn expect_end(&mut self, closing: Option<&LiteralToken>) -> EvalResult<()> {
        match closing {
            Some(closing) => match self.next_token()? {
                Some(ref token) if token == closing => Ok(()),
                Some(token) => Err(self.malformed(format!("unexpected {token:?}"))),
                None => Err(self.malformed("unexpected end of literal")),
            },
            None => match self.next_token()? {
                None => Ok(()),
                Some(token) => Err(self.malformed(format!("unexpected {token:?}"))),
            },
        }
    }

    /// Parses a comma-separated list of values until `closing`.
    ///
    /// An immediately encountered closing token produces an empty list, and
    /// a single trailing comma is accepted.
    fn parse_sequence(&mut self, closing: Option<LiteralToken>) -> EvalResult<Vec<Value>> {
        let closing = closing.as_ref();
        let mut items = Vec::new();

        while !self.at_end(closing) {
            items.push(self.parse_value()?);
            if self.peek_is(&LiteralToken::Comma) {
                self.next_token()?;
            } else {
                break;
            }
        }

        self.expect_end(closing)?;
        Ok(items)
    }

    /// Parses a comma-separated list of `key: value` members until
    /// `closing`.
    fn parse_members(&mut self,
                     closing: Option<LiteralToken>)
                     -> EvalResult<Vec<(String, Value)>> {
        let closing = closing.as_ref();
        let mut members = Vec::new();

        while !self.at_end(closing) {
            let key = match self.next_token()? {
                Some(LiteralToken::Identifier(name) | LiteralToken::Str(name)) => name,
                Some(token) => return Err(self.malformed(format!("invalid object key {token:?}"))),
                None => return Err(self.malformed("unexpected end of literal")),
            };

            match self.next_token()? {
                Some(LiteralToken::Colon) => {},
                _ => return Err(self.malformed(format!("expected ':' after key '{key}'"))),
            }

            members.push((key, self.parse_value()?));
            if self.peek_is(&LiteralToken::Comma) {
                self.next_token()?;
            } else {
                break;
            }
        }

        self.expect_end(closing)?;
        Ok(members)
    }

    fn parse_value(&mut self) -> EvalResult<Value> {
        let Some(token) = self.next_token()? else {
            return Err(self.malformed("expected a value"));
        };

        let value = match token {
            LiteralToken::Real(r) => Value::Real(r),
            LiteralToken::Integer(n) => Value::Integer(n),
            LiteralToken::Bool(b) => Value::Bool(b),
            LiteralToken::Null => Value::Null,
            LiteralToken::Undefined => Value::Undefined,
            LiteralToken::Str(s) => Value::Str(s),
            LiteralToken::Identifier(name) => self.env
                                                  .resolve(&name)
                                                  .and_then(|entry| entry.source.clone())
                                                  .unwrap_or(Value::Undefined),
            LiteralToken::LParen => Value::Tuple(self.parse_sequence(Some(LiteralToken::RParen))?),
            LiteralToken::LBracket => {
                Value::Array(self.parse_sequence(Some(LiteralToken::RBracket))?)
            },
            LiteralToken::LBrace => Value::Object(self.parse_members(Some(LiteralToken::RBrace))?),
            other => return Err(self.malformed(format!("unexpected {other:?}"))),
        };

        Ok(value)
    }
}
