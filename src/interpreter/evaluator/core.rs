use std::rc::Rc;

use crate::interpreter::{
    dictionary::TokenDictionary,
    environment::{Entry, Environment, EvalResult},
    host::Sink,
    token::{Operator, Token},
    value::core::Value,
};

/// What the reducer asks of the scan after a push.
#[derive(Debug, Clone, PartialEq)]
pub enum Flow {
    /// Keep feeding tokens.
    Continue,
    /// A callable ran; the expression is over and the rest of the input is
    /// not scanned.
    Invoked(Value),
}

/// The result of running one expression.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// The scan reached its end without an invocation. Holds the tokens
    /// left after every reduction.
    Completed(Vec<Token>),
    /// A callable was invoked and returned this value.
    Invoked(Value),
    /// The expression was `name = value` and bound `name`.
    Assigned {
        /// The bound name.
        name: String,
    },
}

/// Incremental evaluator over completed tokens.
///
/// Each pushed token is appended to the buffer, after which three rules run
/// in order:
///
/// 1. Resolution: an unevaluated last token becomes a literal or a
///    reference when it can.
/// 2. Invocation: a function followed by a tuple literal is called, and the
///    push returns `Flow::Invoked`.
/// 3. Member fold: `receiver . member` is replaced by what `member` names
///    on the receiver.
///
/// A fold shortens the buffer by two; no rule ever grows it.
///
/// # Example
/// ```
/// use shellexpr::interpreter::{
///     dictionary::TokenDictionary,
///     environment::{Entry, Environment},
///     evaluator::core::{Flow, Reducer},
///     host::MemorySink,
///     token::{Operator, Token},
///     value::core::Value,
/// };
///
/// let dictionary = TokenDictionary::new();
/// let mut env = Environment::new();
/// env.assign("a", Entry::default().with_member("b", Entry::with_source(Value::Integer(1))));
/// let mut sink = MemorySink::default();
///
/// let mut reducer = Reducer::new(&dictionary, &mut env, &mut sink);
/// reducer.push(Token::name("a"), 0).unwrap();
/// reducer.push(Token::BinaryOperator(Operator::Dot), 1).unwrap();
/// assert_eq!(reducer.push(Token::name("b"), 2), Ok(Flow::Continue));
///
/// assert_eq!(reducer.len(), 1);
/// ```
pub struct Reducer<'a> {
    pub(super) dictionary: &'a TokenDictionary,
    pub(super) env:        &'a mut Environment,
    pub(super) sink:       &'a mut dyn Sink,
    pub(super) buffer:     Vec<(Token, usize)>,
}

impl<'a> Reducer<'a> {
    /// Creates a reducer with an empty buffer.
    pub fn new(dictionary: &'a TokenDictionary,
               env: &'a mut Environment,
               sink: &'a mut dyn Sink)
               -> Self {
        Self { dictionary,
               env,
               sink,
               buffer: Vec::new() }
    }

    /// Returns the number of buffered tokens.
    #[must_use]
    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    /// Returns `true` if no token is buffered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    /// Returns the buffered tokens in order.
    pub fn tokens(&self) -> impl Iterator<Item = &Token> {
        self.buffer.iter().map(|(token, _)| token)
    }

    /// Appends a completed token and reduces the buffer.
    ///
    /// # Parameters
    /// - `token`: The token the scanner completed.
    /// - `position`: Its byte offset in the input.
    ///
    /// # Returns
    /// `Flow::Invoked` with the callable's result if the push completed an
    /// invocation, `Flow::Continue` otherwise.
    ///
    /// # Errors
    /// Returns `MalformedLiteral` if a subexpression cannot be materialized,
    /// `UnknownReference` or `MemberNotFound` if a dotted access fails, and
    /// whatever error an invoked callable returns.
    pub fn push(&mut self, token: Token, position: usize) -> EvalResult<Flow> {
        tracing::trace!(?token, position, "push");
        self.buffer.push((token, position));

        self.resolve_last()?;
        if let Some(value) = self.invoke_last()? {
            return Ok(Flow::Invoked(value));
        }
        self.fold_member()?;

        Ok(Flow::Continue)
    }

    /// Ends the expression.
    ///
    /// A buffer of exactly `name = value`, where `value` is a literal or a
    /// reference, binds `name` in the environment. A reference is bound to
    /// the same shared entry.
    #[must_use]
    pub fn finish(self) -> Outcome {
        let tokens: Vec<Token> = self.buffer.into_iter().map(|(token, _)| token).collect();

        if let [target, Token::BinaryOperator(Operator::Assign), value] = tokens.as_slice()
           && let Some(name) = target.as_name()
        {
            let entry = match value {
                Token::Literal(value) => Some(Rc::new(Entry::with_source(value.clone()))),
                Token::Reference { entry, .. } => Some(Rc::clone(entry)),
                _ => None,
            };

            if let Some(entry) = entry {
                let name = name.to_string();
                self.env.assign_shared(&name, entry);
                return Outcome::Assigned { name };
            }
        }

        Outcome::Completed(tokens)
    }
}
