/// Single-character-lookahead disambiguation of two character operators.
pub mod operator;
/// The delimiter stack and subexpression capture state.
pub mod tracker;

use std::{collections::VecDeque, mem, str::CharIndices};

use crate::{
    error::ScanError,
    interpreter::{
        dictionary::{Action, ScanMode, TokenDictionary},
        scanner::{
            operator::{Disambiguation, disambiguate},
            tracker::{Closed, DelimiterTracker},
        },
        token::{EvalHint, Operator, Token, TokenKind},
        value::core::Value,
    },
};

/// The scanner's current state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    /// Outside of any subexpression or operator.
    Global,
    /// One operator character has been read and the next character decides
    /// whether it is part of a two character operator.
    Operator {
        first:    Operator,
        position: usize,
    },
    /// An operator has been emitted; leading whitespace of its right operand
    /// is skipped.
    RightOperand,
    /// Capturing the raw text of a subexpression opened at `start`.
    Subexpression {
        start: usize,
    },
}

/// The character-driven state machine.
///
/// Consumes its input one character at a time and yields completed tokens
/// with their byte offsets. The scanner never looks at the environment, so
/// the tokens it yields are either unevaluated text, whitespace or
/// operators. It is lazy: a consumer that stops pulling stops the scan.
///
/// Scanning ends at the first `;`, or at the end of the input. The first
/// error aborts the scan; after it the iterator yields nothing.
///
/// # Example
/// ```
/// use shellexpr::interpreter::{
///     dictionary::TokenDictionary,
///     scanner::Scanner,
///     token::{Operator, Token},
/// };
///
/// let dictionary = TokenDictionary::new();
/// let tokens = Scanner::new(&dictionary, "a == b;").map(|item| item.map(|(token, _)| token))
///                                                  .collect::<Result<Vec<_>, _>>()
///                                                  .unwrap();
///
/// assert_eq!(tokens,
///            vec![Token::name("a"), Token::BinaryOperator(Operator::EqualEqual), Token::name("b")]);
/// ```
pub struct Scanner<'a> {
    dictionary:    &'a TokenDictionary,
    chars:         CharIndices<'a>,
    tracker:       DelimiterTracker,
    mode:          Mode,
    current:       String,
    current_start: usize,
    pending_space: Option<usize>,
    escaped:       bool,
    emitted:       usize,
    queue:         VecDeque<(Token, usize)>,
    finished:      bool,
}

impl<'a> Scanner<'a> {
    /// Creates a scanner over `source`.
    #[must_use]
    pub fn new(dictionary: &'a TokenDictionary, source: &'a str) -> Self {
        Self { dictionary,
               chars: source.char_indices(),
               tracker: DelimiterTracker::new(),
               mode: Mode::Global,
               current: String::new(),
               current_start: 0,
               pending_space: None,
               escaped: false,
               emitted: 0,
               queue: VecDeque::new(),
               finished: false }
    }

    /// Returns the number of delimiters that are currently open.
    #[must_use]
    pub fn delimiter_depth(&self) -> usize {
        self.tracker.depth()
    }

    fn emit(&mut self, token: Token, position: usize) {
        tracing::trace!(?token, position, "emit");
        self.emitted += 1;
        self.queue.push_back((token, position));
    }

    /// Emits the space recorded before the token that is about to start.
    fn emit_pending_space(&mut self) {
        if let Some(position) = self.pending_space.take() {
            self.emit(Token::Space, position);
        }
    }

    /// Emits the text accumulated so far as an unevaluated name.
    fn flush(&mut self) {
        if self.current.is_empty() {
            return;
        }

        let text = mem::take(&mut self.current);
        self.emit(Token::name(text), self.current_start);
    }

    fn append(&mut self, c: char, position: usize) {
        if self.current.is_empty() {
            self.emit_pending_space();
            self.current_start = position;
        }
        self.current.push(c);
        self.mode = Mode::Global;
    }

    /// Returns `true` if the text so far is an integer, so that a following
    /// `.` is a decimal point rather than member access.
    fn reading_integer(&self) -> bool {
        matches!(self.dictionary.number(&self.current), Some(Value::Integer(_)))
    }

    fn step(&mut self, c: char, position: usize) -> Result<(), ScanError> {
        match self.mode {
            Mode::Subexpression { start } => self.step_subexpression(c, position, start),
            Mode::Operator { first,
                             position: operator_position, } => {
                self.mode = Mode::RightOperand;
                match disambiguate(first, c) {
                    Disambiguation::Double(op) => {
                        self.emit(Token::BinaryOperator(op), operator_position);
                        Ok(())
                    },
                    Disambiguation::Single(op) => {
                        self.emit(Token::BinaryOperator(op), operator_position);
                        self.step_operand(c, position)
                    },
                }
            },
            Mode::Global | Mode::RightOperand => self.step_operand(c, position),
        }
    }

    /// Handles a character outside of subexpressions: checks for the end of
    /// the current token, otherwise appends to it.
    fn step_operand(&mut self, c: char, position: usize) -> Result<(), ScanError> {
        match self.dictionary.classify(c, ScanMode::Global) {
            Some(TokenKind::End) => {
                self.flush();
                self.pending_space = None;
                self.finished = true;
            },
            Some(TokenKind::Space) => {
                if self.mode == Mode::RightOperand && self.current.is_empty() {
                    return Ok(());
                }
                self.flush();
                if self.emitted > 0 && self.pending_space.is_none() {
                    self.pending_space = Some(position);
                }
            },
            Some(TokenKind::DelimLeft) => {
                self.flush();
                self.emit_pending_space();
                self.tracker.open(c, position);
                self.mode = Mode::Subexpression { start: position };
                self.escaped = false;
                tracing::debug!(delimiter = %c, position, "enter subexpression");
            },
            // Outside of a subexpression the stack is empty, so no close can match.
            Some(TokenKind::DelimRight) => {
                return Err(ScanError::UnexpectedToken { token: c,
                                                        position });
            },
            Some(kind @ (TokenKind::BinaryOperator
                         | TokenKind::DoubleBinaryOperator
                         | TokenKind::UnaryOperator)) => {
                let Some(Action::Operator(op)) = self.dictionary.action(kind, c) else {
                    self.append(c, position);
                    return Ok(());
                };
                if op == Operator::Dot && self.reading_integer() {
                    self.append(c, position);
                    return Ok(());
                }

                self.flush();
                self.pending_space = None;
                if self.emitted == 0 {
                    return Err(ScanError::UnexpectedToken { token: c,
                                                            position });
                }
                self.mode = Mode::Operator { first: op,
                                             position };
            },
            _ => self.append(c, position),
        }

        Ok(())
    }

    /// Handles a character inside a subexpression: delimiters go to the
    /// tracker, everything else is captured verbatim.
    fn step_subexpression(&mut self,
                          c: char,
                          position: usize,
                          start: usize)
                          -> Result<(), ScanError> {
        let mode = match self.tracker.top() {
            Some(top) if self.dictionary.is_quote(top) => ScanMode::Quoted(top),
            _ => ScanMode::Subexpression,
        };

        if matches!(mode, ScanMode::Quoted(_)) {
            if self.escaped {
                self.escaped = false;
                self.current.push(c);
                return Ok(());
            }
            if c == '\\' {
                self.escaped = true;
                self.current.push(c);
                return Ok(());
            }
        }

        match self.dictionary.classify(c, mode) {
            Some(TokenKind::DelimLeft) => {
                self.tracker.open(c, position);
                self.current.push(c);
            },
            Some(TokenKind::DelimRight) => {
                let Some(Action::Close { partner,
                                         materializer, }) =
                    self.dictionary.action(TokenKind::DelimRight, c)
                else {
                    self.current.push(c);
                    return Ok(());
                };

                match self.tracker.close(c, partner, position)? {
                    Closed::Complete => {
                        tracing::debug!(delimiter = %c, position, "leave subexpression");
                        let text = mem::take(&mut self.current);
                        let hint = EvalHint::Subexpression { closing: c,
                                                             materializer };
                        self.emit(Token::Unevaluated { text, hint }, start);
                        self.mode = Mode::Global;
                    },
                    Closed::Interior => self.current.push(c),
                }
            },
            _ => self.current.push(c),
        }

        Ok(())
    }

    /// Treats the end of the input like `;`.
    ///
    /// # Errors
    /// Returns `UnclosedDelimiter` if a subexpression is still open.
    fn finish_input(&mut self) -> Result<(), ScanError> {
        self.finished = true;
        match self.mode {
            Mode::Subexpression { .. } => match self.tracker.unclosed() {
                Some((delimiter, position)) => {
                    Err(ScanError::UnclosedDelimiter { delimiter,
                                                       position })
                },
                None => Ok(()),
            },
            Mode::Operator { first, position } => {
                self.emit(Token::BinaryOperator(first), position);
                Ok(())
            },
            Mode::Global | Mode::RightOperand => {
                self.flush();
                Ok(())
            },
        }
    }
}

impl Iterator for Scanner<'_> {
    type Item = Result<(Token, usize), ScanError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(item) = self.queue.pop_front() {
                return Some(Ok(item));
            }
            if self.finished {
                return None;
            }

            let result = match self.chars.next() {
                Some((position, c)) => self.step(c, position),
                None => self.finish_input(),
            };

            if let Err(error) = result {
                tracing::debug!(%error, "scan aborted");
                self.queue.clear();
                self.finished = true;
                return Some(Err(error));
            }
        }
    }
}

/// Scans `source` to completion.
///
/// # Errors
/// Returns the first `ScanError` encountered.
pub fn scan(dictionary: &TokenDictionary, source: &str) -> Result<Vec<(Token, usize)>, ScanError> {
    Scanner::new(dictionary, source).collect()
}
