use crate::{
    error::Error,
    interpreter::{
        dictionary::TokenDictionary,
        environment::Environment,
        evaluator::core::{Flow, Outcome, Reducer},
        history::{History, Status},
        host::{Sink, StdoutSink, bootstrap},
        scanner::Scanner,
    },
};

/// Owns everything one expression run needs: the token dictionary, the
/// environment, the output sink and the history of past runs.
///
/// Each [`Interpreter::run`] scans and reduces one expression. Bindings made
/// by assignments persist across runs.
///
/// # Example
/// ```
/// use shellexpr::interpreter::{
///     core::Interpreter,
///     evaluator::core::Outcome,
///     host::MemorySink,
///     value::core::Value,
/// };
///
/// let sink = MemorySink::default();
/// let mut interpreter = Interpreter::with_sink(Box::new(sink.clone()));
///
/// let outcome = interpreter.run(r#"console.log("hi");"#).unwrap();
///
/// assert_eq!(outcome, Outcome::Invoked(Value::Undefined));
/// assert_eq!(sink.lines(), vec!["hi".to_string()]);
/// ```
pub struct Interpreter {
    dictionary:  TokenDictionary,
    environment: Environment,
    sink:        Box<dyn Sink>,
    history:     History,
}

impl Interpreter {
    /// Creates an interpreter that writes to standard output, with `console`
    /// bound.
    #[must_use]
    pub fn new() -> Self {
        Self::with_sink(Box::new(StdoutSink))
    }

    /// Creates an interpreter that writes to `sink`, with `console` bound.
    #[must_use]
    pub fn with_sink(sink: Box<dyn Sink>) -> Self {
        let mut environment = Environment::new();
        bootstrap(&mut environment);

        Self { dictionary: TokenDictionary::new(),
               environment,
               sink,
               history: History::new() }
    }

    /// Runs one expression and records it in the history.
    ///
    /// Scanning stops at the first `;`, at the end of the input, at the
    /// first error, or as soon as a callable is invoked.
    ///
    /// # Errors
    /// Returns the first scan or runtime error. Bindings made before the
    /// error stay in place.
    #[tracing::instrument(level = "debug", skip(self))]
    pub fn run(&mut self, source: &str) -> Result<Outcome, Error> {
        let result = self.evaluate(source);

        let status = match &result {
            Ok(outcome) => Status::from(outcome),
            Err(error) => Status::Failed(error.clone()),
        };
        let record = self.history.record(source, status);
        tracing::debug!(sequence = record.sequence, status = ?record.status, "recorded");

        result
    }

    fn evaluate(&mut self, source: &str) -> Result<Outcome, Error> {
        let mut reducer = Reducer::new(&self.dictionary, &mut self.environment, &mut *self.sink);

        for item in Scanner::new(&self.dictionary, source) {
            let (token, position) = item?;
            if let Flow::Invoked(value) = reducer.push(token, position)? {
                return Ok(Outcome::Invoked(value));
            }
        }

        Ok(reducer.finish())
    }

    /// Returns a scanner over `source` without evaluating anything.
    #[must_use]
    pub fn scan<'a>(&'a self, source: &'a str) -> Scanner<'a> {
        Scanner::new(&self.dictionary, source)
    }

    /// Returns the environment.
    #[must_use]
    pub const fn environment(&self) -> &Environment {
        &self.environment
    }

    /// Returns the environment for the host to bind names in.
    pub const fn environment_mut(&mut self) -> &mut Environment {
        &mut self.environment
    }

    /// Returns the history of runs.
    #[must_use]
    pub const fn history(&self) -> &History {
        &self.history
    }
}

impl Default for Interpreter {
    fn default() -> Self {
        Self::new()
    }
}
