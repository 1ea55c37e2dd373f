/// The interpreter context: owns the dictionary, the environment, the sink
/// and the run history, and drives one expression through both phases.
///
/// # Responsibilities
/// - Pulls tokens from the scanner and pushes them into the reducer.
/// - Stops at the first error or at the first invocation.
/// - Records every run in the history.
pub mod core;
/// The token dictionary: the table mapping characters to token kinds and
/// actions.
///
/// The table is built once from a declarative list and only read afterwards.
/// Every classification the scanner makes goes through it, including the
/// digits used to read numbers.
pub mod dictionary;
/// Named bindings and the members reachable through them.
pub mod environment;
/// The incremental evaluator.
///
/// The reducer receives completed tokens one at a time and reduces its buffer
/// after every push: it resolves names and literals, invokes callables and
/// folds dotted member accesses.
///
/// # Responsibilities
/// - Resolves unevaluated tokens against the environment.
/// - Materializes captured subexpressions into literal values.
/// - Signals an invocation so the scan can stop early.
/// - Binds `name = value` when the expression ends.
pub mod evaluator;
/// The ordered record of past runs.
pub mod history;
/// Host bindings: output sinks and the `console` entry.
pub mod host;
/// The tokenizer for the text captured inside bracketed and quoted
/// subexpressions.
pub mod lexer;
/// Reads captured subexpression text into values.
pub mod literal;
/// The character-driven scanner.
///
/// The scanner reads one character at a time and yields completed tokens. It
/// never evaluates anything, so it can be driven on its own to inspect how an
/// expression is split up.
///
/// # Responsibilities
/// - Splits names, whitespace and operators.
/// - Decides two character operators with one character of lookahead.
/// - Captures bracketed and quoted subexpressions verbatim, tracking nested
///   delimiters.
/// - Reports mismatched and unclosed delimiters with their position.
pub mod scanner;
/// Tokens and the single kind tag shared by tokens and dictionary entries.
pub mod token;
/// The runtime values produced by literals and callables.
pub mod value;
