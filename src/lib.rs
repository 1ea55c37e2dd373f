//! # shellexpr
//!
//! shellexpr is a small incremental interpreter for single-line,
//! JavaScript-flavoured expressions such as `console.log("hi");`.
//!
//! An expression is scanned one character at a time into tokens, and every
//! completed token is immediately reduced against an environment of named
//! entries. Invoking a callable ends the expression.

#![warn(
    clippy::redundant_clone,
    clippy::needless_pass_by_value,
    clippy::similar_names,
    clippy::large_enum_variant,
    clippy::string_lit_as_bytes,
    clippy::match_same_arms,
    clippy::cargo,
    clippy::nursery,
    clippy::perf,
    clippy::style,
    clippy::suspicious,
    clippy::correctness,
    clippy::complexity,
    clippy::pedantic,
)]
#![allow(clippy::missing_errors_doc)]

use crate::{
    error::Error,
    interpreter::{core::Interpreter, evaluator::core::Outcome},
};

/// Provides unified error types for scanning and evaluation.
///
/// Every error carries the byte offset it occurred at and renders as
/// `Error at position N: ...`.
///
/// # Responsibilities
/// - Defines error enums for both phases.
/// - Exposes a flat `ErrorKind` for hosts that only branch on the kind.
pub mod error;
/// Orchestrates the execution of expressions.
///
/// This module ties together the token dictionary, the scanner, the reducer,
/// the environment and the host bindings.
///
/// # Responsibilities
/// - Coordinates both phases of a run.
/// - Provides the `Interpreter` entry point.
pub mod interpreter;

/// Runs one expression in a fresh interpreter that writes to standard
/// output.
///
/// # Errors
/// Returns the first scan or runtime error.
///
/// # Examples
/// ```
/// use shellexpr::{interpreter::evaluator::core::Outcome, run};
///
/// let outcome = run("x;").unwrap();
/// assert!(matches!(outcome, Outcome::Completed(_)));
///
/// // `y` is not bound, so member access on it fails.
/// assert!(run("y.z;").is_err());
/// ```
pub fn run(source: &str) -> Result<Outcome, Error> {
    Interpreter::new().run(source)
}
