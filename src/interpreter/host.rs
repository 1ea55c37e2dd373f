use std::{cell::RefCell, rc::Rc};

use crate::{
    error::RuntimeError,
    interpreter::{
        environment::{Callable, Entry, Environment, EvalResult},
        value::core::Value,
    },
};

/// The output side of the host. Callables write here instead of printing.
pub trait Sink {
    /// Writes one line of text.
    fn write(&mut self, text: &str);
}

/// Writes every line to standard output.
#[derive(Debug, Default, Clone, Copy)]
pub struct StdoutSink;

impl Sink for StdoutSink {
    fn write(&mut self, text: &str) {
        println!("{text}");
    }
}

/// Collects written lines in memory.
///
/// Clones share the same buffer, so a host can keep one clone and hand the
/// other to the interpreter.
///
/// # Example
/// ```
/// use shellexpr::interpreter::host::{MemorySink, Sink};
///
/// let sink = MemorySink::default();
/// let mut writer = sink.clone();
/// writer.write("hi");
///
/// assert_eq!(sink.lines(), vec!["hi".to_string()]);
/// ```
#[derive(Debug, Default, Clone)]
pub struct MemorySink {
    lines: Rc<RefCell<Vec<String>>>,
}

impl MemorySink {
    /// Returns a copy of every line written so far.
    #[must_use]
    pub fn lines(&self) -> Vec<String> {
        self.lines.borrow().clone()
    }
}

impl Sink for MemorySink {
    fn write(&mut self, text: &str) {
        self.lines.borrow_mut().push(text.to_string());
    }
}

/// Writes the first argument to the sink and returns `undefined`.
///
/// Strings are written without their quotes; every other value uses its
/// `Display` form.
///
/// # Example
/// ```
/// use shellexpr::interpreter::{
///     host::{MemorySink, console_log},
///     value::core::Value,
/// };
///
/// let mut sink = MemorySink::default();
/// let result = console_log(&[Value::from("hi"), Value::Integer(2)], &mut sink, 0).unwrap();
///
/// assert_eq!(result, Value::Undefined);
/// assert_eq!(sink.lines(), vec!["hi".to_string()]);
/// ```
pub fn console_log(args: &[Value], sink: &mut dyn Sink, position: usize) -> EvalResult<Value> {
    let Some(first) = args.first() else {
        return Err(RuntimeError::ArgumentCountMismatch { name: "log".to_string(),
                                                         expected: 1,
                                                         found: 0,
                                                         position });
    };

    sink.write(&first.to_string());
    Ok(Value::Undefined)
}

/// Registers the host bindings every interpreter starts with.
///
/// Currently a single `console` entry exposing `log`.
pub fn bootstrap(env: &mut Environment) {
    let console = Entry::default().with_callable(Callable { name: "log",
                                                            func: console_log, });
    env.assign("console", console);
}
