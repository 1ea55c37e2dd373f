use crate::{
    error::Error,
    interpreter::{evaluator::core::Outcome, value::core::Value},
};

/// How a recorded run ended.
#[derive(Debug, Clone, PartialEq)]
pub enum Status {
    /// The scan completed without an invocation.
    Completed,
    /// A callable was invoked and returned this value.
    Invoked(Value),
    /// A name was bound.
    Assigned(String),
    /// The run was aborted by an error.
    Failed(Error),
}

impl From<&Outcome> for Status {
    fn from(outcome: &Outcome) -> Self {
        match outcome {
            Outcome::Completed(_) => Self::Completed,
            Outcome::Invoked(value) => Self::Invoked(value.clone()),
            Outcome::Assigned { name } => Self::Assigned(name.clone()),
        }
    }
}

/// One run of the interpreter.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    /// Position of the run in the history, starting at 1.
    pub sequence: usize,
    /// The expression as given.
    pub input:    String,
    /// How it ended.
    pub status:   Status,
}

/// The ordered record of every expression an interpreter has run.
#[derive(Debug, Clone, Default)]
pub struct History {
    records: Vec<Record>,
}

impl History {
    /// Creates an empty history.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a record and returns it.
    pub fn record(&mut self, input: &str, status: Status) -> &Record {
        let sequence = self.records.len() + 1;
        self.records.push(Record { sequence,
                                   input: input.to_string(),
                                   status });
        &self.records[sequence - 1]
    }

    /// Returns every record, oldest first.
    #[must_use]
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    /// Returns the most recent record.
    #[must_use]
    pub fn last(&self) -> Option<&Record> {
        self.records.last()
    }

    /// Returns the number of recorded runs.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns `true` if nothing has been run yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
