use crate::error::ScanError;

/// What closing a delimiter did to the subexpression being read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Closed {
    /// The stack is back at the depth the subexpression was entered at.
    Complete,
    /// The close matched a delimiter nested inside the subexpression; it is
    /// part of the captured text.
    Interior,
}

/// Tracks open delimiters and the subexpression currently being captured.
///
/// The stack is empty exactly when no subexpression is being read. Nested
/// delimiters, including ones of the same kind, are pushed and popped but
/// only the pop that returns the stack to the entry depth completes the
/// subexpression.
#[derive(Debug, Default, Clone)]
pub struct DelimiterTracker {
    stack:       Vec<(char, usize)>,
    reading:     bool,
    entry_depth: usize,
}

impl DelimiterTracker {
    /// Creates a tracker with an empty stack.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Pushes an opening delimiter.
    ///
    /// Returns `true` if this delimiter starts a new subexpression, `false`
    /// if it is nested inside the one being read.
    pub fn open(&mut self, delimiter: char, position: usize) -> bool {
        self.stack.push((delimiter, position));
        if self.reading {
            return false;
        }

        self.reading = true;
        self.entry_depth = self.stack.len() - 1;
        true
    }

    /// Pops the delimiter that `delimiter` closes.
    ///
    /// # Parameters
    /// - `delimiter`: The closing character.
    /// - `partner`: The opening character it is required to match.
    /// - `position`: Position of the closing character.
    ///
    /// # Errors
    /// Returns `UnexpectedToken` if `partner` is not on top of the stack,
    /// including when the stack is empty.
    ///
    /// # Example
    /// ```
    /// use shellexpr::interpreter::scanner::tracker::{Closed, DelimiterTracker};
    ///
    /// let mut tracker = DelimiterTracker::new();
    /// tracker.open('{', 0);
    /// tracker.open('{', 3);
    ///
    /// assert_eq!(tracker.close('}', '{', 7), Ok(Closed::Interior));
    /// assert_eq!(tracker.close('}', '{', 8), Ok(Closed::Complete));
    /// assert!(tracker.close(']', '[', 9).is_err());
    /// ```
    pub fn close(&mut self,
                 delimiter: char,
                 partner: char,
                 position: usize)
                 -> Result<Closed, ScanError> {
        match self.stack.last() {
            Some(&(top, _)) if top == partner => {},
            _ => {
                return Err(ScanError::UnexpectedToken { token: delimiter,
                                                        position });
            },
        }

        self.stack.pop();
        if self.reading && self.stack.len() == self.entry_depth {
            self.reading = false;
            return Ok(Closed::Complete);
        }

        Ok(Closed::Interior)
    }

    /// Returns the innermost open delimiter.
    #[must_use]
    pub fn top(&self) -> Option<char> {
        self.stack.last().map(|&(c, _)| c)
    }

    /// Returns the innermost open delimiter together with its position.
    #[must_use]
    pub fn unclosed(&self) -> Option<(char, usize)> {
        self.stack.last().copied()
    }

    /// Returns the number of open delimiters.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.stack.len()
    }
}
