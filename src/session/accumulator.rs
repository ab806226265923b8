//! Multi-line statement buffering.
//!
//! Lines are collected until the buffer, trimmed, ends with `;`. Nothing is
//! dispatched before that.

/// Statement terminator.
pub const TERMINATOR: char = ';';

/// Outcome of feeding one line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Feed {
    /// More lines are needed. `hint` is set when the submission did not change
    /// since the last incomplete one, i.e. the user keeps pressing Enter.
    Incomplete { hint: bool },
    /// The buffer is terminated; ownership of its trimmed text moves to the caller.
    Complete(String),
}

/// Buffers raw input lines into a terminated statement text.
#[derive(Debug, Default)]
pub struct StatementAccumulator {
    buffer: String,
    last_rejected: String,
}

impl StatementAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a line and reports whether the buffer is now complete.
    pub fn feed(&mut self, line: &str) -> Feed {
        self.buffer.push_str(line.trim_end_matches(['\r', '\n']));
        self.buffer.push('\n');

        let trimmed = self.buffer.trim();
        if trimmed.is_empty() {
            // Blank lines on a fresh prompt are not a submission.
            self.buffer.clear();
            return Feed::Incomplete { hint: false };
        }

        if !trimmed.ends_with(TERMINATOR) {
            let flattened = trimmed.replace('\n', "");
            let hint = flattened == self.last_rejected;
            self.last_rejected = flattened;
            return Feed::Incomplete { hint };
        }

        let text = trimmed.to_string();
        self.buffer.clear();
        self.last_rejected.clear();
        Feed::Complete(text)
    }

    /// Returns true while a statement is being typed.
    pub fn is_pending(&self) -> bool {
        !self.buffer.trim().is_empty()
    }

    /// Drops the partially typed statement.
    pub fn clear(&mut self) {
        self.buffer.clear();
        self.last_rejected.clear();
    }
}
