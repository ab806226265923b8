//! Line input abstraction.
//!
//! The dispatch loop and the confirmation dialogue both read through
//! [`LineReader`], so a nested question is just another call on the same
//! reader while the outer loop waits.

use std::collections::VecDeque;

use crate::error::Result;

/// Result of asking the terminal for a line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReadOutcome {
    Line(String),
    /// Ctrl-C.
    Interrupted,
    /// Ctrl-D or end of input.
    Eof,
}

/// Source of input lines.
pub trait LineReader {
    /// Shows `prompt` and blocks until a line, an interrupt, or end of input.
    fn read_line(&mut self, prompt: &str) -> Result<ReadOutcome>;
}

/// Reader that replays a fixed list of lines, then reports end of input.
///
/// Used for `--execute` confirmations and tests.
#[derive(Debug, Default)]
pub struct ScriptedInput {
    lines: VecDeque<String>,
    prompts: Vec<String>,
}

impl ScriptedInput {
    pub fn new<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            lines: lines.into_iter().map(Into::into).collect(),
            prompts: Vec::new(),
        }
    }

    /// Prompts shown so far.
    pub fn prompts(&self) -> &[String] {
        &self.prompts
    }

    /// Lines not yet consumed.
    pub fn remaining(&self) -> usize {
        self.lines.len()
    }
}

impl LineReader for ScriptedInput {
    fn read_line(&mut self, prompt: &str) -> Result<ReadOutcome> {
        self.prompts.push(prompt.to_string());
        Ok(match self.lines.pop_front() {
            Some(line) => ReadOutcome::Line(line),
            None => ReadOutcome::Eof,
        })
    }
}
