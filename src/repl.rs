//! Terminal line input and the interactive read loop.

use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use std::path::PathBuf;

use crate::api::D1Api;
use crate::error::{ConsoleError, Result};
use crate::session::{Flow, LineReader, ReadOutcome, Session};

/// rustyline-backed reader with file-backed history.
pub struct TerminalInput {
    editor: DefaultEditor,
    history_path: Option<PathBuf>,
}

impl TerminalInput {
    /// Opens the terminal and loads history from `history_path` if it exists.
    pub fn new(history_path: Option<PathBuf>) -> Result<Self> {
        let mut editor = DefaultEditor::new().map_err(readline_error)?;
        if let Some(path) = history_path.as_deref() {
            if path.exists() {
                if let Err(e) = editor.load_history(path) {
                    tracing::warn!("Failed to load history from {}: {}", path.display(), e);
                }
            }
        }
        Ok(Self {
            editor,
            history_path,
        })
    }

    pub fn without_history() -> Result<Self> {
        Self::new(None)
    }

    /// Adds a completed statement to history and appends it to the history file.
    pub fn record(&mut self, entry: &str) {
        if let Err(e) = self.editor.add_history_entry(entry) {
            tracing::debug!("History entry rejected: {}", e);
            return;
        }
        let Some(path) = self.history_path.as_deref() else {
            return;
        };
        if let Some(parent) = path.parent() {
            if let Err(e) = std::fs::create_dir_all(parent) {
                tracing::warn!("Failed to create history directory: {}", e);
                return;
            }
        }
        if let Err(e) = self.editor.append_history(path) {
            tracing::warn!("Failed to append history to {}: {}", path.display(), e);
        }
    }
}

impl LineReader for TerminalInput {
    fn read_line(&mut self, prompt: &str) -> Result<ReadOutcome> {
        match self.editor.readline(prompt) {
            Ok(line) => Ok(ReadOutcome::Line(line)),
            Err(ReadlineError::Interrupted) => Ok(ReadOutcome::Interrupted),
            Err(ReadlineError::Eof) => Ok(ReadOutcome::Eof),
            Err(e) => Err(readline_error(e)),
        }
    }
}

fn readline_error(err: ReadlineError) -> ConsoleError {
    match err {
        ReadlineError::Io(e) => ConsoleError::from(e),
        other => ConsoleError::io(other.to_string()),
    }
}

/// Reads lines until EXIT or end of input.
///
/// Each completed buffer is recorded in history before it runs. The loop is
/// blocked for the whole dispatch, so no input is read while a remote call
/// is in flight except the answer to a confirmation.
pub async fn run_repl<A: D1Api>(session: &mut Session<A>, input: &mut TerminalInput) -> Result<()> {
    loop {
        let prompt = session.prompt();
        let line = match input.read_line(&prompt)? {
            ReadOutcome::Line(line) => line,
            ReadOutcome::Interrupted => {
                session.interrupt();
                continue;
            }
            ReadOutcome::Eof => break,
        };

        let Some(text) = session.feed(&line)? else {
            continue;
        };
        input.record(&text);
        if session.run(&text, input).await? == Flow::Exit {
            break;
        }
    }
    tracing::info!("Session ended");
    Ok(())
}
