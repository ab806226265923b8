//! Splits a terminated buffer into individual statements.
//!
//! Splitting happens on every `;`, including ones inside string literals.
//! Statement boundaries must match what the remote service sees, so quoted
//! semicolons are deliberately not special-cased.

use super::accumulator::TERMINATOR;

/// One `;`-delimited unit of user input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Statement {
    text: String,
    upper: String,
}

impl Statement {
    /// Normalizes raw statement text: each line is trimmed and lines are
    /// joined with a single space.
    pub fn new(raw: &str) -> Self {
        let text = raw
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect::<Vec<_>>()
            .join(" ");
        let upper = text.to_uppercase();
        Self { text, upper }
    }

    /// The statement as typed, original casing preserved.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Uppercase form, for keyword checks only. Never forwarded.
    pub fn upper(&self) -> &str {
        &self.upper
    }

    /// Returns true if the statement reads rows (contains `SELECT`).
    pub fn is_read(&self) -> bool {
        self.upper.contains("SELECT")
    }

    pub fn into_text(self) -> String {
        self.text
    }
}

/// Splits `text` on `;`, trimming pieces and dropping empty ones.
pub fn split(text: &str) -> Vec<Statement> {
    text.split(TERMINATOR)
        .map(str::trim)
        .filter(|piece| !piece.is_empty())
        .map(Statement::new)
        .collect()
}
