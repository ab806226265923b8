//! One-shot yes/no confirmation for irreversible operations.

use super::input::{LineReader, ReadOutcome};
use crate::error::Result;

/// The only answer that proceeds.
pub const AFFIRMATIVE: &str = "yes";

/// Asks `question` once on the same reader the session uses.
///
/// Only `yes` (any case) confirms. Anything else, including an interrupt or
/// end of input, cancels.
pub fn confirm(input: &mut dyn LineReader, question: &str) -> Result<bool> {
    let confirmed = match input.read_line(question)? {
        ReadOutcome::Line(answer) => is_affirmative(&answer),
        ReadOutcome::Interrupted | ReadOutcome::Eof => false,
    };
    tracing::debug!("Confirmation '{}' -> {}", question.trim(), confirmed);
    Ok(confirmed)
}

pub fn is_affirmative(answer: &str) -> bool {
    answer.trim().eq_ignore_ascii_case(AFFIRMATIVE)
}
