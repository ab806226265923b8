//! Interactive session engine.
//!
//! Raw lines go through the accumulator until a `;` completes the buffer. The
//! buffer is split into statements, each statement is classified, queries are
//! batched and console commands run in between, and results are rendered by
//! the presenter.

mod accumulator;
mod batch;
mod classifier;
mod confirm;
mod engine;
mod input;
mod presenter;
mod splitter;
mod state;

pub use accumulator::{Feed, StatementAccumulator, TERMINATOR};
pub use batch::QueryBatch;
pub use classifier::{check_supported, classify, CommandKind};
pub use confirm::{confirm, is_affirmative};
pub use engine::{Flow, Session, SEMICOLON_HINT};
pub use input::{LineReader, ReadOutcome, ScriptedInput};
pub use presenter::{column_width, display_value, Presenter, SharedBuffer, NO_RESULTS};
pub use splitter::{split, Statement};
pub use state::{OutputMode, SessionState, DEFAULT_PROMPT_NAME};
