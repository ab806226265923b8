//! One-shot `databases` subcommands.
//!
//! These run through the same session handlers as the console commands, so
//! output and confirmation behave identically.

use crate::api::D1Api;
use crate::cli::DatabaseAction;
use crate::error::Result;
use crate::session::{LineReader, Session};

/// Runs one `databases` action. Failures propagate to the caller.
pub async fn run<A: D1Api>(
    session: &mut Session<A>,
    action: DatabaseAction,
    input: &mut dyn LineReader,
) -> Result<()> {
    match action {
        DatabaseAction::Create { name } => session.create_database(&name).await,
        DatabaseAction::List => session.show_databases().await,
        DatabaseAction::Delete { name, yes } => {
            session.drop_database(&name, input, yes).await?;
            Ok(())
        }
    }
}
