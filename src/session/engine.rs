//! The dispatching session.
//!
//! [`Session`] owns the session state and drives every statement through
//! classification, batching, and rendering. Terminal input stays outside: the
//! caller feeds lines and passes the reader in so a confirmation can ask its
//! question on the same input while the outer loop waits.

use tracing::{debug, info};

use super::accumulator::{Feed, StatementAccumulator};
use super::batch::QueryBatch;
use super::classifier::{check_supported, classify, CommandKind};
use super::confirm::confirm;
use super::input::LineReader;
use super::presenter::Presenter;
use super::splitter::{split, Statement};
use super::state::{OutputMode, SessionState};
use crate::api::{D1Api, DatabaseInfo};
use crate::commands::help::{banner, ABOUT_TEXT, HELP_TEXT};
use crate::error::{ConsoleError, Result};

/// Printed when the user keeps submitting an unterminated statement.
pub const SEMICOLON_HINT: &str = "Type a semicolon to execute the query.";

/// Whether the read loop should keep going.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

/// One running console instance.
pub struct Session<A: D1Api> {
    api: A,
    state: SessionState,
    accumulator: StatementAccumulator,
    presenter: Presenter,
}

impl<A: D1Api> Session<A> {
    pub fn new(api: A, presenter: Presenter, output: OutputMode) -> Self {
        Self {
            api,
            state: SessionState::new(output),
            accumulator: StatementAccumulator::new(),
            presenter,
        }
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn presenter_mut(&mut self) -> &mut Presenter {
        &mut self.presenter
    }

    /// Prompt for the next line, continuation form while a statement is pending.
    pub fn prompt(&self) -> String {
        if self.accumulator.is_pending() {
            self.state.continuation_prompt()
        } else {
            self.state.prompt()
        }
    }

    /// Feeds one raw line. Returns the terminated buffer once complete.
    pub fn feed(&mut self, line: &str) -> Result<Option<String>> {
        match self.accumulator.feed(line) {
            Feed::Complete(text) => Ok(Some(text)),
            Feed::Incomplete { hint } => {
                if hint {
                    self.presenter.notice(SEMICOLON_HINT)?;
                }
                Ok(None)
            }
        }
    }

    /// Discards the statement being typed (Ctrl-C).
    pub fn interrupt(&mut self) {
        if self.accumulator.is_pending() {
            debug!("Discarding pending statement");
        }
        self.accumulator.clear();
    }

    /// Feeds one line and runs the buffer if it completed.
    pub async fn handle_line(&mut self, line: &str, input: &mut dyn LineReader) -> Result<Flow> {
        match self.feed(line)? {
            Some(text) => self.run(&text, input).await,
            None => Ok(Flow::Continue),
        }
    }

    /// Splits a terminated buffer and dispatches its statements.
    pub async fn run(&mut self, text: &str, input: &mut dyn LineReader) -> Result<Flow> {
        self.dispatch(split(text), input).await
    }

    /// Runs `text` once, as `--execute` does. A missing final terminator is added.
    pub async fn execute_once(&mut self, text: &str, input: &mut dyn LineReader) -> Result<Flow> {
        let mut text = text.trim().to_string();
        if !text.ends_with(';') {
            text.push(';');
        }
        self.run(&text, input).await
    }

    /// Dispatches statements in order.
    ///
    /// Consecutive queries share one batch. Any console command flushes the
    /// batch before it runs, and whatever is left is flushed at the end.
    /// Errors are reported and the next statement still runs.
    async fn dispatch(
        &mut self,
        statements: Vec<Statement>,
        input: &mut dyn LineReader,
    ) -> Result<Flow> {
        let mut batch = QueryBatch::new();

        for statement in statements {
            match classify(&statement) {
                CommandKind::Query(_) => {
                    if let Err(err) = self.admit(&statement) {
                        self.report(&err)?;
                        continue;
                    }
                    batch.push(statement);
                }
                kind => {
                    self.flush(&mut batch).await?;
                    match self.command(kind, input).await {
                        Ok(Flow::Exit) => return Ok(Flow::Exit),
                        Ok(Flow::Continue) => {}
                        Err(err) => self.report(&err)?,
                    }
                }
            }
        }

        self.flush(&mut batch).await?;
        Ok(Flow::Continue)
    }

    fn admit(&self, statement: &Statement) -> Result<()> {
        if self.state.database().is_none() {
            return Err(ConsoleError::NoDatabaseSelected);
        }
        check_supported(statement)
    }

    async fn flush(&mut self, batch: &mut QueryBatch) -> Result<()> {
        let Some((statements, sql)) = batch.take() else {
            return Ok(());
        };
        let Some(database) = self.state.database().cloned() else {
            return self.report(&ConsoleError::NoDatabaseSelected);
        };

        info!(
            "Executing {} statement(s) on database {}",
            statements.len(),
            database.name
        );
        match self.api.execute(&database.uuid, &sql).await {
            Ok(response) => {
                self.presenter
                    .query_response(&response, &statements, self.state.output())
            }
            Err(err) => self.report(&err),
        }
    }

    fn report(&mut self, err: &ConsoleError) -> Result<()> {
        debug!("{}: {}", err.category(), err);
        self.presenter.error(err)
    }

    /// Runs one console command.
    async fn command(&mut self, kind: CommandKind, input: &mut dyn LineReader) -> Result<Flow> {
        match kind {
            CommandKind::Use(name) => {
                self.select_database(&name).await?;
            }
            CommandKind::CreateDatabase(name) => self.create_database(&name).await?,
            CommandKind::DropDatabase(name) => {
                self.drop_database(&name, input, false).await?;
            }
            CommandKind::ShowDatabases => self.show_databases().await?,
            CommandKind::Help => self.presenter.plain(HELP_TEXT)?,
            CommandKind::Version => self.presenter.plain(&banner())?,
            CommandKind::About => self.presenter.plain(ABOUT_TEXT)?,
            CommandKind::Exit => return Ok(Flow::Exit),
            CommandKind::Query(text) => {
                return Err(ConsoleError::internal(format!(
                    "query routed as a console command: {text}"
                )))
            }
        }
        Ok(Flow::Continue)
    }

    /// Looks `name` up and makes it the active database.
    pub async fn select_database(&mut self, name: &str) -> Result<DatabaseInfo> {
        let database = self.lookup(name).await?;
        info!("Selected database {} ({})", database.name, database.uuid);
        self.presenter.success(&format!(
            "Now querying database {} ({})",
            database.name, database.uuid
        ))?;
        self.state.select(database.clone());
        Ok(database)
    }

    pub async fn create_database(&mut self, name: &str) -> Result<()> {
        if !self.api.create_database(name).await? {
            return Err(ConsoleError::api("Failed to create database."));
        }
        info!("Created database {}", name);
        self.presenter
            .success(&format!("Database {name} created."))
    }

    /// Deletes `name` after confirmation, unless `assume_yes` is set.
    ///
    /// Returns whether the database was deleted. The active selection is kept
    /// even when it names the deleted database.
    pub async fn drop_database(
        &mut self,
        name: &str,
        input: &mut dyn LineReader,
        assume_yes: bool,
    ) -> Result<bool> {
        let database = self.lookup(name).await?;

        if !assume_yes {
            let question = format!(
                "Are you sure you want to delete database {name}? This cannot be undone. Type 'yes' to confirm: "
            );
            if !confirm(input, &question)? {
                self.presenter.notice("Cancelled.")?;
                return Ok(false);
            }
        }

        if !self.api.delete_database(&database.uuid).await? {
            return Err(ConsoleError::api("Failed to delete database."));
        }
        info!("Deleted database {} ({})", database.name, database.uuid);
        self.presenter
            .success(&format!("Database {name} deleted."))?;

        if self
            .state
            .database()
            .is_some_and(|active| active.uuid == database.uuid)
        {
            self.presenter.notice(&format!(
                "{name} was the active database. Run USE <name> to select another one."
            ))?;
        }
        Ok(true)
    }

    pub async fn show_databases(&mut self) -> Result<()> {
        let databases = self.api.list_databases().await?;
        debug!("Listed {} database(s)", databases.len());
        self.presenter.databases(&databases)
    }

    async fn lookup(&self, name: &str) -> Result<DatabaseInfo> {
        self.api
            .find_database(name)
            .await?
            .ok_or_else(|| ConsoleError::DatabaseNotFound(name.to_string()))
    }
}
