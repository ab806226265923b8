//! Top-level orchestration.
//!
//! Loads configuration and credentials, builds the API client, and runs the
//! chosen subcommand. Everything below the client is generic over [`D1Api`]
//! so integration tests can run the same paths against the mock.

use std::path::PathBuf;

use tracing::info;

use crate::api::{D1Api, D1Client};
use crate::cli::{Cli, Command, QueryArgs};
use crate::commands::{self, help::banner};
use crate::config::{Config, Credentials};
use crate::error::{ConsoleError, Result};
use crate::repl::{run_repl, TerminalInput};
use crate::session::{OutputMode, Presenter, Session};

/// Runs the command described by `cli`.
///
/// Returns an error only for failures that should end the process with a
/// non-zero status.
pub async fn run(cli: Cli) -> Result<()> {
    let config_path = cli.config_path();
    info!("Loading config from: {}", config_path.display());
    let config = Config::load_from_file(&config_path)?;
    let colors = config.console.colors && !cli.disable_colors;
    let credentials_path = Credentials::default_path();

    match cli.command() {
        Command::Query(args) => {
            let output = args.output_override().unwrap_or(config.console.output);
            let api = connect(&config, &credentials_path)?;
            let history = config.console.history_path();
            run_query(api, Presenter::stdout(colors), output, &args, Some(history)).await
        }
        Command::Databases { action } => {
            let api = connect(&config, &credentials_path)?;
            let mut session = Session::new(api, Presenter::stdout(colors), OutputMode::Table);
            let mut input = TerminalInput::without_history()?;
            commands::databases::run(&mut session, action, &mut input).await
        }
        Command::Login {
            api_token,
            account_id,
        } => {
            let credentials = Credentials::new(api_token, account_id);
            let api = D1Client::new(&config.api, credentials.clone())?;
            let mut presenter = Presenter::stdout(colors);
            commands::auth::login(&api, &credentials, &credentials_path, &mut presenter).await
        }
        Command::Whoami => {
            let credentials = Credentials::resolve(&credentials_path);
            commands::auth::whoami(credentials.as_ref(), &mut Presenter::stdout(colors))
        }
    }
}

/// Builds the API client from resolved credentials.
pub fn connect(config: &Config, credentials_path: &std::path::Path) -> Result<D1Client> {
    let credentials =
        Credentials::resolve(credentials_path).ok_or(ConsoleError::AuthenticationInvalid)?;
    D1Client::new(&config.api, credentials)
}

/// Runs the query console: once with `--execute`, otherwise interactively.
pub async fn run_query<A: D1Api>(
    api: A,
    presenter: Presenter,
    output: OutputMode,
    args: &QueryArgs,
    history: Option<PathBuf>,
) -> Result<()> {
    let interactive = args.execute.is_none();
    let mut session = open_session(
        api,
        presenter,
        output,
        args.database.as_deref(),
        interactive,
    )
    .await?;

    match &args.execute {
        Some(sql) => {
            let mut input = TerminalInput::without_history()?;
            session.execute_once(sql, &mut input).await?;
        }
        None => {
            let mut input = TerminalInput::new(history)?;
            run_repl(&mut session, &mut input).await?;
        }
    }
    Ok(())
}

/// Verifies credentials and prepares a session.
///
/// An unknown `database` is reported and the session starts with nothing
/// selected.
pub async fn open_session<A: D1Api>(
    api: A,
    presenter: Presenter,
    output: OutputMode,
    database: Option<&str>,
    show_banner: bool,
) -> Result<Session<A>> {
    match api.verify_token().await {
        Ok(true) => {}
        Ok(false) => return Err(ConsoleError::AuthenticationInvalid),
        Err(e) => {
            tracing::warn!("Token verification failed: {}", e);
            return Err(ConsoleError::AuthenticationInvalid);
        }
    }

    let mut session = Session::new(api, presenter, output);
    if show_banner {
        session.presenter_mut().title(&banner())?;
    }
    if let Some(name) = database {
        if let Err(e) = session.select_database(name).await {
            tracing::warn!("Initial database selection failed: {}", e);
            session.presenter_mut().error(&e)?;
        }
    }
    Ok(session)
}
