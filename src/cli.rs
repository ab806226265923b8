//! Command-line argument parsing for the D1 console.
//!
//! `query` is the default subcommand, so `d1 -d shop` and `d1 query -d shop`
//! are equivalent.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::config::{ACCOUNT_ID_ENV, API_TOKEN_ENV};
use crate::session::OutputMode;

/// D1 Console - A console/REPL for Cloudflare's D1 Database product.
#[derive(Parser, Debug)]
#[command(name = "d1")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Config file path
    #[arg(long, value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Disable all prompt colors
    #[arg(long, global = true)]
    pub disable_colors: bool,

    #[command(subcommand)]
    pub command: Option<Command>,

    #[command(flatten)]
    pub query: QueryArgs,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Start a D1 query REPL (default)
    Query(QueryArgs),

    /// Create, list, and delete D1 databases
    Databases {
        #[command(subcommand)]
        action: DatabaseAction,
    },

    /// Login to Cloudflare D1 using an API token and account ID
    Login {
        /// Cloudflare API token (https://dash.cloudflare.com/profile/api-tokens)
        #[arg(long, value_name = "TOKEN", env = API_TOKEN_ENV, hide_env_values = true)]
        api_token: String,

        /// Cloudflare account ID (shown on any domain in your account)
        #[arg(long, value_name = "ID", env = ACCOUNT_ID_ENV)]
        account_id: String,
    },

    /// View your current login credentials
    Whoami,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum DatabaseAction {
    /// Create a new D1 database
    Create {
        /// The name of the database to create
        name: String,
    },

    /// List your D1 databases
    List,

    /// Delete a D1 database
    Delete {
        /// The name of the database to delete
        name: String,

        /// Skip the confirmation question
        #[arg(short = 'y', long)]
        yes: bool,
    },
}

#[derive(Args, Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryArgs {
    /// The name of the D1 database to query
    #[arg(short = 'd', long, value_name = "NAME")]
    pub database: Option<String>,

    /// Run a statement or a series of statements separated with semicolons, then exit
    #[arg(long, value_name = "SQL")]
    pub execute: Option<String>,

    /// Print result rows as JSON
    #[arg(long, conflicts_with = "json_all")]
    pub json: bool,

    /// Print the full API response as JSON
    #[arg(long)]
    pub json_all: bool,
}

impl QueryArgs {
    /// Output mode requested on the command line, if any.
    pub fn output_override(&self) -> Option<OutputMode> {
        if self.json_all {
            Some(OutputMode::JsonAll)
        } else if self.json {
            Some(OutputMode::Json)
        } else {
            None
        }
    }
}

impl Cli {
    /// Parses command-line arguments.
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// The subcommand to run, `query` when none was given.
    pub fn command(&self) -> Command {
        self.command
            .clone()
            .unwrap_or_else(|| Command::Query(self.query.clone()))
    }

    /// Returns the config file path to use.
    ///
    /// Uses the --config argument if provided, otherwise the default path.
    pub fn config_path(&self) -> PathBuf {
        self.config
            .clone()
            .unwrap_or_else(crate::config::Config::default_path)
    }

    /// Returns true when the run will read from the interactive prompt.
    pub fn is_interactive(&self) -> bool {
        matches!(self.command(), Command::Query(args) if args.execute.is_none())
    }
}
