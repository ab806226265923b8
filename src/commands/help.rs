//! Help text constants for the D1 console.

/// Console version, taken from the package manifest.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Help text displayed for the HELP command.
pub const HELP_TEXT: &str = r#"Statements end with a semicolon. Multi-line input is collected until one is typed.

Console commands:
  USE <name>;              - Select the database to query
  SHOW DATABASES;          - List your databases
  CREATE DATABASE <name>;  - Create a new database
  DROP DATABASE <name>;    - Delete a database (asks for confirmation)
  HELP;                    - Show this help message
  VERSION;                 - Show the console version
  ABOUT;                   - Show information about the console
  EXIT;                    - Leave the console

Anything else is sent to the selected database as SQL. Consecutive
statements typed together are executed as a single batch.

Not supported by D1:
  BEGIN / COMMIT / ROLLBACK (D1 runs in auto-commit mode)
  PRAGMA other than table_list, table_info, and foreign_keys

Keyboard shortcuts:
  Ctrl+C  - Discard the statement being typed
  Ctrl+D  - Exit
  ↑/↓     - History navigation"#;

/// Text displayed for the ABOUT command.
pub const ABOUT_TEXT: &str = r#"D1 Console - A console/REPL for Cloudflare's D1 Database product.

Queries are sent through the Cloudflare REST API using the credentials saved
by 'd1 login' or the CLOUDFLARE_API_TOKEN and CLOUDFLARE_ACCOUNT_ID
environment variables."#;

/// Banner printed when the console starts.
pub fn banner() -> String {
    format!("D1 Console {VERSION}")
}
