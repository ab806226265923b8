//! Statement classification.
//!
//! Decides whether a statement is a meta-command handled locally or a query
//! forwarded to the service. Matching is a case-insensitive keyword prefix
//! test over a fixed, ordered list; the first match wins. A query that happens to start
//! with a reserved word (say `VERSION_HISTORY ...`) is therefore claimed by the
//! meta-command.

use regex::Regex;
use std::sync::OnceLock;

use super::splitter::Statement;
use crate::error::{ConsoleError, Result};

/// What a statement asks the console to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandKind {
    /// Select the database with this name.
    Use(String),
    /// Create a database with this name.
    CreateDatabase(String),
    /// Delete the database with this name (confirmation required).
    DropDatabase(String),
    /// List all databases.
    ShowDatabases,
    /// Show help text.
    Help,
    /// Show the console version.
    Version,
    /// Show information about the console.
    About,
    /// End the session.
    Exit,
    /// Opaque SQL forwarded to the service, original casing preserved.
    Query(String),
}

#[derive(Clone, Copy)]
enum Prefix {
    Use,
    CreateDatabase,
    DropDatabase,
    ShowDatabases,
    Version,
    Exit,
    About,
    Help,
}

impl Prefix {
    /// Commands naming a database need whitespace and an argument after the keywords.
    fn takes_argument(self) -> bool {
        matches!(self, Self::Use | Self::CreateDatabase | Self::DropDatabase)
    }
}

/// Meta-command keywords in priority order. Keywords of a multi-word prefix
/// may be separated by any run of whitespace (spaces or tabs).
const PREFIXES: &[(&[&str], Prefix)] = &[
    (&["USE"], Prefix::Use),
    (&["CREATE", "DATABASE"], Prefix::CreateDatabase),
    (&["DROP", "DATABASE"], Prefix::DropDatabase),
    (&["SHOW", "DATABASES"], Prefix::ShowDatabases),
    (&["VERSION"], Prefix::Version),
    (&["EXIT"], Prefix::Exit),
    (&["ABOUT"], Prefix::About),
    (&["HELP"], Prefix::Help),
];

/// Classifies a statement.
pub fn classify(statement: &Statement) -> CommandKind {
    let text = statement.text();

    for (keywords, kind) in PREFIXES {
        let Some(rest) = strip_keywords(text, keywords, kind.takes_argument()) else {
            continue;
        };
        return match kind {
            Prefix::Use => CommandKind::Use(argument(rest)),
            Prefix::CreateDatabase => CommandKind::CreateDatabase(argument(rest)),
            Prefix::DropDatabase => CommandKind::DropDatabase(argument(rest)),
            Prefix::ShowDatabases => CommandKind::ShowDatabases,
            Prefix::Version => CommandKind::Version,
            Prefix::Exit => CommandKind::Exit,
            Prefix::About => CommandKind::About,
            Prefix::Help => CommandKind::Help,
        };
    }

    CommandKind::Query(text.to_string())
}

/// Strips `keywords` from the start of `text`, ignoring case.
///
/// Whitespace is required between keywords and, when `takes_argument` is
/// set, after the last one. The last keyword is otherwise a bare prefix, so
/// `version_table` still matches `VERSION`.
fn strip_keywords<'a>(text: &'a str, keywords: &[&str], takes_argument: bool) -> Option<&'a str> {
    let mut rest = text;
    for (index, keyword) in keywords.iter().enumerate() {
        rest = strip_prefix_ignore_case(rest, keyword)?;
        if index + 1 < keywords.len() || takes_argument {
            let skipped = rest.trim_start();
            if skipped.len() == rest.len() {
                return None;
            }
            rest = skipped;
        }
    }
    Some(rest)
}

fn strip_prefix_ignore_case<'a>(text: &'a str, prefix: &str) -> Option<&'a str> {
    let head = text.get(..prefix.len())?;
    if head.eq_ignore_ascii_case(prefix) {
        Some(&text[prefix.len()..])
    } else {
        None
    }
}

fn argument(rest: &str) -> String {
    rest.trim_end_matches([';', '\n', '\r']).trim().to_string()
}

const PRAGMA_ALLOWED: &[&str] = &["table_list", "table_info", "foreign_keys"];

fn transaction_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"(?i)\b(BEGIN|COMMIT|ROLLBACK)\b").expect("valid regex"))
}

fn pragma_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"(?i)^PRAGMA\s+(\w+)").expect("valid regex"))
}

/// Rejects SQL the service is known not to accept.
pub fn check_supported(statement: &Statement) -> Result<()> {
    let text = statement.text();

    if transaction_pattern().is_match(text) {
        return Err(ConsoleError::unsupported(
            "D1 operates in auto-commit mode and does not support transactions.",
        ));
    }

    if statement.upper().starts_with("PRAGMA") {
        let allowed = pragma_pattern()
            .captures(text)
            .and_then(|caps| caps.get(1))
            .map(|name| {
                PRAGMA_ALLOWED
                    .iter()
                    .any(|allowed| name.as_str().eq_ignore_ascii_case(allowed))
            })
            .unwrap_or(false);
        if !allowed {
            return Err(ConsoleError::unsupported(
                "D1 only supports PRAGMA table_list, table_info, and foreign_keys.",
            ));
        }
    }

    Ok(())
}
