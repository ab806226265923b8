//! Result and message rendering.
//!
//! Renders result sets as tables or JSON and prints status lines. Writes go
//! to any `Write` sink so sessions can be captured in tests.

use comfy_table::{Attribute, Cell, ColumnConstraint, ContentArrangement, Table, Width};
use crossterm::style::{Color, Stylize};
use serde_json::Value;
use std::io::{self, Write};
use std::sync::{Arc, Mutex};

use super::splitter::Statement;
use super::state::OutputMode;
use crate::api::{DatabaseInfo, QueryResponse, ResultSet, Row};
use crate::error::{ConsoleError, Result};

/// Terminal width assumed when it cannot be detected.
const DEFAULT_WIDTH: u16 = 80;

/// Extra columns' worth of slack left when sizing table columns.
const COLUMN_SLACK: f64 = 1.5;

/// Printed for an empty result of a reading statement.
pub const NO_RESULTS: &str = "No results found.";

/// Writes console output.
pub struct Presenter {
    out: Box<dyn Write + Send>,
    colors: bool,
    width: Option<u16>,
}

impl Presenter {
    /// Presenter writing to stdout, sized to the terminal.
    pub fn stdout(colors: bool) -> Self {
        Self {
            out: Box::new(io::stdout()),
            colors,
            width: None,
        }
    }

    /// Presenter writing into a shared in-memory buffer with a fixed width.
    pub fn buffered(colors: bool, width: u16) -> (Self, SharedBuffer) {
        let buffer = SharedBuffer::default();
        let presenter = Self {
            out: Box::new(buffer.clone()),
            colors,
            width: Some(width),
        };
        (presenter, buffer)
    }

    fn width(&self) -> u16 {
        self.width.unwrap_or_else(|| {
            crossterm::terminal::size()
                .map(|(w, _)| w)
                .unwrap_or(DEFAULT_WIDTH)
        })
    }

    fn paint(&self, text: &str, color: Color, bold: bool) -> String {
        if !self.colors {
            return text.to_string();
        }
        let styled = text.with(color);
        if bold {
            styled.bold().to_string()
        } else {
            styled.to_string()
        }
    }

    fn line(&mut self, text: &str) -> Result<()> {
        writeln!(self.out, "{text}")?;
        self.out.flush()?;
        Ok(())
    }

    /// Prints unstyled text.
    pub fn plain(&mut self, text: &str) -> Result<()> {
        self.line(text)
    }

    /// Prints a bold title line.
    pub fn title(&mut self, text: &str) -> Result<()> {
        let painted = self.paint(text, Color::Reset, true);
        self.line(&painted)
    }

    /// Prints a success line.
    pub fn success(&mut self, text: &str) -> Result<()> {
        let painted = self.paint(text, Color::Green, false);
        self.line(&painted)
    }

    /// Prints a de-emphasized notice.
    pub fn notice(&mut self, text: &str) -> Result<()> {
        let painted = self.paint(text, Color::DarkGrey, false);
        self.line(&painted)
    }

    /// Prints an error line.
    pub fn failure(&mut self, text: &str) -> Result<()> {
        let painted = self.paint(text, Color::Red, false);
        self.line(&painted)
    }

    /// Reports an error raised while handling a statement.
    pub fn error(&mut self, err: &ConsoleError) -> Result<()> {
        self.failure(&err.to_string())
    }

    /// Renders the response of one executed batch.
    ///
    /// `statements` are the batch members in submission order; result set `i`
    /// belongs to statement `i`.
    pub fn query_response(
        &mut self,
        response: &QueryResponse,
        statements: &[Statement],
        mode: OutputMode,
    ) -> Result<()> {
        if mode == OutputMode::JsonAll {
            return self.json(&response.envelope);
        }

        for (index, set) in response.result_sets.iter().enumerate() {
            let statement = statements.get(index);
            if let Some(error) = set_error(set) {
                self.error(&ConsoleError::remote(error))?;
                continue;
            }
            if set.results.is_empty() {
                if statement.is_some_and(Statement::is_read) {
                    match mode {
                        OutputMode::Json => self.json(&Value::Array(Vec::new()))?,
                        _ => self.notice(NO_RESULTS)?,
                    }
                }
                continue;
            }
            match mode {
                OutputMode::Json => {
                    let rows = set.results.iter().cloned().map(Value::Object).collect();
                    self.json(&Value::Array(rows))?;
                }
                _ => {
                    let table = self.rows_table(&set.results);
                    self.line(&table)?;
                }
            }
        }
        Ok(())
    }

    /// Renders the database listing.
    pub fn databases(&mut self, databases: &[DatabaseInfo]) -> Result<()> {
        if databases.is_empty() {
            return self.failure(
                "No databases found. Create one with CREATE DATABASE <name>; or 'databases create'.",
            );
        }
        let headers = vec!["Name".to_string(), "UUID".to_string()];
        let rows = databases
            .iter()
            .map(|db| vec![db.name.clone(), db.uuid.clone()])
            .collect::<Vec<_>>();
        let table = self.render_table(&headers, &rows);
        self.success("Databases:")?;
        self.line(&table)
    }

    fn json(&mut self, value: &Value) -> Result<()> {
        let text = serde_json::to_string_pretty(value)
            .map_err(|e| ConsoleError::internal(format!("Failed to encode JSON: {e}")))?;
        self.line(&text)
    }

    /// Builds a table whose headers are the first row's field names.
    fn rows_table(&self, rows: &[Row]) -> String {
        let headers: Vec<String> = rows
            .first()
            .map(|row| row.keys().cloned().collect())
            .unwrap_or_default();
        let cells = rows
            .iter()
            .map(|row| {
                headers
                    .iter()
                    .map(|h| row.get(h).map(display_value).unwrap_or_default())
                    .collect()
            })
            .collect::<Vec<Vec<String>>>();
        self.render_table(&headers, &cells)
    }

    fn render_table(&self, headers: &[String], rows: &[Vec<String>]) -> String {
        let width = self.width();
        let column_width = column_width(width, headers.len());

        let mut table = Table::new();
        table
            .set_content_arrangement(ContentArrangement::Dynamic)
            .set_width(width)
            .set_header(headers.iter().map(|h| {
                let cell = Cell::new(h);
                if self.colors {
                    cell.add_attribute(Attribute::Bold)
                } else {
                    cell
                }
            }))
            .set_constraints(
                (0..headers.len())
                    .map(|_| ColumnConstraint::UpperBoundary(Width::Fixed(column_width))),
            );
        if self.colors {
            table.enforce_styling();
        }
        for row in rows {
            table.add_row(row);
        }
        table.to_string()
    }
}

/// Width per column: terminal width divided by (column count + 1.5).
pub fn column_width(terminal_width: u16, columns: usize) -> u16 {
    let divisor = columns as f64 + COLUMN_SLACK;
    ((terminal_width as f64 / divisor).floor() as u16).max(1)
}

fn set_error(set: &ResultSet) -> Option<String> {
    match (&set.error, set.success) {
        (Some(error), _) => Some(error.clone()),
        (None, false) => Some("Statement failed.".to_string()),
        (None, true) => None,
    }
}

/// Cell text for a JSON value: strings unquoted, null as `NULL`.
pub fn display_value(value: &Value) -> String {
    match value {
        Value::Null => "NULL".to_string(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Cloneable in-memory sink for capturing presenter output.
#[derive(Debug, Clone, Default)]
pub struct SharedBuffer {
    inner: Arc<Mutex<Vec<u8>>>,
}

impl SharedBuffer {
    /// Returns everything written so far.
    pub fn contents(&self) -> String {
        let bytes = self.inner.lock().unwrap_or_else(|e| e.into_inner());
        String::from_utf8_lossy(&bytes).into_owned()
    }

    /// Discards everything written so far.
    pub fn clear(&self) {
        self.inner.lock().unwrap_or_else(|e| e.into_inner()).clear();
    }
}

impl Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.inner
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
