//! Query batching.
//!
//! Consecutive queries typed together are sent as one request so the service
//! executes them as a unit. Meta-commands break a batch.

use super::splitter::Statement;

/// Queries queued since the last flush, in submission order.
#[derive(Debug, Default)]
pub struct QueryBatch {
    statements: Vec<Statement>,
}

impl QueryBatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, statement: Statement) {
        self.statements.push(statement);
    }

    /// Empties the batch, returning the queued statements and their `;`-joined text.
    ///
    /// Returns `None` when nothing is queued.
    pub fn take(&mut self) -> Option<(Vec<Statement>, String)> {
        if self.statements.is_empty() {
            return None;
        }
        let statements = std::mem::take(&mut self.statements);
        let sql = statements
            .iter()
            .map(Statement::text)
            .collect::<Vec<_>>()
            .join(";");
        Some((statements, sql))
    }
}
