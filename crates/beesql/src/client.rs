//! Connection trait shared by every engine.

use crate::error::{BeeError, BeeResult};
use crate::placeholder::Placeholder;
use crate::qb::BuiltQuery;
use crate::row::Row;
use crate::value::Value;

/// Maximum number of SQL bytes written to a log event.
const MAX_LOGGED_SQL: usize = 200;

/// What running a statement produced.
#[derive(Debug, Clone, PartialEq)]
pub enum QueryOutput {
    /// Result rows of a SELECT.
    Rows(Vec<Row>),
    /// Affected row count of any other statement.
    Affected(u64),
}

impl QueryOutput {
    pub fn rows(&self) -> Option<&[Row]> {
        match self {
            QueryOutput::Rows(rows) => Some(rows),
            QueryOutput::Affected(_) => None,
        }
    }

    pub fn affected(&self) -> Option<u64> {
        match self {
            QueryOutput::Rows(_) => None,
            QueryOutput::Affected(n) => Some(*n),
        }
    }

    /// The result rows; an empty list for non-SELECT statements.
    pub fn into_rows(self) -> Vec<Row> {
        match self {
            QueryOutput::Rows(rows) => rows,
            QueryOutput::Affected(_) => Vec::new(),
        }
    }
}

/// A live handle to one database engine.
///
/// Parameters bind positionally: `params[i]` fills the `i`-th placeholder of
/// `sql`. A handle is not meant to be shared between concurrent callers
/// without external serialization; use one handle per task or a pool.
pub trait Connection: Send + Sync {
    /// Placeholder dialect the engine expects in SQL text.
    fn placeholder(&self) -> Placeholder;

    /// Execute a statement and return all rows.
    fn query(
        &self,
        sql: &str,
        params: &[Value],
    ) -> impl std::future::Future<Output = BeeResult<Vec<Row>>> + Send;

    /// Execute a statement and return the number of affected rows.
    fn execute(
        &self,
        sql: &str,
        params: &[Value],
    ) -> impl std::future::Future<Output = BeeResult<u64>> + Send;

    /// Release the engine handle. Closing an already closed handle is a no-op.
    fn close(&mut self) -> impl std::future::Future<Output = BeeResult<()>> + Send;

    /// Dispatch a built statement: SELECT through [`Connection::query`],
    /// everything else through [`Connection::execute`].
    fn run(
        &self,
        query: &BuiltQuery,
    ) -> impl std::future::Future<Output = BeeResult<QueryOutput>> + Send {
        async move {
            tracing::debug!(
                target: "beesql.sql",
                kind = ?query.kind,
                param_count = query.params.len(),
                "dispatching statement"
            );
            if query.kind.returns_rows() {
                self.query(&query.sql, &query.params)
                    .await
                    .map(QueryOutput::Rows)
            } else {
                self.execute(&query.sql, &query.params)
                    .await
                    .map(QueryOutput::Affected)
            }
        }
    }
}

fn truncate_sql(sql: &str) -> &str {
    if sql.len() <= MAX_LOGGED_SQL {
        return sql;
    }
    let mut end = MAX_LOGGED_SQL;
    while end > 0 && !sql.is_char_boundary(end) {
        end -= 1;
    }
    &sql[..end]
}

/// Emit the statement an engine is about to send.
pub(crate) fn log_statement(engine: &str, sql: &str, param_count: usize) {
    tracing::debug!(
        target: "beesql.sql",
        engine,
        param_count,
        sql = %truncate_sql(sql),
        "executing"
    );
}

/// Emit an engine failure; the error itself is returned to the caller unchanged.
pub(crate) fn log_failure(engine: &str, sql: &str, err: &BeeError) {
    tracing::warn!(
        target: "beesql.sql",
        engine,
        sql = %truncate_sql(sql),
        error = %err,
        "statement failed"
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_sql_respects_char_boundaries() {
        let short = "SELECT 1";
        assert_eq!(truncate_sql(short), short);

        let long = "é".repeat(MAX_LOGGED_SQL);
        let cut = truncate_sql(&long);
        assert!(cut.len() <= MAX_LOGGED_SQL);
        assert!(long.starts_with(cut));
    }

    #[test]
    fn test_query_output_accessors() {
        let rows = QueryOutput::Rows(vec![Row::new().with("id", 1)]);
        assert_eq!(rows.rows().map(<[Row]>::len), Some(1));
        assert_eq!(rows.affected(), None);

        let affected = QueryOutput::Affected(3);
        assert_eq!(affected.affected(), Some(3));
        assert!(affected.into_rows().is_empty());
    }
}
