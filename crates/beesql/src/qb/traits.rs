//! Trait definitions for statement builders.

use crate::client::{Connection, QueryOutput};
use crate::error::BeeResult;
use crate::placeholder::Placeholder;
use crate::qb::BuiltQuery;

/// Base trait for all statement builders.
pub trait SqlQb: Sync {
    /// Validate the builder and render SQL with the given placeholder dialect.
    fn build_with(&self, placeholder: Placeholder) -> BeeResult<BuiltQuery>;

    /// Render with the default `?` placeholders.
    fn build(&self) -> BeeResult<BuiltQuery> {
        self.build_with(Placeholder::default())
    }

    /// Debug helper to get the SQL string.
    fn to_sql(&self) -> BeeResult<String> {
        self.build().map(|q| q.sql)
    }

    /// Build with the connection's dialect and run the statement.
    fn run(
        &self,
        conn: &impl Connection,
    ) -> impl std::future::Future<Output = BeeResult<QueryOutput>> + Send {
        async move {
            let query = self.build_with(conn.placeholder())?;
            conn.run(&query).await
        }
    }
}

/// Trait for statements that return an affected-row count.
pub trait MutationQb: SqlQb {
    /// Execute and return affected row count.
    fn execute(
        &self,
        conn: &impl Connection,
    ) -> impl std::future::Future<Output = BeeResult<u64>> + Send {
        async move {
            let query = self.build_with(conn.placeholder())?;
            conn.execute(&query.sql, &query.params).await
        }
    }
}
