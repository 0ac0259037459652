//! DELETE statement builder.

use crate::error::BeeResult;
use crate::placeholder::Placeholder;
use crate::qb::filter::Filter;
use crate::qb::traits::{MutationQb, SqlQb};
use crate::qb::{BuiltQuery, SqlWriter, StatementKind, require_name};
use crate::value::Value;

/// DELETE builder.
#[derive(Clone, Debug)]
pub struct DeleteQb {
    table: String,
    filter: Filter,
    limit: Option<u64>,
}

impl DeleteQb {
    /// Create a new DELETE builder.
    pub fn new(table: &str) -> Self {
        Self {
            table: table.to_string(),
            filter: Filter::new(),
            limit: None,
        }
    }

    /// Add WHERE: column = value
    pub fn eq(mut self, column: &str, value: impl Into<Value>) -> Self {
        self.filter.add_eq(column, value);
        self
    }

    /// Add several WHERE equality pairs.
    pub fn filters<I, K, V>(mut self, pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Value>,
    {
        self.filter.extend(pairs);
        self
    }

    /// Use a raw WHERE clause. Equality pairs are ignored while it is set.
    pub fn where_raw(mut self, sql: &str) -> Self {
        self.filter.set_raw(sql);
        self
    }

    /// Set LIMIT.
    pub fn limit(mut self, n: u64) -> Self {
        self.limit = Some(n);
        self
    }
}

impl SqlQb for DeleteQb {
    fn build_with(&self, placeholder: Placeholder) -> BeeResult<BuiltQuery> {
        require_name("table", &self.table)?;
        self.filter.validate("DELETE")?;

        let mut w = SqlWriter::new(placeholder, format!("DELETE FROM {}", self.table));
        self.filter.write_to(&mut w);

        if let Some(limit) = self.limit {
            w.push(&format!(" LIMIT {limit}"));
        }

        Ok(w.finish(StatementKind::Delete))
    }
}

impl MutationQb for DeleteQb {}
