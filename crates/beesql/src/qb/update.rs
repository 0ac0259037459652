//! UPDATE statement builder.

use crate::error::{BeeError, BeeResult};
use crate::placeholder::Placeholder;
use crate::qb::filter::Filter;
use crate::qb::traits::{MutationQb, SqlQb};
use crate::qb::{BuiltQuery, SqlWriter, StatementKind, require_columns, require_name};
use crate::value::Value;
use std::collections::BTreeMap;

/// UPDATE builder.
///
/// Emits `UPDATE <table> SET .. [WHERE ..] [LIMIT n]`. SET values are bound
/// before WHERE values.
#[derive(Clone, Debug)]
pub struct UpdateQb {
    table: String,
    set_fields: BTreeMap<String, Value>,
    filter: Filter,
    limit: Option<u64>,
}

impl UpdateQb {
    /// Create a new UPDATE builder.
    pub fn new(table: &str) -> Self {
        Self {
            table: table.to_string(),
            set_fields: BTreeMap::new(),
            filter: Filter::new(),
            limit: None,
        }
    }

    /// Set a column value.
    pub fn set(mut self, column: &str, value: impl Into<Value>) -> Self {
        self.set_fields.insert(column.to_string(), value.into());
        self
    }

    /// Set an optional column value (None => skip).
    pub fn set_opt<T: Into<Value>>(self, column: &str, value: Option<T>) -> Self {
        match value {
            Some(v) => self.set(column, v),
            None => self,
        }
    }

    /// Set several column values.
    pub fn set_all<I, K, V>(mut self, updates: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Value>,
    {
        self.set_fields
            .extend(updates.into_iter().map(|(k, v)| (k.into(), v.into())));
        self
    }

    // ==================== WHERE ====================

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

impl SqlQb for UpdateQb {
    fn build_with(&self, placeholder: Placeholder) -> BeeResult<BuiltQuery> {
        require_name("table", &self.table)?;
        if self.set_fields.is_empty() {
            return Err(BeeError::usage("UPDATE: SET clause cannot be empty"));
        }
        require_columns("UPDATE", &self.set_fields)?;
        self.filter.validate("UPDATE")?;

        let mut w = SqlWriter::new(placeholder, format!("UPDATE {} SET ", self.table));
        w.push_assignments(&self.set_fields, ", ");

        self.filter.write_to(&mut w);

        if let Some(limit) = self.limit {
            w.push(&format!(" LIMIT {limit}"));
        }

        Ok(w.finish(StatementKind::Update))
    }
}

impl MutationQb for UpdateQb {}
