//! INSERT statement builder.

use crate::error::{BeeError, BeeResult};
use crate::placeholder::Placeholder;
use crate::qb::traits::{MutationQb, SqlQb};
use crate::qb::{BuiltQuery, SqlWriter, StatementKind, require_columns, require_name};
use crate::value::Value;
use std::collections::BTreeMap;

/// INSERT builder for a single row.
///
/// Columns are emitted sorted by name; the parameters follow the same order.
#[derive(Clone, Debug)]
pub struct InsertQb {
    table: String,
    values: BTreeMap<String, Value>,
}

impl InsertQb {
    /// Create a new INSERT builder.
    pub fn new(table: &str) -> Self {
        Self {
            table: table.to_string(),
            values: BTreeMap::new(),
        }
    }

    /// Set a column value. Setting the same column twice keeps the last value.
    pub fn set(mut self, column: &str, value: impl Into<Value>) -> Self {
        self.values.insert(column.to_string(), value.into());
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
    pub fn values<I, K, V>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Value>,
    {
        self.values
            .extend(values.into_iter().map(|(k, v)| (k.into(), v.into())));
        self
    }
}

impl SqlQb for InsertQb {
    fn build_with(&self, placeholder: Placeholder) -> BeeResult<BuiltQuery> {
        require_name("table", &self.table)?;
        if self.values.is_empty() {
            return Err(BeeError::usage("INSERT requires at least one column value"));
        }
        require_columns("INSERT", &self.values)?;

        let columns: Vec<&str> = self.values.keys().map(String::as_str).collect();
        let mut w = SqlWriter::new(
            placeholder,
            format!("INSERT INTO {} ({}) VALUES (", self.table, columns.join(", ")),
        );
        for (i, value) in self.values.values().enumerate() {
            if i > 0 {
                w.push(", ");
            }
            w.push_bind(value);
        }
        w.push(")");

        Ok(w.finish(StatementKind::Insert))
    }
}

impl MutationQb for InsertQb {}
