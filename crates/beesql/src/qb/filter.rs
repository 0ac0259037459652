//! WHERE clause state shared by SELECT, UPDATE and DELETE.

use crate::error::BeeResult;
use crate::qb::{SqlWriter, non_blank, require_columns};
use crate::value::Value;
use std::collections::BTreeMap;

/// A WHERE condition: either a raw SQL fragment or column/value equality pairs.
///
/// A non-blank raw fragment wins: the pairs are then left out of the WHERE
/// clause entirely. Pairs are rendered as `col=<placeholder>` joined by
/// ` AND `, ordered by column name.
#[derive(Debug, Clone, Default, PartialEq)]
pub(crate) struct Filter {
    raw: Option<String>,
    pairs: BTreeMap<String, Value>,
}

impl Filter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a trusted, pre-formatted SQL fragment as the WHERE clause.
    ///
    /// **Warning**: the fragment is emitted verbatim and never parameterized.
    pub fn set_raw(&mut self, sql: impl Into<String>) {
        self.raw = Some(sql.into());
    }

    /// Add `column = value`. A later value for the same column replaces the earlier one.
    pub fn add_eq(&mut self, column: impl Into<String>, value: impl Into<Value>) {
        self.pairs.insert(column.into(), value.into());
    }

    /// Add several `column = value` pairs.
    pub fn extend<I, K, V>(&mut self, pairs: I)
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Value>,
    {
        self.pairs
            .extend(pairs.into_iter().map(|(k, v)| (k.into(), v.into())));
    }

    /// The raw fragment, if one is set and not blank.
    pub fn raw_clause(&self) -> Option<&str> {
        non_blank(&self.raw)
    }

    pub(crate) fn validate(&self, what: &str) -> BeeResult<()> {
        if self.raw_clause().is_some() {
            return Ok(());
        }
        require_columns(what, &self.pairs)
    }

    pub(crate) fn write_to(&self, w: &mut SqlWriter) {
        if let Some(raw) = self.raw_clause() {
            w.push(" WHERE ").push(raw);
        } else if !self.pairs.is_empty() {
            w.push(" WHERE ").push_assignments(&self.pairs, " AND ");
        }
    }
}
