//! Engine-agnostic result rows and row mapping

use crate::error::{BeeError, BeeResult};
use crate::value::{FromValue, Value};
use std::collections::BTreeMap;

/// One result row: column names paired with decoded values, in result order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Row {
    columns: Vec<String>,
    values: Vec<Value>,
}

impl Row {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a column. Duplicate names are kept; lookups by name return the first.
    pub fn push(&mut self, column: impl Into<String>, value: impl Into<Value>) {
        self.columns.push(column.into());
        self.values.push(value.into());
    }

    /// Builder-style [`Row::push`].
    pub fn with(mut self, column: impl Into<String>, value: impl Into<Value>) -> Self {
        self.push(column, value);
        self
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Value of the named column.
    pub fn get(&self, column: &str) -> Option<&Value> {
        self.columns
            .iter()
            .position(|c| c == column)
            .map(|i| &self.values[i])
    }

    /// Value at a 0-based position.
    pub fn get_idx(&self, idx: usize) -> Option<&Value> {
        self.values.get(idx)
    }

    /// Value of the named column, or a decode error if it is missing.
    pub fn try_get(&self, column: &str) -> BeeResult<&Value> {
        self.get(column)
            .ok_or_else(|| BeeError::decode(column, "column not found"))
    }

    /// Typed value of the named column.
    pub fn try_get_as<T: FromValue>(&self, column: &str) -> BeeResult<T> {
        T::from_value(column, self.try_get(column)?)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.columns
            .iter()
            .map(String::as_str)
            .zip(self.values.iter())
    }

    /// Convert into a name-keyed map (later duplicates are dropped).
    pub fn into_map(self) -> BTreeMap<String, Value> {
        let mut map = BTreeMap::new();
        for (column, value) in self.columns.into_iter().zip(self.values) {
            map.entry(column).or_insert(value);
        }
        map
    }
}

/// Trait for types that can be constructed from a result [`Row`].
///
/// # Example
///
/// ```ignore
/// use beesql::{BeeResult, FromRow, Row};
///
/// struct Version {
///     version: String,
///     release_year: i64,
/// }
///
/// impl FromRow for Version {
///     fn from_row(row: &Row) -> BeeResult<Self> {
///         Ok(Self {
///             version: row.try_get_as("version")?,
///             release_year: row.try_get_as("release_year")?,
///         })
///     }
/// }
/// ```
pub trait FromRow: Sized {
    fn from_row(row: &Row) -> BeeResult<Self>;
}

impl FromRow for Row {
    fn from_row(row: &Row) -> BeeResult<Self> {
        Ok(row.clone())
    }
}

impl FromRow for BTreeMap<String, Value> {
    fn from_row(row: &Row) -> BeeResult<Self> {
        Ok(row.clone().into_map())
    }
}
