//! Statement builders.
//!
//! Every builder is a plain value: building it performs no I/O and always
//! yields the same [`BuiltQuery`] for the same inputs.
//!
//! - Identifiers (tables, databases, columns, raw clauses) are interpolated verbatim.
//! - Only values of filter pairs and SET/INSERT payloads become parameters.
//! - Column/value pairs are emitted sorted by column name, so the parameter
//!   order never depends on the order pairs were added in.
//!
//! # Usage
//!
//! ```ignore
//! use beesql::qb::{self, SqlQb};
//!
//! let q = qb::select("beesql_version")
//!     .columns(["version", "release_name"])
//!     .eq("release_manager", "John Doe")
//!     .build()?;
//! assert_eq!(q.sql, "SELECT version, release_name FROM beesql_version WHERE release_manager=?");
//!
//! let affected = qb::update("beesql_version")
//!     .set("release_manager", "John Doe")
//!     .eq("release_year", 2012)
//!     .limit(1)
//!     .execute(&conn)
//!     .await?;
//! ```

mod columns;
mod ddl;
mod delete;
mod filter;
mod insert;
mod select;
mod traits;
mod update;

pub use columns::Columns;
pub use ddl::{CreateDatabaseQb, DropDatabaseQb, DropTableQb, TruncateQb, UseQb};
pub use delete::DeleteQb;
pub use insert::InsertQb;
pub use select::SelectQb;
pub use traits::{MutationQb, SqlQb};
pub use update::UpdateQb;

use crate::error::{BeeError, BeeResult};
use crate::placeholder::Placeholder;
use crate::value::Value;
use std::collections::BTreeMap;

/// The SQL verb a [`BuiltQuery`] carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatementKind {
    Select,
    Insert,
    Update,
    Delete,
    Truncate,
    DropTable,
    CreateDatabase,
    DropDatabase,
    Use,
}

impl StatementKind {
    /// Whether executing the statement yields rows rather than an affected count.
    pub fn returns_rows(self) -> bool {
        matches!(self, StatementKind::Select)
    }
}

/// SQL text plus its parameters in placeholder order.
#[derive(Debug, Clone, PartialEq)]
pub struct BuiltQuery {
    pub kind: StatementKind,
    pub sql: String,
    pub params: Vec<Value>,
}

impl BuiltQuery {
    /// A statement without parameters.
    pub fn new(kind: StatementKind, sql: impl Into<String>) -> Self {
        Self {
            kind,
            sql: sql.into(),
            params: Vec::new(),
        }
    }
}

/// Accumulates SQL text and parameters so placeholders and values stay in step.
pub(crate) struct SqlWriter {
    sql: String,
    params: Vec<Value>,
    placeholder: Placeholder,
}

impl SqlWriter {
    pub(crate) fn new(placeholder: Placeholder, head: impl Into<String>) -> Self {
        Self {
            sql: head.into(),
            params: Vec::new(),
            placeholder,
        }
    }

    pub(crate) fn push(&mut self, sql: &str) -> &mut Self {
        self.sql.push_str(sql);
        self
    }

    pub(crate) fn push_bind(&mut self, value: &Value) -> &mut Self {
        self.params.push(value.clone());
        let marker = self.placeholder.render(self.params.len());
        self.sql.push_str(&marker);
        self
    }

    /// Append `col=<placeholder>` for every pair, separated by `sep`.
    pub(crate) fn push_assignments(&mut self, pairs: &BTreeMap<String, Value>, sep: &str) -> &mut Self {
        for (i, (column, value)) in pairs.iter().enumerate() {
            if i > 0 {
                self.sql.push_str(sep);
            }
            self.sql.push_str(column);
            self.sql.push('=');
            self.push_bind(value);
        }
        self
    }

    pub(crate) fn finish(self, kind: StatementKind) -> BuiltQuery {
        BuiltQuery {
            kind,
            sql: self.sql,
            params: self.params,
        }
    }
}

/// A raw clause fragment, if one is set and not blank.
pub(crate) fn non_blank(clause: &Option<String>) -> Option<&str> {
    clause.as_deref().filter(|s| !s.trim().is_empty())
}

pub(crate) fn require_name(what: &str, name: &str) -> BeeResult<()> {
    if name.trim().is_empty() {
        return Err(BeeError::usage(format!("{what} name cannot be empty")));
    }
    Ok(())
}

pub(crate) fn require_columns(what: &str, pairs: &BTreeMap<String, Value>) -> BeeResult<()> {
    if pairs.keys().any(|c| c.trim().is_empty()) {
        return Err(BeeError::usage(format!("{what}: column name cannot be empty")));
    }
    Ok(())
}

/// Create a SELECT builder for the given table.
///
/// # Example
/// ```ignore
/// let q = beesql::qb::select("users").column("name").distinct(true).build()?;
/// assert_eq!(q.sql, "SELECT DISTINCT name FROM users");
/// ```
pub fn select(table: &str) -> SelectQb {
    SelectQb::new(table)
}

/// Create an INSERT builder for the given table.
pub fn insert(table: &str) -> InsertQb {
    InsertQb::new(table)
}

/// Alias for `insert`.
pub fn insert_into(table: &str) -> InsertQb {
    InsertQb::new(table)
}

/// Create an UPDATE builder for the given table.
pub fn update(table: &str) -> UpdateQb {
    UpdateQb::new(table)
}

/// Create a DELETE builder for the given table.
///
/// Unlike a guarded ORM, a DELETE without a WHERE clause is emitted as-is.
pub fn delete(table: &str) -> DeleteQb {
    DeleteQb::new(table)
}

/// Alias for `delete`.
pub fn delete_from(table: &str) -> DeleteQb {
    DeleteQb::new(table)
}

/// `TRUNCATE TABLE <table>`
pub fn truncate(table: &str) -> TruncateQb {
    TruncateQb::new(table)
}

/// `DROP TABLE <t1>, <t2>, ...`
pub fn drop_table<I, S>(tables: I) -> DropTableQb
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    DropTableQb::new(tables)
}

/// `CREATE DATABASE <name>`
pub fn create_database(name: &str) -> CreateDatabaseQb {
    CreateDatabaseQb::new(name)
}

/// `DROP DATABASE <name>`
pub fn drop_database(name: &str) -> DropDatabaseQb {
    DropDatabaseQb::new(name)
}

/// `USE <name>`
pub fn use_database(name: &str) -> UseQb {
    UseQb::new(name)
}
