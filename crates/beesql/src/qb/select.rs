//! SELECT statement builder.

use crate::client::Connection;
use crate::error::{BeeError, BeeResult};
use crate::placeholder::Placeholder;
use crate::qb::columns::Columns;
use crate::qb::filter::Filter;
use crate::qb::traits::SqlQb;
use crate::qb::{BuiltQuery, SqlWriter, StatementKind, non_blank, require_name};
use crate::row::FromRow;
use crate::value::Value;

/// SELECT builder.
///
/// Emits `SELECT [DISTINCT] <columns> FROM <table> [WHERE ..] [GROUP BY ..] [HAVING ..]`.
#[derive(Clone, Debug)]
pub struct SelectQb {
    table: String,
    columns: Columns,
    distinct: bool,
    filter: Filter,
    group_by: Option<String>,
    having: Option<String>,
}

impl SelectQb {
    /// Create a new SELECT builder for a table (all columns).
    pub fn new(table: &str) -> Self {
        Self {
            table: table.to_string(),
            columns: Columns::All,
            distinct: false,
            filter: Filter::new(),
            group_by: None,
            having: None,
        }
    }

    // ==================== SELECT columns ====================

    /// Select a single column or expression.
    pub fn column(mut self, column: &str) -> Self {
        self.columns = Columns::from(column);
        self
    }

    /// Select several columns, emitted in the given order.
    pub fn columns<I, S>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.columns = Columns::List(columns.into_iter().map(Into::into).collect());
        self
    }

    /// Set the column specification directly.
    pub fn select(mut self, columns: impl Into<Columns>) -> Self {
        self.columns = columns.into();
        self
    }

    /// Emit `SELECT DISTINCT`.
    pub fn distinct(mut self, distinct: bool) -> Self {
        self.distinct = distinct;
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

    // ==================== Grouping ====================

    /// Set GROUP BY clause.
    pub fn group_by(mut self, clause: &str) -> Self {
        self.group_by = Some(clause.to_string());
        self
    }

    /// Set HAVING clause (raw).
    pub fn having(mut self, clause: &str) -> Self {
        self.having = Some(clause.to_string());
        self
    }

    // ==================== Execution ====================

    /// Execute and map all rows to `T`.
    pub async fn fetch_all<T: FromRow>(&self, conn: &impl Connection) -> BeeResult<Vec<T>> {
        let query = self.build_with(conn.placeholder())?;
        let rows = conn.query(&query.sql, &query.params).await?;
        rows.iter().map(T::from_row).collect()
    }

    /// Execute and map the first row to `T`, if any.
    pub async fn fetch_opt<T: FromRow>(&self, conn: &impl Connection) -> BeeResult<Option<T>> {
        let query = self.build_with(conn.placeholder())?;
        let rows = conn.query(&query.sql, &query.params).await?;
        rows.first().map(T::from_row).transpose()
    }

    /// Execute and map the first row to `T`; no rows is a decode error.
    pub async fn fetch_one<T: FromRow>(&self, conn: &impl Connection) -> BeeResult<T> {
        self.fetch_opt(conn)
            .await?
            .ok_or_else(|| BeeError::decode("*", format!("{} returned no rows", self.table)))
    }
}

impl SqlQb for SelectQb {
    fn build_with(&self, placeholder: Placeholder) -> BeeResult<BuiltQuery> {
        require_name("table", &self.table)?;
        self.columns.validate()?;
        self.filter.validate("SELECT")?;

        let distinct = if self.distinct { "DISTINCT " } else { "" };
        let mut w = SqlWriter::new(
            placeholder,
            format!("SELECT {}{} FROM {}", distinct, self.columns.render(), self.table),
        );

        self.filter.write_to(&mut w);

        if let Some(group) = non_blank(&self.group_by) {
            w.push(" GROUP BY ").push(group);
        }

        if let Some(having) = non_blank(&self.having) {
            w.push(" HAVING ").push(having);
        }

        Ok(w.finish(StatementKind::Select))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simple_select() {
        let q = SelectQb::new("beesql_version").build().unwrap();
        assert_eq!(q.sql, "SELECT * FROM beesql_version");
        assert!(q.params.is_empty());
        assert_eq!(q.kind, StatementKind::Select);
    }

    #[test]
    fn test_select_distinct_column() {
        let q = SelectQb::new("beesql_version")
            .column("release_manager")
            .distinct(true)
            .build()
            .unwrap();
        assert_eq!(q.sql, "SELECT DISTINCT release_manager FROM beesql_version");
    }

    #[test]
    fn test_select_column_list() {
        let q = SelectQb::new("beesql_version")
            .columns(["version", "release_manager"])
            .build()
            .unwrap();
        assert_eq!(q.sql, "SELECT version, release_manager FROM beesql_version");
    }

    #[test]
    fn test_select_with_filters() {
        let q = SelectQb::new("beesql_version")
            .eq("release_year", 2012)
            .eq("release_manager", "John Doe")
            .build()
            .unwrap();
        assert_eq!(
            q.sql,
            "SELECT * FROM beesql_version WHERE release_manager=? AND release_year=?"
        );
        assert_eq!(q.params, vec![Value::from("John Doe"), Value::from(2012)]);
    }

    #[test]
    fn test_select_raw_where() {
        let q = SelectQb::new("beesql_version")
            .column("release_name")
            .where_raw("release_year=2012 AND release_manager='John Doe'")
            .build()
            .unwrap();
        assert_eq!(
            q.sql,
            "SELECT release_name FROM beesql_version WHERE release_year=2012 AND release_manager='John Doe'"
        );
        assert!(q.params.is_empty());
    }

    #[test]
    fn test_select_group_by_having() {
        let q = SelectQb::new("beesql_version")
            .column("SUM(billed_hours)")
            .where_raw("release_year > 2010")
            .group_by("release_manager")
            .having("SUM(billed_hours) > 100")
            .build()
            .unwrap();
        assert_eq!(
            q.sql,
            "SELECT SUM(billed_hours) FROM beesql_version WHERE release_year > 2010 \
             GROUP BY release_manager HAVING SUM(billed_hours) > 100"
        );
    }

    #[test]
    fn test_select_having_without_where() {
        let q = SelectQb::new("orders")
            .columns(["user_id", "COUNT(*)"])
            .group_by("user_id")
            .having("COUNT(*) > 5")
            .build()
            .unwrap();
        assert_eq!(
            q.sql,
            "SELECT user_id, COUNT(*) FROM orders GROUP BY user_id HAVING COUNT(*) > 5"
        );
    }

    #[test]
    fn test_select_blank_group_by_and_having_are_omitted() {
        let q = SelectQb::new("beesql_version")
            .group_by("")
            .having("  ")
            .build()
            .unwrap();
        assert_eq!(q.sql, "SELECT * FROM beesql_version");

        let q = SelectQb::new("beesql_version")
            .column("release_manager")
            .group_by("release_manager")
            .having(" ")
            .build()
            .unwrap();
        assert_eq!(
            q.sql,
            "SELECT release_manager FROM beesql_version GROUP BY release_manager"
        );
    }

    #[test]
    fn test_select_numbered_placeholders() {
        let q = SelectQb::new("users")
            .eq("status", "active")
            .eq("age", 30)
            .build_with(Placeholder::Numbered)
            .unwrap();
        assert_eq!(q.sql, "SELECT * FROM users WHERE age=$1 AND status=$2");
    }

    #[test]
    fn test_select_empty_table_is_usage_error() {
        let err = SelectQb::new("").build().unwrap_err();
        assert!(err.is_usage());
    }

    #[test]
    fn test_select_empty_column_list_is_usage_error() {
        let err = SelectQb::new("t")
            .columns(Vec::<String>::new())
            .build()
            .unwrap_err();
        assert!(err.is_usage());
    }
}
