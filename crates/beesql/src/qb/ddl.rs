//! Database and table DDL builders.
//!
//! None of these statements bind parameters; the placeholder dialect only
//! matters for the shared [`SqlQb`] signature.

use crate::error::{BeeError, BeeResult};
use crate::placeholder::Placeholder;
use crate::qb::traits::{MutationQb, SqlQb};
use crate::qb::{BuiltQuery, StatementKind, require_name};

/// `TRUNCATE TABLE <table>`
#[derive(Clone, Debug)]
pub struct TruncateQb {
    table: String,
}

impl TruncateQb {
    pub fn new(table: &str) -> Self {
        Self {
            table: table.to_string(),
        }
    }
}

impl SqlQb for TruncateQb {
    fn build_with(&self, _placeholder: Placeholder) -> BeeResult<BuiltQuery> {
        require_name("table", &self.table)?;
        Ok(BuiltQuery::new(
            StatementKind::Truncate,
            format!("TRUNCATE TABLE {}", self.table),
        ))
    }
}

impl MutationQb for TruncateQb {}

/// `DROP TABLE [IF EXISTS] <t1>, <t2>, ...`
#[derive(Clone, Debug)]
pub struct DropTableQb {
    tables: Vec<String>,
    if_exists: bool,
}

impl DropTableQb {
    pub fn new<I, S>(tables: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            tables: tables.into_iter().map(Into::into).collect(),
            if_exists: false,
        }
    }

    /// Append another table to drop.
    pub fn table(mut self, table: &str) -> Self {
        self.tables.push(table.to_string());
        self
    }

    pub fn if_exists(mut self, if_exists: bool) -> Self {
        self.if_exists = if_exists;
        self
    }
}

impl SqlQb for DropTableQb {
    fn build_with(&self, _placeholder: Placeholder) -> BeeResult<BuiltQuery> {
        if self.tables.is_empty() {
            return Err(BeeError::usage("DROP TABLE requires at least one table"));
        }
        for table in &self.tables {
            require_name("table", table)?;
        }

        let if_exists = if self.if_exists { "IF EXISTS " } else { "" };
        Ok(BuiltQuery::new(
            StatementKind::DropTable,
            format!("DROP TABLE {}{}", if_exists, self.tables.join(", ")),
        ))
    }
}

impl MutationQb for DropTableQb {}

/// `CREATE DATABASE [IF NOT EXISTS] <name>`
#[derive(Clone, Debug)]
pub struct CreateDatabaseQb {
    name: String,
    if_not_exists: bool,
}

impl CreateDatabaseQb {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            if_not_exists: false,
        }
    }

    pub fn if_not_exists(mut self, if_not_exists: bool) -> Self {
        self.if_not_exists = if_not_exists;
        self
    }
}

impl SqlQb for CreateDatabaseQb {
    fn build_with(&self, _placeholder: Placeholder) -> BeeResult<BuiltQuery> {
        require_name("database", &self.name)?;
        let if_not_exists = if self.if_not_exists { "IF NOT EXISTS " } else { "" };
        Ok(BuiltQuery::new(
            StatementKind::CreateDatabase,
            format!("CREATE DATABASE {}{}", if_not_exists, self.name),
        ))
    }
}

impl MutationQb for CreateDatabaseQb {}

/// `DROP DATABASE [IF EXISTS] <name>`
#[derive(Clone, Debug)]
pub struct DropDatabaseQb {
    name: String,
    if_exists: bool,
}

impl DropDatabaseQb {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            if_exists: false,
        }
    }

    pub fn if_exists(mut self, if_exists: bool) -> Self {
        self.if_exists = if_exists;
        self
    }
}

impl SqlQb for DropDatabaseQb {
    fn build_with(&self, _placeholder: Placeholder) -> BeeResult<BuiltQuery> {
        require_name("database", &self.name)?;
        let if_exists = if self.if_exists { "IF EXISTS " } else { "" };
        Ok(BuiltQuery::new(
            StatementKind::DropDatabase,
            format!("DROP DATABASE {}{}", if_exists, self.name),
        ))
    }
}

impl MutationQb for DropDatabaseQb {}

/// `USE <name>`
#[derive(Clone, Debug)]
pub struct UseQb {
    name: String,
}

impl UseQb {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
        }
    }
}

impl SqlQb for UseQb {
    fn build_with(&self, _placeholder: Placeholder) -> BeeResult<BuiltQuery> {
        require_name("database", &self.name)?;
        Ok(BuiltQuery::new(StatementKind::Use, format!("USE {}", self.name)))
    }
}

impl MutationQb for UseQb {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate() {
        let q = TruncateQb::new("beesql_version").build().unwrap();
        assert_eq!(q.sql, "TRUNCATE TABLE beesql_version");
        assert!(q.params.is_empty());
    }

    #[test]
    fn test_drop_table_variants() {
        assert_eq!(
            DropTableQb::new(["beesql_version"]).to_sql().unwrap(),
            "DROP TABLE beesql_version"
        );
        assert_eq!(
            DropTableQb::new(["beesql_version"])
                .if_exists(true)
                .to_sql()
                .unwrap(),
            "DROP TABLE IF EXISTS beesql_version"
        );
        assert_eq!(
            DropTableQb::new(["beesql_version"])
                .table("beesql_downloads")
                .to_sql()
                .unwrap(),
            "DROP TABLE beesql_version, beesql_downloads"
        );
    }

    #[test]
    fn test_drop_table_requires_tables() {
        let err = DropTableQb::new(Vec::<String>::new()).build().unwrap_err();
        assert!(err.is_usage());
        let err = DropTableQb::new(["a", ""]).build().unwrap_err();
        assert!(err.is_usage());
    }

    #[test]
    fn test_create_database() {
        assert_eq!(
            CreateDatabaseQb::new("beesql_version").to_sql().unwrap(),
            "CREATE DATABASE beesql_version"
        );
        assert_eq!(
            CreateDatabaseQb::new("beesql_version")
                .if_not_exists(true)
                .to_sql()
                .unwrap(),
            "CREATE DATABASE IF NOT EXISTS beesql_version"
        );
        assert_eq!(
            CreateDatabaseQb::new("beesql_version")
                .if_not_exists(false)
                .to_sql()
                .unwrap(),
            "CREATE DATABASE beesql_version"
        );
    }

    #[test]
    fn test_drop_database() {
        assert_eq!(
            DropDatabaseQb::new("beesql_version").to_sql().unwrap(),
            "DROP DATABASE beesql_version"
        );
        assert_eq!(
            DropDatabaseQb::new("beesql_version")
                .if_exists(true)
                .to_sql()
                .unwrap(),
            "DROP DATABASE IF EXISTS beesql_version"
        );
    }

    #[test]
    fn test_use() {
        let q = UseQb::new("beesql_version").build().unwrap();
        assert_eq!(q.sql, "USE beesql_version");
        assert_eq!(q.kind, StatementKind::Use);
    }

    #[test]
    fn test_empty_database_name_is_usage_error() {
        assert!(UseQb::new(" ").build().unwrap_err().is_usage());
        assert!(CreateDatabaseQb::new("").build().unwrap_err().is_usage());
    }
}
