//! SELECT column specification.

use crate::error::{BeeError, BeeResult};

/// Columns selected by a SELECT statement.
///
/// Entries are emitted verbatim, so expressions such as `SUM(billed_hours)`
/// are accepted anywhere a column name is.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Columns {
    /// `*`
    #[default]
    All,
    /// A single column or expression.
    One(String),
    /// Several columns, joined with `", "`.
    List(Vec<String>),
}

impl Columns {
    pub(crate) fn validate(&self) -> BeeResult<()> {
        match self {
            Columns::All => Ok(()),
            Columns::One(c) if c.trim().is_empty() => {
                Err(BeeError::usage("SELECT column cannot be empty"))
            }
            Columns::One(_) => Ok(()),
            Columns::List(cols) if cols.is_empty() => {
                Err(BeeError::usage("SELECT column list cannot be empty"))
            }
            Columns::List(cols) if cols.iter().any(|c| c.trim().is_empty()) => {
                Err(BeeError::usage("SELECT column cannot be empty"))
            }
            Columns::List(_) => Ok(()),
        }
    }

    pub(crate) fn render(&self) -> String {
        match self {
            Columns::All => "*".to_string(),
            Columns::One(c) => c.clone(),
            Columns::List(cols) => cols.join(", "),
        }
    }
}

impl From<&str> for Columns {
    fn from(col: &str) -> Self {
        if col == "*" {
            Columns::All
        } else {
            Columns::One(col.to_string())
        }
    }
}

impl From<String> for Columns {
    fn from(col: String) -> Self {
        Columns::from(col.as_str())
    }
}

impl From<Vec<String>> for Columns {
    fn from(cols: Vec<String>) -> Self {
        Columns::List(cols)
    }
}

impl From<Vec<&str>> for Columns {
    fn from(cols: Vec<&str>) -> Self {
        Columns::List(cols.into_iter().map(str::to_string).collect())
    }
}

impl<const N: usize> From<[&str; N]> for Columns {
    fn from(cols: [&str; N]) -> Self {
        Columns::List(cols.iter().map(|c| c.to_string()).collect())
    }
}
