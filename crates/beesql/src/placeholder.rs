//! Placeholder dialects.

use std::borrow::Cow;

/// How a positional parameter is spelled in emitted SQL.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Placeholder {
    /// `?` (MySQL, SQLite, ODBC)
    #[default]
    Question,
    /// `%s` (DB-API `format` paramstyle)
    Format,
    /// `$1, $2, ...` (PostgreSQL)
    Numbered,
}

impl Placeholder {
    /// Render the placeholder for the parameter at 1-based `index`.
    pub fn render(self, index: usize) -> Cow<'static, str> {
        match self {
            Placeholder::Question => Cow::Borrowed("?"),
            Placeholder::Format => Cow::Borrowed("%s"),
            Placeholder::Numbered => Cow::Owned(format!("${index}")),
        }
    }
}
