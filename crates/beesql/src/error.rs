//! Error types for beesql

use thiserror::Error;

/// Result type alias for beesql operations
pub type BeeResult<T> = Result<T, BeeError>;

/// Error types for statement building and execution
#[derive(Debug, Error)]
pub enum BeeError {
    /// A required connection option is missing or invalid
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// The engine rejected a statement or the connection failed
    #[error("Database error: {message}")]
    Database {
        message: String,
        /// SQLSTATE reported by the engine, if any
        code: Option<String>,
    },

    /// Malformed builder call
    #[error("Usage error: {0}")]
    Usage(String),

    /// Row decode/mapping error
    #[error("Decode error on column '{column}': {message}")]
    Decode { column: String, message: String },

    /// The connection was already closed
    #[error("Connection is closed")]
    Closed,

    /// Pool error
    #[cfg(feature = "pool")]
    #[error("Pool error: {0}")]
    Pool(String),
}

impl BeeError {
    /// Create a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration(message.into())
    }

    /// Create a usage error
    pub fn usage(message: impl Into<String>) -> Self {
        Self::Usage(message.into())
    }

    /// Create a database error without a SQLSTATE
    pub fn database(message: impl Into<String>) -> Self {
        Self::Database {
            message: message.into(),
            code: None,
        }
    }

    /// Create a decode error for a specific column
    pub fn decode(column: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Decode {
            column: column.into(),
            message: message.into(),
        }
    }

    /// SQLSTATE of a database error, if the engine reported one.
    pub fn sqlstate(&self) -> Option<&str> {
        match self {
            Self::Database { code, .. } => code.as_deref(),
            _ => None,
        }
    }

    /// Check if this is a configuration error
    pub fn is_configuration(&self) -> bool {
        matches!(self, Self::Configuration(_))
    }

    /// Check if this is a usage error
    pub fn is_usage(&self) -> bool {
        matches!(self, Self::Usage(_))
    }

    /// Check if this is a unique violation error
    pub fn is_unique_violation(&self) -> bool {
        self.sqlstate() == Some("23505")
    }

    /// Check if this is a foreign key violation error
    pub fn is_foreign_key_violation(&self) -> bool {
        self.sqlstate() == Some("23503")
    }

    /// Convert a tokio_postgres error, keeping the engine's message text.
    pub fn from_db_error(err: tokio_postgres::Error) -> Self {
        match err.as_db_error() {
            Some(db_err) => Self::Database {
                message: db_err.message().to_string(),
                code: Some(db_err.code().code().to_string()),
            },
            None => Self::database(err.to_string()),
        }
    }
}

impl From<tokio_postgres::Error> for BeeError {
    fn from(err: tokio_postgres::Error) -> Self {
        Self::from_db_error(err)
    }
}

#[cfg(feature = "pool")]
impl From<deadpool_postgres::PoolError> for BeeError {
    fn from(err: deadpool_postgres::PoolError) -> Self {
        Self::Pool(err.to_string())
    }
}
