//! # beesql
//!
//! A small, database-agnostic SQL statement builder with a pluggable
//! connection facade.
//!
//! ## Features
//!
//! - **Pure builders**: SELECT/INSERT/UPDATE/DELETE and database/table DDL compile
//!   to SQL text plus ordered parameters without touching the network
//! - **Deterministic output**: column/value pairs are always emitted sorted by
//!   column name, so the same call yields byte-identical SQL and parameters
//! - **Placeholder dialects**: `?`, `%s` or `$N`, chosen by the connection
//! - **Engine trait**: any engine implementing [`Connection`] can run the builders
//! - **PostgreSQL engine**: [`PgConnection`] and a `deadpool` pool out of the box
//!
//! ## Usage
//!
//! ```ignore
//! use beesql::prelude::*;
//!
//! let options = ConnectOptions::new(EngineKind::Postgres)
//!     .username("beesql")
//!     .password("secret")
//!     .database("releases");
//! let mut conn = beesql::connect(&options).await?;
//!
//! // SELECT
//! let rows: Vec<Row> = qb::select("beesql_version")
//!     .columns(["version", "release_name"])
//!     .eq("release_manager", "John Doe")
//!     .fetch_all(&conn)
//!     .await?;
//!
//! // INSERT
//! qb::insert("beesql_version")
//!     .set("version", "0.1")
//!     .set("name", "Kasun Herath")
//!     .execute(&conn)
//!     .await?;
//!
//! // UPDATE ... LIMIT
//! qb::update("beesql_version")
//!     .set("release_manager", "John Doe")
//!     .eq("release_year", 2012)
//!     .limit(1)
//!     .execute(&conn)
//!     .await?;
//!
//! conn.close().await?;
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod pg;
pub mod placeholder;
pub mod prelude;
pub mod qb;
pub mod row;
pub mod value;

pub use client::{Connection, QueryOutput};
pub use config::{ConnectOptions, EngineKind};
pub use error::{BeeError, BeeResult};
pub use pg::PgConnection;
pub use placeholder::Placeholder;
pub use row::{FromRow, Row};
pub use value::{FromValue, Value};

// Re-export qb entry points for easy access
pub use qb::{
    BuiltQuery, Columns, CreateDatabaseQb, DeleteQb, DropDatabaseQb, DropTableQb, InsertQb,
    MutationQb, SelectQb, SqlQb, StatementKind, TruncateQb, UpdateQb, UseQb,
};

#[cfg(feature = "pool")]
pub mod pool;

#[cfg(feature = "pool")]
pub use pool::{PooledConnection, create_pool};

/// Open a connection for the engine named in `options`.
///
/// Fails with [`BeeError::Configuration`] before any network attempt when the
/// engine's mandatory credentials are missing.
pub async fn connect(options: &ConnectOptions) -> BeeResult<PgConnection> {
    match options.engine {
        EngineKind::Postgres => PgConnection::connect(options).await,
    }
}
