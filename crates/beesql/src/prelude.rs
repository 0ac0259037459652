//! Convenient imports for typical `beesql` usage.
//!
//! ```ignore
//! use beesql::prelude::*;
//! ```

pub use crate::qb;
pub use crate::{
    BeeError, BeeResult, ConnectOptions, Connection, EngineKind, FromRow, MutationQb,
    PgConnection, Placeholder, QueryOutput, Row, SqlQb, Value,
};

#[cfg(feature = "pool")]
pub use crate::{PooledConnection, create_pool};
