//! Connection pool utilities

use crate::client::Connection;
use crate::config::ConnectOptions;
use crate::error::{BeeError, BeeResult};
use crate::pg::{pg_config, pg_execute, pg_query};
use crate::placeholder::Placeholder;
use crate::row::Row;
use crate::value::Value;
use deadpool_postgres::{Manager, ManagerConfig, Object, Pool, RecyclingMethod};
use tokio_postgres::NoTls;

/// Create a PostgreSQL connection pool.
///
/// Options are validated up front, so missing credentials fail here rather
/// than on the first checkout.
///
/// # Example
///
/// ```ignore
/// let pool = beesql::create_pool(&ConnectOptions::from_env()?, 16)?;
/// let conn = PooledConnection::get(&pool).await?;
/// ```
pub fn create_pool(options: &ConnectOptions, max_size: usize) -> BeeResult<Pool> {
    let config = pg_config(options)?;
    let manager = Manager::from_config(
        config,
        NoTls,
        ManagerConfig {
            recycling_method: RecyclingMethod::Fast,
        },
    );
    Pool::builder(manager)
        .max_size(max_size)
        .build()
        .map_err(|e| BeeError::Pool(e.to_string()))
}

/// A connection checked out of a [`Pool`].
///
/// [`Connection::close`] returns the connection to the pool.
pub struct PooledConnection {
    client: Option<Object>,
}

impl PooledConnection {
    /// Check out a connection, waiting for one to become available.
    pub async fn get(pool: &Pool) -> BeeResult<Self> {
        let client = pool.get().await?;
        Ok(Self {
            client: Some(client),
        })
    }

    fn client(&self) -> BeeResult<&Object> {
        self.client.as_ref().ok_or(BeeError::Closed)
    }
}

impl Connection for PooledConnection {
    fn placeholder(&self) -> Placeholder {
        Placeholder::Numbered
    }

    async fn query(&self, sql: &str, params: &[Value]) -> BeeResult<Vec<Row>> {
        pg_query(self.client()?, sql, params).await
    }

    async fn execute(&self, sql: &str, params: &[Value]) -> BeeResult<u64> {
        pg_execute(self.client()?, sql, params).await
    }

    async fn close(&mut self) -> BeeResult<()> {
        self.client.take();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pool_requires_credentials() {
        let err = create_pool(&ConnectOptions::default(), 4).unwrap_err();
        assert!(err.is_configuration());
    }

    #[tokio::test]
    async fn test_pool_builds_without_connecting() {
        let options = ConnectOptions::default()
            .username("bee")
            .password("secret")
            .host("192.0.2.1");
        let pool = create_pool(&options, 4).unwrap();
        assert_eq!(pool.status().max_size, 4);
        assert_eq!(pool.status().size, 0);
    }
}
