//! PostgreSQL engine built on `tokio-postgres`.

use crate::client::{Connection, log_failure, log_statement};
use crate::config::{ConnectOptions, EngineKind};
use crate::error::{BeeError, BeeResult};
use crate::placeholder::Placeholder;
use crate::row::Row;
use crate::value::Value;
use tokio::task::JoinHandle;
use tokio_postgres::types::ToSql;
use tokio_postgres::{Client, NoTls};

const ENGINE: &str = "postgres";

/// A single PostgreSQL connection.
///
/// The connection driver runs on a spawned tokio task; [`PgConnection::close`]
/// drops the client and waits for that task to finish.
pub struct PgConnection {
    client: Option<Client>,
    driver: Option<JoinHandle<()>>,
}

impl PgConnection {
    /// Connect using `options`.
    ///
    /// Missing credentials fail with [`BeeError::Configuration`] before any
    /// network attempt. The database, if given, is selected at connect time.
    pub async fn connect(options: &ConnectOptions) -> BeeResult<Self> {
        let config = pg_config(options)?;

        tracing::info!(
            target: "beesql.conn",
            engine = ENGINE,
            host = %options.host,
            port = options.port,
            database = options.database_name().unwrap_or("-"),
            "connecting"
        );

        let (client, connection) = config
            .connect(NoTls)
            .await
            .map_err(BeeError::from_db_error)?;

        let driver = tokio::spawn(async move {
            if let Err(e) = connection.await {
                tracing::warn!(target: "beesql.conn", engine = ENGINE, error = %e, "connection closed with error");
            }
        });

        Ok(Self {
            client: Some(client),
            driver: Some(driver),
        })
    }

    fn client(&self) -> BeeResult<&Client> {
        self.client.as_ref().ok_or(BeeError::Closed)
    }
}

impl Connection for PgConnection {
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
        let Some(client) = self.client.take() else {
            return Ok(());
        };
        drop(client);

        if let Some(driver) = self.driver.take() {
            driver
                .await
                .map_err(|e| BeeError::database(format!("connection task failed: {e}")))?;
        }
        tracing::debug!(target: "beesql.conn", engine = ENGINE, "closed");
        Ok(())
    }
}

/// Build a `tokio_postgres::Config`, validating the options first.
pub(crate) fn pg_config(options: &ConnectOptions) -> BeeResult<tokio_postgres::Config> {
    options.validate()?;
    if options.engine != EngineKind::Postgres {
        return Err(BeeError::configuration(format!(
            "engine {} cannot open a postgres connection",
            options.engine
        )));
    }

    let mut config = tokio_postgres::Config::new();
    // validate() guarantees both credentials are present.
    if let Some(user) = options.username.as_deref() {
        config.user(user);
    }
    if let Some(password) = options.password.as_deref() {
        config.password(password);
    }

    match options.unix_socket.as_deref() {
        #[cfg(unix)]
        Some(dir) => {
            config.host_path(dir);
        }
        #[cfg(not(unix))]
        Some(_) => {
            return Err(BeeError::configuration(
                "unix sockets are not supported on this platform",
            ));
        }
        None => {
            config.host(&options.host);
        }
    }
    config.port(options.port);

    if let Some(db) = options.database_name() {
        config.dbname(db);
    }
    if let Some(name) = options.application_name.as_deref() {
        config.application_name(name);
    }

    Ok(config)
}

fn as_params(params: &[Value]) -> Vec<&(dyn ToSql + Sync)> {
    params.iter().map(|v| v as &(dyn ToSql + Sync)).collect()
}

pub(crate) async fn pg_query(client: &Client, sql: &str, params: &[Value]) -> BeeResult<Vec<Row>> {
    log_statement(ENGINE, sql, params.len());
    let rows = client
        .query(sql, &as_params(params))
        .await
        .map_err(BeeError::from_db_error)
        .inspect_err(|e| log_failure(ENGINE, sql, e))?;
    rows.iter().map(row_from_pg).collect()
}

pub(crate) async fn pg_execute(client: &Client, sql: &str, params: &[Value]) -> BeeResult<u64> {
    log_statement(ENGINE, sql, params.len());
    client
        .execute(sql, &as_params(params))
        .await
        .map_err(BeeError::from_db_error)
        .inspect_err(|e| log_failure(ENGINE, sql, e))
}

fn row_from_pg(pg_row: &tokio_postgres::Row) -> BeeResult<Row> {
    let mut row = Row::new();
    for (idx, column) in pg_row.columns().iter().enumerate() {
        let value: Value = pg_row
            .try_get(idx)
            .map_err(|e| BeeError::decode(column.name(), e.to_string()))?;
        row.push(column.name(), value);
    }
    Ok(row)
}
