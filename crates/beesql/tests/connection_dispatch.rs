//! Builders running against an in-memory `Connection` that records every call.

use beesql::prelude::*;
use std::sync::{Arc, Mutex};

#[derive(Debug, Clone, PartialEq)]
struct Call {
    method: &'static str,
    sql: String,
    params: Vec<Value>,
}

#[derive(Default)]
struct Recorder {
    calls: Mutex<Vec<Call>>,
    closes: Mutex<usize>,
}

struct RecordingConnection {
    placeholder: Placeholder,
    rows: Vec<Row>,
    fail_with: Option<&'static str>,
    closed: bool,
    recorder: Arc<Recorder>,
}

impl RecordingConnection {
    fn new(placeholder: Placeholder) -> (Self, Arc<Recorder>) {
        let recorder = Arc::new(Recorder::default());
        let conn = Self {
            placeholder,
            rows: Vec::new(),
            fail_with: None,
            closed: false,
            recorder: recorder.clone(),
        };
        (conn, recorder)
    }

    fn record(&self, method: &'static str, sql: &str, params: &[Value]) -> BeeResult<()> {
        if self.closed {
            return Err(BeeError::Closed);
        }
        self.recorder.calls.lock().unwrap().push(Call {
            method,
            sql: sql.to_string(),
            params: params.to_vec(),
        });
        match self.fail_with {
            Some(message) => Err(BeeError::Database {
                message: message.to_string(),
                code: Some("42601".to_string()),
            }),
            None => Ok(()),
        }
    }
}

impl Connection for RecordingConnection {
    fn placeholder(&self) -> Placeholder {
        self.placeholder
    }

    async fn query(&self, sql: &str, params: &[Value]) -> BeeResult<Vec<Row>> {
        self.record("query", sql, params)?;
        Ok(self.rows.clone())
    }

    async fn execute(&self, sql: &str, params: &[Value]) -> BeeResult<u64> {
        self.record("execute", sql, params)?;
        Ok(1)
    }

    async fn close(&mut self) -> BeeResult<()> {
        if !self.closed {
            self.closed = true;
            *self.recorder.closes.lock().unwrap() += 1;
        }
        Ok(())
    }
}

fn last_call(recorder: &Recorder) -> Call {
    recorder.calls.lock().unwrap().last().cloned().unwrap()
}

#[tokio::test]
async fn select_runs_through_query_with_connection_dialect() {
    let (mut conn, recorder) = RecordingConnection::new(Placeholder::Numbered);
    conn.rows = vec![Row::new().with("version", "0.1")];

    let output = qb::select("beesql_version")
        .column("version")
        .eq("release_year", 2012)
        .eq("release_manager", "John Doe")
        .run(&conn)
        .await
        .unwrap();

    assert_eq!(output.rows().map(<[Row]>::len), Some(1));
    assert_eq!(
        last_call(&recorder),
        Call {
            method: "query",
            sql: "SELECT version FROM beesql_version WHERE release_manager=$1 AND release_year=$2"
                .to_string(),
            params: vec![Value::from("John Doe"), Value::from(2012)],
        }
    );
}

#[tokio::test]
async fn mutations_run_through_execute() {
    let (conn, recorder) = RecordingConnection::new(Placeholder::Format);

    let affected = qb::update("beesql_version")
        .set("release_manager", "John Doe")
        .eq("release_manager", "John Smith")
        .eq("release_year", 2012)
        .limit(1)
        .execute(&conn)
        .await
        .unwrap();
    assert_eq!(affected, 1);

    let call = last_call(&recorder);
    assert_eq!(call.method, "execute");
    assert_eq!(
        call.sql,
        "UPDATE beesql_version SET release_manager=%s WHERE release_manager=%s AND release_year=%s LIMIT 1"
    );
    assert_eq!(
        call.params,
        vec![
            Value::from("John Doe"),
            Value::from("John Smith"),
            Value::from(2012)
        ]
    );

    let output = qb::drop_table(["beesql_version", "beesql_downloads"])
        .if_exists(true)
        .run(&conn)
        .await
        .unwrap();
    assert_eq!(output, QueryOutput::Affected(1));
    assert_eq!(
        last_call(&recorder).sql,
        "DROP TABLE IF EXISTS beesql_version, beesql_downloads"
    );
}

#[tokio::test]
async fn fetch_all_maps_rows() {
    struct Release {
        version: String,
        year: i64,
    }

    impl FromRow for Release {
        fn from_row(row: &Row) -> BeeResult<Self> {
            Ok(Self {
                version: row.try_get_as("version")?,
                year: row.try_get_as("release_year")?,
            })
        }
    }

    let (mut conn, _recorder) = RecordingConnection::new(Placeholder::Question);
    conn.rows = vec![
        Row::new().with("version", "0.1").with("release_year", 2012),
        Row::new().with("version", "0.2").with("release_year", 2013),
    ];

    let releases: Vec<Release> = qb::select("beesql_version").fetch_all(&conn).await.unwrap();
    assert_eq!(releases.len(), 2);
    assert_eq!(releases[1].version, "0.2");
    assert_eq!(releases[1].year, 2013);

    let first: Release = qb::select("beesql_version").fetch_one(&conn).await.unwrap();
    assert_eq!(first.version, "0.1");

    conn.rows.clear();
    let none: Option<Row> = qb::select("beesql_version").fetch_opt(&conn).await.unwrap();
    assert!(none.is_none());
    assert!(qb::select("beesql_version").fetch_one::<Row>(&conn).await.is_err());
}

#[tokio::test]
async fn usage_errors_never_reach_the_engine() {
    let (conn, recorder) = RecordingConnection::new(Placeholder::Question);

    let err = qb::update("beesql_version")
        .eq("id", 1)
        .execute(&conn)
        .await
        .unwrap_err();
    assert!(err.is_usage());

    let err = qb::insert("beesql_version").run(&conn).await.unwrap_err();
    assert!(err.is_usage());

    assert!(recorder.calls.lock().unwrap().is_empty());
}

#[tokio::test]
async fn engine_errors_propagate_unchanged() {
    let (mut conn, _recorder) = RecordingConnection::new(Placeholder::Question);
    conn.fail_with = Some("syntax error at or near \"USE\"");

    let err = qb::use_database("releases").execute(&conn).await.unwrap_err();
    assert_eq!(err.sqlstate(), Some("42601"));
    assert_eq!(
        err.to_string(),
        "Database error: syntax error at or near \"USE\""
    );
}

#[tokio::test]
async fn close_is_idempotent_and_blocks_further_calls() {
    let (mut conn, recorder) = RecordingConnection::new(Placeholder::Question);

    conn.close().await.unwrap();
    conn.close().await.unwrap();
    assert_eq!(*recorder.closes.lock().unwrap(), 1);

    let err = qb::truncate("beesql_version").execute(&conn).await.unwrap_err();
    assert!(matches!(err, BeeError::Closed));
}
