use sqlx::error::DatabaseError;
use sqlx::openedge::{OpenEdgeConnectOptions, OpenEdgeConnection};
use sqlx::{Adapter, Error, Record};
use std::env;
use std::fmt::{self, Display, Formatter};

pub fn setup_if_needed() {
    let _ = env_logger::builder().is_test(true).try_init();
}

// Make a new connection
// Ensure [dotenvy] and [env_logger] have been setup
pub fn new<A: Adapter>() -> anyhow::Result<OpenEdgeConnection<A>> {
    setup_if_needed();
    dotenvy::dotenv().ok();

    let options: OpenEdgeConnectOptions = env::var("DATABASE_URL")?.parse()?;

    Ok(OpenEdgeConnection::establish(options)?)
}

/// Builds a catalog row from `(label, value)` pairs, in order.
pub fn record(cells: &[(&str, Option<&str>)]) -> Record {
    cells
        .iter()
        .map(|(label, value)| (label.to_string(), value.map(str::to_owned)))
        .collect()
}

/// An in-memory [`Adapter`] that records every statement and answers queries from
/// canned rows.
///
/// A query is answered by the first canned response whose fragment it contains; queries
/// nothing matches return no rows.
#[derive(Debug, Default)]
pub struct MockAdapter {
    dsn: Option<String>,
    statements: Vec<String>,
    responses: Vec<(String, Vec<Record>)>,
    failures: Vec<String>,
}

impl MockAdapter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_rows(mut self, fragment: &str, rows: Vec<Record>) -> Self {
        self.responses.push((fragment.to_owned(), rows));
        self
    }

    /// Answers with a single column named `label`.
    pub fn with_column(self, fragment: &str, label: &str, values: &[&str]) -> Self {
        let rows = values
            .iter()
            .map(|value| record(&[(label, Some(value))]))
            .collect();
        self.with_rows(fragment, rows)
    }

    /// Fails every statement containing `fragment` with a database error.
    pub fn failing_on(mut self, fragment: &str) -> Self {
        self.failures.push(fragment.to_owned());
        self
    }

    /// The DSN this adapter was opened with, if it was opened through [`Adapter::open`].
    pub fn dsn(&self) -> Option<&str> {
        self.dsn.as_deref()
    }

    pub fn statements(&self) -> &[String] {
        &self.statements
    }

    fn run(&mut self, sql: &str) -> Result<Vec<Record>, Error> {
        self.statements.push(sql.to_owned());

        if self.failures.iter().any(|fragment| sql.contains(fragment.as_str())) {
            return Err(Error::Database(Box::new(MockDatabaseError(format!(
                "statement rejected: {}",
                sql
            )))));
        }

        Ok(self
            .responses
            .iter()
            .find(|(fragment, _)| sql.contains(fragment.as_str()))
            .map(|(_, rows)| rows.clone())
            .unwrap_or_default())
    }
}

impl Adapter for MockAdapter {
    fn open(dsn: &str) -> Result<Self, Error> {
        Ok(MockAdapter {
            dsn: Some(dsn.to_owned()),
            ..MockAdapter::default()
        })
    }

    fn execute(&mut self, sql: &str) -> Result<u64, Error> {
        self.run(sql).map(|rows| rows.len() as u64)
    }

    fn fetch_all(&mut self, sql: &str) -> Result<Vec<Record>, Error> {
        self.run(sql)
    }
}

#[derive(Debug)]
pub struct MockDatabaseError(pub String);

impl Display for MockDatabaseError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::error::Error for MockDatabaseError {}

impl DatabaseError for MockDatabaseError {
    fn message(&self) -> &str {
        &self.0
    }

    fn as_error(&self) -> &(dyn std::error::Error + Send + Sync + 'static) {
        self
    }

    fn as_error_mut(&mut self) -> &mut (dyn std::error::Error + Send + Sync + 'static) {
        self
    }

    fn into_error(self: Box<Self>) -> Box<dyn std::error::Error + Send + Sync + 'static> {
        self
    }
}
