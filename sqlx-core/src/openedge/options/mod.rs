use crate::config::Config;
use crate::connection::{CaseFolding, LogSettings};
use crate::dialect::Dialect;
use crate::error::Error;
use crate::openedge::OpenEdge;
use log::LevelFilter;
use std::time::Duration;

mod parse;

/// Options and flags which can be used to configure an OpenEdge connection.
///
/// ```rust
/// use sqlx_openedge_core::openedge::OpenEdgeConnectOptions;
///
/// let mut options = OpenEdgeConnectOptions::new()
///     .driver("Progress OpenEdge 11.7 Driver")
///     .host("localhost")
///     .port(20931)
///     .database("sports")
///     .schema("PUB");
///
/// let dsn = options.build_dsn()?;
/// assert_eq!(
///     dsn,
///     "driver={Progress OpenEdge 11.7 Driver};host=localhost;port=20931;db=sports"
/// );
/// # Ok::<(), sqlx_openedge_core::error::Error>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct OpenEdgeConnectOptions {
    pub(crate) config: Config,
    pub(crate) case_folding: CaseFolding,
    pub(crate) log_settings: LogSettings,
}

impl OpenEdgeConnectOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the ODBC driver name. It must contain `Progress OpenEdge`.
    pub fn driver(self, driver: impl Into<String>) -> Self {
        self.option("driver", driver)
    }

    pub fn host(self, host: impl Into<String>) -> Self {
        self.option("host", host)
    }

    pub fn port(self, port: u16) -> Self {
        self.option("port", port.to_string())
    }

    /// Sets the database name; sent to the driver as `db`.
    pub fn database(self, database: impl Into<String>) -> Self {
        self.option("dbname", database)
    }

    pub fn username(self, username: impl Into<String>) -> Self {
        self.option("username", username)
    }

    pub fn password(self, password: impl Into<String>) -> Self {
        self.option("password", password)
    }

    /// Sets the default schema, applied with `SET SCHEMA` right after connecting.
    pub fn schema(self, schema: impl Into<String>) -> Self {
        self.option("schema", schema)
    }

    /// Accepted for compatibility with other adapters. It currently has no effect on
    /// OpenEdge connections.
    pub fn charset(self, charset: impl Into<String>) -> Self {
        self.option("charset", charset)
    }

    /// Sets how identifiers read from the catalog are folded.
    pub fn case_folding(mut self, case_folding: CaseFolding) -> Self {
        self.case_folding = case_folding;
        self
    }

    /// Sets an arbitrary configuration key. Keys the adapter does not consume are passed
    /// to the driver as connection attributes.
    pub fn option(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.config.set(key, value);
        self
    }

    /// Sets the level at which executed statements are logged.
    pub fn log_statements(mut self, level: LevelFilter) -> Self {
        self.log_settings.log_statements(level);
        self
    }

    /// Sets the level and threshold for logging slow statements.
    pub fn log_slow_statements(mut self, level: LevelFilter, duration: Duration) -> Self {
        self.log_settings.log_slow_statements(level, duration);
        self
    }

    /// Validates the configuration and assembles the ODBC connection string.
    ///
    /// On success the configuration also carries the `db` key the driver reads.
    pub fn build_dsn(&mut self) -> Result<String, Error> {
        OpenEdge.build_dsn(&mut self.config)
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn get_driver(&self) -> Option<&str> {
        self.config.get("driver")
    }

    pub fn get_host(&self) -> Option<&str> {
        self.config.get("host")
    }

    pub fn get_database(&self) -> Option<&str> {
        self.config.get("dbname")
    }

    pub fn get_username(&self) -> Option<&str> {
        self.config.get("username")
    }

    pub fn get_schema(&self) -> Option<&str> {
        self.config.get("schema")
    }

    pub fn get_charset(&self) -> Option<&str> {
        self.config.get("charset")
    }

    pub fn get_case_folding(&self) -> CaseFolding {
        self.case_folding
    }
}
