use crate::connection::{Adapter, Record};
use crate::dialect::{Dialect, NumericKind};
use crate::error::Error;
use crate::logger::QueryLogger;
use crate::openedge::describe::{self, ColumnDescription};
use crate::openedge::{OpenEdge, OpenEdgeConnectOptions};
use crate::query_builder::Select;
use crate::value::Value;
use indexmap::IndexMap;
use std::fmt::{self, Debug, Formatter};

/// A connection to an OpenEdge database through a generic [`Adapter`].
///
/// The adapter is established lazily, on [`connect`][Self::connect] or on the first
/// statement. Every method takes `&mut self`; the connection is not meant to be shared
/// between threads without external synchronization.
pub struct OpenEdgeConnection<A> {
    options: OpenEdgeConnectOptions,
    adapter: Option<A>,
}

impl<A> Debug for OpenEdgeConnection<A> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("OpenEdgeConnection")
            .field("options", &self.options)
            .field("connected", &self.adapter.is_some())
            .finish()
    }
}

impl<A: Adapter> OpenEdgeConnection<A> {
    /// Creates an unconnected handle; nothing is validated until the first connect.
    pub fn new(options: OpenEdgeConnectOptions) -> Self {
        Self {
            options,
            adapter: None,
        }
    }

    /// Builds the DSN, opens the adapter and applies post-connect settings.
    pub fn establish(options: OpenEdgeConnectOptions) -> Result<Self, Error> {
        let mut conn = Self::new(options);
        conn.connect()?;
        Ok(conn)
    }

    /// Wraps a transport that was opened elsewhere and applies post-connect settings.
    pub fn with_adapter(options: OpenEdgeConnectOptions, mut adapter: A) -> Result<Self, Error> {
        after_connect(&options, &mut adapter)?;
        Ok(Self {
            options,
            adapter: Some(adapter),
        })
    }

    pub fn is_connected(&self) -> bool {
        self.adapter.is_some()
    }

    /// Connects if there is no connection yet; does nothing otherwise.
    pub fn connect(&mut self) -> Result<(), Error> {
        if self.adapter.is_some() {
            return Ok(());
        }

        let dsn = self.options.build_dsn()?;
        log::debug!(
            "connecting to {} database {:?}",
            OpenEdge.name(),
            self.options.get_database()
        );

        let mut adapter = A::open(&dsn)?;
        after_connect(&self.options, &mut adapter)?;

        self.adapter = Some(adapter);
        Ok(())
    }

    pub fn options(&self) -> &OpenEdgeConnectOptions {
        &self.options
    }

    /// The underlying transport, if connected.
    pub fn adapter(&self) -> Option<&A> {
        self.adapter.as_ref()
    }

    pub fn into_adapter(self) -> Option<A> {
        self.adapter
    }

    /// Executes a statement, returning the number of rows affected.
    pub fn execute(&mut self, sql: &str) -> Result<u64, Error> {
        let (adapter, options) = self.connected()?;
        execute(adapter, options, sql)
    }

    pub fn fetch_all(&mut self, sql: &str) -> Result<Vec<Record>, Error> {
        let (adapter, options) = self.connected()?;
        let mut logger = QueryLogger::new(sql, &options.log_settings);
        let rows = adapter.fetch_all(sql)?;
        logger.increase_rows_returned(rows.len() as u64);
        Ok(rows)
    }

    pub fn fetch_column(&mut self, sql: &str) -> Result<Vec<String>, Error> {
        let (adapter, options) = self.connected()?;
        let mut logger = QueryLogger::new(sql, &options.log_settings);
        let values = adapter.fetch_column(sql)?;
        logger.increase_rows_returned(values.len() as u64);
        Ok(values)
    }

    /// Restricts `sql` to `count` rows starting at row `offset`.
    ///
    /// OpenEdge has no `OFFSET`, so a non-zero offset wraps the statement in two more
    /// `SELECT TOP` layers. Give the statement an `ORDER BY`, otherwise which rows land in
    /// the window is up to the server.
    ///
    /// A window running past the end of the result is not truncated: the last `count`
    /// rows come back, including rows before `offset`.
    pub fn limit(&self, sql: &str, count: i64, offset: i64) -> Result<String, Error> {
        OpenEdge.limit(sql, count, offset)
    }

    pub fn quote<'q>(&self, value: impl Into<Value<'q>>) -> String {
        OpenEdge.quote_value(&value.into())
    }

    pub fn quote_identifier(&self, identifier: &str) -> String {
        OpenEdge.quote_identifier(identifier)
    }

    pub fn numeric_kind(&self, type_name: &str) -> Option<NumericKind> {
        OpenEdge.numeric_kind(type_name)
    }

    /// Starts a SELECT to be rendered with [`Select::sql`] and `OpenEdge`.
    pub fn select<'q>(&self) -> Select<'q> {
        Select::new()
    }

    /// Lists every table in the catalog, in the order the catalog returns them.
    pub fn list_tables(&mut self) -> Result<Vec<String>, Error> {
        self.fetch_column(describe::LIST_TABLES)
    }

    /// Describes the columns of `table_name`, keyed by case-folded column name in catalog
    /// order.
    pub fn describe_table(
        &mut self,
        table_name: &str,
        schema_name: Option<&str>,
    ) -> Result<IndexMap<String, ColumnDescription>, Error> {
        let sql = describe::describe_columns_sql(&OpenEdge, table_name, schema_name);
        let rows = self.fetch_all(&sql)?;
        let primary_keys = self.find_primary_keys(table_name)?;

        describe::column_descriptions(rows, &primary_keys, self.options.case_folding)
    }

    /// Resolves the primary key of `table_name`; the order defines key positions.
    pub fn find_primary_keys(&mut self, table_name: &str) -> Result<Vec<String>, Error> {
        let sql = describe::primary_keys_query(&OpenEdge, table_name);
        self.fetch_column(&sql)
    }

    fn connected(&mut self) -> Result<(&mut A, &OpenEdgeConnectOptions), Error> {
        self.connect()?;

        let Self { options, adapter } = self;
        let adapter = adapter
            .as_mut()
            .ok_or_else(|| Error::Protocol("OpenEdge connection is not established".into()))?;

        Ok((adapter, &*options))
    }
}

fn execute<A: Adapter>(
    adapter: &mut A,
    options: &OpenEdgeConnectOptions,
    sql: &str,
) -> Result<u64, Error> {
    let mut logger = QueryLogger::new(sql, &options.log_settings);
    let affected = adapter.execute(sql)?;
    logger.increase_rows_affected(affected);
    Ok(affected)
}

fn after_connect<A: Adapter>(
    options: &OpenEdgeConnectOptions,
    adapter: &mut A,
) -> Result<(), Error> {
    if let Some(schema) = options.get_schema() {
        let sql = format!("SET SCHEMA {}", OpenEdge.quote_value(&schema.into()));
        execute(adapter, options, &sql)?;
    }

    if let Some(charset) = options.get_charset() {
        log::debug!(
            "charset {:?} is accepted but has no effect on OpenEdge connections",
            charset
        );
    }

    Ok(())
}
