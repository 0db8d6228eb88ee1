use crate::error::Error;
use indexmap::IndexMap;
use log::LevelFilter;
use std::str::FromStr;
use std::time::Duration;

/// One row of a result set, keyed by column label in result order.
///
/// Every cell is read as text; `None` is SQL `NULL`.
pub type Record = IndexMap<String, Option<String>>;

/// A blocking transport to a single database connection.
///
/// This is the generic client the dialect layer customizes: it runs SQL text and hands
/// back rows, and knows nothing about OpenEdge.
pub trait Adapter {
    /// Establish a new connection from an ODBC connection string.
    fn open(dsn: &str) -> Result<Self, Error>
    where
        Self: Sized;

    /// Execute a statement, returning the number of rows affected.
    fn execute(&mut self, sql: &str) -> Result<u64, Error>;

    /// Execute a query and collect every row.
    fn fetch_all(&mut self, sql: &str) -> Result<Vec<Record>, Error>;

    /// Execute a query and collect the first column of every row.
    ///
    /// `NULL` cells are skipped.
    fn fetch_column(&mut self, sql: &str) -> Result<Vec<String>, Error> {
        Ok(self
            .fetch_all(sql)?
            .into_iter()
            .filter_map(|row| row.into_iter().next().and_then(|(_, value)| value))
            .collect())
    }
}

/// How identifiers read back from the catalog are normalized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CaseFolding {
    /// Leave identifiers as the driver reports them.
    #[default]
    Natural,
    Upper,
    Lower,
}

impl CaseFolding {
    pub fn fold(self, identifier: &str) -> String {
        match self {
            CaseFolding::Natural => identifier.to_owned(),
            CaseFolding::Upper => identifier.to_uppercase(),
            CaseFolding::Lower => identifier.to_lowercase(),
        }
    }
}

impl FromStr for CaseFolding {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match &*s.to_ascii_lowercase() {
            "natural" => CaseFolding::Natural,
            "upper" => CaseFolding::Upper,
            "lower" => CaseFolding::Lower,

            _ => {
                return Err(Error::Configuration(
                    format!("unknown value {:?} for `case_folding`", s).into(),
                ));
            }
        })
    }
}

#[derive(Clone, Debug)]
pub(crate) struct LogSettings {
    pub(crate) statements_level: LevelFilter,
    pub(crate) slow_statements_level: LevelFilter,
    pub(crate) slow_statements_duration: Duration,
}

impl Default for LogSettings {
    fn default() -> Self {
        LogSettings {
            statements_level: LevelFilter::Info,
            slow_statements_level: LevelFilter::Warn,
            slow_statements_duration: Duration::from_secs(1),
        }
    }
}

impl LogSettings {
    pub(crate) fn log_statements(&mut self, level: LevelFilter) {
        self.statements_level = level;
    }

    pub(crate) fn log_slow_statements(&mut self, level: LevelFilter, duration: Duration) {
        self.slow_statements_level = level;
        self.slow_statements_duration = duration;
    }
}

#[test]
fn it_folds_identifiers() {
    assert_eq!(CaseFolding::Natural.fold("CustNum"), "CustNum");
    assert_eq!(CaseFolding::Upper.fold("CustNum"), "CUSTNUM");
    assert_eq!(CaseFolding::Lower.fold("CustNum"), "custnum");
}

#[test]
fn it_parses_case_folding() {
    assert_eq!("UPPER".parse::<CaseFolding>().unwrap(), CaseFolding::Upper);
    assert!("sideways".parse::<CaseFolding>().is_err());
}
