//! The per-vendor overrides layered on top of the generic adapter.

use crate::config::Config;
use crate::error::Error;
use crate::value::Value;

/// The abstract numeric kinds a SQL type name can map to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum NumericKind {
    /// 32-bit integer.
    Int32,
    /// 64-bit integer.
    Int64,
    /// Float or decimal.
    Float,
}

/// SQL text rules that differ between database vendors.
///
/// A dialect never talks to the database itself; it only rewrites configuration and
/// SQL text for the adapter that does.
pub trait Dialect {
    /// The vendor name, used in log output.
    fn name(&self) -> &'static str;

    /// Builds the connection string for this vendor's driver, normalizing `config` in
    /// the process.
    fn build_dsn(&self, config: &mut Config) -> Result<String, Error> {
        Ok(config.to_connection_string())
    }

    /// Restricts `sql` to `count` rows starting at row `offset`.
    fn limit(&self, sql: &str, count: i64, offset: i64) -> Result<String, Error>;

    /// Renders `value` as a SQL literal.
    fn quote_value(&self, value: &Value<'_>) -> String;

    /// Renders a possibly dotted identifier, quoting each segment.
    fn quote_identifier(&self, identifier: &str) -> String {
        identifier
            .split('.')
            .map(|part| format!("\"{}\"", part.replace('"', "\"\"")))
            .collect::<Vec<_>>()
            .join(".")
    }

    /// Classifies a SQL type name, or `None` if it is not numeric.
    fn numeric_kind(&self, type_name: &str) -> Option<NumericKind>;
}
