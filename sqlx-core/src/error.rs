//! Types for working with errors produced by sqlx-openedge.

use std::any::type_name;
use std::borrow::Cow;
use std::error::Error as StdError;

/// A specialized `Result` type for sqlx-openedge.
pub type Result<T, E = Error> = ::std::result::Result<T, E>;

// Convenience type alias for usage within the crate.
// Do not make this type public.
pub type BoxDynError = Box<dyn StdError + 'static + Send + Sync>;

/// Represents all the ways a method can fail within the OpenEdge layer.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// Error occurred while parsing a connection string or building a DSN.
    #[error("error with configuration: {0}")]
    Configuration(#[source] BoxDynError),

    /// An argument passed to a query rewriting method was out of range.
    ///
    /// Raised before any SQL text is produced.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Error returned from the database driver.
    #[error("error returned from database: {0}")]
    Database(#[source] Box<dyn DatabaseError>),

    /// Unexpected or invalid data encountered while talking to the driver.
    #[error("encountered unexpected or invalid data: {0}")]
    Protocol(String),

    /// A catalog row did not carry a column this layer depends on.
    #[error("no column found for name: {0}")]
    ColumnNotFound(String),

    /// Error occurred while decoding a value from a catalog row.
    #[error("error occurred while decoding: {0}")]
    Decode(#[source] BoxDynError),
}

impl StdError for Box<dyn DatabaseError> {}

impl Error {
    pub fn into_database_error(self) -> Option<Box<dyn DatabaseError + 'static>> {
        match self {
            Error::Database(err) => Some(err),
            _ => None,
        }
    }

    pub fn as_database_error(&self) -> Option<&(dyn DatabaseError + 'static)> {
        match self {
            Error::Database(err) => Some(&**err),
            _ => None,
        }
    }

    #[inline]
    pub(crate) fn config(err: impl StdError + Send + Sync + 'static) -> Self {
        Error::Configuration(err.into())
    }

    #[inline]
    pub(crate) fn decode(err: impl Into<BoxDynError>) -> Self {
        Error::Decode(err.into())
    }
}

/// An error that was returned from the database.
pub trait DatabaseError: 'static + Send + Sync + StdError {
    /// The primary, human-readable error message.
    fn message(&self) -> &str;

    /// The (SQLSTATE) code for the error.
    fn code(&self) -> Option<Cow<'_, str>> {
        None
    }

    #[doc(hidden)]
    fn as_error(&self) -> &(dyn StdError + Send + Sync + 'static);

    #[doc(hidden)]
    fn as_error_mut(&mut self) -> &mut (dyn StdError + Send + Sync + 'static);

    #[doc(hidden)]
    fn into_error(self: Box<Self>) -> Box<dyn StdError + Send + Sync + 'static>;
}

impl dyn DatabaseError {
    /// Downcast a reference to this generic database error to a specific
    /// database error type.
    #[inline]
    pub fn try_downcast_ref<E: DatabaseError>(&self) -> Option<&E> {
        self.as_error().downcast_ref()
    }
}

/// Raised when a catalog cell cannot be read as the type the description needs.
#[derive(Debug, thiserror::Error)]
#[error("column `{column}` holds {value:?}, which is not a valid {expected}")]
pub(crate) struct CatalogDecodeError {
    pub(crate) column: String,
    pub(crate) value: String,
    pub(crate) expected: &'static str,
}

impl CatalogDecodeError {
    pub(crate) fn new<T>(column: &str, value: &str) -> Self {
        Self {
            column: column.to_owned(),
            value: value.to_owned(),
            expected: type_name::<T>(),
        }
    }
}

/// Raised for an option the OpenEdge layer does not understand or cannot accept.
#[derive(Debug, thiserror::Error)]
#[error("{0}")]
pub(crate) struct OpenEdgeConfigError(pub(crate) Cow<'static, str>);

impl From<OpenEdgeConfigError> for Error {
    fn from(err: OpenEdgeConfigError) -> Self {
        Error::Configuration(Box::new(err))
    }
}
