use crate::error::{DatabaseError, Error};
use odbc_api::Error as OdbcApiError;
use std::fmt::{self, Display, Formatter};

/// An error reported by the ODBC driver manager or the OpenEdge driver.
///
/// The driver's diagnostic text is kept as the message so a failing statement surfaces
/// exactly what the server said.
#[derive(Debug)]
pub struct OdbcDatabaseError {
    message: String,
    source: OdbcApiError,
}

impl OdbcDatabaseError {
    pub fn inner(&self) -> &OdbcApiError {
        &self.source
    }
}

impl Display for OdbcDatabaseError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for OdbcDatabaseError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.source)
    }
}

impl DatabaseError for OdbcDatabaseError {
    fn message(&self) -> &str {
        &self.message
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

impl From<OdbcApiError> for Error {
    fn from(source: OdbcApiError) -> Self {
        Error::Database(Box::new(OdbcDatabaseError {
            message: source.to_string(),
            source,
        }))
    }
}
