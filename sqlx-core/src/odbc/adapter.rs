use crate::connection::{Adapter, Record};
use crate::error::Error;
use odbc_api::handles::{AsStatementRef, Statement};
use odbc_api::{Cursor, ResultSetMetadata};
use std::fmt::{self, Debug, Formatter};

/// A blocking [`Adapter`] over a single `odbc-api` connection.
///
/// Rows are read one at a time and every cell is fetched as text through `SQLGetData`.
pub struct OdbcAdapter {
    conn: odbc_api::Connection<'static>,
}

impl Debug for OdbcAdapter {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("OdbcAdapter").finish_non_exhaustive()
    }
}

impl OdbcAdapter {
    /// Returns the name of the actual Database Management System (DBMS) this
    /// connection is talking to as reported by the ODBC driver.
    pub fn dbms_name(&self) -> Result<String, Error> {
        Ok(self.conn.database_management_system_name()?)
    }
}

impl Adapter for OdbcAdapter {
    fn open(dsn: &str) -> Result<Self, Error> {
        let env = odbc_api::environment().map_err(|e| Error::Configuration(e.to_string().into()))?;
        let conn = env
            .connect_with_connection_string(dsn, Default::default())
            .map_err(|e| Error::Configuration(e.to_string().into()))?;

        let adapter = OdbcAdapter { conn };
        match adapter.dbms_name() {
            Ok(name) => log::debug!("connected to {} through ODBC", name),
            Err(e) => log::warn!("connected, but the driver did not report a DBMS name: {}", e),
        }

        Ok(adapter)
    }

    fn execute(&mut self, sql: &str) -> Result<u64, Error> {
        let mut preallocated = self.conn.preallocate()?;
        // a statement that produces a result set is closed without reading it
        drop(preallocated.execute(sql, ())?);
        Ok(extract_rows_affected(&mut preallocated))
    }

    fn fetch_all(&mut self, sql: &str) -> Result<Vec<Record>, Error> {
        let mut records = Vec::new();

        let mut cursor = match self.conn.execute(sql, (), None)? {
            Some(cursor) => cursor,
            None => return Ok(records),
        };

        let labels = column_labels(&mut cursor)?;
        let mut buf = Vec::new();

        while let Some(mut row) = cursor.next_row()? {
            let mut record = Record::with_capacity(labels.len());

            for (index, label) in (1u16..).zip(&labels) {
                buf.clear();
                let value = if row.get_text(index, &mut buf)? {
                    Some(String::from_utf8_lossy(&buf).into_owned())
                } else {
                    None
                };
                record.insert(label.clone(), value);
            }

            records.push(record);
        }

        Ok(records)
    }
}

fn column_labels<C: ResultSetMetadata>(cursor: &mut C) -> Result<Vec<String>, Error> {
    let count = u16::try_from(cursor.num_result_cols()?).unwrap_or(0);
    let mut labels = Vec::with_capacity(usize::from(count));

    for index in 1..=count {
        let mut cd = odbc_api::ColumnDescription::default();
        cursor.describe_col(index, &mut cd)?;
        labels.push(decode_column_name(cd.name, index));
    }

    Ok(labels)
}

fn decode_column_name(name_bytes: Vec<u8>, index: u16) -> String {
    String::from_utf8(name_bytes).unwrap_or_else(|_| format!("col{}", index - 1))
}

fn extract_rows_affected<S: AsStatementRef>(stmt: &mut S) -> u64 {
    let mut stmt_ref = stmt.as_stmt_ref();
    let count = match stmt_ref.row_count().into_result(&stmt_ref) {
        Ok(count) => count,
        Err(e) => {
            log::warn!("Failed to get row count: {}", e);
            return 0;
        }
    };

    match u64::try_from(count) {
        Ok(count) => count,
        Err(e) => {
            log::warn!("Failed to get row count: {}", e);
            0
        }
    }
}
