#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]

pub use sqlx_core::config::Config;
pub use sqlx_core::connection::{Adapter, CaseFolding, Record};
pub use sqlx_core::dialect::{Dialect, NumericKind};
pub use sqlx_core::error::{self, Error, Result};
pub use sqlx_core::query_builder::{self, Select};
pub use sqlx_core::value::Value;

pub mod openedge {
    pub use sqlx_core::openedge::{
        ColumnDescription, OpenEdge, OpenEdgeConnectOptions, OpenEdgeConnection, DRIVER_MARKER,
    };
}

#[cfg(feature = "odbc")]
#[cfg_attr(docsrs, doc(cfg(feature = "odbc")))]
pub mod odbc {
    pub use sqlx_core::odbc::{OdbcAdapter, OdbcDatabaseError};
}

/// Convenience re-export of common traits.
pub mod prelude {
    pub use super::Adapter;
    pub use super::Dialect;
}
