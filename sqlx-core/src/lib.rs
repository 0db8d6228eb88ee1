//! Core of sqlx-openedge, the Progress OpenEdge dialect for ODBC SQL clients.
//! Not intended to be used directly.
#![warn(future_incompatible, rust_2018_idioms)]
#![allow(clippy::needless_doctest_main)]
//
// Allows an API be documented as only available in some specific platforms.
// <https://doc.rust-lang.org/unstable-book/language-features/doc-cfg.html>
#![cfg_attr(docsrs, feature(doc_cfg))]
#![forbid(unsafe_code)]

pub mod error;

pub mod config;
pub mod connection;
pub mod dialect;
mod logger;
pub mod query_builder;
pub mod value;

pub mod openedge;

#[cfg(feature = "odbc")]
#[cfg_attr(docsrs, doc(cfg(feature = "odbc")))]
pub mod odbc;
