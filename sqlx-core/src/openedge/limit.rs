//! `LIMIT`/`OFFSET` emulation on top of `SELECT TOP n`.
//!
//! OpenEdge SQL has `TOP` but no `OFFSET`. A window `[offset, offset + count)` is cut
//! out with a double reversal:
//!
//! ```text
//! SELECT * FROM (
//!     SELECT TOP count * FROM (
//!         SELECT TOP count+offset ... ORDER BY a
//!     ) AS inner_tbl ORDER BY a DESC
//! ) AS outer_tbl ORDER BY a
//! ```
//!
//! The innermost query keeps every row up to the end of the window, the middle one keeps
//! the last `count` of those, and the outer one restores the requested order. Without an
//! `ORDER BY` in the input the rows picked for the window are whatever the server returns
//! first, which is not deterministic.
//!
//! The middle query always returns `count` rows when the result has that many. A window
//! that runs past the end therefore yields the last `count` rows of the result, so on a
//! short last page rows before `offset` are repeated.

use crate::error::Error;
use once_cell::sync::Lazy;
use regex::{Captures, Regex};

static SELECT_PREFIX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^\s*SELECT\s+(DISTINCT\s+)?").expect("valid regex"));

static ORDER_BY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)ORDER\s+BY").expect("valid regex"));

static TRAILING_DESC: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\s+DESC$").expect("valid regex"));

static TRAILING_ASC: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)\s+ASC$").expect("valid regex"));

pub(crate) fn limit(sql: &str, count: i64, offset: i64) -> Result<String, Error> {
    if count <= 0 {
        return Err(Error::InvalidArgument(format!(
            "LIMIT argument count={} is not valid",
            count
        )));
    }

    if offset < 0 {
        return Err(Error::InvalidArgument(format!(
            "LIMIT argument offset={} is not valid",
            offset
        )));
    }

    let top = count.checked_add(offset).ok_or_else(|| {
        Error::InvalidArgument(format!(
            "LIMIT arguments count={} and offset={} overflow",
            count, offset
        ))
    })?;

    let sql = with_top(sql, top);

    if offset == 0 {
        return Ok(sql);
    }

    let sql = sql.trim_end().trim_end_matches(';');
    let order_by = ORDER_BY.find(sql).map(|m| (&sql[m.start()..], &sql[m.end()..]));

    let mut wrapped = format!(
        "SELECT * FROM (SELECT TOP {} * FROM ({}) AS inner_tbl",
        count, sql
    );

    if let Some((_, terms)) = order_by {
        wrapped.push_str(" ORDER BY ");
        wrapped.push_str(&invert_order_by(terms));
    }

    wrapped.push_str(") AS outer_tbl");

    if let Some((clause, _)) = order_by {
        wrapped.push(' ');
        wrapped.push_str(clause.trim_end());
    }

    Ok(wrapped)
}

/// Inserts `TOP n` after the leading `SELECT` or `SELECT DISTINCT`.
///
/// Statements that do not start with `SELECT` are returned unchanged.
fn with_top(sql: &str, n: i64) -> String {
    SELECT_PREFIX
        .replace(sql, |caps: &Captures<'_>| {
            if caps.get(1).is_some() {
                format!("SELECT DISTINCT TOP {} ", n)
            } else {
                format!("SELECT TOP {} ", n)
            }
        })
        .into_owned()
}

/// Flips the direction of every sort term in the body of an `ORDER BY` clause.
pub(crate) fn invert_order_by(terms: &str) -> String {
    split_terms(terms)
        .into_iter()
        .map(invert_term)
        .collect::<Vec<_>>()
        .join(", ")
}

fn invert_term(term: &str) -> String {
    let term = term.trim();

    if TRAILING_DESC.is_match(term) {
        return TRAILING_DESC.replace(term, " ASC").into_owned();
    }

    if TRAILING_ASC.is_match(term) {
        return TRAILING_ASC.replace(term, " DESC").into_owned();
    }

    // ascending is the default
    format!("{} DESC", term)
}

/// Splits on top-level commas so `COALESCE(a, b)` stays one term.
fn split_terms(terms: &str) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;

    for (i, c) in terms.char_indices() {
        match c {
            '(' => depth += 1,
            ')' => depth = depth.saturating_sub(1),
            ',' if depth == 0 => {
                parts.push(&terms[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }

    parts.push(&terms[start..]);
    parts.retain(|part| !part.trim().is_empty());
    parts
}
