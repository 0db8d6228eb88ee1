use regex::Regex;
use sqlx_openedge::openedge::OpenEdge;
use sqlx_openedge::{Dialect, Error};

const ORDERED: &str = "SELECT Name, Balance FROM PUB.Customer ORDER BY Balance DESC, Name";

fn count_selects(sql: &str) -> usize {
    sql.matches("SELECT ").count()
}

#[test]
fn it_only_adds_top_without_an_offset() -> anyhow::Result<()> {
    assert_eq!(
        OpenEdge.limit("SELECT * FROM PUB.Customer", 5, 0)?,
        "SELECT TOP 5 * FROM PUB.Customer"
    );
    assert_eq!(
        OpenEdge.limit("select distinct Country from PUB.Customer", 3, 0)?,
        "SELECT DISTINCT TOP 3 Country from PUB.Customer"
    );

    Ok(())
}

#[test]
fn it_nests_three_selects_with_an_offset() -> anyhow::Result<()> {
    let sql = OpenEdge.limit(ORDERED, 10, 20)?;

    assert_eq!(count_selects(&sql), 3, "{}", sql);
    assert_eq!(
        sql,
        concat!(
            "SELECT * FROM (SELECT TOP 10 * FROM (",
            "SELECT TOP 30 Name, Balance FROM PUB.Customer ORDER BY Balance DESC, Name",
            ") AS inner_tbl ORDER BY Balance ASC, Name DESC",
            ") AS outer_tbl ORDER BY Balance DESC, Name"
        )
    );

    Ok(())
}

#[test]
fn it_wraps_unordered_statements_without_reordering() -> anyhow::Result<()> {
    let sql = OpenEdge.limit("SELECT * FROM PUB.Item;", 2, 4)?;

    assert_eq!(
        sql,
        "SELECT * FROM (SELECT TOP 2 * FROM (SELECT TOP 6 * FROM PUB.Item) AS inner_tbl) AS outer_tbl"
    );

    Ok(())
}

#[test]
fn it_rejects_invalid_windows() {
    for (count, offset) in [(0, 0), (-1, 5), (10, -1), (i64::MAX, 1)] {
        let err = OpenEdge.limit(ORDERED, count, offset).unwrap_err();
        assert!(
            matches!(err, Error::InvalidArgument(_)),
            "count={} offset={}: {:?}",
            count,
            offset,
            err
        );
    }
}

/// Runs the statement `limit` produces for `SELECT Id FROM PUB.Item ORDER BY Id` over
/// `rows`, reading the `TOP` sizes back out of the generated SQL.
fn run_window(rows: &[i32], count: i64, offset: i64) -> anyhow::Result<Vec<i32>> {
    let sql = OpenEdge.limit("SELECT Id FROM PUB.Item ORDER BY Id", count, offset)?;

    let tops = Regex::new(r"SELECT TOP (\d+) ")?
        .captures_iter(&sql)
        .map(|caps| caps[1].parse::<usize>())
        .collect::<Result<Vec<_>, _>>()?;

    let mut ascending = rows.to_vec();
    ascending.sort_unstable();

    if offset == 0 {
        assert_eq!(tops, [count as usize], "{}", sql);
        ascending.truncate(tops[0]);
        return Ok(ascending);
    }

    assert_eq!(tops, [count as usize, (count + offset) as usize], "{}", sql);
    assert!(
        sql.ends_with(") AS inner_tbl ORDER BY Id DESC) AS outer_tbl ORDER BY Id"),
        "{}",
        sql
    );

    let inner: Vec<i32> = ascending.into_iter().take(tops[1]).collect();
    let mut middle: Vec<i32> = inner.into_iter().rev().take(tops[0]).collect();
    middle.sort_unstable();

    Ok(middle)
}

#[test]
fn it_selects_the_requested_window() -> anyhow::Result<()> {
    // 1..=100 in scrambled order
    let rows: Vec<i32> = (1..=100).map(|i| (i * 37) % 101).collect();

    assert_eq!(run_window(&rows, 10, 20)?, (21..=30).collect::<Vec<_>>());
    assert_eq!(run_window(&rows, 5, 0)?, (1..=5).collect::<Vec<_>>());
    assert_eq!(run_window(&rows, 1, 99)?, vec![100]);

    Ok(())
}

#[test]
fn it_returns_the_last_rows_for_a_window_past_the_end() -> anyhow::Result<()> {
    let rows: Vec<i32> = (1..=100).collect();

    // rows 96..=100 are in range, the window is filled up with 91..=95
    assert_eq!(run_window(&rows, 10, 95)?, (91..=100).collect::<Vec<_>>());
    assert_eq!(run_window(&[3, 1, 2], 2, 5)?, vec![2, 3]);

    Ok(())
}
