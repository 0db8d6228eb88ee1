use crate::connection::LogSettings;
use std::time::Instant;

pub(crate) struct QueryLogger<'q> {
    sql: &'q str,
    rows_returned: u64,
    rows_affected: u64,
    start: Instant,
    settings: &'q LogSettings,
}

impl<'q> QueryLogger<'q> {
    pub(crate) fn new(sql: &'q str, settings: &'q LogSettings) -> Self {
        Self {
            sql,
            rows_returned: 0,
            rows_affected: 0,
            start: Instant::now(),
            settings,
        }
    }

    pub(crate) fn increase_rows_returned(&mut self, n: u64) {
        self.rows_returned += n;
    }

    pub(crate) fn increase_rows_affected(&mut self, n: u64) {
        self.rows_affected += n;
    }

    fn finish(&self) {
        let elapsed = self.start.elapsed();

        let lvl = if elapsed >= self.settings.slow_statements_duration {
            self.settings.slow_statements_level
        } else {
            self.settings.statements_level
        };

        if let Some(lvl) = lvl
            .to_level()
            .filter(|lvl| log::log_enabled!(target: "sqlx_openedge::query", *lvl))
        {
            let summary = parse_query_summary(self.sql);

            // the SQL is written on its own line for long statements
            let sql = if summary != self.sql {
                format!("\n\n{}\n", self.sql)
            } else {
                String::new()
            };

            log::logger().log(
                &log::Record::builder()
                    .args(format_args!(
                        "{}; rows affected: {}, rows returned: {}, elapsed: {:.3?}{}",
                        summary, self.rows_affected, self.rows_returned, elapsed, sql
                    ))
                    .level(lvl)
                    .module_path_static(Some("sqlx_openedge::query"))
                    .target("sqlx_openedge::query")
                    .build(),
            );
        }
    }
}

impl Drop for QueryLogger<'_> {
    fn drop(&mut self) {
        self.finish();
    }
}

/// First four words of the statement, with an ellipsis if anything was cut.
pub(crate) fn parse_query_summary(sql: &str) -> String {
    // For now, just take the first 4 words
    let mut words = sql.split_whitespace();
    let summary: Vec<&str> = words.by_ref().take(4).collect();
    let summary = summary.join(" ");

    if words.next().is_some() {
        format!("{} …", summary)
    } else {
        summary
    }
}

#[test]
fn it_summarizes_long_statements() {
    assert_eq!(
        parse_query_summary("SELECT TBL FROM sysprogress.SYSTABLES"),
        "SELECT TBL FROM sysprogress.SYSTABLES"
    );
    assert_eq!(
        parse_query_summary("SELECT * FROM sysprogress.\"SYSCOLUMNS_FULL\" WHERE TBL = 'x'"),
        "SELECT * FROM sysprogress.\"SYSCOLUMNS_FULL\" …"
    );
}
