//! A small structured SELECT builder for the catalog queries a dialect issues.

use crate::dialect::Dialect;
use crate::value::Value;

/// A table reference: a possibly schema-qualified name plus the correlation name its
/// columns are qualified with.
#[derive(Debug, Clone)]
struct TableRef {
    name: String,
    correlation: String,
}

impl TableRef {
    fn new(name: &str) -> Self {
        let correlation = name.rsplit('.').next().unwrap_or(name).to_owned();
        Self {
            name: name.to_owned(),
            correlation,
        }
    }
}

#[derive(Debug, Clone)]
struct Join {
    table: TableRef,
    on: String,
}

/// Builds a `SELECT .. FROM .. INNER JOIN .. WHERE ..` statement.
///
/// Identifiers handed to [`from`][Select::from] and [`join_inner`][Select::join_inner]
/// are quoted by the dialect; `ON` and `WHERE` conditions are written as given, with
/// every `?` replaced by the quoted bound value.
///
/// ```rust
/// use sqlx_openedge_core::openedge::OpenEdge;
/// use sqlx_openedge_core::query_builder::Select;
///
/// let sql = Select::new()
///     .from("PUB.Customer", &["CustNum", "Name"])
///     .r#where("Country = ?", "Finland")
///     .sql(&OpenEdge);
///
/// assert_eq!(
///     sql,
///     r#"SELECT "Customer"."CustNum", "Customer"."Name" FROM "PUB"."Customer" WHERE (Country = 'Finland')"#
/// );
/// ```
#[derive(Debug, Clone, Default)]
pub struct Select<'q> {
    columns: Vec<(String, String)>,
    from: Option<TableRef>,
    joins: Vec<Join>,
    wheres: Vec<(String, Value<'q>)>,
}

impl<'q> Select<'q> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the primary table. An empty column list selects `*` from it.
    pub fn from(mut self, table: &str, columns: &[&str]) -> Self {
        let table = TableRef::new(table);
        self.push_columns(&table, columns, "*");
        self.from = Some(table);
        self
    }

    /// Adds an `INNER JOIN`. An empty column list adds no columns.
    pub fn join_inner(mut self, table: &str, on: impl Into<String>, columns: &[&str]) -> Self {
        let table = TableRef::new(table);
        self.push_columns(&table, columns, "");
        self.joins.push(Join {
            table,
            on: on.into(),
        });
        self
    }

    /// Adds a condition; conditions are combined with `AND`.
    pub fn r#where(mut self, condition: impl Into<String>, value: impl Into<Value<'q>>) -> Self {
        self.wheres.push((condition.into(), value.into()));
        self
    }

    fn push_columns(&mut self, table: &TableRef, columns: &[&str], default: &str) {
        if columns.is_empty() {
            if !default.is_empty() {
                self.columns
                    .push((table.correlation.clone(), default.to_owned()));
            }
            return;
        }

        self.columns.extend(
            columns
                .iter()
                .map(|column| (table.correlation.clone(), (*column).to_owned())),
        );
    }

    /// Renders the statement with `dialect`'s quoting rules.
    pub fn sql<D: Dialect + ?Sized>(&self, dialect: &D) -> String {
        let mut sql = String::from("SELECT ");

        if self.columns.is_empty() {
            sql.push('*');
        } else {
            let columns: Vec<String> = self
                .columns
                .iter()
                .map(|(correlation, column)| {
                    let correlation = dialect.quote_identifier(correlation);
                    if column == "*" {
                        format!("{}.*", correlation)
                    } else {
                        format!("{}.{}", correlation, dialect.quote_identifier(column))
                    }
                })
                .collect();
            sql.push_str(&columns.join(", "));
        }

        if let Some(from) = &self.from {
            sql.push_str(" FROM ");
            sql.push_str(&dialect.quote_identifier(&from.name));
        }

        for join in &self.joins {
            sql.push_str(" INNER JOIN ");
            sql.push_str(&dialect.quote_identifier(&join.table.name));
            sql.push_str(" ON ");
            sql.push_str(&join.on);
        }

        if !self.wheres.is_empty() {
            let conditions: Vec<String> = self
                .wheres
                .iter()
                .map(|(condition, value)| {
                    format!("({})", condition.replace('?', &dialect.quote_value(value)))
                })
                .collect();
            sql.push_str(" WHERE ");
            sql.push_str(&conditions.join(" AND "));
        }

        sql
    }
}
