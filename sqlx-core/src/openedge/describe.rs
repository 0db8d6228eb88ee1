use crate::connection::{CaseFolding, Record};
use crate::dialect::Dialect;
use crate::error::{CatalogDecodeError, Error};
use crate::openedge::OpenEdge;
use crate::query_builder::Select;
use indexmap::IndexMap;

pub(crate) const LIST_TABLES: &str = "SELECT TBL FROM sysprogress.SYSTABLES";

/// Normalized description of one table column, as read from the OpenEdge catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "SCREAMING_SNAKE_CASE"))]
pub struct ColumnDescription {
    /// Owner of the table.
    pub schema_name: Option<String>,
    pub table_name: String,
    pub column_name: String,
    /// 1-based position of the column in the table.
    pub column_position: i64,
    /// The catalog's type name, unmodified.
    pub data_type: String,
    #[cfg_attr(feature = "serde", serde(rename = "DEFAULT"))]
    pub default_value: Option<String>,
    pub nullable: bool,
    pub length: Option<i64>,
    pub scale: Option<i64>,
    /// Not reported by the OpenEdge catalog; always `None`.
    pub precision: Option<i64>,
    /// Not reported by the OpenEdge catalog; always `None`.
    pub unsigned: Option<bool>,
    pub primary: bool,
    /// 1-based position in the primary key, `None` for non-key columns.
    pub primary_position: Option<usize>,
    /// Not reported by the OpenEdge catalog; always `None`.
    pub identity: Option<bool>,
}

pub(crate) fn describe_columns_sql(
    dialect: &OpenEdge,
    table_name: &str,
    schema_name: Option<&str>,
) -> String {
    let mut sql = format!(
        "SELECT * FROM sysprogress.\"SYSCOLUMNS_FULL\" WHERE TBL = {}",
        dialect.quote_value(&table_name.into())
    );

    if let Some(schema_name) = schema_name {
        sql.push_str(" AND OWNER = ");
        sql.push_str(&dialect.quote_value(&schema_name.into()));
    }

    sql
}

pub(crate) fn primary_keys_query(dialect: &OpenEdge, table_name: &str) -> String {
    Select::new()
        .from("pub._index", &["_index-Name"])
        .join_inner(
            "SYSPROGRESS.SYSTABLES_FULL",
            format!(
                "{} = {}",
                dialect.quote_identifier("SYSPROGRESS.SYSTABLES_FULL.PRIME_INDEX"),
                dialect.quote_identifier("pub._index.rowid")
            ),
            &[],
        )
        .r#where("SYSPROGRESS.SYSTABLES_FULL.TBLTYPE = ?", "T")
        .r#where("SYSPROGRESS.SYSTABLES_FULL.TBL = ?", table_name)
        .sql(dialect)
}

/// Turns `SYSCOLUMNS_FULL` rows into descriptions keyed by folded column name.
pub(crate) fn column_descriptions(
    rows: Vec<Record>,
    primary_keys: &[String],
    folding: CaseFolding,
) -> Result<IndexMap<String, ColumnDescription>, Error> {
    let mut descriptions = IndexMap::with_capacity(rows.len());

    for row in rows {
        let column = required_text(&row, "COL")?;
        let primary_position = primary_keys
            .iter()
            .position(|key| key == column)
            .map(|index| index + 1);

        let description = ColumnDescription {
            schema_name: cell(&row, "OWNER")?.map(str::to_owned),
            table_name: folding.fold(cell(&row, "TBL")?.unwrap_or_default()),
            column_name: folding.fold(column),
            column_position: parse_int(required_text(&row, "ID")?, "ID")?,
            data_type: cell(&row, "COLTYPE")?.unwrap_or_default().to_owned(),
            default_value: cell(&row, "DFLT_VALUE")?.map(str::to_owned),
            nullable: parse_flag(cell(&row, "NULLFLAG")?),
            length: cell(&row, "WIDTH")?
                .map(|width| parse_int(width, "WIDTH"))
                .transpose()?,
            scale: cell(&row, "SCALE")?
                .map(|scale| parse_int(scale, "SCALE"))
                .transpose()?,
            precision: None,
            unsigned: None,
            primary: primary_position.is_some(),
            primary_position,
            identity: None,
        };

        descriptions.insert(description.column_name.clone(), description);
    }

    Ok(descriptions)
}

/// Looks a catalog column up by label, falling back to a case-insensitive match since
/// some ODBC drivers fold result labels.
fn cell<'r>(row: &'r Record, column: &str) -> Result<Option<&'r str>, Error> {
    let value = match row.get(column) {
        Some(value) => value,
        None => row
            .iter()
            .find(|(label, _)| label.eq_ignore_ascii_case(column))
            .map(|(_, value)| value)
            .ok_or_else(|| Error::ColumnNotFound(column.to_owned()))?,
    };

    Ok(value.as_deref())
}

fn required_text<'r>(row: &'r Record, column: &str) -> Result<&'r str, Error> {
    cell(row, column)?
        .ok_or_else(|| Error::decode(CatalogDecodeError::new::<String>(column, "NULL")))
}

fn parse_int(value: &str, column: &str) -> Result<i64, Error> {
    value
        .trim()
        .parse()
        .map_err(|_| Error::decode(CatalogDecodeError::new::<i64>(column, value)))
}

fn parse_flag(value: Option<&str>) -> bool {
    matches!(
        value.map(|v| v.trim().to_ascii_uppercase()).as_deref(),
        Some("Y" | "YES" | "1" | "TRUE")
    )
}
