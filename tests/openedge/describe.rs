use sqlx_openedge::openedge::{OpenEdgeConnectOptions, OpenEdgeConnection};
use sqlx_openedge::{CaseFolding, Error, Record};
use sqlx_test::{record, setup_if_needed, MockAdapter};

fn options() -> OpenEdgeConnectOptions {
    OpenEdgeConnectOptions::new()
        .driver("Progress OpenEdge 11.7 Driver")
        .host("localhost")
        .database("sports")
}

fn catalog_row(column: &str, id: &str, coltype: &str, nullflag: &str) -> Record {
    record(&[
        ("OWNER", Some("PUB")),
        ("TBL", Some("OrderLine")),
        ("COL", Some(column)),
        ("ID", Some(id)),
        ("COLTYPE", Some(coltype)),
        ("DFLT_VALUE", None),
        ("NULLFLAG", Some(nullflag)),
        ("WIDTH", Some("4")),
        ("SCALE", Some("0")),
    ])
}

fn order_line() -> MockAdapter {
    MockAdapter::new()
        .with_rows(
            "SYSCOLUMNS_FULL",
            vec![
                catalog_row("A", "1", "integer", "N"),
                catalog_row("B", "2", "integer", "N"),
                catalog_row("Price", "3", "decimal", "Y"),
            ],
        )
        .with_column("_index-Name", "_index-Name", &["A", "B"])
}

#[test]
fn it_describes_a_composite_primary_key() -> anyhow::Result<()> {
    setup_if_needed();

    let mut conn = OpenEdgeConnection::with_adapter(options(), order_line())?;
    let columns = conn.describe_table("OrderLine", None)?;

    assert_eq!(columns.keys().collect::<Vec<_>>(), ["A", "B", "Price"]);

    assert!(columns["A"].primary);
    assert_eq!(columns["A"].primary_position, Some(1));
    assert!(columns["B"].primary);
    assert_eq!(columns["B"].primary_position, Some(2));
    assert!(!columns["Price"].primary);
    assert_eq!(columns["Price"].primary_position, None);

    let price = &columns["Price"];
    assert_eq!(price.schema_name.as_deref(), Some("PUB"));
    assert_eq!(price.table_name, "OrderLine");
    assert_eq!(price.column_position, 3);
    assert_eq!(price.data_type, "decimal");
    assert_eq!(price.default_value, None);
    assert!(price.nullable);
    assert!(!columns["A"].nullable);
    assert_eq!(price.length, Some(4));
    assert_eq!(price.scale, Some(0));
    assert_eq!(price.precision, None);
    assert_eq!(price.unsigned, None);
    assert_eq!(price.identity, None);

    Ok(())
}

#[test]
fn it_queries_the_catalog_for_the_table_and_schema() -> anyhow::Result<()> {
    let mut conn = OpenEdgeConnection::with_adapter(options(), order_line())?;
    conn.describe_table("OrderLine", Some("PUB"))?;

    let statements = conn.adapter().unwrap().statements();
    assert_eq!(statements.len(), 2);
    assert_eq!(
        statements[0],
        r#"SELECT * FROM sysprogress."SYSCOLUMNS_FULL" WHERE TBL = 'OrderLine' AND OWNER = 'PUB'"#
    );
    assert!(
        statements[1].ends_with("(SYSPROGRESS.SYSTABLES_FULL.TBL = 'OrderLine')"),
        "{}",
        statements[1]
    );

    Ok(())
}

#[test]
fn it_finds_primary_keys_in_index_order() -> anyhow::Result<()> {
    let mut conn = OpenEdgeConnection::with_adapter(options(), order_line())?;

    assert_eq!(conn.find_primary_keys("OrderLine")?, ["A", "B"]);

    let mut conn = OpenEdgeConnection::with_adapter(options(), MockAdapter::new())?;
    assert!(conn.find_primary_keys("Nowhere")?.is_empty());

    Ok(())
}

#[test]
fn it_folds_table_and_column_names() -> anyhow::Result<()> {
    let mut conn = OpenEdgeConnection::with_adapter(
        options().case_folding(CaseFolding::Upper),
        order_line(),
    )?;
    let columns = conn.describe_table("OrderLine", None)?;

    assert_eq!(columns.keys().collect::<Vec<_>>(), ["A", "B", "PRICE"]);
    assert_eq!(columns["PRICE"].column_name, "PRICE");
    assert_eq!(columns["PRICE"].table_name, "ORDERLINE");
    assert_eq!(columns["PRICE"].schema_name.as_deref(), Some("PUB"));

    Ok(())
}

#[test]
fn it_returns_nothing_for_unknown_tables() -> anyhow::Result<()> {
    let mut conn = OpenEdgeConnection::with_adapter(options(), MockAdapter::new())?;

    assert!(conn.describe_table("Nowhere", None)?.is_empty());

    Ok(())
}

#[test]
fn it_propagates_catalog_failures() -> anyhow::Result<()> {
    let adapter = order_line().failing_on("_index");
    let mut conn = OpenEdgeConnection::with_adapter(options(), adapter)?;

    let err = conn.describe_table("OrderLine", None).unwrap_err();
    assert!(matches!(err, Error::Database(_)), "{:?}", err);

    Ok(())
}

#[cfg(feature = "serde")]
#[test]
fn it_serializes_descriptions_with_catalog_keys() -> anyhow::Result<()> {
    let mut conn = OpenEdgeConnection::with_adapter(options(), order_line())?;
    let columns = conn.describe_table("OrderLine", None)?;

    let json = serde_json::to_value(&columns["A"])?;
    assert_eq!(json["COLUMN_NAME"], "A");
    assert_eq!(json["PRIMARY_POSITION"], 1);
    assert_eq!(json["DEFAULT"], serde_json::Value::Null);
    assert_eq!(json["NULLABLE"], false);

    Ok(())
}
