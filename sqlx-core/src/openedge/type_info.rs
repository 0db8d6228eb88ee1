use crate::dialect::NumericKind;

/// Numeric SQL types understood by OpenEdge, keyed by uppercase name.
///
/// The abstract kind names map to themselves so callers can pass either form.
pub(crate) static NUMERIC_TYPES: &[(&str, NumericKind)] = &[
    ("INT_TYPE", NumericKind::Int32),
    ("BIGINT_TYPE", NumericKind::Int64),
    ("FLOAT_TYPE", NumericKind::Float),
    ("BIT", NumericKind::Int32),
    ("INTEGER", NumericKind::Int32),
    ("SMALLINT", NumericKind::Int32),
    ("TINYINT", NumericKind::Int32),
    ("BIGINT", NumericKind::Int64),
    ("DECIMAL", NumericKind::Float),
    ("FLOAT", NumericKind::Float),
    ("MONEY", NumericKind::Float),
    ("NUMERIC", NumericKind::Float),
    ("NUMBER", NumericKind::Float),
    ("REAL", NumericKind::Float),
    ("SMALLMONEY", NumericKind::Float),
];

pub(crate) fn numeric_kind(type_name: &str) -> Option<NumericKind> {
    let type_name = type_name.trim();
    NUMERIC_TYPES
        .iter()
        .find(|(name, _)| name.eq_ignore_ascii_case(type_name))
        .map(|(_, kind)| *kind)
}
