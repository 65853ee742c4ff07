//! Column declaration compilation and default-value validation.
//!
//! Every default literal is checked against the declared type before it is
//! emitted: length for character/binary columns, digit counts and bounds for
//! numerics, signedness for unsigned columns, membership for enums. A
//! violation names the column, the value and the bound it exceeded.

use log::warn;

use crate::dialect::{Dialect, IdentityStrategy};
use crate::error::{CompileError, ValidationError, Warning};
use crate::schema::{Column, ColumnType, ComplianceMode, DecimalSpec, IntSpec, Table};

use super::ColumnDecl;

/// Compile one column into a declaration fragment.
///
/// Identity handling depends on the dialect strategy: an inline keyword lands
/// in the fragment; the primary-key-substitute keyword is applied only when
/// this column is the table's sole primary-key column (the caller then
/// suppresses the table-level clause); sequence-trigger emulation leaves the
/// declaration untouched.
pub fn compile_column(
    dialect: &dyn Dialect,
    table: &Table,
    column: &Column,
    compliance: ComplianceMode,
    warnings: &mut Vec<Warning>,
) -> Result<ColumnDecl, CompileError> {
    let type_sql = dialect.type_sql(&table.name, &column.name, &column.ty, warnings);

    let identity_sql = if column.is_identity() {
        match dialect.identity_strategy() {
            IdentityStrategy::InlineKeyword(kw) => Some(kw),
            IdentityStrategy::PrimaryKeyKeyword(kw) => {
                if is_sole_primary_key(table, column) {
                    Some(kw)
                } else {
                    warnings.push(Warning::new(format!(
                        "column '{}' in table '{}': {} identity requires the column to be the single primary key, keyword omitted",
                        column.name,
                        table.name,
                        dialect.vendor()
                    )));
                    None
                }
            }
            IdentityStrategy::SequenceTrigger => None,
        }
    } else {
        None
    };

    // Identity generation supersedes any declared default.
    let default_sql = if identity_sql.is_some() || column.is_identity() {
        None
    } else {
        match validate_default(dialect, &table.name, column) {
            Ok(rendered) => rendered,
            Err(err) => match compliance {
                ComplianceMode::Strict => return Err(err.into()),
                ComplianceMode::Lenient => {
                    warn!("{}", err);
                    warnings.push(Warning::from_validation(&err));
                    None
                }
            },
        }
    };

    Ok(ColumnDecl {
        name: column.name.clone(),
        type_sql,
        nullable: column.nullable,
        default_sql,
        identity_sql,
    })
}

/// Whether this column is the table's single primary-key column.
pub fn is_sole_primary_key(table: &Table, column: &Column) -> bool {
    matches!(table.primary_key(), Some([pk]) if *pk == column.name)
}

/// Validate and render a column default, if declared.
pub fn validate_default(
    dialect: &dyn Dialect,
    table: &str,
    column: &Column,
) -> Result<Option<String>, ValidationError> {
    let Some(value) = column.default.as_deref() else {
        return Ok(None);
    };

    let rendered = match &column.ty {
        ColumnType::TinyInt(spec)
        | ColumnType::SmallInt(spec)
        | ColumnType::Int(spec)
        | ColumnType::BigInt(spec) => validate_int_default(table, column, value, spec)?,
        ColumnType::Decimal(spec) => validate_decimal_default(table, column, value, spec)?,
        ColumnType::Float(spec) | ColumnType::Double(spec) => {
            let parsed: f64 = value.parse().map_err(|_| malformed(table, column, value, "number"))?;
            if spec.unsigned && parsed < 0.0 {
                return Err(out_of_bounds(table, column, value, "unsigned range"));
            }
            check_real_bounds(table, column, value, parsed, spec.min, spec.max)?;
            value.to_string()
        }
        ColumnType::Char { length, .. } => {
            let chars = value.chars().count() as u32;
            if chars > *length {
                return Err(out_of_bounds(
                    table,
                    column,
                    value,
                    &format!("length {}", length),
                ));
            }
            quote(value)
        }
        ColumnType::Binary { length, .. } => {
            let bytes = validate_hex(table, column, value)?;
            if bytes > *length as usize {
                return Err(out_of_bounds(
                    table,
                    column,
                    value,
                    &format!("length {} bytes", length),
                ));
            }
            dialect.binary_literal(value)
        }
        ColumnType::Blob { length } => {
            let bytes = validate_hex(table, column, value)?;
            if let Some(limit) = length {
                if bytes as u64 > *limit {
                    return Err(out_of_bounds(
                        table,
                        column,
                        value,
                        &format!("length {} bytes", limit),
                    ));
                }
            }
            dialect.binary_literal(value)
        }
        ColumnType::Clob { length } => {
            if let Some(limit) = length {
                if value.chars().count() as u64 > *limit {
                    return Err(out_of_bounds(
                        table,
                        column,
                        value,
                        &format!("length {}", limit),
                    ));
                }
            }
            quote(value)
        }
        ColumnType::Date | ColumnType::Time { .. } | ColumnType::DateTime { .. } => quote(value),
        ColumnType::Boolean => match value.to_lowercase().as_str() {
            "true" | "1" => dialect.boolean_literal(true).to_string(),
            "false" | "0" => dialect.boolean_literal(false).to_string(),
            _ => return Err(malformed(table, column, value, "boolean")),
        },
        ColumnType::Enum { values } => {
            if !values.iter().any(|v| v == value) {
                return Err(malformed(table, column, value, "allowed enum value"));
            }
            quote(value)
        }
    };

    Ok(Some(rendered))
}

fn validate_int_default(
    table: &str,
    column: &Column,
    value: &str,
    spec: &IntSpec,
) -> Result<String, ValidationError> {
    let parsed: i128 = value
        .parse()
        .map_err(|_| malformed(table, column, value, "integer"))?;
    if spec.unsigned && parsed < 0 {
        return Err(out_of_bounds(table, column, value, "unsigned range"));
    }
    if let Some(precision) = spec.precision {
        let digits = parsed.unsigned_abs().to_string().len() as u32;
        if digits > precision {
            return Err(out_of_bounds(
                table,
                column,
                value,
                &format!("precision {} digits", precision),
            ));
        }
    }
    if let Some(min) = spec.min {
        if parsed < min {
            return Err(out_of_bounds(table, column, value, &format!("minimum {}", min)));
        }
    }
    if let Some(max) = spec.max {
        if parsed > max {
            return Err(out_of_bounds(table, column, value, &format!("maximum {}", max)));
        }
    }
    Ok(value.to_string())
}

fn validate_decimal_default(
    table: &str,
    column: &Column,
    value: &str,
    spec: &DecimalSpec,
) -> Result<String, ValidationError> {
    let parsed: f64 = value
        .parse()
        .map_err(|_| malformed(table, column, value, "decimal"))?;
    if spec.unsigned && parsed < 0.0 {
        return Err(out_of_bounds(table, column, value, "unsigned range"));
    }

    let unsigned = value.trim_start_matches('-');
    let (int_part, frac_part) = match unsigned.split_once('.') {
        Some((i, f)) => (i, f),
        None => (unsigned, ""),
    };
    let int_digits = int_part.trim_start_matches('0').len() as u32;
    if int_digits > spec.precision.saturating_sub(spec.scale) {
        return Err(out_of_bounds(
            table,
            column,
            value,
            &format!("precision {} scale {}", spec.precision, spec.scale),
        ));
    }
    if frac_part.len() as u32 > spec.scale {
        return Err(out_of_bounds(
            table,
            column,
            value,
            &format!("scale {}", spec.scale),
        ));
    }
    check_real_bounds(table, column, value, parsed, spec.min, spec.max)?;
    Ok(value.to_string())
}

fn check_real_bounds(
    table: &str,
    column: &Column,
    value: &str,
    parsed: f64,
    min: Option<f64>,
    max: Option<f64>,
) -> Result<(), ValidationError> {
    if let Some(min) = min {
        if parsed < min {
            return Err(out_of_bounds(table, column, value, &format!("minimum {}", min)));
        }
    }
    if let Some(max) = max {
        if parsed > max {
            return Err(out_of_bounds(table, column, value, &format!("maximum {}", max)));
        }
    }
    Ok(())
}

/// Binary defaults travel as hex digit strings; returns the byte count.
fn validate_hex(table: &str, column: &Column, value: &str) -> Result<usize, ValidationError> {
    if value.len() % 2 != 0 || !value.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(malformed(table, column, value, "hex string"));
    }
    Ok(value.len() / 2)
}

fn quote(value: &str) -> String {
    format!("'{}'", value.replace('\'', "''"))
}

fn malformed(table: &str, column: &Column, value: &str, expected: &str) -> ValidationError {
    ValidationError::DefaultMalformed {
        table: table.to_string(),
        column: column.name.clone(),
        value: value.to_string(),
        expected: expected.to_string(),
    }
}

fn out_of_bounds(table: &str, column: &Column, value: &str, bound: &str) -> ValidationError {
    ValidationError::DefaultOutOfBounds {
        table: table.to_string(),
        column: column.name.clone(),
        value: value.to_string(),
        bound: bound.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dialect::Vendor;

    fn column(ty: ColumnType, default: &str) -> Column {
        Column {
            name: "c".to_string(),
            nullable: false,
            default: Some(default.to_string()),
            ty,
            check: None,
            references: None,
            index: None,
        }
    }

    fn validate(ty: ColumnType, default: &str) -> Result<Option<String>, ValidationError> {
        validate_default(Vendor::Mysql.dialect(), "t", &column(ty, default))
    }

    #[test]
    fn test_tinyint_default_within_precision_accepted() {
        let ty = ColumnType::TinyInt(IntSpec {
            precision: Some(3),
            unsigned: true,
            ..Default::default()
        });
        assert_eq!(validate(ty, "200").unwrap(), Some("200".to_string()));
    }

    #[test]
    fn test_negative_default_on_unsigned_rejected() {
        let ty = ColumnType::TinyInt(IntSpec {
            precision: Some(3),
            unsigned: true,
            ..Default::default()
        });
        let err = validate(ty, "-5").unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("-5"));
        assert!(msg.contains("unsigned"));
    }

    #[test]
    fn test_default_exceeding_precision_rejected() {
        let ty = ColumnType::TinyInt(IntSpec {
            precision: Some(3),
            ..Default::default()
        });
        let err = validate(ty, "1000").unwrap_err();
        assert!(err.to_string().contains("precision 3 digits"));
    }

    #[test]
    fn test_char_default_too_long_rejected() {
        let ty = ColumnType::Char {
            length: 3,
            varying: true,
        };
        assert!(validate(ty.clone(), "ab").is_ok());
        let err = validate(ty, "abcd").unwrap_err();
        assert!(err.to_string().contains("length 3"));
    }

    #[test]
    fn test_decimal_scale_enforced() {
        let ty = ColumnType::Decimal(DecimalSpec {
            precision: 5,
            scale: 2,
            unsigned: false,
            min: None,
            max: None,
        });
        assert!(validate(ty.clone(), "123.45").is_ok());
        assert!(validate(ty.clone(), "123.456").is_err());
        assert!(validate(ty, "1234.5").is_err());
    }

    #[test]
    fn test_boolean_default_uses_dialect_literal() {
        let sqlite = Vendor::Sqlite.dialect();
        let col = column(ColumnType::Boolean, "true");
        assert_eq!(
            validate_default(sqlite, "t", &col).unwrap(),
            Some("1".to_string())
        );
        let pg = Vendor::Postgres.dialect();
        assert_eq!(
            validate_default(pg, "t", &col).unwrap(),
            Some("TRUE".to_string())
        );
    }

    #[test]
    fn test_enum_default_must_be_member() {
        let ty = ColumnType::Enum {
            values: vec!["red".to_string(), "green".to_string()],
        };
        assert_eq!(
            validate(ty.clone(), "red").unwrap(),
            Some("'red'".to_string())
        );
        assert!(validate(ty, "blue").is_err());
    }

    #[test]
    fn test_text_default_quoted_and_escaped() {
        let ty = ColumnType::Char {
            length: 20,
            varying: true,
        };
        assert_eq!(
            validate(ty, "it's").unwrap(),
            Some("'it''s'".to_string())
        );
    }

    #[test]
    fn test_binary_default_per_vendor() {
        let ty = ColumnType::Binary {
            length: 4,
            varying: false,
        };
        let col = column(ty, "deadbeef");
        assert_eq!(
            validate_default(Vendor::Mysql.dialect(), "t", &col).unwrap(),
            Some("X'deadbeef'".to_string())
        );
        assert_eq!(
            validate_default(Vendor::Postgres.dialect(), "t", &col).unwrap(),
            Some("'\\xdeadbeef'".to_string())
        );
        assert_eq!(
            validate_default(Vendor::SqlServer.dialect(), "t", &col).unwrap(),
            Some("0xdeadbeef".to_string())
        );
    }
}
