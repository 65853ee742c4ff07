//! MySQL dialect.
//!
//! The richest native type coverage of the supported engines: real TINYINT,
//! UNSIGNED modifiers, inline ENUM syntax and AUTO_INCREMENT identity.

use crate::error::Warning;
use crate::schema::{ColumnType, IntSpec, RefAction};

use super::{
    clamp_fractional, Dialect, EnumStrategy, HashIndexSupport, IdentityStrategy, Vendor,
};

pub struct MysqlDialect;

/// VARCHAR limit (row-size permitting); fixed CHAR caps at 255.
const MAX_CHAR: u32 = 255;
const MAX_VARCHAR: u32 = 65_535;

fn int_sql(keyword: &str, spec: &IntSpec) -> String {
    let mut sql = match spec.precision {
        Some(p) => format!("{}({})", keyword, p),
        None => keyword.to_string(),
    };
    if spec.unsigned {
        sql.push_str(" UNSIGNED");
    }
    sql
}

impl Dialect for MysqlDialect {
    fn vendor(&self) -> Vendor {
        Vendor::Mysql
    }

    fn type_sql(
        &self,
        table: &str,
        column: &str,
        ty: &ColumnType,
        warnings: &mut Vec<Warning>,
    ) -> String {
        match ty {
            ColumnType::TinyInt(spec) => int_sql("TINYINT", spec),
            ColumnType::SmallInt(spec) => int_sql("SMALLINT", spec),
            ColumnType::Int(spec) => int_sql("INT", spec),
            ColumnType::BigInt(spec) => int_sql("BIGINT", spec),
            ColumnType::Decimal(spec) => {
                let mut sql = format!("DECIMAL({}, {})", spec.precision, spec.scale);
                if spec.unsigned {
                    sql.push_str(" UNSIGNED");
                }
                sql
            }
            ColumnType::Float(spec) => {
                if spec.unsigned {
                    "FLOAT UNSIGNED".to_string()
                } else {
                    "FLOAT".to_string()
                }
            }
            ColumnType::Double(spec) => {
                if spec.unsigned {
                    "DOUBLE UNSIGNED".to_string()
                } else {
                    "DOUBLE".to_string()
                }
            }
            ColumnType::Char { length, varying } => {
                if *varying {
                    let len = (*length).min(MAX_VARCHAR);
                    if len != *length {
                        warnings.push(Warning::new(format!(
                            "column '{}' in table '{}': VARCHAR length {} exceeds {}, clamped",
                            column, table, length, MAX_VARCHAR
                        )));
                    }
                    format!("VARCHAR({})", len)
                } else if *length > MAX_CHAR {
                    warnings.push(Warning::new(format!(
                        "column '{}' in table '{}': CHAR length {} exceeds {}, using VARCHAR",
                        column, table, length, MAX_CHAR
                    )));
                    format!("VARCHAR({})", length)
                } else {
                    format!("CHAR({})", length)
                }
            }
            ColumnType::Binary { length, varying } => {
                if *varying {
                    format!("VARBINARY({})", length)
                } else {
                    format!("BINARY({})", length)
                }
            }
            ColumnType::Blob { length } => match length {
                Some(l) if *l > 16_777_215 => "LONGBLOB".to_string(),
                Some(l) if *l > 65_535 => "MEDIUMBLOB".to_string(),
                _ => "BLOB".to_string(),
            },
            ColumnType::Clob { length } => match length {
                Some(l) if *l > 16_777_215 => "LONGTEXT".to_string(),
                Some(l) if *l > 65_535 => "MEDIUMTEXT".to_string(),
                _ => "TEXT".to_string(),
            },
            ColumnType::Date => "DATE".to_string(),
            ColumnType::Time { fractional } => {
                match clamp_fractional(*fractional, 6, table, column, warnings) {
                    Some(p) => format!("TIME({})", p),
                    None => "TIME".to_string(),
                }
            }
            ColumnType::DateTime { fractional } => {
                match clamp_fractional(*fractional, 6, table, column, warnings) {
                    Some(p) => format!("DATETIME({})", p),
                    None => "DATETIME".to_string(),
                }
            }
            ColumnType::Boolean => "BOOLEAN".to_string(),
            ColumnType::Enum { values } => {
                let quoted: Vec<String> = values
                    .iter()
                    .map(|v| format!("'{}'", v.replace('\'', "''")))
                    .collect();
                format!("ENUM({})", quoted.join(", "))
            }
        }
    }

    fn identity_strategy(&self) -> IdentityStrategy {
        IdentityStrategy::InlineKeyword("AUTO_INCREMENT")
    }

    fn enum_strategy(&self) -> EnumStrategy {
        EnumStrategy::Inline
    }

    fn hash_index_support(&self) -> HashIndexSupport {
        HashIndexSupport::Composite
    }

    fn supports_unsigned(&self) -> bool {
        true
    }

    fn supports_on_update(&self, action: RefAction) -> bool {
        // InnoDB parses SET DEFAULT but rejects it at table-creation time.
        action != RefAction::SetDefault
    }

    fn supports_on_delete(&self, action: RefAction) -> bool {
        action != RefAction::SetDefault
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::DecimalSpec;

    fn sql(ty: &ColumnType) -> (String, Vec<Warning>) {
        let mut warnings = Vec::new();
        let s = MysqlDialect.type_sql("t", "c", ty, &mut warnings);
        (s, warnings)
    }

    #[test]
    fn test_unsigned_integers() {
        let ty = ColumnType::TinyInt(IntSpec {
            precision: Some(3),
            unsigned: true,
            ..Default::default()
        });
        assert_eq!(sql(&ty).0, "TINYINT(3) UNSIGNED");
    }

    #[test]
    fn test_unsigned_decimal() {
        let ty = ColumnType::Decimal(DecimalSpec {
            precision: 8,
            scale: 2,
            unsigned: true,
            min: None,
            max: None,
        });
        assert_eq!(sql(&ty).0, "DECIMAL(8, 2) UNSIGNED");
    }

    #[test]
    fn test_inline_enum() {
        let ty = ColumnType::Enum {
            values: vec!["red".to_string(), "green".to_string()],
        };
        assert_eq!(sql(&ty).0, "ENUM('red', 'green')");
    }

    #[test]
    fn test_long_char_downgrades_to_varchar() {
        let ty = ColumnType::Char {
            length: 1000,
            varying: false,
        };
        let (s, warnings) = sql(&ty);
        assert_eq!(s, "VARCHAR(1000)");
        assert_eq!(warnings.len(), 1);
    }

    #[test]
    fn test_blob_size_tiers() {
        assert_eq!(sql(&ColumnType::Blob { length: None }).0, "BLOB");
        assert_eq!(
            sql(&ColumnType::Blob { length: Some(100_000) }).0,
            "MEDIUMBLOB"
        );
        assert_eq!(
            sql(&ColumnType::Blob { length: Some(20_000_000) }).0,
            "LONGBLOB"
        );
    }

    #[test]
    fn test_set_default_unsupported() {
        assert!(!MysqlDialect.supports_on_delete(RefAction::SetDefault));
        assert!(MysqlDialect.supports_on_delete(RefAction::Cascade));
    }
}
