//! SQL Server dialect.
//!
//! Identity via `IDENTITY(1,1)`; BIT booleans with numeric literals; LOBs
//! render as MAX-sized variable types; RESTRICT is not a supported
//! referential action.

use crate::error::Warning;
use crate::schema::{ColumnType, RefAction};

use super::{
    clamp_fractional, Dialect, EnumStrategy, HashIndexSupport, IdentityStrategy, Vendor,
};

pub struct SqlServerDialect;

const MAX_CHAR: u32 = 8000;

impl Dialect for SqlServerDialect {
    fn vendor(&self) -> Vendor {
        Vendor::SqlServer
    }

    fn type_sql(
        &self,
        table: &str,
        column: &str,
        ty: &ColumnType,
        warnings: &mut Vec<Warning>,
    ) -> String {
        match ty {
            ColumnType::TinyInt(_) => "TINYINT".to_string(),
            ColumnType::SmallInt(_) => "SMALLINT".to_string(),
            ColumnType::Int(_) => "INT".to_string(),
            ColumnType::BigInt(_) => "BIGINT".to_string(),
            ColumnType::Decimal(spec) => format!("DECIMAL({}, {})", spec.precision, spec.scale),
            ColumnType::Float(_) => "REAL".to_string(),
            ColumnType::Double(_) => "FLOAT".to_string(),
            ColumnType::Char { length, varying } => {
                let keyword = if *varying { "VARCHAR" } else { "CHAR" };
                if *length > MAX_CHAR {
                    warnings.push(Warning::new(format!(
                        "column '{}' in table '{}': {} length {} exceeds {}, using VARCHAR(MAX)",
                        column, table, keyword, length, MAX_CHAR
                    )));
                    "VARCHAR(MAX)".to_string()
                } else {
                    format!("{}({})", keyword, length)
                }
            }
            ColumnType::Binary { length, varying } => {
                if *varying {
                    format!("VARBINARY({})", length)
                } else {
                    format!("BINARY({})", length)
                }
            }
            ColumnType::Blob { .. } => "VARBINARY(MAX)".to_string(),
            ColumnType::Clob { .. } => "VARCHAR(MAX)".to_string(),
            ColumnType::Date => "DATE".to_string(),
            ColumnType::Time { fractional } => {
                match clamp_fractional(*fractional, 7, table, column, warnings) {
                    Some(p) => format!("TIME({})", p),
                    None => "TIME".to_string(),
                }
            }
            ColumnType::DateTime { fractional } => {
                match clamp_fractional(*fractional, 7, table, column, warnings) {
                    Some(p) => format!("DATETIME2({})", p),
                    None => "DATETIME2".to_string(),
                }
            }
            ColumnType::Boolean => "BIT".to_string(),
            ColumnType::Enum { values } => {
                let width = values.iter().map(|v| v.len()).max().unwrap_or(1);
                format!("VARCHAR({})", width)
            }
        }
    }

    fn identity_strategy(&self) -> IdentityStrategy {
        IdentityStrategy::InlineKeyword("IDENTITY(1,1)")
    }

    fn enum_strategy(&self) -> EnumStrategy {
        EnumStrategy::CheckEmulation
    }

    fn hash_index_support(&self) -> HashIndexSupport {
        HashIndexSupport::None
    }

    fn binary_literal(&self, hex: &str) -> String {
        format!("0x{}", hex)
    }

    fn supports_on_delete(&self, action: RefAction) -> bool {
        action != RefAction::Restrict
    }

    fn supports_on_update(&self, action: RefAction) -> bool {
        action != RefAction::Restrict
    }

    fn boolean_literal(&self, value: bool) -> &'static str {
        if value {
            "1"
        } else {
            "0"
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::IntSpec;

    fn sql(ty: &ColumnType) -> (String, Vec<Warning>) {
        let mut warnings = Vec::new();
        let s = SqlServerDialect.type_sql("t", "c", ty, &mut warnings);
        (s, warnings)
    }

    #[test]
    fn test_native_tinyint() {
        assert_eq!(sql(&ColumnType::TinyInt(IntSpec::default())).0, "TINYINT");
    }

    #[test]
    fn test_datetime2_precision() {
        assert_eq!(
            sql(&ColumnType::DateTime { fractional: Some(7) }).0,
            "DATETIME2(7)"
        );
        let (s, warnings) = sql(&ColumnType::DateTime { fractional: Some(9) });
        assert_eq!(s, "DATETIME2(7)");
        assert_eq!(warnings.len(), 1);
    }

    #[test]
    fn test_oversized_char_becomes_max() {
        let ty = ColumnType::Char {
            length: 10_000,
            varying: true,
        };
        let (s, warnings) = sql(&ty);
        assert_eq!(s, "VARCHAR(MAX)");
        assert_eq!(warnings.len(), 1);
    }

    #[test]
    fn test_restrict_unsupported() {
        assert!(!SqlServerDialect.supports_on_delete(RefAction::Restrict));
        assert!(SqlServerDialect.supports_on_update(RefAction::Cascade));
    }
}
