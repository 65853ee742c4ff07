//! SQLite dialect.
//!
//! Types are affinities; identity fuses into the primary-key declaration
//! (`INTEGER PRIMARY KEY AUTOINCREMENT`), which suppresses the separate
//! table-level PRIMARY KEY clause. No hash indexes, no unsigned.

use crate::error::Warning;
use crate::schema::ColumnType;

use super::{Dialect, EnumStrategy, HashIndexSupport, IdentityStrategy, Vendor};

pub struct SqliteDialect;

impl Dialect for SqliteDialect {
    fn vendor(&self) -> Vendor {
        Vendor::Sqlite
    }

    fn type_sql(
        &self,
        _table: &str,
        _column: &str,
        ty: &ColumnType,
        _warnings: &mut Vec<Warning>,
    ) -> String {
        match ty {
            // All integers share the INTEGER affinity; AUTOINCREMENT requires
            // the bare keyword.
            ColumnType::TinyInt(_)
            | ColumnType::SmallInt(_)
            | ColumnType::Int(_)
            | ColumnType::BigInt(_) => "INTEGER".to_string(),
            ColumnType::Decimal(spec) => format!("NUMERIC({}, {})", spec.precision, spec.scale),
            ColumnType::Float(_) | ColumnType::Double(_) => "REAL".to_string(),
            ColumnType::Char { length, varying } => {
                if *varying {
                    format!("VARCHAR({})", length)
                } else {
                    format!("CHAR({})", length)
                }
            }
            ColumnType::Binary { .. } | ColumnType::Blob { .. } => "BLOB".to_string(),
            ColumnType::Clob { .. } => "TEXT".to_string(),
            ColumnType::Date => "DATE".to_string(),
            ColumnType::Time { .. } => "TIME".to_string(),
            ColumnType::DateTime { .. } => "TIMESTAMP".to_string(),
            ColumnType::Boolean => "BOOLEAN".to_string(),
            // CHECK ... IN is synthesized by the constraint compiler.
            ColumnType::Enum { values } => {
                let width = values.iter().map(|v| v.len()).max().unwrap_or(1);
                format!("VARCHAR({})", width)
            }
        }
    }

    fn identity_strategy(&self) -> IdentityStrategy {
        IdentityStrategy::PrimaryKeyKeyword("PRIMARY KEY AUTOINCREMENT")
    }

    fn enum_strategy(&self) -> EnumStrategy {
        EnumStrategy::CheckEmulation
    }

    fn hash_index_support(&self) -> HashIndexSupport {
        HashIndexSupport::None
    }

    fn boolean_literal(&self, value: bool) -> &'static str {
        if value {
            "1"
        } else {
            "0"
        }
    }
}
