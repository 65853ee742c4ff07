//! Oracle dialect.
//!
//! Integers render as sized NUMBER(p); identity is emulated with a sequence
//! plus a BEFORE INSERT trigger; TIME does not exist and is widened to
//! TIMESTAMP; referential actions are limited to ON DELETE CASCADE/SET NULL.

use crate::error::Warning;
use crate::schema::{ColumnType, RefAction};

use super::{
    clamp_fractional, int_digits, Dialect, EnumStrategy, HashIndexSupport, IdentityStrategy,
    Vendor,
};

pub struct OracleDialect;

const MAX_VARCHAR2: u32 = 4000;

impl Dialect for OracleDialect {
    fn vendor(&self) -> Vendor {
        Vendor::Oracle
    }

    fn type_sql(
        &self,
        table: &str,
        column: &str,
        ty: &ColumnType,
        warnings: &mut Vec<Warning>,
    ) -> String {
        match ty {
            ColumnType::TinyInt(_)
            | ColumnType::SmallInt(_)
            | ColumnType::Int(_)
            | ColumnType::BigInt(_) => format!("NUMBER({})", int_digits(ty)),
            ColumnType::Decimal(spec) => format!("NUMBER({}, {})", spec.precision, spec.scale),
            ColumnType::Float(_) => "BINARY_FLOAT".to_string(),
            ColumnType::Double(_) => "BINARY_DOUBLE".to_string(),
            ColumnType::Char { length, varying } => {
                if *varying {
                    let len = (*length).min(MAX_VARCHAR2);
                    if len != *length {
                        warnings.push(Warning::new(format!(
                            "column '{}' in table '{}': VARCHAR2 length {} exceeds {}, clamped",
                            column, table, length, MAX_VARCHAR2
                        )));
                    }
                    format!("VARCHAR2({})", len)
                } else {
                    format!("CHAR({})", length)
                }
            }
            ColumnType::Binary { length, .. } => format!("RAW({})", length),
            ColumnType::Blob { .. } => "BLOB".to_string(),
            ColumnType::Clob { .. } => "CLOB".to_string(),
            ColumnType::Date => "DATE".to_string(),
            ColumnType::Time { fractional } => {
                warnings.push(Warning::new(format!(
                    "column '{}' in table '{}': Oracle has no TIME type, widened to TIMESTAMP",
                    column, table
                )));
                match clamp_fractional(*fractional, 9, table, column, warnings) {
                    Some(p) => format!("TIMESTAMP({})", p),
                    None => "TIMESTAMP".to_string(),
                }
            }
            ColumnType::DateTime { fractional } => {
                match clamp_fractional(*fractional, 9, table, column, warnings) {
                    Some(p) => format!("TIMESTAMP({})", p),
                    None => "TIMESTAMP".to_string(),
                }
            }
            // No boolean column type before 23c; NUMBER(1) is the convention.
            ColumnType::Boolean => "NUMBER(1)".to_string(),
            ColumnType::Enum { values } => {
                let width = values.iter().map(|v| v.len()).max().unwrap_or(1);
                format!("VARCHAR2({})", width)
            }
        }
    }

    fn identity_strategy(&self) -> IdentityStrategy {
        IdentityStrategy::SequenceTrigger
    }

    fn enum_strategy(&self) -> EnumStrategy {
        EnumStrategy::CheckEmulation
    }

    fn hash_index_support(&self) -> HashIndexSupport {
        HashIndexSupport::None
    }

    fn supports_on_delete(&self, action: RefAction) -> bool {
        matches!(
            action,
            RefAction::NoAction | RefAction::Cascade | RefAction::SetNull
        )
    }

    fn supports_on_update(&self, _action: RefAction) -> bool {
        false
    }

    fn boolean_literal(&self, value: bool) -> &'static str {
        if value {
            "1"
        } else {
            "0"
        }
    }
}
