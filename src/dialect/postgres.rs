//! PostgreSQL dialect.
//!
//! Identity via `GENERATED BY DEFAULT AS IDENTITY`; enums become named type
//! objects created before the table; no unsigned integers (downgraded to a
//! synthesized CHECK); hash indexes are single-column only.

use crate::error::Warning;
use crate::schema::ColumnType;

use super::{
    clamp_fractional, Dialect, EnumStrategy, HashIndexSupport, IdentityStrategy, Vendor,
};

pub struct PostgresDialect;

impl Dialect for PostgresDialect {
    fn vendor(&self) -> Vendor {
        Vendor::Postgres
    }

    fn type_sql(
        &self,
        table: &str,
        column: &str,
        ty: &ColumnType,
        warnings: &mut Vec<Warning>,
    ) -> String {
        match ty {
            // No TINYINT: the narrowest integer is SMALLINT.
            ColumnType::TinyInt(_) | ColumnType::SmallInt(_) => "SMALLINT".to_string(),
            ColumnType::Int(_) => "INTEGER".to_string(),
            ColumnType::BigInt(_) => "BIGINT".to_string(),
            ColumnType::Decimal(spec) => format!("NUMERIC({}, {})", spec.precision, spec.scale),
            ColumnType::Float(_) => "REAL".to_string(),
            ColumnType::Double(_) => "DOUBLE PRECISION".to_string(),
            ColumnType::Char { length, varying } => {
                if *varying {
                    format!("VARCHAR({})", length)
                } else {
                    format!("CHAR({})", length)
                }
            }
            ColumnType::Binary { varying, .. } => {
                if !*varying {
                    warnings.push(Warning::new(format!(
                        "column '{}' in table '{}': PostgreSQL has no fixed-length binary type, using BYTEA",
                        column, table
                    )));
                }
                "BYTEA".to_string()
            }
            ColumnType::Blob { .. } => "BYTEA".to_string(),
            ColumnType::Clob { .. } => "TEXT".to_string(),
            ColumnType::Date => "DATE".to_string(),
            ColumnType::Time { fractional } => {
                match clamp_fractional(*fractional, 6, table, column, warnings) {
                    Some(p) => format!("TIME({})", p),
                    None => "TIME".to_string(),
                }
            }
            ColumnType::DateTime { fractional } => {
                match clamp_fractional(*fractional, 6, table, column, warnings) {
                    Some(p) => format!("TIMESTAMP({})", p),
                    None => "TIMESTAMP".to_string(),
                }
            }
            ColumnType::Boolean => "BOOLEAN".to_string(),
            ColumnType::Enum { .. } => self.enum_type_name(table, column),
        }
    }

    fn identity_strategy(&self) -> IdentityStrategy {
        IdentityStrategy::InlineKeyword("GENERATED BY DEFAULT AS IDENTITY")
    }

    fn enum_strategy(&self) -> EnumStrategy {
        EnumStrategy::NamedType
    }

    fn hash_index_support(&self) -> HashIndexSupport {
        HashIndexSupport::SingleColumn
    }

    fn binary_literal(&self, hex: &str) -> String {
        format!("'\\x{}'", hex)
    }

    fn render_drop_trigger(&self, name: &str, table: &str) -> String {
        // Trigger names are scoped to their table.
        format!("DROP TRIGGER {} ON {}", name, table)
    }

    fn render_create_index(
        &self,
        name: &str,
        table: &str,
        columns: &[String],
        unique: bool,
        hash: bool,
    ) -> String {
        // USING goes between the table name and the column list.
        let uniq = if unique { "UNIQUE " } else { "" };
        let using = if hash { " USING HASH" } else { "" };
        format!(
            "CREATE {}INDEX {} ON {}{} ({})",
            uniq,
            name,
            table,
            using,
            columns.join(", ")
        )
    }
}
