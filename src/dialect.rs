//! Vendor dialect strategies.
//!
//! Each supported engine implements [`Dialect`]: a fixed table of pure
//! rendering rules, not a discovered plugin set. The vendor -> strategy
//! mapping is an explicit compile-time-checked match reached through a
//! once-initialized registry, so adding or removing a vendor is visible to
//! the compiler and an unknown vendor is a checked error.

pub mod mysql;
pub mod oracle;
pub mod postgres;
pub mod sqlite;
pub mod sqlserver;

use std::collections::HashMap;
use std::str::FromStr;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::error::{CompileError, Warning};
use crate::schema::{ColumnType, RefAction};

/// Target database engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Vendor {
    Postgres,
    Mysql,
    Sqlite,
    Oracle,
    SqlServer,
}

impl Vendor {
    pub const ALL: [Vendor; 5] = [
        Vendor::Postgres,
        Vendor::Mysql,
        Vendor::Sqlite,
        Vendor::Oracle,
        Vendor::SqlServer,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Vendor::Postgres => "postgres",
            Vendor::Mysql => "mysql",
            Vendor::Sqlite => "sqlite",
            Vendor::Oracle => "oracle",
            Vendor::SqlServer => "sqlserver",
        }
    }

    /// The dialect strategy for this vendor.
    pub fn dialect(&self) -> &'static dyn Dialect {
        REGISTRY
            .get(self)
            .map(|d| d.as_ref())
            .expect("registry covers every vendor")
    }
}

impl FromStr for Vendor {
    type Err = CompileError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "postgres" | "postgresql" | "pg" => Ok(Vendor::Postgres),
            "mysql" | "mariadb" => Ok(Vendor::Mysql),
            "sqlite" | "sqlite3" => Ok(Vendor::Sqlite),
            "oracle" => Ok(Vendor::Oracle),
            "sqlserver" | "mssql" => Ok(Vendor::SqlServer),
            other => Err(CompileError::UnknownVendor(other.to_string())),
        }
    }
}

impl std::fmt::Display for Vendor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// How an engine expresses identity (auto-increment) columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdentityStrategy {
    /// A keyword appended to the column declaration.
    InlineKeyword(&'static str),
    /// A keyword that fuses identity into the primary-key declaration,
    /// suppressing the separate table-level PRIMARY KEY clause.
    PrimaryKeyKeyword(&'static str),
    /// A sequence object plus a BEFORE INSERT trigger pulling the next value.
    SequenceTrigger,
}

/// How an engine expresses enum columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnumStrategy {
    /// A named type object created before the table (PostgreSQL).
    NamedType,
    /// Inline ENUM('a', 'b') syntax (MySQL).
    Inline,
    /// Character column plus a synthesized CHECK ... IN constraint.
    CheckEmulation,
}

/// Hash index support levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HashIndexSupport {
    None,
    SingleColumn,
    Composite,
}

/// Per-vendor rendering rules. Implementations are stateless unit structs;
/// anything that may need to downgrade pushes a [`Warning`] instead of
/// emitting invalid syntax.
pub trait Dialect: Send + Sync {
    fn vendor(&self) -> Vendor;

    /// Render the SQL type fragment for a column type, honoring the engine's
    /// supported precision ranges. `table`/`column` feed diagnostics and
    /// derived object names (named enum types).
    fn type_sql(
        &self,
        table: &str,
        column: &str,
        ty: &ColumnType,
        warnings: &mut Vec<Warning>,
    ) -> String;

    fn identity_strategy(&self) -> IdentityStrategy;

    fn enum_strategy(&self) -> EnumStrategy {
        EnumStrategy::CheckEmulation
    }

    fn hash_index_support(&self) -> HashIndexSupport {
        HashIndexSupport::None
    }

    /// Whether the engine has native unsigned integer types. Without them,
    /// unsigned columns are downgraded to a synthesized non-negative CHECK.
    fn supports_unsigned(&self) -> bool {
        false
    }

    fn supports_on_delete(&self, _action: RefAction) -> bool {
        true
    }

    fn supports_on_update(&self, _action: RefAction) -> bool {
        true
    }

    fn boolean_literal(&self, value: bool) -> &'static str {
        if value {
            "TRUE"
        } else {
            "FALSE"
        }
    }

    /// Render a binary default from validated hex digits.
    fn binary_literal(&self, hex: &str) -> String {
        format!("X'{}'", hex)
    }

    fn unique_constraint_name(&self, table: &str, ordinal: usize) -> String {
        format!("{}_unique_{}", table, ordinal)
    }

    /// Name of the auxiliary enum type object, when `EnumStrategy::NamedType`.
    fn enum_type_name(&self, table: &str, column: &str) -> String {
        format!("{}_{}_type", table, column)
    }

    /// Names of the identity sequence/trigger pair, when
    /// `IdentityStrategy::SequenceTrigger`.
    fn sequence_name(&self, table: &str, column: &str) -> String {
        format!("{}_{}_seq", table, column)
    }

    fn identity_trigger_name(&self, table: &str, column: &str) -> String {
        format!("{}_{}_trg", table, column)
    }

    /// Render a DROP TRIGGER statement; some engines scope the trigger name
    /// to its table.
    fn render_drop_trigger(&self, name: &str, _table: &str) -> String {
        format!("DROP TRIGGER {}", name)
    }

    /// Render a CREATE INDEX statement. `hash` is only passed when the
    /// support level allows it; placement of the USING clause differs per
    /// engine, hence the hook.
    fn render_create_index(
        &self,
        name: &str,
        table: &str,
        columns: &[String],
        unique: bool,
        hash: bool,
    ) -> String {
        let uniq = if unique { "UNIQUE " } else { "" };
        let using = if hash { " USING HASH" } else { "" };
        format!(
            "CREATE {}INDEX {} ON {} ({}){}",
            uniq,
            name,
            table,
            columns.join(", "),
            using
        )
    }
}

/// The once-built, read-only vendor -> strategy table. `Lazy` gives the
/// single initialization barrier; afterwards concurrent compiles share it
/// freely.
static REGISTRY: Lazy<HashMap<Vendor, Box<dyn Dialect>>> = Lazy::new(|| {
    let mut map: HashMap<Vendor, Box<dyn Dialect>> = HashMap::new();
    map.insert(Vendor::Postgres, Box::new(postgres::PostgresDialect));
    map.insert(Vendor::Mysql, Box::new(mysql::MysqlDialect));
    map.insert(Vendor::Sqlite, Box::new(sqlite::SqliteDialect));
    map.insert(Vendor::Oracle, Box::new(oracle::OracleDialect));
    map.insert(Vendor::SqlServer, Box::new(sqlserver::SqlServerDialect));
    map
});

/// Clamp a fractional-second precision into the engine's range, warning when
/// the requested value was cut down.
pub(crate) fn clamp_fractional(
    requested: Option<u32>,
    max: u32,
    table: &str,
    column: &str,
    warnings: &mut Vec<Warning>,
) -> Option<u32> {
    match requested {
        Some(p) if p > max => {
            warnings.push(Warning::new(format!(
                "column '{}' in table '{}': fractional precision {} exceeds engine maximum {}, clamped",
                column, table, p, max
            )));
            Some(max)
        }
        other => other,
    }
}

/// Default decimal digit counts for integer variants when no precision is
/// declared. Used by engines that render integers as sized numerics.
pub(crate) fn int_digits(ty: &ColumnType) -> u32 {
    match ty {
        ColumnType::TinyInt(s) => s.precision.unwrap_or(3),
        ColumnType::SmallInt(s) => s.precision.unwrap_or(5),
        ColumnType::Int(s) => s.precision.unwrap_or(10),
        ColumnType::BigInt(s) => s.precision.unwrap_or(19),
        _ => 0,
    }
}
