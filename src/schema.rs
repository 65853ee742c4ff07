//! Vendor-neutral schema model.
//!
//! This is the input to the compiler: a parsed, in-memory description of
//! tables, columns, constraints, indexes and triggers. The model is plain
//! data with serde derives so an already-parsed schema can be handed in as
//! JSON; no SQL knowledge lives here.

use serde::{Deserialize, Serialize};

/// How strictly naming rules are enforced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComplianceMode {
    /// Naming violations are fatal.
    #[default]
    Strict,
    /// Naming violations are reported as warnings and compilation proceeds.
    Lenient,
}

/// A complete schema: an ordered list of tables plus compile policy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Schema {
    pub name: String,
    #[serde(default)]
    pub compliance: ComplianceMode,
    pub tables: Vec<Table>,
}

impl Schema {
    /// Look up a table by name.
    pub fn table(&self, name: &str) -> Option<&Table> {
        self.tables.iter().find(|t| t.name == name)
    }

    /// Tables that actually produce DDL: non-abstract and not skipped.
    pub fn concrete_tables(&self) -> impl Iterator<Item = &Table> {
        self.tables.iter().filter(|t| t.is_concrete())
    }
}

/// A single table definition.
///
/// `constraints` and `indexes` are `Option` on purpose: the inheritance merge
/// treats "declares no block" (adopt the ancestor's block wholesale)
/// differently from "declares a block" (append the ancestor's entries).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Table {
    pub name: String,
    /// Template table: contributes columns/constraints to descendants but
    /// never produces DDL itself.
    #[serde(default, rename = "abstract")]
    pub abstract_table: bool,
    /// Excluded from generation without being an error.
    #[serde(default)]
    pub skip: bool,
    /// Name of an abstract ancestor whose definition this table inherits.
    #[serde(default)]
    pub extends: Option<String>,
    pub columns: Vec<Column>,
    #[serde(default)]
    pub constraints: Option<Constraints>,
    #[serde(default)]
    pub indexes: Option<Vec<Index>>,
    #[serde(default)]
    pub triggers: Vec<Trigger>,
}

impl Table {
    pub fn is_concrete(&self) -> bool {
        !self.abstract_table && !self.skip
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// The primary key column list, if a constraints block declares one.
    pub fn primary_key(&self) -> Option<&[String]> {
        self.constraints
            .as_ref()
            .and_then(|c| c.primary_key.as_deref())
    }
}

/// A column: a name, a type variant, and optional inline specs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Column {
    pub name: String,
    #[serde(default)]
    pub nullable: bool,
    /// Default value carried as a literal; validated against the type before
    /// emission.
    #[serde(default)]
    pub default: Option<String>,
    #[serde(rename = "type")]
    pub ty: ColumnType,
    /// Inline single-column check (operator + literal).
    #[serde(default)]
    pub check: Option<ColumnCheck>,
    /// Inline foreign-key reference.
    #[serde(default)]
    pub references: Option<ForeignKeyRef>,
    /// Inline index spec.
    #[serde(default)]
    pub index: Option<InlineIndex>,
}

impl Column {
    /// Whether this column is identity-generated (auto-increment).
    pub fn is_identity(&self) -> bool {
        matches!(
            &self.ty,
            ColumnType::TinyInt(s)
                | ColumnType::SmallInt(s)
                | ColumnType::Int(s)
                | ColumnType::BigInt(s)
                if s.identity
        )
    }
}

/// Numeric spec shared by the integer variants.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct IntSpec {
    /// Decimal digit count, when declared.
    #[serde(default)]
    pub precision: Option<u32>,
    #[serde(default)]
    pub unsigned: bool,
    #[serde(default)]
    pub min: Option<i128>,
    #[serde(default)]
    pub max: Option<i128>,
    /// Value generated by the database on insert.
    #[serde(default)]
    pub identity: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecimalSpec {
    pub precision: u32,
    #[serde(default)]
    pub scale: u32,
    #[serde(default)]
    pub unsigned: bool,
    #[serde(default)]
    pub min: Option<f64>,
    #[serde(default)]
    pub max: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RealSpec {
    #[serde(default)]
    pub unsigned: bool,
    #[serde(default)]
    pub min: Option<f64>,
    #[serde(default)]
    pub max: Option<f64>,
}

/// The closed set of column type variants.
///
/// Every consumer (type rendering, default validation, constraint synthesis)
/// matches exhaustively, so adding a variant is a compile-time-visible change
/// everywhere it matters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnType {
    TinyInt(IntSpec),
    SmallInt(IntSpec),
    Int(IntSpec),
    BigInt(IntSpec),
    Decimal(DecimalSpec),
    Float(RealSpec),
    Double(RealSpec),
    Char {
        length: u32,
        #[serde(default)]
        varying: bool,
    },
    Binary {
        length: u32,
        #[serde(default)]
        varying: bool,
    },
    Blob {
        #[serde(default)]
        length: Option<u64>,
    },
    Clob {
        #[serde(default)]
        length: Option<u64>,
    },
    Date,
    Time {
        /// Fractional-second precision.
        #[serde(default)]
        fractional: Option<u32>,
    },
    DateTime {
        #[serde(default)]
        fractional: Option<u32>,
    },
    Boolean,
    Enum {
        values: Vec<String>,
    },
}

impl ColumnType {
    /// Short lowercase name used in diagnostics.
    pub fn kind_name(&self) -> &'static str {
        match self {
            ColumnType::TinyInt(_) => "tinyint",
            ColumnType::SmallInt(_) => "smallint",
            ColumnType::Int(_) => "int",
            ColumnType::BigInt(_) => "bigint",
            ColumnType::Decimal(_) => "decimal",
            ColumnType::Float(_) => "float",
            ColumnType::Double(_) => "double",
            ColumnType::Char { .. } => "char",
            ColumnType::Binary { .. } => "binary",
            ColumnType::Blob { .. } => "blob",
            ColumnType::Clob { .. } => "clob",
            ColumnType::Date => "date",
            ColumnType::Time { .. } => "time",
            ColumnType::DateTime { .. } => "datetime",
            ColumnType::Boolean => "boolean",
            ColumnType::Enum { .. } => "enum",
        }
    }

    pub fn int_spec(&self) -> Option<&IntSpec> {
        match self {
            ColumnType::TinyInt(s)
            | ColumnType::SmallInt(s)
            | ColumnType::Int(s)
            | ColumnType::BigInt(s) => Some(s),
            _ => None,
        }
    }
}

/// Binary comparison operators allowed in check expressions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CompareOp {
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
}

impl CompareOp {
    pub fn sql(&self) -> &'static str {
        match self {
            CompareOp::Eq => "=",
            CompareOp::Ne => "<>",
            CompareOp::Lt => "<",
            CompareOp::Le => "<=",
            CompareOp::Gt => ">",
            CompareOp::Ge => ">=",
        }
    }
}

/// Inline single-column check: `column <op> value`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnCheck {
    pub op: CompareOp,
    pub value: String,
}

/// Referential actions for ON DELETE / ON UPDATE.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RefAction {
    NoAction,
    Restrict,
    Cascade,
    SetNull,
    SetDefault,
}

impl RefAction {
    pub fn sql(&self) -> &'static str {
        match self {
            RefAction::NoAction => "NO ACTION",
            RefAction::Restrict => "RESTRICT",
            RefAction::Cascade => "CASCADE",
            RefAction::SetNull => "SET NULL",
            RefAction::SetDefault => "SET DEFAULT",
        }
    }
}

/// Inline single-column foreign key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForeignKeyRef {
    pub table: String,
    pub column: String,
    #[serde(default)]
    pub on_delete: Option<RefAction>,
    #[serde(default)]
    pub on_update: Option<RefAction>,
}

/// Table-level constraints block.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Constraints {
    /// Ordered primary-key column list; at most one per table.
    #[serde(default)]
    pub primary_key: Option<Vec<String>>,
    /// Unique column sets.
    #[serde(default)]
    pub unique: Vec<Vec<String>>,
    #[serde(default)]
    pub foreign_keys: Vec<ForeignKey>,
    #[serde(default)]
    pub checks: Vec<Check>,
}

/// Multi-column foreign key preserving column ordering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForeignKey {
    pub columns: Vec<String>,
    pub ref_table: String,
    pub ref_columns: Vec<String>,
    #[serde(default)]
    pub on_delete: Option<RefAction>,
    #[serde(default)]
    pub on_update: Option<RefAction>,
}

/// AND/OR connective between chained checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BoolOp {
    And,
    Or,
}

impl BoolOp {
    pub fn sql(&self) -> &'static str {
        match self {
            BoolOp::And => "AND",
            BoolOp::Or => "OR",
        }
    }
}

/// Table-level check expression: a binary comparison, optionally chained
/// into another check via AND/OR, recursively.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Check {
    pub column: String,
    pub op: CompareOp,
    pub value: String,
    #[serde(default)]
    pub chain: Option<(BoolOp, Box<Check>)>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IndexKind {
    BTree,
    Hash,
}

/// Table-level index.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Index {
    pub kind: IndexKind,
    #[serde(default)]
    pub unique: bool,
    pub columns: Vec<String>,
}

/// Inline per-column index spec.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InlineIndex {
    pub kind: IndexKind,
    #[serde(default)]
    pub unique: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TriggerTiming {
    Before,
    After,
}

impl TriggerTiming {
    pub fn sql(&self) -> &'static str {
        match self {
            TriggerTiming::Before => "BEFORE",
            TriggerTiming::After => "AFTER",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TriggerEvent {
    Insert,
    Update,
    Delete,
}

impl TriggerEvent {
    pub fn sql(&self) -> &'static str {
        match self {
            TriggerEvent::Insert => "INSERT",
            TriggerEvent::Update => "UPDATE",
            TriggerEvent::Delete => "DELETE",
        }
    }
}

/// User-declared trigger carried through to the target engine verbatim.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trigger {
    #[serde(default)]
    pub name: Option<String>,
    pub timing: TriggerTiming,
    pub events: Vec<TriggerEvent>,
    pub body: String,
}

impl Trigger {
    /// Trigger name, defaulting to `<table>_trg_<n>` when unnamed.
    pub fn object_name(&self, table: &str, ordinal: usize) -> String {
        match &self.name {
            Some(n) => n.clone(),
            None => format!("{}_trg_{}", table, ordinal),
        }
    }
}
