//! Compiler error and warning types.
//!
//! Three severities, mirroring how fatality interacts with compliance mode:
//! - [`StructuralError`]: always fatal regardless of mode.
//! - [`ValidationError`]: fatal under `strict`, downgraded to warnings under
//!   `lenient`.
//! - [`Warning`]: never fatal; covers dialect feature downgrades and
//!   lenient-mode validation findings.
//!
//! Every fatal error names the schema element responsible; cycle errors carry
//! the full ordered path.

use thiserror::Error;

/// Always-fatal schema structure problems.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum StructuralError {
    #[error("duplicate table name '{0}' in schema")]
    DuplicateTable(String),

    #[error("duplicate column name '{column}' in table '{table}'")]
    DuplicateColumn { table: String, column: String },

    #[error("table '{table}' extends '{target}' which does not exist")]
    MissingAncestor { table: String, target: String },

    #[error("table '{table}' extends '{target}' which is not abstract")]
    AncestorNotAbstract { table: String, target: String },

    #[error("inheritance cycle: {}", path.join(" -> "))]
    ExtendsCycle { path: Vec<String> },

    #[error("foreign key in table '{table}' references unknown table '{target}'")]
    UnknownForeignTable { table: String, target: String },

    #[error("foreign key dependency cycle: {}", path.join(" -> "))]
    DependencyCycle { path: Vec<String> },
}

/// Violations that are fatal only under strict compliance.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("table '{table}' has no primary key")]
    MissingPrimaryKey { table: String },

    #[error("primary key column '{column}' in table '{table}' is nullable")]
    NullablePrimaryKeyColumn { table: String, column: String },

    #[error("primary key of table '{table}' names unknown column '{column}'")]
    UnknownPrimaryKeyColumn { table: String, column: String },

    #[error("name '{name}' ({context}) is a reserved word in {standards}")]
    ReservedWord {
        name: String,
        /// "table" or "column of <table>".
        context: String,
        /// Comma-joined standard tags the word is reserved in.
        standards: String,
    },

    #[error("{violations} naming violation(s) under strict compliance:\n{details}")]
    NamingViolations { violations: usize, details: String },

    #[error("{violations} primary key violation(s) under strict compliance:\n{details}")]
    PrimaryKeyViolations { violations: usize, details: String },

    #[error(
        "default '{value}' for column '{column}' in table '{table}' exceeds {bound}"
    )]
    DefaultOutOfBounds {
        table: String,
        column: String,
        value: String,
        /// Human description of the violated bound, e.g. "precision 3 digits"
        /// or "length 10".
        bound: String,
    },

    #[error(
        "default '{value}' for column '{column}' in table '{table}' is not a valid {expected}"
    )]
    DefaultMalformed {
        table: String,
        column: String,
        value: String,
        expected: String,
    },
}

/// Non-fatal findings: dialect feature downgrades and lenient-mode
/// validation results.
#[derive(Debug, Clone, PartialEq)]
pub struct Warning {
    pub message: String,
}

impl Warning {
    pub fn new(message: impl Into<String>) -> Self {
        Warning {
            message: message.into(),
        }
    }

    /// Wrap a lenient-mode validation finding.
    pub fn from_validation(err: &ValidationError) -> Self {
        Warning {
            message: err.to_string(),
        }
    }
}

impl std::fmt::Display for Warning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

/// Top-level compile failure.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CompileError {
    #[error("structural error: {0}")]
    Structural(#[from] StructuralError),

    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("unknown vendor '{0}' (expected one of: postgres, mysql, sqlite, oracle, sqlserver)")]
    UnknownVendor(String),
}
