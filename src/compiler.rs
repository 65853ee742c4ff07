//! Compilation pipeline.
//!
//! Merge -> validate -> dependency order -> per-table emission -> global
//! statement sequence. Pure and synchronous: no I/O, no mutation of the
//! input schema, so independent compiles of the same schema against
//! different vendors may run in parallel. Fatal errors abort before any
//! statement is produced; warnings never block output.

use std::collections::HashMap;

use log::debug;

use crate::dependency::dependency_order;
use crate::dialect::{Dialect, Vendor};
use crate::emit::table::compile_table;
use crate::error::{CompileError, Warning};
use crate::merge::merge_schema;
use crate::schema::Schema;
use crate::validate::validate_schema;

/// Whether a statement creates or destroys an object.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatementKind {
    Create,
    Drop,
}

/// One executable DDL statement, tagged with its kind and owning table.
#[derive(Debug, Clone, PartialEq)]
pub struct Statement {
    pub kind: StatementKind,
    /// The concrete table this statement belongs to (also for its auxiliary
    /// objects).
    pub table: String,
    pub sql: String,
}

/// The compiler's complete output.
#[derive(Debug)]
pub struct Compilation {
    /// All DROP statements in reverse topological order, then all CREATE
    /// statements in topological order.
    pub statements: Vec<Statement>,
    /// Diagnostic side-table: table name -> column count, in declaration
    /// order.
    pub column_counts: Vec<(String, usize)>,
    pub warnings: Vec<Warning>,
}

impl Compilation {
    pub fn create_statements(&self) -> impl Iterator<Item = &Statement> {
        self.statements
            .iter()
            .filter(|s| s.kind == StatementKind::Create)
    }

    pub fn drop_statements(&self) -> impl Iterator<Item = &Statement> {
        self.statements
            .iter()
            .filter(|s| s.kind == StatementKind::Drop)
    }
}

/// Schema compiler for one target vendor.
pub struct Compiler {
    vendor: Vendor,
    dialect: &'static dyn Dialect,
}

impl Compiler {
    pub fn new(vendor: Vendor) -> Self {
        Compiler {
            vendor,
            dialect: vendor.dialect(),
        }
    }

    pub fn vendor(&self) -> Vendor {
        self.vendor
    }

    /// Compile a raw schema into the ordered statement sequence.
    pub fn compile(&self, schema: &Schema) -> Result<Compilation, CompileError> {
        debug!(
            "compiling schema '{}' for {} ({} tables)",
            schema.name,
            self.vendor,
            schema.tables.len()
        );

        let merged = merge_schema(schema)?;
        let report = validate_schema(&merged)?;
        let order = dependency_order(&merged)?;

        let mut warnings = report.warnings;
        let mut column_counts = Vec::new();
        let mut artifacts = HashMap::new();

        for table in merged.concrete_tables() {
            column_counts.push((table.name.clone(), table.columns.len()));
            let compiled = compile_table(self.dialect, table, merged.compliance, &mut warnings)?;
            artifacts.insert(table.name.clone(), compiled);
        }

        let mut statements = Vec::new();
        for name in order.iter().rev() {
            let table = artifacts.get(name).expect("ordered table was compiled");
            for sql in &table.drops {
                statements.push(Statement {
                    kind: StatementKind::Drop,
                    table: name.clone(),
                    sql: sql.clone(),
                });
            }
        }
        for name in &order {
            let table = artifacts.get(name).expect("ordered table was compiled");
            for sql in &table.creates {
                statements.push(Statement {
                    kind: StatementKind::Create,
                    table: name.clone(),
                    sql: sql.clone(),
                });
            }
        }

        debug!(
            "compiled {} statements ({} warnings)",
            statements.len(),
            warnings.len()
        );
        Ok(Compilation {
            statements,
            column_counts,
            warnings,
        })
    }
}
