//! Table-level constraint compilation.
//!
//! Clauses are emitted in fixed order: unique constraints, check constraints
//! (explicit chains, synthesized numeric bounds, unsigned emulation, enum
//! emulation, inline column checks), primary key, foreign keys. Actions a
//! dialect cannot express are warned about and omitted rather than emitted
//! as invalid syntax.

use crate::dialect::{Dialect, EnumStrategy};
use crate::error::Warning;
use crate::schema::{Check, ColumnType, RefAction, Table};

use super::{literal, ConstraintClause};

/// Compile the constraint clauses for one table.
///
/// `suppress_primary_key` is set when the dialect's identity strategy already
/// encodes the primary key in the column declaration.
pub fn compile_constraints(
    dialect: &dyn Dialect,
    table: &Table,
    suppress_primary_key: bool,
    warnings: &mut Vec<Warning>,
) -> Vec<ConstraintClause> {
    let mut clauses = Vec::new();

    // Unique constraints, auto-named per dialect convention.
    if let Some(constraints) = &table.constraints {
        for (i, columns) in constraints.unique.iter().enumerate() {
            clauses.push(ConstraintClause::Unique {
                name: dialect.unique_constraint_name(&table.name, i + 1),
                columns: columns.clone(),
            });
        }
    }

    // Explicit checks: each AND/OR chain flattens into one parenthesized
    // boolean expression.
    if let Some(constraints) = &table.constraints {
        for check in &constraints.checks {
            clauses.push(ConstraintClause::Check {
                expression: flatten_check(check),
            });
        }
    }

    // Implicit checks synthesized from the column types.
    for column in &table.columns {
        for expression in synthesize_column_checks(dialect, table, column, warnings) {
            clauses.push(ConstraintClause::Check { expression });
        }
    }

    // Primary key, unless the identity keyword already encodes it.
    if !suppress_primary_key {
        if let Some(pk) = table.primary_key() {
            clauses.push(ConstraintClause::PrimaryKey {
                columns: pk.to_vec(),
            });
        }
    }

    // Table-level foreign keys, then inline column references, in
    // declaration order.
    if let Some(constraints) = &table.constraints {
        for fk in &constraints.foreign_keys {
            clauses.push(ConstraintClause::ForeignKey {
                columns: fk.columns.clone(),
                ref_table: fk.ref_table.clone(),
                ref_columns: fk.ref_columns.clone(),
                on_delete: filter_action(dialect, table, fk.on_delete, ActionKind::Delete, warnings),
                on_update: filter_action(dialect, table, fk.on_update, ActionKind::Update, warnings),
            });
        }
    }
    for column in &table.columns {
        if let Some(fk) = &column.references {
            clauses.push(ConstraintClause::ForeignKey {
                columns: vec![column.name.clone()],
                ref_table: fk.table.clone(),
                ref_columns: vec![fk.column.clone()],
                on_delete: filter_action(dialect, table, fk.on_delete, ActionKind::Delete, warnings),
                on_update: filter_action(dialect, table, fk.on_update, ActionKind::Update, warnings),
            });
        }
    }

    clauses
}

/// Checks synthesized from a single column: numeric min/max bounds, the
/// non-negative check standing in for unsupported unsigned types, enum
/// membership emulation, and the inline check spec.
fn synthesize_column_checks(
    dialect: &dyn Dialect,
    table: &Table,
    column: &crate::schema::Column,
    warnings: &mut Vec<Warning>,
) -> Vec<String> {
    let mut checks = Vec::new();
    let name = &column.name;

    match &column.ty {
        ColumnType::TinyInt(spec)
        | ColumnType::SmallInt(spec)
        | ColumnType::Int(spec)
        | ColumnType::BigInt(spec) => {
            if let Some(min) = spec.min {
                checks.push(format!("{} >= {}", name, min));
            }
            if let Some(max) = spec.max {
                checks.push(format!("{} <= {}", name, max));
            }
            if spec.unsigned && !dialect.supports_unsigned() {
                warnings.push(Warning::new(format!(
                    "column '{}' in table '{}': {} has no unsigned types, adding a non-negative check",
                    name,
                    table.name,
                    dialect.vendor()
                )));
                checks.push(format!("{} >= 0", name));
            }
        }
        ColumnType::Decimal(spec) => {
            if let Some(min) = spec.min {
                checks.push(format!("{} >= {}", name, min));
            }
            if let Some(max) = spec.max {
                checks.push(format!("{} <= {}", name, max));
            }
            if spec.unsigned && !dialect.supports_unsigned() {
                warnings.push(Warning::new(format!(
                    "column '{}' in table '{}': {} has no unsigned types, adding a non-negative check",
                    name,
                    table.name,
                    dialect.vendor()
                )));
                checks.push(format!("{} >= 0", name));
            }
        }
        ColumnType::Float(spec) | ColumnType::Double(spec) => {
            if let Some(min) = spec.min {
                checks.push(format!("{} >= {}", name, min));
            }
            if let Some(max) = spec.max {
                checks.push(format!("{} <= {}", name, max));
            }
            if spec.unsigned && !dialect.supports_unsigned() {
                checks.push(format!("{} >= 0", name));
            }
        }
        ColumnType::Enum { values } => {
            if dialect.enum_strategy() == EnumStrategy::CheckEmulation {
                let quoted: Vec<String> = values
                    .iter()
                    .map(|v| format!("'{}'", v.replace('\'', "''")))
                    .collect();
                checks.push(format!("{} IN ({})", name, quoted.join(", ")));
            }
        }
        _ => {}
    }

    if let Some(check) = &column.check {
        checks.push(format!("{} {} {}", name, check.op.sql(), literal(&check.value)));
    }

    checks
}

/// Render a recursive AND/OR check chain as one expression.
///
/// Chains are right-nested: `a AND (b OR c)`, not `(a AND b) OR c`. A flat
/// rendering would hand that grouping over to SQL's AND-binds-tighter
/// precedence, so the remainder is parenthesized whenever the chain mixes
/// operators.
pub fn flatten_check(check: &Check) -> String {
    let head = format!(
        "{} {} {}",
        check.column,
        check.op.sql(),
        literal(&check.value)
    );
    let Some((op, rest)) = &check.chain else {
        return head;
    };
    let tail = flatten_check(rest);
    let mixes = rest
        .chain
        .as_ref()
        .is_some_and(|(next_op, _)| next_op != op);
    if mixes {
        format!("{} {} ({})", head, op.sql(), tail)
    } else {
        format!("{} {} {}", head, op.sql(), tail)
    }
}

#[derive(Clone, Copy)]
enum ActionKind {
    Delete,
    Update,
}

/// Drop a referential action the dialect cannot express, with a warning.
fn filter_action(
    dialect: &dyn Dialect,
    table: &Table,
    action: Option<RefAction>,
    kind: ActionKind,
    warnings: &mut Vec<Warning>,
) -> Option<RefAction> {
    let action = action?;
    let (supported, label) = match kind {
        ActionKind::Delete => (dialect.supports_on_delete(action), "ON DELETE"),
        ActionKind::Update => (dialect.supports_on_update(action), "ON UPDATE"),
    };
    if supported {
        Some(action)
    } else {
        warnings.push(Warning::new(format!(
            "table '{}': {} does not support {} {}, action omitted",
            table.name,
            dialect.vendor(),
            label,
            action.sql()
        )));
        None
    }
}
