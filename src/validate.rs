//! Schema validation over the merged schema.
//!
//! Two kinds of findings come out of here:
//! - structural problems (duplicate names) are fatal regardless of mode;
//! - validation problems (primary-key shape, reserved words) are fatal under
//!   strict compliance and downgraded to warnings under lenient compliance.

pub mod reserved;

use std::collections::HashSet;
use std::fmt::Write as _;

use log::warn;

use crate::error::{CompileError, ValidationError, Warning};
use crate::schema::{ComplianceMode, Schema, Table};

/// Outcome of a validation run: warnings collected, fatal errors raised.
#[derive(Debug, Default)]
pub struct ValidationReport {
    pub warnings: Vec<Warning>,
}

/// Validate a merged schema. Structural violations and (under strict
/// compliance) validation violations abort; under lenient compliance the
/// latter are returned as warnings.
pub fn validate_schema(schema: &Schema) -> Result<ValidationReport, CompileError> {
    let mut report = ValidationReport::default();

    check_structure(schema)?;

    let mut findings = Vec::new();
    for table in schema.concrete_tables() {
        check_primary_key(table, &mut findings);
    }

    // Same aggregation policy as naming: under strict every finding is
    // listed in one fatal error rather than stopping at the first table.
    match schema.compliance {
        ComplianceMode::Strict => {
            if !findings.is_empty() {
                let mut details = String::new();
                for finding in &findings {
                    let _ = writeln!(details, "  - {}", finding);
                }
                return Err(ValidationError::PrimaryKeyViolations {
                    violations: findings.len(),
                    details: details.trim_end().to_string(),
                }
                .into());
            }
        }
        ComplianceMode::Lenient => {
            for finding in &findings {
                warn!("{}", finding);
                report.warnings.push(Warning::from_validation(finding));
            }
        }
    }

    check_naming(schema, &mut report)?;

    Ok(report)
}

/// Duplicate table and column names. Always fatal.
fn check_structure(schema: &Schema) -> Result<(), CompileError> {
    let mut seen_tables = HashSet::new();
    for table in &schema.tables {
        if !seen_tables.insert(table.name.as_str()) {
            return Err(crate::error::StructuralError::DuplicateTable(table.name.clone()).into());
        }
        let mut seen_columns = HashSet::new();
        for column in &table.columns {
            if !seen_columns.insert(column.name.as_str()) {
                return Err(crate::error::StructuralError::DuplicateColumn {
                    table: table.name.clone(),
                    column: column.name.clone(),
                }
                .into());
            }
        }
    }
    Ok(())
}

/// Exactly one primary key per concrete table, all of its columns known and
/// non-nullable.
fn check_primary_key(table: &Table, findings: &mut Vec<ValidationError>) {
    let Some(constraints) = &table.constraints else {
        findings.push(ValidationError::MissingPrimaryKey {
            table: table.name.clone(),
        });
        return;
    };

    let Some(pk) = &constraints.primary_key else {
        findings.push(ValidationError::MissingPrimaryKey {
            table: table.name.clone(),
        });
        return;
    };

    if pk.is_empty() {
        findings.push(ValidationError::MissingPrimaryKey {
            table: table.name.clone(),
        });
        return;
    }

    for pk_col in pk {
        match table.column(pk_col) {
            None => findings.push(ValidationError::UnknownPrimaryKeyColumn {
                table: table.name.clone(),
                column: pk_col.clone(),
            }),
            Some(column) if column.nullable => {
                findings.push(ValidationError::NullablePrimaryKeyColumn {
                    table: table.name.clone(),
                    column: column.name.clone(),
                })
            }
            Some(_) => {}
        }
    }
}

/// Reserved-word check over table and column names. Under strict compliance
/// every hit is aggregated into a single fatal error listing each violation
/// with its standard; under lenient compliance hits become warnings.
fn check_naming(schema: &Schema, report: &mut ValidationReport) -> Result<(), CompileError> {
    let mut hits: Vec<ValidationError> = Vec::new();

    for table in schema.concrete_tables() {
        let table_hits = reserved::reserved_in(&table.name);
        if !table_hits.is_empty() {
            hits.push(ValidationError::ReservedWord {
                name: table.name.clone(),
                context: "table".to_string(),
                standards: reserved::format_standards(&table_hits),
            });
        }
        for column in &table.columns {
            let column_hits = reserved::reserved_in(&column.name);
            if !column_hits.is_empty() {
                hits.push(ValidationError::ReservedWord {
                    name: column.name.clone(),
                    context: format!("column of '{}'", table.name),
                    standards: reserved::format_standards(&column_hits),
                });
            }
        }
    }

    if hits.is_empty() {
        return Ok(());
    }

    match schema.compliance {
        ComplianceMode::Strict => {
            let mut details = String::new();
            for hit in &hits {
                let _ = writeln!(details, "  - {}", hit);
            }
            Err(ValidationError::NamingViolations {
                violations: hits.len(),
                details: details.trim_end().to_string(),
            }
            .into())
        }
        ComplianceMode::Lenient => {
            for hit in &hits {
                warn!("{}", hit);
                report.warnings.push(Warning::from_validation(hit));
            }
            Ok(())
        }
    }
}
