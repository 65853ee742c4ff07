//! Inheritance resolution.
//!
//! Flattens `extends` chains into self-contained tables: every table's
//! column/constraint/index lists end up including everything inherited from
//! its abstract ancestors. The input schema is never mutated, so the same raw
//! schema can be merged and compiled repeatedly against different vendors.

use std::collections::HashMap;

use log::debug;

use crate::error::StructuralError;
use crate::schema::{Schema, Table};

/// Visit state for cycle detection along `extends` chains.
///
/// A plain "already merged" memo would silently truncate a cycle; the
/// in-progress state lets a revisit be reported as the error it is.
#[derive(Clone, Copy, PartialEq)]
enum Mark {
    Unvisited,
    InProgress,
    Done,
}

/// Merge all inheritance chains, returning an independent flattened schema.
pub fn merge_schema(schema: &Schema) -> Result<Schema, StructuralError> {
    // Duplicate table names would make by-name ancestor lookup ambiguous, so
    // they are rejected here as well as in validation.
    let mut index: HashMap<&str, usize> = HashMap::new();
    for (i, table) in schema.tables.iter().enumerate() {
        if index.insert(table.name.as_str(), i).is_some() {
            return Err(StructuralError::DuplicateTable(table.name.clone()));
        }
    }

    let mut marks = vec![Mark::Unvisited; schema.tables.len()];
    let mut merged: Vec<Option<Table>> = vec![None; schema.tables.len()];

    for i in 0..schema.tables.len() {
        let mut path = Vec::new();
        resolve(schema, &index, i, &mut marks, &mut merged, &mut path)?;
    }

    Ok(Schema {
        name: schema.name.clone(),
        compliance: schema.compliance,
        tables: merged.into_iter().map(|t| t.expect("resolved")).collect(),
    })
}

/// Resolve table `i`, recursively resolving its ancestor first.
fn resolve(
    schema: &Schema,
    index: &HashMap<&str, usize>,
    i: usize,
    marks: &mut [Mark],
    merged: &mut [Option<Table>],
    path: &mut Vec<String>,
) -> Result<(), StructuralError> {
    match marks[i] {
        Mark::Done => return Ok(()),
        Mark::InProgress => {
            // Close the cycle path at the revisited table.
            let mut cycle = path.clone();
            cycle.push(schema.tables[i].name.clone());
            return Err(StructuralError::ExtendsCycle { path: cycle });
        }
        Mark::Unvisited => {}
    }

    let table = &schema.tables[i];
    let Some(ancestor_name) = table.extends.as_deref() else {
        marks[i] = Mark::Done;
        merged[i] = Some(table.clone());
        return Ok(());
    };

    let &ancestor_idx = index.get(ancestor_name).ok_or_else(|| {
        StructuralError::MissingAncestor {
            table: table.name.clone(),
            target: ancestor_name.to_string(),
        }
    })?;
    if !schema.tables[ancestor_idx].abstract_table {
        return Err(StructuralError::AncestorNotAbstract {
            table: table.name.clone(),
            target: ancestor_name.to_string(),
        });
    }

    marks[i] = Mark::InProgress;
    path.push(table.name.clone());
    resolve(schema, index, ancestor_idx, marks, merged, path)?;
    path.pop();

    let ancestor = merged[ancestor_idx].as_ref().expect("ancestor resolved");
    debug!("merging '{}' into '{}'", ancestor.name, table.name);
    merged[i] = Some(merge_into(table, ancestor));
    marks[i] = Mark::Done;
    Ok(())
}

/// Fold a fully-resolved ancestor into a table, producing the flattened copy.
fn merge_into(table: &Table, ancestor: &Table) -> Table {
    let mut out = table.clone();

    // Ancestor columns come first, preserving ancestor-to-descendant order
    // across multi-level chains.
    let mut columns = ancestor.columns.clone();
    columns.extend(out.columns);
    out.columns = columns;

    // Constraints: adopt the whole block when the table declares none,
    // otherwise append the ancestor's primary-key/foreign-key/unique entries.
    out.constraints = match (table.constraints.as_ref(), ancestor.constraints.as_ref()) {
        (None, inherited) => inherited.cloned(),
        (Some(own), None) => Some(own.clone()),
        (Some(own), Some(inherited)) => {
            let mut c = own.clone();
            if c.primary_key.is_none() {
                c.primary_key = inherited.primary_key.clone();
            }
            c.unique.extend(inherited.unique.iter().cloned());
            c.foreign_keys.extend(inherited.foreign_keys.iter().cloned());
            Some(c)
        }
    };

    // Indexes: same adopt-or-append rule.
    out.indexes = match (table.indexes.as_ref(), ancestor.indexes.as_ref()) {
        (None, inherited) => inherited.cloned(),
        (Some(own), None) => Some(own.clone()),
        (Some(own), Some(inherited)) => {
            let mut idx = own.clone();
            idx.extend(inherited.iter().cloned());
            Some(idx)
        }
    };

    out
}
