//! Foreign-key dependency ordering.
//!
//! Builds a directed graph with one node per concrete table and one edge
//! dependent -> referenced for every table-level or inline-column foreign
//! key, then produces a deterministic topological order: CREATE statements
//! follow it, DROP statements follow its reverse. Ties are broken by original
//! declaration order so output is reproducible run-to-run.

use std::collections::{HashMap, HashSet};

use log::debug;

use crate::error::StructuralError;
use crate::schema::Schema;

/// Per-table dependency info extracted from the merged schema.
#[derive(Debug, Clone)]
pub struct TableNode {
    pub name: String,
    /// Names of tables this table references via foreign keys.
    pub dependencies: Vec<String>,
}

/// Extract dependency nodes for all concrete, non-skipped tables.
///
/// Self-references are legal (e.g. an employee -> manager key) and are not
/// ordering constraints, so they are dropped here; unknown targets are fatal.
pub fn collect_nodes(schema: &Schema) -> Result<Vec<TableNode>, StructuralError> {
    let known: HashSet<&str> = schema.tables.iter().map(|t| t.name.as_str()).collect();
    let mut nodes = Vec::new();

    for table in schema.concrete_tables() {
        let mut deps: Vec<String> = Vec::new();
        let mut push_dep = |target: &str| -> Result<(), StructuralError> {
            if !known.contains(target) {
                return Err(StructuralError::UnknownForeignTable {
                    table: table.name.clone(),
                    target: target.to_string(),
                });
            }
            if target != table.name && !deps.iter().any(|d| d == target) {
                deps.push(target.to_string());
            }
            Ok(())
        };

        for column in &table.columns {
            if let Some(fk) = &column.references {
                push_dep(&fk.table)?;
            }
        }
        if let Some(constraints) = &table.constraints {
            for fk in &constraints.foreign_keys {
                push_dep(&fk.ref_table)?;
            }
        }

        nodes.push(TableNode {
            name: table.name.clone(),
            dependencies: deps,
        });
    }

    Ok(nodes)
}

/// Topologically sort tables: referenced tables first, dependents last.
///
/// Kahn's algorithm; among the ready candidates the one declared earliest is
/// always picked, so the order is deterministic. A cycle is fatal and is
/// reported with its ordered path.
pub fn topological_order(nodes: &[TableNode]) -> Result<Vec<String>, StructuralError> {
    let position: HashMap<&str, usize> = nodes
        .iter()
        .enumerate()
        .map(|(i, n)| (n.name.as_str(), i))
        .collect();

    let mut in_degree: Vec<usize> = nodes.iter().map(|n| n.dependencies.len()).collect();

    // Reverse edges: for each table, the tables that depend on it.
    let mut dependents: Vec<Vec<usize>> = vec![Vec::new(); nodes.len()];
    for (i, node) in nodes.iter().enumerate() {
        for dep in &node.dependencies {
            // Concrete-only graph: a dependency on a skipped table is not an
            // ordering constraint among emitted tables.
            if let Some(&j) = position.get(dep.as_str()) {
                dependents[j].push(i);
            } else {
                in_degree[i] -= 1;
            }
        }
    }

    let mut done = vec![false; nodes.len()];
    let mut order = Vec::with_capacity(nodes.len());

    while order.len() < nodes.len() {
        // Earliest-declared ready node; None means everything left is cyclic.
        let next = (0..nodes.len()).find(|&i| !done[i] && in_degree[i] == 0);
        let Some(i) = next else {
            return Err(StructuralError::DependencyCycle {
                path: extract_cycle(nodes, &position, &done),
            });
        };
        done[i] = true;
        order.push(nodes[i].name.clone());
        for &j in &dependents[i] {
            in_degree[j] -= 1;
        }
    }

    debug!("table creation order: {}", order.join(", "));
    Ok(order)
}

/// Walk dependency edges among unresolved nodes until one repeats, returning
/// the ordered cycle path (first node repeated at the end).
fn extract_cycle(
    nodes: &[TableNode],
    position: &HashMap<&str, usize>,
    done: &[bool],
) -> Vec<String> {
    let start = (0..nodes.len())
        .find(|&i| !done[i])
        .expect("cycle exists among unresolved nodes");

    let mut seen_at: HashMap<usize, usize> = HashMap::new();
    let mut path = Vec::new();
    let mut current = start;
    loop {
        if let Some(&first) = seen_at.get(&current) {
            let mut cycle: Vec<String> = path[first..].to_vec();
            cycle.push(nodes[current].name.clone());
            return cycle;
        }
        seen_at.insert(current, path.len());
        path.push(nodes[current].name.clone());
        current = nodes[current]
            .dependencies
            .iter()
            .filter_map(|d| position.get(d.as_str()).copied())
            .find(|&j| !done[j])
            .expect("unresolved node keeps an unresolved dependency");
    }
}

/// Convenience: dependency order for a merged schema.
pub fn dependency_order(schema: &Schema) -> Result<Vec<String>, StructuralError> {
    let nodes = collect_nodes(schema)?;
    topological_order(&nodes)
}
