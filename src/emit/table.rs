//! Per-table compilation: folds column, constraint and auxiliary fragments
//! into the ordered CREATE and DROP statement sets for one table.

use log::debug;

use crate::dialect::{Dialect, HashIndexSupport, IdentityStrategy};
use crate::error::{CompileError, Warning};
use crate::schema::{ComplianceMode, IndexKind, Table};

use super::auxiliary::compile_auxiliary;
use super::column::{compile_column, is_sole_primary_key};
use super::constraint::compile_constraints;
use super::render_create_table;

/// Compiled statement texts for one table.
///
/// `creates` holds, in emission order: auxiliary type objects, the CREATE
/// TABLE statement, trigger creations, index creations. `drops` holds the
/// destructive-refresh set: triggers, the table, auxiliary objects in
/// reverse creation order.
#[derive(Debug)]
pub struct TableArtifacts {
    pub creates: Vec<String>,
    pub drops: Vec<String>,
}

/// Compile one concrete table under the given dialect.
pub fn compile_table(
    dialect: &dyn Dialect,
    table: &Table,
    compliance: ComplianceMode,
    warnings: &mut Vec<Warning>,
) -> Result<TableArtifacts, CompileError> {
    debug!("compiling table '{}'", table.name);

    // The primary-key-substitute identity keyword encodes the PK in the
    // column declaration; the table-level clause must then be suppressed.
    let pk_fused = matches!(
        dialect.identity_strategy(),
        IdentityStrategy::PrimaryKeyKeyword(_)
    ) && table
        .columns
        .iter()
        .any(|c| c.is_identity() && is_sole_primary_key(table, c));

    let mut columns = Vec::with_capacity(table.columns.len());
    for column in &table.columns {
        columns.push(compile_column(dialect, table, column, compliance, warnings)?);
    }
    let constraints = compile_constraints(dialect, table, pk_fused, warnings);
    let aux = compile_auxiliary(dialect, table);

    let mut creates = Vec::new();
    creates.extend(aux.type_creates);
    creates.push(render_create_table(&table.name, &columns, &constraints));
    creates.extend(aux.trigger_creates);

    let mut trigger_drops = aux.trigger_drops;
    for (i, trigger) in table.triggers.iter().enumerate() {
        let name = trigger.object_name(&table.name, i + 1);
        let events: Vec<&str> = trigger.events.iter().map(|e| e.sql()).collect();
        creates.push(format!(
            "CREATE TRIGGER {} {} {} ON {} FOR EACH ROW {}",
            name,
            trigger.timing.sql(),
            events.join(" OR "),
            table.name,
            trigger.body
        ));
        trigger_drops.push(dialect.render_drop_trigger(&name, &table.name));
    }

    creates.extend(compile_indexes(dialect, table, warnings));

    // Destructive refresh: triggers first, then the table, then auxiliary
    // objects in reverse creation order.
    let mut drops = trigger_drops;
    drops.push(format!("DROP TABLE {}", table.name));
    drops.extend(aux.type_drops);

    Ok(TableArtifacts { creates, drops })
}

/// Table-level indexes followed by inline column index specs. Hash requests
/// the engine cannot honor are downgraded to the default access method or,
/// for composite hash on single-column-hash engines, omitted entirely.
fn compile_indexes(
    dialect: &dyn Dialect,
    table: &Table,
    warnings: &mut Vec<Warning>,
) -> Vec<String> {
    let mut statements = Vec::new();
    let mut ordinal = 0;

    let mut push_index = |columns: &[String], kind: IndexKind, unique: bool, name: String| {
        let hash = match (kind, dialect.hash_index_support()) {
            (IndexKind::BTree, _) => false,
            (IndexKind::Hash, HashIndexSupport::Composite) => true,
            (IndexKind::Hash, HashIndexSupport::SingleColumn) => {
                if columns.len() > 1 {
                    warnings.push(Warning::new(format!(
                        "index '{}' on table '{}': {} supports single-column hash indexes only, index omitted",
                        name,
                        table.name,
                        dialect.vendor()
                    )));
                    return;
                }
                true
            }
            (IndexKind::Hash, HashIndexSupport::None) => {
                warnings.push(Warning::new(format!(
                    "index '{}' on table '{}': {} has no hash indexes, using the default access method",
                    name,
                    table.name,
                    dialect.vendor()
                )));
                false
            }
        };
        statements.push(dialect.render_create_index(&name, &table.name, columns, unique, hash));
    };

    if let Some(indexes) = &table.indexes {
        for index in indexes {
            ordinal += 1;
            push_index(
                &index.columns,
                index.kind,
                index.unique,
                format!("{}_idx_{}", table.name, ordinal),
            );
        }
    }
    for column in &table.columns {
        if let Some(inline) = &column.index {
            push_index(
                std::slice::from_ref(&column.name),
                inline.kind,
                inline.unique,
                format!("{}_{}_idx", table.name, column.name),
            );
        }
    }

    statements
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dialect::Vendor;
    use crate::schema::{
        Column, ColumnType, Constraints, Index, InlineIndex, IntSpec, Trigger, TriggerEvent,
        TriggerTiming,
    };

    fn id_column() -> Column {
        Column {
            name: "id".to_string(),
            nullable: false,
            default: None,
            ty: ColumnType::Int(IntSpec {
                identity: true,
                ..Default::default()
            }),
            check: None,
            references: None,
            index: None,
        }
    }

    fn table_with(columns: Vec<Column>) -> Table {
        Table {
            name: "users".to_string(),
            abstract_table: false,
            skip: false,
            extends: None,
            columns,
            constraints: Some(Constraints {
                primary_key: Some(vec!["id".to_string()]),
                ..Default::default()
            }),
            indexes: None,
            triggers: vec![],
        }
    }

    fn compile(vendor: Vendor, table: &Table) -> (TableArtifacts, Vec<Warning>) {
        let mut warnings = Vec::new();
        let artifacts = compile_table(
            vendor.dialect(),
            table,
            ComplianceMode::Strict,
            &mut warnings,
        )
        .unwrap();
        (artifacts, warnings)
    }

    #[test]
    fn test_sqlite_fuses_pk_into_identity() {
        let table = table_with(vec![id_column()]);
        let (artifacts, _) = compile(Vendor::Sqlite, &table);
        let create = &artifacts.creates[0];
        assert!(create.contains("id INTEGER NOT NULL PRIMARY KEY AUTOINCREMENT"));
        assert!(!create.contains("PRIMARY KEY (id)"));
    }

    #[test]
    fn test_mysql_keeps_table_level_pk() {
        let table = table_with(vec![id_column()]);
        let (artifacts, _) = compile(Vendor::Mysql, &table);
        let create = &artifacts.creates[0];
        assert!(create.contains("AUTO_INCREMENT"));
        assert!(create.contains("PRIMARY KEY (id)"));
    }

    #[test]
    fn test_oracle_emits_sequence_before_table_and_trigger_after() {
        let table = table_with(vec![id_column()]);
        let (artifacts, _) = compile(Vendor::Oracle, &table);
        assert!(artifacts.creates[0].starts_with("CREATE SEQUENCE users_id_seq"));
        assert!(artifacts.creates[1].starts_with("CREATE TABLE users"));
        assert!(artifacts.creates[2].contains("TRIGGER users_id_trg"));
        // Drops: trigger, table, sequence.
        assert_eq!(artifacts.drops[0], "DROP TRIGGER users_id_trg");
        assert_eq!(artifacts.drops[1], "DROP TABLE users");
        assert_eq!(artifacts.drops[2], "DROP SEQUENCE users_id_seq");
    }

    #[test]
    fn test_user_trigger_created_after_table_dropped_before() {
        let mut table = table_with(vec![id_column()]);
        table.triggers.push(Trigger {
            name: None,
            timing: TriggerTiming::Before,
            events: vec![TriggerEvent::Insert, TriggerEvent::Update],
            body: "SET NEW.updated_at = CURRENT_TIMESTAMP".to_string(),
        });
        let (artifacts, _) = compile(Vendor::Mysql, &table);
        assert!(artifacts.creates[1].starts_with("CREATE TRIGGER users_trg_1 BEFORE INSERT OR UPDATE ON users"));
        assert_eq!(artifacts.drops[0], "DROP TRIGGER users_trg_1");
        assert_eq!(artifacts.drops[1], "DROP TABLE users");
    }

    #[test]
    fn test_composite_hash_index_omitted_on_postgres() {
        let mut table = table_with(vec![id_column()]);
        table.indexes = Some(vec![Index {
            kind: IndexKind::Hash,
            unique: false,
            columns: vec!["a".to_string(), "b".to_string()],
        }]);
        let (artifacts, warnings) = compile(Vendor::Postgres, &table);
        assert!(!artifacts.creates.iter().any(|s| s.contains("INDEX")));
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].message.contains("single-column hash"));
    }

    #[test]
    fn test_hash_downgraded_where_unsupported() {
        let mut table = table_with(vec![id_column()]);
        table.indexes = Some(vec![Index {
            kind: IndexKind::Hash,
            unique: false,
            columns: vec!["id".to_string()],
        }]);
        let (artifacts, warnings) = compile(Vendor::Sqlite, &table);
        let index = artifacts
            .creates
            .iter()
            .find(|s| s.contains("CREATE INDEX"))
            .unwrap();
        assert!(!index.contains("HASH"));
        assert_eq!(warnings.len(), 1);
    }

    #[test]
    fn test_inline_unique_index() {
        let mut email = Column {
            name: "email".to_string(),
            nullable: false,
            default: None,
            ty: ColumnType::Char {
                length: 255,
                varying: true,
            },
            check: None,
            references: None,
            index: None,
        };
        email.index = Some(InlineIndex {
            kind: IndexKind::BTree,
            unique: true,
        });
        let table = table_with(vec![id_column(), email]);
        let (artifacts, _) = compile(Vendor::Postgres, &table);
        assert!(artifacts
            .creates
            .iter()
            .any(|s| s == "CREATE UNIQUE INDEX users_email_idx ON users (email)"));
    }
}
