//! Auxiliary object compilation: the non-table DDL a column's semantics
//! require. Named enum types and identity sequences are created before the
//! table and dropped after it; identity triggers are created after the table
//! and dropped before it.

use crate::dialect::{Dialect, EnumStrategy, IdentityStrategy};
use crate::schema::{ColumnType, Table};

/// Companion objects for one table, split by where they sit relative to the
/// CREATE TABLE / DROP TABLE statements.
#[derive(Debug, Default)]
pub struct AuxiliaryObjects {
    /// Created before the table (named types, sequences).
    pub type_creates: Vec<String>,
    /// Created after the table (identity emulation triggers).
    pub trigger_creates: Vec<String>,
    /// Dropped before the table.
    pub trigger_drops: Vec<String>,
    /// Dropped after the table, in reverse creation order.
    pub type_drops: Vec<String>,
}

/// Compile the auxiliary objects a table needs under the given dialect.
pub fn compile_auxiliary(dialect: &dyn Dialect, table: &Table) -> AuxiliaryObjects {
    let mut aux = AuxiliaryObjects::default();

    if dialect.enum_strategy() == EnumStrategy::NamedType {
        for column in &table.columns {
            if let ColumnType::Enum { values } = &column.ty {
                let type_name = dialect.enum_type_name(&table.name, &column.name);
                let quoted: Vec<String> = values
                    .iter()
                    .map(|v| format!("'{}'", v.replace('\'', "''")))
                    .collect();
                aux.type_creates.push(format!(
                    "CREATE TYPE {} AS ENUM ({})",
                    type_name,
                    quoted.join(", ")
                ));
                aux.type_drops.push(format!("DROP TYPE {}", type_name));
            }
        }
    }

    if dialect.identity_strategy() == IdentityStrategy::SequenceTrigger {
        for column in &table.columns {
            if !column.is_identity() {
                continue;
            }
            let seq = dialect.sequence_name(&table.name, &column.name);
            let trg = dialect.identity_trigger_name(&table.name, &column.name);

            aux.type_creates
                .push(format!("CREATE SEQUENCE {} START WITH 1 INCREMENT BY 1", seq));
            aux.trigger_creates.push(format!(
                "CREATE OR REPLACE TRIGGER {}\nBEFORE INSERT ON {}\nFOR EACH ROW\nWHEN (NEW.{} IS NULL)\nBEGIN\n    SELECT {}.NEXTVAL INTO :NEW.{} FROM DUAL;\nEND",
                trg, table.name, column.name, seq, column.name
            ));
            aux.trigger_drops.push(format!("DROP TRIGGER {}", trg));
            aux.type_drops.push(format!("DROP SEQUENCE {}", seq));
        }
    }

    // Drops mirror creation in reverse.
    aux.type_drops.reverse();
    aux
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dialect::Vendor;
    use crate::schema::{Column, IntSpec};

    fn table(columns: Vec<Column>) -> Table {
        Table {
            name: "orders".to_string(),
            abstract_table: false,
            skip: false,
            extends: None,
            columns,
            constraints: None,
            indexes: None,
            triggers: vec![],
        }
    }

    fn enum_col(name: &str) -> Column {
        Column {
            name: name.to_string(),
            nullable: false,
            default: None,
            ty: ColumnType::Enum {
                values: vec!["a".to_string(), "b".to_string()],
            },
            check: None,
            references: None,
            index: None,
        }
    }

    fn identity_col(name: &str) -> Column {
        Column {
            name: name.to_string(),
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

    #[test]
    fn test_postgres_enum_type_objects() {
        let aux = compile_auxiliary(Vendor::Postgres.dialect(), &table(vec![enum_col("state")]));
        assert_eq!(
            aux.type_creates,
            vec!["CREATE TYPE orders_state_type AS ENUM ('a', 'b')".to_string()]
        );
        assert_eq!(aux.type_drops, vec!["DROP TYPE orders_state_type".to_string()]);
        assert!(aux.trigger_creates.is_empty());
    }

    #[test]
    fn test_mysql_needs_no_aux_objects() {
        let aux = compile_auxiliary(
            Vendor::Mysql.dialect(),
            &table(vec![enum_col("state"), identity_col("id")]),
        );
        assert!(aux.type_creates.is_empty());
        assert!(aux.trigger_creates.is_empty());
    }

    #[test]
    fn test_oracle_sequence_trigger_pair() {
        let aux = compile_auxiliary(Vendor::Oracle.dialect(), &table(vec![identity_col("id")]));
        assert_eq!(
            aux.type_creates,
            vec!["CREATE SEQUENCE orders_id_seq START WITH 1 INCREMENT BY 1".to_string()]
        );
        assert_eq!(aux.trigger_creates.len(), 1);
        assert!(aux.trigger_creates[0].contains("orders_id_trg"));
        assert!(aux.trigger_creates[0].contains("orders_id_seq.NEXTVAL"));
        assert_eq!(aux.trigger_drops, vec!["DROP TRIGGER orders_id_trg".to_string()]);
        assert_eq!(aux.type_drops, vec!["DROP SEQUENCE orders_id_seq".to_string()]);
    }

    #[test]
    fn test_type_drops_reverse_creation_order() {
        let aux = compile_auxiliary(
            Vendor::Postgres.dialect(),
            &table(vec![enum_col("a"), enum_col("b")]),
        );
        assert!(aux.type_creates[0].contains("orders_a_type"));
        assert!(aux.type_creates[1].contains("orders_b_type"));
        assert!(aux.type_drops[0].contains("orders_b_type"));
        assert!(aux.type_drops[1].contains("orders_a_type"));
    }
}
