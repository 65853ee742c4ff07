//! Tests for inheritance merging through the public API, driven by JSON
//! schema documents as the CLI would hand them in.

use schemaforge::error::StructuralError;
use schemaforge::merge::merge_schema;
use schemaforge::schema::Schema;

fn load(json: &str) -> Schema {
    serde_json::from_str(json).expect("valid schema json")
}

#[test]
fn test_merge_is_identity_on_flat_schema() {
    let schema = load(
        r#"{
            "name": "flat",
            "tables": [
                {
                    "name": "users",
                    "columns": [
                        { "name": "id", "type": { "int": {} } },
                        { "name": "email", "type": { "char": { "length": 255, "varying": true } } }
                    ],
                    "constraints": { "primary_key": ["id"] }
                },
                {
                    "name": "orders",
                    "columns": [{ "name": "id", "type": { "int": {} } }],
                    "constraints": { "primary_key": ["id"] }
                }
            ]
        }"#,
    );
    let merged = merge_schema(&schema).unwrap();
    assert_eq!(merged.tables, schema.tables);
}

#[test]
fn test_three_level_chain_orders_ancestor_columns_first() {
    let schema = load(
        r#"{
            "name": "chain",
            "tables": [
                {
                    "name": "audited",
                    "abstract": true,
                    "columns": [
                        { "name": "created_at", "type": { "date_time": {} } },
                        { "name": "updated_at", "type": { "date_time": {} } }
                    ]
                },
                {
                    "name": "named",
                    "abstract": true,
                    "extends": "audited",
                    "columns": [{ "name": "name", "type": { "char": { "length": 100, "varying": true } } }]
                },
                {
                    "name": "products",
                    "extends": "named",
                    "columns": [{ "name": "id", "type": { "int": {} } }],
                    "constraints": { "primary_key": ["id"] }
                }
            ]
        }"#,
    );
    let merged = merge_schema(&schema).unwrap();
    let products = merged.table("products").unwrap();
    let names: Vec<&str> = products.columns.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec!["created_at", "updated_at", "name", "id"]);
}

#[test]
fn test_inherited_constraints_survive_merge() {
    let schema = load(
        r#"{
            "name": "constraints",
            "tables": [
                {
                    "name": "base",
                    "abstract": true,
                    "columns": [{ "name": "id", "type": { "big_int": {} } }],
                    "constraints": {
                        "primary_key": ["id"],
                        "unique": [["id"]]
                    }
                },
                {
                    "name": "events",
                    "extends": "base",
                    "columns": [{ "name": "payload", "type": { "clob": {} } }]
                }
            ]
        }"#,
    );
    let merged = merge_schema(&schema).unwrap();
    let events = merged.table("events").unwrap();
    let constraints = events.constraints.as_ref().unwrap();
    assert_eq!(constraints.primary_key, Some(vec!["id".to_string()]));
    assert_eq!(constraints.unique, vec![vec!["id".to_string()]]);
}

#[test]
fn test_mutual_extends_cycle_names_both_tables() {
    let schema = load(
        r#"{
            "name": "cyclic",
            "tables": [
                { "name": "x", "abstract": true, "extends": "y", "columns": [] },
                { "name": "y", "abstract": true, "extends": "x", "columns": [] }
            ]
        }"#,
    );
    match merge_schema(&schema).unwrap_err() {
        StructuralError::ExtendsCycle { path } => {
            assert!(path.contains(&"x".to_string()));
            assert!(path.contains(&"y".to_string()));
        }
        other => panic!("expected ExtendsCycle, got {other:?}"),
    }
}

#[test]
fn test_extending_concrete_table_is_fatal() {
    let schema = load(
        r#"{
            "name": "bad",
            "tables": [
                {
                    "name": "parent",
                    "columns": [{ "name": "id", "type": { "int": {} } }],
                    "constraints": { "primary_key": ["id"] }
                },
                { "name": "child", "extends": "parent", "columns": [] }
            ]
        }"#,
    );
    match merge_schema(&schema).unwrap_err() {
        StructuralError::AncestorNotAbstract { table, target } => {
            assert_eq!(table, "child");
            assert_eq!(target, "parent");
        }
        other => panic!("expected AncestorNotAbstract, got {other:?}"),
    }
}

#[test]
fn test_repeated_merges_agree() {
    let schema = load(
        r#"{
            "name": "stable",
            "tables": [
                {
                    "name": "base",
                    "abstract": true,
                    "columns": [{ "name": "id", "type": { "int": {} } }],
                    "constraints": { "primary_key": ["id"] }
                },
                {
                    "name": "things",
                    "extends": "base",
                    "columns": [{ "name": "label", "type": { "char": { "length": 50 } } }]
                }
            ]
        }"#,
    );
    let first = merge_schema(&schema).unwrap();
    let second = merge_schema(&schema).unwrap();
    assert_eq!(first, second);
}
