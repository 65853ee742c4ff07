//! Tests for foreign-key dependency ordering through the public API.

use schemaforge::dependency::dependency_order;
use schemaforge::error::StructuralError;
use schemaforge::schema::Schema;

fn load(json: &str) -> Schema {
    serde_json::from_str(json).expect("valid schema json")
}

#[test]
fn test_referenced_tables_come_first() {
    let schema = load(
        r#"{
            "name": "shop",
            "tables": [
                {
                    "name": "order_lines",
                    "columns": [
                        { "name": "id", "type": { "int": {} } },
                        {
                            "name": "order_id",
                            "type": { "int": {} },
                            "references": { "table": "orders", "column": "id" }
                        },
                        {
                            "name": "product_id",
                            "type": { "int": {} },
                            "references": { "table": "products", "column": "id" }
                        }
                    ],
                    "constraints": { "primary_key": ["id"] }
                },
                {
                    "name": "orders",
                    "columns": [
                        { "name": "id", "type": { "int": {} } },
                        {
                            "name": "customer_id",
                            "type": { "int": {} },
                            "references": { "table": "customers", "column": "id" }
                        }
                    ],
                    "constraints": { "primary_key": ["id"] }
                },
                {
                    "name": "customers",
                    "columns": [{ "name": "id", "type": { "int": {} } }],
                    "constraints": { "primary_key": ["id"] }
                },
                {
                    "name": "products",
                    "columns": [{ "name": "id", "type": { "int": {} } }],
                    "constraints": { "primary_key": ["id"] }
                }
            ]
        }"#,
    );
    let order = dependency_order(&schema).unwrap();
    let pos = |name: &str| order.iter().position(|t| t == name).unwrap();
    assert!(pos("customers") < pos("orders"));
    assert!(pos("orders") < pos("order_lines"));
    assert!(pos("products") < pos("order_lines"));
}

#[test]
fn test_independent_tables_keep_declaration_order() {
    let schema = load(
        r#"{
            "name": "flat",
            "tables": [
                { "name": "zebra", "columns": [{ "name": "id", "type": { "int": {} } }], "constraints": { "primary_key": ["id"] } },
                { "name": "apple", "columns": [{ "name": "id", "type": { "int": {} } }], "constraints": { "primary_key": ["id"] } },
                { "name": "mango", "columns": [{ "name": "id", "type": { "int": {} } }], "constraints": { "primary_key": ["id"] } }
            ]
        }"#,
    );
    let order = dependency_order(&schema).unwrap();
    assert_eq!(order, vec!["zebra", "apple", "mango"]);
}

#[test]
fn test_self_reference_is_not_a_cycle() {
    let schema = load(
        r#"{
            "name": "tree",
            "tables": [
                {
                    "name": "categories",
                    "columns": [
                        { "name": "id", "type": { "int": {} } },
                        {
                            "name": "parent_id",
                            "nullable": true,
                            "type": { "int": {} },
                            "references": { "table": "categories", "column": "id" }
                        }
                    ],
                    "constraints": { "primary_key": ["id"] }
                }
            ]
        }"#,
    );
    let order = dependency_order(&schema).unwrap();
    assert_eq!(order, vec!["categories"]);
}

#[test]
fn test_cycle_error_carries_closed_path() {
    let schema = load(
        r#"{
            "name": "cyclic",
            "tables": [
                {
                    "name": "employees",
                    "columns": [
                        { "name": "id", "type": { "int": {} } },
                        {
                            "name": "department_id",
                            "type": { "int": {} },
                            "references": { "table": "departments", "column": "id" }
                        }
                    ],
                    "constraints": { "primary_key": ["id"] }
                },
                {
                    "name": "departments",
                    "columns": [
                        { "name": "id", "type": { "int": {} } },
                        {
                            "name": "manager_id",
                            "type": { "int": {} },
                            "references": { "table": "employees", "column": "id" }
                        }
                    ],
                    "constraints": { "primary_key": ["id"] }
                }
            ]
        }"#,
    );
    match dependency_order(&schema).unwrap_err() {
        StructuralError::DependencyCycle { path } => {
            assert!(path.len() >= 3);
            assert_eq!(path.first(), path.last());
            assert!(path.contains(&"employees".to_string()));
            assert!(path.contains(&"departments".to_string()));
        }
        other => panic!("expected DependencyCycle, got {other:?}"),
    }
}

#[test]
fn test_table_level_foreign_keys_count_as_dependencies() {
    let schema = load(
        r#"{
            "name": "composite",
            "tables": [
                {
                    "name": "shipments",
                    "columns": [
                        { "name": "region", "type": { "char": { "length": 10 } } },
                        { "name": "code", "type": { "int": {} } }
                    ],
                    "constraints": {
                        "primary_key": ["region", "code"],
                        "foreign_keys": [
                            {
                                "columns": ["region", "code"],
                                "ref_table": "routes",
                                "ref_columns": ["region", "code"]
                            }
                        ]
                    }
                },
                {
                    "name": "routes",
                    "columns": [
                        { "name": "region", "type": { "char": { "length": 10 } } },
                        { "name": "code", "type": { "int": {} } }
                    ],
                    "constraints": { "primary_key": ["region", "code"] }
                }
            ]
        }"#,
    );
    let order = dependency_order(&schema).unwrap();
    assert_eq!(order, vec!["routes", "shipments"]);
}

#[test]
fn test_unknown_reference_target_is_fatal() {
    let schema = load(
        r#"{
            "name": "dangling",
            "tables": [
                {
                    "name": "orders",
                    "columns": [
                        { "name": "id", "type": { "int": {} } },
                        {
                            "name": "customer_id",
                            "type": { "int": {} },
                            "references": { "table": "customers", "column": "id" }
                        }
                    ],
                    "constraints": { "primary_key": ["id"] }
                }
            ]
        }"#,
    );
    match dependency_order(&schema).unwrap_err() {
        StructuralError::UnknownForeignTable { table, target } => {
            assert_eq!(table, "orders");
            assert_eq!(target, "customers");
        }
        other => panic!("expected UnknownForeignTable, got {other:?}"),
    }
}
