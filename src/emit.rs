//! DDL emission.
//!
//! Column declarations and constraint clauses are built as typed fragment
//! values and assembled by a renderer that owns separators and indentation;
//! no ad hoc string concatenation with prefix stripping.

pub mod auxiliary;
pub mod column;
pub mod constraint;
pub mod table;

use crate::schema::RefAction;

/// A fully-resolved column declaration, ready to render.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnDecl {
    pub name: String,
    pub type_sql: String,
    pub nullable: bool,
    /// Rendered default literal, already validated and vendor-formatted.
    pub default_sql: Option<String>,
    /// Inline identity keyword (AUTO_INCREMENT, IDENTITY(1,1),
    /// PRIMARY KEY AUTOINCREMENT), when the dialect uses one.
    pub identity_sql: Option<&'static str>,
}

impl ColumnDecl {
    /// `name TYPE [DEFAULT lit] [NOT NULL|NULL] [identity]` — an ordering
    /// every supported engine accepts.
    fn render(&self) -> String {
        let mut sql = format!("{} {}", self.name, self.type_sql);
        if let Some(default) = &self.default_sql {
            sql.push_str(" DEFAULT ");
            sql.push_str(default);
        }
        sql.push_str(if self.nullable { " NULL" } else { " NOT NULL" });
        if let Some(identity) = self.identity_sql {
            sql.push(' ');
            sql.push_str(identity);
        }
        sql
    }
}

/// A table-level constraint clause.
#[derive(Debug, Clone, PartialEq)]
pub enum ConstraintClause {
    Unique {
        name: String,
        columns: Vec<String>,
    },
    Check {
        expression: String,
    },
    PrimaryKey {
        columns: Vec<String>,
    },
    ForeignKey {
        columns: Vec<String>,
        ref_table: String,
        ref_columns: Vec<String>,
        on_delete: Option<RefAction>,
        on_update: Option<RefAction>,
    },
}

impl ConstraintClause {
    fn render(&self) -> String {
        match self {
            ConstraintClause::Unique { name, columns } => {
                format!("CONSTRAINT {} UNIQUE ({})", name, columns.join(", "))
            }
            ConstraintClause::Check { expression } => format!("CHECK ({})", expression),
            ConstraintClause::PrimaryKey { columns } => {
                format!("PRIMARY KEY ({})", columns.join(", "))
            }
            ConstraintClause::ForeignKey {
                columns,
                ref_table,
                ref_columns,
                on_delete,
                on_update,
            } => {
                let mut sql = format!(
                    "FOREIGN KEY ({}) REFERENCES {} ({})",
                    columns.join(", "),
                    ref_table,
                    ref_columns.join(", ")
                );
                if let Some(action) = on_delete {
                    sql.push_str(" ON DELETE ");
                    sql.push_str(action.sql());
                }
                if let Some(action) = on_update {
                    sql.push_str(" ON UPDATE ");
                    sql.push_str(action.sql());
                }
                sql
            }
        }
    }
}

/// Assemble a CREATE TABLE statement from fragments.
pub fn render_create_table(
    table: &str,
    columns: &[ColumnDecl],
    constraints: &[ConstraintClause],
) -> String {
    let mut lines: Vec<String> = columns.iter().map(ColumnDecl::render).collect();
    lines.extend(constraints.iter().map(ConstraintClause::render));

    let body = lines
        .iter()
        .map(|l| format!("    {}", l))
        .collect::<Vec<_>>()
        .join(",\n");
    format!("CREATE TABLE {} (\n{}\n)", table, body)
}

/// Render a check-expression operand: numbers pass through, anything else is
/// quoted with doubled single quotes.
pub(crate) fn literal(value: &str) -> String {
    if value.parse::<f64>().is_ok() {
        value.to_string()
    } else {
        format!("'{}'", value.replace('\'', "''"))
    }
}
