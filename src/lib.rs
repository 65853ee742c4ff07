//! schemaforge: a cross-database schema compiler.
//!
//! Takes a vendor-neutral, in-memory description of relational tables (with
//! optional single inheritance between abstract template tables) and produces
//! an ordered sequence of executable DDL statements for a chosen target
//! engine. The pipeline:
//!
//! 1. merge inheritance chains into flattened concrete tables;
//! 2. validate structure and naming against the schema's compliance mode;
//! 3. build the foreign-key dependency graph and a deterministic
//!    topological order;
//! 4. compile each table's columns, constraints and auxiliary objects
//!    through the selected dialect strategy;
//! 5. fold everything into one statement list: DROPs in reverse dependency
//!    order, then CREATEs in dependency order.
//!
//! Executing the statements (transactions, batching) is the caller's
//! concern; the compiler itself performs no I/O.

pub mod compiler;
pub mod dependency;
pub mod dialect;
pub mod emit;
pub mod error;
pub mod merge;
pub mod output;
pub mod schema;
pub mod validate;

pub use compiler::{Compilation, Compiler, Statement, StatementKind};
pub use dialect::Vendor;
pub use error::{CompileError, StructuralError, ValidationError, Warning};
pub use merge::merge_schema;
pub use schema::{ComplianceMode, Schema};
pub use validate::validate_schema;
