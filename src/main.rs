//! schemaforge CLI
//!
//! Compiles a schema document (the already-parsed model, as JSON) into a DDL
//! script for a target vendor.

use std::fs;
use std::path::PathBuf;
use std::process;

use anyhow::Context;
use clap::Parser;

use schemaforge::compiler::{Compiler, StatementKind};
use schemaforge::dialect::Vendor;
use schemaforge::output::write_statement_file;
use schemaforge::schema::Schema;

#[derive(Parser)]
#[command(name = "schemaforge")]
#[command(about = "Cross-database schema compiler: schema model in, ordered DDL out")]
#[command(version = "0.1.0")]
struct Cli {
    /// Target vendor: postgres, mysql, sqlite, oracle, sqlserver
    vendor: String,

    /// Path to the schema model document (JSON)
    schema_source: PathBuf,

    /// Output file (default: <schema name>.sql next to the input)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Emit only CREATE statements, no destructive-refresh DROPs
    #[arg(long)]
    create_only: bool,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Quiet output (errors only)
    #[arg(short, long)]
    quiet: bool,
}

fn main() {
    let cli = Cli::parse();

    // Initialize logging
    if cli.quiet {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("error")).init();
    } else if cli.verbose {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("debug")).init();
    } else {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    }

    if let Err(e) = run(&cli) {
        eprintln!("Error: {:#}", e);
        process::exit(1);
    }
}

fn run(cli: &Cli) -> anyhow::Result<()> {
    let vendor: Vendor = cli.vendor.parse()?;

    let text = fs::read_to_string(&cli.schema_source)
        .with_context(|| format!("failed to read {}", cli.schema_source.display()))?;
    let schema: Schema = serde_json::from_str(&text)
        .with_context(|| format!("invalid schema document {}", cli.schema_source.display()))?;

    let compilation = Compiler::new(vendor)
        .compile(&schema)
        .with_context(|| format!("failed to compile schema '{}'", schema.name))?;

    if !cli.quiet {
        for warning in &compilation.warnings {
            eprintln!("Warning: {}", warning);
        }
    }

    let statements: Vec<_> = if cli.create_only {
        compilation
            .statements
            .iter()
            .filter(|s| s.kind == StatementKind::Create)
            .cloned()
            .collect()
    } else {
        compilation.statements.clone()
    };

    let output = cli
        .output
        .clone()
        .unwrap_or_else(|| cli.schema_source.with_file_name(format!("{}.sql", schema.name)));
    write_statement_file(&output, &statements)
        .with_context(|| format!("failed to write {}", output.display()))?;

    if !cli.quiet {
        println!(
            "Compiled {} table(s) into {} statement(s) for {} -> {}",
            compilation.column_counts.len(),
            statements.len(),
            vendor,
            output.display()
        );
        for (table, count) in &compilation.column_counts {
            println!("  {} ({} column(s))", table, count);
        }
    }

    Ok(())
}
