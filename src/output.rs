//! Statement file sink.
//!
//! Concatenates compiled statements into a single script: each statement
//! terminated by `;` and separated by a blank line. Missing parent
//! directories are created; a path segment that collides with an existing
//! plain file is an error rather than a cryptic create_dir failure.

use std::fs;
use std::io;
use std::path::Path;

use log::info;

use crate::compiler::Statement;

/// Render the statement sequence as script text.
pub fn render_script(statements: &[Statement]) -> String {
    statements
        .iter()
        .map(|s| format!("{};", s.sql))
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// Write the statement script to `path`, creating missing parent
/// directories.
pub fn write_statement_file(path: &Path, statements: &[Statement]) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        ensure_directory(parent)?;
    }
    let mut script = render_script(statements);
    if !script.is_empty() {
        script.push('\n');
    }
    fs::write(path, script)?;
    info!(
        "wrote {} statement(s) to {}",
        statements.len(),
        path.display()
    );
    Ok(())
}

/// create_dir_all, but with an explicit error when a path segment is an
/// existing plain file.
fn ensure_directory(dir: &Path) -> io::Result<()> {
    for ancestor in dir.ancestors().collect::<Vec<_>>().into_iter().rev() {
        if ancestor.as_os_str().is_empty() {
            continue;
        }
        if ancestor.is_file() {
            return Err(io::Error::new(
                io::ErrorKind::AlreadyExists,
                format!(
                    "cannot create directory {}: {} is an existing file",
                    dir.display(),
                    ancestor.display()
                ),
            ));
        }
    }
    fs::create_dir_all(dir)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compiler::StatementKind;

    fn stmt(sql: &str) -> Statement {
        Statement {
            kind: StatementKind::Create,
            table: "t".to_string(),
            sql: sql.to_string(),
        }
    }

    #[test]
    fn test_render_script_separators() {
        let script = render_script(&[stmt("CREATE TABLE a (\n    x INT NULL\n)"), stmt("DROP TABLE a")]);
        assert_eq!(
            script,
            "CREATE TABLE a (\n    x INT NULL\n);\n\nDROP TABLE a;"
        );
    }

    #[test]
    fn test_write_creates_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/deeper/schema.sql");
        write_statement_file(&path, &[stmt("DROP TABLE a")]).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "DROP TABLE a;\n");
    }

    #[test]
    fn test_file_in_path_segment_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("blocker");
        fs::write(&blocker, "not a directory").unwrap();
        let path = blocker.join("schema.sql");
        let err = write_statement_file(&path, &[stmt("DROP TABLE a")]).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::AlreadyExists);
        assert!(err.to_string().contains("existing file"));
    }
}
