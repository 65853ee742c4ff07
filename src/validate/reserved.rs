//! Reserved-word tables keyed by SQL standard tag.
//!
//! Curated subsets: the point is catching identifiers that will break on some
//! engine, not reproducing every standard appendix.

/// A standard (or vendor) a word can be reserved in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Standard {
    Sql92,
    Sql2003,
    Postgres,
    Mysql,
    Oracle,
    SqlServer,
}

impl Standard {
    pub fn tag(&self) -> &'static str {
        match self {
            Standard::Sql92 => "SQL-92",
            Standard::Sql2003 => "SQL:2003",
            Standard::Postgres => "PostgreSQL",
            Standard::Mysql => "MySQL",
            Standard::Oracle => "Oracle",
            Standard::SqlServer => "SQL Server",
        }
    }
}

/// Words reserved by both SQL-92 and SQL:2003.
const CORE: &[&str] = &[
    "all", "alter", "and", "any", "as", "asc", "between", "by", "case", "cast",
    "check", "column", "constraint", "create", "cross", "current_date",
    "current_time", "current_timestamp", "default", "delete", "desc",
    "distinct", "drop", "else", "end", "exists", "foreign", "from", "full",
    "grant", "group", "having", "in", "inner", "insert", "into", "is", "join",
    "key", "left", "like", "not", "null", "on", "or", "order", "outer",
    "primary", "references", "revoke", "right", "select", "set", "table",
    "then", "to", "union", "unique", "update", "user", "values", "view",
    "when", "where", "with",
];

/// SQL-92 only.
const SQL92_ONLY: &[&str] = &[
    "authorization", "cascade", "catalog", "collate", "continue", "cursor",
    "declare", "domain", "exception", "fetch", "goto", "privileges", "schema",
    "section", "session", "size", "sqlcode", "sqlerror", "temporary", "work",
];

/// SQL:2003 additions.
const SQL2003_ONLY: &[&str] = &[
    "array", "bigint", "binary", "blob", "boolean", "call", "clob", "cube",
    "current_role", "cycle", "dynamic", "element", "filter", "free", "grouping",
    "hold", "large", "lateral", "member", "merge", "method", "modifies",
    "multiset", "new", "none", "over", "partition", "range", "recursive",
    "release", "rollup", "savepoint", "scope", "sensitive", "similar",
    "specific", "submultiset", "symmetric", "system", "tablesample", "treat",
    "trigger", "unnest", "window", "within", "without",
];

/// Common vendor-specific reserved words not covered above.
const POSTGRES_ONLY: &[&str] = &["analyse", "analyze", "freeze", "ilike", "isnull", "notnull", "offset", "returning", "verbose"];
const MYSQL_ONLY: &[&str] = &["accessible", "analyze", "change", "databases", "div", "explain", "fulltext", "keys", "kill", "limit", "lock", "regexp", "rlike", "show", "straight_join", "unsigned", "zerofill"];
const ORACLE_ONLY: &[&str] = &["access", "audit", "cluster", "comment", "compress", "connect", "file", "identified", "increment", "initial", "level", "long", "maxextents", "minus", "mode", "nowait", "number", "pctfree", "prior", "raw", "rename", "resource", "rowid", "rownum", "share", "start", "successful", "synonym", "sysdate", "uid", "validate", "varchar2"];
const SQLSERVER_ONLY: &[&str] = &["backup", "break", "browse", "bulk", "checkpoint", "clustered", "compute", "containstable", "dbcc", "deny", "disk", "dump", "errlvl", "fillfactor", "freetext", "holdlock", "identity_insert", "kill", "nocheck", "nonclustered", "offsets", "openquery", "pivot", "print", "raiserror", "readtext", "reconfigure", "replication", "restore", "rowcount", "rule", "setuser", "shutdown", "textsize", "top", "tran", "truncate", "unpivot", "updatetext", "waitfor", "writetext"];

/// Standards a name is reserved in, lowest-level check used by the naming
/// pass. The comparison is case-insensitive.
pub fn reserved_in(name: &str) -> Vec<Standard> {
    let lower = name.to_lowercase();
    let word = lower.as_str();
    let mut hits = Vec::new();

    if CORE.contains(&word) {
        hits.push(Standard::Sql92);
        hits.push(Standard::Sql2003);
    }
    if SQL92_ONLY.contains(&word) {
        hits.push(Standard::Sql92);
    }
    if SQL2003_ONLY.contains(&word) {
        hits.push(Standard::Sql2003);
    }
    if POSTGRES_ONLY.contains(&word) {
        hits.push(Standard::Postgres);
    }
    if MYSQL_ONLY.contains(&word) {
        hits.push(Standard::Mysql);
    }
    if ORACLE_ONLY.contains(&word) {
        hits.push(Standard::Oracle);
    }
    if SQLSERVER_ONLY.contains(&word) {
        hits.push(Standard::SqlServer);
    }

    hits.dedup();
    hits
}

/// Comma-joined tag list for diagnostics.
pub fn format_standards(standards: &[Standard]) -> String {
    standards
        .iter()
        .map(Standard::tag)
        .collect::<Vec<_>>()
        .join(", ")
}
