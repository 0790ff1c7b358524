//! Error types for schema replay and diffing.

use oxide_ddl::ParseError;

/// Errors raised while replaying a statement against the schema store.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ReplayError {
    /// The statement references a table that does not exist.
    #[error("Table '{0}' does not exist")]
    MissingTable(String),

    /// The statement references a column that does not exist.
    #[error("Column '{column}' does not exist in table '{table}'")]
    MissingColumn {
        /// Table name.
        table: String,
        /// Column name.
        column: String,
    },

    /// The statement references an index or constraint that does not exist.
    #[error("Index '{index}' does not exist in table '{table}'")]
    MissingIndex {
        /// Table name.
        table: String,
        /// Index or constraint name.
        index: String,
    },

    /// The statement adds a column that already exists.
    #[error("Column '{column}' already exists in table '{table}'")]
    DuplicateColumn {
        /// Table name.
        table: String,
        /// Column name.
        column: String,
    },

    /// The statement adds an index or constraint that already exists.
    #[error("Index '{index}' already exists in table '{table}'")]
    DuplicateIndex {
        /// Table name.
        table: String,
        /// Index or constraint name.
        index: String,
    },

    /// The statement renames a table onto an existing one.
    #[error("Table '{0}' already exists")]
    TableExists(String),
}

/// Errors that can occur while building snapshots or computing a diff.
#[derive(Debug, thiserror::Error)]
pub enum DiffError {
    /// The SQL text could not be parsed.
    #[error("Parse error: {0}")]
    Parse(#[from] ParseError),

    /// A parsed statement could not be replayed.
    #[error("statement {statement}: {source}")]
    Replay {
        /// 1-based ordinal of the failing statement.
        statement: usize,
        /// What went wrong.
        source: ReplayError,
    },

    /// Database error during introspection.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// IO error (reading SQL or policy files).
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed ignore policy file.
    #[error("Invalid ignore policy: {0}")]
    Policy(#[from] serde_json::Error),

    /// An ignore flag name that does not exist.
    #[error("Unknown ignore flag: {0}")]
    UnknownIgnoreFlag(String),
}

/// Result type for schema diff operations.
pub type Result<T> = std::result::Result<T, DiffError>;
