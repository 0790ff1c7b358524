//! Ignore policy: which categories of difference the diff engine suppresses.
//!
//! A policy is plain configuration grouped by category (table, column,
//! index) and can be loaded from JSON. Fields missing from a JSON file keep
//! the values of [`IgnorePolicy::default`].

use std::collections::BTreeSet;
use std::fmt;
use std::path::Path;
use std::sync::Arc;

use oxide_ddl::ast::{ColumnOptionKind, TableOptionKind};
use serde::{Deserialize, Serialize};

use crate::error::{DiffError, Result};

/// Decides whether a source name and a target name denote the same object.
pub type NameMatcher = Arc<dyn Fn(&str, &str) -> bool + Send + Sync>;

/// Every flag accepted by [`IgnorePolicy::set_flag`].
pub const IGNORE_FLAGS: &[&str] = &[
    "table.diff",
    "table.append",
    "table.remove",
    "table.option.engine",
    "table.option.charset",
    "table.option.row_format",
    "table.option.auto_increment",
    "column.diff",
    "column.append",
    "column.remove",
    "column.option.null",
    "column.option.comment",
    "index.diff",
    "index.append",
    "index.remove",
    "index.option",
];

/// Table options that can be ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TableOptionIgnores {
    pub engine: bool,
    pub charset: bool,
    pub row_format: bool,
    pub auto_increment: bool,
}

impl Default for TableOptionIgnores {
    fn default() -> Self {
        Self {
            engine: true,
            charset: true,
            row_format: true,
            auto_increment: true,
        }
    }
}

/// Table-level ignores.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TableIgnores {
    /// Skip comparing tables present on both sides.
    pub diff: bool,
    /// Skip creating tables only the target has.
    pub append: bool,
    /// Skip dropping tables only the source has.
    pub remove: bool,
    pub options: TableOptionIgnores,
}

/// Column options that can be ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColumnOptionIgnores {
    /// The explicit `NULL` marker.
    pub null: bool,
    pub comment: bool,
}

impl Default for ColumnOptionIgnores {
    fn default() -> Self {
        Self {
            null: true,
            comment: false,
        }
    }
}

/// Column-level ignores.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColumnIgnores {
    pub diff: bool,
    pub append: bool,
    pub remove: bool,
    pub options: ColumnOptionIgnores,
    /// Columns left out of the comparison entirely.
    pub names: BTreeSet<String>,
}

/// Index and constraint ignores.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IndexIgnores {
    pub diff: bool,
    pub append: bool,
    pub remove: bool,
    /// Compare indexes without their index options.
    pub options: bool,
}

impl Default for IndexIgnores {
    fn default() -> Self {
        Self {
            diff: false,
            append: false,
            remove: false,
            options: true,
        }
    }
}

/// The categories of difference to suppress, plus optional name matchers.
#[derive(Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct IgnorePolicy {
    pub table: TableIgnores,
    pub column: ColumnIgnores,
    pub index: IndexIgnores,
    #[serde(skip)]
    column_matcher: Option<NameMatcher>,
    #[serde(skip)]
    index_matcher: Option<NameMatcher>,
}

impl IgnorePolicy {
    /// A policy that ignores nothing.
    #[must_use]
    pub fn none() -> Self {
        Self {
            table: TableIgnores {
                options: TableOptionIgnores {
                    engine: false,
                    charset: false,
                    row_format: false,
                    auto_increment: false,
                },
                ..TableIgnores::default()
            },
            column: ColumnIgnores {
                options: ColumnOptionIgnores {
                    null: false,
                    comment: false,
                },
                ..ColumnIgnores::default()
            },
            index: IndexIgnores {
                options: false,
                ..IndexIgnores::default()
            },
            column_matcher: None,
            index_matcher: None,
        }
    }

    /// Loads a policy from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not a valid policy.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Turns on one ignore flag by name (see [`IGNORE_FLAGS`]).
    ///
    /// `column.comment` is accepted for `column.option.comment`, and so on
    /// for the other option flags.
    ///
    /// # Errors
    ///
    /// Returns [`DiffError::UnknownIgnoreFlag`] for unknown names.
    pub fn set_flag(&mut self, flag: &str) -> Result<()> {
        let slot = match flag {
            "table.diff" => &mut self.table.diff,
            "table.append" => &mut self.table.append,
            "table.remove" => &mut self.table.remove,
            "table.option.engine" | "table.engine" => &mut self.table.options.engine,
            "table.option.charset" | "table.charset" => &mut self.table.options.charset,
            "table.option.row_format" | "table.row_format" => &mut self.table.options.row_format,
            "table.option.auto_increment" | "table.auto_increment" => {
                &mut self.table.options.auto_increment
            }
            "column.diff" => &mut self.column.diff,
            "column.append" => &mut self.column.append,
            "column.remove" => &mut self.column.remove,
            "column.option.null" | "column.null" => &mut self.column.options.null,
            "column.option.comment" | "column.comment" => &mut self.column.options.comment,
            "index.diff" => &mut self.index.diff,
            "index.append" => &mut self.index.append,
            "index.remove" => &mut self.index.remove,
            "index.option" | "index.options" => &mut self.index.options,
            _ => return Err(DiffError::UnknownIgnoreFlag(flag.to_string())),
        };
        *slot = true;
        Ok(())
    }

    /// Adds a column name to leave out of the comparison.
    #[must_use]
    pub fn ignore_column(mut self, name: impl Into<String>) -> Self {
        self.column.names.insert(name.into());
        self
    }

    /// Sets the predicate deciding which source and target columns match.
    #[must_use]
    pub fn with_column_matcher(
        mut self,
        matcher: impl Fn(&str, &str) -> bool + Send + Sync + 'static,
    ) -> Self {
        self.column_matcher = Some(Arc::new(matcher));
        self
    }

    /// Sets the predicate deciding which source and target constraints match.
    #[must_use]
    pub fn with_index_matcher(
        mut self,
        matcher: impl Fn(&str, &str) -> bool + Send + Sync + 'static,
    ) -> Self {
        self.index_matcher = Some(Arc::new(matcher));
        self
    }

    /// Returns true if the source and target columns are the same column.
    #[must_use]
    pub fn columns_considered_equal(&self, source: &str, target: &str) -> bool {
        self.column_matcher
            .as_ref()
            .map_or(source == target, |matcher| matcher(source, target))
    }

    /// Returns true if the source and target constraints are the same one.
    #[must_use]
    pub fn indices_considered_equal(&self, source: &str, target: &str) -> bool {
        self.index_matcher
            .as_ref()
            .map_or(source == target, |matcher| matcher(source, target))
    }

    /// Returns true if the column is left out of the comparison.
    #[must_use]
    pub fn ignores_column(&self, name: &str) -> bool {
        self.column.names.contains(name)
    }

    /// Returns true if table options of this kind are filtered out.
    #[must_use]
    pub const fn ignores_table_option(&self, kind: &TableOptionKind) -> bool {
        let options = &self.table.options;
        match kind {
            TableOptionKind::Engine => options.engine,
            TableOptionKind::Charset => options.charset,
            TableOptionKind::RowFormat => options.row_format,
            TableOptionKind::AutoIncrement => options.auto_increment,
            _ => false,
        }
    }

    /// Returns true if column options of this kind are filtered out.
    #[must_use]
    pub const fn ignores_column_option(&self, kind: ColumnOptionKind) -> bool {
        match kind {
            ColumnOptionKind::Null => self.column.options.null,
            ColumnOptionKind::Comment => self.column.options.comment,
            _ => false,
        }
    }
}

impl fmt::Debug for IgnorePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IgnorePolicy")
            .field("table", &self.table)
            .field("column", &self.column)
            .field("index", &self.index)
            .field("column_matcher", &self.column_matcher.is_some())
            .field("index_matcher", &self.index_matcher.is_some())
            .finish()
    }
}
