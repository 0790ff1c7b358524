//! Diff engine.
//!
//! This module compares a source and a target [`SchemaSnapshot`] and
//! synthesizes the statements that turn the source into the target.

use std::collections::BTreeMap;
use std::fmt;

use oxide_ddl::ast::{
    AlterSpec, ColumnPosition, CreateTableStatement, ObjectName, TableDefinition, TableOption,
};
use oxide_ddl::Statement;
use tracing::{debug, warn};

use crate::compare::{column_equivalent, constraint_equivalent, options_equivalent};
use crate::error::Result;
use crate::policy::IgnorePolicy;
use crate::snapshot::SchemaSnapshot;
use crate::store::SchemaStore;

/// A statement produced by the diff engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChangeStatement {
    /// Drop a table only the source has.
    DropTable(ObjectName),
    /// Create a table only the target has, with its full definition.
    CreateTable(TableDefinition),
    /// Alter a table both sides have.
    AlterTable {
        /// Target table name.
        table: ObjectName,
        /// Never empty.
        specs: Vec<AlterSpec>,
    },
}

impl ChangeStatement {
    /// Returns the name of the table this statement changes.
    #[must_use]
    pub const fn table_name(&self) -> &ObjectName {
        match self {
            Self::DropTable(name) | Self::AlterTable { table: name, .. } => name,
            Self::CreateTable(table) => &table.name,
        }
    }
}

impl From<ChangeStatement> for Statement {
    fn from(change: ChangeStatement) -> Self {
        match change {
            ChangeStatement::DropTable(name) => Self::DropTable {
                temporary: false,
                if_exists: false,
                tables: vec![name],
            },
            ChangeStatement::CreateTable(table) => Self::CreateTable(CreateTableStatement {
                temporary: false,
                if_not_exists: false,
                table,
            }),
            ChangeStatement::AlterTable { table, specs } => Self::AlterTable { table, specs },
        }
    }
}

impl fmt::Display for ChangeStatement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DropTable(name) => write!(f, "DROP TABLE {name}"),
            Self::CreateTable(table) => table.fmt(f),
            Self::AlterTable { table, specs } => {
                let specs: Vec<String> = specs.iter().map(ToString::to_string).collect();
                write!(f, "ALTER TABLE {table} {}", specs.join(", "))
            }
        }
    }
}

/// Replays both SQL texts into stores scoped to `database` and diffs the
/// resulting snapshots.
///
/// # Errors
///
/// Returns an error if either side fails to parse or replay.
pub fn diff_sql(
    database: Option<&str>,
    source_sql: &str,
    target_sql: &str,
    policy: &IgnorePolicy,
) -> Result<Vec<ChangeStatement>> {
    let mut source = SchemaStore::new(database);
    source.apply(source_sql)?;
    let mut target = SchemaStore::new(database);
    target.apply(target_sql)?;
    Ok(diff_snapshots(
        &source.into_snapshot(),
        &target.into_snapshot(),
        policy,
    ))
}

/// Compares two snapshots.
///
/// Statements for tables the source has come first, in table-name order,
/// followed by `CREATE TABLE` for the tables only the target has.
#[must_use]
pub fn diff_snapshots(
    source: &SchemaSnapshot,
    target: &SchemaSnapshot,
    policy: &IgnorePolicy,
) -> Vec<ChangeStatement> {
    let mut changes = Vec::new();
    let mut remaining: BTreeMap<&str, &TableDefinition> = target
        .tables
        .iter()
        .map(|(name, table)| (name.as_str(), table))
        .collect();

    for (name, source_table) in &source.tables {
        match remaining.remove(name.as_str()) {
            None => {
                if !policy.table.remove {
                    changes.push(ChangeStatement::DropTable(source_table.name.clone()));
                }
            }
            Some(target_table) => {
                if policy.table.diff {
                    continue;
                }
                if let Some(alter) = diff_table(source_table, target_table, policy) {
                    changes.push(alter);
                }
            }
        }
    }

    if !policy.table.append {
        changes.extend(
            remaining
                .into_values()
                .map(|table| ChangeStatement::CreateTable(table.clone())),
        );
    }

    for change in &changes {
        debug!(table = %change.table_name(), "{change}");
    }
    changes
}

/// Compares two definitions of the same table.
///
/// Returns `None` when nothing differs under the policy.
#[must_use]
pub fn diff_table(
    source: &TableDefinition,
    target: &TableDefinition,
    policy: &IgnorePolicy,
) -> Option<ChangeStatement> {
    let mut specs = diff_columns(source, target, policy);
    specs.extend(diff_constraints(source, target, policy));

    if !options_equivalent(&source.options, &target.options, policy) {
        let options = reasserted_options(source, target, policy);
        if options.is_empty() {
            warn!(
                table = %target.name,
                "Table options differ only in options MySQL cannot reset"
            );
        } else {
            specs.push(AlterSpec::TableOptions(options));
        }
    }

    if specs.is_empty() {
        None
    } else {
        Some(ChangeStatement::AlterTable {
            table: target.name.clone(),
            specs,
        })
    }
}

/// The target's full option list, followed by a reset for every compared
/// option kind the source declares and the target leaves out.
fn reasserted_options(
    source: &TableDefinition,
    target: &TableDefinition,
    policy: &IgnorePolicy,
) -> Vec<TableOption> {
    let mut options = target.options.clone();
    options.extend(
        source
            .options
            .iter()
            .filter(|o| !o.is_reset())
            .map(TableOption::kind)
            .filter(|kind| !policy.ignores_table_option(kind) && target.option(kind).is_none())
            .filter_map(|kind| TableOption::reset(&kind)),
    );
    options
}

fn diff_columns(
    source: &TableDefinition,
    target: &TableDefinition,
    policy: &IgnorePolicy,
) -> Vec<AlterSpec> {
    let mut specs = Vec::new();
    let mut unmatched: Vec<_> = target
        .columns
        .iter()
        .filter(|c| !policy.ignores_column(&c.name))
        .collect();
    let mut removed = Vec::new();

    for source_column in source
        .columns
        .iter()
        .filter(|c| !policy.ignores_column(&c.name))
    {
        let Some(i) = unmatched
            .iter()
            .position(|t| policy.columns_considered_equal(&source_column.name, &t.name))
        else {
            removed.push(source_column);
            continue;
        };
        let target_column = unmatched.remove(i);
        if !policy.column.diff && !column_equivalent(source_column, target_column, policy) {
            specs.push(AlterSpec::ModifyColumn {
                column: target_column.clone(),
                position: ColumnPosition::None,
            });
        }
    }

    if !policy.column.remove {
        specs.extend(
            removed
                .into_iter()
                .map(|column| AlterSpec::DropColumn(column.name.clone())),
        );
    }

    if !policy.column.append && !unmatched.is_empty() {
        specs.push(AlterSpec::AddColumns {
            columns: unmatched.into_iter().cloned().collect(),
            position: ColumnPosition::None,
        });
    }

    specs
}

/// A changed constraint other than the primary key is dropped with
/// `DROP INDEX` whatever its kind; MySQL rejects that form for foreign keys
/// and checks, which need `DROP FOREIGN KEY` and `DROP CHECK`.
fn diff_constraints(
    source: &TableDefinition,
    target: &TableDefinition,
    policy: &IgnorePolicy,
) -> Vec<AlterSpec> {
    let mut specs = Vec::new();
    let mut unmatched: Vec<_> = target.constraints.iter().collect();

    for source_constraint in &source.constraints {
        let Some(i) = unmatched
            .iter()
            .position(|t| policy.indices_considered_equal(&source_constraint.name, &t.name))
        else {
            if !policy.index.remove {
                specs.push(AlterSpec::DropIndex(source_constraint.name.clone()));
            }
            continue;
        };
        let target_constraint = unmatched.remove(i);
        if policy.index.diff
            || constraint_equivalent(source_constraint, target_constraint, policy)
        {
            continue;
        }
        if source_constraint.is_primary_key() {
            specs.push(AlterSpec::DropPrimaryKey);
        } else {
            specs.push(AlterSpec::DropIndex(source_constraint.name.clone()));
        }
        specs.push(AlterSpec::AddConstraint(target_constraint.clone()));
    }

    if !policy.index.append {
        specs.extend(
            unmatched
                .into_iter()
                .map(|constraint| AlterSpec::AddConstraint(constraint.clone())),
        );
    }

    specs
}

/// Renders change statements as a script, one `;`-terminated statement per
/// line.
#[must_use]
pub fn to_sql_script(changes: &[ChangeStatement]) -> String {
    changes.iter().map(|change| format!("{change};\n")).collect()
}
