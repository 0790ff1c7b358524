//! Virtual schema store.
//!
//! Replays DDL statements against an in-memory registry of tables, as if
//! they had run on a MySQL server, and hands out [`SchemaSnapshot`]s of the
//! result.

use std::collections::BTreeMap;

use oxide_ddl::ast::{
    AlterSpec, ColumnDef, ColumnOption, ColumnPosition, Constraint, CreateTableStatement,
    ObjectName, TableDefinition,
};
use oxide_ddl::Statement;
use tracing::{debug, trace, warn};

use crate::error::{DiffError, ReplayError, Result};
use crate::snapshot::SchemaSnapshot;

type ReplayResult<T> = std::result::Result<T, ReplayError>;

#[derive(Debug, Clone, Default)]
struct Registry {
    /// Tables per database; `None` is the unscoped default database.
    databases: BTreeMap<Option<String>, SchemaSnapshot>,
    current: Option<String>,
}

/// In-memory schema state built by replaying SQL.
#[derive(Debug, Clone, Default)]
pub struct SchemaStore {
    scope: Option<String>,
    registry: Registry,
}

impl SchemaStore {
    /// Creates an empty store whose current database is `database`.
    #[must_use]
    pub fn new(database: Option<&str>) -> Self {
        let scope = database.map(str::to_string);
        Self {
            registry: Registry {
                databases: BTreeMap::new(),
                current: scope.clone(),
            },
            scope,
        }
    }

    /// Parses `sql` and replays every statement in it.
    ///
    /// Either every statement is applied or, on the first parse or replay
    /// error, none is.
    ///
    /// # Errors
    ///
    /// Returns [`DiffError::Parse`] for malformed SQL and
    /// [`DiffError::Replay`] for statements referencing missing objects.
    pub fn apply(&mut self, sql: &str) -> Result<()> {
        let statements = oxide_ddl::parse(sql)?;
        self.apply_statements(&statements)
    }

    /// Replays already parsed statements, all or nothing.
    ///
    /// # Errors
    ///
    /// Returns [`DiffError::Replay`] tagged with the 1-based ordinal of the
    /// failing statement.
    pub fn apply_statements(&mut self, statements: &[Statement]) -> Result<()> {
        let mut registry = self.registry.clone();
        for (i, statement) in statements.iter().enumerate() {
            registry
                .replay(statement)
                .map_err(|source| DiffError::Replay {
                    statement: i + 1,
                    source,
                })?;
        }
        self.registry = registry;
        Ok(())
    }

    /// Returns the current database, as changed by `USE`.
    #[must_use]
    pub fn current_database(&self) -> Option<&str> {
        self.registry.current.as_deref()
    }

    /// Returns a snapshot of the given database.
    #[must_use]
    pub fn snapshot(&self, database: Option<&str>) -> SchemaSnapshot {
        self.registry
            .databases
            .get(&database.map(str::to_string))
            .cloned()
            .unwrap_or_default()
    }

    /// Consumes the store and returns the snapshot of the database it was
    /// created for.
    #[must_use]
    pub fn into_snapshot(mut self) -> SchemaSnapshot {
        self.registry
            .databases
            .remove(&self.scope)
            .unwrap_or_default()
    }
}

impl Registry {
    fn replay(&mut self, statement: &Statement) -> ReplayResult<()> {
        match statement {
            Statement::CreateTable(create) => self.create_table(create),
            Statement::DropTable {
                temporary,
                tables,
                ..
            } => {
                if *temporary {
                    warn!("Skipping DROP TEMPORARY TABLE");
                    return Ok(());
                }
                for name in tables {
                    debug!(table = %name, "DROP TABLE");
                    let (database, table) = self.resolve(name);
                    if let Some(snapshot) = self.databases.get_mut(&database) {
                        snapshot.tables.remove(&table);
                    }
                }
                Ok(())
            }
            Statement::AlterTable { table, specs } => self.alter_table(table, specs),
            Statement::CreateIndex { table, constraint } => {
                self.alter_table(table, &[AlterSpec::AddConstraint(constraint.clone())])
            }
            Statement::DropIndex { name, table } => {
                self.alter_table(table, &[AlterSpec::DropIndex(name.clone())])
            }
            Statement::RenameTable { renames } => {
                for (from, to) in renames {
                    debug!(from = %from, to = %to, "RENAME TABLE");
                    let definition = self.take_table(from)?;
                    self.put_renamed(definition, to)?;
                }
                Ok(())
            }
            Statement::Use(database) => {
                debug!(database = %database, "USE");
                self.current = Some(database.clone());
                Ok(())
            }
            Statement::Other { keyword, .. } => {
                trace!(keyword = %keyword, "Skipping statement");
                Ok(())
            }
        }
    }

    /// Splits a possibly qualified name into registry key and table name.
    fn resolve(&self, name: &ObjectName) -> (Option<String>, String) {
        let database = name.schema.clone().or_else(|| self.current.clone());
        (database, name.name.clone())
    }

    fn create_table(&mut self, create: &CreateTableStatement) -> ReplayResult<()> {
        if create.temporary {
            warn!(table = %create.table.name, "Skipping CREATE TEMPORARY TABLE");
            return Ok(());
        }
        let (database, name) = self.resolve(&create.table.name);
        let snapshot = self.databases.entry(database).or_default();
        if create.if_not_exists && snapshot.tables.contains_key(&name) {
            debug!(table = %name, "CREATE TABLE IF NOT EXISTS: keeping existing table");
            return Ok(());
        }
        debug!(table = %name, "CREATE TABLE");
        let mut definition = create.table.clone();
        definition.name = ObjectName::new(name.clone());
        snapshot.tables.insert(name, definition);
        Ok(())
    }

    fn take_table(&mut self, name: &ObjectName) -> ReplayResult<TableDefinition> {
        let (database, table) = self.resolve(name);
        self.databases
            .get_mut(&database)
            .and_then(|snapshot| snapshot.tables.remove(&table))
            .ok_or_else(|| ReplayError::MissingTable(plain_name(name)))
    }

    fn put_renamed(&mut self, mut definition: TableDefinition, to: &ObjectName) -> ReplayResult<()> {
        let (database, table) = self.resolve(to);
        let snapshot = self.databases.entry(database).or_default();
        if snapshot.tables.contains_key(&table) {
            return Err(ReplayError::TableExists(plain_name(to)));
        }
        definition.name = ObjectName::new(table.clone());
        snapshot.tables.insert(table, definition);
        Ok(())
    }

    fn alter_table(&mut self, name: &ObjectName, specs: &[AlterSpec]) -> ReplayResult<()> {
        debug!(table = %name, specs = specs.len(), "ALTER TABLE");
        let mut definition = self.take_table(name)?;
        let mut rename = None;
        let mut pruned = Vec::new();
        for spec in specs {
            if let AlterSpec::RenameTable(to) = spec {
                rename = Some(to.clone());
            } else {
                apply_spec(&mut definition, spec, &mut pruned)?;
            }
        }
        match rename {
            Some(to) => self.put_renamed(definition, &to),
            None => self.put_renamed(definition, name),
        }
    }
}

/// Applies one ALTER TABLE specification to a table definition.
///
/// `pruned` collects indexes that lost their last part to a dropped column
/// earlier in the same statement; dropping one of them again is a no-op, as
/// it is on the server.
fn apply_spec(
    table: &mut TableDefinition,
    spec: &AlterSpec,
    pruned: &mut Vec<String>,
) -> ReplayResult<()> {
    match spec {
        AlterSpec::AddColumns { columns, position } => {
            for column in columns {
                if table.column(&column.name).is_some() {
                    return Err(duplicate_column(table, &column.name));
                }
                let at = if columns.len() == 1 {
                    insert_position(table, position)?
                } else {
                    table.columns.len()
                };
                trace!(column = %column.name, at, "ADD COLUMN");
                table.columns.insert(at, column.clone());
            }
        }
        AlterSpec::DropColumn(name) => {
            let at = column_index(table, name)?;
            table.columns.remove(at);
            pruned.extend(remove_key_parts(table, name));
        }
        AlterSpec::ModifyColumn { column, position } => {
            let at = column_index(table, &column.name)?;
            replace_column(table, at, column.clone(), position)?;
        }
        AlterSpec::ChangeColumn {
            old_name,
            column,
            position,
        } => {
            let at = column_index(table, old_name)?;
            if column.name != *old_name && table.column(&column.name).is_some() {
                return Err(duplicate_column(table, &column.name));
            }
            replace_column(table, at, column.clone(), position)?;
            rename_key_parts(table, old_name, &column.name);
        }
        AlterSpec::RenameColumn { old_name, new_name } => {
            let at = column_index(table, old_name)?;
            if new_name != old_name && table.column(new_name).is_some() {
                return Err(duplicate_column(table, new_name));
            }
            table.columns[at].name.clone_from(new_name);
            rename_key_parts(table, old_name, new_name);
        }
        AlterSpec::AlterColumnDefault { column, default } => {
            let at = column_index(table, column)?;
            let options = &mut table.columns[at].options;
            let existing = options
                .iter()
                .position(|o| matches!(o, ColumnOption::Default(_)));
            match (existing, default) {
                (Some(i), Some(expr)) => options[i] = ColumnOption::Default(expr.clone()),
                (None, Some(expr)) => options.push(ColumnOption::Default(expr.clone())),
                (Some(i), None) => {
                    options.remove(i);
                }
                (None, None) => {}
            }
        }
        AlterSpec::AddConstraint(constraint) => add_constraint(table, constraint)?,
        AlterSpec::DropIndex(name)
        | AlterSpec::DropForeignKey(name)
        | AlterSpec::DropConstraint(name) => {
            if pruned.contains(name) {
                trace!(index = %name, "Index already removed with its column");
                return Ok(());
            }
            let at = constraint_index(table, name)?;
            table.constraints.remove(at);
        }
        AlterSpec::DropPrimaryKey => {
            let at = constraint_index(table, Constraint::PRIMARY)?;
            table.constraints.remove(at);
        }
        AlterSpec::RenameIndex { old_name, new_name } => {
            let at = constraint_index(table, old_name)?;
            if new_name != old_name && table.constraint(new_name).is_some() {
                return Err(duplicate_index(table, new_name));
            }
            table.constraints[at].name.clone_from(new_name);
        }
        AlterSpec::TableOptions(options) => {
            for option in options {
                if option.is_reset() {
                    let kind = option.kind();
                    table.options.retain(|o| o.kind() != kind);
                } else {
                    table.set_option(option.clone());
                }
            }
        }
        // handled by the caller
        AlterSpec::RenameTable(_) => {}
        AlterSpec::Algorithm(_) | AlterSpec::Lock(_) => {}
    }
    Ok(())
}

fn add_constraint(table: &mut TableDefinition, constraint: &Constraint) -> ReplayResult<()> {
    if constraint.is_primary_key() && table.primary_key().is_some() {
        return Err(duplicate_index(table, Constraint::PRIMARY));
    }
    if !constraint.name.is_empty() && table.constraint(&constraint.name).is_some() {
        return Err(duplicate_index(table, &constraint.name));
    }
    for part in &constraint.parts {
        column_index(table, &part.column)?;
    }
    table.constraints.push(constraint.clone());
    table.name_unnamed_constraints();
    Ok(())
}

fn replace_column(
    table: &mut TableDefinition,
    at: usize,
    column: ColumnDef,
    position: &ColumnPosition,
) -> ReplayResult<()> {
    if *position == ColumnPosition::None {
        table.columns[at] = column;
        return Ok(());
    }
    let removed = table.columns.remove(at);
    match insert_position(table, position) {
        Ok(to) => {
            table.columns.insert(to, column);
            Ok(())
        }
        Err(e) => {
            table.columns.insert(at, removed);
            Err(e)
        }
    }
}

fn insert_position(table: &TableDefinition, position: &ColumnPosition) -> ReplayResult<usize> {
    match position {
        ColumnPosition::None => Ok(table.columns.len()),
        ColumnPosition::First => Ok(0),
        ColumnPosition::After(name) => column_index(table, name).map(|i| i + 1),
    }
}

/// Removes key parts on a dropped column, then any index left without parts.
/// Returns the names of the removed indexes.
fn remove_key_parts(table: &mut TableDefinition, column: &str) -> Vec<String> {
    let mut removed = Vec::new();
    table.constraints.retain_mut(|constraint| {
        if constraint.parts.is_empty() {
            return true;
        }
        constraint.parts.retain(|part| part.column != column);
        if constraint.parts.is_empty() {
            removed.push(constraint.name.clone());
            return false;
        }
        true
    });
    removed
}

fn rename_key_parts(table: &mut TableDefinition, old_name: &str, new_name: &str) {
    for part in table
        .constraints
        .iter_mut()
        .flat_map(|c| c.parts.iter_mut())
        .filter(|p| p.column == old_name)
    {
        part.column = new_name.to_string();
    }
}

fn plain_name(name: &ObjectName) -> String {
    match &name.schema {
        Some(schema) => format!("{schema}.{}", name.name),
        None => name.name.clone(),
    }
}

fn column_index(table: &TableDefinition, name: &str) -> ReplayResult<usize> {
    table
        .column_position(name)
        .ok_or_else(|| ReplayError::MissingColumn {
            table: table.name.name.clone(),
            column: name.to_string(),
        })
}

fn constraint_index(table: &TableDefinition, name: &str) -> ReplayResult<usize> {
    table
        .constraints
        .iter()
        .position(|c| c.name == name)
        .ok_or_else(|| ReplayError::MissingIndex {
            table: table.name.name.clone(),
            index: name.to_string(),
        })
}

fn duplicate_column(table: &TableDefinition, name: &str) -> ReplayError {
    ReplayError::DuplicateColumn {
        table: table.name.name.clone(),
        column: name.to_string(),
    }
}

fn duplicate_index(table: &TableDefinition, name: &str) -> ReplayError {
    ReplayError::DuplicateIndex {
        table: table.name.name.clone(),
        index: name.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store(sql: &str) -> SchemaStore {
        let mut store = SchemaStore::new(Some("shop"));
        store.apply(sql).unwrap();
        store
    }

    fn table(store: &SchemaStore, name: &str) -> TableDefinition {
        store.snapshot(Some("shop")).tables[name].clone()
    }

    fn column_names(table: &TableDefinition) -> Vec<&str> {
        table.columns.iter().map(|c| c.name.as_str()).collect()
    }

    #[test]
    fn test_create_replaces_and_if_not_exists_keeps() {
        let store = store(
            "CREATE TABLE t (a INT);
             CREATE TABLE t (b INT);
             CREATE TABLE IF NOT EXISTS t (c INT);",
        );
        assert_eq!(column_names(&table(&store, "t")), vec!["b"]);
    }

    #[test]
    fn test_drop_missing_table_is_not_an_error() {
        let store = store("DROP TABLE nope; CREATE TABLE t (a INT); DROP TABLE IF EXISTS t;");
        assert!(store.snapshot(Some("shop")).is_empty());
    }

    #[test]
    fn test_qualified_names_and_use() {
        let store = store(
            "CREATE TABLE other.x (a INT);
             CREATE TABLE y (a INT);
             USE other;
             CREATE TABLE z (a INT);",
        );
        assert_eq!(store.current_database(), Some("other"));
        let other = store.snapshot(Some("other"));
        assert_eq!(other.table_names().collect::<Vec<_>>(), vec!["x", "z"]);
        assert_eq!(other.tables["x"].name, ObjectName::new("x"));
        assert_eq!(store.into_snapshot().len(), 1);
    }

    #[test]
    fn test_temporary_tables_are_skipped() {
        let store = store("CREATE TEMPORARY TABLE tmp (a INT); DROP TEMPORARY TABLE tmp;");
        assert!(store.snapshot(Some("shop")).is_empty());
    }

    #[test]
    fn test_alter_column_positions() {
        let store = store(
            "CREATE TABLE t (a INT, b INT);
             ALTER TABLE t ADD c INT FIRST, ADD d INT AFTER a, ADD COLUMN (e INT, f INT);
             ALTER TABLE t MODIFY b BIGINT FIRST;",
        );
        let t = table(&store, "t");
        assert_eq!(column_names(&t), vec!["b", "c", "a", "d", "e", "f"]);
        assert_eq!(t.columns[0].data_type.name, "BIGINT");
    }

    #[test]
    fn test_change_and_rename_column_follow_key_parts() {
        let store = store(
            "CREATE TABLE t (a INT, b INT, KEY idx (a, b));
             ALTER TABLE t CHANGE a a2 INT NOT NULL;
             ALTER TABLE t RENAME COLUMN b TO b2;",
        );
        let t = table(&store, "t");
        assert_eq!(column_names(&t), vec!["a2", "b2"]);
        let parts: Vec<&str> = t.constraints[0]
            .parts
            .iter()
            .map(|p| p.column.as_str())
            .collect();
        assert_eq!(parts, vec!["a2", "b2"]);
    }

    #[test]
    fn test_drop_column_prunes_indexes() {
        let store = store(
            "CREATE TABLE t (a INT, b INT, KEY ab (a, b), KEY only_b (b));
             ALTER TABLE t DROP COLUMN b;",
        );
        let t = table(&store, "t");
        assert_eq!(t.constraints.len(), 1);
        assert_eq!(t.constraints[0].parts.len(), 1);
    }

    #[test]
    fn test_drop_index_pruned_in_same_statement() {
        let store = store(
            "CREATE TABLE t (a INT, c INT, KEY only_c (c));
             ALTER TABLE t DROP COLUMN c, DROP INDEX only_c;",
        );
        assert!(table(&store, "t").constraints.is_empty());
    }

    #[test]
    fn test_alter_defaults() {
        let store = store(
            "CREATE TABLE t (a INT DEFAULT 1 COMMENT 'x', b INT);
             ALTER TABLE t ALTER a SET DEFAULT 2, ALTER b SET DEFAULT 3;
             ALTER TABLE t ALTER COLUMN a DROP DEFAULT;",
        );
        let t = table(&store, "t");
        assert_eq!(t.columns[0].default_value(), None);
        assert_eq!(t.columns[0].comment(), Some("x"));
        assert_eq!(t.columns[1].to_string(), "`b` INT DEFAULT 3");
    }

    #[test]
    fn test_constraints_and_index_statements() {
        let store = store(
            "CREATE TABLE p (id INT, PRIMARY KEY (id));
             CREATE TABLE c (id INT, pid INT);
             ALTER TABLE c ADD PRIMARY KEY (id), ADD FOREIGN KEY (pid) REFERENCES p (id);
             CREATE UNIQUE INDEX ux ON c (pid);
             ALTER TABLE c ADD INDEX (pid);
             ALTER TABLE c RENAME INDEX ux TO ux2;
             DROP INDEX pid ON c;",
        );
        let names: Vec<String> = table(&store, "c")
            .constraints
            .iter()
            .map(|c| c.name.clone())
            .collect();
        assert_eq!(names, vec!["PRIMARY", "c_ibfk_1", "ux2"]);
    }

    #[test]
    fn test_table_options_replace_by_kind() {
        let store = store(
            "CREATE TABLE t (a INT) ENGINE=InnoDB COMMENT='old';
             ALTER TABLE t COMMENT 'new' AUTO_INCREMENT=5;",
        );
        assert_eq!(
            oxide_ddl::ast::render_table_options(&table(&store, "t").options),
            "ENGINE=InnoDB COMMENT='new' AUTO_INCREMENT=5"
        );
    }

    #[test]
    fn test_option_resets_remove_the_option() {
        let store = store(
            "CREATE TABLE t (a INT) ENGINE=InnoDB ROW_FORMAT=COMPACT COMMENT='old';
             ALTER TABLE t COMMENT='' ROW_FORMAT=DEFAULT;",
        );
        assert_eq!(
            oxide_ddl::ast::render_table_options(&table(&store, "t").options),
            "ENGINE=InnoDB"
        );
    }

    #[test]
    fn test_renames_move_entries() {
        let store = store(
            "CREATE TABLE a (x INT);
             CREATE TABLE b (x INT);
             RENAME TABLE a TO a2, b TO b2;
             ALTER TABLE a2 RENAME TO a3, ADD y INT;",
        );
        let snapshot = store.snapshot(Some("shop"));
        assert_eq!(snapshot.table_names().collect::<Vec<_>>(), vec!["a3", "b2"]);
        assert_eq!(snapshot.tables["a3"].columns.len(), 2);
        assert_eq!(snapshot.tables["a3"].name, ObjectName::new("a3"));
    }

    #[test]
    fn test_replay_error_rolls_back_whole_call() {
        let mut store = store("CREATE TABLE t (a INT);");
        let err = store
            .apply("ALTER TABLE t ADD b INT; ALTER TABLE t DROP COLUMN nope;")
            .unwrap_err();
        match err {
            DiffError::Replay { statement, source } => {
                assert_eq!(statement, 2);
                assert!(matches!(source, ReplayError::MissingColumn { .. }));
            }
            other => panic!("Expected replay error, got {other:?}"),
        }
        assert_eq!(column_names(&table(&store, "t")), vec!["a"]);
    }

    #[test]
    fn test_parse_error_applies_nothing() {
        let mut store = SchemaStore::new(None);
        let err = store
            .apply("CREATE TABLE ok (a INT); CREATE TABLE broken (a INT")
            .unwrap_err();
        assert!(matches!(err, DiffError::Parse(e) if e.statement == Some(2)));
        assert!(store.snapshot(None).is_empty());
    }

    #[test]
    fn test_replay_errors() {
        let mut store = store("CREATE TABLE t (a INT, KEY k (a)); CREATE TABLE u (a INT);");
        let cases = [
            ("ALTER TABLE missing ADD b INT", "does not exist"),
            ("ALTER TABLE t ADD a INT", "already exists"),
            ("ALTER TABLE t DROP INDEX nope", "Index 'nope'"),
            ("ALTER TABLE t ADD KEY k (a)", "Index 'k' already"),
            ("ALTER TABLE t ADD c INT AFTER nope", "Column 'nope'"),
            ("RENAME TABLE t TO u", "Table 'u' already exists"),
        ];
        for (sql, message) in cases {
            let err = store.apply(sql).unwrap_err();
            assert!(err.to_string().contains(message), "{sql}: {err}");
        }
    }
}
