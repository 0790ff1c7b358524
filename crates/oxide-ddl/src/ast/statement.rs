//! SQL statement AST types.

use core::fmt;

use super::{
    ColumnDef, Constraint, ConstraintKind, Expr, ObjectName, TableDefinition, TableOption,
    quote_identifier, render_table_options,
};

/// Column placement for `ADD`, `MODIFY` and `CHANGE`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ColumnPosition {
    /// No explicit position.
    #[default]
    None,
    /// `FIRST`.
    First,
    /// `AFTER column`.
    After(String),
}

impl fmt::Display for ColumnPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::None => Ok(()),
            Self::First => f.write_str(" FIRST"),
            Self::After(column) => write!(f, " AFTER {}", quote_identifier(column)),
        }
    }
}

/// One specification of an `ALTER TABLE` statement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AlterSpec {
    /// `ADD [COLUMN] def` or `ADD [COLUMN] (def, ...)`.
    AddColumns {
        columns: Vec<ColumnDef>,
        position: ColumnPosition,
    },
    /// `DROP [COLUMN] name`.
    DropColumn(String),
    /// `MODIFY [COLUMN] def [position]`.
    ModifyColumn {
        column: ColumnDef,
        position: ColumnPosition,
    },
    /// `CHANGE [COLUMN] old def [position]`.
    ChangeColumn {
        old_name: String,
        column: ColumnDef,
        position: ColumnPosition,
    },
    /// `RENAME COLUMN old TO new`.
    RenameColumn { old_name: String, new_name: String },
    /// `ALTER [COLUMN] name SET DEFAULT expr | DROP DEFAULT`.
    AlterColumnDefault {
        column: String,
        default: Option<Expr>,
    },
    /// `ADD [CONSTRAINT [name]] ...`.
    AddConstraint(Constraint),
    /// `DROP INDEX name`.
    DropIndex(String),
    /// `DROP PRIMARY KEY`.
    DropPrimaryKey,
    /// `DROP FOREIGN KEY name`.
    DropForeignKey(String),
    /// `DROP CHECK name` / `DROP CONSTRAINT name`.
    DropConstraint(String),
    /// `RENAME INDEX old TO new`.
    RenameIndex { old_name: String, new_name: String },
    /// Table options.
    TableOptions(Vec<TableOption>),
    /// `RENAME [TO] new`.
    RenameTable(ObjectName),
    /// `ALGORITHM = value`; no effect on structure.
    Algorithm(String),
    /// `LOCK = value`; no effect on structure.
    Lock(String),
}

impl fmt::Display for AlterSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AddColumns { columns, position } => match columns.as_slice() {
                [column] => write!(f, "ADD COLUMN {column}{position}"),
                _ => {
                    let defs: Vec<String> = columns.iter().map(ToString::to_string).collect();
                    write!(f, "ADD COLUMN ({})", defs.join(", "))
                }
            },
            Self::DropColumn(name) => write!(f, "DROP COLUMN {}", quote_identifier(name)),
            Self::ModifyColumn { column, position } => {
                write!(f, "MODIFY COLUMN {column}{position}")
            }
            Self::ChangeColumn {
                old_name,
                column,
                position,
            } => write!(
                f,
                "CHANGE COLUMN {} {column}{position}",
                quote_identifier(old_name)
            ),
            Self::RenameColumn { old_name, new_name } => write!(
                f,
                "RENAME COLUMN {} TO {}",
                quote_identifier(old_name),
                quote_identifier(new_name)
            ),
            Self::AlterColumnDefault { column, default } => match default {
                Some(expr) => write!(
                    f,
                    "ALTER COLUMN {} SET DEFAULT {expr}",
                    quote_identifier(column)
                ),
                None => write!(f, "ALTER COLUMN {} DROP DEFAULT", quote_identifier(column)),
            },
            Self::AddConstraint(constraint) => write!(f, "ADD {constraint}"),
            Self::DropIndex(name) => write!(f, "DROP INDEX {}", quote_identifier(name)),
            Self::DropPrimaryKey => f.write_str("DROP PRIMARY KEY"),
            Self::DropForeignKey(name) => write!(f, "DROP FOREIGN KEY {}", quote_identifier(name)),
            Self::DropConstraint(name) => write!(f, "DROP CONSTRAINT {}", quote_identifier(name)),
            Self::RenameIndex { old_name, new_name } => write!(
                f,
                "RENAME INDEX {} TO {}",
                quote_identifier(old_name),
                quote_identifier(new_name)
            ),
            Self::TableOptions(options) => f.write_str(&render_table_options(options)),
            Self::RenameTable(name) => write!(f, "RENAME TO {name}"),
            Self::Algorithm(value) => write!(f, "ALGORITHM={value}"),
            Self::Lock(value) => write!(f, "LOCK={value}"),
        }
    }
}

/// A `CREATE TABLE` statement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateTableStatement {
    /// `TEMPORARY`.
    pub temporary: bool,
    /// `IF NOT EXISTS`.
    pub if_not_exists: bool,
    /// The declared table.
    pub table: TableDefinition,
}

impl fmt::Display for CreateTableStatement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rendered = self.table.to_string();
        let body = rendered.strip_prefix("CREATE TABLE ").unwrap_or(&rendered);
        f.write_str("CREATE ")?;
        if self.temporary {
            f.write_str("TEMPORARY ")?;
        }
        f.write_str("TABLE ")?;
        if self.if_not_exists {
            f.write_str("IF NOT EXISTS ")?;
        }
        f.write_str(body)
    }
}

/// A top-level SQL statement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Statement {
    /// `CREATE TABLE`.
    CreateTable(CreateTableStatement),
    /// `ALTER TABLE`.
    AlterTable {
        table: ObjectName,
        specs: Vec<AlterSpec>,
    },
    /// `DROP TABLE`.
    DropTable {
        temporary: bool,
        if_exists: bool,
        tables: Vec<ObjectName>,
    },
    /// `CREATE [UNIQUE | FULLTEXT | SPATIAL] INDEX name ON table (...)`.
    CreateIndex {
        table: ObjectName,
        constraint: Constraint,
    },
    /// `DROP INDEX name ON table`.
    DropIndex { name: String, table: ObjectName },
    /// `RENAME TABLE a TO b [, c TO d]`.
    RenameTable { renames: Vec<(ObjectName, ObjectName)> },
    /// `USE database`.
    Use(String),
    /// Any statement that does not shape table structure, kept verbatim.
    Other {
        /// Leading word, upper-cased (e.g. `INSERT`).
        keyword: String,
        /// Source text of the statement.
        text: String,
    },
}

impl Statement {
    /// Returns true for statements that change table structure.
    #[must_use]
    pub const fn is_schema_change(&self) -> bool {
        !matches!(self, Self::Use(_) | Self::Other { .. })
    }
}

impl fmt::Display for Statement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CreateTable(create) => create.fmt(f),
            Self::AlterTable { table, specs } => {
                let specs: Vec<String> = specs.iter().map(ToString::to_string).collect();
                write!(f, "ALTER TABLE {table} {}", specs.join(", "))
            }
            Self::DropTable {
                temporary,
                if_exists,
                tables,
            } => {
                f.write_str("DROP ")?;
                if *temporary {
                    f.write_str("TEMPORARY ")?;
                }
                f.write_str("TABLE ")?;
                if *if_exists {
                    f.write_str("IF EXISTS ")?;
                }
                let names: Vec<String> = tables.iter().map(ToString::to_string).collect();
                f.write_str(&names.join(", "))
            }
            Self::CreateIndex { table, constraint } => {
                let kind = match constraint.kind {
                    ConstraintKind::Unique => "UNIQUE ",
                    ConstraintKind::Fulltext => "FULLTEXT ",
                    ConstraintKind::Spatial => "SPATIAL ",
                    _ => "",
                };
                let parts: Vec<String> = constraint.parts.iter().map(ToString::to_string).collect();
                write!(
                    f,
                    "CREATE {kind}INDEX {} ON {table} ({})",
                    quote_identifier(&constraint.name),
                    parts.join(",")
                )?;
                for option in &constraint.options {
                    write!(f, " {option}")?;
                }
                Ok(())
            }
            Self::DropIndex { name, table } => {
                write!(f, "DROP INDEX {} ON {table}", quote_identifier(name))
            }
            Self::RenameTable { renames } => {
                let pairs: Vec<String> = renames
                    .iter()
                    .map(|(from, to)| format!("{from} TO {to}"))
                    .collect();
                write!(f, "RENAME TABLE {}", pairs.join(", "))
            }
            Self::Use(database) => write!(f, "USE {}", quote_identifier(database)),
            Self::Other { text, .. } => f.write_str(text),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{ColumnOption, DataType};

    #[test]
    fn test_alter_specs_display() {
        let column = ColumnDef::new("age", DataType::new("int")).option(ColumnOption::NotNull);
        let stmt = Statement::AlterTable {
            table: ObjectName::new("users"),
            specs: vec![
                AlterSpec::AddColumns {
                    columns: vec![column.clone()],
                    position: ColumnPosition::After("id".into()),
                },
                AlterSpec::DropColumn("old".into()),
                AlterSpec::DropPrimaryKey,
                AlterSpec::AlterColumnDefault {
                    column: "age".into(),
                    default: None,
                },
            ],
        };
        assert_eq!(
            stmt.to_string(),
            "ALTER TABLE `users` ADD COLUMN `age` INT NOT NULL AFTER `id`, \
             DROP COLUMN `old`, DROP PRIMARY KEY, ALTER COLUMN `age` DROP DEFAULT"
        );
    }

    #[test]
    fn test_add_many_columns_display() {
        let spec = AlterSpec::AddColumns {
            columns: vec![
                ColumnDef::new("a", DataType::new("int")),
                ColumnDef::new("b", DataType::new("text")),
            ],
            position: ColumnPosition::None,
        };
        assert_eq!(spec.to_string(), "ADD COLUMN (`a` INT, `b` TEXT)");
    }

    #[test]
    fn test_drop_table_display() {
        let stmt = Statement::DropTable {
            temporary: false,
            if_exists: true,
            tables: vec![ObjectName::qualified("db", "a"), ObjectName::new("b")],
        };
        assert_eq!(stmt.to_string(), "DROP TABLE IF EXISTS `db`.`a`, `b`");
    }

    #[test]
    fn test_create_table_modifiers() {
        let create = CreateTableStatement {
            temporary: true,
            if_not_exists: true,
            table: TableDefinition::new(ObjectName::new("tmp")),
        };
        assert_eq!(
            create.to_string(),
            "CREATE TEMPORARY TABLE IF NOT EXISTS `tmp` (\n)"
        );
    }
}
