//! Table definition AST types: columns, constraints and table options.

use core::fmt;

use super::{DataType, Expr, quote_identifier, quote_string};

/// A possibly schema-qualified object name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectName {
    /// Schema (database) qualifier.
    pub schema: Option<String>,
    /// Object name.
    pub name: String,
}

impl ObjectName {
    /// Creates an unqualified name.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            schema: None,
            name: name.into(),
        }
    }

    /// Creates a schema-qualified name.
    #[must_use]
    pub fn qualified(schema: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            schema: Some(schema.into()),
            name: name.into(),
        }
    }
}

impl fmt::Display for ObjectName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(schema) = &self.schema {
            write!(f, "{}.", quote_identifier(schema))?;
        }
        f.write_str(&quote_identifier(&self.name))
    }
}

/// Sort direction of a key part.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OrderDirection {
    /// Ascending order (default).
    #[default]
    Asc,
    /// Descending order.
    Desc,
}

/// Referential action of a foreign key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReferentialAction {
    Restrict,
    Cascade,
    SetNull,
    NoAction,
    SetDefault,
}

impl ReferentialAction {
    /// Returns the SQL representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Restrict => "RESTRICT",
            Self::Cascade => "CASCADE",
            Self::SetNull => "SET NULL",
            Self::NoAction => "NO ACTION",
            Self::SetDefault => "SET DEFAULT",
        }
    }
}

/// The `REFERENCES` clause of a foreign key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForeignKeyRef {
    /// Referenced table.
    pub table: ObjectName,
    /// Referenced columns.
    pub columns: Vec<String>,
    /// `ON DELETE` action.
    pub on_delete: Option<ReferentialAction>,
    /// `ON UPDATE` action.
    pub on_update: Option<ReferentialAction>,
}

impl fmt::Display for ForeignKeyRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "REFERENCES {} ({})", self.table, join_identifiers(&self.columns))?;
        if let Some(action) = self.on_delete {
            write!(f, " ON DELETE {}", action.as_str())?;
        }
        if let Some(action) = self.on_update {
            write!(f, " ON UPDATE {}", action.as_str())?;
        }
        Ok(())
    }
}

/// Kinds of column options, used to filter options by category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColumnOptionKind {
    NotNull,
    Null,
    Default,
    AutoIncrement,
    PrimaryKey,
    UniqueKey,
    Comment,
    OnUpdate,
    Collate,
    Generated,
    Check,
    References,
}

/// A column option, in declaration order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColumnOption {
    /// `NOT NULL`.
    NotNull,
    /// Explicit `NULL`.
    Null,
    /// `DEFAULT expr`.
    Default(Expr),
    /// `AUTO_INCREMENT`.
    AutoIncrement,
    /// Inline `PRIMARY KEY`.
    PrimaryKey,
    /// Inline `UNIQUE [KEY]`.
    UniqueKey,
    /// `COMMENT 'text'`.
    Comment(String),
    /// `ON UPDATE expr`.
    OnUpdate(Expr),
    /// `COLLATE name`, lower-cased.
    Collate(String),
    /// `[GENERATED ALWAYS] AS (expr) [VIRTUAL | STORED]`.
    Generated {
        /// Canonical expression text.
        expr: String,
        /// `STORED` rather than `VIRTUAL`.
        stored: bool,
    },
    /// Inline `CHECK (expr)`.
    Check(String),
    /// Inline `REFERENCES`.
    References(ForeignKeyRef),
}

impl ColumnOption {
    /// Returns the kind of this option.
    #[must_use]
    pub const fn kind(&self) -> ColumnOptionKind {
        match self {
            Self::NotNull => ColumnOptionKind::NotNull,
            Self::Null => ColumnOptionKind::Null,
            Self::Default(_) => ColumnOptionKind::Default,
            Self::AutoIncrement => ColumnOptionKind::AutoIncrement,
            Self::PrimaryKey => ColumnOptionKind::PrimaryKey,
            Self::UniqueKey => ColumnOptionKind::UniqueKey,
            Self::Comment(_) => ColumnOptionKind::Comment,
            Self::OnUpdate(_) => ColumnOptionKind::OnUpdate,
            Self::Collate(_) => ColumnOptionKind::Collate,
            Self::Generated { .. } => ColumnOptionKind::Generated,
            Self::Check(_) => ColumnOptionKind::Check,
            Self::References(_) => ColumnOptionKind::References,
        }
    }
}

impl fmt::Display for ColumnOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotNull => f.write_str("NOT NULL"),
            Self::Null => f.write_str("NULL"),
            Self::Default(expr) => write!(f, "DEFAULT {expr}"),
            Self::AutoIncrement => f.write_str("AUTO_INCREMENT"),
            Self::PrimaryKey => f.write_str("PRIMARY KEY"),
            Self::UniqueKey => f.write_str("UNIQUE KEY"),
            Self::Comment(text) => write!(f, "COMMENT {}", quote_string(text)),
            Self::OnUpdate(expr) => write!(f, "ON UPDATE {expr}"),
            Self::Collate(name) => write!(f, "COLLATE {name}"),
            Self::Generated { expr, stored } => {
                let storage = if *stored { "STORED" } else { "VIRTUAL" };
                write!(f, "GENERATED ALWAYS AS ({expr}) {storage}")
            }
            Self::Check(expr) => write!(f, "CHECK ({expr})"),
            Self::References(reference) => reference.fmt(f),
        }
    }
}

/// A column definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnDef {
    /// Column name.
    pub name: String,
    /// Declared type.
    pub data_type: DataType,
    /// Options in declaration order.
    pub options: Vec<ColumnOption>,
}

impl ColumnDef {
    /// Creates a column without options.
    #[must_use]
    pub fn new(name: impl Into<String>, data_type: DataType) -> Self {
        Self {
            name: name.into(),
            data_type,
            options: Vec::new(),
        }
    }

    /// Appends an option.
    #[must_use]
    pub fn option(mut self, option: ColumnOption) -> Self {
        self.options.push(option);
        self
    }

    /// Returns true unless the column is `NOT NULL` or an inline primary key.
    #[must_use]
    pub fn is_nullable(&self) -> bool {
        !self
            .options
            .iter()
            .any(|o| matches!(o, ColumnOption::NotNull | ColumnOption::PrimaryKey))
    }

    /// Returns the `DEFAULT` expression, if any.
    #[must_use]
    pub fn default_value(&self) -> Option<&Expr> {
        self.options.iter().find_map(|o| match o {
            ColumnOption::Default(expr) => Some(expr),
            _ => None,
        })
    }

    /// Returns the column comment, if any.
    #[must_use]
    pub fn comment(&self) -> Option<&str> {
        self.options.iter().find_map(|o| match o {
            ColumnOption::Comment(text) => Some(text.as_str()),
            _ => None,
        })
    }
}

impl fmt::Display for ColumnDef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", quote_identifier(&self.name), self.data_type)?;
        for option in &self.options {
            write!(f, " {option}")?;
        }
        Ok(())
    }
}

/// One column of an index key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyPart {
    /// Column name.
    pub column: String,
    /// Prefix length.
    pub length: Option<u32>,
    /// Sort direction.
    pub direction: OrderDirection,
}

impl KeyPart {
    /// Creates an ascending, full-length key part.
    #[must_use]
    pub fn new(column: impl Into<String>) -> Self {
        Self {
            column: column.into(),
            length: None,
            direction: OrderDirection::Asc,
        }
    }
}

impl fmt::Display for KeyPart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&quote_identifier(&self.column))?;
        if let Some(length) = self.length {
            write!(f, "({length})")?;
        }
        if self.direction == OrderDirection::Desc {
            f.write_str(" DESC")?;
        }
        Ok(())
    }
}

/// Index storage method.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndexType {
    BTree,
    Hash,
    RTree,
}

impl IndexType {
    /// Returns the SQL representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::BTree => "BTREE",
            Self::Hash => "HASH",
            Self::RTree => "RTREE",
        }
    }
}

/// An index-level option.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IndexOption {
    /// `COMMENT 'text'`.
    Comment(String),
    /// `USING BTREE | HASH | RTREE`.
    Using(IndexType),
    /// `VISIBLE` / `INVISIBLE`.
    Visible(bool),
    /// `KEY_BLOCK_SIZE=n`.
    KeyBlockSize(u64),
    /// `WITH PARSER name`.
    Parser(String),
}

impl fmt::Display for IndexOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Comment(text) => write!(f, "COMMENT {}", quote_string(text)),
            Self::Using(ty) => write!(f, "USING {}", ty.as_str()),
            Self::Visible(true) => f.write_str("VISIBLE"),
            Self::Visible(false) => f.write_str("INVISIBLE"),
            Self::KeyBlockSize(size) => write!(f, "KEY_BLOCK_SIZE={size}"),
            Self::Parser(name) => write!(f, "WITH PARSER {}", quote_identifier(name)),
        }
    }
}

/// The kind of a table constraint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConstraintKind {
    PrimaryKey,
    Unique,
    Index,
    Fulltext,
    Spatial,
    ForeignKey(ForeignKeyRef),
    Check {
        /// Canonical expression text.
        expr: String,
        /// False for `NOT ENFORCED`.
        enforced: bool,
    },
}

impl ConstraintKind {
    /// Returns true for kinds that MySQL stores as an index.
    #[must_use]
    pub const fn is_index(&self) -> bool {
        matches!(
            self,
            Self::PrimaryKey | Self::Unique | Self::Index | Self::Fulltext | Self::Spatial
        )
    }
}

/// A table-level constraint or index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Constraint {
    /// Constraint name; `PRIMARY` for the primary key. Empty until named.
    pub name: String,
    /// Constraint kind.
    pub kind: ConstraintKind,
    /// Key columns; empty for checks.
    pub parts: Vec<KeyPart>,
    /// Index options.
    pub options: Vec<IndexOption>,
}

impl Constraint {
    /// Name MySQL gives every primary key.
    pub const PRIMARY: &'static str = "PRIMARY";

    /// Creates a primary key on the given columns.
    #[must_use]
    pub fn primary_key(columns: &[&str]) -> Self {
        Self {
            name: Self::PRIMARY.to_string(),
            kind: ConstraintKind::PrimaryKey,
            parts: columns.iter().map(|c| KeyPart::new(*c)).collect(),
            options: Vec::new(),
        }
    }

    /// Creates a plain index on the given columns.
    #[must_use]
    pub fn index(name: impl Into<String>, columns: &[&str]) -> Self {
        Self {
            name: name.into(),
            kind: ConstraintKind::Index,
            parts: columns.iter().map(|c| KeyPart::new(*c)).collect(),
            options: Vec::new(),
        }
    }

    /// Returns true for the primary key.
    #[must_use]
    pub const fn is_primary_key(&self) -> bool {
        matches!(self.kind, ConstraintKind::PrimaryKey)
    }

    fn write_name(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.name.is_empty() {
            Ok(())
        } else {
            write!(f, " {}", quote_identifier(&self.name))
        }
    }

    fn write_parts(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self.parts.iter().map(ToString::to_string).collect();
        write!(f, " ({})", parts.join(","))
    }

    /// Renders the constraint without its index options.
    #[must_use]
    pub const fn without_options(&self) -> impl fmt::Display + '_ {
        BareConstraint(self)
    }

    fn write_definition(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            ConstraintKind::PrimaryKey => {
                f.write_str("PRIMARY KEY")?;
                self.write_parts(f)?;
            }
            ConstraintKind::Unique
            | ConstraintKind::Index
            | ConstraintKind::Fulltext
            | ConstraintKind::Spatial => {
                f.write_str(match self.kind {
                    ConstraintKind::Unique => "UNIQUE KEY",
                    ConstraintKind::Fulltext => "FULLTEXT KEY",
                    ConstraintKind::Spatial => "SPATIAL KEY",
                    _ => "KEY",
                })?;
                self.write_name(f)?;
                self.write_parts(f)?;
            }
            ConstraintKind::ForeignKey(reference) => {
                f.write_str("CONSTRAINT")?;
                self.write_name(f)?;
                f.write_str(" FOREIGN KEY")?;
                self.write_parts(f)?;
                write!(f, " {reference}")?;
            }
            ConstraintKind::Check { expr, enforced } => {
                f.write_str("CONSTRAINT")?;
                self.write_name(f)?;
                write!(f, " CHECK ({expr})")?;
                if !enforced {
                    f.write_str(" NOT ENFORCED")?;
                }
            }
        }
        Ok(())
    }
}

struct BareConstraint<'a>(&'a Constraint);

impl fmt::Display for BareConstraint<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.write_definition(f)
    }
}

impl fmt::Display for Constraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_definition(f)?;
        for option in &self.options {
            write!(f, " {option}")?;
        }
        Ok(())
    }
}

/// Kinds of table options; a table carries at most one option per kind.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TableOptionKind {
    Engine,
    Charset,
    Collate,
    AutoIncrement,
    RowFormat,
    Comment,
    Other(String),
}

/// A table option.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableOption {
    /// `ENGINE=name`.
    Engine(String),
    /// `DEFAULT CHARSET=name`, lower-cased.
    Charset(String),
    /// `COLLATE=name`, lower-cased.
    Collate(String),
    /// `AUTO_INCREMENT=n`.
    AutoIncrement(u64),
    /// `ROW_FORMAT=name`, upper-cased.
    RowFormat(String),
    /// `COMMENT='text'`.
    Comment(String),
    /// Any other option, with its name upper-cased and its value in
    /// canonical rendering.
    Other {
        /// Option name (e.g. `KEY_BLOCK_SIZE`).
        name: String,
        /// Rendered value.
        value: String,
    },
}

impl TableOption {
    /// Returns the kind of this option.
    #[must_use]
    pub fn kind(&self) -> TableOptionKind {
        match self {
            Self::Engine(_) => TableOptionKind::Engine,
            Self::Charset(_) => TableOptionKind::Charset,
            Self::Collate(_) => TableOptionKind::Collate,
            Self::AutoIncrement(_) => TableOptionKind::AutoIncrement,
            Self::RowFormat(_) => TableOptionKind::RowFormat,
            Self::Comment(_) => TableOptionKind::Comment,
            Self::Other { name, .. } => TableOptionKind::Other(name.clone()),
        }
    }

    /// Returns the option that puts `kind` back to the server default, for
    /// the kinds MySQL can reset in place (`COMMENT=''`, `ROW_FORMAT=DEFAULT`).
    #[must_use]
    pub fn reset(kind: &TableOptionKind) -> Option<Self> {
        match kind {
            TableOptionKind::Comment => Some(Self::Comment(String::new())),
            TableOptionKind::RowFormat => Some(Self::RowFormat("DEFAULT".to_string())),
            _ => None,
        }
    }

    /// Returns true if this option only restores the server default, so a
    /// table carrying it reads the same as one without it.
    #[must_use]
    pub fn is_reset(&self) -> bool {
        match self {
            Self::Comment(text) => text.is_empty(),
            Self::RowFormat(name) => name == "DEFAULT",
            _ => false,
        }
    }
}

impl fmt::Display for TableOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Engine(name) => write!(f, "ENGINE={name}"),
            Self::Charset(name) => write!(f, "DEFAULT CHARSET={name}"),
            Self::Collate(name) => write!(f, "COLLATE={name}"),
            Self::AutoIncrement(n) => write!(f, "AUTO_INCREMENT={n}"),
            Self::RowFormat(name) => write!(f, "ROW_FORMAT={name}"),
            Self::Comment(text) => write!(f, "COMMENT={}", quote_string(text)),
            Self::Other { name, value } => write!(f, "{name}={value}"),
        }
    }
}

/// Renders a table option list, space separated.
#[must_use]
pub fn render_table_options(options: &[TableOption]) -> String {
    options
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(" ")
}

/// The current definition of a table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableDefinition {
    /// Table name.
    pub name: ObjectName,
    /// Columns in physical order.
    pub columns: Vec<ColumnDef>,
    /// Constraints and indexes in declaration order.
    pub constraints: Vec<Constraint>,
    /// Table options.
    pub options: Vec<TableOption>,
}

impl TableDefinition {
    /// Creates an empty definition.
    #[must_use]
    pub fn new(name: ObjectName) -> Self {
        Self {
            name,
            columns: Vec::new(),
            constraints: Vec::new(),
            options: Vec::new(),
        }
    }

    /// Looks up a column by name.
    #[must_use]
    pub fn column(&self, name: &str) -> Option<&ColumnDef> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// Looks up a column by name for modification.
    pub fn column_mut(&mut self, name: &str) -> Option<&mut ColumnDef> {
        self.columns.iter_mut().find(|c| c.name == name)
    }

    /// Returns the position of a column.
    #[must_use]
    pub fn column_position(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c.name == name)
    }

    /// Looks up a constraint by name.
    #[must_use]
    pub fn constraint(&self, name: &str) -> Option<&Constraint> {
        self.constraints.iter().find(|c| c.name == name)
    }

    /// Returns the primary key, if any.
    #[must_use]
    pub fn primary_key(&self) -> Option<&Constraint> {
        self.constraints.iter().find(|c| c.is_primary_key())
    }

    /// Looks up a table option by kind.
    #[must_use]
    pub fn option(&self, kind: &TableOptionKind) -> Option<&TableOption> {
        self.options.iter().find(|o| o.kind() == *kind)
    }

    /// Sets an option, replacing any existing option of the same kind.
    pub fn set_option(&mut self, option: TableOption) {
        let kind = option.kind();
        match self.options.iter_mut().find(|o| o.kind() == kind) {
            Some(existing) => *existing = option,
            None => self.options.push(option),
        }
    }

    /// Names every unnamed constraint the way MySQL does.
    ///
    /// Indexes take the name of their first column, suffixed `_2`, `_3`, ...
    /// on collision. Foreign keys become `<table>_ibfk_<n>` and checks
    /// `<table>_chk_<n>`, numbered after the highest existing number.
    pub fn name_unnamed_constraints(&mut self) {
        for i in 0..self.constraints.len() {
            if !self.constraints[i].name.is_empty() {
                continue;
            }
            let name = match &self.constraints[i].kind {
                ConstraintKind::PrimaryKey => Constraint::PRIMARY.to_string(),
                ConstraintKind::ForeignKey(_) => self.next_generated_name("ibfk"),
                ConstraintKind::Check { .. } => self.next_generated_name("chk"),
                _ => {
                    let base = self.constraints[i]
                        .parts
                        .first()
                        .map_or_else(|| "idx".to_string(), |p| p.column.clone());
                    self.next_index_name(&base)
                }
            };
            self.constraints[i].name = name;
        }
    }

    fn next_index_name(&self, base: &str) -> String {
        if self.constraint(base).is_none() && base != Constraint::PRIMARY {
            return base.to_string();
        }
        (2..)
            .map(|n| format!("{base}_{n}"))
            .find(|candidate| self.constraint(candidate).is_none())
            .unwrap_or_else(|| base.to_string())
    }

    fn next_generated_name(&self, infix: &str) -> String {
        let prefix = format!("{}_{infix}_", self.name.name);
        let highest = self
            .constraints
            .iter()
            .filter_map(|c| c.name.strip_prefix(&prefix))
            .filter_map(|n| n.parse::<u32>().ok())
            .max()
            .unwrap_or(0);
        format!("{prefix}{}", highest + 1)
    }
}

impl fmt::Display for TableDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CREATE TABLE {} (", self.name)?;
        let body: Vec<String> = self
            .columns
            .iter()
            .map(ToString::to_string)
            .chain(self.constraints.iter().map(ToString::to_string))
            .collect();
        for (i, line) in body.iter().enumerate() {
            let separator = if i + 1 < body.len() { "," } else { "" };
            write!(f, "\n  {line}{separator}")?;
        }
        f.write_str("\n)")?;
        if !self.options.is_empty() {
            write!(f, " {}", render_table_options(&self.options))?;
        }
        Ok(())
    }
}

/// Joins identifiers as a back-quoted, comma separated list.
pub(crate) fn join_identifiers(names: &[String]) -> String {
    names
        .iter()
        .map(|n| quote_identifier(n))
        .collect::<Vec<_>>()
        .join(",")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn users() -> TableDefinition {
        let mut table = TableDefinition::new(ObjectName::new("users"));
        table.columns.push(
            ColumnDef::new("id", DataType::new("int"))
                .option(ColumnOption::NotNull)
                .option(ColumnOption::AutoIncrement),
        );
        table.columns.push(
            ColumnDef::new("email", DataType::new("varchar").with_length(255))
                .option(ColumnOption::Default(Expr::null()))
                .option(ColumnOption::Comment("login".into())),
        );
        table.constraints.push(Constraint::primary_key(&["id"]));
        table
    }

    #[test]
    fn test_render_table() {
        let mut table = users();
        table.options.push(TableOption::Engine("InnoDB".into()));
        assert_eq!(
            table.to_string(),
            "CREATE TABLE `users` (\n  `id` INT NOT NULL AUTO_INCREMENT,\n  \
             `email` VARCHAR(255) DEFAULT NULL COMMENT 'login',\n  \
             PRIMARY KEY (`id`)\n) ENGINE=InnoDB"
        );
    }

    #[test]
    fn test_column_accessors() {
        let table = users();
        let id = table.column("id").unwrap();
        let email = table.column("email").unwrap();
        assert!(!id.is_nullable());
        assert!(email.is_nullable());
        assert_eq!(email.default_value(), Some(&Expr::null()));
        assert_eq!(email.comment(), Some("login"));
        assert_eq!(table.column_position("email"), Some(1));
    }

    #[test]
    fn test_render_constraints() {
        let mut unique = Constraint::index("uq_email", &["email"]);
        unique.kind = ConstraintKind::Unique;
        unique.parts[0].length = Some(10);
        unique.parts[0].direction = OrderDirection::Desc;
        unique.options.push(IndexOption::Using(IndexType::BTree));
        assert_eq!(
            unique.to_string(),
            "UNIQUE KEY `uq_email` (`email`(10) DESC) USING BTREE"
        );
        assert_eq!(
            unique.without_options().to_string(),
            "UNIQUE KEY `uq_email` (`email`(10) DESC)"
        );

        let fk = Constraint {
            name: "fk_user".into(),
            kind: ConstraintKind::ForeignKey(ForeignKeyRef {
                table: ObjectName::new("users"),
                columns: vec!["id".into()],
                on_delete: Some(ReferentialAction::Cascade),
                on_update: None,
            }),
            parts: vec![KeyPart::new("user_id")],
            options: Vec::new(),
        };
        assert_eq!(
            fk.to_string(),
            "CONSTRAINT `fk_user` FOREIGN KEY (`user_id`) REFERENCES `users` (`id`) ON DELETE CASCADE"
        );
    }

    #[test]
    fn test_name_unnamed_constraints() {
        let mut table = users();
        table.name = ObjectName::new("orders");
        table.constraints.push(Constraint::index("", &["email"]));
        table.constraints.push(Constraint::index("", &["email"]));
        table.constraints.push(Constraint {
            name: String::new(),
            kind: ConstraintKind::ForeignKey(ForeignKeyRef {
                table: ObjectName::new("users"),
                columns: vec!["id".into()],
                on_delete: None,
                on_update: None,
            }),
            parts: vec![KeyPart::new("id")],
            options: Vec::new(),
        });
        table.constraints.push(Constraint {
            name: String::new(),
            kind: ConstraintKind::Check {
                expr: "`id` > 0".into(),
                enforced: true,
            },
            parts: Vec::new(),
            options: Vec::new(),
        });
        table.name_unnamed_constraints();

        let names: Vec<&str> = table.constraints.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(
            names,
            vec!["PRIMARY", "email", "email_2", "orders_ibfk_1", "orders_chk_1"]
        );
    }

    #[test]
    fn test_set_option_replaces_same_kind() {
        let mut table = users();
        table.set_option(TableOption::Comment("a".into()));
        table.set_option(TableOption::Engine("InnoDB".into()));
        table.set_option(TableOption::Comment("b".into()));
        assert_eq!(render_table_options(&table.options), "COMMENT='b' ENGINE=InnoDB");
        assert!(table.option(&TableOptionKind::Engine).is_some());
    }

    #[test]
    fn test_option_resets() {
        let comment = TableOption::reset(&TableOptionKind::Comment).unwrap();
        assert_eq!(comment.to_string(), "COMMENT=''");
        assert!(comment.is_reset());
        let row_format = TableOption::reset(&TableOptionKind::RowFormat).unwrap();
        assert_eq!(row_format.to_string(), "ROW_FORMAT=DEFAULT");
        assert!(row_format.is_reset());

        assert!(TableOption::reset(&TableOptionKind::Engine).is_none());
        assert!(TableOption::reset(&TableOptionKind::AutoIncrement).is_none());
        assert!(!TableOption::Comment("x".into()).is_reset());
        assert!(!TableOption::RowFormat("DYNAMIC".into()).is_reset());
    }
}
