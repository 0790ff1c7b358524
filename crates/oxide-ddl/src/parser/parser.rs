//! SQL Parser implementation.

use super::error::ParseError;
use super::expression::render_tokens;
use crate::ast::{
    AlterSpec, ColumnDef, ColumnOption, ColumnPosition, Constraint, ConstraintKind,
    CreateTableStatement, DataType, Expr, ForeignKeyRef, IndexOption, IndexType, KeyPart, Literal,
    ObjectName, OrderDirection, ReferentialAction, Statement, TableDefinition, TableOption,
    quote_identifier, quote_string,
};
use crate::lexer::{Keyword, Lexer, Span, Token, TokenKind};

/// Words that end a table option list instead of starting a generic option.
const OPTION_STOP_WORDS: &[&str] = &[
    "PARTITION",
    "ALGORITHM",
    "LOCK",
    "CONVERT",
    "FORCE",
    "SELECT",
    "IGNORE",
    "REPLACE",
    "ORDER",
    "ENABLE",
    "DISABLE",
    "DISCARD",
    "IMPORT",
    "WITH",
    "WITHOUT",
];

/// MySQL DDL parser.
pub struct Parser<'a> {
    input: &'a str,
    lexer: Lexer<'a>,
    current: Token,
    previous: Token,
}

impl<'a> Parser<'a> {
    /// Creates a new parser for the given input.
    #[must_use]
    pub fn new(input: &'a str) -> Self {
        let mut lexer = Lexer::new(input);
        let current = lexer.next_token();
        Self {
            input,
            lexer,
            current,
            previous: Token::new(TokenKind::Eof, Span::new(0, 0)),
        }
    }

    /// Parses a script of semicolon-separated statements.
    ///
    /// Empty statements are skipped.
    ///
    /// # Errors
    ///
    /// Returns the first `ParseError`, tagged with the 1-based ordinal of
    /// the statement it occurred in.
    pub fn parse_statements(&mut self) -> Result<Vec<Statement>, ParseError> {
        let mut statements = vec![];
        let mut ordinal = 0;
        loop {
            while self.eat(&TokenKind::Semicolon) {}
            if self.current.is_eof() {
                break;
            }
            ordinal += 1;
            let statement = self
                .parse_statement()
                .map_err(|e| e.in_statement(ordinal))?;
            statements.push(statement);
        }
        Ok(statements)
    }

    /// Parses a single statement, up to but not including its terminator.
    ///
    /// # Errors
    ///
    /// Returns a `ParseError` if the statement is malformed.
    pub fn parse_statement(&mut self) -> Result<Statement, ParseError> {
        let next = self.peek();
        let statement = match self.current.as_keyword() {
            Some(Keyword::Create) => match next.as_keyword() {
                Some(Keyword::Table) => self.parse_create_table()?,
                Some(Keyword::Unique | Keyword::Fulltext | Keyword::Spatial | Keyword::Index) => {
                    self.parse_create_index()?
                }
                _ if next.is_word("TEMPORARY") => self.parse_create_table()?,
                _ => self.parse_other()?,
            },
            Some(Keyword::Alter)
                if next.as_keyword() == Some(Keyword::Table)
                    || next.is_word("IGNORE")
                    || next.is_word("ONLINE") =>
            {
                self.parse_alter_table()?
            }
            Some(Keyword::Drop) => match next.as_keyword() {
                Some(Keyword::Table) => self.parse_drop_table()?,
                Some(Keyword::Index) => self.parse_drop_index()?,
                _ if next.is_word("TEMPORARY") => self.parse_drop_table()?,
                _ => self.parse_other()?,
            },
            Some(Keyword::Rename) if next.as_keyword() == Some(Keyword::Table) => {
                self.parse_rename_table()?
            }
            Some(Keyword::Use) => {
                self.advance();
                Statement::Use(self.expect_identifier()?)
            }
            _ => self.parse_other()?,
        };

        if self.check(&TokenKind::Semicolon) || self.current.is_eof() {
            Ok(statement)
        } else {
            Err(self.unexpected("';'"))
        }
    }

    /// Skips a statement outside schema-definition scope, keeping its text.
    fn parse_other(&mut self) -> Result<Statement, ParseError> {
        let start = self.current.span.start;
        let keyword = match &self.current.kind {
            TokenKind::Identifier(name) => name.to_ascii_uppercase(),
            TokenKind::Keyword(kw) => kw.as_str().to_string(),
            other => other.symbol().unwrap_or_default().to_string(),
        };

        while !self.check(&TokenKind::Semicolon) && !self.current.is_eof() {
            if let TokenKind::Error(message) = &self.current.kind {
                return Err(ParseError::new(message.clone(), self.current.span));
            }
            self.advance();
        }

        let text = self
            .input
            .get(start..self.previous.span.end)
            .unwrap_or_default()
            .to_string();
        Ok(Statement::Other { keyword, text })
    }

    // --- CREATE / DROP / RENAME TABLE ---

    /// Parses a CREATE TABLE statement.
    fn parse_create_table(&mut self) -> Result<Statement, ParseError> {
        self.expect_keyword(Keyword::Create)?;
        let temporary = self.eat_word("TEMPORARY");
        self.expect_keyword(Keyword::Table)?;
        let if_not_exists = self.parse_if_not_exists()?;
        let name = self.parse_object_name()?;

        if self.check_keyword(Keyword::Like)
            || (self.check(&TokenKind::LeftParen)
                && self.peek().as_keyword() == Some(Keyword::Like))
        {
            return Err(ParseError::new(
                "CREATE TABLE ... LIKE is not supported",
                self.current.span,
            ));
        }

        let mut table = TableDefinition::new(name);
        self.expect(&TokenKind::LeftParen)?;
        loop {
            if self.starts_constraint() {
                table.constraints.push(self.parse_table_constraint()?);
            } else {
                table.columns.push(self.parse_column_def()?);
            }
            if !self.eat(&TokenKind::Comma) {
                break;
            }
        }
        self.expect(&TokenKind::RightParen)?;
        table.options = self.parse_table_options(true)?;

        if self.check_word("PARTITION")
            || self.check_keyword(Keyword::As)
            || self.check_word("SELECT")
        {
            return Err(ParseError::new(
                format!("{} clause in CREATE TABLE is not supported", self.token_text()),
                self.current.span,
            ));
        }

        table.name_unnamed_constraints();
        Ok(Statement::CreateTable(CreateTableStatement {
            temporary,
            if_not_exists,
            table,
        }))
    }

    /// Parses a DROP TABLE statement.
    fn parse_drop_table(&mut self) -> Result<Statement, ParseError> {
        self.expect_keyword(Keyword::Drop)?;
        let temporary = self.eat_word("TEMPORARY");
        self.expect_keyword(Keyword::Table)?;
        let if_exists = if self.eat_keyword(Keyword::If) {
            self.expect_keyword(Keyword::Exists)?;
            true
        } else {
            false
        };

        let mut tables = vec![];
        loop {
            tables.push(self.parse_object_name()?);
            if !self.eat(&TokenKind::Comma) {
                break;
            }
        }
        if !self.eat_keyword(Keyword::Restrict) {
            self.eat_keyword(Keyword::Cascade);
        }

        Ok(Statement::DropTable {
            temporary,
            if_exists,
            tables,
        })
    }

    /// Parses a RENAME TABLE statement.
    fn parse_rename_table(&mut self) -> Result<Statement, ParseError> {
        self.expect_keyword(Keyword::Rename)?;
        self.expect_keyword(Keyword::Table)?;
        let mut renames = vec![];
        loop {
            let from = self.parse_object_name()?;
            self.expect_keyword(Keyword::To)?;
            let to = self.parse_object_name()?;
            renames.push((from, to));
            if !self.eat(&TokenKind::Comma) {
                break;
            }
        }
        Ok(Statement::RenameTable { renames })
    }

    // --- CREATE / DROP INDEX ---

    /// Parses a CREATE INDEX statement.
    fn parse_create_index(&mut self) -> Result<Statement, ParseError> {
        self.expect_keyword(Keyword::Create)?;
        let kind = match self.current.as_keyword() {
            Some(Keyword::Unique) => ConstraintKind::Unique,
            Some(Keyword::Fulltext) => ConstraintKind::Fulltext,
            Some(Keyword::Spatial) => ConstraintKind::Spatial,
            _ => ConstraintKind::Index,
        };
        if kind != ConstraintKind::Index {
            self.advance();
        }
        self.expect_keyword(Keyword::Index)?;
        let name = self.expect_identifier()?;

        let mut options = self.parse_index_options()?;
        self.expect_keyword(Keyword::On)?;
        let table = self.parse_object_name()?;
        let parts = self.parse_key_parts()?;
        options.extend(self.parse_index_options()?);
        self.skip_algorithm_and_lock()?;

        Ok(Statement::CreateIndex {
            table,
            constraint: Constraint {
                name,
                kind,
                parts,
                options,
            },
        })
    }

    /// Parses a DROP INDEX statement.
    fn parse_drop_index(&mut self) -> Result<Statement, ParseError> {
        self.expect_keyword(Keyword::Drop)?;
        self.expect_keyword(Keyword::Index)?;
        let name = self.expect_identifier()?;
        self.expect_keyword(Keyword::On)?;
        let table = self.parse_object_name()?;
        self.skip_algorithm_and_lock()?;
        Ok(Statement::DropIndex { name, table })
    }

    /// Skips trailing `ALGORITHM [=] x` and `LOCK [=] x` clauses.
    fn skip_algorithm_and_lock(&mut self) -> Result<(), ParseError> {
        while self.eat_word("ALGORITHM") || self.eat_word("LOCK") {
            self.eat(&TokenKind::Eq);
            self.expect_option_word()?;
        }
        Ok(())
    }

    // --- ALTER TABLE ---

    /// Parses an ALTER TABLE statement.
    fn parse_alter_table(&mut self) -> Result<Statement, ParseError> {
        self.expect_keyword(Keyword::Alter)?;
        if !self.eat_word("IGNORE") {
            self.eat_word("ONLINE");
        }
        self.expect_keyword(Keyword::Table)?;
        let table = self.parse_object_name()?;

        let mut specs = vec![];
        loop {
            specs.push(self.parse_alter_spec()?);
            if !self.eat(&TokenKind::Comma) {
                break;
            }
        }
        Ok(Statement::AlterTable { table, specs })
    }

    /// Parses one ALTER TABLE specification.
    fn parse_alter_spec(&mut self) -> Result<AlterSpec, ParseError> {
        match self.current.as_keyword() {
            Some(Keyword::Add) => {
                self.advance();
                if self.starts_constraint() {
                    return Ok(AlterSpec::AddConstraint(self.parse_table_constraint()?));
                }
                self.eat_keyword(Keyword::Column);
                if self.eat(&TokenKind::LeftParen) {
                    let mut columns = vec![];
                    loop {
                        columns.push(self.parse_column_def()?);
                        if !self.eat(&TokenKind::Comma) {
                            break;
                        }
                    }
                    self.expect(&TokenKind::RightParen)?;
                    Ok(AlterSpec::AddColumns {
                        columns,
                        position: ColumnPosition::None,
                    })
                } else {
                    let column = self.parse_column_def()?;
                    let position = self.parse_column_position()?;
                    Ok(AlterSpec::AddColumns {
                        columns: vec![column],
                        position,
                    })
                }
            }
            Some(Keyword::Drop) => {
                self.advance();
                match self.current.as_keyword() {
                    Some(Keyword::Index | Keyword::Key) => {
                        self.advance();
                        Ok(AlterSpec::DropIndex(self.expect_identifier()?))
                    }
                    Some(Keyword::Primary) => {
                        self.advance();
                        self.expect_keyword(Keyword::Key)?;
                        Ok(AlterSpec::DropPrimaryKey)
                    }
                    Some(Keyword::Foreign) => {
                        self.advance();
                        self.expect_keyword(Keyword::Key)?;
                        Ok(AlterSpec::DropForeignKey(self.expect_identifier()?))
                    }
                    Some(Keyword::Check | Keyword::Constraint) => {
                        self.advance();
                        Ok(AlterSpec::DropConstraint(self.expect_identifier()?))
                    }
                    _ => {
                        self.eat_keyword(Keyword::Column);
                        Ok(AlterSpec::DropColumn(self.expect_identifier()?))
                    }
                }
            }
            Some(Keyword::Modify) => {
                self.advance();
                self.eat_keyword(Keyword::Column);
                let column = self.parse_column_def()?;
                let position = self.parse_column_position()?;
                Ok(AlterSpec::ModifyColumn { column, position })
            }
            Some(Keyword::Change) => {
                self.advance();
                self.eat_keyword(Keyword::Column);
                let old_name = self.expect_identifier()?;
                let column = self.parse_column_def()?;
                let position = self.parse_column_position()?;
                Ok(AlterSpec::ChangeColumn {
                    old_name,
                    column,
                    position,
                })
            }
            Some(Keyword::Rename) => {
                self.advance();
                match self.current.as_keyword() {
                    Some(Keyword::Column) => {
                        self.advance();
                        let old_name = self.expect_identifier()?;
                        self.expect_keyword(Keyword::To)?;
                        let new_name = self.expect_identifier()?;
                        Ok(AlterSpec::RenameColumn { old_name, new_name })
                    }
                    Some(Keyword::Index | Keyword::Key) => {
                        self.advance();
                        let old_name = self.expect_identifier()?;
                        self.expect_keyword(Keyword::To)?;
                        let new_name = self.expect_identifier()?;
                        Ok(AlterSpec::RenameIndex { old_name, new_name })
                    }
                    _ => {
                        if !self.eat_keyword(Keyword::To) {
                            self.eat_keyword(Keyword::As);
                        }
                        Ok(AlterSpec::RenameTable(self.parse_object_name()?))
                    }
                }
            }
            Some(Keyword::Alter) => {
                self.advance();
                self.eat_keyword(Keyword::Column);
                let column = self.expect_identifier()?;
                if self.eat_keyword(Keyword::Set) {
                    self.expect_keyword(Keyword::Default)?;
                    let default = Some(self.parse_default_value()?);
                    Ok(AlterSpec::AlterColumnDefault { column, default })
                } else if self.eat_keyword(Keyword::Drop) {
                    self.expect_keyword(Keyword::Default)?;
                    Ok(AlterSpec::AlterColumnDefault {
                        column,
                        default: None,
                    })
                } else {
                    Err(self.unexpected("SET DEFAULT or DROP DEFAULT"))
                }
            }
            _ if self.eat_word("ALGORITHM") => {
                self.eat(&TokenKind::Eq);
                Ok(AlterSpec::Algorithm(self.expect_option_word()?))
            }
            _ if self.eat_word("LOCK") => {
                self.eat(&TokenKind::Eq);
                Ok(AlterSpec::Lock(self.expect_option_word()?))
            }
            _ if self.eat_word("CONVERT") => {
                self.expect_keyword(Keyword::To)?;
                if self.eat_keyword(Keyword::Character) {
                    self.expect_keyword(Keyword::Set)?;
                } else {
                    self.expect_word("CHARSET")?;
                }
                let mut options = vec![TableOption::Charset(self.expect_charset_name()?)];
                if self.eat_keyword(Keyword::Collate) {
                    options.push(TableOption::Collate(self.expect_charset_name()?));
                }
                Ok(AlterSpec::TableOptions(options))
            }
            _ => {
                let options = self.parse_table_options(false)?;
                if options.is_empty() {
                    Err(self.unexpected("ALTER TABLE specification"))
                } else {
                    Ok(AlterSpec::TableOptions(options))
                }
            }
        }
    }

    /// Parses an optional `FIRST` / `AFTER column`.
    fn parse_column_position(&mut self) -> Result<ColumnPosition, ParseError> {
        if self.eat_word("FIRST") {
            Ok(ColumnPosition::First)
        } else if self.eat_word("AFTER") {
            Ok(ColumnPosition::After(self.expect_identifier()?))
        } else {
            Ok(ColumnPosition::None)
        }
    }

    // --- Columns ---

    /// Parses a column definition.
    fn parse_column_def(&mut self) -> Result<ColumnDef, ParseError> {
        let name = self.expect_identifier()?;
        let data_type = self.parse_data_type()?;
        let mut column = ColumnDef::new(name, data_type);

        loop {
            let option = match self.current.as_keyword() {
                Some(Keyword::Not) => {
                    self.advance();
                    self.expect_keyword(Keyword::Null)?;
                    ColumnOption::NotNull
                }
                Some(Keyword::Null) => {
                    self.advance();
                    ColumnOption::Null
                }
                Some(Keyword::Default) => {
                    self.advance();
                    ColumnOption::Default(self.parse_default_value()?)
                }
                Some(Keyword::Primary) => {
                    self.advance();
                    self.expect_keyword(Keyword::Key)?;
                    ColumnOption::PrimaryKey
                }
                Some(Keyword::Key) => {
                    self.advance();
                    ColumnOption::PrimaryKey
                }
                Some(Keyword::Unique) => {
                    self.advance();
                    self.eat_keyword(Keyword::Key);
                    ColumnOption::UniqueKey
                }
                Some(Keyword::On) => {
                    self.advance();
                    self.expect_keyword(Keyword::Update)?;
                    ColumnOption::OnUpdate(self.parse_default_value()?)
                }
                Some(Keyword::Collate) => {
                    self.advance();
                    ColumnOption::Collate(self.expect_charset_name()?)
                }
                Some(Keyword::Generated) => {
                    self.advance();
                    self.expect_word("ALWAYS")?;
                    self.parse_generated_column()?
                }
                Some(Keyword::As) => self.parse_generated_column()?,
                Some(Keyword::Constraint) => {
                    self.advance();
                    if self.check_identifier() {
                        self.advance();
                    }
                    self.parse_column_check()?
                }
                Some(Keyword::Check) => self.parse_column_check()?,
                Some(Keyword::References) => ColumnOption::References(self.parse_references()?),
                _ if self.eat_word("AUTO_INCREMENT") => ColumnOption::AutoIncrement,
                _ if self.eat_word("COMMENT") => ColumnOption::Comment(self.expect_string()?),
                // accepted but not modelled
                _ if self.eat_word("VISIBLE") || self.eat_word("INVISIBLE") => continue,
                _ if self.eat_word("COLUMN_FORMAT") || self.eat_word("STORAGE") => {
                    self.expect_option_word()?;
                    continue;
                }
                _ if self.eat_word("SRID") => {
                    self.expect_u32()?;
                    continue;
                }
                _ => break,
            };
            column.options.push(option);
        }

        Ok(column)
    }

    /// Parses `AS (expr) [VIRTUAL | STORED]`.
    fn parse_generated_column(&mut self) -> Result<ColumnOption, ParseError> {
        self.expect_keyword(Keyword::As)?;
        let expr = self.parse_paren_group()?;
        let stored = if self.eat_keyword(Keyword::Stored) || self.eat_word("PERSISTENT") {
            true
        } else {
            self.eat_keyword(Keyword::Virtual);
            false
        };
        Ok(ColumnOption::Generated { expr, stored })
    }

    /// Parses an inline `CHECK (expr) [[NOT] ENFORCED]`.
    fn parse_column_check(&mut self) -> Result<ColumnOption, ParseError> {
        self.expect_keyword(Keyword::Check)?;
        let expr = self.parse_paren_group()?;
        self.parse_enforcement()?;
        Ok(ColumnOption::Check(expr))
    }

    /// Parses a data type with its attributes.
    fn parse_data_type(&mut self) -> Result<DataType, ParseError> {
        let name = match &self.current.kind {
            TokenKind::Identifier(name) => name.clone(),
            TokenKind::Keyword(kw @ (Keyword::Set | Keyword::Binary | Keyword::Character)) => {
                kw.as_str().to_string()
            }
            _ => return Err(self.unexpected("data type")),
        };
        self.advance();

        let name = match name.to_ascii_uppercase().as_str() {
            "NATIONAL" => self.expect_option_word()?,
            "DOUBLE" => {
                self.eat_word("PRECISION");
                name
            }
            "CHARACTER" | "CHAR" if self.eat_word("VARYING") => "VARCHAR".to_string(),
            "LONG" if self.eat_word("VARBINARY") => "MEDIUMBLOB".to_string(),
            "LONG" => {
                self.eat_word("VARCHAR");
                "MEDIUMTEXT".to_string()
            }
            _ => name,
        };

        let mut data_type = DataType::new(&name);
        if data_type.has_values() {
            self.expect(&TokenKind::LeftParen)?;
            loop {
                data_type.values.push(self.expect_string()?);
                if !self.eat(&TokenKind::Comma) {
                    break;
                }
            }
            self.expect(&TokenKind::RightParen)?;
        } else if self.eat(&TokenKind::LeftParen) {
            data_type.length = Some(self.expect_u32()?);
            if self.eat(&TokenKind::Comma) {
                data_type.scale = Some(self.expect_u32()?);
            }
            self.expect(&TokenKind::RightParen)?;
        }

        loop {
            if self.eat_keyword(Keyword::Unsigned) {
                data_type.unsigned = true;
            } else if self.eat_keyword(Keyword::Zerofill) {
                data_type.zerofill = true;
            } else if self.eat_keyword(Keyword::Binary) {
                data_type.binary = true;
            } else if self.eat_word("SIGNED") {
                // signed is the default
            } else if self.eat_keyword(Keyword::Character) {
                self.expect_keyword(Keyword::Set)?;
                data_type.charset = Some(self.expect_charset_name()?);
            } else if self.eat_word("CHARSET") {
                data_type.charset = Some(self.expect_charset_name()?);
            } else if self.eat_word("ASCII") {
                data_type.charset = Some("latin1".to_string());
            } else if self.eat_word("UNICODE") {
                data_type.charset = Some("ucs2".to_string());
            } else {
                break;
            }
        }

        Ok(data_type)
    }

    /// Parses a `DEFAULT` / `ON UPDATE` value.
    fn parse_default_value(&mut self) -> Result<Expr, ParseError> {
        let expr = match &self.current.kind {
            TokenKind::String(s) => Expr::string(s.clone()),
            TokenKind::Number(n) => Expr::number(n.clone()),
            TokenKind::Hex(h) => Expr::Literal(Literal::Hex(h.clone())),
            TokenKind::Bit(b) => Expr::Literal(Literal::Bit(b.clone())),
            TokenKind::Keyword(Keyword::Null) => Expr::null(),
            TokenKind::Minus | TokenKind::Plus => {
                let negative = self.current.kind == TokenKind::Minus;
                self.advance();
                let TokenKind::Number(n) = &self.current.kind else {
                    return Err(self.unexpected("number"));
                };
                let n = if negative { format!("-{n}") } else { n.clone() };
                self.advance();
                return Ok(Expr::number(n));
            }
            TokenKind::LeftParen => return Ok(Expr::Raw(self.parse_paren_group()?)),
            TokenKind::Identifier(word) => {
                let word = word.to_ascii_uppercase();
                self.advance();
                return match word.as_str() {
                    "TRUE" => Ok(Expr::Literal(Literal::Boolean(true))),
                    "FALSE" => Ok(Expr::Literal(Literal::Boolean(false))),
                    "CURRENT_TIMESTAMP" | "NOW" | "LOCALTIME" | "LOCALTIMESTAMP" => {
                        let precision = self.parse_optional_precision()?;
                        Ok(Expr::CurrentTimestamp { precision })
                    }
                    _ => {
                        if self.check(&TokenKind::LeftParen) {
                            self.advance();
                            self.expect(&TokenKind::RightParen)?;
                        }
                        Ok(Expr::Builtin(word))
                    }
                };
            }
            _ => return Err(self.unexpected("default value")),
        };
        self.advance();
        Ok(expr)
    }

    /// Parses an optional `([n])` after a temporal function.
    fn parse_optional_precision(&mut self) -> Result<Option<u32>, ParseError> {
        if !self.eat(&TokenKind::LeftParen) {
            return Ok(None);
        }
        let precision = if self.check(&TokenKind::RightParen) {
            None
        } else {
            Some(self.expect_u32()?)
        };
        self.expect(&TokenKind::RightParen)?;
        Ok(precision)
    }

    /// Collects a balanced parenthesized group and renders it canonically.
    fn parse_paren_group(&mut self) -> Result<String, ParseError> {
        if !self.check(&TokenKind::LeftParen) {
            return Err(self.unexpected("'('"));
        }
        let mut tokens = vec![];
        let mut depth = 0usize;
        loop {
            match &self.current.kind {
                TokenKind::LeftParen => depth += 1,
                TokenKind::RightParen => depth -= 1,
                TokenKind::Eof => return Err(self.unexpected("')'")),
                TokenKind::Error(message) => {
                    return Err(ParseError::new(message.clone(), self.current.span));
                }
                _ => {}
            }
            tokens.push(self.current.clone());
            self.advance();
            if depth == 0 {
                break;
            }
        }
        Ok(render_tokens(&tokens))
    }

    // --- Constraints ---

    /// Returns true if the current token starts a table constraint.
    fn starts_constraint(&self) -> bool {
        matches!(
            self.current.as_keyword(),
            Some(
                Keyword::Constraint
                    | Keyword::Primary
                    | Keyword::Unique
                    | Keyword::Index
                    | Keyword::Key
                    | Keyword::Fulltext
                    | Keyword::Spatial
                    | Keyword::Foreign
                    | Keyword::Check
            )
        )
    }

    /// Parses a table constraint or index definition.
    fn parse_table_constraint(&mut self) -> Result<Constraint, ParseError> {
        let symbol = if self.eat_keyword(Keyword::Constraint) && self.check_identifier() {
            Some(self.expect_identifier()?)
        } else {
            None
        };

        let kind = match self.current.as_keyword() {
            Some(Keyword::Primary) => {
                self.advance();
                self.expect_keyword(Keyword::Key)?;
                ConstraintKind::PrimaryKey
            }
            Some(Keyword::Unique) => {
                self.advance();
                if !self.eat_keyword(Keyword::Key) {
                    self.eat_keyword(Keyword::Index);
                }
                ConstraintKind::Unique
            }
            Some(Keyword::Index | Keyword::Key) => {
                self.advance();
                ConstraintKind::Index
            }
            Some(keyword @ (Keyword::Fulltext | Keyword::Spatial)) => {
                self.advance();
                if !self.eat_keyword(Keyword::Key) {
                    self.eat_keyword(Keyword::Index);
                }
                if keyword == Keyword::Fulltext {
                    ConstraintKind::Fulltext
                } else {
                    ConstraintKind::Spatial
                }
            }
            Some(Keyword::Foreign) => {
                self.advance();
                self.expect_keyword(Keyword::Key)?;
                let index_name = self.parse_optional_name()?;
                let parts = self.parse_key_parts()?;
                let reference = self.parse_references()?;
                return Ok(Constraint {
                    name: symbol.or(index_name).unwrap_or_default(),
                    kind: ConstraintKind::ForeignKey(reference),
                    parts,
                    options: vec![],
                });
            }
            Some(Keyword::Check) => {
                self.advance();
                let expr = self.parse_paren_group()?;
                let enforced = self.parse_enforcement()?;
                return Ok(Constraint {
                    name: symbol.unwrap_or_default(),
                    kind: ConstraintKind::Check { expr, enforced },
                    parts: vec![],
                    options: vec![],
                });
            }
            _ => return Err(self.unexpected("constraint definition")),
        };

        let name = if kind == ConstraintKind::PrimaryKey {
            Constraint::PRIMARY.to_string()
        } else {
            self.parse_optional_name()?
                .or(symbol)
                .unwrap_or_default()
        };
        let mut options = self.parse_index_options()?;
        let parts = self.parse_key_parts()?;
        options.extend(self.parse_index_options()?);

        Ok(Constraint {
            name,
            kind,
            parts,
            options,
        })
    }

    /// Parses an optional index name.
    fn parse_optional_name(&mut self) -> Result<Option<String>, ParseError> {
        if self.check_identifier() {
            Ok(Some(self.expect_identifier()?))
        } else {
            Ok(None)
        }
    }

    /// Parses an optional `[NOT] ENFORCED`, returning whether it is enforced.
    fn parse_enforcement(&mut self) -> Result<bool, ParseError> {
        if self.check_keyword(Keyword::Not) && self.peek().is_word("ENFORCED") {
            self.advance();
            self.advance();
            return Ok(false);
        }
        self.eat_word("ENFORCED");
        Ok(true)
    }

    /// Parses a parenthesized key part list.
    fn parse_key_parts(&mut self) -> Result<Vec<KeyPart>, ParseError> {
        self.expect(&TokenKind::LeftParen)?;
        let mut parts = vec![];
        loop {
            if self.check(&TokenKind::LeftParen) {
                return Err(ParseError::new(
                    "Functional key parts are not supported",
                    self.current.span,
                ));
            }
            let mut part = KeyPart::new(self.expect_identifier()?);
            if self.eat(&TokenKind::LeftParen) {
                part.length = Some(self.expect_u32()?);
                self.expect(&TokenKind::RightParen)?;
            }
            if self.eat_keyword(Keyword::Desc) {
                part.direction = OrderDirection::Desc;
            } else {
                self.eat_keyword(Keyword::Asc);
            }
            parts.push(part);
            if !self.eat(&TokenKind::Comma) {
                break;
            }
        }
        self.expect(&TokenKind::RightParen)?;
        Ok(parts)
    }

    /// Parses index options until none match.
    fn parse_index_options(&mut self) -> Result<Vec<IndexOption>, ParseError> {
        let mut options = vec![];
        loop {
            let option = if self.eat_keyword(Keyword::Using) {
                let method = self.expect_option_word()?;
                let index_type = match method.as_str() {
                    "BTREE" => IndexType::BTree,
                    "HASH" => IndexType::Hash,
                    "RTREE" => IndexType::RTree,
                    _ => {
                        return Err(ParseError::new(
                            format!("Unknown index type: {method}"),
                            self.previous.span,
                        ));
                    }
                };
                IndexOption::Using(index_type)
            } else if self.eat_word("COMMENT") {
                IndexOption::Comment(self.expect_string()?)
            } else if self.eat_word("KEY_BLOCK_SIZE") {
                self.eat(&TokenKind::Eq);
                IndexOption::KeyBlockSize(self.expect_u64()?)
            } else if self.eat_word("VISIBLE") {
                IndexOption::Visible(true)
            } else if self.eat_word("INVISIBLE") {
                IndexOption::Visible(false)
            } else if self.eat_word("WITH") {
                self.expect_word("PARSER")?;
                IndexOption::Parser(self.expect_identifier()?)
            } else {
                break;
            };
            options.push(option);
        }
        Ok(options)
    }

    /// Parses a `REFERENCES` clause.
    fn parse_references(&mut self) -> Result<ForeignKeyRef, ParseError> {
        self.expect_keyword(Keyword::References)?;
        let table = self.parse_object_name()?;
        self.expect(&TokenKind::LeftParen)?;
        let columns = self.parse_identifier_list()?;
        self.expect(&TokenKind::RightParen)?;

        if self.eat_word("MATCH") {
            self.expect_option_word()?;
        }

        let mut reference = ForeignKeyRef {
            table,
            columns,
            on_delete: None,
            on_update: None,
        };
        while self.check_keyword(Keyword::On) {
            let next = self.peek();
            match next.as_keyword() {
                Some(Keyword::Delete) => {
                    self.advance();
                    self.advance();
                    reference.on_delete = Some(self.parse_referential_action()?);
                }
                Some(Keyword::Update) => {
                    self.advance();
                    self.advance();
                    reference.on_update = Some(self.parse_referential_action()?);
                }
                _ => break,
            }
        }
        Ok(reference)
    }

    /// Parses a referential action.
    fn parse_referential_action(&mut self) -> Result<ReferentialAction, ParseError> {
        if self.eat_keyword(Keyword::Restrict) {
            Ok(ReferentialAction::Restrict)
        } else if self.eat_keyword(Keyword::Cascade) {
            Ok(ReferentialAction::Cascade)
        } else if self.eat_keyword(Keyword::Set) {
            if self.eat_keyword(Keyword::Null) {
                Ok(ReferentialAction::SetNull)
            } else {
                self.expect_keyword(Keyword::Default)?;
                Ok(ReferentialAction::SetDefault)
            }
        } else if self.eat_word("NO") {
            self.expect_word("ACTION")?;
            Ok(ReferentialAction::NoAction)
        } else {
            Err(self.unexpected("referential action"))
        }
    }

    // --- Table options ---

    /// Parses table options. Commas between options are accepted in
    /// CREATE TABLE, where they cannot be confused with ALTER specs.
    fn parse_table_options(&mut self, allow_commas: bool) -> Result<Vec<TableOption>, ParseError> {
        let mut options = vec![];
        loop {
            if allow_commas && !options.is_empty() {
                self.eat(&TokenKind::Comma);
            }
            match self.parse_table_option()? {
                Some(option) => options.push(option),
                None => break,
            }
        }
        Ok(options)
    }

    /// Parses one table option, or returns `None` if none starts here.
    fn parse_table_option(&mut self) -> Result<Option<TableOption>, ParseError> {
        let has_default = self.eat_keyword(Keyword::Default);

        let option = if self.eat_keyword(Keyword::Character) {
            self.expect_keyword(Keyword::Set)?;
            self.eat(&TokenKind::Eq);
            TableOption::Charset(self.expect_charset_name()?)
        } else if self.eat_word("CHARSET") {
            self.eat(&TokenKind::Eq);
            TableOption::Charset(self.expect_charset_name()?)
        } else if self.eat_keyword(Keyword::Collate) {
            self.eat(&TokenKind::Eq);
            TableOption::Collate(self.expect_charset_name()?)
        } else if has_default {
            return Err(self.unexpected("CHARACTER SET or COLLATE"));
        } else if self.eat_word("ENGINE") {
            self.eat(&TokenKind::Eq);
            let engine = match &self.current.kind {
                TokenKind::String(s) => {
                    let s = s.clone();
                    self.advance();
                    s
                }
                _ => self.expect_identifier()?,
            };
            TableOption::Engine(engine)
        } else if self.eat_word("AUTO_INCREMENT") {
            self.eat(&TokenKind::Eq);
            TableOption::AutoIncrement(self.expect_u64()?)
        } else if self.eat_word("ROW_FORMAT") {
            self.eat(&TokenKind::Eq);
            TableOption::RowFormat(self.expect_option_word()?)
        } else if self.eat_word("COMMENT") {
            self.eat(&TokenKind::Eq);
            TableOption::Comment(self.expect_string()?)
        } else if let TokenKind::Identifier(word) = &self.current.kind {
            if OPTION_STOP_WORDS
                .iter()
                .any(|stop| stop.eq_ignore_ascii_case(word))
            {
                return Ok(None);
            }
            let mut name = word.to_ascii_uppercase();
            self.advance();
            if name == "DATA" && self.eat_word("DIRECTORY") {
                name.push_str(" DIRECTORY");
            }
            self.eat(&TokenKind::Eq);
            let value = self.parse_option_value()?;
            TableOption::Other { name, value }
        } else if self.check_keyword(Keyword::Index) && self.peek().is_word("DIRECTORY") {
            self.advance();
            self.advance();
            self.eat(&TokenKind::Eq);
            TableOption::Other {
                name: "INDEX DIRECTORY".to_string(),
                value: self.parse_option_value()?,
            }
        } else {
            return Ok(None);
        };
        Ok(Some(option))
    }

    /// Parses a generic table option value in canonical rendering.
    fn parse_option_value(&mut self) -> Result<String, ParseError> {
        let value = match &self.current.kind {
            TokenKind::String(s) => quote_string(s),
            TokenKind::Number(n) => n.clone(),
            TokenKind::Identifier(word) => word.to_ascii_uppercase(),
            TokenKind::QuotedIdentifier(name) => quote_identifier(name),
            TokenKind::Keyword(Keyword::Default) => "DEFAULT".to_string(),
            _ => return Err(self.unexpected("option value")),
        };
        self.advance();
        Ok(value)
    }

    // --- Helper methods ---

    /// Parses `IF NOT EXISTS` if present.
    fn parse_if_not_exists(&mut self) -> Result<bool, ParseError> {
        if self.eat_keyword(Keyword::If) {
            self.expect_keyword(Keyword::Not)?;
            self.expect_keyword(Keyword::Exists)?;
            Ok(true)
        } else {
            Ok(false)
        }
    }

    /// Parses a possibly schema-qualified name.
    fn parse_object_name(&mut self) -> Result<ObjectName, ParseError> {
        let first = self.expect_identifier()?;
        if self.eat(&TokenKind::Dot) {
            let name = self.expect_identifier()?;
            Ok(ObjectName::qualified(first, name))
        } else {
            Ok(ObjectName::new(first))
        }
    }

    /// Parses a comma-separated list of identifiers.
    fn parse_identifier_list(&mut self) -> Result<Vec<String>, ParseError> {
        let mut idents = vec![];
        loop {
            idents.push(self.expect_identifier()?);
            if !self.check(&TokenKind::Comma) {
                break;
            }
            self.advance();
        }
        Ok(idents)
    }

    /// Advances to the next token.
    fn advance(&mut self) {
        self.previous = core::mem::replace(&mut self.current, self.lexer.next_token());
    }

    /// Returns the token after the current one without consuming anything.
    fn peek(&self) -> Token {
        self.lexer.clone().next_token()
    }

    /// Checks if the current token matches the given kind.
    fn check(&self, kind: &TokenKind) -> bool {
        core::mem::discriminant(&self.current.kind) == core::mem::discriminant(kind)
    }

    /// Checks if the current token is the given keyword.
    fn check_keyword(&self, keyword: Keyword) -> bool {
        matches!(&self.current.kind, TokenKind::Keyword(kw) if *kw == keyword)
    }

    /// Checks if the current token is the given non-reserved word.
    fn check_word(&self, word: &str) -> bool {
        self.current.is_word(word)
    }

    /// Checks if the current token is an identifier, quoted or not.
    fn check_identifier(&self) -> bool {
        matches!(
            self.current.kind,
            TokenKind::Identifier(_) | TokenKind::QuotedIdentifier(_)
        )
    }

    /// Consumes the current token if it matches the given kind.
    fn eat(&mut self, kind: &TokenKind) -> bool {
        let matched = self.check(kind);
        if matched {
            self.advance();
        }
        matched
    }

    /// Consumes the current token if it is the given keyword.
    fn eat_keyword(&mut self, keyword: Keyword) -> bool {
        let matched = self.check_keyword(keyword);
        if matched {
            self.advance();
        }
        matched
    }

    /// Consumes the current token if it is the given non-reserved word.
    fn eat_word(&mut self, word: &str) -> bool {
        let matched = self.check_word(word);
        if matched {
            self.advance();
        }
        matched
    }

    /// Expects the current token to be the given kind.
    fn expect(&mut self, kind: &TokenKind) -> Result<(), ParseError> {
        if self.eat(kind) {
            Ok(())
        } else {
            let expected = kind.symbol().map_or_else(|| format!("{kind:?}"), |s| format!("'{s}'"));
            Err(self.unexpected(expected))
        }
    }

    /// Expects the current token to be the given keyword.
    fn expect_keyword(&mut self, keyword: Keyword) -> Result<(), ParseError> {
        if self.eat_keyword(keyword) {
            Ok(())
        } else {
            Err(self.unexpected(keyword.as_str()))
        }
    }

    /// Expects the current token to be the given non-reserved word.
    fn expect_word(&mut self, word: &str) -> Result<(), ParseError> {
        if self.eat_word(word) {
            Ok(())
        } else {
            Err(self.unexpected(word))
        }
    }

    /// Expects and returns an identifier.
    fn expect_identifier(&mut self) -> Result<String, ParseError> {
        match &self.current.kind {
            TokenKind::Identifier(name) | TokenKind::QuotedIdentifier(name) => {
                let name = name.clone();
                self.advance();
                Ok(name)
            }
            _ => Err(self.unexpected("identifier")),
        }
    }

    /// Expects and returns a string literal.
    fn expect_string(&mut self) -> Result<String, ParseError> {
        match &self.current.kind {
            TokenKind::String(value) => {
                let value = value.clone();
                self.advance();
                Ok(value)
            }
            _ => Err(self.unexpected("string literal")),
        }
    }

    /// Expects a word (identifier or keyword) and returns it upper-cased.
    fn expect_option_word(&mut self) -> Result<String, ParseError> {
        let word = match &self.current.kind {
            TokenKind::Identifier(name) | TokenKind::QuotedIdentifier(name) => {
                name.to_ascii_uppercase()
            }
            TokenKind::Keyword(kw) => kw.as_str().to_string(),
            _ => return Err(self.unexpected("word")),
        };
        self.advance();
        Ok(word)
    }

    /// Expects a character set or collation name and returns it lower-cased.
    fn expect_charset_name(&mut self) -> Result<String, ParseError> {
        let name = match &self.current.kind {
            TokenKind::Identifier(name)
            | TokenKind::QuotedIdentifier(name)
            | TokenKind::String(name) => name.to_ascii_lowercase(),
            TokenKind::Keyword(kw @ (Keyword::Binary | Keyword::Default)) => {
                kw.as_str().to_ascii_lowercase()
            }
            _ => return Err(self.unexpected("character set name")),
        };
        self.advance();
        Ok(name)
    }

    /// Expects an unsigned integer that fits in `u32`.
    fn expect_u32(&mut self) -> Result<u32, ParseError> {
        let value = self.expect_u64()?;
        u32::try_from(value).map_err(|_| ParseError::new("Number too large", self.previous.span))
    }

    /// Expects an unsigned integer.
    fn expect_u64(&mut self) -> Result<u64, ParseError> {
        match &self.current.kind {
            TokenKind::Number(text) => {
                let value = text
                    .parse::<u64>()
                    .map_err(|_| ParseError::new("Expected an integer", self.current.span))?;
                self.advance();
                Ok(value)
            }
            _ => Err(self.unexpected("integer")),
        }
    }

    /// Returns the source text of the current token.
    fn token_text(&self) -> &'a str {
        self.current.span.slice(self.input).unwrap_or_default()
    }

    /// Creates an "unexpected token" error at the current token.
    fn unexpected(&self, expected: impl Into<String>) -> ParseError {
        ParseError::unexpected(expected, self.current.kind.clone(), self.current.span)
    }
}
