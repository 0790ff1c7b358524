//! # oxide-ddl
//!
//! A MySQL data definition front end: lexer, recursive descent parser and
//! canonical renderer.
//!
//! This crate provides:
//! - A hand-written lexer that understands MySQL comments, quoting and
//!   literal forms
//! - A parser for `CREATE TABLE`, `ALTER TABLE`, `DROP TABLE`,
//!   `CREATE INDEX`, `DROP INDEX`, `RENAME TABLE` and `USE`; every other
//!   statement is kept verbatim as [`Statement::Other`]
//! - A deterministic renderer: every AST node implements `Display`, and
//!   rendering then re-parsing is a fixed point
//!
//! ## Parsing a dump
//!
//! ```rust
//! use oxide_ddl::{Statement, parse};
//!
//! let statements = parse(
//!     "SET NAMES utf8mb4;
//!      CREATE TABLE `users` (
//!        `id` int(11) NOT NULL AUTO_INCREMENT,
//!        PRIMARY KEY (`id`)
//!      ) ENGINE=InnoDB;",
//! )
//! .unwrap();
//!
//! let Statement::CreateTable(create) = &statements[1] else {
//!     panic!("expected CREATE TABLE");
//! };
//! assert_eq!(create.table.columns[0].to_string(), "`id` INT(11) NOT NULL AUTO_INCREMENT");
//! ```

pub mod ast;
pub mod lexer;
pub mod parser;

pub use ast::{AlterSpec, Statement, TableDefinition};
pub use lexer::{Lexer, Token, TokenKind};
pub use parser::{ParseError, Parser};

/// Parses a script of semicolon-separated statements.
///
/// # Errors
///
/// Returns the first `ParseError`, carrying the 1-based ordinal of the
/// failing statement.
pub fn parse(sql: &str) -> Result<Vec<Statement>, ParseError> {
    Parser::new(sql).parse_statements()
}
