//! Abstract Syntax Tree (AST) types for MySQL DDL statements.
//!
//! Every node implements [`core::fmt::Display`], producing canonical SQL:
//! upper-case keywords, back-quoted identifiers, single-quoted strings and
//! normalized spacing. Two nodes describe the same thing exactly when their
//! renderings are equal.

mod expression;
mod statement;
mod table;
mod types;

pub use expression::{Expr, Literal};
pub use statement::{AlterSpec, ColumnPosition, CreateTableStatement, Statement};
pub use table::{
    ColumnDef, ColumnOption, ColumnOptionKind, Constraint, ConstraintKind, ForeignKeyRef,
    IndexOption, IndexType, KeyPart, ObjectName, OrderDirection, ReferentialAction, TableDefinition,
    TableOption, TableOptionKind, render_table_options,
};
pub use types::DataType;

/// Back-quotes an identifier, doubling embedded back-quotes.
#[must_use]
pub fn quote_identifier(name: &str) -> String {
    format!("`{}`", name.replace('`', "``"))
}

/// Single-quotes a string literal, escaping backslashes, quotes and control
/// characters so the lexer reads back the same value.
#[must_use]
pub fn quote_string(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('\'');
    for c in value.chars() {
        match c {
            '\'' => out.push_str("''"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '\0' => out.push_str("\\0"),
            '\u{1a}' => out.push_str("\\Z"),
            '\u{8}' => out.push_str("\\b"),
            '\\' => out.push_str("\\\\"),
            c => out.push(c),
        }
    }
    out.push('\'');
    out
}
