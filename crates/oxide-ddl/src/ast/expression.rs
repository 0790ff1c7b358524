//! Expression AST types.
//!
//! DDL only needs expressions in a handful of places (`DEFAULT`, `ON UPDATE`,
//! generated columns, `CHECK`). Simple values are modelled as literals; any
//! parenthesized expression is kept as its canonical token rendering.

use core::fmt;

use super::quote_string;

/// A literal value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Literal {
    /// NULL literal.
    Null,
    /// `TRUE` / `FALSE`.
    Boolean(bool),
    /// Numeric literal as written, sign folded in.
    Number(String),
    /// String literal.
    String(String),
    /// Hexadecimal literal digits.
    Hex(String),
    /// Bit-value literal digits.
    Bit(String),
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => f.write_str("NULL"),
            Self::Boolean(true) => f.write_str("TRUE"),
            Self::Boolean(false) => f.write_str("FALSE"),
            Self::Number(n) => f.write_str(n),
            Self::String(s) => f.write_str(&quote_string(s)),
            Self::Hex(h) => write!(f, "X'{h}'"),
            Self::Bit(b) => write!(f, "b'{b}'"),
        }
    }
}

/// A DDL expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expr {
    /// A literal value.
    Literal(Literal),
    /// `CURRENT_TIMESTAMP` and its synonyms (`NOW()`, `LOCALTIMESTAMP`, ...).
    CurrentTimestamp {
        /// Fractional seconds precision.
        precision: Option<u32>,
    },
    /// A bare built-in word such as `CURRENT_DATE`, upper-cased.
    Builtin(String),
    /// A parenthesized expression in canonical rendering, without the
    /// enclosing parentheses.
    Raw(String),
}

impl Expr {
    /// Creates a string literal expression.
    #[must_use]
    pub fn string(value: impl Into<String>) -> Self {
        Self::Literal(Literal::String(value.into()))
    }

    /// Creates a numeric literal expression.
    #[must_use]
    pub fn number(value: impl Into<String>) -> Self {
        Self::Literal(Literal::Number(value.into()))
    }

    /// Creates a NULL literal expression.
    #[must_use]
    pub const fn null() -> Self {
        Self::Literal(Literal::Null)
    }

    /// Returns true for the NULL literal.
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Literal(Literal::Null))
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Literal(lit) => lit.fmt(f),
            Self::CurrentTimestamp { precision: None } => f.write_str("CURRENT_TIMESTAMP"),
            Self::CurrentTimestamp {
                precision: Some(p),
            } => write!(f, "CURRENT_TIMESTAMP({p})"),
            Self::Builtin(name) => f.write_str(name),
            Self::Raw(text) => write!(f, "({text})"),
        }
    }
}
