//! Token types for the MySQL DDL lexer.

use super::Span;

/// Reserved MySQL words the DDL grammar relies on.
///
/// Non-reserved words such as `COMMENT`, `ENGINE` or `AFTER` are lexed as
/// plain identifiers and matched contextually by the parser, so they stay
/// usable as column and table names without quoting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Keyword {
    // Statements
    Create,
    Alter,
    Drop,
    Rename,
    Use,
    Table,
    Database,
    Schema,

    // Alter specifications
    Add,
    Modify,
    Change,
    Column,
    To,
    As,
    Set,

    // Keys and constraints
    Index,
    Key,
    Primary,
    Unique,
    Fulltext,
    Spatial,
    Foreign,
    References,
    Constraint,
    Check,
    Cascade,
    Restrict,
    On,
    Update,
    Delete,

    // Column attributes
    Default,
    Null,
    Not,
    Collate,
    Character,
    Unsigned,
    Zerofill,
    Binary,
    Generated,
    Virtual,
    Stored,

    // Misc
    If,
    Exists,
    Using,
    Asc,
    Desc,
    Like,
}

impl Keyword {
    /// Attempts to parse a keyword from a string (case-insensitive).
    #[must_use]
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        let keyword = match s.to_ascii_uppercase().as_str() {
            "CREATE" => Self::Create,
            "ALTER" => Self::Alter,
            "DROP" => Self::Drop,
            "RENAME" => Self::Rename,
            "USE" => Self::Use,
            "TABLE" => Self::Table,
            "DATABASE" => Self::Database,
            "SCHEMA" => Self::Schema,
            "ADD" => Self::Add,
            "MODIFY" => Self::Modify,
            "CHANGE" => Self::Change,
            "COLUMN" => Self::Column,
            "TO" => Self::To,
            "AS" => Self::As,
            "SET" => Self::Set,
            "INDEX" => Self::Index,
            "KEY" => Self::Key,
            "PRIMARY" => Self::Primary,
            "UNIQUE" => Self::Unique,
            "FULLTEXT" => Self::Fulltext,
            "SPATIAL" => Self::Spatial,
            "FOREIGN" => Self::Foreign,
            "REFERENCES" => Self::References,
            "CONSTRAINT" => Self::Constraint,
            "CHECK" => Self::Check,
            "CASCADE" => Self::Cascade,
            "RESTRICT" => Self::Restrict,
            "ON" => Self::On,
            "UPDATE" => Self::Update,
            "DELETE" => Self::Delete,
            "DEFAULT" => Self::Default,
            "NULL" => Self::Null,
            "NOT" => Self::Not,
            "COLLATE" => Self::Collate,
            "CHARACTER" => Self::Character,
            "UNSIGNED" => Self::Unsigned,
            "ZEROFILL" => Self::Zerofill,
            "BINARY" => Self::Binary,
            "GENERATED" => Self::Generated,
            "VIRTUAL" => Self::Virtual,
            "STORED" => Self::Stored,
            "IF" => Self::If,
            "EXISTS" => Self::Exists,
            "USING" => Self::Using,
            "ASC" => Self::Asc,
            "DESC" => Self::Desc,
            "LIKE" => Self::Like,
            _ => return None,
        };
        Some(keyword)
    }

    /// Returns the keyword as a string.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Create => "CREATE",
            Self::Alter => "ALTER",
            Self::Drop => "DROP",
            Self::Rename => "RENAME",
            Self::Use => "USE",
            Self::Table => "TABLE",
            Self::Database => "DATABASE",
            Self::Schema => "SCHEMA",
            Self::Add => "ADD",
            Self::Modify => "MODIFY",
            Self::Change => "CHANGE",
            Self::Column => "COLUMN",
            Self::To => "TO",
            Self::As => "AS",
            Self::Set => "SET",
            Self::Index => "INDEX",
            Self::Key => "KEY",
            Self::Primary => "PRIMARY",
            Self::Unique => "UNIQUE",
            Self::Fulltext => "FULLTEXT",
            Self::Spatial => "SPATIAL",
            Self::Foreign => "FOREIGN",
            Self::References => "REFERENCES",
            Self::Constraint => "CONSTRAINT",
            Self::Check => "CHECK",
            Self::Cascade => "CASCADE",
            Self::Restrict => "RESTRICT",
            Self::On => "ON",
            Self::Update => "UPDATE",
            Self::Delete => "DELETE",
            Self::Default => "DEFAULT",
            Self::Null => "NULL",
            Self::Not => "NOT",
            Self::Collate => "COLLATE",
            Self::Character => "CHARACTER",
            Self::Unsigned => "UNSIGNED",
            Self::Zerofill => "ZEROFILL",
            Self::Binary => "BINARY",
            Self::Generated => "GENERATED",
            Self::Virtual => "VIRTUAL",
            Self::Stored => "STORED",
            Self::If => "IF",
            Self::Exists => "EXISTS",
            Self::Using => "USING",
            Self::Asc => "ASC",
            Self::Desc => "DESC",
            Self::Like => "LIKE",
        }
    }
}

/// The kind of token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenKind {
    // Literals
    /// Numeric literal, kept as written (e.g. `42`, `3.14`, `1e10`).
    Number(String),
    /// String literal with escapes resolved (e.g. `'it''s'`).
    String(String),
    /// Hexadecimal literal, upper-cased digits (e.g. `X'0A'`, `0x0a`).
    Hex(String),
    /// Bit-value literal digits (e.g. `b'101'`).
    Bit(String),

    // Identifiers and keywords
    /// Bare identifier (e.g. `created_at`).
    Identifier(String),
    /// Back-quoted identifier (e.g. `` `order` ``).
    QuotedIdentifier(String),
    /// Reserved keyword.
    Keyword(Keyword),

    // Operators
    /// +
    Plus,
    /// -
    Minus,
    /// *
    Star,
    /// /
    Slash,
    /// %
    Percent,
    /// =
    Eq,
    /// != or <>
    NotEq,
    /// <
    Lt,
    /// <=
    LtEq,
    /// >
    Gt,
    /// >=
    GtEq,
    /// <=>
    NullSafeEq,
    /// &&
    LogicalAnd,
    /// ||
    LogicalOr,
    /// &
    BitAnd,
    /// |
    BitOr,
    /// ^
    BitXor,
    /// ~
    BitNot,
    /// !
    Bang,
    /// <<
    LeftShift,
    /// >>
    RightShift,
    /// :=
    Assign,

    // Delimiters
    /// (
    LeftParen,
    /// )
    RightParen,
    /// ,
    Comma,
    /// ;
    Semicolon,
    /// .
    Dot,
    /// ?
    Question,
    /// @
    At,

    // Special
    /// End of input
    Eof,
    /// Invalid/unknown token
    Error(String),
}

impl TokenKind {
    /// Returns the fixed spelling of punctuation and operator tokens.
    #[must_use]
    pub const fn symbol(&self) -> Option<&'static str> {
        let symbol = match self {
            Self::Plus => "+",
            Self::Minus => "-",
            Self::Star => "*",
            Self::Slash => "/",
            Self::Percent => "%",
            Self::Eq => "=",
            Self::NotEq => "!=",
            Self::Lt => "<",
            Self::LtEq => "<=",
            Self::Gt => ">",
            Self::GtEq => ">=",
            Self::NullSafeEq => "<=>",
            Self::LogicalAnd => "&&",
            Self::LogicalOr => "||",
            Self::BitAnd => "&",
            Self::BitOr => "|",
            Self::BitXor => "^",
            Self::BitNot => "~",
            Self::Bang => "!",
            Self::LeftShift => "<<",
            Self::RightShift => ">>",
            Self::Assign => ":=",
            Self::LeftParen => "(",
            Self::RightParen => ")",
            Self::Comma => ",",
            Self::Semicolon => ";",
            Self::Dot => ".",
            Self::Question => "?",
            Self::At => "@",
            _ => return None,
        };
        Some(symbol)
    }
}

/// A token with its span in the source code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    /// The kind of token.
    pub kind: TokenKind,
    /// The location in the source code.
    pub span: Span,
}

impl Token {
    /// Creates a new token.
    #[must_use]
    pub const fn new(kind: TokenKind, span: Span) -> Self {
        Self { kind, span }
    }

    /// Returns true if this is an EOF token.
    #[must_use]
    pub const fn is_eof(&self) -> bool {
        matches!(self.kind, TokenKind::Eof)
    }

    /// Returns the keyword if this is a keyword token.
    #[must_use]
    pub const fn as_keyword(&self) -> Option<Keyword> {
        match &self.kind {
            TokenKind::Keyword(kw) => Some(*kw),
            _ => None,
        }
    }

    /// Returns true if this is a bare identifier spelled `word`
    /// (case-insensitive). Back-quoted identifiers never match.
    #[must_use]
    pub fn is_word(&self, word: &str) -> bool {
        matches!(&self.kind, TokenKind::Identifier(name) if name.eq_ignore_ascii_case(word))
    }
}
