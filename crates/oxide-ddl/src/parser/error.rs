//! Parser error types.

use crate::lexer::{Span, TokenKind};

/// A parse error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError {
    /// The error message.
    pub message: String,
    /// The location of the error.
    pub span: Span,
    /// 1-based ordinal of the statement that failed, when parsing a script.
    pub statement: Option<usize>,
    /// Expected tokens (if applicable).
    pub expected: Option<String>,
    /// The actual token found.
    pub found: Option<TokenKind>,
}

impl ParseError {
    /// Creates a new parse error.
    #[must_use]
    pub fn new(message: impl Into<String>, span: Span) -> Self {
        Self {
            message: message.into(),
            span,
            statement: None,
            expected: None,
            found: None,
        }
    }

    /// Creates an "unexpected token" error.
    #[must_use]
    pub fn unexpected(expected: impl Into<String>, found: TokenKind, span: Span) -> Self {
        let expected_str: String = expected.into();
        if found == TokenKind::Eof {
            return Self::unexpected_eof(expected_str, span);
        }
        let message = match &found {
            TokenKind::Error(lex_error) => lex_error.clone(),
            other => format!("Unexpected token: expected {expected_str}, found {other:?}"),
        };
        Self {
            message,
            span,
            statement: None,
            expected: Some(expected_str),
            found: Some(found),
        }
    }

    /// Creates an "unexpected end of input" error.
    #[must_use]
    pub fn unexpected_eof(expected: impl Into<String>, span: Span) -> Self {
        let expected_str: String = expected.into();
        Self {
            message: format!("Unexpected end of input: expected {expected_str}"),
            span,
            statement: None,
            expected: Some(expected_str),
            found: Some(TokenKind::Eof),
        }
    }

    /// Attaches the ordinal of the failing statement.
    #[must_use]
    pub const fn in_statement(mut self, ordinal: usize) -> Self {
        self.statement = Some(ordinal);
        self
    }
}

impl core::fmt::Display for ParseError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        if let Some(ordinal) = self.statement {
            write!(f, "statement {ordinal}: ")?;
        }
        write!(
            f,
            "{} at position {}..{}",
            self.message, self.span.start, self.span.end
        )
    }
}

impl std::error::Error for ParseError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_with_statement() {
        let err = ParseError::new("Bad column", Span::new(4, 9)).in_statement(3);
        assert_eq!(err.to_string(), "statement 3: Bad column at position 4..9");
    }

    #[test]
    fn test_unexpected_eof_is_detected() {
        let err = ParseError::unexpected("identifier", TokenKind::Eof, Span::new(10, 10));
        assert!(err.message.starts_with("Unexpected end of input"));
        assert_eq!(err.found, Some(TokenKind::Eof));
    }
}
