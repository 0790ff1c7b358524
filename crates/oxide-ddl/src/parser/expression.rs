//! Canonical rendering of free-form expressions.
//!
//! Expressions in DDL (`CHECK`, generated columns, parenthesized defaults)
//! are not evaluated, only compared. They are kept as a normalized token
//! rendering: keywords upper-cased, function names lower-cased, other
//! identifiers back-quoted, redundant outer parentheses stripped and
//! spacing made uniform.

use crate::ast::{quote_identifier, quote_string};
use crate::lexer::{Keyword, Token, TokenKind};

/// Bare words that belong to expression syntax rather than naming a column.
const EXPRESSION_WORDS: &[&str] = &[
    "AND",
    "OR",
    "XOR",
    "IN",
    "IS",
    "BETWEEN",
    "TRUE",
    "FALSE",
    "UNKNOWN",
    "DIV",
    "MOD",
    "REGEXP",
    "RLIKE",
    "SOUNDS",
    "ESCAPE",
    "CASE",
    "WHEN",
    "THEN",
    "ELSE",
    "END",
    "INTERVAL",
    "MICROSECOND",
    "SECOND",
    "MINUTE",
    "HOUR",
    "DAY",
    "WEEK",
    "MONTH",
    "QUARTER",
    "YEAR",
    "CURRENT_TIMESTAMP",
    "CURRENT_DATE",
    "CURRENT_TIME",
    "CURRENT_USER",
    "LOCALTIME",
    "LOCALTIMESTAMP",
    "UTC_TIMESTAMP",
    "UTC_DATE",
    "UTC_TIME",
    "SIGNED",
];

/// Returns true for bare words that are part of expression syntax.
pub(super) fn is_expression_word(word: &str) -> bool {
    EXPRESSION_WORDS
        .iter()
        .any(|w| w.eq_ignore_ascii_case(word))
}

/// Returns the index of the parenthesis closing the one at `open`.
fn matching_paren(tokens: &[Token], open: usize) -> Option<usize> {
    let mut depth = 0usize;
    for (i, token) in tokens.iter().enumerate().skip(open) {
        match token.kind {
            TokenKind::LeftParen => depth += 1,
            TokenKind::RightParen => {
                depth -= 1;
                if depth == 0 {
                    return Some(i);
                }
            }
            _ => {}
        }
    }
    None
}

/// Strips parentheses that enclose the whole expression.
fn strip_outer_parens(mut tokens: &[Token]) -> &[Token] {
    while tokens.len() >= 2
        && tokens[0].kind == TokenKind::LeftParen
        && matching_paren(tokens, 0) == Some(tokens.len() - 1)
    {
        tokens = &tokens[1..tokens.len() - 1];
    }
    tokens
}

/// Renders an expression token sequence canonically.
///
/// Tokens must be balanced; the parser guarantees this when collecting a
/// parenthesized group.
pub(super) fn render_tokens(tokens: &[Token]) -> String {
    let tokens = strip_outer_parens(tokens);
    let mut out = String::new();
    // Whether the previous token suppresses the space before the next one.
    let mut glue_next = true;

    for (i, token) in tokens.iter().enumerate() {
        let next_is_paren = tokens
            .get(i + 1)
            .is_some_and(|t| t.kind == TokenKind::LeftParen);

        let (text, glue_before, glue_after) = match &token.kind {
            TokenKind::LeftParen => ("(".to_string(), false, true),
            TokenKind::RightParen => (")".to_string(), true, false),
            TokenKind::Comma => (",".to_string(), true, false),
            TokenKind::Dot => (".".to_string(), true, true),
            TokenKind::At => ("@".to_string(), false, true),
            // a function call's parenthesis sticks to the name
            TokenKind::Identifier(name) if next_is_paren && !is_expression_word(name) => {
                (name.to_ascii_lowercase(), false, true)
            }
            TokenKind::Identifier(name) if is_expression_word(name) => {
                (name.to_ascii_uppercase(), false, false)
            }
            TokenKind::Identifier(name) | TokenKind::QuotedIdentifier(name) => {
                (quote_identifier(name), false, false)
            }
            TokenKind::Keyword(kw) => {
                let glue = next_is_paren && matches!(kw, Keyword::If | Keyword::Default);
                (kw.as_str().to_string(), false, glue)
            }
            TokenKind::Number(n) => (n.clone(), false, false),
            TokenKind::String(s) => (quote_string(s), false, false),
            TokenKind::Hex(h) => (format!("X'{h}'"), false, false),
            TokenKind::Bit(b) => (format!("b'{b}'"), false, false),
            other => (other.symbol().unwrap_or_default().to_string(), false, false),
        };

        if !out.is_empty() && !glue_next && !glue_before {
            out.push(' ');
        }
        out.push_str(&text);
        glue_next = glue_after;
    }

    out
}
