//! MySQL tokenizer implementation.

use super::{Keyword, Span, Token, TokenKind};

/// A lexer that tokenizes MySQL input.
#[derive(Debug, Clone)]
pub struct Lexer<'a> {
    /// The input source code.
    input: &'a str,
    /// The current byte position.
    pos: usize,
    /// The byte position of the start of the current token.
    start: usize,
}

impl<'a> Lexer<'a> {
    /// Creates a new lexer for the given input.
    #[must_use]
    pub const fn new(input: &'a str) -> Self {
        Self {
            input,
            pos: 0,
            start: 0,
        }
    }

    /// Returns the input this lexer reads from.
    #[must_use]
    pub const fn input(&self) -> &'a str {
        self.input
    }

    /// Returns the current character without advancing.
    fn peek(&self) -> Option<char> {
        self.input[self.pos..].chars().next()
    }

    /// Returns the next character without advancing.
    fn peek_next(&self) -> Option<char> {
        let mut chars = self.input[self.pos..].chars();
        chars.next();
        chars.next()
    }

    /// Advances to the next character and returns it.
    fn advance(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    /// Skips whitespace and comments.
    ///
    /// Versioned comments (`/*!40101 ... */`) are skipped like plain ones:
    /// dump headers put session settings there, never table structure.
    fn skip_whitespace_and_comments(&mut self) {
        loop {
            while self.peek().is_some_and(char::is_whitespace) {
                self.advance();
            }

            // `-- ` needs trailing whitespace in MySQL, otherwise it is two minuses
            let dash_comment = self.peek() == Some('-')
                && self.peek_next() == Some('-')
                && self.input[self.pos + 2..]
                    .chars()
                    .next()
                    .is_none_or(char::is_whitespace);
            if dash_comment || self.peek() == Some('#') {
                while self.peek().is_some_and(|c| c != '\n') {
                    self.advance();
                }
                continue;
            }

            if self.peek() == Some('/') && self.peek_next() == Some('*') {
                self.advance();
                self.advance();
                loop {
                    match self.advance() {
                        Some('*') if self.peek() == Some('/') => {
                            self.advance();
                            break;
                        }
                        None => break,
                        _ => {}
                    }
                }
                continue;
            }

            break;
        }
    }

    /// Creates a span from start to current position.
    const fn make_span(&self) -> Span {
        Span::new(self.start, self.pos)
    }

    /// Creates a token with the current span.
    const fn make_token(&self, kind: TokenKind) -> Token {
        Token::new(kind, self.make_span())
    }

    fn error(&self, message: impl Into<String>) -> Token {
        self.make_token(TokenKind::Error(message.into()))
    }

    /// Scans an identifier or keyword.
    fn scan_identifier(&mut self) -> Token {
        while self
            .peek()
            .is_some_and(|c| c.is_alphanumeric() || c == '_' || c == '$')
        {
            self.advance();
        }

        let text = &self.input[self.start..self.pos];

        // Character set introducer: _utf8mb4'abc' is just the string 'abc'
        if text.starts_with('_') && text.len() > 1 && matches!(self.peek(), Some('\'' | '"')) {
            let quote = self.peek().unwrap_or('\'');
            return self.scan_string(quote);
        }

        match Keyword::from_str(text) {
            Some(keyword) => self.make_token(TokenKind::Keyword(keyword)),
            None => self.make_token(TokenKind::Identifier(text.to_string())),
        }
    }

    /// Scans a back-quoted identifier; a doubled back-quote escapes itself.
    fn scan_quoted_identifier(&mut self) -> Token {
        self.advance();
        let mut name = String::new();

        loop {
            match self.advance() {
                Some('`') if self.peek() == Some('`') => {
                    self.advance();
                    name.push('`');
                }
                Some('`') => break,
                Some(c) => name.push(c),
                None => return self.error("Unterminated quoted identifier"),
            }
        }

        self.make_token(TokenKind::QuotedIdentifier(name))
    }

    /// Scans a number (integer, decimal or exponent form).
    fn scan_number(&mut self) -> Token {
        while self.peek().is_some_and(|c| c.is_ascii_digit()) {
            self.advance();
        }

        if self.peek() == Some('.') && self.peek_next().is_some_and(|c| c.is_ascii_digit()) {
            self.advance();
            while self.peek().is_some_and(|c| c.is_ascii_digit()) {
                self.advance();
            }
        }

        if self.peek().is_some_and(|c| c == 'e' || c == 'E')
            && self
                .peek_next()
                .is_some_and(|c| c.is_ascii_digit() || c == '+' || c == '-')
        {
            self.advance();
            if self.peek().is_some_and(|c| c == '+' || c == '-') {
                self.advance();
            }
            while self.peek().is_some_and(|c| c.is_ascii_digit()) {
                self.advance();
            }
        }

        let text = &self.input[self.start..self.pos];
        self.make_token(TokenKind::Number(text.to_string()))
    }

    /// Scans `0x..` and `0b..` literals.
    fn scan_prefixed_number(&mut self, radix: char) -> Token {
        self.advance(); // 0
        self.advance(); // x / b
        let digits_start = self.pos;
        while self.peek().is_some_and(char::is_alphanumeric) {
            self.advance();
        }
        let digits = &self.input[digits_start..self.pos];
        if radix == 'x' {
            if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
                return self.error(format!("Invalid hexadecimal literal: 0x{digits}"));
            }
            self.make_token(TokenKind::Hex(digits.to_ascii_uppercase()))
        } else {
            if digits.is_empty() || !digits.chars().all(|c| c == '0' || c == '1') {
                return self.error(format!("Invalid bit literal: 0b{digits}"));
            }
            self.make_token(TokenKind::Bit(digits.to_string()))
        }
    }

    /// Scans a string literal, resolving doubled quotes and backslash escapes.
    fn scan_string(&mut self, quote: char) -> Token {
        self.advance(); // opening quote
        let mut value = String::new();

        loop {
            match self.advance() {
                Some(c) if c == quote => {
                    if self.peek() == Some(quote) {
                        self.advance();
                        value.push(quote);
                    } else {
                        break;
                    }
                }
                Some('\\') => match self.advance() {
                    Some('n') => value.push('\n'),
                    Some('r') => value.push('\r'),
                    Some('t') => value.push('\t'),
                    Some('0') => value.push('\0'),
                    Some('Z') => value.push('\u{1a}'),
                    Some('b') => value.push('\u{8}'),
                    // LIKE wildcards keep their backslash
                    Some(c @ ('%' | '_')) => {
                        value.push('\\');
                        value.push(c);
                    }
                    Some(c) => value.push(c),
                    None => return self.error("Unterminated string literal"),
                },
                Some(c) => value.push(c),
                None => return self.error("Unterminated string literal"),
            }
        }

        self.make_token(TokenKind::String(value))
    }

    /// Scans `X'..'` or `B'..'` literals.
    fn scan_quoted_bits(&mut self, hex: bool) -> Token {
        self.advance(); // X / B
        self.advance(); // opening quote
        let digits_start = self.pos;
        while self.peek().is_some_and(|c| c != '\'') {
            self.advance();
        }
        if self.peek().is_none() {
            return self.error("Unterminated literal");
        }
        let digits = self.input[digits_start..self.pos].to_string();
        self.advance(); // closing quote

        if hex {
            if digits.len() % 2 != 0 || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
                return self.error(format!("Invalid hexadecimal literal: X'{digits}'"));
            }
            self.make_token(TokenKind::Hex(digits.to_ascii_uppercase()))
        } else {
            if !digits.chars().all(|c| c == '0' || c == '1') {
                return self.error(format!("Invalid bit literal: b'{digits}'"));
            }
            self.make_token(TokenKind::Bit(digits))
        }
    }

    /// Scans the next token.
    #[must_use]
    pub fn next_token(&mut self) -> Token {
        self.skip_whitespace_and_comments();
        self.start = self.pos;

        let Some(c) = self.peek() else {
            return self.make_token(TokenKind::Eof);
        };
        let next = self.peek_next();

        match c {
            '\'' | '"' => return self.scan_string(c),
            '`' => return self.scan_quoted_identifier(),
            'X' | 'x' if next == Some('\'') => return self.scan_quoted_bits(true),
            'B' | 'b' if next == Some('\'') => return self.scan_quoted_bits(false),
            'N' | 'n' if next == Some('\'') => {
                self.advance();
                return self.scan_string('\'');
            }
            '0' if matches!(next, Some('x' | 'b')) => {
                let radix = next.unwrap_or('x');
                return self.scan_prefixed_number(radix);
            }
            c if c.is_ascii_digit() => return self.scan_number(),
            c if c.is_alphabetic() || c == '_' || c == '$' => return self.scan_identifier(),
            _ => {}
        }

        self.advance();
        let kind = match c {
            '(' => TokenKind::LeftParen,
            ')' => TokenKind::RightParen,
            ',' => TokenKind::Comma,
            ';' => TokenKind::Semicolon,
            '.' => TokenKind::Dot,
            '+' => TokenKind::Plus,
            '-' => TokenKind::Minus,
            '*' => TokenKind::Star,
            '/' => TokenKind::Slash,
            '%' => TokenKind::Percent,
            '~' => TokenKind::BitNot,
            '^' => TokenKind::BitXor,
            '?' => TokenKind::Question,
            '@' => TokenKind::At,
            '=' => TokenKind::Eq,
            ':' if self.peek() == Some('=') => {
                self.advance();
                TokenKind::Assign
            }
            '<' => match self.peek() {
                Some('=') => {
                    self.advance();
                    if self.peek() == Some('>') {
                        self.advance();
                        TokenKind::NullSafeEq
                    } else {
                        TokenKind::LtEq
                    }
                }
                Some('>') => {
                    self.advance();
                    TokenKind::NotEq
                }
                Some('<') => {
                    self.advance();
                    TokenKind::LeftShift
                }
                _ => TokenKind::Lt,
            },
            '>' => match self.peek() {
                Some('=') => {
                    self.advance();
                    TokenKind::GtEq
                }
                Some('>') => {
                    self.advance();
                    TokenKind::RightShift
                }
                _ => TokenKind::Gt,
            },
            '!' => {
                if self.peek() == Some('=') {
                    self.advance();
                    TokenKind::NotEq
                } else {
                    TokenKind::Bang
                }
            }
            '|' => {
                if self.peek() == Some('|') {
                    self.advance();
                    TokenKind::LogicalOr
                } else {
                    TokenKind::BitOr
                }
            }
            '&' => {
                if self.peek() == Some('&') {
                    self.advance();
                    TokenKind::LogicalAnd
                } else {
                    TokenKind::BitAnd
                }
            }
            other => TokenKind::Error(format!("Unexpected character: {other}")),
        };
        self.make_token(kind)
    }

    /// Tokenizes the entire input and returns all tokens.
    #[must_use]
    pub fn tokenize(&mut self) -> Vec<Token> {
        let mut tokens = Vec::new();
        loop {
            let token = self.next_token();
            let is_eof = token.is_eof();
            tokens.push(token);
            if is_eof {
                break;
            }
        }
        tokens
    }
}
