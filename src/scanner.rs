use crate::error::{SpartieError, SpartieResult, Span};
use crate::value::Value;
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenType {
    // Single-character tokens
    Semicolon,
    Comma,
    LeftBrace,
    RightBrace,
    LeftParen,
    RightParen,
    Add,
    Subtract,
    Multiply,
    Divide,
    Or,

    // One or two character tokens
    LessThan,
    LessEqual,
    GreaterThan,
    GreaterEqual,
    Assign,
    Equivalent,
    Not,
    NotEqual,

    // Literals
    String,
    Number,
    Identifier,

    // Keywords
    If,
    Else,
    For,
    While,
    True,
    False,
    Fun,
    Return,
    Var,
    Print,
    Null,

    /// Whitespace and comments; never part of the returned sequence.
    Ignore,
    /// Placeholder kind; the scanner never emits it.
    Undefined,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub token_type: TokenType,
    pub lexeme: String,
    pub line: usize,
    /// Decoded value for `String` and `Number` tokens.
    pub literal: Option<Value>,
    pub span: Span,
}

impl Token {
    pub fn new(token_type: TokenType, lexeme: impl Into<String>, line: usize, span: Span) -> Self {
        Self {
            token_type,
            lexeme: lexeme.into(),
            line,
            literal: None,
            span,
        }
    }

    pub fn with_literal(mut self, literal: Value) -> Self {
        self.literal = Some(literal);
        self
    }
}

/// Scans `source` into tokens, dropping whitespace and comments.
pub fn scan(source: &str) -> SpartieResult<Vec<Token>> {
    Scanner::new(source).scan_tokens()
}

pub struct Scanner {
    source: Vec<char>,
    tokens: Vec<Token>,
    start: usize,
    current: usize,
    line: usize,
    keywords: HashMap<&'static str, TokenType>,
}

impl Scanner {
    pub fn new(source: &str) -> Self {
        let keywords = HashMap::from([
            ("if", TokenType::If),
            ("else", TokenType::Else),
            ("for", TokenType::For),
            ("while", TokenType::While),
            ("true", TokenType::True),
            ("false", TokenType::False),
            ("fun", TokenType::Fun),
            ("return", TokenType::Return),
            ("var", TokenType::Var),
            ("print", TokenType::Print),
            ("null", TokenType::Null),
        ]);

        Self {
            source: source.chars().collect(),
            tokens: Vec::new(),
            start: 0,
            current: 0,
            line: 1,
            keywords,
        }
    }

    pub fn scan_tokens(mut self) -> SpartieResult<Vec<Token>> {
        while !self.is_at_end() {
            self.start = self.current;
            let token = self.scan_token()?;
            if token.token_type != TokenType::Ignore {
                self.tokens.push(token);
            }
        }

        tracing::debug!(tokens = self.tokens.len(), lines = self.line, "scan finished");
        Ok(self.tokens)
    }

    fn is_at_end(&self) -> bool {
        self.current >= self.source.len()
    }

    fn scan_token(&mut self) -> SpartieResult<Token> {
        let c = self.advance();

        let token_type = match c {
            ' ' | '\r' | '\t' => TokenType::Ignore,
            '\n' => {
                self.line += 1;
                TokenType::Ignore
            }
            ';' => TokenType::Semicolon,
            ',' => TokenType::Comma,
            '{' => TokenType::LeftBrace,
            '}' => TokenType::RightBrace,
            '(' => TokenType::LeftParen,
            ')' => TokenType::RightParen,
            '+' => TokenType::Add,
            '-' => TokenType::Subtract,
            '*' => TokenType::Multiply,
            '|' => TokenType::Or,
            '<' => self.either('=', TokenType::LessEqual, TokenType::LessThan),
            '>' => self.either('=', TokenType::GreaterEqual, TokenType::GreaterThan),
            '=' => self.either('=', TokenType::Equivalent, TokenType::Assign),
            '!' => self.either('=', TokenType::NotEqual, TokenType::Not),
            '/' => {
                if self.match_char('/') {
                    self.skip_comment();
                    TokenType::Ignore
                } else {
                    TokenType::Divide
                }
            }
            '"' => return self.string(),
            c if c.is_ascii_digit() => return self.number(),
            c if c.is_ascii_alphabetic() => self.identifier(),
            _ => {
                return Err(SpartieError::lexical(
                    self.line,
                    Span::single(self.start),
                    format!("Unexpected character '{}' at {}", c, self.start),
                ));
            }
        };

        Ok(self.make_token(token_type))
    }

    fn advance(&mut self) -> char {
        let c = self.peek();
        if !self.is_at_end() {
            self.current += 1;
        }
        c
    }

    fn match_char(&mut self, expected: char) -> bool {
        if self.is_at_end() || self.peek() != expected {
            false
        } else {
            self.current += 1;
            true
        }
    }

    fn either(&mut self, expected: char, matched: TokenType, single: TokenType) -> TokenType {
        if self.match_char(expected) {
            matched
        } else {
            single
        }
    }

    fn peek(&self) -> char {
        self.source.get(self.current).copied().unwrap_or('\0')
    }

    // The terminating newline belongs to the comment.
    fn skip_comment(&mut self) {
        while !self.is_at_end() {
            if self.advance() == '\n' {
                self.line += 1;
                break;
            }
        }
    }

    fn string(&mut self) -> SpartieResult<Token> {
        let start_line = self.line;

        while self.peek() != '"' && !self.is_at_end() {
            if self.advance() == '\n' {
                self.line += 1;
            }
        }

        if self.is_at_end() {
            return Err(SpartieError::lexical(
                start_line,
                Span::new(self.start, self.current),
                "Unterminated string",
            ));
        }

        // Closing quote
        self.advance();

        let content: String = self.source[self.start + 1..self.current - 1].iter().collect();
        let mut token = self.make_token(TokenType::String);
        token.line = start_line;
        Ok(token.with_literal(Value::String(content)))
    }

    fn number(&mut self) -> SpartieResult<Token> {
        let mut seen_dot = false;

        while self.peek().is_ascii_digit() || self.peek() == '.' {
            if self.advance() == '.' {
                if seen_dot {
                    return Err(SpartieError::lexical(
                        self.line,
                        Span::new(self.start, self.current),
                        format!(
                            "Invalid number format: multiple decimal points in '{}'",
                            self.text()
                        ),
                    ));
                }
                seen_dot = true;
            }
        }

        let text = self.text();
        let number = text.parse::<f64>().map_err(|_| {
            SpartieError::lexical(
                self.line,
                Span::new(self.start, self.current),
                format!("Invalid number format: '{}'", text),
            )
        })?;

        Ok(self.make_token(TokenType::Number).with_literal(Value::Number(number)))
    }

    fn identifier(&mut self) -> TokenType {
        while self.peek().is_ascii_alphanumeric() || self.peek() == '_' {
            self.advance();
        }

        self.keywords
            .get(self.text().as_str())
            .copied()
            .unwrap_or(TokenType::Identifier)
    }

    fn text(&self) -> String {
        self.source[self.start..self.current].iter().collect()
    }

    fn make_token(&self, token_type: TokenType) -> Token {
        Token::new(
            token_type,
            self.text(),
            self.line,
            Span::new(self.start, self.current),
        )
    }
}
