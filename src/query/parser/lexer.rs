// EliQL Scanner Implementation
//
// This module turns raw query text into a token sequence. Lexical errors are
// collected rather than raised, so one pass reports every defect it can find.

use log::{debug, trace};

use super::error::{LexError, LexErrors};
use super::token::{Literal, Token, TokenKind};

/// Scanner settings
#[derive(Debug, Clone, Copy)]
pub struct ScannerConfig {
    /// Deepest allowed function call nesting, e.g. `MAX(CONCAT(NOW()))` is 3
    pub max_nesting_depth: usize,
}

impl Default for ScannerConfig {
    fn default() -> Self {
        Self {
            max_nesting_depth: 32,
        }
    }
}

/// Tokens and diagnostics produced by one scan
#[derive(Debug, Clone, PartialEq)]
pub struct ScanOutput {
    /// Always terminated by an `Eof` token
    pub tokens: Vec<Token>,
    pub errors: Vec<LexError>,
}

impl ScanOutput {
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Tokens if the scan was clean, otherwise every lexical error
    pub fn into_result(self) -> Result<Vec<Token>, LexErrors> {
        if self.errors.is_empty() {
            Ok(self.tokens)
        } else {
            Err(LexErrors(self.errors))
        }
    }
}

/// Scan `source` with the default configuration
pub fn scan(source: &str) -> (Vec<Token>, Vec<LexError>) {
    let output = Scanner::new(source).scan_tokens();
    (output.tokens, output.errors)
}

/// EliQL scanner for breaking a query string into tokens
pub struct Scanner {
    source: Vec<char>,
    tokens: Vec<Token>,
    errors: Vec<LexError>,
    start: usize,
    current: usize,
    line: usize,
    start_line: usize,
    depth: usize,
    config: ScannerConfig,
}

impl Scanner {
    /// Create a new scanner from a query string
    pub fn new(source: &str) -> Self {
        Self::with_config(source, ScannerConfig::default())
    }

    pub fn with_config(source: &str, config: ScannerConfig) -> Self {
        Scanner {
            source: source.chars().collect(),
            tokens: Vec::new(),
            errors: Vec::new(),
            start: 0,
            current: 0,
            line: 1,
            start_line: 1,
            depth: 0,
            config,
        }
    }

    /// Scanner for the argument text of a function call
    fn nested(source: &str, depth: usize, config: ScannerConfig) -> Self {
        let mut scanner = Self::with_config(source, config);
        scanner.depth = depth;
        scanner
    }

    /// Scan the whole input
    pub fn scan_tokens(mut self) -> ScanOutput {
        while !self.is_at_end() {
            self.start = self.current;
            self.start_line = self.line;
            self.scan_token();
        }

        self.tokens.push(Token::eof(self.line));
        ScanOutput {
            tokens: self.tokens,
            errors: self.errors,
        }
    }

    fn scan_token(&mut self) {
        let c = match self.advance() {
            Some(c) => c,
            None => return,
        };

        match c {
            '(' => self.add_token(TokenKind::LeftParen),
            ')' => self.add_token(TokenKind::RightParen),
            ',' => self.add_token(TokenKind::Comma),
            '+' => self.add_token(TokenKind::Plus),
            '/' => self.add_token(TokenKind::Slash),
            '*' => self.add_token(TokenKind::Star),
            '=' => self.add_token(TokenKind::Equal),
            ';' => self.add_token(TokenKind::Semicolon),
            '-' => {
                if self.match_char('-') {
                    // Line comment
                    while self.peek().is_some_and(|c| c != '\n') {
                        self.advance();
                    }
                } else {
                    self.add_token(TokenKind::Minus);
                }
            }
            '<' => {
                let kind = if self.match_char('=') {
                    TokenKind::LessEqual
                } else {
                    TokenKind::Less
                };
                self.add_token(kind);
            }
            '>' => {
                let kind = if self.match_char('=') {
                    TokenKind::GreaterEqual
                } else {
                    TokenKind::Greater
                };
                self.add_token(kind);
            }
            '\n' => self.line += 1,
            c if c.is_whitespace() => {}
            '\'' => self.string(),
            '"' => self.quoted_name(),
            c if c.is_ascii_digit() => self.number(),
            c if is_word_start(c) => self.word(),
            other => self.error(format!("Unexpected character '{}'.", other)),
        }
    }

    /// Read a `'...'` string literal
    fn string(&mut self) {
        while let Some(c) = self.peek() {
            if c == '\'' {
                break;
            }
            if c == '\n' {
                self.line += 1;
            }
            self.advance();
        }

        if self.is_at_end() {
            self.error("Unterminated string.");
            return;
        }

        // Closing quote
        self.advance();

        let value = self.slice(self.start + 1, self.current - 1);
        self.add_literal_token(TokenKind::String, Literal::String(value));
    }

    /// Read a `"table"` or `"table"."column"` name
    fn quoted_name(&mut self) {
        let table_start = self.current;
        if !self.name_segment() {
            self.error("Unterminated quoted name.");
            return;
        }
        let table = self.slice(table_start, self.current - 1);

        if self.peek() == Some('.') && self.peek_next() == Some('"') {
            // Skip the dot and the column's opening quote
            self.current += 2;
            let column_start = self.current;
            if !self.name_segment() {
                self.error("Unterminated quoted name.");
                return;
            }
            let column = self.slice(column_start, self.current - 1);
            self.add_literal_token(TokenKind::Column, Literal::Column { table, column });
        } else {
            self.add_literal_token(TokenKind::Table, Literal::String(table));
        }
    }

    /// Advance past the closing quote of a name segment
    fn name_segment(&mut self) -> bool {
        while let Some(c) = self.peek() {
            if c == '"' {
                self.advance();
                return true;
            }
            if c == '\n' {
                self.line += 1;
            }
            self.advance();
        }
        false
    }

    /// Read an integral or decimal number
    fn number(&mut self) {
        while self.peek().is_some_and(|c| c.is_ascii_digit()) {
            self.advance();
        }

        // Only take the dot when a digit follows it
        if self.peek() == Some('.') && self.peek_next().is_some_and(|c| c.is_ascii_digit()) {
            self.advance();
            while self.peek().is_some_and(|c| c.is_ascii_digit()) {
                self.advance();
            }
        }

        let text = self.slice(self.start, self.current);
        match text.parse::<f64>() {
            Ok(value) => self.add_literal_token(TokenKind::Number, Literal::Number(value)),
            Err(_) => {
                self.error(format!("Malformed number '{}'.", text));
                self.add_token(TokenKind::Number);
            }
        }
    }

    /// Read a keyword, or a function call when the word is directly followed by `(`
    fn word(&mut self) {
        while self.peek().is_some_and(is_word_part) {
            self.advance();
        }

        let text = self.slice(self.start, self.current);

        // Keywords win, so `SELECT(` is a keyword and a separate paren
        if let Some(kind) = TokenKind::keyword(&text) {
            self.add_token(kind);
            return;
        }

        if self.peek() == Some('(') {
            match TokenKind::function(&text) {
                Some(kind) => self.function(kind),
                None => self.error(format!("Unknown function '{}'.", text)),
            }
        } else {
            self.error(format!("Unknown keyword '{}'.", text));
        }
    }

    /// Read a function call and scan its argument text with a nested scanner
    fn function(&mut self, kind: TokenKind) {
        // Opening paren
        self.advance();
        let args_start = self.current;
        let args_line = self.line;

        let mut depth = 1usize;
        let mut quote: Option<char> = None;
        loop {
            let c = match self.advance() {
                Some(c) => c,
                None => {
                    self.error_at(self.start_line, format!("Unterminated call to {}.", kind));
                    return;
                }
            };

            match (quote, c) {
                (_, '\n') => self.line += 1,
                (Some(q), c) if c == q => quote = None,
                (Some(_), _) => {}
                (None, '-') if self.peek() == Some('-') => {
                    // Line comment; its newline is counted on the next pass
                    while self.peek().is_some_and(|c| c != '\n') {
                        self.advance();
                    }
                }
                (None, '\'') | (None, '"') => quote = Some(c),
                (None, '(') => depth += 1,
                (None, ')') => {
                    depth -= 1;
                    if depth == 0 {
                        break;
                    }
                }
                _ => {}
            }
        }

        if self.depth + 1 > self.config.max_nesting_depth {
            self.error_at(self.start_line, format!(
                "Call to {} nested deeper than {} levels.",
                kind, self.config.max_nesting_depth
            ));
            return;
        }

        let args = self.slice(args_start, self.current - 1);
        trace!("scanning arguments of {} at depth {}: {}", kind, self.depth + 1, args);

        let nested = Scanner::nested(&args, self.depth + 1, self.config).scan_tokens();

        // Nested lines count from 1; report them against the outer text
        for err in nested.errors {
            self.errors
                .push(LexError::new(err.line + args_line - 1, err.message));
        }

        let mut parameters = nested.tokens;
        parameters.pop();

        self.add_literal_token(kind, Literal::Function { kind, parameters });
    }

    fn add_token(&mut self, kind: TokenKind) {
        let lexeme = self.slice(self.start, self.current);
        self.tokens.push(Token::new(kind, lexeme, None, self.start_line));
    }

    fn add_literal_token(&mut self, kind: TokenKind, literal: Literal) {
        let lexeme = self.slice(self.start, self.current);
        self.tokens
            .push(Token::new(kind, lexeme, Some(literal), self.start_line));
    }

    fn error(&mut self, message: impl Into<String>) {
        self.error_at(self.line, message);
    }

    fn error_at(&mut self, line: usize, message: impl Into<String>) {
        let err = LexError::new(line, message);
        debug!("lexical error: {}", err);
        self.errors.push(err);
    }

    fn advance(&mut self) -> Option<char> {
        let c = self.source.get(self.current).copied();
        if c.is_some() {
            self.current += 1;
        }
        c
    }

    fn match_char(&mut self, expected: char) -> bool {
        if self.peek() == Some(expected) {
            self.current += 1;
            true
        } else {
            false
        }
    }

    fn peek(&self) -> Option<char> {
        self.source.get(self.current).copied()
    }

    fn peek_next(&self) -> Option<char> {
        self.source.get(self.current + 1).copied()
    }

    fn is_at_end(&self) -> bool {
        self.current >= self.source.len()
    }

    fn slice(&self, from: usize, to: usize) -> String {
        self.source[from..to].iter().collect()
    }
}

fn is_word_start(c: char) -> bool {
    c.is_alphabetic() || c == '_'
}

fn is_word_part(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}
