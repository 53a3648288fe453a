// EliQL Token Model
//
// Tokens and the typed literal values some of them carry.

use std::fmt;

use serde::Serialize;

/// EliQL token kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum TokenKind {
    // Punctuation and operators
    LeftParen,    // (
    RightParen,   // )
    Comma,        // ,
    Plus,         // +
    Minus,        // -
    Slash,        // /
    Star,         // *
    Equal,        // =
    Less,         // <
    LessEqual,    // <=
    Greater,      // >
    GreaterEqual, // >=
    Semicolon,    // ;

    // Literals
    Table,  // "name"
    Column, // "table"."column"
    String, // 'text'
    Number, // 12 / 12.5

    // Keywords
    Select,
    From,
    As,
    Inner,
    Left,
    Right,
    Full,
    Join,
    On,
    Group,
    By,
    Order,
    Desc,
    Asc,
    All,
    Union,
    Where,
    Or,
    And,
    Not,

    // Function calls
    MinFunc,
    MaxFunc,
    AvgFunc,
    RangeFunc,
    SumFunc,
    CountFunc,
    NowFunc,
    ToTimezoneFunc,
    TodayFunc,
    IntervalFunc,
    ConcatFunc,

    Eof,
}

impl TokenKind {
    /// Look up a reserved word, ignoring case
    pub fn keyword(word: &str) -> Option<TokenKind> {
        let kind = match word.to_ascii_uppercase().as_str() {
            "SELECT" => TokenKind::Select,
            "FROM" => TokenKind::From,
            "AS" => TokenKind::As,
            "INNER" => TokenKind::Inner,
            "LEFT" => TokenKind::Left,
            "RIGHT" => TokenKind::Right,
            "FULL" => TokenKind::Full,
            "JOIN" => TokenKind::Join,
            "ON" => TokenKind::On,
            "GROUP" => TokenKind::Group,
            "BY" => TokenKind::By,
            "ORDER" => TokenKind::Order,
            "DESC" => TokenKind::Desc,
            "ASC" => TokenKind::Asc,
            "ALL" => TokenKind::All,
            "UNION" => TokenKind::Union,
            "WHERE" => TokenKind::Where,
            "OR" => TokenKind::Or,
            "AND" => TokenKind::And,
            "NOT" => TokenKind::Not,
            _ => return None,
        };
        Some(kind)
    }

    /// Look up a function name, ignoring case
    pub fn function(name: &str) -> Option<TokenKind> {
        let kind = match name.to_ascii_uppercase().as_str() {
            "MIN" => TokenKind::MinFunc,
            "MAX" => TokenKind::MaxFunc,
            "AVG" => TokenKind::AvgFunc,
            "RANGE" => TokenKind::RangeFunc,
            "SUM" => TokenKind::SumFunc,
            "COUNT" => TokenKind::CountFunc,
            "NOW" => TokenKind::NowFunc,
            "TO_TIMEZONE" => TokenKind::ToTimezoneFunc,
            "TODAY" => TokenKind::TodayFunc,
            "INTERVAL" => TokenKind::IntervalFunc,
            "CONCAT" => TokenKind::ConcatFunc,
            _ => return None,
        };
        Some(kind)
    }

    pub fn is_function(&self) -> bool {
        matches!(
            self,
            TokenKind::MinFunc
                | TokenKind::MaxFunc
                | TokenKind::AvgFunc
                | TokenKind::RangeFunc
                | TokenKind::SumFunc
                | TokenKind::CountFunc
                | TokenKind::NowFunc
                | TokenKind::ToTimezoneFunc
                | TokenKind::TodayFunc
                | TokenKind::IntervalFunc
                | TokenKind::ConcatFunc
        )
    }

    pub fn is_comparator(&self) -> bool {
        matches!(
            self,
            TokenKind::Greater
                | TokenKind::GreaterEqual
                | TokenKind::Equal
                | TokenKind::Less
                | TokenKind::LessEqual
        )
    }

    pub fn is_arithmetic_operator(&self) -> bool {
        matches!(
            self,
            TokenKind::Slash | TokenKind::Minus | TokenKind::Plus | TokenKind::Star
        )
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            TokenKind::LeftParen => "(",
            TokenKind::RightParen => ")",
            TokenKind::Comma => ",",
            TokenKind::Plus => "+",
            TokenKind::Minus => "-",
            TokenKind::Slash => "/",
            TokenKind::Star => "*",
            TokenKind::Equal => "=",
            TokenKind::Less => "<",
            TokenKind::LessEqual => "<=",
            TokenKind::Greater => ">",
            TokenKind::GreaterEqual => ">=",
            TokenKind::Semicolon => ";",
            TokenKind::Table => "TABLE",
            TokenKind::Column => "COLUMN",
            TokenKind::String => "STRING",
            TokenKind::Number => "NUMBER",
            TokenKind::Select => "SELECT",
            TokenKind::From => "FROM",
            TokenKind::As => "AS",
            TokenKind::Inner => "INNER",
            TokenKind::Left => "LEFT",
            TokenKind::Right => "RIGHT",
            TokenKind::Full => "FULL",
            TokenKind::Join => "JOIN",
            TokenKind::On => "ON",
            TokenKind::Group => "GROUP",
            TokenKind::By => "BY",
            TokenKind::Order => "ORDER",
            TokenKind::Desc => "DESC",
            TokenKind::Asc => "ASC",
            TokenKind::All => "ALL",
            TokenKind::Union => "UNION",
            TokenKind::Where => "WHERE",
            TokenKind::Or => "OR",
            TokenKind::And => "AND",
            TokenKind::Not => "NOT",
            TokenKind::MinFunc => "MIN",
            TokenKind::MaxFunc => "MAX",
            TokenKind::AvgFunc => "AVG",
            TokenKind::RangeFunc => "RANGE",
            TokenKind::SumFunc => "SUM",
            TokenKind::CountFunc => "COUNT",
            TokenKind::NowFunc => "NOW",
            TokenKind::ToTimezoneFunc => "TO_TIMEZONE",
            TokenKind::TodayFunc => "TODAY",
            TokenKind::IntervalFunc => "INTERVAL",
            TokenKind::ConcatFunc => "CONCAT",
            TokenKind::Eof => "EOF",
        };
        f.write_str(text)
    }
}

/// Typed value carried by literal, name and function tokens.
///
/// Derived equality keeps variants apart: a `String` never equals a `Column`
/// even when the text matches.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Literal {
    String(String),
    Number(f64),
    /// Compound `"table"."column"` reference
    Column { table: String, column: String },
    /// Function call with its already-scanned argument tokens
    Function { kind: TokenKind, parameters: Vec<Token> },
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Literal::String(text) => write!(f, "{}", text),
            Literal::Number(value) => write!(f, "{}", value),
            Literal::Column { table, column } => write!(f, "{}.{}", table, column),
            Literal::Function { kind, parameters } => {
                write!(f, "{}(", kind)?;
                for (i, param) in parameters.iter().enumerate() {
                    if i > 0 {
                        write!(f, " ")?;
                    }
                    write!(f, "{}", param.lexeme)?;
                }
                write!(f, ")")
            }
        }
    }
}

/// A Token represents one lexical unit of an EliQL query
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Token {
    pub kind: TokenKind,
    pub lexeme: String,
    pub literal: Option<Literal>,
    pub line: usize,
}

impl Token {
    pub fn new(kind: TokenKind, lexeme: impl Into<String>, literal: Option<Literal>, line: usize) -> Self {
        Token {
            kind,
            lexeme: lexeme.into(),
            literal,
            line,
        }
    }

    /// The end-of-input marker closing every token sequence
    pub fn eof(line: usize) -> Self {
        Token::new(TokenKind::Eof, "", None, line)
    }

    pub fn is(&self, kind: TokenKind) -> bool {
        self.kind == kind
    }

    /// Table or stream name, for `Table` tokens and the qualifier of `Column` tokens
    pub fn table_name(&self) -> Option<&str> {
        match (&self.kind, &self.literal) {
            (TokenKind::Table, Some(Literal::String(name))) => Some(name),
            (TokenKind::Column, Some(Literal::Column { table, .. })) => Some(table),
            _ => None,
        }
    }

    pub fn number(&self) -> Option<f64> {
        match self.literal {
            Some(Literal::Number(value)) => Some(value),
            _ => None,
        }
    }

    /// Argument tokens of a function token
    pub fn parameters(&self) -> Option<&[Token]> {
        match &self.literal {
            Some(Literal::Function { parameters, .. }) => Some(parameters),
            _ => None,
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.literal {
            Some(literal) => write!(f, "{:?} {} {}", self.kind, self.lexeme, literal),
            None => write!(f, "{:?} {}", self.kind, self.lexeme),
        }
    }
}
