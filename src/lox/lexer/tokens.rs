//! Token definitions for Lox
//!
//! `TokenKind` is the logos-derived enum that drives scanning. Most variants map
//! one-to-one onto a `#[token]` or `#[regex]` rule; keywords carry no rule of their
//! own and are assigned by reclassifying identifiers through [`KEYWORDS`].
//!
//! [`Token`] is the owned value handed to the parser: the kind, the exact lexeme,
//! the decoded literal (if any) and the line the lexeme started on.

use logos::Logos;
use once_cell::sync::Lazy;
use serde::Serialize;
use std::collections::HashMap;
use std::fmt;

use super::lexer_impl::{block_comment, number, string, whitespace, LexError, LineTracker};

/// All token categories produced by the Lox scanner
///
/// The scanner never emits the hidden `Trivia` kind; it only carries the
/// whitespace and comment rules.
#[derive(Logos, Debug, PartialEq, Eq, Hash, Clone, Copy, Serialize)]
#[logos(extras = LineTracker)]
#[logos(error = LexError)]
pub enum TokenKind {
    // Single-character tokens
    #[token("(")]
    LeftParen,
    #[token(")")]
    RightParen,
    #[token("{")]
    LeftBrace,
    #[token("}")]
    RightBrace,
    #[token(",")]
    Comma,
    #[token(".")]
    Dot,
    #[token("-")]
    Minus,
    #[token("+")]
    Plus,
    #[token(";")]
    Semicolon,
    #[token("/")]
    Slash,
    #[token("*")]
    Star,

    // One or two character tokens
    #[token("!")]
    Bang,
    #[token("!=")]
    BangEqual,
    #[token("=")]
    Equal,
    #[token("==")]
    EqualEqual,
    #[token(">")]
    Greater,
    #[token(">=")]
    GreaterEqual,
    #[token("<")]
    Less,
    #[token("<=")]
    LessEqual,

    // Literals
    #[regex(r"[a-zA-Z_][a-zA-Z0-9_]*")]
    Identifier,
    #[token("\"", string)]
    String,
    #[regex(r"[0-9]+", number)]
    Number,

    // Keywords
    And,
    Class,
    Else,
    False,
    Fun,
    For,
    If,
    Nil,
    Or,
    Print,
    Return,
    Super,
    This,
    True,
    Var,
    While,

    /// Whitespace and comments. Every rule on this variant skips, so it never
    /// reaches the token stream.
    #[doc(hidden)]
    #[serde(skip_serializing)]
    #[regex(r"[ \t\r\n]+", whitespace)]
    #[regex(r"//[^\n]*", logos::skip)]
    #[token("/*", block_comment)]
    Trivia,

    Eof,
}

/// Reserved words, keyed by their exact spelling
pub static KEYWORDS: Lazy<HashMap<&'static str, TokenKind>> = Lazy::new(|| {
    HashMap::from([
        ("and", TokenKind::And),
        ("class", TokenKind::Class),
        ("else", TokenKind::Else),
        ("false", TokenKind::False),
        ("for", TokenKind::For),
        ("fun", TokenKind::Fun),
        ("if", TokenKind::If),
        ("nil", TokenKind::Nil),
        ("or", TokenKind::Or),
        ("print", TokenKind::Print),
        ("return", TokenKind::Return),
        ("super", TokenKind::Super),
        ("this", TokenKind::This),
        ("true", TokenKind::True),
        ("var", TokenKind::Var),
        ("while", TokenKind::While),
    ])
});

impl TokenKind {
    /// Kind for an identifier-shaped lexeme: its keyword if reserved, else `Identifier`
    pub fn for_identifier(text: &str) -> TokenKind {
        KEYWORDS.get(text).copied().unwrap_or(TokenKind::Identifier)
    }

    /// Kinds that open a declaration or statement; recovery stops in front of them
    pub fn starts_statement(&self) -> bool {
        matches!(
            self,
            TokenKind::Class
                | TokenKind::Fun
                | TokenKind::Var
                | TokenKind::For
                | TokenKind::If
                | TokenKind::While
                | TokenKind::Print
                | TokenKind::Return
        )
    }

    /// Upper snake-case name, as shown in token dumps
    pub fn name(&self) -> &'static str {
        match self {
            TokenKind::LeftParen => "LEFT_PAREN",
            TokenKind::RightParen => "RIGHT_PAREN",
            TokenKind::LeftBrace => "LEFT_BRACE",
            TokenKind::RightBrace => "RIGHT_BRACE",
            TokenKind::Comma => "COMMA",
            TokenKind::Dot => "DOT",
            TokenKind::Minus => "MINUS",
            TokenKind::Plus => "PLUS",
            TokenKind::Semicolon => "SEMICOLON",
            TokenKind::Slash => "SLASH",
            TokenKind::Star => "STAR",
            TokenKind::Bang => "BANG",
            TokenKind::BangEqual => "BANG_EQUAL",
            TokenKind::Equal => "EQUAL",
            TokenKind::EqualEqual => "EQUAL_EQUAL",
            TokenKind::Greater => "GREATER",
            TokenKind::GreaterEqual => "GREATER_EQUAL",
            TokenKind::Less => "LESS",
            TokenKind::LessEqual => "LESS_EQUAL",
            TokenKind::Identifier => "IDENTIFIER",
            TokenKind::String => "STRING",
            TokenKind::Number => "NUMBER",
            TokenKind::And => "AND",
            TokenKind::Class => "CLASS",
            TokenKind::Else => "ELSE",
            TokenKind::False => "FALSE",
            TokenKind::Fun => "FUN",
            TokenKind::For => "FOR",
            TokenKind::If => "IF",
            TokenKind::Nil => "NIL",
            TokenKind::Or => "OR",
            TokenKind::Print => "PRINT",
            TokenKind::Return => "RETURN",
            TokenKind::Super => "SUPER",
            TokenKind::This => "THIS",
            TokenKind::True => "TRUE",
            TokenKind::Var => "VAR",
            TokenKind::While => "WHILE",
            TokenKind::Trivia => "TRIVIA",
            TokenKind::Eof => "EOF",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Decoded value carried by NUMBER and STRING tokens
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Literal {
    Number(f64),
    String(String),
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Literal::Number(n) => write!(f, "{}", n),
            Literal::String(s) => f.write_str(s),
        }
    }
}

/// One scanned lexeme
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Token {
    pub kind: TokenKind,
    pub lexeme: String,
    pub literal: Option<Literal>,
    pub line: usize,
}

impl Token {
    pub fn new(
        kind: TokenKind,
        lexeme: impl Into<String>,
        literal: Option<Literal>,
        line: usize,
    ) -> Self {
        Token {
            kind,
            lexeme: lexeme.into(),
            literal,
            line,
        }
    }

    /// The end-of-input marker: the only token with an empty lexeme
    pub fn eof(line: usize) -> Self {
        Token::new(TokenKind::Eof, "", None, line)
    }

    pub fn is_eof(&self) -> bool {
        self.kind == TokenKind::Eof
    }
}

/// `KIND lexeme literal`, with an empty literal part when there is none
impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} ", self.kind, self.lexeme)?;
        if let Some(literal) = &self.literal {
            write!(f, "{}", literal)?;
        }
        Ok(())
    }
}
