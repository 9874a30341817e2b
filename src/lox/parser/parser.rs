// expression     → equality ;
// equality       → comparison ( ( "!=" | "==" ) comparison )* ;
// comparison     → addition ( ( ">" | ">=" | "<" | "<=" ) addition )* ;
// addition       → multiplication ( ( "-" | "+" ) multiplication )* ;
// multiplication → unary ( ( "/" | "*" ) unary )* ;
// unary          → ( "!" | "-" ) unary | primary ;
// primary        → NUMBER | STRING | "true" | "false" | "nil" | "(" expression ")" ;

use thiserror::Error;

use super::ast::{Expr, LiteralValue};
use crate::lox::lexer::{Token, TokenKind};
use crate::lox::reporter::ErrorReporter;

/// Marker for an aborted parse. The diagnostic has already been reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("parse error")]
pub struct ParseError;

pub type ParseResult<T> = Result<T, ParseError>;

/// Deepest expression tree the parser will build. Groupings, unary operands
/// and each operator of a binary chain add one level.
pub const MAX_DEPTH: usize = 256;

/// Read past the end of a slice that lacks its EOF marker
static END_OF_INPUT: Token = Token {
    kind: TokenKind::Eof,
    lexeme: String::new(),
    literal: None,
    line: 0,
};

/// Recursive-descent parser over a scanned token slice.
///
/// The slice must end with the EOF token, as produced by
/// [`scan`](crate::lox::lexer::scan).
pub struct Parser<'t, 'r> {
    tokens: &'t [Token],
    current: usize,
    depth: usize,
    reporter: &'r mut ErrorReporter,
}

impl<'t, 'r> Parser<'t, 'r> {
    pub fn new(tokens: &'t [Token], reporter: &'r mut ErrorReporter) -> Self {
        Parser {
            tokens,
            current: 0,
            depth: 0,
            reporter,
        }
    }

    /// Parse a single expression; `None` if a syntax error was reported
    pub fn parse(&mut self) -> Option<Expr> {
        if !self.tokens.last().is_some_and(Token::is_eof) {
            log::warn!("token stream does not end with EOF; refusing to parse");
            return None;
        }

        self.depth = 0;
        match self.expression() {
            Ok(expr) => {
                log::debug!("parsed {} expression", expr.node_type());
                Some(expr)
            }
            Err(ParseError) => {
                log::debug!("parse aborted at token {}", self.current);
                None
            }
        }
    }

    pub fn expression(&mut self) -> ParseResult<Expr> {
        self.equality()
    }

    fn equality(&mut self) -> ParseResult<Expr> {
        let depth = self.depth;
        let mut expr = self.comparison()?;

        while self.match_kinds(&[TokenKind::BangEqual, TokenKind::EqualEqual]) {
            let operator = self.previous().clone();
            self.descend()?;
            let right = self.comparison()?;
            expr = Expr::binary(expr, operator, right);
        }

        self.depth = depth;
        Ok(expr)
    }

    fn comparison(&mut self) -> ParseResult<Expr> {
        let depth = self.depth;
        let mut expr = self.addition()?;

        while self.match_kinds(&[
            TokenKind::Greater,
            TokenKind::GreaterEqual,
            TokenKind::Less,
            TokenKind::LessEqual,
        ]) {
            let operator = self.previous().clone();
            self.descend()?;
            let right = self.addition()?;
            expr = Expr::binary(expr, operator, right);
        }

        self.depth = depth;
        Ok(expr)
    }

    fn addition(&mut self) -> ParseResult<Expr> {
        let depth = self.depth;
        let mut expr = self.multiplication()?;

        while self.match_kinds(&[TokenKind::Minus, TokenKind::Plus]) {
            let operator = self.previous().clone();
            self.descend()?;
            let right = self.multiplication()?;
            expr = Expr::binary(expr, operator, right);
        }

        self.depth = depth;
        Ok(expr)
    }

    fn multiplication(&mut self) -> ParseResult<Expr> {
        let depth = self.depth;
        let mut expr = self.unary()?;

        while self.match_kinds(&[TokenKind::Slash, TokenKind::Star]) {
            let operator = self.previous().clone();
            self.descend()?;
            let right = self.unary()?;
            expr = Expr::binary(expr, operator, right);
        }

        self.depth = depth;
        Ok(expr)
    }

    fn unary(&mut self) -> ParseResult<Expr> {
        if self.match_kinds(&[TokenKind::Bang, TokenKind::Minus]) {
            let operator = self.previous().clone();
            self.descend()?;
            let right = self.unary()?;
            self.depth -= 1;
            return Ok(Expr::unary(operator, right));
        }

        self.primary()
    }

    fn primary(&mut self) -> ParseResult<Expr> {
        if self.match_kinds(&[TokenKind::False]) {
            return Ok(Expr::literal(false));
        }
        if self.match_kinds(&[TokenKind::True]) {
            return Ok(Expr::literal(true));
        }
        if self.match_kinds(&[TokenKind::Nil]) {
            return Ok(Expr::literal(LiteralValue::Nil));
        }

        if self.match_kinds(&[TokenKind::Number, TokenKind::String]) {
            let token = self.previous();
            return match &token.literal {
                Some(literal) => Ok(Expr::literal(literal.clone())),
                None => Err(self.error(token, "Expect expression.")),
            };
        }

        if self.match_kinds(&[TokenKind::LeftParen]) {
            self.descend()?;
            let expr = self.expression()?;
            self.depth -= 1;
            self.consume(TokenKind::RightParen, "Expect ')' after expression.")?;
            return Ok(Expr::grouping(expr));
        }

        Err(self.error(self.peek(), "Expect expression."))
    }

    /// Advance if the current token has `kind`, otherwise report `message` there
    pub fn consume(&mut self, kind: TokenKind, message: &str) -> ParseResult<&'t Token> {
        if self.check(kind) {
            return Ok(self.advance());
        }

        Err(self.error(self.peek(), message))
    }

    /// Enter one more level of the tree, refusing past [`MAX_DEPTH`]
    fn descend(&mut self) -> ParseResult<()> {
        if self.depth >= MAX_DEPTH {
            return Err(self.error(self.peek(), "Too much nesting."));
        }
        self.depth += 1;
        Ok(())
    }

    fn error(&mut self, token: &Token, message: &str) -> ParseError {
        self.reporter.token_error(token, message);
        ParseError
    }

    /// Discard tokens until a likely statement boundary: just past a `;`, or in
    /// front of a keyword that starts a declaration or statement.
    pub fn synchronize(&mut self) {
        self.advance();

        while !self.is_at_end() {
            if self.previous().kind == TokenKind::Semicolon || self.peek().kind.starts_statement() {
                break;
            }
            self.advance();
        }
        log::trace!("synchronized at token {}", self.current);
    }

    pub fn match_kinds(&mut self, kinds: &[TokenKind]) -> bool {
        if kinds.iter().any(|&kind| self.check(kind)) {
            self.advance();
            return true;
        }
        false
    }

    pub fn check(&self, kind: TokenKind) -> bool {
        if self.is_at_end() {
            return false;
        }
        self.peek().kind == kind
    }

    pub fn advance(&mut self) -> &'t Token {
        if !self.is_at_end() {
            self.current += 1;
        }
        self.previous()
    }

    pub fn is_at_end(&self) -> bool {
        self.peek().is_eof()
    }

    /// The current token; EOF once the slice is exhausted, even if it had none
    pub fn peek(&self) -> &'t Token {
        self.tokens.get(self.current).unwrap_or(&END_OF_INPUT)
    }

    /// The most recently consumed token (the current one before any advance)
    pub fn previous(&self) -> &'t Token {
        self.tokens
            .get(self.current.saturating_sub(1))
            .unwrap_or(&END_OF_INPUT)
    }
}
