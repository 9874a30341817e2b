//! Implementation of the Lox scanner
//!
//! Recognition is done by logos through [`TokenKind`]. The pieces logos cannot
//! express as plain rules live here as callbacks: line counting, string bodies,
//! fractional parts of numbers and block comments. Each callback works on the
//! lexer remainder and `bump`s past whatever it consumed.
//!
//! [`Scanner`] turns the raw logos stream into owned [`Token`]s, reclassifies
//! keywords, decodes literals and routes lexical errors to the [`ErrorReporter`].

use logos::{FilterResult, Lexer, Logos, Skip};
use std::iter::FusedIterator;
use thiserror::Error;

use super::tokens::{Literal, Token, TokenKind};
use crate::lox::reporter::ErrorReporter;

/// Lexical errors. Scanning always continues after one of these.
#[derive(Debug, Default, Clone, PartialEq, Eq, Error)]
pub enum LexError {
    #[default]
    #[error("Unexpected character.")]
    UnexpectedCharacter,
    #[error("Unterminated string.")]
    UnterminatedString,
    #[error("Unexpected end of file")]
    UnterminatedComment,
}

/// Lexer extras: the current 1-based line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineTracker {
    pub line: usize,
}

impl Default for LineTracker {
    fn default() -> Self {
        LineTracker { line: 1 }
    }
}

fn newlines(text: &str) -> usize {
    text.bytes().filter(|&b| b == b'\n').count()
}

pub(super) fn whitespace(lex: &mut Lexer<TokenKind>) -> Skip {
    lex.extras.line += newlines(lex.slice());
    Skip
}

/// Consumes the string body and the closing quote
pub(super) fn string(lex: &mut Lexer<TokenKind>) -> Result<(), LexError> {
    let rest = lex.remainder();
    match rest.find('"') {
        Some(end) => {
            lex.extras.line += newlines(&rest[..end]);
            lex.bump(end + 1);
            Ok(())
        }
        None => {
            lex.extras.line += newlines(rest);
            lex.bump(rest.len());
            Err(LexError::UnterminatedString)
        }
    }
}

/// Extends an integer part with `.digits` when a digit follows the dot
pub(super) fn number(lex: &mut Lexer<TokenKind>) {
    let rest = lex.remainder().as_bytes();
    if rest.first() == Some(&b'.') && rest.get(1).is_some_and(u8::is_ascii_digit) {
        let fraction = rest[1..].iter().take_while(|b| b.is_ascii_digit()).count();
        lex.bump(1 + fraction);
    }
}

/// Skips up to and including the first `*/`; block comments do not nest
pub(super) fn block_comment(lex: &mut Lexer<TokenKind>) -> FilterResult<(), LexError> {
    let rest = lex.remainder();
    match rest.find("*/") {
        Some(end) => {
            lex.extras.line += newlines(&rest[..end]);
            lex.bump(end + 2);
            FilterResult::Skip
        }
        None => {
            lex.extras.line += newlines(rest);
            lex.bump(rest.len());
            FilterResult::Error(LexError::UnterminatedComment)
        }
    }
}

/// Streaming scanner over one source string.
///
/// Yields every recognized token in order, then the EOF marker exactly once,
/// then nothing. Lexical errors are reported and skipped.
pub struct Scanner<'src, 'r> {
    inner: Lexer<'src, TokenKind>,
    reporter: &'r mut ErrorReporter,
    finished: bool,
}

impl<'src, 'r> Scanner<'src, 'r> {
    pub fn new(source: &'src str, reporter: &'r mut ErrorReporter) -> Self {
        Scanner {
            inner: TokenKind::lexer(source),
            reporter,
            finished: false,
        }
    }

    /// Current line of the underlying lexer
    pub fn line(&self) -> usize {
        self.inner.extras.line
    }

    fn build_token(&self, kind: TokenKind) -> Token {
        let lexeme = self.inner.slice();
        // Only string lexemes span lines; they are reported on their first line.
        let line = self.inner.extras.line - newlines(lexeme);

        let (kind, literal) = match kind {
            TokenKind::Identifier => (TokenKind::for_identifier(lexeme), None),
            TokenKind::Number => (kind, lexeme.parse::<f64>().ok().map(Literal::Number)),
            TokenKind::String => {
                let body = &lexeme[1..lexeme.len() - 1];
                (kind, Some(Literal::String(body.to_string())))
            }
            _ => (kind, None),
        };

        Token::new(kind, lexeme, literal, line)
    }
}

impl Iterator for Scanner<'_, '_> {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        if self.finished {
            return None;
        }

        loop {
            match self.inner.next() {
                Some(Ok(kind)) => {
                    let token = self.build_token(kind);
                    log::trace!("scanned {:?} {:?} on line {}", token.kind, token.lexeme, token.line);
                    return Some(token);
                }
                Some(Err(error)) => {
                    let line = self.line();
                    self.reporter.error(line, error.to_string());
                }
                None => {
                    self.finished = true;
                    return Some(Token::eof(self.line()));
                }
            }
        }
    }
}

impl FusedIterator for Scanner<'_, '_> {}

/// Scans a whole source string into tokens ending with EOF
pub fn scan(source: &str, reporter: &mut ErrorReporter) -> Vec<Token> {
    Scanner::new(source, reporter).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lox::testing::{kinds, scan_clean};
    use TokenKind::*;

    #[test]
    fn test_single_char_tokens() {
        assert_eq!(
            kinds("(){},.-+;*/"),
            vec![
                LeftParen, RightParen, LeftBrace, RightBrace, Comma, Dot, Minus, Plus,
                Semicolon, Star, Slash, Eof
            ]
        );
    }

    #[test]
    fn test_two_char_tokens() {
        assert_eq!(
            kinds("! != = == < <= > >="),
            vec![
                Bang,
                BangEqual,
                Equal,
                EqualEqual,
                Less,
                LessEqual,
                Greater,
                GreaterEqual,
                Eof
            ]
        );
        assert_eq!(kinds("!=="), vec![BangEqual, Equal, Eof]);
    }

    #[test]
    fn test_numbers() {
        let tokens = scan_clean("42 2.75");
        assert_eq!(tokens[0].literal, Some(Literal::Number(42.0)));
        assert_eq!(tokens[1].literal, Some(Literal::Number(2.75)));
        assert_eq!(tokens[1].lexeme, "2.75");
        assert!(tokens[2].is_eof());
    }

    #[test]
    fn test_trailing_dot_is_not_part_of_number() {
        let tokens = scan_clean("1.");
        assert_eq!(tokens[0].kind, Number);
        assert_eq!(tokens[0].lexeme, "1");
        assert_eq!(tokens[1].kind, Dot);

        assert_eq!(kinds(".5"), vec![Dot, Number, Eof]);
        assert_eq!(kinds("1.2.3"), vec![Number, Dot, Number, Eof]);
        assert_eq!(kinds("7.foo"), vec![Number, Dot, Identifier, Eof]);
    }

    #[test]
    fn test_string_literal() {
        let tokens = scan_clean("\"hello world\"");
        assert_eq!(tokens[0].kind, String);
        assert_eq!(tokens[0].lexeme, "\"hello world\"");
        assert_eq!(
            tokens[0].literal,
            Some(Literal::String("hello world".to_string()))
        );
    }

    #[test]
    fn test_string_has_no_escapes() {
        let tokens = scan_clean(r#""a\nb""#);
        assert_eq!(tokens[0].literal, Some(Literal::String(r"a\nb".to_string())));
    }

    #[test]
    fn test_multiline_string_keeps_start_line() {
        let tokens = scan_clean("\"one\ntwo\" x");
        assert_eq!(tokens[0].line, 1);
        assert_eq!(tokens[1].line, 2);
        assert_eq!(tokens[2].line, 2);
    }

    #[test]
    fn test_unterminated_string() {
        let mut reporter = ErrorReporter::new();
        let tokens = scan("\"hello\nworld", &mut reporter);

        assert_eq!(tokens.len(), 1);
        assert!(tokens[0].is_eof());
        assert!(reporter.had_error());
        assert_eq!(
            reporter.diagnostics()[0].to_string(),
            "[line 2] Error: Unterminated string."
        );
    }

    #[test]
    fn test_identifiers_and_keywords() {
        let tokens = scan_clean("var foo = true;");
        let got: Vec<_> = tokens.iter().map(|t| t.kind).collect();
        assert_eq!(got, vec![Var, Identifier, Equal, True, Semicolon, Eof]);
        assert_eq!(tokens[1].lexeme, "foo");
        assert_eq!(tokens[1].literal, None);

        assert_eq!(kinds("_a1 nil2 orchid"), vec![Identifier, Identifier, Identifier, Eof]);
    }

    #[test]
    fn test_line_comment() {
        assert_eq!(kinds("1 // two 3\n4"), vec![Number, Number, Eof]);
        assert_eq!(kinds("// only a comment"), vec![Eof]);
    }

    #[test]
    fn test_block_comment_counts_lines() {
        let tokens = scan_clean("/* x\ny */ 7");
        assert_eq!(tokens.len(), 2);
        assert_eq!(tokens[0].kind, Number);
        assert_eq!(tokens[0].line, 2);
    }

    #[test]
    fn test_block_comments_do_not_nest() {
        assert_eq!(kinds("/* a /* b */ 1 */"), vec![Number, Star, Slash, Eof]);
    }

    #[test]
    fn test_unterminated_block_comment() {
        let mut reporter = ErrorReporter::new();
        let tokens = scan("1 /* never\nclosed", &mut reporter);

        assert_eq!(tokens.len(), 2);
        assert_eq!(tokens[1].line, 2);
        assert_eq!(
            reporter.diagnostics()[0].to_string(),
            "[line 2] Error: Unexpected end of file"
        );
    }

    #[test]
    fn test_unexpected_character_keeps_scanning() {
        let mut reporter = ErrorReporter::new();
        let tokens = scan("1 @\n# 2", &mut reporter);

        let got: Vec<_> = tokens.iter().map(|t| t.kind).collect();
        assert_eq!(got, vec![Number, Number, Eof]);
        let messages: Vec<_> = reporter.diagnostics().iter().map(|d| d.to_string()).collect();
        assert_eq!(
            messages,
            vec![
                "[line 1] Error: Unexpected character.",
                "[line 2] Error: Unexpected character."
            ]
        );
    }

    #[test]
    fn test_eof_line_tracks_trailing_newlines() {
        let tokens = scan_clean("1\n\n");
        assert_eq!(tokens[1].line, 3);
    }

    #[test]
    fn test_scanner_is_fused() {
        let mut reporter = ErrorReporter::new();
        let mut scanner = Scanner::new("+", &mut reporter);
        assert_eq!(scanner.next().map(|t| t.kind), Some(Plus));
        assert_eq!(scanner.next().map(|t| t.kind), Some(Eof));
        assert_eq!(scanner.next(), None);
        assert_eq!(scanner.next(), None);
    }
}
