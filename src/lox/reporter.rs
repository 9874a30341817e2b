//! Error reporting shared by the scanner and the parser
//!
//! One [`ErrorReporter`] is owned per unit of work (a file run or a single REPL
//! line) and passed by `&mut` into each pipeline stage. The driver reads
//! [`ErrorReporter::had_error`] between stages and calls
//! [`ErrorReporter::reset`] before starting the next unit.
//!
//! Diagnostics render as `[line N] Error<where>: <message>`; this text is a
//! compatibility surface and must not change.

use serde::Serialize;
use std::fmt;

use crate::lox::lexer::Token;

/// Where on the line a diagnostic points
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum Location {
    /// Raw line, no token context (scanner errors)
    Line,
    /// At the end-of-input marker
    AtEnd,
    /// At a specific lexeme
    At(String),
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Location::Line => Ok(()),
            Location::AtEnd => f.write_str(" at end"),
            Location::At(lexeme) => write!(f, " at '{}'", lexeme),
        }
    }
}

/// A single recorded error
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub line: usize,
    pub location: Location,
    pub message: String,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[line {}] Error{}: {}",
            self.line, self.location, self.message
        )
    }
}

/// Collects diagnostics and the had-error flag for one unit of work
#[derive(Debug, Default, Clone)]
pub struct ErrorReporter {
    had_error: bool,
    diagnostics: Vec<Diagnostic>,
}

impl ErrorReporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn report(&mut self, line: usize, location: Location, message: impl Into<String>) {
        let diagnostic = Diagnostic {
            line,
            location,
            message: message.into(),
        };
        log::debug!("{}", diagnostic);
        self.diagnostics.push(diagnostic);
        self.had_error = true;
    }

    /// Report against a raw line
    pub fn error(&mut self, line: usize, message: impl Into<String>) {
        self.report(line, Location::Line, message);
    }

    /// Report against a token, pointing at its lexeme or at end of input
    pub fn token_error(&mut self, token: &Token, message: impl Into<String>) {
        let location = if token.is_eof() {
            Location::AtEnd
        } else {
            Location::At(token.lexeme.clone())
        };
        self.report(token.line, location, message);
    }

    pub fn had_error(&self) -> bool {
        self.had_error
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Hand over the recorded diagnostics, leaving the flag untouched
    pub fn take_diagnostics(&mut self) -> Vec<Diagnostic> {
        std::mem::take(&mut self.diagnostics)
    }

    /// Start a fresh unit of work
    pub fn reset(&mut self) {
        self.had_error = false;
        self.diagnostics.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lox::lexer::{Token, TokenKind};

    #[test]
    fn test_fresh_reporter_is_clean() {
        let reporter = ErrorReporter::new();
        assert!(!reporter.had_error());
        assert!(reporter.diagnostics().is_empty());
    }

    #[test]
    fn test_raw_line_format() {
        let mut reporter = ErrorReporter::new();
        reporter.error(3, "Unexpected character.");

        assert!(reporter.had_error());
        assert_eq!(
            reporter.diagnostics()[0].to_string(),
            "[line 3] Error: Unexpected character."
        );
    }

    #[test]
    fn test_token_formats() {
        let mut reporter = ErrorReporter::new();
        reporter.token_error(&Token::eof(1), "Expect ')' after expression.");
        reporter.token_error(
            &Token::new(TokenKind::Plus, "+", None, 2),
            "Expect expression.",
        );

        let rendered: Vec<_> = reporter
            .diagnostics()
            .iter()
            .map(|d| d.to_string())
            .collect();
        assert_eq!(
            rendered,
            vec![
                "[line 1] Error at end: Expect ')' after expression.",
                "[line 2] Error at '+': Expect expression.",
            ]
        );
    }

    #[test]
    fn test_reset_clears_flag_and_diagnostics() {
        let mut reporter = ErrorReporter::new();
        reporter.error(1, "boom");
        reporter.reset();

        assert!(!reporter.had_error());
        assert!(reporter.diagnostics().is_empty());
    }

    #[test]
    fn test_take_keeps_flag() {
        let mut reporter = ErrorReporter::new();
        reporter.error(1, "boom");

        let taken = reporter.take_diagnostics();
        assert_eq!(taken.len(), 1);
        assert!(reporter.diagnostics().is_empty());
        assert!(reporter.had_error());
    }
}
