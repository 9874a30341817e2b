//! Public API for the parser.

use super::ast::Expr;
use super::parser::Parser;
use crate::lox::lexer::{scan, Token};
use crate::lox::reporter::ErrorReporter;

/// Parse one expression from a scanned token sequence.
///
/// Returns `None` when a syntax error was reported; no partial tree is kept.
pub fn parse(tokens: &[Token], reporter: &mut ErrorReporter) -> Option<Expr> {
    Parser::new(tokens, reporter).parse()
}

/// Scan and parse in one step. Parsing is skipped if scanning reported errors.
pub fn parse_source(source: &str, reporter: &mut ErrorReporter) -> Option<Expr> {
    let tokens = scan(source, reporter);
    if reporter.had_error() {
        return None;
    }
    parse(&tokens, reporter)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_source_success() {
        let mut reporter = ErrorReporter::new();
        let expr = parse_source("(1 + 2) * 3", &mut reporter);
        assert_eq!(
            expr.map(|e| e.to_string()),
            Some("(* (group (+ 1 2)) 3)".to_string())
        );
        assert!(!reporter.had_error());
    }

    #[test]
    fn test_parse_source_stops_after_lexical_error() {
        let mut reporter = ErrorReporter::new();
        let expr = parse_source("1 + @", &mut reporter);

        assert!(expr.is_none());
        // Only the scanner diagnostic; the parser never ran.
        assert_eq!(reporter.diagnostics().len(), 1);
        assert_eq!(
            reporter.diagnostics()[0].to_string(),
            "[line 1] Error: Unexpected character."
        );
    }
}
