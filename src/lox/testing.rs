//! Shared helpers for unit tests

use crate::lox::lexer::{scan, Token, TokenKind};
use crate::lox::reporter::ErrorReporter;
use std::sync::{Mutex, Once};

/// Scan `source`, asserting that no lexical error was reported
pub fn scan_clean(source: &str) -> Vec<Token> {
    let mut reporter = ErrorReporter::new();
    let tokens = scan(source, &mut reporter);
    assert!(
        !reporter.had_error(),
        "unexpected diagnostics for {:?}: {:?}",
        source,
        reporter.diagnostics()
    );
    tokens
}

/// Token kinds of a clean scan, EOF included
pub fn kinds(source: &str) -> Vec<TokenKind> {
    scan_clean(source).into_iter().map(|t| t.kind).collect()
}

static CAPTURED: Mutex<Vec<String>> = Mutex::new(Vec::new());
static INSTALL: Once = Once::new();

struct CaptureLogger;

impl log::Log for CaptureLogger {
    fn enabled(&self, _: &log::Metadata) -> bool {
        true
    }

    fn log(&self, record: &log::Record) {
        if let Ok(mut lines) = CAPTURED.lock() {
            lines.push(record.args().to_string());
        }
    }

    fn flush(&self) {}
}

/// Route log records into memory for the rest of the test binary
pub fn capture_logs() {
    INSTALL.call_once(|| {
        if log::set_logger(&CaptureLogger).is_ok() {
            log::set_max_level(log::LevelFilter::Trace);
        }
    });
}

/// Whether any captured record so far reads exactly `message`
pub fn logged(message: &str) -> bool {
    CAPTURED
        .lock()
        .map(|lines| lines.iter().any(|line| line == message))
        .unwrap_or(false)
}
