//! Lexer module for Lox
//!
//! Turns source text into an ordered, finite sequence of [`Token`]s that always
//! ends with the EOF marker. Lexical problems (stray characters, unterminated
//! strings or block comments) are reported through the
//! [`ErrorReporter`](crate::lox::reporter::ErrorReporter) and scanning carries on,
//! so one pass can surface several errors.
//!
//! Tokenization is driven by logos; see [`tokens`] for the rules and
//! [`lexer_impl`] for the callbacks and the [`Scanner`] wrapper.

pub mod lexer_impl;
pub mod tokens;

pub use lexer_impl::{scan, LexError, LineTracker, Scanner};
pub use tokens::{Literal, Token, TokenKind, KEYWORDS};
