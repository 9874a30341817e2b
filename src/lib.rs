//! # loxfront
//!
//! Scanner and expression parser for the Lox language.
//!
//! Source text goes through [`lox::lexer::scan`] into tokens, through
//! [`lox::parser::parse`] into an expression tree, and can be inspected with
//! [`lox::parser::render`]. Errors from both stages are collected in a
//! [`lox::reporter::ErrorReporter`] owned by the caller.

pub mod lox;
