//! Parser module for Lox expressions
//!
//! A hand-written recursive-descent parser with one function per precedence
//! level. Every grammar function returns a [`ParseResult`]; the first syntax error
//! is reported through the [`ErrorReporter`](crate::lox::reporter::ErrorReporter)
//! and unwinds with `?` to [`parse`], which yields `None`.

pub mod api;
pub mod ast;
#[allow(clippy::module_inception)]
pub mod parser;
pub mod printer;

pub use api::{parse, parse_source};
pub use ast::{Expr, LiteralValue};
pub use parser::{ParseError, ParseResult, Parser, MAX_DEPTH};
pub use printer::render;
