//! Expression tree
//!
//! A closed sum type: every consumer (the printer, serializers, a future
//! evaluator) is an exhaustive `match`. Children are boxed and exclusively owned,
//! so a tree has no sharing and no cycles, and it is never mutated after the
//! parser builds it.

use serde::Serialize;
use std::fmt;

use crate::lox::lexer::Token;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub enum Expr {
    Binary {
        left: Box<Expr>,
        operator: Token,
        right: Box<Expr>,
    },
    Grouping {
        expression: Box<Expr>,
    },
    Literal {
        value: LiteralValue,
    },
    Unary {
        operator: Token,
        right: Box<Expr>,
    },
}

impl Expr {
    pub fn binary(left: Expr, operator: Token, right: Expr) -> Self {
        Expr::Binary {
            left: Box::new(left),
            operator,
            right: Box::new(right),
        }
    }

    pub fn grouping(expression: Expr) -> Self {
        Expr::Grouping {
            expression: Box::new(expression),
        }
    }

    pub fn literal(value: impl Into<LiteralValue>) -> Self {
        Expr::Literal {
            value: value.into(),
        }
    }

    pub fn unary(operator: Token, right: Expr) -> Self {
        Expr::Unary {
            operator,
            right: Box::new(right),
        }
    }

    pub fn node_type(&self) -> &'static str {
        match self {
            Expr::Binary { .. } => "Binary",
            Expr::Grouping { .. } => "Grouping",
            Expr::Literal { .. } => "Literal",
            Expr::Unary { .. } => "Unary",
        }
    }
}

/// Renders the canonical parenthesized prefix form
impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&super::printer::render(self))
    }
}

/// Value of a literal node
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum LiteralValue {
    Number(f64),
    String(String),
    Boolean(bool),
    Nil,
}

impl fmt::Display for LiteralValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LiteralValue::Number(n) => write!(f, "{}", n),
            LiteralValue::String(s) => f.write_str(s),
            LiteralValue::Boolean(b) => write!(f, "{}", b),
            LiteralValue::Nil => f.write_str("nil"),
        }
    }
}

impl From<f64> for LiteralValue {
    fn from(n: f64) -> Self {
        LiteralValue::Number(n)
    }
}

impl From<bool> for LiteralValue {
    fn from(b: bool) -> Self {
        LiteralValue::Boolean(b)
    }
}

impl From<&str> for LiteralValue {
    fn from(s: &str) -> Self {
        LiteralValue::String(s.to_string())
    }
}

impl From<String> for LiteralValue {
    fn from(s: String) -> Self {
        LiteralValue::String(s)
    }
}

impl From<crate::lox::lexer::Literal> for LiteralValue {
    fn from(literal: crate::lox::lexer::Literal) -> Self {
        match literal {
            crate::lox::lexer::Literal::Number(n) => LiteralValue::Number(n),
            crate::lox::lexer::Literal::String(s) => LiteralValue::String(s),
        }
    }
}
