//! Main module for the Lox front end

pub mod config;
pub mod lexer;
pub mod parser;
pub mod processor;
pub mod reporter;

#[cfg(test)]
pub mod testing;
