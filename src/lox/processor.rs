//! Source processing API
//!
//! Runs the scan/parse pipeline up to a chosen stage and serializes the result
//! in a chosen format. A format string names both, e.g. `token-simple` or
//! `ast-sexpr`.
//!
//! The caller owns the [`ErrorReporter`] and inspects it afterwards; a
//! processing call only fails with [`ProcessingError`] for problems outside the
//! Lox source itself (bad format string, unreadable file, serializer failure).

use std::fs;
use std::path::Path;
use thiserror::Error;

use crate::lox::lexer::{scan, Token};
use crate::lox::parser::{parse, render, Expr};
use crate::lox::reporter::ErrorReporter;

/// How far to run the pipeline
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProcessingStage {
    Token,
    Ast,
}

/// How to serialize the stage's output
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// One `KIND lexeme literal` line per token
    Simple,
    Json,
    Yaml,
    /// Parenthesized prefix form of the tree
    Sexpr,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProcessingSpec {
    pub stage: ProcessingStage,
    pub format: OutputFormat,
}

/// Errors that can occur during processing
#[derive(Debug, Error)]
pub enum ProcessingError {
    #[error("Invalid format: {0}")]
    InvalidFormat(String),
    #[error("Invalid stage: {0}")]
    InvalidStage(String),
    #[error("Invalid format type: {0}")]
    InvalidFormatType(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON serialization failed: {0}")]
    Json(#[from] serde_json::Error),
    #[error("YAML serialization failed: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

impl ProcessingSpec {
    /// Parse a format string like "token-simple" or "ast-json"
    pub fn from_string(format_str: &str) -> Result<Self, ProcessingError> {
        let (stage, format) = format_str
            .split_once('-')
            .ok_or_else(|| ProcessingError::InvalidFormat(format_str.to_string()))?;

        let stage = match stage {
            "token" => ProcessingStage::Token,
            "ast" => ProcessingStage::Ast,
            _ => return Err(ProcessingError::InvalidStage(stage.to_string())),
        };

        let format = match format {
            "simple" => OutputFormat::Simple,
            "json" => OutputFormat::Json,
            "yaml" => OutputFormat::Yaml,
            "sexpr" => OutputFormat::Sexpr,
            _ => return Err(ProcessingError::InvalidFormatType(format.to_string())),
        };

        match (stage, format) {
            (ProcessingStage::Token, OutputFormat::Sexpr) => Err(
                ProcessingError::InvalidFormatType("'sexpr' only works with the ast stage".into()),
            ),
            (ProcessingStage::Ast, OutputFormat::Simple) => Err(
                ProcessingError::InvalidFormatType("'simple' only works with the token stage".into()),
            ),
            _ => Ok(ProcessingSpec { stage, format }),
        }
    }

    /// Get all valid processing specifications
    pub fn available_specs() -> Vec<ProcessingSpec> {
        [
            (ProcessingStage::Token, OutputFormat::Simple),
            (ProcessingStage::Token, OutputFormat::Json),
            (ProcessingStage::Token, OutputFormat::Yaml),
            (ProcessingStage::Ast, OutputFormat::Sexpr),
            (ProcessingStage::Ast, OutputFormat::Json),
            (ProcessingStage::Ast, OutputFormat::Yaml),
        ]
        .into_iter()
        .map(|(stage, format)| ProcessingSpec { stage, format })
        .collect()
    }

    /// The format string this spec was (or could be) parsed from
    pub fn name(&self) -> String {
        let stage = match self.stage {
            ProcessingStage::Token => "token",
            ProcessingStage::Ast => "ast",
        };
        let format = match self.format {
            OutputFormat::Simple => "simple",
            OutputFormat::Json => "json",
            OutputFormat::Yaml => "yaml",
            OutputFormat::Sexpr => "sexpr",
        };
        format!("{}-{}", stage, format)
    }
}

/// Get all available format strings
pub fn available_formats() -> Vec<String> {
    ProcessingSpec::available_specs()
        .iter()
        .map(ProcessingSpec::name)
        .collect()
}

/// Run the pipeline over `source`.
///
/// The token stage always produces output, errors or not. The AST stage
/// stops after scanning if the scanner reported anything, and yields `None`
/// when parsing failed; the reasons are in `reporter`.
pub fn process_source(
    source: &str,
    spec: &ProcessingSpec,
    reporter: &mut ErrorReporter,
) -> Result<Option<String>, ProcessingError> {
    let tokens = scan(source, reporter);
    log::debug!(
        "scanned {} tokens, had_error={}",
        tokens.len(),
        reporter.had_error()
    );

    match spec.stage {
        ProcessingStage::Token => format_tokens(&tokens, spec.format).map(Some),
        ProcessingStage::Ast => {
            if reporter.had_error() {
                return Ok(None);
            }
            match parse(&tokens, reporter) {
                Some(expr) => format_ast(&expr, spec.format).map(Some),
                None => Ok(None),
            }
        }
    }
}

/// Read a file and run [`process_source`] over its contents
pub fn process_file<P: AsRef<Path>>(
    file_path: P,
    spec: &ProcessingSpec,
    reporter: &mut ErrorReporter,
) -> Result<Option<String>, ProcessingError> {
    let content = fs::read_to_string(file_path.as_ref())?;
    process_source(&content, spec, reporter)
}

fn format_tokens(tokens: &[Token], format: OutputFormat) -> Result<String, ProcessingError> {
    match format {
        OutputFormat::Simple => Ok(tokens
            .iter()
            .map(|token| token.to_string())
            .collect::<Vec<_>>()
            .join("\n")),
        OutputFormat::Json => Ok(serde_json::to_string_pretty(tokens)?),
        OutputFormat::Yaml => Ok(serde_yaml::to_string(tokens)?),
        OutputFormat::Sexpr => Err(ProcessingError::InvalidFormatType(
            "'sexpr' only works with the ast stage".into(),
        )),
    }
}

fn format_ast(expr: &Expr, format: OutputFormat) -> Result<String, ProcessingError> {
    match format {
        OutputFormat::Sexpr => Ok(render(expr)),
        OutputFormat::Json => Ok(serde_json::to_string_pretty(expr)?),
        OutputFormat::Yaml => Ok(serde_yaml::to_string(expr)?),
        OutputFormat::Simple => Err(ProcessingError::InvalidFormatType(
            "'simple' only works with the token stage".into(),
        )),
    }
}
