//! Command-line driver for lox
//!
//! Usage:
//!   lox `<script>` [--format `<format>`] [--config `<path>`]  - Scan and parse a file once
//!   lox [--format `<format>`]                                - Read-eval-print over stdin
//!
//! Exit codes: 64 for usage errors, 65 when the script had scan or parse errors.

use clap::{Arg, Command};
use std::io::{self, BufRead, Write};
use std::process;

use loxfront::lox::config::{Loader, LoxConfig};
use loxfront::lox::processor::{available_formats, process_file, process_source, ProcessingSpec};
use loxfront::lox::reporter::ErrorReporter;

const EX_USAGE: i32 = 64;
const EX_DATAERR: i32 = 65;

fn main() {
    let matches = Command::new("lox")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Scan and parse Lox expressions")
        .arg(
            Arg::new("script")
                .help("Path to a Lox source file; omit to start the prompt")
                .num_args(1..)
                .index(1),
        )
        .arg(
            Arg::new("format")
                .long("format")
                .short('f')
                .help("Output format (e.g., 'ast-sexpr', 'token-simple', 'ast-json')"),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .short('c')
                .help("Configuration file layered over the defaults"),
        )
        .get_matches();

    let scripts: Vec<&String> = matches
        .get_many::<String>("script")
        .map(|values| values.collect())
        .unwrap_or_default();
    if scripts.len() > 1 {
        eprintln!("Usage: lox [script]");
        process::exit(EX_USAGE);
    }

    let config = load_config(
        matches.get_one::<String>("config"),
        matches.get_one::<String>("format"),
    )
    .unwrap_or_else(|e| {
        eprintln!("Configuration error: {}", e);
        process::exit(1);
    });

    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(config.logging.level.as_str()),
    )
    .init();

    let spec = ProcessingSpec::from_string(&config.output.format).unwrap_or_else(|e| {
        eprintln!("{} (available: {})", e, available_formats().join(", "));
        process::exit(EX_USAGE);
    });

    match scripts.first() {
        Some(path) => run_file(path, &spec),
        None => run_prompt(&config, &spec),
    }
}

fn load_config(
    path: Option<&String>,
    format: Option<&String>,
) -> Result<LoxConfig, config::ConfigError> {
    let mut loader = Loader::new().with_project_dir(".");
    if let Some(path) = path {
        loader = loader.with_file(path);
    }
    loader.with_cli_format(format.map(String::as_str))?.build()
}

/// Run a whole file through the pipeline once
fn run_file(path: &str, spec: &ProcessingSpec) {
    log::info!("running {} as {}", path, spec.name());
    let mut reporter = ErrorReporter::new();

    match process_file(path, spec, &mut reporter) {
        Ok(Some(output)) => println!("{}", output),
        Ok(None) => {}
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    }

    print_diagnostics(&mut reporter);
    if reporter.had_error() {
        process::exit(EX_DATAERR);
    }
}

/// Prompt for one line at a time until end of input
fn run_prompt(config: &LoxConfig, spec: &ProcessingSpec) {
    let stdin = io::stdin();
    let mut reporter = ErrorReporter::new();
    let mut line = String::new();

    loop {
        print!("{}", config.repl.prompt);
        if io::stdout().flush().is_err() {
            break;
        }

        line.clear();
        match stdin.lock().read_line(&mut line) {
            Ok(0) => break,
            Ok(_) => {}
            Err(e) => {
                eprintln!("Error reading input: {}", e);
                process::exit(1);
            }
        }

        let source = line.trim_end_matches(['\r', '\n']);
        match process_source(source, spec, &mut reporter) {
            Ok(Some(output)) => println!("{}", output),
            Ok(None) => {}
            Err(e) => eprintln!("Error: {}", e),
        }

        print_diagnostics(&mut reporter);
        reporter.reset();
    }
}

fn print_diagnostics(reporter: &mut ErrorReporter) {
    for diagnostic in reporter.take_diagnostics() {
        eprintln!("{}", diagnostic);
    }
}
