//! CLI module for the RecSPL front end
//!
//! This module provides the command-line interface.
//!
//! ## Commands
//!
//! - `lex <file>` - Classify a source file and print its token stream
//! - `parse <file>` - Parse a source file (or a saved XML/JSON token stream) and print its syntax tree
//! - `first` - Print the FIRST sets of the active grammar
//! - `check <file>` - Parse a source file and report success or the first error
//!
//! ## Exit codes
//!
//! `0` on success, `1` when the tool could not do its job (unreadable file, bad grammar table, bad
//! arguments), `2` when the input program itself was rejected by the classifier or the parser.
//!
//! Command functions return `CliResult<T>` instead of calling `process::exit`; only [`run`] exits.

// Enforce explicit error handling - no panicking in production code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

pub mod commands;

use std::fmt;
use std::path::PathBuf;
use std::process;

use clap::{Args, Parser, Subcommand, ValueEnum};

// ============================================================================
// CLI Error handling
// ============================================================================

/// Exit code for CLI operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExitCode(pub i32);

impl ExitCode {
    pub const SUCCESS: ExitCode = ExitCode(0);
    pub const FAILURE: ExitCode = ExitCode(1);
    /// The program was read fine but is not valid RecSPL.
    pub const REJECTED: ExitCode = ExitCode(2);
}

/// Error type for CLI operations.
///
/// Contains a user-facing message and an exit code. The CLI entry point
/// catches these errors, prints the message, and exits with the code.
#[derive(Debug)]
pub struct CliError {
    /// User-facing error message (already formatted for display)
    pub message: String,
    /// Exit code to return to the shell
    pub exit_code: ExitCode,
}

impl CliError {
    pub fn new(message: impl Into<String>, exit_code: ExitCode) -> Self {
        Self {
            message: message.into(),
            exit_code,
        }
    }

    /// Create a failure error (exit code 1).
    pub fn failure(message: impl Into<String>) -> Self {
        Self::new(message, ExitCode::FAILURE)
    }

    /// Create an error for a program the front end rejected (exit code 2).
    pub fn rejected(message: impl Into<String>) -> Self {
        Self::new(message, ExitCode::REJECTED)
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CliError {}

/// Result type for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

const VERSION: &str = env!("CARGO_PKG_VERSION");

// ============================================================================
// Clap CLI definition
// ============================================================================

/// RecSPL compiler front end
#[derive(Parser, Debug)]
#[command(name = "recspl")]
#[command(version = VERSION)]
#[command(about = "Token classifier and grammar-driven parser for RecSPL", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Log at debug level unless RUST_LOG says otherwise
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Classify a source file and print its token stream
    Lex {
        #[arg(value_name = "FILE")]
        file: PathBuf,
        #[command(flatten)]
        output: OutputArgs,
    },

    /// Parse a source file and print its syntax tree
    Parse {
        #[arg(value_name = "FILE")]
        file: PathBuf,
        /// Read FILE as a token stream written by `lex` (XML, or JSON for `.json` files)
        #[arg(long)]
        tokens: bool,
        #[command(flatten)]
        grammar: GrammarArgs,
        #[command(flatten)]
        output: OutputArgs,
    },

    /// Print the FIRST sets of the active grammar
    First {
        #[command(flatten)]
        grammar: GrammarArgs,
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Parse a source file and report whether it is a valid program
    Check {
        #[arg(value_name = "FILE")]
        file: PathBuf,
        #[command(flatten)]
        grammar: GrammarArgs,
    },
}

/// Grammar selection shared by the parsing commands.
#[derive(Args, Debug, Clone, Default)]
pub struct GrammarArgs {
    /// Grammar text file to use instead of the built-in RecSPL grammar
    #[arg(long, value_name = "FILE")]
    pub grammar: Option<PathBuf>,
    /// Start symbol (default: the grammar's first rule)
    #[arg(long, value_name = "SYMBOL")]
    pub start: Option<String>,
    /// Maximum nesting of nonterminal expansions
    #[arg(long, value_name = "N")]
    pub max_depth: Option<usize>,
}

/// Output options shared by the commands that print documents.
#[derive(Args, Debug, Clone, Default)]
pub struct OutputArgs {
    /// Document format
    #[arg(long, value_enum, default_value_t = OutputFormat::Xml)]
    pub format: OutputFormat,
    /// Write to FILE instead of stdout
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Xml,
    Json,
}

// ============================================================================
// CLI entry point
// ============================================================================

/// Main CLI entry point.
///
/// This is the only place where `process::exit` is called. All command
/// implementations return `CliResult` and errors are handled here.
pub fn run(cli: Cli) {
    match execute(cli) {
        Ok(exit_code) => {
            if exit_code.0 != 0 {
                process::exit(exit_code.0);
            }
        }
        Err(e) => {
            if !e.message.is_empty() {
                eprintln!("{}", e.message);
            }
            process::exit(e.exit_code.0);
        }
    }
}

/// Execute the CLI command and return result.
fn execute(cli: Cli) -> CliResult<ExitCode> {
    match cli.command {
        Command::Lex { file, output } => commands::lex_file(&file, &output),
        Command::Parse {
            file,
            tokens,
            grammar,
            output,
        } => {
            if tokens {
                commands::parse_token_file(&file, &grammar, &output)
            } else {
                commands::parse_file(&file, &grammar, &output)
            }
        }
        Command::First { grammar, json } => commands::print_first_sets(&grammar, json),
        Command::Check { file, grammar } => commands::check_file(&file, &grammar),
    }
}

// ============================================================================
// Tests
// ============================================================================
