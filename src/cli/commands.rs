//! CLI command implementations
//!
//! All command functions return `CliResult<ExitCode>` instead of calling
//! `process::exit`. Error handling and exits happen in the top-level `run()`.

use std::fs;
use std::path::Path;

use miette::{Diagnostic, NamedSource, Report};

use crate::frontend::first::FirstSets;
use crate::frontend::grammar::Grammar;
use crate::frontend::lexer::{self, Token};
use crate::frontend::diagnostics::ParseError;
use crate::frontend::parser::{self, ParseConfig};
use crate::frontend::tree::SyntaxTree;

use super::{CliError, CliResult, ExitCode, GrammarArgs, OutputArgs, OutputFormat};

/// Maximum source file size (100 MB)
///
/// Files larger than this are rejected to prevent out-of-memory conditions
/// during tokenization.
const MAX_SOURCE_SIZE: u64 = 100 * 1024 * 1024;

/// Read a source file with a size guard.
///
/// ## Errors
/// - The file cannot be accessed or read
/// - The file exceeds `MAX_SOURCE_SIZE` (100 MB)
pub fn read_source(file_path: &Path) -> CliResult<String> {
    let shown = file_path.display();
    let metadata =
        fs::metadata(file_path).map_err(|e| CliError::failure(format!("Cannot access file '{shown}': {e}")))?;

    if metadata.len() > MAX_SOURCE_SIZE {
        return Err(CliError::failure(format!(
            "Source file '{shown}' is too large ({} bytes, max {MAX_SOURCE_SIZE} bytes)",
            metadata.len(),
        )));
    }

    fs::read_to_string(file_path).map_err(|e| CliError::failure(format!("Error reading file '{shown}': {e}")))
}

/// Render a diagnostic against the file it came from.
fn render<E>(file_path: &Path, source: &str, err: E) -> CliError
where
    E: Diagnostic + Send + Sync + 'static,
{
    let report = Report::new(err).with_source_code(NamedSource::new(file_path.display().to_string(), source.to_string()));
    CliError::failure(format!("{report:?}"))
}

/// Render a parser failure. Syntax errors reject the program; grammar errors are tool failures.
fn render_parse_error(file_path: &Path, source: Option<&str>, err: ParseError) -> CliError {
    let rejected = err.as_syntax().is_some();
    let mut cli_error = match source {
        Some(source) => render(file_path, source, err),
        None => render_plain(err),
    };
    if rejected {
        cli_error.exit_code = ExitCode::REJECTED;
    }
    cli_error
}

/// Render a diagnostic that has no meaningful source text to point into.
fn render_plain<E>(err: E) -> CliError
where
    E: Diagnostic + Send + Sync + 'static,
{
    CliError::failure(format!("{:?}", Report::new(err)))
}

/// Print `document` or write it to the requested output file.
fn emit(document: &str, output: &OutputArgs) -> CliResult<()> {
    match &output.output {
        Some(path) => fs::write(path, document)
            .map_err(|e| CliError::failure(format!("Error writing '{}': {e}", path.display()))),
        None => {
            print!("{document}");
            Ok(())
        }
    }
}

fn to_json<T: serde::Serialize + ?Sized>(value: &T) -> CliResult<String> {
    serde_json::to_string_pretty(value)
        .map(|mut s| {
            s.push('\n');
            s
        })
        .map_err(|e| CliError::failure(format!("Error serializing JSON: {e}")))
}

/// Load the grammar selected on the command line and compute its FIRST sets.
fn load_tables(args: &GrammarArgs) -> CliResult<(Grammar, FirstSets)> {
    let grammar = match &args.grammar {
        Some(path) => {
            let text = read_source(path)?;
            Grammar::parse_text(&text).map_err(|e| render(path, &text, e))?
        }
        None => Grammar::recspl(),
    };
    let firsts = FirstSets::compute(&grammar).map_err(render_plain)?;
    tracing::debug!(
        rules = grammar.len(),
        symbols = grammar.symbol_count(),
        passes = firsts.iterations(),
        "grammar tables ready"
    );
    Ok((grammar, firsts))
}

fn parse_config(args: &GrammarArgs) -> ParseConfig {
    let mut config = ParseConfig::default();
    if let Some(start) = &args.start {
        config = config.with_start_symbol(start.clone());
    }
    if let Some(depth) = args.max_depth {
        config = config.with_max_depth(depth);
    }
    config
}

fn lex_source(file_path: &Path, source: &str) -> CliResult<Vec<Token>> {
    lexer::lex(source).map_err(|e| CliError::rejected(render(file_path, source, e).message))
}

fn tree_document(tree: &SyntaxTree, format: OutputFormat) -> CliResult<String> {
    match format {
        OutputFormat::Xml => Ok(tree.to_xml()),
        OutputFormat::Json => to_json(&tree.to_document()),
    }
}

// ============================================================================
// Commands
// ============================================================================

pub fn lex_file(file_path: &Path, output: &OutputArgs) -> CliResult<ExitCode> {
    let source = read_source(file_path)?;
    let tokens = lex_source(file_path, &source)?;

    let document = match output.format {
        OutputFormat::Xml => lexer::xml::write_token_stream(&tokens),
        OutputFormat::Json => to_json(&tokens)?,
    };
    emit(&document, output)?;
    Ok(ExitCode::SUCCESS)
}

pub fn parse_file(file_path: &Path, grammar: &GrammarArgs, output: &OutputArgs) -> CliResult<ExitCode> {
    let source = read_source(file_path)?;
    let tokens = lex_source(file_path, &source)?;
    let (table, firsts) = load_tables(grammar)?;

    let tree = parser::parse_with(&table, &firsts, &tokens, parse_config(grammar))
        .map_err(|e| render_parse_error(file_path, Some(&source), e))?;

    emit(&tree_document(&tree, output.format)?, output)?;
    Ok(ExitCode::SUCCESS)
}

/// Parse a saved token stream, as written by `lex`.
pub fn parse_token_file(file_path: &Path, grammar: &GrammarArgs, output: &OutputArgs) -> CliResult<ExitCode> {
    let text = read_source(file_path)?;
    let tokens = decode_token_stream(file_path, &text)?;
    let (table, firsts) = load_tables(grammar)?;

    // Token spans point into the original source, not into this file.
    let tree = parser::parse_with(&table, &firsts, &tokens, parse_config(grammar))
        .map_err(|e| render_parse_error(file_path, None, e))?;

    emit(&tree_document(&tree, output.format)?, output)?;
    Ok(ExitCode::SUCCESS)
}

/// Decode a token stream: JSON for `.json` files, `<TOKENSTREAM>` XML for `.xml` files, and by the
/// first non-blank character otherwise.
fn decode_token_stream(file_path: &Path, text: &str) -> CliResult<Vec<Token>> {
    let json = match file_path.extension().and_then(|ext| ext.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case("json") => true,
        Some(ext) if ext.eq_ignore_ascii_case("xml") => false,
        _ => !text.trim_start().starts_with('<'),
    };
    if json {
        serde_json::from_str(text)
            .map_err(|e| CliError::failure(format!("Invalid token stream '{}': {e}", file_path.display())))
    } else {
        lexer::xml::read_token_stream(text).map_err(|e| render(file_path, text, e))
    }
}

pub fn print_first_sets(grammar: &GrammarArgs, json: bool) -> CliResult<ExitCode> {
    let (_, firsts) = load_tables(grammar)?;
    if json {
        print!("{}", to_json(&firsts)?);
    } else {
        print!("{firsts}");
    }
    Ok(ExitCode::SUCCESS)
}

pub fn check_file(file_path: &Path, grammar: &GrammarArgs) -> CliResult<ExitCode> {
    let source = read_source(file_path)?;
    let tokens = lex_source(file_path, &source)?;
    let (table, firsts) = load_tables(grammar)?;

    match parser::parse_with(&table, &firsts, &tokens, parse_config(grammar)) {
        Ok(tree) => {
            println!(
                "✓ {}: {} tokens, {} nodes",
                file_path.display(),
                tokens.len(),
                tree.len()
            );
            Ok(ExitCode::SUCCESS)
        }
        Err(e) => Err(render_parse_error(file_path, Some(&source), e)),
    }
}
