//! Fixture-driven fan-out harness: builds the LR(1) table once, then runs
//! one lexer or parser pass per `<root>/<target>/*.in` fixture, writing
//! each file's output to its own `.result` file unless `--silent`.
//!
//! This crate is pure glue — it owns no compiler logic of its own, only
//! directory enumeration, concurrency, logging, and result-file writing
//! around `tacc_lex`/`tacc_par`.

pub mod config;
pub mod error;

use std::fs;
use std::path::{Path, PathBuf};

use colored::Colorize;
use tacc_lex::Lexer;
use tacc_par::Parser;

pub use config::{CliArgs, Config, Target};
pub use error::{DriverError, Result};

/// One fixture file's outcome: its stem, the rendered output lines, and
/// whether any diagnostic at error level was recorded while producing it.
struct FixtureResult {
    stem: String,
    lines: Vec<String>,
    had_errors: bool,
}

/// Discovers every `*.in` file directly under `dir`, optionally restricted
/// to the stems named in `only`, sorted by stem for deterministic runs.
fn discover_inputs(dir: &Path, only: Option<&[String]>) -> std::io::Result<Vec<PathBuf>> {
    if !dir.exists() {
        return Ok(Vec::new());
    }
    let mut inputs = Vec::new();
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();
        if path.extension().and_then(|ext| ext.to_str()) != Some("in") {
            continue;
        }
        let stem = path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or_default()
            .to_string();
        if let Some(allow_list) = only {
            if !allow_list.iter().any(|name| name == &stem) {
                continue;
            }
        }
        inputs.push(path);
    }
    inputs.sort();
    Ok(inputs)
}

/// Runs one fixture file's lexer pass: every `(category, lexeme)` pair in
/// the spec's lexer diagnostic stream format, one per line.
fn run_lexer_fixture(source: &str) -> FixtureResult {
    let mut lines = Vec::new();
    let mut had_errors = false;
    let mut lexer = Lexer::new(source);
    loop {
        let (token, status) = lexer.next_token();
        lines.push(format!("({}, {})", token.category, token.value));
        if let tacc_lex::LexStatus::Err(err) = &status {
            had_errors = true;
            lines.push(format!("error: {err}"));
        }
        if status == tacc_lex::LexStatus::Eof {
            break;
        }
    }
    FixtureResult {
        stem: String::new(),
        lines,
        had_errors,
    }
}

/// Runs one fixture file's parser pass, appending the symbol-table dump
/// (scope 0, the parser's pre-scope, is skipped per the listing format)
/// after the three-address code.
fn run_parser_fixture(parser: &Parser, source: &str) -> FixtureResult {
    let mut lines = Vec::new();
    let mut lexer = Lexer::new(source);
    let mut code_lines = Vec::new();
    let (symtab, handler) = parser.parse(&mut lexer, |line| code_lines.push(line.to_string()));

    lines.push(String::new());
    lines.push("Three Address Code:".to_string());
    lines.extend(code_lines);

    for scope in symtab.scopes().iter().filter(|scope| scope.id != 0) {
        lines.push(format!("scope {} (level {}):", scope.id, scope.level));
        for item in scope.items.values() {
            match item.kind {
                tacc_par::ItemKind::Array => {
                    lines.push(format!(
                        "  {} {} {} size={} elem_size={}",
                        item.address,
                        item.name,
                        item.type_name,
                        item.size,
                        item.elem_size.unwrap_or_default(),
                    ));
                }
                _ => {
                    lines.push(format!(
                        "  {} {} {} size={}",
                        item.address, item.name, item.type_name, item.size
                    ));
                }
            }
        }
    }

    FixtureResult {
        stem: String::new(),
        lines,
        had_errors: handler.has_errors(),
    }
}

/// Top-level entry point: discovers fixtures, builds the table once, fans
/// out one worker per file, and writes results.
pub fn run(config: &Config) -> Result<()> {
    let fixture_dir = config.fixture_dir();
    tracing::info!(root = %fixture_dir.display(), target = ?config.target, "discovering fixtures");

    let inputs = discover_inputs(&fixture_dir, config.only.as_deref())?;
    if inputs.is_empty() {
        tracing::warn!(dir = %fixture_dir.display(), "no fixture files found");
        return Ok(());
    }

    if !config.silent {
        fs::create_dir_all(config.result_dir())?;
    }

    let parser = Parser::new();
    parser.ensure_table();

    let results = std::thread::scope(|scope| -> Vec<FixtureResult> {
        let handles: Vec<_> = inputs
            .iter()
            .map(|path| {
                let parser = &parser;
                let target = config.target;
                scope.spawn(move || {
                    let stem = path
                        .file_stem()
                        .and_then(|s| s.to_str())
                        .unwrap_or_default()
                        .to_string();
                    let source = match fs::read_to_string(path) {
                        Ok(source) => source,
                        Err(error) => {
                            tracing::warn!(file = %path.display(), %error, "failed to read fixture");
                            return FixtureResult {
                                stem,
                                lines: vec![format!("error: {error}")],
                                had_errors: true,
                            };
                        }
                    };

                    let mut result = match target {
                        Target::Lexer => run_lexer_fixture(&source),
                        Target::Parser => run_parser_fixture(parser, &source),
                    };
                    result.stem = stem;
                    if result.had_errors {
                        tracing::warn!(file = %path.display(), "fixture produced an error diagnostic");
                    } else {
                        tracing::info!(file = %path.display(), "fixture processed");
                    }
                    result
                })
            })
            .collect();

        handles
            .into_iter()
            .map(|handle| handle.join().expect("fixture worker panicked"))
            .collect()
    });

    for result in &results {
        if result.had_errors {
            eprintln!("{}", result.lines.join("\n").red());
        }
        if !config.silent {
            let result_path = config.result_dir().join(format!("{}.result", result.stem));
            fs::write(result_path, result.lines.join("\n"))?;
        }
    }

    Ok(())
}
