//! algocheck — formatting linter for pseudocode algorithms in prose specs.
//!
//! Checks `Name(args):` algorithm blocks (and, in the language grammar
//! document, `Name :` / `Name ::` productions that introduce steps) for
//! consistent whitespace, step punctuation, capitalization, brace-wrapped
//! algorithm calls and literals.
//!
//! `algocheck spec/` prints every violation followed by a summary line and
//! exits non-zero if any enforced rule was broken.

mod lint;
mod model;
mod report;
mod segment;

use anyhow::{Context, Result};
use clap::Parser;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "algocheck",
    about = "Check formatting of pseudocode algorithms in specification documents"
)]
struct Cli {
    /// Documents, directories, or glob patterns to check
    #[arg(default_value = "spec")]
    paths: Vec<String>,

    /// File suffix to pick up when scanning a directory
    #[arg(long, default_value = ".md")]
    suffix: String,

    /// File name of the document whose grammar productions are also checked
    #[arg(long, default_value = lint::DEFAULT_GRAMMAR_DOCUMENT)]
    grammar_document: String,

    /// Treat advisory rules (literal styling, indent after ':') as errors
    #[arg(long)]
    strict: bool,
}

fn main() -> Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    let files = expand_paths(&cli.paths, &cli.suffix)?;
    let documents = read_documents(&files)?;

    let options = lint::Options {
        grammar_document: cli.grammar_document,
        strict: cli.strict,
    };
    let outcome = lint::lint_documents(&documents, &options);
    let stdout = io::stdout();
    let mut out = stdout.lock();
    report::write_report(&mut out, &outcome).context("failed to write report")?;
    out.flush().context("failed to write report")?;

    Ok(if outcome.passed() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

/// Expand paths into a sorted list of document files.
///
/// Files are taken as given, directories are scanned (non-recursively) for
/// `suffix`, and anything else is treated as a glob pattern.
fn expand_paths(patterns: &[String], suffix: &str) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for pattern in patterns {
        let path = Path::new(pattern);
        if path.is_file() {
            files.push(path.to_path_buf());
            continue;
        }
        if path.is_dir() {
            let entries = fs::read_dir(path)
                .with_context(|| format!("failed to read directory: {}", path.display()))?;
            for entry in entries.flatten() {
                let p = entry.path();
                if p.is_file() && has_suffix(&p, suffix) {
                    files.push(p);
                }
            }
            continue;
        }
        let matches: Vec<_> = glob::glob(pattern)
            .with_context(|| format!("invalid glob pattern: {}", pattern))?
            .filter_map(|r| r.ok())
            .filter(|p| p.is_file())
            .collect();
        if matches.is_empty() {
            tracing::warn!(pattern = %pattern, "no files matched");
        }
        files.extend(matches);
    }
    // Sort for deterministic output
    files.sort();
    files.dedup();
    Ok(files)
}

fn has_suffix(path: &Path, suffix: &str) -> bool {
    path.file_name()
        .and_then(|n| n.to_str())
        .is_some_and(|n| n.ends_with(suffix))
}

/// Read each file in full. The document name is the file name.
fn read_documents(files: &[PathBuf]) -> Result<Vec<model::Document>> {
    files
        .iter()
        .map(|path| {
            let text = fs::read_to_string(path)
                .with_context(|| format!("failed to read {}", path.display()))?;
            Ok(model::Document::new(document_name(path), text))
        })
        .collect()
}

fn document_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
