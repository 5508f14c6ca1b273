//! Default command: search the inputs and print every match.
use anyhow::{Context, Result};
use rayon::prelude::*;
use serde_json::Value;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

use crate::output::{OutputOptions, format_record, write_records};
use crate::query::Query;

/// Where the JSON documents come from.
#[derive(Debug, Clone)]
pub enum Input {
    /// One document per file, searched independently
    Files(Vec<PathBuf>),
    /// A single document given on the command line
    Inline(String),
    /// A single document read from STDIN
    Stdin,
}

/// Settings that apply to every input of a search run.
#[derive(Debug, Clone, Default)]
pub struct SearchOptions {
    /// Keep only the first match of each input
    pub single: bool,
    /// Formatting of the output records
    pub output: OutputOptions,
}

/// Outcome of a search run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Summary {
    /// Number of records written
    pub matches: usize,
    /// Number of files that could not be read or parsed
    pub skipped: usize,
}

/// Search every input and write one record per match to `writer`.
///
/// Files are searched in parallel but their records are written in the
/// order the files were given. A file that cannot be read or parsed is
/// logged and skipped; a malformed inline or STDIN document is an error.
///
/// # Errors
///
/// Returns an error if STDIN cannot be read, if the inline or STDIN document
/// is not valid JSON, or if writing to `writer` fails.
pub fn run<W: Write>(
    query: &Query,
    input: &Input,
    options: &SearchOptions,
    writer: &mut W,
) -> Result<Summary> {
    let mut summary = Summary::default();

    match input {
        Input::Files(files) => {
            let results: Vec<Result<Vec<String>>> = files
                .par_iter()
                .map(|path| search_file(query, path, options))
                .collect();

            for (path, result) in files.iter().zip(results) {
                match result {
                    Ok(records) => {
                        summary.matches += records.len();
                        write_records(writer, &records)?;
                    }
                    Err(err) => {
                        log::error!("skipping {}: {err:#}", path.display());
                        summary.skipped += 1;
                    }
                }
            }
        }
        Input::Inline(json) => {
            let records = search_text(query, json, None, options)
                .context("Failed to parse JSON string")?;
            summary.matches = records.len();
            write_records(writer, &records)?;
        }
        Input::Stdin => {
            let mut buffer = String::new();
            io::stdin()
                .read_to_string(&mut buffer)
                .context("Failed to read STDIN")?;
            let records = search_text(query, &buffer, None, options)
                .context("Failed to parse JSON from STDIN")?;
            summary.matches = records.len();
            write_records(writer, &records)?;
        }
    }

    Ok(summary)
}

/// Read and search a single file.
fn search_file(
    query: &Query,
    path: &Path,
    options: &SearchOptions,
) -> Result<Vec<String>> {
    log::debug!("searching {}", path.display());
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read file {}", path.display()))?;
    let source = path.display().to_string();
    search_text(query, &content, Some(&source), options)
        .with_context(|| format!("Failed to parse JSON in {source}"))
}

/// Parse `text` as one JSON document and format its matches.
fn search_text(
    query: &Query,
    text: &str,
    source: Option<&str>,
    options: &SearchOptions,
) -> Result<Vec<String>> {
    let json: Value = serde_json::from_str(text)?;
    let limit = if options.single { 1 } else { usize::MAX };
    Ok(query
        .search(&json, source)
        .take(limit)
        .map(|m| format_record(&m, &options.output))
        .collect())
}
