//! Output record formatting.

use anyhow::Context as _;
use colored::Colorize;
use serde_json::Value;
use std::io::{self, ErrorKind, Write};

use crate::query::{Match, render_value};

/// Delimiter between the path and the value of an output record.
pub const VALUE_DELIMITER: &str = ": ";

/// How each match is turned into a line of output.
#[derive(Debug, Clone)]
pub struct OutputOptions {
    /// Separator used to join path segments
    pub separator: String,
    /// Print only the path, without the value
    pub hide_value: bool,
    /// Print the originating file instead of the path and value
    pub file_only: bool,
    /// Colorize the path and value
    pub color: bool,
}

impl Default for OutputOptions {
    fn default() -> Self {
        Self {
            separator: ".".to_string(),
            hide_value: false,
            file_only: false,
            color: false,
        }
    }
}

/// Format a single match as one output record.
///
/// With `file_only`, matches that carry no source (standard input or an
/// inline string) fall back to the regular path record.
#[must_use]
pub fn format_record(m: &Match<'_>, options: &OutputOptions) -> String {
    if options.file_only
        && let Some(source) = m.source
    {
        return source.to_string();
    }

    let path = m.path_string(&options.separator);
    let path = if options.color {
        path.as_str().bold().magenta().to_string()
    } else {
        path
    };

    if options.hide_value {
        path
    } else if options.color {
        format!("{path}{VALUE_DELIMITER}{}", colored_value(m.value))
    } else {
        format!("{path}{VALUE_DELIMITER}{}", render_value(m.value))
    }
}

/// Render a value the same way as [`render_value`], colored by JSON kind.
fn colored_value(value: &Value) -> String {
    let rendered = render_value(value);
    let text: &str = &rendered;
    match value {
        Value::Null => text.red().dimmed().to_string(),
        Value::Bool(_) => text.yellow().bold().to_string(),
        Value::Number(_) => text.yellow().to_string(),
        Value::String(_) => text.green().to_string(),
        Value::Array(_) | Value::Object(_) => text.cyan().to_string(),
    }
}

/// Write formatted records to `writer`, one per line.
/// Silently returns `Ok(())` on broken pipe so that piping to tools like
/// `head` exits cleanly.
///
/// # Errors
///
/// Returns an error if writing to `writer` fails.
pub fn write_records<W: Write>(
    writer: &mut W,
    records: &[String],
) -> anyhow::Result<()> {
    let result = (|| -> io::Result<()> {
        for record in records {
            writeln!(writer, "{record}")?;
        }
        writer.flush()
    })();

    match result {
        Ok(()) => Ok(()),
        Err(err) if err.kind() == ErrorKind::BrokenPipe => Ok(()),
        Err(err) => Err(err).context("write search results to stdout"),
    }
}
