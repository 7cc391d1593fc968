//! Reply printing.

use std::io::Write;

use serde::Serialize;

use crate::error::CommandError;

/// How replies are rendered on stdout.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Indented JSON.
    #[default]
    Pretty,
    /// Single-line JSON (`--json`), for scripts.
    Compact,
}

/// Write `value` as JSON followed by a newline.
pub fn print_json<T: Serialize>(
    out: &mut impl Write,
    format: OutputFormat,
    value: &T,
) -> Result<(), CommandError> {
    let rendered = match format {
        OutputFormat::Pretty => serde_json::to_string_pretty(value)?,
        OutputFormat::Compact => serde_json::to_string(value)?,
    };
    writeln!(out, "{rendered}")?;
    Ok(())
}
