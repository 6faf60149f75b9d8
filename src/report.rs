use std::io::{self, Write};

use crate::cli::Method;
use crate::pipeline::extract::{DominantColor, Extraction};

/// Format one result line in the style of the extraction method.
pub fn format_entry(entry: &DominantColor, method: Method) -> String {
    match method {
        Method::Clustering => format!("{}: {}", entry.color, entry.count),
        Method::Frequency => format!(
            "{}: {} ({:.2}%)",
            entry.color, entry.count, entry.percentage
        ),
    }
}

/// Write an extraction as plain text, one color per line.
pub fn write_extraction<W: Write>(out: &mut W, extraction: &Extraction) -> io::Result<()> {
    if extraction.method == Method::Clustering {
        writeln!(out, "Dominant colors:")?;
    }
    for entry in &extraction.colors {
        writeln!(out, "{}", format_entry(entry, extraction.method))?;
    }
    Ok(())
}
