//! CSV export

use chrono::SecondsFormat;

use crate::metrics;
use crate::models::Entry;

pub const CSV_HEADERS: [&str; 11] = [
    "Citation",
    "Year",
    "Type",
    "Theoretical Framework",
    "Relevance",
    "Connection to Research Question",
    "Key Concepts/Findings",
    "Domain of Power (Collins)",
    "Notes & Quotes",
    "Page/Chapter References",
    "Date Added",
];

const FRAMEWORK_SEPARATOR: &str = "; ";

/// Rendered CSV document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsvExport {
    pub content: String,
    /// Data rows written, excluding the header
    pub rows: usize,
    /// Entries left out because of the row cap
    pub truncated: usize,
}

/// Quote a field when it contains the delimiter, a quote, CR or LF
pub fn escape_csv_field(field: &str, delimiter: char) -> String {
    if field.contains(delimiter) || field.contains(['"', '\n', '\r']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

fn entry_row(entry: &Entry) -> [String; 11] {
    [
        entry.citation.clone(),
        entry.year.clone(),
        entry.source_type.clone(),
        entry.framework.join(FRAMEWORK_SEPARATOR),
        entry.relevance.clone(),
        entry.connection.clone(),
        entry.concepts.clone(),
        entry.domain.clone(),
        entry.notes.clone(),
        entry.pages.clone(),
        entry
            .date_added
            .map(|d| d.to_rfc3339_opts(SecondsFormat::Millis, true))
            .unwrap_or_default(),
    ]
}

fn csv_line<'a>(fields: impl Iterator<Item = &'a str>, delimiter: char) -> String {
    fields
        .map(|field| escape_csv_field(field, delimiter))
        .collect::<Vec<_>>()
        .join(&delimiter.to_string())
}

/// Render entries as CSV, writing at most `max_rows` data rows
pub fn to_csv(entries: &[&Entry], delimiter: char, max_rows: usize) -> CsvExport {
    let mut lines = Vec::with_capacity(entries.len().min(max_rows) + 1);
    lines.push(csv_line(CSV_HEADERS.iter().copied(), delimiter));

    for entry in entries.iter().take(max_rows) {
        let row = entry_row(entry);
        lines.push(csv_line(row.iter().map(String::as_str), delimiter));
    }

    let rows = lines.len() - 1;
    let truncated = entries.len() - rows;
    if truncated > 0 {
        tracing::warn!(max_rows, truncated, "CSV export truncated");
    }
    metrics::record_export("csv", rows);

    CsvExport {
        content: lines.join("\n"),
        rows,
        truncated,
    }
}
