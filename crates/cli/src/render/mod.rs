//! Text and JSON presentation

mod report;

use littrack_common::{errors::Result, models::Entry, store::StoreSummary};
use serde::Serialize;

pub use report::{citation_report, gap_report};

const CITATION_WIDTH: usize = 60;

pub fn to_json<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    Ok(serde_json::to_string_pretty(value)?)
}

/// Shorten to `width` characters, marking the cut with "..."
fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }
    let kept: String = text.chars().take(width.saturating_sub(3)).collect();
    format!("{}...", kept)
}

pub fn entry_table(entries: &[&Entry], total: usize) -> String {
    if entries.is_empty() {
        return format!("No entries to show (0 of {})", total);
    }

    let rows: Vec<[String; 6]> = entries
        .iter()
        .map(|e| {
            [
                e.id.to_string(),
                e.year.clone(),
                e.source_type.clone(),
                e.relevance.clone(),
                e.distinct_frameworks().join(", "),
                truncate(&e.citation, CITATION_WIDTH),
            ]
        })
        .collect();

    let header = ["ID", "Year", "Type", "Relevance", "Frameworks", "Citation"];
    let mut widths = header.map(|h| h.chars().count());
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let line = |cells: &[&str]| {
        cells
            .iter()
            .zip(widths)
            .map(|(cell, width)| format!("{:<width$}", cell, width = width))
            .collect::<Vec<_>>()
            .join("  ")
            .trim_end()
            .to_string()
    };

    let mut out = vec![line(&header)];
    for row in &rows {
        let cells: Vec<&str> = row.iter().map(String::as_str).collect();
        out.push(line(&cells));
    }
    out.push(String::new());
    out.push(format!("Showing {} of {} entries", entries.len(), total));
    out.join("\n")
}

pub fn summary(summary: &StoreSummary, research_question: Option<&str>) -> String {
    let mut out = vec![
        format!("Total entries:        {}", summary.total),
        format!("High relevance:       {}", summary.high_relevance),
        format!("Theoretical sources:  {}", summary.theoretical),
        format!("Empirical sources:    {}", summary.empirical),
    ];
    if let Some(question) = research_question {
        out.push(String::new());
        out.push(format!("Research question: {}", question));
    }
    out.join("\n")
}
