//! Bibliography output
//!
//! Citations are emitted as entered; the style only labels the document.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::metrics;
use crate::models::{citation_order, Entry};

pub const UNKNOWN_SOURCE: &str = "Unknown source";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum CitationStyle {
    #[default]
    Apa,
    Mla,
    Chicago,
    Harvard,
}

impl CitationStyle {
    pub const ALL: [CitationStyle; 4] = [
        CitationStyle::Apa,
        CitationStyle::Mla,
        CitationStyle::Chicago,
        CitationStyle::Harvard,
    ];

    pub fn code(&self) -> &'static str {
        match self {
            CitationStyle::Apa => "APA",
            CitationStyle::Mla => "MLA",
            CitationStyle::Chicago => "Chicago",
            CitationStyle::Harvard => "Harvard",
        }
    }

    /// Display name, e.g. "APA Style"
    pub fn name(&self) -> &'static str {
        match self {
            CitationStyle::Apa => "APA Style",
            CitationStyle::Mla => "MLA Style",
            CitationStyle::Chicago => "Chicago Style",
            CitationStyle::Harvard => "Harvard Style",
        }
    }
}

impl FromStr for CitationStyle {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let value = value.trim();
        Self::ALL
            .into_iter()
            .find(|style| style.code().eq_ignore_ascii_case(value))
            .ok_or_else(|| AppError::InvalidInput {
                message: format!("unknown citation style '{}' (expected APA, MLA, Chicago or Harvard)", value),
            })
    }
}

impl fmt::Display for CitationStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Bibliography {
    pub style: CitationStyle,
    pub count: usize,
    pub content: String,
}

/// Sort sources by citation and join them with blank lines
pub fn format_bibliography(entries: &[&Entry], style: CitationStyle) -> Bibliography {
    let mut sorted = entries.to_vec();
    sorted.sort_by(|a, b| citation_order(a, b));

    let content = sorted
        .iter()
        .map(|entry| {
            if entry.citation.trim().is_empty() {
                UNKNOWN_SOURCE
            } else {
                entry.citation.as_str()
            }
        })
        .collect::<Vec<_>>()
        .join("\n\n");

    metrics::record_export("bibliography", sorted.len());
    tracing::debug!(style = %style, count = sorted.len(), "Bibliography generated");

    Bibliography {
        style,
        count: sorted.len(),
        content,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::sample_entries;

    #[test]
    fn test_style_parsing() {
        assert_eq!("apa".parse::<CitationStyle>().unwrap(), CitationStyle::Apa);
        assert_eq!(" Chicago ".parse::<CitationStyle>().unwrap(), CitationStyle::Chicago);
        assert_eq!(CitationStyle::Harvard.name(), "Harvard Style");
        assert!("IEEE".parse::<CitationStyle>().is_err());
    }

    #[test]
    fn test_bibliography_is_sorted() {
        let mut entries = sample_entries();
        entries[1].citation = "   ".into();
        let refs: Vec<&Entry> = entries.iter().collect();

        let bibliography = format_bibliography(&refs, CitationStyle::Mla);
        assert_eq!(bibliography.count, 3);

        let parts: Vec<&str> = bibliography.content.split("\n\n").collect();
        assert_eq!(parts[0], UNKNOWN_SOURCE);
        assert!(parts[1].starts_with("Chang"));
        assert!(parts[2].starts_with("Collins"));
    }

    #[test]
    fn test_bibliography_sorts_accented_authors() {
        let mut entries = sample_entries();
        entries[0].citation = "Özdemir, A. (2020). Borders".into();
        entries[1].citation = "Zhang, L. (2019). Margins".into();
        entries[2].citation = "Éclair, B. (2018). Voices".into();
        let refs: Vec<&Entry> = entries.iter().collect();

        let bibliography = format_bibliography(&refs, CitationStyle::Apa);
        let parts: Vec<&str> = bibliography.content.split("\n\n").collect();
        assert_eq!(
            parts,
            vec!["Éclair, B. (2018). Voices", "Özdemir, A. (2020). Borders", "Zhang, L. (2019). Margins"]
        );
    }

    #[test]
    fn test_empty_bibliography() {
        let bibliography = format_bibliography(&[], CitationStyle::default());
        assert_eq!(bibliography.count, 0);
        assert!(bibliography.content.is_empty());
    }
}
