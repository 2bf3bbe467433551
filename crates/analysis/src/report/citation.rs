//! Citation statistics report

use std::sync::OnceLock;

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use littrack_common::metrics::AnalysisMetrics;
use littrack_common::models::{check_identities, citation_order, Entry};
use littrack_common::Result;
use regex_lite::Regex;
use serde::Serialize;

const UNKNOWN: &str = "Unknown";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CitationOverview {
    pub total_sources: usize,
    pub generated_date: DateTime<Utc>,
    pub research_question: Option<String>,
}

/// Counts keyed by raw field value, in first-seen order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CitationStatistics {
    pub by_year: IndexMap<String, usize>,
    pub by_type: IndexMap<String, usize>,
    pub by_framework: IndexMap<String, usize>,
    pub by_relevance: IndexMap<String, usize>,
    pub author_frequency: IndexMap<String, usize>,
}

impl CitationStatistics {
    pub fn collect(entries: &[Entry]) -> Self {
        let mut stats = Self::default();

        for entry in entries {
            bump(&mut stats.by_year, or_unknown(&entry.year));
            bump(&mut stats.by_type, or_unknown(&entry.source_type));
            bump(&mut stats.by_relevance, or_unknown(&entry.relevance));
            for tag in entry.distinct_frameworks() {
                bump(&mut stats.by_framework, tag);
            }
            if let Some(author) = extract_author(&entry.citation) {
                bump(&mut stats.author_frequency, author);
            }
        }

        stats
    }
}

fn or_unknown(value: &str) -> &str {
    if value.trim().is_empty() {
        UNKNOWN
    } else {
        value
    }
}

fn bump(counts: &mut IndexMap<String, usize>, key: &str) {
    match counts.get_mut(key) {
        Some(count) => *count += 1,
        None => {
            counts.insert(key.to_string(), 1);
        }
    }
}

fn author_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^([^(]+)\(").expect("author pattern is valid"))
}

/// Author portion of a citation: the text before the first "(", trimmed,
/// with one trailing comma removed. None when there is no "(" or the
/// result is a single character or less.
pub fn extract_author(citation: &str) -> Option<&str> {
    let captured = author_pattern().captures(citation)?.get(1)?.as_str().trim();
    let author = captured.strip_suffix(',').unwrap_or(captured);
    (author.chars().count() > 1).then_some(author)
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CitationReport {
    pub overview: CitationOverview,
    pub statistics: CitationStatistics,
    /// Sorted by citation, case-insensitive
    pub sources: Vec<Entry>,
}

impl CitationReport {
    pub fn generate(entries: &[Entry], research_question: Option<&str>, now: DateTime<Utc>) -> Result<Self> {
        check_identities(entries)?;
        let timer = AnalysisMetrics::start("citation_report");

        let mut sources = entries.to_vec();
        sources.sort_by(citation_order);

        let report = Self {
            overview: CitationOverview {
                total_sources: entries.len(),
                generated_date: now,
                research_question: research_question.map(str::to_string),
            },
            statistics: CitationStatistics::collect(entries),
            sources,
        };

        tracing::info!(entries = entries.len(), "Citation report generated");
        timer.finish(entries.len());
        Ok(report)
    }
}
