//! Entry filtering and search
//!
//! Filters are conjunctive: an entry is kept only when it satisfies every
//! active criterion.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::models::{Entry, Relevance};

/// Searches shorter than this are ignored
pub const MIN_SEARCH_LENGTH: usize = 2;

/// Publication year window
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum YearRange {
    /// Inclusive on both ends
    Between(i32, i32),
    /// Strictly before the given year
    Before(i32),
}

impl YearRange {
    pub fn contains(&self, year: i32) -> bool {
        match *self {
            YearRange::Between(from, to) => year >= from && year <= to,
            YearRange::Before(limit) => year < limit,
        }
    }
}

impl FromStr for YearRange {
    type Err = AppError;

    /// Parses "2020-2025" or "before-2000"
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let invalid = || AppError::InvalidFormat {
            message: format!("year range '{}' must look like 2015-2019 or before-2000", value),
        };

        let value = value.trim();
        if let Some(limit) = value.strip_prefix("before-") {
            return limit.parse().map(YearRange::Before).map_err(|_| invalid());
        }

        let (from, to) = value.split_once('-').ok_or_else(invalid)?;
        let from: i32 = from.trim().parse().map_err(|_| invalid())?;
        let to: i32 = to.trim().parse().map_err(|_| invalid())?;
        if from > to {
            return Err(invalid());
        }
        Ok(YearRange::Between(from, to))
    }
}

impl fmt::Display for YearRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            YearRange::Between(from, to) => write!(f, "{}-{}", from, to),
            YearRange::Before(limit) => write!(f, "before-{}", limit),
        }
    }
}

/// Active filter criteria
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FilterSet {
    pub framework: Option<String>,
    pub relevance: Option<Relevance>,
    pub search: Option<String>,
    pub source_type: Option<String>,
    pub year: Option<YearRange>,
    pub domain: Option<String>,
}

impl FilterSet {
    /// Whether any criterion would exclude entries
    pub fn is_active(&self) -> bool {
        self.framework.is_some()
            || self.relevance.is_some()
            || self.search_term().is_some()
            || self.source_type.is_some()
            || self.year.is_some()
            || self.domain.is_some()
    }

    /// Lower-cased search text, if long enough to apply
    fn search_term(&self) -> Option<String> {
        self.search
            .as_deref()
            .map(str::trim)
            .filter(|s| s.chars().count() >= MIN_SEARCH_LENGTH)
            .map(str::to_lowercase)
    }

    pub fn matches(&self, entry: &Entry) -> bool {
        if let Some(framework) = &self.framework {
            if !entry.has_framework(framework) {
                return false;
            }
        }

        if let Some(relevance) = self.relevance {
            if entry.relevance != relevance.as_str() {
                return false;
            }
        }

        if let Some(source_type) = &self.source_type {
            if &entry.source_type != source_type {
                return false;
            }
        }

        if let Some(range) = self.year {
            match entry.numeric_year() {
                Some(year) if range.contains(year) => {}
                _ => return false,
            }
        }

        if let Some(domain) = &self.domain {
            if !entry.domain.to_lowercase().contains(&domain.to_lowercase()) {
                return false;
            }
        }

        if let Some(term) = self.search_term() {
            let searchable = [
                &entry.citation,
                &entry.concepts,
                &entry.notes,
                &entry.connection,
                &entry.domain,
                &entry.pages,
            ];
            if !searchable.iter().any(|field| field.to_lowercase().contains(&term)) {
                return false;
            }
        }

        true
    }

    /// Matching entries in their original order
    pub fn apply<'a>(&self, entries: &'a [Entry]) -> Vec<&'a Entry> {
        let kept: Vec<&Entry> = entries.iter().filter(|e| self.matches(e)).collect();
        tracing::debug!(total = entries.len(), kept = kept.len(), "Filters applied");
        kept
    }
}

/// Which entries an export or report covers
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExportScope {
    #[default]
    All,
    Filtered,
    HighRelevance,
}

impl ExportScope {
    pub fn select<'a>(&self, entries: &'a [Entry], filters: &FilterSet) -> Vec<&'a Entry> {
        match self {
            ExportScope::All => entries.iter().collect(),
            ExportScope::Filtered => {
                if !filters.is_active() {
                    tracing::warn!("Filtered scope requested without any active filter; selecting every entry");
                }
                filters.apply(entries)
            }
            ExportScope::HighRelevance => entries
                .iter()
                .filter(|e| e.relevance_level() == Some(Relevance::High))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::sample_entries;

    #[test]
    fn test_year_range_parsing() {
        assert_eq!("2020-2025".parse::<YearRange>().unwrap(), YearRange::Between(2020, 2025));
        assert_eq!("before-2000".parse::<YearRange>().unwrap(), YearRange::Before(2000));
        assert!("2025-2020".parse::<YearRange>().is_err());
        assert!("recent".parse::<YearRange>().is_err());
        assert_eq!(YearRange::Before(2000).to_string(), "before-2000");
    }

    #[test]
    fn test_empty_filter_keeps_everything() {
        let entries = sample_entries();
        let filters = FilterSet::default();
        assert!(!filters.is_active());
        assert_eq!(filters.apply(&entries).len(), 3);
    }

    #[test]
    fn test_framework_and_relevance() {
        let entries = sample_entries();
        let filters = FilterSet {
            framework: Some("AsianCrit".into()),
            relevance: Some(Relevance::High),
            ..Default::default()
        };
        let kept = filters.apply(&entries);
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].id.as_str(), "sample_1");
    }

    #[test]
    fn test_short_search_is_ignored() {
        let entries = sample_entries();
        let filters = FilterSet {
            search: Some(" z ".into()),
            ..Default::default()
        };
        assert!(!filters.is_active());
        assert_eq!(filters.apply(&entries).len(), 3);
    }

    #[test]
    fn test_search_is_case_insensitive() {
        let entries = sample_entries();
        let filters = FilterSet {
            search: Some("LAYERED accounts".into()),
            ..Default::default()
        };
        let kept = filters.apply(&entries);
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].id.as_str(), "sample_2");
    }

    #[test]
    fn test_year_and_domain() {
        let mut entries = sample_entries();
        entries[0].year = "forthcoming".into();

        let by_year = FilterSet {
            year: Some(YearRange::Between(2005, 2009)),
            ..Default::default()
        };
        assert_eq!(by_year.apply(&entries).len(), 2);

        let by_domain = FilterSet {
            domain: Some("cultural".into()),
            ..Default::default()
        };
        assert_eq!(by_domain.apply(&entries).len(), 1);
    }

    #[test]
    fn test_export_scope() {
        let mut entries = sample_entries();
        entries[0].relevance = "Low".into();
        let filters = FilterSet {
            source_type: Some("Methodological".into()),
            ..Default::default()
        };

        assert_eq!(ExportScope::All.select(&entries, &filters).len(), 3);
        assert_eq!(ExportScope::Filtered.select(&entries, &filters).len(), 1);
        assert_eq!(ExportScope::HighRelevance.select(&entries, &filters).len(), 2);
    }

    #[test]
    fn test_filtered_scope_without_filters_keeps_everything() {
        let entries = sample_entries();
        let blank_search = FilterSet {
            search: Some("x".into()),
            ..Default::default()
        };
        assert!(!blank_search.is_active());
        assert_eq!(ExportScope::Filtered.select(&entries, &blank_search).len(), 3);
    }
}
