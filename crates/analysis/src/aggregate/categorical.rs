//! Framework, power-domain, source-type and relevance distributions

use std::fmt;

use indexmap::IndexMap;
use littrack_common::models::{Entry, Relevance};
use serde::{Serialize, Serializer};

use super::{low_adequacy, percentage, round_to, Balance, CategoryShare};

/// The four domains of power, in reporting order
pub const POWER_DOMAINS: [&str; 4] = ["Structural", "Disciplinary", "Cultural", "Interpersonal"];

const UNKNOWN: &str = "Unknown";
const NONE: &str = "None";

// ============================================================================
// Frameworks
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FrameworkAnalysis {
    /// Descending by count; ties keep first-seen order
    pub distribution: Vec<CategoryShare>,
    pub most_used: String,
    pub least_used: String,
    pub gaps: Vec<String>,
}

pub fn distribution_by_framework(entries: &[Entry]) -> FrameworkAnalysis {
    let mut counts: IndexMap<&str, usize> = IndexMap::new();
    for entry in entries {
        for tag in entry.distinct_frameworks() {
            *counts.entry(tag).or_insert(0) += 1;
        }
    }

    let mut distribution: Vec<CategoryShare> = counts
        .into_iter()
        .map(|(name, count)| CategoryShare::new(name, count, entries.len()))
        .collect();
    distribution.sort_by(|a, b| b.count.cmp(&a.count));

    FrameworkAnalysis {
        most_used: distribution.first().map_or(NONE, |s| s.name.as_str()).to_string(),
        least_used: distribution.last().map_or(NONE, |s| s.name.as_str()).to_string(),
        gaps: low_adequacy(&distribution),
        distribution,
    }
}

// ============================================================================
// Power domains
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DomainAnalysis {
    /// One row per power domain, percentages over `domain_sources`
    pub distribution: Vec<CategoryShare>,
    /// Entries carrying a power-domain classification
    pub domain_sources: usize,
    /// Percent of all entries with a power-domain classification
    pub coverage: f64,
    pub gaps: Vec<String>,
}

pub fn distribution_by_domain(entries: &[Entry]) -> DomainAnalysis {
    let classified: Vec<String> = entries
        .iter()
        .filter(|e| e.has_domain())
        .map(|e| e.domain.to_lowercase())
        .collect();
    let domain_sources = classified.len();

    let distribution: Vec<CategoryShare> = POWER_DOMAINS
        .iter()
        .map(|domain| {
            let needle = domain.to_lowercase();
            let count = classified.iter().filter(|d| d.contains(&needle)).count();
            CategoryShare::new(*domain, count, domain_sources)
        })
        .collect();

    DomainAnalysis {
        gaps: low_adequacy(&distribution),
        distribution,
        domain_sources,
        coverage: percentage(domain_sources, entries.len()),
    }
}

// ============================================================================
// Source types
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TypeAnalysis {
    pub distribution: Vec<CategoryShare>,
    pub balance: Balance,
    pub gaps: Vec<String>,
}

pub fn distribution_by_type(entries: &[Entry]) -> TypeAnalysis {
    let mut counts: IndexMap<&str, usize> = IndexMap::new();
    for entry in entries {
        let source_type = match entry.source_type.trim() {
            "" => UNKNOWN,
            _ => entry.source_type.as_str(),
        };
        *counts.entry(source_type).or_insert(0) += 1;
    }

    let mut distribution: Vec<CategoryShare> = counts
        .into_iter()
        .map(|(name, count)| CategoryShare::new(name, count, entries.len()))
        .collect();
    distribution.sort_by(|a, b| b.count.cmp(&a.count));

    let balance = if distribution.len() < 2 {
        Balance::Poor
    } else {
        let min = distribution.iter().map(|s| s.percentage).fold(f64::INFINITY, f64::min);
        let max = distribution.iter().map(|s| s.percentage).fold(0.0, f64::max);
        Balance::from_extremes(min, max)
    };

    TypeAnalysis {
        gaps: low_adequacy(&distribution),
        distribution,
        balance,
    }
}

// ============================================================================
// Relevance
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RelevanceShare {
    pub count: usize,
    pub percentage: f64,
}

/// High-relevance entries per Medium or Low entry
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RelevanceRatio {
    Finite(f64),
    /// High entries exist but no Medium or Low ones
    Unbounded,
}

impl Serialize for RelevanceRatio {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            RelevanceRatio::Finite(value) => serializer.serialize_f64(*value),
            RelevanceRatio::Unbounded => serializer.serialize_str("unbounded"),
        }
    }
}

impl fmt::Display for RelevanceRatio {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RelevanceRatio::Finite(value) => write!(f, "{:.2}", value),
            RelevanceRatio::Unbounded => f.write_str("unbounded"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RelevanceAnalysis {
    pub high: RelevanceShare,
    pub medium: RelevanceShare,
    pub low: RelevanceShare,
    pub ratio: RelevanceRatio,
}

pub fn distribution_by_relevance(entries: &[Entry]) -> RelevanceAnalysis {
    let total = entries.len();
    let count = |level: Relevance| {
        entries
            .iter()
            .filter(|e| e.relevance_level() == Some(level))
            .count()
    };
    let share = |count: usize| RelevanceShare {
        count,
        percentage: percentage(count, total),
    };

    let (high, medium, low) = (count(Relevance::High), count(Relevance::Medium), count(Relevance::Low));
    let ratio = match (high, medium + low) {
        (0, _) => RelevanceRatio::Finite(0.0),
        (_, 0) => RelevanceRatio::Unbounded,
        (high, rest) => RelevanceRatio::Finite(round_to(high as f64 / rest as f64, 2)),
    };

    RelevanceAnalysis {
        high: share(high),
        medium: share(medium),
        low: share(low),
        ratio,
    }
}
