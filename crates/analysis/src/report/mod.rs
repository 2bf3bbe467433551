//! Report assembly
//!
//! Combines the distributions and gap findings into the gap analysis
//! report, and builds citation statistics. Reports are snapshots: they are
//! computed on demand and never stored.

mod citation;

use chrono::{DateTime, Datelike, Utc};
use littrack_common::metrics::AnalysisMetrics;
use littrack_common::models::{check_identities, Entry};
use littrack_common::Result;
use serde::Serialize;

use crate::aggregate::{
    distribution_by_domain, distribution_by_framework, distribution_by_relevance,
    distribution_by_type, temporal_distribution, DomainAnalysis, FrameworkAnalysis,
    RelevanceAnalysis, TemporalAnalysis, TypeAnalysis,
};
use crate::gaps::{rank_by_severity, GapFinding, RuleSet};

pub use citation::{extract_author, CitationOverview, CitationReport, CitationStatistics};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Overview {
    pub total_sources: usize,
    /// "2008-2015", "2017" or "Unknown"
    pub date_range: String,
    pub last_updated: DateTime<Utc>,
}

/// Static search advice grouped by category
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Recommendation {
    pub category: &'static str,
    pub items: Vec<&'static str>,
}

const RECOMMENDATIONS: [(&str, &[&str]); 4] = [
    (
        "Search Terms",
        &[
            "\"model minority\" AND \"average achievement\"",
            "\"Asian American\" AND \"moderate success\"",
            "\"solid performance\" AND workplace",
            "autoethnography AND \"Asian American\"",
            "\"Collins domains of power\" AND race",
            "\"professional navigation\" AND \"non-exceptional\"",
        ],
    ),
    (
        "Databases to Search",
        &[
            "Asian American Studies databases",
            "Education databases (for workplace parallels)",
            "Psychology databases (for identity formation)",
            "Sociology databases (for power structure analysis)",
            "Business databases (for professional experiences)",
        ],
    ),
    (
        "Theoretical Development",
        &[
            "More sources connecting Collins' framework to Asian American contexts",
            "Sources on intersectionality and moderate achievement",
            "Power dynamics in professional \"middle\" positions",
            "Identity formation beyond exceptional narratives",
        ],
    ),
    (
        "Methodological Sources",
        &[
            "Critical autoethnography in race studies",
            "Narrative analysis methods",
            "Collaborative autoethnography approaches",
            "Arts-based research methods",
        ],
    ),
];

pub fn recommendations() -> Vec<Recommendation> {
    RECOMMENDATIONS
        .iter()
        .map(|(category, items)| Recommendation {
            category: *category,
            items: items.to_vec(),
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GapAnalysisReport {
    pub overview: Overview,
    pub frameworks: FrameworkAnalysis,
    pub domains: DomainAnalysis,
    pub types: TypeAnalysis,
    pub relevance: RelevanceAnalysis,
    pub temporal: TemporalAnalysis,
    /// In rule order
    pub gaps: Vec<GapFinding>,
    pub recommendations: Vec<Recommendation>,
}

impl GapAnalysisReport {
    /// Analyse the collection with the standard rules
    pub fn generate(entries: &[Entry], now: DateTime<Utc>) -> Result<Self> {
        Self::generate_with_rules(entries, &RuleSet::default(), now)
    }

    /// Fails without partial output when an id is blank or repeated
    pub fn generate_with_rules(entries: &[Entry], rules: &RuleSet, now: DateTime<Utc>) -> Result<Self> {
        check_identities(entries)?;
        let timer = AnalysisMetrics::start("gap_analysis");

        let temporal = temporal_distribution(entries, now.year());
        let report = Self {
            overview: Overview {
                total_sources: entries.len(),
                date_range: temporal.year_range.to_string(),
                last_updated: now,
            },
            frameworks: distribution_by_framework(entries),
            domains: distribution_by_domain(entries),
            types: distribution_by_type(entries),
            relevance: distribution_by_relevance(entries),
            temporal,
            gaps: rules.evaluate(entries),
            recommendations: recommendations(),
        };

        tracing::info!(
            entries = entries.len(),
            gaps = report.gaps.len(),
            "Gap analysis generated"
        );
        timer.finish(entries.len());
        Ok(report)
    }

    /// Gaps with the most severe first
    pub fn ranked_gaps(&self) -> Vec<&GapFinding> {
        rank_by_severity(&self.gaps)
    }
}
