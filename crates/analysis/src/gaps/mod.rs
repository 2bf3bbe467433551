//! Research gap rules
//!
//! A fixed, ordered set of heuristics flags under-represented parts of the
//! collection. Every rule is evaluated; each emits at most one finding.

mod rules;

use std::fmt;

use littrack_common::metrics;
use littrack_common::models::Entry;
use serde::Serialize;

pub use rules::{
    FrameworkCoverageRule, MethodologyRule, ResearchFocusRule, SourceTypeBalanceRule,
    ASIANCRIT_FRAMEWORK, COLLINS_FRAMEWORK, RESEARCH_FOCUS_KEYWORDS,
};

/// How urgently a gap should be addressed
///
/// Declaration order is rank order: `Critical` sorts first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum Severity {
    Critical,
    High,
    Medium,
    Low,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Critical => "Critical",
            Severity::High => "High",
            Severity::Medium => "Medium",
            Severity::Low => "Low",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Area of the collection a gap concerns
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum GapType {
    Framework,
    #[serde(rename = "Source Type")]
    SourceType,
    #[serde(rename = "Research Focus")]
    ResearchFocus,
    Methodology,
}

impl GapType {
    pub fn as_str(&self) -> &'static str {
        match self {
            GapType::Framework => "Framework",
            GapType::SourceType => "Source Type",
            GapType::ResearchFocus => "Research Focus",
            GapType::Methodology => "Methodology",
        }
    }
}

impl fmt::Display for GapType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GapFinding {
    #[serde(rename = "type")]
    pub gap_type: GapType,
    pub description: String,
    pub severity: Severity,
    pub recommendation: String,
}

/// A single gap heuristic
pub trait GapRule {
    /// Short identifier used in logs
    fn name(&self) -> &'static str;

    fn evaluate(&self, entries: &[Entry]) -> Option<GapFinding>;
}

/// Ordered collection of gap rules
pub struct RuleSet {
    rules: Vec<Box<dyn GapRule>>,
}

impl RuleSet {
    pub fn new(rules: Vec<Box<dyn GapRule>>) -> Self {
        Self { rules }
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Findings in rule order
    pub fn evaluate(&self, entries: &[Entry]) -> Vec<GapFinding> {
        self.rules
            .iter()
            .filter_map(|rule| {
                let finding = rule.evaluate(entries)?;
                tracing::debug!(rule = rule.name(), severity = %finding.severity, "Gap detected");
                metrics::record_gap_finding(finding.severity.as_str());
                Some(finding)
            })
            .collect()
    }
}

impl Default for RuleSet {
    /// The five standard rules
    fn default() -> Self {
        Self::new(vec![
            Box::new(FrameworkCoverageRule::collins()),
            Box::new(FrameworkCoverageRule::asiancrit()),
            Box::new(SourceTypeBalanceRule::default()),
            Box::new(ResearchFocusRule::default()),
            Box::new(MethodologyRule::default()),
        ])
    }
}

/// Evaluate the standard rules
pub fn identify_gaps(entries: &[Entry]) -> Vec<GapFinding> {
    RuleSet::default().evaluate(entries)
}

/// Findings ordered by severity, Critical first; rule order is kept within a severity
pub fn rank_by_severity(findings: &[GapFinding]) -> Vec<&GapFinding> {
    let mut ranked: Vec<&GapFinding> = findings.iter().collect();
    ranked.sort_by_key(|finding| finding.severity);
    ranked
}
