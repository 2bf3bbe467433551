//! The standard gap rules

use littrack_common::models::Entry;

use super::{GapFinding, GapRule, GapType, Severity};

pub const COLLINS_FRAMEWORK: &str = "Collins";
pub const ASIANCRIT_FRAMEWORK: &str = "AsianCrit";

/// Connection phrases marking a source as speaking to the research focus
pub const RESEARCH_FOCUS_KEYWORDS: [&str; 3] = ["solid middle", "moderate achievement", "average"];

fn count_type(entries: &[Entry], source_type: &str) -> usize {
    entries.iter().filter(|e| e.source_type == source_type).count()
}

/// Fires when a framework is tagged on too few entries
#[derive(Debug, Clone)]
pub struct FrameworkCoverageRule {
    pub framework: &'static str,
    pub min_sources: usize,
    pub severity: Severity,
    pub description: &'static str,
    pub recommendation: &'static str,
}

impl FrameworkCoverageRule {
    pub fn collins() -> Self {
        Self {
            framework: COLLINS_FRAMEWORK,
            min_sources: 3,
            severity: Severity::High,
            description: "Limited sources using Collins' Domains-of-Power framework",
            recommendation: "Seek more sources that explicitly use Collins' theoretical framework",
        }
    }

    pub fn asiancrit() -> Self {
        Self {
            framework: ASIANCRIT_FRAMEWORK,
            min_sources: 2,
            severity: Severity::Medium,
            description: "Insufficient Asian American Critical Race Theory sources",
            recommendation: "Add more AsianCrit theoretical sources for comprehensive analysis",
        }
    }
}

impl GapRule for FrameworkCoverageRule {
    fn name(&self) -> &'static str {
        "framework_coverage"
    }

    fn evaluate(&self, entries: &[Entry]) -> Option<GapFinding> {
        let tagged = entries.iter().filter(|e| e.has_framework(self.framework)).count();
        (tagged < self.min_sources).then(|| GapFinding {
            gap_type: GapType::Framework,
            description: self.description.to_string(),
            severity: self.severity,
            recommendation: self.recommendation.to_string(),
        })
    }
}

/// Fires when empirical sources fall below a share of theoretical ones
#[derive(Debug, Clone)]
pub struct SourceTypeBalanceRule {
    pub min_empirical_ratio: f64,
}

impl Default for SourceTypeBalanceRule {
    fn default() -> Self {
        Self { min_empirical_ratio: 0.5 }
    }
}

impl GapRule for SourceTypeBalanceRule {
    fn name(&self) -> &'static str {
        "source_type_balance"
    }

    fn evaluate(&self, entries: &[Entry]) -> Option<GapFinding> {
        let empirical = count_type(entries, "Empirical") as f64;
        let theoretical = count_type(entries, "Theoretical") as f64;

        (empirical < theoretical * self.min_empirical_ratio).then(|| GapFinding {
            gap_type: GapType::SourceType,
            description: "Limited empirical studies compared to theoretical sources".to_string(),
            severity: Severity::High,
            recommendation: "Seek more empirical studies on model minority experiences".to_string(),
        })
    }
}

/// Fires when few connections mention the "solid middle" focus
#[derive(Debug, Clone)]
pub struct ResearchFocusRule {
    pub keywords: &'static [&'static str],
    pub min_sources: usize,
}

impl Default for ResearchFocusRule {
    fn default() -> Self {
        Self {
            keywords: &RESEARCH_FOCUS_KEYWORDS,
            min_sources: 3,
        }
    }
}

impl ResearchFocusRule {
    fn matches(&self, entry: &Entry) -> bool {
        let connection = entry.connection.to_lowercase();
        self.keywords.iter().any(|k| connection.contains(k))
    }
}

impl GapRule for ResearchFocusRule {
    fn name(&self) -> &'static str {
        "research_focus"
    }

    fn evaluate(&self, entries: &[Entry]) -> Option<GapFinding> {
        let focused = entries.iter().filter(|e| self.matches(e)).count();
        (focused < self.min_sources).then(|| GapFinding {
            gap_type: GapType::ResearchFocus,
            description: "Very few sources specifically address \"solid middle\" Asian American experiences"
                .to_string(),
            severity: Severity::Critical,
            recommendation: "This is a major gap - seek sources on moderate achievement, average performance, or non-exceptional Asian American experiences".to_string(),
        })
    }
}

/// Fires when there are too few methodological sources
#[derive(Debug, Clone)]
pub struct MethodologyRule {
    pub min_sources: usize,
}

impl Default for MethodologyRule {
    fn default() -> Self {
        Self { min_sources: 2 }
    }
}

impl GapRule for MethodologyRule {
    fn name(&self) -> &'static str {
        "methodology"
    }

    fn evaluate(&self, entries: &[Entry]) -> Option<GapFinding> {
        (count_type(entries, "Methodological") < self.min_sources).then(|| GapFinding {
            gap_type: GapType::Methodology,
            description: "Limited methodological sources for autoethnographic approach".to_string(),
            severity: Severity::Medium,
            recommendation: "Add more sources on autoethnography, particularly critical autoethnography methods"
                .to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use littrack_common::models::sample_entries;

    #[test]
    fn test_framework_rule_uses_trimmed_tags() {
        let mut entries = sample_entries();
        for entry in &mut entries {
            entry.framework = vec![" Collins ".into()];
        }
        assert!(FrameworkCoverageRule::collins().evaluate(&entries).is_none());
        assert!(FrameworkCoverageRule::asiancrit().evaluate(&entries).is_some());
    }

    #[test]
    fn test_methodology_rule_threshold() {
        let mut entries = sample_entries();
        assert!(MethodologyRule::default().evaluate(&entries).is_some());

        entries[1].source_type = "Methodological".into();
        assert!(MethodologyRule::default().evaluate(&entries).is_none());
    }

    #[test]
    fn test_balance_rule_with_no_theory() {
        assert!(SourceTypeBalanceRule::default().evaluate(&[]).is_none());
    }
}
