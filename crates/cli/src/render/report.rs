//! Plain-text report layouts

use littrack_analysis::report::{CitationReport, GapAnalysisReport};
use littrack_analysis::CategoryShare;

const DATE_FORMAT: &str = "%Y-%m-%d";

fn share_lines(out: &mut Vec<String>, distribution: &[CategoryShare]) {
    if distribution.is_empty() {
        out.push("- none".to_string());
    }
    for share in distribution {
        out.push(format!(
            "- {}: {} sources ({:.1}%, {})",
            share.name, share.count, share.percentage, share.adequacy
        ));
    }
}

fn gap_list(names: &[String]) -> String {
    if names.is_empty() {
        "none".to_string()
    } else {
        names.join(", ")
    }
}

pub fn gap_report(report: &GapAnalysisReport, ranked: bool) -> String {
    let mut out = vec![
        "RESEARCH GAP ANALYSIS REPORT".to_string(),
        format!("Generated: {}", report.overview.last_updated.format(DATE_FORMAT)),
        format!("Total Sources: {}", report.overview.total_sources),
        format!("Date Range: {}", report.overview.date_range),
        String::new(),
        "FRAMEWORK ANALYSIS:".to_string(),
    ];
    share_lines(&mut out, &report.frameworks.distribution);
    out.push(format!(
        "Most used: {}  Least used: {}  Underrepresented: {}",
        report.frameworks.most_used,
        report.frameworks.least_used,
        gap_list(&report.frameworks.gaps)
    ));

    out.push(String::new());
    out.push("DOMAINS ANALYSIS:".to_string());
    share_lines(&mut out, &report.domains.distribution);
    out.push(format!(
        "Coverage: {:.1}% of sources ({} with a domain)",
        report.domains.coverage, report.domains.domain_sources
    ));

    out.push(String::new());
    out.push("SOURCE TYPES:".to_string());
    share_lines(&mut out, &report.types.distribution);
    out.push(format!("Balance: {}", report.types.balance));

    let relevance = &report.relevance;
    out.push(String::new());
    out.push("RELEVANCE:".to_string());
    for (label, share) in [("High", relevance.high), ("Medium", relevance.medium), ("Low", relevance.low)] {
        out.push(format!("- {}: {} ({:.1}%)", label, share.count, share.percentage));
    }
    out.push(format!("High to Medium/Low ratio: {}", relevance.ratio));

    let temporal = &report.temporal;
    out.push(String::new());
    out.push("TEMPORAL DISTRIBUTION:".to_string());
    out.push(format!("Year range: {}", temporal.year_range));
    out.push(format!("Recent ({}): {} distinct years", temporal.recent.label, temporal.recent.count));
    out.push(format!("Older ({}): {} distinct years", temporal.older.label, temporal.older.count));
    for decade in &temporal.decades {
        out.push(format!("- {}: {}", decade.decade, decade.count));
    }

    out.push(String::new());
    out.push("IDENTIFIED GAPS:".to_string());
    let gaps: Vec<_> = if ranked {
        report.ranked_gaps()
    } else {
        report.gaps.iter().collect()
    };
    if gaps.is_empty() {
        out.push("- none".to_string());
    }
    for gap in gaps {
        out.push(format!("- {} ({}): {}", gap.gap_type, gap.severity, gap.description));
        out.push(format!("  Recommendation: {}", gap.recommendation));
    }

    out.push(String::new());
    out.push("RECOMMENDATIONS:".to_string());
    for recommendation in &report.recommendations {
        out.push(String::new());
        out.push(format!("{}:", recommendation.category));
        for item in &recommendation.items {
            out.push(format!("  * {}", item));
        }
    }

    out.join("\n")
}

/// Counts sorted by count, highest first; ties keep their order
fn by_count(counts: &indexmap::IndexMap<String, usize>) -> Vec<(&String, &usize)> {
    let mut sorted: Vec<_> = counts.iter().collect();
    sorted.sort_by(|a, b| b.1.cmp(a.1));
    sorted
}

pub fn citation_report(report: &CitationReport) -> String {
    let stats = &report.statistics;
    let mut out = vec![
        "CITATION REPORT".to_string(),
        format!("Generated: {}", report.overview.generated_date.format(DATE_FORMAT)),
        format!("Total Sources: {}", report.overview.total_sources),
    ];

    if let Some(question) = &report.overview.research_question {
        out.push(String::new());
        out.push("RESEARCH QUESTION:".to_string());
        out.push(question.clone());
    }

    out.push(String::new());
    out.push("STATISTICS:".to_string());

    out.push(String::new());
    out.push("By Publication Year:".to_string());
    let mut years: Vec<_> = stats.by_year.iter().collect();
    years.sort_by(|a, b| b.0.cmp(a.0));
    out.extend(years.into_iter().map(|(year, count)| format!("{}: {}", year, count)));

    out.push(String::new());
    out.push("By Source Type:".to_string());
    out.extend(by_count(&stats.by_type).into_iter().map(|(t, count)| format!("{}: {}", t, count)));

    out.push(String::new());
    out.push("By Theoretical Framework:".to_string());
    out.extend(by_count(&stats.by_framework).into_iter().map(|(f, count)| format!("{}: {}", f, count)));

    out.push(String::new());
    out.push("COMPLETE SOURCE LIST:".to_string());
    for (index, source) in report.sources.iter().enumerate() {
        let citation = match source.citation.trim() {
            "" => "Unknown citation",
            _ => source.citation.as_str(),
        };
        out.push(format!("{}. {}", index + 1, citation));
    }

    out.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use littrack_common::models::sample_entries;

    #[test]
    fn test_gap_report_sections() {
        let now = Utc.with_ymd_and_hms(2025, 3, 14, 8, 0, 0).unwrap();
        let report = GapAnalysisReport::generate(&sample_entries(), now).unwrap();
        let text = gap_report(&report, false);

        assert!(text.starts_with("RESEARCH GAP ANALYSIS REPORT\nGenerated: 2025-03-14"));
        assert!(text.contains("Date Range: 2008-2017"));
        assert!(text.contains("- Collins: 1 sources (33.3%, High)"));
        assert!(text.contains("Recent (2020-2025): 0 distinct years"));
        assert!(text.contains("- Research Focus (Critical): Very few sources"));
        assert!(text.contains("  * Arts-based research methods"));

        let ranked = gap_report(&report, true);
        let first_gap = ranked.lines().skip_while(|l| *l != "IDENTIFIED GAPS:").nth(1).unwrap();
        assert!(first_gap.starts_with("- Research Focus (Critical)"));
    }

    #[test]
    fn test_citation_report_layout() {
        let now = Utc.with_ymd_and_hms(2025, 3, 14, 8, 0, 0).unwrap();
        let report = CitationReport::generate(&sample_entries(), Some("How?"), now).unwrap();
        let text = citation_report(&report);

        assert!(text.contains("RESEARCH QUESTION:\nHow?"));
        assert!(text.contains("By Publication Year:\n2017: 1\n2009: 1\n2008: 1"));
        assert!(text.contains("1. Chang, H. (2008). Autoethnography as method"));
        assert!(text.ends_with("3. Lee, S. J. (2009). Unraveling the 'model minority' stereotype"));
    }
}
