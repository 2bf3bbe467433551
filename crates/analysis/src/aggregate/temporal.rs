//! Publication-year distribution

use std::collections::BTreeMap;
use std::fmt;

use littrack_common::models::Entry;
use serde::Serialize;

/// Years back from the current year counted as recent
pub const RECENT_WINDOW_YEARS: i32 = 5;
/// Years back from the current year beyond which a year counts as older
pub const OLDER_THRESHOLD_YEARS: i32 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct YearSpan {
    pub earliest: Option<i32>,
    pub latest: Option<i32>,
}

impl fmt::Display for YearSpan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.earliest, self.latest) {
            (Some(earliest), Some(latest)) if earliest == latest => write!(f, "{}", earliest),
            (Some(earliest), Some(latest)) => write!(f, "{}-{}", earliest, latest),
            _ => f.write_str("Unknown"),
        }
    }
}

/// Number of distinct publication years inside a labelled window
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WindowCount {
    pub count: usize,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DecadeCount {
    /// e.g. "2010s"
    pub decade: String,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TemporalAnalysis {
    pub year_range: YearSpan,
    pub recent: WindowCount,
    pub older: WindowCount,
    /// Newest decade first
    pub decades: Vec<DecadeCount>,
}

/// Year distribution relative to `current_year`; entries without a numeric
/// year are left out
pub fn temporal_distribution(entries: &[Entry], current_year: i32) -> TemporalAnalysis {
    let mut years: BTreeMap<i32, usize> = BTreeMap::new();
    let mut decades: BTreeMap<i32, usize> = BTreeMap::new();

    for year in entries.iter().filter_map(Entry::numeric_year) {
        *years.entry(year).or_insert(0) += 1;
        *decades.entry(year.div_euclid(10) * 10).or_insert(0) += 1;
    }

    let recent_from = current_year - RECENT_WINDOW_YEARS;
    let older_before = current_year - OLDER_THRESHOLD_YEARS;

    TemporalAnalysis {
        year_range: YearSpan {
            earliest: years.keys().next().copied(),
            latest: years.keys().next_back().copied(),
        },
        recent: WindowCount {
            count: years.range(recent_from..=current_year).count(),
            label: format!("{}-{}", recent_from, current_year),
        },
        older: WindowCount {
            count: years.range(..older_before).count(),
            label: format!("Before {}", older_before),
        },
        decades: decades
            .into_iter()
            .rev()
            .map(|(decade, count)| DecadeCount {
                decade: format!("{}s", decade),
                count,
            })
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use littrack_common::models::sample_entries;

    fn with_years(years: &[&str]) -> Vec<Entry> {
        let template = sample_entries().remove(0);
        years
            .iter()
            .enumerate()
            .map(|(i, year)| Entry {
                id: format!("e{}", i).into(),
                year: year.to_string(),
                ..template.clone()
            })
            .collect()
    }

    #[test]
    fn test_decades_and_range() {
        let analysis = temporal_distribution(&with_years(&["2008", "2008", "2015", "n/a"]), 2025);

        assert_eq!(analysis.year_range.earliest, Some(2008));
        assert_eq!(analysis.year_range.latest, Some(2015));
        assert_eq!(analysis.year_range.to_string(), "2008-2015");
        assert_eq!(
            analysis.decades,
            vec![
                DecadeCount { decade: "2010s".into(), count: 1 },
                DecadeCount { decade: "2000s".into(), count: 2 },
            ]
        );
    }

    #[test]
    fn test_windows_count_distinct_years() {
        let entries = with_years(&["2024", "2024", "2021", "2019", "2010", "2009", "2031"]);
        let analysis = temporal_distribution(&entries, 2025);

        assert_eq!(analysis.recent.label, "2020-2025");
        assert_eq!(analysis.recent.count, 2);
        assert_eq!(analysis.older.label, "Before 2015");
        assert_eq!(analysis.older.count, 2);
    }

    #[test]
    fn test_decades_sort_numerically() {
        let analysis = temporal_distribution(&with_years(&["995", "1999", "2001"]), 2025);
        let labels: Vec<&str> = analysis.decades.iter().map(|d| d.decade.as_str()).collect();
        assert_eq!(labels, vec!["2000s", "1990s", "990s"]);
    }

    #[test]
    fn test_no_numeric_years() {
        let analysis = temporal_distribution(&with_years(&["", "forthcoming"]), 2025);
        assert_eq!(analysis.year_range.to_string(), "Unknown");
        assert_eq!(analysis.recent.count, 0);
        assert!(analysis.decades.is_empty());

        let single = temporal_distribution(&with_years(&["2017"]), 2025);
        assert_eq!(single.year_range.to_string(), "2017");
    }
}
