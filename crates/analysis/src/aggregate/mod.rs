//! Distributions over an entry collection
//!
//! Every function here is pure and total: an empty collection yields zero
//! counts and zero percentages, never NaN.

mod categorical;
mod temporal;

use std::fmt;

use serde::Serialize;

pub use categorical::{
    distribution_by_domain, distribution_by_framework, distribution_by_relevance,
    distribution_by_type, DomainAnalysis, FrameworkAnalysis, RelevanceAnalysis, RelevanceRatio,
    RelevanceShare, TypeAnalysis, POWER_DOMAINS,
};
pub use temporal::{temporal_distribution, DecadeCount, TemporalAnalysis, WindowCount, YearSpan};

/// Share at or above which a category is well represented
pub const HIGH_ADEQUACY_PERCENT: f64 = 20.0;
/// Share at or above which a category is adequately represented
pub const MEDIUM_ADEQUACY_PERCENT: f64 = 10.0;

/// How well a category is represented in the collection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Adequacy {
    High,
    Medium,
    Low,
}

impl Adequacy {
    pub fn from_percentage(percentage: f64) -> Self {
        if percentage >= HIGH_ADEQUACY_PERCENT {
            Adequacy::High
        } else if percentage >= MEDIUM_ADEQUACY_PERCENT {
            Adequacy::Medium
        } else {
            Adequacy::Low
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Adequacy::High => "High",
            Adequacy::Medium => "Medium",
            Adequacy::Low => "Low",
        }
    }
}

impl fmt::Display for Adequacy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Spread of source types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Balance {
    Good,
    Fair,
    Poor,
}

impl Balance {
    /// Classify from the smallest and largest category percentages
    pub fn from_extremes(min: f64, max: f64) -> Self {
        if max <= 0.0 {
            return Balance::Poor;
        }
        let ratio = min / max;
        if ratio >= 0.5 {
            Balance::Good
        } else if ratio >= 0.25 {
            Balance::Fair
        } else {
            Balance::Poor
        }
    }
}

impl fmt::Display for Balance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Balance::Good => "Good",
            Balance::Fair => "Fair",
            Balance::Poor => "Poor",
        })
    }
}

/// One row of a categorical distribution
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryShare {
    pub name: String,
    pub count: usize,
    /// Percent of the denominator, one decimal
    pub percentage: f64,
    pub adequacy: Adequacy,
}

impl CategoryShare {
    /// The label is derived from the rounded percentage so the two always agree
    pub fn new(name: impl Into<String>, count: usize, denominator: usize) -> Self {
        let percentage = percentage(count, denominator);
        Self {
            name: name.into(),
            count,
            percentage,
            adequacy: Adequacy::from_percentage(percentage),
        }
    }
}

/// `100 * count / total` rounded to one decimal; 0 when total is 0
pub fn percentage(count: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    round_to(100.0 * count as f64 / total as f64, 1)
}

pub(crate) fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

/// Names of the Low-adequacy rows
pub(crate) fn low_adequacy(distribution: &[CategoryShare]) -> Vec<String> {
    distribution
        .iter()
        .filter(|share| share.adequacy == Adequacy::Low)
        .map(|share| share.name.clone())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_percentage() {
        assert_eq!(percentage(0, 0), 0.0);
        assert_eq!(percentage(1, 3), 33.3);
        assert_eq!(percentage(2, 3), 66.7);
        assert_eq!(percentage(3, 3), 100.0);
    }

    #[test]
    fn test_adequacy_thresholds() {
        assert_eq!(Adequacy::from_percentage(20.0), Adequacy::High);
        assert_eq!(Adequacy::from_percentage(19.9), Adequacy::Medium);
        assert_eq!(Adequacy::from_percentage(10.0), Adequacy::Medium);
        assert_eq!(Adequacy::from_percentage(9.9), Adequacy::Low);
        assert_eq!(Adequacy::from_percentage(0.0), Adequacy::Low);
    }

    #[test]
    fn test_adequacy_agrees_with_rounded_share() {
        // 100/501 = 19.96% is reported as 20.0
        let share = CategoryShare::new("Collins", 100, 501);
        assert_eq!(share.percentage, 20.0);
        assert_eq!(share.adequacy, Adequacy::High);
    }

    #[test]
    fn test_balance() {
        assert_eq!(Balance::from_extremes(50.0, 50.0), Balance::Good);
        assert_eq!(Balance::from_extremes(25.0, 75.0), Balance::Fair);
        assert_eq!(Balance::from_extremes(10.0, 90.0), Balance::Poor);
        assert_eq!(Balance::from_extremes(0.0, 0.0), Balance::Poor);
    }
}
