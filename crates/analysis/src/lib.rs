//! LitTrack Analysis Engine
//!
//! Pure functions over an entry collection:
//! - Distributions by framework, power domain, source type, relevance and year
//! - Research gap rules with severity and recommended action
//! - Gap analysis and citation reports
//!
//! Nothing here performs I/O or mutates its input. The current time is
//! always passed in so reports are reproducible.

pub mod aggregate;
pub mod gaps;
pub mod report;

pub use aggregate::{Adequacy, Balance, CategoryShare};
pub use gaps::{GapFinding, GapRule, RuleSet, Severity};
pub use report::{CitationReport, GapAnalysisReport};
