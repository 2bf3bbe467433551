//! Shared argument groups

use clap::{Args, ValueEnum};
use littrack_common::filters::{ExportScope, FilterSet, YearRange};
use littrack_common::models::{NewEntry, Relevance};

/// Entry fields; every flag is optional so the same group serves `add` and `edit`
#[derive(Debug, Clone, Default, Args)]
pub struct EntryArgs {
    /// Full citation text
    #[arg(long)]
    pub citation: Option<String>,

    /// Publication year
    #[arg(long)]
    pub year: Option<String>,

    /// Source type (Theoretical, Empirical, Methodological, Literature Review, ...)
    #[arg(long = "type")]
    pub source_type: Option<String>,

    /// Theoretical framework tags, comma separated or repeated
    #[arg(long, value_delimiter = ',')]
    pub framework: Option<Vec<String>>,

    /// High, Medium or Low
    #[arg(long)]
    pub relevance: Option<Relevance>,

    /// Connection to the research question
    #[arg(long)]
    pub connection: Option<String>,

    /// Key concepts and findings
    #[arg(long)]
    pub concepts: Option<String>,

    /// Domain(s) of power the source speaks to
    #[arg(long)]
    pub domain: Option<String>,

    /// Notes and quotes
    #[arg(long)]
    pub notes: Option<String>,

    /// Page or chapter references
    #[arg(long)]
    pub pages: Option<String>,
}

impl EntryArgs {
    /// Overlay the given flags on `base`
    pub fn apply_to(self, base: NewEntry) -> NewEntry {
        NewEntry {
            citation: self.citation.unwrap_or(base.citation),
            year: self.year.unwrap_or(base.year),
            source_type: self.source_type.unwrap_or(base.source_type),
            framework: self.framework.unwrap_or(base.framework),
            relevance: self
                .relevance
                .map(|r| r.as_str().to_string())
                .unwrap_or(base.relevance),
            connection: self.connection.unwrap_or(base.connection),
            concepts: self.concepts.unwrap_or(base.concepts),
            domain: self.domain.unwrap_or(base.domain),
            notes: self.notes.unwrap_or(base.notes),
            pages: self.pages.unwrap_or(base.pages),
        }
    }
}

#[derive(Debug, Clone, Default, Args)]
pub struct FilterArgs {
    /// Only entries tagged with this framework
    #[arg(long = "filter-framework", value_name = "TAG")]
    pub framework: Option<String>,

    /// Only entries with this relevance
    #[arg(long = "filter-relevance", value_name = "LEVEL")]
    pub relevance: Option<Relevance>,

    /// Only entries of this source type
    #[arg(long = "filter-type", value_name = "TYPE")]
    pub source_type: Option<String>,

    /// Year window: 2020-2025 or before-2000
    #[arg(long = "filter-year", value_name = "RANGE")]
    pub year: Option<YearRange>,

    /// Only entries whose domain mentions this text
    #[arg(long = "filter-domain", value_name = "TEXT")]
    pub domain: Option<String>,

    /// Free-text search across citation, concepts, notes, connection, domain and pages
    #[arg(long, short = 's')]
    pub search: Option<String>,
}

impl From<FilterArgs> for FilterSet {
    fn from(args: FilterArgs) -> Self {
        FilterSet {
            framework: args.framework,
            relevance: args.relevance,
            search: args.search,
            source_type: args.source_type,
            year: args.year,
            domain: args.domain,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum ScopeArg {
    /// Every entry
    #[default]
    All,
    /// Entries matching the filter flags
    Filtered,
    /// High-relevance entries only
    High,
}

impl From<ScopeArg> for ExportScope {
    fn from(scope: ScopeArg) -> Self {
        match scope {
            ScopeArg::All => ExportScope::All,
            ScopeArg::Filtered => ExportScope::Filtered,
            ScopeArg::High => ExportScope::HighRelevance,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ExportFormat {
    Csv,
    Json,
}
