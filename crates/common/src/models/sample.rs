//! Built-in sample entries used to seed an empty tracker

use super::entry::{Entry, EntryId};

struct SampleSource {
    citation: &'static str,
    year: &'static str,
    source_type: &'static str,
    framework: &'static [&'static str],
    relevance: &'static str,
    connection: &'static str,
    concepts: &'static str,
    domain: &'static str,
    notes: &'static str,
    pages: &'static str,
}

const SAMPLE_SOURCES: &[SampleSource] = &[
    SampleSource {
        citation: "Collins, P. H. (2017). On intellectual activism",
        year: "2017",
        source_type: "Theoretical",
        framework: &["Collins", "Intersectionality"],
        relevance: "High",
        connection: "Provides core theoretical framework for analyzing power domains affecting 'solid middle' Asian Americans",
        concepts: "Domains of power framework; structural, disciplinary, cultural, interpersonal dimensions",
        domain: "All domains - foundational framework",
        notes: "\"How specific combinations of systems of oppression mean in reality\" - directly cited in proposal",
        pages: "Ch. 2-3",
    },
    SampleSource {
        citation: "Lee, S. J. (2009). Unraveling the 'model minority' stereotype",
        year: "2009",
        source_type: "Empirical",
        framework: &["MMM", "AsianCrit"],
        relevance: "High",
        connection: "Examines model minority impacts on Asian American students - parallel to professional contexts",
        concepts: "Academic pressure, psychological impacts, achievement expectations",
        domain: "Cultural, Interpersonal",
        notes: "Documents experiences of students who don't meet exceptional standards - directly relevant to 'solid middle'",
        pages: "pp. 45-67",
    },
    SampleSource {
        citation: "Chang, H. (2008). Autoethnography as method",
        year: "2008",
        source_type: "Methodological",
        framework: &["Autoethnography"],
        relevance: "High",
        connection: "Provides methodological foundation for multi-modal autoethnographic approach",
        concepts: "Critical autoethnography, layered accounts, analytical rigor",
        domain: "N/A - Methodological",
        notes: "Essential for methodology chapter - addresses scholarly rigor concerns",
        pages: "Ch. 4, pp. 89-112",
    },
];

/// Sample entries with ids `sample_0`, `sample_1`, ...
pub fn sample_entries() -> Vec<Entry> {
    SAMPLE_SOURCES
        .iter()
        .enumerate()
        .map(|(index, s)| Entry {
            id: EntryId::from(format!("sample_{}", index)),
            citation: s.citation.to_string(),
            year: s.year.to_string(),
            source_type: s.source_type.to_string(),
            framework: s.framework.iter().map(|t| t.to_string()).collect(),
            relevance: s.relevance.to_string(),
            connection: s.connection.to_string(),
            concepts: s.concepts.to_string(),
            domain: s.domain.to_string(),
            notes: s.notes.to_string(),
            pages: s.pages.to_string(),
            date_added: None,
        })
        .collect()
}
