//! In-memory entry store
//!
//! Single source of truth for the entry collection while a command runs.
//! Every mutation goes through validation; analysis reads the collection
//! as an immutable slice.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::errors::{AppError, Result};
use crate::metrics;
use crate::models::{check_identities, sample_entries, Entry, EntryId, NewEntry, Relevance};

/// Headline counts shown alongside the entry table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreSummary {
    pub total: usize,
    pub high_relevance: usize,
    pub theoretical: usize,
    pub empirical: usize,
}

/// Ordered, validated collection of entries plus the research question
#[derive(Debug, Clone, Default)]
pub struct EntryStore {
    entries: Vec<Entry>,
    research_question: Option<String>,
}

impl EntryStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store from previously persisted or imported entries
    pub fn from_entries(entries: Vec<Entry>) -> Result<Self> {
        validate_collection(&entries)?;
        Ok(Self {
            entries,
            research_question: None,
        })
    }

    pub fn with_research_question(mut self, question: Option<String>) -> Self {
        self.set_research_question(question);
        self
    }

    // ========================================================================
    // Reads
    // ========================================================================

    /// Snapshot of all entries in insertion order
    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Find entry by ID
    pub fn get(&self, id: &EntryId) -> Option<&Entry> {
        self.entries.iter().find(|e| &e.id == id)
    }

    pub fn research_question(&self) -> Option<&str> {
        self.research_question.as_deref()
    }

    pub fn summary(&self) -> StoreSummary {
        StoreSummary {
            total: self.entries.len(),
            high_relevance: self
                .entries
                .iter()
                .filter(|e| e.relevance_level() == Some(Relevance::High))
                .count(),
            theoretical: self.count_type("Theoretical"),
            empirical: self.count_type("Empirical"),
        }
    }

    fn count_type(&self, source_type: &str) -> usize {
        self.entries
            .iter()
            .filter(|e| e.source_type == source_type)
            .count()
    }

    // ========================================================================
    // Mutations
    // ========================================================================

    /// Validate and append a new entry
    pub fn add(&mut self, input: NewEntry) -> Result<&Entry> {
        let input = input.normalized();
        input.validate()?;

        let entry = input.into_entry(EntryId::generate(), Some(Utc::now()));
        tracing::info!(entry_id = %entry.id, citation = %entry.citation, "Entry added");
        metrics::record_entries_added(1);

        self.entries.push(entry);
        let index = self.entries.len() - 1;
        Ok(&self.entries[index])
    }

    /// Replace the editable fields of an entry, keeping its id and creation time
    pub fn update(&mut self, id: &EntryId, input: NewEntry) -> Result<&Entry> {
        let input = input.normalized();
        input.validate()?;

        let index = self.position(id)?;
        let date_added = self.entries[index].date_added;
        self.entries[index] = input.into_entry(id.clone(), date_added);

        tracing::info!(entry_id = %id, "Entry updated");
        Ok(&self.entries[index])
    }

    /// Delete an entry
    pub fn remove(&mut self, id: &EntryId) -> Result<Entry> {
        let index = self.position(id)?;
        let removed = self.entries.remove(index);

        tracing::info!(entry_id = %id, "Entry deleted");
        metrics::record_entries_removed(1);
        Ok(removed)
    }

    /// Swap in an imported collection; the current entries survive a failed import
    pub fn replace_all(&mut self, entries: Vec<Entry>) -> Result<usize> {
        validate_collection(&entries)?;

        let count = entries.len();
        self.entries = entries;

        tracing::info!(count, "Entries imported");
        metrics::record_import(count);
        Ok(count)
    }

    /// Append the built-in sample entries that are not already present
    pub fn load_sample(&mut self) -> usize {
        let mut added = 0;
        for sample in sample_entries() {
            if self.get(&sample.id).is_none() {
                self.entries.push(sample);
                added += 1;
            }
        }
        tracing::info!(added, "Sample entries loaded");
        added
    }

    pub fn set_research_question(&mut self, question: Option<String>) {
        self.research_question = question
            .map(|q| q.trim().to_string())
            .filter(|q| !q.is_empty());
    }

    fn position(&self, id: &EntryId) -> Result<usize> {
        self.entries
            .iter()
            .position(|e| &e.id == id)
            .ok_or_else(|| AppError::EntryNotFound { id: id.to_string() })
    }
}

/// Required fields and unique ids, applied to created and imported entries alike
fn validate_collection(entries: &[Entry]) -> Result<()> {
    check_identities(entries)?;
    for entry in entries {
        entry.check_required()?;
    }
    Ok(())
}
