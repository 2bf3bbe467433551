//! Domain models
//!
//! Literature entries and the input type used to create them

mod entry;
mod sample;

pub use entry::{
    check_identities, citation_order, compare_text, Entry, EntryId, NewEntry, Relevance,
    METHODOLOGICAL_DOMAIN,
};

pub use sample::sample_entries;
