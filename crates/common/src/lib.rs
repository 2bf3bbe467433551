//! LitTrack Common Library
//!
//! Shared code for the LitTrack crates including:
//! - Entry model and the in-memory entry store
//! - Local JSON persistence
//! - Filtering and search
//! - CSV, JSON backup and bibliography export
//! - Error types and handling
//! - Configuration management
//! - Metrics and observability

pub mod config;
pub mod errors;
pub mod export;
pub mod filters;
pub mod metrics;
pub mod models;
pub mod storage;
pub mod store;

// Re-export commonly used types
pub use config::AppConfig;
pub use errors::{AppError, Result};
pub use filters::{ExportScope, FilterSet, YearRange};
pub use models::{Entry, EntryId, NewEntry, Relevance};
pub use storage::{JsonFileStorage, StoreBackend};
pub use store::EntryStore;

/// Application version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Tool name written into exports
pub const TOOL_NAME: &str = "LitTrack - Literature Review Tracker";
