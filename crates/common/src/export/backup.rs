//! JSON backup and import

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::errors::{AppError, Result};
use crate::metrics;
use crate::models::Entry;
use crate::TOOL_NAME;

pub const EXPORT_VERSION: &str = "1.0";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportMetadata {
    pub version: String,

    #[serde(default = "Utc::now")]
    pub exported: DateTime<Utc>,

    #[serde(default)]
    pub tool: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub research_question: Option<String>,

    #[serde(default)]
    pub count: usize,

    /// Hex SHA-256 of the compact JSON encoding of `entries`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub checksum: Option<String>,
}

/// Backup document
#[derive(Debug, Clone, Serialize)]
pub struct JsonExport<'a> {
    pub metadata: ExportMetadata,
    pub entries: Vec<&'a Entry>,
}

/// Result of reading a backup or data file
#[derive(Debug, Clone)]
pub struct ImportedData {
    pub entries: Vec<Entry>,
    pub research_question: Option<String>,
}

/// Either a backup (`metadata` + `entries`) or a storage document
/// (`entries` + `researchQuestion`)
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ImportDocument {
    #[serde(default)]
    metadata: Option<ExportMetadata>,
    entries: Vec<Entry>,
    #[serde(default)]
    research_question: Option<String>,
}

pub fn entries_checksum<E: Serialize>(entries: &[E]) -> Result<String> {
    let encoded = serde_json::to_vec(entries)?;
    let mut hasher = Sha256::new();
    hasher.update(&encoded);
    Ok(hex::encode(hasher.finalize()))
}

/// Build the backup document for the given entries
pub fn to_json_export<'a>(
    entries: Vec<&'a Entry>,
    research_question: Option<&str>,
    now: DateTime<Utc>,
) -> Result<JsonExport<'a>> {
    let checksum = entries_checksum(&entries)?;
    metrics::record_export("json", entries.len());

    Ok(JsonExport {
        metadata: ExportMetadata {
            version: EXPORT_VERSION.to_string(),
            exported: now,
            tool: TOOL_NAME.to_string(),
            research_question: research_question.map(str::to_string),
            count: entries.len(),
            checksum: Some(checksum),
        },
        entries,
    })
}

/// Parse an import file, verifying the backup checksum when one is present
pub fn parse_import(text: &str) -> Result<ImportedData> {
    let document: ImportDocument = serde_json::from_str(text).map_err(|e| AppError::InvalidFormat {
        message: format!("expected a JSON object with an entries array: {}", e),
    })?;

    let mut research_question = document.research_question;

    if let Some(metadata) = document.metadata {
        if let Some(expected) = metadata.checksum {
            let actual = entries_checksum(&document.entries)?;
            if actual != expected {
                tracing::warn!(%expected, %actual, "Backup checksum mismatch");
                return Err(AppError::ChecksumMismatch { expected, actual });
            }
        }
        research_question = research_question.or(metadata.research_question);
    }

    tracing::debug!(entries = document.entries.len(), "Import parsed");
    Ok(ImportedData {
        entries: document.entries,
        research_question,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::sample_entries;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 1, 9, 30, 0).unwrap()
    }

    #[test]
    fn test_backup_round_trip() {
        let mut entries = sample_entries();
        entries[0].date_added = Some(Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap());

        let export = to_json_export(entries.iter().collect(), Some("Why?"), now()).unwrap();
        assert_eq!(export.metadata.count, 3);
        assert_eq!(export.metadata.version, "1.0");

        let text = serde_json::to_string_pretty(&export).unwrap();
        let imported = parse_import(&text).unwrap();
        assert_eq!(imported.entries, entries);
        assert_eq!(imported.research_question.as_deref(), Some("Why?"));
    }

    #[test]
    fn test_tampered_backup_is_rejected() {
        let entries = sample_entries();
        let export = to_json_export(entries.iter().collect(), None, now()).unwrap();

        let mut value = serde_json::to_value(&export).unwrap();
        value["entries"][0]["relevance"] = "Low".into();

        let err = parse_import(&value.to_string()).unwrap_err();
        assert!(matches!(err, AppError::ChecksumMismatch { .. }));
    }

    #[test]
    fn test_backup_without_checksum() {
        let text = r#"{
            "metadata": {"version": "1.0", "exported": "2024-05-01T10:00:00.000Z", "tool": "Literature Review Tracker"},
            "entries": [{"id": "entry_1", "citation": "Wu (2002)", "year": 2002, "type": "Theoretical", "framework": "AsianCrit", "relevance": "High"}]
        }"#;
        let imported = parse_import(text).unwrap();
        assert_eq!(imported.entries.len(), 1);
        assert_eq!(imported.entries[0].year, "2002");
    }

    #[test]
    fn test_storage_document_is_accepted() {
        let text = r#"{"entries": [], "lastSaved": "2024-05-01T10:00:00Z", "researchQuestion": "How?"}"#;
        let imported = parse_import(text).unwrap();
        assert!(imported.entries.is_empty());
        assert_eq!(imported.research_question.as_deref(), Some("How?"));
    }

    #[test]
    fn test_missing_entries_is_invalid_format() {
        let err = parse_import(r#"{"rows": []}"#).unwrap_err();
        assert!(matches!(err, AppError::InvalidFormat { .. }));
        assert!(matches!(parse_import("not json"), Err(AppError::InvalidFormat { .. })));
    }
}
