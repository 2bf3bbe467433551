//! Export formats
//!
//! CSV for spreadsheets, a checksummed JSON backup that round-trips through
//! import, and a plain-text bibliography.

mod backup;
mod bibliography;
mod csv;

pub use backup::{entries_checksum, parse_import, to_json_export, ExportMetadata, ImportedData, JsonExport, EXPORT_VERSION};
pub use bibliography::{format_bibliography, Bibliography, CitationStyle, UNKNOWN_SOURCE};
pub use csv::{escape_csv_field, to_csv, CsvExport, CSV_HEADERS};
