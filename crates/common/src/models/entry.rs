//! Literature entry

use std::cmp::Ordering;
use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use unicode_normalization::{char::is_combining_mark, UnicodeNormalization};
use uuid::Uuid;
use validator::{Validate, ValidationError};

use crate::errors::{AppError, Result};

/// Sentinel `domain` value for sources without a power-domain focus
pub const METHODOLOGICAL_DOMAIN: &str = "N/A - Methodological";

/// Unique identifier for an entry
///
/// Opaque string: entries created here get `entry_<uuid>`, imported
/// entries keep whatever id they were exported with.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntryId(String);

impl EntryId {
    /// Create a new random EntryId
    pub fn generate() -> Self {
        Self(format!("entry_{}", Uuid::new_v4().simple()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_blank(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl fmt::Display for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for EntryId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for EntryId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// Relevance of a source to the research question
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Relevance {
    High,
    Medium,
    Low,
}

impl Relevance {
    pub const ALL: [Relevance; 3] = [Relevance::High, Relevance::Medium, Relevance::Low];

    /// Exact, case-sensitive match of the stored label
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "High" => Some(Relevance::High),
            "Medium" => Some(Relevance::Medium),
            "Low" => Some(Relevance::Low),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Relevance::High => "High",
            Relevance::Medium => "Medium",
            Relevance::Low => "Low",
        }
    }
}

impl FromStr for Relevance {
    type Err = AppError;

    /// Case-insensitive, for command-line input
    fn from_str(value: &str) -> Result<Self> {
        let value = value.trim();
        Self::ALL
            .into_iter()
            .find(|level| level.as_str().eq_ignore_ascii_case(value))
            .ok_or_else(|| AppError::InvalidInput {
                message: format!("relevance must be High, Medium or Low, got '{}'", value),
            })
    }
}

impl fmt::Display for Relevance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One literature source with bibliographic and analytic metadata
///
/// Field names serialize in camelCase so data files and JSON backups keep
/// the `dateAdded`/`type` shape users already have on disk.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Entry {
    #[serde(default)]
    pub id: EntryId,

    #[serde(default, deserialize_with = "lenient::text")]
    pub citation: String,

    /// Publication year as entered; may be non-numeric
    #[serde(default, deserialize_with = "lenient::text")]
    pub year: String,

    #[serde(rename = "type", default, deserialize_with = "lenient::text")]
    pub source_type: String,

    /// Theoretical framework tags, in the order they were entered
    #[serde(default, deserialize_with = "lenient::tags")]
    pub framework: Vec<String>,

    #[serde(default, deserialize_with = "lenient::text")]
    pub relevance: String,

    /// Connection to the research question
    #[serde(default, deserialize_with = "lenient::text")]
    pub connection: String,

    /// Key concepts and findings
    #[serde(default, deserialize_with = "lenient::text")]
    pub concepts: String,

    /// Power domain(s) the source speaks to
    #[serde(default, deserialize_with = "lenient::text")]
    pub domain: String,

    #[serde(default, deserialize_with = "lenient::text")]
    pub notes: String,

    /// Page or chapter references
    #[serde(default, deserialize_with = "lenient::text")]
    pub pages: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_added: Option<DateTime<Utc>>,
}

impl Entry {
    /// Numeric publication year, parsed like a leading-integer read:
    /// "2015" and "2015a" give 2015, "n/a" and "" give None.
    pub fn numeric_year(&self) -> Option<i32> {
        parse_leading_int(&self.year)
    }

    /// Trimmed, non-blank framework tags with duplicates removed
    pub fn distinct_frameworks(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        self.framework
            .iter()
            .map(|tag| tag.trim())
            .filter(|tag| !tag.is_empty())
            .filter(|tag| seen.insert(*tag))
            .collect()
    }

    pub fn has_framework(&self, tag: &str) -> bool {
        let tag = tag.trim();
        self.framework.iter().any(|t| t.trim() == tag)
    }

    /// Relevance category, None for anything outside High/Medium/Low
    pub fn relevance_level(&self) -> Option<Relevance> {
        Relevance::parse(&self.relevance)
    }

    /// Whether `domain` carries a power-domain classification
    pub fn has_domain(&self) -> bool {
        let domain = self.domain.trim();
        !domain.is_empty() && self.domain != METHODOLOGICAL_DOMAIN
    }

    /// Required-field check applied to every entry entering the store
    pub fn check_required(&self) -> Result<()> {
        let missing = [
            ("citation", self.citation.trim().is_empty()),
            ("year", self.year.trim().is_empty()),
            ("type", self.source_type.trim().is_empty()),
            ("framework", self.distinct_frameworks().is_empty()),
            ("relevance", self.relevance.trim().is_empty()),
        ]
        .into_iter()
        .find(|(_, missing)| *missing);

        match missing {
            Some((field, _)) => Err(AppError::MissingField {
                field: format!("{} (entry {})", field, self.id),
            }),
            None => Ok(()),
        }
    }
}

/// Fail fast when any entry lacks an id or two entries share one
pub fn check_identities(entries: &[Entry]) -> Result<()> {
    let mut seen = HashSet::with_capacity(entries.len());

    for (index, entry) in entries.iter().enumerate() {
        if entry.id.is_blank() {
            return Err(AppError::InvalidInput {
                message: format!("entry at position {} has no id", index),
            });
        }
        if !seen.insert(entry.id.as_str()) {
            return Err(AppError::DuplicateEntry {
                id: entry.id.to_string(),
            });
        }
    }

    Ok(())
}

/// Locale-style citation ordering: accent- and case-insensitive first, then
/// accents, then exact text so that the order is total and repeatable.
pub fn citation_order(a: &Entry, b: &Entry) -> Ordering {
    compare_text(&a.citation, &b.citation)
}

pub fn compare_text(a: &str, b: &str) -> Ordering {
    collation_key(a)
        .cmp(&collation_key(b))
        .then_with(|| a.to_lowercase().cmp(&b.to_lowercase()))
        .then_with(|| b.cmp(a))
}

/// Lower-cased text with diacritics folded away (NFD, combining marks dropped)
fn collation_key(value: &str) -> String {
    value
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .collect::<String>()
        .to_lowercase()
}

fn parse_leading_int(value: &str) -> Option<i32> {
    let trimmed = value.trim_start();
    let (negative, digits) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };

    let end = digits
        .char_indices()
        .find(|(_, c)| !c.is_ascii_digit())
        .map(|(i, _)| i)
        .unwrap_or(digits.len());

    let number: i32 = digits[..end].parse().ok()?;
    Some(if negative { -number } else { number })
}

/// Input for creating or editing an entry
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct NewEntry {
    #[validate(length(min = 1, max = 2000, message = "citation is required"))]
    pub citation: String,

    #[validate(length(min = 1, max = 32, message = "year is required"))]
    pub year: String,

    #[serde(rename = "type")]
    #[validate(length(min = 1, max = 200, message = "type is required"))]
    pub source_type: String,

    #[validate(custom(function = "validate_framework_tags"))]
    pub framework: Vec<String>,

    #[validate(custom(function = "validate_relevance"))]
    pub relevance: String,

    #[serde(default)]
    pub connection: String,

    #[serde(default)]
    pub concepts: String,

    #[serde(default)]
    pub domain: String,

    #[serde(default)]
    pub notes: String,

    #[serde(default)]
    pub pages: String,
}

impl NewEntry {
    /// Trim every text field and drop blank framework tags
    pub fn normalized(self) -> Self {
        Self {
            citation: self.citation.trim().to_string(),
            year: self.year.trim().to_string(),
            source_type: self.source_type.trim().to_string(),
            framework: self
                .framework
                .into_iter()
                .map(|tag| tag.trim().to_string())
                .filter(|tag| !tag.is_empty())
                .collect(),
            relevance: self.relevance.trim().to_string(),
            connection: self.connection.trim().to_string(),
            concepts: self.concepts.trim().to_string(),
            domain: self.domain.trim().to_string(),
            notes: self.notes.trim().to_string(),
            pages: self.pages.trim().to_string(),
        }
    }

    /// Build a stored entry from validated input
    pub fn into_entry(self, id: EntryId, date_added: Option<DateTime<Utc>>) -> Entry {
        Entry {
            id,
            citation: self.citation,
            year: self.year,
            source_type: self.source_type,
            framework: self.framework,
            relevance: self.relevance,
            connection: self.connection,
            concepts: self.concepts,
            domain: self.domain,
            notes: self.notes,
            pages: self.pages,
            date_added,
        }
    }
}

impl From<&Entry> for NewEntry {
    fn from(entry: &Entry) -> Self {
        Self {
            citation: entry.citation.clone(),
            year: entry.year.clone(),
            source_type: entry.source_type.clone(),
            framework: entry.framework.clone(),
            relevance: entry.relevance.clone(),
            connection: entry.connection.clone(),
            concepts: entry.concepts.clone(),
            domain: entry.domain.clone(),
            notes: entry.notes.clone(),
            pages: entry.pages.clone(),
        }
    }
}

fn validate_framework_tags(tags: &[String]) -> std::result::Result<(), ValidationError> {
    if tags.iter().any(|tag| !tag.trim().is_empty()) {
        Ok(())
    } else {
        let mut err = ValidationError::new("framework");
        err.message = Some("at least one framework tag is required".into());
        Err(err)
    }
}

fn validate_relevance(value: &str) -> std::result::Result<(), ValidationError> {
    if Relevance::parse(value).is_some() {
        Ok(())
    } else {
        let mut err = ValidationError::new("relevance");
        err.message = Some("relevance must be High, Medium or Low".into());
        Err(err)
    }
}

/// Tolerant deserializers for hand-edited or older data files
mod lenient {
    use super::*;
    use serde_json::Value;

    fn value_to_text(value: Value) -> String {
        match value {
            Value::Null => String::new(),
            Value::String(s) => s,
            Value::Number(n) => n.to_string(),
            Value::Bool(b) => b.to_string(),
            other => other.to_string(),
        }
    }

    pub fn text<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(value_to_text(Value::deserialize(deserializer)?))
    }

    /// Accepts a list of tags or a single tag string
    pub fn tags<'de, D>(deserializer: D) -> std::result::Result<Vec<String>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(match Value::deserialize(deserializer)? {
            Value::Array(items) => items.into_iter().map(value_to_text).collect(),
            Value::Null => Vec::new(),
            single => vec![value_to_text(single)],
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn entry(id: &str, citation: &str) -> Entry {
        NewEntry {
            citation: citation.to_string(),
            year: "2017".to_string(),
            source_type: "Theoretical".to_string(),
            framework: vec!["Collins".to_string()],
            relevance: "High".to_string(),
            ..Default::default()
        }
        .into_entry(EntryId::from(id), None)
    }

    #[test]
    fn test_numeric_year() {
        let mut e = entry("a", "x");
        for (raw, expected) in [
            ("2015", Some(2015)),
            (" 2015a", Some(2015)),
            ("n/a", None),
            ("", None),
            ("-300", Some(-300)),
        ] {
            e.year = raw.to_string();
            assert_eq!(e.numeric_year(), expected, "year {:?}", raw);
        }
    }

    #[test]
    fn test_relevance_from_str() {
        assert_eq!("high".parse::<Relevance>().unwrap(), Relevance::High);
        assert_eq!(" Low ".parse::<Relevance>().unwrap(), Relevance::Low);
        assert!("urgent".parse::<Relevance>().is_err());
        assert_eq!(Relevance::parse("high"), None);
    }

    #[test]
    fn test_distinct_frameworks() {
        let mut e = entry("a", "x");
        e.framework = vec![
            "Collins".into(),
            " Collins ".into(),
            "".into(),
            "   ".into(),
            "AsianCrit".into(),
        ];
        assert_eq!(e.distinct_frameworks(), vec!["Collins", "AsianCrit"]);
        assert!(e.has_framework("AsianCrit"));
        assert!(!e.has_framework("MMM"));
    }

    #[test]
    fn test_lenient_deserialization() {
        let e: Entry = serde_json::from_value(json!({
            "id": "sample_0",
            "citation": "Chang, H. (2008). Autoethnography as method",
            "year": 2008,
            "type": "Methodological",
            "framework": "Autoethnography",
            "relevance": "High",
            "domain": null
        }))
        .unwrap();

        assert_eq!(e.year, "2008");
        assert_eq!(e.framework, vec!["Autoethnography".to_string()]);
        assert_eq!(e.domain, "");
        assert!(e.date_added.is_none());
    }

    #[test]
    fn test_serialized_shape() {
        let value = serde_json::to_value(entry("entry_1", "Lee (2009)")).unwrap();
        assert_eq!(value["type"], "Theoretical");
        assert!(value.get("dateAdded").is_none());
        assert!(value.get("source_type").is_none());
    }

    #[test]
    fn test_new_entry_validation() {
        let valid = NewEntry {
            citation: "Collins, P. H. (2017)".into(),
            year: "2017".into(),
            source_type: "Theoretical".into(),
            framework: vec!["Collins".into()],
            relevance: "High".into(),
            ..Default::default()
        };
        assert!(valid.validate().is_ok());

        let mut bad_relevance = valid.clone();
        bad_relevance.relevance = "Very".into();
        let err: AppError = bad_relevance.validate().unwrap_err().into();
        match err {
            AppError::Validation { field, .. } => assert_eq!(field.as_deref(), Some("relevance")),
            other => panic!("unexpected error: {other:?}"),
        }

        let mut no_tags = valid.clone();
        no_tags.framework = vec!["  ".into()];
        assert!(no_tags.validate().is_err());

        let blank_citation = NewEntry {
            citation: "   ".into(),
            ..valid
        }
        .normalized();
        assert!(blank_citation.validate().is_err());
    }

    #[test]
    fn test_check_required() {
        let mut e = entry("a", "x");
        assert!(e.check_required().is_ok());

        e.framework = vec![" ".into()];
        match e.check_required() {
            Err(AppError::MissingField { field }) => assert!(field.starts_with("framework")),
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn test_check_identities() {
        let entries = vec![entry("a", "x"), entry("b", "y")];
        assert!(check_identities(&entries).is_ok());

        let dup = vec![entry("a", "x"), entry("a", "y")];
        assert!(matches!(check_identities(&dup), Err(AppError::DuplicateEntry { .. })));

        let blank = vec![entry(" ", "x")];
        assert!(matches!(check_identities(&blank), Err(AppError::InvalidInput { .. })));
    }

    #[test]
    fn test_citation_order_is_case_insensitive() {
        let mut entries = vec![entry("1", "lee, S."), entry("2", "Chang, H."), entry("3", "Collins, P.")];
        entries.sort_by(citation_order);
        let order: Vec<_> = entries.iter().map(|e| e.citation.as_str()).collect();
        assert_eq!(order, vec!["Chang, H.", "Collins, P.", "lee, S."]);
    }

    #[test]
    fn test_citation_order_folds_accents() {
        let mut entries = vec![
            entry("1", "Zhang, L. (2019)"),
            entry("2", "Özdemir, A. (2020)"),
            entry("3", "Éclair, B. (2018)"),
            entry("4", "Oh, C. (2010)"),
        ];
        entries.sort_by(citation_order);
        let order: Vec<_> = entries.iter().map(|e| e.citation.as_str()).collect();
        assert_eq!(
            order,
            vec!["Éclair, B. (2018)", "Oh, C. (2010)", "Özdemir, A. (2020)", "Zhang, L. (2019)"]
        );

        assert_eq!(compare_text("Unal", "Ünal"), Ordering::Less);
        assert_eq!(compare_text("Ünal", "Ünal"), Ordering::Equal);
    }

    #[test]
    fn test_has_domain() {
        let mut e = entry("a", "x");
        assert!(!e.has_domain());
        e.domain = METHODOLOGICAL_DOMAIN.into();
        assert!(!e.has_domain());
        e.domain = "Cultural, Interpersonal".into();
        assert!(e.has_domain());
    }
}
