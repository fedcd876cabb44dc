//! Key to string lookup table loaded from CSV, and a label that displays one entry.
//!
//! The table format is a header row followed by `key,value` rows. Fields may be
//! quoted with `"`; extra columns are ignored.

use std::collections::HashMap;
use std::io::Read;
use std::path::Path;

use crate::error::TextError;

/// Text shown for keys that are not in the table.
pub const DEFAULT_PLACEHOLDER: &str = "MISSING";

/// In-memory key to string table.
#[derive(Debug, Clone)]
pub struct TextLookup {
    entries: HashMap<String, String>,
    placeholder: String,
}

impl Default for TextLookup {
    fn default() -> Self {
        Self {
            entries: HashMap::new(),
            placeholder: DEFAULT_PLACEHOLDER.to_string(),
        }
    }
}

impl TextLookup {
    /// Load a table from a CSV file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, TextError> {
        let path = path.as_ref();
        let file = std::fs::File::open(path).map_err(|e| TextError::io(path, e))?;
        let lookup = Self::from_reader(file)?;
        log::info!(
            "Loaded {} text entries from {}",
            lookup.len(),
            path.display()
        );
        Ok(lookup)
    }

    /// Parse a table from any CSV source.
    ///
    /// Rows with fewer than two fields are skipped. When a key repeats, the first
    /// value is kept and the later row is dropped with a warning.
    pub fn from_reader(reader: impl Read) -> Result<Self, TextError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .delimiter(b',')
            .quote(b'"')
            .has_headers(true)
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(reader);

        let mut lookup = Self::default();

        for (idx, record) in csv_reader.records().enumerate() {
            let record = record?;
            // +2: one for the header, one for 1-based line numbers
            let line = record
                .position()
                .map(|p| p.line())
                .unwrap_or(idx as u64 + 2);

            let (Some(key), Some(value)) = (record.get(0), record.get(1)) else {
                log::warn!("Skipping line {}: expected at least 2 columns", line);
                continue;
            };

            if lookup.entries.contains_key(key) {
                log::warn!("Duplicate key '{}' on line {}, keeping first value", key, line);
                continue;
            }

            lookup.entries.insert(key.to_string(), value.to_string());
        }

        Ok(lookup)
    }

    /// Replace the text returned for missing keys.
    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = placeholder.into();
        self
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    /// Value for `key`, or the placeholder.
    pub fn text(&self, key: &str) -> &str {
        match self.get(key) {
            Some(value) => value,
            None => {
                log::debug!("No text for key '{}'", key);
                self.placeholder.as_str()
            }
        }
    }

    pub fn placeholder(&self) -> &str {
        &self.placeholder
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// A text label bound to one lookup key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextLabel {
    key: String,
    text: String,
}

impl TextLabel {
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            text: String::new(),
        }
    }

    /// Re-read the label's text from `lookup`.
    pub fn refresh(&mut self, lookup: &TextLookup) {
        self.text = lookup.text(&self.key).to_string();
    }

    /// Bind the label to another key and refresh it.
    pub fn set_key(&mut self, key: impl Into<String>, lookup: &TextLookup) {
        self.key = key.into();
        self.refresh(lookup);
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn text(&self) -> &str {
        &self.text
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TABLE: &str = "\
key,value,comment
greeting,Hello there,ignored
quoted,\"Hello, world\",
dup,first
dup,second
lonely
  spaced  ,  padded value
";

    #[test]
    fn test_parses_rows_and_skips_header() {
        let lookup = TextLookup::from_reader(TABLE.as_bytes()).unwrap();
        assert!(!lookup.contains("key"));
        assert_eq!(lookup.get("greeting"), Some("Hello there"));
        assert_eq!(lookup.get("quoted"), Some("Hello, world"));
        assert_eq!(lookup.get("spaced"), Some("padded value"));
    }

    #[test]
    fn test_duplicate_keeps_first() {
        let lookup = TextLookup::from_reader(TABLE.as_bytes()).unwrap();
        assert_eq!(lookup.get("dup"), Some("first"));
    }

    #[test]
    fn test_short_rows_skipped() {
        let lookup = TextLookup::from_reader(TABLE.as_bytes()).unwrap();
        assert!(!lookup.contains("lonely"));
        assert_eq!(lookup.len(), 4);
    }

    #[test]
    fn test_missing_key_placeholder() {
        let lookup = TextLookup::from_reader(TABLE.as_bytes()).unwrap();
        assert_eq!(lookup.text("nope"), DEFAULT_PLACEHOLDER);

        let lookup = lookup.with_placeholder("???");
        assert_eq!(lookup.text("nope"), "???");
        assert_eq!(lookup.text("greeting"), "Hello there");
    }

    #[test]
    fn test_label_follows_key() {
        let lookup = TextLookup::from_reader(TABLE.as_bytes()).unwrap();
        let mut label = TextLabel::new("greeting");
        assert_eq!(label.text(), "");
        label.refresh(&lookup);
        assert_eq!(label.text(), "Hello there");

        label.set_key("absent", &lookup);
        assert_eq!(label.key(), "absent");
        assert_eq!(label.text(), DEFAULT_PLACEHOLDER);
    }

    #[test]
    fn test_empty_table() {
        let lookup = TextLookup::from_reader("key,value\n".as_bytes()).unwrap();
        assert!(lookup.is_empty());
    }
}
