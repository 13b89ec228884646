//! Static vocabulary tables (JLPT / TOPIK word lists).
//!
//! Tables are loaded once from CSV at startup and are read-only afterwards.

use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::VocabularyError;

/// Column layout of a vocabulary CSV file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VocabularySchema {
    /// Column holding the written form
    pub word_column: String,

    /// Column holding a hiragana reading, if the list has one
    #[serde(default)]
    pub reading_column: Option<String>,

    /// Column holding the proficiency level
    pub level_column: String,

    /// Level values meaning "not part of the test"
    #[serde(default)]
    pub excluded_levels: Vec<String>,

    /// Also register `word02` under `word`
    #[serde(default)]
    pub homograph_aliases: bool,
}

impl VocabularySchema {
    /// Layout of the Naver JLPT export
    pub fn jlpt() -> Self {
        Self {
            word_column: "한자표기".to_string(),
            reading_column: Some("읽기(히라가나)".to_string()),
            level_column: "JLPT레벨".to_string(),
            excluded_levels: vec!["外".to_string()],
            homograph_aliases: false,
        }
    }

    /// Layout of the TOPIK vocabulary list
    pub fn topik() -> Self {
        Self {
            word_column: "어휘".to_string(),
            reading_column: None,
            level_column: "레벨".to_string(),
            excluded_levels: Vec::new(),
            homograph_aliases: true,
        }
    }
}

/// Word-form to level mapping
#[derive(Debug, Clone, Default)]
pub struct VocabularyTable {
    forms: HashMap<String, String>,
    readings: HashMap<String, String>,
}

impl VocabularyTable {
    /// Load a table from a CSV file
    pub fn load(path: &Path, schema: &VocabularySchema) -> Result<Self, VocabularyError> {
        let file = File::open(path).map_err(|source| VocabularyError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let table = Self::from_reader(file, schema)?;
        tracing::info!(
            "Loaded vocabulary {} ({} entries)",
            path.display(),
            table.len()
        );
        Ok(table)
    }

    /// Load a table from any CSV source with a header row
    pub fn from_reader<R: Read>(reader: R, schema: &VocabularySchema) -> Result<Self, VocabularyError> {
        let mut rdr = csv::ReaderBuilder::new()
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(reader);

        let headers = rdr.headers()?.clone();
        let column = |name: &str| {
            headers
                .iter()
                .position(|h| h.trim_start_matches('\u{feff}').trim() == name)
                .ok_or_else(|| VocabularyError::MissingColumn(name.to_string()))
        };
        let word_idx = column(&schema.word_column)?;
        let level_idx = column(&schema.level_column)?;
        let reading_idx = schema.reading_column.as_deref().map(column).transpose()?;

        let mut table = Self::default();
        let mut skipped = 0usize;

        for record in rdr.records() {
            let record = record?;
            let level = record.get(level_idx).unwrap_or("");
            if level.is_empty() || schema.excluded_levels.iter().any(|l| l == level) {
                skipped += 1;
                continue;
            }

            let word = record.get(word_idx).unwrap_or("");
            let reading = reading_idx.and_then(|i| record.get(i)).unwrap_or("");
            if word.is_empty() && reading.is_empty() {
                skipped += 1;
                continue;
            }

            if !word.is_empty() {
                table.insert_form(word, level, schema.homograph_aliases);
            }
            if !reading.is_empty() {
                table.readings.insert(reading.to_string(), level.to_string());
            }
        }

        if skipped > 0 {
            tracing::debug!("Skipped {} vocabulary rows without word or level", skipped);
        }

        Ok(table)
    }

    fn insert_form(&mut self, word: &str, level: &str, homograph_aliases: bool) {
        self.forms.insert(word.to_string(), level.to_string());

        if homograph_aliases {
            let stripped = strip_homograph_number(word);
            if stripped != word && !stripped.is_empty() {
                self.forms
                    .entry(stripped.to_string())
                    .or_insert_with(|| level.to_string());
            }
        }
    }

    /// Level of a written form
    pub fn form_level(&self, form: &str) -> Option<&str> {
        self.forms.get(form).map(String::as_str)
    }

    /// Level of a hiragana reading
    pub fn reading_level(&self, reading: &str) -> Option<&str> {
        self.readings.get(reading).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.forms.len() + self.readings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.forms.is_empty() && self.readings.is_empty()
    }
}

/// Drop the disambiguating number from a homograph entry (`가격02` → `가격`)
pub fn strip_homograph_number(word: &str) -> &str {
    word.trim_end_matches(|c: char| c.is_ascii_digit())
}
