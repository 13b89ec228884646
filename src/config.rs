//! Configuration management for VocaLevel
//!
//! Handles loading and parsing of the `vocalevel.toml` configuration file.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::language::Language;
use crate::vocabulary::VocabularySchema;

const JLPT_CSV: &str = "JLPT_level/JLPT-level_naver.csv";
const TOPIK_CSV: &str = "TOPIC_level/topik_vocabulary_all_levels.csv";

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Base directory for relative vocabulary paths
    #[serde(default)]
    pub data_dir: Option<PathBuf>,

    /// Japanese tagger and JLPT list
    #[serde(default)]
    pub japanese: LanguageConfig,

    /// Korean tagger and TOPIK list
    #[serde(default)]
    pub korean: LanguageConfig,
}

/// Per-language settings. Unset fields fall back to the language defaults.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct LanguageConfig {
    /// Lindera dictionary URI (e.g. "embedded://unidic") or directory
    #[serde(default)]
    pub dictionary: Option<String>,

    /// Lindera user dictionary (CSV or compiled)
    #[serde(default)]
    pub user_dictionary: Option<String>,

    /// Vocabulary CSV file
    #[serde(default)]
    pub vocabulary: Option<PathBuf>,

    /// Vocabulary CSV column layout
    #[serde(default)]
    pub columns: Option<VocabularySchema>,
}

impl Config {
    /// Load configuration from file
    pub fn load(path: &Path) -> Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            let config: Config = toml::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Config::default())
        }
    }

    /// Get default config file path
    pub fn default_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("", "", "vocalevel").map(|dirs| dirs.config_dir().join("vocalevel.toml"))
    }

    /// Load configuration from default path or workspace
    pub fn load_from_default() -> Self {
        // Try workspace path first
        let workspace_path = PathBuf::from("vocalevel.toml");
        if workspace_path.exists() {
            match Self::load(&workspace_path) {
                Ok(config) => return config,
                Err(e) => tracing::warn!("Ignoring {}: {}", workspace_path.display(), e),
            }
        }

        // Try user config directory
        if let Some(default_path) = Self::default_path() {
            if let Ok(config) = Self::load(&default_path) {
                return config;
            }
        }

        Config::default()
    }

    /// Apply environment overrides through `lookup` (normally `std::env::var`)
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        if let Some(dic) = var("JP_DIC_PATH") {
            self.japanese.dictionary = Some(dic);
        }
        if let Some(dic) = var("KR_DIC_PATH") {
            self.korean.dictionary = Some(dic);
        }
        if let Some(csv) = var("JLPT_CSV") {
            self.japanese.vocabulary = Some(PathBuf::from(csv));
        }
        if let Some(csv) = var("TOPIK_CSV") {
            self.korean.vocabulary = Some(PathBuf::from(csv));
        }
    }

    fn language(&self, language: Language) -> &LanguageConfig {
        match language {
            Language::Japanese => &self.japanese,
            Language::Korean => &self.korean,
        }
    }

    /// Get the effective tagger dictionary
    pub fn dictionary(&self, language: Language) -> String {
        self.language(language)
            .dictionary
            .clone()
            .unwrap_or_else(|| match language {
                Language::Japanese => "embedded://unidic".to_string(),
                Language::Korean => "embedded://ko-dic".to_string(),
            })
    }

    pub fn user_dictionary(&self, language: Language) -> Option<&str> {
        self.language(language).user_dictionary.as_deref()
    }

    /// Get the effective vocabulary file, resolved against `data_dir`
    pub fn vocabulary_path(&self, language: Language) -> PathBuf {
        let path = self
            .language(language)
            .vocabulary
            .clone()
            .unwrap_or_else(|| match language {
                Language::Japanese => PathBuf::from(JLPT_CSV),
                Language::Korean => PathBuf::from(TOPIK_CSV),
            });

        match &self.data_dir {
            Some(dir) if path.is_relative() => dir.join(path),
            _ => path,
        }
    }

    /// Get the effective vocabulary column layout
    pub fn vocabulary_schema(&self, language: Language) -> VocabularySchema {
        self.language(language)
            .columns
            .clone()
            .unwrap_or_else(|| match language {
                Language::Japanese => VocabularySchema::jlpt(),
                Language::Korean => VocabularySchema::topik(),
            })
    }
}
