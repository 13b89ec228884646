//! VocaLevel - JLPT / TOPIK vocabulary level classifier
//!
//! Segments Japanese or Korean text with a morphological tagger and reports the
//! proficiency level of every content word.

pub mod analyzer;
pub mod config;
pub mod engine;
pub mod error;
pub mod language;
pub mod resolver;
pub mod stats;
pub mod tagger;
pub mod tagset;
pub mod vocabulary;

pub use analyzer::{Analyzer, JapaneseAnalyzer, KoreanAnalyzer, Token};
pub use config::Config;
pub use engine::{Analysis, Engine};
pub use error::{AnalyzeError, StartupError, TaggerError, VocabularyError};
pub use language::{detect_language, Language, LanguageHint};
pub use stats::{aggregate, Statistics};
