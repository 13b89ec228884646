//! Error types shared across the analysis pipeline.
//!
//! Startup errors (`VocabularyError`, `TaggerError`, `StartupError`) are fatal:
//! the engine is never constructed. `AnalyzeError` is the per-request condition
//! a caller maps to a user-facing message.

use std::path::PathBuf;

use thiserror::Error;

/// Failure while loading a vocabulary table
#[derive(Debug, Error)]
pub enum VocabularyError {
    #[error("failed to read vocabulary file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed vocabulary data: {0}")]
    Csv(#[from] csv::Error),

    #[error("vocabulary data has no column named '{0}'")]
    MissingColumn(String),
}

/// Failure inside a morphological tagger
#[derive(Debug, Error)]
pub enum TaggerError {
    #[error("failed to load tagger dictionary '{uri}': {message}")]
    Dictionary { uri: String, message: String },

    #[error("failed to segment text: {0}")]
    Segment(String),
}

/// Anything that keeps the engine from starting
#[derive(Debug, Error)]
pub enum StartupError {
    #[error(transparent)]
    Vocabulary(#[from] VocabularyError),

    #[error(transparent)]
    Tagger(#[from] TaggerError),
}

/// Per-request analysis failure
#[derive(Debug, Error)]
pub enum AnalyzeError {
    #[error("input text is empty")]
    EmptyInput,

    #[error("text is neither Japanese nor Korean")]
    UnsupportedLanguage,

    #[error(transparent)]
    Tagger(#[from] TaggerError),
}
