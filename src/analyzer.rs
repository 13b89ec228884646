use std::sync::{Arc, Mutex, MutexGuard};

use serde::{Deserialize, Serialize};

use crate::error::TaggerError;
use crate::language::Language;
use crate::resolver::{katakana_to_hiragana, resolve_japanese, resolve_korean, LevelLookup};
use crate::tagger::{Morpheme, Tagger};
use crate::tagset::{TagClass, TagClassifier};
use crate::vocabulary::VocabularyTable;

/// Classified token
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    /// Surface form (表層形)
    pub surface: String,
    /// Reading in hiragana, empty when unavailable
    pub reading: String,
    /// Dictionary form, falls back to the surface
    pub base_form: String,
    /// Display part-of-speech label
    pub pos: String,
    /// Proficiency level, the POS label for grammar tokens, or the not-listed sentinel
    pub level: String,
    /// `level` came from the vocabulary table
    pub in_list: bool,
    /// Particle, ending, symbol, ...
    pub is_grammar: bool,
}

impl Token {
    fn new(morpheme: &Morpheme, class: TagClass, lookup: Option<LevelLookup>, reading: String, base_form: String) -> Self {
        let (level, in_list) = match lookup {
            Some(lookup) => (lookup.level, lookup.in_list),
            None => (class.label.clone(), false),
        };

        Self {
            surface: morpheme.surface.clone(),
            reading,
            base_form,
            pos: class.label,
            level,
            in_list,
            is_grammar: class.is_grammar,
        }
    }
}

/// Per-language analysis pipeline
pub trait Analyzer: Send + Sync {
    fn language(&self) -> Language;

    /// Segment and classify `text`
    fn analyze(&self, text: &str) -> Result<Vec<Token>, TaggerError>;
}

/// Tagger confined to one caller at a time
struct TaggerSlot {
    tagger: Mutex<Box<dyn Tagger>>,
}

impl TaggerSlot {
    fn new(tagger: Box<dyn Tagger>) -> Self {
        Self {
            tagger: Mutex::new(tagger),
        }
    }

    fn checkout(&self) -> MutexGuard<'_, Box<dyn Tagger>> {
        // Taggers keep no per-call state, so a poisoned lock is still usable
        self.tagger.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn segment(&self, text: &str) -> Result<Vec<Morpheme>, TaggerError> {
        let tagger = self.checkout();
        let morphemes = tagger.segment(text)?;
        tracing::debug!("{} produced {} segments", tagger.name(), morphemes.len());
        Ok(morphemes)
    }
}

fn non_empty_or<'a>(value: &'a str, fallback: &'a str) -> &'a str {
    if value.is_empty() {
        fallback
    } else {
        value
    }
}

/// JLPT analyzer
pub struct JapaneseAnalyzer {
    tagger: TaggerSlot,
    vocabulary: Arc<VocabularyTable>,
    classifier: TagClassifier,
}

impl JapaneseAnalyzer {
    pub fn new(tagger: Box<dyn Tagger>, vocabulary: Arc<VocabularyTable>) -> Self {
        Self {
            tagger: TaggerSlot::new(tagger),
            vocabulary,
            classifier: TagClassifier::japanese(),
        }
    }

    fn classify(&self, morpheme: &Morpheme) -> Token {
        let class = self.classifier.classify(&morpheme.tag);
        let lookup = (!class.is_grammar).then(|| {
            resolve_japanese(
                &self.vocabulary,
                &morpheme.surface,
                &morpheme.base_lemma,
                &morpheme.lemma,
                &morpheme.reading,
            )
        });
        let reading = katakana_to_hiragana(&morpheme.reading);
        let base_form = non_empty_or(&morpheme.base_lemma, &morpheme.surface).to_string();

        Token::new(morpheme, class, lookup, reading, base_form)
    }
}

impl Analyzer for JapaneseAnalyzer {
    fn language(&self) -> Language {
        Language::Japanese
    }

    fn analyze(&self, text: &str) -> Result<Vec<Token>, TaggerError> {
        Ok(self
            .tagger
            .segment(text)?
            .iter()
            .filter(|m| !m.surface.is_empty())
            .map(|m| self.classify(m))
            .collect())
    }
}

/// TOPIK analyzer
pub struct KoreanAnalyzer {
    tagger: TaggerSlot,
    vocabulary: Arc<VocabularyTable>,
    classifier: TagClassifier,
}

impl KoreanAnalyzer {
    pub fn new(tagger: Box<dyn Tagger>, vocabulary: Arc<VocabularyTable>) -> Self {
        Self {
            tagger: TaggerSlot::new(tagger),
            vocabulary,
            classifier: TagClassifier::korean(),
        }
    }

    fn classify(&self, morpheme: &Morpheme) -> Token {
        let class = self.classifier.classify(&morpheme.tag);
        let lookup = (!class.is_grammar).then(|| {
            resolve_korean(&self.vocabulary, &morpheme.surface, &morpheme.lemma, &class.primary)
        });
        let base_form = non_empty_or(&morpheme.lemma, &morpheme.surface).to_string();

        Token::new(morpheme, class, lookup, String::new(), base_form)
    }
}

impl Analyzer for KoreanAnalyzer {
    fn language(&self) -> Language {
        Language::Korean
    }

    fn analyze(&self, text: &str) -> Result<Vec<Token>, TaggerError> {
        Ok(self
            .tagger
            .segment(text)?
            .iter()
            .filter(|m| !m.surface.is_empty())
            .map(|m| self.classify(m))
            .collect())
    }
}
