//! Vocabulary level lookup for a single token.

use crate::language::Language;
use crate::vocabulary::{strip_homograph_number, VocabularyTable};

/// Canonical dictionary ending of Korean verbs and adjectives
pub const KOREAN_VERB_ENDING: char = '다';

/// Korean tags whose dictionary form ends in `다`
const KOREAN_VERB_TAGS: &[&str] = &["VV", "VA", "VX", "VCP", "VCN"];

const KATAKANA_START: char = '\u{30A1}';
const KATAKANA_END: char = '\u{30F6}';
const KANA_OFFSET: u32 = 0x60;

/// Outcome of a level lookup
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LevelLookup {
    pub level: String,
    pub in_list: bool,
}

impl LevelLookup {
    fn found(level: &str) -> Self {
        Self {
            level: level.to_string(),
            in_list: true,
        }
    }

    fn not_listed(language: Language) -> Self {
        Self {
            level: language.not_listed().to_string(),
            in_list: false,
        }
    }
}

/// Convert katakana to hiragana; everything else is left as is.
pub fn katakana_to_hiragana(text: &str) -> String {
    text.chars()
        .map(|c| {
            if (KATAKANA_START..=KATAKANA_END).contains(&c) {
                char::from_u32(c as u32 - KANA_OFFSET).unwrap_or(c)
            } else {
                c
            }
        })
        .collect()
}

/// Whether a Korean tag belongs to the verb/adjective/copula class
pub fn is_korean_verb_tag(tag: &str) -> bool {
    KOREAN_VERB_TAGS.contains(&tag)
}

/// JLPT lookup.
///
/// Written forms are tried first (base lemma, lemma, surface), then the
/// hiragana reading and the hiragana-normalized lemma against the reading column.
pub fn resolve_japanese(
    table: &VocabularyTable,
    surface: &str,
    base_lemma: &str,
    lemma: &str,
    reading: &str,
) -> LevelLookup {
    let form_hit = [base_lemma, lemma, surface]
        .into_iter()
        .filter(|key| !key.is_empty())
        .find_map(|key| table.form_level(key));
    if let Some(level) = form_hit {
        return LevelLookup::found(level);
    }

    let reading_hit = [katakana_to_hiragana(reading), katakana_to_hiragana(lemma)]
        .iter()
        .filter(|key| !key.is_empty())
        .find_map(|key| table.reading_level(key));
    match reading_hit {
        Some(level) => LevelLookup::found(level),
        None => LevelLookup::not_listed(Language::Japanese),
    }
}

/// Candidate keys for a Korean token, most reliable first
pub fn korean_candidates(surface: &str, lemma: &str, tag: &str) -> Vec<String> {
    let mut candidates = vec![lemma.to_string(), surface.to_string()];

    if is_korean_verb_tag(tag) {
        for key in [lemma, surface] {
            if !key.is_empty() && !key.ends_with(KOREAN_VERB_ENDING) {
                candidates.push(format!("{key}{KOREAN_VERB_ENDING}"));
            }
        }
    }

    candidates.retain(|key| !key.is_empty());
    candidates
}

/// TOPIK lookup.
///
/// Each candidate is probed as is, then without a trailing homograph number,
/// before moving on to the next candidate.
pub fn resolve_korean(table: &VocabularyTable, surface: &str, lemma: &str, tag: &str) -> LevelLookup {
    for key in korean_candidates(surface, lemma, tag) {
        if let Some(level) = table.form_level(&key) {
            return LevelLookup::found(level);
        }
        let stripped = strip_homograph_number(&key);
        if stripped != key {
            if let Some(level) = table.form_level(stripped) {
                return LevelLookup::found(level);
            }
        }
    }

    LevelLookup::not_listed(Language::Korean)
}
