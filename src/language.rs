//! Language identification by script counting.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Sentinel reported as `max_level` when no listed word was found
pub const NO_LEVEL: &str = "—";

const JLPT_ORDER: &[&str] = &["N5", "N4", "N3", "N2", "N1"];
const TOPIK_ORDER: &[&str] = &["1급", "2급", "3급", "4급", "5급", "6급"];

/// A supported analysis language
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Language {
    #[serde(rename = "ja")]
    Japanese,
    #[serde(rename = "ko")]
    Korean,
}

impl Language {
    /// ISO 639-1 code
    pub fn code(&self) -> &'static str {
        match self {
            Language::Japanese => "ja",
            Language::Korean => "ko",
        }
    }

    /// Proficiency levels from easiest to hardest
    pub fn level_order(&self) -> &'static [&'static str] {
        match self {
            Language::Japanese => JLPT_ORDER,
            Language::Korean => TOPIK_ORDER,
        }
    }

    /// Rank of `level` within `level_order`, if it is a real level
    pub fn level_rank(&self, level: &str) -> Option<usize> {
        self.level_order().iter().position(|l| *l == level)
    }

    /// Level reported for content words missing from the vocabulary table
    pub fn not_listed(&self) -> &'static str {
        match self {
            Language::Japanese => "未登録",
            Language::Korean => "미등재",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Caller's language preference
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LanguageHint {
    #[default]
    Auto,
    Forced(Language),
}

impl LanguageHint {
    /// Parse a hint string. Unrecognized values fall back to `Auto`.
    pub fn parse(hint: &str) -> Self {
        match hint.trim().to_lowercase().as_str() {
            "ja" | "jp" => LanguageHint::Forced(Language::Japanese),
            "ko" | "kr" => LanguageHint::Forced(Language::Korean),
            _ => LanguageHint::Auto,
        }
    }

    /// Resolve against the text; an explicit language always wins.
    pub fn resolve(&self, text: &str) -> Option<Language> {
        match self {
            LanguageHint::Forced(language) => Some(*language),
            LanguageHint::Auto => detect_language(text),
        }
    }
}

fn is_japanese_char(c: char) -> bool {
    matches!(c, '\u{3040}'..='\u{30FF}' | '\u{4E00}'..='\u{9FFF}')
}

fn is_korean_char(c: char) -> bool {
    matches!(c, '\u{AC00}'..='\u{D7A3}' | '\u{3130}'..='\u{318F}')
}

/// Detect whether `text` is Japanese or Korean.
///
/// Counts kana/CJK characters against Hangul syllables and compatibility jamo.
/// Returns `None` when neither script appears; ties go to Japanese.
pub fn detect_language(text: &str) -> Option<Language> {
    let (ja, ko) = text.chars().fold((0usize, 0usize), |(ja, ko), c| {
        if is_japanese_char(c) {
            (ja + 1, ko)
        } else if is_korean_char(c) {
            (ja, ko + 1)
        } else {
            (ja, ko)
        }
    });

    if ja == 0 && ko == 0 {
        None
    } else if ja >= ko {
        Some(Language::Japanese)
    } else {
        Some(Language::Korean)
    }
}
