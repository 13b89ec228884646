//! Part-of-speech tag classification.
//!
//! Maps raw tagger codes to a display label and decides whether a token is
//! grammatical (never looked up) or a content word.

use std::collections::{HashMap, HashSet};

/// Separator between fused morphemes in a compound tag (`VCP+EF`)
pub const COMPOUND_SEPARATOR: char = '+';

const JAPANESE_GRAMMAR: &[&str] = &["助詞", "助動詞", "接続詞", "感動詞", "記号", "補助記号", "空白"];

const JAPANESE_LABELS: &[(&str, &str)] = &[
    ("名詞", "명사"),
    ("動詞", "동사"),
    ("形容詞", "형용사"),
    ("副詞", "부사"),
    ("助詞", "조사"),
    ("助動詞", "조동사"),
    ("接続詞", "접속사"),
    ("感動詞", "감탄사"),
    ("記号", "기호"),
    ("補助記号", "기호"),
    ("接尾辞", "접미사"),
    ("接頭辞", "접두사"),
];

const KOREAN_GRAMMAR: &[&str] = &[
    // particles
    "JKS", "JKC", "JKG", "JKO", "JKB", "JKV", "JKQ", "JX", "JC",
    // endings
    "EC", "EF", "EP", "ETM", "ETN",
    // affixes and roots
    "XPN", "XSN", "XSV", "XSA", "XR",
    // symbols
    "SF", "SP", "SS", "SE", "SO", "SW", "SY",
    // unanalyzable
    "NF", "NV", "NA",
];

const KOREAN_LABELS: &[(&str, &str)] = &[
    ("NNG", "명사"),
    ("NNP", "고유명사"),
    ("NNB", "의존명사"),
    ("NP", "대명사"),
    ("NR", "수사"),
    ("VV", "동사"),
    ("VA", "형용사"),
    ("VX", "보조용언"),
    ("VCP", "지정사"),
    ("VCN", "지정사"),
    ("MAG", "부사"),
    ("MAJ", "접속부사"),
    ("MM", "관형사"),
    ("IC", "감탄사"),
    ("JKS", "조사"),
    ("JKC", "조사"),
    ("JKG", "조사"),
    ("JKO", "조사"),
    ("JKB", "조사"),
    ("JKV", "조사"),
    ("JKQ", "조사"),
    ("JX", "조사"),
    ("JC", "조사"),
    ("EC", "어미"),
    ("EF", "어미"),
    ("EP", "어미"),
    ("ETM", "어미"),
    ("ETN", "어미"),
    ("XPN", "접두사"),
    ("XSN", "접미사"),
    ("XSV", "접미사"),
    ("XSA", "접미사"),
    ("SF", "기호"),
    ("SP", "기호"),
    ("SS", "기호"),
    ("SW", "기호"),
    ("SY", "기호"),
    ("SE", "기호"),
    ("SL", "외국어"),
    ("SH", "한자"),
    ("SN", "숫자"),
];

/// Classification of one tag
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagClass {
    /// First component of the raw tag
    pub primary: String,
    /// Display label
    pub label: String,
    /// Particle, ending, affix, symbol, ...
    pub is_grammar: bool,
}

/// Per-language tag table
#[derive(Debug, Clone)]
pub struct TagClassifier {
    grammar: HashSet<&'static str>,
    labels: HashMap<&'static str, &'static str>,
}

impl TagClassifier {
    fn from_tables(grammar: &[&'static str], labels: &[(&'static str, &'static str)]) -> Self {
        Self {
            grammar: grammar.iter().copied().collect(),
            labels: labels.iter().copied().collect(),
        }
    }

    /// UniDic top-level part-of-speech names
    pub fn japanese() -> Self {
        Self::from_tables(JAPANESE_GRAMMAR, JAPANESE_LABELS)
    }

    /// Sejong tag set as used by mecab-ko-dic and Kiwi
    pub fn korean() -> Self {
        Self::from_tables(KOREAN_GRAMMAR, KOREAN_LABELS)
    }

    /// Classify a raw (possibly compound) tag
    pub fn classify(&self, tag: &str) -> TagClass {
        let primary = primary_tag(tag);
        let label = self.labels.get(primary).copied().unwrap_or(primary);

        TagClass {
            primary: primary.to_string(),
            label: label.to_string(),
            is_grammar: self.grammar.contains(primary),
        }
    }
}

/// First component of a compound tag
pub fn primary_tag(tag: &str) -> &str {
    tag.split(COMPOUND_SEPARATOR).next().unwrap_or(tag)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_japanese_grammar_tags() {
        let classifier = TagClassifier::japanese();

        for tag in ["助詞", "助動詞", "接続詞", "感動詞", "記号", "補助記号", "空白"] {
            assert!(classifier.classify(tag).is_grammar, "{tag} should be grammatical");
        }
        for tag in ["名詞", "動詞", "形容詞", "副詞", "代名詞", "接尾辞"] {
            assert!(!classifier.classify(tag).is_grammar, "{tag} should be a content word");
        }
    }

    #[test]
    fn test_japanese_labels() {
        let classifier = TagClassifier::japanese();

        assert_eq!(classifier.classify("名詞").label, "명사");
        assert_eq!(classifier.classify("補助記号").label, "기호");
        // Not in the label table: passes through
        assert_eq!(classifier.classify("代名詞").label, "代名詞");
    }

    #[test]
    fn test_korean_compound_tag_uses_first_component() {
        let classifier = TagClassifier::korean();

        let class = classifier.classify("VCP+EF");
        assert_eq!(class.primary, "VCP");
        assert_eq!(class.label, "지정사");
        assert!(!class.is_grammar);

        let class = classifier.classify("EP+EF");
        assert_eq!(class.label, "어미");
        assert!(class.is_grammar);
    }

    #[test]
    fn test_korean_labels_and_grammar() {
        let classifier = TagClassifier::korean();

        assert_eq!(
            classifier.classify("NNG"),
            TagClass {
                primary: "NNG".to_string(),
                label: "명사".to_string(),
                is_grammar: false,
            }
        );
        assert!(classifier.classify("JKS").is_grammar);
        assert!(classifier.classify("XR").is_grammar);
        assert_eq!(classifier.classify("XR").label, "XR");
        assert!(!classifier.classify("SL").is_grammar);
    }

    #[test]
    fn test_unknown_tag_passes_through() {
        let classifier = TagClassifier::korean();
        let class = classifier.classify("UNKNOWN");

        assert_eq!(class.label, "UNKNOWN");
        assert!(!class.is_grammar);
    }
}
