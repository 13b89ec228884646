//! Request entry point: language resolution, analysis and statistics.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::analyzer::{Analyzer, JapaneseAnalyzer, KoreanAnalyzer, Token};
use crate::config::Config;
use crate::error::{AnalyzeError, StartupError};
use crate::language::{detect_language, Language, LanguageHint};
use crate::stats::{aggregate, Statistics};
use crate::tagger::LinderaTagger;
use crate::vocabulary::VocabularyTable;

/// Result of one analysis request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Analysis {
    pub detected_lang: Language,
    pub tokens: Vec<Token>,
    pub stats: Statistics,
}

/// Both language pipelines, built once at startup
pub struct Engine {
    japanese: Box<dyn Analyzer>,
    korean: Box<dyn Analyzer>,
}

impl Engine {
    /// Load vocabulary tables and tagger dictionaries. Any failure is fatal.
    pub fn new(config: &Config) -> Result<Self, StartupError> {
        let jlpt = VocabularyTable::load(
            &config.vocabulary_path(Language::Japanese),
            &config.vocabulary_schema(Language::Japanese),
        )?;
        let topik = VocabularyTable::load(
            &config.vocabulary_path(Language::Korean),
            &config.vocabulary_schema(Language::Korean),
        )?;

        let ja_tagger = LinderaTagger::japanese(
            &config.dictionary(Language::Japanese),
            config.user_dictionary(Language::Japanese),
        )?;
        let ko_tagger = LinderaTagger::korean(
            &config.dictionary(Language::Korean),
            config.user_dictionary(Language::Korean),
        )?;

        Ok(Self::from_parts(
            Box::new(JapaneseAnalyzer::new(Box::new(ja_tagger), Arc::new(jlpt))),
            Box::new(KoreanAnalyzer::new(Box::new(ko_tagger), Arc::new(topik))),
        ))
    }

    /// Assemble from prebuilt analyzers
    pub fn from_parts(japanese: Box<dyn Analyzer>, korean: Box<dyn Analyzer>) -> Self {
        Self { japanese, korean }
    }

    pub fn detect_language(&self, text: &str) -> Option<Language> {
        detect_language(text)
    }

    fn analyzer(&self, language: Language) -> &dyn Analyzer {
        match language {
            Language::Japanese => self.japanese.as_ref(),
            Language::Korean => self.korean.as_ref(),
        }
    }

    /// Analyze `text` in `language`, without statistics
    pub fn tokens(&self, text: &str, language: Language) -> Result<Vec<Token>, AnalyzeError> {
        Ok(self.analyzer(language).analyze(text)?)
    }

    /// Analyze `text`. `hint` is "auto", "ja"/"jp", "ko"/"kr"; anything else means auto.
    pub fn analyze(&self, text: &str, hint: &str) -> Result<Analysis, AnalyzeError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(AnalyzeError::EmptyInput);
        }

        let language = LanguageHint::parse(hint)
            .resolve(text)
            .ok_or(AnalyzeError::UnsupportedLanguage)?;

        let tokens = self.tokens(text, language)?;
        let stats = aggregate(&tokens, language);
        tracing::debug!(
            "Analyzed {} chars as {}: {} tokens, max level {}",
            text.chars().count(),
            language,
            stats.total,
            stats.max_level
        );

        Ok(Analysis {
            detected_lang: language,
            tokens,
            stats,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzer::tests::{jlpt_table, morpheme, topik_table, watashi_wa_gakusei_desu, ScriptedTagger};
    use crate::language::NO_LEVEL;
    use crate::tagger::FeatureLayout;
    use crate::vocabulary::VocabularySchema;
    use pretty_assertions::assert_eq;
    use std::io::Write;

    fn scripted_engine() -> Engine {
        let korean = vec![
            morpheme("나", "NP", "나", "", ""),
            morpheme("는", "JX", "는", "", ""),
            morpheme("학생", "NNG", "학생", "", ""),
            morpheme("입니다", "VCP+EF", "입니다", "", ""),
        ];
        Engine::from_parts(
            Box::new(JapaneseAnalyzer::new(Box::new(ScriptedTagger(watashi_wa_gakusei_desu())), jlpt_table())),
            Box::new(KoreanAnalyzer::new(Box::new(ScriptedTagger(korean)), topik_table())),
        )
    }

    fn assert_invariants(analysis: &Analysis) {
        let stats = &analysis.stats;
        assert_eq!(analysis.tokens.len(), stats.total);
        assert_eq!(stats.by_level.values().sum::<usize>(), stats.total);
        assert_eq!(
            stats.content_words,
            analysis.tokens.iter().filter(|t| !t.is_grammar).count()
        );

        for token in &analysis.tokens {
            if token.is_grammar {
                assert!(!token.in_list);
                assert_eq!(token.level, token.pos);
            }
        }

        let order = analysis.detected_lang;
        if stats.max_level != NO_LEVEL {
            let max = order.level_rank(&stats.max_level).expect("max level is a real level");
            for token in analysis.tokens.iter().filter(|t| t.in_list && !t.is_grammar) {
                if let Some(rank) = order.level_rank(&token.level) {
                    assert!(rank <= max);
                }
            }
        }
    }

    // ==========================================
    // Request handling
    // ==========================================

    #[test]
    fn test_auto_detects_japanese() {
        let engine = scripted_engine();
        let analysis = engine.analyze("私は学生です", "auto").unwrap();

        assert_eq!(analysis.detected_lang, Language::Japanese);
        assert_eq!(analysis.stats.max_level, "N5");
        assert_eq!(analysis.stats.in_list, 1);
        assert_invariants(&analysis);
    }

    #[test]
    fn test_auto_detects_korean() {
        let engine = scripted_engine();
        let analysis = engine.analyze("나는 학생입니다", "auto").unwrap();

        assert_eq!(analysis.detected_lang, Language::Korean);
        let student = analysis.tokens.iter().find(|t| t.surface == "학생").unwrap();
        assert_eq!(student.level, "1급");
        assert_eq!(analysis.stats.max_level, "1급");
        assert_invariants(&analysis);
    }

    #[test]
    fn test_empty_input_is_rejected() {
        let engine = scripted_engine();

        assert!(matches!(engine.analyze("", "auto"), Err(AnalyzeError::EmptyInput)));
        assert!(matches!(engine.analyze("  \n\t", "ja"), Err(AnalyzeError::EmptyInput)));
    }

    #[test]
    fn test_unsupported_language() {
        let engine = scripted_engine();

        assert!(matches!(
            engine.analyze("hello world", "auto"),
            Err(AnalyzeError::UnsupportedLanguage)
        ));
        // Unrecognized hints fall back to detection
        assert!(matches!(
            engine.analyze("hello world", "fr"),
            Err(AnalyzeError::UnsupportedLanguage)
        ));
        assert_eq!(
            engine.analyze("学生", "fr").unwrap().detected_lang,
            Language::Japanese
        );
    }

    #[test]
    fn test_forced_hint_overrides_detection() {
        let engine = scripted_engine();
        let analysis = engine.analyze("나는 학생입니다", "ja").unwrap();

        assert_eq!(analysis.detected_lang, Language::Japanese);
        assert!(!analysis.tokens.is_empty());

        // Latin-only text is analyzed when the language is given
        let analysis = engine.analyze("hello", "kr").unwrap();
        assert_eq!(analysis.detected_lang, Language::Korean);
    }

    #[test]
    fn test_analysis_json_shape() {
        let engine = scripted_engine();
        let analysis = engine.analyze("私は学生です", "ja").unwrap();
        let json = serde_json::to_value(&analysis).unwrap();

        assert_eq!(json["detected_lang"], "ja");
        assert_eq!(json["tokens"][2]["surface"], "学生");
        assert_eq!(json["tokens"][2]["in_list"], true);
        assert_eq!(json["tokens"][1]["is_grammar"], true);
        assert_eq!(json["stats"]["max_level"], "N5");
        assert_eq!(json["stats"]["by_level"]["N5"], 1);
    }

    #[test]
    fn test_engine_is_shareable_across_threads() {
        let engine = Arc::new(scripted_engine());
        let handles: Vec<_> = (0..4)
            .map(|i| {
                let engine = Arc::clone(&engine);
                std::thread::spawn(move || {
                    let text = if i % 2 == 0 { "私は学生です" } else { "나는 학생입니다" };
                    engine.analyze(text, "auto").unwrap().stats.total
                })
            })
            .collect();

        for handle in handles {
            assert_eq!(handle.join().unwrap(), 4);
        }
    }

    // ==========================================
    // Startup
    // ==========================================

    #[test]
    fn test_missing_vocabulary_is_fatal() {
        let mut config = Config::default();
        config.data_dir = Some("/nonexistent".into());

        assert!(matches!(Engine::new(&config), Err(StartupError::Vocabulary(_))));
    }

    // ==========================================
    // End-to-end with Lindera dictionaries
    // ==========================================

    fn lindera_engine() -> Engine {
        let jlpt = "한자표기,읽기(히라가나),JLPT레벨\n学生,がくせい,N5\n私,わたし,N5\n";
        let topik = "어휘,레벨\n학생,1급\n나02,1급\n";

        Engine::from_parts(
            Box::new(JapaneseAnalyzer::new(
                Box::new(LinderaTagger::new("embedded://unidic", None, FeatureLayout::UNIDIC).unwrap()),
                Arc::new(VocabularyTable::from_reader(jlpt.as_bytes(), &VocabularySchema::jlpt()).unwrap()),
            )),
            Box::new(KoreanAnalyzer::new(
                Box::new(LinderaTagger::korean("embedded://ko-dic", None).unwrap()),
                Arc::new(VocabularyTable::from_reader(topik.as_bytes(), &VocabularySchema::topik()).unwrap()),
            )),
        )
    }

    #[test]
    fn test_lindera_japanese_sentence() {
        let engine = lindera_engine();
        let analysis = engine.analyze("私は学生です", "auto").unwrap();

        assert_eq!(analysis.detected_lang, Language::Japanese);
        let student = analysis.tokens.iter().find(|t| t.surface == "学生").unwrap();
        assert!(!student.is_grammar);
        assert_eq!(student.level, "N5");
        assert_eq!(student.reading, "がくせい");

        let particle = analysis.tokens.iter().find(|t| t.surface == "は").unwrap();
        assert!(particle.is_grammar);
        assert_eq!(particle.level, "조사");
        assert_invariants(&analysis);
    }

    #[test]
    fn test_lindera_korean_sentence() {
        let engine = lindera_engine();
        let analysis = engine.analyze("나는 학생입니다", "auto").unwrap();

        assert_eq!(analysis.detected_lang, Language::Korean);
        let student = analysis.tokens.iter().find(|t| t.surface == "학생").unwrap();
        assert!(!student.is_grammar);
        assert_eq!(student.level, "1급");
        assert!(student.in_list);
        assert_invariants(&analysis);
    }

    #[test]
    fn test_engine_new_from_config() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("JLPT_level")).unwrap();
        std::fs::create_dir_all(dir.path().join("TOPIC_level")).unwrap();

        let mut jlpt = std::fs::File::create(dir.path().join("JLPT_level/JLPT-level_naver.csv")).unwrap();
        writeln!(jlpt, "한자표기,읽기(히라가나),JLPT레벨\n学生,がくせい,N5").unwrap();
        let mut topik =
            std::fs::File::create(dir.path().join("TOPIC_level/topik_vocabulary_all_levels.csv")).unwrap();
        writeln!(topik, "어휘,레벨\n가격02,3급").unwrap();

        let config = Config {
            data_dir: Some(dir.path().to_path_buf()),
            ..Default::default()
        };
        let engine = Engine::new(&config).unwrap();

        let analysis = engine.analyze("가격", "auto").unwrap();
        assert_eq!(analysis.stats.max_level, "3급");
    }
}
