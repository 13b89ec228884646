//! Summary statistics over an analyzed token sequence.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::analyzer::Token;
use crate::language::{Language, NO_LEVEL};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Statistics {
    /// All tokens
    pub total: usize,
    /// Tokens that are not grammatical
    pub content_words: usize,
    /// Content tokens found in the vocabulary table
    pub in_list: usize,
    /// Count per `level` value over all tokens, grammar labels included
    pub by_level: BTreeMap<String, usize>,
    /// Hardest level among listed content tokens, or `—`
    pub max_level: String,
}

/// Summarize `tokens` analyzed as `language`
pub fn aggregate(tokens: &[Token], language: Language) -> Statistics {
    let mut by_level = BTreeMap::new();
    for token in tokens {
        *by_level.entry(token.level.clone()).or_insert(0) += 1;
    }

    let content: Vec<&Token> = tokens.iter().filter(|t| !t.is_grammar).collect();
    let listed: Vec<&Token> = content.iter().copied().filter(|t| t.in_list).collect();

    let max_level = listed
        .iter()
        .filter_map(|t| language.level_rank(&t.level).map(|rank| (rank, t.level.as_str())))
        .max_by_key(|(rank, _)| *rank)
        .map(|(_, level)| level.to_string())
        .unwrap_or_else(|| NO_LEVEL.to_string());

    Statistics {
        total: tokens.len(),
        content_words: content.len(),
        in_list: listed.len(),
        by_level,
        max_level,
    }
}
