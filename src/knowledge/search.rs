use std::sync::LazyLock;

use regex::Regex;

use super::KnowledgeBase;
use crate::models::Condition;

static WORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b\w+\b").expect("Invalid word regex"));

const STOP_WORDS: &[&str] = &[
    "a", "the", "and", "or", "but", "in", "on", "at", "to", "for", "with", "about", "is", "are",
];

/// Weight of a keyword found in the condition name.
const NAME_WEIGHT: u32 = 10;
/// Weight of a keyword found in the description.
const INFO_WEIGHT: u32 = 1;

/// A condition ranked by keyword search.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchHit<'a> {
    pub condition: &'a Condition,
    pub score: u32,
}

/// Rank conditions by keyword overlap with a free-text query.
///
/// Results are sorted by descending score; equal scores keep declaration
/// order. Conditions with no overlap are omitted.
pub fn search_conditions<'a>(kb: &'a KnowledgeBase, query: &str) -> Vec<SearchHit<'a>> {
    let query = query.to_lowercase();
    let keywords: Vec<&str> = WORD
        .find_iter(&query)
        .map(|m| m.as_str())
        .filter(|w| !STOP_WORDS.contains(w))
        .collect();

    if keywords.is_empty() {
        return Vec::new();
    }

    let mut hits: Vec<SearchHit<'a>> = kb
        .conditions()
        .iter()
        .filter_map(|condition| {
            let name = condition.name.to_lowercase();
            let info = condition.info.to_lowercase();
            let score = keywords.iter().fold(0, |acc, kw| {
                let mut s = acc;
                if name.contains(kw) {
                    s += NAME_WEIGHT;
                }
                if info.contains(kw) {
                    s += INFO_WEIGHT;
                }
                s
            });
            (score > 0).then_some(SearchHit { condition, score })
        })
        .collect();

    // sort_by is stable, so ties stay in declaration order
    hits.sort_by(|a, b| b.score.cmp(&a.score));
    hits
}
