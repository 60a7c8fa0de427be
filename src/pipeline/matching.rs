//! Combination matcher: symptom set → best-fitting symptom combination.

use std::collections::HashSet;

use crate::knowledge::KnowledgeBase;
use crate::models::SymptomCombination;

/// Absolute overlap that qualifies a large combination.
const LARGE_COMBINATION_SIZE: usize = 4;
const LARGE_COMBINATION_MIN_OVERLAP: usize = 3;

/// A combination together with how many of its symptoms were reported.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CombinationMatch<'a> {
    pub combination: &'a SymptomCombination,
    pub score: usize,
}

fn is_candidate(size: usize, score: usize) -> bool {
    (size >= LARGE_COMBINATION_SIZE && score >= LARGE_COMBINATION_MIN_OVERLAP)
        || (score > 0 && score as f64 >= size as f64 / 2.0)
}

/// Find the combination best covered by `symptoms`.
///
/// Needs at least two symptoms. The highest overlap wins; equal overlaps keep
/// the combination declared first.
pub fn find_matching_combination<'a>(
    kb: &'a KnowledgeBase,
    symptoms: &[String],
) -> Option<CombinationMatch<'a>> {
    if symptoms.len() < 2 {
        return None;
    }
    let reported: HashSet<&str> = symptoms.iter().map(String::as_str).collect();

    let mut best: Option<CombinationMatch<'a>> = None;
    for combination in kb.combinations() {
        let score = combination.overlap(&reported);
        if !is_candidate(combination.size(), score) {
            continue;
        }
        if best.map_or(true, |b| score > b.score) {
            best = Some(CombinationMatch { combination, score });
        }
    }

    match &best {
        Some(m) => tracing::debug!(
            diagnosis = %m.combination.bundle.diagnosis,
            score = m.score,
            size = m.combination.size(),
            "Symptom combination matched"
        ),
        None => tracing::debug!(symptoms = reported.len(), "No symptom combination matched"),
    }
    best
}
