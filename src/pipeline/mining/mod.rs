//! Conversation text miner.
//!
//! Turns the user side of a conversation into an ordered, duplicate-free list
//! of normalized symptom keys. Pure: no I/O, never fails. Malformed or empty
//! history yields an empty list.

pub mod lexicon;
pub mod normalize;
pub(crate) mod rules;

pub use lexicon::extract_symptoms_from_query;
pub use normalize::normalize_symptom;

use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;

use crate::models::ConversationHistory;
use normalize::{is_plausible_symptom, symptom_keys};
use rules::{ImpliedSymptom, ABDOMINAL_RULES, MINING_RULES, PAIN_CONTEXT, URINARY_NOISE, URINARY_RULES};

static ATOM_SPLIT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s*,\s*|\s*\band\b\s*").expect("Invalid atom split regex"));

/// Insertion-ordered set of symptom keys.
#[derive(Debug, Default)]
struct SymptomSet {
    ordered: Vec<String>,
    seen: HashSet<String>,
}

impl SymptomSet {
    /// Split a raw phrase into atoms, normalize each and keep new ones.
    /// Free-form atoms are reduced to the known terms they mention and are
    /// kept whole only when they mention none but still look like a symptom.
    fn insert_raw(&mut self, raw: &str, free_form: bool) {
        for atom in ATOM_SPLIT.split(raw) {
            let Some(symptom) = normalize_symptom(atom) else {
                continue;
            };
            if !free_form {
                self.insert(symptom);
                continue;
            }
            let keys = symptom_keys(&symptom);
            if !keys.is_empty() {
                keys.into_iter().for_each(|k| self.insert(k));
            } else if is_plausible_symptom(&symptom) {
                self.insert(symptom);
            }
        }
    }

    fn insert(&mut self, symptom: String) {
        if self.seen.insert(symptom.clone()) {
            self.ordered.push(symptom);
        }
    }

    fn retain(&mut self, keep: impl Fn(&str) -> bool) {
        self.ordered.retain(|s| keep(s.as_str()));
        self.seen.retain(|s| keep(s.as_str()));
    }

    fn into_vec(self) -> Vec<String> {
        self.ordered
    }
}

fn apply_implied(found: &mut SymptomSet, rules: &[ImpliedSymptom], buffer: &str) -> usize {
    let mut hits = 0;
    for rule in rules {
        if rule.is_match(buffer) {
            tracing::debug!(rule = rule.name, "Post-pass rule matched");
            found.insert(rule.symptom.to_string());
            hits += 1;
        }
    }
    hits
}

/// Extract symptom keys from every user turn of a conversation.
pub fn extract_symptoms(history: &ConversationHistory) -> Vec<String> {
    let texts: Vec<String> = history.user_texts().map(|t| t.to_lowercase()).collect();
    if texts.is_empty() {
        return Vec::new();
    }

    let mut found = SymptomSet::default();

    // A greeting first turn lists its complaints up front
    for fragment in rules::greeting_fragments(&texts[0]) {
        found.insert_raw(&fragment, true);
    }

    let buffer = texts.join("\n");
    for rule in MINING_RULES.iter() {
        let phrases = rule.apply(&buffer);
        if !phrases.is_empty() {
            tracing::debug!(rule = rule.name, matches = phrases.len(), "Mining rule matched");
        }
        for phrase in phrases {
            found.insert_raw(&phrase, rule.free_form);
        }
    }

    if apply_implied(&mut found, &URINARY_RULES, &buffer) > 0 {
        found.retain(|s| !URINARY_NOISE.contains(&s));
    }
    if PAIN_CONTEXT.is_match(&buffer) {
        apply_implied(&mut found, &ABDOMINAL_RULES, &buffer);
    }

    let symptoms = found.into_vec();
    tracing::debug!(turns = texts.len(), symptoms = symptoms.len(), "Extracted symptoms");
    symptoms
}
