//! Diagnosis resolver: condition scoring, then a heuristic cascade, then a
//! generic default. Total: every input yields a bundle.

use crate::knowledge::KnowledgeBase;
use crate::models::{Condition, DiagnosisBundle, DiagnosisSource, GENERIC_FOLLOW_UP};

/// Score for a symptom that is a substring of the condition name.
const NAME_MATCH_SCORE: u32 = 2;
/// Score for a specialist keyword shared by symptom and condition name.
const BRIDGE_SCORE: u32 = 1;
/// A condition must score above this to be chosen.
const MIN_CONDITION_SCORE: u32 = 1;

const DEFAULT_DIAGNOSIS: &str = "Common Viral Infection";

/// Bundle chosen for a symptom list and the stage that produced it.
#[derive(Debug, Clone, PartialEq)]
pub struct Resolution {
    pub bundle: DiagnosisBundle,
    pub source: DiagnosisSource,
}

impl Resolution {
    fn new(bundle: DiagnosisBundle, source: DiagnosisSource) -> Self {
        Self { bundle, source }
    }
}

/// "Common name (Medical term)" → "common name".
pub fn common_name(symptom: &str) -> String {
    symptom
        .split('(')
        .next()
        .unwrap_or(symptom)
        .trim()
        .to_lowercase()
}

fn score_condition(kb: &KnowledgeBase, condition: &Condition, symptoms: &[String]) -> u32 {
    let name = condition.name.as_str();
    let mut score = 0;
    for symptom in symptoms {
        if name.contains(symptom.as_str()) {
            score += NAME_MATCH_SCORE;
        }
        score += kb
            .specialist_keywords()
            .filter(|kw| symptom.contains(kw) && name.contains(kw))
            .count() as u32
            * BRIDGE_SCORE;
    }
    score
}

/// The single best-scoring condition, if it clears the threshold and is not
/// tied with another.
fn best_condition<'a>(kb: &'a KnowledgeBase, symptoms: &[String]) -> Option<&'a Condition> {
    let mut best: Option<(&Condition, u32)> = None;
    let mut tied = false;
    for condition in kb.conditions() {
        let score = score_condition(kb, condition, symptoms);
        match best {
            Some((_, top)) if score == top => tied = true,
            Some((_, top)) if score < top => {}
            _ => {
                best = Some((condition, score));
                tied = false;
            }
        }
    }

    match best {
        Some((condition, score)) if score > MIN_CONDITION_SCORE && !tied => {
            tracing::debug!(condition = %condition.name, score, "Condition scored highest");
            Some(condition)
        }
        Some((_, score)) if tied && score > MIN_CONDITION_SCORE => {
            tracing::debug!(score, "Top condition score is tied, deferring to heuristics");
            None
        }
        _ => None,
    }
}

// ═══════════════════════════════════════════
// Heuristic cascade
// ═══════════════════════════════════════════

/// One ordered `(predicate, diagnosis)` rule over normalized symptoms.
struct Heuristic {
    name: &'static str,
    applies: fn(&[String]) -> bool,
    diagnosis: &'static str,
}

fn has(symptoms: &[String], key: &str) -> bool {
    symptoms.iter().any(|s| s == key)
}

fn only(symptoms: &[String], key: &str) -> bool {
    symptoms.len() == 1 && symptoms[0] == key
}

const HEURISTICS: &[Heuristic] = &[
    Heuristic {
        name: "fever_headache",
        applies: |s| has(s, "fever") && has(s, "headache"),
        diagnosis: "Viral Infection",
    },
    Heuristic {
        name: "cough_congestion",
        applies: |s| has(s, "cough") && has(s, "congestion"),
        diagnosis: "Upper Respiratory Infection",
    },
    Heuristic {
        name: "cough_fever",
        applies: |s| has(s, "cough") && has(s, "fever"),
        diagnosis: "Respiratory Infection",
    },
    Heuristic {
        name: "sore_throat_fever",
        applies: |s| has(s, "sore throat") && has(s, "fever"),
        diagnosis: "Pharyngitis",
    },
    Heuristic {
        name: "nausea_vomiting",
        applies: |s| has(s, "nausea") && has(s, "vomiting"),
        diagnosis: "Gastroenteritis",
    },
    Heuristic {
        name: "diarrhea_abdominal_pain",
        applies: |s| has(s, "diarrhea") && has(s, "abdominal pain"),
        diagnosis: "Gastroenteritis",
    },
    Heuristic {
        name: "runny_nose_sneezing",
        applies: |s| has(s, "runny nose") && has(s, "sneezing"),
        diagnosis: "Allergic Rhinitis",
    },
    Heuristic {
        name: "rash_alone",
        applies: |s| only(s, "rash"),
        diagnosis: "Dermatitis",
    },
    Heuristic {
        name: "headache_alone",
        applies: |s| only(s, "headache"),
        diagnosis: "Tension Headache",
    },
];

/// Resolve a diagnosis for symptoms that matched no combination.
pub fn resolve_diagnosis(kb: &KnowledgeBase, symptoms: &[String]) -> Resolution {
    let normalized: Vec<String> = symptoms
        .iter()
        .map(|s| common_name(s))
        .filter(|s| !s.is_empty())
        .collect();

    if normalized.is_empty() {
        return Resolution::new(DiagnosisBundle::insufficient(), DiagnosisSource::Insufficient);
    }

    if let Some(condition) = best_condition(kb, &normalized) {
        return Resolution::new(condition.bundle.clone(), DiagnosisSource::Condition);
    }

    if let Some(rule) = HEURISTICS.iter().find(|h| (h.applies)(&normalized)) {
        tracing::debug!(rule = rule.name, "Diagnosis heuristic applied");
        return Resolution::new(
            DiagnosisBundle::label(rule.diagnosis, GENERIC_FOLLOW_UP),
            DiagnosisSource::Heuristic,
        );
    }

    Resolution::new(
        DiagnosisBundle::label(DEFAULT_DIAGNOSIS, GENERIC_FOLLOW_UP),
        DiagnosisSource::Default,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resolve(list: &[&str]) -> Resolution {
        let kb = KnowledgeBase::builtin();
        let symptoms: Vec<String> = list.iter().map(|s| s.to_string()).collect();
        resolve_diagnosis(&kb, &symptoms)
    }

    #[test]
    fn fever_and_headache_is_viral_infection() {
        let r = resolve(&["fever", "headache"]);
        assert_eq!(r.bundle.diagnosis, "Viral Infection");
        assert_eq!(r.source, DiagnosisSource::Heuristic);
        assert!(r.bundle.recommendations.is_empty());
    }

    #[test]
    fn named_condition_wins_when_unique() {
        let r = resolve(&["asthma"]);
        assert_eq!(r.source, DiagnosisSource::Condition);
        let kb = KnowledgeBase::builtin();
        assert_eq!(r.bundle, kb.condition("asthma").unwrap().bundle);
    }

    #[test]
    fn medical_term_in_parentheses_is_ignored() {
        let r = resolve(&["Asthma (Reactive airway disease)"]);
        assert_eq!(r.source, DiagnosisSource::Condition);
    }

    #[test]
    fn rash_alone_is_dermatitis() {
        let r = resolve(&["rash"]);
        assert_eq!(r.bundle.diagnosis, "Dermatitis");
    }

    #[test]
    fn nausea_and_vomiting_is_gastroenteritis() {
        let r = resolve(&["nausea", "vomiting"]);
        assert_eq!(r.bundle.diagnosis, "Gastroenteritis");
    }

    #[test]
    fn unmatched_symptoms_get_generic_default() {
        let r = resolve(&["tingling", "hiccups"]);
        assert_eq!(r.bundle.diagnosis, DEFAULT_DIAGNOSIS);
        assert_eq!(r.source, DiagnosisSource::Default);
        assert_eq!(r.bundle.follow_up, GENERIC_FOLLOW_UP);
    }

    #[test]
    fn empty_list_is_insufficient() {
        let r = resolve(&[]);
        assert_eq!(r.bundle, DiagnosisBundle::insufficient());
        assert_eq!(r.source, DiagnosisSource::Insufficient);
        assert!(r.bundle.recommendations.is_empty() && r.bundle.avoid.is_empty());

        let r = resolve(&["", "  "]);
        assert_eq!(r.source, DiagnosisSource::Insufficient);
    }

    #[test]
    fn common_name_strips_medical_term() {
        assert_eq!(common_name("Runny Nose (Rhinorrhea)"), "runny nose");
        assert_eq!(common_name("cough"), "cough");
    }

    #[test]
    fn heuristic_names_are_unique() {
        let mut names: Vec<&str> = HEURISTICS.iter().map(|h| h.name).collect();
        names.sort();
        names.dedup();
        assert_eq!(names.len(), HEURISTICS.len());
    }
}
