//! Specialist classifier: routes a symptom list and diagnosis to one
//! specialist category.
//!
//! Stages run in a fixed order and the first that yields a category wins:
//!
//! | Stage          | Fires when                                          |
//! |----------------|-----------------------------------------------------|
//! | NoInformation  | no symptoms and no diagnosis                        |
//! | Nonspecific    | only nonspecific symptoms, no specific diagnosis    |
//! | Remote         | the LLM answers with a known category               |
//! | DiagnosisRule  | diagnosis text contains a category keyword          |
//! | SymptomRule    | enough symptoms hit one category's keywords         |
//! | CommonSymptom  | any symptom is a common complaint                   |
//! | Fallback       | always                                              |
//!
//! `classify` is total: it always returns a member of the specialist table.

pub mod remote;

pub use remote::RemoteClassifier;

use crate::knowledge::KnowledgeBase;
use crate::models::{is_undetermined, SpecialistStage, INSUFFICIENT_DIAGNOSIS};

const NONSPECIFIC_SYMPTOMS: &[&str] =
    &["fever", "headache", "cold", "cough", "sore throat", "fatigue"];

const NONSPECIFIC_DIAGNOSES: &[&str] = &["common cold", "flu", "viral infection"];

const COMMON_SYMPTOMS: &[&str] = &[
    "fever", "cough", "cold", "headache", "sore throat", "runny nose",
    "congestion", "sneezing", "fatigue", "body aches",
];

const STAGES: [SpecialistStage; 7] = [
    SpecialistStage::NoInformation,
    SpecialistStage::Nonspecific,
    SpecialistStage::Remote,
    SpecialistStage::DiagnosisRule,
    SpecialistStage::SymptomRule,
    SpecialistStage::CommonSymptom,
    SpecialistStage::Fallback,
];

/// Chosen category and the stage that chose it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpecialistDecision {
    pub specialist: String,
    pub stage: SpecialistStage,
}

#[derive(Default)]
pub struct SpecialistClassifier {
    remote: Option<RemoteClassifier>,
}

fn no_diagnosis(diagnosis: &str) -> bool {
    is_undetermined(diagnosis) || diagnosis.trim().eq_ignore_ascii_case(INSUFFICIENT_DIAGNOSIS)
}

impl SpecialistClassifier {
    /// Deterministic stages only.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_remote(remote: RemoteClassifier) -> Self {
        Self {
            remote: Some(remote),
        }
    }

    pub fn has_remote(&self) -> bool {
        self.remote.is_some()
    }

    pub fn classify(&self, kb: &KnowledgeBase, symptoms: &[String], diagnosis: &str) -> SpecialistDecision {
        let symptoms: Vec<String> = symptoms
            .iter()
            .map(|s| s.trim().to_lowercase())
            .filter(|s| !s.is_empty())
            .collect();

        for stage in STAGES {
            if let Some(specialist) = self.run_stage(stage, kb, &symptoms, diagnosis) {
                tracing::debug!(stage = %stage, specialist = %specialist, "Specialist selected");
                return SpecialistDecision { specialist, stage };
            }
        }

        // Fallback stage always yields
        SpecialistDecision {
            specialist: kb.fallback_specialist().to_string(),
            stage: SpecialistStage::Fallback,
        }
    }

    fn run_stage(
        &self,
        stage: SpecialistStage,
        kb: &KnowledgeBase,
        symptoms: &[String],
        diagnosis: &str,
    ) -> Option<String> {
        match stage {
            SpecialistStage::NoInformation => (symptoms.is_empty() && no_diagnosis(diagnosis))
                .then(|| kb.default_specialist().to_string()),
            SpecialistStage::Nonspecific => {
                nonspecific(symptoms, diagnosis).then(|| kb.respiratory_specialist().to_string())
            }
            SpecialistStage::Remote => self
                .remote
                .as_ref()
                .and_then(|r| r.classify(kb, symptoms, diagnosis)),
            SpecialistStage::DiagnosisRule => diagnosis_rule(kb, diagnosis),
            SpecialistStage::SymptomRule => symptom_rule(kb, symptoms),
            SpecialistStage::CommonSymptom => symptoms
                .iter()
                .any(|s| COMMON_SYMPTOMS.contains(&s.as_str()))
                .then(|| kb.respiratory_specialist().to_string()),
            SpecialistStage::Fallback => Some(kb.fallback_specialist().to_string()),
        }
    }
}

fn nonspecific(symptoms: &[String], diagnosis: &str) -> bool {
    if !symptoms.iter().all(|s| NONSPECIFIC_SYMPTOMS.contains(&s.as_str())) {
        return false;
    }
    let diagnosis = diagnosis.trim().to_lowercase();
    no_diagnosis(&diagnosis) || NONSPECIFIC_DIAGNOSES.contains(&diagnosis.as_str())
}

/// First category, in table order, with a keyword inside the diagnosis text.
fn diagnosis_rule(kb: &KnowledgeBase, diagnosis: &str) -> Option<String> {
    if no_diagnosis(diagnosis) {
        return None;
    }
    let diagnosis = diagnosis.to_lowercase();
    kb.specialists()
        .iter()
        .find(|p| p.keywords.iter().any(|k| !k.is_empty() && diagnosis.contains(k.as_str())))
        .map(|p| p.name.clone())
}

/// First category whose keywords cover at least half the symptoms.
fn symptom_rule(kb: &KnowledgeBase, symptoms: &[String]) -> Option<String> {
    if symptoms.is_empty() {
        return None;
    }
    let threshold = (symptoms.len() / 2).max(1);
    kb.specialists()
        .iter()
        .find(|p| {
            let tally = symptoms
                .iter()
                .filter(|s| {
                    p.keywords
                        .iter()
                        .any(|k| !k.is_empty() && (s.contains(k.as_str()) || k.contains(s.as_str())))
                })
                .count();
            tally >= threshold
        })
        .map(|p| p.name.clone())
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::llm::{LlmError, MockLlmClient};

    fn symptoms(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    fn classify(list: &[&str], diagnosis: &str) -> SpecialistDecision {
        SpecialistClassifier::new().classify(&KnowledgeBase::builtin(), &symptoms(list), diagnosis)
    }

    fn with_mock(client: Arc<MockLlmClient>) -> SpecialistClassifier {
        SpecialistClassifier::with_remote(RemoteClassifier::new(client, "llama3.2"))
    }

    #[test]
    fn nothing_known_is_default() {
        let d = classify(&[], "");
        assert_eq!(d.specialist, "General Physician");
        assert_eq!(d.stage, SpecialistStage::NoInformation);

        let d = classify(&[], INSUFFICIENT_DIAGNOSIS);
        assert_eq!(d.stage, SpecialistStage::NoInformation);
    }

    #[test]
    fn nonspecific_symptoms_skip_remote() {
        let client = Arc::new(MockLlmClient::new("Cardiologist"));
        let classifier = with_mock(client.clone());
        let d = classifier.classify(&KnowledgeBase::builtin(), &symptoms(&["fever", "cough"]), "Flu");
        assert_eq!(d.specialist, "General Physician");
        assert_eq!(d.stage, SpecialistStage::Nonspecific);
        assert_eq!(client.calls(), 0);
    }

    #[test]
    fn nonspecific_diagnosis_alone_skips_remote() {
        let client = Arc::new(MockLlmClient::new("Cardiologist"));
        let d = with_mock(client.clone()).classify(&KnowledgeBase::builtin(), &[], "Flu");
        assert_eq!(d.specialist, "General Physician");
        assert_eq!(d.stage, SpecialistStage::Nonspecific);
        assert_eq!(client.calls(), 0);
    }

    #[test]
    fn remote_answer_is_used() {
        let client = Arc::new(MockLlmClient::new("Cardiologist"));
        let d = with_mock(client).classify(&KnowledgeBase::builtin(), &symptoms(&["chest pain"]), "");
        assert_eq!(d.specialist, "Cardiologist");
        assert_eq!(d.stage, SpecialistStage::Remote);
    }

    #[test]
    fn uti_routes_to_urologist_when_remote_fails() {
        let client = Arc::new(MockLlmClient::failing(LlmError::Timeout(10)));
        let d = with_mock(client.clone()).classify(
            &KnowledgeBase::builtin(),
            &symptoms(&["fever", "headache", "rash"]),
            "Urinary Tract Infection",
        );
        assert_eq!(d.specialist, "Urologist");
        assert_eq!(d.stage, SpecialistStage::DiagnosisRule);
        assert_eq!(client.calls(), 1);
    }

    #[test]
    fn unrecognized_remote_answer_falls_through() {
        let client = Arc::new(MockLlmClient::new("Astrologer"));
        let d = with_mock(client).classify(&KnowledgeBase::builtin(), &symptoms(&["wheezing"]), "");
        assert_eq!(d.specialist, "Pulmonologist");
        assert_eq!(d.stage, SpecialistStage::SymptomRule);
    }

    #[test]
    fn diagnosis_beats_symptoms() {
        let d = classify(&["rash", "itching"], "Migraine");
        assert_eq!(d.specialist, "Neurologist");
        assert_eq!(d.stage, SpecialistStage::DiagnosisRule);
    }

    #[test]
    fn symptom_tally_threshold() {
        // threshold is 2 of 4: one gastro hit is not enough
        let d = classify(&["rash", "itching", "hives", "nausea"], "");
        assert_eq!(d.specialist, "Dermatologist");
        assert_eq!(d.stage, SpecialistStage::SymptomRule);
    }

    #[test]
    fn common_symptom_goes_to_respiratory_category() {
        let d = classify(&["runny nose", "hiccups"], "");
        assert_eq!(d.specialist, "General Physician");
        assert_eq!(d.stage, SpecialistStage::CommonSymptom);
    }

    #[test]
    fn unknown_everything_is_fallback() {
        let d = classify(&["hiccups"], "Something Rare");
        assert_eq!(d.specialist, "Internal Medicine");
        assert_eq!(d.stage, SpecialistStage::Fallback);
    }

    #[test]
    fn classifier_is_total() {
        let kb = KnowledgeBase::builtin();
        let classifier = SpecialistClassifier::new();
        let cases: &[(&[&str], &str)] = &[
            (&[], ""),
            (&[], "Unknown"),
            (&["", "  "], "  "),
            (&["xyzzy"], "qwerty"),
            (&["chest pain", "shortness of breath"], "Heart Attack"),
            (&["fever"], "Insufficient symptom information"),
        ];
        for (list, diagnosis) in cases {
            let d = classifier.classify(&kb, &symptoms(list), diagnosis);
            assert!(!d.specialist.is_empty());
            assert!(kb.is_specialist(&d.specialist), "{} is not a category", d.specialist);
        }
    }
}
