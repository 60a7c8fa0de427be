//! Turn orchestration: one conversation turn in, one updated patient state out.
//!
//! ```text
//! history ─► mining ─► combination match ─┬─► bundle ─► advice merge ─► specialist
//!                                         └─ resolver (no match)
//! ```

use std::sync::Arc;

use crate::config::EngineConfig;
use crate::knowledge::{search_conditions, KnowledgeBase, KnowledgeError};
use crate::llm::OllamaClient;
use crate::models::{ConversationHistory, DiagnosisBundle, DiagnosisSource, PatientState};

use super::advice::{extract_advice, merge_advice};
use super::matching::find_matching_combination;
use super::mining::{extract_symptoms, extract_symptoms_from_query};
use super::resolver::{resolve_diagnosis, Resolution};
use super::specialist::{RemoteClassifier, SpecialistClassifier};

/// Answer when a query matches neither a combination nor a condition.
pub const GENERAL_HEALTH_ADVICE: &str = "I couldn't find specific information about those symptoms. \
In general: rest, stay hydrated, and consult a healthcare provider if your symptoms persist or worsen.";

/// Conditions whose descriptions are quoted in a search-based answer.
const SUMMARY_CONDITIONS: usize = 2;

/// Result of a single-utterance inference.
#[derive(Debug, Clone, PartialEq)]
pub struct QueryInference {
    pub symptoms: Vec<String>,
    pub bundle: Option<DiagnosisBundle>,
    /// `Combination` or `Condition` when a bundle was found.
    pub source: Option<DiagnosisSource>,
    pub summary: String,
}

impl QueryInference {
    /// Fold into a fresh patient state. `None` when nothing was inferred.
    pub fn to_patient_state(&self) -> Option<PatientState> {
        self.bundle
            .as_ref()
            .map(|bundle| PatientState::from_query_inference(self.symptoms.clone(), bundle))
    }
}

pub struct IntakeEngine {
    kb: Arc<KnowledgeBase>,
    classifier: SpecialistClassifier,
}

impl IntakeEngine {
    pub fn new(kb: Arc<KnowledgeBase>, classifier: SpecialistClassifier) -> Self {
        Self { kb, classifier }
    }

    /// Built-in knowledge base, deterministic classifier stages only.
    pub fn offline() -> Self {
        Self::new(KnowledgeBase::shared(), SpecialistClassifier::new())
    }

    /// Build from configuration.
    ///
    /// A knowledge-base file that cannot be loaded is an error. A remote
    /// classifier that cannot be constructed is skipped with a warning.
    pub fn from_config(config: &EngineConfig) -> Result<Self, KnowledgeError> {
        let kb = match &config.knowledge_base {
            Some(path) => Arc::new(KnowledgeBase::from_json_file(path)?),
            None => KnowledgeBase::shared(),
        };

        let classifier = if config.remote_classifier {
            match OllamaClient::from_config(config) {
                Ok(client) => SpecialistClassifier::with_remote(RemoteClassifier::new(
                    Arc::new(client),
                    &config.classifier_model,
                )),
                Err(e) => {
                    tracing::warn!(error = %e, "Remote classifier disabled");
                    SpecialistClassifier::new()
                }
            }
        } else {
            SpecialistClassifier::new()
        };

        Ok(Self::new(kb, classifier))
    }

    pub fn knowledge_base(&self) -> &KnowledgeBase {
        &self.kb
    }

    pub fn classifier(&self) -> &SpecialistClassifier {
        &self.classifier
    }

    /// Combination match first, then the resolver cascade.
    pub fn diagnose(&self, symptoms: &[String]) -> Resolution {
        match find_matching_combination(&self.kb, symptoms) {
            Some(m) => Resolution {
                bundle: m.combination.bundle.clone(),
                source: DiagnosisSource::Combination,
            },
            None => resolve_diagnosis(&self.kb, symptoms),
        }
    }

    /// Process one conversation turn against the previously stored state.
    pub fn process_turn(&self, history: &ConversationHistory, previous: &PatientState) -> PatientState {
        let mined = extract_symptoms(history);
        let symptoms = if mined.is_empty() {
            previous.symptoms.clone()
        } else {
            mined
        };

        let resolution = self.diagnose(&symptoms);
        let mut state = previous.clone();
        state.symptoms = symptoms;

        let changed = !resolution
            .bundle
            .diagnosis
            .trim()
            .eq_ignore_ascii_case(previous.diagnosis.trim());
        if changed {
            state.apply_bundle(&resolution.bundle);
        }

        if let Some(reply) = history.latest_assistant_reply() {
            let advice = extract_advice(&self.kb, &reply, &state.diagnosis);
            merge_advice(&mut state, &advice);
        }

        let decision = self.classifier.classify(&self.kb, &state.symptoms, &state.diagnosis);
        state.recommended_specialist = decision.specialist;

        tracing::info!(
            symptoms = state.symptoms.len(),
            diagnosis_source = %resolution.source,
            diagnosis_changed = changed,
            specialist_stage = %decision.stage,
            "Turn processed"
        );
        state
    }

    /// Infer a diagnosis from one free-text question.
    pub fn infer_from_query(&self, query: &str) -> QueryInference {
        let symptoms = extract_symptoms_from_query(query);

        if symptoms.len() >= 2 {
            if let Some(m) = find_matching_combination(&self.kb, &symptoms) {
                let bundle = m.combination.bundle.clone();
                return QueryInference {
                    summary: bundle.summary(&symptoms),
                    symptoms,
                    bundle: Some(bundle),
                    source: Some(DiagnosisSource::Combination),
                };
            }
        }

        let hits = search_conditions(&self.kb, query);
        let Some(top) = hits.first() else {
            tracing::debug!(symptoms = symptoms.len(), "Query matched nothing");
            return QueryInference {
                symptoms,
                bundle: None,
                source: None,
                summary: GENERAL_HEALTH_ADVICE.to_string(),
            };
        };

        let bundle = top.condition.bundle.clone();
        let mut summary = String::from("Related information:\n\n");
        for hit in hits.iter().take(SUMMARY_CONDITIONS) {
            summary.push_str(&format!("{}: {}\n\n", hit.condition.bundle.diagnosis, hit.condition.info));
        }
        summary.push_str(&bundle.summary(&symptoms));

        QueryInference {
            symptoms,
            bundle: Some(bundle),
            source: Some(DiagnosisSource::Condition),
            summary,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::{LlmError, MockLlmClient};
    use crate::models::{ChatTurn, SpecialistStage, GENERIC_FOLLOW_UP};

    fn history(turns: &[ChatTurn]) -> ConversationHistory {
        ConversationHistory::new(turns.to_vec())
    }

    fn flu_history() -> ConversationHistory {
        history(&[ChatTurn::user(
            "Hi, I have a fever, a cough, a sore throat and body aches",
        )])
    }

    #[test]
    fn flu_conversation() {
        let engine = IntakeEngine::offline();
        let state = engine.process_turn(&flu_history(), &PatientState::default());

        for s in ["fever", "cough", "sore throat", "body aches"] {
            assert!(state.symptoms.contains(&s.to_string()), "missing {s}");
        }
        assert_eq!(state.diagnosis, "Common Flu");
        assert!(!state.recommendations.is_empty());
        assert_eq!(state.recommended_specialist, "General Physician");
    }

    #[test]
    fn uti_conversation_routes_to_urologist_without_llm() {
        let client = Arc::new(MockLlmClient::failing(LlmError::Timeout(10)));
        let classifier = SpecialistClassifier::with_remote(RemoteClassifier::new(client.clone(), "llama3.2"));
        let engine = IntakeEngine::new(KnowledgeBase::shared(), classifier);

        let h = history(&[ChatTurn::user(
            "It burns when I pee, I pee a lot, and there is pain in my lower belly",
        )]);
        let state = engine.process_turn(&h, &PatientState::default());

        assert!(state.symptoms.contains(&"painful urination".to_string()));
        assert!(state.symptoms.contains(&"frequent urination".to_string()));
        assert_eq!(state.diagnosis, "Possible Urinary Tract Infection");
        assert_eq!(state.recommended_specialist, "Urologist");
        assert_eq!(client.calls(), 1);
    }

    #[test]
    fn previous_symptoms_kept_when_turn_has_none() {
        let engine = IntakeEngine::offline();
        let first = engine.process_turn(&flu_history(), &PatientState::default());

        let h = history(&[ChatTurn::user("Thanks, that's all for now")]);
        let second = engine.process_turn(&h, &first);
        assert_eq!(second.symptoms, first.symptoms);
        assert_eq!(second.diagnosis, "Common Flu");
    }

    #[test]
    fn unchanged_diagnosis_keeps_advice_and_merges_reply() {
        let engine = IntakeEngine::offline();
        let previous = PatientState {
            diagnosis: "Common Flu".into(),
            recommendations: vec!["Sleep early".into()],
            follow_up: "Call us on Friday".into(),
            ..PatientState::default()
        };

        let mut h = flu_history();
        h.push(ChatTurn::assistant("I suggest drinking warm tea with honey."));
        let state = engine.process_turn(&h, &previous);

        assert_eq!(state.recommendations[0], "Sleep early");
        assert!(state.recommendations.contains(&"Drinking warm tea with honey".to_string()));
        assert_eq!(state.follow_up, "Call us on Friday");
    }

    #[test]
    fn changed_diagnosis_replaces_advice() {
        let engine = IntakeEngine::offline();
        let previous = PatientState {
            diagnosis: "Migraine".into(),
            recommendations: vec!["Dark room".into()],
            ..PatientState::default()
        };
        let state = engine.process_turn(&flu_history(), &previous);
        assert_eq!(state.diagnosis, "Common Flu");
        assert!(!state.recommendations.contains(&"Dark room".to_string()));
    }

    #[test]
    fn empty_history_is_insufficient() {
        let engine = IntakeEngine::offline();
        let state = engine.process_turn(&ConversationHistory::default(), &PatientState::default());
        assert!(state.symptoms.is_empty());
        assert_eq!(state.diagnosis, "Insufficient symptom information");
        assert_eq!(state.recommended_specialist, "General Physician");
        assert_eq!(
            engine.classifier.classify(engine.knowledge_base(), &[], &state.diagnosis).stage,
            SpecialistStage::NoInformation
        );
    }

    #[test]
    fn canned_advice_when_reply_has_none() {
        let engine = IntakeEngine::offline();
        let h = history(&[
            ChatTurn::user("I have a strange feeling"),
            ChatTurn::assistant("Can you describe it in more detail?"),
        ]);
        let previous = PatientState {
            symptoms: vec!["hiccups".into()],
            ..PatientState::default()
        };
        let state = engine.process_turn(&h, &previous);

        assert_eq!(state.symptoms, vec!["hiccups"]);
        assert_eq!(state.diagnosis, "Common Viral Infection");
        let flu = &engine.knowledge_base().condition("flu").unwrap().bundle;
        assert_eq!(state.recommendations, flu.recommendations);
        assert_eq!(state.follow_up, flu.follow_up);
        assert_ne!(state.follow_up, GENERIC_FOLLOW_UP);
    }

    #[test]
    fn query_matching_a_combination() {
        let engine = IntakeEngine::offline();
        let inference = engine.infer_from_query("I have fever, cough, sore throat and body aches");
        assert_eq!(inference.source, Some(DiagnosisSource::Combination));
        assert_eq!(inference.bundle.as_ref().map(|b| b.diagnosis.as_str()), Some("Common Flu"));
        assert!(inference.summary.starts_with("Based on your symptoms"));

        let state = inference.to_patient_state().unwrap();
        assert_eq!(state.diagnosis, "Common Flu");
        assert_eq!(state.symptoms, inference.symptoms);
    }

    #[test]
    fn query_falls_back_to_condition_search() {
        let engine = IntakeEngine::offline();
        let inference = engine.infer_from_query("what is asthma");
        assert_eq!(inference.source, Some(DiagnosisSource::Condition));
        assert_eq!(inference.bundle.as_ref().map(|b| b.diagnosis.as_str()), Some("Asthma"));
        assert!(inference.summary.starts_with("Related information:"));
        assert!(inference.summary.contains("airways narrow"));
    }

    #[test]
    fn query_finds_neurological_symptoms() {
        let engine = IntakeEngine::offline();
        let inference = engine.infer_from_query("Memory loss and mood swings since spring");
        assert_eq!(inference.symptoms, vec!["memory loss", "mood swings"]);
    }

    #[test]
    fn query_without_any_hit() {
        let engine = IntakeEngine::offline();
        let inference = engine.infer_from_query("xylophone zebra");
        assert!(inference.bundle.is_none());
        assert_eq!(inference.summary, GENERAL_HEALTH_ADVICE);
        assert!(inference.to_patient_state().is_none());
    }

    #[test]
    fn missing_knowledge_base_file_is_an_error() {
        let config = EngineConfig {
            knowledge_base: Some("/nonexistent/kb.json".into()),
            remote_classifier: false,
            ..EngineConfig::default()
        };
        assert!(matches!(IntakeEngine::from_config(&config), Err(KnowledgeError::Io(_))));
    }

    #[test]
    fn config_controls_remote_stage() {
        let mut config = EngineConfig {
            remote_classifier: false,
            ..EngineConfig::default()
        };
        assert!(!IntakeEngine::from_config(&config).unwrap().classifier().has_remote());
        config.remote_classifier = true;
        assert!(IntakeEngine::from_config(&config).unwrap().classifier().has_remote());
    }
}
