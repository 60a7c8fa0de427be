use serde::{Deserialize, Serialize};

use super::knowledge::{is_undetermined, DiagnosisBundle};

/// Persisted inference result for one patient session.
///
/// Field names on disk follow the chat application's record layout.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PatientState {
    pub symptoms: Vec<String>,
    pub diagnosis: String,
    pub recommendations: Vec<String>,
    pub avoid: Vec<String>,
    pub follow_up: String,
    #[serde(rename = "recommended_specialist_type")]
    pub recommended_specialist: String,
}

impl PatientState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn has_diagnosis(&self) -> bool {
        !is_undetermined(&self.diagnosis)
    }

    /// Replace diagnosis and advice with a bundle.
    pub fn apply_bundle(&mut self, bundle: &DiagnosisBundle) {
        self.diagnosis = bundle.diagnosis.clone();
        self.recommendations = bundle.recommendations.clone();
        self.avoid = bundle.avoid.clone();
        self.follow_up = bundle.follow_up.clone();
    }

    /// State recorded from a single-utterance inference.
    pub fn from_query_inference(symptoms: Vec<String>, bundle: &DiagnosisBundle) -> Self {
        let mut state = Self {
            symptoms,
            ..Self::default()
        };
        state.apply_bundle(bundle);
        state
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> PatientState {
        PatientState {
            symptoms: vec!["fever".into(), "cough".into()],
            diagnosis: "Common Flu".into(),
            recommendations: vec!["Rest".into()],
            avoid: vec!["Cold drinks".into()],
            follow_up: "See a doctor in a week".into(),
            recommended_specialist: "General Physician".into(),
        }
    }

    #[test]
    fn json_round_trip_is_field_for_field() {
        let state = sample();
        let json = serde_json::to_string_pretty(&state).unwrap();
        let back: PatientState = serde_json::from_str(&json).unwrap();
        assert_eq!(back, state);
    }

    #[test]
    fn specialist_uses_record_field_name() {
        let json = serde_json::to_value(sample()).unwrap();
        assert_eq!(json["recommended_specialist_type"], "General Physician");
        assert!(json.get("recommended_specialist").is_none());
    }

    #[test]
    fn missing_fields_default() {
        let state: PatientState = serde_json::from_str(r#"{"symptoms": ["rash"]}"#).unwrap();
        assert_eq!(state.symptoms, vec!["rash"]);
        assert!(state.diagnosis.is_empty());
        assert!(!state.has_diagnosis());
    }

    #[test]
    fn unknown_is_not_a_diagnosis() {
        let mut state = PatientState::new();
        state.diagnosis = "Unknown".into();
        assert!(!state.has_diagnosis());
    }

    #[test]
    fn query_inference_copies_bundle() {
        let bundle = DiagnosisBundle::new("Migraine", &["Dark room"], &["Bright lights"], "See a neurologist");
        let state = PatientState::from_query_inference(vec!["headache".into()], &bundle);
        assert_eq!(state.diagnosis, "Migraine");
        assert_eq!(state.recommendations, vec!["Dark room"]);
        assert!(state.recommended_specialist.is_empty());
    }
}
