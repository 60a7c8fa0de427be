use std::collections::HashSet;

use serde::{Deserialize, Serialize};

/// Diagnosis label used when no symptom information is available.
pub const INSUFFICIENT_DIAGNOSIS: &str = "Insufficient symptom information";

/// Diagnosis label meaning "not determined yet".
pub const UNKNOWN_DIAGNOSIS: &str = "Unknown";

/// Follow-up used when nothing more specific is known.
pub const GENERIC_FOLLOW_UP: &str =
    "Please consult a healthcare provider if your symptoms persist or worsen.";

/// Diagnosis label, advice lists and follow-up instruction.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiagnosisBundle {
    pub diagnosis: String,
    #[serde(default)]
    pub recommendations: Vec<String>,
    #[serde(default)]
    pub avoid: Vec<String>,
    #[serde(default)]
    pub follow_up: String,
}

impl DiagnosisBundle {
    pub fn new(diagnosis: &str, recommendations: &[&str], avoid: &[&str], follow_up: &str) -> Self {
        Self {
            diagnosis: diagnosis.to_string(),
            recommendations: recommendations.iter().map(|s| s.to_string()).collect(),
            avoid: avoid.iter().map(|s| s.to_string()).collect(),
            follow_up: follow_up.to_string(),
        }
    }

    /// A bundle carrying only a diagnosis label and follow-up.
    pub fn label(diagnosis: &str, follow_up: &str) -> Self {
        Self::new(diagnosis, &[], &[], follow_up)
    }

    pub fn insufficient() -> Self {
        Self::label(INSUFFICIENT_DIAGNOSIS, "")
    }

    /// Human-readable summary for a single-utterance answer.
    pub fn summary(&self, symptoms: &[String]) -> String {
        let mut out = String::new();
        if !symptoms.is_empty() {
            out.push_str(&format!(
                "Based on your symptoms ({}), you may have:\n\n",
                symptoms.join(", ")
            ));
        }
        out.push_str(&self.diagnosis);
        out.push('\n');

        if !self.recommendations.is_empty() {
            out.push_str("\nRecommendations:\n");
            for item in self.recommendations.iter().take(2) {
                out.push_str(&format!("- {item}\n"));
            }
        }
        if !self.avoid.is_empty() {
            out.push_str("\nPlease avoid:\n");
            for item in self.avoid.iter().take(2) {
                out.push_str(&format!("- {item}\n"));
            }
        }
        if !self.follow_up.is_empty() {
            out.push_str(&format!("\nFollow-up: {}\n", self.follow_up));
        }
        out
    }
}

/// True when a diagnosis label means "nothing determined".
pub fn is_undetermined(diagnosis: &str) -> bool {
    let trimmed = diagnosis.trim();
    trimmed.is_empty() || trimmed.eq_ignore_ascii_case(UNKNOWN_DIAGNOSIS)
}

/// One named illness.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Condition {
    pub name: String,
    #[serde(default)]
    pub info: String,
    #[serde(flatten)]
    pub bundle: DiagnosisBundle,
}

/// A set of symptom keys mapped to one diagnosis bundle.
///
/// `symptoms` keeps declaration order for display; matching treats it as a set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SymptomCombination {
    pub symptoms: Vec<String>,
    #[serde(flatten)]
    pub bundle: DiagnosisBundle,
}

impl SymptomCombination {
    /// Number of distinct symptom keys.
    pub fn size(&self) -> usize {
        self.symptoms.iter().collect::<HashSet<_>>().len()
    }

    /// |combination ∩ reported|
    pub fn overlap(&self, reported: &HashSet<&str>) -> usize {
        self.symptoms
            .iter()
            .map(String::as_str)
            .collect::<HashSet<_>>()
            .intersection(reported)
            .count()
    }
}

/// A specialist category and the keywords that route to it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpecialistProfile {
    pub name: String,
    pub keywords: Vec<String>,
}
