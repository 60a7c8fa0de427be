//! Remote specialist classification through an LLM completion.
//!
//! The model is asked for one category name. Its answer is cleaned and
//! matched against the known categories; anything unrecognized, and any
//! transport error, yields `None` so the caller falls through.

use std::sync::{Arc, LazyLock};

use regex::Regex;

use crate::knowledge::KnowledgeBase;
use crate::llm::LlmClient;

const SYSTEM_PROMPT: &str = "You are a medical triage assistant. \
Choose the single most appropriate specialist category for the patient. \
Answer with the category name exactly as listed and nothing else.";

/// Shortest answer accepted for substring matching.
const MIN_PARTIAL_LEN: usize = 3;

static MARKUP: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"[*_`#"“”‘’]"#).expect("Invalid markup regex"));

pub struct RemoteClassifier {
    client: Arc<dyn LlmClient>,
    model: String,
}

impl RemoteClassifier {
    pub fn new(client: Arc<dyn LlmClient>, model: &str) -> Self {
        Self {
            client,
            model: model.to_string(),
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Ask the model for a category. `None` on error or unrecognized answer.
    pub fn classify(&self, kb: &KnowledgeBase, symptoms: &[String], diagnosis: &str) -> Option<String> {
        let prompt = build_prompt(kb, symptoms, diagnosis);
        let answer = match self.client.generate(&self.model, &prompt, SYSTEM_PROMPT) {
            Ok(answer) => answer,
            Err(e) => {
                tracing::warn!(error = %e, model = %self.model, "Remote classifier unavailable, using rules");
                return None;
            }
        };

        let cleaned = clean_answer(&answer);
        let matched = match_category(kb, &cleaned);
        if matched.is_none() {
            tracing::warn!(answer_len = answer.len(), "Remote classifier answer is not a known category");
        }
        matched
    }
}

fn build_prompt(kb: &KnowledgeBase, symptoms: &[String], diagnosis: &str) -> String {
    let mut prompt = String::new();
    let symptoms = if symptoms.is_empty() {
        "none reported".to_string()
    } else {
        symptoms.join(", ")
    };
    let diagnosis = if diagnosis.trim().is_empty() { "not determined" } else { diagnosis };
    prompt.push_str(&format!("Symptoms: {symptoms}\nDiagnosis: {diagnosis}\n\nCategories:\n"));
    for profile in kb.specialists() {
        prompt.push_str(&format!("- {}: {}\n", profile.name, profile.keywords.join(", ")));
    }
    prompt.push_str("\nWhich category should the patient see?");
    prompt
}

/// First non-empty line, without quotes, markdown, a leading label or a
/// trailing period.
pub(crate) fn clean_answer(answer: &str) -> String {
    let line = answer
        .lines()
        .map(str::trim)
        .find(|l| !l.is_empty())
        .unwrap_or("");
    let line = MARKUP.replace_all(line, "");
    let line = match line.rsplit_once(':') {
        Some((_, after)) if !after.trim().is_empty() => after,
        _ => line.as_ref(),
    };
    line.trim()
        .trim_start_matches(['-', '\''])
        .trim_end_matches(['.', '\''])
        .trim()
        .to_string()
}

/// Exact, then case-insensitive, then substring match in either direction.
pub(crate) fn match_category(kb: &KnowledgeBase, answer: &str) -> Option<String> {
    if answer.is_empty() {
        return None;
    }
    let names = || kb.specialists().iter().map(|p| p.name.as_str());

    if let Some(name) = names().find(|n| *n == answer) {
        return Some(name.to_string());
    }
    if let Some(name) = names().find(|n| n.eq_ignore_ascii_case(answer)) {
        return Some(name.to_string());
    }

    let lower = answer.to_lowercase();
    names()
        .find(|n| {
            let n = n.to_lowercase();
            lower.contains(&n) || (lower.len() >= MIN_PARTIAL_LEN && n.contains(&lower))
        })
        .map(String::from)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::{LlmError, MockLlmClient};

    fn kb() -> KnowledgeBase {
        KnowledgeBase::builtin()
    }

    fn classify_with(answer: &str) -> Option<String> {
        let remote = RemoteClassifier::new(Arc::new(MockLlmClient::new(answer)), "llama3.2");
        remote.classify(&kb(), &["chest pain".into()], "")
    }

    #[test]
    fn exact_answer() {
        assert_eq!(classify_with("Cardiologist").as_deref(), Some("Cardiologist"));
    }

    #[test]
    fn quoted_and_marked_up_answers() {
        assert_eq!(classify_with("\"cardiologist\"").as_deref(), Some("Cardiologist"));
        assert_eq!(classify_with("**Cardiologist**.").as_deref(), Some("Cardiologist"));
        assert_eq!(classify_with("`Neurologist`\n\nBecause headaches.").as_deref(), Some("Neurologist"));
        assert_eq!(classify_with("Specialist: Urologist").as_deref(), Some("Urologist"));
    }

    #[test]
    fn substring_either_direction() {
        assert_eq!(
            classify_with("You should see an ENT Specialist soon").as_deref(),
            Some("ENT Specialist")
        );
        assert_eq!(classify_with("gastro").as_deref(), Some("Gastroenterologist"));
    }

    #[test]
    fn unknown_answer_is_none() {
        assert_eq!(classify_with("Veterinarian"), None);
        assert_eq!(classify_with(""), None);
        assert_eq!(classify_with("ok"), None);
    }

    #[test]
    fn transport_error_is_none() {
        let client = Arc::new(MockLlmClient::failing(LlmError::Connection("http://localhost:11434".into())));
        let remote = RemoteClassifier::new(client.clone(), "llama3.2");
        assert_eq!(remote.classify(&kb(), &[], "Flu"), None);
        assert_eq!(client.calls(), 1);
    }

    #[test]
    fn prompt_lists_every_category() {
        let kb = kb();
        let prompt = build_prompt(&kb, &["rash".into()], "");
        assert!(prompt.contains("Symptoms: rash"));
        assert!(prompt.contains("Diagnosis: not determined"));
        for profile in kb.specialists() {
            assert!(prompt.contains(&format!("- {}:", profile.name)));
        }
    }
}
