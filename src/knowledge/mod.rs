//! Knowledge base: conditions, symptom combinations and specialist
//! routing keywords.
//!
//! Built once, never mutated. Components receive it as `&KnowledgeBase`
//! (or a shared `Arc`) and only read from it. A JSON file with the same
//! shape can replace the built-in tables without code changes.

pub mod combinations;
pub mod conditions;
pub mod search;
pub mod specialists;

pub use search::*;

use std::collections::HashSet;
use std::path::Path;
use std::sync::{Arc, LazyLock};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::{Condition, SpecialistProfile, SymptomCombination};

#[derive(Error, Debug)]
pub enum KnowledgeError {
    #[error("Cannot read knowledge base: {0}")]
    Io(#[from] std::io::Error),

    #[error("Malformed knowledge base JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid knowledge base: {0}")]
    Validation(String),
}

static BUILTIN: LazyLock<Arc<KnowledgeBase>> =
    LazyLock::new(|| Arc::new(KnowledgeBase::builtin()));

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KnowledgeBase {
    conditions: Vec<Condition>,
    combinations: Vec<SymptomCombination>,
    specialists: Vec<SpecialistProfile>,
    default_specialist: String,
    respiratory_specialist: String,
    fallback_specialist: String,
}

impl KnowledgeBase {
    /// The hand-authored tables shipped with the crate.
    pub fn builtin() -> Self {
        Self {
            conditions: conditions::builtin_conditions(),
            combinations: combinations::builtin_combinations(),
            specialists: specialists::builtin_specialists(),
            default_specialist: specialists::DEFAULT_SPECIALIST.to_string(),
            respiratory_specialist: specialists::RESPIRATORY_SPECIALIST.to_string(),
            fallback_specialist: specialists::FALLBACK_SPECIALIST.to_string(),
        }
    }

    /// Process-wide built-in knowledge base.
    pub fn shared() -> Arc<Self> {
        Arc::clone(&BUILTIN)
    }

    /// Parse and validate a knowledge base from JSON.
    pub fn from_json(json: &str) -> Result<Self, KnowledgeError> {
        let mut kb: Self = serde_json::from_str(json)?;
        kb.normalize();
        kb.validate()?;
        Ok(kb)
    }

    pub fn from_json_file(path: &Path) -> Result<Self, KnowledgeError> {
        let json = std::fs::read_to_string(path)?;
        let kb = Self::from_json(&json)?;
        tracing::info!(
            path = %path.display(),
            conditions = kb.conditions.len(),
            combinations = kb.combinations.len(),
            specialists = kb.specialists.len(),
            "Loaded knowledge base"
        );
        Ok(kb)
    }

    /// Lower-case every lookup key so matching can compare exactly.
    fn normalize(&mut self) {
        for condition in &mut self.conditions {
            condition.name = condition.name.trim().to_lowercase();
        }
        for combination in &mut self.combinations {
            for symptom in &mut combination.symptoms {
                *symptom = symptom.trim().to_lowercase();
            }
        }
        for profile in &mut self.specialists {
            for keyword in &mut profile.keywords {
                *keyword = keyword.trim().to_lowercase();
            }
        }
    }

    pub fn validate(&self) -> Result<(), KnowledgeError> {
        let mut names = HashSet::new();
        for condition in &self.conditions {
            if condition.name.is_empty() {
                return Err(KnowledgeError::Validation("condition with empty name".into()));
            }
            if !names.insert(condition.name.as_str()) {
                return Err(KnowledgeError::Validation(format!(
                    "duplicate condition '{}'",
                    condition.name
                )));
            }
        }

        for (i, combination) in self.combinations.iter().enumerate() {
            if combination.symptoms.iter().all(|s| s.is_empty()) {
                return Err(KnowledgeError::Validation(format!(
                    "combination #{i} has no symptoms"
                )));
            }
        }

        let mut specialists = HashSet::new();
        for profile in &self.specialists {
            if !specialists.insert(profile.name.as_str()) {
                return Err(KnowledgeError::Validation(format!(
                    "duplicate specialist '{}'",
                    profile.name
                )));
            }
        }

        for fallback in [
            &self.default_specialist,
            &self.respiratory_specialist,
            &self.fallback_specialist,
        ] {
            if !specialists.contains(fallback.as_str()) {
                return Err(KnowledgeError::Validation(format!(
                    "fallback specialist '{fallback}' is not in the specialist table"
                )));
            }
        }

        Ok(())
    }

    pub fn conditions(&self) -> &[Condition] {
        &self.conditions
    }

    pub fn combinations(&self) -> &[SymptomCombination] {
        &self.combinations
    }

    pub fn specialists(&self) -> &[SpecialistProfile] {
        &self.specialists
    }

    pub fn condition(&self, name: &str) -> Option<&Condition> {
        self.conditions.iter().find(|c| c.name == name)
    }

    pub fn is_specialist(&self, name: &str) -> bool {
        self.specialists.iter().any(|p| p.name == name)
    }

    pub fn default_specialist(&self) -> &str {
        &self.default_specialist
    }

    pub fn respiratory_specialist(&self) -> &str {
        &self.respiratory_specialist
    }

    pub fn fallback_specialist(&self) -> &str {
        &self.fallback_specialist
    }

    /// Every distinct specialist keyword, across all profiles.
    pub fn specialist_keywords(&self) -> impl Iterator<Item = &str> {
        let mut seen = HashSet::new();
        self.specialists
            .iter()
            .flat_map(|p| p.keywords.iter().map(String::as_str))
            .filter(move |k| seen.insert(*k))
    }
}

impl Default for KnowledgeBase {
    fn default() -> Self {
        Self::builtin()
    }
}
