//! Built-in specialist categories and their routing keywords.
//!
//! Declaration order matters: the rule fallback walks this table top to
//! bottom and returns the first category whose keywords hit the diagnosis.
//! Keywords are matched as raw substrings, so no keyword may be a fragment
//! of an unrelated word ("ear" would hit "heart").

use crate::models::SpecialistProfile;

/// Stage 1 default: nothing is known yet.
pub const DEFAULT_SPECIALIST: &str = "General Physician";

/// Nonspecific or common respiratory complaints.
pub const RESPIRATORY_SPECIALIST: &str = "General Physician";

/// Absolute fallback when no rule matched.
pub const FALLBACK_SPECIALIST: &str = "Internal Medicine";

fn profile(name: &str, keywords: &[&str]) -> SpecialistProfile {
    SpecialistProfile {
        name: name.to_string(),
        keywords: keywords.iter().map(|k| k.to_string()).collect(),
    }
}

/// All built-in specialist profiles, in routing order.
pub fn builtin_specialists() -> Vec<SpecialistProfile> {
    vec![
        profile(
            "Emergency Medicine",
            &[
                "medical emergency",
                "heart attack",
                "stroke",
                "pulmonary embolism",
                "meningitis",
                "mental health crisis",
                "suicidal thoughts",
                "facial drooping",
                "blue lips",
                "pain radiating to arm or jaw",
            ],
        ),
        profile(
            "Urologist",
            &[
                "urinary",
                "urination",
                "urine",
                "kidney",
                "bladder",
                "flank pain",
                "urgency",
                "incontinence",
            ],
        ),
        profile(
            "Cardiologist",
            &[
                "cardiac",
                "chest pain",
                "heart palpitations",
                "rapid heartbeat",
                "irregular heartbeat",
                "slow heartbeat",
                "blood pressure",
                "swollen ankles",
            ],
        ),
        profile(
            "Pulmonologist",
            &[
                "asthma",
                "pneumonia",
                "bronchitis",
                "wheezing",
                "shortness of breath",
                "difficulty breathing",
                "chest tightness",
                "lung",
            ],
        ),
        profile(
            "Neurologist",
            &[
                "migraine",
                "headache",
                "seizure",
                "numbness",
                "tingling",
                "dizziness",
                "vertigo",
                "confusion",
                "tremor",
                "memory loss",
                "sensitivity to light",
            ],
        ),
        profile(
            "Gastroenterologist",
            &[
                "gastro",
                "stomach",
                "abdominal",
                "nausea",
                "vomiting",
                "diarrhea",
                "constipation",
                "heartburn",
                "acid reflux",
                "gerd",
                "food poisoning",
                "bloating",
                "appendicitis",
                "regurgitation",
            ],
        ),
        profile(
            "Dermatologist",
            &[
                "rash",
                "itching",
                "skin",
                "hives",
                "acne",
                "blisters",
                "shingles",
                "dermatitis",
                "eczema",
            ],
        ),
        profile(
            "ENT Specialist",
            &[
                "ear pain",
                "ear infection",
                "ear discharge",
                "hearing",
                "sinus",
                "tonsil",
                "strep throat",
                "swollen glands",
                "difficulty swallowing",
            ],
        ),
        profile(
            "Orthopedist",
            &[
                "back pain",
                "back strain",
                "joint pain",
                "joint swelling",
                "arthritis",
                "muscle spasms",
                "stiffness",
                "range of motion",
                "sprain",
                "fracture",
            ],
        ),
        profile(
            "Psychiatrist",
            &[
                "depression",
                "anxiety",
                "mental health",
                "panic",
                "insomnia",
                "hopelessness",
                "withdrawal",
                "mood swings",
            ],
        ),
        profile(
            "Endocrinologist",
            &[
                "diabetes",
                "thyroid",
                "excessive thirst",
                "unexplained weight loss",
                "hormone",
            ],
        ),
        profile(
            "Allergist",
            &[
                "allergy",
                "allergies",
                "allergic",
                "sneezing",
                "watery eyes",
            ],
        ),
        profile(
            "General Physician",
            &[
                "fever",
                "common cold",
                "flu",
                "viral infection",
                "cough",
                "sore throat",
                "fatigue",
                "body aches",
                "chills",
            ],
        ),
        profile(
            "Internal Medicine",
            &["chronic", "unexplained", "malaise", "weakness", "lethargy"],
        ),
    ]
}
