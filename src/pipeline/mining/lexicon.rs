//! Direct symptom vocabulary and the single-utterance extractor.

/// Fixed symptom lexicon, grouped by body system.
pub const SYMPTOM_LEXICON: &[&str] = &[
    // Respiratory
    "fever", "cough", "sneezing", "runny nose", "congestion", "nasal congestion",
    "stuffy nose", "sore throat", "shortness of breath", "difficulty breathing",
    "wheezing", "phlegm", "mucus", "post nasal drip", "hoarse voice",
    "loss of smell", "loss of taste", "chest tightness", "rapid breathing",
    // Pain
    "headache", "severe headache", "migraine", "body aches", "muscle pain",
    "joint pain", "back pain", "lower back pain", "neck pain", "stiff neck",
    "chest pain", "stomach pain", "abdominal pain", "ear pain", "toothache",
    "eye pain", "throat pain", "painful swallowing", "flank pain", "pelvic pain",
    "leg pain", "foot pain", "arm pain", "calf pain", "kidney pain",
    "testicular pain", "discomfort",
    // Gastrointestinal
    "nausea", "vomiting", "diarrhea", "constipation", "bloating", "gas",
    "flatulence", "indigestion", "heartburn", "stomach cramps", "cramping",
    "blood in stool", "black stool", "loss of appetite", "increased appetite",
    "difficulty swallowing", "abdominal distension", "regurgitation",
    // Skin
    "rash", "hives", "itching", "swelling", "redness", "bruising", "dry skin",
    "blisters", "acne", "jaundice", "yellowing skin", "yellowing eyes",
    "skin lesions", "skin peeling", "sweating", "excessive sweating", "sweats",
    "night sweats", "cold sweats", "chills",
    // Cardiovascular
    "heart palpitations", "rapid heartbeat", "irregular heartbeat",
    "slow heartbeat", "high blood pressure", "low blood pressure", "dizziness",
    "fainting", "lightheadedness", "swollen ankles", "swollen feet",
    "swollen legs", "claudication",
    // Neurological
    "vertigo", "confusion", "mental confusion", "disorientation", "memory loss",
    "forgetfulness", "seizure", "tremor", "tingling", "numbness", "weakness",
    "sudden weakness", "paralysis", "difficulty speaking", "slurred speech",
    "blurred vision", "double vision", "visual disturbances",
    "sensitivity to light", "loss of balance", "poor coordination",
    "difficulty walking",
    // Psychological
    "anxiety", "depression", "mood swings", "irritability", "fatigue",
    "tiredness", "tired", "lethargy", "insomnia", "difficulty sleeping",
    "excessive sleeping", "nightmares", "stress", "panic attacks",
    "hallucinations", "paranoia", "feeling sad", "feeling worried",
    "hopelessness", "suicidal thoughts",
    // Urinary
    "painful urination", "frequent urination", "blood in urine", "dark urine",
    "cloudy urine", "foul-smelling urine", "urgency to urinate",
    "difficulty urinating", "decreased urination", "incontinence",
    // Reproductive
    "irregular periods", "heavy periods", "painful periods", "missed periods",
    "vaginal discharge", "vaginal bleeding", "vaginal dryness",
    "erectile dysfunction", "genital sores", "genital itching",
    "genital burning", "genital rash",
    // General
    "weight loss", "weight gain", "thirst", "excessive thirst", "swollen glands",
    "swollen lymph nodes", "dehydration", "malaise", "feeling unwell",
    "stiffness", "muscle spasms", "watery eyes", "ear discharge",
];

/// Every lexicon term occurring in `text`, in lexicon order, with terms that
/// are contained in a longer found term dropped.
pub(crate) fn lexicon_terms(text: &str) -> Vec<&'static str> {
    let mut found: Vec<&'static str> = Vec::new();
    for term in SYMPTOM_LEXICON {
        if text.contains(term) && !found.contains(term) {
            found.push(term);
        }
    }

    found
        .iter()
        .filter(|term| {
            !found
                .iter()
                .any(|other| other != *term && other.contains(**term))
        })
        .copied()
        .collect()
}

/// Extract symptoms from one utterance using only the direct vocabulary.
///
/// Keeps the most specific match: "runny nose" suppresses a bare "nose",
/// "severe headache" suppresses "headache".
pub fn extract_symptoms_from_query(query: &str) -> Vec<String> {
    let lower = query.to_lowercase();
    lexicon_terms(&lower).into_iter().map(String::from).collect()
}
