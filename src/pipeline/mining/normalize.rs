//! Symptom phrase normalization: boilerplate stripping, reordering and
//! synonym canonicalization.

use std::sync::LazyLock;

use regex::Regex;

use super::lexicon::SYMPTOM_LEXICON;
use super::rules::BODY_PARTS;

/// Leading words that carry no symptom meaning. Intensity words with
/// clinical meaning ("severe", "sudden") stay.
const BOILERPLATE_PREFIXES: &[&str] = &[
    "i have been having ", "i've been having ", "i have ", "i've got ", "i've ",
    "i got ", "i am having ", "i'm having ", "i am ", "i'm ", "been having ",
    "having ", "been ", "had ", "got ", "feeling ", "experiencing ",
    "suffering from ", "a bit of ", "a little ", "a lot of ", "kind of ",
    "sort of ", "a ", "an ", "some ", "the ", "my ", "bad ", "really ",
    "very ", "terrible ", "mild ", "slight ", "constant ", "awful ",
    "and ", "or ", "but ", "plus ", "also ",
];

/// Words that are not a symptom on their own.
const FILLER_WORDS: &[&str] = &["a", "an", "i", "my", "some", "the", "it", "this", "that"];

const TRAILING_FILLER: &[&str] = &[
    " too", " as well", " also", " lately", " recently", " today", " now",
    " again", " all day", " all the time", " at night", " all night",
    " in the morning", " every day", " at times",
];

/// Exact-phrase synonyms mapped to their canonical symptom key.
const SYNONYMS: &[(&str, &str)] = &[
    ("stomach pain", "abdominal pain"),
    ("stomach ache", "abdominal pain"),
    ("stomachache", "abdominal pain"),
    ("belly pain", "abdominal pain"),
    ("belly ache", "abdominal pain"),
    ("tummy pain", "abdominal pain"),
    ("tummy ache", "abdominal pain"),
    ("abdomen pain", "abdominal pain"),
    ("lower belly pain", "lower abdominal pain"),
    ("lower stomach pain", "lower abdominal pain"),
    ("lower abdomen pain", "lower abdominal pain"),
    ("backache", "back pain"),
    ("back ache", "back pain"),
    ("earache", "ear pain"),
    ("ear ache", "ear pain"),
    ("head pain", "headache"),
    ("head ache", "headache"),
    ("headaches", "headache"),
    ("throat pain", "sore throat"),
    ("temperature", "fever"),
    ("high temperature", "fever"),
    ("fevers", "fever"),
    ("feverish", "fever"),
    ("stuffy nose", "congestion"),
    ("blocked nose", "congestion"),
    ("nasal congestion", "congestion"),
    ("congested nose", "congestion"),
    ("body ache", "body aches"),
    ("body pain", "body aches"),
    ("body pains", "body aches"),
    ("aching body", "body aches"),
    ("tired", "fatigue"),
    ("tiredness", "fatigue"),
    ("exhausted", "fatigue"),
    ("exhaustion", "fatigue"),
    ("throwing up", "vomiting"),
    ("vomit", "vomiting"),
    ("nauseous", "nausea"),
    ("nauseated", "nausea"),
    ("sick", "nausea"),
    ("itchy", "itching"),
    ("itchiness", "itching"),
    ("itchy skin", "itching"),
    ("short of breath", "shortness of breath"),
    ("out of breath", "shortness of breath"),
    ("breathlessness", "shortness of breath"),
    ("dizzy", "dizziness"),
    ("chest ache", "chest pain"),
    ("sneeze", "sneezing"),
    ("sneezes", "sneezing"),
    ("coughs", "cough"),
    ("coughing", "cough"),
    ("diarrhoea", "diarrhea"),
    ("sore neck", "neck pain"),
    ("tooth pain", "toothache"),
];

static PAIN_IN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"^(?:pain|ache|aching|soreness)\s+in\s+(?:my\s+|the\s+)?((?:(?:lower|upper|left|right)\s+)?(?:{BODY_PARTS}))$"
    ))
    .expect("Invalid pain-in regex")
});

static SPACES: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("Invalid whitespace regex"));

/// Hints that a free-form fragment describes a complaint rather than an
/// arbitrary object ("i have a question").
static SYMPTOM_HINT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"pain|ache|fever|cough|sore|rash|itch|swell|swollen|nause|vomit|diarr|dizz|fatigue|tired|cramp|bleed|blood|burn|numb|tingl|stiff|weak|congest|sneez|chill|sweat|throat|breath|wheez|discharge|urin|blister|spasm|thirst|insomnia|sleep|anxi|depress|confus|faint|palpitat|lump|bloat|constipat|heartburn|migraine|hives|runny|stuffy|temperature|sick|cold|flu",
    )
    .expect("Invalid symptom hint regex")
});

/// Every lexicon term and synonym, longest first, as whole words.
static KNOWN_TERMS: LazyLock<Regex> = LazyLock::new(|| {
    let mut terms: Vec<&str> = SYMPTOM_LEXICON
        .iter()
        .copied()
        .chain(SYNONYMS.iter().map(|(from, _)| *from))
        .collect();
    terms.sort_unstable();
    terms.dedup();
    terms.sort_by_key(|t| std::cmp::Reverse(t.len()));
    let alternation = terms.iter().map(|t| regex::escape(t)).collect::<Vec<_>>().join("|");
    Regex::new(&format!(r"\b(?:{alternation})\b")).expect("Invalid known terms regex")
});

/// Longest phrase accepted from free-form captures.
const MAX_FRAGMENT_WORDS: usize = 5;

/// Stops early at a lexicon term so "feeling sad" keeps its "feeling".
fn strip_prefixes(mut phrase: &str) -> &str {
    while !SYMPTOM_LEXICON.contains(&phrase) {
        let Some(rest) = BOILERPLATE_PREFIXES.iter().find_map(|p| phrase.strip_prefix(p)) else {
            break;
        };
        phrase = rest.trim_start();
    }
    phrase
}

fn strip_suffixes(mut phrase: &str) -> &str {
    loop {
        let before = phrase;
        for suffix in TRAILING_FILLER {
            if let Some(rest) = phrase.strip_suffix(suffix) {
                phrase = rest.trim_end();
            }
        }
        if phrase == before {
            return phrase;
        }
    }
}

/// Map a phrase to its canonical key, or return it unchanged.
pub fn canonical(phrase: &str) -> &str {
    SYNONYMS
        .iter()
        .find(|(from, _)| *from == phrase)
        .map(|(_, to)| *to)
        .unwrap_or(phrase)
}

/// Normalize one raw symptom phrase. Returns `None` when nothing is left.
pub fn normalize_symptom(raw: &str) -> Option<String> {
    let lower = raw.to_lowercase();
    let collapsed = SPACES.replace_all(lower.trim(), " ");
    let trimmed = collapsed.trim_matches(|c: char| !c.is_alphanumeric());

    let phrase = strip_suffixes(strip_prefixes(trimmed));
    let phrase = phrase.trim_matches(|c: char| !c.is_alphanumeric());
    if phrase.is_empty() || FILLER_WORDS.contains(&phrase) {
        return None;
    }

    let reordered = match PAIN_IN.captures(phrase) {
        Some(caps) => format!("{} pain", &caps[1]),
        None => phrase.to_string(),
    };

    Some(canonical(&reordered).to_string())
}

/// Canonical keys of the known symptom terms a phrase mentions, in order.
pub fn symptom_keys(phrase: &str) -> Vec<String> {
    let mut keys: Vec<String> = Vec::new();
    for m in KNOWN_TERMS.find_iter(phrase) {
        let key = canonical(m.as_str());
        if !keys.iter().any(|k| k == key) {
            keys.push(key.to_string());
        }
    }
    keys
}

/// Whether a normalized free-form fragment plausibly names a symptom.
pub fn is_plausible_symptom(phrase: &str) -> bool {
    !phrase.is_empty()
        && phrase.split_whitespace().count() <= MAX_FRAGMENT_WORDS
        && (SYMPTOM_LEXICON.contains(&phrase) || SYMPTOM_HINT.is_match(phrase))
}
