//! Named extraction rules applied to the lower-cased user text buffer.
//!
//! Each rule is a compiled regex plus a function turning one match into a raw
//! symptom phrase. Rules run in table order; phrases are normalized and
//! deduplicated by the caller.

use std::sync::LazyLock;

use regex::{Captures, Regex};

use super::lexicon::SYMPTOM_LEXICON;

/// A compiled extraction rule.
pub(crate) struct MiningRule {
    pub name: &'static str,
    regex: Regex,
    extract: fn(&Captures) -> Option<String>,
    /// Captures arbitrary text, so the result must pass the plausibility filter.
    pub free_form: bool,
}

impl MiningRule {
    /// Raw phrases produced by every match of this rule in `text`.
    pub fn apply(&self, text: &str) -> Vec<String> {
        self.regex
            .captures_iter(text)
            .filter_map(|caps| (self.extract)(&caps))
            .collect()
    }
}

fn rule(
    name: &'static str,
    regex: &str,
    extract: fn(&Captures) -> Option<String>,
    free_form: bool,
) -> MiningRule {
    MiningRule {
        name,
        regex: Regex::new(regex).expect("Invalid mining rule regex"),
        extract,
        free_form,
    }
}

fn group<'h>(caps: &Captures<'h>, i: usize) -> &'h str {
    caps.get(i).map(|m| m.as_str()).unwrap_or("")
}

fn located_pain(caps: &Captures) -> Option<String> {
    Some(format!("{}{} pain", group(caps, 1), group(caps, 2)))
}

fn whole_capture(caps: &Captures) -> Option<String> {
    caps.get(1).map(|m| m.as_str().to_string())
}

fn whole_match(caps: &Captures) -> Option<String> {
    caps.get(0).map(|m| m.as_str().to_string())
}

fn compound_state(caps: &Captures) -> Option<String> {
    let part = group(caps, 1);
    let state = group(caps, 2);
    let phrase = match state {
        "painful" | "aching" | "hurting" | "throbbing" | "killing me" => format!("{part} pain"),
        "blocked" | "stuffy" | "congested" => "congestion".to_string(),
        "itchy" => "itching".to_string(),
        _ => format!("{state} {part}"),
    };
    Some(phrase)
}

fn hurting_part(caps: &Captures) -> Option<String> {
    Some(format!("{} pain", group(caps, 1)))
}

/// Body parts a located pain can name.
pub(crate) const BODY_PARTS: &str = "head|back|chest|stomach|belly|tummy|abdomen|abdominal|side|hip|jaw|neck|ear|joint|muscle|leg|arm|foot|knee|shoulder|tooth|kidney|flank|pelvis|pelvic|eye|throat";

/// Alternation of every lexicon term, longest first, so the leftmost match
/// at any position is the most specific one.
fn vocabulary_pattern() -> String {
    let mut terms: Vec<&str> = SYMPTOM_LEXICON.to_vec();
    terms.sort_by_key(|t| std::cmp::Reverse(t.len()));
    let alternation = terms
        .iter()
        .map(|t| regex::escape(t))
        .collect::<Vec<_>>()
        .join("|");
    format!(r"\b(?:{alternation})\b")
}

/// Extraction rules in evaluation order.
pub(crate) static MINING_RULES: LazyLock<Vec<MiningRule>> = LazyLock::new(|| {
    vec![
        rule(
            "pain_in_location",
            &format!(r"\b(?:pain|ache|aching|soreness)\s+in\s+(?:my\s+|the\s+|his\s+|her\s+)?((?:lower|upper|left|right)\s+)?({BODY_PARTS})\b"),
            located_pain,
            false,
        ),
        rule(
            "location_pain",
            &format!(r"\b((?:lower|upper)\s+)?({BODY_PARTS})\s?(?:pain|ache)s?\b"),
            located_pain,
            false,
        ),
        rule(
            "i_have",
            r"\bi(?:\s+have|'ve)?(?:\s+been)?(?:\s+got|\s+am\s+having|'m\s+having|\s+having|\s+am\s+suffering\s+from|'m\s+suffering\s+from|\s+am\s+experiencing|'m\s+experiencing|\s+have|'ve)\s+([a-z][a-z\s'-]*?)(?:\s+(?:and|since|for|but|when|because|with|that|which)\b|[.,;:!?\n]|$)",
            whole_capture,
            true,
        ),
        rule("direct_vocabulary", &vocabulary_pattern(), whole_match, false),
        rule(
            "my_part_is_state",
            r"\bmy\s+([a-z]+)\s+(?:is|are|feels?|has\s+been|have\s+been)\s+(?:really\s+|very\s+|so\s+|a\s+bit\s+|kind\s+of\s+)?(sore|swollen|itchy|stiff|red|blocked|runny|stuffy|congested|numb|burning|painful|aching|hurting|throbbing|killing\s+me)\b",
            compound_state,
            false,
        ),
        rule(
            "my_part_hurts",
            r"\bmy\s+((?:lower\s+|upper\s+)?[a-z]+)\s+(?:hurts|aches|is\s+hurting|has\s+been\s+hurting|is\s+killing\s+me)\b",
            hurting_part,
            false,
        ),
        rule(
            "duration",
            r"\b([a-z]+(?:\s+[a-z]+)?)\s+(?:for|since)\s+(?:the\s+)?(?:past\s+|last\s+)?(?:(?:\d+|a|an|one|two|three|four|five|six|seven|several|few|couple\s+of)\s+(?:days?|weeks?|months?|hours?)|yesterday|last\s+night|this\s+morning)\b",
            whole_capture,
            true,
        ),
    ]
});

// ═══════════════════════════════════════════
// Domain post-passes
// ═══════════════════════════════════════════

/// A pattern that, when present anywhere in the buffer, implies one symptom.
pub(crate) struct ImpliedSymptom {
    pub name: &'static str,
    regex: Regex,
    pub symptom: &'static str,
}

impl ImpliedSymptom {
    pub fn is_match(&self, text: &str) -> bool {
        self.regex.is_match(text)
    }
}

fn implied(name: &'static str, regex: &str, symptom: &'static str) -> ImpliedSymptom {
    ImpliedSymptom {
        name,
        regex: Regex::new(regex).expect("Invalid post-pass regex"),
        symptom,
    }
}

pub(crate) static URINARY_RULES: LazyLock<Vec<ImpliedSymptom>> = LazyLock::new(|| {
    vec![
        implied(
            "blood_in_urine",
            r"\b(?:pink|red|bloody|reddish)\s+(?:urine|pee)\b|\bblood\s+in\s+(?:my\s+)?(?:urine|pee)\b|\b(?:urine|pee)\s+(?:is|looks)\s+(?:pink|red|bloody|reddish)\b",
            "blood in urine",
        ),
        implied(
            "dark_urine",
            r"\b(?:dark|brown)\s+(?:urine|pee)\b|\b(?:urine|pee)\s+(?:is|looks)\s+(?:dark|brown)\b",
            "dark urine",
        ),
        implied(
            "cloudy_urine",
            r"\bcloudy\s+(?:urine|pee)\b|\b(?:urine|pee)\s+(?:is|looks)\s+cloudy\b",
            "cloudy urine",
        ),
        implied(
            "painful_urination",
            r"\b(?:burn(?:s|ing)?|pain(?:ful)?|hurts?|sting(?:s|ing)?)\s+(?:when|while|during|after)\s+(?:i\s+)?(?:pee|urinat)|\bpainful\s+urination\b|\bhurts\s+to\s+(?:pee|urinate)\b|\bburning\s+(?:urination|sensation\s+when\s+(?:i\s+)?(?:pee|urinat))",
            "painful urination",
        ),
        implied(
            "frequent_urination",
            r"\b(?:pee|peeing|urinat\w*)\s+(?:a\s+lot|frequently|often|all\s+the\s+time|constantly)\b|\bfrequent(?:ly)?\s+(?:urination|peeing|urinating)\b|\bgoing\s+to\s+the\s+(?:bathroom|toilet)\s+(?:a\s+lot|often|frequently)\b",
            "frequent urination",
        ),
    ]
});

/// Vague phrases superseded once a specific urinary symptom is found.
pub(crate) const URINARY_NOISE: &[&str] = &[
    "urine", "pee", "burning", "pink urine", "red urine", "bloody urine",
    "reddish urine", "brown urine", "dark pee", "urination",
];

pub(crate) static ABDOMINAL_RULES: LazyLock<Vec<ImpliedSymptom>> = LazyLock::new(|| {
    vec![
        implied(
            "right_lower_abdomen",
            r"\b(?:right\s+lower|lower\s+right)\s+(?:side\s+of\s+(?:my\s+|the\s+)?)?(?:abdomen|abdominal|belly|stomach|tummy|side)\b",
            "right lower abdominal pain",
        ),
        implied(
            "abdominal_pain",
            r"\b(?:stomach|belly|tummy|abdomen|abdominal)\s*(?:pain|ache|hurts|cramps?)\b|\b(?:pain|ache|cramps?)\s+in\s+(?:my\s+|the\s+)?(?:stomach|belly|tummy|abdomen)\b|\bmy\s+(?:stomach|belly|tummy)\s+(?:hurts|is\s+hurting|aches)\b",
            "abdominal pain",
        ),
    ]
});

/// Abdominal location phrases only count as pain when the buffer talks
/// about pain at all.
pub(crate) static PAIN_CONTEXT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b(?:pain|painful|hurts?|hurting|aches?|aching|tender|sore|cramps?)\b")
        .expect("Invalid pain context regex")
});

// ═══════════════════════════════════════════
// First-turn greeting
// ═══════════════════════════════════════════

static GREETING: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*(?:hi|hello|hey)\b[\s,!.]*(?:there\s+)?(?:dr\.?|doc|doctor)\b")
        .expect("Invalid greeting regex")
});

static HAVING: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b(?:i\s+am|i'm)\s+having\s+([^.!?\n]+)").expect("Invalid having regex")
});

static FRAGMENT_SPLIT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\s*(?:,|&|\band\b|\bwith\b|\bplus\b)\s*").expect("Invalid fragment split regex")
});

/// Symptom fragments listed after "i am having" in a greeting first turn.
pub(crate) fn greeting_fragments(first_turn: &str) -> Vec<String> {
    let lower = first_turn.to_lowercase();
    if !GREETING.is_match(&lower) {
        return Vec::new();
    }
    let Some(caps) = HAVING.captures(&lower) else {
        return Vec::new();
    };
    FRAGMENT_SPLIT
        .split(group(&caps, 1))
        .map(str::trim)
        .filter(|f| !f.is_empty())
        .map(String::from)
        .collect()
}
