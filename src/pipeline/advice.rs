//! Recommendation, avoid-list and follow-up extraction from assistant replies.
//!
//! Extraction only ever adds to a patient state: `merge_advice` appends new
//! items and never clears what an earlier turn recorded.

use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;

use crate::knowledge::KnowledgeBase;
use crate::models::{is_undetermined, AdviceSource, PatientState, GENERIC_FOLLOW_UP};

/// Minimum length of a sentence accepted from an unbulleted span.
const MIN_SENTENCE_LEN: usize = 10;

/// Advice found for one reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedAdvice {
    pub recommendations: Vec<String>,
    pub avoid: Vec<String>,
    pub follow_up: String,
    pub source: AdviceSource,
}

impl ExtractedAdvice {
    pub fn is_empty(&self) -> bool {
        self.recommendations.is_empty() && self.avoid.is_empty() && self.follow_up.is_empty()
    }
}

// ═══════════════════════════════════════════
// Templates
// ═══════════════════════════════════════════

enum Capture {
    /// A header followed by a block; bullets inside it are preferred.
    Span,
    /// A single imperative phrase.
    Phrase,
}

struct AdviceTemplate {
    name: &'static str,
    regex: Regex,
    capture: Capture,
}

fn template(name: &'static str, regex: &str, capture: Capture) -> AdviceTemplate {
    AdviceTemplate {
        name,
        regex: Regex::new(regex).expect("Invalid advice template regex"),
        capture,
    }
}

static RECOMMENDATION_TEMPLATES: LazyLock<Vec<AdviceTemplate>> = LazyLock::new(|| {
    vec![
        template(
            "recommendations_header",
            r"(?is)(?:^|\n)[ \t]*(?:recommendations?|what you can do|self[- ]care)[ \t]*:(.*?)(?:\n[ \t]*\n|\n[ \t]*(?:please avoid|things to avoid|what to avoid|avoid|follow[- ]?up)[^\n]*:|$)",
            Capture::Span,
        ),
        template(
            "i_recommend",
            r"(?i)\bi\s+(?:would\s+)?(?:strongly\s+)?(?:recommend|suggest|advise)\s+(?:that\s+you\s+)?([^.!?\n]+)",
            Capture::Phrase,
        ),
        template(
            "you_should",
            r"(?i)\b(?:you\s+should|try\s+to|make\s+sure\s+(?:to|you))\s+([^.!?\n]+)",
            Capture::Phrase,
        ),
    ]
});

static AVOID_TEMPLATES: LazyLock<Vec<AdviceTemplate>> = LazyLock::new(|| {
    vec![
        template(
            "avoid_header",
            r"(?is)(?:^|\n)[ \t]*(?:please avoid|things to avoid|what to avoid|avoid)[ \t]*:(.*?)(?:\n[ \t]*\n|\n[ \t]*(?:recommendations?|follow[- ]?up)[^\n]*:|$)",
            Capture::Span,
        ),
        template(
            "dont",
            r"(?i)\b(?:don't|do\s+not|avoid|refrain\s+from|stay\s+away\s+from)\s+([^.!?\n]+)",
            Capture::Phrase,
        ),
    ]
});

/// Follow-up patterns in priority order; the first that matches wins.
static FOLLOW_UP_TEMPLATES: LazyLock<Vec<(&'static str, Regex)>> = LazyLock::new(|| {
    [
        ("follow_up_header", r"(?i)follow[- ]?up\s*:\s*([^\n]+)"),
        (
            "if_symptoms_persist",
            r"(?i)\b(if\s+(?:your\s+)?symptoms\s+(?:persist|worsen|get\s+worse|don't\s+improve|do\s+not\s+improve)[^.!?\n]*)",
        ),
        (
            "see_a_doctor",
            r"(?i)\b((?:please\s+)?(?:see|consult|contact|visit)\s+(?:a|your)\s+(?:doctor|healthcare\s+provider|physician|gp)[^.!?\n]*)",
        ),
    ]
    .into_iter()
    .map(|(name, re)| (name, Regex::new(re).expect("Invalid follow-up regex")))
    .collect()
});

static BULLET: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^[ \t]*(?:[-•*]|\d+[.)])[ \t]+(.+)$").expect("Invalid bullet regex")
});

static SENTENCE_END: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[.!?]\s+|\n").expect("Invalid sentence regex"));

static STRONG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\*\*|__").expect("Invalid emphasis regex"));

static INLINE_EMPHASIS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\*([^*\n]+)\*").expect("Invalid inline emphasis regex"));

static HEADING: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^[ \t]*#{1,6}[ \t]*").expect("Invalid heading regex"));

static NEGATIVE_START: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(?:avoid|don't|do\s+not|refrain|stay\s+away)\b").expect("Invalid negation regex")
});

/// Diagnosis substrings keyed to the condition whose advice is reused.
const CANNED_ADVICE: &[(&[&str], &str)] = &[
    (&["urinary tract infection", "uti"], "urinary tract infection"),
    (&["flu", "cold", "viral"], "flu"),
];

/// Remove markdown emphasis, headings and code ticks.
pub fn strip_markup(text: &str) -> String {
    let text = STRONG.replace_all(text, "");
    let text = INLINE_EMPHASIS.replace_all(&text, "$1");
    let text = HEADING.replace_all(&text, "");
    text.replace('`', "")
}

fn clean_item(raw: &str) -> Option<String> {
    let item = raw
        .trim()
        .trim_start_matches(['-', '•', '*'])
        .trim()
        .trim_end_matches(['.', ':', ';', ','])
        .trim();
    if item.is_empty() {
        return None;
    }
    let mut chars = item.chars();
    let first = chars.next()?;
    Some(first.to_uppercase().chain(chars).collect())
}

fn span_items(span: &str) -> Vec<String> {
    let bullets: Vec<&str> = BULLET
        .captures_iter(span)
        .filter_map(|c| c.get(1).map(|m| m.as_str()))
        .collect();
    if !bullets.is_empty() {
        return bullets.into_iter().filter_map(clean_item).collect();
    }
    SENTENCE_END
        .split(span)
        .map(str::trim)
        .filter(|s| s.len() > MIN_SENTENCE_LEN)
        .filter_map(clean_item)
        .collect()
}

fn dedupe(items: Vec<String>) -> Vec<String> {
    let mut seen = HashSet::new();
    items
        .into_iter()
        .filter(|item| seen.insert(item.to_lowercase()))
        .collect()
}

/// Items from the first template that yields any.
fn first_template_items(
    templates: &[AdviceTemplate],
    text: &str,
    keep: impl Fn(&str) -> bool,
) -> Vec<String> {
    for t in templates {
        let items: Vec<String> = t
            .regex
            .captures_iter(text)
            .filter_map(|c| c.get(1).map(|m| m.as_str()))
            .flat_map(|captured| match t.capture {
                Capture::Span => span_items(captured),
                Capture::Phrase => clean_item(captured).into_iter().collect(),
            })
            .filter(|item| keep(item.as_str()))
            .collect();
        if !items.is_empty() {
            tracing::debug!(template = t.name, items = items.len(), "Advice template matched");
            return dedupe(items);
        }
    }
    Vec::new()
}

fn extract_follow_up(text: &str) -> String {
    for (name, regex) in FOLLOW_UP_TEMPLATES.iter() {
        if let Some(found) = regex.captures(text).and_then(|c| c.get(1)) {
            if let Some(item) = clean_item(found.as_str()) {
                tracing::debug!(template = *name, "Follow-up template matched");
                return format!("{item}.");
            }
        }
    }
    String::new()
}

/// Canned advice for a known diagnosis, drawn from the knowledge base.
fn lookup_advice(kb: &KnowledgeBase, diagnosis: &str) -> Option<ExtractedAdvice> {
    let lower = diagnosis.to_lowercase();
    let (_, key) = CANNED_ADVICE
        .iter()
        .find(|(markers, _)| markers.iter().any(|m| lower.contains(m)))?;
    let bundle = &kb.condition(key)?.bundle;
    Some(ExtractedAdvice {
        recommendations: bundle.recommendations.clone(),
        avoid: bundle.avoid.clone(),
        follow_up: bundle.follow_up.clone(),
        source: AdviceSource::DiagnosisLookup,
    })
}

/// Extract advice from an assistant reply.
///
/// Falls back to canned advice for a known diagnosis, then to a generic
/// follow-up, when the reply carries nothing usable.
pub fn extract_advice(kb: &KnowledgeBase, reply: &str, diagnosis: &str) -> ExtractedAdvice {
    let text = strip_markup(reply);

    let recommendations =
        first_template_items(&RECOMMENDATION_TEMPLATES, &text, |item| !NEGATIVE_START.is_match(item));
    let avoid = first_template_items(&AVOID_TEMPLATES, &text, |_| true);
    let follow_up = extract_follow_up(&text);

    let extracted = ExtractedAdvice {
        recommendations,
        avoid,
        follow_up,
        source: AdviceSource::Reply,
    };
    if !extracted.is_empty() {
        return extracted;
    }

    if !is_undetermined(diagnosis) {
        if let Some(canned) = lookup_advice(kb, diagnosis) {
            tracing::debug!("Reply had no advice, using diagnosis lookup");
            return canned;
        }
    }

    ExtractedAdvice {
        recommendations: Vec::new(),
        avoid: Vec::new(),
        follow_up: GENERIC_FOLLOW_UP.to_string(),
        source: AdviceSource::Generic,
    }
}

fn append_unique(target: &mut Vec<String>, items: &[String]) {
    let mut seen: HashSet<String> = target.iter().map(|s| s.to_lowercase()).collect();
    for item in items {
        if seen.insert(item.to_lowercase()) {
            target.push(item.clone());
        }
    }
}

/// Fold extracted advice into a state without removing anything.
///
/// A specific follow-up from the reply replaces the stored one. Canned
/// follow-ups only replace an empty or generic slot.
pub fn merge_advice(state: &mut PatientState, advice: &ExtractedAdvice) {
    append_unique(&mut state.recommendations, &advice.recommendations);
    append_unique(&mut state.avoid, &advice.avoid);

    if advice.follow_up.is_empty() {
        return;
    }
    let specific = advice.follow_up != GENERIC_FOLLOW_UP;
    let placeholder = state.follow_up.is_empty() || state.follow_up == GENERIC_FOLLOW_UP;
    if (specific && (advice.source == AdviceSource::Reply || placeholder)) || state.follow_up.is_empty() {
        state.follow_up = advice.follow_up.clone();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extract(reply: &str, diagnosis: &str) -> ExtractedAdvice {
        extract_advice(&KnowledgeBase::builtin(), reply, diagnosis)
    }

    const STRUCTURED_REPLY: &str = "\
**Recommendations:**
- Rest as much as you can.
- Drink *plenty* of fluids
- Rest as much as you can

**Avoid:**
- Alcohol
- Strenuous exercise

Follow-up: Come back if the fever lasts more than three days.";

    #[test]
    fn bullets_under_headers() {
        let advice = extract(STRUCTURED_REPLY, "");
        assert_eq!(advice.recommendations, vec!["Rest as much as you can", "Drink plenty of fluids"]);
        assert_eq!(advice.avoid, vec!["Alcohol", "Strenuous exercise"]);
        assert_eq!(advice.follow_up, "Come back if the fever lasts more than three days.");
        assert_eq!(advice.source, AdviceSource::Reply);
    }

    #[test]
    fn sentences_used_when_no_bullets() {
        let reply = "Recommendations: Get plenty of sleep tonight. Keep warm. Use a humidifier in your room.";
        let advice = extract(reply, "");
        assert_eq!(
            advice.recommendations,
            vec!["Get plenty of sleep tonight", "Use a humidifier in your room"]
        );
    }

    #[test]
    fn imperative_phrasing() {
        let reply = "I recommend drinking warm tea with honey. Don't smoke while you recover. \
                     If symptoms persist for a week, come back.";
        let advice = extract(reply, "Common Cold");
        assert_eq!(advice.recommendations, vec!["Drinking warm tea with honey"]);
        assert_eq!(advice.avoid, vec!["Smoke while you recover"]);
        assert_eq!(advice.follow_up, "If symptoms persist for a week, come back.");
    }

    #[test]
    fn negative_advice_is_not_a_recommendation() {
        let advice = extract("You should avoid caffeine.", "");
        assert!(advice.recommendations.is_empty());
        assert_eq!(advice.avoid, vec!["Caffeine"]);
    }

    #[test]
    fn uti_lookup_when_reply_is_empty() {
        let kb = KnowledgeBase::builtin();
        let advice = extract("How long has this been going on?", "Urinary Tract Infection");
        assert_eq!(advice.source, AdviceSource::DiagnosisLookup);
        let uti = &kb.condition("urinary tract infection").unwrap().bundle;
        assert_eq!(advice.recommendations, uti.recommendations);
    }

    #[test]
    fn viral_lookup_matches_substrings() {
        for diagnosis in ["Common Viral Infection", "Influenza", "Common Colds", "Flu"] {
            let advice = extract("Okay.", diagnosis);
            assert_eq!(advice.source, AdviceSource::DiagnosisLookup, "{diagnosis}");
            assert!(!advice.recommendations.is_empty(), "{diagnosis}");
        }
        assert_eq!(extract("Okay.", "Migraine").source, AdviceSource::Generic);
    }

    #[test]
    fn canned_follow_up_replaces_generic_only() {
        let flu = KnowledgeBase::builtin().condition("flu").unwrap().bundle.follow_up.clone();

        let mut state = PatientState {
            follow_up: GENERIC_FOLLOW_UP.into(),
            ..PatientState::default()
        };
        merge_advice(&mut state, &extract("Okay.", "Influenza"));
        assert_eq!(state.follow_up, flu);

        let mut state = PatientState {
            follow_up: "Recheck on Monday".into(),
            ..PatientState::default()
        };
        merge_advice(&mut state, &extract("Okay.", "Influenza"));
        assert_eq!(state.follow_up, "Recheck on Monday");
    }

    #[test]
    fn generic_follow_up_without_diagnosis() {
        let advice = extract("Can you tell me more?", "Unknown");
        assert_eq!(advice.source, AdviceSource::Generic);
        assert_eq!(advice.follow_up, GENERIC_FOLLOW_UP);
        assert!(advice.recommendations.is_empty());
    }

    #[test]
    fn merge_is_additive_and_idempotent() {
        let mut state = PatientState {
            diagnosis: "Common Flu".into(),
            recommendations: vec!["Rest".into()],
            avoid: vec!["Cold drinks".into()],
            follow_up: "See a doctor after a week".into(),
            ..PatientState::default()
        };

        let reply = "I suggest taking paracetamol for the fever.";
        for _ in 0..2 {
            let advice = extract(reply, &state.diagnosis);
            merge_advice(&mut state, &advice);
        }
        assert_eq!(state.recommendations, vec!["Rest", "Taking paracetamol for the fever"]);
        assert_eq!(state.avoid, vec!["Cold drinks"]);
        assert_eq!(state.follow_up, "See a doctor after a week");

        // a pass that finds nothing keeps everything
        let nothing = extract("Hmm, okay.", "Unknown");
        merge_advice(&mut state, &nothing);
        assert_eq!(state.recommendations.len(), 2);
        assert_eq!(state.follow_up, "See a doctor after a week");
    }

    #[test]
    fn specific_follow_up_replaces_stored_one() {
        let mut state = PatientState {
            follow_up: GENERIC_FOLLOW_UP.into(),
            ..PatientState::default()
        };
        let advice = extract("Follow-up: Recheck in 48 hours", "");
        merge_advice(&mut state, &advice);
        assert_eq!(state.follow_up, "Recheck in 48 hours.");
    }

    #[test]
    fn markup_is_stripped() {
        assert_eq!(strip_markup("## **Rest** and `fluids`, *really*"), "Rest and fluids, really");
    }
}
