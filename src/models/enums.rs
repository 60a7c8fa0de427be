use serde::{Deserialize, Serialize};

/// Closed string enum with `as_str` and `Display`.
macro_rules! str_enum {
    ($name:ident { $($variant:ident => $s:literal),+ $(,)? }) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
        #[serde(rename_all = "snake_case")]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            pub fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $s),+
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

str_enum!(MessageRole {
    User => "user",
    Assistant => "assistant",
    System => "system",
});

str_enum!(AdviceSource {
    Reply => "reply",
    DiagnosisLookup => "diagnosis_lookup",
    Generic => "generic",
});

str_enum!(DiagnosisSource {
    Combination => "combination",
    Condition => "condition",
    Heuristic => "heuristic",
    Default => "default",
    Insufficient => "insufficient",
});

str_enum!(SpecialistStage {
    NoInformation => "no_information",
    Nonspecific => "nonspecific",
    Remote => "remote",
    DiagnosisRule => "diagnosis_rule",
    SymptomRule => "symptom_rule",
    CommonSymptom => "common_symptom",
    Fallback => "fallback",
});
