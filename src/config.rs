use std::path::{Path, PathBuf};

/// Application-level constants
pub const APP_NAME: &str = "Intake";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Chat log read by the binary, inside the data directory.
pub const CHAT_LOG_FILE: &str = "ChatLog.json";
/// Persisted patient state, inside the data directory.
pub const PATIENT_STATE_FILE: &str = "patient_state.json";

const DEFAULT_OLLAMA_URL: &str = "http://localhost:11434";
const DEFAULT_CLASSIFIER_MODEL: &str = "llama3.2";
const DEFAULT_CLASSIFIER_TIMEOUT_SECS: u64 = 10;

/// Get the application data directory
/// ~/Intake/ when a home directory exists, ./Intake otherwise
pub fn app_data_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_NAME)
}

/// Default tracing filter when RUST_LOG is unset.
pub fn default_log_filter() -> &'static str {
    "info,intake_lib=info,reqwest=warn"
}

/// Runtime settings for the engine, overridable from the environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    pub ollama_url: String,
    pub classifier_model: String,
    pub classifier_timeout_secs: u64,
    pub remote_classifier: bool,
    pub knowledge_base: Option<PathBuf>,
    pub data_dir: PathBuf,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            ollama_url: DEFAULT_OLLAMA_URL.to_string(),
            classifier_model: DEFAULT_CLASSIFIER_MODEL.to_string(),
            classifier_timeout_secs: DEFAULT_CLASSIFIER_TIMEOUT_SECS,
            remote_classifier: true,
            knowledge_base: None,
            data_dir: app_data_dir(),
        }
    }
}

impl EngineConfig {
    /// Defaults overridden by `INTAKE_*` environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Defaults overridden by whatever `lookup` returns for each variable.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        if let Some(url) = get("INTAKE_OLLAMA_URL") {
            config.ollama_url = url;
        }
        if let Some(model) = get("INTAKE_CLASSIFIER_MODEL") {
            config.classifier_model = model;
        }
        if let Some(raw) = get("INTAKE_CLASSIFIER_TIMEOUT_SECS") {
            match raw.parse::<u64>() {
                Ok(secs) if secs > 0 => config.classifier_timeout_secs = secs,
                _ => tracing::warn!(
                    value = %raw,
                    default = DEFAULT_CLASSIFIER_TIMEOUT_SECS,
                    "Invalid INTAKE_CLASSIFIER_TIMEOUT_SECS, using default"
                ),
            }
        }
        if let Some(raw) = get("INTAKE_REMOTE_CLASSIFIER") {
            match parse_flag(&raw) {
                Some(flag) => config.remote_classifier = flag,
                None => tracing::warn!(value = %raw, "Invalid INTAKE_REMOTE_CLASSIFIER, keeping it enabled"),
            }
        }
        if let Some(path) = get("INTAKE_KNOWLEDGE_BASE") {
            config.knowledge_base = Some(PathBuf::from(path));
        }
        if let Some(dir) = get("INTAKE_DATA_DIR") {
            config.data_dir = PathBuf::from(dir);
        }
        config
    }

    pub fn with_data_dir(mut self, dir: &Path) -> Self {
        self.data_dir = dir.to_path_buf();
        self
    }

    pub fn chat_log_path(&self) -> PathBuf {
        self.data_dir.join(CHAT_LOG_FILE)
    }

    pub fn patient_state_path(&self) -> PathBuf {
        self.data_dir.join(PATIENT_STATE_FILE)
    }
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn config_from(vars: &[(&str, &str)]) -> EngineConfig {
        let vars: HashMap<String, String> =
            vars.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        EngineConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn app_data_dir_is_named_after_app() {
        assert!(app_data_dir().ends_with("Intake"));
    }

    #[test]
    fn app_version_matches_cargo() {
        assert_eq!(APP_VERSION, "0.1.0");
    }

    #[test]
    fn defaults_without_overrides() {
        let config = config_from(&[]);
        assert_eq!(config, EngineConfig::default());
        assert_eq!(config.ollama_url, "http://localhost:11434");
        assert_eq!(config.classifier_timeout_secs, 10);
        assert!(config.remote_classifier);
        assert!(config.knowledge_base.is_none());
    }

    #[test]
    fn overrides_apply() {
        let config = config_from(&[
            ("INTAKE_OLLAMA_URL", "http://gpu-box:11434"),
            ("INTAKE_CLASSIFIER_MODEL", "medgemma"),
            ("INTAKE_CLASSIFIER_TIMEOUT_SECS", "3"),
            ("INTAKE_REMOTE_CLASSIFIER", "false"),
            ("INTAKE_KNOWLEDGE_BASE", "/etc/intake/kb.json"),
            ("INTAKE_DATA_DIR", "/var/lib/intake"),
        ]);
        assert_eq!(config.ollama_url, "http://gpu-box:11434");
        assert_eq!(config.classifier_model, "medgemma");
        assert_eq!(config.classifier_timeout_secs, 3);
        assert!(!config.remote_classifier);
        assert_eq!(config.knowledge_base, Some(PathBuf::from("/etc/intake/kb.json")));
        assert_eq!(config.patient_state_path(), PathBuf::from("/var/lib/intake/patient_state.json"));
    }

    #[test]
    fn invalid_values_fall_back() {
        let config = config_from(&[
            ("INTAKE_CLASSIFIER_TIMEOUT_SECS", "soon"),
            ("INTAKE_REMOTE_CLASSIFIER", "maybe"),
            ("INTAKE_OLLAMA_URL", "   "),
        ]);
        assert_eq!(config.classifier_timeout_secs, 10);
        assert!(config.remote_classifier);
        assert_eq!(config.ollama_url, "http://localhost:11434");

        let config = config_from(&[("INTAKE_CLASSIFIER_TIMEOUT_SECS", "0")]);
        assert_eq!(config.classifier_timeout_secs, 10);
    }

    #[test]
    fn data_dir_paths() {
        let config = EngineConfig::default().with_data_dir(Path::new("/tmp/x"));
        assert_eq!(config.chat_log_path(), PathBuf::from("/tmp/x/ChatLog.json"));
    }
}
