//! Patient-state persistence and per-session serialization.
//!
//! - Reads never fail on content: a missing file is a fresh state, a corrupt
//!   one is logged and replaced by defaults
//! - Writes go to a temporary file in the same directory and are renamed over
//!   the target, so a reader sees either the old or the new record
//! - `SessionRegistry::update` runs read-modify-write under a per-session lock

use std::collections::HashMap;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use thiserror::Error;
use uuid::Uuid;

use crate::models::{ConversationHistory, PatientState};

#[derive(Error, Debug)]
pub enum StateError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Cannot serialize patient state: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("Session lock poisoned")]
    LockPoisoned,

    #[error("Unknown session {0}")]
    UnknownSession(Uuid),
}

fn io_error(path: &Path) -> impl FnOnce(std::io::Error) -> StateError + '_ {
    move |source| StateError::Io {
        path: path.to_path_buf(),
        source,
    }
}

/// Read a chat log. Missing or malformed logs read as an empty history.
pub fn load_history(path: &Path) -> ConversationHistory {
    match std::fs::read_to_string(path) {
        Ok(json) => ConversationHistory::from_json(&json),
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "Chat log unreadable, treating as empty");
            ConversationHistory::default()
        }
    }
}

// ═══════════════════════════════════════════════════════════
// PatientStateStore: one JSON file
// ═══════════════════════════════════════════════════════════

#[derive(Debug, Clone)]
pub struct PatientStateStore {
    path: PathBuf,
}

impl PatientStateStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the stored state, or defaults when absent or unparsable.
    pub fn load(&self) -> PatientState {
        let json = match std::fs::read_to_string(&self.path) {
            Ok(json) => json,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return PatientState::default(),
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "Patient state unreadable, reinitializing");
                return PatientState::default();
            }
        };

        match serde_json::from_str(&json) {
            Ok(state) => state,
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "Patient state corrupt, reinitializing");
                PatientState::default()
            }
        }
    }

    /// Atomically replace the stored state.
    pub fn save(&self, state: &PatientState) -> Result<(), StateError> {
        let json = serde_json::to_string_pretty(state)?;

        let dir = match self.path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
            _ => PathBuf::from("."),
        };
        std::fs::create_dir_all(&dir).map_err(io_error(&dir))?;

        let mut tmp = tempfile::NamedTempFile::new_in(&dir).map_err(io_error(&dir))?;
        tmp.write_all(json.as_bytes()).map_err(io_error(tmp.path()))?;
        tmp.as_file().sync_all().map_err(io_error(&self.path))?;
        tmp.persist(&self.path).map_err(|e| StateError::Io {
            path: self.path.clone(),
            source: e.error,
        })?;

        tracing::debug!(path = %self.path.display(), symptoms = state.symptoms.len(), "Patient state saved");
        Ok(())
    }
}

// ═══════════════════════════════════════════════════════════
// SessionRegistry: per-session read-modify-write
// ═══════════════════════════════════════════════════════════

struct Session {
    store: PatientStateStore,
    lock: Mutex<()>,
}

/// Sessions keyed by id, each with its own store and lock.
#[derive(Default)]
pub struct SessionRegistry {
    sessions: Mutex<HashMap<Uuid, Arc<Session>>>,
}

impl SessionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a session backed by `path` and return its id.
    pub fn open(&self, path: impl Into<PathBuf>) -> Result<Uuid, StateError> {
        let id = Uuid::new_v4();
        let session = Arc::new(Session {
            store: PatientStateStore::new(path),
            lock: Mutex::new(()),
        });
        self.sessions
            .lock()
            .map_err(|_| StateError::LockPoisoned)?
            .insert(id, session);
        tracing::debug!(session = %id, "Session opened");
        Ok(id)
    }

    pub fn close(&self, id: Uuid) -> Result<bool, StateError> {
        let removed = self
            .sessions
            .lock()
            .map_err(|_| StateError::LockPoisoned)?
            .remove(&id)
            .is_some();
        Ok(removed)
    }

    pub fn len(&self) -> usize {
        self.sessions.lock().map(|s| s.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn session(&self, id: Uuid) -> Result<Arc<Session>, StateError> {
        self.sessions
            .lock()
            .map_err(|_| StateError::LockPoisoned)?
            .get(&id)
            .cloned()
            .ok_or(StateError::UnknownSession(id))
    }

    /// Current state of a session.
    pub fn load(&self, id: Uuid) -> Result<PatientState, StateError> {
        let session = self.session(id)?;
        let _guard = session.lock.lock().map_err(|_| StateError::LockPoisoned)?;
        Ok(session.store.load())
    }

    /// Load, transform and save a session's state while holding its lock.
    pub fn update<F>(&self, id: Uuid, f: F) -> Result<PatientState, StateError>
    where
        F: FnOnce(PatientState) -> PatientState,
    {
        let session = self.session(id)?;
        let _guard = session.lock.lock().map_err(|_| StateError::LockPoisoned)?;
        let next = f(session.store.load());
        session.store.save(&next)?;
        Ok(next)
    }
}

#[cfg(test)]
mod tests {
    use std::thread;

    use super::*;

    fn sample() -> PatientState {
        PatientState {
            symptoms: vec!["fever".into(), "cough".into()],
            diagnosis: "Common Flu".into(),
            recommendations: vec!["Rest".into()],
            avoid: vec!["Cold drinks".into()],
            follow_up: "See a doctor in a week".into(),
            recommended_specialist: "General Physician".into(),
        }
    }

    #[test]
    fn save_then_load_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let store = PatientStateStore::new(dir.path().join("patient_state.json"));
        store.save(&sample()).unwrap();
        assert_eq!(store.load(), sample());
    }

    #[test]
    fn missing_file_is_default() {
        let dir = tempfile::tempdir().unwrap();
        let store = PatientStateStore::new(dir.path().join("absent.json"));
        assert_eq!(store.load(), PatientState::default());
    }

    #[test]
    fn corrupt_file_is_default() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("patient_state.json");
        std::fs::write(&path, "{\"symptoms\": [\"fev").unwrap();
        assert_eq!(PatientStateStore::new(&path).load(), PatientState::default());
    }

    #[test]
    fn save_creates_directory_and_leaves_no_temp_files() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("state.json");
        let store = PatientStateStore::new(&path);
        store.save(&sample()).unwrap();
        store.save(&PatientState::default()).unwrap();

        let entries: Vec<_> = std::fs::read_dir(path.parent().unwrap()).unwrap().collect();
        assert_eq!(entries.len(), 1);
        assert_eq!(store.load(), PatientState::default());
    }

    #[test]
    fn history_loading_is_lenient() {
        let dir = tempfile::tempdir().unwrap();
        assert!(load_history(&dir.path().join("none.json")).is_empty());

        let path = dir.path().join("ChatLog.json");
        std::fs::write(&path, "not json").unwrap();
        assert!(load_history(&path).is_empty());

        std::fs::write(&path, r#"[{"role": "user", "content": "I have a fever"}]"#).unwrap();
        assert_eq!(load_history(&path).turns().len(), 1);
    }

    #[test]
    fn update_is_serialized_per_session() {
        let dir = tempfile::tempdir().unwrap();
        let registry = Arc::new(SessionRegistry::new());
        let id = registry.open(dir.path().join("s.json")).unwrap();

        let handles: Vec<_> = (0..8)
            .map(|i| {
                let registry = Arc::clone(&registry);
                thread::spawn(move || {
                    registry
                        .update(id, |mut state| {
                            state.symptoms.push(format!("symptom {i}"));
                            state
                        })
                        .unwrap();
                })
            })
            .collect();
        for h in handles {
            h.join().unwrap();
        }

        let state = registry.load(id).unwrap();
        assert_eq!(state.symptoms.len(), 8);
    }

    #[test]
    fn unknown_session_is_error() {
        let registry = SessionRegistry::new();
        let err = registry.load(Uuid::new_v4()).unwrap_err();
        assert!(matches!(err, StateError::UnknownSession(_)));
    }

    #[test]
    fn close_removes_session() {
        let dir = tempfile::tempdir().unwrap();
        let registry = SessionRegistry::new();
        let id = registry.open(dir.path().join("s.json")).unwrap();
        assert_eq!(registry.len(), 1);
        assert!(registry.close(id).unwrap());
        assert!(registry.is_empty());
        assert!(!registry.close(id).unwrap());
    }
}
