pub mod config;
pub mod knowledge;
pub mod llm;
pub mod models;
pub mod pipeline;
pub mod store;

use std::path::PathBuf;

use thiserror::Error;
use tracing_subscriber::EnvFilter;

use config::EngineConfig;
use knowledge::KnowledgeError;
use pipeline::IntakeEngine;
use store::{load_history, PatientStateStore, StateError};

#[derive(Error, Debug)]
pub enum IntakeError {
    #[error(transparent)]
    Knowledge(#[from] KnowledgeError),

    #[error(transparent)]
    State(#[from] StateError),
}

/// Process the latest chat turn in the data directory and persist the result.
///
/// The data directory comes from the first argument, else `INTAKE_DATA_DIR`,
/// else `~/Intake`.
pub fn run() -> Result<(), IntakeError> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config::default_log_filter())),
        )
        .init();

    tracing::info!("{} starting v{}", config::APP_NAME, config::APP_VERSION);

    let mut config = EngineConfig::from_env();
    if let Some(dir) = std::env::args().nth(1) {
        config = config.with_data_dir(&PathBuf::from(dir));
    }

    let engine = IntakeEngine::from_config(&config)?;
    let history = load_history(&config.chat_log_path());
    let store = PatientStateStore::new(config.patient_state_path());

    let previous = store.load();
    let state = engine.process_turn(&history, &previous);
    store.save(&state)?;

    tracing::info!(
        turns = history.turns().len(),
        symptoms = state.symptoms.len(),
        recommendations = state.recommendations.len(),
        path = %store.path().display(),
        "Patient state updated"
    );
    Ok(())
}
