pub mod mining; // Conversation text → symptom keys
pub mod matching;
pub mod resolver; // Condition scoring + heuristic cascade
pub mod advice;
pub mod specialist; // Staged specialist routing, optional LLM stage
pub mod orchestrator;

pub use orchestrator::{IntakeEngine, QueryInference};
