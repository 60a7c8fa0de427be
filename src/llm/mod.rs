//! Completion clients for the remote specialist classifier.

pub mod ollama;

pub use ollama::*;

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LlmError {
    #[error("Ollama is not running at {0}")]
    Connection(String),

    #[error("Request timed out after {0}s")]
    Timeout(u64),

    #[error("Ollama returned error (status {status}): {body}")]
    Status { status: u16, body: String },

    #[error("HTTP client error: {0}")]
    HttpClient(String),

    #[error("Response parsing error: {0}")]
    ResponseParsing(String),
}

/// Text completion collaborator. Implementations must bound every call in
/// time; callers treat any error as "no answer".
pub trait LlmClient: Send + Sync {
    fn generate(&self, model: &str, prompt: &str, system: &str) -> Result<String, LlmError>;
}
