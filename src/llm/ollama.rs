use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::{LlmClient, LlmError};
use crate::config::EngineConfig;

/// Ollama HTTP client with a per-request timeout.
pub struct OllamaClient {
    base_url: String,
    client: reqwest::blocking::Client,
    timeout_secs: u64,
}

impl OllamaClient {
    pub fn new(base_url: &str, timeout_secs: u64) -> Result<Self, LlmError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(timeout_secs))
            .build()
            .map_err(|e| LlmError::HttpClient(e.to_string()))?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
            timeout_secs,
        })
    }

    pub fn from_config(config: &EngineConfig) -> Result<Self, LlmError> {
        Self::new(&config.ollama_url, config.classifier_timeout_secs)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn map_send_error(&self, e: reqwest::Error) -> LlmError {
        if e.is_timeout() {
            LlmError::Timeout(self.timeout_secs)
        } else if e.is_connect() {
            LlmError::Connection(self.base_url.clone())
        } else {
            LlmError::HttpClient(e.to_string())
        }
    }

    fn check_status(
        response: reqwest::blocking::Response,
    ) -> Result<reqwest::blocking::Response, LlmError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().unwrap_or_default();
        Err(LlmError::Status {
            status: status.as_u16(),
            body,
        })
    }
}

/// Request body for Ollama /api/generate
#[derive(Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    system: &'a str,
    stream: bool,
}

/// Response body from Ollama /api/generate
#[derive(Deserialize)]
struct GenerateResponse {
    response: String,
}

impl LlmClient for OllamaClient {
    fn generate(&self, model: &str, prompt: &str, system: &str) -> Result<String, LlmError> {
        let url = format!("{}/api/generate", self.base_url);
        let body = GenerateRequest {
            model,
            prompt,
            system,
            stream: false,
        };

        let response = self
            .client
            .post(&url)
            .json(&body)
            .send()
            .map_err(|e| self.map_send_error(e))?;

        let parsed: GenerateResponse = Self::check_status(response)?
            .json()
            .map_err(|e| LlmError::ResponseParsing(e.to_string()))?;

        Ok(parsed.response)
    }
}

/// Mock LLM client for testing. Returns a canned answer or a canned failure.
pub struct MockLlmClient {
    outcome: Result<String, LlmError>,
    calls: AtomicUsize,
}

impl MockLlmClient {
    pub fn new(response: &str) -> Self {
        Self {
            outcome: Ok(response.to_string()),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn failing(error: LlmError) -> Self {
        Self {
            outcome: Err(error),
            calls: AtomicUsize::new(0),
        }
    }

    /// Number of `generate` calls made so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl LlmClient for MockLlmClient {
    fn generate(&self, _model: &str, _prompt: &str, _system: &str) -> Result<String, LlmError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.outcome.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mock_client_returns_configured_response() {
        let client = MockLlmClient::new("Cardiologist");
        assert_eq!(client.generate("m", "p", "s").unwrap(), "Cardiologist");
        assert_eq!(client.calls(), 1);
    }

    #[test]
    fn mock_client_returns_configured_failure() {
        let client = MockLlmClient::failing(LlmError::Timeout(10));
        assert_eq!(client.generate("m", "p", "s"), Err(LlmError::Timeout(10)));
        assert_eq!(client.generate("m", "p", "s"), Err(LlmError::Timeout(10)));
        assert_eq!(client.calls(), 2);
    }

    #[test]
    fn ollama_client_trims_trailing_slash() {
        let client = OllamaClient::new("http://localhost:11434/", 5).unwrap();
        assert_eq!(client.base_url(), "http://localhost:11434");
        assert_eq!(client.timeout_secs, 5);
    }

    #[test]
    fn ollama_client_from_config() {
        let config = EngineConfig {
            ollama_url: "http://10.0.0.2:11434".into(),
            classifier_timeout_secs: 3,
            ..EngineConfig::default()
        };
        let client = OllamaClient::from_config(&config).unwrap();
        assert_eq!(client.base_url(), "http://10.0.0.2:11434");
        assert_eq!(client.timeout_secs, 3);
    }
}
