// Error types for lingvox

use thiserror::Error;

#[derive(Error, Debug)]
pub enum LingvoxError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("API key not found in environment variable {0}")]
    MissingCredential(&'static str),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("LLM error: {0}")]
    Llm(#[from] LlmError),

    #[error("Speech error: {0}")]
    Speech(#[from] SpeechError),
}

#[derive(Error, Debug)]
pub enum LlmError {
    #[error("Provider unavailable: {0}")]
    Unavailable(String),

    #[error("API request failed: {0}")]
    Request(String),

    /// The service answered, but not in the expected shape
    #[error("Unexpected response format: {0}")]
    MalformedResponse(String),
}

#[derive(Error, Debug)]
pub enum SpeechError {
    #[error("Speech service unavailable: {0}")]
    Unavailable(String),

    #[error("API request failed: {0}")]
    Request(String),

    #[error("No voices available")]
    NoVoicesAvailable,

    #[error("Playback failed: {0}")]
    Playback(String),
}

pub type Result<T> = std::result::Result<T, LingvoxError>;
pub type LlmResult<T> = std::result::Result<T, LlmError>;
pub type SpeechResult<T> = std::result::Result<T, SpeechError>;
