// LLM provider abstraction used by the translation and transliteration clients

use async_trait::async_trait;

pub use openai::OpenAIProvider;

pub mod openai;

use crate::error::LlmResult;

#[derive(Debug, Clone)]
pub struct GenerationRequest {
    /// Instruction sent with the "system" role
    pub system_message: String,
    pub prompt: String,
}

impl GenerationRequest {
    pub fn new(system_message: impl Into<String>, prompt: impl Into<String>) -> Self {
        Self {
            system_message: system_message.into(),
            prompt: prompt.into(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct GenerationResponse {
    pub text: String,
    pub input_tokens: u32,
    pub output_tokens: u32,
    pub model: String,
}

#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Get provider name
    fn name(&self) -> &str;

    /// Check if provider is available (API key set, etc.)
    fn is_available(&self) -> bool;

    /// Run one chat completion
    async fn generate(&self, request: &GenerationRequest) -> LlmResult<GenerationResponse>;
}
