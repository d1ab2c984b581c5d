// ElevenLabs text-to-speech client

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response};
use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::{SpeechService, Voice};
use crate::error::{SpeechError, SpeechResult};

#[derive(Debug, Deserialize)]
struct VoicesResponse {
    voices: Vec<Voice>,
}

#[derive(Debug, Deserialize)]
struct ModelEntry {
    model_id: String,
    #[serde(default = "default_true")]
    can_do_text_to_speech: bool,
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Serialize)]
struct SynthesisRequest<'a> {
    text: &'a str,
    model_id: &'a str,
}

#[derive(Debug, Deserialize)]
struct ApiError {
    detail: ApiErrorDetail,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ApiErrorDetail {
    Message { message: String },
    Text(String),
}

impl ApiErrorDetail {
    fn message(&self) -> &str {
        match self {
            ApiErrorDetail::Message { message } => message,
            ApiErrorDetail::Text(text) => text,
        }
    }
}

pub struct ElevenLabsClient {
    api_key: String,
    base_url: String,
    timeout: Option<Duration>,
}

impl ElevenLabsClient {
    pub fn new(api_key: String, base_url: String, timeout: Option<Duration>) -> Self {
        Self {
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
            timeout,
        }
    }

    fn client(&self) -> Client {
        let mut builder = Client::builder();
        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }
        builder.build().unwrap_or_else(|_| Client::new())
    }

    fn authorized(&self, request: RequestBuilder) -> SpeechResult<RequestBuilder> {
        if self.api_key.is_empty() {
            return Err(SpeechError::Unavailable(
                "ElevenLabs API key not configured".to_string(),
            ));
        }
        Ok(request.header("xi-api-key", &self.api_key))
    }

    /// Send a request and turn non-2xx statuses into errors
    async fn send(&self, request: RequestBuilder, what: &str) -> SpeechResult<Response> {
        let response = self
            .authorized(request)?
            .send()
            .await
            .map_err(|e| {
                SpeechError::Request(format!("ElevenLabs {} request failed: {}", what, e))
            })?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let error_text = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ApiError>(&error_text)
            .map(|e| e.detail.message().to_string())
            .unwrap_or(error_text);

        Err(SpeechError::Request(format!(
            "ElevenLabs {} error ({}): {}",
            what, status, message
        )))
    }
}

#[async_trait]
impl SpeechService for ElevenLabsClient {
    fn name(&self) -> &str {
        "elevenlabs"
    }

    async fn list_voices(&self) -> SpeechResult<Vec<Voice>> {
        let url = format!("{}/voices", self.base_url);
        let response = self.send(self.client().get(&url), "voices").await?;

        let voices: VoicesResponse = response
            .json()
            .await
            .map_err(|e| SpeechError::Request(format!("Failed to parse voices: {}", e)))?;

        tracing::debug!("ElevenLabs listed {} voices", voices.voices.len());
        Ok(voices.voices)
    }

    async fn list_models(&self) -> SpeechResult<Vec<String>> {
        let url = format!("{}/models", self.base_url);
        let response = self.send(self.client().get(&url), "models").await?;

        let models: Vec<ModelEntry> = response
            .json()
            .await
            .map_err(|e| SpeechError::Request(format!("Failed to parse models: {}", e)))?;

        Ok(models
            .into_iter()
            .filter(|m| m.can_do_text_to_speech)
            .map(|m| m.model_id)
            .collect())
    }

    async fn synthesize(
        &self,
        text: &str,
        voice_id: &str,
        model_id: &str,
    ) -> SpeechResult<Vec<u8>> {
        tracing::info!(
            "Synthesizing with ElevenLabs: voice={}, model={}, chars={}",
            voice_id,
            model_id,
            text.chars().count()
        );

        let url = format!("{}/text-to-speech/{}", self.base_url, voice_id);
        let request = self
            .client()
            .post(&url)
            .header("Accept", "audio/mpeg")
            .json(&SynthesisRequest { text, model_id });

        let response = self.send(request, "text-to-speech").await?;
        let audio = response
            .bytes()
            .await
            .map_err(|e| SpeechError::Request(format!("Failed to read audio: {}", e)))?;

        tracing::debug!("Received {} bytes of audio data", audio.len());
        Ok(audio.to_vec())
    }
}
