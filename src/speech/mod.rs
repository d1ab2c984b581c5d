// Speech service module
// Voice and model catalogs, synthesis, and local playback

pub mod elevenlabs;
pub mod playback;

use async_trait::async_trait;
use serde::Deserialize;

use crate::error::SpeechResult;

pub use elevenlabs::ElevenLabsClient;
pub use playback::{AudioSink, RodioPlayer};

/// A synthetic voice as listed by the speech service
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Voice {
    pub voice_id: String,
    pub name: String,
}

impl Voice {
    pub fn new(name: impl Into<String>, voice_id: impl Into<String>) -> Self {
        Self {
            voice_id: voice_id.into(),
            name: name.into(),
        }
    }
}

/// Remote text-to-speech service
#[async_trait]
pub trait SpeechService: Send + Sync {
    /// Provider name for logging
    fn name(&self) -> &str;

    /// List all voices, in the order the service returns them
    async fn list_voices(&self) -> SpeechResult<Vec<Voice>>;

    /// List identifiers of models usable for synthesis
    async fn list_models(&self) -> SpeechResult<Vec<String>>;

    /// Synthesize `text` and return the encoded audio
    async fn synthesize(
        &self,
        text: &str,
        voice_id: &str,
        model_id: &str,
    ) -> SpeechResult<Vec<u8>>;
}
