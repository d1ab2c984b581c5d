// Speech player: voice resolution, synthesis, playback

use crate::directory::get_available_voices;
use crate::error::{SpeechError, SpeechResult};
use crate::speech::{AudioSink, SpeechService};

/// The voice a `speak` call ended up using
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpokenVoice {
    pub name: String,
    /// True when the requested voice was missing and another was used
    pub substituted: bool,
}

pub struct SpeechPlayer<'a> {
    speech: &'a dyn SpeechService,
    sink: &'a dyn AudioSink,
}

impl<'a> SpeechPlayer<'a> {
    pub fn new(speech: &'a dyn SpeechService, sink: &'a dyn AudioSink) -> Self {
        Self { speech, sink }
    }

    /// Synthesize `text` with the named voice and play it to completion
    ///
    /// The voice directory is fetched fresh on every call. An unknown or
    /// absent name falls back to the first listed voice.
    pub async fn speak(
        &self,
        text: &str,
        voice_name: Option<&str>,
        model: &str,
    ) -> SpeechResult<SpokenVoice> {
        let voices = get_available_voices(self.speech).await;

        let (voice, substituted) = match voice_name.and_then(|name| voices.get(name)) {
            Some(voice) => (voice, false),
            None => {
                tracing::warn!(
                    "Voice '{}' not found. Available voices: {}",
                    voice_name.unwrap_or("none"),
                    voices.joined_names()
                );
                let voice = voices.first().ok_or(SpeechError::NoVoicesAvailable)?;
                tracing::info!("Using default voice: {}", voice.name);
                (voice, true)
            }
        };

        let audio = self
            .speech
            .synthesize(text, &voice.voice_id, model)
            .await?;
        self.sink.play(&audio)?;

        Ok(SpokenVoice {
            name: voice.name.clone(),
            substituted,
        })
    }
}
