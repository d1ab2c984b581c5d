// Local audio playback

use std::io::Cursor;

use crate::error::{SpeechError, SpeechResult};

/// Destination for synthesized audio
pub trait AudioSink: Send + Sync {
    /// Play encoded audio, returning once playback has finished
    fn play(&self, audio: &[u8]) -> SpeechResult<()>;
}

/// Plays audio on the default output device through rodio
pub struct RodioPlayer {
    volume: u32,
}

impl RodioPlayer {
    pub fn new(volume: u32) -> Self {
        Self {
            volume: volume.min(100),
        }
    }
}

impl AudioSink for RodioPlayer {
    fn play(&self, audio: &[u8]) -> SpeechResult<()> {
        use rodio::{Decoder, OutputStream, Sink};

        if audio.is_empty() {
            return Err(SpeechError::Playback("Empty audio payload".to_string()));
        }

        tracing::debug!("Playing audio: {} bytes, volume: {}", audio.len(), self.volume);

        // The stream must outlive the sink
        let (_stream, stream_handle) = OutputStream::try_default()
            .map_err(|e| SpeechError::Playback(format!("Failed to open audio output: {}", e)))?;

        let sink = Sink::try_new(&stream_handle)
            .map_err(|e| SpeechError::Playback(format!("Failed to create audio sink: {}", e)))?;

        sink.set_volume(self.volume as f32 / 100.0);

        let source = Decoder::new(Cursor::new(audio.to_vec()))
            .map_err(|e| SpeechError::Playback(format!("Failed to decode audio: {}", e)))?;

        sink.append(source);
        sink.sleep_until_end();

        tracing::debug!("Voice playback completed");
        Ok(())
    }
}
