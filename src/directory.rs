// Voice and model directories fetched from the speech service

use crate::speech::{SpeechService, Voice};

/// Voices keyed by name, kept in the order the service listed them
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VoiceDirectory {
    entries: Vec<Voice>,
}

impl VoiceDirectory {
    /// Build a directory; a repeated name keeps its first position and the last id
    pub fn from_voices(voices: impl IntoIterator<Item = Voice>) -> Self {
        let mut entries: Vec<Voice> = Vec::new();
        for voice in voices {
            match entries.iter_mut().find(|v| v.name == voice.name) {
                Some(existing) => existing.voice_id = voice.voice_id,
                None => entries.push(voice),
            }
        }
        Self { entries }
    }

    pub fn get(&self, name: &str) -> Option<&Voice> {
        self.entries.iter().find(|v| v.name == name)
    }

    pub fn first(&self) -> Option<&Voice> {
        self.entries.first()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|v| v.name.as_str())
    }

    /// Comma-separated voice names, for display
    pub fn joined_names(&self) -> String {
        self.names().collect::<Vec<_>>().join(", ")
    }

    pub fn name_at(&self, index: usize) -> Option<&str> {
        self.entries.get(index).map(|v| v.name.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Fetch the voice directory; an empty directory stands in for any failure
pub async fn get_available_voices(speech: &dyn SpeechService) -> VoiceDirectory {
    match speech.list_voices().await {
        Ok(voices) => VoiceDirectory::from_voices(voices),
        Err(e) => {
            tracing::warn!("Error fetching voices: {}", e);
            VoiceDirectory::default()
        }
    }
}

/// Fetch synthesis model ids; never empty, `fallback` stands in for failure
pub async fn get_available_models(speech: &dyn SpeechService, fallback: &str) -> Vec<String> {
    match speech.list_models().await {
        Ok(models) if !models.is_empty() => models,
        Ok(_) => {
            tracing::warn!("Speech service listed no models, using {}", fallback);
            vec![fallback.to_string()]
        }
        Err(e) => {
            tracing::warn!("Error fetching models: {}, using {}", e, fallback);
            vec![fallback.to_string()]
        }
    }
}
