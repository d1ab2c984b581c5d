// Configuration loading and validation
// Optional file at ~/.config/lingvox/config.json; every field has a default

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

use crate::error::{LingvoxError, Result};

fn default_translation_model() -> String {
    "gpt-3.5-turbo".to_string()
}

fn default_openai_base_url() -> String {
    "https://api.openai.com/v1".to_string()
}

fn default_elevenlabs_base_url() -> String {
    "https://api.elevenlabs.io/v1".to_string()
}

fn default_fallback_model() -> String {
    "eleven_multilingual_v2".to_string()
}

fn default_volume() -> u32 {
    100
}

fn default_pause_ms() -> u64 {
    1000
}

fn default_sentinel() -> String {
    "quit".to_string()
}

// ============================================================================
// Translation (OpenAI) Configuration
// ============================================================================

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TranslationConfig {
    /// Chat model used for both translation and transliteration
    #[serde(default = "default_translation_model")]
    pub model: String,

    #[serde(default = "default_openai_base_url")]
    pub base_url: String,

    /// Request timeout in seconds; the HTTP client default applies when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout: Option<u64>,
}

impl Default for TranslationConfig {
    fn default() -> Self {
        Self {
            model: default_translation_model(),
            base_url: default_openai_base_url(),
            timeout: None,
        }
    }
}

// ============================================================================
// Speech (ElevenLabs) Configuration
// ============================================================================

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SpeechConfig {
    #[serde(default = "default_elevenlabs_base_url")]
    pub base_url: String,

    /// Model used when the model listing cannot be fetched
    #[serde(default = "default_fallback_model")]
    pub fallback_model: String,

    /// Playback volume (0-100)
    #[serde(default = "default_volume")]
    pub volume: u32,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout: Option<u64>,
}

impl Default for SpeechConfig {
    fn default() -> Self {
        Self {
            base_url: default_elevenlabs_base_url(),
            fallback_model: default_fallback_model(),
            volume: default_volume(),
            timeout: None,
        }
    }
}

// ============================================================================
// Session Configuration
// ============================================================================

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SessionConfig {
    /// Pause after each playback, in milliseconds
    #[serde(default = "default_pause_ms")]
    pub pause_ms: u64,

    /// Input that ends the session (case-insensitive)
    #[serde(default = "default_sentinel")]
    pub sentinel: String,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            pause_ms: default_pause_ms(),
            sentinel: default_sentinel(),
        }
    }
}

// ============================================================================
// Main LingvoxConfig
// ============================================================================

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct LingvoxConfig {
    #[serde(default)]
    pub translation: TranslationConfig,

    #[serde(default)]
    pub speech: SpeechConfig,

    #[serde(default)]
    pub session: SessionConfig,
}

impl LingvoxConfig {
    /// Get the standard config path: ~/.config/lingvox/config.json
    pub fn config_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| LingvoxError::Config("Cannot find home directory".into()))?;
        Ok(home.join(".config").join("lingvox").join("config.json"))
    }

    /// Load configuration from ~/.config/lingvox/config.json
    pub fn load_from_home() -> Result<Self> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            tracing::debug!(
                "Config file not found at {:?}, using defaults",
                config_path
            );
            return Ok(Self::default());
        }

        Self::load(config_path)
    }

    /// Load configuration from a specific path
    pub fn load(path: PathBuf) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(|e| {
            LingvoxError::Config(format!("Failed to read config file {:?}: {}", path, e))
        })?;

        let config: LingvoxConfig = serde_json::from_str(&content)?;
        config.validate()?;
        tracing::debug!("Loaded config from {:?}", path);
        Ok(config)
    }

    pub fn pause(&self) -> Duration {
        Duration::from_millis(self.session.pause_ms)
    }

    fn validate(&self) -> Result<()> {
        if self.translation.model.trim().is_empty() {
            return Err(LingvoxError::Config(
                "translation.model cannot be empty".to_string(),
            ));
        }

        if self.speech.fallback_model.trim().is_empty() {
            return Err(LingvoxError::Config(
                "speech.fallback_model cannot be empty".to_string(),
            ));
        }

        if self.speech.volume > 100 {
            return Err(LingvoxError::Config(format!(
                "Speech volume {} out of range [0-100]",
                self.speech.volume
            )));
        }

        if self.session.sentinel.trim().is_empty() {
            return Err(LingvoxError::Config(
                "session.sentinel cannot be empty".to_string(),
            ));
        }

        for (field, url) in [
            ("translation.base_url", &self.translation.base_url),
            ("speech.base_url", &self.speech.base_url),
        ] {
            if !(url.starts_with("http://") || url.starts_with("https://")) {
                return Err(LingvoxError::Config(format!(
                    "{} must be an http(s) URL, got {:?}",
                    field, url
                )));
            }
        }

        Ok(())
    }
}
