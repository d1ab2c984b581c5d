// Credential loading for lingvox
// Both service keys come from the process environment only

use crate::error::{LingvoxError, Result};

/// Environment variable holding the OpenAI key (translation)
pub const OPENAI_API_KEY_VAR: &str = "OPENAI_API_KEY";

/// Environment variable holding the ElevenLabs key (speech)
pub const ELEVENLABS_API_KEY_VAR: &str = "ELEVENLABS_API_KEY";

#[derive(Clone)]
pub struct Credentials {
    pub openai_api_key: String,
    pub elevenlabs_api_key: String,
}

impl Credentials {
    /// Load both keys from the environment, failing on the first one missing
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load both keys through an arbitrary lookup function
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let require = |name: &'static str| {
            lookup(name)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
                .ok_or(LingvoxError::MissingCredential(name))
        };

        Ok(Self {
            openai_api_key: require(OPENAI_API_KEY_VAR)?,
            elevenlabs_api_key: require(ELEVENLABS_API_KEY_VAR)?,
        })
    }
}

// Keys must never end up in logs
impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("openai_api_key", &"<redacted>")
            .field("elevenlabs_api_key", &"<redacted>")
            .finish()
    }
}
