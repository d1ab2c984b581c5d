// Translation and transliteration clients built on an LlmProvider

use crate::error::{LlmError, LlmResult};
use crate::llm::{GenerationRequest, LlmProvider};

const TRANSLATE_SYSTEM_MESSAGE: &str = concat!(
    "You are a translator. Detect the language of the input text and translate it ",
    "to the other language (English to Russian or Russian to English). ",
    "Respond with exactly two lines and nothing else, in the format ",
    "'Detected Language: [language]\nTranslation: [translation]'."
);

const TRANSLITERATE_SYSTEM_MESSAGE: &str = concat!(
    "You are a transliteration tool. Provide the English transliteration ",
    "of the given Russian text to help with pronunciation."
);

const LANGUAGE_PREFIX: &str = "Detected Language:";
const TRANSLATION_PREFIX: &str = "Translation:";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslationResult {
    pub detected_language: String,
    pub translation: String,
}

impl TranslationResult {
    pub fn is_russian(&self) -> bool {
        is_russian(&self.detected_language)
    }

    /// Label of the language the text was translated into
    pub fn target_language(&self) -> &'static str {
        if self.is_russian() {
            "English"
        } else {
            "Russian"
        }
    }
}

pub fn is_russian(language: &str) -> bool {
    language.trim().eq_ignore_ascii_case("russian")
}

/// Detect the language of `text` and translate it into the other one
pub async fn translate_and_detect(
    llm: &dyn LlmProvider,
    text: &str,
) -> LlmResult<TranslationResult> {
    let request = GenerationRequest::new(
        TRANSLATE_SYSTEM_MESSAGE,
        format!("Translate this text: {}", text),
    );

    let response = llm.generate(&request).await?;
    tracing::debug!("Translation response: {:?}", response.text);

    parse_translation(&response.text)
}

/// Parse the two-line `Detected Language:` / `Translation:` reply
pub fn parse_translation(response: &str) -> LlmResult<TranslationResult> {
    let mut detected_language = None;
    let mut translation = None;

    for line in response.trim().lines().map(str::trim) {
        if let Some(rest) = line.strip_prefix(LANGUAGE_PREFIX) {
            // Only the first colon-delimited field is the label
            let label = rest.split(':').next().unwrap_or_default().trim();
            detected_language = Some(label.to_string());
        } else if let Some(rest) = line.strip_prefix(TRANSLATION_PREFIX) {
            translation = Some(rest.trim().to_string());
        }
    }

    let detected_language = detected_language
        .filter(|l| !l.is_empty())
        .ok_or_else(|| {
            LlmError::MalformedResponse(format!("missing '{}' line", LANGUAGE_PREFIX))
        })?;
    let translation = translation
        .filter(|t| !t.is_empty())
        .ok_or_else(|| {
            LlmError::MalformedResponse(format!("missing '{}' line", TRANSLATION_PREFIX))
        })?;

    Ok(TranslationResult {
        detected_language,
        translation,
    })
}

/// Latin-script pronunciation guide for Russian `text`
pub async fn transliterate_russian(llm: &dyn LlmProvider, text: &str) -> LlmResult<String> {
    let request = GenerationRequest::new(
        TRANSLITERATE_SYSTEM_MESSAGE,
        format!("Transliterate this Russian text: {}", text),
    );

    let response = llm.generate(&request).await?;
    Ok(response.text.trim().to_string())
}
