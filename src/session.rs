// Interactive translation session
// Reads lines, translates them, and plays the original and the translation

use std::io::{BufRead, Write};
use std::time::Duration;

use rand::Rng;

use crate::config::LingvoxConfig;
use crate::directory::{get_available_models, get_available_voices, VoiceDirectory};
use crate::error::{LingvoxError, Result};
use crate::llm::LlmProvider;
use crate::player::SpeechPlayer;
use crate::speech::{AudioSink, SpeechService};
use crate::translation::{translate_and_detect, transliterate_russian};

const FAREWELL: &str = "Thank you for using the translator!";

/// Picks an index in `0..len`, or `None` when there is nothing to pick
pub trait Selector {
    fn choose(&self, len: usize) -> Option<usize>;
}

/// Uniform random choice
pub struct RandomSelector;

impl Selector for RandomSelector {
    fn choose(&self, len: usize) -> Option<usize> {
        if len == 0 {
            None
        } else {
            Some(rand::thread_rng().gen_range(0..len))
        }
    }
}

#[derive(Debug, Clone)]
pub struct SessionSettings {
    pub pause: Duration,
    pub sentinel: String,
    pub fallback_model: String,
}

impl From<&LingvoxConfig> for SessionSettings {
    fn from(config: &LingvoxConfig) -> Self {
        Self {
            pause: config.pause(),
            sentinel: config.session.sentinel.clone(),
            fallback_model: config.speech.fallback_model.clone(),
        }
    }
}

/// Directory snapshots taken once at startup
#[derive(Debug, Clone)]
pub struct SessionState {
    pub voices: VoiceDirectory,
    pub models: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IterationOutcome {
    Spoken,
    TranslationFailed,
}

pub struct Session<'a> {
    llm: &'a dyn LlmProvider,
    speech: &'a dyn SpeechService,
    player: SpeechPlayer<'a>,
    selector: &'a dyn Selector,
    settings: SessionSettings,
}

impl<'a> Session<'a> {
    pub fn new(
        llm: &'a dyn LlmProvider,
        speech: &'a dyn SpeechService,
        sink: &'a dyn AudioSink,
        selector: &'a dyn Selector,
        settings: SessionSettings,
    ) -> Self {
        Self {
            llm,
            speech,
            player: SpeechPlayer::new(speech, sink),
            selector,
            settings,
        }
    }

    /// Run the whole session until the sentinel or end of input
    pub async fn run<R: BufRead, W: Write>(&self, mut input: R, out: &mut W) -> Result<()> {
        let state = self.start(out).await?;

        loop {
            write!(
                out,
                "\nEnter text in English or Russian (or '{}' to exit): ",
                self.settings.sentinel
            )?;
            out.flush()?;

            let mut buf = Vec::new();
            if input.read_until(b'\n', &mut buf)? == 0 {
                writeln!(out)?;
                break;
            }

            // Bytes from a non-UTF-8 console are replaced rather than rejected
            let line = String::from_utf8_lossy(&buf);
            let text = line.trim();
            if text.eq_ignore_ascii_case(&self.settings.sentinel) {
                break;
            }
            if text.is_empty() {
                continue;
            }

            let model = self
                .selector
                .choose(state.models.len())
                .and_then(|i| state.models.get(i))
                .map(String::as_str)
                .unwrap_or(self.settings.fallback_model.as_str());
            let voice_name = self
                .selector
                .choose(state.voices.len())
                .and_then(|i| state.voices.name_at(i));

            self.process_and_speak(text, voice_name, model, out).await?;
            tokio::time::sleep(self.settings.pause).await;
        }

        writeln!(out, "{}", FAREWELL)?;
        Ok(())
    }

    /// Verify the speech key, greet, and take the directory snapshots
    pub async fn start<W: Write>(&self, out: &mut W) -> Result<SessionState> {
        if let Err(e) = self.speech.list_voices().await {
            writeln!(out, "Error verifying ElevenLabs API key: {}", e)?;
            return Err(LingvoxError::Config(
                "Invalid ElevenLabs API key. Please check your credentials.".to_string(),
            ));
        }

        writeln!(
            out,
            "Welcome to the English-Russian Translator and Pronunciation Helper!"
        )?;
        writeln!(
            out,
            "Enter text in English or Russian to hear its translation and pronunciation."
        )?;
        writeln!(out, "Type '{}' to exit the program.", self.settings.sentinel)?;

        let voices = get_available_voices(self.speech).await;
        if voices.is_empty() {
            writeln!(out, "No voices available. Using default settings.")?;
        } else {
            writeln!(out, "Available voices: {}", voices.joined_names())?;
        }

        let models = get_available_models(self.speech, &self.settings.fallback_model).await;
        tracing::debug!("Synthesis models: {:?}", models);

        Ok(SessionState { voices, models })
    }

    /// Translate one line and play it back; service errors are reported, not returned
    pub async fn process_and_speak<W: Write>(
        &self,
        text: &str,
        voice_name: Option<&str>,
        model: &str,
        out: &mut W,
    ) -> Result<IterationOutcome> {
        let result = match translate_and_detect(self.llm, text).await {
            Ok(result) => result,
            Err(e) => {
                tracing::warn!("Translation via {} failed: {}", self.llm.name(), e);
                writeln!(out, "Error in translation: {}", e)?;
                writeln!(out, "Translation failed. Please try again.")?;
                return Ok(IterationOutcome::TranslationFailed);
            }
        };

        writeln!(out, "Detected language: {}", result.detected_language)?;
        writeln!(out, "{}: {}", result.target_language(), result.translation)?;

        if result.is_russian() {
            match transliterate_russian(self.llm, text).await {
                Ok(guide) if !guide.is_empty() => writeln!(out, "Pronunciation guide: {}", guide)?,
                Ok(_) => {}
                Err(e) => writeln!(out, "Error in transliteration: {}", e)?,
            }
        }

        writeln!(out, "Using model: {}", model)?;
        writeln!(out, "Using voice: {}", voice_name.unwrap_or("default"))?;

        writeln!(out, "Playing original text:")?;
        self.speak(text, voice_name, model, out).await?;
        tokio::time::sleep(self.settings.pause).await;

        writeln!(out, "Playing translation:")?;
        self.speak(&result.translation, voice_name, model, out).await?;

        Ok(IterationOutcome::Spoken)
    }

    async fn speak<W: Write>(
        &self,
        text: &str,
        voice_name: Option<&str>,
        model: &str,
        out: &mut W,
    ) -> Result<()> {
        match self.player.speak(text, voice_name, model).await {
            Ok(spoken) if spoken.substituted => {
                writeln!(out, "Using default voice: {}", spoken.name)?;
            }
            Ok(_) => {}
            Err(e) => writeln!(out, "Error in text-to-speech: {}", e)?,
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::directory::tests::FakeSpeech;
    use crate::error::LlmError;
    use crate::player::tests::RecordingSink;
    use crate::speech::Voice;
    use crate::translation::tests::ScriptedLlm;

    /// Always picks the first entry
    struct FirstSelector;

    impl Selector for FirstSelector {
        fn choose(&self, len: usize) -> Option<usize> {
            (len > 0).then_some(0)
        }
    }

    /// Always picks the last entry
    struct LastSelector;

    impl Selector for LastSelector {
        fn choose(&self, len: usize) -> Option<usize> {
            len.checked_sub(1)
        }
    }

    fn settings() -> SessionSettings {
        SessionSettings {
            pause: Duration::ZERO,
            sentinel: "quit".to_string(),
            fallback_model: "eleven_multilingual_v2".to_string(),
        }
    }

    fn speech() -> FakeSpeech {
        FakeSpeech::new(
            vec![Voice::new("Rachel", "id-rachel"), Voice::new("Adam", "id-adam")],
            vec!["eleven_multilingual_v2"],
        )
    }

    async fn process(
        llm: &ScriptedLlm,
        speech: &FakeSpeech,
        sink: &RecordingSink,
        text: &str,
    ) -> (IterationOutcome, String) {
        let session = Session::new(llm, speech, sink, &FirstSelector, settings());
        let mut out = Vec::new();
        let outcome = session
            .process_and_speak(text, Some("Rachel"), "eleven_multilingual_v2", &mut out)
            .await
            .unwrap();
        (outcome, String::from_utf8(out).unwrap())
    }

    #[test]
    fn test_random_selector_bounds() {
        let selector = RandomSelector;
        assert_eq!(selector.choose(0), None);
        assert_eq!(selector.choose(1), Some(0));
        for _ in 0..50 {
            assert!(selector.choose(3).unwrap() < 3);
        }
    }

    #[test]
    fn test_settings_from_config() {
        let settings = SessionSettings::from(&LingvoxConfig::default());
        assert_eq!(settings.pause, Duration::from_secs(1));
        assert_eq!(settings.sentinel, "quit");
        assert_eq!(settings.fallback_model, "eleven_multilingual_v2");
    }

    #[tokio::test]
    async fn test_english_input_scenario() {
        let llm = ScriptedLlm::new(vec![Ok(
            "Detected Language: English\nTranslation: Привет, как дела?".to_string(),
        )]);
        let speech = speech();
        let sink = RecordingSink::default();

        let (outcome, output) = process(&llm, &speech, &sink, "Hello, how are you?").await;

        assert_eq!(outcome, IterationOutcome::Spoken);
        assert!(output.contains("Detected language: English"));
        assert!(output.contains("Russian: Привет, как дела?"));
        assert!(!output.contains("Pronunciation guide"));
        assert_eq!(llm.requests.lock().unwrap().len(), 1);
        assert_eq!(
            speech.synthesized_texts(),
            vec!["Hello, how are you?", "Привет, как дела?"]
        );
        assert_eq!(sink.played.lock().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_russian_input_scenario() {
        let llm = ScriptedLlm::new(vec![
            Ok("Detected Language: Russian\nTranslation: Hello".to_string()),
            Ok("Privet".to_string()),
        ]);
        let speech = speech();
        let sink = RecordingSink::default();

        let (outcome, output) = process(&llm, &speech, &sink, "Привет").await;

        assert_eq!(outcome, IterationOutcome::Spoken);
        assert!(output.contains("Detected language: Russian"));
        assert!(output.contains("English: Hello"));
        assert!(output.contains("Pronunciation guide: Privet"));
        assert_eq!(
            llm.prompts(),
            vec![
                "Translate this text: Привет",
                "Transliterate this Russian text: Привет"
            ]
        );
        assert_eq!(speech.synthesized_texts(), vec!["Привет", "Hello"]);
        assert_eq!(sink.played.lock().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_translation_failure_skips_synthesis() {
        let llm = ScriptedLlm::new(vec![Err(LlmError::Request("timeout".to_string()))]);
        let speech = speech();
        let sink = RecordingSink::default();

        let (outcome, output) = process(&llm, &speech, &sink, "Hello").await;

        assert_eq!(outcome, IterationOutcome::TranslationFailed);
        assert!(output.contains("Translation failed. Please try again."));
        assert!(speech.synthesized_texts().is_empty());
        assert!(sink.played.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_malformed_reply_skips_synthesis() {
        let llm = ScriptedLlm::new(vec![Ok("I think this is English.".to_string())]);
        let speech = speech();
        let sink = RecordingSink::default();

        let (outcome, output) = process(&llm, &speech, &sink, "Hello").await;

        assert_eq!(outcome, IterationOutcome::TranslationFailed);
        assert!(output.contains("Unexpected response format"));
        assert!(speech.synthesized_texts().is_empty());
    }

    #[tokio::test]
    async fn test_transliteration_failure_still_plays() {
        let llm = ScriptedLlm::new(vec![
            Ok("Detected Language: russian\nTranslation: Thanks".to_string()),
            Err(LlmError::Request("rate limited".to_string())),
        ]);
        let speech = speech();
        let sink = RecordingSink::default();

        let (outcome, output) = process(&llm, &speech, &sink, "Спасибо").await;

        assert_eq!(outcome, IterationOutcome::Spoken);
        assert!(output.contains("Error in transliteration"));
        assert_eq!(sink.played.lock().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_speech_failure_is_not_fatal() {
        let llm = ScriptedLlm::new(vec![Ok(
            "Detected Language: English\nTranslation: Да".to_string(),
        )]);
        let mut speech = speech();
        speech.fail_synthesis = true;
        let sink = RecordingSink::default();

        let (outcome, output) = process(&llm, &speech, &sink, "Yes").await;

        assert_eq!(outcome, IterationOutcome::Spoken);
        assert_eq!(output.matches("Error in text-to-speech").count(), 2);
    }

    #[tokio::test]
    async fn test_quit_exits_without_translation() {
        let llm = ScriptedLlm::new(vec![]);
        let speech = speech();
        let sink = RecordingSink::default();
        let session = Session::new(&llm, &speech, &sink, &FirstSelector, settings());

        let mut out = Vec::new();
        session.run("QUIT\n".as_bytes(), &mut out).await.unwrap();
        let output = String::from_utf8(out).unwrap();

        assert!(output.contains("Available voices: Rachel, Adam"));
        assert!(output.trim_end().ends_with(FAREWELL));
        assert!(llm.requests.lock().unwrap().is_empty());
        assert!(speech.synthesized_texts().is_empty());
    }

    #[tokio::test]
    async fn test_run_one_line_then_end_of_input() {
        let llm = ScriptedLlm::new(vec![Ok(
            "Detected Language: English\nTranslation: Привет".to_string(),
        )]);
        let speech = speech();
        let sink = RecordingSink::default();
        let session = Session::new(&llm, &speech, &sink, &FirstSelector, settings());

        let mut out = Vec::new();
        session.run("\n  Hello  \n".as_bytes(), &mut out).await.unwrap();
        let output = String::from_utf8(out).unwrap();

        assert_eq!(llm.prompts(), vec!["Translate this text: Hello"]);
        assert!(output.contains("Using model: eleven_multilingual_v2"));
        assert!(output.contains("Using voice: Rachel"));
        assert!(output.contains(FAREWELL));
        assert_eq!(speech.synthesized_texts(), vec!["Hello", "Привет"]);
    }

    #[tokio::test]
    async fn test_directories_fetched_once_per_session() {
        let llm = ScriptedLlm::new(vec![
            Ok("Detected Language: English\nTranslation: Один".to_string()),
            Ok("Detected Language: English\nTranslation: Два".to_string()),
        ]);
        let speech = speech();
        let sink = RecordingSink::default();
        let session = Session::new(&llm, &speech, &sink, &FirstSelector, settings());

        let mut out = Vec::new();
        session
            .run("One\nTwo\nquit\n".as_bytes(), &mut out)
            .await
            .unwrap();

        // verification + snapshot, then one re-fetch per playback
        assert_eq!(*speech.voice_listings.lock().unwrap(), 2 + 4);
    }

    #[tokio::test]
    async fn test_no_voices_runs_with_default_voice() {
        let llm = ScriptedLlm::new(vec![]);
        let speech = FakeSpeech::new(vec![], vec![]);
        let sink = RecordingSink::default();
        let session = Session::new(&llm, &speech, &sink, &FirstSelector, settings());

        let mut out = Vec::new();
        session.run("quit\n".as_bytes(), &mut out).await.unwrap();
        let output = String::from_utf8(out).unwrap();

        assert!(output.contains("No voices available. Using default settings."));
    }

    #[tokio::test]
    async fn test_selected_indices_pick_model_and_voice() {
        let llm = ScriptedLlm::new(vec![Ok(
            "Detected Language: English\nTranslation: Да".to_string(),
        )]);
        let speech = FakeSpeech::new(
            vec![Voice::new("Rachel", "id-rachel"), Voice::new("Adam", "id-adam")],
            vec!["eleven_multilingual_v2", "eleven_turbo_v2_5"],
        );
        let sink = RecordingSink::default();
        let session = Session::new(&llm, &speech, &sink, &LastSelector, settings());

        let mut out = Vec::new();
        session.run("Yes\nquit\n".as_bytes(), &mut out).await.unwrap();
        let output = String::from_utf8(out).unwrap();

        assert!(output.contains("Using model: eleven_turbo_v2_5"));
        assert!(output.contains("Using voice: Adam"));
        let calls = speech.synthesized.lock().unwrap();
        assert_eq!(calls.len(), 2);
        for (_, voice_id, model_id) in calls.iter() {
            assert_eq!(voice_id, "id-adam");
            assert_eq!(model_id, "eleven_turbo_v2_5");
        }
    }

    #[tokio::test]
    async fn test_non_utf8_line_does_not_end_session() {
        let llm = ScriptedLlm::new(vec![
            Ok("Detected Language: French\nTranslation: Кафе".to_string()),
            Ok("Detected Language: English\nTranslation: Да".to_string()),
        ]);
        let speech = speech();
        let sink = RecordingSink::default();
        let session = Session::new(&llm, &speech, &sink, &FirstSelector, settings());

        let input: &[u8] = b"caf\xe9\nYes\nquit\n";
        let mut out = Vec::new();
        session.run(input, &mut out).await.unwrap();
        let output = String::from_utf8(out).unwrap();

        assert_eq!(
            llm.prompts(),
            vec!["Translate this text: caf\u{FFFD}", "Translate this text: Yes"]
        );
        assert!(output.trim_end().ends_with(FAREWELL));
    }

    #[tokio::test]
    async fn test_failed_verification_is_fatal() {
        let llm = ScriptedLlm::new(vec![]);
        let speech = FakeSpeech::failing();
        let sink = RecordingSink::default();
        let session = Session::new(&llm, &speech, &sink, &FirstSelector, settings());

        let mut out = Vec::new();
        let err = session
            .run("Hello\n".as_bytes(), &mut out)
            .await
            .unwrap_err();

        assert!(matches!(err, LingvoxError::Config(_)));
        assert!(err.to_string().contains("Invalid ElevenLabs API key"));
        let output = String::from_utf8(out).unwrap();
        assert!(output.contains("Error verifying ElevenLabs API key"));
        assert!(llm.requests.lock().unwrap().is_empty());
    }
}
