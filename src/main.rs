// lingvox: English-Russian translator with spoken playback
// OpenAI translation with ElevenLabs TTS, driven by an interactive prompt

use std::time::Duration;

use clap::Parser;
use lingvox::cli::Cli;
use lingvox::config::LingvoxConfig;
use lingvox::credentials::Credentials;
use lingvox::error::Result;
use lingvox::llm::OpenAIProvider;
use lingvox::session::{RandomSelector, Session, SessionSettings};
use lingvox::speech::{ElevenLabsClient, RodioPlayer};

#[tokio::main(flavor = "current_thread")]
async fn main() {
    // Parse CLI arguments (help/version only)
    let _cli = Cli::parse();

    // Initialize tracing; default to warn so logs stay out of the transcript
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    if let Err(e) = run().await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    let credentials = Credentials::from_env()?;
    let config = LingvoxConfig::load_from_home()?;

    let llm = OpenAIProvider::new(
        credentials.openai_api_key,
        config.translation.model.clone(),
        config.translation.base_url.clone(),
        config.translation.timeout.map(Duration::from_secs),
    );
    let speech = ElevenLabsClient::new(
        credentials.elevenlabs_api_key,
        config.speech.base_url.clone(),
        config.speech.timeout.map(Duration::from_secs),
    );
    let sink = RodioPlayer::new(config.speech.volume);
    let selector = RandomSelector;

    tracing::info!(
        "Starting session (model: {}, pause: {}ms)",
        config.translation.model,
        config.session.pause_ms
    );

    let session = Session::new(
        &llm,
        &speech,
        &sink,
        &selector,
        SessionSettings::from(&config),
    );

    let stdin = std::io::stdin();
    let mut stdout = std::io::stdout();
    session.run(stdin.lock(), &mut stdout).await
}
