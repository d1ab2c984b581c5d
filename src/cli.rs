// CLI argument parsing for lingvox
// The program is fully interactive; only --help and --version are accepted

use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "lingvox")]
#[command(about = "Translate between English and Russian and hear both spoken aloud")]
#[command(
    long_about = "Translate between English and Russian and hear both spoken aloud.\n\n\
    Requires OPENAI_API_KEY and ELEVENLABS_API_KEY in the environment.\n\
    Optional settings are read from ~/.config/lingvox/config.json.\n\
    Type 'quit' at the prompt to exit."
)]
#[command(version)]
pub struct Cli {}
