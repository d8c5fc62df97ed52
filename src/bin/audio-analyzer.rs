use std::process;

use clap::Parser;
use lltools::commands::VERSION;
use lltools::commands::audio::{self, AudioArgs};

const HELP_EXAMPLES: &str = "Examples:\n  audio-analyzer audio.mp3\n  audio-analyzer path/to/audio.wav --api-key sk-your-api-key";

#[derive(Debug, Parser)]
#[command(
    name = "audio-analyzer",
    about = "Transcribe, summarize and analyze an audio file",
    version = VERSION,
    after_help = HELP_EXAMPLES
)]
struct Cli {
    #[command(flatten)]
    audio: AudioArgs,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    if let Err(err) = audio::run(cli.audio).await {
        eprintln!("Error: {err}");
        process::exit(1);
    }
}
