use std::path::PathBuf;

use clap::Args;

use crate::audio::AudioAnalyzer;
use crate::audio::analyzer::ensure_audio_exists;
use crate::commands::CommonArgs;
use crate::config::{EnvSource, Settings};
use crate::error::AppError;
use crate::llm::OpenAiClient;

const RULE: &str = "============================================================";
const SECTION_RULE: &str = "----------------------------------------";

#[derive(Debug, Args, Clone)]
pub struct AudioArgs {
    #[arg(value_name = "AUDIO_FILE", help = "Path to the audio file to process")]
    pub audio_file: PathBuf,
    #[arg(long, value_name = "KEY", help = "API key (overrides OPENAI_API_KEY)")]
    pub api_key: Option<String>,
    #[arg(long, value_name = "DIR", default_value = ".", help = "Directory for the result files")]
    pub output_dir: PathBuf,
    #[command(flatten)]
    pub common: CommonArgs,
}

pub async fn run(args: AudioArgs) -> Result<(), AppError> {
    args.common.init_logging()?;
    ensure_audio_exists(&args.audio_file)?;

    let env = EnvSource::from_process()?;
    let settings = Settings::resolve(&args.common.overrides(args.api_key.clone()), &env)?;
    let analyzer = AudioAnalyzer::new(OpenAiClient::new(&settings)?);

    let report = analyzer.process(&args.audio_file, &args.output_dir).await?;

    println!("Results saved:");
    println!("   Transcription: {}", report.files.transcription.display());
    println!("   Summary: {}", report.files.summary.display());
    println!("   Analytics: {}", report.files.analytics.display());

    println!("\n{RULE}");
    println!("ANALYSIS RESULTS");
    println!("{RULE}");
    println!("\nSUMMARY:");
    println!("{SECTION_RULE}");
    println!("{}", report.summary);
    println!("\nANALYTICS:");
    println!("{SECTION_RULE}");
    println!("{}", serde_json::to_string_pretty(&report.analytics)?);
    println!("\n{RULE}");
    println!("Processing completed successfully!");
    Ok(())
}
