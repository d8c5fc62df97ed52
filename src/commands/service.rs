use std::path::PathBuf;

use clap::{ArgGroup, Args};
use serde_json::json;
use tracing::info;

use crate::commands::CommonArgs;
use crate::config::{EnvSource, Settings};
use crate::error::{AppError, StartupError};
use crate::llm::OpenAiClient;
use crate::llm::openai::preview_chat_request;
use crate::output::write_file;
use crate::service::prompt::{self, AnalysisMode};
use crate::service::ServiceAnalyzer;

#[derive(Debug, Args, Clone)]
#[command(group(ArgGroup::new("input").required(true).args(["service", "text"])))]
pub struct ServiceArgs {
    #[arg(
        short,
        long,
        value_name = "NAME",
        help = "Known service name (e.g. \"Spotify\", \"Notion\")"
    )]
    pub service: Option<String>,
    #[arg(short, long, value_name = "TEXT", help = "Raw service description text")]
    pub text: Option<String>,
    #[arg(
        short,
        long,
        value_name = "PATH",
        help = "Write the report to a file instead of the console"
    )]
    pub output: Option<PathBuf>,
    #[arg(long, help = "Print the request without sending it")]
    pub dry_run: bool,
    #[command(flatten)]
    pub common: CommonArgs,
}

impl ServiceArgs {
    fn input(&self) -> Result<(&str, AnalysisMode), StartupError> {
        match (&self.service, &self.text) {
            (Some(name), None) => Ok((name.as_str(), AnalysisMode::KnownService)),
            (None, Some(text)) => Ok((text.as_str(), AnalysisMode::Description)),
            _ => Err(StartupError::Config(
                "Provide exactly one of --service or --text.".to_string(),
            )),
        }
    }
}

pub async fn run(args: ServiceArgs) -> Result<(), AppError> {
    args.common.init_logging()?;
    let (input, mode) = args.input()?;

    let env = EnvSource::from_process()?;
    let settings = Settings::resolve(&args.common.overrides(None), &env)?;

    if args.dry_run {
        let request = preview_chat_request(
            &settings.chat_model,
            &prompt::messages(input, mode),
            prompt::REPORT_OPTIONS,
        );
        let body = json!({
            "dry_run": true,
            "mode": match mode {
                AnalysisMode::KnownService => "service",
                AnalysisMode::Description => "description",
            },
            "model": settings.chat_model,
            "output": args.output.as_ref().map(|path| path.display().to_string()),
            "request": request,
        });
        println!("{}", serde_json::to_string(&body)?);
        return Ok(());
    }

    let analyzer = ServiceAnalyzer::new(OpenAiClient::new(&settings)?);
    match mode {
        AnalysisMode::KnownService => info!("Analyzing known service: {input}"),
        AnalysisMode::Description => info!("Analyzing service description..."),
    }
    let report = analyzer.analyze(input, mode).await;

    match &args.output {
        Some(path) => {
            write_file(path, &report)?;
            println!("Report saved to: {}", path.display());
        }
        None => {
            println!("\n{}", "=".repeat(60));
            println!("SERVICE ANALYSIS REPORT");
            println!("{}", "=".repeat(60));
            println!("{report}");
        }
    }
    Ok(())
}
