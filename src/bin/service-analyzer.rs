use std::process;

use clap::Parser;
use lltools::commands::VERSION;
use lltools::commands::service::{self, ServiceArgs};

const HELP_EXAMPLES: &str = "Examples:\n  service-analyzer --service \"Notion\"\n  service-analyzer --text \"Our app helps students organize study schedules\"\n  service-analyzer --service \"Discord\" --output report.md";

#[derive(Debug, Parser)]
#[command(
    name = "service-analyzer",
    about = "Generate a service analysis report",
    version = VERSION,
    after_help = HELP_EXAMPLES
)]
struct Cli {
    #[command(flatten)]
    service: ServiceArgs,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    if let Err(err) = service::run(cli.service).await {
        eprintln!("Error: {err}");
        process::exit(1);
    }
}
