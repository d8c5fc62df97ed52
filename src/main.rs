use std::io;
use std::process;

use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{generate, shells};
use lltools::commands::audio::{self, AudioArgs};
use lltools::commands::config::{self, ConfigArgs};
use lltools::commands::product::{self, ProductArgs};
use lltools::commands::service::{self, ServiceArgs};
use lltools::commands::VERSION;

const ROOT_HELP_EXAMPLES: &str = "Examples:\n  lltools product --catalog products.json\n  lltools audio meeting.mp3 --output-dir notes\n  lltools service --service \"Notion\"\n  lltools service --text \"Our app helps students organize study schedules\" --output report.md\n  lltools completion bash > ~/.local/share/bash-completion/completions/lltools";

const SERVICE_HELP_EXAMPLES: &str = "Examples:\n  lltools service --service \"Notion\"\n  lltools service --text \"Our app helps students organize study schedules\"\n  lltools service --service \"Discord\" --output report.md\n  lltools service --service \"Figma\" --dry-run";

#[derive(Debug, Parser)]
#[command(
    name = "lltools",
    about = "LLM-backed text tools",
    version = VERSION,
    propagate_version = true,
    after_help = ROOT_HELP_EXAMPLES
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    #[command(about = "Search a product catalog in natural language")]
    Product(ProductArgs),
    #[command(about = "Transcribe, summarize and analyze an audio file")]
    Audio(AudioArgs),
    #[command(about = "Generate a service analysis report", after_help = SERVICE_HELP_EXAMPLES)]
    Service(ServiceArgs),
    #[command(about = "Manage local config")]
    Config(ConfigArgs),
    #[command(about = "Generate shell completion script")]
    Completion {
        #[arg(value_enum)]
        shell: CompletionShell,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum CompletionShell {
    Bash,
    Zsh,
    Fish,
}

fn print_completion(shell: CompletionShell) {
    let mut cmd = Cli::command();
    match shell {
        CompletionShell::Bash => generate(shells::Bash, &mut cmd, "lltools", &mut io::stdout()),
        CompletionShell::Zsh => generate(shells::Zsh, &mut cmd, "lltools", &mut io::stdout()),
        CompletionShell::Fish => generate(shells::Fish, &mut cmd, "lltools", &mut io::stdout()),
    }
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Product(args) => product::run(args).await,
        Commands::Audio(args) => audio::run(args).await,
        Commands::Service(args) => service::run(args).await,
        Commands::Config(args) => config::run(args),
        Commands::Completion { shell } => {
            print_completion(shell);
            Ok(())
        }
    };

    if let Err(err) = result {
        eprintln!("Error: {err}");
        process::exit(1);
    }
}
