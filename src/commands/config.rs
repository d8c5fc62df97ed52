use clap::{Args, Subcommand};

use crate::config::{self, EnvSource};
use crate::error::AppError;

#[derive(Debug, Args, Clone)]
pub struct ConfigArgs {
    #[command(subcommand)]
    command: ConfigSubcommand,
}

#[derive(Debug, Subcommand, Clone)]
enum ConfigSubcommand {
    #[command(about = "Parse the config file and optionally check a profile")]
    Check {
        #[arg(long)]
        profile: Option<String>,
    },
}

pub fn run(args: ConfigArgs) -> Result<(), AppError> {
    match args.command {
        ConfigSubcommand::Check { profile } => {
            let env = EnvSource::from_process()?;
            let path = config::validate_config(profile.as_deref(), &env)?;
            println!("config OK: {}", path.display());
            Ok(())
        }
    }
}
