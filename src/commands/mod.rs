//! Command-line entry points shared by the umbrella and standalone binaries.

use clap::Args;

use crate::config::Overrides;
use crate::error::AppError;
use crate::logging;

pub mod audio;
pub mod config;
pub mod product;
pub mod service;

pub const VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    " (commit: ",
    env!("LT_GIT_SHA"),
    ", built: ",
    env!("LT_BUILD_TS"),
    ")"
);

/// Options every tool accepts.
#[derive(Debug, Args, Clone, Default)]
pub struct CommonArgs {
    #[arg(long, help = "Profile from the config file")]
    pub profile: Option<String>,
    #[arg(long, help = "Chat model (env: LT_MODEL)")]
    pub model: Option<String>,
    #[arg(long, value_name = "SECS", help = "Per-request timeout (env: LT_TIMEOUT)")]
    pub timeout: Option<u64>,
    #[arg(short, long, help = "Show debug logs")]
    pub verbose: bool,
    #[arg(short, long, help = "Only show errors")]
    pub quiet: bool,
}

impl CommonArgs {
    pub fn overrides(&self, api_key: Option<String>) -> Overrides {
        Overrides {
            profile: self.profile.clone(),
            model: self.model.clone(),
            api_key,
            timeout_secs: self.timeout,
        }
    }

    pub fn init_logging(&self) -> Result<(), AppError> {
        logging::init(self.verbose, self.quiet)
    }
}
