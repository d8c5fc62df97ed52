use tracing_subscriber::EnvFilter;

use crate::error::AppError;

/// Installs the stderr subscriber. `RUST_LOG` wins over the flags.
pub fn init(verbose: bool, quiet: bool) -> Result<(), AppError> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(if quiet {
            "error"
        } else if verbose {
            "warn,lltools=debug"
        } else {
            "warn,lltools=info"
        })
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .try_init()
        .map_err(|err| AppError::Logging(err.to_string()))
}
