use anyhow::anyhow;
use tracing_subscriber::EnvFilter;

/// Installs a subscriber that also collects `log` records. `RUST_LOG` takes
/// precedence over the verbose flag.
pub fn init(verbose: bool) -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_error| EnvFilter::new(if verbose { "debug" } else { "info" }));

    // Results go to stdout
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|error| anyhow!(error))
}
