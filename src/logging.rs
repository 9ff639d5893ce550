//! Log output setup for the binary.

use tracing_subscriber::EnvFilter;

const DEFAULT_FILTER: &str = "info";

/// Send `log` records to stderr so stdout only carries program output.
pub fn init_logging() {
    let result = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(DEFAULT_FILTER))
        .with_writer(std::io::stderr)
        .with_target(true)
        .compact()
        .try_init();
    if let Err(e) = result {
        eprintln!("logging already initialized: {}", e);
    }
}
