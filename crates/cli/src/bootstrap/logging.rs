use propcast_domain::Config;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Install the global subscriber. The config's `logging.level` is a full
/// filter directive string; `RUST_LOG` overrides it so operators can raise
/// verbosity per module without touching the config file.
pub fn init_logging(config: &Config) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_ansi(config.logging.ansi)
        .init();

    info!(filter = %config.logging.level, "Logging initialized");
}
