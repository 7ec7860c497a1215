use propcast_domain::{CliOverrides, Config};
use tracing::info;

pub fn load_config(
    config_path: Option<&str>,
    cli_overrides: CliOverrides,
) -> anyhow::Result<Config> {
    let config = Config::load(config_path, cli_overrides)?;

    info!(
        config_file = config_path.unwrap_or("default"),
        bind = %config.server.bind_address,
        port = config.server.port,
        grid = %config.station.grid,
        "Configuration loaded"
    );

    Ok(config)
}
