//! Application configuration loading
//!
//! Configuration is assembled from an optional environment-specific TOML
//! file plus `NH__`-prefixed environment variables
//! (e.g. `NH__SERVER__PORT=9000`), with `DATABASE_URL` honored directly
//! for deployment convenience.

use std::env;

use config::{Config, File};

use nh_shared::config::{AppConfig, Environment};

/// Load and validate the application configuration
pub fn load_config() -> anyhow::Result<AppConfig> {
    let environment = Environment::from_env();

    let settings = Config::builder()
        .add_source(File::with_name(environment.config_file()).required(false))
        .add_source(
            config::Environment::with_prefix("NH")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    let mut app_config: AppConfig = settings.try_deserialize()?;
    app_config.environment = environment;

    if let Ok(url) = env::var("DATABASE_URL") {
        app_config.database.url = url;
    }

    app_config
        .validate()
        .map_err(|message| anyhow::anyhow!("Invalid configuration: {}", message))?;

    Ok(app_config)
}
