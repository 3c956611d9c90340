use crate::error::ConfigError;
use config::builder::DefaultState;
use config::ConfigBuilder;

// Declare the modules that make up this crate.
pub mod error;
pub mod logging;
pub mod settings;

// Re-export the core types to provide a clean public API.
pub use logging::init_tracing;
pub use settings::{DatabaseSettings, LogFormat, LoggingSettings, ServerSettings, Settings};

/// The settings file looked up in the working directory. It is optional.
pub const DEFAULT_CONFIG_FILE: &str = "config.toml";

/// Loads the application configuration.
///
/// Sources, lowest precedence first: built-in defaults, `config.toml`
/// (if present), then `PV_`-prefixed environment variables using `__` to
/// separate nested keys (e.g. `PV_SERVER__PORT=8080`).
///
/// The result is not validated yet: callers apply their own overrides (such
/// as CLI flags) first and then call [`Settings::validate`].
pub fn load_config() -> Result<Settings, ConfigError> {
    let builder = config::Config::builder()
        .add_source(config::File::with_name(DEFAULT_CONFIG_FILE).required(false))
        .add_source(
            config::Environment::with_prefix("PV")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );
    build(builder)
}

/// Applies the defaults underneath `builder`'s sources and deserializes.
fn build(builder: ConfigBuilder<DefaultState>) -> Result<Settings, ConfigError> {
    let config = builder
        .set_default("server.host", "0.0.0.0")?
        .set_default("server.port", 3000)?
        .set_default("database.max_connections", 10)?
        .set_default("database.acquire_timeout_secs", 5)?
        .set_default("logging.filter", "info")?
        .set_default("logging.format", "full")?
        .build()?;

    let settings = config.try_deserialize::<Settings>()?;
    Ok(settings)
}
