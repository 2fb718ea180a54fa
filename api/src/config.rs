//! Layered configuration loading.
//!
//! Sources, lowest priority first:
//! 1. Built-in defaults for the current `ENVIRONMENT`
//! 2. `config/default.{toml,json,yaml}` (optional)
//! 3. `config/<environment>.{toml,json,yaml}` (optional)
//! 4. `FINTRACK__*` environment variables, e.g. `FINTRACK__SERVER__PORT=9000`

use config::{Config, ConfigError, File};
use ft_shared::config::{AppConfig, Environment};

/// Prefix of environment overrides
pub const ENV_PREFIX: &str = "FINTRACK";

/// Load the configuration for the environment named by `ENVIRONMENT`
pub fn load() -> Result<AppConfig, ConfigError> {
    load_for(Environment::from_env(), None)
}

/// Load the configuration for `environment`.
///
/// `overrides` replaces the process environment as the source of
/// `FINTRACK__*` variables when given.
pub fn load_for(
    environment: Environment,
    overrides: Option<config::Map<String, String>>,
) -> Result<AppConfig, ConfigError> {
    let baseline = AppConfig::for_environment(environment);

    let env_source = config::Environment::with_prefix(ENV_PREFIX)
        .prefix_separator("__")
        .separator("__")
        .try_parsing(true)
        .list_separator(",")
        .with_list_parse_key("cors.allowed_origins")
        .source(overrides);

    let settings = Config::builder()
        .add_source(Config::try_from(&baseline)?)
        .add_source(File::with_name("config/default").required(false))
        .add_source(File::with_name(environment.config_file()).required(false))
        .add_source(env_source)
        .build()?;

    let mut config: AppConfig = settings.try_deserialize()?;
    config.environment = environment;
    Ok(config)
}
