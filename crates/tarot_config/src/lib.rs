use config::{Config, ConfigError, Environment, File};
use once_cell::sync::OnceCell;
use std::env;
use std::path::PathBuf;
use thiserror::Error;
use tracing::debug;

pub mod models;
pub use models::*;


/// Errors raised when a loaded configuration is internally inconsistent.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigModelError {
    #[error("Unknown time zone: {0}")]
    InvalidTimeZone(String),
    #[error("Session durations must be a non-empty list of positive minutes, got {0:?}")]
    InvalidDurations(Vec<i64>),
    #[error("Default duration {0} is not one of the offered durations")]
    DefaultDurationNotOffered(i64),
    #[error("Booking horizon must be between 0 and {max} days, got {0} days", max = models::MAX_HORIZON_DAYS)]
    HorizonOutOfRange(i64),
}

/// Loads the layered configuration.
///
/// Sources, later ones overriding earlier ones:
/// `config/default.*`, `config/<RUN_ENV>.*` and `TAROT__*` environment variables.
/// The directory can be moved with `TAROT_CONFIG_DIR`.
pub fn load_config() -> Result<AppConfig, ConfigError> {
    ensure_dotenv_loaded();

    let run_env = env::var("RUN_ENV").unwrap_or_else(|_| "debug".to_string());
    let config_dir =
        PathBuf::from(env::var("TAROT_CONFIG_DIR").unwrap_or_else(|_| "config".to_string()));

    let default_path = config_dir.join("default");
    let env_path = config_dir.join(&run_env);

    debug!("config: default_path: {}", default_path.display());
    debug!("config: env_path: {}", env_path.display());

    let builder = Config::builder()
        .add_source(File::from(default_path).required(false))
        .add_source(File::from(env_path).required(false))
        .add_source(
            Environment::with_prefix("TAROT")
                .prefix_separator("__")
                .separator("__")
                .list_separator(",")
                .with_list_parse_key("booking.durations")
                .try_parsing(true),
        );

    let app_config: AppConfig = builder.build()?.try_deserialize()?;
    app_config
        .booking
        .validate()
        .map_err(|err| ConfigError::Message(err.to_string()))?;
    Ok(app_config)
}

static INIT_DOTENV: OnceCell<()> = OnceCell::new();

/// Ensures that the dotenv file is loaded into the environment variables.
///
/// The file defaults to `.env` and can be overridden with `DOTENV_OVERRIDE`.
/// Returns the path that was used.
pub fn ensure_dotenv_loaded() -> String {
    let dotenv_path = std::env::var("DOTENV_OVERRIDE").unwrap_or_else(|_| ".env".to_string());

    INIT_DOTENV.get_or_init(|| {
        dotenv::from_filename(&dotenv_path).ok();
    });

    dotenv_path
}
