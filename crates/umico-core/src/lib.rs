mod app_config;
mod config;
mod store;

pub use app_config::{AppConfig, ApiConfig, OutputConfig};
pub use config::{load_app_config, load_app_config_from_env};
pub use store::{StoreRecord, COLUMNS};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
