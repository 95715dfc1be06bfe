pub mod config_load;
pub mod config_types;
pub mod overrides;

pub use config_load::{Config, CONFIG_FILE_NAME};
pub use config_types::{DeviceConfig, DeviceKind, OscConfig, OutputConfig, RenderConfig};

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("no config file found")]
    NotFound,
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("option {0} needs a value")]
    MissingValue(String),
    #[error("invalid value {value:?} for option {flag}")]
    InvalidOverride { flag: String, value: String },
    #[error("invalid config: {0}")]
    Invalid(String),
}
