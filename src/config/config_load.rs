// src/config/config_load.rs
//
// loading of laserclock.toml

use log::{info, warn};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use super::{ConfigError, DeviceConfig, OscConfig, OutputConfig, RenderConfig};

pub const CONFIG_FILE_NAME: &str = "laserclock.toml";

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    pub render: RenderConfig,
    pub device: DeviceConfig,
    pub output: OutputConfig,
    pub osc: OscConfig,
}

impl Config {
    /// Loads the config file, looking beside the executable first and then in
    /// the current working directory.
    pub fn load() -> Result<Self, ConfigError> {
        let path = Self::locate().ok_or(ConfigError::NotFound)?;
        Self::load_from(&path)
    }

    /// Like `load`, but a missing file yields the built-in defaults.
    /// A file that exists and fails to parse is still an error.
    pub fn load_or_default() -> Result<Self, ConfigError> {
        match Self::load() {
            Err(ConfigError::NotFound) => {
                info!("No {} found, using built-in defaults", CONFIG_FILE_NAME);
                Ok(Self::default())
            }
            other => other,
        }
    }

    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml(&content)?;
        info!("Loaded config from {}", path.display());
        Ok(config)
    }

    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Config = toml::from_str(content)?;
        config.render.validate()?;
        Ok(config)
    }

    /// Loads the config file (or defaults) and applies `-name value` overrides
    /// from the process arguments.
    pub fn from_env_args() -> Result<Self, ConfigError> {
        let mut config = Self::load_or_default()?;
        let args: Vec<String> = std::env::args().skip(1).collect();
        config.apply_overrides(&args)?;
        Ok(config)
    }

    fn locate() -> Option<PathBuf> {
        let exe_config = std::env::current_exe()
            .ok()
            .and_then(|p| p.parent().map(|dir| dir.join(CONFIG_FILE_NAME)));

        if let Some(path) = exe_config {
            if path.exists() {
                return Some(path);
            }
        }

        let cwd_config = PathBuf::from(CONFIG_FILE_NAME);
        if cwd_config.exists() {
            Some(cwd_config)
        } else {
            None
        }
    }

    pub fn resolve_dump_dir(&self) -> PathBuf {
        if Path::new(&self.output.dump_directory).is_absolute() {
            PathBuf::from(&self.output.dump_directory)
        } else {
            // relative paths resolve against the executable's directory
            std::env::current_exe()
                .ok()
                .and_then(|p| p.parent().map(|p| p.to_path_buf()))
                .map(|exe_dir| exe_dir.join(&self.output.dump_directory))
                .unwrap_or_else(|| PathBuf::from(&self.output.dump_directory))
        }
    }

    pub(crate) fn warn_unknown_flag(flag: &str) {
        warn!("Ignoring unknown option {}", flag);
    }
}
