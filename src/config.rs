//! Controller configuration
//!
//! Every field has a default, so a YAML document only needs the keys it
//! overrides:
//!
//! ```yaml
//! default_author: bootstrap
//! reject_orphans: true
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;
use tracing::info;

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed YAML or unknown key
    #[error("Parse error: {0}")]
    Parse(#[from] serde_yaml::Error),
}

pub type ConfigResult<T> = Result<T, ConfigError>;

/// Controller configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ControllerConfig {
    /// Author recorded for operations submitted without one
    pub default_author: String,
    /// Fail operations that create an element with no container instead of
    /// reporting a warning
    pub reject_orphans: bool,
    /// Initial capacity of the history log
    pub history_capacity: usize,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            default_author: "noop".to_string(),
            reject_orphans: false,
            history_capacity: 256,
        }
    }
}

impl ControllerConfig {
    pub fn from_yaml_str(yaml: &str) -> ConfigResult<Self> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Load configuration from a YAML file
    pub fn from_file(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)?;
        let config = Self::from_yaml_str(&contents)?;
        info!("Loaded controller config from {:?}", path);
        Ok(config)
    }
}
