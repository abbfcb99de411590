//! coordctl.toml configuration
//!
//! Every section is optional. Missing keys fall back to the values the
//! maintenance scripts were run with against the line's test database.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Config file looked up in the working directory when `--config` is absent
pub const DEFAULT_CONFIG_FILE: &str = "coordctl.toml";

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("config file not found: {0}")]
    NotFound(String),

    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid config value: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ToolConfig {
    pub database: DatabaseConfig,
    pub reset: ResetConfig,
    pub add_actl: AddActlConfig,
    pub batch_status: BatchStatusConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DatabaseConfig {
    /// Database file; relative paths resolve against the working directory
    pub path: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ResetConfig {
    /// Tool whose batch rows keep their processed flag
    pub keep_equipment: String,
}

impl Default for ResetConfig {
    fn default() -> Self {
        ResetConfig {
            keep_equipment: "DVETC28".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AddActlConfig {
    pub equipment: String,
    pub hours_ago: i64,
    pub lot_type: String,
}

impl Default for AddActlConfig {
    fn default() -> Self {
        AddActlConfig {
            equipment: "DVETC28".to_string(),
            hours_ago: 3,
            lot_type: "PS".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BatchStatusConfig {
    pub batch_id: String,
}

impl Default for BatchStatusConfig {
    fn default() -> Self {
        BatchStatusConfig {
            batch_id: "20251111215740745".to_string(),
        }
    }
}

impl ToolConfig {
    /// Parse a config file
    pub fn load(path: &Path) -> Result<Self, Error> {
        if !path.exists() {
            return Err(Error::NotFound(path.display().to_string()));
        }
        let content = std::fs::read_to_string(path)?;
        let config = Self::parse(&content)?;
        debug!(path = %path.display(), "loaded config");
        Ok(config)
    }

    /// Parse config text
    pub fn parse(content: &str) -> Result<Self, Error> {
        let config: ToolConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load `explicit` (which must exist), else `coordctl.toml` in the
    /// working directory if present, else defaults
    pub fn load_or_default(explicit: Option<&Path>) -> Result<Self, Error> {
        match explicit {
            Some(path) => Self::load(path),
            None => {
                let default_path = Path::new(DEFAULT_CONFIG_FILE);
                if default_path.exists() {
                    Self::load(default_path)
                } else {
                    Ok(ToolConfig::default())
                }
            }
        }
    }

    fn validate(&self) -> Result<(), Error> {
        if self.add_actl.hours_ago < 0 {
            return Err(Error::Invalid(format!(
                "add_actl.hours_ago must not be negative (got {})",
                self.add_actl.hours_ago
            )));
        }
        if self.reset.keep_equipment.trim().is_empty() {
            return Err(Error::Invalid(
                "reset.keep_equipment must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}
