use serde::Deserialize;
use std::collections::BTreeSet;
use std::fmt;
use std::fs;
use std::path::Path;

use crate::opacity::OpacityLevels;

const MAX_OPACITY: u8 = 100;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub opacity: Opacity,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Opacity {
    #[serde(default = "default_levels")]
    pub levels: Vec<u8>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigError {
    pub message: String,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for ConfigError {}

pub fn load(path: &Path) -> Result<Config, ConfigError> {
    let text = fs::read_to_string(path).map_err(|err| ConfigError {
        message: format!("failed to read config {}: {}", path.display(), err),
    })?;
    toml::from_str(&text).map_err(|err| ConfigError {
        message: format!("failed to parse config {}: {}", path.display(), err),
    })
}

pub fn load_levels(path: &Path) -> Result<OpacityLevels, ConfigError> {
    let config = load(path)?;
    resolve_levels(&config).map_err(|err| ConfigError {
        message: format!("invalid config {}: {}", path.display(), err.message),
    })
}

/// Every level must be at most 100 and appear exactly once.
pub fn resolve_levels(config: &Config) -> Result<OpacityLevels, ConfigError> {
    let levels = &config.opacity.levels;
    if levels.is_empty() {
        return Err(ConfigError {
            message: "opacity levels must not be empty".to_string(),
        });
    }

    let mut seen = BTreeSet::new();
    for &level in levels {
        if level > MAX_OPACITY {
            return Err(ConfigError {
                message: format!("opacity level {} is above {}", level, MAX_OPACITY),
            });
        }
        if !seen.insert(level) {
            return Err(ConfigError {
                message: format!("opacity level {} is listed more than once", level),
            });
        }
    }

    Ok(OpacityLevels::new(levels.clone()))
}

fn default_levels() -> Vec<u8> {
    OpacityLevels::default().to_vec()
}

impl Default for Opacity {
    fn default() -> Self {
        Self {
            levels: default_levels(),
        }
    }
}
