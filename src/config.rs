// Game settings read from `config.json`

use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Config file looked up in the working directory
pub const CONFIG_FILE: &str = "config.json";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Window, level and asset settings. Every field is optional in the file.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub title: String,
    /// Logical level width shown in the window
    pub width: u32,
    /// Logical level height shown in the window
    pub height: u32,
    /// Level file name without the `.json` extension
    pub level: String,
    pub levels_dir: PathBuf,
    pub assets_dir: PathBuf,
    /// Show collider outlines from the start
    pub debug_overlay: bool,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            title: "Rusted Platformer".to_string(),
            width: 1920,
            height: 1080,
            level: "level_1".to_string(),
            levels_dir: PathBuf::from("levels"),
            assets_dir: PathBuf::from("assets"),
            debug_overlay: false,
        }
    }
}

impl GameConfig {
    pub fn from_json(path: &Path, json: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(json).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Read `path`, falling back to defaults when the file does not exist
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = match std::fs::read_to_string(path) {
            Ok(json) => json,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                log::info!("No {} found, using default settings", path.display());
                return Ok(Self::default());
            }
            Err(source) => {
                return Err(ConfigError::Io {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };

        let config = Self::from_json(path, &json)?;
        log::info!("Loaded settings from {}", path.display());
        Ok(config)
    }
}
