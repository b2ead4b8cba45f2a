use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const APP_DIR_NAME: &str = "kanban-board";
pub const DEFAULT_ACTIVATION_DISTANCE: f64 = 3.0;
pub const DEFAULT_FALLBACK_COLUMN: &str = "todo";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Directory holding the persisted collections.
    #[serde(default)]
    pub data_dir: Option<PathBuf>,

    /// Pointer travel required before a press turns into a drag.
    #[serde(default)]
    pub activation_distance: Option<f64>,

    /// Column new tasks land in when none is given.
    #[serde(default)]
    pub default_column: Option<String>,
}

impl AppConfig {
    pub fn config_path() -> Option<PathBuf> {
        #[cfg(target_os = "macos")]
        {
            dirs::home_dir().map(|home| home.join(".config").join(APP_DIR_NAME).join("config.toml"))
        }
        #[cfg(not(target_os = "macos"))]
        {
            dirs::config_dir().map(|config| config.join(APP_DIR_NAME).join("config.toml"))
        }
    }

    pub fn load() -> Self {
        match Self::config_path() {
            Some(path) => Self::load_from(&path),
            None => Self::default(),
        }
    }

    /// Reads a config file, falling back to defaults when it is missing or malformed.
    pub fn load_from(path: &Path) -> Self {
        if !path.exists() {
            return Self::default();
        }
        match std::fs::read_to_string(path) {
            Ok(content) => match toml::from_str(&content) {
                Ok(config) => config,
                Err(e) => {
                    tracing::warn!("Ignoring malformed config {}: {}", path.display(), e);
                    Self::default()
                }
            },
            Err(e) => {
                tracing::warn!("Could not read config {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    pub fn effective_data_dir(&self) -> PathBuf {
        if let Some(dir) = &self.data_dir {
            return dir.clone();
        }
        dirs::data_dir()
            .map(|data| data.join(APP_DIR_NAME))
            .unwrap_or_else(|| PathBuf::from(".").join(APP_DIR_NAME))
    }

    pub fn effective_activation_distance(&self) -> f64 {
        match self.activation_distance {
            Some(distance) if distance.is_finite() && distance >= 0.0 => distance,
            _ => DEFAULT_ACTIVATION_DISTANCE,
        }
    }

    pub fn effective_default_column(&self) -> &str {
        self.default_column
            .as_deref()
            .filter(|c| !c.trim().is_empty())
            .unwrap_or(DEFAULT_FALLBACK_COLUMN)
    }
}
