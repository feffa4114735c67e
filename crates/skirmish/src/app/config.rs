use std::path::{Path, PathBuf};

use battlefield::world::{MapDimensions, MapError, DEFAULT_STARTING_CREDITS};
use battlefield::{BattlefieldConfig, ConfigError};
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub(crate) const CONFIG_ENV_VAR: &str = "SKIRMISH_CONFIG";

#[derive(Debug, Error)]
pub(crate) enum ConfigLoadError {
    #[error("read config {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("parse config json at {field}: {source}")]
    Parse {
        field: String,
        source: serde_json::Error,
    },
    #[error(transparent)]
    Battlefield(#[from] ConfigError),
    #[error(transparent)]
    Map(#[from] MapError),
    #[error("frame delta must be finite and positive, got {0}")]
    InvalidFrameDelta(f32),
}

/// Headless skirmish run: battlefield widget settings plus the match setup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub(crate) struct SkirmishConfig {
    pub(crate) battlefield: BattlefieldConfig,
    pub(crate) map_width_cells: u32,
    pub(crate) map_height_cells: u32,
    pub(crate) starting_credits: i32,
    pub(crate) frames: u32,
    pub(crate) frame_dt_seconds: f32,
}

impl Default for SkirmishConfig {
    fn default() -> Self {
        Self {
            battlefield: BattlefieldConfig::default(),
            map_width_cells: 64,
            map_height_cells: 64,
            starting_credits: DEFAULT_STARTING_CREDITS,
            frames: 240,
            frame_dt_seconds: 1.0 / 60.0,
        }
    }
}

impl SkirmishConfig {
    /// Reads the file named by `SKIRMISH_CONFIG`, falling back to defaults when unset.
    pub(crate) fn from_env() -> Result<Self, ConfigLoadError> {
        match std::env::var_os(CONFIG_ENV_VAR) {
            Some(path) => Self::load(Path::new(&path)),
            None => {
                let config = Self::default();
                config.validate()?;
                Ok(config)
            }
        }
    }

    pub(crate) fn load(path: &Path) -> Result<Self, ConfigLoadError> {
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigLoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::parse_json(&raw)?;
        config.validate()?;
        Ok(config)
    }

    fn parse_json(raw: &str) -> Result<Self, ConfigLoadError> {
        let mut deserializer = serde_json::Deserializer::from_str(raw);
        serde_path_to_error::deserialize(&mut deserializer).map_err(|error| {
            let field = error.path().to_string();
            ConfigLoadError::Parse {
                field,
                source: error.into_inner(),
            }
        })
    }

    pub(crate) fn validate(&self) -> Result<(), ConfigLoadError> {
        self.battlefield.validate()?;
        self.map_dimensions()?;
        if !self.frame_dt_seconds.is_finite() || self.frame_dt_seconds <= 0.0 {
            return Err(ConfigLoadError::InvalidFrameDelta(self.frame_dt_seconds));
        }
        Ok(())
    }

    pub(crate) fn map_dimensions(&self) -> Result<MapDimensions, MapError> {
        MapDimensions::new(self.map_width_cells, self.map_height_cells)
    }
}
