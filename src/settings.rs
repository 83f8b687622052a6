//! Engine configuration
//!
//! Loaded from a JSON file; every field is optional and falls back to the
//! tuned defaults in `consts`.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid config: {0}")]
    Invalid(&'static str),
}

/// Engine settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Display density (px per dp)
    pub density: f32,
    /// Game speed per unit of density
    pub speed_modifier: f32,
    /// Time between two obstacles (ms)
    pub spawn_interval_ms: f32,
    /// Obstacles allocated up front
    pub pool_capacity: usize,
    /// Render thread frame budget (ms)
    pub frame_budget_ms: u64,
    /// Largest delta a single tick will integrate (ms)
    pub max_frame_delta_ms: f32,
    /// RNG seed; a random one is drawn when absent
    pub seed: Option<u64>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            density: 1.0,
            speed_modifier: SPEED_MODIFIER,
            spawn_interval_ms: SPAWN_INTERVAL_MS,
            pool_capacity: POOL_CAPACITY,
            frame_budget_ms: FRAME_BUDGET_MS,
            max_frame_delta_ms: MAX_FRAME_DELTA_MS,
            seed: None,
        }
    }
}

impl EngineConfig {
    /// Defaults for a display of the given density
    pub fn for_density(density: f32) -> Self {
        Self {
            density,
            ..Self::default()
        }
    }

    /// Game speed: on denser screens objects travel more pixels per ms
    pub fn game_speed(&self) -> f32 {
        self.density * self.speed_modifier
    }

    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_json(&json)?;
        log::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if !(self.density > 0.0) {
            return Err(ConfigError::Invalid("density must be positive"));
        }
        if !(self.speed_modifier > 0.0) {
            return Err(ConfigError::Invalid("speed_modifier must be positive"));
        }
        if !(self.spawn_interval_ms > 0.0) {
            return Err(ConfigError::Invalid("spawn_interval_ms must be positive"));
        }
        if !(self.max_frame_delta_ms > 0.0) {
            return Err(ConfigError::Invalid("max_frame_delta_ms must be positive"));
        }
        Ok(())
    }
}
