//! Game configuration
//!
//! Every field defaults to the values in [`crate::consts`], so a JSON file
//! only has to name what it overrides.

use std::fs;
use std::path::{Path, PathBuf};

use glam::Vec2;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;
use crate::sim::Speed;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid config: {field} {reason}")]
    Invalid { field: &'static str, reason: String },
}

/// Playfield dimensions
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayfieldConfig {
    pub width: f32,
    pub height: f32,
}

impl Default for PlayfieldConfig {
    fn default() -> Self {
        Self {
            width: FIELD_WIDTH,
            height: FIELD_HEIGHT,
        }
    }
}

/// Vehicle geometry and movement
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VehicleConfig {
    /// Width at speed 1
    pub base_width: f32,
    /// Height at speed 1
    pub base_height: f32,
    /// Gap below the vehicle
    pub margin: f32,
    /// Distance per move command
    pub step: f32,
}

impl Default for VehicleConfig {
    fn default() -> Self {
        Self {
            base_width: VEHICLE_BASE_WIDTH,
            base_height: VEHICLE_BASE_HEIGHT,
            margin: VEHICLE_MARGIN,
            step: VEHICLE_STEP,
        }
    }
}

impl VehicleConfig {
    pub fn base_size(&self) -> Vec2 {
        Vec2::new(self.base_width, self.base_height)
    }
}

/// Obstacle geometry and spawn cadence
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ObstacleConfig {
    pub width: f32,
    pub height: f32,
    /// Spawn one obstacle every `frequency` frames
    pub frequency: u64,
}

impl Default for ObstacleConfig {
    fn default() -> Self {
        Self {
            width: OBSTACLE_WIDTH,
            height: OBSTACLE_HEIGHT,
            frequency: OBSTACLE_FREQUENCY,
        }
    }
}

impl ObstacleConfig {
    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }
}

/// Full game configuration
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub playfield: PlayfieldConfig,
    pub vehicle: VehicleConfig,
    pub obstacles: ObstacleConfig,
    /// Speed applied when the game first starts
    pub initial_speed: Speed,
    /// Fixed RNG seed; `None` picks one at startup
    pub seed: Option<u64>,
}

impl GameConfig {
    /// Parse and validate a JSON config
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: GameConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a JSON config file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_json_str(&json)?;
        log::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    pub fn to_json_pretty(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Reject geometry the frame loop cannot run with
    pub fn validate(&self) -> Result<(), ConfigError> {
        let field = &self.playfield;
        positive("playfield.width", field.width)?;
        positive("playfield.height", field.height)?;

        let vehicle = &self.vehicle;
        positive("vehicle.base_width", vehicle.base_width)?;
        positive("vehicle.base_height", vehicle.base_height)?;
        positive("vehicle.step", vehicle.step)?;
        if !vehicle.margin.is_finite() || vehicle.margin < 0.0 {
            return Err(invalid("vehicle.margin", "must be zero or positive"));
        }
        if vehicle.base_width > field.width {
            return Err(invalid("vehicle.base_width", "exceeds playfield width"));
        }
        if vehicle.base_height + vehicle.margin > field.height {
            return Err(invalid(
                "vehicle.base_height",
                "plus margin exceeds playfield height",
            ));
        }

        let obstacles = &self.obstacles;
        positive("obstacles.width", obstacles.width)?;
        positive("obstacles.height", obstacles.height)?;
        if obstacles.width >= field.width {
            return Err(invalid(
                "obstacles.width",
                "must be narrower than the playfield",
            ));
        }
        if obstacles.frequency == 0 {
            return Err(invalid("obstacles.frequency", "must be at least 1"));
        }

        Ok(())
    }
}

fn positive(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(invalid(field, &format!("must be positive, got {value}")))
    }
}

fn invalid(field: &'static str, reason: &str) -> ConfigError {
    ConfigError::Invalid {
        field,
        reason: reason.to_string(),
    }
}
