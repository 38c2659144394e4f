//! Player speed setting
//!
//! One integer drives both obstacle fall speed and vehicle size.

use std::fmt;

use glam::Vec2;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::{DEFAULT_SPEED, SPEED_MAX, SPEED_MIN};

/// Rejected speed input
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SpeedError {
    #[error("speed {value} outside {min}..={max}")]
    OutOfRange { value: i64, min: u8, max: u8 },
    #[error("malformed speed value {0:?}")]
    Malformed(String),
}

/// Validated speed setting in `SPEED_MIN..=SPEED_MAX`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "u8")]
pub struct Speed(u8);

impl Speed {
    pub const MIN: Speed = Speed(SPEED_MIN);
    pub const MAX: Speed = Speed(SPEED_MAX);

    pub fn new(value: i64) -> Result<Self, SpeedError> {
        if value < i64::from(SPEED_MIN) || value > i64::from(SPEED_MAX) {
            return Err(SpeedError::OutOfRange {
                value,
                min: SPEED_MIN,
                max: SPEED_MAX,
            });
        }
        Ok(Speed(value as u8))
    }

    /// Parse the raw value of a range control (e.g. `"7"`)
    pub fn parse(raw: &str) -> Result<Self, SpeedError> {
        let trimmed = raw.trim();
        let value = trimmed
            .parse::<i64>()
            .map_err(|_| SpeedError::Malformed(trimmed.to_string()))?;
        Self::new(value)
    }

    pub fn get(self) -> u8 {
        self.0
    }

    /// Obstacle fall distance per frame
    pub fn as_f32(self) -> f32 {
        f32::from(self.0)
    }

    /// Vehicle size for this speed: base size divided by the setting
    pub fn vehicle_size(self, base: Vec2) -> Vec2 {
        base / self.as_f32()
    }

    /// Score gained per frame, in tenths of a point
    pub fn score_tenths_per_frame(self) -> u64 {
        u64::from(self.0)
    }
}

impl Default for Speed {
    fn default() -> Self {
        Speed(DEFAULT_SPEED)
    }
}

impl TryFrom<i64> for Speed {
    type Error = SpeedError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Speed::new(value)
    }
}

impl From<Speed> for u8 {
    fn from(speed: Speed) -> Self {
        speed.0
    }
}

impl fmt::Display for Speed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
