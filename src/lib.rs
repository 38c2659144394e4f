//! Lane Dodge - a falling-obstacle reflex game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (spawning, motion, collisions, session state)
//! - `game`: Frame driver sequencing queued input and collaborator calls
//! - `platform`: Surface/score collaborators (headless and browser)
//! - `config`: Data-driven playfield and entity parameters
//! - `autopilot`: Lane-dodging demo player for headless runs

pub mod autopilot;
pub mod config;
pub mod game;
pub mod platform;
pub mod sim;

pub use config::{ConfigError, GameConfig};
pub use game::{Command, Game, LoopControl};

/// Game configuration constants (defaults for [`GameConfig`])
pub mod consts {
    /// Playfield dimensions
    pub const FIELD_WIDTH: f32 = 300.0;
    pub const FIELD_HEIGHT: f32 = 400.0;

    /// Vehicle size at speed 1; shrinks inversely with speed
    pub const VEHICLE_BASE_WIDTH: f32 = 40.0;
    pub const VEHICLE_BASE_HEIGHT: f32 = 80.0;
    /// Gap between the vehicle's bottom edge and the playfield floor
    pub const VEHICLE_MARGIN: f32 = 10.0;
    /// Horizontal distance per move command
    pub const VEHICLE_STEP: f32 = 5.0;

    /// Obstacle defaults
    pub const OBSTACLE_WIDTH: f32 = 40.0;
    pub const OBSTACLE_HEIGHT: f32 = 80.0;
    /// Frames between spawns
    pub const OBSTACLE_FREQUENCY: u64 = 100;

    /// Speed control range (inclusive)
    pub const SPEED_MIN: u8 = 1;
    pub const SPEED_MAX: u8 = 10;
    pub const DEFAULT_SPEED: u8 = 2;
}

/// Text shown in the score display for a (possibly fractional) score
#[inline]
pub fn score_text(score: f64) -> String {
    format!("Score: {}", score.max(0.0).floor() as u64)
}
