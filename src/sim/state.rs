//! Game state and core simulation types
//!
//! All mutable session state lives in [`GameState`]; the frame driver owns one
//! and passes it by reference to [`super::advance_frame`].

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::collision::Aabb;
use super::speed::{Speed, SpeedError};
use crate::config::GameConfig;

/// Lifecycle phase of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Constructed, not started yet
    Ready,
    /// Frames advance and input is accepted
    Running,
    /// Collision happened; only reset leaves this phase
    GameOver,
}

/// Something that happened during a frame, drained by the driver
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    ObstacleSpawned { id: u32, x: f32 },
    ObstacleCleared { id: u32 },
    Collision { id: u32 },
}

/// The player's vehicle
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Vehicle {
    /// Top-left corner
    pub pos: Vec2,
    pub size: Vec2,
}

impl Vehicle {
    /// Vehicle sized for `speed`, centered horizontally
    ///
    /// The row is taken from the base (speed 1) height and stays put for the
    /// whole session; only the size and `x` follow later speed changes.
    pub fn sized_for(config: &GameConfig, speed: Speed) -> Self {
        let row = config.playfield.height - config.vehicle.base_height - config.vehicle.margin;
        let mut vehicle = Self {
            pos: Vec2::new(0.0, row),
            size: Vec2::ZERO,
        };
        vehicle.resize(config, speed);
        vehicle.pos.x = vehicle.max_x(config.playfield.width) / 2.0;
        vehicle
    }

    pub fn aabb(&self) -> Aabb {
        Aabb {
            pos: self.pos,
            size: self.size,
        }
    }

    /// Rightmost legal x for the current width
    pub fn max_x(&self, field_width: f32) -> f32 {
        (field_width - self.size.x).max(0.0)
    }

    /// Apply the speed size policy and re-clamp x; `y` is left alone
    pub fn resize(&mut self, config: &GameConfig, speed: Speed) {
        self.size = speed.vehicle_size(config.vehicle.base_size());
        self.pos.x = self.pos.x.clamp(0.0, self.max_x(config.playfield.width));
    }

    /// Move horizontally by `dx`, clamped to the playfield
    pub fn shift(&mut self, dx: f32, field_width: f32) {
        self.pos.x = (self.pos.x + dx).clamp(0.0, self.max_x(field_width));
    }
}

/// A falling obstacle; size is shared via [`crate::config::ObstacleConfig`]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    pub id: u32,
    /// Top-left corner
    pub pos: Vec2,
}

impl Obstacle {
    pub fn aabb(&self, size: Vec2) -> Aabb {
        Aabb {
            pos: self.pos,
            size,
        }
    }
}

/// Complete session state
#[derive(Debug, Clone)]
pub struct GameState {
    pub config: GameConfig,
    /// Seed the spawn RNG was created from
    pub seed: u64,
    rng: Pcg32,
    pub phase: GamePhase,
    /// Frames survived this session
    pub frame_count: u64,
    /// Score in tenths of a point, kept integral so it accumulates exactly
    pub score_tenths: u64,
    pub speed: Speed,
    pub vehicle: Vehicle,
    pub obstacles: Vec<Obstacle>,
    /// Events since the driver last drained them
    pub events: Vec<GameEvent>,
    next_id: u32,
}

impl GameState {
    /// Create a session in the `Ready` phase
    pub fn new(config: GameConfig, seed: u64) -> Self {
        let speed = config.initial_speed;
        let vehicle = Vehicle::sized_for(&config, speed);
        Self {
            config,
            seed,
            rng: Pcg32::seed_from_u64(seed),
            phase: GamePhase::Ready,
            frame_count: 0,
            score_tenths: 0,
            speed,
            vehicle,
            obstacles: Vec::new(),
            events: Vec::new(),
            next_id: 1,
        }
    }

    pub fn is_running(&self) -> bool {
        self.phase == GamePhase::Running
    }

    /// Fractional score; the display truncates
    pub fn score(&self) -> f64 {
        self.score_tenths as f64 / 10.0
    }

    /// Begin a fresh session with the current speed setting
    pub fn start(&mut self) {
        self.frame_count = 0;
        self.score_tenths = 0;
        self.obstacles.clear();
        self.events.clear();
        self.next_id = 1;
        self.vehicle = Vehicle::sized_for(&self.config, self.speed);
        self.phase = GamePhase::Running;
        log::info!("Session started (speed {}, seed {})", self.speed, self.seed);
    }

    /// Same as [`Self::start`]; valid from any phase
    pub fn reset(&mut self) {
        log::info!(
            "Resetting session from {:?} (score {:.1}, frame {})",
            self.phase,
            self.score(),
            self.frame_count
        );
        self.start();
    }

    /// Validate a raw speed value and apply it
    pub fn set_speed(&mut self, value: i64) -> Result<(), SpeedError> {
        let speed = Speed::new(value)?;
        self.apply_speed(speed);
        Ok(())
    }

    /// Change speed and resize the vehicle; score, phase and obstacles are untouched
    pub fn apply_speed(&mut self, speed: Speed) {
        self.speed = speed;
        self.vehicle.resize(&self.config, speed);
        log::debug!("Speed set to {} (vehicle {:?})", speed, self.vehicle.size);
    }

    pub fn move_left(&mut self) {
        if self.is_running() {
            self.vehicle
                .shift(-self.config.vehicle.step, self.config.playfield.width);
        }
    }

    pub fn move_right(&mut self) {
        if self.is_running() {
            self.vehicle
                .shift(self.config.vehicle.step, self.config.playfield.width);
        }
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Spawn one obstacle above the top edge at a uniformly random x
    pub fn spawn_obstacle(&mut self) {
        let span = self.config.playfield.width - self.config.obstacles.width;
        let x = self.rng.random::<f32>() * span;
        let id = self.next_entity_id();
        self.obstacles.push(Obstacle {
            id,
            pos: Vec2::new(x, -self.config.obstacles.height),
        });
        self.events.push(GameEvent::ObstacleSpawned { id, x });
        log::debug!("Obstacle {} spawned at x={:.1}", id, x);
    }

    /// Take the events recorded since the last call
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}
