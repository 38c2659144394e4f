//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Frame-count timing only
//! - Seeded RNG only
//! - No rendering or platform dependencies

pub mod collision;
pub mod speed;
pub mod state;
pub mod tick;

pub use collision::{Aabb, first_hit};
pub use speed::{Speed, SpeedError};
pub use state::{GameEvent, GamePhase, GameState, Obstacle, Vehicle};
pub use tick::advance_frame;
