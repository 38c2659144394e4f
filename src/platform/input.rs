//! Raw input translation
//!
//! Maps browser-style key names and range-control values to [`Command`]s.
//! Anything unrecognized is dropped here so the engine only sees valid input.

use crate::game::Command;
use crate::sim::Speed;

/// Command for a key name (`KeyboardEvent.key` values)
pub fn command_for_key(key: &str) -> Option<Command> {
    match key {
        "ArrowLeft" => Some(Command::MoveLeft),
        "ArrowRight" => Some(Command::MoveRight),
        _ => None,
    }
}

/// Command for the raw value of the speed control
pub fn command_for_speed(raw: &str) -> Option<Command> {
    match Speed::parse(raw) {
        Ok(speed) => Some(Command::SetSpeed(speed)),
        Err(e) => {
            log::warn!("Ignoring speed input: {}", e);
            None
        }
    }
}
