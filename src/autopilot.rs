//! Demo autopilot
//!
//! Steers the vehicle out from under the lowest obstacle in its lane. Used by
//! the headless binary; it only ever issues the same commands a player could.

use crate::game::Command;
use crate::sim::GameState;

/// Pick the next move, or `None` to hold position
pub fn autopilot(state: &GameState) -> Option<Command> {
    if !state.is_running() {
        return None;
    }

    let vehicle = state.vehicle.aabb();
    let obstacle_size = state.config.obstacles.size();
    let pad = state.config.vehicle.step;
    let max_x = state.vehicle.max_x(state.config.playfield.width);

    // Lowest obstacle that is still above the vehicle's floor and in its lane
    let threat = state
        .obstacles
        .iter()
        .map(|o| o.aabb(obstacle_size))
        .filter(|o| o.pos.y < vehicle.bottom())
        .filter(|o| o.pos.x < vehicle.right() + pad && o.right() > vehicle.pos.x - pad)
        .max_by(|a, b| a.pos.y.total_cmp(&b.pos.y))?;

    let left_target = threat.pos.x - vehicle.size.x - pad;
    let right_target = threat.right() + pad;
    let left_ok = left_target >= 0.0;
    let right_ok = right_target <= max_x;

    match (left_ok, right_ok) {
        (true, true) => {
            if vehicle.pos.x - left_target <= right_target - vehicle.pos.x {
                Some(Command::MoveLeft)
            } else {
                Some(Command::MoveRight)
            }
        }
        (true, false) => Some(Command::MoveLeft),
        (false, true) => Some(Command::MoveRight),
        (false, false) => None,
    }
}
