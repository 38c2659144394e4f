//! Per-frame simulation step
//!
//! Advances the session by exactly one frame. Timing is frame-count based, so
//! the caller may invoke this at any refresh rate.

use super::collision::first_hit;
use super::state::{GameEvent, GamePhase, GameState};

/// Advance a running session by one frame and return the resulting phase
///
/// Order: spawn, fall, cull, score, collide. A collision ends the session
/// before the frame counter moves. Calling this outside `Running` is a caller
/// bug; the state is left untouched.
pub fn advance_frame(state: &mut GameState) -> GamePhase {
    if !state.is_running() {
        log::warn!("advance_frame called in {:?}; ignoring", state.phase);
        return state.phase;
    }

    spawn_obstacles(state);
    move_obstacles(state);
    state.score_tenths += state.speed.score_tenths_per_frame();

    let vehicle = state.vehicle.aabb();
    let obstacle_size = state.config.obstacles.size();
    if let Some(hit) = first_hit(&vehicle, &state.obstacles, obstacle_size) {
        let id = hit.id;
        state.phase = GamePhase::GameOver;
        state.events.push(GameEvent::Collision { id });
        log::info!(
            "Game over: obstacle {} hit at frame {} (score {:.1})",
            id,
            state.frame_count,
            state.score()
        );
        return GamePhase::GameOver;
    }

    state.frame_count += 1;
    GamePhase::Running
}

/// Spawn when the frame counter lands on the spawn cadence
fn spawn_obstacles(state: &mut GameState) {
    if state
        .frame_count
        .is_multiple_of(state.config.obstacles.frequency)
    {
        state.spawn_obstacle();
    }
}

/// Drop every obstacle by the current speed and cull those below the floor
fn move_obstacles(state: &mut GameState) {
    let fall = state.speed.as_f32();
    let floor = state.config.playfield.height;
    for obstacle in &mut state.obstacles {
        obstacle.pos.y += fall;
    }

    let events = &mut state.events;
    state.obstacles.retain(|obstacle| {
        let keep = obstacle.pos.y <= floor;
        if !keep {
            events.push(GameEvent::ObstacleCleared { id: obstacle.id });
            log::debug!("Obstacle {} cleared", obstacle.id);
        }
        keep
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use crate::sim::state::Obstacle;
    use glam::Vec2;
    use proptest::prelude::*;

    fn running_state(speed: i64, seed: u64) -> GameState {
        let mut state = GameState::new(GameConfig::default(), seed);
        state.set_speed(speed).unwrap();
        state.start();
        state
    }

    fn place_obstacle(state: &mut GameState, x: f32, y: f32) {
        let id = state.next_entity_id();
        state.obstacles.push(Obstacle {
            id,
            pos: Vec2::new(x, y),
        });
    }

    #[test]
    fn test_first_frame_spawns() {
        let mut state = running_state(2, 1);
        assert_eq!(advance_frame(&mut state), GamePhase::Running);
        assert_eq!(state.obstacles.len(), 1);
        assert_eq!(state.frame_count, 1);
        // Spawned at -80 then fell by 2 in the same frame
        assert_eq!(state.obstacles[0].pos.y, -78.0);
    }

    #[test]
    fn test_spawn_cadence_end_to_end() {
        let mut state = running_state(2, 99);

        advance_frame(&mut state);
        assert_eq!(state.obstacles.len(), 1);

        for _ in 1..100 {
            assert_eq!(advance_frame(&mut state), GamePhase::Running);
            assert_eq!(state.obstacles.len(), 1);
        }
        assert_eq!(state.frame_count, 100);

        assert_eq!(advance_frame(&mut state), GamePhase::Running);
        assert_eq!(state.obstacles.len(), 2);
    }

    #[test]
    fn test_obstacles_culled_below_floor() {
        let mut state = running_state(3, 1);
        // Skip the spawn frame
        state.frame_count = 1;
        // Keep the vehicle out of the left lane
        place_obstacle(&mut state, 0.0, 399.0);
        place_obstacle(&mut state, 0.0, 398.0);
        place_obstacle(&mut state, 0.0, 397.0);
        place_obstacle(&mut state, 0.0, 10.0);
        state.vehicle.pos.x = 200.0;

        advance_frame(&mut state);

        let ys: Vec<f32> = state.obstacles.iter().map(|o| o.pos.y).collect();
        // 399 and 398 fall through, 397 lands exactly on the floor and stays
        assert_eq!(ys, vec![400.0, 13.0]);
        let cleared: Vec<GameEvent> = state
            .drain_events()
            .into_iter()
            .filter(|e| matches!(e, GameEvent::ObstacleCleared { .. }))
            .collect();
        assert_eq!(cleared.len(), 2);
    }

    #[test]
    fn test_adjacent_removals_not_skipped() {
        let mut state = running_state(1, 1);
        state.frame_count = 1;
        state.vehicle.pos.x = 250.0;
        for _ in 0..4 {
            place_obstacle(&mut state, 0.0, 400.0);
        }
        advance_frame(&mut state);
        assert!(state.obstacles.is_empty());
    }

    #[test]
    fn test_score_accumulates_by_speed() {
        let mut state = running_state(5, 3);
        for _ in 0..10 {
            advance_frame(&mut state);
        }
        assert_eq!(state.score(), 5.0);
    }

    #[test]
    fn test_collision_ends_session() {
        let mut state = running_state(1, 1);
        state.frame_count = 1;
        let vehicle = state.vehicle;
        // Directly above the vehicle, one step from touching
        place_obstacle(&mut state, vehicle.pos.x, vehicle.pos.y - 80.0);

        assert_eq!(advance_frame(&mut state), GamePhase::GameOver);
        assert_eq!(state.phase, GamePhase::GameOver);
        assert!(!state.is_running());
        // Frame counter does not advance on the fatal frame
        assert_eq!(state.frame_count, 1);
        // Score still counts the fatal frame
        assert_eq!(state.score_tenths, 1);
        assert!(state
            .events
            .iter()
            .any(|e| matches!(e, GameEvent::Collision { .. })));
    }

    #[test]
    fn test_advance_ignored_after_game_over() {
        let mut state = running_state(2, 1);
        state.phase = GamePhase::GameOver;
        state.score_tenths = 40;
        assert_eq!(advance_frame(&mut state), GamePhase::GameOver);
        assert_eq!(state.score_tenths, 40);
        assert!(state.obstacles.is_empty());

        let mut ready = GameState::new(GameConfig::default(), 1);
        assert_eq!(advance_frame(&mut ready), GamePhase::Ready);
        assert_eq!(ready.frame_count, 0);
    }

    #[test]
    fn test_seeded_sessions_match() {
        let mut a = running_state(4, 2024);
        let mut b = running_state(4, 2024);
        for _ in 0..250 {
            let phase_a = advance_frame(&mut a);
            let phase_b = advance_frame(&mut b);
            assert_eq!(phase_a, phase_b);
            if phase_a != GamePhase::Running {
                break;
            }
        }
        assert_eq!(a.obstacles, b.obstacles);
        assert_eq!(a.frame_count, b.frame_count);
    }

    proptest! {
        #[test]
        fn prop_obstacles_stay_above_floor(seed in any::<u64>(), speed in 1i64..=10, frames in 1usize..600) {
            let mut state = running_state(speed, seed);
            for _ in 0..frames {
                state.events.clear();
                let before = state.frame_count;
                let count_before = state.obstacles.len();
                let phase = advance_frame(&mut state);
                prop_assert!(state.obstacles.iter().all(|o| o.pos.y <= 400.0));

                let spawned = state.events.iter().filter(|e| matches!(e, GameEvent::ObstacleSpawned { .. })).count();
                let cleared = state.events.iter().filter(|e| matches!(e, GameEvent::ObstacleCleared { .. })).count();
                prop_assert_eq!(spawned, usize::from(before % 100 == 0));
                prop_assert_eq!(state.obstacles.len() + cleared, count_before + spawned);

                if phase != GamePhase::Running {
                    break;
                }
            }
        }

        #[test]
        fn prop_score_strictly_increases(seed in any::<u64>(), speed in 1i64..=10, frames in 1usize..300) {
            let mut state = running_state(speed, seed);
            for _ in 0..frames {
                let before = state.score();
                let phase = advance_frame(&mut state);
                prop_assert!(state.score() > before);
                if phase != GamePhase::Running {
                    break;
                }
            }
        }
    }
}
