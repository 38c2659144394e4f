//! Frame driver
//!
//! [`Game`] sits between the platform and the simulation. Input arrives as
//! queued [`Command`]s and is applied at the top of the next frame, so input
//! never interleaves with a frame advance. The platform's frame clock calls
//! [`Game::frame`] and keeps requesting frames while it returns
//! [`LoopControl::Continue`].

use std::collections::VecDeque;

use glam::Vec2;

use crate::config::GameConfig;
use crate::platform::{Color, ScoreSink, Surface, TextAlign};
use crate::score_text;
use crate::sim::{GameEvent, GamePhase, GameState, Speed, advance_frame};

pub const GAME_OVER_TEXT: &str = "Game Over";
pub const GAME_OVER_FONT: &str = "30px Arial";

/// Player input, applied between frames
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    MoveLeft,
    MoveRight,
    SetSpeed(Speed),
    Reset,
}

/// Whether the frame clock should schedule another frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopControl {
    Continue,
    Halt,
}

pub struct Game {
    state: GameState,
    pending: VecDeque<Command>,
    loop_active: bool,
}

impl Game {
    pub fn new(config: GameConfig, seed: u64) -> Self {
        Self {
            state: GameState::new(config, seed),
            pending: VecDeque::new(),
            loop_active: false,
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Start the first session; the caller then requests the first frame
    pub fn start(&mut self) {
        self.state.start();
        self.loop_active = true;
    }

    pub fn is_loop_active(&self) -> bool {
        self.loop_active
    }

    /// Queue a command for the next frame
    ///
    /// Returns `true` when the loop is halted and this command needs a frame
    /// scheduled to take effect (a reset after game over).
    ///
    /// While halted the queue only holds what the next session needs: moves
    /// are dropped and repeated speed changes collapse to the latest one.
    pub fn push(&mut self, command: Command) -> bool {
        if !self.loop_active {
            match (command, self.pending.back_mut()) {
                (Command::MoveLeft | Command::MoveRight, _) => return false,
                (Command::SetSpeed(speed), Some(Command::SetSpeed(queued))) => {
                    *queued = speed;
                    return false;
                }
                _ => {}
            }
        }
        self.pending.push_back(command);
        let wake = !self.loop_active && command == Command::Reset;
        if wake {
            self.loop_active = true;
        }
        wake
    }

    /// Run one frame: apply queued input, advance, draw, report score
    pub fn frame<S: Surface, D: ScoreSink>(
        &mut self,
        surface: &mut S,
        score: &mut D,
    ) -> LoopControl {
        self.apply_pending();

        if !self.state.is_running() {
            self.loop_active = false;
            return LoopControl::Halt;
        }

        surface.clear();
        let phase = advance_frame(&mut self.state);
        self.log_events();

        surface.fill_rect(self.state.vehicle.aabb(), Color::Vehicle);
        let obstacle_size = self.state.config.obstacles.size();
        for obstacle in &self.state.obstacles {
            surface.fill_rect(obstacle.aabb(obstacle_size), Color::Obstacle);
        }
        score.set_text(&score_text(self.state.score()));

        if phase == GamePhase::GameOver {
            let field = &self.state.config.playfield;
            surface.fill_text(
                GAME_OVER_TEXT,
                Vec2::new(field.width / 2.0, field.height / 2.0),
                GAME_OVER_FONT,
                TextAlign::Center,
                Color::Caption,
            );
            self.loop_active = false;
            return LoopControl::Halt;
        }

        LoopControl::Continue
    }

    fn apply_pending(&mut self) {
        while let Some(command) = self.pending.pop_front() {
            match command {
                Command::MoveLeft => self.state.move_left(),
                Command::MoveRight => self.state.move_right(),
                Command::SetSpeed(speed) => self.state.apply_speed(speed),
                Command::Reset => self.state.reset(),
            }
        }
    }

    fn log_events(&mut self) {
        for event in self.state.drain_events() {
            if let GameEvent::Collision { id } = event {
                log::info!(
                    "Collision with obstacle {}; final score {}",
                    id,
                    self.state.score().floor()
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::headless::{RecordingSurface, ScoreLine};
    use crate::sim::Obstacle;

    fn started_game() -> Game {
        let mut game = Game::new(GameConfig::default(), 5);
        game.start();
        game
    }

    /// Put an obstacle right above the vehicle so the next frame collides
    fn doom(game: &mut Game) {
        let vehicle = game.state.vehicle;
        let id = game.state.next_entity_id();
        game.state.obstacles.push(Obstacle {
            id,
            pos: Vec2::new(vehicle.pos.x, vehicle.pos.y - 79.0),
        });
    }

    #[test]
    fn test_frame_draws_and_scores() {
        let mut game = started_game();
        let mut surface = RecordingSurface::new();
        let mut score = ScoreLine::default();

        assert_eq!(game.frame(&mut surface, &mut score), LoopControl::Continue);
        assert_eq!(surface.rects(Color::Vehicle).count(), 1);
        assert_eq!(surface.rects(Color::Obstacle).count(), 1);
        assert_eq!(score.text(), "Score: 0");

        for _ in 0..9 {
            game.frame(&mut surface, &mut score);
        }
        // Ten frames at speed 2
        assert_eq!(score.text(), "Score: 2");
        assert_eq!(surface.frames(), 10);
    }

    #[test]
    fn test_commands_apply_before_frame() {
        let mut game = started_game();
        let mut surface = RecordingSurface::new();
        let mut score = ScoreLine::default();
        let x = game.state().vehicle.pos.x;

        assert!(!game.push(Command::MoveLeft));
        assert!(!game.push(Command::MoveLeft));
        // Queued, not applied yet
        assert_eq!(game.state().vehicle.pos.x, x);

        game.frame(&mut surface, &mut score);
        assert_eq!(game.state().vehicle.pos.x, x - 10.0);
        let drawn = surface.rects(Color::Vehicle).next().copied();
        assert_eq!(drawn.map(|r| r.pos.x), Some(x - 10.0));
    }

    #[test]
    fn test_speed_command_resizes() {
        let mut game = started_game();
        let mut surface = RecordingSurface::new();
        let mut score = ScoreLine::default();

        game.push(Command::SetSpeed(Speed::MIN));
        game.frame(&mut surface, &mut score);
        assert_eq!(game.state().vehicle.size, Vec2::new(40.0, 80.0));
        assert_eq!(game.state().speed, Speed::MIN);
    }

    #[test]
    fn test_collision_halts_and_shows_caption() {
        let mut game = started_game();
        let mut surface = RecordingSurface::new();
        let mut score = ScoreLine::default();
        game.frame(&mut surface, &mut score);
        doom(&mut game);

        assert_eq!(game.frame(&mut surface, &mut score), LoopControl::Halt);
        assert_eq!(game.state().phase, GamePhase::GameOver);
        assert!(!game.is_loop_active());
        match surface.calls().last() {
            Some(crate::platform::headless::DrawCall::Text {
                text,
                pos,
                font,
                align,
                color,
            }) => {
                assert_eq!(text, GAME_OVER_TEXT);
                assert_eq!(*pos, Vec2::new(150.0, 200.0));
                assert_eq!(font, GAME_OVER_FONT);
                assert_eq!(*align, TextAlign::Center);
                assert_eq!(*color, Color::Caption);
            }
            other => panic!("expected caption, got {:?}", other),
        }

        // Moves after game over do nothing and the loop stays down
        let x = game.state().vehicle.pos.x;
        assert!(!game.push(Command::MoveRight));
        assert_eq!(game.frame(&mut surface, &mut score), LoopControl::Halt);
        assert_eq!(game.state().vehicle.pos.x, x);
    }

    #[test]
    fn test_reset_after_game_over_restarts_loop() {
        let mut game = started_game();
        let mut surface = RecordingSurface::new();
        let mut score = ScoreLine::default();
        game.frame(&mut surface, &mut score);
        doom(&mut game);
        game.frame(&mut surface, &mut score);
        assert_eq!(game.state().phase, GamePhase::GameOver);

        assert!(game.push(Command::Reset));
        assert_eq!(game.frame(&mut surface, &mut score), LoopControl::Continue);
        let state = game.state();
        assert_eq!(state.phase, GamePhase::Running);
        assert_eq!(state.frame_count, 1);
        assert_eq!(state.obstacles.len(), 1);
        assert_eq!(score.text(), "Score: 0");
    }

    #[test]
    fn test_input_while_halted_does_not_pile_up() {
        let mut game = started_game();
        let mut surface = RecordingSurface::new();
        let mut score = ScoreLine::default();
        game.frame(&mut surface, &mut score);
        doom(&mut game);
        game.frame(&mut surface, &mut score);
        assert!(!game.is_loop_active());

        // A held arrow key plus a dragged slider
        for _ in 0..1000 {
            assert!(!game.push(Command::MoveLeft));
            assert!(!game.push(Command::MoveRight));
        }
        for value in [3, 9, 4] {
            let speed = Speed::new(value).unwrap();
            assert!(!game.push(Command::SetSpeed(speed)));
        }
        assert_eq!(game.pending.len(), 1);
        assert_eq!(
            game.pending.front(),
            Some(&Command::SetSpeed(Speed::new(4).unwrap()))
        );

        // The collapsed speed change still takes effect with the reset
        assert!(game.push(Command::Reset));
        assert_eq!(game.frame(&mut surface, &mut score), LoopControl::Continue);
        let state = game.state();
        assert_eq!(state.speed.get(), 4);
        assert_eq!(state.vehicle.pos.x, (300.0 - state.vehicle.size.x) / 2.0);
        assert!(game.pending.is_empty());
    }

    #[test]
    fn test_reset_while_running_does_not_double_schedule() {
        let mut game = started_game();
        let mut surface = RecordingSurface::new();
        let mut score = ScoreLine::default();
        for _ in 0..30 {
            game.frame(&mut surface, &mut score);
        }
        assert!(!game.push(Command::Reset));
        game.frame(&mut surface, &mut score);
        assert_eq!(game.state().frame_count, 1);
    }

    #[test]
    fn test_frame_before_start_halts() {
        let mut game = Game::new(GameConfig::default(), 1);
        let mut surface = RecordingSurface::new();
        let mut score = ScoreLine::default();
        assert_eq!(game.frame(&mut surface, &mut score), LoopControl::Halt);
        assert_eq!(surface.frames(), 0);
        assert_eq!(score.updates(), 0);
    }
}
