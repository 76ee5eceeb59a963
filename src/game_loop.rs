use std::time::Duration;

use log::info;

use crate::config::Settings;
use crate::error::GameError;
use crate::game::{GameState, GameStatus};
use crate::input::{AxisSample, GameInput};
use crate::snake::{MoveOutcome, Position};

/// Presentation-side collaborators notified by the loop.
///
/// Every hook defaults to a no-op so a front end only implements what it draws.
pub trait Presentation {
    /// A fresh round was built; rebuild the scene from `state`.
    fn on_reset(&mut self, _state: &GameState) {}

    /// The score changed.
    fn on_score(&mut self, _score: u32) {}

    /// The item moved to `position`.
    fn on_item(&mut self, _position: Position) {}

    /// The snake crashed. `force` scales the cosmetic destruction effect.
    fn on_collision(&mut self, _state: &GameState, _force: f32) {}

}

impl Presentation for () {}

/// Fixed-interval scheduler around one `GameState`.
///
/// The caller reports elapsed time through `update`; movement ticks fire every
/// `movement_interval` while running, and a collision holds the board for
/// `reset_delay` before a new round starts.
#[derive(Debug, Clone)]
pub struct GameLoop {
    state: GameState,
    movement_interval: Duration,
    reset_delay: Duration,
    collision_force: f32,
    since_tick: Duration,
    since_collision: Duration,
}

impl GameLoop {
    #[must_use]
    pub fn new(state: GameState, settings: &Settings) -> Self {
        Self {
            state,
            movement_interval: settings.movement_interval,
            reset_delay: settings.reset_delay,
            collision_force: settings.collision_force,
            since_tick: Duration::ZERO,
            since_collision: Duration::ZERO,
        }
    }

    #[must_use]
    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    /// Input step: only updates the direction the next tick will use.
    pub fn sample_input(&mut self, sample: AxisSample) {
        if self.state.status == GameStatus::Running {
            self.state.apply_axis(sample);
        }
    }

    /// Routes one front-end input according to the current status.
    ///
    /// Axes steer a running round. From `BoardFull` every input except `Quit`
    /// starts a new round. Input during game over is dropped; the reset is
    /// timed. `Quit` is left to the caller.
    pub fn handle_input<P: Presentation + ?Sized>(
        &mut self,
        input: GameInput,
        presentation: &mut P,
    ) -> Result<(), GameError> {
        match (self.state.status, input) {
            (_, GameInput::Quit) => Ok(()),
            (GameStatus::Running, GameInput::Axis(sample)) => {
                self.sample_input(sample);
                Ok(())
            }
            (GameStatus::BoardFull, _) => self.restart(presentation),
            _ => Ok(()),
        }
    }

    /// Advances the scheduler clock by `elapsed` and runs whatever is due.
    pub fn update<P: Presentation + ?Sized>(
        &mut self,
        elapsed: Duration,
        presentation: &mut P,
    ) -> Result<(), GameError> {
        match self.state.status {
            GameStatus::Running => {
                self.since_tick += elapsed;
                while self.state.status == GameStatus::Running
                    && self.since_tick >= self.movement_interval
                {
                    self.since_tick -= self.movement_interval;
                    self.run_tick(presentation);
                }
                Ok(())
            }
            GameStatus::GameOver => {
                self.since_collision += elapsed;
                if self.since_collision >= self.reset_delay {
                    self.state.status = GameStatus::Resetting;
                    return self.restart(presentation);
                }
                Ok(())
            }
            GameStatus::Resetting => self.restart(presentation),
            GameStatus::BoardFull => Ok(()),
        }
    }

    /// Starts a new round immediately.
    pub fn restart<P: Presentation + ?Sized>(
        &mut self,
        presentation: &mut P,
    ) -> Result<(), GameError> {
        self.state.reset()?;
        self.since_tick = Duration::ZERO;
        self.since_collision = Duration::ZERO;
        presentation.on_reset(&self.state);
        presentation.on_score(self.state.score);
        if let Some(position) = self.state.item_position() {
            presentation.on_item(position);
        }
        Ok(())
    }

    /// Time left before the automatic reset, while in game over.
    #[must_use]
    pub fn remaining_reset_delay(&self) -> Option<Duration> {
        (self.state.status == GameStatus::GameOver)
            .then(|| self.reset_delay.saturating_sub(self.since_collision))
    }

    fn run_tick<P: Presentation + ?Sized>(&mut self, presentation: &mut P) {
        let Some(outcome) = self.state.tick() else {
            return;
        };

        match outcome {
            MoveOutcome::Moved => {}
            MoveOutcome::Grew => {
                presentation.on_score(self.state.score);
                if let Some(position) = self.state.item_position() {
                    presentation.on_item(position);
                }
            }
            MoveOutcome::Collided => {
                info!(
                    "round over after {} ticks, resetting in {:?}",
                    self.state.tick_count, self.reset_delay
                );
                self.since_tick = Duration::ZERO;
                self.since_collision = Duration::ZERO;
                presentation.on_collision(&self.state, self.collision_force);
            }
        }
    }
}
