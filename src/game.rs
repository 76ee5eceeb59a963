use log::{info, warn};
use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::config::GridSize;
use crate::error::GameError;
use crate::grid::{GridMap, SquareState};
use crate::input::{AxisSample, Direction};
use crate::item::ItemSpawner;
use crate::snake::{MoveOutcome, Position, SnakeBody};

/// Current high-level gameplay state.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum GameStatus {
    Running,
    /// Collision happened; waiting out the reset delay.
    GameOver,
    /// Transient: a fresh round is being built.
    Resetting,
    /// No free cell was left for the item. Terminal until restarted.
    BoardFull,
}

/// Complete mutable game state for one round.
#[derive(Debug, Clone)]
pub struct GameState {
    pub grid: GridMap,
    pub snake: SnakeBody,
    pub items: ItemSpawner,
    pub score: u32,
    pub tick_count: u64,
    pub status: GameStatus,
    pending_direction: Direction,
    rng: StdRng,
}

impl GameState {
    /// Creates a round seeded from system entropy.
    pub fn new(size: GridSize) -> Result<Self, GameError> {
        Self::with_rng(size, StdRng::from_entropy())
    }

    /// Creates a deterministic state for tests and reproducible runs.
    pub fn new_with_seed(size: GridSize, seed: u64) -> Result<Self, GameError> {
        Self::with_rng(size, StdRng::seed_from_u64(seed))
    }

    fn with_rng(size: GridSize, mut rng: StdRng) -> Result<Self, GameError> {
        let (grid, snake, items, status) = build_round(size, &mut rng)?;

        Ok(Self {
            grid,
            snake,
            items,
            score: 0,
            tick_count: 0,
            status,
            pending_direction: Direction::Right,
            rng,
        })
    }

    /// Throws the round away and starts over on a grid of the same size.
    ///
    /// The random stream carries on so consecutive rounds differ.
    pub fn reset(&mut self) -> Result<(), GameError> {
        let (grid, snake, items, status) = build_round(self.grid.size(), &mut self.rng)?;
        self.grid = grid;
        self.snake = snake;
        self.items = items;
        self.score = 0;
        self.tick_count = 0;
        self.status = status;
        self.pending_direction = Direction::Right;
        info!("new round on a {}x{} grid", self.bounds().width, self.bounds().height);
        Ok(())
    }

    /// Stores the direction the next tick will use.
    pub fn set_direction(&mut self, direction: Direction) {
        self.pending_direction = direction;
    }

    /// Feeds one input sample; samples that resolve to nothing are ignored.
    pub fn apply_axis(&mut self, sample: AxisSample) {
        if let Some(direction) = sample.to_direction() {
            self.pending_direction = direction;
        }
    }

    #[must_use]
    pub fn pending_direction(&self) -> Direction {
        self.pending_direction
    }

    /// Advances simulation by one movement tick.
    ///
    /// Returns `None` when the round is not running.
    pub fn tick(&mut self) -> Option<MoveOutcome> {
        if self.status != GameStatus::Running {
            return None;
        }

        self.tick_count += 1;
        let outcome = self.snake.advance(self.pending_direction, &mut self.grid);

        match outcome {
            MoveOutcome::Moved => {}
            MoveOutcome::Grew => {
                self.score += 1;
                match self.items.spawn_or_relocate(&mut self.grid, &mut self.rng) {
                    Ok(_) => {}
                    Err(GameError::BoardFull) => {
                        info!("board full at score {}", self.score);
                        self.status = GameStatus::BoardFull;
                    }
                    Err(error) => {
                        warn!("item respawn failed: {error}");
                        self.status = GameStatus::BoardFull;
                    }
                }
            }
            MoveOutcome::Collided => {
                let head = self.snake.head();
                info!(
                    "collision at ({}, {}) heading {:?}, score {}",
                    head.x, head.y, self.pending_direction, self.score
                );
                self.status = GameStatus::GameOver;
            }
        }

        Some(outcome)
    }

    #[must_use]
    pub fn bounds(&self) -> GridSize {
        self.grid.size()
    }

    /// Current item cell; `None` once the last item has been eaten on a full board.
    #[must_use]
    pub fn item_position(&self) -> Option<Position> {
        self.items
            .position()
            .filter(|position| self.grid.get(*position) == SquareState::Item)
    }
}

fn build_round(
    size: GridSize,
    rng: &mut StdRng,
) -> Result<(GridMap, SnakeBody, ItemSpawner, GameStatus), GameError> {
    let mut grid = GridMap::new(size)?;
    // Truncating division: exact center on odd sides, upper middle cell on even ones.
    let start = Position {
        x: i32::from(size.width / 2),
        y: i32::from(size.height / 2),
    };
    let snake = SnakeBody::new(start, Direction::Right, &mut grid)?;

    let mut items = ItemSpawner::new();
    let status = match items.spawn_or_relocate(&mut grid, rng) {
        Ok(_) => GameStatus::Running,
        Err(GameError::BoardFull) => GameStatus::BoardFull,
        Err(error) => return Err(error),
    };

    Ok((grid, snake, items, status))
}

#[cfg(test)]
mod tests {
    use super::{GameState, GameStatus};
    use crate::config::GridSize;
    use crate::grid::SquareState;
    use crate::input::{AxisSample, Direction};
    use crate::snake::{MoveOutcome, Position};

    fn state(width: u16, height: u16, seed: u64) -> GameState {
        GameState::new_with_seed(GridSize { width, height }, seed).expect("valid grid")
    }

    /// Moves the item out of the way so a test controls what the snake meets.
    fn park_item(state: &mut GameState, position: Position) {
        state
            .items
            .place_at(&mut state.grid, position)
            .expect("parking cell should be free");
    }

    #[test]
    fn new_round_starts_in_the_middle_with_one_item() {
        let state = state(10, 10, 1);

        assert_eq!(state.snake.head(), Position { x: 5, y: 5 });
        assert_eq!(state.snake.len(), 1);
        assert_eq!(state.status, GameStatus::Running);
        assert_eq!(state.grid.count(SquareState::Item), 1);
        assert_eq!(state.pending_direction(), Direction::Right);
    }

    #[test]
    fn snake_grows_after_eating_item() {
        let mut state = state(10, 10, 4);
        park_item(&mut state, Position { x: 6, y: 5 });

        assert_eq!(state.tick(), Some(MoveOutcome::Grew));

        assert_eq!(state.snake.len(), 2);
        assert_eq!(state.snake.head(), Position { x: 6, y: 5 });
        assert_eq!(state.score, 1);
        assert_eq!(state.grid.count(SquareState::Item), 1);
    }

    #[test]
    fn snake_collision_with_wall_sets_game_over() {
        let mut state = state(10, 10, 2);
        park_item(&mut state, Position { x: 1, y: 1 });

        for _ in 0..3 {
            assert_eq!(state.tick(), Some(MoveOutcome::Moved));
        }
        assert_eq!(state.snake.head(), Position { x: 8, y: 5 });

        assert_eq!(state.tick(), Some(MoveOutcome::Collided));
        assert_eq!(state.status, GameStatus::GameOver);
        assert_eq!(state.tick(), None);
    }

    #[test]
    fn reversing_into_second_segment_collides() {
        let mut state = state(10, 10, 3);
        park_item(&mut state, Position { x: 6, y: 5 });
        state.tick();
        park_item(&mut state, Position { x: 1, y: 1 });

        state.set_direction(Direction::Left);

        assert_eq!(state.tick(), Some(MoveOutcome::Collided));
        assert_eq!(state.status, GameStatus::GameOver);
    }

    #[test]
    fn diagonal_input_moves_horizontally() {
        let mut state = state(10, 10, 5);
        park_item(&mut state, Position { x: 1, y: 1 });
        state.set_direction(Direction::Up);

        state.apply_axis(AxisSample::new(1.0, 1.0));
        state.tick();

        assert_eq!(state.snake.head(), Position { x: 6, y: 5 });
    }

    #[test]
    fn idle_input_keeps_direction() {
        let mut state = state(10, 10, 6);
        state.set_direction(Direction::Down);

        state.apply_axis(AxisSample::default());

        assert_eq!(state.pending_direction(), Direction::Down);
    }

    #[test]
    fn reset_restores_a_fresh_round() {
        let mut state = state(10, 10, 8);
        park_item(&mut state, Position { x: 6, y: 5 });
        state.tick();
        state.set_direction(Direction::Up);

        state.reset().expect("reset on a valid grid");

        assert_eq!(state.score, 0);
        assert_eq!(state.tick_count, 0);
        assert_eq!(state.snake.len(), 1);
        assert_eq!(state.status, GameStatus::Running);
        assert_eq!(state.pending_direction(), Direction::Right);
        assert_eq!(state.grid.count(SquareState::Item), 1);
    }

    #[test]
    fn filling_the_board_ends_the_round() {
        // 4x3 has two interior cells: the snake starts on (2,1), the item must be (1,1).
        let mut state = state(4, 3, 9);
        assert_eq!(state.item_position(), Some(Position { x: 1, y: 1 }));
        state.set_direction(Direction::Left);

        assert_eq!(state.tick(), Some(MoveOutcome::Grew));

        assert_eq!(state.status, GameStatus::BoardFull);
        assert_eq!(state.score, 1);
        assert_eq!(state.item_position(), None);
        assert_eq!(state.tick(), None);
    }

    #[test]
    fn single_interior_cell_starts_full() {
        let state = state(3, 3, 10);
        assert_eq!(state.status, GameStatus::BoardFull);
    }

    #[test]
    fn odd_sides_start_on_the_exact_center() {
        let state = GameState::new_with_seed(
            GridSize {
                width: 7,
                height: 11,
            },
            0,
        )
        .expect("valid grid");

        assert_eq!(state.snake.head(), Position { x: 3, y: 5 });
    }
}
