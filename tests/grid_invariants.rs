use std::collections::HashSet;
use std::time::Duration;

use grid_snake::config::{GridSize, Settings};
use grid_snake::game::{GameState, GameStatus};
use grid_snake::game_loop::GameLoop;
use grid_snake::grid::SquareState;
use grid_snake::input::Direction;
use grid_snake::snake::{MoveOutcome, Position};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const DIRECTIONS: [Direction; 4] = [
    Direction::Up,
    Direction::Down,
    Direction::Left,
    Direction::Right,
];

/// Blocked cells are exactly the wall plus the body, and at most one item exists.
fn assert_board_consistent(state: &GameState) {
    let body: Vec<Position> = state.snake.positions().collect();
    let unique: HashSet<Position> = body.iter().copied().collect();
    assert_eq!(unique.len(), body.len(), "two segments share a cell");
    assert!(!body.is_empty());

    let mut items = 0;
    for (position, cell) in state.grid.cells() {
        let expected_blocked = state.grid.is_border(position) || unique.contains(&position);
        assert_eq!(
            cell == SquareState::Blocked,
            expected_blocked,
            "cell {position:?} is {cell:?}"
        );
        if cell == SquareState::Item {
            items += 1;
            assert_eq!(state.item_position(), Some(position));
        }
    }
    assert!(items <= 1);
}

/// Picks a direction that avoids walls and body when one exists.
fn steer<R: Rng>(state: &GameState, rng: &mut R) -> Direction {
    let head = state.snake.head();
    let open: Vec<Direction> = DIRECTIONS
        .into_iter()
        .filter(|direction| state.grid.get(head.step(*direction)) != SquareState::Blocked)
        .collect();

    if open.is_empty() {
        DIRECTIONS[rng.gen_range(0..DIRECTIONS.len())]
    } else {
        open[rng.gen_range(0..open.len())]
    }
}

#[test]
fn random_play_keeps_the_board_consistent() {
    for seed in 0..20 {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut state = GameState::new_with_seed(
            GridSize {
                width: 9,
                height: 7,
            },
            seed,
        )
        .expect("valid grid");
        assert_board_consistent(&state);

        let mut items_eaten = 0;
        for _ in 0..2_000 {
            let direction = steer(&state, &mut rng);
            state.set_direction(direction);

            let length_before = state.snake.len();
            let item_before = state.item_position();
            let grid_before = state.grid.clone();
            let target = state.snake.head().step(direction);

            let Some(outcome) = state.tick() else {
                break;
            };

            match outcome {
                MoveOutcome::Moved => assert_eq!(state.snake.len(), length_before),
                MoveOutcome::Grew => {
                    items_eaten += 1;
                    assert_eq!(state.snake.len(), length_before + 1);
                    assert_eq!(Some(target), item_before);
                    if let Some(item) = state.item_position() {
                        if state.status == GameStatus::Running {
                            assert_eq!(grid_before.get(item), SquareState::Free);
                        }
                    }
                }
                MoveOutcome::Collided => {
                    assert_eq!(grid_before.get(target), SquareState::Blocked);
                    assert_eq!(state.snake.len(), length_before);
                    assert_eq!(state.grid, grid_before);
                }
            }

            assert_eq!(state.score, items_eaten);
            assert_board_consistent(&state);

            if state.status != GameStatus::Running {
                break;
            }
        }
    }
}

#[test]
fn heading_up_stops_below_the_north_wall() {
    let size = GridSize {
        width: 8,
        height: 8,
    };

    for seed in 0..10 {
        let mut state = GameState::new_with_seed(size, seed).expect("valid grid");
        state
            .items
            .place_at(&mut state.grid, Position { x: 1, y: 1 })
            .expect("corner cell should be free");
        state.set_direction(Direction::Up);

        let mut outcome = state.tick();
        while outcome == Some(MoveOutcome::Moved) {
            outcome = state.tick();
        }

        assert_eq!(outcome, Some(MoveOutcome::Collided));
        assert_eq!(state.snake.head(), Position { x: 4, y: 6 });
        assert_eq!(state.status, GameStatus::GameOver);
    }
}

#[test]
fn full_board_holds_until_restarted() {
    // A 4x3 board has two interior cells: the start cell and the item cell.
    let settings = Settings {
        grid: GridSize {
            width: 4,
            height: 3,
        },
        movement_interval: Duration::from_millis(50),
        ..Settings::default()
    };
    let mut state = GameState::new_with_seed(settings.grid, 1).expect("valid grid");
    assert_eq!(state.item_position(), Some(Position { x: 1, y: 1 }));
    state.set_direction(Direction::Left);
    let mut game_loop = GameLoop::new(state, &settings);

    game_loop.update(Duration::from_millis(50), &mut ()).expect("update");
    assert_eq!(game_loop.state().status, GameStatus::BoardFull);
    assert_eq!(game_loop.state().score, 1);
    assert_eq!(game_loop.state().grid.count(SquareState::Free), 0);
    assert_board_consistent(game_loop.state());

    game_loop.update(Duration::from_secs(60), &mut ()).expect("update");
    assert_eq!(game_loop.state().status, GameStatus::BoardFull);

    game_loop.restart(&mut ()).expect("restart");
    assert_eq!(game_loop.state().status, GameStatus::Running);
    assert_eq!(game_loop.state().score, 0);
    assert_board_consistent(game_loop.state());
}
