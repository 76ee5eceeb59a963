use rand::Rng;

use crate::config::GridSize;
use crate::error::GameError;
use crate::snake::Position;

/// Occupancy of a single grid cell.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub enum SquareState {
    Free,
    Blocked,
    Item,
}

/// Board of cell states, stored row-major with `(0, 0)` at the bottom-left.
///
/// The outermost ring is a permanent wall. Every other cell is `Blocked`
/// only while a snake segment sits on it.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct GridMap {
    size: GridSize,
    cells: Vec<SquareState>,
}

impl GridMap {
    /// Allocates a board with a walled border and a free interior.
    pub fn new(size: GridSize) -> Result<Self, GameError> {
        size.validate()?;

        let mut grid = Self {
            size,
            cells: vec![SquareState::Free; size.total_cells()],
        };

        for y in 0..i32::from(size.height) {
            for x in 0..i32::from(size.width) {
                let position = Position { x, y };
                if grid.is_border(position) {
                    grid.put(position, SquareState::Blocked);
                }
            }
        }

        Ok(grid)
    }

    #[must_use]
    pub fn size(&self) -> GridSize {
        self.size
    }

    /// Returns the state at `position`; anything off the board reads as wall.
    #[must_use]
    pub fn get(&self, position: Position) -> SquareState {
        self.index(position)
            .map_or(SquareState::Blocked, |index| self.cells[index])
    }

    /// Overwrites one cell.
    pub fn set(&mut self, position: Position, state: SquareState) -> Result<(), GameError> {
        let index = self.index(position).ok_or(GameError::OutOfBounds {
            x: position.x,
            y: position.y,
        })?;
        self.cells[index] = state;
        Ok(())
    }

    /// Writes a cell the caller already knows is on the board.
    pub(crate) fn put(&mut self, position: Position, state: SquareState) {
        let index = self
            .index(position)
            .expect("put() is only called with on-board positions");
        self.cells[index] = state;
    }

    #[must_use]
    pub fn contains(&self, position: Position) -> bool {
        self.index(position).is_some()
    }

    /// Returns true for the permanent wall ring.
    #[must_use]
    pub fn is_border(&self, position: Position) -> bool {
        self.contains(position)
            && (position.x == 0
                || position.y == 0
                || position.x == i32::from(self.size.width) - 1
                || position.y == i32::from(self.size.height) - 1)
    }

    /// Iterates every cell with its position, row by row from the bottom.
    pub fn cells(&self) -> impl Iterator<Item = (Position, SquareState)> + '_ {
        let width = usize::from(self.size.width);
        self.cells.iter().enumerate().map(move |(index, state)| {
            let position = Position {
                x: (index % width) as i32,
                y: (index / width) as i32,
            };
            (position, *state)
        })
    }

    /// Counts the cells currently in `state`.
    #[must_use]
    pub fn count(&self, state: SquareState) -> usize {
        self.cells.iter().filter(|cell| **cell == state).count()
    }

    /// Picks a uniformly random `Free` cell.
    pub fn random_free_cell<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<Position, GameError> {
        let candidates: Vec<Position> = self
            .cells()
            .filter(|(_, state)| *state == SquareState::Free)
            .map(|(position, _)| position)
            .collect();

        if candidates.is_empty() {
            return Err(GameError::BoardFull);
        }

        let index = rng.gen_range(0..candidates.len());
        Ok(candidates[index])
    }

    fn index(&self, position: Position) -> Option<usize> {
        if !position.is_within_bounds(self.size) {
            return None;
        }
        let x = usize::try_from(position.x).ok()?;
        let y = usize::try_from(position.y).ok()?;
        Some(y * usize::from(self.size.width) + x)
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::{GridMap, SquareState};
    use crate::config::GridSize;
    use crate::error::GameError;
    use crate::snake::Position;

    fn grid(width: u16, height: u16) -> GridMap {
        GridMap::new(GridSize { width, height }).expect("grid size should be valid")
    }

    #[test]
    fn border_is_blocked_and_interior_free() {
        let grid = grid(6, 5);

        assert_eq!(grid.get(Position { x: 0, y: 2 }), SquareState::Blocked);
        assert_eq!(grid.get(Position { x: 5, y: 2 }), SquareState::Blocked);
        assert_eq!(grid.get(Position { x: 3, y: 0 }), SquareState::Blocked);
        assert_eq!(grid.get(Position { x: 3, y: 4 }), SquareState::Blocked);
        assert_eq!(grid.get(Position { x: 1, y: 1 }), SquareState::Free);
        assert_eq!(grid.count(SquareState::Free), 4 * 3);
        assert_eq!(grid.count(SquareState::Blocked), 30 - 12);
    }

    #[test]
    fn out_of_bounds_reads_as_wall() {
        let grid = grid(5, 5);

        assert_eq!(grid.get(Position { x: -1, y: 2 }), SquareState::Blocked);
        assert_eq!(grid.get(Position { x: 2, y: 5 }), SquareState::Blocked);
        assert_eq!(grid.get(Position { x: 99, y: -7 }), SquareState::Blocked);
    }

    #[test]
    fn out_of_bounds_write_is_rejected() {
        let mut grid = grid(5, 5);

        assert_eq!(
            grid.set(Position { x: 5, y: 1 }, SquareState::Item),
            Err(GameError::OutOfBounds { x: 5, y: 1 })
        );
    }

    #[test]
    fn set_overwrites_a_single_cell() {
        let mut grid = grid(5, 5);
        let target = Position { x: 2, y: 3 };

        grid.set(target, SquareState::Item).expect("in-bounds write");

        assert_eq!(grid.get(target), SquareState::Item);
        assert_eq!(grid.count(SquareState::Item), 1);
    }

    #[test]
    fn random_free_cell_only_returns_free_cells() {
        let mut grid = grid(6, 6);
        let mut rng = StdRng::seed_from_u64(11);
        grid.set(Position { x: 1, y: 1 }, SquareState::Blocked).expect("in-bounds write");
        grid.set(Position { x: 2, y: 1 }, SquareState::Item).expect("in-bounds write");

        for _ in 0..200 {
            let cell = grid.random_free_cell(&mut rng).expect("free cells remain");
            assert_eq!(grid.get(cell), SquareState::Free);
        }
    }

    #[test]
    fn random_free_cell_reports_full_board() {
        let mut grid = grid(3, 3);
        let mut rng = StdRng::seed_from_u64(1);
        grid.set(Position { x: 1, y: 1 }, SquareState::Blocked).expect("in-bounds write");

        assert_eq!(grid.random_free_cell(&mut rng), Err(GameError::BoardFull));
    }

    #[test]
    fn undersized_grid_is_rejected() {
        assert!(GridMap::new(GridSize {
            width: 2,
            height: 2
        })
        .is_err());
    }
}
