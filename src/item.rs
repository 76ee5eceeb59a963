use log::debug;
use rand::Rng;

use crate::error::GameError;
use crate::grid::{GridMap, SquareState};
use crate::snake::Position;

/// The single consumable marker on the board.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct Item {
    pub position: Position,
}

/// Owns the item and moves it to fresh cells.
///
/// The item is created on the first spawn and relocated afterwards.
#[derive(Debug, Clone, Default)]
pub struct ItemSpawner {
    item: Option<Item>,
}

impl ItemSpawner {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Moves the item to a uniformly random free cell and returns that cell.
    ///
    /// The previous cell is left alone: after consumption it already belongs
    /// to the snake.
    pub fn spawn_or_relocate<R: Rng + ?Sized>(
        &mut self,
        grid: &mut GridMap,
        rng: &mut R,
    ) -> Result<Position, GameError> {
        let position = grid.random_free_cell(rng)?;
        grid.put(position, SquareState::Item);

        match self.item.as_mut() {
            Some(item) => item.position = position,
            None => self.item = Some(Item { position }),
        }

        debug!("item placed at ({}, {})", position.x, position.y);
        Ok(position)
    }

    /// Puts the item on a chosen free cell, clearing any unconsumed one.
    ///
    /// Used to stage scenarios; gameplay goes through `spawn_or_relocate`.
    pub fn place_at(&mut self, grid: &mut GridMap, position: Position) -> Result<(), GameError> {
        if self.position() == Some(position) && grid.get(position) == SquareState::Item {
            return Ok(());
        }
        if grid.get(position) != SquareState::Free {
            return Err(GameError::CellOccupied {
                x: position.x,
                y: position.y,
            });
        }

        if let Some(previous) = self.position() {
            if grid.get(previous) == SquareState::Item {
                grid.put(previous, SquareState::Free);
            }
        }

        grid.put(position, SquareState::Item);
        self.item = Some(Item { position });
        Ok(())
    }

    #[must_use]
    pub fn item(&self) -> Option<Item> {
        self.item
    }

    /// Current item cell, if one has been spawned.
    #[must_use]
    pub fn position(&self) -> Option<Position> {
        self.item.map(|item| item.position)
    }
}
