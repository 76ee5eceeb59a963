use std::collections::VecDeque;

use crate::config::GridSize;
use crate::error::GameError;
use crate::grid::{GridMap, SquareState};
use crate::input::Direction;

/// Grid position in logical cell coordinates.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    /// Returns true when the position lies inside the bounds.
    #[must_use]
    pub fn is_within_bounds(self, bounds: GridSize) -> bool {
        self.x >= 0
            && self.y >= 0
            && self.x < i32::from(bounds.width)
            && self.y < i32::from(bounds.height)
    }

    /// Returns the neighbouring cell one step in `direction`.
    #[must_use]
    pub fn step(self, direction: Direction) -> Self {
        let (dx, dy) = direction.delta();
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }
}

/// Result of one movement step.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum MoveOutcome {
    Moved,
    Grew,
    Collided,
}

/// One body segment. The id survives tail-to-head relocation.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct Segment {
    pub id: u32,
    pub position: Position,
}

/// Ordered snake body, front is head and back is tail.
///
/// Every segment owns exactly one `Blocked` cell on the grid it was created
/// against; `advance` keeps that correspondence intact.
#[derive(Debug, Clone)]
pub struct SnakeBody {
    segments: VecDeque<Segment>,
    direction: Direction,
    next_id: u32,
}

impl SnakeBody {
    /// Creates a one-segment snake at `start` and claims its cell.
    pub fn new(
        start: Position,
        direction: Direction,
        grid: &mut GridMap,
    ) -> Result<Self, GameError> {
        grid.set(start, SquareState::Blocked)?;

        let mut segments = VecDeque::new();
        segments.push_front(Segment {
            id: 0,
            position: start,
        });

        Ok(Self {
            segments,
            direction,
            next_id: 1,
        })
    }

    /// Moves the head one cell in `direction`.
    ///
    /// A blocked target leaves both the body and the grid untouched.
    pub fn advance(&mut self, direction: Direction, grid: &mut GridMap) -> MoveOutcome {
        let next = self.head().step(direction);

        match grid.get(next) {
            SquareState::Blocked => MoveOutcome::Collided,
            SquareState::Item => {
                let segment = Segment {
                    id: self.next_id,
                    position: next,
                };
                self.next_id += 1;
                grid.put(next, SquareState::Blocked);
                self.segments.push_front(segment);
                self.direction = direction;
                MoveOutcome::Grew
            }
            SquareState::Free => {
                let mut tail = self
                    .segments
                    .pop_back()
                    .expect("snake body must always contain at least one segment");
                grid.put(tail.position, SquareState::Free);
                tail.position = next;
                grid.put(next, SquareState::Blocked);
                self.segments.push_front(tail);
                self.direction = direction;
                MoveOutcome::Moved
            }
        }
    }

    /// Returns the current head position.
    #[must_use]
    pub fn head(&self) -> Position {
        self.segments
            .front()
            .expect("snake body must always contain at least one segment")
            .position
    }

    /// Returns the current tail position.
    #[must_use]
    pub fn tail(&self) -> Position {
        self.segments
            .back()
            .expect("snake body must always contain at least one segment")
            .position
    }

    /// Returns current segment count.
    #[must_use]
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Returns true when there are no segments.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Direction of the last successful step.
    #[must_use]
    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Iterates over body segments from head to tail.
    pub fn segments(&self) -> impl Iterator<Item = &Segment> {
        self.segments.iter()
    }

    /// Iterates over occupied cells from head to tail.
    pub fn positions(&self) -> impl Iterator<Item = Position> + '_ {
        self.segments.iter().map(|segment| segment.position)
    }
}
