use serde::{Deserialize, Serialize};

use super::direction::Direction;

/// A cell on the game grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Cell {
    pub x: i32,
    pub y: i32,
}

impl Cell {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Move cell by delta
    pub fn moved_by(&self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// The neighbouring cell in a direction
    pub fn moved_in_direction(&self, direction: Direction) -> Self {
        let (dx, dy) = direction.delta();
        self.moved_by(dx, dy)
    }
}

/// Board size in cells
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dimensions {
    pub cols: usize,
    pub rows: usize,
}

impl Dimensions {
    pub fn new(cols: usize, rows: usize) -> Self {
        Self { cols, rows }
    }

    pub fn contains(&self, cell: Cell) -> bool {
        cell.x >= 0 && cell.y >= 0 && (cell.x as usize) < self.cols && (cell.y as usize) < self.rows
    }

    /// Number of cells, `None` if it overflows
    pub fn area(&self) -> Option<usize> {
        self.cols.checked_mul(self.rows)
    }
}

/// Immutable snapshot of a game.
///
/// Engine operations never modify a snapshot; each returns a new one and the
/// caller drops the old. Once `alive` is false the snake, food and score are
/// the final board and stay frozen.
///
/// Snapshots built by the engine always hold a snake of at least two cells.
/// [`head`](Self::head) and [`tail`](Self::tail) panic on an empty snake; the
/// engine itself treats one as a finished game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    pub cols: usize,
    pub rows: usize,
    /// Head first, tail last
    pub snake: Vec<Cell>,
    /// Direction committed by the last tick
    pub dir: Direction,
    /// Direction the next tick will commit
    #[serde(rename = "nextDir")]
    pub next_dir: Direction,
    pub food: Cell,
    pub score: u32,
    pub alive: bool,
    /// Tail segments still owed from eaten food
    pub grow: u32,
}

impl GameState {
    pub fn dimensions(&self) -> Dimensions {
        Dimensions::new(self.cols, self.rows)
    }

    /// Check if a cell is within the grid bounds
    pub fn is_in_bounds(&self, cell: Cell) -> bool {
        self.dimensions().contains(cell)
    }

    pub fn head(&self) -> Cell {
        self.snake[0]
    }

    pub fn tail(&self) -> Cell {
        self.snake[self.snake.len() - 1]
    }

    pub fn is_occupied_by_snake(&self, cell: Cell) -> bool {
        self.snake.contains(&cell)
    }

    pub fn len(&self) -> usize {
        self.snake.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snake.is_empty()
    }
}
