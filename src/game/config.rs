use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::state::Dimensions;

/// Fixed game speed; there are no difficulty levels
pub const TICK_INTERVAL: Duration = Duration::from_millis(120);

/// Largest board side the game accepts
pub const MAX_GRID_SIDE: usize = 1000;

/// Configuration for the game
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    /// Width of the game grid
    pub grid_width: usize,
    /// Height of the game grid
    pub grid_height: usize,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            grid_width: 20,
            grid_height: 20,
        }
    }
}

impl GameConfig {
    /// Create a new configuration with custom grid size
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            grid_width: width,
            grid_height: height,
        }
    }

    pub fn dimensions(&self) -> Dimensions {
        Dimensions::new(self.grid_width, self.grid_height)
    }

    /// Fits the starting snake and one food cell, and no side exceeds
    /// [`MAX_GRID_SIDE`]
    pub fn is_playable(&self) -> bool {
        self.grid_width >= 2
            && self.grid_width <= MAX_GRID_SIDE
            && self.grid_height <= MAX_GRID_SIDE
            && self.dimensions().area().is_some_and(|area| area >= 3)
    }
}
