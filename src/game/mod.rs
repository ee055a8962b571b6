//! Core game logic module for Snake
//!
//! Pure state transitions with no I/O or rendering dependencies. Every
//! operation takes a snapshot and returns a new one; randomness is injected
//! so games can be replayed from a seed.

pub mod config;
pub mod direction;
pub mod engine;
pub mod state;

// Re-export commonly used types
pub use config::{GameConfig, MAX_GRID_SIDE, TICK_INTERVAL};
pub use direction::{Direction, UnknownDirection};
pub use engine::{
    CollisionType, GameEngine, StepEvent, Transition, advance, create_initial_state,
    set_direction, set_direction_label, spawn_food, step,
};
pub use state::{Cell, Dimensions, GameState};
