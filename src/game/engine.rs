use super::{
    config::GameConfig,
    direction::Direction,
    state::{Cell, Dimensions, GameState},
};
use rand::Rng;
use rand::rngs::ThreadRng;
use std::collections::HashSet;

/// What blocked the snake's next move
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollisionType {
    /// Snake hit a wall
    Wall,
    /// Snake hit itself
    SelfCollision,
}

/// What happened during one tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepEvent {
    /// The game was already over; nothing changed
    Idle,
    Moved,
    /// The head landed on the food
    Ate,
    Collided(CollisionType),
}

/// Result of advancing a snapshot by one tick
#[derive(Debug, Clone, PartialEq)]
pub struct Transition {
    pub state: GameState,
    pub event: StepEvent,
}

/// Build the starting snapshot: a two-segment snake centred on the board
/// heading right, and one food cell.
///
/// Board size is not validated here; callers check
/// [`GameConfig::is_playable`] first.
pub fn create_initial_state<R: Rng + ?Sized>(dimensions: Dimensions, rng: &mut R) -> GameState {
    let head = Cell::new((dimensions.cols / 2) as i32, (dimensions.rows / 2) as i32);
    let snake = vec![head, head.moved_in_direction(Direction::Left)];
    let food = spawn_food(dimensions, &snake, rng);

    GameState {
        cols: dimensions.cols,
        rows: dimensions.rows,
        snake,
        dir: Direction::Right,
        next_dir: Direction::Right,
        food,
        score: 0,
        alive: true,
        grow: 0,
    }
}

/// Queue a turn for the next tick.
///
/// A request opposite to the committed direction is dropped. Later requests
/// before the tick replace earlier ones.
pub fn set_direction(state: &GameState, requested: Direction) -> GameState {
    if state.dir.is_opposite(requested) {
        return state.clone();
    }

    GameState {
        next_dir: requested,
        ..state.clone()
    }
}

/// [`set_direction`] from a textual label; unknown labels leave the state as is
pub fn set_direction_label(state: &GameState, label: &str) -> GameState {
    match label.parse::<Direction>() {
        Ok(requested) => set_direction(state, requested),
        Err(_) => state.clone(),
    }
}

/// Advance the game by one tick
pub fn step<R: Rng + ?Sized>(state: &GameState, rng: &mut R) -> GameState {
    advance(state, rng).state
}

/// Advance the game by one tick and report what happened
pub fn advance<R: Rng + ?Sized>(state: &GameState, rng: &mut R) -> Transition {
    if !state.alive {
        return Transition {
            state: state.clone(),
            event: StepEvent::Idle,
        };
    }

    let Some(&head) = state.snake.first() else {
        return Transition {
            state: state.clone(),
            event: StepEvent::Idle,
        };
    };

    let dir = state.next_dir;
    let next_head = head.moved_in_direction(dir);

    // A failed move leaves the board as it was, including the committed direction
    if let Some(collision) = check_collision(state, next_head) {
        return Transition {
            state: GameState {
                alive: false,
                ..state.clone()
            },
            event: StepEvent::Collided(collision),
        };
    }

    let mut snake = Vec::with_capacity(state.snake.len() + 1);
    snake.push(next_head);
    snake.extend_from_slice(&state.snake);

    let mut score = state.score;
    let mut grow = state.grow;
    let mut food = state.food;
    let ate_food = next_head == state.food;

    if ate_food {
        score += 1;
        grow += 1;
        // Spawn against the untrimmed snake so the old tail cell is excluded too
        food = spawn_food(state.dimensions(), &snake, rng);
    }

    if grow > 0 {
        grow -= 1;
    } else {
        snake.pop();
    }

    Transition {
        state: GameState {
            dir,
            snake,
            score,
            food,
            grow,
            ..state.clone()
        },
        event: if ate_food {
            StepEvent::Ate
        } else {
            StepEvent::Moved
        },
    }
}

/// Check if moving the head to `cell` ends the game.
///
/// The current tail is skipped: it leaves its cell on the same tick.
fn check_collision(state: &GameState, cell: Cell) -> Option<CollisionType> {
    if !state.is_in_bounds(cell) {
        return Some(CollisionType::Wall);
    }

    let body = state.snake.split_last().map_or(&[][..], |(_, body)| body);
    if body.contains(&cell) {
        return Some(CollisionType::SelfCollision);
    }

    None
}

/// Pick a uniformly random free cell.
///
/// Free cells are enumerated row by row, so a fixed rng always picks the same
/// cell. A full board yields `(0, 0)`.
pub fn spawn_food<R: Rng + ?Sized>(dimensions: Dimensions, snake: &[Cell], rng: &mut R) -> Cell {
    let occupied: HashSet<Cell> = snake.iter().copied().collect();

    let open: Vec<Cell> = (0..dimensions.rows as i32)
        .flat_map(|y| (0..dimensions.cols as i32).map(move |x| Cell::new(x, y)))
        .filter(|cell| !occupied.contains(cell))
        .collect();

    if open.is_empty() {
        return Cell::new(0, 0);
    }

    open[rng.gen_range(0..open.len())]
}

/// Owns the game configuration and randomness for a driving loop
pub struct GameEngine<R = ThreadRng> {
    config: GameConfig,
    rng: R,
}

impl GameEngine<ThreadRng> {
    /// Create an engine drawing food positions from the thread rng
    pub fn new(config: GameConfig) -> Self {
        Self::with_rng(config, rand::thread_rng())
    }
}

impl<R: Rng> GameEngine<R> {
    pub fn with_rng(config: GameConfig, rng: R) -> Self {
        Self { config, rng }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Start a new game
    pub fn reset(&mut self) -> GameState {
        create_initial_state(self.config.dimensions(), &mut self.rng)
    }

    pub fn step(&mut self, state: &GameState) -> GameState {
        step(state, &mut self.rng)
    }

    pub fn advance(&mut self, state: &GameState) -> Transition {
        advance(state, &mut self.rng)
    }
}
