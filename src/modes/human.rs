use anyhow::{Context, Result};
use crossterm::{
    event::{Event, EventStream, KeyEvent, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use futures::StreamExt;
use log::{debug, info, warn};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io::{Stderr, stderr};
use std::path::Path;
use std::time::Duration;
use tokio::time::interval;

use crate::game::{
    CollisionType, GameConfig, GameEngine, GameState, StepEvent, TICK_INTERVAL, set_direction,
};
use crate::input::{InputHandler, KeyAction, PromptAction};
use crate::leaderboard::{
    LeaderboardEntry, LeaderboardError, LeaderboardStore, MAX_NAME_CHARS, ScoreSubmission,
};
use crate::metrics::GameMetrics;
use crate::render::{Overlay, Renderer};

const RENDER_INTERVAL: Duration = Duration::from_millis(33);

const OFFLINE_FEEDBACK: &str = "Leaderboard unavailable (offline mode).";

/// Player-facing text for a failed score submission
pub fn feedback_for(err: &LeaderboardError) -> &'static str {
    match err {
        LeaderboardError::InvalidSubmission { .. } => "Name and score are required.",
        LeaderboardError::NotConfigured => OFFLINE_FEEDBACK,
        LeaderboardError::Io { .. } | LeaderboardError::Serde { .. } => {
            "Unable to save score (leaderboard unreachable)."
        }
    }
}

pub struct HumanMode {
    engine: GameEngine,
    state: GameState,
    metrics: GameMetrics,
    renderer: Renderer,
    input_handler: InputHandler,
    leaderboard: Option<LeaderboardStore>,
    top_scores: Vec<LeaderboardEntry>,
    feedback: String,
    name_input: String,
    collision: Option<CollisionType>,
    paused: bool,
    should_quit: bool,
}

impl HumanMode {
    /// A missing or unusable leaderboard only disables score saving
    pub fn new(config: GameConfig, leaderboard_path: Option<&Path>) -> Self {
        let mut engine = GameEngine::new(config);
        let state = engine.reset();

        let leaderboard = match LeaderboardStore::open(leaderboard_path) {
            Ok(store) => Some(store),
            Err(LeaderboardError::NotConfigured) => {
                info!("No leaderboard configured; scores will not be saved");
                None
            }
            Err(err) => {
                warn!("Leaderboard disabled: {:#}", anyhow::Error::new(err));
                None
            }
        };

        let mut mode = Self {
            engine,
            state,
            metrics: GameMetrics::new(),
            renderer: Renderer::new(),
            input_handler: InputHandler::new(),
            leaderboard,
            top_scores: Vec::new(),
            feedback: String::new(),
            name_input: String::new(),
            collision: None,
            paused: false,
            should_quit: false,
        };
        mode.refresh_leaderboard();
        mode
    }

    pub async fn run(&mut self) -> Result<()> {
        // Setup terminal
        enable_raw_mode().context("Failed to enable raw mode")?;
        let mut stderr = stderr();
        execute!(stderr, EnterAlternateScreen).context("Failed to enter alternate screen")?;
        let backend = CrosstermBackend::new(stderr);
        let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;
        terminal.hide_cursor().context("Failed to hide cursor")?;
        terminal.clear().context("Failed to clear terminal")?;

        info!(
            "Starting game on a {}x{} board",
            self.state.cols, self.state.rows
        );

        // Run game loop with cleanup
        let result = self.run_game_loop(&mut terminal).await;

        // Cleanup terminal
        self.cleanup_terminal(&mut terminal)?;

        result
    }

    async fn run_game_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        let mut event_stream = EventStream::new();
        let mut tick_timer = interval(TICK_INTERVAL);
        let mut render_timer = interval(RENDER_INTERVAL);

        loop {
            tokio::select! {
                maybe_event = event_stream.next() => {
                    if let Some(Ok(event)) = maybe_event {
                        self.handle_event(event);
                    }
                }

                _ = tick_timer.tick() => {
                    self.update_game();
                }

                _ = render_timer.tick() => {
                    self.metrics.update();
                    let overlay = Overlay {
                        paused: self.paused,
                        collision: self.collision,
                        name_input: &self.name_input,
                        feedback: &self.feedback,
                        leaderboard: &self.top_scores,
                    };
                    terminal.draw(|frame| {
                        self.renderer.render(frame, &self.state, &self.metrics, &overlay);
                    }).context("Failed to draw frame")?;
                }

                _ = tokio::signal::ctrl_c() => {
                    self.should_quit = true;
                }
            }

            if self.should_quit {
                break;
            }
        }

        Ok(())
    }

    fn handle_event(&mut self, event: Event) {
        if let Event::Key(key) = event {
            // Only process key press events, not release
            if key.kind != KeyEventKind::Press {
                return;
            }

            if self.state.alive {
                self.handle_play_key(key);
            } else {
                self.handle_prompt_key(key);
            }
        }
    }

    fn handle_play_key(&mut self, key: KeyEvent) {
        match self.input_handler.handle_key_event(key) {
            KeyAction::Turn(dir) => {
                self.state = set_direction(&self.state, dir);
            }
            KeyAction::TogglePause => self.toggle_pause(),
            KeyAction::Restart => self.reset_game(),
            KeyAction::Quit => self.should_quit = true,
            KeyAction::None => {}
        }
    }

    fn handle_prompt_key(&mut self, key: KeyEvent) {
        match self.input_handler.handle_prompt_key(key) {
            PromptAction::Push(c) => {
                if self.name_input.chars().count() < MAX_NAME_CHARS {
                    self.name_input.push(c);
                }
            }
            PromptAction::Backspace => {
                self.name_input.pop();
            }
            PromptAction::Confirm => {
                if self.name_input.trim().is_empty() {
                    self.reset_game();
                } else {
                    self.submit_score();
                }
            }
            PromptAction::Quit => self.should_quit = true,
            PromptAction::None => {}
        }
    }

    fn toggle_pause(&mut self) {
        if !self.state.alive {
            return;
        }
        self.paused = !self.paused;
        if self.paused {
            self.metrics.on_pause();
        } else {
            self.metrics.on_resume();
        }
    }

    fn update_game(&mut self) {
        if self.paused || !self.state.alive {
            return;
        }

        let transition = self.engine.advance(&self.state);
        self.state = transition.state;

        match transition.event {
            StepEvent::Ate => debug!("Food eaten, score {}", self.state.score),
            StepEvent::Collided(collision) => {
                info!(
                    "Game over ({:?}) with score {} and length {}",
                    collision,
                    self.state.score,
                    self.state.len()
                );
                self.collision = Some(collision);
                self.metrics.on_game_over(self.state.score);
                self.refresh_leaderboard();
            }
            StepEvent::Moved | StepEvent::Idle => {}
        }
    }

    fn store(&self) -> Result<&LeaderboardStore, LeaderboardError> {
        self.leaderboard
            .as_ref()
            .ok_or(LeaderboardError::NotConfigured)
    }

    /// Any load failure leaves the game in offline mode
    fn refresh_leaderboard(&mut self) {
        match self.store().and_then(|store| store.top()) {
            Ok(entries) => {
                self.top_scores = entries;
                self.feedback.clear();
            }
            Err(err) => {
                debug!("Unable to load leaderboard: {}", err);
                self.top_scores.clear();
                self.feedback = OFFLINE_FEEDBACK.to_string();
            }
        }
    }

    fn submit_score(&mut self) {
        if self.state.score == 0 {
            self.feedback = "Score must be greater than zero.".to_string();
            return;
        }

        let result = ScoreSubmission::new(&self.name_input, self.state.score as f64)
            .and_then(|submission| self.store()?.submit(submission));

        match result {
            Ok(entries) => {
                self.top_scores = entries;
                self.feedback = "Score saved! Leaderboard refreshed.".to_string();
                self.name_input.clear();
            }
            Err(err) => {
                warn!("Leaderboard save failed: {}", err);
                self.feedback = feedback_for(&err).to_string();
            }
        }
    }

    fn reset_game(&mut self) {
        self.state = self.engine.reset();
        self.metrics.on_game_start();
        self.paused = false;
        self.collision = None;
        self.name_input.clear();
        self.feedback.clear();
        info!("Game restarted");
    }

    fn cleanup_terminal(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        disable_raw_mode().context("Failed to disable raw mode")?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)
            .context("Failed to leave alternate screen")?;
        terminal.show_cursor().context("Failed to show cursor")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{Cell, Direction};
    use crossterm::event::{KeyCode, KeyModifiers};
    use tempfile::TempDir;

    fn key(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn type_text(mode: &mut HumanMode, text: &str) {
        for c in text.chars() {
            mode.handle_event(key(KeyCode::Char(c)));
        }
    }

    /// A finished game with the given score
    fn finish_with_score(mode: &mut HumanMode, score: u32) {
        mode.state = GameState {
            alive: false,
            score,
            ..mode.state.clone()
        };
    }

    #[test]
    fn test_game_initialization() {
        let mode = HumanMode::new(GameConfig::default(), None);
        assert!(mode.state.alive);
        assert_eq!(mode.state.score, 0);
        assert!(mode.leaderboard.is_none());
        assert_eq!(mode.feedback, "Leaderboard unavailable (offline mode).");
    }

    #[test]
    fn test_game_reset() {
        let mut mode = HumanMode::new(GameConfig::default(), None);
        finish_with_score(&mut mode, 10);
        mode.collision = Some(CollisionType::Wall);
        mode.name_input.push_str("ada");

        mode.reset_game();

        assert_eq!(mode.state.score, 0);
        assert!(mode.state.alive);
        assert!(mode.collision.is_none());
        assert!(mode.name_input.is_empty());
    }

    #[test]
    fn test_turn_key_queues_direction() {
        let mut mode = HumanMode::new(GameConfig::default(), None);

        mode.handle_event(key(KeyCode::Up));
        assert_eq!(mode.state.next_dir, Direction::Up);

        // Reversal of the committed direction is ignored
        mode.handle_event(key(KeyCode::Left));
        assert_eq!(mode.state.next_dir, Direction::Up);
    }

    #[test]
    fn test_pause_skips_ticks() {
        let mut mode = HumanMode::new(GameConfig::default(), None);
        let head = mode.state.head();

        mode.handle_event(key(KeyCode::Char(' ')));
        assert!(mode.paused);
        mode.update_game();
        assert_eq!(mode.state.head(), head);

        mode.handle_event(key(KeyCode::Char(' ')));
        assert!(!mode.paused);
        mode.update_game();
        assert_eq!(mode.state.head(), Cell::new(head.x + 1, head.y));
    }

    #[test]
    fn test_running_into_wall_opens_prompt() {
        let mut mode = HumanMode::new(GameConfig::new(3, 3), None);

        for _ in 0..3 {
            mode.update_game();
        }

        assert!(!mode.state.alive);
        assert_eq!(mode.collision, Some(CollisionType::Wall));
        assert_eq!(mode.metrics.games_played, 1);

        // Letters now go to the name prompt instead of steering or quitting
        type_text(&mut mode, "qr");
        assert_eq!(mode.name_input, "qr");
        assert!(!mode.should_quit);
    }

    #[test]
    fn test_prompt_caps_name_length() {
        let mut mode = HumanMode::new(GameConfig::default(), None);
        finish_with_score(&mut mode, 3);

        type_text(&mut mode, "abcdefghijklmnopqrstuvwxyz");
        assert_eq!(mode.name_input.chars().count(), MAX_NAME_CHARS);

        mode.handle_event(key(KeyCode::Backspace));
        assert_eq!(mode.name_input, "abcdefghijklmno");
    }

    #[test]
    fn test_confirm_on_empty_name_restarts() {
        let mut mode = HumanMode::new(GameConfig::default(), None);
        finish_with_score(&mut mode, 3);

        mode.handle_event(key(KeyCode::Enter));

        assert!(mode.state.alive);
        assert_eq!(mode.state.score, 0);
    }

    #[test]
    fn test_zero_score_is_not_submitted() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("board.json");
        let mut mode = HumanMode::new(GameConfig::default(), Some(path.as_path()));
        finish_with_score(&mut mode, 0);

        type_text(&mut mode, "ada");
        mode.handle_event(key(KeyCode::Enter));

        assert_eq!(mode.feedback, "Score must be greater than zero.");
        assert!(mode.top_scores.is_empty());
    }

    #[test]
    fn test_submit_without_leaderboard_keeps_game_usable() {
        let mut mode = HumanMode::new(GameConfig::default(), None);
        finish_with_score(&mut mode, 5);

        type_text(&mut mode, "ada");
        mode.handle_event(key(KeyCode::Enter));

        assert_eq!(mode.feedback, "Leaderboard unavailable (offline mode).");
        assert_eq!(mode.name_input, "ada");
        assert!(!mode.should_quit);
    }

    #[test]
    fn test_submit_saves_score() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("board.json");
        let mut mode = HumanMode::new(GameConfig::default(), Some(path.as_path()));
        finish_with_score(&mut mode, 7);

        type_text(&mut mode, "  ada ");
        mode.handle_event(key(KeyCode::Enter));

        assert_eq!(mode.feedback, "Score saved! Leaderboard refreshed.");
        assert_eq!(mode.top_scores.len(), 1);
        assert_eq!(mode.top_scores[0].name, "ada");
        assert_eq!(mode.top_scores[0].score, 7);
        assert!(mode.name_input.is_empty());

        let reopened = LeaderboardStore::open(Some(path.as_path())).unwrap();
        assert_eq!(reopened.top().unwrap(), mode.top_scores);
    }

    #[test]
    fn test_unreadable_leaderboard_goes_offline() {
        let dir = TempDir::new().unwrap();
        // A directory opens fine but cannot be read as a board
        let path = dir.path().join("board.json");
        std::fs::create_dir(&path).unwrap();

        let mut mode = HumanMode::new(GameConfig::default(), Some(path.as_path()));

        assert!(mode.leaderboard.is_some());
        assert!(mode.top_scores.is_empty());
        assert_eq!(mode.feedback, "Leaderboard unavailable (offline mode).");

        // Saving still reports the failed save
        finish_with_score(&mut mode, 4);
        type_text(&mut mode, "ada");
        mode.handle_event(key(KeyCode::Enter));
        assert_eq!(mode.feedback, "Unable to save score (leaderboard unreachable).");
    }

    #[test]
    fn test_successful_refresh_clears_feedback() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("board.json");
        let mut mode = HumanMode::new(GameConfig::default(), Some(path.as_path()));
        assert!(mode.feedback.is_empty());

        mode.feedback = "Leaderboard unavailable (offline mode).".to_string();
        mode.refresh_leaderboard();
        assert!(mode.feedback.is_empty());
    }

    #[test]
    fn test_feedback_messages() {
        assert_eq!(
            feedback_for(&LeaderboardError::NotConfigured),
            "Leaderboard unavailable (offline mode)."
        );
        assert_eq!(
            feedback_for(&LeaderboardError::InvalidSubmission { reason: "x" }),
            "Name and score are required."
        );
    }
}
