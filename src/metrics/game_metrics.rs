use std::time::{Duration, Instant};

/// Session clock and best score across restarts.
///
/// The clock only runs while a game is alive and unpaused.
pub struct GameMetrics {
    start_time: Instant,
    paused_since: Option<Instant>,
    paused_total: Duration,
    stopped: bool,
    pub elapsed_time: Duration,
    pub high_score: u32,
    pub games_played: u32,
}

impl GameMetrics {
    pub fn new() -> Self {
        Self::started_at(Instant::now())
    }

    fn started_at(now: Instant) -> Self {
        Self {
            start_time: now,
            paused_since: None,
            paused_total: Duration::ZERO,
            stopped: false,
            elapsed_time: Duration::ZERO,
            high_score: 0,
            games_played: 0,
        }
    }

    pub fn update(&mut self) {
        self.update_at(Instant::now());
    }

    fn update_at(&mut self, now: Instant) {
        if self.stopped {
            return;
        }
        let paused_now = self
            .paused_since
            .map(|since| now.saturating_duration_since(since))
            .unwrap_or_default();
        self.elapsed_time = now
            .saturating_duration_since(self.start_time)
            .saturating_sub(self.paused_total + paused_now);
    }

    pub fn on_game_start(&mut self) {
        self.game_start_at(Instant::now());
    }

    fn game_start_at(&mut self, now: Instant) {
        self.start_time = now;
        self.paused_since = None;
        self.paused_total = Duration::ZERO;
        self.stopped = false;
        self.elapsed_time = Duration::ZERO;
    }

    pub fn on_pause(&mut self) {
        self.pause_at(Instant::now());
    }

    fn pause_at(&mut self, now: Instant) {
        if self.paused_since.is_none() {
            self.paused_since = Some(now);
        }
    }

    pub fn on_resume(&mut self) {
        self.resume_at(Instant::now());
    }

    fn resume_at(&mut self, now: Instant) {
        if let Some(since) = self.paused_since.take() {
            self.paused_total += now.saturating_duration_since(since);
        }
    }

    /// Stops the clock and records the final score
    pub fn on_game_over(&mut self, final_score: u32) {
        self.game_over_at(Instant::now(), final_score);
    }

    fn game_over_at(&mut self, now: Instant, final_score: u32) {
        self.update_at(now);
        self.stopped = true;
        self.games_played += 1;
        if final_score > self.high_score {
            self.high_score = final_score;
        }
    }

    pub fn format_time(&self) -> String {
        let total_secs = self.elapsed_time.as_secs();
        let minutes = total_secs / 60;
        let seconds = total_secs % 60;
        format!("{:02}:{:02}", minutes, seconds)
    }
}

impl Default for GameMetrics {
    fn default() -> Self {
        Self::new()
    }
}
