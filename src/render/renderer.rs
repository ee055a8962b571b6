use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
};

use crate::game::{Cell, CollisionType, GameState};
use crate::leaderboard::LeaderboardEntry;
use crate::metrics::GameMetrics;

/// Session details drawn around the board
#[derive(Debug, Clone, Copy, Default)]
pub struct Overlay<'a> {
    pub paused: bool,
    /// Why the last game ended, if it has
    pub collision: Option<CollisionType>,
    pub name_input: &'a str,
    pub feedback: &'a str,
    pub leaderboard: &'a [LeaderboardEntry],
}

/// What occupies a board cell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellKind {
    Head,
    Body,
    Food,
    Empty,
}

pub fn classify(state: &GameState, cell: Cell) -> CellKind {
    if cell == state.head() {
        CellKind::Head
    } else if state.is_occupied_by_snake(cell) {
        CellKind::Body
    } else if cell == state.food {
        CellKind::Food
    } else {
        CellKind::Empty
    }
}

pub struct Renderer;

impl Renderer {
    pub fn new() -> Self {
        Self
    }

    pub fn render(
        &self,
        frame: &mut Frame,
        state: &GameState,
        metrics: &GameMetrics,
        overlay: &Overlay,
    ) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Header
                Constraint::Min(0),    // Game area
                Constraint::Length(3), // Footer
            ])
            .split(frame.area());

        frame.render_widget(self.render_stats(state, metrics), chunks[0]);

        let game_area = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Percentage(10),
                Constraint::Percentage(80),
                Constraint::Percentage(10),
            ])
            .split(chunks[1])[1];

        if state.alive {
            frame.render_widget(self.render_grid(state, overlay.paused), game_area);
        } else {
            frame.render_widget(self.render_game_over(state, overlay), game_area);
        }

        frame.render_widget(self.render_controls(state.alive), chunks[2]);
    }

    fn render_grid(&self, state: &GameState, paused: bool) -> Paragraph<'static> {
        let mut lines = Vec::with_capacity(state.rows);

        for y in 0..state.rows {
            let spans: Vec<Span> = (0..state.cols)
                .map(|x| match classify(state, Cell::new(x as i32, y as i32)) {
                    CellKind::Head => Span::styled(
                        "■ ",
                        Style::default()
                            .fg(Color::Cyan)
                            .add_modifier(Modifier::BOLD),
                    ),
                    CellKind::Body => Span::styled("□ ", Style::default().fg(Color::Green)),
                    CellKind::Food => Span::styled(
                        "O ",
                        Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                    ),
                    CellKind::Empty => Span::styled(". ", Style::default().fg(Color::DarkGray)),
                })
                .collect();

            lines.push(Line::from(spans));
        }

        let title = if paused { " Snake (paused) " } else { " Snake " };

        Paragraph::new(lines)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Double)
                    .border_style(Style::default().fg(if paused {
                        Color::Yellow
                    } else {
                        Color::White
                    }))
                    .title(title),
            )
            .alignment(Alignment::Center)
    }

    fn render_stats(&self, state: &GameState, metrics: &GameMetrics) -> Paragraph<'static> {
        let label = Style::default().fg(Color::Yellow);
        let value = Style::default().fg(Color::White);

        let text = vec![Line::from(vec![
            Span::styled("Score: ", label),
            Span::styled(state.score.to_string(), value.add_modifier(Modifier::BOLD)),
            Span::raw("    "),
            Span::styled("Length: ", label),
            Span::styled(state.len().to_string(), value),
            Span::raw("    "),
            Span::styled("Time: ", label),
            Span::styled(metrics.format_time(), value),
            Span::raw("    "),
            Span::styled("Best: ", label),
            Span::styled(metrics.high_score.to_string(), value),
        ])];

        Paragraph::new(text).alignment(Alignment::Center)
    }

    fn render_game_over(&self, state: &GameState, overlay: &Overlay) -> Paragraph<'static> {
        let cause = match overlay.collision {
            Some(CollisionType::Wall) => "You hit the wall.",
            Some(CollisionType::SelfCollision) => "You ran into yourself.",
            None => "",
        };

        let mut text = vec![
            Line::from(""),
            Line::from(Span::styled(
                "GAME OVER",
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(cause, Style::default().fg(Color::Gray))),
            Line::from(""),
            Line::from(vec![
                Span::styled("Final Score: ", Style::default().fg(Color::Yellow)),
                Span::styled(
                    state.score.to_string(),
                    Style::default()
                        .fg(Color::White)
                        .add_modifier(Modifier::BOLD),
                ),
            ]),
            Line::from(""),
            Line::from(vec![
                Span::styled("Name: ", Style::default().fg(Color::Yellow)),
                Span::styled(
                    format!("{}_", overlay.name_input),
                    Style::default().fg(Color::White),
                ),
            ]),
            Line::from(Span::styled(
                overlay.feedback.to_string(),
                Style::default().fg(Color::Cyan),
            )),
            Line::from(""),
            Line::from(Span::styled(
                "Leaderboard",
                Style::default().add_modifier(Modifier::UNDERLINED),
            )),
        ];

        if overlay.leaderboard.is_empty() {
            text.push(Line::from("No scores yet. Be the first!"));
        } else {
            text.extend(
                overlay
                    .leaderboard
                    .iter()
                    .enumerate()
                    .map(|(rank, entry)| Line::from(entry.display_line(rank))),
            );
        }

        Paragraph::new(text).alignment(Alignment::Center).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Red)),
        )
    }

    fn render_controls(&self, alive: bool) -> Paragraph<'static> {
        let key = Style::default().fg(Color::Cyan);
        let quit = Style::default().fg(Color::Red);

        let line = if alive {
            Line::from(vec![
                Span::styled("↑↓←→", key),
                Span::raw(" or "),
                Span::styled("WASD", key),
                Span::raw(" to move | "),
                Span::styled("Space", key),
                Span::raw(" to pause | "),
                Span::styled("R", key),
                Span::raw(" to restart | "),
                Span::styled("Q", quit),
                Span::raw(" to quit"),
            ])
        } else {
            Line::from(vec![
                Span::raw("Type a name and press "),
                Span::styled("Enter", key),
                Span::raw(" to save | "),
                Span::styled("Enter", key),
                Span::raw(" on an empty name to play again | "),
                Span::styled("Esc", quit),
                Span::raw(" to quit"),
            ])
        };

        Paragraph::new(vec![line]).alignment(Alignment::Center)
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}
