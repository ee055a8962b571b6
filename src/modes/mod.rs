pub mod human;
pub mod scores;

pub use human::HumanMode;
pub use scores::{show_leaderboard, submit_score};
