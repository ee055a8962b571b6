use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use grid_snake::game::{GameConfig, MAX_GRID_SIDE};
use grid_snake::modes::{self, HumanMode};
use simplelog::{ColorChoice, Config, LevelFilter, TermLogger, TerminalMode, WriteLogger};
use std::fs::File;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "grid_snake")]
#[command(version, about = "Grid snake game with a persisted leaderboard")]
struct Cli {
    /// Grid width
    #[arg(long, default_value = "20")]
    width: usize,

    /// Grid height
    #[arg(long, default_value = "20")]
    height: usize,

    /// Leaderboard JSON file; without it scores are not saved
    #[arg(long, env = "GRID_SNAKE_LEADERBOARD")]
    leaderboard: Option<PathBuf>,

    /// Where play mode writes its log (the terminal belongs to the game)
    #[arg(long, default_value = "grid_snake.log")]
    log_file: PathBuf,

    /// Log debug messages
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Play snake with keyboard controls
    Play,
    /// Print the top of the leaderboard
    Leaderboard,
    /// Record a score without playing
    Submit {
        #[arg(long)]
        name: String,
        #[arg(long, allow_negative_numbers = true)]
        score: f64,
    },
}

fn init_logging(command: &Command, log_file: &Path, verbose: bool) -> Result<()> {
    let result = match command {
        Command::Play => {
            let file = File::create(log_file)
                .with_context(|| format!("Failed to create log file {:?}", log_file))?;
            let level = if verbose {
                LevelFilter::Debug
            } else {
                LevelFilter::Info
            };
            WriteLogger::init(level, Config::default(), file)
        }
        // stdout carries the command's output, so stay quiet on stderr
        Command::Leaderboard | Command::Submit { .. } => {
            let level = if verbose {
                LevelFilter::Debug
            } else {
                LevelFilter::Warn
            };
            TermLogger::init(
                level,
                Config::default(),
                TerminalMode::Stderr,
                ColorChoice::Auto,
            )
        }
    };

    result.context("Failed to initialize logger")
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let command = cli.command.unwrap_or(Command::Play);
    init_logging(&command, &cli.log_file, cli.verbose)?;

    let leaderboard = cli.leaderboard.as_deref();

    match command {
        Command::Play => {
            let config = GameConfig::new(cli.width, cli.height);
            anyhow::ensure!(
                config.is_playable(),
                "A {}x{} board is not playable (at least 2 columns and 3 cells, at most {} per side)",
                cli.width,
                cli.height,
                MAX_GRID_SIDE
            );

            let mut human_mode = HumanMode::new(config, leaderboard);
            human_mode.run().await?;
        }
        Command::Leaderboard => modes::show_leaderboard(leaderboard)?,
        Command::Submit { name, score } => modes::submit_score(leaderboard, &name, score)?,
    }

    Ok(())
}
