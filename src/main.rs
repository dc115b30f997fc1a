//! Command-line front end.
//!
//! - `simulate`: play one game, print it, write every report
//! - `matrix`: redraw the matrix chart from an existing `game_log.txt`
//! - `batch`: play many games and print aggregate statistics
//!
//! Logging goes to stderr; set `RUST_LOG` to change the level.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::EnvFilter;

use white_elephant::report::{self, charts, text};
use white_elephant::{run_batch, GameConfig, WhiteElephant};

/// White Elephant gift exchange simulator
#[derive(Parser)]
#[command(name = "white-elephant")]
#[command(about = "Simulate a White Elephant gift exchange", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Parser)]
enum Command {
    /// Play one game and write its log, records and charts
    Simulate(Simulate),

    /// Draw the game matrix from an existing game log
    Matrix(Matrix),

    /// Play many games and print aggregate statistics
    Batch(Batch),
}

fn load_config(path: Option<&Path>) -> Result<GameConfig> {
    match path {
        Some(path) => GameConfig::load(path)
            .with_context(|| format!("Failed to load config {}", path.display())),
        None => Ok(GameConfig::default()),
    }
}

#[derive(Parser)]
struct Simulate {
    /// Directory for game_log.txt, records and charts
    #[arg(short, long, value_name = "DIR", default_value = ".")]
    output: PathBuf,

    /// Seed for the random stream (overrides the config file)
    #[arg(long, value_name = "N")]
    seed: Option<u64>,

    /// TOML game configuration
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,
}

impl Simulate {
    fn execute(self) -> Result<()> {
        let mut config = load_config(self.config.as_deref())?;
        if let Some(seed) = self.seed {
            config = config.with_seed(seed);
        }

        let record = WhiteElephant::new(config)
            .context("Invalid game configuration")?
            .play()
            .context("Game engine failure")?;
        tracing::info!(
            seed = record.config.seed,
            steals = record.summary.stats.steals,
            "game finished"
        );

        let stdout = io::stdout();
        let mut out = stdout.lock();
        text::write_turn_log(&mut out, &record)?;
        text::write_console_summary(&mut out, &record.summary)?;

        writeln!(out, "\nCreating reports...")?;
        let written = report::write_all(&self.output, &record)
            .with_context(|| format!("Failed to write reports to {}", self.output.display()))?;
        for path in written {
            writeln!(out, "✓ {}", path.display())?;
        }
        Ok(())
    }
}

#[derive(Parser)]
struct Matrix {
    /// Directory for the matrix chart
    #[arg(short, long, value_name = "DIR", default_value = ".")]
    output: PathBuf,

    /// Text game log to read (defaults to DIR/game_log.txt)
    #[arg(long, value_name = "FILE")]
    game_log: Option<PathBuf>,

    /// TOML game configuration the log was produced with
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,
}

impl Matrix {
    fn execute(self) -> Result<()> {
        let config = load_config(self.config.as_deref())?;
        let registry = config.validate().context("Invalid game configuration")?;

        let log_path = self
            .game_log
            .unwrap_or_else(|| self.output.join(report::GAME_LOG_FILE));
        let contents = fs::read_to_string(&log_path)
            .with_context(|| format!("Failed to read {}", log_path.display()))?;
        let states =
            text::parse_game_log(&contents, &registry, config.players, config.lock_threshold)
                .with_context(|| format!("Failed to parse {}", log_path.display()))?;

        fs::create_dir_all(&self.output)
            .with_context(|| format!("Failed to create {}", self.output.display()))?;
        let path = self.output.join(charts::MATRIX_FILE);
        fs::write(&path, charts::matrix_chart(&states, &registry))
            .with_context(|| format!("Failed to write {}", path.display()))?;

        println!("✓ Matrix visualization created with {} states!", states.len());
        println!("  Saved to {}", path.display());
        Ok(())
    }
}

#[derive(Parser)]
struct Batch {
    /// Number of games
    #[arg(long, value_name = "N", default_value_t = 1000)]
    games: usize,

    /// Seed for the batch stream (overrides the config file)
    #[arg(long, value_name = "N")]
    seed: Option<u64>,

    /// TOML game configuration
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Print the report as JSON
    #[arg(long)]
    json: bool,
}

impl Batch {
    fn execute(self) -> Result<()> {
        let config = load_config(self.config.as_deref())?;
        let seed = self.seed.unwrap_or(config.seed);
        let report = run_batch(&config, self.games, seed).context("Batch run failed")?;

        if self.json {
            println!("{}", serde_json::to_string_pretty(&report)?);
            return Ok(());
        }

        println!("{} games (seed {})", report.games, report.seed);
        println!("  mean steals per game:  {:.2}", report.mean_steals);
        println!("  mean longest chain:    {:.2}", report.mean_longest_chain);
        println!("  longest chain seen:    {}", report.max_chain);
        println!("  games with leftovers:  {}", report.unclean_games);
        println!();
        println!(
            "{:<6} {:<24} {:>6} {:>12} {:>10}",
            "Gift", "Name", "Value", "Mean steals", "Lock rate"
        );
        for gift in &report.gifts {
            println!(
                "{:<6} {:<24} {:>6} {:>12.2} {:>9.1}%",
                gift.id.to_string(),
                gift.name,
                gift.desirability,
                gift.mean_steals,
                gift.lock_rate * 100.0
            );
        }
        Ok(())
    }
}

/// Log filter from `RUST_LOG`-style directives, `info` when none are given.
fn log_filter(directives: Option<&str>) -> EnvFilter {
    EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .parse_lossy(directives.unwrap_or_default())
}

fn main() -> Result<()> {
    let directives = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    tracing_subscriber::fmt()
        .with_env_filter(log_filter(directives.as_deref()))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Simulate(cmd) => cmd.execute(),
        Command::Matrix(cmd) => cmd.execute(),
        Command::Batch(cmd) => cmd.execute(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_filter_defaults_to_info() {
        assert_eq!(log_filter(None).max_level_hint(), Some(LevelFilter::INFO));
        assert_eq!(log_filter(Some("")).max_level_hint(), Some(LevelFilter::INFO));
    }

    #[test]
    fn test_log_filter_honours_directives() {
        assert_eq!(log_filter(Some("debug")).max_level_hint(), Some(LevelFilter::DEBUG));
        assert_eq!(log_filter(Some("warn")).max_level_hint(), Some(LevelFilter::WARN));
        assert_eq!(
            log_filter(Some("white_elephant=trace")).max_level_hint(),
            Some(LevelFilter::TRACE)
        );
    }
}
