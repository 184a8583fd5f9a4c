use std::{io, process::ExitCode};

use clap::Parser;
use rps_common::choice::RngSource;
use rps_console::prompt::{ConsoleConfig, ConsoleGame};
use tracing::Level;

/// Plays a best-of-N series of Rock, Paper, Scissors against the computer.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Number of non-tied rounds in the series (positive, odd)
    #[arg(long, default_value_t = 5, allow_negative_numbers = true)]
    best_of: i64,
    /// Seed for the computer's choices
    #[arg(long)]
    seed: Option<u64>,
}

impl From<Args> for ConsoleConfig {
    fn from(args: Args) -> Self {
        ConsoleConfig {
            best_of: args.best_of,
            seed: args.seed,
        }
    }
}

fn main() -> anyhow::Result<ExitCode> {
    // Logs go to stderr so they don't interleave with the prompt
    tracing_subscriber::fmt()
        .with_line_number(true)
        .with_file(true)
        .with_max_level(Level::WARN)
        .with_writer(io::stderr)
        .init();
    let config = ConsoleConfig::from(Args::parse());

    let result = ConsoleGame::new(
        io::stdin().lock(),
        io::stdout().lock(),
        RngSource::std(config.seed),
    )
    .play_series(config.best_of)?;
    if result.is_player_winning {
        println!("You won the series!");
        Ok(ExitCode::SUCCESS)
    } else {
        println!("You lost the series.");
        Ok(ExitCode::FAILURE)
    }
}
