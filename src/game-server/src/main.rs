use clap::Parser;
use rps_common::{choice::RngSource, utility::create_shutdown_channel};
use rps_server::entrypoint::{serve, GameServerConfig};
use tracing::Level;

/// Serves Rock, Paper, Scissors series over HTTP.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Address to listen on
    #[arg(long, default_value = "0.0.0.0:8082")]
    address: String,
    /// Rounds per series when a new game does not say otherwise (positive, odd)
    #[arg(long, default_value_t = 5, allow_negative_numbers = true)]
    best_of: i64,
    /// Most sessions held at once
    #[arg(long, default_value_t = 1024)]
    max_sessions: usize,
    /// Seed for the computer's choices
    #[arg(long)]
    seed: Option<u64>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_line_number(true)
        .with_file(true)
        .with_max_level(Level::DEBUG)
        .init();
    let args = Args::parse();
    let config = GameServerConfig {
        address: args.address,
        default_best_of: args.best_of,
        max_sessions: args.max_sessions,
    };
    let shutdown_receiver = create_shutdown_channel().await;
    serve(
        config,
        Box::new(RngSource::std(args.seed)),
        shutdown_receiver,
        None,
    )
    .await
}
