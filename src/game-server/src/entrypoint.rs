use rps_common::model::series::SeriesState;
use tokio::sync::{broadcast, oneshot};
use tracing::{info, Level};

use crate::service::game_manager::{ComputerSource, GameManager};

#[derive(Clone, Debug)]
pub struct GameServerConfig {
    pub address: String,
    pub default_best_of: i64,
    /// Live sessions held at once; finished ones are evicted to make room.
    pub max_sessions: usize,
}

/// Binds `config.address`, signals `ready_signal` once the listener is bound,
/// then serves until `shutdown_receiver` fires.
pub async fn serve(
    config: GameServerConfig,
    source: ComputerSource,
    shutdown_receiver: broadcast::Receiver<()>,
    ready_signal: Option<oneshot::Sender<()>>,
) -> anyhow::Result<()> {
    // Reject a bad default before accepting any traffic
    SeriesState::new(config.default_best_of)?;
    anyhow::ensure!(config.max_sessions > 0, "max_sessions must be at least 1");

    let listener = tokio::net::TcpListener::bind(&config.address).await?;
    let manager = GameManager::new(config.default_best_of, config.max_sessions, source);

    // Signal that the server is ready
    if let Some(ready_signal) = ready_signal {
        info!("Sent ready");
        if ready_signal.send(()).is_err() {
            anyhow::bail!("ready receiver dropped");
        }
    }

    manager.run(listener, shutdown_receiver).await?;
    Ok(())
}

pub struct GameServer {
    pub address: String,
    shutdown_sender: broadcast::Sender<()>,
}

impl GameServer {
    pub async fn new(config: GameServerConfig, source: ComputerSource) -> Self {
        // Init logging, ignore error if already set
        let _ = tracing_subscriber::fmt()
            .with_line_number(true)
            .with_file(true)
            .with_max_level(Level::DEBUG)
            .try_init();

        // Create server
        let (shutdown_sender, shutdown_receiver) = broadcast::channel(1);
        let (ready_sender, ready_receiver) = oneshot::channel();

        let address = config.address.clone();
        tokio::spawn(async move {
            if let Err(e) = serve(config, source, shutdown_receiver, Some(ready_sender)).await {
                tracing::error!("Game server exited: {:?}", e);
            }
        });

        // Wait for server to be ready
        ready_receiver.await.expect("Server failed to start");

        GameServer {
            shutdown_sender,
            address,
        }
    }

    pub async fn shutdown(&self) {
        self.shutdown_sender.send(()).expect("Failed to shutdown");
    }
}
