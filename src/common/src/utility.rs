use tokio::{net::UdpSocket, signal, sync::broadcast};

/// Broadcasts once on Ctrl+C or SIGTERM.
pub async fn create_shutdown_channel() -> broadcast::Receiver<()> {
    let (shutdown_sender, shutdown_receiver) = broadcast::channel::<()>(100);
    tokio::spawn(async move {
        shutdown_signal().await;
        if shutdown_sender.send(()).is_err() {
            tracing::warn!("No listeners left for shutdown signal");
        }
    });
    shutdown_receiver
}

// Source: https://pg3.dev/post/7
pub async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("signal received, starting graceful shutdown");
}

/// A free local address, for tests that need their own server.
pub async fn random_address() -> String {
    let socket = UdpSocket::bind("127.0.0.1:0")
        .await
        .expect("Failed to get random port");
    socket
        .local_addr()
        .expect("Failed to unwrap local address")
        .to_string()
}
