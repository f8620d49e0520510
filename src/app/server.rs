use axum::Router;
use tokio::signal;
use tracing::{info, warn};

use crate::error::DetectorError;

/// Bind `address` and serve `app` until SIGINT or SIGTERM.
pub async fn serve(app: Router, address: &str) -> Result<(), DetectorError> {
    let listener = tokio::net::TcpListener::bind(address)
        .await
        .map_err(|e| DetectorError::Bind {
            address: address.to_string(),
            source: e,
        })?;
    info!("Server listening on {}", listener.local_addr()?);
    info!("  - GET  /             (prediction form)");
    info!("  - POST /             (form submission)");
    info!("  - POST /v1/predict   (JSON prediction)");
    info!("  - GET  /v1/health    (health check)");
    info!("  - GET  /metrics      (Prometheus metrics)");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shutdown complete");
    Ok(())
}

/// Wait for SIGTERM or SIGINT (Ctrl+C) for graceful shutdown.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            warn!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                warn!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => info!("Received SIGINT, initiating graceful shutdown"),
        () = terminate => info!("Received SIGTERM, initiating graceful shutdown"),
    }
}
