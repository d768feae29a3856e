//! Quote service: REST API for life-insurance quote requests.

use quote_service::config::Config;
use quote_service::startup::build_app;
use quote_telemetry::{TelemetryConfig, setup_telemetry};
use tokio::signal;
use tracing::{error, info};

/// Build version (injected at compile time).
const VERSION: &str = env!("CARGO_PKG_VERSION");

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::init()?;

    let telemetry = setup_telemetry(&TelemetryConfig {
        log_level: config.log_level.clone(),
        json_logs: config.json_logs,
        otlp_endpoint: config.otlp_endpoint.clone(),
        environment: config.environment.clone(),
        version: Some(VERSION.to_string()),
    })?;

    info!(
        version = VERSION,
        address = %config.http_address,
        database = config.db_url.is_some(),
        otlp = config.otlp_endpoint.is_some(),
        pid = std::process::id(),
        "Starting quote-service"
    );

    let (app, addr) = match build_app(&config).await {
        Ok(built) => built,
        Err(e) => {
            error!(error = %e, "Startup failed");
            telemetry.shutdown();
            return Err(e);
        }
    };

    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(address = %addr, "Server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    telemetry.shutdown();
    info!("Shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => info!("Received Ctrl+C, shutting down"),
        () = terminate => info!("Received SIGTERM, shutting down"),
    }
}
