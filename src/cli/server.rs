use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use lunchboard_menu::{MenuFetcher, MenuService};
use tower_http::{compression::CompressionLayer, trace::TraceLayer};

use crate::routes::AppState;

pub async fn serve(
    config: crate::config::Config,
    host_override: Option<String>,
    port_override: Option<u16>,
) -> Result<()> {
    tracing::info!("Starting lunchboard server...");

    // Use CLI overrides if provided, otherwise use config
    let host = host_override.unwrap_or(config.server.host.to_owned());
    let port = port_override.unwrap_or(config.server.port);

    let fetcher = MenuFetcher::new(
        &config.upstream.root_url,
        Duration::from_secs(config.upstream.cache_ttl_seconds),
        Duration::from_secs(config.upstream.timeout_seconds),
    )?;
    let menu = MenuService::new(Arc::new(fetcher));

    tracing::info!(
        upstream = %config.upstream.root_url,
        cache_ttl = config.upstream.cache_ttl_seconds,
        timezone = %config.menu.timezone,
        "Menu service ready"
    );

    let state = AppState { config, menu };

    let app = crate::routes::router(state)
        .layer(CompressionLayer::new().gzip(true))
        .layer(TraceLayer::new_for_http());

    let addr = format!("{}:{}", host, port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on {}", listener.local_addr()?);

    // Shut down cleanly on Ctrl+C or SIGTERM.
    let shutdown_signal = async {
        let ctrl_c = async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::error!("failed to install Ctrl+C handler: {e}");
            }
        };

        #[cfg(unix)]
        let terminate = async {
            match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
                Ok(mut sig) => {
                    sig.recv().await;
                }
                Err(e) => tracing::error!("failed to install SIGTERM handler: {e}"),
            }
        };

        #[cfg(not(unix))]
        let terminate = std::future::pending::<()>();

        tokio::select! {
            _ = ctrl_c => {
                tracing::info!("Received Ctrl+C signal");
            },
            _ = terminate => {
                tracing::info!("Received SIGTERM signal");
            },
        }

        tracing::info!("Starting graceful shutdown...");
    };

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal)
        .await?;

    tracing::info!("Graceful shutdown complete");

    Ok(())
}
