mod handlers;
mod router;
mod state;

pub use router::create_router;
pub use state::AppState;

use crate::config::toml_config::TomlConfig;
use crate::utils::error::Result;
use tokio::net::TcpListener;

/// Run the HTTP server until Ctrl-C
pub async fn run(config: TomlConfig) -> Result<()> {
    let listener = TcpListener::bind(config.server_addr()).await?;
    tracing::info!("matrix-csv server listening on http://{}", listener.local_addr()?);

    serve(listener, config, async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for shutdown signal: {}", e);
        }
        tracing::info!("Shutdown signal received");
    })
    .await
}

/// Serve on an already bound listener until `shutdown` resolves.
pub async fn serve<F>(listener: TcpListener, config: TomlConfig, shutdown: F) -> Result<()>
where
    F: std::future::Future<Output = ()> + Send + 'static,
{
    let state = AppState::new(config)?;
    let router = create_router(state);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown)
        .await?;

    Ok(())
}
