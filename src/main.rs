use cinetrack::logging::{init_tracing, shutdown_tracer};
use cinetrack::metrics::{init_metrics, metrics_app};
use cinetrack::router::init_router;
use cinetrack::state::init_app_state;
use cinetrack_config::ServerConfig;
use dotenvy::dotenv;
use tracing::{error, info};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    let server = ServerConfig::from_env();
    init_tracing(&server.log_dir)?;

    match init_metrics() {
        Ok(Some(handle)) => {
            let metrics_addr = format!("0.0.0.0:{}", server.metrics_port);
            let listener = tokio::net::TcpListener::bind(&metrics_addr).await?;
            info!("📈 Metrics available at http://{}/metrics", metrics_addr);
            tokio::spawn(async move {
                if let Err(e) = axum::serve(listener, metrics_app(handle)).await {
                    error!(error = %e, "Metrics server stopped");
                }
            });
        }
        Ok(None) => info!("Observability disabled; metrics server not started"),
        Err(e) => error!(error = %e, "Failed to install metrics recorder"),
    }

    let state = init_app_state(&server).await?;
    let app = init_router(state);

    let listener = tokio::net::TcpListener::bind(&server.addr).await?;
    info!("🚀 Server running on http://{}", server.addr);
    info!("📖 Scalar UI available at http://{}/scalar", server.addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    shutdown_tracer().await;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!(error = %e, "Failed to listen for shutdown signal");
    }
    info!("Shutdown signal received");
}
