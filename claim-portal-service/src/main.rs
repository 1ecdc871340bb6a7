use std::net::SocketAddr;

use anyhow::Context;
use claim_flow::ClaimSource;
use claim_portal_service::{PortalConfig, create_app, spawn_session_sweeper, telemetry};
use tokio::net::TcpListener;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = PortalConfig::from_env().context("invalid configuration")?;
    telemetry::init_tracing(config.log_format);

    let (app, app_state) = create_app(&config).context("failed to load claim dataset")?;

    let sweeper = spawn_session_sweeper(
        app_state.session_storage.clone(),
        config.session_idle_timeout,
        config.session_sweep_interval,
    );

    let addr = SocketAddr::new(config.bind_addr, config.port);
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;

    info!(
        addr = %listener.local_addr()?,
        claims = app_state.dataset.len(),
        idle_timeout_secs = config.session_idle_timeout.as_secs(),
        "Claim portal running"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            info!("Shutdown signal received");
        })
        .await?;

    sweeper.abort();
    Ok(())
}
