mod singleton;

use anyhow::Result;
use monthplan_core::PlannerConfig;
use monthplan_server::{app, state::AppState};
use std::net::SocketAddr;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "monthplan=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = PlannerConfig::load()?;

    // Ensure only one instance serves this data directory
    let _lock = singleton::acquire_lock(&config.data_path())?;

    let state = AppState::from_config(&config)?;
    info!(
        timezone = %config.timezone,
        data_dir = %config.data_path().display(),
        "Loaded configuration"
    );

    let addr = SocketAddr::from(([127, 0, 0, 1], config.port));
    info!("monthplan-server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app(state)).await?;

    Ok(())
}
