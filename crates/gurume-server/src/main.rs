mod api;
mod middleware;

use std::sync::Arc;

use gurume_hotpepper::{AmenityMapping, HotpepperClient};
use tracing_subscriber::EnvFilter;

use crate::api::{build_app, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = gurume_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    if config.hotpepper_api_key.is_none() {
        tracing::warn!("HOTPEPPER_API_KEY not set; search and shop lookups will fail");
    }

    let pool_config = gurume_db::PoolConfig::from_app_config(&config);
    let pool = gurume_db::connect_pool(&config.database_url, pool_config).await?;
    let applied = gurume_db::run_migrations(&pool).await?;
    tracing::info!(applied, "migrations up to date");

    let hotpepper = HotpepperClient::with_base_url(
        config.hotpepper_api_key.as_deref(),
        config.upstream_timeout_secs,
        &config.hotpepper_base_url,
    )?
    .with_amenity_mapping(AmenityMapping::from(config.amenity_mapping));

    let app = build_app(AppState {
        pool,
        hotpepper: Arc::new(hotpepper),
    });

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    tracing::info!(addr = %config.bind_addr, env = %config.env, "gurume-server listening");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to listen for ctrl-c");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("received shutdown signal, starting graceful shutdown");
}
