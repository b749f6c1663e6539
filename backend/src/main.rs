use anyhow::Context;
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use kakeibo_backend::config::Config;
use kakeibo_backend::{create_router, initialize_backend};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_new(&config.log_filter)
                .with_context(|| format!("Invalid log filter '{}'", config.log_filter))?,
        )
        .init();

    let app_state = initialize_backend(&config).await?;
    let app = create_router(app_state, config.cors_origin_header()?, config.static_dir.as_deref());

    info!("Starting server on {}", config.bind);
    let listener = tokio::net::TcpListener::bind(config.bind)
        .await
        .with_context(|| format!("Failed to bind {}", config.bind))?;
    info!("Listening on {}", config.bind);

    axum::serve(listener, app).await?;

    Ok(())
}
