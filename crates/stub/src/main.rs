use anyhow::{Context, Result};
use dotenv::dotenv;
use shared::utils::init_logger;
use storefront_stub::{config::ServerConfig, handler::AppRouter, state::AppState};
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();

    let config = ServerConfig::init().context("Failed to load configuration")?;

    let _guard = init_logger(
        None,
        "storefront-stub",
        config.is_dev,
        config.enable_file_log,
    )?;

    AppRouter::serve(config.port, AppState::new())
        .await
        .context("Failed to start server")?;

    info!("Storefront stub stopped");

    Ok(())
}
