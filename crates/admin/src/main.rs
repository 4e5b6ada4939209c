use anyhow::{Context, Result};
use clap::Parser;
use dotenv::dotenv;
use shared::{
    config::Config,
    utils::{Telemetry, init_logger},
};
use storefront_admin::commands::{Cli, run};
use storefront_client::state::AppState;
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();

    let cli = Cli::parse();

    let mut config = Config::init().context("Failed to load configuration")?;
    if let Some(base_url) = &cli.base_url {
        config = config
            .with_api_url(base_url)
            .context("Invalid --base-url")?;
    }

    let telemetry = match &config.otel_endpoint {
        Some(endpoint) => Some(
            Telemetry::init("storefront-admin", endpoint)
                .context("Failed to initialize telemetry")?,
        ),
        None => None,
    };

    let _guard = init_logger(
        telemetry.as_ref().map(Telemetry::logger_provider),
        "storefront-admin",
        config.is_dev,
        config.enable_file_log,
    )?;

    let state = AppState::new(&config)
        .await
        .context("Failed to create AppState")?;

    let outcome = run(cli.command, &state).await;

    if let Ok(output) = &outcome {
        println!("{output}");
    }

    if cli.metrics {
        print!("{}", state.render_metrics().await?);
    }

    if let Some(telemetry) = telemetry {
        info!("Shutting down telemetry...");
        telemetry.shutdown()?;
    }

    outcome.map(|_| ())
}
