use crate::{di::DependenciesInject, service::HttpTransport};
use anyhow::{Context, Result};
use prometheus_client::{encoding::text::encode, registry::Registry};
use shared::{config::Config, utils::Metrics};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::info;

#[derive(Clone)]
pub struct AppState {
    pub di_container: DependenciesInject,
    pub registry: Arc<Mutex<Registry>>,
    pub metrics: Arc<Mutex<Metrics>>,
}

impl AppState {
    pub async fn new(config: &Config) -> Result<Self> {
        let registry = Arc::new(Mutex::new(Registry::default()));
        let metrics = Arc::new(Mutex::new(Metrics::new()));

        metrics
            .lock()
            .await
            .register(&mut *registry.lock().await, "storefront_client");

        info!("Using storefront API at {}", config.api_url);

        let transport = HttpTransport::new(config, metrics.clone())
            .context("Failed to build HTTP transport")?;

        let di_container = DependenciesInject::new(transport);

        Ok(Self {
            di_container,
            registry,
            metrics,
        })
    }

    pub async fn render_metrics(&self) -> Result<String> {
        let mut buffer = String::new();
        let registry = self.registry.lock().await;
        encode(&mut buffer, &registry).context("Failed to encode metrics")?;
        Ok(buffer)
    }
}
