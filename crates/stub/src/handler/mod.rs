mod inventory;
mod order;
mod product;

use crate::state::AppState;
use anyhow::{Context, Result};
use axum::{Router, extract::DefaultBodyLimit};
use shared::utils::shutdown_signal;
use std::{future::Future, sync::Arc};
use tokio::net::TcpListener;
use tower_http::{limit::RequestBodyLimitLayer, trace::TraceLayer};
use tracing::info;

pub use self::inventory::inventory_routes;
pub use self::order::order_routes;
pub use self::product::product_routes;

const MAX_BODY_BYTES: usize = 1024 * 1024;

pub struct AppRouter;

impl AppRouter {
    pub fn build(app_state: AppState) -> Router {
        let shared_state = Arc::new(app_state);

        Router::new()
            .merge(product_routes(shared_state.clone()))
            .merge(order_routes(shared_state.clone()))
            .merge(inventory_routes(shared_state))
            .layer(DefaultBodyLimit::disable())
            .layer(RequestBodyLimitLayer::new(MAX_BODY_BYTES))
            .layer(TraceLayer::new_for_http())
    }

    /// Serves on an already bound listener until `shutdown` resolves.
    pub async fn run<F>(listener: TcpListener, app_state: AppState, shutdown: F) -> Result<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let app = Self::build(app_state);

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown)
            .await
            .context("Server terminated unexpectedly")
    }

    pub async fn serve(port: u16, app_state: AppState) -> Result<()> {
        let addr = format!("0.0.0.0:{port}");
        let listener = TcpListener::bind(&addr)
            .await
            .with_context(|| format!("Failed to bind {addr}"))?;

        info!("🚀 Storefront stub listening on http://{}", listener.local_addr()?);

        Self::run(listener, app_state, shutdown_signal()).await
    }
}
