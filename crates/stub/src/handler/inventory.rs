use crate::{middleware::validate::SimpleValidatedJson, repository::InMemoryStore, state::AppState};
use axum::{
    Extension, Json, Router,
    extract::Path,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use shared::{
    domain::{requests::UpdateInventoryRequest, responses::UpdateInventoryResponse},
    errors::HttpError,
};
use std::sync::Arc;

pub async fn get_inventory(
    Extension(store): Extension<Arc<InMemoryStore>>,
    Path(product_id): Path<String>,
) -> Result<impl IntoResponse, HttpError> {
    let inventory = store.find_inventory(&product_id).await?;
    Ok((StatusCode::OK, Json(inventory)))
}

pub async fn update_inventory(
    Extension(store): Extension<Arc<InMemoryStore>>,
    SimpleValidatedJson(body): SimpleValidatedJson<UpdateInventoryRequest>,
) -> Result<impl IntoResponse, HttpError> {
    let inventory = store
        .apply_inventory(&body.product_id, body.quantity, body.operation)
        .await?;

    Ok((
        StatusCode::OK,
        Json(UpdateInventoryResponse {
            success: true,
            new_quantity: inventory.available_quantity,
        }),
    ))
}

pub fn inventory_routes(app_state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/inventory/update", post(update_inventory))
        .route("/api/inventory/{id}", get(get_inventory))
        .layer(Extension(app_state.store.clone()))
}
