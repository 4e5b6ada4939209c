use crate::{middleware::validate::SimpleValidatedJson, repository::InMemoryStore, state::AppState};
use axum::{
    Extension, Json, Router,
    extract::Path,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post, put},
};
use shared::{
    domain::{
        requests::{CreateOrderRequest, UpdateOrderStatusRequest},
        responses::{CreateOrderResponse, SuccessResponse},
    },
    errors::HttpError,
};
use std::sync::Arc;

pub async fn create_order(
    Extension(store): Extension<Arc<InMemoryStore>>,
    SimpleValidatedJson(body): SimpleValidatedJson<CreateOrderRequest>,
) -> Result<impl IntoResponse, HttpError> {
    let order = store.create_order(&body).await;

    Ok((
        StatusCode::CREATED,
        Json(CreateOrderResponse {
            order_id: order.order_id,
            status: order.status,
        }),
    ))
}

pub async fn get_order(
    Extension(store): Extension<Arc<InMemoryStore>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, HttpError> {
    let order = store.find_order(&id).await?;
    Ok((StatusCode::OK, Json(order)))
}

pub async fn update_order_status(
    Extension(store): Extension<Arc<InMemoryStore>>,
    Path(id): Path<String>,
    SimpleValidatedJson(body): SimpleValidatedJson<UpdateOrderStatusRequest>,
) -> Result<impl IntoResponse, HttpError> {
    store.update_order_status(&id, body.status).await?;
    Ok((StatusCode::OK, Json(SuccessResponse::ok())))
}

pub fn order_routes(app_state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/orders", post(create_order))
        .route("/api/orders/{id}", get(get_order))
        .route("/api/orders/{id}/status", put(update_order_status))
        .layer(Extension(app_state.store.clone()))
}
