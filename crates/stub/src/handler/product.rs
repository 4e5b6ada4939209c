use crate::{
    middleware::validate::{SimpleValidatedJson, ValidatedQuery},
    repository::InMemoryStore,
    state::AppState,
};
use axum::{
    Extension, Json, Router,
    extract::Path,
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use shared::{
    domain::{
        requests::{CreateProductRequest, FindAllProducts, UpdateProductRequest},
        responses::{CreateProductResponse, ProductListResponse, SuccessResponse},
    },
    errors::HttpError,
};
use std::sync::Arc;
use tracing::info;

pub async fn get_products(
    Extension(store): Extension<Arc<InMemoryStore>>,
    ValidatedQuery(params): ValidatedQuery<FindAllProducts>,
) -> Result<impl IntoResponse, HttpError> {
    let (products, total) = store.list_products(&params).await;
    Ok((StatusCode::OK, Json(ProductListResponse { products, total })))
}

pub async fn get_product(
    Extension(store): Extension<Arc<InMemoryStore>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, HttpError> {
    let product = store.find_product(&id).await?;
    Ok((StatusCode::OK, Json(product)))
}

pub async fn create_product(
    Extension(store): Extension<Arc<InMemoryStore>>,
    SimpleValidatedJson(body): SimpleValidatedJson<CreateProductRequest>,
) -> Result<impl IntoResponse, HttpError> {
    let product = store.create_product(&body).await;

    Ok((
        StatusCode::CREATED,
        Json(CreateProductResponse {
            product_id: product.product_id,
        }),
    ))
}

pub async fn update_product(
    Extension(store): Extension<Arc<InMemoryStore>>,
    Path(id): Path<String>,
    SimpleValidatedJson(body): SimpleValidatedJson<UpdateProductRequest>,
) -> Result<impl IntoResponse, HttpError> {
    let product = store.update_product(&id, &body).await?;
    info!("Product {} updated at {}", product.product_id, product.updated_at);

    Ok((StatusCode::OK, Json(SuccessResponse::ok())))
}

pub async fn delete_product(
    Extension(store): Extension<Arc<InMemoryStore>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, HttpError> {
    store.delete_product(&id).await?;
    Ok((StatusCode::OK, Json(SuccessResponse::ok())))
}

pub fn product_routes(app_state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/products", get(get_products).post(create_product))
        .route(
            "/api/products/{id}",
            get(get_product).put(update_product).delete(delete_product),
        )
        .layer(Extension(app_state.store.clone()))
}
