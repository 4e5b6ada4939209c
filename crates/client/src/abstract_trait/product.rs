use crate::errors::ClientError;
use async_trait::async_trait;
use shared::{
    domain::{
        requests::{CreateProductRequest, FindAllProducts, UpdateProductRequest},
        responses::{CreateProductResponse, ProductListResponse, SuccessResponse},
    },
    model::Product,
};
use std::sync::Arc;

pub type DynProductClient = Arc<dyn ProductClientTrait + Send + Sync>;

#[async_trait]
pub trait ProductClientTrait {
    async fn list(&self, req: &FindAllProducts) -> Result<ProductListResponse, ClientError>;
    async fn get(&self, id: &str) -> Result<Product, ClientError>;
    async fn create(&self, req: &CreateProductRequest)
    -> Result<CreateProductResponse, ClientError>;
    async fn update(
        &self,
        id: &str,
        req: &UpdateProductRequest,
    ) -> Result<SuccessResponse, ClientError>;
    async fn delete(&self, id: &str) -> Result<SuccessResponse, ClientError>;
}
