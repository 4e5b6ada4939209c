use crate::errors::ClientError;
use async_trait::async_trait;
use shared::{
    domain::{
        requests::CreateOrderRequest,
        responses::{CreateOrderResponse, SuccessResponse},
    },
    model::{Order, OrderStatus},
};
use std::sync::Arc;

pub type DynOrderClient = Arc<dyn OrderClientTrait + Send + Sync>;

#[async_trait]
pub trait OrderClientTrait {
    async fn create(&self, req: &CreateOrderRequest) -> Result<CreateOrderResponse, ClientError>;
    async fn get(&self, id: &str) -> Result<Order, ClientError>;
    async fn update_status(
        &self,
        id: &str,
        status: OrderStatus,
    ) -> Result<SuccessResponse, ClientError>;
}
