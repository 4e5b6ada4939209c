use crate::errors::ClientError;
use async_trait::async_trait;
use shared::{
    domain::responses::UpdateInventoryResponse,
    model::{Inventory, InventoryOp},
};
use std::sync::Arc;

pub type DynInventoryClient = Arc<dyn InventoryClientTrait + Send + Sync>;

#[async_trait]
pub trait InventoryClientTrait {
    async fn get(&self, product_id: &str) -> Result<Inventory, ClientError>;
    async fn update(
        &self,
        product_id: &str,
        quantity: i64,
        operation: InventoryOp,
    ) -> Result<UpdateInventoryResponse, ClientError>;
}
