use crate::{
    abstract_trait::inventory::InventoryClientTrait, errors::ClientError, service::HttpTransport,
};
use async_trait::async_trait;
use opentelemetry::KeyValue;
use shared::{
    domain::{requests::UpdateInventoryRequest, responses::UpdateInventoryResponse},
    model::{Inventory, InventoryOp},
    utils::Method,
};
use tracing::info;

#[derive(Debug, Clone)]
pub struct InventoryClientService {
    transport: HttpTransport,
}

impl InventoryClientService {
    pub fn new(transport: HttpTransport) -> Self {
        Self { transport }
    }
}

#[async_trait]
impl InventoryClientTrait for InventoryClientService {
    async fn get(&self, product_id: &str) -> Result<Inventory, ClientError> {
        info!("Retrieving inventory for product {product_id}");

        let url = self.transport.endpoint(&["api", "inventory", product_id])?;

        self.transport
            .execute(
                "GetInventory",
                Method::Get,
                self.transport.request(Method::Get, url),
                vec![
                    KeyValue::new("component", "inventory"),
                    KeyValue::new("operation", "get"),
                    KeyValue::new("product.id", product_id.to_string()),
                ],
            )
            .await
    }

    async fn update(
        &self,
        product_id: &str,
        quantity: i64,
        operation: InventoryOp,
    ) -> Result<UpdateInventoryResponse, ClientError> {
        info!("Applying {operation} of {quantity} to product {product_id}");

        let url = self.transport.endpoint(&["api", "inventory", "update"])?;
        let body = UpdateInventoryRequest {
            product_id: product_id.to_string(),
            quantity,
            operation,
        };

        let response: UpdateInventoryResponse = self
            .transport
            .execute(
                "UpdateInventory",
                Method::Post,
                self.transport.request(Method::Post, url).json(&body),
                vec![
                    KeyValue::new("component", "inventory"),
                    KeyValue::new("operation", operation.as_str()),
                    KeyValue::new("product.id", product_id.to_string()),
                    KeyValue::new("quantity", quantity),
                ],
            )
            .await?;

        info!(
            "Inventory for {product_id} now at {}",
            response.new_quantity
        );
        Ok(response)
    }
}
