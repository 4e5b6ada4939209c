use crate::{abstract_trait::order::OrderClientTrait, errors::ClientError, service::HttpTransport};
use async_trait::async_trait;
use opentelemetry::KeyValue;
use shared::{
    domain::{
        requests::{CreateOrderRequest, UpdateOrderStatusRequest},
        responses::{CreateOrderResponse, SuccessResponse},
    },
    model::{Order, OrderStatus},
    utils::Method,
};
use tracing::info;

#[derive(Debug, Clone)]
pub struct OrderClientService {
    transport: HttpTransport,
}

impl OrderClientService {
    pub fn new(transport: HttpTransport) -> Self {
        Self { transport }
    }
}

#[async_trait]
impl OrderClientTrait for OrderClientService {
    async fn create(&self, req: &CreateOrderRequest) -> Result<CreateOrderResponse, ClientError> {
        info!(
            "Creating order for customer {} with {} items",
            req.customer_id,
            req.items.len()
        );

        let url = self.transport.endpoint(&["api", "orders"])?;

        let response: CreateOrderResponse = self
            .transport
            .execute(
                "CreateOrder",
                Method::Post,
                self.transport.request(Method::Post, url).json(req),
                vec![
                    KeyValue::new("component", "order"),
                    KeyValue::new("operation", "create"),
                    KeyValue::new("customer.id", req.customer_id.clone()),
                    KeyValue::new("items", req.items.len() as i64),
                ],
            )
            .await?;

        info!(
            "Created order {} with status {}",
            response.order_id, response.status
        );
        Ok(response)
    }

    async fn get(&self, id: &str) -> Result<Order, ClientError> {
        info!("Retrieving order {id}");

        let url = self.transport.endpoint(&["api", "orders", id])?;

        self.transport
            .execute(
                "GetOrder",
                Method::Get,
                self.transport.request(Method::Get, url),
                vec![
                    KeyValue::new("component", "order"),
                    KeyValue::new("operation", "get"),
                    KeyValue::new("order.id", id.to_string()),
                ],
            )
            .await
    }

    async fn update_status(
        &self,
        id: &str,
        status: OrderStatus,
    ) -> Result<SuccessResponse, ClientError> {
        info!("Updating order {id} to {status}");

        let url = self.transport.endpoint(&["api", "orders", id, "status"])?;
        let body = UpdateOrderStatusRequest { status };

        self.transport
            .execute(
                "UpdateOrderStatus",
                Method::Put,
                self.transport.request(Method::Put, url).json(&body),
                vec![
                    KeyValue::new("component", "order"),
                    KeyValue::new("operation", "update_status"),
                    KeyValue::new("order.id", id.to_string()),
                    KeyValue::new("order.status", status.as_str()),
                ],
            )
            .await
    }
}
