use crate::repository::errors::RepositoryError;
use shared::{
    domain::requests::{
        CreateOrderRequest, CreateProductRequest, FindAllProducts, UpdateProductRequest,
    },
    model::{Inventory, InventoryOp, Order, OrderStatus, Product},
};
use std::collections::HashMap;
use tokio::sync::RwLock;
use tracing::{info, warn};

pub fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

#[derive(Debug, Default)]
struct StoreInner {
    next_product: u64,
    next_order: u64,
    // kept in insertion order; listing pages over it directly
    products: Vec<Product>,
    orders: HashMap<String, Order>,
    inventory: HashMap<String, Inventory>,
}

/// In-memory backing for every route of the server double.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    inner: RwLock<StoreInner>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn list_products(&self, req: &FindAllProducts) -> (Vec<Product>, u64) {
        let inner = self.inner.read().await;

        let matching: Vec<&Product> = inner
            .products
            .iter()
            .filter(|p| match &req.category {
                Some(category) => &p.category == category,
                None => true,
            })
            .collect();

        let total = matching.len() as u64;
        let page_size = req.page_size as usize;
        let offset = (req.page.saturating_sub(1) as usize).saturating_mul(page_size);

        let page = matching
            .into_iter()
            .skip(offset)
            .take(page_size)
            .cloned()
            .collect();

        (page, total)
    }

    pub async fn find_product(&self, id: &str) -> Result<Product, RepositoryError> {
        self.inner
            .read()
            .await
            .products
            .iter()
            .find(|p| p.product_id == id)
            .cloned()
            .ok_or_else(|| RepositoryError::NotFound(format!("Product {id}")))
    }

    pub async fn create_product(&self, req: &CreateProductRequest) -> Product {
        let mut inner = self.inner.write().await;
        let now = now_millis();

        inner.next_product += 1;
        let product_id = format!("p{}", inner.next_product);

        let product = Product {
            product_id: product_id.clone(),
            name: req.name.clone(),
            description: req.description.clone(),
            price: req.price,
            category: req.category.clone(),
            created_at: now,
            updated_at: now,
        };

        inner.products.push(product.clone());
        inner
            .inventory
            .insert(product_id.clone(), Inventory::empty(product_id.clone(), now));

        info!("Created product {product_id}");
        product
    }

    pub async fn update_product(
        &self,
        id: &str,
        req: &UpdateProductRequest,
    ) -> Result<Product, RepositoryError> {
        let mut inner = self.inner.write().await;

        let product = inner
            .products
            .iter_mut()
            .find(|p| p.product_id == id)
            .ok_or_else(|| RepositoryError::NotFound(format!("Product {id}")))?;

        if req.is_empty() {
            return Ok(product.clone());
        }

        if let Some(name) = &req.name {
            product.name = name.clone();
        }
        if let Some(description) = &req.description {
            product.description = description.clone();
        }
        if let Some(price) = req.price {
            product.price = price;
        }
        if let Some(category) = &req.category {
            product.category = category.clone();
        }
        product.updated_at = now_millis();

        Ok(product.clone())
    }

    pub async fn delete_product(&self, id: &str) -> Result<(), RepositoryError> {
        let mut inner = self.inner.write().await;

        let position = inner
            .products
            .iter()
            .position(|p| p.product_id == id)
            .ok_or_else(|| RepositoryError::NotFound(format!("Product {id}")))?;

        inner.products.remove(position);
        inner.inventory.remove(id);

        info!("Deleted product {id}");
        Ok(())
    }

    /// The total is computed here; callers cannot set it.
    pub async fn create_order(&self, req: &CreateOrderRequest) -> Order {
        let mut inner = self.inner.write().await;
        let now = now_millis();

        inner.next_order += 1;
        let order_id = format!("o{}", inner.next_order);

        let order = Order {
            order_id: order_id.clone(),
            customer_id: req.customer_id.clone(),
            items: req.items.clone(),
            status: OrderStatus::Pending,
            total_amount: req.items.iter().map(|item| item.line_total()).sum(),
            created_at: now,
            updated_at: now,
        };

        inner.orders.insert(order_id.clone(), order.clone());

        info!("Created order {order_id} for {}", req.customer_id);
        order
    }

    pub async fn find_order(&self, id: &str) -> Result<Order, RepositoryError> {
        self.inner
            .read()
            .await
            .orders
            .get(id)
            .cloned()
            .ok_or_else(|| RepositoryError::NotFound(format!("Order {id}")))
    }

    pub async fn update_order_status(
        &self,
        id: &str,
        status: OrderStatus,
    ) -> Result<Order, RepositoryError> {
        let mut inner = self.inner.write().await;

        let order = inner
            .orders
            .get_mut(id)
            .ok_or_else(|| RepositoryError::NotFound(format!("Order {id}")))?;

        if !order.status.can_transition_to(status) {
            warn!(
                "Rejected transition of order {id} from {} to {status}",
                order.status
            );
            return Err(RepositoryError::Conflict(format!(
                "Order {id} cannot move from {} to {status}",
                order.status
            )));
        }

        order.status = status;
        order.updated_at = now_millis();

        Ok(order.clone())
    }

    pub async fn find_inventory(&self, product_id: &str) -> Result<Inventory, RepositoryError> {
        self.inner
            .read()
            .await
            .inventory
            .get(product_id)
            .cloned()
            .ok_or_else(|| RepositoryError::NotFound(format!("Inventory for {product_id}")))
    }

    pub async fn apply_inventory(
        &self,
        product_id: &str,
        quantity: i64,
        op: InventoryOp,
    ) -> Result<Inventory, RepositoryError> {
        let mut inner = self.inner.write().await;

        let record = inner
            .inventory
            .get_mut(product_id)
            .ok_or_else(|| RepositoryError::NotFound(format!("Inventory for {product_id}")))?;

        let (available, reserved) = record.preview(quantity, op).ok_or_else(|| {
            RepositoryError::Conflict(format!(
                "Cannot {op} {quantity} for {product_id}: available {}, reserved {}",
                record.available_quantity, record.reserved_quantity
            ))
        })?;

        record.available_quantity = available;
        record.reserved_quantity = reserved;
        record.updated_at = now_millis();

        Ok(record.clone())
    }

    /// Overwrites the stock record of a product, creating it if needed.
    pub async fn seed_inventory(&self, product_id: &str, available: i64, reserved: i64) {
        let mut inner = self.inner.write().await;
        inner.inventory.insert(
            product_id.to_string(),
            Inventory {
                product_id: product_id.to_string(),
                available_quantity: available,
                reserved_quantity: reserved,
                updated_at: now_millis(),
            },
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::model::OrderItem;

    fn widget(category: &str) -> CreateProductRequest {
        CreateProductRequest {
            name: "Widget".into(),
            description: String::new(),
            price: 9.99,
            category: category.into(),
        }
    }

    #[tokio::test]
    async fn ids_are_sequential_and_seed_empty_stock() {
        let store = InMemoryStore::new();
        let first = store.create_product(&widget("tools")).await;
        let second = store.create_product(&widget("tools")).await;

        assert_eq!(first.product_id, "p1");
        assert_eq!(second.product_id, "p2");
        assert_eq!(first.created_at, first.updated_at);

        let stock = store.find_inventory("p1").await.unwrap();
        assert_eq!((stock.available_quantity, stock.reserved_quantity), (0, 0));
    }

    #[tokio::test]
    async fn listing_filters_then_paginates() {
        let store = InMemoryStore::new();
        for i in 0..5 {
            let category = if i % 2 == 0 { "tools" } else { "garden" };
            store.create_product(&widget(category)).await;
        }

        let (page, total) = store
            .list_products(&FindAllProducts::new(Some("tools"), 2, 2))
            .await;
        assert_eq!(total, 3);
        assert_eq!(page.len(), 1);
        assert_eq!(page[0].product_id, "p5");

        let (page, total) = store
            .list_products(&FindAllProducts::new(None, 1, 10))
            .await;
        assert_eq!(total, 5);
        assert_eq!(page.len(), 5);
    }

    #[tokio::test]
    async fn empty_update_changes_nothing() {
        let store = InMemoryStore::new();
        let created = store.create_product(&widget("tools")).await;

        let unchanged = store
            .update_product("p1", &UpdateProductRequest::default())
            .await
            .unwrap();
        assert_eq!(unchanged, created);
    }

    #[tokio::test]
    async fn delete_removes_product_and_stock() {
        let store = InMemoryStore::new();
        store.create_product(&widget("tools")).await;

        store.delete_product("p1").await.unwrap();
        assert!(store.find_product("p1").await.is_err());
        assert!(store.find_inventory("p1").await.is_err());
        assert_eq!(
            store.delete_product("p1").await,
            Err(RepositoryError::NotFound("Product p1".into()))
        );
    }

    #[tokio::test]
    async fn orders_total_their_items_and_follow_the_transition_table() {
        let store = InMemoryStore::new();
        let order = store
            .create_order(&CreateOrderRequest {
                customer_id: "c1".into(),
                items: vec![
                    OrderItem {
                        product_id: "p1".into(),
                        product_name: "Widget".into(),
                        quantity: 2,
                        price: 2.5,
                    },
                    OrderItem {
                        product_id: "p2".into(),
                        product_name: "Gadget".into(),
                        quantity: 1,
                        price: 10.0,
                    },
                ],
            })
            .await;

        assert_eq!(order.order_id, "o1");
        assert_eq!(order.status, OrderStatus::Pending);
        assert_eq!(order.total_amount, 15.0);

        let err = store
            .update_order_status("o1", OrderStatus::Delivered)
            .await
            .unwrap_err();
        assert!(matches!(err, RepositoryError::Conflict(_)));

        let confirmed = store
            .update_order_status("o1", OrderStatus::Confirmed)
            .await
            .unwrap();
        assert_eq!(confirmed.status, OrderStatus::Confirmed);
    }

    #[tokio::test]
    async fn inventory_updates_refuse_to_go_negative() {
        let store = InMemoryStore::new();
        store.seed_inventory("p1", 2, 0).await;

        let err = store
            .apply_inventory("p1", -3, InventoryOp::Reserve)
            .await
            .unwrap_err();
        assert!(matches!(err, RepositoryError::Conflict(_)));

        let stock = store.find_inventory("p1").await.unwrap();
        assert_eq!(stock.available_quantity, 2);
    }
}
