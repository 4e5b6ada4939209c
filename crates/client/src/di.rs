use crate::{
    abstract_trait::{
        inventory::DynInventoryClient, order::DynOrderClient, product::DynProductClient,
    },
    service::{HttpTransport, InventoryClientService, OrderClientService, ProductClientService},
};
use std::sync::Arc;

#[derive(Clone)]
pub struct DependenciesInject {
    pub product_clients: DynProductClient,
    pub order_clients: DynOrderClient,
    pub inventory_clients: DynInventoryClient,
}

impl std::fmt::Debug for DependenciesInject {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DependenciesInject")
            .field("product_clients", &"DynProductClient")
            .field("order_clients", &"DynOrderClient")
            .field("inventory_clients", &"DynInventoryClient")
            .finish()
    }
}

impl DependenciesInject {
    pub fn new(transport: HttpTransport) -> Self {
        let product_clients: DynProductClient =
            Arc::new(ProductClientService::new(transport.clone()));

        let order_clients: DynOrderClient = Arc::new(OrderClientService::new(transport.clone()));

        let inventory_clients: DynInventoryClient =
            Arc::new(InventoryClientService::new(transport));

        Self {
            product_clients,
            order_clients,
            inventory_clients,
        }
    }
}
