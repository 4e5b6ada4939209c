mod inventory;
mod order;
mod product;

pub use self::inventory::UpdateInventoryRequest;
pub use self::order::{CreateOrderRequest, UpdateOrderStatusRequest};
pub use self::product::{CreateProductRequest, FindAllProducts, UpdateProductRequest};
