mod api;
mod inventory;
mod order;
mod product;

pub use self::api::SuccessResponse;
pub use self::inventory::UpdateInventoryResponse;
pub use self::order::CreateOrderResponse;
pub use self::product::{CreateProductResponse, ProductListResponse};
