mod inventory;
mod order;
mod product;

pub use self::inventory::{Inventory, InventoryOp};
pub use self::order::{Order, OrderItem, OrderStatus};
pub use self::product::{Product, validate_price};
