use crate::model::InventoryOp;
use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateInventoryRequest {
    #[validate(length(min = 1, message = "Product id is required"))]
    pub product_id: String,

    pub quantity: i64,

    pub operation: InventoryOp,
}
