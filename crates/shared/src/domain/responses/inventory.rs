use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateInventoryResponse {
    pub success: bool,
    pub new_quantity: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_camel_case_body() {
        let body: UpdateInventoryResponse =
            serde_json::from_str(r#"{"success":true,"newQuantity":7}"#).unwrap();
        assert_eq!(
            body,
            UpdateInventoryResponse {
                success: true,
                new_quantity: 7
            }
        );
    }
}
