use serde::{Deserialize, Serialize};
use validator::ValidationError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub product_id: String,
    pub name: String,
    pub description: String,
    pub price: f64,
    pub category: String,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Prices must be finite and non-negative; NaN and infinities cannot go over
/// the wire as JSON numbers.
pub fn validate_price(price: f64) -> Result<(), ValidationError> {
    if price.is_finite() && price >= 0.0 {
        Ok(())
    } else {
        Err(ValidationError::new("price"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn price_must_be_a_finite_non_negative_number() {
        assert!(validate_price(0.0).is_ok());
        assert!(validate_price(9.99).is_ok());
        assert!(validate_price(-0.01).is_err());
        assert!(validate_price(f64::NAN).is_err());
        assert!(validate_price(f64::INFINITY).is_err());
    }
}
