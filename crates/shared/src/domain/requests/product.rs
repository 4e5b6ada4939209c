use serde::{Deserialize, Serialize};
use validator::Validate;

/// Query for one page of the product collection.
///
/// Pages are 1-indexed. An absent or empty category is not sent at all;
/// any other value is forwarded as given.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct FindAllProducts {
    #[serde(default = "default_page")]
    #[validate(range(min = 1, message = "Page starts at 1"))]
    pub page: u32,

    #[serde(default = "default_page_size")]
    #[validate(range(min = 1, max = 100, message = "Page size must be between 1 and 100"))]
    pub page_size: u32,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

impl Default for FindAllProducts {
    fn default() -> Self {
        Self {
            page: default_page(),
            page_size: default_page_size(),
            category: None,
        }
    }
}

impl FindAllProducts {
    pub fn new(category: Option<&str>, page: u32, page_size: u32) -> Self {
        Self {
            page,
            page_size,
            category: category.filter(|c| !c.is_empty()).map(str::to_string),
        }
    }
}

fn default_page() -> u32 {
    1
}

fn default_page_size() -> u32 {
    10
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateProductRequest {
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,

    #[serde(default)]
    pub description: String,

    #[validate(custom(
        function = "crate::model::validate_price",
        message = "Price must be a non-negative number"
    ))]
    pub price: f64,

    #[validate(length(min = 1, message = "Category is required"))]
    pub category: String,
}

/// Partial update: only the fields that are set go over the wire.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProductRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 1, message = "Name cannot be blank"))]
    pub name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(custom(
        function = "crate::model::validate_price",
        message = "Price must be a non-negative number"
    ))]
    pub price: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 1, message = "Category cannot be blank"))]
    pub category: Option<String>,
}

impl UpdateProductRequest {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.description.is_none()
            && self.price.is_none()
            && self.category.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_category_is_dropped_but_others_pass_through() {
        assert_eq!(FindAllProducts::new(Some(""), 1, 10).category, None);
        assert_eq!(
            FindAllProducts::new(Some(" tools "), 1, 10).category.as_deref(),
            Some(" tools ")
        );
        assert_eq!(
            FindAllProducts::new(Some("tools"), 2, 5),
            FindAllProducts {
                page: 2,
                page_size: 5,
                category: Some("tools".into()),
            }
        );
    }

    #[test]
    fn list_query_defaults_to_first_page_of_ten() {
        let query: FindAllProducts = serde_json::from_str("{}").unwrap();
        assert_eq!(query, FindAllProducts::default());
        assert!(query.validate().is_ok());
    }

    #[test]
    fn zero_page_fails_validation() {
        assert!(FindAllProducts::new(None, 0, 10).validate().is_err());
        assert!(FindAllProducts::new(None, 1, 0).validate().is_err());
        assert!(FindAllProducts::new(None, 1, 101).validate().is_err());
    }

    #[test]
    fn create_request_requires_name_category_and_non_negative_price() {
        let valid = CreateProductRequest {
            name: "Widget".into(),
            description: String::new(),
            price: 9.99,
            category: "tools".into(),
        };
        assert!(valid.validate().is_ok());

        let invalid = CreateProductRequest {
            name: String::new(),
            price: -1.0,
            category: String::new(),
            ..valid
        };
        let errors = invalid.validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("name"));
        assert!(fields.contains_key("price"));
        assert!(fields.contains_key("category"));
    }

    #[test]
    fn non_finite_prices_fail_validation() {
        for price in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            let create = CreateProductRequest {
                name: "Widget".into(),
                description: String::new(),
                price,
                category: "tools".into(),
            };
            let errors = create.validate().unwrap_err();
            assert!(errors.field_errors().contains_key("price"));

            let update = UpdateProductRequest {
                price: Some(price),
                ..Default::default()
            };
            assert!(update.validate().is_err());
        }
    }

    #[test]
    fn partial_update_serializes_only_present_fields() {
        let update = UpdateProductRequest {
            price: Some(12.5),
            ..Default::default()
        };
        let value = serde_json::to_value(&update).unwrap();
        assert_eq!(value, serde_json::json!({ "price": 12.5 }));
        assert!(!update.is_empty());
        assert!(UpdateProductRequest::default().is_empty());
    }
}
