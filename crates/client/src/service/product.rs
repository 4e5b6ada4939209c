use crate::{abstract_trait::product::ProductClientTrait, errors::ClientError, service::HttpTransport};
use async_trait::async_trait;
use opentelemetry::KeyValue;
use reqwest::RequestBuilder;
use shared::{
    domain::{
        requests::{CreateProductRequest, FindAllProducts, UpdateProductRequest},
        responses::{CreateProductResponse, ProductListResponse, SuccessResponse},
    },
    model::Product,
    utils::Method,
};
use tracing::info;

#[derive(Debug, Clone)]
pub struct ProductClientService {
    transport: HttpTransport,
}

impl ProductClientService {
    pub fn new(transport: HttpTransport) -> Self {
        Self { transport }
    }

    fn list_request(&self, req: &FindAllProducts) -> Result<RequestBuilder, ClientError> {
        let url = self.transport.endpoint(&["api", "products"])?;
        Ok(self.transport.request(Method::Get, url).query(req))
    }
}

#[async_trait]
impl ProductClientTrait for ProductClientService {
    async fn list(&self, req: &FindAllProducts) -> Result<ProductListResponse, ClientError> {
        info!(
            "Retrieving products (page: {}, size: {}, category: {:?})",
            req.page, req.page_size, req.category
        );

        let request = self.list_request(req)?;

        let response: ProductListResponse = self
            .transport
            .execute(
                "ListProducts",
                Method::Get,
                request,
                vec![
                    KeyValue::new("component", "product"),
                    KeyValue::new("operation", "list"),
                    KeyValue::new("page", req.page.to_string()),
                    KeyValue::new("page_size", req.page_size.to_string()),
                    KeyValue::new("category", req.category.clone().unwrap_or_default()),
                ],
            )
            .await?;

        info!(
            "Fetched {} of {} products",
            response.products.len(),
            response.total
        );
        Ok(response)
    }

    async fn get(&self, id: &str) -> Result<Product, ClientError> {
        info!("Retrieving product {id}");

        let url = self.transport.endpoint(&["api", "products", id])?;

        self.transport
            .execute(
                "GetProduct",
                Method::Get,
                self.transport.request(Method::Get, url),
                vec![
                    KeyValue::new("component", "product"),
                    KeyValue::new("operation", "get"),
                    KeyValue::new("product.id", id.to_string()),
                ],
            )
            .await
    }

    async fn create(&self, req: &CreateProductRequest) -> Result<CreateProductResponse, ClientError> {
        info!("Creating product {} in {}", req.name, req.category);

        let url = self.transport.endpoint(&["api", "products"])?;

        let response: CreateProductResponse = self
            .transport
            .execute(
                "CreateProduct",
                Method::Post,
                self.transport.request(Method::Post, url).json(req),
                vec![
                    KeyValue::new("component", "product"),
                    KeyValue::new("operation", "create"),
                    KeyValue::new("product.name", req.name.clone()),
                    KeyValue::new("product.category", req.category.clone()),
                ],
            )
            .await?;

        info!("Created product {}", response.product_id);
        Ok(response)
    }

    async fn update(
        &self,
        id: &str,
        req: &UpdateProductRequest,
    ) -> Result<SuccessResponse, ClientError> {
        info!("Updating product {id}");

        let url = self.transport.endpoint(&["api", "products", id])?;

        self.transport
            .execute(
                "UpdateProduct",
                Method::Put,
                self.transport.request(Method::Put, url).json(req),
                vec![
                    KeyValue::new("component", "product"),
                    KeyValue::new("operation", "update"),
                    KeyValue::new("product.id", id.to_string()),
                ],
            )
            .await
    }

    async fn delete(&self, id: &str) -> Result<SuccessResponse, ClientError> {
        info!("Deleting product {id}");

        let url = self.transport.endpoint(&["api", "products", id])?;

        self.transport
            .execute(
                "DeleteProduct",
                Method::Delete,
                self.transport.request(Method::Delete, url),
                vec![
                    KeyValue::new("component", "product"),
                    KeyValue::new("operation", "delete"),
                    KeyValue::new("product.id", id.to_string()),
                ],
            )
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::service::tests::transport;

    fn query_of(req: &FindAllProducts) -> Option<String> {
        let service = ProductClientService::new(transport("http://localhost:8080"));
        let request = service.list_request(req).unwrap().build().unwrap();
        assert_eq!(request.url().path(), "/api/products");
        request.url().query().map(str::to_string)
    }

    #[test]
    fn list_without_category_omits_the_parameter() {
        let query = query_of(&FindAllProducts::new(None, 1, 10));
        assert_eq!(query.as_deref(), Some("page=1&pageSize=10"));
    }

    #[test]
    fn empty_category_is_treated_as_absent() {
        let query = query_of(&FindAllProducts::new(Some(""), 1, 10));
        assert_eq!(query.as_deref(), Some("page=1&pageSize=10"));
    }

    #[test]
    fn category_is_passed_through_and_encoded() {
        let query = query_of(&FindAllProducts::new(Some("garden & tools"), 3, 25));
        assert_eq!(
            query.as_deref(),
            Some("page=3&pageSize=25&category=garden+%26+tools")
        );
    }
}
