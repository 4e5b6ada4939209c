use shared::{
    config::Config,
    domain::requests::{
        CreateOrderRequest, CreateProductRequest, FindAllProducts, UpdateProductRequest,
    },
    errors::HttpError,
    model::{InventoryOp, OrderItem, OrderStatus},
    utils::{Method, Status},
};
use storefront_client::{ClientError, state::AppState as ClientState};
use storefront_stub::{handler::AppRouter, state::AppState as StubState};

struct TestServer {
    base_url: String,
    handle: tokio::task::JoinHandle<()>,
}

impl TestServer {
    async fn spawn() -> Self {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("failed to bind ephemeral port");
        let addr = listener.local_addr().unwrap();
        let base_url = format!("http://{addr}");

        let handle = tokio::spawn(async move {
            AppRouter::run(listener, StubState::new(), std::future::pending())
                .await
                .unwrap();
        });

        Self { base_url, handle }
    }

    async fn client(&self) -> ClientState {
        let config = Config::default().with_api_url(&self.base_url).unwrap();
        ClientState::new(&config).await.unwrap()
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

fn create_request(name: &str, category: &str) -> CreateProductRequest {
    CreateProductRequest {
        name: name.into(),
        description: String::new(),
        price: 9.99,
        category: category.into(),
    }
}

#[tokio::test]
async fn created_product_reads_back_with_matching_fields() {
    let server = TestServer::spawn().await;
    let state = server.client().await;
    let products = &state.di_container.product_clients;

    let created = products
        .create(&create_request("Widget", "tools"))
        .await
        .unwrap();
    assert_eq!(created.product_id, "p1");

    let product = products.get("p1").await.unwrap();
    assert_eq!(product.product_id, "p1");
    assert_eq!(product.name, "Widget");
    assert_eq!(product.description, "");
    assert_eq!(product.price, 9.99);
    assert_eq!(product.category, "tools");
    assert_eq!(product.created_at, product.updated_at);
}

#[tokio::test]
async fn category_filter_returns_only_matching_products() {
    let server = TestServer::spawn().await;
    let state = server.client().await;
    let products = &state.di_container.product_clients;

    products.create(&create_request("Hammer", "tools")).await.unwrap();
    products.create(&create_request("Rake", "garden")).await.unwrap();
    products.create(&create_request("Saw", "tools")).await.unwrap();

    let page = products
        .list(&FindAllProducts::new(Some("tools"), 1, 10))
        .await
        .unwrap();
    assert_eq!(page.total, 2);
    assert!(page.products.iter().all(|p| p.category == "tools"));

    let everything = products
        .list(&FindAllProducts::new(None, 1, 10))
        .await
        .unwrap();
    assert_eq!(everything.total, 3);

    let second_page = products
        .list(&FindAllProducts::new(None, 2, 2))
        .await
        .unwrap();
    assert_eq!(second_page.total, 3);
    assert_eq!(second_page.products.len(), 1);
    assert_eq!(second_page.products[0].name, "Saw");
}

#[tokio::test]
async fn partial_update_leaves_absent_fields_alone() {
    let server = TestServer::spawn().await;
    let state = server.client().await;
    let products = &state.di_container.product_clients;

    products.create(&create_request("Widget", "tools")).await.unwrap();

    let response = products
        .update(
            "p1",
            &UpdateProductRequest {
                price: Some(12.5),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert!(response.success);

    let product = products.get("p1").await.unwrap();
    assert_eq!(product.price, 12.5);
    assert_eq!(product.name, "Widget");
    assert_eq!(product.category, "tools");
    assert!(product.updated_at >= product.created_at);
}

#[tokio::test]
async fn missing_and_deleted_products_are_not_found() {
    let server = TestServer::spawn().await;
    let state = server.client().await;
    let products = &state.di_container.product_clients;

    let err = products.get("p404").await.unwrap_err();
    assert!(err.is_not_found());

    products.create(&create_request("Widget", "tools")).await.unwrap();
    assert!(products.delete("p1").await.unwrap().success);

    let err = products.delete("p1").await.unwrap_err();
    assert!(matches!(err, ClientError::Http(HttpError::NotFound(_))));
}

#[tokio::test]
async fn invalid_payloads_surface_as_bad_request() {
    let server = TestServer::spawn().await;
    let state = server.client().await;

    let err = state
        .di_container
        .product_clients
        .create(&CreateProductRequest {
            price: -1.0,
            ..create_request("", "tools")
        })
        .await
        .unwrap_err();

    match err {
        ClientError::Http(HttpError::BadRequest(message)) => {
            assert!(message.contains("name"), "unexpected message: {message}");
        }
        other => panic!("expected bad request, got {other:?}"),
    }
}

#[tokio::test]
async fn reserve_moves_stock_and_repeats_are_independent() {
    let server = TestServer::spawn().await;
    let state = server.client().await;
    let inventory = &state.di_container.inventory_clients;

    state
        .di_container
        .product_clients
        .create(&create_request("Widget", "tools"))
        .await
        .unwrap();

    let restocked = inventory.update("p1", 10, InventoryOp::Restock).await.unwrap();
    assert_eq!(restocked.new_quantity, 10);

    let first = inventory.update("p1", -3, InventoryOp::Reserve).await.unwrap();
    assert!(first.success);
    assert_eq!(first.new_quantity, 7);

    let second = inventory.update("p1", -3, InventoryOp::Reserve).await.unwrap();
    assert_eq!(second.new_quantity, 4);

    let stock = inventory.get("p1").await.unwrap();
    assert_eq!(stock.available_quantity, 4);
    assert_eq!(stock.reserved_quantity, 6);

    let err = inventory
        .update("p1", -5, InventoryOp::Reserve)
        .await
        .unwrap_err();
    assert!(matches!(err, ClientError::Http(HttpError::Conflict(_))));
}

#[tokio::test]
async fn orders_are_totalled_and_follow_status_transitions() {
    let server = TestServer::spawn().await;
    let state = server.client().await;
    let orders = &state.di_container.order_clients;

    let created = orders
        .create(&CreateOrderRequest {
            customer_id: "c1".into(),
            items: vec![
                OrderItem {
                    product_id: "p1".into(),
                    product_name: "Widget".into(),
                    quantity: 3,
                    price: 2.5,
                },
                OrderItem {
                    product_id: "p2".into(),
                    product_name: "Gadget".into(),
                    quantity: 1,
                    price: 4.0,
                },
            ],
        })
        .await
        .unwrap();
    assert_eq!(created.order_id, "o1");
    assert_eq!(created.status, OrderStatus::Pending);

    let order = orders.get("o1").await.unwrap();
    assert_eq!(order.total_amount, 11.5);
    assert_eq!(order.items.len(), 2);
    assert_eq!(order.items[0].product_name, "Widget");

    let err = orders
        .update_status("o1", OrderStatus::Shipped)
        .await
        .unwrap_err();
    assert!(matches!(err, ClientError::Http(HttpError::Conflict(_))));

    assert!(orders.update_status("o1", OrderStatus::Confirmed).await.unwrap().success);
    assert!(orders.update_status("o1", OrderStatus::Cancelled).await.unwrap().success);
    assert_eq!(orders.get("o1").await.unwrap().status, OrderStatus::Cancelled);
}

#[tokio::test]
async fn unknown_status_gets_the_json_error_envelope() {
    let server = TestServer::spawn().await;

    let response = reqwest::Client::new()
        .put(format!("{}/api/orders/o1/status", server.base_url))
        .json(&serde_json::json!({ "status": "lost" }))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), reqwest::StatusCode::UNPROCESSABLE_ENTITY);
    let content_type = response
        .headers()
        .get(reqwest::header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();
    assert!(content_type.starts_with("application/json"), "{content_type}");

    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["status"], "error");
    assert!(body["message"].as_str().unwrap().contains("lost"));
}

#[tokio::test]
async fn every_call_is_recorded_in_metrics() {
    let server = TestServer::spawn().await;
    let state = server.client().await;
    let products = &state.di_container.product_clients;

    products.create(&create_request("Widget", "tools")).await.unwrap();
    products.get("p1").await.unwrap();
    products.get("p2").await.unwrap_err();

    {
        let metrics = state.metrics.lock().await;
        assert_eq!(metrics.count(Method::Post, Status::Success), 1);
        assert_eq!(metrics.count(Method::Get, Status::Success), 1);
        assert_eq!(metrics.count(Method::Get, Status::Error), 1);
    }

    let rendered = state.render_metrics().await.unwrap();
    assert!(rendered.contains("storefront_client_request_counter"));
}

#[tokio::test]
async fn unreachable_server_is_a_transport_error() {
    let port = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    };

    let config = Config::default()
        .with_api_url(&format!("http://127.0.0.1:{port}"))
        .unwrap();
    let state = ClientState::new(&config).await.unwrap();

    let err = state.di_container.product_clients.get("p1").await.unwrap_err();
    assert!(matches!(err, ClientError::Transport(_)), "got {err:?}");
}
