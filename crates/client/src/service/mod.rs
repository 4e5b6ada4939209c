mod inventory;
mod order;
mod product;

pub use self::inventory::InventoryClientService;
pub use self::order::OrderClientService;
pub use self::product::ProductClientService;

use crate::errors::ClientError;
use opentelemetry::{
    Context, KeyValue,
    global::{self, BoxedTracer},
    trace::{Span, SpanKind, TraceContextExt, Tracer},
};
use reqwest::{Client, RequestBuilder, Url, header::HeaderMap};
use serde::de::DeserializeOwned;
use shared::{
    config::Config,
    errors::{ErrorResponse, HttpError},
    utils::{HeaderInjector, Method, Metrics, Status as StatusUtils, TracingContext},
};
use std::{sync::Arc, time::Instant};
use tokio::sync::Mutex;
use tracing::{error, info};

/// One HTTP round trip per call: span, metrics, status mapping and decoding.
///
/// Shared by every client; the underlying `reqwest::Client` pools connections.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
    base_url: Url,
    metrics: Arc<Mutex<Metrics>>,
}

impl HttpTransport {
    pub fn new(config: &Config, metrics: Arc<Mutex<Metrics>>) -> Result<Self, ClientError> {
        let base_url = Url::parse(&config.api_url)
            .map_err(|e| ClientError::InvalidUrl(format!("{}: {e}", config.api_url)))?;

        if base_url.cannot_be_a_base() {
            return Err(ClientError::InvalidUrl(config.api_url.clone()));
        }

        let client = Client::builder()
            .connect_timeout(config.connect_timeout)
            .timeout(config.request_timeout)
            .build()?;

        Ok(Self {
            client,
            base_url,
            metrics,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Joins path segments onto the base url, percent-encoding each one.
    pub fn endpoint(&self, segments: &[&str]) -> Result<Url, ClientError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| ClientError::InvalidUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    pub fn request(&self, method: Method, url: Url) -> RequestBuilder {
        let method = match method {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
            Method::Put => reqwest::Method::PUT,
            Method::Delete => reqwest::Method::DELETE,
        };
        self.client.request(method, url)
    }

    pub async fn execute<T>(
        &self,
        operation_name: &str,
        method: Method,
        builder: RequestBuilder,
        attributes: Vec<KeyValue>,
    ) -> Result<T, ClientError>
    where
        T: DeserializeOwned,
    {
        let tracing_ctx = self.start_tracing(operation_name, attributes);

        let mut headers = HeaderMap::new();
        self.inject_trace_context(&tracing_ctx.cx, &mut headers);

        match self.send(builder.headers(headers)).await {
            Ok(body) => {
                self.complete_tracing_success(&tracing_ctx, method, operation_name)
                    .await;
                Ok(body)
            }
            Err(err) => {
                error!("{operation_name} failed: {err}");
                self.complete_tracing_error(&tracing_ctx, method, &err.to_string())
                    .await;
                Err(err)
            }
        }
    }

    async fn send<T>(&self, builder: RequestBuilder) -> Result<T, ClientError>
    where
        T: DeserializeOwned,
    {
        let response = builder.send().await?;
        let status = response.status();
        let body = response.bytes().await?;

        if !status.is_success() {
            return Err(error_from_body(status.as_u16(), status.canonical_reason(), &body).into());
        }

        serde_json::from_slice(&body).map_err(|e| ClientError::Decode(e.to_string()))
    }

    fn get_tracer(&self) -> BoxedTracer {
        global::tracer("storefront-client")
    }

    fn inject_trace_context(&self, cx: &Context, headers: &mut HeaderMap) {
        global::get_text_map_propagator(|propagator| {
            propagator.inject_context(cx, &mut HeaderInjector(headers))
        });
    }

    fn start_tracing(&self, operation_name: &str, attributes: Vec<KeyValue>) -> TracingContext {
        let start_time = Instant::now();
        let tracer = self.get_tracer();
        let mut span = tracer
            .span_builder(operation_name.to_string())
            .with_kind(SpanKind::Client)
            .with_attributes(attributes)
            .start(&tracer);

        info!("Starting operation: {operation_name}");

        span.add_event(
            "Operation started",
            vec![KeyValue::new("operation", operation_name.to_string())],
        );

        let cx = Context::current_with_span(span);
        TracingContext { cx, start_time }
    }

    async fn complete_tracing_success(
        &self,
        tracing_ctx: &TracingContext,
        method: Method,
        message: &str,
    ) {
        self.complete_tracing_internal(tracing_ctx, method, true, message)
            .await;
    }

    async fn complete_tracing_error(
        &self,
        tracing_ctx: &TracingContext,
        method: Method,
        error_message: &str,
    ) {
        self.complete_tracing_internal(tracing_ctx, method, false, error_message)
            .await;
    }

    async fn complete_tracing_internal(
        &self,
        tracing_ctx: &TracingContext,
        method: Method,
        is_success: bool,
        message: &str,
    ) {
        let status_str = if is_success { "SUCCESS" } else { "ERROR" };
        let status = if is_success {
            StatusUtils::Success
        } else {
            StatusUtils::Error
        };
        let elapsed = tracing_ctx.start_time.elapsed().as_secs_f64();

        tracing_ctx.cx.span().add_event(
            "Operation completed",
            vec![
                KeyValue::new("status", status_str),
                KeyValue::new("duration_secs", elapsed.to_string()),
                KeyValue::new("message", message.to_string()),
            ],
        );

        if is_success {
            info!("Operation completed successfully: {message}");
        }

        self.metrics.lock().await.record(method, status, elapsed);

        tracing_ctx.cx.span().end();
    }
}

/// Prefers the `message` of an [`ErrorResponse`] body, then the raw text,
/// then the status reason.
fn error_from_body(status: u16, reason: Option<&str>, body: &[u8]) -> HttpError {
    let message = serde_json::from_slice::<ErrorResponse>(body)
        .ok()
        .map(|response| response.message)
        .or_else(|| {
            let text = String::from_utf8_lossy(body).trim().to_string();
            (!text.is_empty()).then_some(text)
        })
        .unwrap_or_else(|| reason.unwrap_or("Request failed").to_string());

    HttpError::from_status(status, message)
}
