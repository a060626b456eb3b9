//! HTTP transport implementation using hyper-util.
//!
//! [`HttpTransport`] executes [`Request`]s over a pooled hyper client with
//! rustls TLS. Instrumentation is composed per transport through tower
//! layers (see [`crate::middleware`]); there is no process-wide mutable
//! transport to swap.

use std::collections::HashMap;
use std::future::Future;
use std::pin::Pin;
use std::sync::{Arc, Mutex};
use std::task::{Context, Poll};

use bytes::Bytes;
use futures_util::TryStreamExt;
use http_body_util::{BodyExt, BodyStream, Full};
use hyper_rustls::HttpsConnector;
use hyper_util::{
    client::legacy::{Client, connect::HttpConnector},
    rt::TokioExecutor,
};
use tower::Layer;
use tower::util::BoxCloneService;
use tower_service::Service;

use remora_core::{StreamingBody, StreamingResponse};

use crate::{
    Error, Request, Response, Result,
    config::{TransportConfig, TransportConfigBuilder},
    connector::https_connector,
    middleware::{LoggingLayer, RedirectLayer},
};

/// Type-erased service for middleware composition.
pub type BoxedService = BoxCloneService<Request, Response, Error>;

/// Future type for tower `Service` implementations in this crate.
pub type ServiceFuture = Pin<Box<dyn Future<Output = Result<Response>> + Send + 'static>>;

/// Thread-safe wrapper around a [`BoxedService`].
///
/// The `HttpClient` trait requires `Sync`; `BoxCloneService` is not, so
/// calls lock, clone the service, and release before awaiting.
#[derive(Clone)]
struct SyncService {
    inner: Arc<Mutex<BoxedService>>,
}

impl SyncService {
    fn new(service: BoxedService) -> Self {
        Self {
            inner: Arc::new(Mutex::new(service)),
        }
    }

    fn call(&self, request: Request) -> ServiceFuture {
        let mut service = self
            .inner
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .clone();

        Box::pin(async move { service.call(request).await })
    }
}

/// Raw hyper client, below any middleware.
#[derive(Clone)]
struct RawTransport {
    inner: Client<HttpsConnector<HttpConnector>, Full<Bytes>>,
    config: TransportConfig,
}

impl RawTransport {
    fn new(config: TransportConfig) -> Self {
        let connector = https_connector();

        let inner = Client::builder(TokioExecutor::new())
            .pool_idle_timeout(config.pool_idle_timeout)
            .pool_max_idle_per_host(config.pool_idle_per_host)
            .build(connector);

        Self { inner, config }
    }

    fn build_hyper_request(request: Request) -> Result<http::Request<Full<Bytes>>> {
        let (method, url, headers, body) = request.into_parts();

        let mut builder = http::Request::builder()
            .method(http::Method::from(method))
            .uri(url.as_str());

        for (name, value) in &headers {
            builder = builder.header(name.as_str(), value.as_str());
        }

        let body = body.map_or_else(Full::default, Full::new);
        builder
            .body(body)
            .map_err(|e| Error::invalid_request(e.to_string()))
    }

    /// Extract response headers as a `HashMap` (names lowercased by http).
    fn extract_headers(headers: &http::HeaderMap) -> HashMap<String, String> {
        headers
            .iter()
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|v| (name.to_string(), v.to_string()))
            })
            .collect()
    }

    async fn execute(&self, request: Request) -> Result<Response> {
        let hyper_request = Self::build_hyper_request(request)?;

        let response = tokio::time::timeout(self.config.timeout, self.inner.request(hyper_request))
            .await
            .map_err(|_| Error::Timeout)?
            .map_err(Self::map_hyper_error)?;

        let status = response.status().as_u16();
        let response_headers = Self::extract_headers(response.headers());

        let body = response
            .into_body()
            .collect()
            .await
            .map_err(|e| Error::connection(e.to_string()))?
            .to_bytes();

        Ok(Response::new(status, response_headers, body))
    }

    async fn execute_streaming(&self, request: Request) -> Result<StreamingResponse> {
        let hyper_request = Self::build_hyper_request(request)?;

        let response = tokio::time::timeout(self.config.timeout, self.inner.request(hyper_request))
            .await
            .map_err(|_| Error::Timeout)?
            .map_err(Self::map_hyper_error)?;

        let status = response.status().as_u16();
        let response_headers = Self::extract_headers(response.headers());

        let body_stream = BodyStream::new(response.into_body());
        let streaming_body: StreamingBody = Box::pin(
            body_stream
                .map_ok(|frame| frame.into_data().unwrap_or_default())
                .map_err(|e| Error::connection(e.to_string())),
        );

        Ok(StreamingResponse::new(
            status,
            response_headers,
            streaming_body,
        ))
    }

    #[allow(clippy::needless_pass_by_value)]
    fn map_hyper_error(err: hyper_util::client::legacy::Error) -> Error {
        let msg = err.to_string();

        if err.is_connect() {
            return Error::connection(msg);
        }

        if msg.contains("ssl") || msg.contains("tls") || msg.contains("certificate") {
            return Error::tls(msg);
        }

        Error::connection(msg)
    }
}

impl Service<Request> for RawTransport {
    type Response = Response;
    type Error = Error;
    type Future = ServiceFuture;

    fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<()>> {
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, request: Request) -> Self::Future {
        let transport = self.clone();
        Box::pin(async move { transport.execute(request).await })
    }
}

/// HTTP transport with connection pooling, TLS, and middleware support.
///
/// # Example
///
/// ```ignore
/// use remora::HttpTransport;
/// use std::time::Duration;
///
/// let transport = HttpTransport::builder()
///     .timeout(Duration::from_secs(10))
///     .with_logging()
///     .build();
/// ```
#[derive(Clone)]
pub struct HttpTransport {
    service: SyncService,
    raw: RawTransport,
}

impl std::fmt::Debug for HttpTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpTransport")
            .field("config", &self.raw.config)
            .finish_non_exhaustive()
    }
}

impl HttpTransport {
    /// Create a new transport with default configuration and no middleware.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(TransportConfig::default())
    }

    /// Create a new transport with custom configuration (no middleware).
    #[must_use]
    pub fn with_config(config: TransportConfig) -> Self {
        let raw = RawTransport::new(config);
        Self {
            service: SyncService::new(BoxCloneService::new(raw.clone())),
            raw,
        }
    }

    /// Create a new transport builder.
    #[must_use]
    pub fn builder() -> HttpTransportBuilder {
        HttpTransportBuilder::default()
    }

    /// Get the transport configuration.
    #[must_use]
    pub const fn config(&self) -> &TransportConfig {
        &self.raw.config
    }
}

impl Default for HttpTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl remora_core::HttpClient for HttpTransport {
    async fn execute(&self, request: Request) -> Result<Response> {
        self.service.call(request).await
    }
}

/// Streaming execution bypasses middleware: the layers operate on buffered
/// responses, while streaming hands the raw hyper body to the caller.
impl remora_core::HttpClientStreaming for HttpTransport {
    async fn execute_streaming(&self, request: Request) -> Result<StreamingResponse> {
        self.raw.execute_streaming(request).await
    }
}

impl Service<Request> for HttpTransport {
    type Response = Response;
    type Error = Error;
    type Future = ServiceFuture;

    fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<()>> {
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, request: Request) -> Self::Future {
        self.service.call(request)
    }
}

/// Builder for [`HttpTransport`].
///
/// Layers are applied in order; the last layer added processes requests
/// first (outermost).
#[derive(Default)]
pub struct HttpTransportBuilder {
    config: TransportConfigBuilder,
    layers: Vec<Arc<dyn Fn(BoxedService) -> BoxedService + Send + Sync>>,
}

impl std::fmt::Debug for HttpTransportBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpTransportBuilder")
            .field("config", &self.config)
            .field("layers_count", &self.layers.len())
            .finish()
    }
}

impl HttpTransportBuilder {
    /// Set the request timeout.
    #[must_use]
    pub fn timeout(mut self, timeout: std::time::Duration) -> Self {
        self.config = self.config.timeout(timeout);
        self
    }

    /// Set the connection timeout.
    #[must_use]
    pub fn connect_timeout(mut self, timeout: std::time::Duration) -> Self {
        self.config = self.config.connect_timeout(timeout);
        self
    }

    /// Set the maximum idle connections per host.
    #[must_use]
    pub fn pool_idle_per_host(mut self, count: usize) -> Self {
        self.config = self.config.pool_idle_per_host(count);
        self
    }

    /// Set the idle connection timeout.
    #[must_use]
    pub fn pool_idle_timeout(mut self, timeout: std::time::Duration) -> Self {
        self.config = self.config.pool_idle_timeout(timeout);
        self
    }

    /// Add a tower layer to the transport.
    #[must_use]
    pub fn layer<L>(mut self, layer: L) -> Self
    where
        L: Layer<BoxedService> + Send + Sync + 'static,
        L::Service: Service<Request, Response = Response, Error = Error> + Clone + Send + 'static,
        <L::Service as Service<Request>>::Future: Send,
    {
        self.layers.push(Arc::new(move |service| {
            BoxCloneService::new(layer.layer(service))
        }));
        self
    }

    /// Add request/response logging with default flags (headers only).
    #[must_use]
    pub fn with_logging(self) -> Self {
        self.layer(LoggingLayer::new())
    }

    /// Add request/response logging with explicit body flags.
    #[must_use]
    pub fn with_logging_flags(self, request_body: bool, response_body: bool) -> Self {
        self.layer(
            LoggingLayer::new()
                .with_request_body(request_body)
                .with_response_body(response_body),
        )
    }

    /// Add redirect following with the default cap.
    #[must_use]
    pub fn with_follow_redirects(self) -> Self {
        self.layer(RedirectLayer::new())
    }

    /// Add redirect following with a custom cap.
    #[must_use]
    pub fn with_follow_redirects_max(self, max_redirects: usize) -> Self {
        self.layer(RedirectLayer::with_max_redirects(max_redirects))
    }

    /// Build the transport with all configured middleware.
    #[must_use]
    pub fn build(self) -> HttpTransport {
        let config = self.config.build();
        let raw = RawTransport::new(config);

        let mut service: BoxedService = BoxCloneService::new(raw.clone());
        for layer_fn in self.layers {
            service = layer_fn(service);
        }

        HttpTransport {
            service: SyncService::new(service),
            raw,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transport_default() {
        let transport = HttpTransport::new();
        assert_eq!(
            transport.config().timeout,
            std::time::Duration::from_secs(30)
        );
    }

    #[test]
    fn transport_builder() {
        let transport = HttpTransport::builder()
            .timeout(std::time::Duration::from_secs(60))
            .pool_idle_per_host(16)
            .build();

        assert_eq!(
            transport.config().timeout,
            std::time::Duration::from_secs(60)
        );
        assert_eq!(transport.config().pool_idle_per_host, 16);
    }

    #[test]
    fn transport_builder_with_layers() {
        let transport = HttpTransport::builder()
            .with_logging()
            .with_follow_redirects()
            .build();
        let debug = format!("{transport:?}");
        assert!(debug.contains("HttpTransport"));
    }

    #[test]
    fn transport_is_clone() {
        let transport = HttpTransport::new();
        let _cloned = transport.clone();
    }
}
