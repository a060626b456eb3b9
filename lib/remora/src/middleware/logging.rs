//! Request/response logging middleware.
//!
//! Dumps request and response headers (and bodies, when the matching flag
//! is set) through the `tracing` crate. Installed per transport via
//! [`crate::HttpTransportBuilder::with_logging`]; enabling it on one
//! transport never affects another.

use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};
use std::time::Instant;

use tower::{Layer, Service};
use tracing::{Instrument, Level, debug, info, span, warn};

use crate::{Error, Request, Response, Result};

/// Layer that adds request/response logging.
///
/// # Example
///
/// ```ignore
/// use remora::middleware::LoggingLayer;
///
/// let transport = remora::HttpTransport::builder()
///     .layer(LoggingLayer::new().with_request_body(true))
///     .build();
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct LoggingLayer {
    request_body: bool,
    response_body: bool,
}

impl LoggingLayer {
    /// Create a logging layer that dumps headers only.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Also dump request bodies (lossy UTF-8) at debug level.
    #[must_use]
    pub const fn with_request_body(mut self, enabled: bool) -> Self {
        self.request_body = enabled;
        self
    }

    /// Also dump response bodies (lossy UTF-8) at debug level.
    #[must_use]
    pub const fn with_response_body(mut self, enabled: bool) -> Self {
        self.response_body = enabled;
        self
    }
}

impl<S> Layer<S> for LoggingLayer {
    type Service = Logging<S>;

    fn layer(&self, inner: S) -> Self::Service {
        Logging {
            inner,
            request_body: self.request_body,
            response_body: self.response_body,
        }
    }
}

/// Service that logs requests and responses.
#[derive(Debug, Clone)]
pub struct Logging<S> {
    inner: S,
    request_body: bool,
    response_body: bool,
}

impl<S> Service<Request> for Logging<S>
where
    S: Service<Request, Response = Response, Error = Error> + Clone + Send + 'static,
    S::Future: Send,
{
    type Response = Response;
    type Error = Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response>> + Send>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<()>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, request: Request) -> Self::Future {
        let method = request.method();
        let url = request.url().to_string();
        let request_body = self.request_body;
        let response_body = self.response_body;

        let span = span!(Level::INFO, "http_request", %method, %url);

        let mut inner = self.inner.clone();
        Box::pin(
            async move {
                let start = Instant::now();

                info!(method = %method, url = %url, headers = ?request.headers(), "request");
                if request_body {
                    let body = request
                        .body()
                        .map(|b| String::from_utf8_lossy(b).into_owned())
                        .unwrap_or_default();
                    debug!(%body, "request body");
                }

                let result = inner.call(request).await;
                let elapsed_ms = u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX);

                match &result {
                    Ok(response) => {
                        info!(
                            status = response.status(),
                            headers = ?response.headers(),
                            elapsed_ms,
                            "response"
                        );
                        if response_body {
                            // The buffered body is still intact here; the
                            // caller drains it later.
                            let (_, _, body) = response.clone().into_parts();
                            debug!(body = %String::from_utf8_lossy(&body), "response body");
                        }
                    }
                    Err(err) => {
                        warn!(error = %err, elapsed_ms, "request failed");
                    }
                }

                result
            }
            .instrument(span),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn logging_layer_default_flags() {
        let layer = LoggingLayer::new();
        assert!(!layer.request_body);
        assert!(!layer.response_body);
    }

    #[test]
    fn logging_layer_body_flags() {
        let layer = LoggingLayer::new()
            .with_request_body(true)
            .with_response_body(true);
        assert!(layer.request_body);
        assert!(layer.response_body);
    }
}
