//! HTTP client traits.
//!
//! [`HttpClient`] is the low-level execution seam: anything that can turn
//! a [`Request`] into a [`Response`] asynchronously. The transport in the
//! `remora` crate implements it; tests can implement it with canned
//! responses.

use std::future::Future;

use crate::{Request, Response, Result, StreamingResponse};

/// Core HTTP client trait.
///
/// Implementations should be safe for concurrent use; the stateful client
/// and the one-shot helpers add no locking of their own.
pub trait HttpClient: Send + Sync {
    /// Execute an HTTP request and return the buffered response.
    ///
    /// # Errors
    ///
    /// Returns an operational error on network, TLS, or timeout failure.
    /// Non-2xx statuses are not errors; they come back as responses.
    fn execute(&self, request: Request) -> impl Future<Output = Result<Response>> + Send;
}

/// Streaming HTTP client trait.
///
/// Extends [`HttpClient`] with a body that yields chunks as they arrive,
/// for large payloads and progress reporting.
pub trait HttpClientStreaming: HttpClient {
    /// Execute an HTTP request and return a streaming response.
    ///
    /// # Errors
    ///
    /// Returns an operational error on network, TLS, or timeout failure.
    fn execute_streaming(
        &self,
        request: Request,
    ) -> impl Future<Output = Result<StreamingResponse>> + Send;
}
