//! HTTP response handling.
//!
//! [`Response`] holds a buffered body that is drained exactly once:
//! [`Response::content`] yields the bytes on first call and empty bytes on
//! every call after that, mirroring a single-use body stream. JSON access
//! comes in a lenient flavor ([`Response::json`], malformed input yields
//! `Null`) and a strict typed one ([`Response::json_as`]).
//!
//! [`StreamingResponse`] carries an unbuffered chunk stream for large
//! payloads; see [`crate::HttpClientStreaming`].

use std::collections::HashMap;
use std::pin::Pin;

use bytes::Bytes;
use futures_core::Stream;
use futures_util::StreamExt;

/// A streaming body: chunks of bytes arriving over time.
pub type StreamingBody = Pin<Box<dyn Stream<Item = crate::Result<Bytes>> + Send>>;

/// HTTP response with status, headers, and a buffered single-use body.
#[derive(Debug, Clone, Default)]
pub struct Response {
    status: u16,
    headers: HashMap<String, String>,
    body: Bytes,
}

impl Response {
    /// Creates a new response.
    #[must_use]
    pub fn new(status: u16, headers: HashMap<String, String>, body: Bytes) -> Self {
        Self {
            status,
            headers,
            body,
        }
    }

    /// HTTP status code.
    #[must_use]
    pub const fn status(&self) -> u16 {
        self.status
    }

    /// Response headers.
    #[must_use]
    pub fn headers(&self) -> &HashMap<String, String> {
        &self.headers
    }

    /// Single header value by name.
    ///
    /// Header names are stored lowercased by the transport.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).map(String::as_str)
    }

    /// Status is 2xx.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.status >= 200 && self.status < 300
    }

    /// Status is 3xx.
    #[must_use]
    pub const fn is_redirection(&self) -> bool {
        self.status >= 300 && self.status < 400
    }

    /// Status is 4xx.
    #[must_use]
    pub const fn is_client_error(&self) -> bool {
        self.status >= 400 && self.status < 500
    }

    /// Status is 5xx.
    #[must_use]
    pub const fn is_server_error(&self) -> bool {
        self.status >= 500 && self.status < 600
    }

    /// Drains the body.
    ///
    /// The first call yields the full body; the response is left drained,
    /// so later calls return empty bytes rather than erroring. Callers
    /// must not rely on a second call for fresh data.
    pub fn content(&mut self) -> Bytes {
        std::mem::take(&mut self.body)
    }

    /// Drains the body and parses it as JSON, leniently.
    ///
    /// Malformed JSON yields [`serde_json::Value::Null`] instead of an
    /// error. Use [`Response::json_as`] when parse failures should be
    /// surfaced.
    pub fn json(&mut self) -> serde_json::Value {
        serde_json::from_slice(&self.content()).unwrap_or(serde_json::Value::Null)
    }

    /// Drains the body and deserializes it into `T`.
    ///
    /// # Errors
    ///
    /// Returns a path-aware error if deserialization fails.
    pub fn json_as<T: serde::de::DeserializeOwned>(&mut self) -> crate::Result<T> {
        crate::from_json(&self.content())
    }

    /// Drains the body as UTF-8 text.
    ///
    /// # Errors
    ///
    /// Returns an error if the body is not valid UTF-8.
    pub fn text(&mut self) -> Result<String, std::string::FromUtf8Error> {
        String::from_utf8(self.content().to_vec())
    }

    /// Consume into (status, headers, body).
    #[must_use]
    pub fn into_parts(self) -> (u16, HashMap<String, String>, Bytes) {
        (self.status, self.headers, self.body)
    }
}

/// HTTP response with a streaming body, for large payloads.
///
/// Unlike [`Response`], the body is consumed as a stream of chunks;
/// dropping the response (or the body) releases the connection.
pub struct StreamingResponse {
    status: u16,
    headers: HashMap<String, String>,
    body: StreamingBody,
}

impl StreamingResponse {
    /// Creates a new streaming response.
    #[must_use]
    pub fn new(status: u16, headers: HashMap<String, String>, body: StreamingBody) -> Self {
        Self {
            status,
            headers,
            body,
        }
    }

    /// HTTP status code.
    #[must_use]
    pub const fn status(&self) -> u16 {
        self.status
    }

    /// Response headers.
    #[must_use]
    pub fn headers(&self) -> &HashMap<String, String> {
        &self.headers
    }

    /// Single header value by name.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).map(String::as_str)
    }

    /// Status is 2xx.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.status >= 200 && self.status < 300
    }

    /// Consume into the streaming body.
    #[must_use]
    pub fn into_body(self) -> StreamingBody {
        self.body
    }

    /// Buffer the entire stream into a [`Response`].
    ///
    /// # Errors
    ///
    /// Returns an error if reading any chunk fails.
    pub async fn collect(self) -> crate::Result<Response> {
        let mut body = self.body;
        let mut collected = Vec::new();

        while let Some(chunk) = body.next().await {
            collected.extend_from_slice(&chunk?);
        }

        Ok(Response::new(
            self.status,
            self.headers,
            Bytes::from(collected),
        ))
    }
}
