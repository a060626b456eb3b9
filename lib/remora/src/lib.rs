//! Convenience layer over hyper.
//!
//! remora builds query-parameter-encoded URLs from typed parameter bags,
//! wraps HTTP responses with convenience accessors, and offers a small
//! client object carrying base URL, default headers, and user-agent across
//! requests. Transport instrumentation (request/response logging, progress
//! markers on a byte stream) composes per transport through tower layers.
//!
//! # Example
//!
//! ```ignore
//! use remora::{Client, Params};
//!
//! let client = Client::builder()
//!     .base("https://httpbin.org/")
//!     .user_agent("remora-demo/0.1")
//!     .verbose(true)
//!     .build()?;
//!
//! let mut params = Params::new();
//! params.insert("tags", vec!["rust", "http"]);
//!
//! let mut response = client.get("get", Some(&params), &[]).await?;
//! if response.is_success() {
//!     println!("{}", response.json());
//! }
//! ```

mod client;
mod config;
mod connector;
pub mod middleware;
pub mod progress;
pub mod quick;
pub mod prelude;
mod transport;

// Re-export client and transport types
pub use client::{Client, ClientBuilder};
pub use config::{TransportConfig, TransportConfigBuilder};
pub use progress::ProgressStream;
pub use transport::{BoxedService, HttpTransport, HttpTransportBuilder, ServiceFuture};

// Re-export tower for middleware composition
pub use tower;

// Re-export core types
pub use remora_core::{
    ContentType, Error, HttpClient, HttpClientStreaming, Method, ParamValue, Params, Request,
    RequestBuilder, Response, Result, Scalar, StreamingBody, StreamingResponse, encode_url,
    from_json, to_json, url_with_params,
};

// Re-export http types for status codes and headers
pub use remora_core::{StatusCode, header};

// Re-export url for callers constructing base URLs
pub use url;
