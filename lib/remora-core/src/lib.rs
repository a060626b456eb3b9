//! Core types for the remora HTTP convenience layer.
//!
//! This crate provides the foundational types used by remora:
//! - [`Params`], [`ParamValue`], [`Scalar`] - Typed query parameter bags
//! - [`encode_url`] / [`url_with_params`] - Parameter-to-query-string encoding
//! - [`Request`] and [`RequestBuilder`] - HTTP request types
//! - [`Response`] and [`StreamingResponse`] - HTTP response types
//! - [`Error`] and [`Result`] - Error handling
//! - [`HttpClient`] / [`HttpClientStreaming`] - Client execution traits
//! - [`StatusCode`] and [`header`] - Re-exported from the `http` crate

mod body;
mod client;
mod error;
mod method;
mod params;
pub mod prelude;
mod request;
mod response;

pub use body::{ContentType, from_json, to_json};
pub use client::{HttpClient, HttpClientStreaming};
pub use error::{Error, Result};
pub use method::Method;
pub use params::{ParamValue, Params, Scalar, encode_url, url_with_params};
pub use request::{Request, RequestBuilder};
pub use response::{Response, StreamingBody, StreamingResponse};

// Re-export http crate types for status codes and headers
pub use http::{StatusCode, header};
