//! Prelude module for convenient imports.
//!
//! ```ignore
//! use remora_core::prelude::*;
//! ```

pub use crate::{
    ContentType, Error, HttpClient, HttpClientStreaming, Method, ParamValue, Params, Request,
    RequestBuilder, Response, Result, Scalar, StatusCode, StreamingResponse, encode_url, from_json,
    header, to_json, url_with_params,
};
