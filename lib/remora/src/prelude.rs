//! Prelude module for convenient imports.
//!
//! ```ignore
//! use remora::prelude::*;
//! ```

pub use crate::{
    Client, ContentType, Error, HttpClient, HttpClientStreaming, HttpTransport, Method,
    ParamValue, Params, ProgressStream, Request, RequestBuilder, Response, Result, Scalar,
    StatusCode, StreamingResponse, TransportConfig, encode_url, from_json, header, to_json,
    url_with_params,
};
