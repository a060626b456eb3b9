//! One-shot request helpers.
//!
//! Stateless conveniences for callers that do not want a [`crate::Client`].
//! Each call builds a fresh default transport. Note the deliberate
//! asymmetry: [`get`] encodes the parameter bag into the URL's query
//! string, while [`post`] form-encodes the bag as the request body and
//! leaves the URL untouched.

use remora_core::{HttpClient, url_with_params};
use url::Url;

use crate::{HttpTransport, Method, Params, Request, Response, Result};

/// Issue a GET against `url` with the bag encoded as query parameters.
///
/// # Errors
///
/// Returns an error if `url` does not parse or the request fails.
pub async fn get(url: &str, params: &Params) -> Result<Response> {
    let url = url_with_params(url, params)?;
    let request = Request::builder(Method::Get, url).build();
    HttpTransport::new().execute(request).await
}

/// Issue a POST against `url` with the bag form-encoded as the body.
///
/// The body is sent as `application/x-www-form-urlencoded` and is built
/// from the bag alone: query pairs already present on `url` stay in the
/// URL and are not copied into the body.
///
/// # Errors
///
/// Returns an error if `url` does not parse or the request fails.
pub async fn post(url: &str, params: &Params) -> Result<Response> {
    let url = Url::parse(url)?;
    let request = Request::builder(Method::Post, url).form(params).build();
    HttpTransport::new().execute(request).await
}
