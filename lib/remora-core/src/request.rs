//! HTTP request building.
//!
//! Use [`Request::builder`] to construct requests with headers, query
//! parameters, and bodies.
//!
//! # Example
//!
//! ```
//! use remora_core::{Method, Params, Request};
//!
//! let mut params = Params::new();
//! params.insert("page", 1);
//!
//! let request = Request::builder(Method::Get, "https://api.example.com/".parse().unwrap())
//!     .header("Accept", "application/json")
//!     .params(&params)
//!     .build();
//! ```

use std::collections::HashMap;

use bytes::Bytes;

use crate::{Method, Params, encode_url};

/// An HTTP request with method, URL, headers, and optional body.
#[derive(Debug, Clone)]
pub struct Request {
    method: Method,
    url: url::Url,
    headers: HashMap<String, String>,
    body: Option<Bytes>,
}

impl Request {
    /// Creates a new [`RequestBuilder`].
    #[must_use]
    pub fn builder(method: Method, url: url::Url) -> RequestBuilder {
        RequestBuilder::new(method, url)
    }

    /// HTTP method.
    #[must_use]
    pub const fn method(&self) -> Method {
        self.method
    }

    /// Request URL.
    #[must_use]
    pub fn url(&self) -> &url::Url {
        &self.url
    }

    /// Request headers.
    #[must_use]
    pub fn headers(&self) -> &HashMap<String, String> {
        &self.headers
    }

    /// Single header value by name.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).map(String::as_str)
    }

    /// Request body.
    #[must_use]
    pub const fn body(&self) -> Option<&Bytes> {
        self.body.as_ref()
    }

    /// Consume into (method, url, headers, body).
    #[must_use]
    pub fn into_parts(self) -> (Method, url::Url, HashMap<String, String>, Option<Bytes>) {
        (self.method, self.url, self.headers, self.body)
    }

    /// Reassemble a request from parts.
    #[must_use]
    pub fn from_parts(
        method: Method,
        url: url::Url,
        headers: HashMap<String, String>,
        body: Option<Bytes>,
    ) -> Self {
        Self {
            method,
            url,
            headers,
            body,
        }
    }
}

/// Builder for constructing [`Request`] instances.
#[derive(Debug, Clone)]
pub struct RequestBuilder {
    method: Method,
    url: url::Url,
    headers: HashMap<String, String>,
    body: Option<Bytes>,
}

impl RequestBuilder {
    /// Creates a new builder.
    #[must_use]
    pub fn new(method: Method, url: url::Url) -> Self {
        Self {
            method,
            url,
            headers: HashMap::new(),
            body: None,
        }
    }

    /// Sets a header, replacing any prior value.
    #[must_use]
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    /// Sets multiple headers.
    #[must_use]
    pub fn headers(mut self, headers: impl IntoIterator<Item = (String, String)>) -> Self {
        self.headers.extend(headers);
        self
    }

    /// Sets a header only if it is not already set.
    #[must_use]
    pub fn header_if_absent(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.entry(name.into()).or_insert_with(|| value.into());
        self
    }

    /// Merges a parameter bag into the URL's query string.
    ///
    /// Pre-existing query pairs are preserved; the result is canonical
    /// (keys sorted). Merging a bag onto an already-built URL cannot fail,
    /// so this takes no path argument; path resolution happens before the
    /// builder is created.
    #[must_use]
    pub fn params(mut self, params: &Params) -> Self {
        if let Ok(url) = encode_url(&self.url, "", params) {
            self.url = url;
        }
        self
    }

    /// Sets the request body.
    #[must_use]
    pub fn body(mut self, body: impl Into<Bytes>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Set a JSON body with the matching `Content-Type`.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn json<T: serde::Serialize>(self, value: &T) -> crate::Result<Self> {
        let body = crate::to_json(value)?;
        Ok(self
            .header("Content-Type", crate::ContentType::Json.as_str())
            .body(body))
    }

    /// Set a form-urlencoded body from a parameter bag.
    #[must_use]
    pub fn form(self, params: &Params) -> Self {
        self.header(
            "Content-Type",
            crate::ContentType::FormUrlEncoded.as_str(),
        )
        .body(params.to_form_bytes())
    }

    /// Builds the [`Request`].
    #[must_use]
    pub fn build(self) -> Request {
        Request {
            method: self.method,
            url: self.url,
            headers: self.headers,
            body: self.body,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn url(s: &str) -> url::Url {
        url::Url::parse(s).expect("valid URL")
    }

    #[test]
    fn request_builder_basic() {
        let request = Request::builder(Method::Get, url("https://api.example.com/users"))
            .header("Accept", "application/json")
            .build();

        assert_eq!(request.method(), Method::Get);
        assert_eq!(request.url().as_str(), "https://api.example.com/users");
        assert_eq!(request.header("Accept"), Some("application/json"));
        assert!(request.body().is_none());
    }

    #[test]
    fn request_builder_with_params() {
        let mut params = Params::new();
        params.insert("q", "rust");
        params.insert("page", 1);

        let request = Request::builder(Method::Get, url("https://api.example.com/search"))
            .params(&params)
            .build();

        assert_eq!(
            request.url().as_str(),
            "https://api.example.com/search?page=1&q=rust"
        );
    }

    #[test]
    fn request_builder_header_if_absent() {
        let request = Request::builder(Method::Get, url("https://api.example.com/"))
            .header("Accept", "application/json")
            .header_if_absent("Accept", "text/plain")
            .header_if_absent("X-Extra", "1")
            .build();

        assert_eq!(request.header("Accept"), Some("application/json"));
        assert_eq!(request.header("X-Extra"), Some("1"));
    }

    #[test]
    fn request_builder_form_body() {
        let mut params = Params::new();
        params.insert("a", "1");
        params.insert("b", vec!["x", "y"]);

        let request = Request::builder(Method::Post, url("https://api.example.com/submit"))
            .form(&params)
            .build();

        assert_eq!(
            request.header("Content-Type"),
            Some("application/x-www-form-urlencoded")
        );
        assert_eq!(request.body().map(AsRef::as_ref), Some(b"a=1&b=x&b=y".as_slice()));
        // Body encoding leaves the URL alone.
        assert_eq!(request.url().query(), None);
    }

    #[test]
    fn request_builder_json_body() {
        #[derive(serde::Serialize)]
        struct User {
            name: String,
        }

        let request = Request::builder(Method::Post, url("https://api.example.com/users"))
            .json(&User {
                name: "test".to_string(),
            })
            .expect("json")
            .build();

        assert_eq!(request.header("Content-Type"), Some("application/json"));
        assert!(request.body().is_some());
    }

    #[test]
    fn request_roundtrip_parts() {
        let request = Request::builder(Method::Post, url("https://api.example.com/"))
            .body(Bytes::from_static(b"the body"))
            .build();

        let (method, url, headers, body) = request.into_parts();
        let rebuilt = Request::from_parts(method, url, headers, body);
        assert_eq!(rebuilt.method(), Method::Post);
        assert_eq!(rebuilt.body().map(AsRef::as_ref), Some(b"the body".as_slice()));
    }
}
