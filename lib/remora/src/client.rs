//! Stateful HTTP client with a base URL, default headers, and user-agent.
//!
//! A [`Client`] is created once per target service and reused across
//! requests. Paths are resolved against the base URL with standard
//! relative-reference rules; parameter bags run through the encoder in
//! `remora-core` before the request is built.
//!
//! # Example
//!
//! ```ignore
//! use remora::{Client, Params};
//!
//! let mut client = Client::new("https://httpbin.org/")?;
//! client.set_user_agent("remora-demo/0.1");
//!
//! let mut params = Params::new();
//! params.insert("page", 2);
//!
//! let mut response = client.get("get", Some(&params), &[]).await?;
//! println!("{}", response.json());
//! ```

use std::collections::HashMap;

use bytes::Bytes;
use url::Url;

use remora_core::{HttpClient, encode_url};

use crate::{HttpTransport, Method, Params, Request, Response, Result};

/// Stateful client carrying base URL, user-agent, and default headers.
///
/// Generic over the transport so tests can substitute a canned
/// [`HttpClient`]; defaults to [`HttpTransport`].
#[derive(Debug, Clone)]
pub struct Client<T = HttpTransport> {
    transport: T,
    base_url: Url,
    user_agent: Option<String>,
    headers: HashMap<String, String>,
}

impl Client<HttpTransport> {
    /// Create a client over a fresh default transport.
    ///
    /// # Errors
    ///
    /// Returns an error if `base` is not an absolute URL.
    pub fn new(base: impl AsRef<str>) -> Result<Self> {
        Ok(Self::with_transport(
            HttpTransport::new(),
            Url::parse(base.as_ref())?,
        ))
    }

    /// Create a client builder.
    #[must_use]
    pub fn builder() -> ClientBuilder {
        ClientBuilder::default()
    }
}

impl<T> Client<T> {
    /// Create a client over an explicit transport and pre-parsed base URL.
    #[must_use]
    pub fn with_transport(transport: T, base_url: Url) -> Self {
        Self {
            transport,
            base_url,
            user_agent: None,
            headers: HashMap::new(),
        }
    }

    /// Base URL requests resolve against.
    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Set the `User-Agent` applied to every subsequent request.
    pub fn set_user_agent(&mut self, user_agent: impl Into<String>) -> &mut Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Set a default header applied to every subsequent request unless a
    /// per-call header overrides it.
    pub fn set_header(&mut self, name: impl Into<String>, value: impl Into<String>) -> &mut Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    /// Mutable access to the default headers.
    pub fn headers_mut(&mut self) -> &mut HashMap<String, String> {
        &mut self.headers
    }

    /// Reference to the transport.
    #[must_use]
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Build a request against the base URL.
    ///
    /// An empty `path` uses the base URL as-is; otherwise `path` (which may
    /// itself be a full URL) is resolved against the base. A parameter bag,
    /// when supplied, is merged onto the resolved URL. Header precedence:
    /// the configured user-agent first, then per-call `headers` (which may
    /// override it), then the client's default headers for any name not
    /// already set.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidUrl`](crate::Error::InvalidUrl) if `path`
    /// does not resolve against the base URL.
    pub fn build_request(
        &self,
        method: Method,
        path: &str,
        body: Option<Bytes>,
        params: Option<&Params>,
        headers: &[(&str, &str)],
    ) -> Result<Request> {
        let url = if path.is_empty() {
            self.base_url.clone()
        } else {
            self.base_url.join(path)?
        };
        let url = match params {
            Some(params) => encode_url(&url, "", params)?,
            None => url,
        };

        let mut builder = Request::builder(method, url);
        if let Some(user_agent) = &self.user_agent {
            builder = builder.header("User-Agent", user_agent);
        }
        for (name, value) in headers {
            builder = builder.header(*name, *value);
        }
        for (name, value) in &self.headers {
            builder = builder.header_if_absent(name.as_str(), value.as_str());
        }
        if let Some(body) = body {
            builder = builder.body(body);
        }

        Ok(builder.build())
    }
}

impl<T: HttpClient> Client<T> {
    /// Issue a prebuilt request through the transport.
    ///
    /// # Errors
    ///
    /// Returns an operational error on network, TLS, or timeout failure.
    /// Non-2xx responses are not errors.
    pub async fn send(&self, request: Request) -> Result<Response> {
        self.transport.execute(request).await
    }

    /// GET `path` with optional parameters and per-call headers.
    ///
    /// # Errors
    ///
    /// Returns an error if the path does not resolve or the request fails.
    pub async fn get(
        &self,
        path: &str,
        params: Option<&Params>,
        headers: &[(&str, &str)],
    ) -> Result<Response> {
        let request = self.build_request(Method::Get, path, None, params, headers)?;
        self.send(request).await
    }

    /// POST `path` with the body passed through unmodified.
    ///
    /// No implicit form-encoding happens here; use
    /// [`quick::post`](crate::quick::post) for that behavior.
    ///
    /// # Errors
    ///
    /// Returns an error if the path does not resolve or the request fails.
    pub async fn post(
        &self,
        path: &str,
        body: Option<Bytes>,
        headers: &[(&str, &str)],
    ) -> Result<Response> {
        let request = self.build_request(Method::Post, path, body, None, headers)?;
        self.send(request).await
    }

    /// HEAD `path` with optional parameters and per-call headers.
    ///
    /// The body is always empty; headers (including a redirect `Location`)
    /// are populated, since the default transport does not follow
    /// redirects.
    ///
    /// # Errors
    ///
    /// Returns an error if the path does not resolve or the request fails.
    pub async fn head(
        &self,
        path: &str,
        params: Option<&Params>,
        headers: &[(&str, &str)],
    ) -> Result<Response> {
        let request = self.build_request(Method::Head, path, None, params, headers)?;
        self.send(request).await
    }
}

/// Builder for [`Client`] over the default transport.
///
/// `verbose(true)` installs the logging layer on the transport, so
/// instrumentation is chosen per client at construction time.
#[derive(Debug, Default)]
pub struct ClientBuilder {
    base: Option<String>,
    user_agent: Option<String>,
    headers: HashMap<String, String>,
    verbose: bool,
}

impl ClientBuilder {
    /// Set the base URL (required).
    #[must_use]
    pub fn base(mut self, base: impl Into<String>) -> Self {
        self.base = Some(base.into());
        self
    }

    /// Set the user-agent.
    #[must_use]
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Add a default header.
    #[must_use]
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    /// Log every request and response through the transport's logging
    /// layer.
    #[must_use]
    pub const fn verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// Build the client.
    ///
    /// # Errors
    ///
    /// Returns an error if no base URL was set or it does not parse.
    pub fn build(self) -> Result<Client<HttpTransport>> {
        let base = self
            .base
            .ok_or_else(|| crate::Error::invalid_request("client builder requires a base URL"))?;
        let base_url = Url::parse(&base)?;

        let mut transport = HttpTransport::builder();
        if self.verbose {
            transport = transport.with_logging();
        }

        let mut client = Client::with_transport(transport.build(), base_url);
        client.user_agent = self.user_agent;
        client.headers = self.headers;
        Ok(client)
    }
}
