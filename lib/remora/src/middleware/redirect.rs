//! Redirect-following middleware.
//!
//! The raw transport never follows redirects, so a `HEAD` against a
//! redirecting URL surfaces the `Location` header. Installing this layer
//! opts in to following 301/302/303/307/308, with a configurable cap.

use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};

use tower::{Layer, Service};
use url::Url;

use crate::{Error, Method, Request, Response, Result};

/// Default maximum number of redirects to follow.
pub const DEFAULT_MAX_REDIRECTS: usize = 10;

/// Layer that follows HTTP redirects.
#[derive(Debug, Clone)]
pub struct RedirectLayer {
    max_redirects: usize,
}

impl Default for RedirectLayer {
    fn default() -> Self {
        Self::new()
    }
}

impl RedirectLayer {
    /// Create a redirect layer with the default cap.
    #[must_use]
    pub fn new() -> Self {
        Self {
            max_redirects: DEFAULT_MAX_REDIRECTS,
        }
    }

    /// Create a redirect layer with a custom cap.
    #[must_use]
    pub fn with_max_redirects(max_redirects: usize) -> Self {
        Self { max_redirects }
    }
}

impl<S> Layer<S> for RedirectLayer {
    type Service = Redirect<S>;

    fn layer(&self, inner: S) -> Self::Service {
        Redirect {
            inner,
            max_redirects: self.max_redirects,
        }
    }
}

/// Service that follows HTTP redirects.
#[derive(Debug, Clone)]
pub struct Redirect<S> {
    inner: S,
    max_redirects: usize,
}

fn is_redirect(status: u16) -> bool {
    matches!(status, 301 | 302 | 303 | 307 | 308)
}

/// 301/302/303 downgrade to GET; 307/308 preserve the method.
fn redirect_method(status: u16, original: Method) -> Method {
    match status {
        307 | 308 => original,
        _ => Method::Get,
    }
}

/// Headers describing the body, stripped when the body is dropped.
fn is_content_header(name: &str) -> bool {
    matches!(
        name.to_ascii_lowercase().as_str(),
        "content-type" | "content-length" | "content-encoding"
    )
}

fn resolve_location(base: &Url, location: &str) -> Result<Url> {
    if let Ok(url) = Url::parse(location) {
        return Ok(url);
    }
    base.join(location).map_err(Error::InvalidUrl)
}

impl<S> Service<Request> for Redirect<S>
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
        let mut inner = self.inner.clone();
        let max_redirects = self.max_redirects;

        Box::pin(async move {
            let mut current = request;
            let mut redirects = 0;

            loop {
                let response = inner.call(current.clone()).await?;

                if !is_redirect(response.status()) {
                    return Ok(response);
                }

                if redirects >= max_redirects {
                    return Err(Error::TooManyRedirects {
                        count: redirects,
                        max: max_redirects,
                    });
                }

                let location = response.header("location").ok_or_else(|| {
                    Error::InvalidRedirect("redirect response missing Location header".into())
                })?;

                let next_url = resolve_location(current.url(), location)?;
                let next_method = redirect_method(response.status(), current.method());

                // Method downgrades drop the body and its content headers.
                let (_, _, mut headers, body) = current.into_parts();
                let body = if matches!(next_method, Method::Get | Method::Head) {
                    headers.retain(|name, _| !is_content_header(name));
                    None
                } else {
                    body
                };

                let mut builder = Request::builder(next_method, next_url).headers(headers);
                if let Some(body) = body {
                    builder = builder.body(body);
                }
                current = builder.build();

                redirects += 1;
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_cap() {
        let layer = RedirectLayer::new();
        assert_eq!(layer.max_redirects, DEFAULT_MAX_REDIRECTS);
    }

    #[test]
    fn redirect_statuses() {
        assert!(is_redirect(301));
        assert!(is_redirect(308));
        assert!(!is_redirect(200));
        assert!(!is_redirect(304));
    }

    #[test]
    fn method_downgrade() {
        assert_eq!(redirect_method(303, Method::Post), Method::Get);
        assert_eq!(redirect_method(307, Method::Post), Method::Post);
        assert_eq!(redirect_method(308, Method::Put), Method::Put);
    }

    #[tokio::test]
    async fn downgrade_drops_body_and_content_headers() {
        use std::collections::HashMap;
        use std::sync::{Arc, Mutex};

        use bytes::Bytes;

        let seen: Arc<Mutex<Vec<Request>>> = Arc::new(Mutex::new(Vec::new()));
        let seen_inner = Arc::clone(&seen);

        let inner = tower::util::service_fn(move |request: Request| {
            let seen = Arc::clone(&seen_inner);
            async move {
                let mut seen = seen.lock().expect("lock");
                seen.push(request);
                if seen.len() == 1 {
                    let mut headers = HashMap::new();
                    headers.insert("location".to_string(), "/target".to_string());
                    Ok::<_, Error>(Response::new(303, headers, Bytes::new()))
                } else {
                    Ok(Response::new(200, HashMap::new(), Bytes::new()))
                }
            }
        });

        let mut service = RedirectLayer::new().layer(inner);
        let request = Request::builder(
            Method::Post,
            Url::parse("https://example.com/form").expect("url"),
        )
        .header("Content-Type", "application/x-www-form-urlencoded")
        .header("Content-Length", "3")
        .header("Authorization", "Bearer token")
        .body(Bytes::from_static(b"a=1"))
        .build();

        let response = service.call(request).await.expect("response");
        assert_eq!(response.status(), 200);

        let seen = seen.lock().expect("lock");
        let followed = seen.get(1).expect("followed request");
        assert_eq!(followed.method(), Method::Get);
        assert!(followed.body().is_none());
        assert!(followed.header("Content-Type").is_none());
        assert!(followed.header("Content-Length").is_none());
        assert_eq!(followed.header("Authorization"), Some("Bearer token"));
    }

    #[tokio::test]
    async fn preserving_redirect_keeps_body() {
        use std::collections::HashMap;
        use std::sync::{Arc, Mutex};

        use bytes::Bytes;

        let seen: Arc<Mutex<Vec<Request>>> = Arc::new(Mutex::new(Vec::new()));
        let seen_inner = Arc::clone(&seen);

        let inner = tower::util::service_fn(move |request: Request| {
            let seen = Arc::clone(&seen_inner);
            async move {
                let mut seen = seen.lock().expect("lock");
                seen.push(request);
                if seen.len() == 1 {
                    let mut headers = HashMap::new();
                    headers.insert("location".to_string(), "/target".to_string());
                    Ok::<_, Error>(Response::new(307, headers, Bytes::new()))
                } else {
                    Ok(Response::new(200, HashMap::new(), Bytes::new()))
                }
            }
        });

        let mut service = RedirectLayer::new().layer(inner);
        let request = Request::builder(
            Method::Post,
            Url::parse("https://example.com/form").expect("url"),
        )
        .header("Content-Type", "text/plain")
        .body(Bytes::from_static(b"a=1"))
        .build();

        let response = service.call(request).await.expect("response");
        assert_eq!(response.status(), 200);

        let seen = seen.lock().expect("lock");
        let followed = seen.get(1).expect("followed request");
        assert_eq!(followed.method(), Method::Post);
        assert_eq!(followed.body().map(AsRef::as_ref), Some(b"a=1".as_slice()));
        assert_eq!(followed.header("Content-Type"), Some("text/plain"));
    }

    #[test]
    fn content_header_detection() {
        assert!(is_content_header("Content-Type"));
        assert!(is_content_header("content-length"));
        assert!(!is_content_header("Authorization"));
    }

    #[test]
    fn resolve_absolute_and_relative() {
        let base = Url::parse("https://example.com/old/path").expect("base url");

        let absolute = resolve_location(&base, "https://other.com/new").expect("resolve");
        assert_eq!(absolute.as_str(), "https://other.com/new");

        let rooted = resolve_location(&base, "/new/path").expect("resolve");
        assert_eq!(rooted.as_str(), "https://example.com/new/path");

        let sibling = resolve_location(&base, "sibling").expect("resolve");
        assert_eq!(sibling.as_str(), "https://example.com/old/sibling");
    }
}
