//! Integration tests for `Client` using wiremock.

use bytes::Bytes;
use remora::{Client, Method, Params};
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{body_string, header, method, path, query_param},
};

fn client_for(server: &MockServer) -> Client {
    Client::new(format!("{}/", server.uri())).expect("client")
}

#[tokio::test]
async fn get_with_params() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search"))
        .and(query_param("q", "rust"))
        .and(query_param("page", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "results": ["remora"]
        })))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let mut params = Params::new();
    params.insert("q", "rust");
    params.insert("page", 1);

    let mut response = client
        .get("search", Some(&params), &[])
        .await
        .expect("response");

    assert!(response.is_success());
    assert_eq!(
        response.json(),
        serde_json::json!({"results": ["remora"]})
    );
}

#[tokio::test]
async fn get_sends_sequence_params() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/items"))
        .and(query_param("id", "1"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let mut params = Params::new();
    params.insert("id", vec![1, 2, 3]);

    let request = client
        .build_request(Method::Get, "items", None, Some(&params), &[])
        .expect("request");
    assert_eq!(request.url().query(), Some("id=1&id=2&id=3"));

    let response = client.send(request).await.expect("response");
    assert!(response.is_success());
}

#[tokio::test]
async fn user_agent_and_default_headers_sent() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/get"))
        .and(header("User-Agent", "remora-test/0.1"))
        .and(header("Accept", "application/json"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&mock_server)
        .await;

    let mut client = client_for(&mock_server);
    client.set_user_agent("remora-test/0.1");
    client.set_header("Accept", "application/json");

    let response = client.get("get", None, &[]).await.expect("response");
    assert!(response.is_success());
}

#[tokio::test]
async fn per_call_headers_override_defaults() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/get"))
        .and(header("Accept", "text/plain"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&mock_server)
        .await;

    let mut client = client_for(&mock_server);
    client.set_header("Accept", "application/json");

    let response = client
        .get("get", None, &[("Accept", "text/plain")])
        .await
        .expect("response");
    assert!(response.is_success());
}

#[tokio::test]
async fn post_body_passthrough() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/post"))
        .and(header("Content-Type", "text/plain"))
        .and(body_string("the body"))
        .respond_with(ResponseTemplate::new(201))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let response = client
        .post(
            "post",
            Some(Bytes::from_static(b"the body")),
            &[("Content-Type", "text/plain")],
        )
        .await
        .expect("response");

    assert_eq!(response.status(), 201);
}

#[tokio::test]
async fn head_exposes_redirect_location() {
    let mock_server = MockServer::start().await;

    Mock::given(method("HEAD"))
        .and(path("/redirect-to"))
        .respond_with(ResponseTemplate::new(302).insert_header("Location", "http://example.com/"))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let mut response = client
        .head("redirect-to", None, &[])
        .await
        .expect("response");

    assert!(response.is_redirection());
    assert_eq!(response.header("location"), Some("http://example.com/"));
    assert!(response.content().is_empty());
}

#[tokio::test]
async fn http_error_status_is_not_an_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/missing"))
        .respond_with(ResponseTemplate::new(404).set_body_string("Not Found"))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let mut response = client.get("missing", None, &[]).await.expect("response");

    assert!(response.is_client_error());
    assert_eq!(response.content().as_ref(), b"Not Found");
}

#[tokio::test]
async fn content_drains_once_over_the_wire() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/body"))
        .respond_with(ResponseTemplate::new(200).set_body_string("payload"))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let mut response = client.get("body", None, &[]).await.expect("response");

    assert_eq!(response.content().as_ref(), b"payload");
    assert!(response.content().is_empty());
}

#[tokio::test]
async fn lenient_json_on_non_json_body() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/html"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html></html>"))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let mut response = client.get("html", None, &[]).await.expect("response");

    assert_eq!(response.json(), serde_json::Value::Null);
}

#[tokio::test]
async fn typed_json_deserializes() {
    #[derive(Debug, PartialEq, serde::Deserialize)]
    struct User {
        id: u64,
        name: String,
    }

    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/users/1"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({"id": 1, "name": "Alice"})),
        )
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let mut response = client.get("users/1", None, &[]).await.expect("response");

    let user: User = response.json_as().expect("deserialize");
    assert_eq!(
        user,
        User {
            id: 1,
            name: "Alice".to_string()
        }
    );
}

#[tokio::test]
async fn timeout_is_operational_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/slow"))
        .respond_with(ResponseTemplate::new(200).set_delay(std::time::Duration::from_secs(5)))
        .mount(&mock_server)
        .await;

    let transport = remora::HttpTransport::builder()
        .timeout(std::time::Duration::from_millis(100))
        .build();
    let base = format!("{}/", mock_server.uri()).parse().expect("url");
    let client = Client::with_transport(transport, base);

    let err = client
        .get("slow", None, &[])
        .await
        .expect_err("expected timeout");
    assert!(err.is_timeout(), "expected timeout error, got: {err}");
}

#[tokio::test]
async fn connection_refused_is_operational_error() {
    let client = Client::new("http://127.0.0.1:1/").expect("client");

    let err = client
        .get("", None, &[])
        .await
        .expect_err("expected connection error");
    assert!(err.is_connection(), "expected connection error, got: {err}");
}
