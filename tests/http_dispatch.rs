//! In-process dispatch tests driving the Axum app directly.

use axum::body::{to_bytes, Body};
use axum::http::{Method, Request, StatusCode};
use axum::response::Response;
use serde_json::Value;
use tower::ServiceExt;

use trie_router::http::X_ROUTE_NAME;
use trie_router::HttpServer;

mod common;

async fn send(server: &HttpServer, method: Method, uri: &str) -> Response {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    server.app().oneshot(request).await.unwrap()
}

async fn json_body(response: Response) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

fn server() -> HttpServer {
    HttpServer::new(&common::sample_config()).unwrap()
}

#[tokio::test]
async fn test_parameter_route_echoes_match() {
    let server = server();
    let response = send(&server, Method::GET, "/user/bob").await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()[X_ROUTE_NAME], "user");

    let body = json_body(response).await;
    assert_eq!(body["route"], "user");
    assert_eq!(body["method"], "GET");
    assert_eq!(body["params"]["name"], "bob");
}

#[tokio::test]
async fn test_static_beats_parameter() {
    let server = server();
    let response = send(&server, Method::GET, "/user/admin").await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()[X_ROUTE_NAME], "user-admin");
}

#[tokio::test]
async fn test_fixed_body_and_status() {
    let server = server();
    let response = send(&server, Method::POST, "/user").await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    assert_eq!(&bytes[..], b"created");
}

#[tokio::test]
async fn test_catch_all_binds_remainder() {
    let server = server();
    let response = send(&server, Method::GET, "/static/css/site.css").await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["params"]["file"], "css/site.css");
}

#[tokio::test]
async fn test_root_route() {
    let server = server();
    let response = send(&server, Method::GET, "/").await;
    assert_eq!(response.headers()[X_ROUTE_NAME], "home");
}

#[tokio::test]
async fn test_any_method_fallback() {
    let server = server();
    for method in [Method::GET, Method::DELETE, Method::PATCH] {
        let response = send(&server, method, "/health").await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()[X_ROUTE_NAME], "health");
    }
}

#[tokio::test]
async fn test_unmatched_is_json_404() {
    let server = server();
    let response = send(&server, Method::PUT, "/user/bob").await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert!(response.headers().get(X_ROUTE_NAME).is_none());

    let body = json_body(response).await;
    assert_eq!(body["error"], "no route matched");
    assert_eq!(body["method"], "PUT");
    assert_eq!(body["path"], "/user/bob");
}

#[tokio::test]
async fn test_empty_catch_all_is_404() {
    let server = server();
    let response = send(&server, Method::GET, "/static/").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_list_routes() {
    let server = server();
    let response = send(&server, Method::GET, "/_router/routes").await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = json_body(response).await;
    assert_eq!(body["count"], 6);
    let names: Vec<&str> = body["routes"]
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["name"].as_str().unwrap())
        .collect();
    assert!(names.contains(&"files"));
    assert!(names.contains(&"health"));
}

#[tokio::test]
async fn test_resolve_endpoint() {
    let server = server();

    let response = send(&server, Method::GET, "/_router/resolve?method=GET&path=/static/js/app.js").await;
    let body = json_body(response).await;
    assert_eq!(body["matched"], true);
    assert_eq!(body["route"], "files");
    assert_eq!(body["pattern"], "/static/*file");
    assert_eq!(body["params"]["file"], "js/app.js");

    let response = send(&server, Method::GET, "/_router/resolve?method=POST&path=/nowhere").await;
    let body = json_body(response).await;
    assert_eq!(body["matched"], false);
}

#[tokio::test]
async fn test_swap_replaces_table() {
    let server = server();

    let mut config = common::sample_config();
    config.routes.truncate(1);
    let table = trie_router::config::build_router(&config).unwrap();
    server.state().swap(std::sync::Arc::new(table));

    let response = send(&server, Method::GET, "/user/bob").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let response = send(&server, Method::GET, "/").await;
    assert_eq!(response.status(), StatusCode::OK);
}
