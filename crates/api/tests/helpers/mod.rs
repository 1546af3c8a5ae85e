#![allow(dead_code)]

use axum::{body::Body, http::Request, Router};
use http_body_util::BodyExt;
use tower::ServiceExt;

pub mod mock_ports;

pub use mock_ports::*;

pub async fn read_body(body: Body) -> String {
    let bytes = body.collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}

pub struct TestResponse {
    pub status: u16,
    pub cached: bool,
    pub content_type: Option<String>,
    pub body: String,
}

pub async fn send(app: &Router, method: &str, uri: &str) -> TestResponse {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();

    let status = response.status().as_u16();
    let cached = response
        .headers()
        .get("x-reports-cached")
        .is_some_and(|v| v == "true");
    let content_type = response
        .headers()
        .get("content-type")
        .map(|v| v.to_str().unwrap().to_string());
    let body = read_body(response.into_body()).await;

    TestResponse {
        status,
        cached,
        content_type,
        body,
    }
}

pub async fn get(app: &Router, uri: &str) -> TestResponse {
    send(app, "GET", uri).await
}

