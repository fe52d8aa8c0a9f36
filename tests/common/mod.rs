#![allow(dead_code)]

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

use jps_backend::{config::AppState, db::MemoryStore, routes};

pub const ICON_URL: &str = "https://cdn.example/icone.png";

pub fn test_app() -> Router {
    routes::app(AppState::in_memory(MemoryStore::new(), Some(ICON_URL.to_string())))
}

pub async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    send_with_lang(app, method, uri, body, None).await
}

pub async fn send_with_lang(
    app: &Router,
    method: Method,
    uri: &str,
    body: Option<Value>,
    lang: Option<&str>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(lang) = lang {
        builder = builder.header(header::ACCEPT_LANGUAGE, lang);
    }
    let request = match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()))
    };

    (status, json)
}
