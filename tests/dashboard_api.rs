mod common;

use axum::http::{Method, StatusCode};
use chrono::{Days, Utc};
use serde_json::json;

use common::{send, test_app};

#[tokio::test]
async fn alerts_list_pending_inside_window() {
    let app = test_app();
    let today = Utc::now().date_naive();

    for (name, offset) in [("hoje", 0u64), ("na janela", 7), ("fora", 8)] {
        let due = today.checked_add_days(Days::new(offset)).unwrap().to_string();
        send(
            &app,
            Method::POST,
            "/api/finance/movements",
            Some(json!({ "kind": "Outflow", "description": name, "amount": 10, "dueDate": due })),
        )
        .await;
    }

    let (status, body) = send(&app, Method::GET, "/api/dashboard/alerts", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["windowDays"], json!(7));
    let names: Vec<_> = body["movements"]
        .as_array()
        .unwrap()
        .iter()
        .map(|m| m["description"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["hoje", "na janela"]);
}

#[tokio::test]
async fn disabled_alerts_are_empty() {
    let app = test_app();
    let today = Utc::now().date_naive().to_string();
    send(
        &app,
        Method::POST,
        "/api/finance/movements",
        Some(json!({ "kind": "Inflow", "description": "Recebimento", "amount": 10, "dueDate": today })),
    )
    .await;

    let (status, _) = send(
        &app,
        Method::PUT,
        "/api/settings/notifications",
        Some(json!({ "windowDays": 7, "alertsEnabled": false })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (_, body) = send(&app, Method::GET, "/api/dashboard/alerts", None).await;
    assert_eq!(body["alertsEnabled"], json!(false));
    assert_eq!(body["movements"], json!([]));
}

#[tokio::test]
async fn notification_window_over_a_year_is_rejected() {
    let app = test_app();
    let (status, _) = send(
        &app,
        Method::PUT,
        "/api/settings/notifications",
        Some(json!({ "windowDays": 366, "alertsEnabled": true })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn settings_default_when_never_saved() {
    let app = test_app();
    let (status, body) = send(&app, Method::GET, "/api/settings", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["notifications"], json!({ "windowDays": 7, "alertsEnabled": true }));
    assert_eq!(body["pricing"]["hourlyRate"].as_f64(), Some(0.0));
}

#[tokio::test]
async fn health_and_openapi_are_served() {
    let app = test_app();

    let (status, body) = send(&app, Method::GET, "/api/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!("OK"));

    let (status, doc) = send(&app, Method::GET, "/api/docs/openapi.json", None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(doc["paths"]["/api/proposals"].is_object());
    assert!(doc["paths"]["/api/finance/movements/{id}/status"].is_object());
}
