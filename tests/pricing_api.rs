mod common;

use axum::http::{Method, StatusCode};
use serde_json::json;

use common::{send, test_app};

async fn save_company_defaults(app: &axum::Router) {
    let (status, _) = send(
        app,
        Method::PUT,
        "/api/settings/pricing",
        Some(json!({ "fuelPerDay": 30, "tollPerDay": 10, "mealPerPerson": 25, "hourlyRate": 50 })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn quote_with_overrides_follows_formula() {
    let app = test_app();
    save_company_defaults(&app).await;

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/pricing/quote",
        Some(json!({ "dailyHours": "08:00", "headcount": 2, "numberOfDays": 5 })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total"].as_f64(), Some(4450.0));
    assert_eq!(body["breakdown"]["mealCost"].as_f64(), Some(250.0));
    assert_eq!(body["seededFromClone"], json!(false));
}

#[tokio::test]
async fn percentage_discount_is_applied_over_base() {
    let app = test_app();
    save_company_defaults(&app).await;

    let (_, body) = send(
        &app,
        Method::POST,
        "/api/pricing/quote",
        Some(json!({
            "headcount": 2,
            "numberOfDays": 5,
            "adjustmentKind": "Discount",
            "adjustmentMode": "Percentage",
            "adjustmentValue": 10
        })),
    )
    .await;

    assert_eq!(body["total"].as_f64(), Some(4005.0));
}

#[tokio::test]
async fn cloned_total_is_kept_until_an_input_changes() {
    let app = test_app();
    save_company_defaults(&app).await;

    let (_, untouched) = send(
        &app,
        Method::POST,
        "/api/pricing/quote",
        Some(json!({ "initialTotal": 12345.67 })),
    )
    .await;
    assert_eq!(untouched["total"].as_f64(), Some(12345.67));
    assert_eq!(untouched["seededFromClone"], json!(true));

    let (_, edited) = send(
        &app,
        Method::POST,
        "/api/pricing/quote",
        Some(json!({ "initialTotal": 12345.67, "headcount": 1 })),
    )
    .await;
    // 8h * 50 + 30 + 10 + 25
    assert_eq!(edited["total"].as_f64(), Some(465.0));
    assert_eq!(edited["seededFromClone"], json!(false));
}

#[tokio::test]
async fn negative_rate_is_rejected() {
    let app = test_app();

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/pricing/quote",
        Some(json!({ "hourlyRate": -10 })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn quote_without_saved_settings_uses_zero_defaults() {
    let app = test_app();

    let (status, body) = send(&app, Method::POST, "/api/pricing/quote", Some(json!({}))).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total"].as_f64(), Some(0.0));
    assert_eq!(body["defaults"]["hourlyRate"].as_f64(), Some(0.0));
}

#[tokio::test]
async fn huge_rate_returns_bad_request_instead_of_dropping_the_connection() {
    let app = test_app();

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/pricing/quote",
        Some(json!({ "hourlyRate": 1e28 })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());

    let (status, _) = send(
        &app,
        Method::POST,
        "/api/pricing/quote",
        Some(json!({ "hourlyRate": 1e11, "headcount": 4294967295u32, "numberOfDays": 4294967295u32 })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}
