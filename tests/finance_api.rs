mod common;

use axum::http::{Method, StatusCode};
use chrono::{Days, Utc};
use serde_json::{json, Value};
use uuid::Uuid;

use common::{send, test_app};

fn movement(description: &str, kind: &str, amount: f64, due_date: &str) -> Value {
    json!({
        "kind": kind,
        "category": "Contas",
        "description": description,
        "amount": amount,
        "dueDate": due_date,
    })
}

#[tokio::test]
async fn recurring_movement_creates_monthly_installments() {
    let app = test_app();
    let mut payload = movement("Aluguel", "Outflow", 1500.0, "2024-01-31");
    payload["recurring"] = json!(true);
    payload["installments"] = json!(3);

    let (status, body) = send(&app, Method::POST, "/api/finance/movements", Some(payload)).await;

    assert_eq!(status, StatusCode::CREATED);
    let items = body.as_array().unwrap();
    let dates: Vec<_> = items.iter().map(|m| m["dueDate"].as_str().unwrap()).collect();
    let descriptions: Vec<_> = items.iter().map(|m| m["description"].as_str().unwrap()).collect();

    assert_eq!(dates, vec!["2024-01-31", "2024-02-29", "2024-03-31"]);
    assert_eq!(descriptions, vec!["Aluguel (1/3)", "Aluguel (2/3)", "Aluguel (3/3)"]);
    assert!(items.iter().all(|m| m["amount"].as_f64() == Some(1500.0)));
    assert!(items.iter().all(|m| m["batchId"] == items[0]["batchId"]));
}

#[tokio::test]
async fn resending_a_batch_does_not_duplicate_it() {
    let app = test_app();
    let mut payload = movement("Internet", "Outflow", 100.0, "2025-01-05");
    payload["recurring"] = json!(true);
    payload["installments"] = json!(12);
    payload["batchId"] = json!(Uuid::new_v4());

    let (first_status, _) = send(&app, Method::POST, "/api/finance/movements", Some(payload.clone())).await;
    let (second_status, second) = send(&app, Method::POST, "/api/finance/movements", Some(payload)).await;

    assert_eq!(first_status, StatusCode::CREATED);
    assert_eq!(second_status, StatusCode::CREATED);
    assert_eq!(second.as_array().map(Vec::len), Some(12));

    let (_, summary) = send(&app, Method::GET, "/api/finance/summary", None).await;
    assert_eq!(summary["totalOutflow"].as_f64(), Some(1200.0));
}

#[tokio::test]
async fn one_installment_is_out_of_range() {
    let app = test_app();
    let mut payload = movement("Seguro", "Outflow", 80.0, "2025-01-05");
    payload["recurring"] = json!(true);
    payload["installments"] = json!(1);

    let (status, body) = send(&app, Method::POST, "/api/finance/movements", Some(payload)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["details"].is_string());
}

#[tokio::test]
async fn installments_on_a_single_entry_are_ignored() {
    let app = test_app();
    let mut payload = movement("Seguro", "Outflow", 80.0, "2025-01-05");
    payload["installments"] = json!(1);

    let (status, body) = send(&app, Method::POST, "/api/finance/movements", Some(payload)).await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body.as_array().map(Vec::len), Some(1));
}

#[tokio::test]
async fn negative_amount_is_rejected() {
    let app = test_app();
    let (status, _) = send(
        &app,
        Method::POST,
        "/api/finance/movements",
        Some(movement("Estorno", "Inflow", -5.0, "2025-01-05")),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn archived_movements_leave_the_listing_and_summary_ignores_cancelled() {
    let app = test_app();
    let future = Utc::now().date_naive().checked_add_days(Days::new(10)).unwrap().to_string();

    let (_, created) = send(
        &app,
        Method::POST,
        "/api/finance/movements",
        Some(movement("Serviço prestado", "Inflow", 1000.0, &future)),
    )
    .await;
    let (_, cancelled) = send(
        &app,
        Method::POST,
        "/api/finance/movements",
        Some(movement("Compra cancelada", "Outflow", 300.0, &future)),
    )
    .await;
    let kept_id = created[0]["id"].as_str().unwrap().to_string();
    let cancelled_id = cancelled[0]["id"].as_str().unwrap().to_string();

    let (status, _) = send(
        &app,
        Method::PATCH,
        &format!("/api/finance/movements/{}/status", cancelled_id),
        Some(json!({ "status": "Cancelled" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (_, summary) = send(&app, Method::GET, "/api/finance/summary", None).await;
    assert_eq!(summary["totalInflow"].as_f64(), Some(1000.0));
    assert_eq!(summary["totalOutflow"].as_f64(), Some(0.0));
    assert_eq!(summary["balance"].as_f64(), Some(1000.0));

    send(
        &app,
        Method::PATCH,
        &format!("/api/finance/movements/{}/status", kept_id),
        Some(json!({ "status": "Archived" })),
    )
    .await;

    let (_, listed) = send(&app, Method::GET, "/api/finance/movements", None).await;
    let ids: Vec<_> = listed.as_array().unwrap().iter().map(|m| m["id"].as_str().unwrap()).collect();
    // cancelado ainda não vencido continua visível
    assert_eq!(ids, vec![cancelled_id.as_str()]);
}

#[tokio::test]
async fn search_filters_by_description() {
    let app = test_app();
    for name in ["Conta de Luz", "Conta de Água", "Salário"] {
        send(&app, Method::POST, "/api/finance/movements", Some(movement(name, "Outflow", 1.0, "2099-01-01"))).await;
    }

    let (_, listed) = send(&app, Method::GET, "/api/finance/movements?search=conta", None).await;
    assert_eq!(listed.as_array().map(Vec::len), Some(2));
}

#[tokio::test]
async fn update_and_delete_movement() {
    let app = test_app();
    let (_, created) = send(
        &app,
        Method::POST,
        "/api/finance/movements",
        Some(movement("Manutenção", "Outflow", 200.0, "2025-04-10")),
    )
    .await;
    let id = created[0]["id"].as_str().unwrap().to_string();

    let mut changes = movement("Manutenção preventiva", "Outflow", 250.0, "2025-04-15");
    changes["status"] = json!("Settled");
    let (status, updated) = send(&app, Method::PUT, &format!("/api/finance/movements/{}", id), Some(changes)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["amount"].as_f64(), Some(250.0));
    assert_eq!(updated["dueDate"], json!("2025-04-15"));

    let (status, _) = send(&app, Method::DELETE, &format!("/api/finance/movements/{}", id), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = send(&app, Method::DELETE, &format!("/api/finance/movements/{}", id), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn payment_settles_matching_pending_or_creates_outflow() {
    let app = test_app();
    send(
        &app,
        Method::POST,
        "/api/finance/movements",
        Some(movement("Fornecedor de peças", "Outflow", 350.0, "2025-05-01")),
    )
    .await;

    let (status, matched) = send(
        &app,
        Method::POST,
        "/api/finance/payments",
        Some(json!({ "counterparty": "Peças SA", "amount": 350 })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(matched["matchedPending"], json!(true));
    assert_eq!(matched["movement"]["status"], json!("Settled"));

    let (_, created) = send(
        &app,
        Method::POST,
        "/api/finance/payments",
        Some(json!({ "counterparty": "Peças SA", "amount": 350 })),
    )
    .await;
    assert_eq!(created["matchedPending"], json!(false));
    assert_eq!(created["movement"]["description"], json!("Pagamento: Peças SA"));
    assert_eq!(created["movement"]["category"], json!("Geral"));
}
