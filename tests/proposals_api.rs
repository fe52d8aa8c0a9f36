mod common;

use axum::http::{Method, StatusCode};
use serde_json::{json, Value};
use uuid::Uuid;

use common::{send, send_with_lang, test_app, ICON_URL};

fn proposal(client_id: Uuid, total: f64, deadline: &str) -> Value {
    json!({
        "clientId": client_id,
        "clientName": "Metalúrgica Exemplo Ltda",
        "representative": "Carlos Silva",
        "department": "Manutenção",
        "scopeDescription": "Troca de rolamentos da linha 2",
        "totalValue": total,
        "deadline": deadline,
    })
}

#[tokio::test]
async fn saving_twice_returns_the_same_id() {
    let app = test_app();
    let client = Uuid::new_v4();

    let (first_status, first) =
        send(&app, Method::POST, "/api/proposals", Some(proposal(client, 4450.0, "2025-03-31"))).await;
    let (second_status, second) =
        send(&app, Method::POST, "/api/proposals", Some(proposal(client, 4450.0, "2025-03-31"))).await;

    assert_eq!(first_status, StatusCode::CREATED);
    assert_eq!(second_status, StatusCode::OK);
    assert_eq!(first["id"], second["id"]);
    assert_eq!(second["created"], json!(false));

    let (_, list) = send(&app, Method::GET, &format!("/api/proposals?clientId={}", client), None).await;
    assert_eq!(list.as_array().map(Vec::len), Some(1));
}

#[tokio::test]
async fn empty_deadline_is_its_own_key() {
    let app = test_app();
    let client = Uuid::new_v4();

    let (_, open) = send(&app, Method::POST, "/api/proposals", Some(proposal(client, 100.0, ""))).await;
    let (_, dated) =
        send(&app, Method::POST, "/api/proposals", Some(proposal(client, 100.0, "2025-01-01"))).await;
    let (_, open_again) = send(&app, Method::POST, "/api/proposals", Some(proposal(client, 100.0, ""))).await;

    assert_ne!(open["id"], dated["id"]);
    assert_eq!(open["id"], open_again["id"]);
}

#[tokio::test]
async fn saved_proposal_has_defaults_and_icon() {
    let app = test_app();
    let (_, saved) =
        send(&app, Method::POST, "/api/proposals", Some(proposal(Uuid::new_v4(), 4450.0, ""))).await;
    let id = saved["id"].as_str().unwrap();

    let (status, body) = send(&app, Method::GET, &format!("/api/proposals/{}", id), None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], json!("Generated"));
    assert_eq!(body["iconUrl"], json!(ICON_URL));
    assert_eq!(body["deadline"], Value::Null);
    assert_eq!(body["totalValue"].as_f64(), Some(4450.0));
    assert!(body["reference"].as_str().unwrap().starts_with("Prestação de serviços"));
}

#[tokio::test]
async fn missing_representative_is_a_validation_error() {
    let app = test_app();
    let mut payload = proposal(Uuid::new_v4(), 10.0, "");
    payload["representative"] = json!("");

    let (status, body) = send_with_lang(&app, Method::POST, "/api/proposals", Some(payload), Some("en-US")).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], json!("One or more fields are invalid."));
    assert_eq!(body["details"]["representative"], json!(["required"]));
}

#[tokio::test]
async fn attach_pdf_updates_status() {
    let app = test_app();
    let (_, saved) =
        send(&app, Method::POST, "/api/proposals", Some(proposal(Uuid::new_v4(), 10.0, ""))).await;
    let id = saved["id"].as_str().unwrap();

    let (status, body) = send(
        &app,
        Method::PUT,
        &format!("/api/proposals/{}/pdf", id),
        Some(json!({ "pdfUrl": "https://drive.example.com/orcamento.pdf" })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], json!("PdfGenerated"));
    assert_eq!(body["pdfUrl"], json!("https://drive.example.com/orcamento.pdf"));
}

#[tokio::test]
async fn unknown_proposal_is_not_found_in_portuguese() {
    let app = test_app();

    let (status, body) = send(&app, Method::GET, &format!("/api/proposals/{}", Uuid::new_v4()), None).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], json!("Registro não encontrado."));
}
