//! End-to-end handler tests against the in-memory stores.

use axum::http::header::AUTHORIZATION;
use axum::http::{HeaderValue, StatusCode};
use axum_test::TestServer;
use chrono::Utc;
use serde_json::{json, Value};
use uuid::Uuid;

use formforge_api::{build_router, AppState, ProjectDocument};

fn server_with_state(state: AppState) -> TestServer {
    TestServer::new(build_router(state)).expect("test server")
}

fn server() -> TestServer {
    server_with_state(AppState::new())
}

fn bearer(token: &str) -> HeaderValue {
    HeaderValue::from_str(&format!("Bearer {token}")).expect("header value")
}

async fn register(server: &TestServer, email: &str) -> String {
    let res = server
        .post("/api/auth/register")
        .json(&json!({ "email": email, "name": "Ada" }))
        .await;
    res.assert_status(StatusCode::CREATED);
    let body: Value = res.json();
    body["payload"]["token"].as_str().expect("token").to_string()
}

async fn create_project(server: &TestServer, token: &str, live: bool) -> Value {
    let res = server
        .post("/api/projects")
        .add_header(AUTHORIZATION, bearer(token))
        .json(&json!({
            "name": "Product feedback",
            "description": "Tell us what you think",
            "live": live,
            "fields": [
                { "name": "Name", "type": "text", "required": true },
                { "name": "Email", "type": "email", "required": false },
                { "name": "Rating", "type": "star-rating", "required": true }
            ]
        }))
        .await;
    res.assert_status(StatusCode::CREATED);
    let body: Value = res.json();
    body["payload"].clone()
}

#[tokio::test]
async fn health_check_responds() {
    let server = server();
    let res = server.get("/health").await;
    res.assert_status_ok();
    res.assert_text("OK");
}

#[tokio::test]
async fn project_routes_require_auth() {
    let server = server();
    let res = server.get("/api/projects").await;
    res.assert_status(StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn register_login_and_list() {
    let server = server();
    let token = register(&server, "ada@example.com").await;

    // Duplicate registration is rejected.
    let res = server
        .post("/api/auth/register")
        .json(&json!({ "email": "ada@example.com", "name": "Ada" }))
        .await;
    res.assert_status(StatusCode::CONFLICT);

    let res = server
        .post("/api/auth/login")
        .json(&json!({ "email": "ada@example.com" }))
        .await;
    res.assert_status_ok();

    let res = server
        .get("/api/projects")
        .add_header(AUTHORIZATION, bearer(&token))
        .await;
    res.assert_status_ok();
    let body: Value = res.json();
    assert_eq!(body["payload"].as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn create_project_enforces_limits() {
    let server = server();
    let token = register(&server, "ada@example.com").await;

    // Field limit.
    let fields: Vec<Value> = (0..6)
        .map(|i| json!({ "name": format!("F{i}"), "type": "text", "required": false }))
        .collect();
    let res = server
        .post("/api/projects")
        .add_header(AUTHORIZATION, bearer(&token))
        .json(&json!({ "name": "Too wide", "description": "", "fields": fields }))
        .await;
    res.assert_status(StatusCode::BAD_REQUEST);

    // Project limit.
    for _ in 0..5 {
        create_project(&server, &token, false).await;
    }
    let res = server
        .post("/api/projects")
        .add_header(AUTHORIZATION, bearer(&token))
        .json(&json!({ "name": "One too many", "description": "", "fields": [] }))
        .await;
    res.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn preview_decodes_stored_project() {
    let server = server();
    let token = register(&server, "ada@example.com").await;
    let project = create_project(&server, &token, true).await;

    // Stored shape keeps fields as a JSON string.
    assert!(project["fields"].is_string());

    let id = project["id"].as_str().unwrap();
    let res = server.get(&format!("/api/preview/{id}")).await;
    res.assert_status_ok();
    let body: Value = res.json();
    let fields = body["payload"]["fields"].as_array().unwrap();
    assert_eq!(fields.len(), 3);
    assert_eq!(fields[2]["type"], "star-rating");
    assert_eq!(body["payload"]["live"], json!(true));
    // The public view never includes the secret.
    assert!(body["payload"].get("secret").is_none());

    let res = server.get(&format!("/api/preview/{}", Uuid::new_v4())).await;
    res.assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn update_reorders_and_reserializes_fields() {
    let server = server();
    let token = register(&server, "ada@example.com").await;
    let project = create_project(&server, &token, false).await;
    let id = project["id"].as_str().unwrap();

    let stored: Vec<Value> =
        serde_json::from_str(project["fields"].as_str().unwrap()).unwrap();
    let reordered: Vec<Value> = vec![stored[2].clone(), stored[0].clone(), stored[1].clone()];

    let res = server
        .put(&format!("/api/projects/{id}"))
        .add_header(AUTHORIZATION, bearer(&token))
        .json(&json!({ "fields": reordered, "live": true }))
        .await;
    res.assert_status_ok();
    let body: Value = res.json();
    let round_tripped: Vec<Value> =
        serde_json::from_str(body["payload"]["fields"].as_str().unwrap()).unwrap();
    assert_eq!(round_tripped[0]["name"], "Rating");
    // Stable ids survive the round trip.
    assert_eq!(round_tripped[0]["id"], stored[2]["id"]);
    assert_eq!(body["payload"]["live"], json!(true));
}

#[tokio::test]
async fn feedback_submission_flow() {
    let server = server();
    let token = register(&server, "ada@example.com").await;
    let project = create_project(&server, &token, true).await;
    let id = project["id"].as_str().unwrap();
    let secret = project["secret"].as_str().unwrap();

    // Missing secret.
    let res = server
        .post(&format!("/api/feedback/{id}"))
        .json(&json!({ "secret": "", "data": {} }))
        .await;
    res.assert_status(StatusCode::BAD_REQUEST);

    // Wrong secret.
    let res = server
        .post(&format!("/api/feedback/{id}"))
        .json(&json!({ "secret": "wrong", "data": {} }))
        .await;
    res.assert_status(StatusCode::BAD_REQUEST);

    // Unknown project.
    let res = server
        .post(&format!("/api/feedback/{}", Uuid::new_v4()))
        .json(&json!({ "secret": secret, "data": {} }))
        .await;
    res.assert_status(StatusCode::NOT_FOUND);

    // Validation failure reports every violated field.
    let res = server
        .post(&format!("/api/feedback/{id}"))
        .json(&json!({ "secret": secret, "data": { "Rating": 0 } }))
        .await;
    res.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
    let body: Value = res.json();
    assert_eq!(body["errors"]["Rating"], "Please select at least 1 star");
    assert_eq!(body["errors"]["Name"], "Name is required");

    // Valid submission.
    let res = server
        .post(&format!("/api/feedback/{id}"))
        .json(&json!({ "secret": secret, "data": { "Name": "Grace", "Rating": 5 } }))
        .await;
    res.assert_status(StatusCode::CREATED);
}

#[tokio::test]
async fn feedback_rejected_when_not_live() {
    let server = server();
    let token = register(&server, "ada@example.com").await;
    let project = create_project(&server, &token, false).await;
    let id = project["id"].as_str().unwrap();
    let secret = project["secret"].as_str().unwrap();

    let res = server
        .post(&format!("/api/feedback/{id}"))
        .json(&json!({ "secret": secret, "data": { "Name": "Grace", "Rating": 5 } }))
        .await;
    res.assert_status(StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn responses_render_cards_with_blanks_for_missing_fields() {
    let server = server();
    let token = register(&server, "ada@example.com").await;
    let project = create_project(&server, &token, true).await;
    let id = project["id"].as_str().unwrap();
    let secret = project["secret"].as_str().unwrap();

    // Submission omits the optional Email field.
    let res = server
        .post(&format!("/api/feedback/{id}"))
        .json(&json!({ "secret": secret, "data": { "Name": "Grace", "Rating": 4 } }))
        .await;
    res.assert_status(StatusCode::CREATED);

    let res = server
        .get(&format!("/api/projects/{id}/responses"))
        .add_header(AUTHORIZATION, bearer(&token))
        .await;
    res.assert_status_ok();
    let body: Value = res.json();
    let cards = body["payload"].as_array().unwrap();
    assert_eq!(cards.len(), 1);
    let fields = cards[0]["fields"].as_array().unwrap();
    assert_eq!(fields.len(), 3);
    assert_eq!(fields[0]["value"]["kind"], "text");
    assert_eq!(fields[1]["value"]["kind"], "blank");
    assert_eq!(fields[2]["value"]["kind"], "stars");
    assert_eq!(fields[2]["value"]["filled"], 4);
    // Raw submitted values ride along with the rendered card.
    assert_eq!(cards[0]["values"]["Name"], "Grace");
    assert_eq!(cards[0]["values"]["Rating"], 4);
}

#[tokio::test]
async fn malformed_stored_blobs_degrade_to_empty_form() {
    let state = AppState::new();
    let project_id = Uuid::new_v4();
    state.projects.write().await.push(ProjectDocument {
        id: project_id,
        user_id: Uuid::new_v4(),
        name: "Legacy".to_string(),
        description: "Pre-migration document".to_string(),
        fields: "{definitely not an array".to_string(),
        style: "nope".to_string(),
        secret: "s3cret".to_string(),
        live: true,
        created_at: Utc::now(),
        updated_at: Utc::now(),
    });

    let server = server_with_state(state);
    let res = server.get(&format!("/api/preview/{project_id}")).await;
    res.assert_status_ok();
    let body: Value = res.json();
    assert_eq!(body["payload"]["fields"].as_array().unwrap().len(), 0);
    assert_eq!(body["payload"]["style"]["type"], "gradient");
}

#[tokio::test]
async fn delete_project_removes_its_feedback() {
    let server = server();
    let token = register(&server, "ada@example.com").await;
    let project = create_project(&server, &token, true).await;
    let id = project["id"].as_str().unwrap();
    let secret = project["secret"].as_str().unwrap();

    server
        .post(&format!("/api/feedback/{id}"))
        .json(&json!({ "secret": secret, "data": { "Name": "Grace", "Rating": 3 } }))
        .await
        .assert_status(StatusCode::CREATED);

    let res = server
        .delete(&format!("/api/projects/{id}"))
        .add_header(AUTHORIZATION, bearer(&token))
        .await;
    res.assert_status(StatusCode::NO_CONTENT);

    let res = server
        .get(&format!("/api/projects/{id}/responses"))
        .add_header(AUTHORIZATION, bearer(&token))
        .await;
    res.assert_status(StatusCode::NOT_FOUND);
}
