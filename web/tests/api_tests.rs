//! HTTP tests for the todo API.

#![allow(clippy::unwrap_used)] // Tests can unwrap

use axum::http::StatusCode;
use axum_test::TestServer;
use serde_json::{Value, json};
use std::sync::Arc;
use todo::{Todo, TodoLimits};
use todo_testing::{SequentialIdGenerator, StepClock, test_clock};
use todo_web::{AppState, build_router};

fn server() -> TestServer {
    let state = AppState::with_environment(
        Arc::new(StepClock::from(test_clock())),
        Arc::new(SequentialIdGenerator::new()),
        TodoLimits::DEFAULT,
    );
    TestServer::new(build_router(state)).unwrap()
}

async fn create(server: &TestServer, body: Value) -> Todo {
    let response = server.post("/todos").json(&body).await;
    response.assert_status(StatusCode::CREATED);
    response.json::<Todo>()
}

fn assert_error(body: &Value, code: &str, message: &str) {
    assert_eq!(body["code"], code);
    assert_eq!(body["message"], message);
}

#[tokio::test]
async fn create_returns_201_with_cleaned_record() {
    let server = server();

    let response = server
        .post("/todos")
        .json(&json!({"title": "  <b>Buy milk</b>  ", "description": "<i>2 litres</i>"}))
        .await;

    response.assert_status(StatusCode::CREATED);
    let body = response.json::<Value>();
    assert_eq!(body["id"], "00000000-0000-0000-0000-000000000001");
    assert_eq!(body["title"], "Buy milk");
    assert_eq!(body["description"], "2 litres");
    assert_eq!(body["completed"], false);
    assert_eq!(body["createdAt"], "2025-01-01T00:00:00Z");
    assert_eq!(body["createdAt"], body["updatedAt"]);
}

#[tokio::test]
async fn missing_description_is_omitted() {
    let server = server();
    let response = server.post("/todos").json(&json!({"title": "Plain"})).await;

    let body = response.json::<Value>();
    assert!(body.get("description").is_none());
}

#[tokio::test]
async fn create_rejects_invalid_titles() {
    let server = server();

    let response = server.post("/todos").json(&json!({"title": "   "})).await;
    response.assert_status(StatusCode::BAD_REQUEST);
    assert_error(&response.json(), "VALIDATION_ERROR", "Title cannot be empty");

    let response = server
        .post("/todos")
        .json(&json!({"title": "a".repeat(101)}))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
    assert_error(&response.json(), "VALIDATION_ERROR", "Title cannot exceed 100 characters");
}

#[tokio::test]
async fn malformed_body_is_400() {
    let server = server();

    let response = server
        .post("/todos")
        .text("{not json")
        .content_type("application/json")
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(response.json::<Value>()["code"], "BAD_REQUEST");

    let response = server.post("/todos").json(&json!({"description": "no title"})).await;
    response.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn get_round_trips_and_unknown_is_404() {
    let server = server();
    let created = create(&server, json!({"title": "Read"})).await;

    let response = server.get(&format!("/todos/{}", created.id)).await;
    response.assert_status_ok();
    assert_eq!(response.json::<Todo>(), created);

    let response = server.get("/todos/00000000-0000-0000-0000-0000000000ff").await;
    response.assert_status(StatusCode::NOT_FOUND);
    assert_error(&response.json(), "NOT_FOUND", "Todo not found");

    let response = server.get("/todos/not-an-id").await;
    response.assert_status(StatusCode::NOT_FOUND);
    assert_error(&response.json(), "NOT_FOUND", "Todo not found");
}

#[tokio::test]
async fn patch_changes_only_present_fields() {
    let server = server();
    let created = create(&server, json!({"title": "Draft", "description": "keep me"})).await;

    let response = server
        .patch(&format!("/todos/{}", created.id))
        .json(&json!({"title": "Final"}))
        .await;

    response.assert_status_ok();
    let updated = response.json::<Todo>();
    assert_eq!(updated.title, "Final");
    assert_eq!(updated.description.as_deref(), Some("keep me"));
    assert!(updated.updated_at > created.updated_at);
    assert_eq!(updated.created_at, created.created_at);
}

#[tokio::test]
async fn completed_todo_rejects_updates() {
    let server = server();
    let created = create(&server, json!({"title": "Task A"})).await;
    let path = format!("/todos/{}", created.id);

    server
        .put(&path)
        .json(&json!({"completed": true}))
        .await
        .assert_status_ok();

    let response = server.put(&path).json(&json!({"title": "Task B"})).await;
    response.assert_status(StatusCode::BAD_REQUEST);
    assert_error(&response.json(), "BUSINESS_RULE_VIOLATION", "Cannot update completed todo");

    let todo = server.get(&path).await.json::<Todo>();
    assert_eq!(todo.title, "Task A");
    assert!(todo.completed);
}

#[tokio::test]
async fn update_unknown_is_404() {
    let server = server();

    let response = server
        .put("/todos/00000000-0000-0000-0000-0000000000ff")
        .json(&json!({"title": "x"}))
        .await;

    response.assert_status(StatusCode::NOT_FOUND);
    assert_error(&response.json(), "NOT_FOUND", "Todo not found");
}

#[tokio::test]
async fn search_filters_combine() {
    let server = server();
    for title in ["Shopping", "Coding", "Reading"] {
        create(&server, json!({"title": title})).await;
    }
    let reading = server
        .get("/todos")
        .add_query_param("title", "reading")
        .await
        .json::<Vec<Todo>>()
        .remove(0);
    server
        .patch(&format!("/todos/{}", reading.id))
        .json(&json!({"completed": true}))
        .await
        .assert_status_ok();

    let found = server
        .get("/todos")
        .add_query_param("title", "ING")
        .add_query_param("completed", "false")
        .await
        .json::<Vec<Todo>>();
    let titles: Vec<&str> = found.iter().map(|todo| todo.title.as_str()).collect();
    assert_eq!(titles, ["Shopping", "Coding"]);

    let all = server.get("/todos").await.json::<Vec<Todo>>();
    assert_eq!(all.len(), 3);
}

#[tokio::test]
async fn bad_query_is_400() {
    let server = server();

    let response = server.get("/todos").add_query_param("completed", "maybe").await;

    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(response.json::<Value>()["code"], "BAD_REQUEST");
}

#[tokio::test]
async fn delete_is_204_then_404() {
    let server = server();
    let created = create(&server, json!({"title": "Temp"})).await;
    let path = format!("/todos/{}", created.id);

    server.delete(&path).await.assert_status(StatusCode::NO_CONTENT);

    let response = server.delete(&path).await;
    response.assert_status(StatusCode::NOT_FOUND);
    assert_error(&response.json(), "NOT_FOUND", "Todo not found");

    server.get(&path).await.assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn health_reports_count_and_request_id() {
    let server = server();
    create(&server, json!({"title": "one"})).await;

    let response = server.get("/health").await;

    response.assert_status_ok();
    let body = response.json::<Value>();
    assert_eq!(body["status"], "ok");
    assert_eq!(body["todos"], 1);
    assert!(!response.header("x-request-id").is_empty());
}
