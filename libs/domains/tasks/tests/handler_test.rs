//! Handler tests for the Tasks domain
//!
//! These tests verify that the HTTP handlers work correctly:
//! - Request deserialization (JSON → Rust structs)
//! - Response serialization (Rust structs → JSON)
//! - HTTP status codes
//! - Error responses
//!
//! They run against the in-memory repository, so no database is required.

use axum::body::Body;
use axum::http::{Request, StatusCode};
use domain_tasks::{InMemoryTaskRepository, Task, TaskService, handlers};
use http_body_util::BodyExt;
use serde_json::json;
use tower::ServiceExt; // For oneshot()

fn app() -> axum::Router {
    let service = TaskService::new(InMemoryTaskRepository::new());
    handlers::router(service)
}

// Helper to parse JSON response body
async fn json_body<T: serde::de::DeserializeOwned>(body: Body) -> T {
    let bytes = body.collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

fn post_task(name: &str, description: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/")
        .header("content-type", "application/json")
        .body(Body::from(
            serde_json::to_string(&json!({
                "name": name,
                "description": description,
            }))
            .unwrap(),
        ))
        .unwrap()
}

#[tokio::test]
async fn test_create_task_returns_201_with_task() {
    let app = app();

    let response = app.oneshot(post_task("Buy milk", "2%  ")).await.unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);

    let task: Task = json_body(response.into_body()).await;
    assert_eq!(task.name, "Buy milk");
    assert_eq!(task.description, "2%  ");
    assert!(task.id >= 1);
}

#[tokio::test]
async fn test_create_task_rejects_empty_name() {
    let app = app();

    let response = app.oneshot(post_task("", "desc")).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_create_task_rejects_malformed_body() {
    let app = app();

    let request = Request::builder()
        .method("POST")
        .uri("/")
        .header("content-type", "application/json")
        .body(Body::from("{not json"))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();

    assert!(response.status().is_client_error());
}

#[tokio::test]
async fn test_list_tasks_returns_every_created_task() {
    let app = app();

    for i in 0..3 {
        let response = app
            .clone()
            .oneshot(post_task(&format!("task-{}", i), ""))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    let response = app
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let tasks: Vec<Task> = json_body(response.into_body()).await;
    assert_eq!(tasks.len(), 3);
    assert_eq!(tasks[0].name, "task-0");
}

#[tokio::test]
async fn test_get_task_returns_the_stored_task() {
    let app = app();

    let response = app.clone().oneshot(post_task("lookup", "me")).await.unwrap();
    let created: Task = json_body(response.into_body()).await;

    let response = app
        .oneshot(
            Request::builder()
                .uri(format!("/{}", created.id))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let task: Task = json_body(response.into_body()).await;
    assert_eq!(task, created);
}

#[tokio::test]
async fn test_get_task_unknown_id_returns_404() {
    let app = app();

    let response = app
        .oneshot(Request::builder().uri("/9999").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_get_task_non_numeric_id_returns_400() {
    let app = app();

    let response = app
        .oneshot(
            Request::builder()
                .uri("/not-a-number")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body: serde_json::Value = json_body(response.into_body()).await;
    assert_eq!(body["message"], "Invalid task id");
}

#[tokio::test]
async fn test_update_task_overwrites_fields() {
    let app = app();

    let response = app.clone().oneshot(post_task("before", "old")).await.unwrap();
    let created: Task = json_body(response.into_body()).await;

    let request = Request::builder()
        .method("PUT")
        .uri(format!("/{}", created.id))
        .header("content-type", "application/json")
        .body(Body::from(
            serde_json::to_string(&json!({
                "name": "after",
                "description": "new",
            }))
            .unwrap(),
        ))
        .unwrap();

    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let updated: Task = json_body(response.into_body()).await;
    assert_eq!(updated.id, created.id);
    assert_eq!(updated.name, "after");
    assert_eq!(updated.description, "new");

    // A subsequent read reflects the update
    let response = app
        .oneshot(
            Request::builder()
                .uri(format!("/{}", created.id))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    let fetched: Task = json_body(response.into_body()).await;
    assert_eq!(fetched.name, "after");
}

#[tokio::test]
async fn test_update_task_non_numeric_id_returns_400() {
    let app = app();

    let request = Request::builder()
        .method("PUT")
        .uri("/abc")
        .header("content-type", "application/json")
        .body(Body::from(
            serde_json::to_string(&json!({"name": "x", "description": "y"})).unwrap(),
        ))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_delete_task_returns_204_then_404() {
    let app = app();

    let response = app.clone().oneshot(post_task("doomed", "")).await.unwrap();
    let created: Task = json_body(response.into_body()).await;

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri(format!("/{}", created.id))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = app
        .oneshot(
            Request::builder()
                .uri(format!("/{}", created.id))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_task_unknown_id_returns_404() {
    let app = app();

    let response = app
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri("/4242")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
