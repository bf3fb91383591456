use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use database::SqliteTodoRepository;
use chrono::{DateTime, FixedOffset};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use std::sync::Arc;
use todo_api::{ServerOptions, TodoServer};
use tower::ServiceExt;

async fn sqlite_app() -> Router {
    let repo = SqliteTodoRepository::new(":memory:").await.unwrap();
    repo.migrate().await.unwrap();
    TodoServer::new(Arc::new(repo), ServerOptions::default()).router()
}

async fn call(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::AUTHORIZATION, "Bearer scenario");
    let req = match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(req).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    (status, serde_json::from_slice(&bytes).unwrap_or(Value::Null))
}

fn updated_at(todo: &Value) -> DateTime<FixedOffset> {
    DateTime::parse_from_rfc3339(todo["updated_at"].as_str().unwrap()).unwrap()
}

#[tokio::test]
async fn test_todo_lifecycle_against_sqlite() {
    let app = sqlite_app().await;

    let (status, created) = call(&app, Method::POST, "/todos", Some(json!({"title": "Buy milk"}))).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["id"], 1);
    assert_eq!(created["completed"], false);
    assert!(created.get("description").is_none());

    let (status, updated) = call(
        &app,
        Method::PUT,
        "/todos/1",
        Some(json!({"title": "Buy milk and eggs", "description": "urgent", "completed": true})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["title"], "Buy milk and eggs");
    assert_eq!(updated["description"], "urgent");
    assert_eq!(updated["completed"], true);
    assert_eq!(updated["created_at"], created["created_at"]);
    assert!(updated_at(&updated) > updated_at(&created));

    let (status, toggled) = call(&app, Method::POST, "/todos/1/toggle", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(toggled["completed"], false);
    assert!(updated_at(&toggled) > updated_at(&updated));

    let (_, toggled_again) = call(&app, Method::POST, "/todos/1/toggle", None).await;
    assert_eq!(toggled_again["completed"], true);
    assert!(updated_at(&toggled_again) > updated_at(&toggled));

    let (status, deleted) = call(&app, Method::DELETE, "/todos/1", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(deleted["message"], "Todo deleted successfully");

    let (status, _) = call(&app, Method::GET, "/todos/1", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_empty_description_comes_back_absent() {
    let app = sqlite_app().await;

    let (_, created) = call(
        &app,
        Method::POST,
        "/todos",
        Some(json!({"title": "Walk dog", "description": ""})),
    )
    .await;

    assert!(created.get("description").is_none());
}

#[tokio::test]
async fn test_list_filters_against_sqlite() {
    let app = sqlite_app().await;
    for title in ["One", "Two", "Three"] {
        call(&app, Method::POST, "/todos", Some(json!({"title": title}))).await;
    }
    call(&app, Method::POST, "/todos/2/toggle", None).await;

    let (_, all) = call(&app, Method::GET, "/todos", None).await;
    let titles: Vec<&str> = all["todos"]
        .as_array()
        .unwrap()
        .iter()
        .map(|t| t["title"].as_str().unwrap())
        .collect();
    assert_eq!(titles, vec!["Three", "Two", "One"]);

    let (_, done) = call(&app, Method::GET, "/todos?completed=true", None).await;
    assert_eq!(done["todos"].as_array().unwrap().len(), 1);
    assert_eq!(done["todos"][0]["id"], 2);
}
