use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;
use walkbook_daemon::http::{router, SharedBookings};
use anyhow::anyhow;
use walkbook_core::{DayRange, NewOrder, Order};
use walkbook_storage::{Bookings, InMemoryOrderStore, OrderStore};
use walkbook_storage_sqlite::SqliteOrderStore;

fn memory_app() -> Router {
    let store: Box<dyn OrderStore> = Box::new(InMemoryOrderStore::new());
    let bookings: SharedBookings = Arc::new(Bookings::new(store));
    router(bookings)
}

async fn send(app: &Router, req: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(req).await.unwrap();
    let status = response.status();
    let body = response.into_body().collect().await.unwrap().to_bytes();
    let json = if body.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&body).unwrap_or(Value::Null)
    };
    (status, json)
}

async fn create(app: &Router, payload: Value) -> (StatusCode, Value) {
    send(
        app,
        Request::builder()
            .method("POST")
            .uri("/orders/")
            .header("content-type", "application/json")
            .body(Body::from(payload.to_string()))
            .unwrap(),
    )
    .await
}

async fn list(app: &Router, day: &str) -> (StatusCode, Value) {
    send(
        app,
        Request::builder()
            .uri(format!("/orders/{day}"))
            .body(Body::empty())
            .unwrap(),
    )
    .await
}

fn rex(walk_time: &str) -> Value {
    json!({
        "apartment_number": 12,
        "pet_name": "Rex",
        "pet_breed": "Labrador",
        "walk_time": walk_time,
    })
}

#[tokio::test]
async fn create_order_returns_stored_record() {
    let app = memory_app();
    let (status, body) = create(&app, rex("2024-03-01T10:00:00")).await;

    assert_eq!(status, StatusCode::OK);
    assert!(body["id"].is_i64());
    assert_eq!(body["apartment_number"], 12);
    assert_eq!(body["pet_name"], "Rex");
    assert_eq!(body["pet_breed"], "Labrador");
    assert_eq!(body["walk_time"], "2024-03-01T10:00:00");
}

#[tokio::test]
async fn create_without_trailing_slash() {
    let app = memory_app();
    let (status, _) = send(
        &app,
        Request::builder()
            .method("POST")
            .uri("/orders")
            .header("content-type", "application/json")
            .body(Body::from(rex("2024-03-01T07:00:00").to_string()))
            .unwrap(),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn early_walk_is_rejected_and_not_listed() {
    let app = memory_app();
    let (status, body) = create(&app, rex("2024-03-01T05:00:00")).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["detail"], "Walk time must be between 7:00 and 23:00");
    assert_eq!(body["kind"], "validation");

    let (status, body) = list(&app, "2024-03-01").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn off_slot_walk_is_rejected() {
    let app = memory_app();
    let (status, body) = create(&app, rex("2024-03-01T23:31:00")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["detail"], "Walk can only start on the hour or half hour.");
}

#[tokio::test]
async fn boundary_times() {
    let app = memory_app();
    assert_eq!(create(&app, rex("2024-03-01T07:00:00")).await.0, StatusCode::OK);
    assert_eq!(create(&app, rex("2024-03-01T23:30:00")).await.0, StatusCode::OK);

    let (_, body) = create(&app, rex("2024-03-01T06:59:00")).await;
    assert_eq!(body["detail"], "Walk time must be between 7:00 and 23:00");
}

#[tokio::test]
async fn list_returns_only_same_day() {
    let app = memory_app();
    let (_, a) = create(&app, rex("2024-03-01T09:00:00")).await;
    let (_, b) = create(&app, rex("2024-03-01T18:30:00")).await;
    create(&app, rex("2024-03-02T09:00:00")).await;

    let (status, body) = list(&app, "2024-03-01").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([a, b]));
}

#[tokio::test]
async fn malformed_day_is_bad_request() {
    let app = memory_app();
    let (status, body) = list(&app, "01.03.2024").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["kind"], "format");
}

#[tokio::test]
async fn malformed_payload_is_client_error() {
    let app = memory_app();
    let (status, _) = create(&app, json!({"apartment_number": "twelve"})).await;
    assert!(status.is_client_error());

    let (status, _) = create(&app, rex("whenever")).await;
    assert!(status.is_client_error());
}

#[tokio::test]
async fn sqlite_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let store: Box<dyn OrderStore> =
        Box::new(SqliteOrderStore::open(&dir.path().join("walkbook.db")).unwrap());
    let app = router(Arc::new(Bookings::new(store)));

    let (status, created) = create(&app, rex("2024-03-01T12:30:00")).await;
    assert_eq!(status, StatusCode::OK);

    let (_, listed) = list(&app, "2024-03-01").await;
    let listed = listed.as_array().unwrap();
    assert_eq!(listed.iter().filter(|o| o["id"] == created["id"]).count(), 1);
}

#[tokio::test]
async fn sqlite_created_matches_listed_with_nanosecond_input() {
    let dir = tempfile::tempdir().unwrap();
    let store: Box<dyn OrderStore> =
        Box::new(SqliteOrderStore::open(&dir.path().join("walkbook.db")).unwrap());
    let app = router(Arc::new(Bookings::new(store)));

    let (status, created) = create(&app, rex("2024-03-01T10:00:00.123456789")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(created["walk_time"], "2024-03-01T10:00:00.123456");

    let (_, listed) = list(&app, "2024-03-01").await;
    assert_eq!(listed, json!([created]));
}

struct FailingStore;

impl OrderStore for FailingStore {
    fn insert(&self, _candidate: NewOrder) -> anyhow::Result<Order> {
        Err(anyhow!("database is locked"))
    }

    fn query_range(&self, _range: &DayRange) -> anyhow::Result<Vec<Order>> {
        Err(anyhow!("database is locked"))
    }
}

#[tokio::test]
async fn storage_failures_are_server_errors() {
    let store: Box<dyn OrderStore> = Box::new(FailingStore);
    let app = router(Arc::new(Bookings::new(store)));

    let (status, body) = create(&app, rex("2024-03-01T10:00:00")).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["kind"], "storage");
    assert!(body["detail"].as_str().unwrap().contains("database is locked"));

    let (status, body) = list(&app, "2024-03-01").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["kind"], "storage");
}

#[tokio::test]
async fn validation_wins_over_storage_failure() {
    let store: Box<dyn OrderStore> = Box::new(FailingStore);
    let app = router(Arc::new(Bookings::new(store)));

    let (status, body) = create(&app, rex("2024-03-01T05:00:00")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["kind"], "validation");
}
