use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::json;
use thiserror::Error;
use tower_http::trace::TraceLayer;
use walkbook_core::{NewOrder, Order};
use walkbook_storage::{BookingError, Bookings, OrderStore};

pub type SharedBookings = Arc<Bookings<Box<dyn OrderStore>>>;

pub fn router(bookings: SharedBookings) -> Router {
    Router::new()
        .route("/orders", post(create_order))
        .route("/orders/", post(create_order))
        .route("/orders/{date}", get(list_orders))
        .layer(TraceLayer::new_for_http())
        .with_state(bookings)
}

#[derive(Debug, Error)]
#[error(transparent)]
pub struct ApiError(#[from] BookingError);

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let code = match &self.0 {
            BookingError::Validation(_) | BookingError::Format(_) => StatusCode::BAD_REQUEST,
            BookingError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        let body = json!({
            "detail": self.0.to_string(),
            "kind": self.0.kind(),
        });
        (code, Json(body)).into_response()
    }
}

pub async fn create_order(
    State(bookings): State<SharedBookings>,
    Json(candidate): Json<NewOrder>,
) -> Result<Json<Order>, ApiError> {
    Ok(Json(bookings.accept(candidate)?))
}

pub async fn list_orders(
    State(bookings): State<SharedBookings>,
    Path(date): Path<String>,
) -> Result<Json<Vec<Order>>, ApiError> {
    Ok(Json(bookings.list_for_day(&date)?))
}
