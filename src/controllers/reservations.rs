use axum::{
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, patch, post},
    Json, Router,
};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::sync::Arc;
use uuid::Uuid;

use crate::error::ServiceError;
use crate::models::{Reservation, ReservationStatus, SeatId};
use crate::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/reservations", get(get_user_reservations))
        .route("/reservations", post(create_reservation))
        .route("/reservations/cancel", patch(cancel_reservation))
}

/* ---------- RESERVATIONS ---------- */

#[derive(Debug, Serialize)]
struct ReservationResponse {
    #[serde(rename = "reservationId")]
    reservation_id: Uuid,
    id_schedule: i64,
    seats: Vec<String>,
    status: ReservationStatus,
    created_at: NaiveDateTime,
}

impl From<Reservation> for ReservationResponse {
    fn from(r: Reservation) -> Self {
        let seats = r.seat_labels();
        Self {
            reservation_id: r.id,
            id_schedule: r.id_schedule,
            seats,
            status: r.status,
            created_at: r.created_at,
        }
    }
}

// GET /api/reservations
async fn get_user_reservations(
    State(state): State<Arc<AppState>>,
    user: crate::middleware::AuthUser,
) -> impl IntoResponse {
    let reservations: Vec<ReservationResponse> = state
        .reservations
        .for_user(user.user_id)
        .await
        .into_iter()
        .map(ReservationResponse::from)
        .collect();
    Json(reservations)
}

// POST /api/reservations
#[derive(Debug, Deserialize)]
struct CreateReservationRequest {
    id_schedule: i64,
    seats: Vec<SeatId>,
    idempotency_token: Option<String>,
}

async fn create_reservation(
    State(state): State<Arc<AppState>>,
    user: crate::middleware::AuthUser,
    Json(req): Json<CreateReservationRequest>,
) -> Result<impl IntoResponse, ServiceError> {
    if req.id_schedule <= 0 {
        return Err(ServiceError::InvalidRequest(
            "id_schedule must be positive".to_string(),
        ));
    }

    let reservation = state
        .reservations
        .reserve(user.user_id, req.id_schedule, req.seats, req.idempotency_token)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(ReservationResponse::from(reservation)),
    ))
}

// PATCH /api/reservations/cancel
#[derive(Debug, Deserialize)]
struct CancelReservationRequest {
    reservation_id: Uuid,
}

async fn cancel_reservation(
    State(state): State<Arc<AppState>>,
    user: crate::middleware::AuthUser,
    Json(req): Json<CancelReservationRequest>,
) -> Result<impl IntoResponse, ServiceError> {
    let reservation = state
        .reservations
        .cancel(req.reservation_id, user.user_id)
        .await?;

    Ok(Json(json!({
        "message": "reservation cancelled",
        "reservation": ReservationResponse::from(reservation),
    })))
}
