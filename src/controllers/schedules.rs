use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use chrono::{NaiveDate, NaiveTime};
use serde::Deserialize;
use std::sync::Arc;

use crate::error::ServiceError;
use crate::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/schedules", get(list_schedules))
        .route("/schedules", post(create_schedule))
}

#[derive(Debug, Deserialize)]
struct SchedulesQuery {
    room: Option<i64>,
}

// GET /api/schedules?room=
async fn list_schedules(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SchedulesQuery>,
) -> impl IntoResponse {
    Json(state.catalog.schedules(params.room).await)
}

#[derive(Debug, Deserialize)]
struct CreateScheduleRequest {
    id_cinema: i64,
    date: NaiveDate,
    time: String,
}

// POST /api/schedules - создание сеанса сразу материализует карту мест
async fn create_schedule(
    State(state): State<Arc<AppState>>,
    user: crate::middleware::AuthUser,
    Json(req): Json<CreateScheduleRequest>,
) -> Result<impl IntoResponse, ServiceError> {
    // фронтенд шлёт "19:30", без секунд
    let time = NaiveTime::parse_from_str(&req.time, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(&req.time, "%H:%M:%S"))
        .map_err(|_| ServiceError::InvalidRequest(format!("bad time value: {}", req.time)))?;

    let (schedule, room) = state
        .catalog
        .create_schedule(req.id_cinema, req.date, time)
        .await?;
    state
        .store
        .create(schedule.id, room.rows_num, room.columns_num)
        .await;
    tracing::debug!("schedule {} created by user {}", schedule.id, user.user_id);

    Ok((StatusCode::CREATED, Json(schedule)))
}
