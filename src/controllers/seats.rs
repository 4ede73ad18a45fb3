use axum::{
    extract::{Path, State},
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use std::sync::Arc;

use crate::error::ServiceError;
use crate::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route("/seats/{schedule_id}", get(get_seats))
}

// GET /api/seats/{schedule_id} - снимок зала для отрисовки сетки
async fn get_seats(
    State(state): State<Arc<AppState>>,
    Path(schedule_id): Path<i64>,
) -> Result<impl IntoResponse, ServiceError> {
    let seats = state.store.snapshot(schedule_id).await?;
    Ok(Json(seats))
}
