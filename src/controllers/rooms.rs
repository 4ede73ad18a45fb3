use axum::{
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use std::sync::Arc;
use validator::Validate;

use crate::error::ServiceError;
use crate::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/rooms", get(list_rooms))
        .route("/rooms", post(create_room))
}

// GET /api/rooms
async fn list_rooms(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(state.catalog.rooms().await)
}

#[derive(Debug, Deserialize, Validate)]
struct CreateRoomRequest {
    #[validate(length(min = 1, max = 100))]
    name: String,
    #[validate(length(min = 1, max = 200))]
    movie: String,
    img: Option<String>,
    // Ряды помечаются буквами A-Z, поэтому не больше 26
    #[validate(range(min = 1, max = 26))]
    rows_num: i32,
    #[validate(range(min = 1, max = 100))]
    columns_num: i32,
}

// POST /api/rooms - административная сторона справочника
async fn create_room(
    State(state): State<Arc<AppState>>,
    user: crate::middleware::AuthUser,
    Json(req): Json<CreateRoomRequest>,
) -> Result<impl IntoResponse, ServiceError> {
    req.validate()
        .map_err(|e| ServiceError::InvalidRequest(e.to_string()))?;

    let room = state
        .catalog
        .create_room(req.name, req.movie, req.img, req.rows_num, req.columns_num)
        .await;
    tracing::debug!("room {} created by user {}", room.id, user.user_id);

    Ok((StatusCode::CREATED, Json(room)))
}
