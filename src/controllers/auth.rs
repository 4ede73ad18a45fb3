use axum::{
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::post,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::sync::Arc;
use validator::Validate;

use crate::error::ServiceError;
use crate::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/auth/register", post(register))
        .route("/auth/login", post(login))
}

#[derive(Debug, Deserialize, Validate)]
struct RegisterRequest {
    #[validate(email)]
    email: String,
    #[validate(length(min = 4, max = 72))]
    password: String,
    #[validate(length(min = 1, max = 100))]
    first_name: String,
    #[validate(length(min = 1, max = 100))]
    surname: String,
}

#[derive(Debug, Serialize)]
struct UserProfile {
    user_id: i32,
    email: String,
    first_name: String,
    surname: String,
}

// POST /api/auth/register
async fn register(
    State(state): State<Arc<AppState>>,
    Json(req): Json<RegisterRequest>,
) -> Result<impl IntoResponse, ServiceError> {
    req.validate()
        .map_err(|e| ServiceError::InvalidRequest(e.to_string()))?;

    let user = state
        .users
        .register(req.email, &req.password, req.first_name, req.surname)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(UserProfile {
            user_id: user.user_id,
            email: user.email,
            first_name: user.first_name,
            surname: user.surname,
        }),
    ))
}

// POST /api/auth/login - Basic auth в заголовке, тело не нужно
async fn login(user: crate::middleware::AuthUser) -> impl IntoResponse {
    Json(json!({
        "user": {
            "id": user.user_id,
            "email": user.email,
            "name": format!("{} {}", user.first_name, user.surname),
        }
    }))
}
