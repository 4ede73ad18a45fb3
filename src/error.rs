use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Единая таксономия ошибок сервиса. Любая мутирующая операция, вернувшая
/// ошибку, оставляет хранилище мест без изменений.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ServiceError {
    /// Некорректный вход (пустой набор мест, дубликаты, выход за сетку зала).
    /// Повтор без исправления бессмысленен.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// Хотя бы одно из запрошенных мест уже занято. Вся заявка отклонена
    /// целиком, клиенту нужно выбрать места заново.
    #[error("seats already reserved: {}", .0.join(", "))]
    SeatConflict(Vec<String>),

    /// Не дождались блокировки сеанса за отведённое время. Можно повторить
    /// с backoff.
    #[error("store is busy, retry later")]
    Busy,

    #[error("{0} not found")]
    NotFound(&'static str),

    /// Попытка отменить чужую бронь.
    #[error("reservation belongs to another user")]
    NotOwner,
}

impl ServiceError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ServiceError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            ServiceError::SeatConflict(_) => StatusCode::CONFLICT,
            ServiceError::Busy => StatusCode::SERVICE_UNAVAILABLE,
            ServiceError::NotFound(_) => StatusCode::NOT_FOUND,
            ServiceError::NotOwner => StatusCode::FORBIDDEN,
        }
    }

    /// Имеет ли смысл клиенту повторять запрос как есть
    pub fn is_retryable(&self) -> bool {
        matches!(self, ServiceError::Busy)
    }
}

impl IntoResponse for ServiceError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = match &self {
            ServiceError::SeatConflict(labels) => json!({
                "error": self.to_string(),
                "conflicts": labels,
                "retryable": false,
            }),
            other => json!({
                "error": other.to_string(),
                "retryable": other.is_retryable(),
            }),
        };
        (status, Json(body)).into_response()
    }
}
