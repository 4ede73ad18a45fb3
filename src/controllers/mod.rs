pub mod auth;
pub mod rooms;
pub mod schedules;
pub mod seats;
pub mod reservations;

use axum::Router;
use std::sync::Arc;

pub fn routes() -> Router<Arc<crate::AppState>> {
    Router::new()
        .merge(auth::routes())
        .merge(rooms::routes())
        .merge(schedules::routes())
        .merge(seats::routes())
        .merge(reservations::routes())
}
