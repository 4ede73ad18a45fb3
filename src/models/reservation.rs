use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::seat::SeatId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReservationStatus {
    Confirmed,
    Cancelled,
}

/// Подтверждённая бронь: создаётся только движком резервирования,
/// после успешного атомарного захвата всех мест.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Reservation {
    pub id: Uuid,
    pub user_id: i32,
    pub id_schedule: i64,
    pub seats: Vec<SeatId>,
    pub status: ReservationStatus,
    pub created_at: NaiveDateTime,
}

impl Reservation {
    /// Метки мест для отображения ("A1, A2")
    pub fn seat_labels(&self) -> Vec<String> {
        self.seats.iter().map(|s| s.full_name()).collect()
    }
}
