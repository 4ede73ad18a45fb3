use std::collections::HashMap;
use std::sync::Arc;

use chrono::Utc;
use tokio::sync::{Mutex, RwLock};
use tracing::{info, warn};
use uuid::Uuid;

use crate::catalog::Catalog;
use crate::error::ServiceError;
use crate::models::{Reservation, ReservationStatus, SeatId};
use crate::store::SeatMapStore;

/// Состояние идемпотентного токена. InFlight отсекает конкурирующий дубль,
/// пока первый запрос ещё не зафиксирован.
enum TokenState {
    InFlight,
    Completed(Uuid),
}

/// Движок резервирования - единственный путь, создающий брони и меняющий
/// владение местами. Вся сериализация конфликтующих заявок делегирована
/// хранилищу (write-блокировка сеанса в try_claim), здесь - валидация,
/// идемпотентность и реестр броней.
pub struct ReservationService {
    store: Arc<SeatMapStore>,
    catalog: Arc<Catalog>,
    reservations: RwLock<HashMap<Uuid, Reservation>>,
    tokens: Mutex<HashMap<String, TokenState>>,
}

impl ReservationService {
    pub fn new(store: Arc<SeatMapStore>, catalog: Arc<Catalog>) -> Self {
        Self {
            store,
            catalog,
            reservations: RwLock::new(HashMap::new()),
            tokens: Mutex::new(HashMap::new()),
        }
    }

    /// Забронировать набор мест. Либо вся заявка проходит атомарно, либо
    /// хранилище остаётся нетронутым (SeatConflict / InvalidRequest / Busy).
    ///
    /// Повтор с тем же idempotency-токеном после успеха возвращает исходную
    /// бронь, а не создаёт дубль.
    pub async fn reserve(
        &self,
        user_id: i32,
        id_schedule: i64,
        seats: Vec<SeatId>,
        idempotency_token: Option<String>,
    ) -> Result<Reservation, ServiceError> {
        if self.catalog.schedule(id_schedule).await.is_none() {
            return Err(ServiceError::NotFound("schedule"));
        }

        // Идемпотентность: токен скоупится на пользователя, чтобы чужой
        // токен нельзя было угадать и получить чужую бронь
        let token_key = idempotency_token.map(|t| format!("{}:{}", user_id, t));
        if let Some(key) = &token_key {
            let mut tokens = self.tokens.lock().await;
            match tokens.get(key) {
                Some(TokenState::Completed(rid)) => {
                    let rid = *rid;
                    if let Some(existing) = self.reservations.read().await.get(&rid) {
                        info!("idempotent replay of reservation {}", rid);
                        return Ok(existing.clone());
                    }
                    // бронь уже заархивирована - токен протух
                    tokens.insert(key.clone(), TokenState::InFlight);
                }
                Some(TokenState::InFlight) => {
                    // Дубль пришёл, пока первый запрос ещё в полёте
                    warn!("duplicate in-flight reservation request, token {}", key);
                    return Err(ServiceError::Busy);
                }
                None => {
                    tokens.insert(key.clone(), TokenState::InFlight);
                }
            }
        }

        let reservation_id = Uuid::new_v4();
        let claim = self
            .store
            .try_claim(id_schedule, &seats, reservation_id)
            .await;

        if let Err(err) = claim {
            // неуспех не потребляет токен - клиент может повторить
            if let Some(key) = &token_key {
                self.tokens.lock().await.remove(key);
            }
            return Err(err);
        }

        let reservation = Reservation {
            id: reservation_id,
            user_id,
            id_schedule,
            seats,
            status: ReservationStatus::Confirmed,
            created_at: Utc::now().naive_utc(),
        };
        self.reservations
            .write()
            .await
            .insert(reservation_id, reservation.clone());
        if let Some(key) = token_key {
            self.tokens
                .lock()
                .await
                .insert(key, TokenState::Completed(reservation_id));
        }

        info!(
            "reservation {} confirmed: user {}, schedule {}, seats [{}]",
            reservation_id,
            user_id,
            id_schedule,
            reservation.seat_labels().join(", ")
        );
        Ok(reservation)
    }

    /// Отмена брони владельцем. Идемпотентна: повторная отмена уже
    /// отменённой брони - no-op, не ошибка.
    pub async fn cancel(
        &self,
        reservation_id: Uuid,
        user_id: i32,
    ) -> Result<Reservation, ServiceError> {
        let mut reservations = self.reservations.write().await;
        let reservation = reservations
            .get_mut(&reservation_id)
            .ok_or(ServiceError::NotFound("reservation"))?;

        if reservation.user_id != user_id {
            return Err(ServiceError::NotOwner);
        }
        if reservation.status == ReservationStatus::Cancelled {
            return Ok(reservation.clone());
        }

        // Если сеанс уже заархивирован, мест больше нет - просто гасим бронь
        match self
            .store
            .release(reservation.id_schedule, &reservation.seats, reservation_id)
            .await
        {
            Ok(freed) => info!("reservation {} cancelled, {} seats freed", reservation_id, freed),
            Err(ServiceError::NotFound(_)) => {
                info!("reservation {} cancelled after schedule archival", reservation_id)
            }
            Err(other) => return Err(other),
        }

        reservation.status = ReservationStatus::Cancelled;
        Ok(reservation.clone())
    }

    pub async fn get(&self, reservation_id: Uuid) -> Option<Reservation> {
        self.reservations.read().await.get(&reservation_id).cloned()
    }

    /// Брони пользователя, свежие первыми
    pub async fn for_user(&self, user_id: i32) -> Vec<Reservation> {
        let mut out: Vec<Reservation> = self
            .reservations
            .read()
            .await
            .values()
            .filter(|r| r.user_id == user_id)
            .cloned()
            .collect();
        out.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(a.id.cmp(&b.id)));
        out
    }

    /// Подтверждённые брони сеанса (используется сверкой инвариантов и
    /// архивной зачисткой)
    pub async fn confirmed_for_schedule(&self, id_schedule: i64) -> Vec<Reservation> {
        self.reservations
            .read()
            .await
            .values()
            .filter(|r| r.id_schedule == id_schedule && r.status == ReservationStatus::Confirmed)
            .cloned()
            .collect()
    }
}
