pub mod seat_map;

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::RwLock;
use tokio::time::timeout;
use tracing::{debug, info};
use uuid::Uuid;

use crate::config::StoreConfig;
use crate::error::ServiceError;
use crate::models::{SeatId, SeatView};

pub use seat_map::SeatMap;

/// Единственный источник истины о статусах мест. Каждый сеанс живёт под
/// собственной RwLock, поэтому конфликтующие заявки одного сеанса строго
/// упорядочены, а разные сеансы не мешают друг другу вовсе.
///
/// Чтения (снапшоты) идут по read-блокировке и никогда не наблюдают
/// наполовину применённый захват.
pub struct SeatMapStore {
    maps: RwLock<HashMap<i64, Arc<RwLock<SeatMap>>>>,
    lock_wait: Duration,
}

impl SeatMapStore {
    pub fn new(config: &StoreConfig) -> Self {
        Self {
            maps: RwLock::new(HashMap::new()),
            lock_wait: Duration::from_millis(config.lock_wait_ms),
        }
    }

    /// Материализует карту мест сеанса (все места свободны). Вызывается при
    /// создании сеанса; повторный вызов для того же id — no-op.
    pub async fn create(&self, schedule_id: i64, rows: i32, columns: i32) {
        let mut maps = self.maps.write().await;
        maps.entry(schedule_id)
            .or_insert_with(|| Arc::new(RwLock::new(SeatMap::new(rows, columns))));
        debug!("seat map created for schedule {} ({}x{})", schedule_id, rows, columns);
    }

    async fn map_for(&self, schedule_id: i64) -> Result<Arc<RwLock<SeatMap>>, ServiceError> {
        self.maps
            .read()
            .await
            .get(&schedule_id)
            .cloned()
            .ok_or(ServiceError::NotFound("schedule"))
    }

    /// Консистентный снимок зала: состояние на один момент времени, без
    /// смешения до/после чьего-то захвата.
    pub async fn snapshot(&self, schedule_id: i64) -> Result<Vec<SeatView>, ServiceError> {
        let map = self.map_for(schedule_id).await?;
        let guard = map.read().await;
        Ok(guard.snapshot())
    }

    /// Атомарный захват набора мест под бронь. Write-блокировку сеанса ждём
    /// не дольше lock_wait, иначе Busy (клиент может повторить).
    pub async fn try_claim(
        &self,
        schedule_id: i64,
        seats: &[SeatId],
        reservation_id: Uuid,
    ) -> Result<(), ServiceError> {
        let map = self.map_for(schedule_id).await?;
        let mut guard = timeout(self.lock_wait, map.write())
            .await
            .map_err(|_| ServiceError::Busy)?;
        guard.claim(seats, reservation_id)
    }

    /// Возврат мест брони в доступные. Чужие места не трогаются - владение
    /// проверяется по reservation_id на каждом месте.
    pub async fn release(
        &self,
        schedule_id: i64,
        seats: &[SeatId],
        reservation_id: Uuid,
    ) -> Result<usize, ServiceError> {
        let map = self.map_for(schedule_id).await?;
        let mut guard = timeout(self.lock_wait, map.write())
            .await
            .map_err(|_| ServiceError::Busy)?;
        Ok(guard.release(seats, reservation_id))
    }

    /// Занятые места сеанса с владельцами (для сверки инвариантов)
    pub async fn reserved(&self, schedule_id: i64) -> Result<Vec<(SeatId, Uuid)>, ServiceError> {
        let map = self.map_for(schedule_id).await?;
        let guard = map.read().await;
        Ok(guard.reserved())
    }

    /// Архивная зачистка: карта сеанса удаляется целиком
    pub async fn remove(&self, schedule_id: i64) -> bool {
        let removed = self.maps.write().await.remove(&schedule_id).is_some();
        if removed {
            info!("🧹 seat map for schedule {} archived", schedule_id);
        }
        removed
    }

    pub async fn len(&self) -> usize {
        self.maps.read().await.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> StoreConfig {
        StoreConfig {
            lock_wait_ms: 100,
            retention_hours: 24,
            sweep_interval_secs: 300,
        }
    }

    #[tokio::test]
    async fn unknown_schedule_is_not_found() {
        let store = SeatMapStore::new(&test_config());
        assert_eq!(
            store.snapshot(99).await.unwrap_err(),
            ServiceError::NotFound("schedule")
        );
        assert_eq!(
            store
                .try_claim(99, &[SeatId::new(0, 0)], Uuid::new_v4())
                .await
                .unwrap_err(),
            ServiceError::NotFound("schedule")
        );
    }

    #[tokio::test]
    async fn claim_then_snapshot_round_trip() {
        let store = SeatMapStore::new(&test_config());
        store.create(7, 4, 5).await;

        let rid = Uuid::new_v4();
        store
            .try_claim(7, &[SeatId::new(1, 2), SeatId::new(1, 3)], rid)
            .await
            .unwrap();

        let snap = store.snapshot(7).await.unwrap();
        assert_eq!(snap.len(), 20);
        let reserved: Vec<&str> = snap
            .iter()
            .filter(|s| s.status == crate::models::SeatStatus::Reserved)
            .map(|s| s.full_name.as_str())
            .collect();
        assert_eq!(reserved, vec!["B3", "B4"]);
    }

    #[tokio::test]
    async fn busy_when_write_lock_is_held() {
        let store = SeatMapStore::new(&test_config());
        store.create(1, 2, 2).await;

        // держим write-блокировку дольше, чем lock_wait
        let map = store.map_for(1).await.unwrap();
        let guard = map.write().await;

        let err = store
            .try_claim(1, &[SeatId::new(0, 0)], Uuid::new_v4())
            .await
            .unwrap_err();
        assert_eq!(err, ServiceError::Busy);
        drop(guard);

        // после освобождения блокировки захват проходит
        store
            .try_claim(1, &[SeatId::new(0, 0)], Uuid::new_v4())
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn create_twice_keeps_existing_state() {
        let store = SeatMapStore::new(&test_config());
        store.create(3, 2, 2).await;
        let rid = Uuid::new_v4();
        store.try_claim(3, &[SeatId::new(0, 0)], rid).await.unwrap();

        store.create(3, 2, 2).await;
        assert_eq!(store.reserved(3).await.unwrap().len(), 1);
    }
}
