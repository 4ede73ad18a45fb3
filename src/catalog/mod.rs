use std::collections::HashMap;
use std::sync::atomic::{AtomicI64, Ordering};

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use tokio::sync::RwLock;
use tracing::info;

use crate::error::ServiceError;
use crate::models::{Room, Schedule};

/// Справочник залов и сеансов. Справочные данные создаются административной
/// стороной и не меняются после создания; ядро резервирования их только
/// читает.
pub struct Catalog {
    rooms: RwLock<HashMap<i64, Room>>,
    schedules: RwLock<HashMap<i64, Schedule>>,
    next_room_id: AtomicI64,
    next_schedule_id: AtomicI64,
}

impl Catalog {
    pub fn new() -> Self {
        Self {
            rooms: RwLock::new(HashMap::new()),
            schedules: RwLock::new(HashMap::new()),
            next_room_id: AtomicI64::new(1),
            next_schedule_id: AtomicI64::new(1),
        }
    }

    pub async fn create_room(
        &self,
        name: String,
        movie: String,
        img: Option<String>,
        rows_num: i32,
        columns_num: i32,
    ) -> Room {
        let room = Room {
            id: self.next_room_id.fetch_add(1, Ordering::Relaxed),
            name,
            movie,
            img,
            rows_num,
            columns_num,
        };
        self.rooms.write().await.insert(room.id, room.clone());
        info!("room {} created: {} ({} seats)", room.id, room.name, room.capacity());
        room
    }

    pub async fn room(&self, id: i64) -> Option<Room> {
        self.rooms.read().await.get(&id).cloned()
    }

    pub async fn rooms(&self) -> Vec<Room> {
        let mut rooms: Vec<Room> = self.rooms.read().await.values().cloned().collect();
        rooms.sort_by_key(|r| r.id);
        rooms
    }

    /// Создаёт сеанс; зал должен существовать. Возвращает сеанс и зал, чтобы
    /// вызывающая сторона могла материализовать карту мест нужного размера.
    pub async fn create_schedule(
        &self,
        id_cinema: i64,
        date: NaiveDate,
        time: NaiveTime,
    ) -> Result<(Schedule, Room), ServiceError> {
        let room = self
            .room(id_cinema)
            .await
            .ok_or(ServiceError::NotFound("room"))?;

        let schedule = Schedule {
            id: self.next_schedule_id.fetch_add(1, Ordering::Relaxed),
            id_cinema,
            date,
            time,
        };
        self.schedules
            .write()
            .await
            .insert(schedule.id, schedule.clone());
        info!("schedule {} created for room {}", schedule.id, id_cinema);
        Ok((schedule, room))
    }

    pub async fn schedule(&self, id: i64) -> Option<Schedule> {
        self.schedules.read().await.get(&id).cloned()
    }

    pub async fn schedules(&self, room: Option<i64>) -> Vec<Schedule> {
        let mut out: Vec<Schedule> = self
            .schedules
            .read()
            .await
            .values()
            .filter(|s| room.is_none_or(|r| s.id_cinema == r))
            .cloned()
            .collect();
        out.sort_by_key(|s| s.id);
        out
    }

    /// Сеансы, начавшиеся раньше cutoff (кандидаты на архивацию)
    pub async fn started_before(&self, cutoff: NaiveDateTime) -> Vec<i64> {
        self.schedules
            .read()
            .await
            .values()
            .filter(|s| s.starts_at() < cutoff)
            .map(|s| s.id)
            .collect()
    }

    pub async fn remove_schedule(&self, id: i64) -> bool {
        self.schedules.write().await.remove(&id).is_some()
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hm(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[tokio::test]
    async fn schedule_requires_existing_room() {
        let catalog = Catalog::new();
        let err = catalog
            .create_schedule(1, date(2026, 9, 1), hm(19, 30))
            .await
            .unwrap_err();
        assert_eq!(err, ServiceError::NotFound("room"));
    }

    #[tokio::test]
    async fn room_filter_on_schedules() {
        let catalog = Catalog::new();
        let r1 = catalog
            .create_room("Sala 1".into(), "Avatar 2".into(), None, 5, 8)
            .await;
        let r2 = catalog
            .create_room("Sala 2".into(), "Spiderman 2".into(), None, 4, 6)
            .await;
        catalog
            .create_schedule(r1.id, date(2026, 9, 1), hm(19, 30))
            .await
            .unwrap();
        catalog
            .create_schedule(r2.id, date(2026, 9, 1), hm(21, 0))
            .await
            .unwrap();

        assert_eq!(catalog.schedules(None).await.len(), 2);
        let filtered = catalog.schedules(Some(r2.id)).await;
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].id_cinema, r2.id);
    }

    #[tokio::test]
    async fn started_before_picks_old_schedules() {
        let catalog = Catalog::new();
        let room = catalog
            .create_room("Sala 1".into(), "Avatar 2".into(), None, 5, 8)
            .await;
        let (old, _) = catalog
            .create_schedule(room.id, date(2020, 1, 1), hm(12, 0))
            .await
            .unwrap();
        catalog
            .create_schedule(room.id, date(2099, 1, 1), hm(12, 0))
            .await
            .unwrap();

        let cutoff = date(2026, 1, 1).and_time(hm(0, 0));
        assert_eq!(catalog.started_before(cutoff).await, vec![old.id]);
    }
}
