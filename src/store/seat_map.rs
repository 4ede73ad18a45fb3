use uuid::Uuid;

use crate::error::ServiceError;
use crate::models::{SeatId, SeatStatus, SeatView};

/// Сетка мест одного сеанса. Ячейка хранит владельца-бронь (или None для
/// свободного места), поэтому два активных владельца на одно место
/// невозможны по построению.
#[derive(Debug, Clone)]
pub struct SeatMap {
    rows: i32,
    columns: i32,
    cells: Vec<Option<Uuid>>,
}

impl SeatMap {
    pub fn new(rows: i32, columns: i32) -> Self {
        debug_assert!(rows > 0 && columns > 0);
        Self {
            rows,
            columns,
            cells: vec![None; (rows * columns) as usize],
        }
    }

    pub fn rows(&self) -> i32 {
        self.rows
    }

    pub fn columns(&self) -> i32 {
        self.columns
    }

    fn index(&self, seat: SeatId) -> Option<usize> {
        if seat.row < 0 || seat.row >= self.rows || seat.column < 0 || seat.column >= self.columns {
            return None;
        }
        Some((seat.row * self.columns + seat.column) as usize)
    }

    pub fn owner(&self, seat: SeatId) -> Option<Uuid> {
        self.index(seat).and_then(|i| self.cells[i])
    }

    /// Проверка входа: непустой набор, без дубликатов, все в пределах сетки.
    fn validate(&self, seats: &[SeatId]) -> Result<(), ServiceError> {
        if seats.is_empty() {
            return Err(ServiceError::InvalidRequest(
                "seat list must not be empty".to_string(),
            ));
        }
        for (i, seat) in seats.iter().enumerate() {
            if self.index(*seat).is_none() {
                return Err(ServiceError::InvalidRequest(format!(
                    "seat ({}, {}) is outside the {}x{} room grid",
                    seat.row, seat.column, self.rows, self.columns
                )));
            }
            if seats[..i].contains(seat) {
                return Err(ServiceError::InvalidRequest(format!(
                    "duplicate seat {}",
                    seat.full_name()
                )));
            }
        }
        Ok(())
    }

    /// Атомарный захват: либо все места переходят available -> reserved с
    /// меткой reservation_id, либо ни одно (карта не меняется при ошибке).
    pub fn claim(&mut self, seats: &[SeatId], reservation_id: Uuid) -> Result<(), ServiceError> {
        self.validate(seats)?;

        // Сначала проверяем весь набор, пишем только если конфликтов нет
        let conflicts: Vec<String> = seats
            .iter()
            .filter(|s| self.owner(**s).is_some())
            .map(|s| s.full_name())
            .collect();
        if !conflicts.is_empty() {
            return Err(ServiceError::SeatConflict(conflicts));
        }

        for seat in seats {
            let i = self.index(*seat).unwrap();
            self.cells[i] = Some(reservation_id);
        }
        Ok(())
    }

    /// Освобождение мест. Трогает только места, принадлежащие именно этой
    /// брони; чужие или уже свободные молча пропускаются. Возвращает число
    /// освобождённых мест.
    pub fn release(&mut self, seats: &[SeatId], reservation_id: Uuid) -> usize {
        let mut freed = 0;
        for seat in seats {
            if let Some(i) = self.index(*seat) {
                if self.cells[i] == Some(reservation_id) {
                    self.cells[i] = None;
                    freed += 1;
                }
            }
        }
        freed
    }

    /// Снимок всех мест в порядке ряд-за-рядом
    pub fn snapshot(&self) -> Vec<SeatView> {
        let mut out = Vec::with_capacity(self.cells.len());
        for row in 0..self.rows {
            for column in 0..self.columns {
                let seat = SeatId::new(row, column);
                let status = if self.owner(seat).is_some() {
                    SeatStatus::Reserved
                } else {
                    SeatStatus::Available
                };
                out.push(SeatView {
                    row,
                    column,
                    full_name: seat.full_name(),
                    status,
                });
            }
        }
        out
    }

    /// Все занятые места с их владельцами (для проверок инвариантов)
    pub fn reserved(&self) -> Vec<(SeatId, Uuid)> {
        let mut out = Vec::new();
        for row in 0..self.rows {
            for column in 0..self.columns {
                let seat = SeatId::new(row, column);
                if let Some(owner) = self.owner(seat) {
                    out.push((seat, owner));
                }
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn rid() -> Uuid {
        Uuid::new_v4()
    }

    #[test]
    fn claim_marks_all_seats() {
        let mut map = SeatMap::new(5, 8);
        let r = rid();
        map.claim(&[SeatId::new(0, 0), SeatId::new(0, 1)], r).unwrap();
        assert_eq!(map.owner(SeatId::new(0, 0)), Some(r));
        assert_eq!(map.owner(SeatId::new(0, 1)), Some(r));
        assert_eq!(map.owner(SeatId::new(0, 2)), None);
    }

    #[test]
    fn claim_is_all_or_nothing() {
        let mut map = SeatMap::new(5, 8);
        let first = rid();
        map.claim(&[SeatId::new(0, 1)], first).unwrap();

        // A1 свободно, A2 занято -> вся заявка отклонена, A1 не тронуто
        let err = map
            .claim(&[SeatId::new(0, 0), SeatId::new(0, 1)], rid())
            .unwrap_err();
        assert_eq!(err, ServiceError::SeatConflict(vec!["A2".to_string()]));
        assert_eq!(map.owner(SeatId::new(0, 0)), None);
        assert_eq!(map.owner(SeatId::new(0, 1)), Some(first));
    }

    #[test]
    fn claim_rejects_out_of_bounds_and_duplicates() {
        let mut map = SeatMap::new(2, 2);
        assert!(matches!(
            map.claim(&[SeatId::new(2, 0)], rid()),
            Err(ServiceError::InvalidRequest(_))
        ));
        assert!(matches!(
            map.claim(&[SeatId::new(0, -1)], rid()),
            Err(ServiceError::InvalidRequest(_))
        ));
        assert!(matches!(
            map.claim(&[SeatId::new(0, 0), SeatId::new(0, 0)], rid()),
            Err(ServiceError::InvalidRequest(_))
        ));
        assert!(matches!(
            map.claim(&[], rid()),
            Err(ServiceError::InvalidRequest(_))
        ));
        // после всех отказов карта пуста
        assert!(map.reserved().is_empty());
    }

    #[test]
    fn release_ignores_foreign_ownership() {
        let mut map = SeatMap::new(3, 3);
        let owner = rid();
        map.claim(&[SeatId::new(1, 1)], owner).unwrap();

        // чужая бронь не может освободить место
        assert_eq!(map.release(&[SeatId::new(1, 1)], rid()), 0);
        assert_eq!(map.owner(SeatId::new(1, 1)), Some(owner));

        assert_eq!(map.release(&[SeatId::new(1, 1)], owner), 1);
        assert_eq!(map.owner(SeatId::new(1, 1)), None);
        // повторное освобождение — no-op
        assert_eq!(map.release(&[SeatId::new(1, 1)], owner), 0);
    }

    proptest! {
        /// После любой последовательности claim/release занятые места — это
        /// ровно объединение мест успешных заявок минус освобождённые, и ни
        /// одно место не числится за двумя бронями.
        #[test]
        fn ownership_invariant_holds(ops in proptest::collection::vec(
            (0i32..6, 0i32..6, 0i32..6, 0i32..6, proptest::bool::ANY), 1..40,
        )) {
            let mut map = SeatMap::new(6, 6);
            let mut expected: std::collections::HashMap<SeatId, Uuid> =
                std::collections::HashMap::new();

            for (r1, c1, r2, c2, do_release) in ops {
                let seats = if (r1, c1) == (r2, c2) {
                    vec![SeatId::new(r1, c1)]
                } else {
                    vec![SeatId::new(r1, c1), SeatId::new(r2, c2)]
                };
                if do_release {
                    if let Some(owner) = expected.get(&seats[0]).copied() {
                        map.release(&seats, owner);
                        for s in &seats {
                            if expected.get(s) == Some(&owner) {
                                expected.remove(s);
                            }
                        }
                    }
                } else {
                    let rid = Uuid::new_v4();
                    if map.claim(&seats, rid).is_ok() {
                        for s in &seats {
                            prop_assert!(expected.insert(*s, rid).is_none());
                        }
                    }
                }
            }

            let actual: std::collections::HashMap<SeatId, Uuid> =
                map.reserved().into_iter().collect();
            prop_assert_eq!(actual, expected);
        }
    }
}
