use serde::{Deserialize, Serialize};

/// Идентичность места: пара (ряд, колонка) в рамках одного сеанса.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SeatId {
    pub row: i32,
    pub column: i32,
}

impl SeatId {
    pub fn new(row: i32, column: i32) -> Self {
        Self { row, column }
    }

    /// Человекочитаемая метка: ряд 0 -> 'A', колонка 0 -> "1".
    pub fn full_name(&self) -> String {
        let letter = (b'A' + self.row as u8) as char;
        format!("{}{}", letter, self.column + 1)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SeatStatus {
    Available,
    Reserved,
}

// То, что видит клиент в снапшоте зала
#[derive(Debug, Clone, Serialize)]
pub struct SeatView {
    pub row: i32,
    pub column: i32,
    pub full_name: String,
    pub status: SeatStatus,
}
