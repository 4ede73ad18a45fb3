use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Room {
    pub id: i64,
    pub name: String,
    pub movie: String,
    pub img: Option<String>,
    pub rows_num: i32,
    pub columns_num: i32,
}

impl Room {
    pub fn capacity(&self) -> i64 {
        self.rows_num as i64 * self.columns_num as i64
    }
}
