use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

/// Сеанс: показ фильма в конкретном зале в конкретные дату и время.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Schedule {
    pub id: i64,
    pub id_cinema: i64,
    pub date: NaiveDate,
    #[serde(with = "short_time")]
    pub time: NaiveTime,
}

impl Schedule {
    pub fn starts_at(&self) -> NaiveDateTime {
        self.date.and_time(self.time)
    }
}

// Фронтенд шлёт время как "19:30" (input type=time), chrono по умолчанию
// требует секунды. Принимаем оба варианта, отдаём всегда "HH:MM".
mod short_time {
    use chrono::NaiveTime;
    use serde::{self, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(time: &NaiveTime, ser: S) -> Result<S::Ok, S::Error> {
        ser.serialize_str(&time.format("%H:%M").to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(de: D) -> Result<NaiveTime, D::Error> {
        let raw = String::deserialize(de)?;
        NaiveTime::parse_from_str(&raw, "%H:%M")
            .or_else(|_| NaiveTime::parse_from_str(&raw, "%H:%M:%S"))
            .map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_time_without_seconds() {
        let s: Schedule = serde_json::from_str(
            r#"{"id":1,"id_cinema":2,"date":"2026-09-01","time":"19:30"}"#,
        )
        .unwrap();
        assert_eq!(s.time, NaiveTime::from_hms_opt(19, 30, 0).unwrap());
        let back = serde_json::to_string(&s).unwrap();
        assert!(back.contains(r#""time":"19:30""#));
    }
}
