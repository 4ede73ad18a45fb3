use serde::Deserialize;
use std::env;

// Главная структура конфигурации - контейнер для всех настроек
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub app: AppConfig,
    pub store: StoreConfig,
    pub features: FeatureFlags,
}

// Настройки приложения
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub environment: String,
    pub rust_log: String,
}

// Настройки хранилища мест
#[derive(Debug, Clone, Deserialize)]
pub struct StoreConfig {
    /// Сколько ждать write-блокировку сеанса, прежде чем ответить Busy
    pub lock_wait_ms: u64,
    /// Через сколько часов после начала сеанса его карта мест архивируется
    pub retention_hours: i64,
    /// Период фоновой зачистки устаревших сеансов
    pub sweep_interval_secs: u64,
}

// Feature flags для включения/выключения функциональности
#[derive(Debug, Clone, Deserialize)]
pub struct FeatureFlags {
    pub enable_archiver: bool,
}

impl Config {
    pub fn from_env() -> Self {
        Config {
            app: AppConfig {
                host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
                port: env::var("PORT")
                    .unwrap_or_else(|_| "8000".to_string())
                    .parse()
                    .expect("PORT must be a valid number"),
                environment: env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string()),
                rust_log: env::var("RUST_LOG")
                    .unwrap_or_else(|_| "cinema_seats=debug,tower_http=debug".to_string()),
            },
            store: StoreConfig {
                lock_wait_ms: env::var("LOCK_WAIT_MS")
                    .unwrap_or_else(|_| "250".to_string())
                    .parse()
                    .expect("LOCK_WAIT_MS must be a valid number"),
                retention_hours: env::var("RETENTION_HOURS")
                    .unwrap_or_else(|_| "24".to_string())
                    .parse()
                    .expect("RETENTION_HOURS must be a valid number"),
                sweep_interval_secs: env::var("SWEEP_INTERVAL_SECS")
                    .unwrap_or_else(|_| "300".to_string())
                    .parse()
                    .expect("SWEEP_INTERVAL_SECS must be a valid number"),
            },
            features: FeatureFlags {
                enable_archiver: env::var("ENABLE_ARCHIVER")
                    .unwrap_or_else(|_| "true".to_string())
                    .parse()
                    .expect("ENABLE_ARCHIVER must be true or false"),
            },
        }
    }

    /// Конфиг по умолчанию для тестов, без чтения окружения
    pub fn for_tests() -> Self {
        Config {
            app: AppConfig {
                host: "127.0.0.1".to_string(),
                port: 0,
                environment: "test".to_string(),
                rust_log: "cinema_seats=debug".to_string(),
            },
            store: StoreConfig {
                lock_wait_ms: 250,
                retention_hours: 24,
                sweep_interval_secs: 300,
            },
            features: FeatureFlags {
                enable_archiver: false,
            },
        }
    }
}
