pub mod config;
pub mod error;
pub mod models;
pub mod catalog;
pub mod store;
pub mod controllers;
pub mod middleware;
pub mod services;

use std::sync::Arc;

// Shared state для всего приложения
pub struct AppState {
    pub config: config::Config,
    pub catalog: Arc<catalog::Catalog>,
    pub store: Arc<store::SeatMapStore>,
    pub reservations: Arc<services::reservations::ReservationService>,
    pub users: services::users::UserRegistry,
}

impl AppState {
    pub fn new(config: config::Config) -> Arc<Self> {
        let catalog = Arc::new(catalog::Catalog::new());
        let store = Arc::new(store::SeatMapStore::new(&config.store));
        let reservations = Arc::new(services::reservations::ReservationService::new(
            store.clone(),
            catalog.clone(),
        ));
        Arc::new(Self {
            config,
            catalog,
            store,
            reservations,
            users: services::users::UserRegistry::new(),
        })
    }
}
