use axum::{routing::get, Router};
use std::net::SocketAddr;
use std::time::Duration;
use tokio::task;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use cinema_seats::{config::Config, controllers, services::cleanup::ArchiveService, AppState};

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    let config = Config::from_env();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(&config.app.rust_log))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Cinema Seats API");

    let sweep_interval = Duration::from_secs(config.store.sweep_interval_secs);
    let enable_archiver = config.features.enable_archiver;
    let app_state = AppState::new(config.clone());

    // --- Start background tasks ---

    // Фоновая архивация отыгравших сеансов
    if enable_archiver {
        let archiver = ArchiveService::new(app_state.clone());
        task::spawn(async move {
            loop {
                tokio::time::sleep(sweep_interval).await;
                archiver.run_sweep().await;
            }
        });
    }

    // --- Start the web server ---

    let app = Router::new()
        .route("/", get(|| async { "Cinema Seats API v1.0" }))
        .route("/health", get(|| async { "OK" }))
        // Mount the routes from the controllers module
        .nest("/api", controllers::routes())
        // Pass the application state to the router
        .with_state(app_state.clone())
        // Фронтенд ходит из браузера с другого origin
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http());

    let addr = SocketAddr::from(([0, 0, 0, 0], config.app.port));
    info!("Server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await.unwrap();
    axum::serve(listener, app.into_make_service())
        .await
        .unwrap();
}
