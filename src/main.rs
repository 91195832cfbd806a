use axum::{Router, routing::get};
use studyhall::{AppState, activity, api, auth, config::Config, db, home, profiles, res, rooms, topics};
use tokio::signal::ctrl_c;
use tower_sessions::{Expiry, MemoryStore, SessionManagerLayer, cookie::SameSite};
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt};

#[tokio::main]
async fn main() {
    dotenv::dotenv().ok();
    fmt().with_env_filter(EnvFilter::from_default_env()).init();

    let config = Config::load();

    let db_pool = db::connect(&config.database_url)
        .await
        .expect("database init failed");

    let session_store = MemoryStore::default();
    let session_layer = SessionManagerLayer::new(session_store)
        .with_secure(false)
        .with_same_site(SameSite::Lax)
        .with_expiry(Expiry::OnInactivity(time::Duration::minutes(
            config.session_minutes,
        )));

    let app_state = AppState { db_pool };

    let app = Router::new()
        .route("/", get(home::home))
        .route("/topics", get(topics::topics))
        .route("/activity", get(activity::activity))
        .route("/avatar.svg", get(res::avatar))
        .merge(auth::router())
        .nest("/r", rooms::router())
        .nest("/m", rooms::msg::router())
        .nest("/p", profiles::router())
        .nest("/api", api::router())
        .with_state(app_state)
        .layer(session_layer);

    info!("binding to {}", config.bind_addr);
    let listener = tokio::net::TcpListener::bind(&config.bind_addr)
        .await
        .expect("bind failed");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("server error");
}

async fn shutdown_signal() {
    ctrl_c().await.expect("Failed to install Ctrl+C handler");
    info!("Received Ctrl+C, shutting down");
}
