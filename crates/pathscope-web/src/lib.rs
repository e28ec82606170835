//! Pathscope Web Server
//!
//! Axum-based JSON API for database management, plus WebSocket fan-out of
//! server events.

pub mod auth;
pub mod error;
pub mod routes;
pub mod state;
pub mod websocket;

use axum::routing::{get, post};
use axum::Router;
use pathscope_core::config::Config;
use pathscope_core::datapipe::Datapipe;
use pathscope_core::notifier::WebNotifier;
use pathscope_db::DbPool;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use state::AppState;

/// Create the application router.
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api_routes = Router::new()
        .route("/self", get(routes::permissions::get_self))
        .route("/asset-groups", get(routes::asset_groups::list_asset_groups))
        .route(
            "/asset-groups/{id}/selectors",
            get(routes::asset_groups::list_selectors).post(routes::asset_groups::add_selector),
        )
        .route("/graph", get(routes::graph::get_graph))
        .route("/clear-database", post(routes::database::clear_database))
        .route("/datapipe/status", get(routes::database::datapipe_status))
        .route("/file-ingest/history", get(routes::ingest::list_history))
        .route("/data-quality/history", get(routes::quality::list_history))
        .with_state(state.clone());

    Router::new()
        .nest("/api/v2", api_routes)
        .route("/ws", get(websocket::ws_handler))
        .route("/internal/notify", post(routes::internal::notify))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Run the web server together with its datapipe daemon.
pub async fn run_server(db: DbPool, config: &Config) -> anyhow::Result<()> {
    let state = AppState::new(db.clone(), config.admin_token.clone());
    let app = create_router(state);

    let notifier = WebNotifier::new(&config.web_url);
    let datapipe = Datapipe::new(db, config.tick_interval).with_notifier(notifier);
    tokio::spawn(datapipe.run());

    let listener = tokio::net::TcpListener::bind(format!("127.0.0.1:{}", config.port)).await?;
    tracing::info!("web server listening on http://127.0.0.1:{}", config.port);

    axum::serve(listener, app).await?;
    Ok(())
}
