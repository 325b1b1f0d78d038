use axum::Router;
use axum::routing::{get, post};
use tower_http::trace::TraceLayer;
use tower_sessions::cookie::SameSite;
use tower_sessions::cookie::time::Duration;
use tower_sessions::{Expiry, MemoryStore, SessionManagerLayer};

use crate::handlers;
use crate::state::AppState;

/// Session layer holding each operator's selection for the life of the session.
pub fn build_session_layer(cookie_secure: bool) -> SessionManagerLayer<MemoryStore> {
    SessionManagerLayer::new(MemoryStore::default())
        .with_secure(cookie_secure)
        .with_same_site(SameSite::Lax)
        .with_http_only(true)
        .with_expiry(Expiry::OnInactivity(Duration::minutes(30)))
}

pub fn build_router(
    app_state: AppState,
    session_layer: SessionManagerLayer<MemoryStore>,
) -> Router {
    Router::new()
        .route("/", get(handlers::dashboard::dashboard_page_handler))
        .route("/selection", post(handlers::selection::select_user_handler))
        .route("/selection/row", post(handlers::selection::select_row_handler))
        .route(
            "/api/dashboard",
            get(handlers::dashboard::dashboard_json_handler),
        )
        .route(
            "/api/selection",
            get(handlers::selection::get_selection_handler)
                .put(handlers::selection::put_selection_handler),
        )
        .route("/health", get(handlers::health::health_handler))
        .layer(TraceLayer::new_for_http())
        .layer(session_layer)
        .with_state(app_state)
}
