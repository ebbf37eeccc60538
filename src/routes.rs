//! Router assembly.

use axum::{routing::get, Router};
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};

use crate::{
    handlers,
    session::{MemoryStore, SessionManagerLayer},
    state::AppState,
};

/// Build the application router.
///
/// The session layer must wrap every route: handlers and the CSRF extractor
/// read the session out of request extensions.
pub fn router(state: AppState, session_layer: SessionManagerLayer<MemoryStore>) -> Router {
    Router::new()
        .route("/", get(handlers::home))
        .route("/about", get(handlers::about))
        .route("/contact", get(handlers::contact))
        .route(
            "/make-reservation",
            get(handlers::make_reservation).post(handlers::post_make_reservation),
        )
        .route("/reservation-summary", get(handlers::reservation_summary))
        .route(
            "/search-availability",
            get(handlers::search_availability).post(handlers::post_search_availability),
        )
        .layer(session_layer)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new())
                .on_response(DefaultOnResponse::new()),
        )
        .with_state(state)
}
