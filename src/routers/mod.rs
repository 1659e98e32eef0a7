mod root;
mod song;

use axum::{Router, routing::get};
use tokio_util::sync::CancellationToken;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::controllers::Extractor;

pub use root::{health_check_route, root_route};
pub use song::{discography_route, error_response, song_route};

#[derive(Clone)]
pub struct AppState {
    pub extractor: Extractor,
    /// Cancelled on shutdown; each request extracts under a child token
    pub shutdown: CancellationToken,
}

impl AppState {
    pub fn new(extractor: Extractor) -> Self {
        Self { extractor, shutdown: CancellationToken::new() }
    }
}

pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(root_route))
        .route("/health", get(health_check_route))
        .route("/song", get(song_route))
        .route("/discography", get(discography_route))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
