//! Local stand-in for the lyrics site, serving fixture pages.
#![allow(dead_code)]

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use axum::{Router, extract::State, http::StatusCode, response::Html, routing::get};
use lyrics_scraper::{Extractor, FetchConfig};

pub const SONG_PAGE: &str = include_str!("../fixtures/theotherside.html");
pub const ARTIST_PAGE: &str = include_str!("../fixtures/alltimelow.html");

pub struct FixtureSite {
    pub base_url: String,
    hits: Arc<AtomicUsize>,
}

impl FixtureSite {
    pub async fn start() -> Self {
        let hits = Arc::new(AtomicUsize::new(0));
        let app: Router = Router::new()
            .route("/lyrics/alltimelow/theotherside.html", get(|| async { Html(SONG_PAGE) }))
            .route("/a/alltimelow.html", get(|| async { Html(ARTIST_PAGE) }))
            .route(
                "/lyrics/alltimelow/blank.html",
                get(|| async { Html("<html><body><h1>Welcome to AZLyrics!</h1></body></html>") }),
            )
            .route(
                "/b/broken.html",
                get(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "boom") }),
            )
            .route(
                "/s/slow.html",
                get(|| async {
                    tokio::time::sleep(Duration::from_secs(5)).await;
                    Html(ARTIST_PAGE)
                }),
            )
            .layer(axum::middleware::from_fn_with_state(hits.clone(), count_hits));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        FixtureSite { base_url: format!("http://{addr}"), hits }
    }

    pub fn hits(&self) -> usize {
        self.hits.load(Ordering::SeqCst)
    }

    pub fn extractor(&self) -> Extractor {
        extractor_for(&self.base_url, fast_config())
    }
}

async fn count_hits(
    State(hits): State<Arc<AtomicUsize>>,
    req: axum::extract::Request,
    next: axum::middleware::Next,
) -> axum::response::Response {
    hits.fetch_add(1, Ordering::SeqCst);
    next.run(req).await
}

/// No politeness delay and a short timeout.
pub fn fast_config() -> FetchConfig {
    FetchConfig::default()
        .with_delay(Duration::ZERO, Duration::ZERO)
        .with_timeout(Duration::from_millis(500))
}

pub fn extractor_for(base_url: &str, config: FetchConfig) -> Extractor {
    Extractor::new(base_url, config).unwrap()
}

/// An address nothing is listening on.
pub fn refused_base_url() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{addr}")
}
