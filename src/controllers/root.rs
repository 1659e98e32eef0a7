use axum::{Json, response::IntoResponse};
use serde_json::json;

pub struct RootController;

impl RootController {
    pub async fn root() -> impl IntoResponse {
        Json(json!({
            "service": "lyrics-scraper",
            "endpoints": ["/song?artist=&song=", "/discography?artist="],
        }))
    }

    pub async fn health_check() -> impl IntoResponse {
        Json(json!({"status": "ok"}))
    }
}
