use std::collections::HashMap;

use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

use super::AppState;
use crate::error::ExtractError;

pub async fn song_route(
    State(state): State<AppState>,
    Query(query): Query<HashMap<String, String>>,
) -> Response {
    let (Some(artist), Some(song)) = (query.get("artist"), query.get("song")) else {
        return missing_params("artist and song");
    };
    let cancel = state.shutdown.child_token();
    match state.extractor.extract_song(artist, song, &cancel).await {
        Ok(record) => (StatusCode::OK, Json(record)).into_response(),
        Err(e) => error_response(&e),
    }
}

pub async fn discography_route(
    State(state): State<AppState>,
    Query(query): Query<HashMap<String, String>>,
) -> Response {
    let Some(artist) = query.get("artist") else {
        return missing_params("artist");
    };
    let cancel = state.shutdown.child_token();
    match state.extractor.extract_discography(artist, &cancel).await {
        Ok(albums) => (StatusCode::OK, Json(albums)).into_response(),
        Err(e) => error_response(&e),
    }
}

fn missing_params(names: &str) -> Response {
    (
        StatusCode::BAD_REQUEST,
        Json(json!({"error": "missing_params", "message": format!("Query must include {names}")})),
    )
        .into_response()
}

pub fn error_response(e: &ExtractError) -> Response {
    let status = match e {
        ExtractError::InvalidName(_) => StatusCode::BAD_REQUEST,
        ExtractError::LyricsNotFound(_) | ExtractError::HttpStatus { code: 404 } => StatusCode::NOT_FOUND,
        ExtractError::Timeout(_) => StatusCode::GATEWAY_TIMEOUT,
        ExtractError::Cancelled => StatusCode::SERVICE_UNAVAILABLE,
        e if e.is_transport() => StatusCode::BAD_GATEWAY,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    };
    (status, Json(json!({"error": e.kind(), "message": e.to_string()}))).into_response()
}
