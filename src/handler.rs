//! HTTP request handlers
//!
//! Thin glue over the mapping store: extract input, invoke the store, shape
//! the response. All business rules (collision retry, uniqueness, bounded
//! attempts) live in [`crate::store`].

use axum::{
    extract::rejection::JsonRejection,
    extract::{Path, State},
    http::{header, HeaderMap, StatusCode},
    response::{Html, IntoResponse},
    Json,
};

use crate::error::ApiError;
use crate::model::{ShortenRequest, ShortenResponse};
use crate::store::AppState;

/// Creates a new mapping for the submitted URL
///
/// # Request Body
///
/// ```json
/// { "url": "https://example.com/very/long/url" }
/// ```
///
/// # Response
///
/// - **200 OK** - `{"shortUrl": "<scheme>://<host>/<code>"}`
/// - **400 Bad Request** - body absent, not JSON, or lacking the `url` field
/// - **500 Internal Server Error** - storage failure or code space exhausted
pub async fn shorten(
    State(state): State<AppState>,
    headers: HeaderMap,
    payload: Result<Json<ShortenRequest>, JsonRejection>,
) -> Result<Json<ShortenResponse>, ApiError> {
    // Any extractor rejection (missing body, wrong content type, malformed
    // JSON) collapses into the same descriptive 400 as a missing field.
    let long_url = payload
        .ok()
        .and_then(|Json(request)| request.url)
        .ok_or_else(|| ApiError::Validation("No URL provided".to_string()))?;

    let code = state.store.create_mapping(&long_url)?;

    // The short URL points back at whatever origin the client reached us
    // through, mirroring the request's own Host header.
    let origin = headers
        .get(header::HOST)
        .and_then(|value| value.to_str().ok())
        .map(|host| format!("http://{host}"))
        .unwrap_or_else(|| state.fallback_origin.clone());

    Ok(Json(ShortenResponse {
        short_url: format!("{origin}/{code}"),
    }))
}

/// Redirects a short code to its stored destination
///
/// # Response
///
/// - **302 Found** - `Location` set to the stored long URL
/// - **404 Not Found** - plain-text `"URL not found"`
pub async fn redirect_short_url(
    Path(code): Path<String>,
    State(state): State<AppState>,
) -> Result<impl IntoResponse, ApiError> {
    match state.store.resolve_mapping(&code)? {
        Some(long_url) => Ok((StatusCode::FOUND, [(header::LOCATION, long_url)])),
        None => Err(ApiError::NotFound),
    }
}

/// Serves the static landing page.
pub async fn home() -> Html<&'static str> {
    Html(include_str!("../assets/index.html"))
}
