//! Route definitions
//!
//! Maps the three endpoints to their handlers and injects the shared state.

use axum::routing::{get, post};
use axum::Router;

use crate::handler::{home, redirect_short_url, shorten};
use crate::store::AppState;

/// Creates the application router
///
/// # Route Definitions
///
/// - `GET /` - static landing page
/// - `POST /shorten` - create a new mapping
/// - `GET /{code}` - redirect to the stored long URL
pub fn create_app(state: AppState) -> Router {
    Router::new()
        .route("/", get(home))
        .route("/shorten", post(shorten))
        .route("/{code}", get(redirect_short_url))
        .with_state(state)
}
