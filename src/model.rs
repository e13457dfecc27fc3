//! Data models for the URL shortener
//!
//! Defines the persisted mapping record and the request/response shapes of
//! the HTTP API.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A persisted short-code → long-URL mapping
///
/// Mappings are immutable: created exactly once, never updated, never
/// deleted. Stored as a JSON value keyed by `short_code` in the database.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Mapping {
    /// Monotonically increasing surrogate id assigned by the store.
    ///
    /// Used only for ordering and debugging; not part of the HTTP contract.
    pub id: u64,

    /// The unique short code (e.g., "aZ3kQ9"), also the table key.
    pub short_code: String,

    /// The original URL supplied by the caller. Stored verbatim; the core
    /// does not validate it as a well-formed URL.
    pub long_url: String,

    /// Timestamp when this mapping was created.
    pub created_at: DateTime<Utc>,
}

/// Request payload for `POST /shorten`
///
/// # Example
/// ```json
/// { "url": "https://example.com/very/long/url" }
/// ```
#[derive(Deserialize)]
pub struct ShortenRequest {
    /// The URL to shorten. Optional so a body without the field gets a
    /// descriptive 400 instead of a generic extractor rejection.
    pub url: Option<String>,
}

/// Response returned after successfully creating a mapping
///
/// # Example
/// ```json
/// { "shortUrl": "http://localhost:8080/aZ3kQ9" }
/// ```
#[derive(Serialize)]
pub struct ShortenResponse {
    /// The request origin concatenated with the generated short code.
    #[serde(rename = "shortUrl")]
    pub short_url: String,
}
