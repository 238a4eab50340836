//! Health check endpoint.

/// Health check endpoint.
pub async fn health() -> &'static str {
    "ok"
}
