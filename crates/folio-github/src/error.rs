//! Error types for GitHub API access.

/// Error from a GitHub API call.
#[derive(Debug, thiserror::Error)]
pub enum GitHubError {
    /// Transport failure: connection, TLS, timeout.
    #[error("request failed: {0}")]
    HttpRequest(#[from] ureq::Error),

    /// The API answered with a non-success status.
    #[error("HTTP {status}: {body}")]
    HttpResponse {
        status: u16,
        /// Response body, usually a JSON `message`.
        body: String,
    },

    /// A repository listing did not match the expected shape.
    #[error("unexpected response: {0}")]
    Json(#[from] serde_json::Error),
}
