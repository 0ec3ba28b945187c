use thiserror::Error;

/// Failures while fetching, reading or caching the catalog.
///
/// The ranking core never produces these.
#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("invalid products endpoint '{0}': {1}")]
    InvalidEndpoint(String, url::ParseError),

    #[error("GET {endpoint} returned {status}")]
    Status {
        endpoint: String,
        status: reqwest::StatusCode,
    },

    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed catalog JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("cache encoding failed: {0}")]
    Cache(#[from] bincode::Error),

    #[error("no catalog available")]
    Unavailable,
}
