use thiserror::Error;

/// Failure while fetching the event feed over HTTP.
#[derive(Debug, Error)]
pub enum NetworkError {
    #[error("invalid url {url:?}: {reason}")]
    InvalidUrl { url: String, reason: String },
    #[error("failed to build http client: {0}")]
    Client(#[source] reqwest::Error),
    #[error("request failed: {0}")]
    Request(#[source] reqwest::Error),
    #[error("unexpected status code: {0}")]
    Status(u16),
    #[error("failed to read response body: {0}")]
    Body(#[source] reqwest::Error),
}

/// Failure while extracting an event from the GeoJSON payload.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("malformed json: {0}")]
    Json(#[from] serde_json::Error),
    #[error("payload has no \"features\" array")]
    MissingFeatures,
    #[error("\"features\" array is empty")]
    NoFeatures,
}
