use thiserror::Error;

/// Failure of a single read against the metadata service.
///
/// These never reach the presentation layer: the client logs them and hands
/// back an empty result instead.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Unexpected status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Service error {code}: {message}")]
    Api { code: i64, message: String },

    #[error("Malformed response: {0}")]
    Decode(#[from] serde_json::Error),
}
