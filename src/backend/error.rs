//! Errors raised while talking to the chat backend.

/// Errors that can occur during a backend request.
///
/// Every variant is a transport-class failure from the UI's point of view:
/// the user sees the connectivity apology, never the details.
#[derive(Debug, thiserror::Error)]
pub enum BackendError {
    /// The configured base URL (or an endpoint joined onto it) is invalid.
    #[error("Invalid backend URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// The request could not be sent or the connection failed.
    #[error("Transport error: {0}")]
    Transport(#[source] reqwest::Error),

    /// The backend answered with a non-2xx status.
    #[error("HTTP error! status: {0}")]
    Status(reqwest::StatusCode),

    /// The response body was not the expected JSON.
    #[error("Failed to decode backend response: {0}")]
    Decode(#[source] reqwest::Error),
}
