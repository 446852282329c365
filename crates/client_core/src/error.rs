use shared::error::ProtocolError;
use thiserror::Error;

/// Everything that can go wrong between sending a form and holding a decoded body.
///
/// The `Display` text is what the form shows after its "Network error: " prefix.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("invalid server url '{url}': {source}")]
    InvalidServerUrl {
        url: String,
        source: url::ParseError,
    },
    #[error("{0}")]
    Transport(#[from] reqwest::Error),
    #[error("{0}")]
    MalformedBody(#[from] ProtocolError),
}
