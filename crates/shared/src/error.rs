use thiserror::Error;

/// A `/predict` body that does not have the expected shape.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProtocolError {
    #[error("response body is not valid JSON: {0}")]
    InvalidJson(String),
    #[error("successful response is missing `{0}`")]
    MissingField(&'static str),
}

impl From<serde_json::Error> for ProtocolError {
    fn from(value: serde_json::Error) -> Self {
        Self::InvalidJson(value.to_string())
    }
}
