//! Error types for the bridge.
//!
//! [`GatewayError`] covers building and sending one request. [`CommandError`] adds the
//! failures that happen around it in a command (bad envelope, unreadable response) and
//! knows how to turn itself into the failure map handed back to the UI.

use thiserror::Error;

use crate::response::{ResultMap, failure};

type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

#[derive(Debug, Error)]
pub enum GatewayError {
    /// The target was not an absolute URL.
    #[error("invalid URL '{url}': {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    /// The payload is structurally unusable (e.g. duplicate multipart keys).
    #[error("invalid payload: {0}")]
    InvalidPayload(String),

    /// A credential or override could not be expressed as an HTTP header.
    #[error("invalid header '{0}'")]
    InvalidHeader(String),

    /// The payload could not be serialized.
    #[error("encoding failed: {0}")]
    EncodingFailed(#[source] BoxError),

    /// The backend could not be reached.
    #[error("transport failed: {0}")]
    TransportFailed(#[source] reqwest::Error),

    /// The HTTP client itself could not be set up (TLS backend, user agent).
    #[error("HTTP client setup failed: {0}")]
    ClientBuild(#[source] reqwest::Error),
}

impl GatewayError {
    /// HTTP-style status reported to the UI for this failure.
    pub fn status_code(&self) -> u16 {
        match self {
            Self::InvalidUrl { .. }
            | Self::InvalidPayload(_)
            | Self::InvalidHeader(_)
            | Self::EncodingFailed(_) => 400,
            Self::TransportFailed(_) | Self::ClientBuild(_) => 500,
        }
    }
}

/// Failure of one bridge command.
#[derive(Debug, Error)]
pub enum CommandError {
    /// The envelope sent by the UI was not valid for this command.
    #[error("invalid request envelope: {0}")]
    Decode(#[from] serde_json::Error),

    #[error(transparent)]
    Gateway(#[from] GatewayError),

    /// The backend answered with something other than a JSON object.
    #[error("unparseable response body: {0}")]
    ResponseDecode(String),
}

impl CommandError {
    pub fn status_code(&self) -> u16 {
        match self {
            Self::Decode(_) => 400,
            Self::Gateway(e) => e.status_code(),
            Self::ResponseDecode(_) => 502,
        }
    }

    /// Normalized failure map for the UI.
    ///
    /// `context` is the command's own failure message, used for transport and
    /// encoding failures. Internal details stay in the logs.
    pub fn into_result(self, context: &str) -> ResultMap {
        match &self {
            Self::Decode(e) => {
                tracing::warn!("rejected request envelope: {e}");
                failure(400, "Invalid request format")
            }
            Self::Gateway(e) => {
                tracing::warn!("{context}: {e}");
                failure(e.status_code(), context)
            }
            Self::ResponseDecode(e) => {
                tracing::warn!("{context}: {e}");
                let mut map = ResultMap::new();
                map.insert("error".into(), "Failed to parse response".into());
                map
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_error_maps_to_invalid_request_format() {
        let err: CommandError = serde_json::from_str::<serde_json::Value>("{nope")
            .unwrap_err()
            .into();
        assert_eq!(err.status_code(), 400);
        let result = err.into_result("Failed to fetch friends");
        assert_eq!(result["status"], 400);
        assert_eq!(result["message"], "Invalid request format");
    }

    #[test]
    fn test_payload_errors_are_client_errors() {
        let err = CommandError::from(GatewayError::InvalidPayload("duplicate form key 'a'".into()));
        assert_eq!(err.status_code(), 400);
        let result = err.into_result("Failed to change banner");
        assert_eq!(result["status"], 400);
        assert_eq!(result["message"], "Failed to change banner");
    }

    #[test]
    fn test_response_decode_policy() {
        let result = CommandError::ResponseDecode("expected value".into()).into_result("x");
        assert_eq!(result.len(), 1);
        assert_eq!(result["error"], "Failed to parse response");
    }
}
