//! Response normalization. Every command hands the UI a string-keyed JSON map.

use serde_json::{Map, Value};

use crate::error::CommandError;

/// Generic result returned to the UI.
pub type ResultMap = Map<String, Value>;

/// `{ "status": <status>, "message": <message> }`
pub fn failure(status: u16, message: impl Into<String>) -> ResultMap {
    let mut map = ResultMap::new();
    map.insert("status".into(), Value::from(status));
    map.insert("message".into(), Value::String(message.into()));
    map
}

/// Read the whole body and decode it as a JSON object.
///
/// The backend's own status is not interpreted: error bodies are forwarded as they are.
/// The response is consumed, so its connection is released whatever the outcome.
pub async fn decode_body(response: reqwest::Response) -> Result<ResultMap, CommandError> {
    let status = response.status();
    let bytes = response
        .bytes()
        .await
        .map_err(|e| CommandError::ResponseDecode(format!("reading body of {status}: {e}")))?;
    parse_object(&bytes)
        .map_err(|e| CommandError::ResponseDecode(format!("{status} response: {e}")))
}

fn parse_object(bytes: &[u8]) -> Result<ResultMap, serde_json::Error> {
    serde_json::from_slice::<ResultMap>(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failure_shape() {
        let map = failure(500, "Failed to fetch friends");
        assert_eq!(map.len(), 2);
        assert_eq!(map["status"], 500);
        assert_eq!(map["message"], "Failed to fetch friends");
    }

    #[test]
    fn test_parse_object_only_accepts_objects() {
        assert!(parse_object(br#"{"user":{"id":"u1"}}"#).is_ok());
        assert!(parse_object(b"[1,2]").is_err());
        assert!(parse_object(b"null").is_err());
        assert!(parse_object(b"").is_err());
        assert!(parse_object(b"<html>").is_err());
    }
}
