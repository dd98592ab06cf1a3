//! Request envelopes sent by the UI.
//!
//! Every envelope arrives as a JSON string. Decoding is lenient in the same way the
//! UI expects: unknown keys are ignored and missing keys fall back to their empty
//! value, so only structurally malformed input is rejected.

pub mod auth;
pub mod channel;
pub mod friend;
pub mod message;
pub mod notification;
pub mod server;
pub mod user;

/// Re-export all envelope types for convenience.
pub use auth::*;
pub use channel::*;
pub use friend::*;
pub use message::*;
pub use notification::*;
pub use server::*;
pub use user::*;

/// Serde adapter for byte buffers carried as standard base64 strings in JSON envelopes.
/// `null` decodes to an empty buffer.
pub mod base64_bytes {
    use base64::Engine;
    use base64::engine::general_purpose::STANDARD;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(bytes: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&STANDARD.encode(bytes))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<u8>, D::Error> {
        let encoded: Option<String> = Option::deserialize(deserializer)?;
        match encoded {
            Some(s) => STANDARD.decode(s.as_bytes()).map_err(serde::de::Error::custom),
            None => Ok(Vec::new()),
        }
    }
}

/// Image crop rectangle chosen in the UI before uploading an avatar or banner.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Crop {
    pub x: i64,
    pub y: i64,
    pub width: i64,
    pub height: i64,
}

impl Crop {
    /// Multipart form fields in the order the backend documents them.
    pub fn form_fields(&self) -> [(&'static str, String); 4] {
        [
            ("cropY", self.y.to_string()),
            ("cropX", self.x.to_string()),
            ("cropWidth", self.width.to_string()),
            ("cropHeight", self.height.to_string()),
        ]
    }
}
