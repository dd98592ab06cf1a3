//! Message envelopes.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::base64_bytes;

/// Fetch a channel's history. A non-empty `user_id` selects the private
/// conversation with that user instead of the public channel.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GetMessagesRequest {
    pub channel_id: String,
    pub user_id: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DeleteMessageRequest {
    pub channel_id: String,
    pub message_id: String,
    pub private_message: bool,
    pub author_id: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EditMessageRequest {
    pub channel_id: String,
    pub message_id: String,
    pub private_message: bool,
    pub author_id: String,
    pub content: String,
    pub mentions: Vec<String>,
}

/// A file picked in the UI, carried as base64 inside a JSON envelope.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileUpload {
    pub name: String,
    #[serde(with = "base64_bytes")]
    pub data: Vec<u8>,
}

/// Envelope form of a new message, with its attachments inline.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CreateMessageRequest {
    pub author: Value,
    pub channel_id: String,
    pub content: String,
    pub mentions: Vec<String>,
    pub reply: String,
    pub private_message: bool,
    pub server_id: String,
    pub files: Vec<FileUpload>,
}

/// JSON document sent in the `body` form field of a message upload.
#[derive(Debug, Clone, Serialize)]
pub struct MessageBody<'a> {
    pub author: &'a Value,
    pub channel_id: &'a str,
    pub content: &'a str,
    pub mentions: &'a [String],
    pub reply: &'a str,
    pub private_message: bool,
    #[serde(skip_serializing_if = "str::is_empty")]
    pub server_id: &'a str,
}
