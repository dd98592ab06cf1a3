//! Channel envelopes, including typing indicators and voice room tokens.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CreateChannelRequest {
    pub name: String,
    /// "textual" or "vocal"
    pub channel_type: String,
    pub category_name: String,
    pub server_id: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DeleteChannelRequest {
    pub channel_id: String,
    pub category_name: String,
    pub server_id: String,
}

/// Typing indicator broadcast to the other members of a channel.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TypingRequest {
    pub user_id: String,
    pub channel_id: String,
    pub display_name: String,
    pub status: String,
}

/// Token request for joining a voice channel room.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RoomTokenRequest {
    pub channel_id: String,
    pub user_id: String,
}
