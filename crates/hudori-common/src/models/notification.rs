//! Notification envelopes.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Marks channels as read. `channels` is forwarded to the backend untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SyncNotificationsRequest {
    pub user_id: String,
    pub channels: Value,
}
