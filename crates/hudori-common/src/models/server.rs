//! Server (guild), invite and category envelopes.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Identifies one server from the point of view of one user.
/// Used for fetching, deleting, leaving and creating invites.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerRequest {
    pub user_id: String,
    pub server_id: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CreateServerRequest {
    pub user_id: String,
    pub name: String,
}

/// Join through an invite. `user` is the caller's profile object as the UI holds it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct JoinServerRequest {
    pub user: Value,
    pub invite_id: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CategoryRequest {
    pub server_id: String,
    pub category_name: String,
}
