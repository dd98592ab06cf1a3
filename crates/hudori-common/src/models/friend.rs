//! Friend list envelopes.

use serde::{Deserialize, Serialize};

/// Send a friend request by username.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AddFriendRequest {
    pub initiator_id: String,
    pub initiator_username: String,
    pub receiver_username: String,
}

/// Accept or refuse a pending friend request.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FriendRequestAnswer {
    pub id: String,
    pub request_id: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DeleteFriendRequest {
    pub user_id: String,
    pub friend_id: String,
}
