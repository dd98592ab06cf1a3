//! Authentication envelopes.

use serde::{Deserialize, Serialize};

/// Credentials submitted from the sign-in form.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SignInRequest {
    pub username: String,
    pub password: String,
}

/// The most common envelope: a single user id.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct UserRequest {
    pub user_id: String,
}
