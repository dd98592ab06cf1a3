//! Profile envelopes: names, email, colours, avatar and banner uploads.

use serde::{Deserialize, Serialize};

use super::{Crop, base64_bytes};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ChangeNameColorRequest {
    pub user_id: String,
    pub username_color: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ChangeDisplayNameRequest {
    pub user_id: String,
    pub display_name: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ChangeUsernameRequest {
    pub user_id: String,
    pub username: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ChangeEmailRequest {
    pub user_id: String,
    pub email: String,
}

/// New avatar for the user, or for a server when `server_id` is set.
///
/// `friends` lists the users whose cached profile should be refreshed by the backend.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ChangeAvatarRequest {
    #[serde(with = "base64_bytes")]
    pub file_data: Vec<u8>,
    pub file_name: String,
    pub crop_y: i64,
    pub crop_x: i64,
    pub crop_width: i64,
    pub crop_height: i64,
    pub old_avatar: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub server_id: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub friends: Vec<String>,
}

impl ChangeAvatarRequest {
    pub fn crop(&self) -> Crop {
        Crop { x: self.crop_x, y: self.crop_y, width: self.crop_width, height: self.crop_height }
    }
}

/// Envelope form of a banner upload.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ChangeBannerRequest {
    #[serde(with = "base64_bytes")]
    pub file_data: Vec<u8>,
    pub file_name: String,
    pub crop_y: i64,
    pub crop_x: i64,
    pub crop_width: i64,
    pub crop_height: i64,
    pub old_banner: String,
}

impl ChangeBannerRequest {
    pub fn crop(&self) -> Crop {
        Crop { x: self.crop_x, y: self.crop_y, width: self.crop_width, height: self.crop_height }
    }
}
