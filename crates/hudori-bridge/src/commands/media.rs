//! Avatar and banner uploads.

use hudori_common::models::{ChangeAvatarRequest, ChangeBannerRequest, Crop};
use reqwest::Method;

use crate::Bridge;
use crate::error::{CommandError, GatewayError};
use crate::payload::{FileAttachment, MultipartBody, Payload};
use crate::response::ResultMap;

use super::decode;

const BANNER_FAILED: &str = "Failed to change banner";
const AVATAR_FAILED: &str = "Failed to change avatar";

impl Bridge {
    /// Upload a new profile banner, cropped server-side. `old_banner` is the file it replaces.
    pub async fn change_banner(
        &self,
        file_data: Vec<u8>,
        file_name: &str,
        crop: Crop,
        old_banner: &str,
    ) -> ResultMap {
        let form = crop_fields(crop)
            .field("old_banner", old_banner)
            .file("banner", FileAttachment::new(file_name, file_data));
        self.fetch(Method::POST, "/api/v1/user/change_banner", Payload::Multipart(form))
            .await
            .unwrap_or_else(|e| e.into_result(BANNER_FAILED))
    }

    /// [`Bridge::change_banner`] taking the JSON envelope, with file contents in base64.
    pub async fn change_banner_envelope(&self, envelope: &str) -> ResultMap {
        match decode::<ChangeBannerRequest>(envelope) {
            Ok(req) => {
                let crop = req.crop();
                self.change_banner(req.file_data, &req.file_name, crop, &req.old_banner)
                    .await
            }
            Err(e) => e.into_result(BANNER_FAILED),
        }
    }

    /// Upload a new avatar for the user, or for a server when the envelope names one.
    pub async fn change_avatar(&self, envelope: &str) -> ResultMap {
        match self.try_change_avatar(envelope).await {
            Ok(result) => result,
            Err(e) => e.into_result(AVATAR_FAILED),
        }
    }

    async fn try_change_avatar(&self, envelope: &str) -> Result<ResultMap, CommandError> {
        let req: ChangeAvatarRequest = decode(envelope)?;

        let mut form = crop_fields(req.crop()).field("old_avatar", req.old_avatar);
        if !req.server_id.is_empty() {
            form = form.field("server_id", req.server_id);
        }
        if !req.friends.is_empty() {
            let friends = serde_json::to_string(&req.friends)
                .map_err(|e| GatewayError::EncodingFailed(Box::new(e)))?;
            form = form.field("friends", friends);
        }
        let form = form.file("avatar", FileAttachment::new(req.file_name, req.file_data));

        self.fetch(Method::POST, "/api/v1/user/change_avatar", Payload::Multipart(form))
            .await
    }
}

fn crop_fields(crop: Crop) -> MultipartBody {
    crop.form_fields()
        .into_iter()
        .fold(MultipartBody::new(), |form, (key, value)| form.field(key, value))
}
