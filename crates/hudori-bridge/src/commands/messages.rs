//! Message creation with attachments.

use hudori_common::models::{CreateMessageRequest, MessageBody};
use reqwest::Method;

use crate::Bridge;
use crate::error::{CommandError, GatewayError};
use crate::payload::{MultipartBody, Payload};
use crate::response::{ResultMap, decode_body};

use super::decode;

const SEND_FAILED: &str = "Failed to send message";

impl Bridge {
    /// Post a message and its files as one multipart upload.
    ///
    /// The message itself travels as JSON in the `body` field; files become
    /// `file-0`, `file-1`, ... in order. Returns `None` when the backend accepted the
    /// message, the backend's body when it refused it, and a failure map otherwise.
    pub async fn create_message(&self, message: CreateMessageRequest) -> Option<ResultMap> {
        match self.try_create_message(message).await {
            Ok(result) => result,
            Err(e) => Some(e.into_result(SEND_FAILED)),
        }
    }

    /// [`Bridge::create_message`] taking the JSON envelope, with file contents in base64.
    pub async fn create_message_envelope(&self, envelope: &str) -> Option<ResultMap> {
        match decode::<CreateMessageRequest>(envelope) {
            Ok(message) => self.create_message(message).await,
            Err(e) => Some(e.into_result(SEND_FAILED)),
        }
    }

    async fn try_create_message(
        &self,
        message: CreateMessageRequest,
    ) -> Result<Option<ResultMap>, CommandError> {
        let body = serde_json::to_string(&MessageBody {
            author: &message.author,
            channel_id: &message.channel_id,
            content: &message.content,
            mentions: &message.mentions,
            reply: &message.reply,
            private_message: message.private_message,
            server_id: &message.server_id,
        })
        .map_err(|e| GatewayError::EncodingFailed(Box::new(e)))?;

        let form = message
            .files
            .into_iter()
            .enumerate()
            .fold(MultipartBody::new().field("body", body), |form, (i, file)| {
                form.file(format!("file-{i}"), file.into())
            });

        let response = self
            .gateway
            .execute(
                Method::POST,
                &self.url("/api/v1/messages/create"),
                Payload::Multipart(form),
                None,
            )
            .await?;

        if response.status().is_success() {
            return Ok(None);
        }
        decode_body(response).await.map(Some)
    }
}
