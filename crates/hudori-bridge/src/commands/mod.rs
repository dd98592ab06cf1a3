//! Bridge commands: the operations the UI invokes.
//!
//! Plain JSON commands are descriptors in [`crate::endpoints`] run by [`Bridge::call`].
//! The sub-modules hold the commands that do more than that: the auth lifecycle,
//! message creation with attachments, and image uploads.
//! Every command returns a map; failures are folded into it, never raised.

pub mod auth;
pub mod media;
pub mod messages;

use reqwest::Method;

use crate::Bridge;
use crate::endpoints::{self, Endpoint};
use crate::error::CommandError;
use crate::payload::Payload;
use crate::response::{ResultMap, decode_body, failure};

/// Commands implemented outside the endpoint catalogue.
pub const COMMANDS: &[&str] = &[
    "sign_in",
    "auth_verify",
    "logout",
    "is_authenticated",
    "create_message",
    "change_banner",
    "change_avatar",
];

/// Names of every operation [`Bridge::invoke`] understands.
pub fn operations() -> impl Iterator<Item = &'static str> {
    COMMANDS.iter().copied().chain(endpoints::all().iter().map(|e| e.name))
}

impl Bridge {
    /// Run any operation by name with its JSON envelope.
    ///
    /// `None` only comes back from a successful `create_message`, which has no body to report.
    pub async fn invoke(&self, operation: &str, args: &str) -> Option<ResultMap> {
        tracing::debug!(operation, "invoke");
        let result = match operation {
            "sign_in" => self.sign_in(args).await,
            "auth_verify" => self.auth_verify().await,
            "logout" => self.logout().await,
            "is_authenticated" => self.is_authenticated(),
            "create_message" => return self.create_message_envelope(args).await,
            "change_banner" => self.change_banner_envelope(args).await,
            "change_avatar" => self.change_avatar(args).await,
            name => match endpoints::find(name) {
                Some(endpoint) => self.call(endpoint, args).await,
                None => {
                    tracing::warn!(operation = name, "unknown operation");
                    failure(404, "Unknown operation")
                }
            },
        };
        Some(result)
    }

    /// Decode the envelope, send it to the endpoint and decode the answer.
    pub async fn call(&self, endpoint: &Endpoint, envelope: &str) -> ResultMap {
        match self.try_call(endpoint, envelope).await {
            Ok(result) => result,
            Err(e) => e.into_result(endpoint.failure),
        }
    }

    async fn try_call(&self, endpoint: &Endpoint, envelope: &str) -> Result<ResultMap, CommandError> {
        let params = (endpoint.decode)(envelope)?;
        let url = endpoint.url(&self.base_url, &params)?;
        let payload = endpoint.payload(params);
        let response = self
            .gateway
            .execute(endpoint.verb.method(), &url, payload, None)
            .await?;
        decode_body(response).await
    }

    /// Send to a path under the backend origin and decode the answer.
    pub(crate) async fn fetch(
        &self,
        method: Method,
        path: &str,
        payload: Payload,
    ) -> Result<ResultMap, CommandError> {
        let response = self
            .gateway
            .execute(method, &self.url(path), payload, None)
            .await?;
        decode_body(response).await
    }
}

/// Decode a command envelope.
pub(crate) fn decode<T: serde::de::DeserializeOwned>(envelope: &str) -> Result<T, CommandError> {
    Ok(serde_json::from_str(envelope)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_operations_are_unique() {
        let mut names: Vec<_> = operations().collect();
        let total = names.len();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), total);
        assert!(names.contains(&"sign_in"));
        assert!(names.contains(&"get_friends"));
    }
}
