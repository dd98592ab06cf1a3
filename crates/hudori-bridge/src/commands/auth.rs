//! Sign-in, session verification and logout.
//!
//! These are the only commands that write the session.

use hudori_common::models::SignInRequest;
use reqwest::{Method, StatusCode};
use serde_json::Value;

use crate::Bridge;
use crate::error::CommandError;
use crate::payload::Payload;
use crate::response::{ResultMap, decode_body, failure};

use super::decode;

const SIGN_IN_UNREACHABLE: &str = "Please check your login information and try again.";

impl Bridge {
    /// Sign in with `{username, password}`.
    ///
    /// On a 200 carrying `user.id`, the session is set from the first response cookie
    /// (the token) and that id, in one step. Any other answer is returned as is and
    /// leaves the session untouched.
    pub async fn sign_in(&self, envelope: &str) -> ResultMap {
        let request: SignInRequest = match decode(envelope) {
            Ok(r) => r,
            Err(e) => return e.into_result(SIGN_IN_UNREACHABLE),
        };
        let payload = match Payload::json(&request) {
            Ok(p) => p,
            Err(e) => return CommandError::from(e).into_result(SIGN_IN_UNREACHABLE),
        };

        let response = match self
            .gateway
            .execute(Method::POST, &self.url("/auth/signin"), payload, None)
            .await
        {
            Ok(r) => r,
            Err(e) => {
                tracing::warn!("sign-in request failed: {e}");
                let mut result = failure(500, SIGN_IN_UNREACHABLE);
                result.insert("name".into(), "unexpected".into());
                return result;
            }
        };

        let status = response.status();
        let token = response.cookies().next().map(|c| c.value().to_owned());
        let result = match decode_body(response).await {
            Ok(body) => body,
            Err(e) => return e.into_result(SIGN_IN_UNREACHABLE),
        };
        if status != StatusCode::OK {
            return result;
        }

        match (token, user_id_of(&result)) {
            (Some(token), Some(user_id)) if !token.is_empty() => {
                self.session.set(token, user_id);
                tracing::info!(user_id, "signed in");
            }
            (token, user_id) => {
                tracing::warn!(
                    has_cookie = token.is_some(),
                    has_user = user_id.is_some(),
                    "sign-in succeeded without a session cookie and user id; session unchanged"
                );
            }
        }
        result
    }

    /// Check the session with the backend. A `"success"` answer refreshes the cached user id.
    pub async fn auth_verify(&self) -> ResultMap {
        let result = match self.fetch(Method::GET, "/auth/verify", Payload::NoBody).await {
            Ok(body) => body,
            Err(e) => return e.into_result("Failed to signin"),
        };

        if result.get("message").and_then(Value::as_str) == Some("success") {
            match user_id_of(&result) {
                Some(user_id) => {
                    if !self.session.refresh_user_id(user_id) {
                        tracing::debug!("verify succeeded while signed out; session unchanged");
                    }
                }
                None => tracing::warn!("verify succeeded without a user id"),
            }
        }
        result
    }

    /// Tell the backend to end the session, then forget the credentials locally
    /// whatever the backend answered.
    pub async fn logout(&self) -> ResultMap {
        let outcome = self
            .fetch(Method::POST, "/api/v1/user/logout", Payload::NoBody)
            .await;
        self.session.clear();
        tracing::info!("signed out");
        outcome.unwrap_or_else(|e| e.into_result("Failed to logout"))
    }

    /// `{status: "200"}` when signed in, `{status: "401"}` otherwise.
    pub fn is_authenticated(&self) -> ResultMap {
        let status = if self.session.is_authenticated() { "200" } else { "401" };
        let mut result = ResultMap::new();
        result.insert("status".into(), status.into());
        result
    }
}

fn user_id_of(body: &ResultMap) -> Option<&str> {
    body.get("user")?.get("id")?.as_str().filter(|id| !id.is_empty())
}
