//! Request gateway. Turns a logical request into one authenticated HTTP exchange.
//!
//! Header precedence, later wins:
//! 1. the content type chosen by the payload encoder
//! 2. `Authorization: Bearer <token>` and `X-User-ID: <user id>` from the session snapshot
//! 3. caller overrides, except for the two credential headers
//!
//! The gateway sends each request once and hands back the response undecoded.

use std::collections::BTreeMap;
use std::sync::Arc;

use hudori_common::config::ApiConfig;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderName, HeaderValue};
use reqwest::{Client, Method, Request, Response};
use url::Url;

use crate::error::GatewayError;
use crate::payload::Payload;
use crate::state::SessionState;

/// Header carrying the signed-in user's id.
pub const USER_ID_HEADER: &str = "x-user-id";

/// Extra headers supplied by a caller.
pub type HeaderOverrides = BTreeMap<String, String>;

#[derive(Debug, Clone)]
pub struct Gateway {
    client: Client,
    session: Arc<SessionState>,
}

impl Gateway {
    pub fn new(api: &ApiConfig, session: Arc<SessionState>) -> Result<Self, GatewayError> {
        let client = Client::builder()
            .user_agent(api.user_agent.as_str())
            .danger_accept_invalid_certs(api.accept_invalid_certs)
            .build()
            .map_err(GatewayError::ClientBuild)?;
        Ok(Self::with_client(client, session))
    }

    pub fn with_client(client: Client, session: Arc<SessionState>) -> Self {
        Self { client, session }
    }

    pub fn session(&self) -> &Arc<SessionState> {
        &self.session
    }

    /// Build and send one request.
    pub async fn execute(
        &self,
        method: Method,
        url: &str,
        payload: Payload,
        headers: Option<&HeaderOverrides>,
    ) -> Result<Response, GatewayError> {
        let request = self.build_request(method, url, payload, headers)?;
        tracing::debug!(method = %request.method(), url = %request.url(), "sending request");
        self.client
            .execute(request)
            .await
            .map_err(GatewayError::TransportFailed)
    }

    /// Encode the payload and apply headers without sending anything.
    pub fn build_request(
        &self,
        method: Method,
        url: &str,
        payload: Payload,
        headers: Option<&HeaderOverrides>,
    ) -> Result<Request, GatewayError> {
        let target = Url::parse(url).map_err(|source| GatewayError::InvalidUrl {
            url: url.to_owned(),
            source,
        })?;

        let builder = self.client.request(method, target);
        let builder = match payload {
            Payload::NoBody => builder,
            Payload::Json(value) => {
                let bytes = serde_json::to_vec(&value)
                    .map_err(|e| GatewayError::EncodingFailed(Box::new(e)))?;
                builder
                    .header(CONTENT_TYPE, HeaderValue::from_static("application/json"))
                    .body(bytes)
            }
            Payload::Multipart(body) => builder.multipart(body.into_form()?),
        };
        let mut request = builder
            .build()
            .map_err(|e| GatewayError::EncodingFailed(Box::new(e)))?;

        apply_credentials(request.headers_mut(), &self.session)?;
        if let Some(overrides) = headers {
            apply_overrides(request.headers_mut(), overrides)?;
        }
        Ok(request)
    }
}

fn apply_credentials(headers: &mut HeaderMap, session: &SessionState) -> Result<(), GatewayError> {
    // One snapshot for both headers.
    let session = session.current();

    let mut bearer = HeaderValue::from_str(&format!("Bearer {}", session.token))
        .map_err(|_| GatewayError::InvalidHeader(AUTHORIZATION.to_string()))?;
    bearer.set_sensitive(true);
    headers.insert(AUTHORIZATION, bearer);

    let user_id = HeaderValue::from_str(&session.user_id)
        .map_err(|_| GatewayError::InvalidHeader(USER_ID_HEADER.to_owned()))?;
    headers.insert(HeaderName::from_static(USER_ID_HEADER), user_id);
    Ok(())
}

fn apply_overrides(headers: &mut HeaderMap, overrides: &HeaderOverrides) -> Result<(), GatewayError> {
    for (key, value) in overrides {
        let name = HeaderName::from_bytes(key.as_bytes())
            .map_err(|_| GatewayError::InvalidHeader(key.clone()))?;
        if name == AUTHORIZATION || name.as_str() == USER_ID_HEADER {
            tracing::warn!(header = %name, "ignoring override of a credential header");
            continue;
        }
        let value = HeaderValue::from_str(value).map_err(|_| GatewayError::InvalidHeader(key.clone()))?;
        headers.insert(name, value);
    }
    Ok(())
}
