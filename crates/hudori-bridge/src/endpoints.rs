//! Endpoint catalogue: one descriptor per plain JSON command.
//!
//! A descriptor says which envelope type to decode, where to send it and whether the
//! decoded envelope travels as the JSON body. [`crate::Bridge::call`] interprets them.
//! Commands with extra behaviour (sign-in, uploads, ...) live in [`crate::commands`].

use std::fmt;

use hudori_common::models::*;
use reqwest::Method;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use url::Url;

use crate::error::GatewayError;
use crate::payload::Payload;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verb {
    Get,
    Post,
    Put,
    Delete,
}

impl Verb {
    pub fn method(self) -> Method {
        match self {
            Self::Get => Method::GET,
            Self::Post => Method::POST,
            Self::Put => Method::PUT,
            Self::Delete => Method::DELETE,
        }
    }
}

/// Path template. `{name}` placeholders are filled from the decoded envelope.
#[derive(Debug, Clone, Copy)]
pub enum Route {
    Path(&'static str),
    /// `present` when the envelope's `field` is a non-empty value, `absent` otherwise.
    Either {
        field: &'static str,
        present: &'static str,
        absent: &'static str,
    },
}

/// What goes in the request body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyKind {
    Empty,
    Envelope,
}

/// Decodes an envelope string into its typed request, returned in JSON form.
pub type Decoder = fn(&str) -> serde_json::Result<Value>;

#[derive(Clone, Copy)]
pub struct Endpoint {
    pub name: &'static str,
    pub verb: Verb,
    pub route: Route,
    pub body: BodyKind,
    pub decode: Decoder,
    /// Message reported to the UI when the request cannot be built or sent.
    pub failure: &'static str,
}

impl fmt::Debug for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Endpoint")
            .field("name", &self.name)
            .field("verb", &self.verb)
            .field("route", &self.route)
            .field("body", &self.body)
            .finish_non_exhaustive()
    }
}

impl Endpoint {
    /// Absolute URL for a decoded envelope.
    ///
    /// Each placeholder value becomes exactly one path segment: `/`, `?`, `#` and `%`
    /// in a value are percent-encoded, and a bare `.` or `..` is refused.
    pub fn url(&self, base_url: &str, params: &Value) -> Result<String, GatewayError> {
        let template = match self.route {
            Route::Path(path) => path,
            Route::Either { field, present, absent } => {
                if param(params, field).is_empty() { absent } else { present }
            }
        };

        let invalid_base = |source| GatewayError::InvalidUrl { url: base_url.to_owned(), source };
        let mut target = Url::parse(base_url).map_err(invalid_base)?;
        {
            let mut segments = target
                .path_segments_mut()
                .map_err(|()| invalid_base(url::ParseError::RelativeUrlWithCannotBeABaseBase))?;
            segments.pop_if_empty();
            for segment in template.trim_start_matches('/').split('/') {
                let value = match placeholder(segment) {
                    Some(key) => param(params, key),
                    None => segment.to_owned(),
                };
                if value == "." || value == ".." {
                    return Err(GatewayError::InvalidPayload(format!(
                        "'{value}' is not a usable path parameter"
                    )));
                }
                segments.push(&value);
            }
        }
        Ok(target.into())
    }

    pub fn payload(&self, params: Value) -> Payload {
        match self.body {
            BodyKind::Empty => Payload::NoBody,
            BodyKind::Envelope => Payload::Json(params),
        }
    }
}

/// Decode with the lenient envelope rules, then re-encode the typed request.
/// Unknown keys are dropped on the way through.
fn envelope<T: DeserializeOwned + Serialize>(raw: &str) -> serde_json::Result<Value> {
    let typed: T = serde_json::from_str(raw)?;
    serde_json::to_value(typed)
}

/// `{name}` -> `name`
fn placeholder(segment: &str) -> Option<&str> {
    segment.strip_prefix('{')?.strip_suffix('}')
}

fn param(params: &Value, key: &str) -> String {
    match params.get(key) {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

pub fn all() -> &'static [Endpoint] {
    ENDPOINTS
}

pub fn find(name: &str) -> Option<&'static Endpoint> {
    ENDPOINTS.iter().find(|e| e.name == name)
}

macro_rules! endpoint {
    ($name:literal, $verb:ident, $route:expr, $body:ident, $req:ty, $failure:literal) => {
        Endpoint {
            name: $name,
            verb: Verb::$verb,
            route: $route,
            body: BodyKind::$body,
            decode: envelope::<$req>,
            failure: $failure,
        }
    };
}

use Route::Path;

static ENDPOINTS: &[Endpoint] = &[
    // ── Friends ──────────────────────────────────────────────────────────────
    endpoint!("get_friends", Get, Path("/api/v1/friends/{user_id}"), Empty, UserRequest, "Failed to fetch friends"),
    endpoint!("add_friend", Post, Path("/api/v1/friends/add"), Envelope, AddFriendRequest, "Failed to send friend request"),
    endpoint!("accept_friend", Post, Path("/api/v1/friends/accept"), Envelope, FriendRequestAnswer, "Failed to accept friend request"),
    endpoint!("refuse_friend", Post, Path("/api/v1/friends/refuse"), Envelope, FriendRequestAnswer, "Failed to refuse friend request"),
    endpoint!("delete_friend", Post, Path("/api/v1/friends/delete"), Envelope, DeleteFriendRequest, "Failed to delete friend"),
    // ── Servers ──────────────────────────────────────────────────────────────
    endpoint!("get_servers", Get, Path("/api/v1/servers/{user_id}"), Empty, UserRequest, "Failed to fetch servers"),
    endpoint!("get_server", Get, Path("/api/v1/server/{user_id}/{server_id}"), Empty, ServerRequest, "Failed to fetch server"),
    endpoint!("create_server", Post, Path("/api/v1/server/create"), Envelope, CreateServerRequest, "Failed to create server"),
    endpoint!("delete_server", Post, Path("/api/v1/server/delete"), Envelope, ServerRequest, "Failed to delete server"),
    endpoint!("leave_server", Post, Path("/api/v1/server/leave"), Envelope, ServerRequest, "Failed to quit server"),
    endpoint!("join_server", Post, Path("/api/v1/server/join"), Envelope, JoinServerRequest, "Failed to join server"),
    endpoint!("create_invitation", Post, Path("/api/v1/invites/create"), Envelope, ServerRequest, "Failed to create invitation"),
    // ── Categories & channels ────────────────────────────────────────────────
    endpoint!("create_category", Post, Path("/api/v1/category/create"), Envelope, CategoryRequest, "Failed to create category"),
    endpoint!("delete_category", Post, Path("/api/v1/category/delete"), Envelope, CategoryRequest, "Failed to delete category"),
    endpoint!("create_channel", Post, Path("/api/v1/channels/create"), Envelope, CreateChannelRequest, "Failed to create channel"),
    endpoint!("delete_channel", Post, Path("/api/v1/channels/delete"), Envelope, DeleteChannelRequest, "Failed to delete channel"),
    endpoint!("indicate_typing", Post, Path("/api/v1/channels/typing"), Envelope, TypingRequest, "Failed to indicate typing"),
    // ── Messages ─────────────────────────────────────────────────────────────
    endpoint!(
        "get_messages",
        Get,
        Route::Either {
            field: "user_id",
            present: "/api/v1/messages/{channel_id}/private/{user_id}",
            absent: "/api/v1/messages/{channel_id}",
        },
        Empty,
        GetMessagesRequest,
        "Failed to fetch messages"
    ),
    endpoint!("delete_message", Delete, Path("/api/v1/messages/delete"), Envelope, DeleteMessageRequest, "Failed to delete message"),
    endpoint!("edit_message", Put, Path("/api/v1/messages/edit"), Envelope, EditMessageRequest, "Failed to edit message"),
    // ── Notifications ────────────────────────────────────────────────────────
    endpoint!("get_notifications", Get, Path("/api/v1/notifications/{user_id}"), Empty, UserRequest, "Failed to fetch notifications"),
    endpoint!("sync_notifications", Post, Path("/api/v1/notifications/message_update"), Envelope, SyncNotificationsRequest, "Failed to sync notifications"),
    // ── Profile ──────────────────────────────────────────────────────────────
    endpoint!("get_profile", Get, Path("/api/v1/user/{user_id}"), Empty, UserRequest, "Failed to get profile"),
    endpoint!("change_name_color", Post, Path("/api/v1/user/change_name_color"), Envelope, ChangeNameColorRequest, "Failed to change name color"),
    endpoint!("change_display_name", Post, Path("/api/v1/user/change_name"), Envelope, ChangeDisplayNameRequest, "Failed to change display name"),
    endpoint!("change_username", Post, Path("/api/v1/user/change_username"), Envelope, ChangeUsernameRequest, "Failed to change username"),
    endpoint!("change_email", Post, Path("/api/v1/user/change_email"), Envelope, ChangeEmailRequest, "Failed to change email"),
    // ── Voice ────────────────────────────────────────────────────────────────
    endpoint!("generate_room_token", Post, Path("/api/v1/rtc/{channel_id}/{user_id}"), Empty, RoomTokenRequest, "Failed to create room token"),
];
