//! # hudori-bridge
//!
//! Everything between the Hudori UI and the Hudori backend:
//! - the session credentials shared by every request ([`state`])
//! - the authenticated request gateway ([`gateway`]) and its payload encodings ([`payload`])
//! - the endpoint catalogue ([`endpoints`]) and the commands the UI invokes ([`commands`])
//! - normalization of every outcome into a JSON map for the UI ([`response`], [`error`])
//!
//! ```rust,no_run
//! use hudori_bridge::Bridge;
//! use hudori_common::config::BridgeConfig;
//!
//! # async fn demo() -> Result<(), hudori_bridge::GatewayError> {
//! let bridge = Bridge::new(BridgeConfig::default())?;
//! let result = bridge.sign_in(r#"{"username":"alice","password":"hunter2"}"#).await;
//! println!("{result:?}");
//! # Ok(())
//! # }
//! ```

pub mod commands;
pub mod endpoints;
pub mod error;
pub mod gateway;
pub mod payload;
pub mod response;
pub mod state;

use std::sync::Arc;

use hudori_common::config::BridgeConfig;

pub use error::{CommandError, GatewayError};
pub use gateway::{Gateway, HeaderOverrides};
pub use payload::{FileAttachment, MultipartBody, Payload};
pub use response::ResultMap;
pub use state::{Session, SessionState};

/// The bridge instance owned by the host.
///
/// Cheap to clone; clones share the same session and HTTP client.
#[derive(Debug, Clone)]
pub struct Bridge {
    base_url: Arc<str>,
    session: Arc<SessionState>,
    gateway: Gateway,
}

impl Bridge {
    pub fn new(config: BridgeConfig) -> Result<Self, GatewayError> {
        let session = Arc::new(SessionState::new());
        let gateway = Gateway::new(&config.api, Arc::clone(&session))?;
        Ok(Self {
            base_url: Arc::from(config.api.base_url.trim_end_matches('/')),
            session,
            gateway,
        })
    }

    pub fn session(&self) -> &SessionState {
        &self.session
    }

    pub fn gateway(&self) -> &Gateway {
        &self.gateway
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub(crate) fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }
}
