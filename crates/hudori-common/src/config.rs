//! Bridge configuration loaded from defaults, an optional config file and the environment.
//!
//! Config precedence: explicit overrides > env vars > .env file > hudori.toml > defaults.
//! Environment variables use the `HUDORI` prefix and `__` as the nesting
//! separator, e.g. `HUDORI__API__BASE_URL=https://chat.example.org`.

use serde::Deserialize;

/// Backend origin used when nothing else is configured.
pub const DEFAULT_BASE_URL: &str = "https://localhost:8080";

#[derive(Debug, Deserialize, Clone)]
pub struct BridgeConfig {
    pub api: ApiConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ApiConfig {
    /// Backend origin, without a trailing slash (e.g. "https://hudori.example.org").
    pub base_url: String,
    /// `User-Agent` sent with every request.
    pub user_agent: String,
    /// Accept self-signed certificates. Only meant for a backend running on localhost.
    pub accept_invalid_certs: bool,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            api: ApiConfig {
                base_url: DEFAULT_BASE_URL.to_owned(),
                user_agent: default_user_agent(),
                accept_invalid_certs: false,
            },
        }
    }
}

impl BridgeConfig {
    /// Load configuration from the environment and the optional `hudori.toml`.
    pub fn load() -> Result<Self, config::ConfigError> {
        Self::load_with_overrides(&[])
    }

    /// Load configuration, then apply `(key, value)` overrides on top of every other source.
    ///
    /// Keys use the dotted form, e.g. `("api.base_url", "http://127.0.0.1:9000")`.
    pub fn load_with_overrides(overrides: &[(&str, &str)]) -> Result<Self, config::ConfigError> {
        // Load .env file if present (development)
        let _ = dotenvy::dotenv();

        let mut builder = config::Config::builder()
            .set_default("api.base_url", DEFAULT_BASE_URL)?
            .set_default("api.user_agent", default_user_agent())?
            .set_default("api.accept_invalid_certs", false)?
            .add_source(config::File::with_name("hudori").required(false))
            .add_source(
                config::Environment::with_prefix("HUDORI")
                    .separator("__")
                    .try_parsing(true),
            );

        for (key, value) in overrides {
            builder = builder.set_override(*key, *value)?;
        }

        let mut cfg: BridgeConfig = builder.build()?.try_deserialize()?;
        cfg.api.base_url = cfg.api.base_url.trim_end_matches('/').to_owned();
        tracing::debug!(base_url = %cfg.api.base_url, "bridge configuration loaded");
        Ok(cfg)
    }

    /// Copy of this configuration pointing at a different backend origin.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.api.base_url = base_url.into().trim_end_matches('/').to_owned();
        self
    }
}

fn default_user_agent() -> String {
    concat!("hudori-bridge/", env!("CARGO_PKG_VERSION")).to_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_points_at_local_backend() {
        let cfg = BridgeConfig::default();
        assert_eq!(cfg.api.base_url, "https://localhost:8080");
        assert!(cfg.api.user_agent.starts_with("hudori-bridge/"));
        assert!(!cfg.api.accept_invalid_certs);
    }

    #[test]
    fn test_overrides_win_and_trailing_slash_is_trimmed() {
        let cfg = BridgeConfig::load_with_overrides(&[("api.base_url", "http://127.0.0.1:9000/")])
            .expect("config should load");
        assert_eq!(cfg.api.base_url, "http://127.0.0.1:9000");
    }

    #[test]
    fn test_with_base_url() {
        let cfg = BridgeConfig::default().with_base_url("http://backend.test//");
        assert_eq!(cfg.api.base_url, "http://backend.test");
    }
}
