use std::net::SocketAddr;

use thiserror::Error;

/// Application-level constants
pub const APP_NAME: &str = "MedQuery";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:8787";
pub const DEFAULT_GATEWAY_URL: &str = "https://ai.gateway.lovable.dev/v1/chat/completions";
pub const DEFAULT_GATEWAY_MODEL: &str = "google/gemini-2.5-flash";
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;

const ENV_BIND: &str = "MEDQUERY_BIND";
const ENV_API_KEY: &str = "AI_GATEWAY_API_KEY";
const ENV_GATEWAY_URL: &str = "AI_GATEWAY_URL";
const ENV_GATEWAY_MODEL: &str = "AI_GATEWAY_MODEL";
const ENV_CONNECT_TIMEOUT: &str = "AI_GATEWAY_CONNECT_TIMEOUT";

/// Tracing filter used when `RUST_LOG` is not set.
pub fn default_log_filter() -> &'static str {
    "medquery=info,medquery_lib=info,tower_http=warn"
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{var} is not a valid socket address: {value}")]
    InvalidBindAddress { var: &'static str, value: String },

    #[error("{var} is not a valid number: {value}")]
    InvalidNumber { var: &'static str, value: String },
}

/// Settings for the outbound chat-completion gateway.
///
/// `api_key` stays optional here: a missing credential is reported per
/// request as a configuration error instead of aborting startup.
#[derive(Clone)]
pub struct GatewayConfig {
    pub endpoint: String,
    pub model: String,
    pub api_key: Option<String>,
    pub connect_timeout_secs: u64,
}

impl GatewayConfig {
    pub fn has_credential(&self) -> bool {
        self.api_key.is_some()
    }
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_GATEWAY_URL.to_string(),
            model: DEFAULT_GATEWAY_MODEL.to_string(),
            api_key: None,
            connect_timeout_secs: DEFAULT_CONNECT_TIMEOUT_SECS,
        }
    }
}

// Hand-written so the credential never ends up in logs.
impl std::fmt::Debug for GatewayConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GatewayConfig")
            .field("endpoint", &self.endpoint)
            .field("model", &self.model)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("connect_timeout_secs", &self.connect_timeout_secs)
            .finish()
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub bind_addr: SocketAddr,
    pub gateway: GatewayConfig,
}

impl AppConfig {
    /// Load configuration from process environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    ///
    /// Blank values are treated as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let bind_raw = get(ENV_BIND).unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        let bind_addr = bind_raw
            .parse::<SocketAddr>()
            .map_err(|_| ConfigError::InvalidBindAddress {
                var: ENV_BIND,
                value: bind_raw.clone(),
            })?;

        let connect_timeout_secs = match get(ENV_CONNECT_TIMEOUT) {
            Some(raw) => raw.parse::<u64>().map_err(|_| ConfigError::InvalidNumber {
                var: ENV_CONNECT_TIMEOUT,
                value: raw,
            })?,
            None => DEFAULT_CONNECT_TIMEOUT_SECS,
        };

        let gateway = GatewayConfig {
            endpoint: get(ENV_GATEWAY_URL).unwrap_or_else(|| DEFAULT_GATEWAY_URL.to_string()),
            model: get(ENV_GATEWAY_MODEL).unwrap_or_else(|| DEFAULT_GATEWAY_MODEL.to_string()),
            api_key: get(ENV_API_KEY),
            connect_timeout_secs,
        };

        Ok(Self { bind_addr, gateway })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_when_nothing_set() {
        let config = AppConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.bind_addr.to_string(), DEFAULT_BIND_ADDR);
        assert_eq!(config.gateway.endpoint, DEFAULT_GATEWAY_URL);
        assert_eq!(config.gateway.model, DEFAULT_GATEWAY_MODEL);
        assert_eq!(config.gateway.connect_timeout_secs, 10);
        assert!(!config.gateway.has_credential());
    }

    #[test]
    fn reads_all_variables() {
        let config = AppConfig::from_lookup(lookup(&[
            ("MEDQUERY_BIND", "0.0.0.0:9000"),
            ("AI_GATEWAY_API_KEY", "sk-test"),
            ("AI_GATEWAY_URL", "http://127.0.0.1:1/v1/chat/completions"),
            ("AI_GATEWAY_MODEL", "test/model"),
            ("AI_GATEWAY_CONNECT_TIMEOUT", "3"),
        ]))
        .unwrap();
        assert_eq!(config.bind_addr.port(), 9000);
        assert_eq!(config.gateway.api_key.as_deref(), Some("sk-test"));
        assert_eq!(config.gateway.endpoint, "http://127.0.0.1:1/v1/chat/completions");
        assert_eq!(config.gateway.model, "test/model");
        assert_eq!(config.gateway.connect_timeout_secs, 3);
    }

    #[test]
    fn blank_credential_counts_as_missing() {
        let config = AppConfig::from_lookup(lookup(&[("AI_GATEWAY_API_KEY", "   ")])).unwrap();
        assert!(config.gateway.api_key.is_none());
    }

    #[test]
    fn invalid_bind_address_is_rejected() {
        let err = AppConfig::from_lookup(lookup(&[("MEDQUERY_BIND", "not-an-addr")])).unwrap_err();
        assert_eq!(
            err,
            ConfigError::InvalidBindAddress {
                var: "MEDQUERY_BIND",
                value: "not-an-addr".into()
            }
        );
    }

    #[test]
    fn invalid_timeout_is_rejected() {
        let err =
            AppConfig::from_lookup(lookup(&[("AI_GATEWAY_CONNECT_TIMEOUT", "ten")])).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidNumber { .. }));
    }

    #[test]
    fn debug_output_redacts_credential() {
        let gateway = GatewayConfig {
            api_key: Some("sk-very-secret".into()),
            ..GatewayConfig::default()
        };
        let printed = format!("{gateway:?}");
        assert!(!printed.contains("sk-very-secret"));
        assert!(printed.contains("<redacted>"));
    }

    #[test]
    fn app_name_is_medquery() {
        assert_eq!(APP_NAME, "MedQuery");
    }
}
