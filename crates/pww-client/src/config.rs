//! Client configuration.
//!
//! Endpoints and credentials come from environment variables with local
//! development defaults; the CLI overrides individual fields from flags.

use url::Url;
use zeroize::Zeroizing;

/// Default web server address.
pub const DEFAULT_HOST: &str = "https://127.0.0.1:4443";

/// Default testnet faucet endpoint.
pub const DEFAULT_FAUCET_URL: &str = "https://faucet.decred.org/requestfaucet";

/// Configuration for reaching the web API and the faucet.
///
/// Custom `Debug` implementation redacts the `session` field
/// to prevent credential leakage in log output.
#[derive(Clone)]
pub struct ClientConfig {
    /// Base URL of the web server.
    pub host: Url,
    /// Faucet endpoint used to satisfy the signup paywall on testnet.
    pub faucet_url: Url,
    /// Session cookie value of a logged-in user, if any.
    pub session: Option<Zeroizing<String>>,
    /// Request timeout in seconds.
    pub timeout_secs: u64,
    /// Accept self-signed TLS certificates (local development servers).
    pub skip_verify: bool,
}

impl std::fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientConfig")
            .field("host", &self.host)
            .field("faucet_url", &self.faucet_url)
            .field("session", &self.session.as_ref().map(|_| "[REDACTED]"))
            .field("timeout_secs", &self.timeout_secs)
            .field("skip_verify", &self.skip_verify)
            .finish()
    }
}

impl ClientConfig {
    /// Load configuration from environment variables.
    ///
    /// Variables:
    /// - `PWW_HOST` (default: `https://127.0.0.1:4443`)
    /// - `PWW_FAUCET_URL` (default: `https://faucet.decred.org/requestfaucet`)
    /// - `PWW_SESSION` (optional session cookie)
    /// - `PWW_TIMEOUT_SECS` (default: 30)
    /// - `PWW_SKIP_VERIFY` (`1`/`true` to accept self-signed certificates)
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            host: env_url("PWW_HOST", DEFAULT_HOST)?,
            faucet_url: env_url("PWW_FAUCET_URL", DEFAULT_FAUCET_URL)?,
            session: std::env::var("PWW_SESSION")
                .ok()
                .filter(|s| !s.is_empty())
                .map(Zeroizing::new),
            timeout_secs: std::env::var("PWW_TIMEOUT_SECS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(30),
            skip_verify: std::env::var("PWW_SKIP_VERIFY")
                .map(|v| matches!(v.as_str(), "1" | "true" | "yes"))
                .unwrap_or(false),
        })
    }

    /// Configuration pointing both services at `base` (for testing).
    pub fn local(base: &str) -> Result<Self, ConfigError> {
        let host = parse_url("host", base)?;
        Ok(Self {
            faucet_url: host.clone(),
            host,
            session: None,
            timeout_secs: 5,
            skip_verify: false,
        })
    }
}

/// Parse a URL, naming the setting it came from on failure.
pub fn parse_url(setting: &str, raw: &str) -> Result<Url, ConfigError> {
    Url::parse(raw).map_err(|e| ConfigError::InvalidUrl(setting.to_string(), e.to_string()))
}

fn env_url(var: &str, default: &str) -> Result<Url, ConfigError> {
    let raw = std::env::var(var).unwrap_or_else(|_| default.to_string());
    parse_url(var, &raw)
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid URL for {0}: {1}")]
    InvalidUrl(String, String),
    #[error("invalid session cookie value")]
    InvalidSession,
}
