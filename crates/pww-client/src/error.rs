//! Client error types.

/// Errors from web API calls.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// HTTP transport error.
    #[error("HTTP error calling {endpoint}: {source}")]
    Http {
        endpoint: String,
        source: reqwest::Error,
    },
    /// The requested resource does not exist.
    #[error("{endpoint}: not found")]
    NotFound { endpoint: String },
    /// The server rejected the request with a structured user error.
    #[error("{endpoint} rejected the request: error code {code}{}", format_context(.context))]
    UserError {
        endpoint: String,
        code: i64,
        context: Vec<String>,
    },
    /// Any other non-2xx status.
    #[error("{endpoint} returned {status}: {body}")]
    Status {
        endpoint: String,
        status: u16,
        body: String,
    },
    /// Response deserialization failed.
    #[error("failed to deserialize response from {endpoint}: {source}")]
    Deserialization {
        endpoint: String,
        source: reqwest::Error,
    },
    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(#[from] crate::config::ConfigError),
    /// The blocking adapter could not start its runtime.
    #[error("failed to start HTTP runtime: {0}")]
    Runtime(std::io::Error),
}

impl ApiError {
    /// Whether the server reported the resource as missing.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

/// Errors from the testnet faucet.
#[derive(Debug, thiserror::Error)]
pub enum FaucetError {
    /// HTTP transport error.
    #[error("HTTP error calling faucet: {0}")]
    Http(#[source] reqwest::Error),
    /// Faucet returned a non-2xx status.
    #[error("faucet returned {status}: {body}")]
    Status { status: u16, body: String },
    /// Faucet answered but refused to pay.
    #[error("faucet refused payment: {0}")]
    Rejected(String),
    /// Faucet reply was not the expected JSON.
    #[error("failed to deserialize faucet reply: {0}")]
    Deserialization(#[source] reqwest::Error),
}

fn format_context(context: &[String]) -> String {
    if context.is_empty() {
        String::new()
    } else {
        format!(" ({})", context.join(", "))
    }
}
