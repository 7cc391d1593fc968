//! Testnet faucet client.
//!
//! The faucet takes a form-encoded `POST` with the destination address, the
//! amount in DCR, and an optional override token that lifts its rate limit.
//! It answers with JSON carrying either a transaction id or an error string.

use url::Url;

use crate::config::ClientConfig;
use crate::error::{ApiError, FaucetError};
use crate::types::FaucetReply;

/// Atoms per DCR.
pub const ATOMS_PER_DCR: u64 = 100_000_000;

/// Render an atom amount as a decimal DCR string without trailing zeros.
pub fn atoms_to_dcr(atoms: u64) -> String {
    let whole = atoms / ATOMS_PER_DCR;
    let frac = atoms % ATOMS_PER_DCR;
    if frac == 0 {
        return whole.to_string();
    }
    let frac = format!("{frac:08}");
    format!("{whole}.{}", frac.trim_end_matches('0'))
}

/// Client for the testnet faucet.
#[derive(Debug, Clone)]
pub struct FaucetClient {
    http: reqwest::Client,
    url: Url,
}

impl FaucetClient {
    /// Create a faucet client from configuration.
    pub fn new(config: &ClientConfig) -> Result<Self, ApiError> {
        Ok(Self::with_http(
            crate::client::http_client(config)?,
            config.faucet_url.clone(),
        ))
    }

    pub(crate) fn with_http(http: reqwest::Client, url: Url) -> Self {
        Self { http, url }
    }

    /// Ask the faucet to send `amount` atoms to `address`.
    ///
    /// Returns the faucet's transaction id.
    pub async fn pay(
        &self,
        address: &str,
        amount: u64,
        override_token: Option<&str>,
    ) -> Result<String, FaucetError> {
        let dcr = atoms_to_dcr(amount);
        let mut form = vec![("address", address), ("amount", dcr.as_str())];
        if let Some(token) = override_token.filter(|t| !t.is_empty()) {
            form.push(("overridetoken", token));
        }

        tracing::debug!(address, amount = %dcr, "requesting faucet payment");
        let resp = self
            .http
            .post(self.url.clone())
            .form(&form)
            .send()
            .await
            .map_err(FaucetError::Http)?;

        if !resp.status().is_success() {
            let status = resp.status().as_u16();
            let body = resp.text().await.unwrap_or_default();
            return Err(FaucetError::Status { status, body });
        }

        let reply: FaucetReply = resp.json().await.map_err(FaucetError::Deserialization)?;
        if !reply.error.is_empty() {
            return Err(FaucetError::Rejected(reply.error));
        }
        if reply.tx_id.is_empty() {
            return Err(FaucetError::Rejected(
                "faucet returned no transaction id".into(),
            ));
        }
        Ok(reply.tx_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn atoms_to_dcr_formats_fractions() {
        assert_eq!(atoms_to_dcr(0), "0");
        assert_eq!(atoms_to_dcr(100_000_000), "1");
        assert_eq!(atoms_to_dcr(10_000_000), "0.1");
        assert_eq!(atoms_to_dcr(150_000_001), "1.50000001");
        assert_eq!(atoms_to_dcr(1), "0.00000001");
    }
}
