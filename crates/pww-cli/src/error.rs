//! # Command Error Taxonomy
//!
//! Every failure a command can end with. Interactive input mistakes never
//! appear here: the prompt loops absorb them and ask again. Everything else
//! propagates unchanged to `main`, which prints it and exits non-zero.

use pww_client::{ApiError, FaucetError};
use pww_core::ValidationError;
use pww_crypto::CryptoError;
use thiserror::Error;

use crate::prompt::PromptError;

/// Top-level error for `manageuser` and `newuser`.
#[derive(Error, Debug)]
pub enum CommandError {
    /// The caller may not perform the operation.
    #[error(transparent)]
    Authorization(#[from] AuthorizationError),

    /// Flag or credential input that cannot be submitted.
    #[error(transparent)]
    InputValidation(#[from] ValidationError),

    /// The target user could not be found.
    #[error(transparent)]
    Lookup(ApiError),

    /// Any other failure talking to the web server.
    #[error(transparent)]
    Transport(ApiError),

    /// The signup paywall could not be satisfied.
    #[error(transparent)]
    Paywall(#[from] PaywallError),

    /// Reading answers from the terminal failed.
    #[error(transparent)]
    Prompt(#[from] PromptError),

    /// The new identity could not be persisted.
    #[error("failed to save identity: {0}")]
    Identity(#[from] CryptoError),

    /// Writing command output failed.
    #[error("failed to write output: {0}")]
    Output(#[from] std::io::Error),

    /// A reply could not be rendered as JSON.
    #[error("failed to encode reply: {0}")]
    Encode(#[from] serde_json::Error),
}

impl From<ApiError> for CommandError {
    fn from(err: ApiError) -> Self {
        Self::Transport(err)
    }
}

/// Caller lacks the identity or privilege a command needs.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthorizationError {
    /// No identity file is loaded.
    #[error("user identity not found; you must either create a new user or update your user key")]
    NoIdentity,

    /// The logged-in user is not an administrator.
    #[error("must be an administrator to complete this request")]
    NotAdmin,
}

/// Paywall payment could not be made.
#[derive(Error, Debug)]
pub enum PaywallError {
    /// The server reported neither an address nor an amount.
    #[error("unable to pay {amount} DCR to \"{address}\": the server reported no paywall")]
    NoPaywallTarget {
        /// Amount in DCR as reported.
        amount: String,
        /// Address as reported.
        address: String,
    },

    /// The faucet call failed.
    #[error("unable to pay {amount} DCR to {address} with faucet: {source}")]
    FaucetFailed {
        /// Amount in DCR.
        amount: String,
        /// Destination address.
        address: String,
        /// Faucet failure.
        source: FaucetError,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn authorization_errors_surface_verbatim() {
        let err = CommandError::from(AuthorizationError::NotAdmin);
        assert_eq!(err.to_string(), "must be an administrator to complete this request");
    }

    #[test]
    fn api_errors_default_to_transport() {
        let err = CommandError::from(ApiError::NotFound {
            endpoint: "GET /user/me".into(),
        });
        assert!(matches!(err, CommandError::Transport(_)));
        assert_eq!(err.to_string(), "GET /user/me: not found");
    }

    #[test]
    fn faucet_failure_carries_amount_and_address() {
        let err = PaywallError::FaucetFailed {
            amount: "0.1".into(),
            address: "TsAddr".into(),
            source: FaucetError::Rejected("rate limited".into()),
        };
        assert_eq!(
            err.to_string(),
            "unable to pay 0.1 DCR to TsAddr with faucet: faucet refused payment: rate limited"
        );
    }
}
