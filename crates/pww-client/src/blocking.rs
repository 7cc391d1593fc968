//! Blocking adapter over the async clients.
//!
//! Owns a current-thread `tokio` runtime and drives one request to
//! completion per trait call, so the command workflows stay plain
//! sequential code. Must not be used from inside another runtime.

use crate::adapter::{Faucet, NewUserOutcome, UserAdminApi};
use crate::client::{http_client, WwwClient};
use crate::config::ClientConfig;
use crate::error::{ApiError, FaucetError};
use crate::faucet::FaucetClient;
use crate::types::{LoginReply, ManageUser, ManageUserReply, PolicyReply, UserRecord};

/// HTTP implementation of [`UserAdminApi`] and [`Faucet`].
#[derive(Debug)]
pub struct BlockingClient {
    runtime: tokio::runtime::Runtime,
    www: WwwClient,
    faucet: FaucetClient,
}

impl BlockingClient {
    /// Build the runtime and both HTTP clients.
    pub fn new(config: &ClientConfig) -> Result<Self, ApiError> {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(ApiError::Runtime)?;
        let http = http_client(config)?;
        Ok(Self {
            runtime,
            www: WwwClient::with_http(http.clone(), config.host.clone()),
            faucet: FaucetClient::with_http(http, config.faucet_url.clone()),
        })
    }
}

impl UserAdminApi for BlockingClient {
    fn me(&self) -> Result<LoginReply, ApiError> {
        self.runtime.block_on(self.www.me())
    }

    fn user_details(&self, user_id: &str) -> Result<UserRecord, ApiError> {
        self.runtime.block_on(self.www.user_details(user_id))
    }

    fn manage_user(&self, request: &ManageUser) -> Result<ManageUserReply, ApiError> {
        self.runtime.block_on(self.www.manage_user(request))
    }

    fn policy(&self) -> Result<PolicyReply, ApiError> {
        self.runtime.block_on(self.www.policy())
    }

    fn new_user(&self, email: &str, password: &str) -> Result<NewUserOutcome, ApiError> {
        self.runtime.block_on(self.www.new_user(email, password))
    }

    fn verify_new_user(
        &self,
        email: &str,
        verification_token: &str,
        signature_hex: &str,
    ) -> Result<(), ApiError> {
        self.runtime.block_on(
            self.www
                .verify_new_user(email, verification_token, signature_hex),
        )
    }
}

impl Faucet for BlockingClient {
    fn pay(
        &self,
        address: &str,
        amount: u64,
        override_token: Option<&str>,
    ) -> Result<String, FaucetError> {
        self.runtime
            .block_on(self.faucet.pay(address, amount, override_token))
    }
}
