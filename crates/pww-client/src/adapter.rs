//! # Collaborator Traits
//!
//! The workflows in `pww-cli` talk to the outside world only through these
//! synchronous traits. [`crate::blocking::BlockingClient`] implements them
//! over HTTP; tests substitute in-memory fakes.
//!
//! Implementations must not retry: a failed call is reported once and the
//! caller decides what to do with it.

use pww_crypto::Identity;

use crate::error::{ApiError, FaucetError};
use crate::types::{LoginReply, ManageUser, ManageUserReply, PolicyReply, UserRecord};

/// Everything `POST /user/new` hands back to the caller.
#[derive(Debug)]
pub struct NewUserOutcome {
    /// Token the new user signs to prove control of the identity.
    pub verification_token: String,
    /// Identity generated for, and registered with, the new account.
    pub identity: Identity,
    /// Address the signup fee must be paid to; empty when no paywall.
    pub paywall_address: String,
    /// Signup fee in atoms; `0` when no paywall.
    pub paywall_amount: u64,
}

/// User and CMS administration routes of the web API.
pub trait UserAdminApi {
    /// The caller's own profile.
    fn me(&self) -> Result<LoginReply, ApiError>;

    /// Current CMS record of `user_id`.
    fn user_details(&self, user_id: &str) -> Result<UserRecord, ApiError>;

    /// Overwrite a user's CMS attributes.
    fn manage_user(&self, request: &ManageUser) -> Result<ManageUserReply, ApiError>;

    /// Server policy, including the minimum password length.
    fn policy(&self) -> Result<PolicyReply, ApiError>;

    /// Register a new account.
    fn new_user(&self, email: &str, password: &str) -> Result<NewUserOutcome, ApiError>;

    /// Submit the hex signature over a verification token.
    fn verify_new_user(
        &self,
        email: &str,
        verification_token: &str,
        signature_hex: &str,
    ) -> Result<(), ApiError>;
}

/// Testnet faucet used to satisfy the signup paywall.
pub trait Faucet {
    /// Pay `amount` atoms to `address`, returning the transaction id.
    fn pay(
        &self,
        address: &str,
        amount: u64,
        override_token: Option<&str>,
    ) -> Result<String, FaucetError>;
}
