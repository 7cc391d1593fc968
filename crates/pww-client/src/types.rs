//! # Wire Types
//!
//! Request and reply bodies of the web API. Field names follow the server's
//! all-lowercase JSON convention. Replies use `#[serde(default)]` so that
//! fields added by newer servers, or omitted by older ones, do not break
//! deserialization.

use serde::{Deserialize, Serialize};

pub use pww_core::{ManageUser, UserRecord};

/// Reply to `GET /user/me`: the logged-in caller.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginReply {
    #[serde(default, rename = "isadmin")]
    pub is_admin: bool,
    #[serde(default, rename = "userid")]
    pub user_id: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub username: String,
    #[serde(default, rename = "publickey")]
    pub public_key: String,
}

/// Reply to `GET /policy`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PolicyReply {
    #[serde(default, rename = "minpasswordlength")]
    pub min_password_length: usize,
    #[serde(default, rename = "minusernamelength")]
    pub min_username_length: usize,
    #[serde(default, rename = "maxusernamelength")]
    pub max_username_length: usize,
}

/// Reply to `GET /user/{id}`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UserDetailsReply {
    #[serde(default)]
    pub user: UserRecord,
}

/// Reply to `POST /admin/managecms`. The server sends an empty object.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManageUserReply {}

/// Body of `POST /user/new`.
#[derive(Debug, Serialize)]
pub struct NewUserRequest {
    pub email: String,
    pub password: String,
    #[serde(rename = "publickey")]
    pub public_key: String,
    pub username: String,
}

/// Reply to `POST /user/new`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct NewUserReply {
    #[serde(default, rename = "paywalladdress")]
    pub paywall_address: String,
    /// Paywall amount in atoms; `0` when no paywall is active.
    #[serde(default, rename = "paywallamount")]
    pub paywall_amount: u64,
    #[serde(default, rename = "paywalltxnotbefore")]
    pub paywall_tx_not_before: i64,
    #[serde(default, rename = "verificationtoken")]
    pub verification_token: String,
}

/// Query of `GET /user/verify`.
#[derive(Debug, Serialize)]
pub struct VerifyNewUserQuery<'a> {
    pub email: &'a str,
    #[serde(rename = "verificationtoken")]
    pub verification_token: &'a str,
    pub signature: &'a str,
}

/// Reply to `GET /user/verify`. The server sends an empty object.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct VerifyNewUserReply {}

/// Body the server returns alongside a 400 status.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ErrorReply {
    #[serde(default, rename = "errorcode")]
    pub error_code: i64,
    #[serde(default, rename = "errorcontext")]
    pub error_context: Vec<String>,
}

/// Reply from the testnet faucet.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FaucetReply {
    #[serde(default, rename = "txid", alias = "TxID")]
    pub tx_id: String,
    #[serde(default, rename = "error", alias = "Error")]
    pub error: String,
}
