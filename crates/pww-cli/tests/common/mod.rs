//! In-memory collaborators for workflow tests.
//!
//! `FakeApi` serves a fixed caller profile, user record, and signup reply,
//! and records every call so tests can assert on ordering and arguments.

#![allow(dead_code)]

use std::cell::RefCell;
use std::io::Cursor;
use std::path::Path;

use pww_cli::{CommandContext, Console, OutputFormat};
use pww_client::types::{LoginReply, ManageUserReply, PolicyReply};
use pww_client::{ApiError, Faucet, FaucetError, NewUserOutcome, UserAdminApi};
use pww_core::{ContractorType, Domain, ManageUser, UserRecord};
use pww_crypto::Identity;

/// One recorded collaborator call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Me,
    UserDetails(String),
    ManageUser(ManageUser),
    Policy,
    NewUser { email: String, password: String },
    VerifyNewUser { email: String, token: String, signature: String },
    Pay { address: String, amount: u64, override_token: Option<String> },
}

pub struct FakeApi {
    pub is_admin: bool,
    pub record: Option<UserRecord>,
    pub min_password_length: usize,
    pub paywall_address: String,
    pub paywall_amount: u64,
    pub verification_token: String,
    pub seed: [u8; 32],
    /// When set, `manage_user` fails with this server error code.
    pub manage_error_code: Option<i64>,
    /// When set, `verify_new_user` fails with this server error code.
    pub verify_error_code: Option<i64>,
    pub calls: RefCell<Vec<Call>>,
}

impl Default for FakeApi {
    fn default() -> Self {
        Self {
            is_admin: true,
            record: Some(UserRecord {
                id: "u-1".into(),
                domain: Some(Domain::Marketing),
                contractor_type: Some(ContractorType::Direct),
                supervisor_user_ids: vec!["a".into()],
            }),
            min_password_length: 8,
            paywall_address: "TsPaywallAddr".into(),
            paywall_amount: 10_000_000,
            verification_token: "0123456789abcdef".into(),
            seed: [9u8; 32],
            manage_error_code: None,
            verify_error_code: None,
            calls: RefCell::new(Vec::new()),
        }
    }
}

impl FakeApi {
    pub fn calls(&self) -> Vec<Call> {
        self.calls.borrow().clone()
    }

    fn record_call(&self, call: Call) {
        self.calls.borrow_mut().push(call);
    }
}

impl UserAdminApi for FakeApi {
    fn me(&self) -> Result<LoginReply, ApiError> {
        self.record_call(Call::Me);
        Ok(LoginReply {
            is_admin: self.is_admin,
            user_id: "admin-id".into(),
            ..LoginReply::default()
        })
    }

    fn user_details(&self, user_id: &str) -> Result<UserRecord, ApiError> {
        self.record_call(Call::UserDetails(user_id.to_string()));
        self.record.clone().ok_or_else(|| ApiError::NotFound {
            endpoint: format!("GET /user/{user_id}"),
        })
    }

    fn manage_user(&self, request: &ManageUser) -> Result<ManageUserReply, ApiError> {
        self.record_call(Call::ManageUser(request.clone()));
        match self.manage_error_code {
            Some(code) => Err(user_error("POST /admin/managecms", code)),
            None => Ok(ManageUserReply {}),
        }
    }

    fn policy(&self) -> Result<PolicyReply, ApiError> {
        self.record_call(Call::Policy);
        Ok(PolicyReply {
            min_password_length: self.min_password_length,
            ..PolicyReply::default()
        })
    }

    fn new_user(&self, email: &str, password: &str) -> Result<NewUserOutcome, ApiError> {
        self.record_call(Call::NewUser {
            email: email.to_string(),
            password: password.to_string(),
        });
        Ok(NewUserOutcome {
            verification_token: self.verification_token.clone(),
            identity: Identity::from_seed(&self.seed),
            paywall_address: self.paywall_address.clone(),
            paywall_amount: self.paywall_amount,
        })
    }

    fn verify_new_user(
        &self,
        email: &str,
        verification_token: &str,
        signature_hex: &str,
    ) -> Result<(), ApiError> {
        self.record_call(Call::VerifyNewUser {
            email: email.to_string(),
            token: verification_token.to_string(),
            signature: signature_hex.to_string(),
        });
        match self.verify_error_code {
            Some(code) => Err(user_error("GET /user/verify", code)),
            None => Ok(()),
        }
    }
}

fn user_error(endpoint: &str, code: i64) -> ApiError {
    ApiError::UserError {
        endpoint: endpoint.into(),
        code,
        context: vec!["rejected by test server".into()],
    }
}

/// Faucet that either pays with a fixed txid or refuses.
pub struct FakeFaucet {
    pub refuse: Option<String>,
    pub calls: RefCell<Vec<Call>>,
}

impl Default for FakeFaucet {
    fn default() -> Self {
        Self {
            refuse: None,
            calls: RefCell::new(Vec::new()),
        }
    }
}

impl FakeFaucet {
    pub fn calls(&self) -> Vec<Call> {
        self.calls.borrow().clone()
    }
}

impl Faucet for FakeFaucet {
    fn pay(
        &self,
        address: &str,
        amount: u64,
        override_token: Option<&str>,
    ) -> Result<String, FaucetError> {
        self.calls.borrow_mut().push(Call::Pay {
            address: address.to_string(),
            amount,
            override_token: override_token.map(String::from),
        });
        match &self.refuse {
            Some(reason) => Err(FaucetError::Rejected(reason.clone())),
            None => Ok("faucet-tx-1".into()),
        }
    }
}

pub fn context<'a>(
    api: &'a FakeApi,
    faucet: &'a FakeFaucet,
    identity: Option<&'a Identity>,
    identity_file: &'a Path,
) -> CommandContext<'a> {
    CommandContext {
        api,
        faucet,
        identity,
        identity_file,
        format: OutputFormat::Compact,
    }
}

pub type TestConsole = Console<Cursor<Vec<u8>>, Vec<u8>>;

pub fn console(input: &str) -> TestConsole {
    Console::new(Cursor::new(input.as_bytes().to_vec()), Vec::new())
}

pub fn printed(console: TestConsole) -> String {
    String::from_utf8(console.into_parts().1).unwrap()
}
