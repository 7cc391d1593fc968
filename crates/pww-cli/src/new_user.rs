//! # `newuser` Subcommand
//!
//! Registers an account bound to a freshly generated identity, then
//! optionally saves the identity, verifies the email address, and pays the
//! signup paywall from the testnet faucet.
//!
//! ```bash
//! pwwctl newuser alice@example.com hunter2hunter2 --save --verify
//! pwwctl newuser --random --verify --paywall
//! ```

use std::io::Write;

use clap::Args;
use rand_core::OsRng;

use pww_client::faucet::atoms_to_dcr;
use pww_core::{Credentials, ValidationError};

use crate::context::CommandContext;
use crate::error::{CommandError, PaywallError};

/// Arguments for `pwwctl newuser`.
#[derive(Args, Debug)]
pub struct NewUserArgs {
    /// Email address of the new account.
    #[arg(value_name = "EMAIL")]
    pub email: Option<String>,

    /// Password of the new account.
    #[arg(value_name = "PASSWORD")]
    pub password: Option<String>,

    /// Generate a random email and password.
    #[arg(long)]
    pub random: bool,

    /// Save the new identity to the identity file.
    #[arg(long)]
    pub save: bool,

    /// Verify the email address with the new identity.
    #[arg(long)]
    pub verify: bool,

    /// Pay the signup fee from the testnet faucet.
    #[arg(long)]
    pub paywall: bool,

    /// Token that lifts the faucet's rate limit.
    #[arg(long = "overridetoken")]
    pub override_token: Option<String>,
}

/// Progress of a `newuser` run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NewUserStage {
    /// Settle email and password.
    ResolveCredentials,
    /// Register the account.
    CreateAccount,
    /// Write the identity file (`--save`).
    PersistIdentity,
    /// Prove control of the identity (`--verify`).
    VerifyEmail,
    /// Pay the signup fee (`--paywall`).
    PayFaucet,
    /// Finished.
    Done,
}

/// Execute `newuser`, printing progress to `out`.
pub fn run_new_user(
    args: &NewUserArgs,
    ctx: &CommandContext<'_>,
    out: &mut impl Write,
) -> Result<(), CommandError> {
    let mut stage = NewUserStage::ResolveCredentials;
    tracing::debug!(?stage);
    let email = args.email.as_deref().filter(|e| !e.trim().is_empty());
    if !args.random && email.is_none() {
        return Err(ValidationError::MissingCredentials.into());
    }

    let policy = ctx.api.policy()?;
    let credentials = match email {
        Some(email) if !args.random => Credentials::explicit(
            email,
            args.password.as_deref().unwrap_or_default(),
            policy.min_password_length,
        )?,
        _ => Credentials::random(&mut OsRng, policy.min_password_length),
    };

    stage = NewUserStage::CreateAccount;
    tracing::debug!(?stage, email = credentials.email());
    let outcome = ctx.api.new_user(credentials.email(), credentials.password())?;
    writeln!(out, "Created user {}", credentials.email())?;
    if args.random {
        writeln!(out, "Email:    {}", credentials.email())?;
        writeln!(out, "Password: {}", credentials.password())?;
    }

    if args.save {
        stage = NewUserStage::PersistIdentity;
        tracing::debug!(?stage);
        outcome.identity.save(ctx.identity_file)?;
        writeln!(out, "User identity saved to: {}", ctx.identity_file.display())?;
    }

    if args.verify {
        stage = NewUserStage::VerifyEmail;
        tracing::debug!(?stage);
        let signature = outcome.identity.sign(outcome.verification_token.as_bytes());
        ctx.api.verify_new_user(
            credentials.email(),
            &outcome.verification_token,
            &signature.to_hex(),
        )?;
        writeln!(out, "Verified email {}", credentials.email())?;
    }

    if args.paywall {
        stage = NewUserStage::PayFaucet;
        tracing::debug!(?stage);
        let address = outcome.paywall_address.as_str();
        let amount = atoms_to_dcr(outcome.paywall_amount);
        if address.is_empty() && outcome.paywall_amount == 0 {
            return Err(PaywallError::NoPaywallTarget {
                amount,
                address: address.to_string(),
            }
            .into());
        }
        let tx_id = ctx
            .faucet
            .pay(address, outcome.paywall_amount, args.override_token.as_deref())
            .map_err(|source| PaywallError::FaucetFailed {
                amount: amount.clone(),
                address: address.to_string(),
                source,
            })?;
        writeln!(out, "paid {amount} DCR to {address} with faucet tx {tx_id}")?;
    }

    stage = NewUserStage::Done;
    tracing::info!(?stage, email = credentials.email(), "user created");
    Ok(())
}
