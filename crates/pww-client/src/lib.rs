//! # pww-client: Typed client for the CMS web API
//!
//! Provides typed access to the routes `pwwctl` needs:
//! - **Identity & policy**: `Me`, `Policy`
//! - **CMS administration**: user details and `managecms`
//! - **Signup**: new user registration and email verification
//!
//! Plus the **testnet faucet** used to pay the signup paywall.
//!
//! ## Architecture
//!
//! [`WwwClient`] and [`FaucetClient`] are async `reqwest` clients.
//! [`BlockingClient`] wraps both behind the synchronous collaborator traits
//! in [`adapter`], which is the only surface the command workflows see.

pub mod adapter;
pub mod blocking;
pub mod client;
pub mod config;
pub mod error;
pub mod faucet;
pub mod types;

pub use adapter::{Faucet, NewUserOutcome, UserAdminApi};
pub use blocking::BlockingClient;
pub use client::WwwClient;
pub use config::{ClientConfig, ConfigError};
pub use error::{ApiError, FaucetError};
pub use faucet::FaucetClient;
