//! # pww-crypto: User Identities for pwwctl
//!
//! Ed25519 keypairs that the web service binds to user accounts:
//!
//! - **Generation** from the OS RNG when a new account is registered.
//! - **Signing** of the email verification token.
//! - **Persistence** to a JSON identity file that later commands load to
//!   prove who is calling.

pub mod error;
pub mod identity;

pub use error::CryptoError;
pub use identity::{Identity, PublicKey, Signature};
