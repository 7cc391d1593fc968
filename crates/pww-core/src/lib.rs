#![deny(missing_docs)]

//! # pww-core: Foundational Types for pwwctl
//!
//! Domain types shared by every crate in the workspace. It has no internal
//! crate dependencies.
//!
//! ## Design Principles
//!
//! 1. **Enumerations, not integers.** [`Domain`] and [`ContractorType`] are
//!    closed enums. The wire code `0` ("unset") maps to `None`, so an
//!    out-of-range code can never reach an outgoing [`ManageUser`].
//!
//! 2. **Resolve, then submit.** [`PendingUpdate`] collects the values the
//!    reconciler settles on and is consumed exactly once by
//!    [`PendingUpdate::into_request`].
//!
//! 3. **[`ValidationError`] hierarchy.** Structured errors with `thiserror`,
//!    no `.unwrap()` outside tests.

pub mod credentials;
pub mod error;
pub mod user;

pub use credentials::Credentials;
pub use error::ValidationError;
pub use user::{
    parse_supervisor_list, CodedEnum, ContractorType, Domain, ManageUser, PendingUpdate,
    UserRecord,
};
