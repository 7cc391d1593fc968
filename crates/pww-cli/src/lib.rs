//! # pww-cli: Administration CLI for the CMS Web Service
//!
//! Provides the `pwwctl` command-line interface.
//!
//! ## Subcommands
//!
//! - `pwwctl manageuser`: Set a user's domain, contractor type, and
//!   supervisors, by flag or through a guided wizard.
//! - `pwwctl newuser`: Register an account, optionally saving its identity,
//!   verifying its email, and paying the signup paywall.
//!
//! ```bash
//! pwwctl manageuser 0b4f7e2e --domain 5
//! pwwctl newuser --random --save --verify --paywall
//! ```
//!
//! Workflows depend only on the collaborator traits of `pww-client` and a
//! [`prompt::Console`], so they run the same against the live server and
//! against in-memory fakes.

pub mod context;
pub mod error;
pub mod manage_user;
pub mod new_user;
pub mod output;
pub mod prompt;
pub mod reconcile;

pub use context::CommandContext;
pub use error::{AuthorizationError, CommandError, PaywallError};
pub use output::OutputFormat;
pub use prompt::{Console, LineSource, PromptError};
