//! # Validation Errors
//!
//! Structured input-validation errors built with `thiserror`. Every variant
//! carries the offending input so an operator can see what was rejected
//! without re-running the command.

use thiserror::Error;

/// Input that cannot become part of an outgoing request.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Domain flag is neither a code in 1..=6 nor a known domain name.
    #[error("invalid domain \"{0}\" (expected 1-6 or one of: developer, marketing, community, research, design, documentation)")]
    InvalidDomain(String),

    /// Contractor type flag is neither a code in 1..=3 nor a known name.
    #[error("invalid contractor type \"{0}\" (expected 1-3 or one of: direct, supervisor, sub)")]
    InvalidContractorType(String),

    /// A field was still unset once reconciliation finished.
    #[error("no {field} resolved; pass --{flag} or choose a value interactively")]
    Unresolved {
        /// Human-readable field name.
        field: &'static str,
        /// The command-line flag that would have supplied it.
        flag: &'static str,
    },

    /// The supervisor flag contained no usable IDs.
    #[error("invalid supervisor user ids \"{0}\"; provide a comma separated list")]
    EmptySupervisorList(String),

    /// Neither an email nor `--random` was given.
    #[error("you must either provide an email & password or use the --random flag")]
    MissingCredentials,

    /// Email does not look like `local@domain`.
    #[error("invalid email address \"{0}\"")]
    InvalidEmail(String),

    /// Password is shorter than the server policy allows.
    #[error("password must be at least {min} characters, got {actual}")]
    PasswordTooShort {
        /// Minimum length from the server policy.
        min: usize,
        /// Length of the supplied password.
        actual: usize,
    },
}
