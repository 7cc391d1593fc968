//! # Cryptographic Error Types
//!
//! Structured errors for identity handling in `pww-crypto`.

use std::path::PathBuf;

use thiserror::Error;

/// Errors from identity operations.
#[derive(Error, Debug)]
pub enum CryptoError {
    /// Ed25519 signature verification failed.
    #[error("Ed25519 verification failed: {0}")]
    VerificationFailed(String),

    /// Key material is malformed or inconsistent.
    #[error("invalid key material: {0}")]
    InvalidKey(String),

    /// Hex decoding error.
    #[error("hex decode error: {0}")]
    HexDecode(#[from] hex::FromHexError),

    /// The identity file could not be read or written.
    #[error("identity file {path}: {source}")]
    Io {
        /// The identity file path.
        path: PathBuf,
        /// Underlying I/O failure.
        source: std::io::Error,
    },

    /// The identity file is not valid JSON of the expected shape.
    #[error("identity file {path} is malformed: {source}")]
    Format {
        /// The identity file path.
        path: PathBuf,
        /// Underlying parse failure.
        source: serde_json::Error,
    },
}
