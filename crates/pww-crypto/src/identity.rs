//! # User Identity
//!
//! An [`Identity`] is the Ed25519 keypair the web service binds to a user
//! account. The public half is sent at signup; the private half signs the
//! email verification token and later requests.
//!
//! ## Security Invariant
//!
//! - `Identity` does not implement `Serialize` and its `Debug` output never
//!   contains key material. The only way secret bytes leave the process is
//!   [`Identity::save`], which writes an owner-only file on unix.
//! - Public keys and signatures render as lowercase hex.
//!
//! ## File Format
//!
//! ```json
//! { "publickey": "<64 hex chars>", "secretkey": "<128 hex chars>" }
//! ```
//!
//! `secretkey` holds the 64-byte keypair encoding (seed followed by public
//! key); loading checks that both halves agree.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;

use ed25519_dalek::{Signer, Verifier};
use rand_core::OsRng;
use serde::{Deserialize, Serialize};
use zeroize::Zeroizing;

use crate::error::CryptoError;

/// An Ed25519 public key (32 bytes).
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct PublicKey([u8; 32]);

/// An Ed25519 signature (64 bytes).
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct Signature([u8; 64]);

/// A user's signing keypair.
pub struct Identity {
    signing_key: ed25519_dalek::SigningKey,
}

#[derive(Serialize, Deserialize)]
struct IdentityFile {
    publickey: String,
    secretkey: String,
}

// ---------------------------------------------------------------------------
// PublicKey
// ---------------------------------------------------------------------------

impl PublicKey {
    /// The raw key bytes.
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Lowercase hex form, as sent to the server.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// Parse a 64-character hex public key.
    pub fn from_hex(s: &str) -> Result<Self, CryptoError> {
        let mut bytes = [0u8; 32];
        hex::decode_to_slice(s.trim(), &mut bytes)?;
        Ok(Self(bytes))
    }

    /// Verify `signature` over `message`.
    pub fn verify(&self, message: &[u8], signature: &Signature) -> Result<(), CryptoError> {
        let vk = ed25519_dalek::VerifyingKey::from_bytes(&self.0)
            .map_err(|e| CryptoError::InvalidKey(e.to_string()))?;
        vk.verify(message, &ed25519_dalek::Signature::from_bytes(&signature.0))
            .map_err(|e| CryptoError::VerificationFailed(e.to_string()))
    }
}

impl std::fmt::Debug for PublicKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "PublicKey({}...)", hex::encode(&self.0[..4]))
    }
}

impl std::fmt::Display for PublicKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_hex())
    }
}

// ---------------------------------------------------------------------------
// Signature
// ---------------------------------------------------------------------------

impl Signature {
    /// The raw signature bytes.
    pub fn as_bytes(&self) -> &[u8; 64] {
        &self.0
    }

    /// Lowercase hex form, as submitted for email verification.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// Parse a 128-character hex signature.
    pub fn from_hex(s: &str) -> Result<Self, CryptoError> {
        let mut bytes = [0u8; 64];
        hex::decode_to_slice(s.trim(), &mut bytes)?;
        Ok(Self(bytes))
    }
}

impl std::fmt::Debug for Signature {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Signature({}...)", hex::encode(&self.0[..4]))
    }
}

impl std::fmt::Display for Signature {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_hex())
    }
}

// ---------------------------------------------------------------------------
// Identity
// ---------------------------------------------------------------------------

impl Identity {
    /// Generate a fresh identity from the OS RNG.
    pub fn generate() -> Self {
        Self {
            signing_key: ed25519_dalek::SigningKey::generate(&mut OsRng),
        }
    }

    /// Deterministic identity from a 32-byte seed.
    pub fn from_seed(seed: &[u8; 32]) -> Self {
        Self {
            signing_key: ed25519_dalek::SigningKey::from_bytes(seed),
        }
    }

    /// The public half.
    pub fn public_key(&self) -> PublicKey {
        PublicKey(self.signing_key.verifying_key().to_bytes())
    }

    /// Sign an arbitrary message.
    pub fn sign(&self, message: &[u8]) -> Signature {
        Signature(self.signing_key.sign(message).to_bytes())
    }

    /// Write the identity to `path`, creating parent directories.
    ///
    /// On unix the file is created with mode `0600`.
    pub fn save(&self, path: &Path) -> Result<(), CryptoError> {
        let io_err = |source| CryptoError::Io {
            path: path.to_path_buf(),
            source,
        };
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(io_err)?;
        }

        let keypair = Zeroizing::new(self.signing_key.to_keypair_bytes());
        let doc = IdentityFile {
            publickey: self.public_key().to_hex(),
            secretkey: hex::encode(keypair.as_slice()),
        };
        let json = Zeroizing::new(serde_json::to_vec_pretty(&doc).map_err(|source| {
            CryptoError::Format {
                path: path.to_path_buf(),
                source,
            }
        })?);

        let mut options = OpenOptions::new();
        options.write(true).create(true).truncate(true);
        #[cfg(unix)]
        {
            use std::os::unix::fs::OpenOptionsExt;
            options.mode(0o600);
        }
        let mut file = options.open(path).map_err(io_err)?;
        file.write_all(&json).map_err(io_err)?;

        tracing::debug!(path = %path.display(), "saved identity");
        Ok(())
    }

    /// Read an identity previously written by [`Identity::save`].
    pub fn load(path: &Path) -> Result<Self, CryptoError> {
        let raw = Zeroizing::new(std::fs::read(path).map_err(|source| CryptoError::Io {
            path: path.to_path_buf(),
            source,
        })?);
        let doc: IdentityFile =
            serde_json::from_slice(&raw).map_err(|source| CryptoError::Format {
                path: path.to_path_buf(),
                source,
            })?;
        let secret = Zeroizing::new(doc.secretkey);

        let mut keypair = Zeroizing::new([0u8; 64]);
        hex::decode_to_slice(secret.trim(), keypair.as_mut_slice())?;
        let signing_key = ed25519_dalek::SigningKey::from_keypair_bytes(&keypair)
            .map_err(|e| CryptoError::InvalidKey(e.to_string()))?;
        let identity = Self { signing_key };

        if identity.public_key() != PublicKey::from_hex(&doc.publickey)? {
            return Err(CryptoError::InvalidKey(
                "public key does not match secret key".into(),
            ));
        }
        Ok(identity)
    }
}

impl std::fmt::Debug for Identity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Identity({:?}, <private>)", self.public_key())
    }
}
