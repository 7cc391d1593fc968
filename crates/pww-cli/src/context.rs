//! # Command Context
//!
//! Everything a workflow needs from the outside world, passed explicitly:
//! the API and faucet collaborators, the loaded identity, where identities
//! are saved, and the output format. Nothing here is global.

use std::path::{Path, PathBuf};

use pww_client::{Faucet, UserAdminApi};
use pww_crypto::Identity;

use crate::output::OutputFormat;

/// Identity file location relative to the home directory.
const IDENTITY_DIR: &str = ".pwwctl";
const IDENTITY_FILE: &str = "identity.json";

/// Collaborators and settings shared by every command.
pub struct CommandContext<'a> {
    /// Web API.
    pub api: &'a dyn UserAdminApi,
    /// Testnet faucet.
    pub faucet: &'a dyn Faucet,
    /// Identity of the logged-in operator, if one is on disk.
    pub identity: Option<&'a Identity>,
    /// Where `newuser --save` writes the new identity.
    pub identity_file: &'a Path,
    /// Reply rendering.
    pub format: OutputFormat,
}

/// Identity file path: `PWW_IDENTITY_FILE`, else `$HOME/.pwwctl/identity.json`.
pub fn default_identity_file() -> PathBuf {
    if let Some(path) = std::env::var_os("PWW_IDENTITY_FILE").filter(|p| !p.is_empty()) {
        return PathBuf::from(path);
    }
    let home = std::env::var_os("HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("."));
    home.join(IDENTITY_DIR).join(IDENTITY_FILE)
}

/// Load the operator identity from `path`.
///
/// A missing file means "no identity". An unreadable or malformed file is
/// logged and treated the same way, so commands that do not need an
/// identity still run.
pub fn load_identity(path: &Path) -> Option<Identity> {
    if !path.exists() {
        tracing::debug!(path = %path.display(), "no identity file");
        return None;
    }
    match Identity::load(path) {
        Ok(identity) => {
            tracing::debug!(public_key = %identity.public_key(), "loaded identity");
            Some(identity)
        }
        Err(e) => {
            tracing::warn!(path = %path.display(), "ignoring identity file: {e}");
            None
        }
    }
}
