//! # Signup Credentials
//!
//! Email/password pairs for account registration, either supplied by the
//! operator or generated at random so that the password exactly matches the
//! server's minimum length policy.

use rand_core::{CryptoRng, RngCore};
use zeroize::Zeroizing;

use crate::error::ValidationError;

/// Domain used for randomly generated email addresses.
pub const RANDOM_EMAIL_DOMAIN: &str = "example.com";

/// Random password length used when the policy sets no minimum.
pub const DEFAULT_RANDOM_PASSWORD_LENGTH: usize = 16;

/// Email and password for a new account.
///
/// The password is zeroized on drop and never shown by `Debug`.
#[derive(Clone)]
pub struct Credentials {
    email: String,
    password: Zeroizing<String>,
}

impl Credentials {
    /// Validate operator-supplied credentials against the password policy.
    pub fn explicit(
        email: &str,
        password: &str,
        min_password_length: usize,
    ) -> Result<Self, ValidationError> {
        let email = email.trim();
        if email.is_empty() {
            return Err(ValidationError::MissingCredentials);
        }
        if !looks_like_email(email) {
            return Err(ValidationError::InvalidEmail(email.to_string()));
        }
        let actual = password.chars().count();
        if actual < min_password_length {
            return Err(ValidationError::PasswordTooShort {
                min: min_password_length,
                actual,
            });
        }
        Ok(Self {
            email: email.to_string(),
            password: Zeroizing::new(password.to_string()),
        })
    }

    /// Generate credentials from `rng`.
    ///
    /// The password is a lowercase hex string of exactly
    /// `min_password_length` characters and the email is the same string at
    /// [`RANDOM_EMAIL_DOMAIN`]. A minimum of `0` means the policy sets none,
    /// and [`DEFAULT_RANDOM_PASSWORD_LENGTH`] is used instead.
    pub fn random<R: RngCore + CryptoRng>(rng: &mut R, min_password_length: usize) -> Self {
        let len = match min_password_length {
            0 => DEFAULT_RANDOM_PASSWORD_LENGTH,
            min => min,
        };
        let mut bytes = Zeroizing::new(vec![0u8; len.div_ceil(2)]);
        rng.fill_bytes(&mut bytes);
        let mut token = Zeroizing::new(hex::encode(bytes.as_slice()));
        token.truncate(len);
        Self {
            email: format!("{}@{RANDOM_EMAIL_DOMAIN}", token.as_str()),
            password: token,
        }
    }

    /// The account email.
    pub fn email(&self) -> &str {
        &self.email
    }

    /// The account password.
    pub fn password(&self) -> &str {
        &self.password
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

fn looks_like_email(email: &str) -> bool {
    match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.is_empty()
                && !domain.contains('@')
                && !email.chars().any(char::is_whitespace)
        }
        None => false,
    }
}
