//! Authentication primitives: login credentials and the configured admin
//! credential check.
//!
//! Inbound adapters parse request bodies into [`LoginCredentials`] and hand
//! them to a [`LoginService`](super::ports::LoginService). The bundled
//! implementation, [`ConfiguredLoginService`], compares against credentials
//! sourced from configuration.

use std::fmt;

use async_trait::async_trait;
use hmac::{Hmac, Mac};
use rand::RngCore;
use rand::rngs::OsRng;
use sha2::Sha256;
use zeroize::Zeroizing;

use super::ports::LoginService;
use super::{Error, Privilege};

type HmacSha256 = Hmac<Sha256>;

const MAC_KEY_BYTES: usize = 64;

/// Domain error returned when login payload values are invalid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginValidationError {
    /// Username was missing or blank once trimmed.
    EmptyUsername,
    /// Password was blank.
    EmptyPassword,
}

impl fmt::Display for LoginValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyUsername => write!(f, "username must not be empty"),
            Self::EmptyPassword => write!(f, "password must not be empty"),
        }
    }
}

impl std::error::Error for LoginValidationError {}

/// Validated login credentials.
///
/// ## Invariants
/// - `username` is trimmed and must not be empty after trimming.
/// - `password` must be non-empty but keeps caller-provided whitespace.
///
/// # Examples
/// ```
/// use intranet::domain::LoginCredentials;
///
/// let creds = LoginCredentials::try_from_parts(" admin ", "admin123").unwrap();
/// assert_eq!(creds.username(), "admin");
/// assert_eq!(creds.password(), "admin123");
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct LoginCredentials {
    username: String,
    password: Zeroizing<String>,
}

impl LoginCredentials {
    /// Construct credentials from raw username/password inputs.
    pub fn try_from_parts(username: &str, password: &str) -> Result<Self, LoginValidationError> {
        let normalized = username.trim();
        if normalized.is_empty() {
            return Err(LoginValidationError::EmptyUsername);
        }

        if password.is_empty() {
            return Err(LoginValidationError::EmptyPassword);
        }

        Ok(Self {
            username: normalized.to_owned(),
            password: Zeroizing::new(password.to_owned()),
        })
    }

    /// Username string.
    #[must_use]
    pub fn username(&self) -> &str {
        self.username.as_str()
    }

    /// Password string provided by the caller.
    #[must_use]
    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

impl fmt::Debug for LoginCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginCredentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Login service checking credentials against the configured admin account.
///
/// The username is compared exactly. The password is compared in constant
/// time: both the configured and the supplied password are tagged with
/// HMAC-SHA256 under a per-process random key and the tags are checked with
/// [`Mac::verify_slice`].
pub struct ConfiguredLoginService {
    username: String,
    mac_key: Zeroizing<Vec<u8>>,
    password_tag: Vec<u8>,
}

impl ConfiguredLoginService {
    /// Build the service from the configured admin credentials.
    ///
    /// # Errors
    /// Returns an internal error if the MAC cannot be initialised.
    pub fn new(admin: &LoginCredentials) -> Result<Self, Error> {
        let mut key = vec![0_u8; MAC_KEY_BYTES];
        OsRng.fill_bytes(&mut key);
        let mac_key = Zeroizing::new(key);
        let password_tag = keyed_mac(&mac_key, admin.password())?
            .finalize()
            .into_bytes()
            .to_vec();
        Ok(Self {
            username: admin.username().to_owned(),
            mac_key,
            password_tag,
        })
    }

    fn password_matches(&self, candidate: &str) -> Result<bool, Error> {
        Ok(keyed_mac(&self.mac_key, candidate)?
            .verify_slice(&self.password_tag)
            .is_ok())
    }
}

fn keyed_mac(key: &[u8], message: &str) -> Result<HmacSha256, Error> {
    let mut mac = HmacSha256::new_from_slice(key)
        .map_err(|err| Error::internal(format!("credential MAC setup failed: {err}")))?;
    mac.update(message.as_bytes());
    Ok(mac)
}

#[async_trait]
impl LoginService for ConfiguredLoginService {
    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<Privilege, Error> {
        // Evaluate both halves so a username mismatch does not skip the MAC.
        let password_ok = self.password_matches(credentials.password())?;
        let username_ok = credentials.username() == self.username;
        if username_ok && password_ok {
            Ok(Privilege::Admin)
        } else {
            Err(Error::unauthorized("invalid credentials"))
        }
    }
}
