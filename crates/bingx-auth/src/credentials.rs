//! Authentication credentials for BingX API
//!
//! Implements HMAC-SHA256 signing as required by BingX's private endpoints.
//!
//! # Security
//!
//! The secret key is stored using the `secrecy` crate which:
//! - Zeroizes memory on drop (prevents memory scanning)
//! - Prevents accidental logging via Debug impl
//! - Provides explicit access via `expose_secret()`

use bingx_types::Params;
use hmac::{Hmac, Mac};
use secrecy::{ExposeSecret, SecretString};
use sha2::Sha256;
use tracing::trace;

use crate::error::{AuthError, AuthResult};

type HmacSha256 = Hmac<Sha256>;

/// Environment variable holding the API key
pub const API_KEY_ENV: &str = "BINGX_API_KEY";
/// Environment variable holding the secret key
pub const SECRET_KEY_ENV: &str = "BINGX_SECRET_KEY";

/// API credentials for authenticated requests
///
/// The secret key is zeroized when the Credentials are dropped.
pub struct Credentials {
    /// API key (public, sent as `X-BX-APIKEY`)
    api_key: String,
    /// Secret key (zeroized on drop)
    secret_key: SecretString,
}

impl Credentials {
    /// Create new credentials from an API key and secret key
    ///
    /// # Errors
    /// Returns [`AuthError::InvalidCredentials`] if either part is empty.
    pub fn new(api_key: impl Into<String>, secret_key: impl Into<String>) -> AuthResult<Self> {
        let api_key = api_key.into();
        let secret_key = secret_key.into();

        if api_key.trim().is_empty() {
            return Err(AuthError::InvalidCredentials("API key is empty".to_string()));
        }
        if secret_key.trim().is_empty() {
            return Err(AuthError::InvalidCredentials("Secret key is empty".to_string()));
        }

        Ok(Self {
            api_key,
            secret_key: SecretString::from(secret_key),
        })
    }

    /// Create credentials from environment variables
    ///
    /// Reads `BINGX_API_KEY` and `BINGX_SECRET_KEY` from the environment.
    pub fn from_env() -> AuthResult<Self> {
        let api_key = std::env::var(API_KEY_ENV)
            .map_err(|_| AuthError::EnvVarNotSet(API_KEY_ENV.to_string()))?;
        let secret_key = std::env::var(SECRET_KEY_ENV)
            .map_err(|_| AuthError::EnvVarNotSet(SECRET_KEY_ENV.to_string()))?;

        Self::new(api_key, secret_key)
    }

    /// Get the API key
    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    /// Sign a canonical parameter string
    ///
    /// BingX signature algorithm: lowercase hex of
    /// HMAC-SHA256(secret_key, canonical_params).
    pub fn sign(&self, payload: &str) -> AuthResult<String> {
        let mut mac = HmacSha256::new_from_slice(self.secret_key.expose_secret().as_bytes())
            .map_err(|e| AuthError::Signing(e.to_string()))?;
        mac.update(payload.as_bytes());

        Ok(hex::encode(mac.finalize().into_bytes()))
    }

    /// Sign a parameter bag
    pub fn sign_params(&self, params: &Params) -> AuthResult<String> {
        let canonical = params.canonical();
        trace!(params = params.len(), "Signing request parameters");
        self.sign(&canonical)
    }
}

impl Clone for Credentials {
    /// Clone credentials (creates a new SecretString with the same content)
    fn clone(&self) -> Self {
        Self {
            api_key: self.api_key.clone(),
            secret_key: SecretString::from(self.secret_key.expose_secret().to_string()),
        }
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let visible = self
            .api_key
            .char_indices()
            .nth(8)
            .map(|(i, _)| &self.api_key[..i])
            .unwrap_or(&self.api_key);

        f.debug_struct("Credentials")
            .field("api_key", &format!("{}...", visible))
            .field("secret_key", &"[REDACTED]")
            .finish()
    }
}
