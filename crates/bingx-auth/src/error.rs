//! Error types for authentication operations

/// Errors that can occur while building credentials or signing requests
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    /// Invalid API credentials
    #[error("Invalid credentials: {0}")]
    InvalidCredentials(String),

    /// Environment variable not set
    #[error("Environment variable not set: {0}")]
    EnvVarNotSet(String),

    /// HMAC could not be computed
    #[error("Signing failed: {0}")]
    Signing(String),

    /// Parameters could not be URL-encoded
    #[error("Failed to encode parameters: {0}")]
    Encoding(#[from] serde_urlencoded::ser::Error),
}

/// Result type for authentication operations
pub type AuthResult<T> = Result<T, AuthError>;
