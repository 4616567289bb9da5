//! Error types for REST API operations

use bingx_auth::AuthError;
use bingx_types::error_codes::{BingxErrorCode, ErrorCategory};

/// Errors that can occur during REST API operations
///
/// The variants separate where a call failed: on the wire
/// ([`Transport`](Self::Transport), [`Timeout`](Self::Timeout)), at the HTTP
/// layer ([`Http`](Self::Http)), while reading the body
/// ([`Decode`](Self::Decode)), or because the exchange rejected the request
/// ([`Exchange`](Self::Exchange)).
#[derive(Debug, thiserror::Error)]
pub enum RestError {
    /// Network-level failure (connect, TLS, reset)
    #[error("Transport error: {0}")]
    Transport(reqwest::Error),

    /// Request deadline elapsed
    #[error("Request timed out")]
    Timeout,

    /// Non-success HTTP status
    #[error("HTTP {status}: {body}")]
    Http {
        /// HTTP status code
        status: u16,
        /// Response body as text
        body: String,
    },

    /// Response body was not the expected JSON shape
    #[error("Decode error: {0}")]
    Decode(String),

    /// Well-formed response reporting a business-level rejection
    #[error("Exchange error {code}: {message}")]
    Exchange {
        /// Envelope code (never 0 unless the endpoint reports soft failures via `msg`)
        code: i64,
        /// Envelope message
        message: String,
    },

    /// Missing API credentials for private endpoint
    #[error("Authentication required for this endpoint")]
    AuthRequired,

    /// Credential or signing failure
    #[error(transparent)]
    Auth(#[from] AuthError),

    /// Invalid request parameters
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// Requested entity absent from an otherwise successful response
    #[error("Not found: {0}")]
    NotFound(String),
}

impl From<reqwest::Error> for RestError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout
        } else {
            Self::Transport(err)
        }
    }
}

impl From<serde_json::Error> for RestError {
    fn from(err: serde_json::Error) -> Self {
        Self::Decode(err.to_string())
    }
}

impl RestError {
    /// Create an exchange error from an envelope code and message
    pub fn exchange(code: i64, message: impl Into<String>) -> Self {
        Self::Exchange {
            code,
            message: message.into(),
        }
    }

    /// Envelope code, if the exchange rejected the call
    pub fn exchange_code(&self) -> Option<i64> {
        match self {
            Self::Exchange { code, .. } => Some(*code),
            _ => None,
        }
    }

    /// Catalogue entry for the exchange code, if known
    ///
    /// Lookup is by code alone; the exchange message is kept verbatim in
    /// [`Exchange`](Self::Exchange) and may disagree with the catalogue.
    pub fn error_code(&self) -> Option<BingxErrorCode> {
        self.exchange_code().and_then(BingxErrorCode::from_code)
    }

    /// Category of the exchange code
    pub fn category(&self) -> Option<ErrorCategory> {
        self.exchange_code().map(bingx_types::error_codes::categorize)
    }

    /// Check if the exchange rejected the call
    pub fn is_exchange_error(&self) -> bool {
        matches!(self, Self::Exchange { .. })
    }

    /// Check if this error indicates rate limiting
    pub fn is_rate_limited(&self) -> bool {
        matches!(self, Self::Http { status: 429, .. })
            || self.error_code().is_some_and(|c| c.is_rate_limit())
    }

    /// Check if this error is an authentication problem
    pub fn is_auth_error(&self) -> bool {
        matches!(
            self,
            Self::AuthRequired | Self::Auth(_) | Self::Http { status: 401 | 403, .. }
        ) || self.error_code().is_some_and(|c| c.is_auth_error())
    }
}

/// Result type for REST operations
pub type RestResult<T> = Result<T, RestError>;
