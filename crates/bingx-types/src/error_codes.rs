//! BingX API error code catalogue
//!
//! BingX reports business-level failures as a numeric `code` in the response
//! envelope. This module maps the codes this client knows about to a
//! category and a short description. It only classifies; deciding what to
//! do about an error is left to the caller.

/// Broad error categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// Key, signature, timestamp or permission problems
    Auth,
    /// Request frequency limits
    RateLimit,
    /// Missing or malformed parameters
    Parameter,
    /// Order or balance rejections
    Trading,
    /// Exchange-side availability problems
    Service,
    /// Requested entity does not exist
    NotFound,
    /// Code not in the catalogue
    Unknown,
}

/// Known BingX error codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BingxErrorCode {
    // === Authentication ===
    /// 100001 signature verification failed
    ///
    /// Order endpoints also answer 100001 for some business rejections
    /// (e.g. "insufficient balance"). The catalogue maps codes only, so
    /// read the exchange message before treating this as a key problem.
    SignatureVerificationFailed,
    /// 100412 null signature
    NullSignature,
    /// 100413 incorrect API key
    IncorrectApiKey,
    /// 100419 IP not in whitelist
    IpNotWhitelisted,
    /// 100421 null or mismatched timestamp
    TimestampMismatch,
    /// 80012 / 100004 permission denied
    PermissionDenied,

    // === Rate limiting ===
    /// 100410 request frequency limit
    FrequencyLimit,

    // === Parameters ===
    /// 100400 invalid or missing parameter
    InvalidParameter,
    /// 80014 invalid parameter (swap)
    SwapInvalidParameter,

    // === Trading ===
    /// 100202 insufficient balance
    InsufficientBalance,
    /// 101204 insufficient margin
    InsufficientMargin,
    /// 100440 order price deviates too far from the market
    PriceDeviation,
    /// 80020 risk control rejection
    RiskForbidden,

    // === Not found ===
    /// 100204 no data
    NoData,
    /// 80016 order does not exist
    OrderNotFound,
    /// 80017 position does not exist
    PositionNotFound,

    // === Service ===
    /// 100500 internal server error
    InternalError,
    /// 100503 server busy
    ServerBusy,
    /// 80001 request failed
    RequestFailed,
}

impl BingxErrorCode {
    /// Look up a numeric code
    pub fn from_code(code: i64) -> Option<Self> {
        Some(match code {
            100001 => Self::SignatureVerificationFailed,
            100412 => Self::NullSignature,
            100413 => Self::IncorrectApiKey,
            100419 => Self::IpNotWhitelisted,
            100421 => Self::TimestampMismatch,
            100004 | 80012 => Self::PermissionDenied,
            100410 => Self::FrequencyLimit,
            100400 => Self::InvalidParameter,
            80014 => Self::SwapInvalidParameter,
            100202 => Self::InsufficientBalance,
            101204 => Self::InsufficientMargin,
            100440 => Self::PriceDeviation,
            80020 => Self::RiskForbidden,
            100204 => Self::NoData,
            80016 => Self::OrderNotFound,
            80017 => Self::PositionNotFound,
            100500 => Self::InternalError,
            100503 => Self::ServerBusy,
            80001 => Self::RequestFailed,
            _ => return None,
        })
    }

    /// Category of this code
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::SignatureVerificationFailed
            | Self::NullSignature
            | Self::IncorrectApiKey
            | Self::IpNotWhitelisted
            | Self::TimestampMismatch
            | Self::PermissionDenied => ErrorCategory::Auth,
            Self::FrequencyLimit => ErrorCategory::RateLimit,
            Self::InvalidParameter | Self::SwapInvalidParameter => ErrorCategory::Parameter,
            Self::InsufficientBalance
            | Self::InsufficientMargin
            | Self::PriceDeviation
            | Self::RiskForbidden => ErrorCategory::Trading,
            Self::NoData | Self::OrderNotFound | Self::PositionNotFound => ErrorCategory::NotFound,
            Self::InternalError | Self::ServerBusy | Self::RequestFailed => ErrorCategory::Service,
        }
    }

    /// Human-readable description
    pub fn description(&self) -> &'static str {
        match self {
            Self::SignatureVerificationFailed => "Signature verification failed",
            Self::NullSignature => "Request is missing a signature",
            Self::IncorrectApiKey => "Incorrect API key",
            Self::IpNotWhitelisted => "IP address is not whitelisted for this key",
            Self::TimestampMismatch => "Request timestamp missing or outside the receive window",
            Self::PermissionDenied => "API key lacks permission for this operation",
            Self::FrequencyLimit => "Request frequency limit exceeded",
            Self::InvalidParameter => "Invalid or missing parameter",
            Self::SwapInvalidParameter => "Invalid parameter",
            Self::InsufficientBalance => "Insufficient balance",
            Self::InsufficientMargin => "Insufficient margin",
            Self::PriceDeviation => "Order price deviates too far from the market price",
            Self::RiskForbidden => "Rejected by risk control",
            Self::NoData => "No data",
            Self::OrderNotFound => "Order does not exist",
            Self::PositionNotFound => "Position does not exist",
            Self::InternalError => "Internal server error",
            Self::ServerBusy => "Server busy",
            Self::RequestFailed => "Request failed",
        }
    }

    /// Check if this is an authentication-related error
    pub fn is_auth_error(&self) -> bool {
        self.category() == ErrorCategory::Auth
    }

    /// Check if this is a rate limit error
    pub fn is_rate_limit(&self) -> bool {
        self.category() == ErrorCategory::RateLimit
    }

    /// Check if this is a trading-related error
    pub fn is_trading_error(&self) -> bool {
        self.category() == ErrorCategory::Trading
    }
}

/// Category for any numeric code, known or not
pub fn categorize(code: i64) -> ErrorCategory {
    BingxErrorCode::from_code(code)
        .map(|c| c.category())
        .unwrap_or(ErrorCategory::Unknown)
}
