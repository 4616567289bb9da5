//! Credentials and request signing for the BingX API
//!
//! Private BingX endpoints authenticate with an API key header plus an
//! HMAC-SHA256 signature over the sorted request parameters.
//!
//! # Example
//!
//! ```no_run
//! use bingx_auth::{Credentials, RequestSigner};
//! use bingx_types::Params;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Load credentials from environment
//!     let creds = Credentials::from_env()?;
//!
//!     let signer = RequestSigner::new(&creds);
//!     let signed = signer.sign(Params::new().with("symbol", "BTC-USDT"))?;
//!     println!("GET /openApi/spot/v1/trade/openOrders?{}", signed.query);
//!
//!     Ok(())
//! }
//! ```

mod credentials;
mod error;
mod signer;

pub use credentials::{Credentials, API_KEY_ENV, SECRET_KEY_ENV};
pub use error::{AuthError, AuthResult};
pub use signer::{timestamp_ms, RequestSigner, SignedQuery, API_KEY_HEADER};
