//! REST API client for the BingX cryptocurrency exchange
//!
//! This crate provides an async client for the BingX spot and perpetual
//! swap REST APIs: market data, account balances and order management.
//!
//! # Features
//!
//! - **Spot market**: Symbols, orderbook, candles, historical klines, tickers
//! - **Spot account**: Balances
//! - **Spot trading**: Place (single and batch), cancel and query orders
//! - **Swap**: Orders, balance and positions
//!
//! # Authentication
//!
//! Private endpoints require API credentials. Requests are signed with
//! HMAC-SHA256 over the sorted parameters and carry the API key in the
//! `X-BX-APIKEY` header.
//!
//! # Example
//!
//! ```no_run
//! use bingx_rest::{BingxRestClient, ClientConfig, Credentials, SpotOrderRequest};
//! use bingx_rest::bingx_types::Side;
//! use rust_decimal_macros::dec;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Public endpoints (no auth required)
//!     let client = BingxRestClient::new()?;
//!     let book = client.get_order_book("BTC-USDT", Some(5)).await?;
//!     println!("BTC-USDT mid: {:?}", book.mid_price());
//!
//!     // Private endpoints (auth required)
//!     let creds = Credentials::from_env()?;
//!     let auth_client = BingxRestClient::with_config(
//!         ClientConfig::new().with_credentials(creds).testnet(),
//!     )?;
//!     let order = SpotOrderRequest::limit("BTC-USDT", Side::Buy, dec!(0.001), dec!(20000));
//!     let placed = auth_client.create_order(&order).await?;
//!     println!("Placed order {}", placed.order_id);
//!
//!     Ok(())
//! }
//! ```
//!
//! # Errors
//!
//! Every call returns [`RestResult`]. A response whose envelope code is not
//! zero becomes [`RestError::Exchange`]; use [`RestError::error_code`] to map
//! it onto the known BingX error catalogue.

pub mod client;
pub mod error;
pub mod endpoints;
pub mod transport;
pub mod types;

pub use bingx_auth;
pub use bingx_types;

// Re-export main types
pub use client::{BingxRestClient, ClientConfig, Network};
pub use bingx_auth::Credentials;
pub use error::{RestError, RestResult};
pub use transport::{Access, HttpMethod, Transport};

// Re-export endpoint-specific types
pub use endpoints::{
    HistoryQuery, SpotAccountEndpoints, SpotMarketEndpoints, SpotTradingEndpoints, SwapBalance,
    SwapEndpoints, SwapOrder, SwapOrderRequest, SwapPosition,
};
pub use types::{
    // Market data
    Kline, OrderBook, PriceLevel, SymbolInfo, TickerData, Tickers,
    // Account
    SpotBalance,
    // Trading
    SpotOrder, SpotOrderRequest, SpotOrderResponse,
    // Responses
    ApiResponse,
};
