//! Shared types for the BingX REST API
//!
//! This crate provides the vocabulary shared by the BingX client crates.
//! It has minimal dependencies and can be used independently.
//!
//! # Key Types
//!
//! - [`Params`], [`ParamValue`] - Deterministic request parameter bag
//! - [`Side`], [`PositionSide`], [`OrderType`], [`TimeInForce`] - Order enums
//! - [`OrderStatus`] - Order lifecycle status
//! - [`Interval`] - Kline intervals
//! - [`BingxErrorCode`], [`ErrorCategory`] - Exchange error code catalogue

pub mod enums;
pub mod error_codes;
pub mod params;

pub use enums::*;
pub use error_codes::*;
pub use params::*;

// Re-export rust_decimal for users
pub use rust_decimal::Decimal;
