//! API endpoint implementations

pub mod market;
pub mod account;
pub mod trading;
pub mod swap;

pub use market::SpotMarketEndpoints;
pub use account::SpotAccountEndpoints;
pub use trading::{HistoryQuery, SpotTradingEndpoints};
pub use swap::{SwapBalance, SwapEndpoints, SwapOrder, SwapOrderRequest, SwapPosition};
