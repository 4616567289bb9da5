//! Side, PositionSide, OrderType, OrderStatus, TimeInForce and Interval enums

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Order side
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Side {
    /// Buy order
    Buy,
    /// Sell order
    Sell,
}

impl Side {
    /// Returns the side as used in API parameters
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Buy => "BUY",
            Self::Sell => "SELL",
        }
    }

    /// Returns the opposite side
    pub fn opposite(&self) -> Self {
        match self {
            Self::Buy => Self::Sell,
            Self::Sell => Self::Buy,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Swap position side
///
/// `Both` is used in one-way position mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "UPPERCASE")]
pub enum PositionSide {
    /// Long leg (hedge mode)
    Long,
    /// Short leg (hedge mode)
    Short,
    /// One-way mode
    #[default]
    Both,
}

impl PositionSide {
    /// Returns the position side as used in API parameters
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Long => "LONG",
            Self::Short => "SHORT",
            Self::Both => "BOTH",
        }
    }
}

impl fmt::Display for PositionSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Order types accepted by spot and swap endpoints
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderType {
    /// Executes immediately at the best available price
    Market,
    /// Executes at the given price or better
    Limit,
    /// Spot take-profit/stop-loss limit order
    TakeStopLimit,
    /// Spot take-profit/stop-loss market order
    TakeStopMarket,
    /// Trigger limit order
    TriggerLimit,
    /// Trigger market order
    TriggerMarket,
    /// Swap stop-loss market order
    StopMarket,
    /// Swap take-profit market order
    TakeProfitMarket,
    /// Swap stop-loss limit order
    Stop,
    /// Swap take-profit limit order
    TakeProfit,
    /// Swap trailing stop
    TrailingStopMarket,
    /// Any type this client does not know yet
    #[serde(other)]
    Unknown,
}

impl OrderType {
    /// Returns the order type as used in API parameters
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Market => "MARKET",
            Self::Limit => "LIMIT",
            Self::TakeStopLimit => "TAKE_STOP_LIMIT",
            Self::TakeStopMarket => "TAKE_STOP_MARKET",
            Self::TriggerLimit => "TRIGGER_LIMIT",
            Self::TriggerMarket => "TRIGGER_MARKET",
            Self::StopMarket => "STOP_MARKET",
            Self::TakeProfitMarket => "TAKE_PROFIT_MARKET",
            Self::Stop => "STOP",
            Self::TakeProfit => "TAKE_PROFIT",
            Self::TrailingStopMarket => "TRAILING_STOP_MARKET",
            Self::Unknown => "UNKNOWN",
        }
    }

    /// True for order types that need a limit price
    pub fn requires_price(&self) -> bool {
        matches!(
            self,
            Self::Limit | Self::TakeStopLimit | Self::TriggerLimit | Self::Stop | Self::TakeProfit
        )
    }
}

impl fmt::Display for OrderType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Order status as reported by the exchange
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    /// Accepted, not yet filled
    New,
    /// Waiting to be placed (trigger orders)
    Pending,
    /// Partially executed
    PartiallyFilled,
    /// Fully executed
    Filled,
    /// Cancelled by user or system
    #[serde(alias = "CANCELLED")]
    Canceled,
    /// Rejected by the matching engine
    Failed,
    /// Status not known to this client
    #[serde(other)]
    Unknown,
}

impl OrderStatus {
    /// True once the order can no longer change
    pub fn is_final(&self) -> bool {
        matches!(self, Self::Filled | Self::Canceled | Self::Failed)
    }
}

/// Time in force
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TimeInForce {
    /// Good till cancelled
    #[serde(rename = "GTC")]
    GoodTillCancelled,
    /// Immediate or cancel
    #[serde(rename = "IOC")]
    ImmediateOrCancel,
    /// Fill or kill
    #[serde(rename = "FOK")]
    FillOrKill,
    /// Maker only
    #[serde(rename = "PostOnly")]
    PostOnly,
}

impl TimeInForce {
    /// Returns the time in force as used in API parameters
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::GoodTillCancelled => "GTC",
            Self::ImmediateOrCancel => "IOC",
            Self::FillOrKill => "FOK",
            Self::PostOnly => "PostOnly",
        }
    }
}

impl fmt::Display for TimeInForce {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Kline interval
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Interval {
    #[serde(rename = "1m")]
    M1,
    #[serde(rename = "3m")]
    M3,
    #[serde(rename = "5m")]
    M5,
    #[serde(rename = "15m")]
    M15,
    #[serde(rename = "30m")]
    M30,
    #[serde(rename = "1h")]
    H1,
    #[serde(rename = "2h")]
    H2,
    #[serde(rename = "4h")]
    H4,
    #[serde(rename = "6h")]
    H6,
    #[serde(rename = "8h")]
    H8,
    #[serde(rename = "12h")]
    H12,
    #[serde(rename = "1d")]
    D1,
    #[serde(rename = "3d")]
    D3,
    #[serde(rename = "1w")]
    W1,
    #[serde(rename = "1M")]
    Mo1,
}

impl Interval {
    /// Returns the interval as used in API parameters
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::M1 => "1m",
            Self::M3 => "3m",
            Self::M5 => "5m",
            Self::M15 => "15m",
            Self::M30 => "30m",
            Self::H1 => "1h",
            Self::H2 => "2h",
            Self::H4 => "4h",
            Self::H6 => "6h",
            Self::H8 => "8h",
            Self::H12 => "12h",
            Self::D1 => "1d",
            Self::D3 => "3d",
            Self::W1 => "1w",
            Self::Mo1 => "1M",
        }
    }

    /// Nominal length in milliseconds (a month counts as 30 days)
    pub fn as_millis(&self) -> i64 {
        const MINUTE: i64 = 60_000;
        match self {
            Self::M1 => MINUTE,
            Self::M3 => 3 * MINUTE,
            Self::M5 => 5 * MINUTE,
            Self::M15 => 15 * MINUTE,
            Self::M30 => 30 * MINUTE,
            Self::H1 => 60 * MINUTE,
            Self::H2 => 2 * 60 * MINUTE,
            Self::H4 => 4 * 60 * MINUTE,
            Self::H6 => 6 * 60 * MINUTE,
            Self::H8 => 8 * 60 * MINUTE,
            Self::H12 => 12 * 60 * MINUTE,
            Self::D1 => 24 * 60 * MINUTE,
            Self::D3 => 3 * 24 * 60 * MINUTE,
            Self::W1 => 7 * 24 * 60 * MINUTE,
            Self::Mo1 => 30 * 24 * 60 * MINUTE,
        }
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Interval {
    type Err = IntervalParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "1m" => Self::M1,
            "3m" => Self::M3,
            "5m" => Self::M5,
            "15m" => Self::M15,
            "30m" => Self::M30,
            "1h" => Self::H1,
            "2h" => Self::H2,
            "4h" => Self::H4,
            "6h" => Self::H6,
            "8h" => Self::H8,
            "12h" => Self::H12,
            "1d" => Self::D1,
            "3d" => Self::D3,
            "1w" => Self::W1,
            "1M" => Self::Mo1,
            _ => return Err(IntervalParseError(s.to_string())),
        })
    }
}

/// Error parsing a kline interval
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown kline interval: {0}")]
pub struct IntervalParseError(pub String);
