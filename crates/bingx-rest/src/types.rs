//! Types for BingX REST API requests and responses

use crate::error::{RestError, RestResult};
use bingx_types::{Interval, OrderStatus, OrderType, Params, Side, TimeInForce};
use rust_decimal::Decimal;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::value::RawValue;
use std::collections::HashMap;
use std::str::FromStr;

// ============================================================================
// API Response Wrapper
// ============================================================================

/// Envelope code signalling success
pub const SUCCESS_CODE: i64 = 0;

/// Standard BingX API response wrapper
///
/// Every BingX endpoint answers `{"code": .., "msg": .., "data": ..}`. The
/// payload is only decoded when `code` is [`SUCCESS_CODE`], so a rejected
/// call always surfaces as [`RestError::Exchange`] no matter what shape the
/// exchange put in `data`.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse<T> {
    /// Status code (0 on success)
    pub code: i64,
    /// Message (reason on failure, usually empty on success)
    pub msg: String,
    /// Payload (present iff `code` is 0)
    pub data: Option<T>,
}

#[derive(Deserialize)]
struct RawEnvelope {
    code: i64,
    #[serde(default)]
    msg: Option<String>,
    #[serde(default)]
    data: Option<Box<RawValue>>,
}

impl<T: DeserializeOwned> ApiResponse<T> {
    /// Decode a response body
    ///
    /// # Errors
    /// [`RestError::Decode`] if the body is not an envelope, or if a success
    /// envelope's payload does not match `T`.
    pub fn from_slice(body: &[u8]) -> RestResult<Self> {
        let raw: RawEnvelope = serde_json::from_slice(body)
            .map_err(|e| RestError::Decode(format!("envelope: {}", e)))?;
        let msg = raw.msg.unwrap_or_default();

        if raw.code != SUCCESS_CODE {
            return Ok(Self {
                code: raw.code,
                msg,
                data: None,
            });
        }

        // Absent data decodes as null so unit-like payloads still succeed
        let payload = raw.data.as_deref().map(RawValue::get).unwrap_or("null");
        let data = serde_json::from_str(payload)
            .map_err(|e| RestError::Decode(format!("data: {}", e)))?;

        Ok(Self {
            code: raw.code,
            msg,
            data: Some(data),
        })
    }
}

impl<T> ApiResponse<T> {
    /// Check if the response indicates success
    pub fn is_success(&self) -> bool {
        self.code == SUCCESS_CODE
    }

    /// The exchange error carried by this envelope, if any
    pub fn error(&self) -> Option<RestError> {
        if self.is_success() {
            None
        } else {
            Some(RestError::exchange(self.code, self.msg.clone()))
        }
    }

    /// Get the payload, returning an error if the exchange rejected the call
    pub fn into_result(self) -> RestResult<T> {
        if let Some(err) = self.error() {
            return Err(err);
        }
        self.data
            .ok_or_else(|| RestError::Decode("No data in response".to_string()))
    }
}

// ============================================================================
// Market Data Types
// ============================================================================

/// Server time
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServerTime {
    /// Unix time in milliseconds
    pub server_time: i64,
}

/// Spot symbol metadata
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SymbolInfo {
    /// Symbol (e.g. "BTC-USDT")
    pub symbol: String,
    /// Minimum order quantity
    #[serde(default)]
    pub min_qty: Option<Decimal>,
    /// Maximum order quantity
    #[serde(default)]
    pub max_qty: Option<Decimal>,
    /// Minimum order value
    #[serde(default)]
    pub min_notional: Option<Decimal>,
    /// Maximum order value
    #[serde(default)]
    pub max_notional: Option<Decimal>,
    /// Price increment
    #[serde(default)]
    pub tick_size: Option<Decimal>,
    /// Quantity increment
    #[serde(default)]
    pub step_size: Option<Decimal>,
    /// Listing status (1 = online)
    #[serde(default)]
    pub status: i32,
    /// Buying allowed through the API
    #[serde(default)]
    pub api_state_buy: bool,
    /// Selling allowed through the API
    #[serde(default)]
    pub api_state_sell: bool,
    /// Listing time in milliseconds
    #[serde(default)]
    pub time_online: i64,
}

impl SymbolInfo {
    /// True if the symbol is online for trading
    pub fn is_trading(&self) -> bool {
        self.status == 1
    }
}

/// One price level `[price, quantity]`
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct PriceLevel(pub Decimal, pub Decimal);

impl PriceLevel {
    /// Level price
    pub fn price(&self) -> Decimal {
        self.0
    }

    /// Quantity resting at this price
    pub fn quantity(&self) -> Decimal {
        self.1
    }
}

/// Orderbook snapshot
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct OrderBook {
    /// Bid levels, best first
    pub bids: Vec<PriceLevel>,
    /// Ask levels
    pub asks: Vec<PriceLevel>,
    /// Snapshot time in milliseconds
    #[serde(default)]
    pub ts: i64,
}

impl OrderBook {
    /// Get the best bid price
    pub fn best_bid(&self) -> Option<Decimal> {
        self.bids.iter().map(PriceLevel::price).max()
    }

    /// Get the best ask price
    pub fn best_ask(&self) -> Option<Decimal> {
        self.asks.iter().map(PriceLevel::price).min()
    }

    /// Get the spread
    pub fn spread(&self) -> Option<Decimal> {
        Some(self.best_ask()? - self.best_bid()?)
    }

    /// Get the mid price (average of best bid and ask)
    pub fn mid_price(&self) -> Option<Decimal> {
        Some((self.best_ask()? + self.best_bid()?) / Decimal::TWO)
    }
}

/// 24h ticker
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TickerData {
    /// Symbol
    pub symbol: String,
    /// Last traded price
    pub last_price: Decimal,
    /// Price 24h ago
    #[serde(default)]
    pub open_price: Option<Decimal>,
    /// 24h high
    #[serde(default)]
    pub high_price: Option<Decimal>,
    /// 24h low
    #[serde(default)]
    pub low_price: Option<Decimal>,
    /// 24h base volume
    #[serde(default)]
    pub volume: Option<Decimal>,
    /// 24h quote volume
    #[serde(default)]
    pub quote_volume: Option<Decimal>,
    /// Best bid price
    #[serde(default)]
    pub bid_price: Option<Decimal>,
    /// Best bid quantity
    #[serde(default)]
    pub bid_qty: Option<Decimal>,
    /// Best ask price
    #[serde(default)]
    pub ask_price: Option<Decimal>,
    /// Best ask quantity
    #[serde(default)]
    pub ask_qty: Option<Decimal>,
    /// 24h change, formatted by the exchange (e.g. "1.25%")
    #[serde(default)]
    pub price_change_percent: Option<String>,
    /// Window start in milliseconds
    #[serde(default)]
    pub open_time: i64,
    /// Window end in milliseconds
    #[serde(default)]
    pub close_time: i64,
}

/// Last price per symbol
pub type Tickers = HashMap<String, Decimal>;

/// Fold a ticker list into a symbol → last price map
pub fn tickers_from(data: Vec<TickerData>) -> Tickers {
    data.into_iter()
        .map(|ticker| (ticker.symbol, ticker.last_price))
        .collect()
}

/// Raw kline as sent by the exchange:
/// `[openTime, open, high, low, close, volume, closeTime, quoteVolume]`
pub type RawKline = Vec<serde_json::Value>;

/// Individual kline (candle)
#[derive(Debug, Clone, PartialEq)]
pub struct Kline {
    /// Candle interval
    pub interval: Interval,
    /// Open time in milliseconds
    pub open_time: i64,
    /// Open price
    pub open: Decimal,
    /// High price
    pub high: Decimal,
    /// Low price
    pub low: Decimal,
    /// Close price
    pub close: Decimal,
    /// Base volume
    pub volume: Decimal,
    /// Close time in milliseconds
    pub close_time: i64,
    /// Quote volume (not sent by every endpoint)
    pub quote_volume: Option<Decimal>,
}

impl Kline {
    /// Normalize a raw kline array
    ///
    /// # Errors
    /// [`RestError::Decode`] if the array is shorter than seven items or an
    /// item is not numeric.
    pub fn from_raw(raw: &[serde_json::Value], interval: Interval) -> RestResult<Self> {
        if raw.len() < 7 {
            return Err(RestError::Decode(format!(
                "kline has {} fields, expected at least 7",
                raw.len()
            )));
        }

        Ok(Self {
            interval,
            open_time: value_to_i64(&raw[0], "openTime")?,
            open: value_to_decimal(&raw[1], "open")?,
            high: value_to_decimal(&raw[2], "high")?,
            low: value_to_decimal(&raw[3], "low")?,
            close: value_to_decimal(&raw[4], "close")?,
            volume: value_to_decimal(&raw[5], "volume")?,
            close_time: value_to_i64(&raw[6], "closeTime")?,
            quote_volume: raw
                .get(7)
                .map(|v| value_to_decimal(v, "quoteVolume"))
                .transpose()?,
        })
    }

    /// True if the close is above the open
    pub fn is_bullish(&self) -> bool {
        self.close > self.open
    }
}

fn value_to_decimal(value: &serde_json::Value, field: &str) -> RestResult<Decimal> {
    let text = match value {
        serde_json::Value::Number(n) => n.to_string(),
        serde_json::Value::String(s) => s.clone(),
        other => {
            return Err(RestError::Decode(format!(
                "kline {}: expected number, got {}",
                field, other
            )))
        }
    };

    Decimal::from_str(&text)
        .or_else(|_| Decimal::from_scientific(&text))
        .map_err(|e| RestError::Decode(format!("kline {}: {}", field, e)))
}

fn value_to_i64(value: &serde_json::Value, field: &str) -> RestResult<i64> {
    match value {
        serde_json::Value::Number(n) => n.as_i64().ok_or_else(|| {
            RestError::Decode(format!("kline {}: {} is not an integer", field, n))
        }),
        serde_json::Value::String(s) => s
            .parse()
            .map_err(|e| RestError::Decode(format!("kline {}: {}", field, e))),
        other => Err(RestError::Decode(format!(
            "kline {}: expected integer, got {}",
            field, other
        ))),
    }
}

// ============================================================================
// Account Types
// ============================================================================

/// Spot asset balance
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SpotBalance {
    /// Asset (e.g. "BTC")
    pub asset: String,
    /// Available amount
    pub free: Decimal,
    /// Amount held by open orders
    pub locked: Decimal,
}

impl SpotBalance {
    /// Free plus locked
    pub fn total(&self) -> Decimal {
        self.free + self.locked
    }
}

// ============================================================================
// Trading Types
// ============================================================================

/// Request to place a spot order
///
/// Serializes to the item format of the batch order endpoint.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SpotOrderRequest {
    /// Symbol (e.g. "BTC-USDT")
    pub symbol: String,
    /// Order side
    pub side: Side,
    /// Order type
    #[serde(rename = "type")]
    pub order_type: OrderType,
    /// Base quantity
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quantity: Option<Decimal>,
    /// Quote quantity (market orders)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quote_order_qty: Option<Decimal>,
    /// Limit price
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<Decimal>,
    /// Trigger price
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stop_price: Option<Decimal>,
    /// Time in force
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_in_force: Option<TimeInForce>,
    /// Caller-assigned order id
    #[serde(rename = "newClientOrderId", skip_serializing_if = "Option::is_none")]
    pub client_order_id: Option<String>,
}

impl SpotOrderRequest {
    fn base(symbol: impl Into<String>, side: Side, order_type: OrderType) -> Self {
        Self {
            symbol: symbol.into(),
            side,
            order_type,
            quantity: None,
            quote_order_qty: None,
            price: None,
            stop_price: None,
            time_in_force: None,
            client_order_id: None,
        }
    }

    /// Create a market order for a base quantity
    pub fn market(symbol: impl Into<String>, side: Side, quantity: Decimal) -> Self {
        Self {
            quantity: Some(quantity),
            ..Self::base(symbol, side, OrderType::Market)
        }
    }

    /// Create a market order for a quote amount
    pub fn market_quote(symbol: impl Into<String>, side: Side, quote_amount: Decimal) -> Self {
        Self {
            quote_order_qty: Some(quote_amount),
            ..Self::base(symbol, side, OrderType::Market)
        }
    }

    /// Create a limit order
    pub fn limit(symbol: impl Into<String>, side: Side, quantity: Decimal, price: Decimal) -> Self {
        Self {
            quantity: Some(quantity),
            price: Some(price),
            ..Self::base(symbol, side, OrderType::Limit)
        }
    }

    /// Set the trigger price
    pub fn with_stop_price(mut self, stop_price: Decimal) -> Self {
        self.stop_price = Some(stop_price);
        self
    }

    /// Set time in force
    pub fn with_time_in_force(mut self, tif: TimeInForce) -> Self {
        self.time_in_force = Some(tif);
        self
    }

    /// Set the caller-assigned order id
    pub fn with_client_order_id(mut self, id: impl Into<String>) -> Self {
        self.client_order_id = Some(id.into());
        self
    }

    /// Check the request is complete before sending it
    pub fn validate(&self) -> RestResult<()> {
        if self.symbol.is_empty() {
            return Err(RestError::InvalidParameter("symbol is empty".to_string()));
        }
        if self.order_type == OrderType::Unknown {
            return Err(RestError::InvalidParameter(
                "order type must be set".to_string(),
            ));
        }
        if self.quantity.is_none() && self.quote_order_qty.is_none() {
            return Err(RestError::InvalidParameter(
                "either quantity or quote_order_qty is required".to_string(),
            ));
        }
        if self.order_type.requires_price() && self.price.is_none() {
            return Err(RestError::InvalidParameter(format!(
                "{} order requires a price",
                self.order_type
            )));
        }
        Ok(())
    }

    /// Request parameters
    pub fn to_params(&self) -> Params {
        Params::new()
            .with("symbol", &self.symbol)
            .with("side", self.side.as_str())
            .with("type", self.order_type.as_str())
            .with_opt("quantity", self.quantity)
            .with_opt("quoteOrderQty", self.quote_order_qty)
            .with_opt("price", self.price)
            .with_opt("stopPrice", self.stop_price)
            .with_opt("timeInForce", self.time_in_force.map(|t| t.as_str()))
            .with_opt("newClientOrderId", self.client_order_id.as_deref())
    }
}

/// Response from placing a spot order
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpotOrderResponse {
    /// Symbol
    pub symbol: String,
    /// Exchange order id
    pub order_id: i64,
    /// Acceptance time in milliseconds
    #[serde(default)]
    pub transact_time: i64,
    /// Limit price
    #[serde(default)]
    pub price: Option<Decimal>,
    /// Trigger price
    #[serde(default)]
    pub stop_price: Option<Decimal>,
    /// Ordered quantity
    #[serde(default)]
    pub orig_qty: Option<Decimal>,
    /// Filled quantity
    #[serde(default)]
    pub executed_qty: Option<Decimal>,
    /// Filled quote amount
    #[serde(default)]
    pub cummulative_quote_qty: Option<Decimal>,
    /// Order status
    pub status: OrderStatus,
    /// Order type
    #[serde(rename = "type")]
    pub order_type: OrderType,
    /// Order side
    pub side: Side,
    /// Caller-assigned order id
    #[serde(default, rename = "clientOrderID", alias = "clientOrderId")]
    pub client_order_id: Option<String>,
}

/// Spot order details (open, queried or historical)
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpotOrder {
    /// Symbol
    pub symbol: String,
    /// Exchange order id
    pub order_id: i64,
    /// Limit price
    pub price: Decimal,
    /// Trigger price
    #[serde(default, alias = "StopPrice")]
    pub stop_price: Option<Decimal>,
    /// Ordered quantity
    pub orig_qty: Decimal,
    /// Filled quantity
    pub executed_qty: Decimal,
    /// Filled quote amount
    #[serde(default)]
    pub cummulative_quote_qty: Option<Decimal>,
    /// Ordered quote amount
    #[serde(default)]
    pub orig_quote_order_qty: Option<Decimal>,
    /// Order status
    pub status: OrderStatus,
    /// Order type
    #[serde(rename = "type")]
    pub order_type: OrderType,
    /// Order side
    pub side: Side,
    /// Creation time in milliseconds
    #[serde(default)]
    pub time: i64,
    /// Last update time in milliseconds
    #[serde(default)]
    pub update_time: i64,
    /// Fee charged
    #[serde(default)]
    pub fee: Option<Decimal>,
    /// Fee asset
    #[serde(default)]
    pub fee_asset: Option<String>,
    /// Caller-assigned order id
    #[serde(default, rename = "clientOrderID", alias = "clientOrderId")]
    pub client_order_id: Option<String>,
}

impl SpotOrder {
    /// Quantity still open
    pub fn remaining_qty(&self) -> Decimal {
        self.orig_qty - self.executed_qty
    }
}
