//! Private perpetual swap (USDT-M futures) endpoints
//!
//! These endpoints require authentication.

use crate::error::{RestError, RestResult};
use crate::transport::Transport;
use bingx_types::{OrderStatus, OrderType, Params, PositionSide, Side};
use rust_decimal::Decimal;
use tracing::{debug, info, instrument};

const ORDER_PATH: &str = "/openApi/swap/v2/trade/order";
const OPEN_ORDERS_PATH: &str = "/openApi/swap/v2/trade/openOrders";
const BALANCE_PATH: &str = "/openApi/swap/v2/user/balance";
const POSITIONS_PATH: &str = "/openApi/swap/v2/user/positions";

/// Private perpetual swap endpoints
pub struct SwapEndpoints<'a> {
    transport: &'a Transport,
}

impl<'a> SwapEndpoints<'a> {
    pub fn new(transport: &'a Transport) -> Self {
        Self { transport }
    }

    /// Place a new swap order
    #[instrument(skip(self, order), fields(symbol = %order.symbol, side = %order.side))]
    pub async fn create_order(&self, order: &SwapOrderRequest) -> RestResult<SwapOrder> {
        order.validate()?;
        debug!("Placing {} swap order", order.order_type);

        let data: OrderWrapper = self
            .transport
            .post_signed(ORDER_PATH, order.to_params())
            .await?;

        info!(order_id = data.order.order_id, "Swap order placed");
        Ok(data.order)
    }

    /// Cancel a swap order by exchange order id
    #[instrument(skip(self))]
    pub async fn cancel_order(&self, symbol: &str, order_id: i64) -> RestResult<SwapOrder> {
        debug!("Cancelling swap order");

        let params = Params::new()
            .with("symbol", symbol)
            .with("orderId", order_id);
        let data: OrderWrapper = self.transport.delete_signed(ORDER_PATH, params).await?;

        Ok(data.order)
    }

    /// Get open swap orders, for one symbol or all
    #[instrument(skip(self))]
    pub async fn get_open_orders(&self, symbol: Option<&str>) -> RestResult<Vec<SwapOrder>> {
        debug!("Fetching open swap orders");

        let params = Params::new().with_opt("symbol", symbol);
        let data: Option<OrdersWrapper> = self
            .transport
            .get_signed(OPEN_ORDERS_PATH, params)
            .await?;

        Ok(data.map(|d| d.orders).unwrap_or_default())
    }

    /// Get the perpetual account balance
    #[instrument(skip(self))]
    pub async fn get_balance(&self) -> RestResult<SwapBalance> {
        debug!("Fetching swap balance");

        let data: BalanceWrapper = self
            .transport
            .get_signed(BALANCE_PATH, Params::new())
            .await?;

        Ok(data.balance)
    }

    /// Get open positions, for one symbol or all
    #[instrument(skip(self))]
    pub async fn get_positions(&self, symbol: Option<&str>) -> RestResult<Vec<SwapPosition>> {
        debug!("Fetching swap positions");

        let params = Params::new().with_opt("symbol", symbol);
        let data: Option<Vec<SwapPosition>> = self
            .transport
            .get_signed(POSITIONS_PATH, params)
            .await?;

        Ok(data.unwrap_or_default())
    }
}

// ============================================================================
// Swap types
// ============================================================================

use serde::Deserialize;

/// Swap order request
#[derive(Debug, Clone, PartialEq)]
pub struct SwapOrderRequest {
    /// Symbol (e.g. "BTC-USDT")
    pub symbol: String,
    /// Order side
    pub side: Side,
    /// Position side (`BOTH` in one-way mode)
    pub position_side: PositionSide,
    /// Order type
    pub order_type: OrderType,
    /// Contract quantity
    pub quantity: Decimal,
    /// Limit price
    pub price: Option<Decimal>,
    /// Trigger price
    pub stop_price: Option<Decimal>,
    /// Caller-assigned order id
    pub client_order_id: Option<String>,
}

impl SwapOrderRequest {
    /// Create a market order
    pub fn market(
        symbol: impl Into<String>,
        side: Side,
        position_side: PositionSide,
        quantity: Decimal,
    ) -> Self {
        Self {
            symbol: symbol.into(),
            side,
            position_side,
            order_type: OrderType::Market,
            quantity,
            price: None,
            stop_price: None,
            client_order_id: None,
        }
    }

    /// Create a limit order
    pub fn limit(
        symbol: impl Into<String>,
        side: Side,
        position_side: PositionSide,
        quantity: Decimal,
        price: Decimal,
    ) -> Self {
        Self {
            order_type: OrderType::Limit,
            price: Some(price),
            ..Self::market(symbol, side, position_side, quantity)
        }
    }

    /// Change the order type (stop and take-profit variants)
    pub fn with_order_type(mut self, order_type: OrderType) -> Self {
        self.order_type = order_type;
        self
    }

    /// Set the trigger price
    pub fn with_stop_price(mut self, stop_price: Decimal) -> Self {
        self.stop_price = Some(stop_price);
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
        if self.quantity <= Decimal::ZERO {
            return Err(RestError::InvalidParameter(
                "quantity must be positive".to_string(),
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

    fn to_params(&self) -> Params {
        Params::new()
            .with("symbol", &self.symbol)
            .with("side", self.side.as_str())
            .with("positionSide", self.position_side.as_str())
            .with("type", self.order_type.as_str())
            .with("quantity", self.quantity)
            .with_opt("price", self.price)
            .with_opt("stopPrice", self.stop_price)
            .with_opt("clientOrderID", self.client_order_id.as_deref())
    }
}

/// Swap order details
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SwapOrder {
    /// Symbol
    pub symbol: String,
    /// Exchange order id
    pub order_id: i64,
    /// Order side
    pub side: Side,
    /// Position side
    #[serde(default)]
    pub position_side: PositionSide,
    /// Order type
    #[serde(rename = "type")]
    pub order_type: OrderType,
    /// Limit price
    #[serde(default)]
    pub price: Option<Decimal>,
    /// Trigger price
    #[serde(default)]
    pub stop_price: Option<Decimal>,
    /// Ordered quantity
    #[serde(default, alias = "quantity")]
    pub orig_qty: Option<Decimal>,
    /// Filled quantity
    #[serde(default)]
    pub executed_qty: Option<Decimal>,
    /// Average fill price
    #[serde(default)]
    pub avg_price: Option<Decimal>,
    /// Order status (absent on placement acknowledgements)
    #[serde(default)]
    pub status: Option<OrderStatus>,
    /// Creation time in milliseconds
    #[serde(default)]
    pub time: i64,
    /// Last update time in milliseconds
    #[serde(default)]
    pub update_time: i64,
    /// Caller-assigned order id
    #[serde(default, alias = "clientOrderID")]
    pub client_order_id: Option<String>,
}

/// Perpetual account balance
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SwapBalance {
    /// Margin asset (e.g. "USDT")
    pub asset: String,
    /// Wallet balance
    pub balance: Decimal,
    /// Balance plus unrealized PnL
    #[serde(default)]
    pub equity: Option<Decimal>,
    /// Unrealized PnL
    #[serde(default)]
    pub unrealized_profit: Option<Decimal>,
    /// Realized PnL
    #[serde(default)]
    pub realised_profit: Option<Decimal>,
    /// Margin available for new positions
    #[serde(default)]
    pub available_margin: Option<Decimal>,
    /// Margin in use
    #[serde(default)]
    pub used_margin: Option<Decimal>,
    /// Margin frozen by open orders
    #[serde(default)]
    pub freezed_margin: Option<Decimal>,
}

/// Open perpetual position
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SwapPosition {
    /// Symbol
    pub symbol: String,
    /// Position id
    #[serde(default)]
    pub position_id: Option<String>,
    /// Position side
    pub position_side: PositionSide,
    /// Isolated (true) or cross margin
    #[serde(default)]
    pub isolated: bool,
    /// Position size
    pub position_amt: Decimal,
    /// Size that can be closed
    #[serde(default)]
    pub available_amt: Option<Decimal>,
    /// Average entry price
    pub avg_price: Decimal,
    /// Unrealized PnL
    #[serde(default)]
    pub unrealized_profit: Option<Decimal>,
    /// Realized PnL
    #[serde(default)]
    pub realised_profit: Option<Decimal>,
    /// Initial margin
    #[serde(default)]
    pub initial_margin: Option<Decimal>,
    /// Leverage
    #[serde(default)]
    pub leverage: Option<u32>,
    /// Liquidation price
    #[serde(default)]
    pub liquidation_price: Option<Decimal>,
}

impl SwapPosition {
    /// True for a short position
    pub fn is_short(&self) -> bool {
        self.position_side == PositionSide::Short || self.position_amt < Decimal::ZERO
    }
}

#[derive(Debug, Deserialize)]
struct OrderWrapper {
    order: SwapOrder,
}

#[derive(Debug, Deserialize)]
struct OrdersWrapper {
    #[serde(default)]
    orders: Vec<SwapOrder>,
}

#[derive(Debug, Deserialize)]
struct BalanceWrapper {
    balance: SwapBalance,
}
