//! Private spot trading endpoints
//!
//! Order placement, cancellation and order queries. All of these require
//! authentication.

use crate::error::{RestError, RestResult};
use crate::transport::Transport;
use crate::types::{SpotOrder, SpotOrderRequest, SpotOrderResponse};
use bingx_types::Params;
use serde::de::IgnoredAny;
use tracing::{debug, info, instrument};

const ORDER_PATH: &str = "/openApi/spot/v1/trade/order";
const BATCH_ORDERS_PATH: &str = "/openApi/spot/v1/trade/batchOrders";
const OPEN_ORDERS_PATH: &str = "/openApi/spot/v1/trade/openOrders";
const CANCEL_PATH: &str = "/openApi/spot/v1/trade/cancel";
const CANCEL_OPEN_ORDERS_PATH: &str = "/openApi/spot/v1/trade/cancelOpenOrders";
const QUERY_PATH: &str = "/openApi/spot/v1/trade/query";
const HISTORY_ORDERS_PATH: &str = "/openApi/spot/v1/trade/historyOrders";

/// Private spot trading endpoints
pub struct SpotTradingEndpoints<'a> {
    transport: &'a Transport,
}

impl<'a> SpotTradingEndpoints<'a> {
    pub fn new(transport: &'a Transport) -> Self {
        Self { transport }
    }

    /// Place a new order
    ///
    /// The request is validated locally before anything is sent.
    #[instrument(skip(self, order), fields(symbol = %order.symbol, side = %order.side))]
    pub async fn create_order(&self, order: &SpotOrderRequest) -> RestResult<SpotOrderResponse> {
        order.validate()?;
        debug!("Placing {} order", order.order_type);

        let response: SpotOrderResponse = self
            .transport
            .post_signed(ORDER_PATH, order.to_params())
            .await?;

        info!(order_id = response.order_id, status = ?response.status, "Order placed");
        Ok(response)
    }

    /// Place several orders in one request
    ///
    /// # Arguments
    /// * `orders` - Orders to place; sent as a JSON array in `data`
    /// * `sync` - Ask the exchange to process the batch synchronously
    #[instrument(skip(self, orders), fields(count = orders.len()))]
    pub async fn create_batch_orders(
        &self,
        orders: &[SpotOrderRequest],
        sync: bool,
    ) -> RestResult<Vec<SpotOrderResponse>> {
        if orders.is_empty() {
            return Err(RestError::InvalidParameter(
                "batch must contain at least one order".to_string(),
            ));
        }
        for order in orders {
            order.validate()?;
        }

        let data = serde_json::to_string(orders)
            .map_err(|e| RestError::InvalidParameter(format!("orders: {}", e)))?;
        debug!("Placing batch of {} orders", orders.len());

        let params = Params::new().with("data", data).with("sync", sync);
        let response: Option<OrdersData<SpotOrderResponse>> = self
            .transport
            .post_signed(BATCH_ORDERS_PATH, params)
            .await?;

        Ok(response.map(|r| r.orders).unwrap_or_default())
    }

    /// Get open orders for a symbol
    #[instrument(skip(self))]
    pub async fn get_open_orders(&self, symbol: &str) -> RestResult<Vec<SpotOrder>> {
        debug!("Fetching open orders");

        let params = Params::new().with("symbol", symbol);
        let response: Option<OrdersData<SpotOrder>> = self
            .transport
            .get_signed(OPEN_ORDERS_PATH, params)
            .await?;

        Ok(response.map(|r| r.orders).unwrap_or_default())
    }

    /// Cancel an order by exchange order id
    #[instrument(skip(self))]
    pub async fn cancel_order(&self, symbol: &str, order_id: i64) -> RestResult<()> {
        debug!("Cancelling order");

        let params = Params::new()
            .with("symbol", symbol)
            .with("orderId", order_id);
        self.cancel(CANCEL_PATH, params).await
    }

    /// Cancel an order by the caller-assigned id
    #[instrument(skip(self))]
    pub async fn cancel_order_by_client_order_id(
        &self,
        symbol: &str,
        client_order_id: &str,
    ) -> RestResult<()> {
        debug!("Cancelling order by client id");

        let params = Params::new()
            .with("symbol", symbol)
            .with("clientOrderID", client_order_id);
        self.cancel(CANCEL_PATH, params).await
    }

    /// Cancel every open order on a symbol
    #[instrument(skip(self))]
    pub async fn cancel_all_open_orders(&self, symbol: &str) -> RestResult<()> {
        debug!("Cancelling all open orders");

        let params = Params::new().with("symbol", symbol);
        self.cancel(CANCEL_OPEN_ORDERS_PATH, params).await
    }

    async fn cancel(&self, path: &str, params: Params) -> RestResult<()> {
        let _: IgnoredAny = self.transport.post_signed(path, params).await?;
        Ok(())
    }

    /// Get an order by exchange order id
    #[instrument(skip(self))]
    pub async fn get_order(&self, symbol: &str, order_id: i64) -> RestResult<SpotOrder> {
        let params = Params::new()
            .with("symbol", symbol)
            .with("orderId", order_id);
        self.transport.get_signed(QUERY_PATH, params).await
    }

    /// Get an order by the caller-assigned id
    #[instrument(skip(self))]
    pub async fn get_order_by_client_order_id(
        &self,
        symbol: &str,
        client_order_id: &str,
    ) -> RestResult<SpotOrder> {
        let params = Params::new()
            .with("symbol", symbol)
            .with("clientOrderID", client_order_id);
        self.transport.get_signed(QUERY_PATH, params).await
    }

    /// Get historical orders
    #[instrument(skip(self))]
    pub async fn history_orders(&self, query: &HistoryQuery) -> RestResult<Vec<SpotOrder>> {
        debug!("Fetching order history");

        let response: Option<OrdersData<SpotOrder>> = self
            .transport
            .get_signed(HISTORY_ORDERS_PATH, query.to_params())
            .await?;

        Ok(response.map(|r| r.orders).unwrap_or_default())
    }

    /// Find one order in the trade history
    ///
    /// # Errors
    /// [`RestError::NotFound`] if the history does not contain `order_id`.
    #[instrument(skip(self))]
    pub async fn get_history_order(&self, symbol: &str, order_id: i64) -> RestResult<SpotOrder> {
        let query = HistoryQuery::new(symbol).with_order_id(order_id);

        self.history_orders(&query)
            .await?
            .into_iter()
            .find(|order| order.order_id == order_id)
            .ok_or_else(|| RestError::NotFound(format!("order {} in {} history", order_id, symbol)))
    }
}

/// Filter for [`SpotTradingEndpoints::history_orders`]
///
/// Times are Unix milliseconds. Unset fields are not sent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HistoryQuery {
    /// Symbol (required)
    pub symbol: String,
    /// Earliest order time
    pub start_time: Option<i64>,
    /// Latest order time
    pub end_time: Option<i64>,
    /// Exchange order id
    pub order_id: Option<i64>,
}

impl HistoryQuery {
    /// Query the whole history of a symbol
    pub fn new(symbol: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
            ..Default::default()
        }
    }

    /// Restrict to orders placed at or after `start_time`
    pub fn with_start_time(mut self, start_time: i64) -> Self {
        self.start_time = Some(start_time);
        self
    }

    /// Restrict to orders placed at or before `end_time`
    pub fn with_end_time(mut self, end_time: i64) -> Self {
        self.end_time = Some(end_time);
        self
    }

    /// Restrict to one order id
    pub fn with_order_id(mut self, order_id: i64) -> Self {
        self.order_id = Some(order_id);
        self
    }

    fn to_params(&self) -> Params {
        Params::new()
            .with("symbol", &self.symbol)
            .with_opt("startTime", self.start_time)
            .with_opt("endTime", self.end_time)
            .with_opt("orderId", self.order_id)
    }
}

// Trading-specific response wrappers

use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct OrdersData<T> {
    #[serde(default = "Vec::new")]
    orders: Vec<T>,
}
