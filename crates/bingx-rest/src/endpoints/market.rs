//! Public spot market data endpoints
//!
//! These endpoints don't require authentication.

use crate::error::{RestError, RestResult};
use crate::transport::{Access, HttpMethod, Transport};
use crate::types::{
    tickers_from, ApiResponse, Kline, OrderBook, RawKline, ServerTime, SymbolInfo, TickerData,
    Tickers,
};
use bingx_auth::timestamp_ms;
use bingx_types::{Interval, Params};
use tracing::{debug, instrument, warn};

const SYMBOLS_PATH: &str = "/openApi/spot/v1/common/symbols";
const DEPTH_PATH: &str = "/openApi/spot/v1/market/depth";
const KLINE_PATH: &str = "/openApi/spot/v2/market/kline";
const HISTORICAL_KLINE_PATH: &str = "/openApi/market/his/v1/kline";
const TICKER_PATH: &str = "/openApi/spot/v1/ticker/24hr";
const SERVER_TIME_PATH: &str = "/openApi/spot/v1/server/time";

/// Public spot market data endpoints
pub struct SpotMarketEndpoints<'a> {
    transport: &'a Transport,
}

impl<'a> SpotMarketEndpoints<'a> {
    pub fn new(transport: &'a Transport) -> Self {
        Self { transport }
    }

    /// Get server time in milliseconds
    #[instrument(skip(self))]
    pub async fn get_server_time(&self) -> RestResult<i64> {
        debug!("Fetching server time");

        let time: ServerTime = self
            .transport
            .get_public(SERVER_TIME_PATH, Params::new())
            .await?;
        Ok(time.server_time)
    }

    /// Get trading rules for all symbols, or for one
    ///
    /// # Arguments
    /// * `symbol` - Optional symbol filter (e.g., "BTC-USDT")
    #[instrument(skip(self))]
    pub async fn get_symbols(&self, symbol: Option<&str>) -> RestResult<Vec<SymbolInfo>> {
        debug!("Fetching symbols");

        let params = Params::new()
            .with("timestamp", timestamp_ms())
            .with_opt("symbol", symbol);

        let data: SymbolsData = self.transport.get_public(SYMBOLS_PATH, params).await?;
        Ok(data.symbols)
    }

    /// Get orderbook depth
    ///
    /// # Arguments
    /// * `symbol` - Symbol (e.g., "BTC-USDT")
    /// * `limit` - Levels per side; omitted when `None` or zero
    #[instrument(skip(self))]
    pub async fn get_order_book(&self, symbol: &str, limit: Option<u32>) -> RestResult<OrderBook> {
        debug!("Fetching orderbook for {}", symbol);

        let params = Params::new()
            .with("symbol", symbol)
            .with("timestamp", timestamp_ms())
            .with_opt("limit", limit.filter(|l| *l > 0));

        self.transport.get_public(DEPTH_PATH, params).await
    }

    /// Get recent candles
    ///
    /// # Arguments
    /// * `symbol` - Symbol (e.g., "BTC-USDT")
    /// * `interval` - Candle interval
    /// * `limit` - Number of candles
    #[instrument(skip(self))]
    pub async fn get_candles(
        &self,
        symbol: &str,
        interval: Interval,
        limit: u32,
    ) -> RestResult<Vec<Kline>> {
        debug!("Fetching {} candles for {}", interval, symbol);

        let params = kline_params(symbol, interval, limit);
        let raw: Vec<RawKline> = self.transport.get_public(KLINE_PATH, params).await?;

        normalize_klines(&raw, interval)
    }

    /// Get historical candles ending now
    ///
    /// The historical endpoint can answer `code == 0` with an explanation in
    /// `msg` instead of data; that case is returned as an exchange error with
    /// code 0.
    #[instrument(skip(self))]
    pub async fn get_historical_klines(
        &self,
        symbol: &str,
        interval: Interval,
        limit: u32,
    ) -> RestResult<Vec<Kline>> {
        debug!("Fetching historical {} klines for {}", interval, symbol);

        let params = kline_params(symbol, interval, limit).with("endTime", timestamp_ms());
        let response: ApiResponse<Vec<RawKline>> = self
            .transport
            .request(HttpMethod::Get, HISTORICAL_KLINE_PATH, params, Access::Public)
            .await?;

        if let Some(err) = response.error() {
            warn!(code = response.code, msg = %response.msg, "Historical klines rejected");
            return Err(err);
        }
        if !response.msg.is_empty() {
            warn!(msg = %response.msg, "Historical klines returned a message");
            return Err(RestError::exchange(response.code, response.msg));
        }

        let raw = response.into_result()?;
        normalize_klines(&raw, interval)
    }

    /// Get last prices keyed by symbol
    ///
    /// # Arguments
    /// * `symbol` - Optional symbol filter
    #[instrument(skip(self))]
    pub async fn get_tickers(&self, symbol: Option<&str>) -> RestResult<Tickers> {
        debug!("Fetching tickers");

        let params = Params::new()
            .with("timestamp", timestamp_ms())
            .with_opt("symbol", symbol);

        let data: Vec<TickerData> = self.transport.get_public(TICKER_PATH, params).await?;
        Ok(tickers_from(data))
    }

    /// Get full 24h ticker statistics
    #[instrument(skip(self))]
    pub async fn get_ticker_stats(&self, symbol: Option<&str>) -> RestResult<Vec<TickerData>> {
        debug!("Fetching ticker statistics");

        let params = Params::new()
            .with("timestamp", timestamp_ms())
            .with_opt("symbol", symbol);

        self.transport.get_public(TICKER_PATH, params).await
    }
}

fn kline_params(symbol: &str, interval: Interval, limit: u32) -> Params {
    Params::new()
        .with("symbol", symbol)
        .with("interval", interval.as_str())
        .with("limit", limit)
}

fn normalize_klines(raw: &[RawKline], interval: Interval) -> RestResult<Vec<Kline>> {
    raw.iter()
        .map(|kline| Kline::from_raw(kline, interval))
        .collect()
}

// Response wrappers

use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct SymbolsData {
    #[serde(default)]
    symbols: Vec<SymbolInfo>,
}
