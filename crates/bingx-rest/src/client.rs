//! Main REST client implementation

use crate::endpoints::{SpotAccountEndpoints, SpotMarketEndpoints, SpotTradingEndpoints, SwapEndpoints};
use crate::error::{RestError, RestResult};
use crate::transport::Transport;
use crate::types::{
    Kline, OrderBook, SpotBalance, SpotOrder, SpotOrderRequest, SpotOrderResponse, SymbolInfo,
    Tickers,
};
use bingx_auth::{AuthError, Credentials, API_KEY_ENV, SECRET_KEY_ENV};
use bingx_types::Interval;
use reqwest::Client;
use std::time::Duration;
use tracing::info;

/// Default request timeout
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Mainnet REST host
pub const MAINNET_URL: &str = "https://open-api.bingx.com";
/// Testnet (virtual USDT) REST host
pub const TESTNET_URL: &str = "https://open-api-vst.bingx.com";

/// Environment variable selecting the testnet
pub const TESTNET_ENV: &str = "BINGX_TESTNET";

/// Network to connect to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Network {
    /// Production
    #[default]
    Mainnet,
    /// Virtual-money test environment
    Testnet,
}

impl Network {
    /// REST base URL for this network
    pub fn base_url(&self) -> &'static str {
        match self {
            Self::Mainnet => MAINNET_URL,
            Self::Testnet => TESTNET_URL,
        }
    }
}

/// BingX REST API client
///
/// Provides access to both public and private endpoints.
///
/// # Example
///
/// ```no_run
/// use bingx_rest::{BingxRestClient, Credentials};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     // Public endpoints only
///     let client = BingxRestClient::new()?;
///     let tickers = client.get_tickers(Some("BTC-USDT")).await?;
///
///     // With authentication for private endpoints
///     let creds = Credentials::from_env()?;
///     let auth_client = BingxRestClient::with_credentials(creds)?;
///     let balances = auth_client.get_balance().await?;
///
///     Ok(())
/// }
/// ```
#[derive(Clone)]
pub struct BingxRestClient {
    transport: Transport,
}

impl BingxRestClient {
    /// Create a new mainnet client without authentication
    ///
    /// Only public endpoints will be available.
    pub fn new() -> RestResult<Self> {
        Self::with_config(ClientConfig::default())
    }

    /// Create a new mainnet client with credentials
    ///
    /// All endpoints (public and private) will be available.
    pub fn with_credentials(credentials: Credentials) -> RestResult<Self> {
        Self::with_config(ClientConfig::new().with_credentials(credentials))
    }

    /// Create a new client with custom configuration
    pub fn with_config(config: ClientConfig) -> RestResult<Self> {
        let http_client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(config.user_agent.as_deref().unwrap_or(concat!(
                "bingx-rest/",
                env!("CARGO_PKG_VERSION")
            )))
            .build()?;

        let base_url = config.base_url().to_string();
        info!(base_url = %base_url, authenticated = config.credentials.is_some(), "Created BingX REST client");

        Ok(Self {
            transport: Transport::new(
                http_client,
                base_url,
                config.credentials,
                config.recv_window_ms,
            ),
        })
    }

    /// Check if the client has credentials for private endpoints
    pub fn has_credentials(&self) -> bool {
        self.transport.has_credentials()
    }

    /// Base URL requests are sent to
    pub fn base_url(&self) -> &str {
        self.transport.base_url()
    }

    /// Underlying transport, for endpoints this crate does not wrap
    pub fn transport(&self) -> &Transport {
        &self.transport
    }

    fn require_credentials(&self) -> RestResult<()> {
        if self.transport.has_credentials() {
            Ok(())
        } else {
            Err(RestError::AuthRequired)
        }
    }

    // ========================================================================
    // Public Spot Market Endpoints
    // ========================================================================

    /// Get spot market endpoints
    pub fn spot_market(&self) -> SpotMarketEndpoints<'_> {
        SpotMarketEndpoints::new(&self.transport)
    }

    /// Get spot symbol metadata, optionally for a single symbol
    pub async fn get_symbols(&self, symbol: Option<&str>) -> RestResult<Vec<SymbolInfo>> {
        self.spot_market().get_symbols(symbol).await
    }

    /// Get orderbook depth for a symbol
    pub async fn get_order_book(&self, symbol: &str, limit: Option<u32>) -> RestResult<OrderBook> {
        self.spot_market().get_order_book(symbol, limit).await
    }

    /// Get recent candles
    pub async fn get_candles(
        &self,
        symbol: &str,
        interval: Interval,
        limit: u32,
    ) -> RestResult<Vec<Kline>> {
        self.spot_market().get_candles(symbol, interval, limit).await
    }

    /// Get last prices, optionally for a single symbol
    pub async fn get_tickers(&self, symbol: Option<&str>) -> RestResult<Tickers> {
        self.spot_market().get_tickers(symbol).await
    }

    // ========================================================================
    // Private Spot Account Endpoints
    // ========================================================================

    /// Get spot account endpoints (requires credentials)
    pub fn spot_account(&self) -> RestResult<SpotAccountEndpoints<'_>> {
        self.require_credentials()?;
        Ok(SpotAccountEndpoints::new(&self.transport))
    }

    /// Get spot balances
    pub async fn get_balance(&self) -> RestResult<Vec<SpotBalance>> {
        self.spot_account()?.get_balance().await
    }

    // ========================================================================
    // Private Spot Trading Endpoints
    // ========================================================================

    /// Get spot trading endpoints (requires credentials)
    pub fn spot_trading(&self) -> RestResult<SpotTradingEndpoints<'_>> {
        self.require_credentials()?;
        Ok(SpotTradingEndpoints::new(&self.transport))
    }

    /// Place a spot order
    pub async fn create_order(&self, order: &SpotOrderRequest) -> RestResult<SpotOrderResponse> {
        self.spot_trading()?.create_order(order).await
    }

    /// Cancel a spot order by exchange id
    pub async fn cancel_order(&self, symbol: &str, order_id: i64) -> RestResult<()> {
        self.spot_trading()?.cancel_order(symbol, order_id).await
    }

    /// Get open spot orders for a symbol
    pub async fn get_open_orders(&self, symbol: &str) -> RestResult<Vec<SpotOrder>> {
        self.spot_trading()?.get_open_orders(symbol).await
    }

    // ========================================================================
    // Private Swap Endpoints
    // ========================================================================

    /// Get perpetual swap endpoints (requires credentials)
    pub fn swap(&self) -> RestResult<SwapEndpoints<'_>> {
        self.require_credentials()?;
        Ok(SwapEndpoints::new(&self.transport))
    }
}

impl std::fmt::Debug for BingxRestClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BingxRestClient")
            .field("base_url", &self.base_url())
            .field("has_credentials", &self.has_credentials())
            .finish()
    }
}

/// Client configuration
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// API credentials (optional)
    pub credentials: Option<Credentials>,
    /// Network to connect to
    pub network: Network,
    /// Explicit base URL, overrides `network`
    pub base_url: Option<String>,
    /// Request timeout in seconds
    pub timeout_secs: u64,
    /// Custom user agent
    pub user_agent: Option<String>,
    /// `recvWindow` sent with signed requests
    pub recv_window_ms: Option<u64>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            credentials: None,
            network: Network::Mainnet,
            base_url: None,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            user_agent: None,
            recv_window_ms: None,
        }
    }
}

impl ClientConfig {
    /// Create a new configuration builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Configuration from the environment
    ///
    /// Credentials are loaded when `BINGX_API_KEY` and `BINGX_SECRET_KEY` are
    /// both set. Setting only one of them is an error. `BINGX_TESTNET=1`
    /// (or `true`) selects the testnet.
    pub fn from_env() -> RestResult<Self> {
        let mut config = Self::default();

        config.credentials = credentials_from(
            std::env::var(API_KEY_ENV).ok(),
            std::env::var(SECRET_KEY_ENV).ok(),
        )?;

        if let Ok(value) = std::env::var(TESTNET_ENV) {
            if matches!(value.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes") {
                config.network = Network::Testnet;
            }
        }

        Ok(config)
    }

    /// Set credentials
    pub fn with_credentials(mut self, credentials: Credentials) -> Self {
        self.credentials = Some(credentials);
        self
    }

    /// Set network
    pub fn with_network(mut self, network: Network) -> Self {
        self.network = network;
        self
    }

    /// Use the testnet
    pub fn testnet(self) -> Self {
        self.with_network(Network::Testnet)
    }

    /// Override the base URL (proxies, mock servers)
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Set timeout
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    /// Set user agent
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Set the receive window for signed requests
    pub fn with_recv_window(mut self, recv_window_ms: u64) -> Self {
        self.recv_window_ms = Some(recv_window_ms);
        self
    }

    /// Effective base URL
    pub fn base_url(&self) -> &str {
        self.base_url
            .as_deref()
            .unwrap_or_else(|| self.network.base_url())
    }
}

/// Credentials from the two key variables; absent only when both are unset
fn credentials_from(
    api_key: Option<String>,
    secret_key: Option<String>,
) -> RestResult<Option<Credentials>> {
    match (api_key, secret_key) {
        (None, None) => Ok(None),
        (Some(api_key), Some(secret_key)) => Ok(Some(Credentials::new(api_key, secret_key)?)),
        (Some(_), None) => Err(AuthError::EnvVarNotSet(SECRET_KEY_ENV.to_string()).into()),
        (None, Some(_)) => Err(AuthError::EnvVarNotSet(API_KEY_ENV.to_string()).into()),
    }
}
