//! Common test utilities and fixtures for integration tests
//!
//! Response bodies follow the shapes returned by the BingX open API.

#![allow(dead_code)]

use bingx_rest::{BingxRestClient, ClientConfig, Credentials};
use wiremock::MockServer;

pub const API_KEY: &str = "test-api-key";
pub const SECRET_KEY: &str = "test-secret-key";

/// Client pointed at the mock server, without credentials
pub fn public_client(server: &MockServer) -> BingxRestClient {
    BingxRestClient::with_config(ClientConfig::new().with_base_url(server.uri()))
        .expect("client should build")
}

/// Client pointed at the mock server, with test credentials
pub fn signed_client(server: &MockServer) -> BingxRestClient {
    BingxRestClient::with_config(
        ClientConfig::new()
            .with_base_url(server.uri())
            .with_credentials(credentials()),
    )
    .expect("client should build")
}

pub fn credentials() -> Credentials {
    Credentials::new(API_KEY, SECRET_KEY).expect("valid credentials")
}

/// Spot balance with a single asset
pub const BALANCE_RESPONSE: &str = r#"{
    "code": 0,
    "msg": "",
    "data": {
        "balances": [
            {"asset": "BTC", "free": "1.5", "locked": "0"}
        ]
    }
}"#;

/// Spot balance of an empty account
pub const EMPTY_BALANCE_RESPONSE: &str = r#"{"code":0,"msg":"","data":{}}"#;

/// Order placement rejected by the exchange
pub const INSUFFICIENT_BALANCE_RESPONSE: &str =
    r#"{"code":100001,"msg":"insufficient balance","data":{}}"#;

/// Accepted spot limit order
pub const CREATE_ORDER_RESPONSE: &str = r#"{
    "code": 0,
    "msg": "",
    "data": {
        "symbol": "BTC-USDT",
        "orderId": 1734123456789012345,
        "transactTime": 1700000000123,
        "price": "30000",
        "origQty": "0.001",
        "executedQty": "0",
        "cummulativeQuoteQty": "0",
        "status": "PENDING",
        "type": "LIMIT",
        "side": "BUY",
        "clientOrderID": "grid-1"
    }
}"#;

/// Accepted batch of two orders
pub const BATCH_ORDERS_RESPONSE: &str = r#"{
    "code": 0,
    "msg": "",
    "data": {
        "orders": [
            {"symbol": "BTC-USDT", "orderId": 11, "status": "PENDING", "type": "LIMIT", "side": "BUY"},
            {"symbol": "BTC-USDT", "orderId": 12, "status": "PENDING", "type": "LIMIT", "side": "SELL"}
        ]
    }
}"#;

/// Successful cancellation (payload ignored)
pub const CANCEL_RESPONSE: &str = r#"{
    "code": 0,
    "msg": "",
    "data": {"symbol": "BTC-USDT", "orderId": 11, "status": "CANCELED"}
}"#;

/// Two historical orders
pub const HISTORY_ORDERS_RESPONSE: &str = r#"{
    "code": 0,
    "msg": "",
    "data": {
        "orders": [
            {
                "symbol": "BTC-USDT",
                "orderId": 101,
                "price": "30000",
                "StopPrice": "0",
                "origQty": "0.002",
                "executedQty": "0.002",
                "cummulativeQuoteQty": "60",
                "status": "FILLED",
                "type": "LIMIT",
                "side": "BUY",
                "time": 1700000000000,
                "updateTime": 1700000005000,
                "fee": "-0.000002",
                "feeAsset": "BTC"
            },
            {
                "symbol": "BTC-USDT",
                "orderId": 102,
                "price": "31000",
                "origQty": "0.001",
                "executedQty": "0",
                "status": "CANCELED",
                "type": "LIMIT",
                "side": "SELL",
                "time": 1700000100000,
                "updateTime": 1700000200000
            }
        ]
    }
}"#;

/// Two one-minute candles, numbers mixed with strings
pub const KLINES_RESPONSE: &str = r#"{
    "code": 0,
    "msg": "",
    "data": [
        [1700000000000, 37000.5, 37100, 36950.25, 37050, 12.5, 1700000059999, 463125.3],
        [1700000060000, "37050", "37060", "36990", "37000", "3.25", 1700000119999]
    ]
}"#;

/// Successful envelope carrying a soft failure in `msg`
pub const HISTORICAL_KLINES_SOFT_FAILURE: &str =
    r#"{"code":0,"msg":"endTime is too far in the past","data":[]}"#;

/// Last prices for two symbols
pub const TICKERS_RESPONSE: &str = r#"{
    "code": 0,
    "msg": "",
    "data": [
        {"symbol": "BTC-USDT", "lastPrice": "37050.1", "volume": "1520.2"},
        {"symbol": "ETH-USDT", "lastPrice": 2050.4}
    ]
}"#;

/// Orderbook with two levels per side
pub const ORDER_BOOK_RESPONSE: &str = r#"{
    "code": 0,
    "msg": "",
    "data": {
        "bids": [["37000.0", "0.5"], ["36999.5", "1.2"]],
        "asks": [["37001.0", "0.8"], ["37002.5", "2.0"]],
        "ts": 1700000000500
    }
}"#;

/// Swap order acknowledgement
pub const SWAP_ORDER_RESPONSE: &str = r#"{
    "code": 0,
    "msg": "",
    "data": {
        "order": {
            "symbol": "BTC-USDT",
            "orderId": 1735950529123455000,
            "side": "BUY",
            "positionSide": "LONG",
            "type": "LIMIT",
            "price": 42000,
            "quantity": 0.01,
            "clientOrderID": "swap-1"
        }
    }
}"#;

/// Perpetual account balance
pub const SWAP_BALANCE_RESPONSE: &str = r#"{
    "code": 0,
    "msg": "",
    "data": {
        "balance": {
            "userId": "116***295",
            "asset": "USDT",
            "balance": "194.8212",
            "equity": "196.7431",
            "unrealizedProfit": "1.9219",
            "realisedProfit": "-109.2504",
            "availableMargin": "193.7609",
            "usedMargin": "1.0602",
            "freezedMargin": "0.0000"
        }
    }
}"#;

/// One open position
pub const SWAP_POSITIONS_RESPONSE: &str = r#"{
    "code": 0,
    "msg": "",
    "data": [
        {
            "symbol": "BTC-USDT",
            "positionId": "1727312345",
            "positionSide": "LONG",
            "isolated": false,
            "positionAmt": "0.01",
            "availableAmt": "0.01",
            "avgPrice": "42000",
            "unrealizedProfit": "2.5",
            "realisedProfit": "0",
            "initialMargin": "42",
            "leverage": 10,
            "liquidationPrice": 38000
        }
    ]
}"#;

/// Spot symbol catalogue with one online and one suspended pair
pub const SYMBOLS_RESPONSE: &str = r#"{
    "code": 0,
    "msg": "",
    "debugMsg": "",
    "data": {
        "symbols": [
            {
                "symbol": "BTC-USDT",
                "minQty": 0.0001,
                "maxQty": 100,
                "minNotional": 5,
                "maxNotional": 200000,
                "tickSize": 0.01,
                "stepSize": 0.00001,
                "status": 1,
                "apiStateBuy": true,
                "apiStateSell": true,
                "timeOnline": 1655280000000
            },
            {"symbol": "OLD-USDT", "status": 0}
        ]
    }
}"#;

/// Two open spot orders, the second of a type this client does not model
pub const OPEN_ORDERS_RESPONSE: &str = r#"{
    "code": 0,
    "msg": "",
    "data": {
        "orders": [
            {
                "symbol": "BTC-USDT",
                "orderId": 201,
                "price": "30000",
                "origQty": "0.01",
                "executedQty": "0.004",
                "status": "PARTIALLY_FILLED",
                "type": "LIMIT",
                "side": "BUY",
                "time": 1700000000000,
                "updateTime": 1700000001000
            },
            {
                "symbol": "BTC-USDT",
                "orderId": 202,
                "price": "0",
                "origQty": "0.02",
                "executedQty": "0",
                "status": "NEW",
                "type": "TRAILING_TP_SL",
                "side": "SELL"
            }
        ]
    }
}"#;

/// Single order lookup
pub const QUERY_ORDER_RESPONSE: &str = r#"{
    "code": 0,
    "msg": "",
    "data": {
        "symbol": "BTC-USDT",
        "orderId": 301,
        "price": "31000",
        "StopPrice": "0",
        "origQty": "0.5",
        "executedQty": "0.5",
        "cummulativeQuoteQty": "15500",
        "status": "FILLED",
        "type": "LIMIT",
        "side": "SELL",
        "time": 1700000000000,
        "updateTime": 1700000005000,
        "origQuoteOrderQty": "0",
        "fee": "-15.5",
        "feeAsset": "USDT",
        "clientOrderID": "exit-7"
    }
}"#;

/// Full 24h statistics for one symbol
pub const TICKER_STATS_RESPONSE: &str = r#"{
    "code": 0,
    "msg": "",
    "data": [
        {
            "symbol": "BTC-USDT",
            "openPrice": "36500.5",
            "highPrice": "37800",
            "lowPrice": "36100.25",
            "lastPrice": "37350.1",
            "volume": "1532.44",
            "quoteVolume": "56789012.5",
            "openTime": 1699913600000,
            "closeTime": 1700000000000,
            "bidPrice": 37350,
            "bidQty": 0.25,
            "askPrice": 37350.2,
            "askQty": 1.1,
            "priceChangePercent": "2.33%"
        }
    ]
}"#;

/// Spot balance with several assets
pub const MULTI_ASSET_BALANCE_RESPONSE: &str = r#"{
    "code": 0,
    "msg": "",
    "data": {
        "balances": [
            {"asset": "BTC", "free": "1.5", "locked": "0"},
            {"asset": "USDT", "free": "1200.75", "locked": "300"}
        ]
    }
}"#;
