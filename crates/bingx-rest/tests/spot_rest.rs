//! Spot endpoint tests against a mock BingX server

mod common;

use bingx_rest::bingx_types::{Interval, OrderStatus, OrderType, Side};
use bingx_rest::{BingxRestClient, ClientConfig, HistoryQuery, RestError, SpotOrderRequest};
use common::*;
use rust_decimal_macros::dec;
use std::time::Duration;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, Request, ResponseTemplate};

fn json_body(body: &str) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_raw(body.as_bytes().to_vec(), "application/json")
}

/// Recompute the signature of a received request from its decoded query
fn assert_signed(request: &Request) {
    let mut signature = None;
    let mut pairs = Vec::new();
    for (key, value) in request.url.query_pairs() {
        if key == "signature" {
            signature = Some(value.into_owned());
        } else {
            pairs.push(format!("{}={}", key, value));
        }
    }

    let canonical = pairs.join("&");
    let expected = credentials().sign(&canonical).unwrap();

    assert_eq!(signature.as_deref(), Some(expected.as_str()));
    assert!(canonical.contains("timestamp="));
    assert_eq!(
        request
            .headers
            .get("X-BX-APIKEY")
            .and_then(|v| v.to_str().ok()),
        Some(API_KEY)
    );
}

// ============================================================================
// Market data
// ============================================================================

#[tokio::test]
async fn test_get_candles_normalizes_rows() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/openApi/spot/v2/market/kline"))
        .and(query_param("symbol", "BTC-USDT"))
        .and(query_param("interval", "1m"))
        .and(query_param("limit", "2"))
        .respond_with(json_body(KLINES_RESPONSE))
        .mount(&server)
        .await;

    let klines = public_client(&server)
        .get_candles("BTC-USDT", Interval::M1, 2)
        .await
        .unwrap();

    assert_eq!(klines.len(), 2);
    assert_eq!(klines[0].open_time, 1700000000000);
    assert_eq!(klines[0].low, dec!(36950.25));
    assert_eq!(klines[0].quote_volume, Some(dec!(463125.3)));
    assert!(klines[0].is_bullish());
    assert_eq!(klines[1].volume, dec!(3.25));
    assert_eq!(klines[1].quote_volume, None);
    assert_eq!(klines[1].interval, Interval::M1);
}

#[tokio::test]
async fn test_public_request_is_unsigned() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/openApi/spot/v1/market/depth"))
        .and(query_param("symbol", "BTC-USDT"))
        .respond_with(json_body(ORDER_BOOK_RESPONSE))
        .mount(&server)
        .await;

    let book = signed_client(&server)
        .get_order_book("BTC-USDT", None)
        .await
        .unwrap();

    assert_eq!(book.best_bid(), Some(dec!(37000.0)));
    assert_eq!(book.spread(), Some(dec!(1.0)));

    let requests = server.received_requests().await.unwrap();
    let request = &requests[0];
    assert!(request.headers.get("X-BX-APIKEY").is_none());
    assert!(!request.url.query_pairs().any(|(k, _)| k == "signature"));
    assert!(!request.url.query_pairs().any(|(k, _)| k == "limit"));
}

#[tokio::test]
async fn test_get_tickers_folds_last_prices() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/openApi/spot/v1/ticker/24hr"))
        .respond_with(json_body(TICKERS_RESPONSE))
        .mount(&server)
        .await;

    let tickers = public_client(&server).get_tickers(None).await.unwrap();

    assert_eq!(tickers.len(), 2);
    assert_eq!(tickers["BTC-USDT"], dec!(37050.1));
    assert_eq!(tickers["ETH-USDT"], dec!(2050.4));
}

#[tokio::test]
async fn test_historical_klines_soft_failure() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/openApi/market/his/v1/kline"))
        .respond_with(json_body(HISTORICAL_KLINES_SOFT_FAILURE))
        .mount(&server)
        .await;

    let err = public_client(&server)
        .spot_market()
        .get_historical_klines("BTC-USDT", Interval::H1, 10)
        .await
        .unwrap_err();

    match err {
        RestError::Exchange { code, message } => {
            assert_eq!(code, 0);
            assert_eq!(message, "endTime is too far in the past");
        }
        other => panic!("expected exchange error, got {:?}", other),
    }

    let requests = server.received_requests().await.unwrap();
    assert!(requests[0].url.query_pairs().any(|(k, _)| k == "endTime"));
}

#[tokio::test]
async fn test_historical_klines_success() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/openApi/market/his/v1/kline"))
        .respond_with(json_body(KLINES_RESPONSE))
        .mount(&server)
        .await;

    let klines = public_client(&server)
        .spot_market()
        .get_historical_klines("BTC-USDT", Interval::M1, 2)
        .await
        .unwrap();

    assert_eq!(klines.len(), 2);
}

#[tokio::test]
async fn test_get_symbols_decodes_trading_rules() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/openApi/spot/v1/common/symbols"))
        .and(query_param("symbol", "BTC-USDT"))
        .respond_with(json_body(SYMBOLS_RESPONSE))
        .mount(&server)
        .await;

    let symbols = public_client(&server)
        .get_symbols(Some("BTC-USDT"))
        .await
        .unwrap();

    assert_eq!(symbols.len(), 2);
    let btc = &symbols[0];
    assert_eq!(btc.symbol, "BTC-USDT");
    assert_eq!(btc.min_qty, Some(dec!(0.0001)));
    assert_eq!(btc.max_qty, Some(dec!(100)));
    assert_eq!(btc.min_notional, Some(dec!(5)));
    assert_eq!(btc.max_notional, Some(dec!(200000)));
    assert_eq!(btc.tick_size, Some(dec!(0.01)));
    assert_eq!(btc.step_size, Some(dec!(0.00001)));
    assert!(btc.api_state_buy);
    assert!(btc.api_state_sell);
    assert_eq!(btc.time_online, 1655280000000);
    assert!(btc.is_trading());

    let old = &symbols[1];
    assert_eq!(old.tick_size, None);
    assert!(!old.api_state_buy);
    assert!(!old.is_trading());

    let request = &server.received_requests().await.unwrap()[0];
    assert!(request.url.query_pairs().any(|(k, _)| k == "timestamp"));
    assert!(!request.url.query_pairs().any(|(k, _)| k == "signature"));
}

#[tokio::test]
async fn test_get_ticker_stats_decodes_all_fields() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/openApi/spot/v1/ticker/24hr"))
        .and(query_param("symbol", "BTC-USDT"))
        .respond_with(json_body(TICKER_STATS_RESPONSE))
        .mount(&server)
        .await;

    let stats = public_client(&server)
        .spot_market()
        .get_ticker_stats(Some("BTC-USDT"))
        .await
        .unwrap();

    assert_eq!(stats.len(), 1);
    let ticker = &stats[0];
    assert_eq!(ticker.symbol, "BTC-USDT");
    assert_eq!(ticker.last_price, dec!(37350.1));
    assert_eq!(ticker.open_price, Some(dec!(36500.5)));
    assert_eq!(ticker.high_price, Some(dec!(37800)));
    assert_eq!(ticker.low_price, Some(dec!(36100.25)));
    assert_eq!(ticker.volume, Some(dec!(1532.44)));
    assert_eq!(ticker.quote_volume, Some(dec!(56789012.5)));
    assert_eq!(ticker.bid_price, Some(dec!(37350)));
    assert_eq!(ticker.bid_qty, Some(dec!(0.25)));
    assert_eq!(ticker.ask_price, Some(dec!(37350.2)));
    assert_eq!(ticker.ask_qty, Some(dec!(1.1)));
    assert_eq!(ticker.price_change_percent.as_deref(), Some("2.33%"));
    assert_eq!(ticker.open_time, 1699913600000);
    assert_eq!(ticker.close_time, 1700000000000);
}

// ============================================================================
// Account
// ============================================================================

#[tokio::test]
async fn test_get_balance() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/openApi/spot/v1/account/balance"))
        .and(header("X-BX-APIKEY", API_KEY))
        .respond_with(json_body(BALANCE_RESPONSE))
        .mount(&server)
        .await;

    let balances = signed_client(&server).get_balance().await.unwrap();

    assert_eq!(balances.len(), 1);
    assert_eq!(balances[0].asset, "BTC");
    assert_eq!(balances[0].free, dec!(1.5));
    assert_eq!(balances[0].locked, dec!(0));

    let requests = server.received_requests().await.unwrap();
    assert_signed(&requests[0]);
}

#[tokio::test]
async fn test_get_balance_empty_account() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/openApi/spot/v1/account/balance"))
        .respond_with(json_body(EMPTY_BALANCE_RESPONSE))
        .mount(&server)
        .await;

    let balances = signed_client(&server).get_balance().await.unwrap();
    assert!(balances.is_empty());
}

#[tokio::test]
async fn test_signed_call_without_credentials_sends_nothing() {
    let server = MockServer::start().await;
    let client = public_client(&server);

    let err = client.get_balance().await.unwrap_err();
    assert!(matches!(err, RestError::AuthRequired));

    let err = client
        .transport()
        .get_signed::<serde_json::Value>("/openApi/spot/v1/account/balance", Default::default())
        .await
        .unwrap_err();
    assert!(matches!(err, RestError::AuthRequired));

    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_get_asset_balance_matches_case_insensitively() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/openApi/spot/v1/account/balance"))
        .respond_with(json_body(MULTI_ASSET_BALANCE_RESPONSE))
        .mount(&server)
        .await;

    let client = signed_client(&server);
    let account = client.spot_account().unwrap();

    let usdt = account.get_asset_balance("usdt").await.unwrap().unwrap();
    assert_eq!(usdt.asset, "USDT");
    assert_eq!(usdt.free, dec!(1200.75));
    assert_eq!(usdt.total(), dec!(1500.75));

    assert!(account.get_asset_balance("ETH").await.unwrap().is_none());
}

// ============================================================================
// Trading
// ============================================================================

#[tokio::test]
async fn test_get_open_orders_tolerates_unknown_type() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/openApi/spot/v1/trade/openOrders"))
        .and(query_param("symbol", "BTC-USDT"))
        .respond_with(json_body(OPEN_ORDERS_RESPONSE))
        .mount(&server)
        .await;

    let orders = signed_client(&server)
        .get_open_orders("BTC-USDT")
        .await
        .unwrap();

    assert_eq!(orders.len(), 2);
    assert_eq!(orders[0].order_id, 201);
    assert_eq!(orders[0].status, OrderStatus::PartiallyFilled);
    assert_eq!(orders[0].order_type, OrderType::Limit);
    assert_eq!(orders[0].remaining_qty(), dec!(0.006));
    assert_eq!(orders[1].order_id, 202);
    assert_eq!(orders[1].order_type, OrderType::Unknown);
    assert_eq!(orders[1].side, Side::Sell);

    let requests = server.received_requests().await.unwrap();
    assert_signed(&requests[0]);
}

#[tokio::test]
async fn test_get_order_by_id() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/openApi/spot/v1/trade/query"))
        .and(query_param("symbol", "BTC-USDT"))
        .and(query_param("orderId", "301"))
        .respond_with(json_body(QUERY_ORDER_RESPONSE))
        .mount(&server)
        .await;

    let client = signed_client(&server);
    let order = client
        .spot_trading()
        .unwrap()
        .get_order("BTC-USDT", 301)
        .await
        .unwrap();

    assert_eq!(order.order_id, 301);
    assert_eq!(order.status, OrderStatus::Filled);
    assert_eq!(order.side, Side::Sell);
    assert_eq!(order.cummulative_quote_qty, Some(dec!(15500)));
    assert_eq!(order.fee, Some(dec!(-15.5)));
    assert_eq!(order.fee_asset.as_deref(), Some("USDT"));
    assert_eq!(order.client_order_id.as_deref(), Some("exit-7"));
    assert_eq!(order.remaining_qty(), dec!(0));

    let requests = server.received_requests().await.unwrap();
    assert_signed(&requests[0]);
}

#[tokio::test]
async fn test_get_order_by_client_order_id() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/openApi/spot/v1/trade/query"))
        .and(query_param("symbol", "BTC-USDT"))
        .and(query_param("clientOrderID", "exit-7"))
        .respond_with(json_body(QUERY_ORDER_RESPONSE))
        .mount(&server)
        .await;

    let client = signed_client(&server);
    let order = client
        .spot_trading()
        .unwrap()
        .get_order_by_client_order_id("BTC-USDT", "exit-7")
        .await
        .unwrap();

    assert_eq!(order.order_id, 301);
    assert_eq!(order.client_order_id.as_deref(), Some("exit-7"));

    let request = &server.received_requests().await.unwrap()[0];
    assert!(!request.url.query_pairs().any(|(k, _)| k == "orderId"));
}

#[tokio::test]
async fn test_cancel_order_by_id() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/openApi/spot/v1/trade/cancel"))
        .and(query_param("symbol", "BTC-USDT"))
        .and(query_param("orderId", "201"))
        .and(header("X-BX-APIKEY", API_KEY))
        .respond_with(json_body(CANCEL_RESPONSE))
        .expect(1)
        .mount(&server)
        .await;

    signed_client(&server)
        .cancel_order("BTC-USDT", 201)
        .await
        .unwrap();

    let requests = server.received_requests().await.unwrap();
    assert_signed(&requests[0]);
    assert!(requests[0].body.is_empty());
}

#[tokio::test]
async fn test_create_order_exchange_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/openApi/spot/v1/trade/order"))
        .respond_with(json_body(INSUFFICIENT_BALANCE_RESPONSE))
        .mount(&server)
        .await;

    let order = SpotOrderRequest::limit("BTC-USDT", Side::Buy, dec!(1000), dec!(30000));
    let err = signed_client(&server).create_order(&order).await.unwrap_err();

    match &err {
        RestError::Exchange { code, message } => {
            assert_eq!(*code, 100001);
            assert_eq!(message, "insufficient balance");
        }
        other => panic!("expected exchange error, got {:?}", other),
    }
    assert!(err.is_exchange_error());
    assert!(err.to_string().ends_with("insufficient balance"));
}

#[tokio::test]
async fn test_create_order_success_uses_query_and_empty_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/openApi/spot/v1/trade/order"))
        .and(query_param("symbol", "BTC-USDT"))
        .and(query_param("type", "LIMIT"))
        .and(query_param("newClientOrderId", "grid-1"))
        .respond_with(json_body(CREATE_ORDER_RESPONSE))
        .mount(&server)
        .await;

    let order = SpotOrderRequest::limit("BTC-USDT", Side::Buy, dec!(0.001), dec!(30000))
        .with_client_order_id("grid-1");
    let response = signed_client(&server).create_order(&order).await.unwrap();

    assert_eq!(response.order_id, 1734123456789012345);
    assert_eq!(response.status, OrderStatus::Pending);
    assert_eq!(response.client_order_id.as_deref(), Some("grid-1"));

    let requests = server.received_requests().await.unwrap();
    assert!(requests[0].body.is_empty());
    assert_signed(&requests[0]);
}

#[tokio::test]
async fn test_create_order_rejected_locally() {
    let server = MockServer::start().await;

    let mut order = SpotOrderRequest::market("BTC-USDT", Side::Buy, dec!(1));
    order.quantity = None;
    let err = signed_client(&server).create_order(&order).await.unwrap_err();

    assert!(matches!(err, RestError::InvalidParameter(_)));
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_create_batch_orders() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/openApi/spot/v1/trade/batchOrders"))
        .and(query_param("sync", "true"))
        .respond_with(json_body(BATCH_ORDERS_RESPONSE))
        .mount(&server)
        .await;

    let orders = vec![
        SpotOrderRequest::limit("BTC-USDT", Side::Buy, dec!(0.001), dec!(29000)),
        SpotOrderRequest::limit("BTC-USDT", Side::Sell, dec!(0.001), dec!(31000)),
    ];
    let placed = signed_client(&server)
        .spot_trading()
        .unwrap()
        .create_batch_orders(&orders, true)
        .await
        .unwrap();

    assert_eq!(placed.len(), 2);
    assert_eq!(placed[1].side, Side::Sell);

    let requests = server.received_requests().await.unwrap();
    let data = requests[0]
        .url
        .query_pairs()
        .find(|(k, _)| k == "data")
        .map(|(_, v)| v.into_owned())
        .unwrap();
    let sent: serde_json::Value = serde_json::from_str(&data).unwrap();
    assert_eq!(sent.as_array().unwrap().len(), 2);
    assert_eq!(sent[0]["price"], "29000");
    assert_signed(&requests[0]);
}

#[tokio::test]
async fn test_cancel_order_by_client_id() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/openApi/spot/v1/trade/cancel"))
        .and(query_param("clientOrderID", "grid-1"))
        .respond_with(json_body(CANCEL_RESPONSE))
        .mount(&server)
        .await;

    signed_client(&server)
        .spot_trading()
        .unwrap()
        .cancel_order_by_client_order_id("BTC-USDT", "grid-1")
        .await
        .unwrap();
}

#[tokio::test]
async fn test_cancel_all_open_orders_without_data() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/openApi/spot/v1/trade/cancelOpenOrders"))
        .respond_with(json_body(r#"{"code":0,"msg":""}"#))
        .mount(&server)
        .await;

    let result = signed_client(&server)
        .spot_trading()
        .unwrap()
        .cancel_all_open_orders("BTC-USDT")
        .await;
    assert!(result.is_ok());
}

#[tokio::test]
async fn test_history_orders_sends_only_set_filters() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/openApi/spot/v1/trade/historyOrders"))
        .and(query_param("startTime", "1700000000000"))
        .respond_with(json_body(HISTORY_ORDERS_RESPONSE))
        .mount(&server)
        .await;

    let query = HistoryQuery::new("BTC-USDT").with_start_time(1700000000000);
    let orders = signed_client(&server)
        .spot_trading()
        .unwrap()
        .history_orders(&query)
        .await
        .unwrap();

    assert_eq!(orders.len(), 2);
    assert_eq!(orders[0].status, OrderStatus::Filled);
    assert_eq!(orders[0].fee_asset.as_deref(), Some("BTC"));
    assert_eq!(orders[1].remaining_qty(), dec!(0.001));

    let requests = server.received_requests().await.unwrap();
    let keys: Vec<String> = requests[0]
        .url
        .query_pairs()
        .map(|(k, _)| k.into_owned())
        .collect();
    assert!(!keys.contains(&"endTime".to_string()));
    assert!(!keys.contains(&"orderId".to_string()));
}

#[tokio::test]
async fn test_get_history_order_found_and_missing() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/openApi/spot/v1/trade/historyOrders"))
        .respond_with(json_body(HISTORY_ORDERS_RESPONSE))
        .mount(&server)
        .await;

    let client = signed_client(&server);
    let trading = client.spot_trading().unwrap();

    let order = trading.get_history_order("BTC-USDT", 102).await.unwrap();
    assert_eq!(order.status, OrderStatus::Canceled);

    let err = trading.get_history_order("BTC-USDT", 999).await.unwrap_err();
    assert!(matches!(err, RestError::NotFound(_)));
}

// ============================================================================
// Failure modes
// ============================================================================

#[tokio::test]
async fn test_http_error_carries_status_and_body() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/openApi/spot/v1/ticker/24hr"))
        .respond_with(ResponseTemplate::new(503).set_body_string("upstream unavailable"))
        .mount(&server)
        .await;

    let err = public_client(&server).get_tickers(None).await.unwrap_err();

    match err {
        RestError::Http { status, body } => {
            assert_eq!(status, 503);
            assert_eq!(body, "upstream unavailable");
        }
        other => panic!("expected HTTP error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_malformed_body_is_decode_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/openApi/spot/v1/account/balance"))
        .respond_with(json_body("<html>maintenance</html>"))
        .mount(&server)
        .await;

    let err = signed_client(&server).get_balance().await.unwrap_err();
    assert!(matches!(err, RestError::Decode(_)));
}

#[tokio::test]
async fn test_wrong_payload_shape_is_decode_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/openApi/spot/v1/market/depth"))
        .respond_with(json_body(r#"{"code":0,"msg":"","data":{"bids":"none"}}"#))
        .mount(&server)
        .await;

    let err = public_client(&server)
        .get_order_book("BTC-USDT", Some(5))
        .await
        .unwrap_err();
    assert!(matches!(err, RestError::Decode(_)));
}

#[tokio::test]
async fn test_slow_response_times_out() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/openApi/spot/v1/server/time"))
        .respond_with(
            json_body(r#"{"code":0,"msg":"","data":{"serverTime":1700000000000}}"#)
                .set_delay(Duration::from_secs(3)),
        )
        .mount(&server)
        .await;

    let client = BingxRestClient::with_config(
        ClientConfig::new()
            .with_base_url(server.uri())
            .with_timeout(1),
    )
    .unwrap();

    let err = client.spot_market().get_server_time().await.unwrap_err();
    assert!(matches!(err, RestError::Timeout));
}

#[tokio::test]
async fn test_connection_refused_is_transport_error() {
    let client = BingxRestClient::with_config(
        ClientConfig::new()
            .with_base_url("http://127.0.0.1:1")
            .with_timeout(5),
    )
    .unwrap();

    let err = client.get_tickers(Some("BTC-USDT")).await.unwrap_err();
    assert!(matches!(err, RestError::Transport(_)), "got {:?}", err);
    assert!(!err.is_exchange_error());
}
