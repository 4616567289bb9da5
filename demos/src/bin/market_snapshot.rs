//! Demo 1: Market Snapshot
//!
//! Showcases: public spot endpoints (server time, orderbook, candles, tickers)
//!
//! Run: cargo run --bin market_snapshot -- BTC-USDT
//! Set RUST_LOG=bingx_rest=debug to see the requests being sent.

use bingx_rest::bingx_types::Interval;
use bingx_rest::{BingxRestClient, ClientConfig};
use chrono::{TimeZone, Utc};
use colored::*;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .init();

    let symbol = std::env::args().nth(1).unwrap_or_else(|| "BTC-USDT".to_string());

    println!("{}", "═".repeat(60).cyan());
    println!("{}", "  BINGX MARKET SNAPSHOT".cyan().bold());
    println!("{}", format!("  {}", symbol).cyan());
    println!("{}", "═".repeat(60).cyan());
    println!();

    let client = BingxRestClient::with_config(ClientConfig::from_env()?)?;
    let market = client.spot_market();

    let server_time = market.get_server_time().await?;
    let local_time = Utc::now().timestamp_millis();
    println!(
        "{} Server time {} (clock offset {} ms)",
        "✓".green(),
        Utc.timestamp_millis_opt(server_time)
            .single()
            .map(|t| t.to_rfc3339())
            .unwrap_or_else(|| server_time.to_string()),
        server_time - local_time
    );

    let tickers = market.get_tickers(Some(symbol.as_str())).await?;
    match tickers.get(&symbol) {
        Some(price) => println!("{} Last price {}", "✓".green(), price.to_string().bold()),
        None => println!("{} No ticker for {}", "✗".red(), symbol),
    }
    println!();

    let book = market.get_order_book(&symbol, Some(5)).await?;
    println!("{}", "  ORDERBOOK (top 5)".yellow().bold());
    for level in book.asks.iter().take(5).rev() {
        println!("  {:>16} {:>14}", level.price().to_string().red(), level.quantity());
    }
    println!("  {}", "─".repeat(31).dimmed());
    for level in book.bids.iter().take(5) {
        println!("  {:>16} {:>14}", level.price().to_string().green(), level.quantity());
    }
    if let (Some(spread), Some(mid)) = (book.spread(), book.mid_price()) {
        println!("  {} {}  {} {}", "SPREAD:".yellow(), spread, "MID:".yellow(), mid);
    }
    println!();

    let candles = market.get_candles(&symbol, Interval::H1, 6).await?;
    println!("{}", "  LAST 6 HOURLY CANDLES".yellow().bold());
    for candle in &candles {
        let time = Utc
            .timestamp_millis_opt(candle.open_time)
            .single()
            .map(|t| t.format("%m-%d %H:%M").to_string())
            .unwrap_or_default();
        let close = if candle.is_bullish() {
            candle.close.to_string().green()
        } else {
            candle.close.to_string().red()
        };
        println!(
            "  {}  O {:>12}  H {:>12}  L {:>12}  C {:>12}  V {}",
            time, candle.open, candle.high, candle.low, close, candle.volume
        );
    }

    Ok(())
}
