//! Demo 2: Account Overview
//!
//! Showcases: signed spot and swap endpoints, exchange error classification
//!
//! Run: BINGX_API_KEY=... BINGX_SECRET_KEY=... cargo run --bin account_overview
//! Add BINGX_TESTNET=1 to use the VST test environment.

use bingx_rest::{BingxRestClient, ClientConfig, HistoryQuery, RestError};
use colored::*;
use rust_decimal::Decimal;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    println!("{}", "═".repeat(60).cyan());
    println!("{}", "  BINGX ACCOUNT OVERVIEW".cyan().bold());
    println!("{}", "═".repeat(60).cyan());
    println!();

    let config = ClientConfig::from_env()?;
    if config.credentials.is_none() {
        println!(
            "{} Set BINGX_API_KEY and BINGX_SECRET_KEY to run this demo",
            "✗".red()
        );
        return Ok(());
    }

    let client = BingxRestClient::with_config(config)?;
    println!("{} Using {}", "✓".green(), client.base_url());
    println!();

    // Spot balances
    let balances = client.get_balance().await?;
    info!(assets = balances.len(), "Fetched spot balances");
    println!("{}", "  SPOT BALANCES".yellow().bold());
    let mut shown = 0;
    for balance in balances.iter().filter(|b| b.total() > Decimal::ZERO) {
        println!(
            "  {:<8} free {:>18}  locked {:>18}",
            balance.asset.bold(),
            balance.free,
            balance.locked
        );
        shown += 1;
    }
    if shown == 0 {
        println!("  {}", "(empty)".dimmed());
    }
    println!();

    // Open spot orders and recent history
    let trading = client.spot_trading()?;
    let open = trading.get_open_orders("BTC-USDT").await?;
    println!("{} {} open BTC-USDT orders", "✓".green(), open.len());
    for order in &open {
        println!(
            "  #{} {} {} @ {} (remaining {})",
            order.order_id,
            order.side,
            order.orig_qty,
            order.price,
            order.remaining_qty()
        );
    }

    let history = trading
        .history_orders(&HistoryQuery::new("BTC-USDT"))
        .await?;
    println!("{} {} historical BTC-USDT orders", "✓".green(), history.len());
    println!();

    // Perpetual swap account
    let swap = client.swap()?;
    match swap.get_balance().await {
        Ok(balance) => {
            println!("{}", "  SWAP ACCOUNT".yellow().bold());
            println!(
                "  {} balance {}  equity {}",
                balance.asset.bold(),
                balance.balance,
                balance.equity.unwrap_or(balance.balance)
            );
        }
        Err(e) if e.is_auth_error() => {
            println!("{} Swap account unavailable: {}", "✗".red(), describe(&e));
            return Ok(());
        }
        Err(e) => return Err(e.into()),
    }

    let positions = swap.get_positions(None).await?;
    if positions.is_empty() {
        println!("  {}", "(no open positions)".dimmed());
    }
    for position in &positions {
        let pnl = position.unrealized_profit.unwrap_or_default();
        let pnl = if pnl >= Decimal::ZERO {
            pnl.to_string().green()
        } else {
            pnl.to_string().red()
        };
        println!(
            "  {:<10} {} {} @ {}  uPnL {}",
            position.symbol, position.position_side, position.position_amt, position.avg_price, pnl
        );
    }

    Ok(())
}

/// Human-readable text for a failed call, using the BingX error catalogue
fn describe(err: &RestError) -> String {
    match err.error_code() {
        Some(code) => format!("{} ({:?}): {}", code.description(), code.category(), err),
        None => err.to_string(),
    }
}
