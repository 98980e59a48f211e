/*
[INPUT]:  Market symbol (e.g., "BTCIRT")
[OUTPUT]: Market data (server time, market info, depth, recent trades)
[POS]:    Examples - public market data queries
[UPDATE]: When adding new market data endpoints
*/

use tabdeal_adapter::*;
use tracing_subscriber::EnvFilter;

/// Example: Query market data (no authentication required)
///
/// Public endpoints go through the read path and are never signed.
#[tokio::main]
async fn main() {
    // RUST_LOG=tabdeal_adapter=debug shows each request
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .try_init();

    println!("=== Tabdeal Market Data Example ===\n");

    let client = match TabdealClient::with_config(ClientConfig::from_env()) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to create client: {}", e);
            return;
        }
    };
    println!("✓ HTTP client created (no auth required for public endpoints)\n");

    match client.get_server_time().await {
        Ok(time) => println!("✓ Server time: {}", time.server_time),
        Err(e) => println!("✗ Error: {}", e),
    }

    println!("\nQuerying market information...");
    match client.get_market_information().await {
        Ok(markets) => println!("✓ {} markets listed", markets.len()),
        Err(e) => println!("✗ Error: {}", e),
    }

    let symbol = "BTCIRT";

    println!("\nQuerying depth book for {}...", symbol);
    let depth = GetOrderBookParams {
        market: SymbolParams::symbol(symbol),
        limit: Some(5),
    };
    match client.get_order_book(&depth).await {
        Ok(book) => println!(
            "✓ Best ask: {:?}, best bid: {:?}",
            book.best_ask(),
            book.best_bid()
        ),
        Err(e) => println!("✗ Error: {}", e),
    }

    println!("\nQuerying recent trades for {}...", symbol);
    let trades = GetRecentTradesParams {
        market: SymbolParams::symbol(symbol),
        limit: Some(10),
    };
    match client.get_recent_trades(&trades).await {
        Ok(trades) => {
            for trade in trades.iter().take(3) {
                println!("  {} @ {} (id {})", trade.qty, trade.price, trade.id);
            }
        }
        Err(e) => println!("✗ Error: {}", e),
    }

    println!("\n✓ Market data example complete");
}
