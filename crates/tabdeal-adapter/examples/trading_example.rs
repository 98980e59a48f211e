/*
[INPUT]:  API key/secret from the environment and order parameters
[OUTPUT]: Wallet balances, order creation/cancellation confirmations
[POS]:    Examples - trading operations
[UPDATE]: When trading API changes
*/

use rust_decimal::Decimal;
use std::str::FromStr;
use tabdeal_adapter::*;
use tracing_subscriber::EnvFilter;

/// Example: Trading operations (requires signed requests)
///
/// Set TABDEAL_API_KEY and TABDEAL_API_SECRET before running. Every call
/// below carries a fresh timestamp and HMAC-SHA256 signature.
#[tokio::main]
async fn main() {
    // RUST_LOG=tabdeal_adapter=debug shows each request
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .try_init();

    println!("=== Tabdeal Trading Example ===\n");

    let client = match TabdealClient::with_config(ClientConfig::from_env()) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to create client: {}", e);
            return;
        }
    };
    if !client.is_authenticated() {
        eprintln!("TABDEAL_API_KEY and TABDEAL_API_SECRET must both be set");
        return;
    }
    println!("✓ HTTP client created");

    match client
        .get_wallets(&GetWalletParams {
            asset: Some("IRT".to_string()),
        })
        .await
    {
        Ok(wallets) => {
            for wallet in wallets {
                println!("  {}: free {} / frozen {}", wallet.asset, wallet.free, wallet.freeze);
            }
        }
        Err(e) => println!("✗ Error: {}", e),
    }

    // Far below market so it rests on the book
    let order = CreateOrderParams::limit(
        "BTCIRT",
        Side::Buy,
        Decimal::from_str("0.0001").unwrap_or_default(),
        Decimal::from(1_000_000),
    );
    println!("\nPlacing order: {:?}", order);

    let order_id = match client.create_order(&order).await {
        Ok(created) => {
            println!("✓ Order {} is {}", created.order.order_id, created.order.status);
            created.order.order_id
        }
        Err(TabdealError::Api(api)) => {
            println!("✗ Rejected ({}): {}", api.code, api.message);
            return;
        }
        Err(e) => {
            println!("✗ Error: {}", e);
            return;
        }
    };

    let cancel = CancelOrderParams {
        market: SymbolParams::symbol("BTCIRT"),
        order_id: Some(order_id),
        orig_client_order_id: None,
    };
    match client.cancel_order(&cancel).await {
        Ok(cancelled) => println!("✓ Order {} is {}", cancelled.order.order_id, cancelled.order.status),
        Err(e) => println!("✗ Error: {}", e),
    }

    println!("\n✓ Trading example complete");
}
