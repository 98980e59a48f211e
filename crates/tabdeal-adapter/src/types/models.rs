/*
[INPUT]:  API schema definitions and serde requirements
[OUTPUT]: Typed market and account data structs
[POS]:    Data layer - type definitions for API communication
[UPDATE]: When API schema changes or new types added
*/

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::types::serde_helpers::{deserialize_decimal_or_zero, deserialize_levels};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServerTime {
    pub server_time: i64,
}

/// Validation rule attached to a market; populated fields depend on `filter_type`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Filter {
    pub filter_type: String,

    // PRICE_FILTER
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_price: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_price: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tick_size: Option<String>,

    // PERCENT_PRICE
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub multiplier_up: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub multiplier_down: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avg_price_mins: Option<i64>,

    // LOT_SIZE and MARKET_LOT_SIZE
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_qty: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_qty: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub step_size: Option<String>,

    // MIN_NOTIONAL
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_notional: Option<String>,
    #[serde(default)]
    pub apply_to_market: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketInformation {
    pub symbol: String,
    #[serde(default)]
    pub tabdeal_symbol: String,
    pub status: String,
    pub base_asset: String,
    #[serde(default)]
    pub base_asset_precision: String,
    pub quote_asset: String,
    #[serde(default)]
    pub quote_asset_precision: String,
    #[serde(default)]
    pub base_commission_precision: String,
    #[serde(default)]
    pub quote_commission_precision: String,
    #[serde(default)]
    pub order_types: Vec<String>,
    #[serde(default)]
    pub iceberg_allowed: bool,
    #[serde(default)]
    pub oco_allowed: bool,
    #[serde(default)]
    pub quote_order_qty_market_allowed: bool,
    #[serde(default)]
    pub allow_trailing_stop: bool,
    #[serde(default)]
    pub is_spot_trading_allowed: bool,
    #[serde(default)]
    pub is_margin_trading_allowed: bool,
    #[serde(default)]
    pub filters: Vec<Filter>,
    #[serde(default)]
    pub permissions: Vec<String>,
}

/// Aggregated depth; best levels first, each level is `(price, quantity)`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderBook {
    #[serde(default, deserialize_with = "deserialize_levels")]
    pub asks: Vec<(Decimal, Decimal)>,
    #[serde(default, deserialize_with = "deserialize_levels")]
    pub bids: Vec<(Decimal, Decimal)>,
}

impl OrderBook {
    pub fn best_ask(&self) -> Option<(Decimal, Decimal)> {
        self.asks.first().copied()
    }

    pub fn best_bid(&self) -> Option<(Decimal, Decimal)> {
        self.bids.first().copied()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Trade {
    #[serde(default)]
    pub id: i64,
    #[serde(default, deserialize_with = "deserialize_decimal_or_zero")]
    pub price: Decimal,
    #[serde(default, deserialize_with = "deserialize_decimal_or_zero")]
    pub qty: Decimal,
    #[serde(default, deserialize_with = "deserialize_decimal_or_zero")]
    pub quote_qty: Decimal,
    #[serde(default)]
    pub time: i64,
    #[serde(default)]
    pub is_buyer_maker: bool,
}

/// Funding wallet balance; `freeze` is locked by open orders or pending operations
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Wallet {
    pub asset: String,
    #[serde(default, deserialize_with = "deserialize_decimal_or_zero")]
    pub free: Decimal,
    #[serde(default, deserialize_with = "deserialize_decimal_or_zero")]
    pub freeze: Decimal,
}
