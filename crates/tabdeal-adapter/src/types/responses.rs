/*
[INPUT]:  API schema definitions and serde requirements
[OUTPUT]: Typed order/trade response structs and the documented error body
[POS]:    Data layer - type definitions for API communication
[UPDATE]: When API schema changes or new types added
*/

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::enums::Side;
use crate::types::serde_helpers::deserialize_decimal_or_zero;

/// Documented error payload: `{"code": ..., "msg": ..., "detail": ...}`.
///
/// Endpoints are free to omit any of these or add others.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    #[serde(default)]
    pub code: i32,
    #[serde(default)]
    pub msg: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub detail: String,
}

/// Fields shared by every order-shaped response. Times are Unix milliseconds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BaseOrderResponse {
    #[serde(default)]
    pub symbol: String,
    #[serde(default)]
    pub tabdeal_symbol: String,
    #[serde(default)]
    pub order_id: i64,
    #[serde(default)]
    pub order_list_id: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_order_id: Option<String>,
    #[serde(default)]
    pub transact_time: i64,
    #[serde(default, deserialize_with = "deserialize_decimal_or_zero")]
    pub price: Decimal,
    #[serde(default, deserialize_with = "deserialize_decimal_or_zero")]
    pub orig_qty: Decimal,
    #[serde(default, deserialize_with = "deserialize_decimal_or_zero")]
    pub executed_qty: Decimal,
    // Both spellings are returned depending on the endpoint
    #[serde(default, deserialize_with = "deserialize_decimal_or_zero")]
    pub cummulative_quote_qty: Decimal,
    #[serde(default, deserialize_with = "deserialize_decimal_or_zero")]
    pub cumulative_quote_qty: Decimal,
    #[serde(default)]
    pub status: String,
    #[serde(default, rename = "type")]
    pub order_type: String,
    // Kept raw; see `order_side`
    #[serde(default)]
    pub side: String,
    #[serde(default, deserialize_with = "deserialize_decimal_or_zero")]
    pub stop_price: Decimal,
    #[serde(default)]
    pub update_time: i64,
    #[serde(default)]
    pub is_working: bool,
    #[serde(default)]
    pub is_stop_order_triggered: bool,
}

impl BaseOrderResponse {
    /// Cumulative quote quantity, whichever spelling the server used
    pub fn quote_qty(&self) -> Decimal {
        if self.cumulative_quote_qty.is_zero() {
            self.cummulative_quote_qty
        } else {
            self.cumulative_quote_qty
        }
    }

    /// Parsed side, `None` when missing or unrecognised
    pub fn order_side(&self) -> Option<Side> {
        self.side.parse().ok()
    }
}

/// Partial execution recorded while an order was filled
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Fill {
    #[serde(default, deserialize_with = "deserialize_decimal_or_zero")]
    pub price: Decimal,
    #[serde(default, deserialize_with = "deserialize_decimal_or_zero")]
    pub qty: Decimal,
    #[serde(default, deserialize_with = "deserialize_decimal_or_zero")]
    pub commission: Decimal,
    #[serde(default)]
    pub commission_asset: String,
    #[serde(default)]
    pub trade_id: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateOrderResponse {
    #[serde(flatten)]
    pub order: BaseOrderResponse,
    #[serde(default)]
    pub fills: Vec<Fill>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CancelOrderResponse {
    #[serde(flatten)]
    pub order: BaseOrderResponse,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderStatusResponse {
    #[serde(flatten)]
    pub order: BaseOrderResponse,
    #[serde(default, deserialize_with = "deserialize_decimal_or_zero")]
    pub fee: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserTradeResponse {
    #[serde(default)]
    pub symbol: String,
    #[serde(default)]
    pub tabdeal_symbol: String,
    #[serde(default)]
    pub id: i64,
    #[serde(default)]
    pub order_id: i64,
    #[serde(default, deserialize_with = "deserialize_decimal_or_zero")]
    pub price: Decimal,
    #[serde(default, deserialize_with = "deserialize_decimal_or_zero")]
    pub qty: Decimal,
    #[serde(default, deserialize_with = "deserialize_decimal_or_zero")]
    pub quote_qty: Decimal,
    #[serde(default, deserialize_with = "deserialize_decimal_or_zero")]
    pub commission: Decimal,
    #[serde(default)]
    pub commission_asset: String,
    #[serde(default)]
    pub time: i64,
    #[serde(default)]
    pub is_buyer: bool,
    #[serde(default)]
    pub is_maker: bool,
}
