/*
[INPUT]:  Caller-supplied endpoint parameters
[OUTPUT]: Ordered query parameter records via ToParams
[POS]:    Data layer - request parameter definitions
[UPDATE]: When API parameters change or new endpoints are added
*/

use rust_decimal::Decimal;

use super::enums::{OrderType, Side};
use crate::http::{ParameterRecord, ToParams};

/// Market selector shared by most endpoints.
///
/// Tabdeal accepts either the compact `symbol` ("BTCIRT") or the
/// underscore form `tabdealSymbol` ("BTC_IRT"); `symbol` wins if both are set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SymbolParams {
    pub symbol: Option<String>,
    pub tabdeal_symbol: Option<String>,
}

impl SymbolParams {
    pub fn symbol(symbol: impl Into<String>) -> Self {
        Self {
            symbol: Some(symbol.into()),
            tabdeal_symbol: None,
        }
    }

    pub fn tabdeal_symbol(tabdeal_symbol: impl Into<String>) -> Self {
        Self {
            symbol: None,
            tabdeal_symbol: Some(tabdeal_symbol.into()),
        }
    }
}

impl ToParams for SymbolParams {
    fn to_params(&self) -> ParameterRecord {
        let mut params = ParameterRecord::new();
        params
            .push_opt("symbol", self.symbol.as_deref())
            .push_opt("tabdealSymbol", self.tabdeal_symbol.as_deref());
        params
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GetOrderBookParams {
    pub market: SymbolParams,
    pub limit: Option<u32>,
}

impl ToParams for GetOrderBookParams {
    fn to_params(&self) -> ParameterRecord {
        let mut params = self.market.to_params();
        params.push_opt("limit", self.limit);
        params
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GetRecentTradesParams {
    pub market: SymbolParams,
    pub limit: Option<u32>,
}

impl ToParams for GetRecentTradesParams {
    fn to_params(&self) -> ParameterRecord {
        let mut params = self.market.to_params();
        params.push_opt("limit", self.limit);
        params
    }
}

/// Funding wallet filter; no asset returns every wallet
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GetWalletParams {
    pub asset: Option<String>,
}

impl ToParams for GetWalletParams {
    fn to_params(&self) -> ParameterRecord {
        let mut params = ParameterRecord::new();
        params.push_opt("asset", self.asset.as_deref());
        params
    }
}

/// New spot order.
///
/// LIMIT orders need `price`, MARKET orders only `quantity`, stop orders
/// `stop_price`. Tick and lot sizes are not checked client-side.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateOrderParams {
    pub market: SymbolParams,
    pub side: Side,
    pub order_type: OrderType,
    pub quantity: Decimal,
    pub new_client_order_id: Option<String>,
    pub price: Option<Decimal>,
    pub stop_price: Option<Decimal>,
}

impl CreateOrderParams {
    pub fn limit(symbol: impl Into<String>, side: Side, quantity: Decimal, price: Decimal) -> Self {
        Self {
            market: SymbolParams::symbol(symbol),
            side,
            order_type: OrderType::Limit,
            quantity,
            new_client_order_id: None,
            price: Some(price),
            stop_price: None,
        }
    }

    pub fn market(symbol: impl Into<String>, side: Side, quantity: Decimal) -> Self {
        Self {
            market: SymbolParams::symbol(symbol),
            side,
            order_type: OrderType::Market,
            quantity,
            new_client_order_id: None,
            price: None,
            stop_price: None,
        }
    }
}

impl ToParams for CreateOrderParams {
    fn to_params(&self) -> ParameterRecord {
        let mut params = self.market.to_params();
        params
            .push("side", self.side)
            .push("type", self.order_type)
            .push("quantity", self.quantity)
            .push_opt("newClientOrderId", self.new_client_order_id.as_deref())
            .push_opt("price", self.price)
            .push_opt("stopPrice", self.stop_price);
        params
    }
}

/// Identify the order by `order_id` or `orig_client_order_id`;
/// `order_id` wins if both are set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CancelOrderParams {
    pub market: SymbolParams,
    pub order_id: Option<i64>,
    pub orig_client_order_id: Option<String>,
}

impl ToParams for CancelOrderParams {
    fn to_params(&self) -> ParameterRecord {
        let mut params = self.market.to_params();
        params
            .push_opt("orderId", self.order_id)
            .push_opt("origClientOrderId", self.orig_client_order_id.as_deref());
        params
    }
}

/// Cancel every open order of a market, or of the account without a market
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CancelOrderBulkParams {
    pub market: SymbolParams,
}

impl ToParams for CancelOrderBulkParams {
    fn to_params(&self) -> ParameterRecord {
        self.market.to_params()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GetOpenOrdersParams {
    pub market: SymbolParams,
}

impl ToParams for GetOpenOrdersParams {
    fn to_params(&self) -> ParameterRecord {
        self.market.to_params()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GetOrderStatusParams {
    pub order_id: Option<i64>,
    pub orig_client_order_id: Option<String>,
}

impl ToParams for GetOrderStatusParams {
    fn to_params(&self) -> ParameterRecord {
        let mut params = ParameterRecord::new();
        params
            .push_opt("orderId", self.order_id)
            .push_opt("origClientOrderId", self.orig_client_order_id.as_deref());
        params
    }
}

/// Order history filter; times are Unix milliseconds
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GetUserOrdersHistoryParams {
    pub market: SymbolParams,
    pub start_time: Option<i64>,
    pub end_time: Option<i64>,
    pub limit: Option<u32>,
}

impl ToParams for GetUserOrdersHistoryParams {
    fn to_params(&self) -> ParameterRecord {
        let mut params = self.market.to_params();
        params
            .push_opt("startTime", self.start_time)
            .push_opt("endTime", self.end_time)
            .push_opt("limit", self.limit);
        params
    }
}

/// History filter narrowed to the trades of one order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GetUserTradesParams {
    pub history: GetUserOrdersHistoryParams,
    pub order_id: Option<i64>,
}

impl ToParams for GetUserTradesParams {
    fn to_params(&self) -> ParameterRecord {
        let mut params = self.history.to_params();
        params.push_opt("orderId", self.order_id);
        params
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn keys(params: &impl ToParams) -> Vec<String> {
        params
            .to_params()
            .iter()
            .map(|(key, _)| key.to_string())
            .collect()
    }

    #[test]
    fn test_symbol_params_omit_missing_fields() {
        assert_eq!(keys(&SymbolParams::symbol("BTCIRT")), vec!["symbol"]);
        assert_eq!(
            keys(&SymbolParams::tabdeal_symbol("BTC_IRT")),
            vec!["tabdealSymbol"]
        );
        assert!(SymbolParams::default().to_params().is_empty());
    }

    #[test]
    fn test_create_order_wire_order() {
        let mut order = CreateOrderParams::limit(
            "BTCIRT",
            Side::Buy,
            Decimal::from_str("0.01").unwrap(),
            Decimal::from(950_000_000),
        );
        order.new_client_order_id = Some("order-001".to_string());

        assert_eq!(
            order.to_params().encode().unwrap(),
            "symbol=BTCIRT&side=BUY&type=LIMIT&quantity=0.01&newClientOrderId=order-001&price=950000000"
        );
    }

    #[test]
    fn test_market_order_has_no_price() {
        let order = CreateOrderParams::market("ETHUSDT", Side::Sell, Decimal::from(2));
        assert_eq!(
            order.to_params().encode().unwrap(),
            "symbol=ETHUSDT&side=SELL&type=MARKET&quantity=2"
        );
    }

    #[test]
    fn test_user_trades_extends_history_fields() {
        let params = GetUserTradesParams {
            history: GetUserOrdersHistoryParams {
                market: SymbolParams::symbol("BTCIRT"),
                start_time: Some(1_700_000_000_000),
                end_time: None,
                limit: Some(50),
            },
            order_id: Some(42),
        };

        assert_eq!(
            params.to_params().encode().unwrap(),
            "symbol=BTCIRT&startTime=1700000000000&limit=50&orderId=42"
        );
    }

    #[test]
    fn test_cancel_order_params() {
        let params = CancelOrderParams {
            market: SymbolParams::symbol("BTCIRT"),
            order_id: Some(1_234_567),
            orig_client_order_id: None,
        };
        assert_eq!(keys(&params), vec!["symbol", "orderId"]);

        let by_client_id = GetOrderStatusParams {
            order_id: None,
            orig_client_order_id: Some("order-001".to_string()),
        };
        assert_eq!(keys(&by_client_id), vec!["origClientOrderId"]);
    }
}
