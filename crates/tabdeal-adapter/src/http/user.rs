/*
[INPUT]:  Account query parameters and API key/secret
[OUTPUT]: User account data (wallets, orders, trades)
[POS]:    HTTP layer - user data endpoints (require signed requests)
[UPDATE]: When adding new user endpoints or changing query parameters
*/

// ### User Endpoints

use crate::http::{Result, TabdealClient, ToParams};
use crate::types::{
    BaseOrderResponse, GetOpenOrdersParams, GetOrderStatusParams, GetUserOrdersHistoryParams,
    GetUserTradesParams, GetWalletParams, OrderStatusResponse, UserTradeResponse, Wallet,
};
use reqwest::Method;

impl TabdealClient {
    /// Query funding wallet balances
    ///
    /// GET /api/v1/get-funding-asset?asset={asset}
    pub async fn get_wallets(&self, params: &GetWalletParams) -> Result<Vec<Wallet>> {
        self.execute(
            Method::GET,
            "/get-funding-asset",
            true,
            Some(params.to_params()),
        )
        .await
    }

    /// Query historical orders
    ///
    /// GET /api/v1/allOrders?symbol={symbol}&startTime={start}&endTime={end}&limit={limit}
    pub async fn get_orders_history(
        &self,
        params: &GetUserOrdersHistoryParams,
    ) -> Result<Vec<BaseOrderResponse>> {
        self.execute(Method::GET, "/allOrders", true, Some(params.to_params()))
            .await
    }

    /// Query currently open orders
    ///
    /// GET /api/v1/openOrders?symbol={symbol}
    pub async fn get_open_orders(
        &self,
        params: &GetOpenOrdersParams,
    ) -> Result<Vec<BaseOrderResponse>> {
        self.execute(Method::GET, "/openOrders", true, Some(params.to_params()))
            .await
    }

    /// Query the status of a single order
    ///
    /// GET /api/v1/order?orderId={id} or ?origClientOrderId={client_id}
    pub async fn get_order_status(
        &self,
        params: &GetOrderStatusParams,
    ) -> Result<OrderStatusResponse> {
        self.execute(Method::GET, "/order", true, Some(params.to_params()))
            .await
    }

    /// Query the account's own trades
    ///
    /// GET /api/v1/myTrades?symbol={symbol}&orderId={id}
    pub async fn get_user_trades(
        &self,
        params: &GetUserTradesParams,
    ) -> Result<Vec<UserTradeResponse>> {
        self.execute(Method::GET, "/myTrades", true, Some(params.to_params()))
            .await
    }
}
