/*
[INPUT]:  Order parameters and API key/secret
[OUTPUT]: Order responses and cancellation confirmations
[POS]:    HTTP layer - trading endpoints (require signed requests)
[UPDATE]: When adding new trading endpoints or changing order flow
*/

use crate::http::{Result, TabdealClient, ToParams};
use crate::types::{
    CancelOrderBulkParams, CancelOrderParams, CancelOrderResponse, CreateOrderParams,
    CreateOrderResponse,
};
use reqwest::Method;

impl TabdealClient {
    /// Create a new order
    ///
    /// POST /api/v1/order
    /// Parameters are sent signed in the query string, not as a body.
    pub async fn create_order(&self, params: &CreateOrderParams) -> Result<CreateOrderResponse> {
        self.execute(Method::POST, "/order", true, Some(params.to_params()))
            .await
    }

    /// Cancel a single active order
    ///
    /// DELETE /api/v1/order?symbol={symbol}&orderId={id}
    pub async fn cancel_order(&self, params: &CancelOrderParams) -> Result<CancelOrderResponse> {
        self.execute(Method::DELETE, "/order", true, Some(params.to_params()))
            .await
    }

    /// Cancel all open orders of a market
    ///
    /// DELETE /api/v1/openOrders?symbol={symbol}
    pub async fn cancel_order_bulk(
        &self,
        params: &CancelOrderBulkParams,
    ) -> Result<Vec<CancelOrderResponse>> {
        self.execute(Method::DELETE, "/openOrders", true, Some(params.to_params()))
            .await
    }
}
