/*
[INPUT]:  Market selectors and query limits
[OUTPUT]: Market data (server time, market info, depth, recent trades)
[POS]:    HTTP layer - public market data endpoints (no auth required)
[UPDATE]: When adding new public endpoints or changing response format
*/

use crate::http::{Result, TabdealClient, ToParams};
use crate::types::{
    GetOrderBookParams, GetRecentTradesParams, MarketInformation, OrderBook, ServerTime, Trade,
};
use reqwest::Method;

impl TabdealClient {
    /// Check connectivity
    ///
    /// GET /r/api/v1/ping
    pub async fn ping(&self) -> Result<bool> {
        self.execute_unit(Method::GET, "/ping", false, None).await?;
        Ok(true)
    }

    /// Query server time in Unix milliseconds
    ///
    /// GET /r/api/v1/time
    pub async fn get_server_time(&self) -> Result<ServerTime> {
        self.execute(Method::GET, "/time", false, None).await
    }

    /// Query all markets with their precision, permissions and filters
    ///
    /// GET /r/api/v1/exchangeInfo
    pub async fn get_market_information(&self) -> Result<Vec<MarketInformation>> {
        self.execute(Method::GET, "/exchangeInfo", false, None).await
    }

    /// Query order book depth
    ///
    /// GET /r/api/v1/depth?symbol={symbol}&limit={limit}
    pub async fn get_order_book(&self, params: &GetOrderBookParams) -> Result<OrderBook> {
        self.execute(Method::GET, "/depth", false, Some(params.to_params()))
            .await
    }

    /// Query most recent trades, newest first
    ///
    /// GET /r/api/v1/trades?symbol={symbol}&limit={limit}
    pub async fn get_recent_trades(&self, params: &GetRecentTradesParams) -> Result<Vec<Trade>> {
        self.execute(Method::GET, "/trades", false, Some(params.to_params()))
            .await
    }
}

#[cfg(test)]
mod tests {
    use crate::http::{ClientConfig, TabdealClient, TabdealError};
    use crate::types::{GetOrderBookParams, GetRecentTradesParams, SymbolParams};
    use rust_decimal::Decimal;
    use std::str::FromStr;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(server: &MockServer) -> TabdealClient {
        TabdealClient::with_config(ClientConfig::default().with_base_url(server.uri()))
            .expect("client init")
    }

    #[tokio::test]
    async fn test_ping() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/r/api/v1/ping"))
            .respond_with(ResponseTemplate::new(200).set_body_raw("{}", "application/json"))
            .expect(1)
            .mount(&server)
            .await;

        assert!(client_for(&server).ping().await.expect("ping failed"));
    }

    #[tokio::test]
    async fn test_get_server_time() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/r/api/v1/time"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_raw(r#"{"serverTime": 1700000000000}"#, "application/json"),
            )
            .expect(1)
            .mount(&server)
            .await;

        let time = client_for(&server)
            .get_server_time()
            .await
            .expect("get_server_time failed");
        assert_eq!(time.server_time, 1_700_000_000_000);
    }

    #[tokio::test]
    async fn test_get_market_information() {
        let server = MockServer::start().await;
        let mock_response = r#"[
            {
                "symbol": "BTCIRT",
                "tabdealSymbol": "BTC_IRT",
                "status": "TRADING",
                "baseAsset": "BTC",
                "baseAssetPrecision": "8",
                "quoteAsset": "IRT",
                "quoteAssetPrecision": "0",
                "orderTypes": ["LIMIT", "MARKET"],
                "isSpotTradingAllowed": true,
                "filters": [{"filterType": "LOT_SIZE", "minQty": "0.0001", "stepSize": "0.0001"}],
                "permissions": ["SPOT"]
            }
        ]"#;
        Mock::given(method("GET"))
            .and(path("/r/api/v1/exchangeInfo"))
            .respond_with(ResponseTemplate::new(200).set_body_raw(mock_response, "application/json"))
            .expect(1)
            .mount(&server)
            .await;

        let markets = client_for(&server)
            .get_market_information()
            .await
            .expect("get_market_information failed");

        assert_eq!(markets.len(), 1);
        assert_eq!(markets[0].symbol, "BTCIRT");
        assert_eq!(markets[0].order_types, vec!["LIMIT", "MARKET"]);
        assert_eq!(markets[0].filters[0].step_size.as_deref(), Some("0.0001"));
    }

    #[tokio::test]
    async fn test_get_order_book() {
        let server = MockServer::start().await;
        let mock_response = r#"{
            "asks": [["100.5", "1.2"], ["101.0", "2.0"]],
            "bids": [["99.5", "1.0"]]
        }"#;
        Mock::given(method("GET"))
            .and(path("/r/api/v1/depth"))
            .and(query_param("symbol", "BTCIRT"))
            .and(query_param("limit", "5"))
            .respond_with(ResponseTemplate::new(200).set_body_raw(mock_response, "application/json"))
            .expect(1)
            .mount(&server)
            .await;

        let params = GetOrderBookParams {
            market: SymbolParams::symbol("BTCIRT"),
            limit: Some(5),
        };
        let book = client_for(&server)
            .get_order_book(&params)
            .await
            .expect("get_order_book failed");

        assert_eq!(book.asks.len(), 2);
        assert_eq!(
            book.best_bid(),
            Some((
                Decimal::from_str("99.5").unwrap(),
                Decimal::from_str("1.0").unwrap()
            ))
        );
    }

    #[tokio::test]
    async fn test_get_recent_trades() {
        let server = MockServer::start().await;
        let mock_response = r#"[
            {"id": 2, "price": "101.5", "qty": "0.3", "quoteQty": "30.45", "time": 1700000000500, "isBuyerMaker": false},
            {"id": 1, "price": "101.0", "qty": "1", "quoteQty": "101", "time": 1700000000000, "isBuyerMaker": true}
        ]"#;
        Mock::given(method("GET"))
            .and(path("/r/api/v1/trades"))
            .and(query_param("tabdealSymbol", "BTC_IRT"))
            .respond_with(ResponseTemplate::new(200).set_body_raw(mock_response, "application/json"))
            .expect(1)
            .mount(&server)
            .await;

        let params = GetRecentTradesParams {
            market: SymbolParams::tabdeal_symbol("BTC_IRT"),
            limit: None,
        };
        let trades = client_for(&server)
            .get_recent_trades(&params)
            .await
            .expect("get_recent_trades failed");

        assert_eq!(trades.len(), 2);
        assert_eq!(trades[0].id, 2);
        assert_eq!(trades[0].price, Decimal::from_str("101.5").unwrap());
        assert!(trades[1].is_buyer_maker);
    }

    #[tokio::test]
    async fn test_public_endpoint_api_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/r/api/v1/depth"))
            .respond_with(ResponseTemplate::new(400).set_body_raw(
                r#"{"code": -1121, "msg": "Invalid symbol."}"#,
                "application/json",
            ))
            .mount(&server)
            .await;

        let err = client_for(&server)
            .get_order_book(&GetOrderBookParams {
                market: SymbolParams::symbol("NOPE"),
                limit: None,
            })
            .await
            .unwrap_err();

        match err {
            TabdealError::Api(api) => {
                assert_eq!(api.status, 400);
                assert_eq!(api.code, -1121);
                assert_eq!(api.message, "Invalid symbol.");
            }
            other => panic!("Expected Api error variant, got {other:?}"),
        }
    }
}
