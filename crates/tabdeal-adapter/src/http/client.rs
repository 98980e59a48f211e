/*
[INPUT]:  HTTP verb, endpoint path, auth flag and request parameters
[OUTPUT]: Decoded API results or structured errors
[POS]:    HTTP layer - core client: routing, signing, dispatch, response handling
[UPDATE]: When changing routing rules, auth headers or response handling
*/

use std::sync::Arc;

use reqwest::Method;
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use crate::http::config::ClientConfig;
use crate::http::error::{Operation, Result, TabdealError, classify};
use crate::http::params::ParameterRecord;
use crate::http::signature::{RequestSigner, current_timestamp_ms};
use crate::http::transport::{HttpRequest, HttpTransport, ReqwestTransport};

/// Header carrying the API key on authenticated calls
pub const API_KEY_HEADER: &str = "X-MBX-APIKEY";

/// Main HTTP client for the Tabdeal API.
///
/// Holds no per-call state; share it freely across tasks.
#[derive(Debug, Clone)]
pub struct TabdealClient {
    config: ClientConfig,
    transport: Arc<dyn HttpTransport>,
}

impl TabdealClient {
    /// Create an unauthenticated client with default configuration
    pub fn new() -> Result<Self> {
        Self::with_config(ClientConfig::default())
    }

    /// Create a new client with custom configuration
    pub fn with_config(config: ClientConfig) -> Result<Self> {
        let transport = ReqwestTransport::new(&config)?;
        Self::with_transport(config, Arc::new(transport))
    }

    /// Create a client that dispatches through a custom transport
    pub fn with_transport(
        mut config: ClientConfig,
        transport: Arc<dyn HttpTransport>,
    ) -> Result<Self> {
        config.base_url = config.base_url.trim_end_matches('/').to_string();
        Url::parse(&config.base_url)?;

        Ok(Self { config, transport })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Whether both the API key and secret are configured
    pub fn is_authenticated(&self) -> bool {
        self.config.has_credentials()
    }

    /// Build the full URL for an endpoint.
    ///
    /// GET requests go through the read path `{base}/r/api/{version}`, every
    /// other verb through `{base}/api/{version}`. `endpoint` must start with `/`.
    pub fn api_url(&self, method: &Method, endpoint: &str) -> String {
        let prefix = if *method == Method::GET { "/r/api" } else { "/api" };
        if self.config.version.is_empty() {
            format!("{}{prefix}{endpoint}", self.config.base_url)
        } else {
            format!(
                "{}{prefix}/{}{endpoint}",
                self.config.base_url, self.config.version
            )
        }
    }

    fn assert_auth(&self) -> Result<()> {
        if self.config.api_key.is_empty() {
            return Err(TabdealError::Authentication("api key is empty".to_string()));
        }
        if self.config.api_secret.is_empty() {
            return Err(TabdealError::Authentication(
                "api secret is empty".to_string(),
            ));
        }
        Ok(())
    }

    /// Send a request and return the raw body of a 2xx response.
    ///
    /// Parameters always travel in the query string, signed first when
    /// `auth` is set. Non-2xx responses become [`TabdealError::Api`].
    pub async fn send_raw(
        &self,
        method: Method,
        endpoint: &str,
        auth: bool,
        params: Option<ParameterRecord>,
    ) -> Result<Vec<u8>> {
        if auth {
            self.assert_auth()?;
        }

        let mut url = self.api_url(&method, endpoint);
        if let Some(params) = params {
            let params = if auth {
                RequestSigner::new(self.config.api_secret.as_str())
                    .sign(&params, current_timestamp_ms())?
            } else {
                params
            };
            let query = params.encode()?;
            if !query.is_empty() {
                url.push('?');
                url.push_str(&query);
            }
        }

        // Content-Type kept for wire compatibility; the body is always empty
        let mut headers = vec![
            ("Content-Type".to_string(), "application/json".to_string()),
            ("Accept".to_string(), "application/json".to_string()),
        ];
        if auth {
            headers.push((API_KEY_HEADER.to_string(), self.config.api_key.clone()));
        }

        debug!(method = %method, endpoint, signed = auth, "sending Tabdeal request");

        let response = self
            .transport
            .execute(HttpRequest {
                method,
                url,
                headers,
            })
            .await?;

        debug!(status = response.status, endpoint, "received Tabdeal response");

        if !response.is_success() {
            return Err(classify(response.status, &response.body).into());
        }
        Ok(response.body)
    }

    /// Send a request and decode the JSON body into `T`
    pub async fn execute<T: DeserializeOwned>(
        &self,
        method: Method,
        endpoint: &str,
        auth: bool,
        params: Option<ParameterRecord>,
    ) -> Result<T> {
        let body = self.send_raw(method, endpoint, auth, params).await?;
        serde_json::from_slice(&body)
            .map_err(|e| TabdealError::transport(Operation::ParsingResponse, e))
    }

    /// Send a request whose response body is not needed
    pub async fn execute_unit(
        &self,
        method: Method,
        endpoint: &str,
        auth: bool,
        params: Option<ParameterRecord>,
    ) -> Result<()> {
        self.send_raw(method, endpoint, auth, params).await.map(|_| ())
    }
}
