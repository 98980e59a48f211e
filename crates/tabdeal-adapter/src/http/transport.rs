/*
[INPUT]:  Fully built request (method, URL with query, headers)
[OUTPUT]: Raw HTTP status and response body
[POS]:    HTTP layer - pluggable network execution behind the client
[UPDATE]: When changing connection options or adding transports
*/

use std::fmt::Debug;

use async_trait::async_trait;
use reqwest::{Client, Method, Url};

use crate::http::config::ClientConfig;
use crate::http::error::{Operation, Result, TabdealError};

/// A single outgoing request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub method: Method,
    pub url: String,
    pub headers: Vec<(String, String)>,
}

/// Raw response as received from the server
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Executes one HTTP request.
///
/// Failures must be reported as [`TabdealError::Transport`] labelled with
/// [`Operation::CreatingRequest`], [`Operation::SendingRequest`] or
/// [`Operation::ReadingResponse`]. Non-2xx statuses are not failures here.
#[async_trait]
pub trait HttpTransport: Debug + Send + Sync {
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse>;
}

/// Default transport backed by a pooled reqwest client
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    http_client: Client,
}

impl ReqwestTransport {
    /// Build a reqwest client with the configured timeouts
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let http_client = Client::builder()
            .timeout(config.timeout)
            .connect_timeout(config.connect_timeout)
            .build()
            .map_err(|e| TabdealError::Config(format!("failed to build HTTP client: {e}")))?;

        Ok(Self { http_client })
    }

    /// Wrap an existing reqwest client
    pub fn from_client(http_client: Client) -> Self {
        Self { http_client }
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse> {
        let url = Url::parse(&request.url)
            .map_err(|e| TabdealError::transport(Operation::CreatingRequest, e))?;

        let mut builder = self.http_client.request(request.method, url);
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        let built = builder
            .build()
            .map_err(|e| TabdealError::transport(Operation::CreatingRequest, e))?;

        let response = self
            .http_client
            .execute(built)
            .await
            .map_err(|e| TabdealError::transport(Operation::SendingRequest, e))?;

        let status = response.status().as_u16();
        let body = response
            .bytes()
            .await
            .map_err(|e| TabdealError::transport(Operation::ReadingResponse, e))?;

        Ok(HttpResponse {
            status,
            body: body.to_vec(),
        })
    }
}
