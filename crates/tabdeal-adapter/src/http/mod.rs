/*
[INPUT]:  HTTP client configuration and API endpoints
[OUTPUT]: HTTP responses and typed API results
[POS]:    HTTP layer - REST API communication
[UPDATE]: When adding new endpoints or changing client behavior
*/

pub mod client;
pub mod config;
pub mod error;
pub mod params;
pub mod public;
pub mod signature;
pub mod trade;
pub mod transport;
pub mod user;

pub use error::{ApiError, EncodingError, Operation, Result, TabdealError, classify};
pub use params::{ParamValue, ParameterRecord, ToParams};
pub use signature::{RequestSigner, compute_signature};
pub use transport::{HttpRequest, HttpResponse, HttpTransport, ReqwestTransport};

pub use client::{API_KEY_HEADER, TabdealClient};
pub use config::ClientConfig;
