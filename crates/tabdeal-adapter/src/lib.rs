/*
[INPUT]:  Crate modules and public type definitions
[OUTPUT]: Public Tabdeal adapter crate surface
[POS]:    Crate root - module wiring
[UPDATE]: When public modules or exports change
*/

pub mod http;
pub mod types;

// Re-export commonly used types from http
pub use http::{
    ApiError,
    ClientConfig,
    HttpTransport,
    Operation,
    ParamValue,
    ParameterRecord,
    RequestSigner,
    Result,
    TabdealClient,
    TabdealError,
    ToParams,
};

// Re-export all types
pub use types::*;
