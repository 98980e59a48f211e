/*
[INPUT]:  Request parameter record, API secret and millisecond timestamp
[OUTPUT]: Parameter record extended with `timestamp` and HMAC-SHA256 `signature`
[POS]:    HTTP layer - request signing for authenticated endpoints
[UPDATE]: When changing signing algorithm or canonical string format
*/

use std::fmt;

use chrono::Utc;
use hmac::{Hmac, Mac};
use sha2::Sha256;

use crate::http::error::{EncodingError, Result, TabdealError};
use crate::http::params::ParameterRecord;

type HmacSha256 = Hmac<Sha256>;

/// Keys appended by the signer; callers may not supply them
pub const RESERVED_KEYS: [&str; 2] = ["timestamp", "signature"];

/// Signs query parameters for authenticated endpoints
#[derive(Clone)]
pub struct RequestSigner {
    secret: String,
}

impl fmt::Debug for RequestSigner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RequestSigner")
            .field("secret", &"<redacted>")
            .finish()
    }
}

impl RequestSigner {
    /// Create a new request signer keyed with the API secret
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
        }
    }

    /// Sign a parameter record.
    ///
    /// Canonical string: `k1=v1&k2=v2&...&timestamp={timestamp}` in the
    /// record's own order. Returns the record followed by `timestamp` and the
    /// hex-encoded HMAC-SHA256 `signature`. A record that already holds
    /// either key is rejected with an [`EncodingError`].
    pub fn sign(&self, params: &ParameterRecord, timestamp: u64) -> Result<ParameterRecord> {
        if let Some(key) = RESERVED_KEYS
            .iter()
            .copied()
            .find(|key| params.get(key).is_some())
        {
            return Err(EncodingError::new(key, "reserved for request signing").into());
        }

        let mut signed = params.clone();
        signed.push("timestamp", timestamp);

        let canonical = signed.canonical_string()?;
        let signature = compute_signature(&self.secret, &canonical)?;

        signed.push("signature", signature);
        Ok(signed)
    }
}

/// Hex-encoded HMAC-SHA256 of `data` keyed with `secret`
pub fn compute_signature(secret: &str, data: &str) -> Result<String> {
    let mut mac = HmacSha256::new_from_slice(secret.as_bytes())
        .map_err(|e| TabdealError::Authentication(format!("invalid api secret: {e}")))?;
    mac.update(data.as_bytes());
    Ok(hex::encode(mac.finalize().into_bytes()))
}

/// Current wall-clock time in Unix milliseconds
pub fn current_timestamp_ms() -> u64 {
    u64::try_from(Utc::now().timestamp_millis()).unwrap_or_default()
}
