/*
[INPUT]:  Typed request parameters (via ToParams) or dynamic JSON objects
[OUTPUT]: Ordered parameter records, URL query strings and canonical signing strings
[POS]:    HTTP layer - parameter encoding shared by query building and signing
[UPDATE]: When adding scalar kinds or changing query escaping
*/

use std::fmt;

use rust_decimal::Decimal;
use serde_json::Value;
use url::form_urlencoded;

use crate::http::error::EncodingError;

/// A single scalar parameter value
#[derive(Debug, Clone, PartialEq)]
pub enum ParamValue {
    Str(String),
    Int(i64),
    UInt(u64),
    Float(f64),
    Decimal(Decimal),
    Bool(bool),
}

impl ParamValue {
    /// Whether the value is the zero value of its kind (`""`, `0`, `false`)
    pub fn is_empty(&self) -> bool {
        match self {
            ParamValue::Str(value) => value.is_empty(),
            ParamValue::Int(value) => *value == 0,
            ParamValue::UInt(value) => *value == 0,
            ParamValue::Float(value) => *value == 0.0,
            ParamValue::Decimal(value) => value.is_zero(),
            ParamValue::Bool(value) => !value,
        }
    }

    /// Render the value in its natural scalar text form
    pub fn render(&self, key: &str) -> Result<String, EncodingError> {
        match self {
            ParamValue::Float(value) if !value.is_finite() => Err(EncodingError::new(
                key,
                format!("non-finite float {value}"),
            )),
            other => Ok(other.to_string()),
        }
    }
}

impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamValue::Str(value) => f.write_str(value),
            ParamValue::Int(value) => write!(f, "{value}"),
            ParamValue::UInt(value) => write!(f, "{value}"),
            ParamValue::Float(value) => write!(f, "{value}"),
            ParamValue::Decimal(value) => write!(f, "{value}"),
            ParamValue::Bool(value) => write!(f, "{value}"),
        }
    }
}

impl From<&str> for ParamValue {
    fn from(value: &str) -> Self {
        ParamValue::Str(value.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(value: String) -> Self {
        ParamValue::Str(value)
    }
}

impl From<&String> for ParamValue {
    fn from(value: &String) -> Self {
        ParamValue::Str(value.clone())
    }
}

impl From<i64> for ParamValue {
    fn from(value: i64) -> Self {
        ParamValue::Int(value)
    }
}

impl From<i32> for ParamValue {
    fn from(value: i32) -> Self {
        ParamValue::Int(i64::from(value))
    }
}

impl From<u64> for ParamValue {
    fn from(value: u64) -> Self {
        ParamValue::UInt(value)
    }
}

impl From<u32> for ParamValue {
    fn from(value: u32) -> Self {
        ParamValue::UInt(u64::from(value))
    }
}

impl From<f64> for ParamValue {
    fn from(value: f64) -> Self {
        ParamValue::Float(value)
    }
}

impl From<Decimal> for ParamValue {
    fn from(value: Decimal) -> Self {
        ParamValue::Decimal(value)
    }
}

impl From<bool> for ParamValue {
    fn from(value: bool) -> Self {
        ParamValue::Bool(value)
    }
}

/// Ordered mapping from wire name to scalar value.
///
/// Insertion order is the encoding order, and therefore the signing order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParameterRecord {
    pairs: Vec<(String, ParamValue)>,
}

impl ParameterRecord {
    /// Create an empty record
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a field unconditionally
    pub fn push(&mut self, key: impl Into<String>, value: impl Into<ParamValue>) -> &mut Self {
        self.pairs.push((key.into(), value.into()));
        self
    }

    /// Append a field only when it is present
    pub fn push_opt<V: Into<ParamValue>>(
        &mut self,
        key: impl Into<String>,
        value: Option<V>,
    ) -> &mut Self {
        if let Some(value) = value {
            self.push(key, value);
        }
        self
    }

    /// Append a field only when it is not the zero value of its kind
    pub fn push_non_empty(
        &mut self,
        key: impl Into<String>,
        value: impl Into<ParamValue>,
    ) -> &mut Self {
        let value = value.into();
        if !value.is_empty() {
            self.pairs.push((key.into(), value));
        }
        self
    }

    /// Append every field of another record, keeping its order
    pub fn extend(&mut self, other: ParameterRecord) -> &mut Self {
        self.pairs.extend(other.pairs);
        self
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Look up the first value stored under `key`
    pub fn get(&self, key: &str) -> Option<&ParamValue> {
        self.pairs
            .iter()
            .find(|(name, _)| name == key)
            .map(|(_, value)| value)
    }

    /// Iterate fields in encoding order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ParamValue)> {
        self.pairs.iter().map(|(key, value)| (key.as_str(), value))
    }

    /// Unescaped `key=value&...` join used as HMAC input
    pub fn canonical_string(&self) -> Result<String, EncodingError> {
        let pairs = self
            .pairs
            .iter()
            .map(|(key, value)| Ok(format!("{key}={}", value.render(key)?)))
            .collect::<Result<Vec<_>, EncodingError>>()?;
        Ok(pairs.join("&"))
    }

    /// URL-safe `key=value&...` query string
    pub fn encode(&self) -> Result<String, EncodingError> {
        let pairs = self
            .pairs
            .iter()
            .map(|(key, value)| {
                let rendered = value.render(key)?;
                Ok(format!("{}={}", escape(key), escape(&rendered)))
            })
            .collect::<Result<Vec<_>, EncodingError>>()?;
        Ok(pairs.join("&"))
    }

    /// Build a record from a flat JSON object.
    ///
    /// `null` members are omitted; nested arrays or objects are rejected.
    pub fn from_json(value: &Value) -> Result<Self, EncodingError> {
        let object = match value {
            Value::Null => return Ok(Self::new()),
            Value::Object(object) => object,
            other => {
                return Err(EncodingError::new(
                    "",
                    format!("expected a JSON object, got {}", json_kind(other)),
                ));
            }
        };

        let mut record = Self::new();
        for (key, member) in object {
            match member {
                Value::Null => {}
                Value::String(value) => {
                    record.push(key.as_str(), value.as_str());
                }
                Value::Bool(value) => {
                    record.push(key.as_str(), *value);
                }
                Value::Number(number) => {
                    let value = if let Some(value) = number.as_i64() {
                        ParamValue::Int(value)
                    } else if let Some(value) = number.as_u64() {
                        ParamValue::UInt(value)
                    } else {
                        ParamValue::Float(number.as_f64().unwrap_or(f64::NAN))
                    };
                    record.push(key.as_str(), value);
                }
                nested => {
                    return Err(EncodingError::new(
                        key,
                        format!("{} is not a scalar", json_kind(nested)),
                    ));
                }
            }
        }
        Ok(record)
    }
}

impl<'a> IntoIterator for &'a ParameterRecord {
    type Item = &'a (String, ParamValue);
    type IntoIter = std::slice::Iter<'a, (String, ParamValue)>;

    fn into_iter(self) -> Self::IntoIter {
        self.pairs.iter()
    }
}

/// Explicit field enumeration for request parameter types.
///
/// Implementations list fields in wire order with their wire names and
/// drop the ones that should be omitted when empty.
pub trait ToParams {
    fn to_params(&self) -> ParameterRecord;
}

impl ToParams for ParameterRecord {
    fn to_params(&self) -> ParameterRecord {
        self.clone()
    }
}

fn escape(raw: &str) -> String {
    form_urlencoded::byte_serialize(raw.as_bytes()).collect()
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample() -> ParameterRecord {
        let mut record = ParameterRecord::new();
        record
            .push("symbol", "BTCIRT")
            .push("limit", 20_i64)
            .push("price", Decimal::new(9_500_000, 1))
            .push("isWorking", true);
        record
    }

    #[test]
    fn test_empty_record_encodes_to_empty_string() {
        let record = ParameterRecord::new();
        assert_eq!(record.encode().unwrap(), "");
        assert_eq!(record.canonical_string().unwrap(), "");
    }

    #[test]
    fn test_encode_preserves_insertion_order() {
        let record = sample();
        assert_eq!(
            record.encode().unwrap(),
            "symbol=BTCIRT&limit=20&price=950000.0&isWorking=true"
        );

        let mut reversed = ParameterRecord::new();
        reversed.push("b", "2").push("a", "1");
        assert_eq!(reversed.encode().unwrap(), "b=2&a=1");
    }

    #[test]
    fn test_encode_is_deterministic() {
        let record = sample();
        let first = record.encode().unwrap();
        for _ in 0..10 {
            assert_eq!(record.encode().unwrap(), first);
        }
    }

    #[test]
    fn test_query_is_escaped_but_canonical_is_not() {
        let mut record = ParameterRecord::new();
        record.push("newClientOrderId", "a b&c");

        assert_eq!(record.encode().unwrap(), "newClientOrderId=a+b%26c");
        assert_eq!(record.canonical_string().unwrap(), "newClientOrderId=a b&c");
    }

    #[test]
    fn test_push_opt_and_push_non_empty_omit_fields() {
        let mut record = ParameterRecord::new();
        record
            .push_opt("symbol", Some("BTCIRT"))
            .push_opt::<String>("tabdealSymbol", None)
            .push_non_empty("orderId", 0_i64)
            .push_non_empty("origClientOrderId", "")
            .push_non_empty("limit", 5_u32);

        let keys: Vec<&str> = record.iter().map(|(key, _)| key).collect();
        assert_eq!(keys, vec!["symbol", "limit"]);
    }

    #[test]
    fn test_non_finite_float_fails_to_encode() {
        let mut record = ParameterRecord::new();
        record.push("quantity", f64::NAN);

        let err = record.encode().unwrap_err();
        assert_eq!(err.key, "quantity");
        assert!(record.canonical_string().is_err());
    }

    #[test]
    fn test_from_json_keeps_order_and_skips_null() {
        let value = json!({"symbol": "BTCIRT", "limit": 5, "asset": null, "flag": false});
        let record = ParameterRecord::from_json(&value).unwrap();
        assert_eq!(record.encode().unwrap(), "symbol=BTCIRT&limit=5&flag=false");
    }

    #[test]
    fn test_from_json_rejects_nested_values() {
        let err = ParameterRecord::from_json(&json!({"symbol": "BTCIRT", "filters": [1, 2]}))
            .unwrap_err();
        assert_eq!(err.key, "filters");

        assert!(ParameterRecord::from_json(&json!({"inner": {"a": 1}})).is_err());
        assert!(ParameterRecord::from_json(&json!("BTCIRT")).is_err());
        assert!(ParameterRecord::from_json(&Value::Null).unwrap().is_empty());
    }

    #[test]
    fn test_get_and_extend() {
        let mut record = ParameterRecord::new();
        record.push("symbol", "BTCIRT");
        let mut extra = ParameterRecord::new();
        extra.push("limit", 10_i64);
        record.extend(extra);

        assert_eq!(record.len(), 2);
        assert_eq!(record.get("limit"), Some(&ParamValue::Int(10)));
        assert!(record.get("missing").is_none());
    }
}
