/*
[INPUT]:  Loosely typed JSON numbers and depth arrays from API responses
[OUTPUT]: Decimal values and (price, quantity) levels for serde fields
[POS]:    Data layer - shared deserialization helpers
[UPDATE]: When the API changes how amounts or levels are encoded
*/

use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Accepts decimal strings, JSON numbers, `""` and `null` (zero)
pub fn deserialize_decimal_or_zero<'de, D>(deserializer: D) -> Result<Decimal, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    if value.is_null() {
        return Ok(Decimal::ZERO);
    }

    if let Some(raw) = value.as_str() {
        if raw.trim().is_empty() {
            return Ok(Decimal::ZERO);
        }
        return Decimal::from_str(raw.trim()).map_err(serde::de::Error::custom);
    }

    if value.is_number() {
        return Decimal::from_str(&value.to_string())
            .or_else(|_| Decimal::from_scientific(&value.to_string()))
            .map_err(serde::de::Error::custom);
    }

    Err(serde::de::Error::custom("invalid decimal value"))
}

/// `[["price", "qty"], ...]` depth levels
pub fn deserialize_levels<'de, D>(deserializer: D) -> Result<Vec<(Decimal, Decimal)>, D::Error>
where
    D: Deserializer<'de>,
{
    let rows = Option::<Vec<Vec<Value>>>::deserialize(deserializer)?.unwrap_or_default();
    rows.into_iter()
        .map(|row| match row.as_slice() {
            [price, qty, ..] => Ok((
                parse_decimal::<D::Error>(price)?,
                parse_decimal::<D::Error>(qty)?,
            )),
            _ => Err(serde::de::Error::custom("depth level needs price and quantity")),
        })
        .collect()
}

fn parse_decimal<E: serde::de::Error>(value: &Value) -> Result<Decimal, E> {
    let raw = match value {
        Value::String(raw) => raw.clone(),
        Value::Number(number) => number.to_string(),
        other => return Err(E::custom(format!("invalid decimal value {other}"))),
    };
    Decimal::from_str(raw.trim()).map_err(E::custom)
}
