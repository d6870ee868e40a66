// src/common/parse.rs

// Coerções "parse-or-default" usadas na ingestão das reservas.
// Os registros chegam do Firebase com tipos soltos: números como texto,
// campos nulos, datas em vários formatos. Nada aqui retorna erro.

use std::str::FromStr;

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use rust_decimal::{Decimal, prelude::FromPrimitive};
use serde::{Deserialize, Deserializer};
use serde_json::Value;

// Valor monetário não negativo. Ausente, inválido ou negativo vira zero.
pub fn decimal_or_zero(value: &Value) -> Decimal {
    let parsed = match value {
        Value::Number(n) => Decimal::from_str(&n.to_string())
            .ok()
            .or_else(|| n.as_f64().and_then(Decimal::from_f64)),
        Value::String(s) => parse_decimal_str(s),
        _ => None,
    };

    match parsed {
        Some(amount) if amount > Decimal::ZERO => amount,
        _ => Decimal::ZERO,
    }
}

fn parse_decimal_str(raw: &str) -> Option<Decimal> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }

    // "1000,50" (vírgula decimal) é aceito; "1.000,50" não.
    let normalized = if trimmed.contains(',') && !trimmed.contains('.') {
        trimmed.replace(',', ".")
    } else {
        trimmed.to_string()
    };

    Decimal::from_str(&normalized)
        .or_else(|_| Decimal::from_scientific(&normalized))
        .ok()
}

// Quantidade inteira não negativa (truncada). Inválido vira zero.
pub fn count_or_zero(value: &Value) -> u32 {
    let parsed = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().replace(',', ".").parse::<f64>().ok(),
        _ => None,
    };

    match parsed {
        Some(v) if v.is_finite() && v >= 1.0 => v.trunc().min(u32::MAX as f64) as u32,
        _ => 0,
    }
}

/// Instante de cadastro. O mês é o do próprio fuso do timestamp;
/// epoch (milissegundos) e objetos `{seconds, nanoseconds}` são lidos em UTC.
pub fn timestamp_or_none(value: &Value) -> Option<NaiveDateTime> {
    match value {
        Value::String(s) => parse_timestamp_str(s.trim()),
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().map(|f| f as i64))
            .and_then(DateTime::<Utc>::from_timestamp_millis)
            .map(|dt| dt.naive_utc()),
        Value::Object(obj) => {
            let seconds = obj
                .get("seconds")
                .or_else(|| obj.get("_seconds"))
                .and_then(Value::as_i64)?;
            let nanos = match obj.get("nanoseconds").or_else(|| obj.get("_nanoseconds")) {
                None | Some(Value::Null) => 0,
                Some(raw) => raw.as_u64().and_then(|n| u32::try_from(n).ok())?,
            };
            DateTime::<Utc>::from_timestamp(seconds, nanos).map(|dt| dt.naive_utc())
        }
        _ => None,
    }
}

fn parse_timestamp_str(raw: &str) -> Option<NaiveDateTime> {
    if raw.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.naive_local());
    }

    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(dt);
        }
    }

    for format in ["%Y-%m-%d", "%d/%m/%Y"] {
        if let Ok(date) = NaiveDate::parse_from_str(raw, format) {
            return date.and_hms_opt(0, 0, 0);
        }
    }

    None
}

// Data de vencimento. Qualquer formato aceito por `timestamp_or_none`.
pub fn date_or_none(value: &Value) -> Option<NaiveDate> {
    timestamp_or_none(value).map(|dt| dt.date())
}

// Texto livre; números viram texto, o resto vira `None`.
pub fn text_or_none(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

// --- Adaptadores para `#[serde(deserialize_with = ...)]` ---

pub fn lenient_decimal<'de, D>(deserializer: D) -> Result<Decimal, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().map(decimal_or_zero).unwrap_or(Decimal::ZERO))
}

pub fn lenient_count<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().map(count_or_zero).unwrap_or(0))
}

pub fn lenient_timestamp<'de, D>(deserializer: D) -> Result<Option<NaiveDateTime>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(timestamp_or_none))
}

pub fn lenient_date<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(date_or_none))
}

pub fn lenient_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(text_or_none))
}
