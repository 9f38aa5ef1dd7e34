//! Parser for market-quote responses
//!
//! Handles the `{status, data}` envelope and individual quote entries.

use serde::Deserialize;
use serde_json::Value;
use std::collections::HashMap;

use super::{Quote, QuoteBatch};
use crate::error::{AlertError, Result};

/// Response envelope of the batch quotes endpoint
#[derive(Debug, Deserialize)]
struct QuoteEnvelope {
    status: Option<String>,

    #[serde(default)]
    data: Option<HashMap<String, Value>>,
}

/// Single quote entry; only the fields the alert loop reads
#[derive(Debug, Deserialize)]
struct RawQuote {
    #[serde(default)]
    last_price: Option<f64>,

    /// Alternate name for the last traded price
    #[serde(default)]
    ltp: Option<f64>,

    #[serde(default)]
    depth: Option<RawDepth>,
}

#[derive(Debug, Deserialize)]
struct RawDepth {
    #[serde(default)]
    buy: Option<Vec<DepthEntry>>,
}

#[derive(Debug, Deserialize)]
struct DepthEntry {
    #[serde(default)]
    quantity: Option<f64>,
}

/// Decode a batch response body
pub fn parse_quotes(body: &str) -> Result<QuoteBatch> {
    let envelope: QuoteEnvelope = serde_json::from_str(body).map_err(|e| {
        AlertError::ParseError(format!("{} (body: {})", e, preview(body)))
    })?;

    if envelope.status.as_deref() != Some("success") {
        return Err(AlertError::ApiError(format!(
            "unexpected status {:?}: {}",
            envelope.status,
            preview(body)
        )));
    }

    Ok(QuoteBatch::new(envelope.data.unwrap_or_default()))
}

/// Decode one quote entry.
///
/// `last_price` wins when positive, otherwise `ltp` is used. Depth entries
/// without a quantity count as zero; a depth block of the wrong shape is an
/// error for this symbol only.
pub fn parse_quote(entry: &Value) -> Result<Quote> {
    let raw = RawQuote::deserialize(entry)?;

    let last_price = raw.last_price.filter(|p| *p > 0.0).or(raw.ltp);
    let buy_volume = raw
        .depth
        .and_then(|d| d.buy)
        .unwrap_or_default()
        .iter()
        .map(|e| e.quantity.unwrap_or(0.0))
        .sum();

    Ok(Quote {
        last_price,
        buy_volume,
    })
}

fn preview(body: &str) -> String {
    body.chars().take(200).collect()
}
