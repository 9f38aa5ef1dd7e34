//! Quote module
//!
//! Batch market quotes: the source seam, the Upstox REST client and the
//! response decoding that turns raw entries into prices and buy-side volume.

mod client;
mod parser;

pub use client::UpstoxClient;
pub use parser::{parse_quote, parse_quotes};

use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashMap;

use crate::error::Result;

/// Source of batch quote snapshots
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait QuoteSource: Send + Sync {
    /// Fetch one snapshot covering every symbol in a single request
    async fn fetch(&self, symbols: &[String]) -> Result<QuoteBatch>;
}

/// Decoded per-symbol quote
#[derive(Debug, Clone, PartialEq)]
pub struct Quote {
    /// Last traded price, if the entry carried one
    pub last_price: Option<f64>,
    /// Sum of quantities on the buy side of the depth snapshot
    pub buy_volume: f64,
}

impl Quote {
    /// Price usable for level tracking (finite and positive)
    pub fn usable_price(&self) -> Option<f64> {
        self.last_price.filter(|p| p.is_finite() && *p > 0.0)
    }
}

/// One batch response, keyed as the API returned it.
///
/// Entries stay raw until looked up so that one malformed symbol cannot
/// spoil the rest of the batch.
#[derive(Debug, Clone, Default)]
pub struct QuoteBatch {
    entries: HashMap<String, Value>,
}

impl QuoteBatch {
    pub fn new(entries: HashMap<String, Value>) -> Self {
        Self { entries }
    }

    /// Find the entry for a requested instrument key.
    ///
    /// The quotes API answers `EXCHANGE|Name` requests under `EXCHANGE:Name`
    /// and echoes the requested key in `instrument_token`; all three forms
    /// are tried.
    pub fn get(&self, symbol: &str) -> Option<&Value> {
        if let Some(entry) = self.entries.get(symbol) {
            return Some(entry);
        }
        if let Some(entry) = self.entries.get(&symbol.replacen('|', ":", 1)) {
            return Some(entry);
        }
        self.entries
            .values()
            .find(|entry| entry.get("instrument_token").and_then(Value::as_str) == Some(symbol))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
