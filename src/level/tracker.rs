//! Level tracker
//!
//! Keeps the last alerted level for every symbol seen so far.

use std::collections::HashMap;

use super::quantize;

/// Tracks the last alerted grid level per symbol
#[derive(Debug)]
pub struct LevelTracker {
    step: f64,
    levels: HashMap<String, f64>,
}

impl LevelTracker {
    /// Create a tracker with the given grid step
    pub fn new(step: f64) -> Self {
        debug_assert!(step.is_finite() && step > 0.0, "grid step must be positive");
        Self {
            step,
            levels: HashMap::new(),
        }
    }

    /// Quantize `price` and record it if it moved into a new level.
    ///
    /// Returns the new level when the caller should alert. A symbol with no
    /// recorded level always alerts on its first price. Callers must pass a
    /// finite, positive price.
    pub fn evaluate(&mut self, symbol: &str, price: f64) -> Option<f64> {
        debug_assert!(price.is_finite() && price > 0.0, "price must be positive");

        let level = quantize(price, self.step);
        match self.levels.get_mut(symbol) {
            Some(last) if *last == level => None,
            Some(last) => {
                *last = level;
                Some(level)
            }
            None => {
                self.levels.insert(symbol.to_string(), level);
                Some(level)
            }
        }
    }

    /// Last level alerted for a symbol
    pub fn last_level(&self, symbol: &str) -> Option<f64> {
        self.levels.get(symbol).copied()
    }

    pub fn step(&self) -> f64 {
        self.step
    }

    /// Number of symbols with a recorded level
    pub fn len(&self) -> usize {
        self.levels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }
}
