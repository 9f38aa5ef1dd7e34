//! Level module
//!
//! Snaps prices onto a fixed grid and remembers the last level alerted per symbol.

mod tracker;

pub use tracker::LevelTracker;

/// Snap `price` to the nearest multiple of `step`.
///
/// Ties round half away from zero, so for positive prices a price exactly
/// halfway between two levels maps to the upper one (step 50: 25 -> 50).
pub fn quantize(price: f64, step: f64) -> f64 {
    (price / step).round() * step
}

/// Decimal places needed to print levels of a grid with this step.
///
/// `quantize` works in binary floating point, so a level on a fractional
/// grid can carry noise (step 0.1: 0.30000000000000004); printing with
/// this precision shows it as 0.3.
pub fn step_precision(step: f64) -> usize {
    step.to_string()
        .split_once('.')
        .map_or(0, |(_, frac)| frac.len())
        .min(10)
}
