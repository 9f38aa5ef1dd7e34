//! Poll loop
//!
//! Runs forever: fetch a batch, evaluate every symbol, alert on new levels, sleep.

use chrono::Local;
use std::time::Duration;
use tokio::time::sleep;
use tracing::{debug, error, info, warn};

use super::{CycleOutcome, CycleSummary, PollMetrics};
use crate::level::{step_precision, LevelTracker};
use crate::notifier::{LevelAlert, Notifier, AUTH_REJECTED_MESSAGE, STARTUP_MESSAGE};
use crate::quote::{parse_quote, QuoteSource};

/// Cycles between heartbeat log lines
const HEARTBEAT_CYCLES: u64 = 60;

/// Level-crossing alert loop
pub struct PollLoop<Q, N> {
    source: Q,
    notifier: N,
    tracker: LevelTracker,
    level_precision: usize,
    symbols: Vec<String>,
    interval: Duration,
    metrics: PollMetrics,
    /// Set after the credential alert went out; cleared by the next good fetch
    auth_alerted: bool,
    cycles: u64,
}

impl<Q: QuoteSource, N: Notifier> PollLoop<Q, N> {
    /// Create a poll loop with a fresh level tracker
    pub fn new(
        source: Q,
        notifier: N,
        symbols: Vec<String>,
        interval: Duration,
        step: f64,
        metrics: PollMetrics,
    ) -> Self {
        Self {
            source,
            notifier,
            tracker: LevelTracker::new(step),
            level_precision: step_precision(step),
            symbols,
            interval,
            metrics,
            auth_alerted: false,
            cycles: 0,
        }
    }

    /// Run the loop indefinitely; it only stops when the task is dropped
    pub async fn run(&mut self) {
        info!(
            symbols = ?self.symbols,
            interval_ms = self.interval.as_millis() as u64,
            step = self.tracker.step(),
            "Starting poll loop"
        );
        self.notifier.send(STARTUP_MESSAGE).await;

        loop {
            let outcome = self.run_cycle().await;
            self.cycles += 1;

            if self.cycles % HEARTBEAT_CYCLES == 0 {
                info!(
                    cycles = self.cycles,
                    tracked = self.tracker.len(),
                    last_outcome = ?outcome,
                    "[HEARTBEAT] poll loop alive"
                );
            }

            sleep(self.interval).await;
        }
    }

    /// Run a single cycle. Never fails: every error is logged and folded
    /// into the returned outcome.
    pub async fn run_cycle(&mut self) -> CycleOutcome {
        self.metrics.cycles.inc();

        let batch = match self.source.fetch(&self.symbols).await {
            Ok(batch) => {
                self.auth_alerted = false;
                batch
            }
            Err(e) if e.is_auth() => {
                self.metrics.auth_rejections.inc();
                warn!(error = %e, "Quote API access token invalid or expired");
                if !self.auth_alerted {
                    self.auth_alerted = true;
                    self.notifier.send(AUTH_REJECTED_MESSAGE).await;
                }
                return CycleOutcome::Unauthorized;
            }
            Err(e) => {
                self.metrics.fetch_failures.inc();
                error!(error = %e, "Quote fetch failed, skipping cycle");
                return CycleOutcome::FetchFailed;
            }
        };

        let mut summary = CycleSummary::default();

        for symbol in &self.symbols {
            let Some(entry) = batch.get(symbol) else {
                debug!(symbol = %symbol, "No quote in batch");
                summary.missing += 1;
                continue;
            };

            let quote = match parse_quote(entry) {
                Ok(quote) => quote,
                Err(e) => {
                    warn!(symbol = %symbol, error = %e, "Malformed quote, skipping symbol");
                    summary.malformed += 1;
                    continue;
                }
            };

            let Some(price) = quote.usable_price() else {
                debug!(symbol = %symbol, "Quote has no usable price");
                summary.missing += 1;
                continue;
            };

            summary.evaluated += 1;
            let Some(level) = self.tracker.evaluate(symbol, price) else {
                continue;
            };

            let alert = LevelAlert {
                symbol,
                price,
                level,
                level_precision: self.level_precision,
                buy_volume: quote.buy_volume,
                time: Local::now(),
            };
            info!(
                symbol = %symbol,
                price,
                level,
                buy_volume = quote.buy_volume,
                "Level touched"
            );
            self.notifier.send(&alert.to_string()).await;
            self.metrics.alerts_sent.inc();
            summary.alerted += 1;
        }

        let skipped = summary.missing + summary.malformed;
        if skipped > 0 {
            self.metrics.symbols_skipped.inc_by(skipped as u64);
        }

        CycleOutcome::Processed(summary)
    }

    /// Level state accumulated so far
    pub fn tracker(&self) -> &LevelTracker {
        &self.tracker
    }

    pub fn cycles(&self) -> u64 {
        self.cycles
    }
}
