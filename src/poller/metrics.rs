//! Poll loop counters

use prometheus::{IntCounter, Registry};

/// Prometheus counters updated by the poll loop
#[derive(Clone)]
pub struct PollMetrics {
    pub cycles: IntCounter,
    pub fetch_failures: IntCounter,
    pub auth_rejections: IntCounter,
    pub alerts_sent: IntCounter,
    pub symbols_skipped: IntCounter,
}

impl PollMetrics {
    /// Create the counters and register them with `registry`
    pub fn new(registry: &Registry) -> prometheus::Result<Self> {
        let metrics = Self {
            cycles: IntCounter::new("level_alert_cycles_total", "Poll cycles started")?,
            fetch_failures: IntCounter::new(
                "level_alert_fetch_failures_total",
                "Batch quote fetches that failed",
            )?,
            auth_rejections: IntCounter::new(
                "level_alert_auth_rejections_total",
                "Batch quote fetches rejected for credentials",
            )?,
            alerts_sent: IntCounter::new("level_alert_alerts_total", "Level alerts emitted")?,
            symbols_skipped: IntCounter::new(
                "level_alert_symbols_skipped_total",
                "Symbols skipped for missing or malformed quotes",
            )?,
        };

        registry.register(Box::new(metrics.cycles.clone()))?;
        registry.register(Box::new(metrics.fetch_failures.clone()))?;
        registry.register(Box::new(metrics.auth_rejections.clone()))?;
        registry.register(Box::new(metrics.alerts_sent.clone()))?;
        registry.register(Box::new(metrics.symbols_skipped.clone()))?;

        Ok(metrics)
    }
}
