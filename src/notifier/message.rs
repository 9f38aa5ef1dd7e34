//! Alert message formatting

use chrono::{DateTime, Local};
use std::fmt;

pub const STARTUP_MESSAGE: &str = "🚀 Level alert bot started!";

pub const AUTH_REJECTED_MESSAGE: &str =
    "⚠️ Quote API access token invalid or expired. Update the access token.";

/// A price that moved into a new grid level
#[derive(Debug, Clone)]
pub struct LevelAlert<'a> {
    pub symbol: &'a str,
    pub price: f64,
    pub level: f64,
    /// Decimal places used to print `level`
    pub level_precision: usize,
    pub buy_volume: f64,
    pub time: DateTime<Local>,
}

impl fmt::Display for LevelAlert<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "⚡ {}\nPrice: {}\nLevel touched: {:.*}\nBuy-side volume (snapshot): {}\nTime: {}",
            self.symbol,
            self.price,
            self.level_precision,
            self.level,
            self.buy_volume,
            self.time.format("%Y-%m-%d %H:%M:%S%.3f"),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_alert_text() {
        let time = Local.with_ymd_and_hms(2024, 3, 1, 9, 15, 0).unwrap();
        let alert = LevelAlert {
            symbol: "NSE_INDEX|Nifty 50",
            price: 22_512.35,
            level: 22_500.0,
            level_precision: 0,
            buy_volume: 1_250.0,
            time,
        };

        assert_eq!(
            alert.to_string(),
            "⚡ NSE_INDEX|Nifty 50\n\
             Price: 22512.35\n\
             Level touched: 22500\n\
             Buy-side volume (snapshot): 1250\n\
             Time: 2024-03-01 09:15:00.000"
        );
    }

    #[test]
    fn test_fractional_level_uses_step_precision() {
        let alert = LevelAlert {
            symbol: "X",
            price: 0.31,
            level: 0.1 + 0.2,
            level_precision: 1,
            buy_volume: 0.0,
            time: Local::now(),
        };
        assert!(alert.to_string().contains("Level touched: 0.3\n"));
    }
}
