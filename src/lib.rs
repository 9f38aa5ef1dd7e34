//! Level alert bot library
//!
//! Polls a batch quote REST API, snaps prices onto a fixed grid and sends a
//! Telegram message whenever a symbol moves into a new level.

pub mod config;
pub mod error;
pub mod health;
pub mod level;
pub mod notifier;
pub mod poller;
pub mod quote;

pub use config::Config;
pub use error::{AlertError, Result};
pub use level::{quantize, LevelTracker};
pub use notifier::{LevelAlert, Notifier, TelegramNotifier};
pub use poller::{CycleOutcome, CycleSummary, PollLoop, PollMetrics};
pub use quote::{Quote, QuoteBatch, QuoteSource, UpstoxClient};
