//! Notifier module
//!
//! Best-effort delivery of alert text to a messaging sink.

mod message;
mod telegram;

pub use message::{LevelAlert, AUTH_REJECTED_MESSAGE, STARTUP_MESSAGE};
pub use telegram::TelegramNotifier;

use async_trait::async_trait;

/// Sink for alert messages.
///
/// Delivery is fire-and-forget: implementations log failures and never
/// retry or report them to the caller.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn send(&self, text: &str);
}
