//! Level alert bot
//!
//! Polls market quotes in a background task and alerts on grid-level
//! crossings, while a small HTTP server answers keep-alive probes.

use tracing::{error, info, Level};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use level_alert::{health, Config, PollLoop, PollMetrics, TelegramNotifier, UpstoxClient};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(fmt::layer().json())
        .with(EnvFilter::from_default_env().add_directive(Level::INFO.into()))
        .init();

    info!("Starting level alert bot");

    let config = Config::load()?;
    info!(
        symbols = ?config.symbols,
        poll_interval_secs = config.poll_interval_secs,
        level_step = config.level_step,
        "Configuration loaded"
    );

    let http = reqwest::Client::builder()
        .timeout(config.http_timeout())
        .build()?;

    let source = UpstoxClient::new(
        http.clone(),
        config.quotes_url.clone(),
        config.access_token.clone(),
    );
    let notifier = TelegramNotifier::new(
        http,
        config.telegram_api_url.clone(),
        config.telegram_bot_token.clone(),
        config.telegram_chat_id.clone(),
    );
    let metrics = PollMetrics::new(prometheus::default_registry())?;

    let mut poller = PollLoop::new(
        source,
        notifier,
        config.symbols.clone(),
        config.poll_interval(),
        config.level_step,
        metrics,
    );

    // Poll loop runs in the background
    let poll_task = tokio::spawn(async move {
        poller.run().await;
    });

    // Liveness server occupies the foreground
    if let Err(e) = health::serve(config.http_port).await {
        error!(error = %e, "Liveness server stopped, poll loop keeps running");
        poll_task.await?;
    }

    Ok(())
}
