// QuoteVault - headless host for the quote collection core
// Prints a quote, keeps the collection synced, and surfaces notifications
// until interrupted.

use anyhow::Context;
use quotevault::app::QuoteApp;
use quotevault::services::SyncFrequency;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "quotevault=debug,info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting QuoteVault");

    let data_dir = dirs_next::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("quotevault");

    let (app, mut notifications) = QuoteApp::new(data_dir)
        .await
        .context("application setup failed")?;

    // Stand-in presentation adapter: print notifications as they arrive
    tokio::spawn(async move {
        while let Some(notice) = notifications.recv().await {
            if notice.revertable {
                println!("[sync] {} (run again with keep-local to revert)", notice.message);
            } else {
                println!("[sync] {}", notice.message);
            }
        }
    });

    match app.resume_session().await {
        Some(quote) => println!("\"{}\" - {}", quote.text, quote.category),
        None => println!("No quotes in the selected category."),
    }

    app.start_sync(SyncFrequency::default())
        .await
        .context("could not start sync scheduler")?;

    tokio::signal::ctrl_c()
        .await
        .context("failed to listen for shutdown signal")?;
    tracing::info!("Shutting down");
    app.shutdown().await?;

    Ok(())
}
