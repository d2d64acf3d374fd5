//! Application state and initialization
//!
//! Wires the storage layer, quote collection, sync engine, and scheduler
//! together, and exposes the operations a presentation adapter calls.
//! The adapter owns all rendering; this facade only hands out read-only
//! snapshots and accepts user actions.

use crate::config::{ALL_CATEGORIES, DEFAULT_REMOTE_URL};
use crate::error::Result;
use crate::models::Quote;
use crate::notify::{Notification, Notifier};
use crate::services::{
    categories, HttpRemoteSource, QuoteService, RemoteSource, SyncEngine, SyncFrequency,
    SyncOutcome, SyncScheduler, TransferService,
};
use crate::storage::{QuoteStore, SessionStore};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::mpsc::UnboundedReceiver;

/// Central application facade holding all services
pub struct QuoteApp {
    quotes: QuoteService,
    store: QuoteStore,
    sync: Arc<SyncEngine>,
    transfer: TransferService,
    scheduler: SyncScheduler,
}

impl QuoteApp {
    /// Set up the application against the default remote source.
    ///
    /// Returns the app plus the notification receiver the presentation
    /// adapter should drain.
    pub async fn new(data_dir: PathBuf) -> Result<(Self, UnboundedReceiver<Notification>)> {
        let remote = Arc::new(HttpRemoteSource::new(DEFAULT_REMOTE_URL)?);
        Self::with_remote(data_dir, remote).await
    }

    /// Set up the application with a custom remote source
    pub async fn with_remote(
        data_dir: PathBuf,
        remote: Arc<dyn RemoteSource>,
    ) -> Result<(Self, UnboundedReceiver<Notification>)> {
        tracing::info!("Initializing application, data dir: {:?}", data_dir);

        let store = QuoteStore::new(data_dir);
        store.initialize().await?;

        let session = SessionStore::new();
        let quotes = QuoteService::new(store.clone(), session);
        quotes.load().await;

        let (notifier, notifications) = Notifier::channel();
        let sync = Arc::new(SyncEngine::new(quotes.clone(), remote, notifier));
        let transfer = TransferService::new(quotes.clone());
        let scheduler = SyncScheduler::new(Arc::clone(&sync)).await?;

        tracing::info!("Application initialized with {} quotes", quotes.len());

        let app = Self {
            quotes,
            store,
            sync,
            transfer,
            scheduler,
        };
        Ok((app, notifications))
    }

    // ===== Display =====

    /// Random quote honoring the effective category filter
    pub async fn show_random_quote(&self) -> Option<Quote> {
        let filter = self.effective_filter().await;
        self.quotes.random_from(&filter)
    }

    /// Quote viewed last in this session, if its index is still valid
    pub fn restore_last_viewed(&self) -> Option<Quote> {
        self.quotes.restore_last_viewed()
    }

    /// Last-viewed quote when still valid, otherwise a fresh random pick.
    /// The collection may have shrunk under a sync overwrite since the
    /// index was stored.
    pub async fn resume_session(&self) -> Option<Quote> {
        match self.restore_last_viewed() {
            Some(quote) => Some(quote),
            None => self.show_random_quote().await,
        }
    }

    /// Read-only snapshot of the full collection
    pub fn quotes(&self) -> Vec<Quote> {
        self.quotes.snapshot()
    }

    /// Quotes matching the effective filter, original order preserved
    pub async fn filtered_quotes(&self) -> Vec<Quote> {
        let filter = self.effective_filter().await;
        self.quotes.filter_by(&filter)
    }

    // ===== Categories and filter =====

    /// Current category index (sorted, distinct, without the "all" sentinel)
    pub fn categories(&self) -> Vec<String> {
        categories::recompute(&self.quotes.snapshot())
    }

    /// Persisted filter resolved against the current index; values naming
    /// a category that no longer exists fall back to "all".
    pub async fn effective_filter(&self) -> String {
        let stored = match self.store.load_filter().await {
            Ok(value) => value,
            Err(e) => {
                tracing::warn!("Could not load filter, using '{}': {}", ALL_CATEGORIES, e);
                None
            }
        };
        categories::resolve_filter(stored.as_deref(), &self.categories())
    }

    /// Select and persist a category filter. Invalid selections resolve to
    /// "all". Returns the effective value.
    pub async fn select_filter(&self, value: &str) -> String {
        let effective = categories::resolve_filter(Some(value), &self.categories());
        if let Err(e) = self.store.save_filter(&effective).await {
            tracing::warn!("Could not persist filter, continuing in-memory: {}", e);
        }
        effective
    }

    // ===== Mutations =====

    /// Add a quote from user input. As in the original flow, the new
    /// quote's category becomes the selected filter.
    pub async fn add_quote(&self, text: &str, category: &str) -> Result<Quote> {
        let quote = self.quotes.add(text, category).await?;
        self.select_filter(&quote.category).await;
        Ok(quote)
    }

    // ===== Import/export =====

    pub fn export_snapshot(&self) -> Result<Vec<u8>> {
        self.transfer.export_snapshot()
    }

    pub async fn import_batch(&self, data: &[u8]) -> Result<usize> {
        self.transfer.import_batch(data).await
    }

    // ===== Sync =====

    /// Manual "sync now" trigger; shares the state machine with the
    /// scheduler tick.
    pub async fn sync_now(&self) -> Result<SyncOutcome> {
        self.sync.sync_now().await
    }

    /// One-shot "keep local" revert of the last server overwrite
    pub async fn keep_local(&self) -> bool {
        self.sync.keep_local().await
    }

    pub fn sync_engine(&self) -> Arc<SyncEngine> {
        Arc::clone(&self.sync)
    }

    /// Start periodic sync polling at the given frequency
    pub async fn start_sync(&self, frequency: SyncFrequency) -> Result<()> {
        self.scheduler.start().await?;
        self.scheduler.schedule_sync(frequency, true).await
    }

    /// Stop polling and shut the scheduler down
    pub async fn shutdown(&self) -> Result<()> {
        self.scheduler.shutdown().await
    }
}
