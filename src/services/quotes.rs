//! Quote collection service
//!
//! Single source of truth for the in-memory quote collection during a
//! session. All mutation goes through this service; the storage and
//! presentation layers only see read-only snapshots.
//!
//! Persistence is best-effort: a failing store degrades the session to
//! in-memory operation, it never blocks a mutation.

use crate::config::{ALL_CATEGORIES, DEFAULT_CATEGORY};
use crate::error::{AppError, Result};
use crate::models::{seed_quotes, Quote};
use crate::storage::{QuoteStore, SessionStore};
use rand::Rng;
use std::sync::{Arc, RwLock};

/// Service owning the ordered quote collection
#[derive(Clone)]
pub struct QuoteService {
    quotes: Arc<RwLock<Vec<Quote>>>,
    store: QuoteStore,
    session: SessionStore,
}

impl QuoteService {
    /// Create the service with the built-in seed set. Call [`load`] to
    /// replace the seeds with whatever the store holds.
    ///
    /// [`load`]: QuoteService::load
    pub fn new(store: QuoteStore, session: SessionStore) -> Self {
        Self {
            quotes: Arc::new(RwLock::new(seed_quotes())),
            store,
            session,
        }
    }

    /// Load the persisted collection, keeping the seed set when the store
    /// is empty, missing, or unreadable. The collection is never left
    /// empty by this call.
    pub async fn load(&self) {
        match self.store.load_quotes().await {
            Ok(Some(persisted)) if !persisted.is_empty() => {
                let count = persisted.len();
                *self.write_lock() = persisted;
                tracing::info!("Loaded {} quotes from store", count);
            }
            Ok(_) => {
                tracing::info!("No persisted quotes, keeping seed set");
            }
            Err(e) => {
                tracing::warn!("Could not load quotes, continuing with seed set: {}", e);
            }
        }
    }

    /// Add a new quote to the end of the collection.
    ///
    /// Fails with a validation error when the text trims to empty; a blank
    /// category defaults to "Uncategorized". Duplicates are allowed.
    pub async fn add(&self, text: &str, category: &str) -> Result<Quote> {
        let text = text.trim();
        if text.is_empty() {
            return Err(AppError::Validation(
                "Quote text must not be empty".to_string(),
            ));
        }

        let category = category.trim();
        let category = if category.is_empty() {
            DEFAULT_CATEGORY
        } else {
            category
        };

        let quote = Quote::new(text, category);
        self.write_lock().push(quote.clone());
        tracing::info!("Added quote in category '{}'", quote.category);

        self.persist_best_effort().await;
        Ok(quote)
    }

    /// Atomically replace the whole collection.
    ///
    /// The swap happens under the write lock, so no reader ever observes
    /// an empty collection mid-replacement.
    pub async fn replace_all(&self, records: Vec<Quote>) {
        *self.write_lock() = records;
        self.persist_best_effort().await;
    }

    /// Append a batch of records. Import path: additive, never replacing.
    pub async fn append_many(&self, records: Vec<Quote>) -> usize {
        let count = records.len();
        if count > 0 {
            self.write_lock().extend(records);
            self.persist_best_effort().await;
        }
        count
    }

    /// Read-only copy of the current collection in original order
    pub fn snapshot(&self) -> Vec<Quote> {
        self.read_lock().clone()
    }

    pub fn len(&self) -> usize {
        self.read_lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.read_lock().is_empty()
    }

    /// Quotes matching the given filter, original relative order preserved.
    /// The "all" sentinel returns the identity permutation.
    pub fn filter_by(&self, filter: &str) -> Vec<Quote> {
        let quotes = self.read_lock();
        if filter == ALL_CATEGORIES {
            return quotes.clone();
        }
        quotes
            .iter()
            .filter(|q| q.category == filter)
            .cloned()
            .collect()
    }

    /// Uniform random pick over the filtered candidates.
    ///
    /// Returns `None` when no candidate matches; the caller distinguishes
    /// "no quotes at all" from "none in this category" via [`len`].
    /// The full-collection index of the pick is recorded in the session
    /// store for later restore.
    ///
    /// [`len`]: QuoteService::len
    pub fn random_from(&self, filter: &str) -> Option<Quote> {
        let quotes = self.read_lock();
        let candidates: Vec<usize> = quotes
            .iter()
            .enumerate()
            .filter(|(_, q)| filter == ALL_CATEGORIES || q.category == filter)
            .map(|(i, _)| i)
            .collect();

        if candidates.is_empty() {
            return None;
        }

        let pick = candidates[rand::thread_rng().gen_range(0..candidates.len())];
        self.session.set_last_viewed(pick);
        Some(quotes[pick].clone())
    }

    /// Quote at the session's last-viewed index, range-checked against the
    /// current length. The collection may have been replaced by sync
    /// since the index was stored.
    pub fn restore_last_viewed(&self) -> Option<Quote> {
        let index = self.session.last_viewed()?;
        self.read_lock().get(index).cloned()
    }

    async fn persist_best_effort(&self) {
        let snapshot = self.snapshot();
        if let Err(e) = self.store.save_quotes(&snapshot).await {
            tracing::warn!("Could not persist quotes, continuing in-memory: {}", e);
        }
    }

    fn read_lock(&self) -> std::sync::RwLockReadGuard<'_, Vec<Quote>> {
        self.quotes.read().expect("quote collection lock poisoned")
    }

    fn write_lock(&self) -> std::sync::RwLockWriteGuard<'_, Vec<Quote>> {
        self.quotes.write().expect("quote collection lock poisoned")
    }
}
