//! Remote sync engine
//!
//! Polls the remote source, maps its records into quotes, and reconciles
//! them against the local collection with a server-wins overwrite.
//!
//! Merge policy: the server batch always wins, but the pre-overwrite
//! local collection is kept as a single in-memory revert snapshot so the
//! user can invoke a one-shot "keep local" until the next overwrite.
//! Comparison applies against the request-time snapshot, captured before
//! the fetch suspension point.

use crate::config::{
    DEFAULT_CATEGORY, NOTIFY_FAILURE_HIDE_MS, NOTIFY_RESTORED_HIDE_MS, NOTIFY_UP_TO_DATE_HIDE_MS,
};
use crate::error::Result;
use crate::models::{canonical_json, Quote};
use crate::notify::{Notification, Notifier};
use crate::services::quotes::QuoteService;
use crate::services::remote::{RemotePost, RemoteSource};
use chrono::{DateTime, Utc};
use std::sync::{Arc, Mutex};

/// Sync cycle state. A poll while a cycle is in flight is dropped, never
/// queued. A failed cycle parks in `Failed` until the next poll starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncState {
    Idle,
    Fetching,
    Reconciling,
    Failed,
}

/// Result of one completed sync cycle
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncOutcome {
    /// Another cycle was in flight; this poll was dropped.
    SkippedBusy,
    /// Local and remote collections were already identical.
    UpToDate,
    /// Server overwrite applied; the previous local state is revertable.
    Applied { replaced: usize },
}

/// Engine driving the poll/fetch/reconcile cycle.
///
/// Shared behind an `Arc`; the scheduler tick and any manual "sync now"
/// trigger go through the same state guard.
pub struct SyncEngine {
    quotes: QuoteService,
    remote: Arc<dyn RemoteSource>,
    notifier: Notifier,
    state: Mutex<SyncState>,
    revert_snapshot: Mutex<Option<Vec<Quote>>>,
    last_synced_at: Mutex<Option<DateTime<Utc>>>,
}

impl SyncEngine {
    pub fn new(quotes: QuoteService, remote: Arc<dyn RemoteSource>, notifier: Notifier) -> Self {
        Self {
            quotes,
            remote,
            notifier,
            state: Mutex::new(SyncState::Idle),
            revert_snapshot: Mutex::new(None),
            last_synced_at: Mutex::new(None),
        }
    }

    /// Run one sync cycle. Invoked by the scheduler tick and by manual
    /// "sync now" triggers alike.
    pub async fn sync_now(&self) -> Result<SyncOutcome> {
        if !self.try_begin() {
            tracing::debug!("Sync cycle already in flight, poll dropped");
            return Ok(SyncOutcome::SkippedBusy);
        }

        let result = self.run_cycle().await;
        self.set_state(match result {
            Ok(_) => SyncState::Idle,
            Err(_) => SyncState::Failed,
        });
        result
    }

    async fn run_cycle(&self) -> Result<SyncOutcome> {
        // Request-time snapshot: server wins against the collection as it
        // was when this poll started, not as it is when the response lands.
        let local = self.quotes.snapshot();

        let batch = match self.remote.fetch_batch().await {
            Ok(batch) => batch,
            Err(e) => {
                tracing::warn!("Sync fetch failed: {}", e);
                self.notifier.send(Notification::info(
                    "Server sync failed (network).",
                    NOTIFY_FAILURE_HIDE_MS,
                ));
                return Err(e);
            }
        };

        self.set_state(SyncState::Reconciling);
        let mapped = map_remote_batch(batch);

        if canonical_json(&local)? == canonical_json(&mapped)? {
            tracing::debug!("Remote batch matches local collection");
            self.record_completed();
            self.notifier.send(Notification::info(
                "Already up-to-date with server.",
                NOTIFY_UP_TO_DATE_HIDE_MS,
            ));
            return Ok(SyncOutcome::UpToDate);
        }

        // Server wins: the request-time snapshot becomes the one revert
        // point, replacing any earlier snapshot.
        let replaced = mapped.len();
        *self.lock_snapshot() = Some(local);
        self.quotes.replace_all(mapped).await;
        self.record_completed();

        tracing::info!("Applied server overwrite ({} quotes)", replaced);
        self.notifier
            .send(Notification::revertable("Server changes applied. You can revert."));

        Ok(SyncOutcome::Applied { replaced })
    }

    /// One-shot restore of the pre-overwrite local collection.
    ///
    /// Returns `false` when there is nothing to revert (no overwrite has
    /// happened, or the snapshot was already consumed).
    pub async fn keep_local(&self) -> bool {
        let Some(snapshot) = self.lock_snapshot().take() else {
            tracing::debug!("No local snapshot to restore");
            return false;
        };

        self.quotes.replace_all(snapshot).await;
        tracing::info!("Restored local collection from revert snapshot");
        self.notifier.send(Notification::info(
            "Local data restored.",
            NOTIFY_RESTORED_HIDE_MS,
        ));
        true
    }

    pub fn state(&self) -> SyncState {
        *self.state.lock().expect("sync state lock poisoned")
    }

    pub fn has_revert_snapshot(&self) -> bool {
        self.lock_snapshot().is_some()
    }

    /// Wall-clock time of the last completed cycle (up-to-date or applied)
    pub fn last_synced_at(&self) -> Option<DateTime<Utc>> {
        *self
            .last_synced_at
            .lock()
            .expect("last synced lock poisoned")
    }

    fn try_begin(&self) -> bool {
        let mut state = self.state.lock().expect("sync state lock poisoned");
        if matches!(*state, SyncState::Fetching | SyncState::Reconciling) {
            return false;
        }
        *state = SyncState::Fetching;
        true
    }

    fn set_state(&self, next: SyncState) {
        *self.state.lock().expect("sync state lock poisoned") = next;
    }

    fn record_completed(&self) {
        *self
            .last_synced_at
            .lock()
            .expect("last synced lock poisoned") = Some(Utc::now());
    }

    fn lock_snapshot(&self) -> std::sync::MutexGuard<'_, Option<Vec<Quote>>> {
        self.revert_snapshot
            .lock()
            .expect("revert snapshot lock poisoned")
    }
}

/// Project remote records into the local quote shape: title becomes the
/// text, the owner id becomes a "Server-{id}" category label. Records
/// without a usable title are skipped silently.
fn map_remote_batch(batch: Vec<RemotePost>) -> Vec<Quote> {
    batch
        .into_iter()
        .filter_map(|post| {
            let text = post.title?.trim().to_string();
            if text.is_empty() {
                return None;
            }
            let category = match post.user_id {
                Some(id) => format!("Server-{}", id),
                None => DEFAULT_CATEGORY.to_string(),
            };
            Some(Quote::new(text, category))
        })
        .collect()
}
