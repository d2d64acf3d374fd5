//! Application configuration constants
//!
//! Central location for all configuration constants, storage keys,
//! and validation boundaries used throughout the application.

// ===== Storage Keys =====

/// File stem under which the quote collection is persisted (quotes.json)
pub const QUOTES_STORE_KEY: &str = "quotes";

/// File stem under which the selected category filter is persisted
pub const SELECTED_CATEGORY_KEY: &str = "selected_category";

/// Session store key for the index of the last viewed quote
pub const LAST_VIEWED_KEY: &str = "last_viewed_quote_index";

// ===== Categories =====

/// Category assigned when a quote is created without one
pub const DEFAULT_CATEGORY: &str = "Uncategorized";

/// Sentinel filter value meaning "no category filter".
/// Not itself a category; the presentation layer prepends it to the index.
pub const ALL_CATEGORIES: &str = "all";

// ===== Remote Sync =====

/// Default remote source for server quotes (posts mapped to quotes)
pub const DEFAULT_REMOTE_URL: &str = "https://jsonplaceholder.typicode.com/posts";

/// Maximum number of remote records fetched per sync cycle
pub const REMOTE_BATCH_LIMIT: usize = 10;

/// Default polling interval for the sync scheduler
pub const DEFAULT_SYNC_INTERVAL_SECS: u32 = 30;

/// Minimum sync interval in seconds.
/// Values below this hammer the remote source for no benefit.
pub const MIN_SYNC_INTERVAL_SECS: u32 = 5;

// ===== Notifications =====

/// Auto-hide delay for "already up to date" notices in milliseconds
pub const NOTIFY_UP_TO_DATE_HIDE_MS: u64 = 2_000;

/// Auto-hide delay for sync failure notices in milliseconds
pub const NOTIFY_FAILURE_HIDE_MS: u64 = 3_000;

/// Auto-hide delay for "local data restored" notices in milliseconds
pub const NOTIFY_RESTORED_HIDE_MS: u64 = 2_000;
