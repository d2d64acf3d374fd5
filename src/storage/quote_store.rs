//! Durable quote storage
//!
//! Persists the quote collection and the selected category filter as JSON
//! files under fixed keys in the application data directory. The payloads
//! are the same verbatim JSON the export/import boundary uses.
//!
//! Every operation can fail (quota, unavailable disk, corrupt payload);
//! callers catch the error and continue in-memory for the session.

use crate::config::{DEFAULT_CATEGORY, QUOTES_STORE_KEY, SELECTED_CATEGORY_KEY};
use crate::error::{AppError, Result};
use crate::models::Quote;
use std::path::PathBuf;
use tokio::fs;

/// File-backed store for the persisted collection and filter
#[derive(Clone)]
pub struct QuoteStore {
    root: PathBuf,
}

impl QuoteStore {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    /// Initialize the store (create directory if needed)
    pub async fn initialize(&self) -> Result<()> {
        fs::create_dir_all(&self.root).await?;
        tracing::info!("Quote store initialized at: {:?}", self.root);
        Ok(())
    }

    /// Persist the full collection as a pretty-printed JSON array
    pub async fn save_quotes(&self, quotes: &[Quote]) -> Result<()> {
        let content = serde_json::to_string_pretty(quotes)?;
        self.write_key(QUOTES_STORE_KEY, &content).await?;
        tracing::debug!("Saved {} quotes", quotes.len());
        Ok(())
    }

    /// Load the persisted collection. `None` when nothing was ever saved.
    /// Records carrying a blank category (as opposed to a missing field,
    /// which the deserializer already defaults) are normalized here.
    pub async fn load_quotes(&self) -> Result<Option<Vec<Quote>>> {
        let Some(content) = self.read_key(QUOTES_STORE_KEY).await? else {
            return Ok(None);
        };
        let mut quotes: Vec<Quote> = serde_json::from_str(&content)
            .map_err(|e| AppError::Storage(format!("Corrupt quotes payload: {}", e)))?;
        for quote in &mut quotes {
            if quote.category.trim().is_empty() {
                quote.category = DEFAULT_CATEGORY.to_string();
            }
        }
        Ok(Some(quotes))
    }

    /// Persist the selected category filter as a JSON string scalar
    pub async fn save_filter(&self, value: &str) -> Result<()> {
        let content = serde_json::to_string(value)?;
        self.write_key(SELECTED_CATEGORY_KEY, &content).await
    }

    /// Load the persisted filter. `None` when nothing was ever saved.
    pub async fn load_filter(&self) -> Result<Option<String>> {
        let Some(content) = self.read_key(SELECTED_CATEGORY_KEY).await? else {
            return Ok(None);
        };
        let value: String = serde_json::from_str(&content)
            .map_err(|e| AppError::Storage(format!("Corrupt filter payload: {}", e)))?;
        Ok(Some(value))
    }

    fn key_path(&self, key: &str) -> PathBuf {
        self.root.join(format!("{}.json", key))
    }

    async fn read_key(&self, key: &str) -> Result<Option<String>> {
        let path = self.key_path(key);
        if !path.exists() {
            return Ok(None);
        }
        Ok(Some(fs::read_to_string(&path).await?))
    }

    /// Write to a temp file then rename, so a crash mid-write never leaves
    /// a truncated payload under the real key.
    async fn write_key(&self, key: &str, content: &str) -> Result<()> {
        let path = self.key_path(key);
        let temp_path = path.with_extension("json.tmp");
        fs::write(&temp_path, content).await?;
        fs::rename(&temp_path, &path).await?;
        Ok(())
    }
}
