//! Remote quote source
//!
//! Read-only, bounded fetch of server records. The production source
//! speaks to a JSONPlaceholder-style posts endpoint; tests and embedders
//! can substitute anything implementing [`RemoteSource`].

use crate::config::REMOTE_BATCH_LIMIT;
use crate::error::Result;
use async_trait::async_trait;
use serde::Deserialize;

/// A raw remote record. Fields are optional on purpose: an individual
/// record missing its title is skipped during mapping rather than failing
/// the whole batch.
#[derive(Debug, Clone, Deserialize)]
pub struct RemotePost {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(rename = "userId", default)]
    pub user_id: Option<i64>,
}

/// Boundary to the remote source polled by the sync engine
#[async_trait]
pub trait RemoteSource: Send + Sync {
    /// Fetch one bounded batch of remote records.
    ///
    /// Transport failures, non-success statuses, and an entirely
    /// unparseable payload are all fetch failures.
    async fn fetch_batch(&self) -> Result<Vec<RemotePost>>;
}

/// HTTP remote source over reqwest
pub struct HttpRemoteSource {
    client: reqwest::Client,
    base_url: String,
    limit: usize,
}

impl HttpRemoteSource {
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent("QuoteVault-Sync")
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.into(),
            limit: REMOTE_BATCH_LIMIT,
        })
    }
}

#[async_trait]
impl RemoteSource for HttpRemoteSource {
    async fn fetch_batch(&self) -> Result<Vec<RemotePost>> {
        let url = format!("{}?_limit={}", self.base_url, self.limit);
        tracing::debug!("Fetching remote batch from {}", url);

        let response = self.client.get(&url).send().await?.error_for_status()?;
        let posts: Vec<RemotePost> = response.json().await?;

        tracing::debug!("Fetched {} remote records", posts.len());
        Ok(posts)
    }
}
