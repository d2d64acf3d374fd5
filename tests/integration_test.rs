//! Integration tests for QuoteVault
//!
//! These tests verify end-to-end functionality including:
//! - Collection lifecycle and persistence across restarts
//! - Filter selection and fallback after sync overwrites
//! - Server-wins sync with keep-local revert
//! - Import/export flows

use async_trait::async_trait;
use quotevault::app::QuoteApp;
use quotevault::config::{ALL_CATEGORIES, DEFAULT_CATEGORY};
use quotevault::error::Result;
use quotevault::models::Quote;
use quotevault::services::{RemoteSource, SyncOutcome};
use quotevault::services::remote::RemotePost;
use std::sync::Arc;
use std::sync::Mutex;
use tempfile::TempDir;

/// Remote source whose batch can be swapped between cycles
struct FakeRemote {
    posts: Mutex<Vec<RemotePost>>,
}

impl FakeRemote {
    fn new(posts: Vec<(&str, i64)>) -> Arc<Self> {
        Arc::new(Self {
            posts: Mutex::new(to_posts(posts)),
        })
    }

    fn set_posts(&self, posts: Vec<(&str, i64)>) {
        *self.posts.lock().unwrap() = to_posts(posts);
    }
}

fn to_posts(posts: Vec<(&str, i64)>) -> Vec<RemotePost> {
    posts
        .into_iter()
        .map(|(title, user_id)| RemotePost {
            title: Some(title.to_string()),
            user_id: Some(user_id),
        })
        .collect()
}

#[async_trait]
impl RemoteSource for FakeRemote {
    async fn fetch_batch(&self) -> Result<Vec<RemotePost>> {
        Ok(self.posts.lock().unwrap().clone())
    }
}

async fn create_test_app(remote: Arc<FakeRemote>) -> (QuoteApp, TempDir) {
    let temp_dir = TempDir::new().unwrap();
    let (app, _notifications) = QuoteApp::with_remote(temp_dir.path().to_path_buf(), remote)
        .await
        .unwrap();
    (app, temp_dir)
}

#[tokio::test]
async fn test_app_starts_with_seed_quotes() {
    let (app, _temp) = create_test_app(FakeRemote::new(vec![])).await;

    assert!(!app.quotes().is_empty());
    assert!(!app.categories().is_empty());
    assert_eq!(app.effective_filter().await, ALL_CATEGORIES);
}

#[tokio::test]
async fn test_add_quote_selects_its_category() {
    let (app, _temp) = create_test_app(FakeRemote::new(vec![])).await;

    app.add_quote("Fresh thought", "Musings").await.unwrap();

    assert!(app.categories().contains(&"Musings".to_string()));
    assert_eq!(app.effective_filter().await, "Musings");

    let filtered = app.filtered_quotes().await;
    assert_eq!(filtered.len(), 1);
    assert_eq!(filtered[0].text, "Fresh thought");
}

#[tokio::test]
async fn test_collection_persists_across_restarts() {
    let temp_dir = TempDir::new().unwrap();
    let data_dir = temp_dir.path().to_path_buf();

    {
        let (app, _rx) = QuoteApp::with_remote(data_dir.clone(), FakeRemote::new(vec![]))
            .await
            .unwrap();
        app.add_quote("Survives restart", "Durability").await.unwrap();
    }

    let (app, _rx) = QuoteApp::with_remote(data_dir, FakeRemote::new(vec![]))
        .await
        .unwrap();
    assert!(app
        .quotes()
        .iter()
        .any(|q| q.text == "Survives restart" && q.category == "Durability"));
}

#[tokio::test]
async fn test_sync_overwrite_and_keep_local() {
    let remote = FakeRemote::new(vec![("Yo", 2)]);
    let (app, _temp) = create_test_app(remote).await;

    let before = app.quotes();
    let outcome = app.sync_now().await.unwrap();

    assert_eq!(outcome, SyncOutcome::Applied { replaced: 1 });
    assert_eq!(app.quotes(), vec![Quote::new("Yo", "Server-2")]);

    // Keep local restores the pre-overwrite collection and persists it
    assert!(app.keep_local().await);
    assert_eq!(app.quotes(), before);
}

#[tokio::test]
async fn test_second_sync_is_up_to_date() {
    let remote = FakeRemote::new(vec![("Hi", 1)]);
    let (app, _temp) = create_test_app(remote).await;

    assert_eq!(
        app.sync_now().await.unwrap(),
        SyncOutcome::Applied { replaced: 1 }
    );
    assert_eq!(app.sync_now().await.unwrap(), SyncOutcome::UpToDate);
    assert_eq!(app.quotes(), vec![Quote::new("Hi", "Server-1")]);
}

#[tokio::test]
async fn test_stored_filter_falls_back_after_sync_removes_category() {
    let remote = FakeRemote::new(vec![("Server wisdom", 7)]);
    let (app, _temp) = create_test_app(remote.clone()).await;

    app.add_quote("Ray guns", "Sci-Fi").await.unwrap();
    assert_eq!(app.effective_filter().await, "Sci-Fi");

    // Overwrite wipes the Sci-Fi category
    app.sync_now().await.unwrap();

    assert_eq!(app.effective_filter().await, ALL_CATEGORIES);
    assert!(!app.filtered_quotes().await.is_empty());
}

#[tokio::test]
async fn test_changed_remote_batch_triggers_new_overwrite() {
    let remote = FakeRemote::new(vec![("First", 1)]);
    let (app, _temp) = create_test_app(remote.clone()).await;

    app.sync_now().await.unwrap();
    remote.set_posts(vec![("Second", 1)]);

    let outcome = app.sync_now().await.unwrap();
    assert_eq!(outcome, SyncOutcome::Applied { replaced: 1 });
    assert_eq!(app.quotes(), vec![Quote::new("Second", "Server-1")]);

    // Revert goes back to the previous server batch, not the seeds
    assert!(app.keep_local().await);
    assert_eq!(app.quotes(), vec![Quote::new("First", "Server-1")]);
}

#[tokio::test]
async fn test_export_import_round_trip() {
    let (app, _temp) = create_test_app(FakeRemote::new(vec![])).await;
    let original = app.quotes();

    let exported = app.export_snapshot().unwrap();
    let count = app.import_batch(&exported).await.unwrap();

    assert_eq!(count, original.len());
    let after = app.quotes();
    assert_eq!(after.len(), original.len() * 2);
    for quote in &original {
        assert!(after.contains(quote));
    }
}

#[tokio::test]
async fn test_import_default_category_and_rejects_non_array() {
    let (app, _temp) = create_test_app(FakeRemote::new(vec![])).await;

    let count = app
        .import_batch(br#"[{"text":"plain"}]"#)
        .await
        .unwrap();
    assert_eq!(count, 1);
    assert!(app
        .quotes()
        .iter()
        .any(|q| q.text == "plain" && q.category == DEFAULT_CATEGORY));

    assert!(app.import_batch(b"{}").await.is_err());
}

#[tokio::test]
async fn test_random_quote_respects_selected_filter() {
    let (app, _temp) = create_test_app(FakeRemote::new(vec![])).await;
    app.add_quote("Target", "Rare").await.unwrap();

    app.select_filter("Rare").await;
    for _ in 0..10 {
        let quote = app.show_random_quote().await.unwrap();
        assert_eq!(quote.category, "Rare");
    }
}

#[tokio::test]
async fn test_resume_session_falls_back_to_random_after_shrink() {
    let remote = FakeRemote::new(vec![("Only one", 1)]);
    let (app, _temp) = create_test_app(remote).await;

    // View something near the end of the seed collection, then shrink it
    while app.show_random_quote().await.is_none() {}
    app.sync_now().await.unwrap();
    assert_eq!(app.quotes().len(), 1);

    // Whether or not the stored index survived the shrink, resume always
    // yields a quote from the current collection.
    let resumed = app.resume_session().await.unwrap();
    assert!(app.quotes().contains(&resumed));
}

#[tokio::test]
async fn test_select_filter_rejects_unknown_category() {
    let (app, _temp) = create_test_app(FakeRemote::new(vec![])).await;

    let effective = app.select_filter("Nonexistent").await;
    assert_eq!(effective, ALL_CATEGORIES);
    assert_eq!(app.effective_filter().await, ALL_CATEGORIES);
}
