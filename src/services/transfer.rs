//! Import/export service
//!
//! Moves the collection across the file boundary as plain JSON. Export is
//! a pretty-printed snapshot of the full collection; import is additive,
//! appending accepted records without replacing what is already there.

use crate::config::DEFAULT_CATEGORY;
use crate::error::{AppError, Result};
use crate::models::Quote;
use crate::services::quotes::QuoteService;
use serde_json::Value;

/// Service for moving quotes in and out of user-supplied files
#[derive(Clone)]
pub struct TransferService {
    quotes: QuoteService,
}

impl TransferService {
    pub fn new(quotes: QuoteService) -> Self {
        Self { quotes }
    }

    /// Pretty-printed JSON array of the full collection, ready to be
    /// written to a download/file by the presentation adapter.
    pub fn export_snapshot(&self) -> Result<Vec<u8>> {
        let snapshot = self.quotes.snapshot();
        let content = serde_json::to_string_pretty(&snapshot)?;
        tracing::info!("Exported {} quotes", snapshot.len());
        Ok(content.into_bytes())
    }

    /// Append quotes from a user-supplied JSON payload.
    ///
    /// The top level must be an array; elements without a usable non-empty
    /// `text` string are skipped. Returns the number of accepted records;
    /// zero accepted is a valid result, distinct from a malformed payload.
    pub async fn import_batch(&self, data: &[u8]) -> Result<usize> {
        let payload: Value = serde_json::from_slice(data)
            .map_err(|e| AppError::Validation(format!("Import payload is not valid JSON: {}", e)))?;

        let Value::Array(items) = payload else {
            return Err(AppError::Validation(
                "Imported JSON must be an array of quotes".to_string(),
            ));
        };

        let total = items.len();
        let accepted: Vec<Quote> = items.into_iter().filter_map(parse_record).collect();
        let count = self.quotes.append_many(accepted).await;

        tracing::info!("Imported {} of {} records", count, total);
        Ok(count)
    }
}

fn parse_record(item: Value) -> Option<Quote> {
    let text = item.get("text")?.as_str()?.trim().to_string();
    if text.is_empty() {
        return None;
    }
    let category = item
        .get("category")
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .unwrap_or(DEFAULT_CATEGORY)
        .to_string();
    Some(Quote::new(text, category))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{QuoteStore, SessionStore};
    use tempfile::TempDir;

    async fn create_test_service() -> (TransferService, QuoteService, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let store = QuoteStore::new(temp_dir.path().to_path_buf());
        store.initialize().await.unwrap();
        let quotes = QuoteService::new(store, SessionStore::new());
        (TransferService::new(quotes.clone()), quotes, temp_dir)
    }

    #[tokio::test]
    async fn test_export_is_pretty_json_array() {
        let (transfer, quotes, _temp) = create_test_service().await;
        quotes.replace_all(vec![Quote::new("Hi", "A")]).await;

        let bytes = transfer.export_snapshot().unwrap();
        let text = String::from_utf8(bytes).unwrap();

        let parsed: Vec<Quote> = serde_json::from_str(&text).unwrap();
        assert_eq!(parsed, vec![Quote::new("Hi", "A")]);
        // Pretty-printed, not compact
        assert!(text.contains('\n'));
    }

    #[tokio::test]
    async fn test_import_appends_instead_of_replacing() {
        let (transfer, quotes, _temp) = create_test_service().await;
        quotes.replace_all(vec![Quote::new("existing", "A")]).await;

        let count = transfer
            .import_batch(br#"[{"text":"new","category":"B"}]"#)
            .await
            .unwrap();

        assert_eq!(count, 1);
        let snapshot = quotes.snapshot();
        assert_eq!(snapshot.len(), 2);
        assert_eq!(snapshot[0].text, "existing");
        assert_eq!(snapshot[1].text, "new");
    }

    #[tokio::test]
    async fn test_import_skips_unusable_records() {
        let (transfer, quotes, _temp) = create_test_service().await;
        quotes.replace_all(vec![]).await;

        let payload = br#"[
            {"text":"good"},
            {"text":""},
            {"text":"   "},
            {"category":"no text"},
            {"text":42},
            {"text":"also good","category":"  "}
        ]"#;

        let count = transfer.import_batch(payload).await.unwrap();

        assert_eq!(count, 2);
        let snapshot = quotes.snapshot();
        assert_eq!(snapshot[0], Quote::new("good", DEFAULT_CATEGORY));
        assert_eq!(snapshot[1], Quote::new("also good", DEFAULT_CATEGORY));
    }

    #[tokio::test]
    async fn test_import_zero_accepted_is_ok_not_error() {
        let (transfer, quotes, _temp) = create_test_service().await;
        let before = quotes.len();

        let count = transfer.import_batch(b"[{\"category\":\"x\"}]").await.unwrap();

        assert_eq!(count, 0);
        assert_eq!(quotes.len(), before);
    }

    #[tokio::test]
    async fn test_malformed_payload_is_validation_error() {
        let (transfer, _quotes, _temp) = create_test_service().await;

        let err = transfer.import_batch(b"not json").await.unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));

        let err = transfer
            .import_batch(br#"{"text":"object not array"}"#)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[tokio::test]
    async fn test_export_import_round_trip_is_additive() {
        let (transfer, quotes, _temp) = create_test_service().await;
        let original = vec![Quote::new("Hi", "A"), Quote::new("Yo", "B")];
        quotes.replace_all(original.clone()).await;

        let exported = transfer.export_snapshot().unwrap();
        let count = transfer.import_batch(&exported).await.unwrap();

        assert_eq!(count, original.len());
        let snapshot = quotes.snapshot();
        assert_eq!(snapshot.len(), original.len() * 2);
        for quote in &original {
            assert!(snapshot.iter().filter(|q| *q == quote).count() >= 2);
        }
    }
}
