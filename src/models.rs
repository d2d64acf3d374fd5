//! Core data model
//!
//! A quote is a plain text/category pair with no identity field.
//! Equality is structural; dedup and sync comparison rely on it.

use crate::config::DEFAULT_CATEGORY;
use crate::error::Result;
use serde::{Deserialize, Serialize};

/// A single quote. Field order is stable (`text` then `category`) so that
/// serialized collections compare byte-for-byte during reconciliation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quote {
    pub text: String,
    #[serde(default = "default_category")]
    pub category: String,
}

fn default_category() -> String {
    DEFAULT_CATEGORY.to_string()
}

impl Quote {
    pub fn new(text: impl Into<String>, category: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            category: category.into(),
        }
    }
}

/// Built-in quotes used whenever the durable store yields nothing usable.
/// The collection is never empty after initialization.
pub fn seed_quotes() -> Vec<Quote> {
    vec![
        Quote::new(
            "The only limit to our realization of tomorrow is our doubts of today.",
            "Inspirational",
        ),
        Quote::new("Simplicity is the soul of efficiency.", "Productivity"),
        Quote::new(
            "Code is like humor. When you have to explain it, it's bad.",
            "Programming",
        ),
    ]
}

/// Canonical serialized form of a collection: compact JSON, array order
/// as-is, struct field order fixed by the `Quote` definition.
pub fn canonical_json(quotes: &[Quote]) -> Result<String> {
    Ok(serde_json::to_string(quotes)?)
}
