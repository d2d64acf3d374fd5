//! Category index
//!
//! Derived view over the quote collection: distinct category labels in a
//! deterministic order. Recomputed on demand, never cached, so it is
//! always safe to call after any mutation.

use crate::config::ALL_CATEGORIES;
use crate::models::Quote;
use std::collections::BTreeSet;

/// Distinct non-empty categories present in the collection, sorted
/// lexicographically. The "all" sentinel is prepended by the presentation
/// layer, never by this function.
pub fn recompute(quotes: &[Quote]) -> Vec<String> {
    let set: BTreeSet<&str> = quotes
        .iter()
        .map(|q| q.category.as_str())
        .filter(|c| !c.is_empty())
        .collect();
    set.into_iter().map(String::from).collect()
}

/// Resolve a stored filter value against the current index.
///
/// Anything other than "all" or a currently present category falls back
/// to "all"; the persisted value may name a category the collection no
/// longer contains after a sync overwrite.
pub fn resolve_filter(stored: Option<&str>, categories: &[String]) -> String {
    match stored {
        Some(value) if value == ALL_CATEGORIES => ALL_CATEGORIES.to_string(),
        Some(value) if categories.iter().any(|c| c == value) => value.to_string(),
        _ => ALL_CATEGORIES.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quotes(pairs: &[(&str, &str)]) -> Vec<Quote> {
        pairs.iter().map(|(t, c)| Quote::new(*t, *c)).collect()
    }

    #[test]
    fn test_recompute_sorts_and_dedups() {
        let index = recompute(&quotes(&[
            ("a", "Zen"),
            ("b", "Art"),
            ("c", "Zen"),
            ("d", "Math"),
        ]));
        assert_eq!(index, vec!["Art", "Math", "Zen"]);
    }

    #[test]
    fn test_recompute_skips_empty_categories() {
        let index = recompute(&quotes(&[("a", ""), ("b", "Art")]));
        assert_eq!(index, vec!["Art"]);
    }

    #[test]
    fn test_recompute_is_subset_of_collection() {
        let collection = quotes(&[("a", "X"), ("b", "Y")]);
        for category in recompute(&collection) {
            assert!(collection.iter().any(|q| q.category == category));
        }
    }

    #[test]
    fn test_recompute_empty_collection() {
        assert!(recompute(&[]).is_empty());
    }

    #[test]
    fn test_resolve_filter_keeps_valid_values() {
        let categories = vec!["Art".to_string(), "Zen".to_string()];
        assert_eq!(resolve_filter(Some("Zen"), &categories), "Zen");
        assert_eq!(resolve_filter(Some("all"), &categories), "all");
    }

    #[test]
    fn test_resolve_filter_falls_back_to_all() {
        let categories = vec!["Art".to_string()];
        assert_eq!(resolve_filter(Some("Sci-Fi"), &categories), "all");
        assert_eq!(resolve_filter(None, &categories), "all");
        assert_eq!(resolve_filter(Some(""), &categories), "all");
    }
}
