//! Search over the catalog

use crate::models::{Category, Endpoint};

/// Case-insensitive substring match against an already lower-cased needle
fn contains(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(needle)
}

fn endpoint_matches(category: &Category, endpoint: &Endpoint, needle: &str) -> bool {
    contains(&endpoint.name, needle)
        || contains(&endpoint.desc, needle)
        || contains(&endpoint.path, needle)
        || contains(&endpoint.method, needle)
        || contains(&category.name, needle)
}

/// Returns the categories and endpoints of `original` matching `query`.
///
/// An empty or whitespace-only query returns `original` unchanged. Otherwise
/// non-matching endpoints are dropped, categories left empty are omitted and
/// relative order is preserved. `original` itself is never modified.
pub fn filter_catalog(original: &[Category], query: &str) -> Vec<Category> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return original.to_vec();
    }

    let filtered: Vec<Category> = original
        .iter()
        .filter_map(|category| {
            let items: Vec<Endpoint> = category
                .items
                .iter()
                .filter(|endpoint| endpoint_matches(category, endpoint, &needle))
                .cloned()
                .collect();

            if items.is_empty() {
                None
            } else {
                Some(Category {
                    items,
                    ..category.clone()
                })
            }
        })
        .collect();

    tracing::debug!(query = %needle, categories = filtered.len(), "Filtered catalog");
    filtered
}
