//! Filtering and ranking over in-memory entries.
//!
//! There is no relevance scoring: entries either match every supplied
//! criterion or are dropped, and survivors are ordered by importance.

use crate::models::{KnowledgeEntry, SearchQuery};

/// Lowercased query text, or `None` when the text filter is off.
fn needle(query: &SearchQuery) -> Option<String> {
    if query.query.is_empty() {
        None
    } else {
        Some(query.query.to_lowercase())
    }
}

fn matches(entry: &KnowledgeEntry, query: &SearchQuery, needle: Option<&str>) -> bool {
    if entry.importance < query.min_importance {
        return false;
    }

    if let Some(category) = query.category.as_deref().filter(|c| !c.is_empty()) {
        if entry.category != category {
            return false;
        }
    }

    if let Some(tags) = query.tags.as_deref().filter(|t| !t.is_empty()) {
        if !entry.has_any_tag(tags) {
            return false;
        }
    }

    match needle {
        Some(needle) => {
            entry.title.to_lowercase().contains(needle)
                || entry.content.to_lowercase().contains(needle)
        }
        None => true,
    }
}

/// Entries matching `query`, highest importance first.
///
/// Ties keep the order of `entries`.
pub fn search_entries<'a>(
    entries: &'a [KnowledgeEntry],
    query: &SearchQuery,
) -> Vec<&'a KnowledgeEntry> {
    let needle = needle(query);
    let mut results: Vec<&KnowledgeEntry> = entries
        .iter()
        .filter(|entry| matches(entry, query, needle.as_deref()))
        .collect();
    rank_by_importance(&mut results);
    results
}

/// Stable sort, highest importance first.
pub fn rank_by_importance(results: &mut [&KnowledgeEntry]) {
    results.sort_by(|a, b| b.importance.cmp(&a.importance));
}
