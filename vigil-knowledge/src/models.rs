use std::collections::BTreeSet;

use serde::{Deserialize, Deserializer, Serialize};

pub const DEFAULT_CATEGORY: &str = "general";
pub const DEFAULT_IMPORTANCE: i64 = 5;
pub const IMPORT_CATEGORY: &str = "imported";

/// Free-form extension fields attached to an entry, in file order.
pub type EntryMetadata = serde_json::Map<String, serde_json::Value>;

/// A single piece of stored knowledge.
///
/// Field names are the on-disk contract of `entries.json`; every field
/// except `title` and `content` falls back to its default when absent.
/// An explicit `null` reads as the field's default.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KnowledgeEntry {
    /// Assigned by the store. On load the file's map key wins.
    #[serde(default, deserialize_with = "null_as_default")]
    pub id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(deserialize_with = "null_as_default")]
    pub content: String,
    #[serde(default = "default_category", deserialize_with = "category_or_default")]
    pub category: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub tags: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub source: String,
    /// ISO-8601 local timestamp, kept verbatim from disk.
    #[serde(default, deserialize_with = "null_as_default")]
    pub created: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub updated: String,
    /// Nominally 1-10. Values outside that range are stored as given.
    #[serde(default = "default_importance", deserialize_with = "importance_or_default")]
    pub importance: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub metadata: EntryMetadata,
}

fn default_category() -> String {
    DEFAULT_CATEGORY.to_string()
}

fn default_importance() -> i64 {
    DEFAULT_IMPORTANCE
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

fn category_or_default<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_else(default_category))
}

fn importance_or_default<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<i64>::deserialize(deserializer)?.unwrap_or(DEFAULT_IMPORTANCE))
}

impl KnowledgeEntry {
    pub fn has_any_tag(&self, tags: &[String]) -> bool {
        tags.iter().any(|tag| self.tags.contains(tag))
    }
}

/// Input for creating a new entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewEntry {
    pub title: String,
    pub content: String,
    pub category: String,
    pub tags: Vec<String>,
    pub source: String,
    pub importance: i64,
    pub metadata: EntryMetadata,
}

impl NewEntry {
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
            category: default_category(),
            tags: Vec::new(),
            source: String::new(),
            importance: DEFAULT_IMPORTANCE,
            metadata: EntryMetadata::new(),
        }
    }

    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    pub fn tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    pub fn source(mut self, source: impl Into<String>) -> Self {
        self.source = source.into();
        self
    }

    pub fn importance(mut self, importance: i64) -> Self {
        self.importance = importance;
        self
    }

    pub fn metadata(mut self, metadata: EntryMetadata) -> Self {
        self.metadata = metadata;
        self
    }
}

/// Partial update of an existing entry. `None` leaves a field untouched.
///
/// `id` and `created` are immutable and deliberately absent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EntryUpdate {
    pub title: Option<String>,
    pub content: Option<String>,
    pub category: Option<String>,
    pub tags: Option<Vec<String>>,
    pub source: Option<String>,
    pub importance: Option<i64>,
    pub metadata: Option<EntryMetadata>,
}

impl EntryUpdate {
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }

    /// Apply the supplied fields to `entry`. Does not touch `updated`.
    pub(crate) fn apply_to(self, entry: &mut KnowledgeEntry) {
        if let Some(title) = self.title {
            entry.title = title;
        }
        if let Some(content) = self.content {
            entry.content = content;
        }
        if let Some(category) = self.category {
            entry.category = category;
        }
        if let Some(tags) = self.tags {
            entry.tags = tags;
        }
        if let Some(source) = self.source {
            entry.source = source;
        }
        if let Some(importance) = self.importance {
            entry.importance = importance;
        }
        if let Some(metadata) = self.metadata {
            entry.metadata = metadata;
        }
    }
}

/// Filters for [`crate::KnowledgeBase::search`]. All supplied criteria must hold.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchQuery {
    /// Case-insensitive substring of title or content. Empty matches all.
    #[serde(default)]
    pub query: String,
    /// Exact category. `None` or empty matches all.
    pub category: Option<String>,
    /// Any-of tag filter. `None` or empty matches all.
    pub tags: Option<Vec<String>>,
    #[serde(default)]
    pub min_importance: i64,
}

impl SearchQuery {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            ..Self::default()
        }
    }

    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = Some(tags.into_iter().map(Into::into).collect());
        self
    }

    pub fn min_importance(mut self, min_importance: i64) -> Self {
        self.min_importance = min_importance;
        self
    }
}

/// Aggregate view of the knowledge base.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KnowledgeSummary {
    pub total_entries: usize,
    pub categories: BTreeSet<String>,
    pub tags: BTreeSet<String>,
    /// Mean importance, `0.0` for an empty store.
    pub avg_importance: f64,
}
