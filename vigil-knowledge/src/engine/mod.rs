use std::collections::{BTreeSet, HashMap};
use std::fs;
use std::path::{Path, PathBuf};

use tracing::{info, warn};

use crate::KnowledgeSettings;
use crate::errors::KnowledgeResult;
use crate::models::{KnowledgeEntry, KnowledgeSummary, SearchQuery};
use crate::paths::entries_file_path;
use crate::render::render_knowledge_context;
use crate::search::search_entries;
use crate::storage::load_entries;

pub(crate) mod entries;
pub(crate) mod import;

/// File-backed store of knowledge entries.
///
/// Every mutation rewrites the whole backing file. When that write fails
/// the in-memory change is undone and the error is returned, so memory
/// and disk never disagree.
#[derive(Debug, Clone)]
pub struct KnowledgeBase {
    settings: KnowledgeSettings,
    path: PathBuf,
    entries: Vec<KnowledgeEntry>,
    /// Entry ID to its position in `entries`.
    index: HashMap<String, usize>,
    /// Lowest count suffix the next generated ID may use.
    next_count: usize,
}

impl KnowledgeBase {
    /// Open the store at the path resolved from `settings`.
    ///
    /// An unreadable or malformed backing file is logged and treated as an
    /// empty store. Nothing is written until the first mutation.
    pub fn open(settings: KnowledgeSettings) -> KnowledgeResult<Self> {
        let path = entries_file_path(&settings)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let entries = match load_entries(&path) {
            Ok(entries) => entries,
            Err(err) => {
                warn!(
                    "[{}] Error loading knowledge base from {}: {}",
                    settings.bot_name,
                    path.display(),
                    err
                );
                Vec::new()
            }
        };

        info!(
            "[{}] Knowledge base initialized with {} entries.",
            settings.bot_name,
            entries.len()
        );

        let next_count = entries.len();
        let mut kb = Self {
            settings,
            path,
            entries,
            index: HashMap::new(),
            next_count,
        };
        kb.rebuild_index();
        Ok(kb)
    }

    pub fn settings(&self) -> &KnowledgeSettings {
        &self.settings
    }

    /// Location of the backing JSON file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// All entries in insertion order.
    pub fn entries(&self) -> &[KnowledgeEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get_entry(&self, id: &str) -> Option<&KnowledgeEntry> {
        self.position(id).map(|idx| &self.entries[idx])
    }

    pub(crate) fn position(&self, id: &str) -> Option<usize> {
        self.index.get(id).copied()
    }

    pub(crate) fn push_entry(&mut self, entry: KnowledgeEntry) {
        self.index.insert(entry.id.clone(), self.entries.len());
        self.entries.push(entry);
    }

    /// Drop every entry from position `len` on.
    pub(crate) fn truncate_entries(&mut self, len: usize) {
        for entry in self.entries.drain(len..) {
            self.index.remove(&entry.id);
        }
    }

    pub(crate) fn rebuild_index(&mut self) {
        self.index = self
            .entries
            .iter()
            .enumerate()
            .map(|(idx, entry)| (entry.id.clone(), idx))
            .collect();
    }

    /// Entries satisfying every criterion of `query`, highest importance
    /// first. Equal importance keeps insertion order.
    pub fn search(&self, query: &SearchQuery) -> Vec<&KnowledgeEntry> {
        search_entries(&self.entries, query)
    }

    /// Entries with exactly this category, in insertion order.
    pub fn get_by_category(&self, category: &str) -> Vec<&KnowledgeEntry> {
        self.entries
            .iter()
            .filter(|entry| entry.category == category)
            .collect()
    }

    pub fn get_categories(&self) -> BTreeSet<String> {
        self.entries
            .iter()
            .map(|entry| entry.category.clone())
            .collect()
    }

    pub fn get_tags(&self) -> BTreeSet<String> {
        self.entries
            .iter()
            .flat_map(|entry| entry.tags.iter().cloned())
            .collect()
    }

    /// Prompt block of the most important entries matching `query`.
    ///
    /// Only entries at or above the configured importance floor qualify.
    /// `max_entries` defaults to the configured limit. Returns an empty
    /// string when nothing qualifies.
    pub fn get_context_for_query(&self, query: &str, max_entries: Option<usize>) -> String {
        let limit = max_entries.unwrap_or(self.settings.context_max_entries);
        let search = SearchQuery::new(query).min_importance(self.settings.context_min_importance);

        let mut results = self.search(&search);
        results.truncate(limit);
        render_knowledge_context(&results)
    }

    pub fn get_summary(&self) -> KnowledgeSummary {
        let avg_importance = if self.entries.is_empty() {
            0.0
        } else {
            // Importance is unbounded, so widen before summing.
            let total: i128 = self
                .entries
                .iter()
                .map(|entry| i128::from(entry.importance))
                .sum();
            total as f64 / self.entries.len() as f64
        };

        KnowledgeSummary {
            total_entries: self.entries.len(),
            categories: self.get_categories(),
            tags: self.get_tags(),
            avg_importance,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::NewEntry;

    fn open_in(dir: &Path) -> KnowledgeBase {
        KnowledgeBase::open(KnowledgeSettings {
            data_root_override: Some(dir.to_path_buf()),
            ..Default::default()
        })
        .unwrap()
    }

    #[test]
    fn test_open_resolves_custom_entries_path() {
        let dir = tempfile::tempdir().unwrap();
        let kb = open_in(dir.path());
        assert_eq!(
            kb.path(),
            dir.path().join("knowledge").join("custom").join("entries.json")
        );
        assert!(kb.path().parent().unwrap().is_dir());
        assert!(!kb.path().exists());
        assert!(kb.is_empty());
    }

    #[test]
    fn test_categories_and_tags_are_deduplicated() {
        let dir = tempfile::tempdir().unwrap();
        let mut kb = open_in(dir.path());
        kb.add_entry(NewEntry::new("a", "a").category("goals").tags(["x", "y"]))
            .unwrap();
        kb.add_entry(NewEntry::new("b", "b").category("goals").tags(["y", "z"]))
            .unwrap();
        kb.add_entry(NewEntry::new("c", "c")).unwrap();

        let categories: Vec<String> = kb.get_categories().into_iter().collect();
        assert_eq!(categories, vec!["general", "goals"]);
        let tags: Vec<String> = kb.get_tags().into_iter().collect();
        assert_eq!(tags, vec!["x", "y", "z"]);
    }

    #[test]
    fn test_get_by_category_keeps_insertion_order() {
        let dir = tempfile::tempdir().unwrap();
        let mut kb = open_in(dir.path());
        let first = kb
            .add_entry(NewEntry::new("first", "a").category("c").importance(1))
            .unwrap();
        kb.add_entry(NewEntry::new("other", "b").category("d")).unwrap();
        let second = kb
            .add_entry(NewEntry::new("second", "c").category("c").importance(9))
            .unwrap();

        let ids: Vec<&str> = kb
            .get_by_category("c")
            .iter()
            .map(|e| e.id.as_str())
            .collect();
        assert_eq!(ids, vec![first.as_str(), second.as_str()]);
        assert!(kb.get_by_category("missing").is_empty());
    }

    #[test]
    fn test_context_respects_floor_and_limit() {
        let dir = tempfile::tempdir().unwrap();
        let mut kb = open_in(dir.path());
        kb.add_entry(NewEntry::new("Low", "vigil notes").importance(2))
            .unwrap();
        assert_eq!(kb.get_context_for_query("vigil", None), "");

        for (title, importance) in [("A", 4), ("B", 9), ("C", 3), ("D", 7)] {
            kb.add_entry(NewEntry::new(title, "vigil notes").importance(importance))
                .unwrap();
        }

        let context = kb.get_context_for_query("VIGIL", None);
        assert!(context.starts_with("## RELEVANT KNOWLEDGE\n"));
        let b = context.find("**B**").unwrap();
        let d = context.find("**D**").unwrap();
        let a = context.find("**A**").unwrap();
        assert!(b < d && d < a);
        assert!(!context.contains("**C**"));
        assert!(!context.contains("**Low**"));

        let one = kb.get_context_for_query("vigil", Some(1));
        assert!(one.contains("**B**"));
        assert!(!one.contains("**D**"));
        assert_eq!(kb.get_context_for_query("vigil", Some(0)), "");
    }

    #[test]
    fn test_summary_average() {
        let dir = tempfile::tempdir().unwrap();
        let mut kb = open_in(dir.path());
        let empty = kb.get_summary();
        assert_eq!(empty.total_entries, 0);
        assert_eq!(empty.avg_importance, 0.0);
        assert!(empty.categories.is_empty());
        assert!(empty.tags.is_empty());

        kb.add_entry(NewEntry::new("a", "a").importance(10)).unwrap();
        kb.add_entry(NewEntry::new("b", "b").importance(5)).unwrap();
        let summary = kb.get_summary();
        assert_eq!(summary.total_entries, 2);
        assert_eq!(summary.avg_importance, 7.5);
    }

    #[test]
    fn test_summary_average_with_extreme_importance() {
        let dir = tempfile::tempdir().unwrap();
        let mut kb = open_in(dir.path());
        kb.add_entry(NewEntry::new("max", "a").importance(i64::MAX))
            .unwrap();
        kb.add_entry(NewEntry::new("one", "b").importance(1)).unwrap();

        let expected = (i128::from(i64::MAX) + 1) as f64 / 2.0;
        assert_eq!(kb.get_summary().avg_importance, expected);

        kb.add_entry(NewEntry::new("min", "c").importance(i64::MIN))
            .unwrap();
        kb.add_entry(NewEntry::new("min2", "d").importance(i64::MIN))
            .unwrap();
        assert!(kb.get_summary().avg_importance < 0.0);
    }

    #[test]
    fn test_lookup_index_follows_deletes() {
        let dir = tempfile::tempdir().unwrap();
        let mut kb = open_in(dir.path());
        let ids: Vec<String> = (0..4)
            .map(|i| kb.add_entry(NewEntry::new(format!("t{i}"), "c")).unwrap())
            .collect();

        assert!(kb.delete_entry(&ids[1]).unwrap());
        assert!(kb.get_entry(&ids[1]).is_none());
        for id in [&ids[0], &ids[2], &ids[3]] {
            assert_eq!(&kb.get_entry(id).unwrap().id, id);
        }
        assert_eq!(kb.position(&ids[3]), Some(2));
    }
}
