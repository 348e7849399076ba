use chrono::{DateTime, Local};
use tracing::{info, warn};

use crate::errors::KnowledgeResult;
use crate::models::{EntryUpdate, KnowledgeEntry, NewEntry};
use crate::storage::save_entries;

use super::KnowledgeBase;

const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.6f";
const ID_TIMESTAMP_FORMAT: &str = "%Y%m%d%H%M%S";

pub(crate) fn format_timestamp(at: &DateTime<Local>) -> String {
    at.format(TIMESTAMP_FORMAT).to_string()
}

impl KnowledgeBase {
    /// Store a new entry and return its generated ID.
    pub fn add_entry(&mut self, new: NewEntry) -> KnowledgeResult<String> {
        let now = Local::now();
        let entry = self.build_entry(new, &now);
        let id = entry.id.clone();
        let title = entry.title.clone();
        let category = entry.category.clone();

        let before = self.entries.len();
        self.push_entry(entry);
        if let Err(err) = self.persist() {
            self.truncate_entries(before);
            return Err(err);
        }

        info!(
            "[{}] Added knowledge: '{}' [{}]",
            self.settings.bot_name, title, category
        );
        Ok(id)
    }

    /// Apply `update` to the entry with `id` and refresh its `updated` stamp.
    ///
    /// Returns `Ok(false)` without touching anything when `id` is unknown.
    pub fn update_entry(&mut self, id: &str, update: EntryUpdate) -> KnowledgeResult<bool> {
        let Some(idx) = self.position(id) else {
            return Ok(false);
        };

        let previous = self.entries[idx].clone();
        let entry = &mut self.entries[idx];
        update.apply_to(entry);
        entry.updated = format_timestamp(&Local::now());

        if let Err(err) = self.persist() {
            self.entries[idx] = previous;
            return Err(err);
        }
        Ok(true)
    }

    /// Permanently remove the entry with `id`. Unknown IDs return `Ok(false)`.
    pub fn delete_entry(&mut self, id: &str) -> KnowledgeResult<bool> {
        let Some(idx) = self.position(id) else {
            return Ok(false);
        };

        let removed = self.entries.remove(idx);
        self.rebuild_index();
        if let Err(err) = self.persist() {
            self.entries.insert(idx, removed);
            self.rebuild_index();
            return Err(err);
        }
        Ok(true)
    }

    pub(crate) fn build_entry(&mut self, new: NewEntry, now: &DateTime<Local>) -> KnowledgeEntry {
        let stamp = format_timestamp(now);
        KnowledgeEntry {
            id: self.generate_id(now),
            title: new.title,
            content: new.content,
            category: new.category,
            tags: new.tags,
            source: new.source,
            created: stamp.clone(),
            updated: stamp,
            importance: new.importance,
            metadata: new.metadata,
        }
    }

    /// `kb_<timestamp>_<count>`. The count starts at the entry count and
    /// never goes backwards within one store, so IDs are not reissued
    /// after a delete.
    pub(crate) fn generate_id(&mut self, now: &DateTime<Local>) -> String {
        let stamp = now.format(ID_TIMESTAMP_FORMAT);
        let mut count = self.entries.len().max(self.next_count);
        loop {
            let id = format!("kb_{stamp}_{count}");
            count += 1;
            if self.position(&id).is_none() {
                self.next_count = count;
                return id;
            }
        }
    }

    pub(crate) fn persist(&self) -> KnowledgeResult<()> {
        save_entries(&self.path, &self.entries).inspect_err(|err| {
            warn!(
                "[{}] Error saving knowledge base: {}",
                self.settings.bot_name, err
            );
        })
    }
}
