use std::fs;
use std::path::Path;

use chrono::Local;
use tracing::{info, warn};

use crate::ingest::{derive_title, split_paragraphs};
use crate::models::{DEFAULT_IMPORTANCE, IMPORT_CATEGORY, NewEntry};

use super::KnowledgeBase;

impl KnowledgeBase {
    /// Create one entry per blank-line separated paragraph of a text file.
    ///
    /// Entries get `category` (default `imported`), the file path as their
    /// source, and default importance. The whole batch is written once.
    /// Failures are logged and reported as a count of `0`.
    pub fn import_from_file(&mut self, path: impl AsRef<Path>, category: Option<&str>) -> usize {
        let path = path.as_ref();
        let bot = self.settings.bot_name.clone();

        if !path.exists() {
            warn!("[{}] File not found: {}", bot, path.display());
            return 0;
        }

        let raw = match fs::read_to_string(path) {
            Ok(raw) => raw,
            Err(err) => {
                warn!("[{}] Error importing file {}: {}", bot, path.display(), err);
                return 0;
            }
        };

        let category = category.unwrap_or(IMPORT_CATEGORY);
        let source = path.display().to_string();
        let max_chars = self.settings.import_title_chars;
        let before = self.entries.len();
        let now = Local::now();

        for paragraph in split_paragraphs(&raw) {
            let new = NewEntry::new(derive_title(&paragraph, max_chars), paragraph)
                .category(category)
                .source(source.clone())
                .importance(DEFAULT_IMPORTANCE);
            let entry = self.build_entry(new, &now);
            self.push_entry(entry);
        }

        let count = self.entries.len() - before;
        if count == 0 {
            info!("[{}] Imported 0 entries from {}", bot, source);
            return 0;
        }

        if self.persist().is_err() {
            self.truncate_entries(before);
            return 0;
        }

        info!("[{}] Imported {} entries from {}", bot, count, source);
        count
    }
}
