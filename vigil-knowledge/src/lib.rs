//! Knowledge store for Vigil: persisted, searchable knowledge entries plus
//! the read-only Ascension Codex.

pub mod codex;
pub mod engine;
pub mod errors;
pub mod ingest;
pub mod models;
pub mod paths;
pub mod render;
pub mod search;
pub mod storage;

pub use vigil_core::config::KnowledgeSettings;
pub use errors::{KnowledgeError, KnowledgeResult};
pub use models::{EntryMetadata, EntryUpdate, KnowledgeEntry, KnowledgeSummary, NewEntry, SearchQuery};
pub use codex::CodexChapter;
pub use engine::KnowledgeBase;
