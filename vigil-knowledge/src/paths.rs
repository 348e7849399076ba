use std::path::PathBuf;

use crate::KnowledgeSettings;
use crate::errors::{KnowledgeError, KnowledgeResult};

pub const KNOWLEDGE_DIR: &str = "knowledge";
pub const CUSTOM_DIR: &str = "custom";
pub const ENTRIES_FILE: &str = "entries.json";

pub fn data_root(settings: &KnowledgeSettings) -> KnowledgeResult<PathBuf> {
    if let Some(path) = &settings.data_root_override {
        return Ok(path.clone());
    }
    if let Ok(override_dir) = std::env::var("VIGIL_DATA_DIR") {
        return Ok(PathBuf::from(override_dir));
    }

    let dir = dirs::data_dir().ok_or(KnowledgeError::MissingDataDir)?;
    Ok(dir.join("vigil"))
}

pub fn knowledge_root(settings: &KnowledgeSettings) -> KnowledgeResult<PathBuf> {
    Ok(data_root(settings)?.join(KNOWLEDGE_DIR))
}

/// `<data root>/knowledge/custom/entries.json` unless overridden.
pub fn entries_file_path(settings: &KnowledgeSettings) -> KnowledgeResult<PathBuf> {
    if let Some(path) = &settings.entries_path_override {
        return Ok(path.clone());
    }
    Ok(knowledge_root(settings)?.join(CUSTOM_DIR).join(ENTRIES_FILE))
}
