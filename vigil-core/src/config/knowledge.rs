//! Knowledge base configuration types.
//!
//! These types define the resolved (non-optional) settings used by
//! `vigil-knowledge`. They are created from the user-facing
//! `Settings` TOML structs via `From`.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use super::settings::Settings;

/// Resolved knowledge base settings (all values filled with defaults).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KnowledgeSettings {
    /// Prefix for knowledge base log lines.
    #[serde(default = "default_bot_name")]
    pub bot_name: String,
    /// Explicit location of the entries file. Wins over `data_root_override`.
    #[serde(default)]
    pub entries_path_override: Option<PathBuf>,
    /// Override the root data directory for all knowledge paths.
    /// When set, paths derive from this root instead of `VIGIL_DATA_DIR` / XDG.
    #[serde(default)]
    pub data_root_override: Option<PathBuf>,
    #[serde(default = "default_context_min_importance")]
    pub context_min_importance: i64,
    #[serde(default = "default_context_max_entries")]
    pub context_max_entries: usize,
    #[serde(default = "default_import_title_chars")]
    pub import_title_chars: usize,
}

impl Default for KnowledgeSettings {
    fn default() -> Self {
        Self {
            bot_name: default_bot_name(),
            entries_path_override: None,
            data_root_override: None,
            context_min_importance: default_context_min_importance(),
            context_max_entries: default_context_max_entries(),
            import_title_chars: default_import_title_chars(),
        }
    }
}

fn default_bot_name() -> String {
    "Vigil".to_string()
}

fn default_context_min_importance() -> i64 {
    3
}

fn default_context_max_entries() -> usize {
    3
}

fn default_import_title_chars() -> usize {
    50
}

impl From<&Settings> for KnowledgeSettings {
    fn from(value: &Settings) -> Self {
        let overrides = &value.knowledge;
        let mut settings = KnowledgeSettings {
            bot_name: value.identity.bot_name.clone(),
            ..KnowledgeSettings::default()
        };
        if let Some(path) = &overrides.entries_path {
            settings.entries_path_override = Some(PathBuf::from(path));
        }
        if let Some(path) = &overrides.data_root {
            settings.data_root_override = Some(PathBuf::from(path));
        }
        if let Some(floor) = overrides.context_min_importance {
            settings.context_min_importance = floor;
        }
        if let Some(max) = overrides.context_max_entries {
            settings.context_max_entries = max;
        }
        if let Some(chars) = overrides.import_title_chars {
            settings.import_title_chars = chars;
        }
        settings
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_without_overrides() {
        let resolved = KnowledgeSettings::from(&Settings::default());
        assert_eq!(resolved.bot_name, "Vigil");
        assert!(resolved.entries_path_override.is_none());
        assert!(resolved.data_root_override.is_none());
        assert_eq!(resolved.context_min_importance, 3);
        assert_eq!(resolved.context_max_entries, 3);
        assert_eq!(resolved.import_title_chars, 50);
    }

    #[test]
    fn test_overrides_applied() {
        let mut settings = Settings::default();
        settings.identity.bot_name = "Warden".to_string();
        settings.knowledge.entries_path = Some("/data/kb.json".to_string());
        settings.knowledge.context_min_importance = Some(6);
        settings.knowledge.import_title_chars = Some(20);

        let resolved = KnowledgeSettings::from(&settings);
        assert_eq!(resolved.bot_name, "Warden");
        assert_eq!(
            resolved.entries_path_override,
            Some(PathBuf::from("/data/kb.json"))
        );
        assert_eq!(resolved.context_min_importance, 6);
        assert_eq!(resolved.context_max_entries, 3);
        assert_eq!(resolved.import_title_chars, 20);
    }
}
