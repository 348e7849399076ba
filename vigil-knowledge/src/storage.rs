//! Whole-file JSON persistence for knowledge entries.
//!
//! The backing file is a single JSON object mapping entry ID to entry
//! record. Saves rewrite the whole collection through a temporary file in
//! the same directory that is renamed over the target.

use std::collections::HashMap;
use std::fmt;
use std::fs;
use std::io::{BufWriter, Write};
use std::path::Path;

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use tempfile::NamedTempFile;
use tracing::debug;

use crate::errors::{KnowledgeError, KnowledgeResult};
use crate::models::KnowledgeEntry;

/// Entries in file order. The map key is authoritative for the ID.
struct EntryFile(Vec<KnowledgeEntry>);

impl<'de> Deserialize<'de> for EntryFile {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct EntryFileVisitor;

        impl<'de> Visitor<'de> for EntryFileVisitor {
            type Value = EntryFile;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a map of entry ids to knowledge entries")
            }

            fn visit_map<A>(self, mut map: A) -> Result<EntryFile, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut entries: Vec<KnowledgeEntry> =
                    Vec::with_capacity(map.size_hint().unwrap_or(0));
                let mut positions: HashMap<String, usize> = HashMap::new();

                while let Some((key, mut entry)) = map.next_entry::<String, KnowledgeEntry>()? {
                    if entry.id != key {
                        debug!("entry id '{}' differs from its key '{}', using key", entry.id, key);
                        entry.id = key;
                    }
                    // Last duplicate wins but keeps the first position.
                    match positions.get(&entry.id) {
                        Some(&idx) => entries[idx] = entry,
                        None => {
                            positions.insert(entry.id.clone(), entries.len());
                            entries.push(entry);
                        }
                    }
                }

                Ok(EntryFile(entries))
            }
        }

        deserializer.deserialize_map(EntryFileVisitor)
    }
}

struct EntryFileRef<'a>(&'a [KnowledgeEntry]);

impl Serialize for EntryFileRef<'_> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for entry in self.0 {
            map.serialize_entry(&entry.id, entry)?;
        }
        map.end()
    }
}

/// Read all entries from `path`. A missing file yields no entries.
pub fn load_entries(path: &Path) -> KnowledgeResult<Vec<KnowledgeEntry>> {
    if !path.exists() {
        return Ok(Vec::new());
    }

    let raw = fs::read_to_string(path)?;
    let file: EntryFile = serde_json::from_str(&raw)?;
    Ok(file.0)
}

/// Replace the contents of `path` with `entries`.
pub fn save_entries(path: &Path, entries: &[KnowledgeEntry]) -> KnowledgeResult<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    fs::create_dir_all(dir)?;

    let mut tmp = NamedTempFile::new_in(dir)?;
    {
        let mut writer = BufWriter::new(tmp.as_file_mut());
        serde_json::to_writer_pretty(&mut writer, &EntryFileRef(entries))?;
        writer.flush()?;
    }
    tmp.as_file().sync_all()?;

    tmp.persist(path).map_err(|err| KnowledgeError::Persist {
        path: path.to_path_buf(),
        source: err.error,
    })?;

    Ok(())
}
