//! Prompt-ready text blocks built from knowledge entries.

use crate::models::KnowledgeEntry;

pub const KNOWLEDGE_HEADER: &str = "## RELEVANT KNOWLEDGE\n";

/// Render entries as a `## RELEVANT KNOWLEDGE` block.
///
/// Returns an empty string for no entries so callers can omit the section.
pub fn render_knowledge_context(entries: &[&KnowledgeEntry]) -> String {
    if entries.is_empty() {
        return String::new();
    }

    let mut lines = Vec::with_capacity(entries.len() * 2 + 1);
    lines.push(KNOWLEDGE_HEADER.to_string());
    for entry in entries {
        lines.push(format!("**{}** [{}]", entry.title, entry.category));
        lines.push(format!("{}\n", entry.content));
    }
    lines.join("\n")
}
