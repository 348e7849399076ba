//! Plain-text import helpers.

const TITLE_ELLIPSIS: &str = "...";

/// Split text into paragraphs separated by at least one empty line.
///
/// Line endings are normalized to `\n` first. Only truly empty lines
/// separate paragraphs; a line holding just spaces stays inside its
/// paragraph. Paragraphs are trimmed and empty ones dropped.
pub fn split_paragraphs(raw: &str) -> Vec<String> {
    normalize_newlines(raw)
        .split(PARAGRAPH_BREAK)
        .map(str::trim)
        .filter(|paragraph| !paragraph.is_empty())
        .map(str::to_string)
        .collect()
}

const PARAGRAPH_BREAK: &str = "\n\n";

fn normalize_newlines(raw: &str) -> String {
    raw.replace("\r\n", "\n").replace('\r', "\n")
}

/// First `max_chars` characters of `paragraph`, with `...` appended when cut.
pub fn derive_title(paragraph: &str, max_chars: usize) -> String {
    match paragraph.char_indices().nth(max_chars) {
        Some((cut, _)) => format!("{}{}", &paragraph[..cut], TITLE_ELLIPSIS),
        None => paragraph.to_string(),
    }
}
