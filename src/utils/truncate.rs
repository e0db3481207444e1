//! Truncation Utilities
//!
//! UTF-8 safe shortening for diagnostics that end up in logs or in the
//! rationale field of a fallback record.

/// Keep at most `max_chars` characters of `content`, marking the cut.
pub fn truncate_text(content: &str, max_chars: usize) -> String {
    let total = content.chars().count();
    if total <= max_chars {
        return content.to_string();
    }

    let prefix_end = content
        .char_indices()
        .nth(max_chars)
        .map(|(idx, _)| idx)
        .unwrap_or(content.len());

    format!("{}... [{} chars truncated]", &content[..prefix_end], total - max_chars)
}

/// Single-line preview of model output for debug logs.
pub fn preview(content: &str, max_chars: usize) -> String {
    truncate_text(&content.replace('\n', " "), max_chars)
}
