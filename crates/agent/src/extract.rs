//! Todo extraction from generated briefing text.
//!
//! The briefing template asks the model to mark action items with
//! `TODO:`; markdown checkboxes (`- [ ]`) are also honored since models
//! frequently emit those instead.

/// Extracts todo items from free text, line by line.
pub struct TodoExtractor;

const MARKERS: [&str; 2] = ["TODO:", "- [ ]"];

impl TodoExtractor {
    /// All todo items in the text, in order of appearance.
    ///
    /// A line matches when, after trimming, it starts with one of the
    /// markers. The marker is stripped and the remainder trimmed. A bare
    /// marker yields an empty-string item; callers decide whether to keep
    /// those.
    pub fn extract(text: &str) -> Vec<String> {
        text.lines()
            .filter_map(|line| {
                let line = line.trim();
                MARKERS
                    .iter()
                    .find_map(|marker| line.strip_prefix(marker))
                    .map(|rest| rest.trim().to_string())
            })
            .collect()
    }
}
