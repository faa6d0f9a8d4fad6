//! Search pipeline: scrape, analyze, summarize, embed.
//!
//! Stages run in a fixed sequence per product search. A failure at any
//! stage aborts the run; nothing partial is returned or persisted.

pub mod search;
pub mod sentiment;
pub mod summarize;

pub use search::{execute_search, SearchOutput};
pub use sentiment::analyze_reviews;
pub use summarize::summarize_reviews;

/// Truncate at a character boundary, never mid-codepoint.
pub(crate) fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}
