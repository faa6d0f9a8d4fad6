//! Recursive separator-priority text splitter.
//!
//! Splits free text into bounded-size chunks by trying separators from
//! coarse to fine: markdown headings, fenced-code boundaries, rule lines,
//! blank lines, newlines, spaces, and finally raw characters. The
//! coarsest separator that produces in-bound chunks wins, and adjacent
//! chunks of the same split overlap by a fraction of the chunk size to
//! preserve context continuity.
//!
//! Sizes are measured in approximate model tokens (whitespace words or
//! one token per four characters, whichever is larger).

use std::collections::VecDeque;
use std::sync::OnceLock;

use regex::Regex;

/// One separator level, coarse to fine.
enum Separator {
    /// Regex boundary; the match stays attached to the following piece
    Pattern(&'static str),
    /// Literal boundary; attached to the following piece as well
    Literal(&'static str),
    /// Single characters, the last resort
    Character,
}

const SEPARATORS: &[Separator] = &[
    Separator::Pattern(r"\n#{1,6}"),
    Separator::Literal("```\n"),
    Separator::Pattern(r"\n\*{3,}\n"),
    Separator::Pattern(r"\n-{3,}\n"),
    Separator::Pattern(r"\n_{3,}\n"),
    Separator::Literal("\n\n"),
    Separator::Literal("\n"),
    Separator::Literal(" "),
    Separator::Character,
];

/// Compiled regexes for the `Pattern` levels, indexed like `SEPARATORS`.
fn compiled_patterns() -> &'static Vec<Option<Regex>> {
    static PATTERNS: OnceLock<Vec<Option<Regex>>> = OnceLock::new();
    PATTERNS.get_or_init(|| {
        SEPARATORS
            .iter()
            .map(|sep| match sep {
                Separator::Pattern(p) => Some(Regex::new(p).expect("valid separator pattern")),
                _ => None,
            })
            .collect()
    })
}

/// Approximate token count for sizing chunks.
///
/// Whitespace words, or a ceiling of one token per four characters for
/// dense text without whitespace. The ceiling keeps the estimate
/// superadditive under concatenation, so merged chunks never exceed the
/// bound their pieces respected.
pub fn estimate_tokens(text: &str) -> usize {
    let words = text.split_whitespace().count();
    let chars = text.chars().count();
    words.max(chars.div_ceil(4))
}

/// Recursive separator-priority splitter with token-measured bounds.
#[derive(Debug, Clone)]
pub struct TextSplitter {
    chunk_size: usize,
    chunk_overlap: usize,
}

impl Default for TextSplitter {
    fn default() -> Self {
        Self::new(512)
    }
}

impl TextSplitter {
    /// Create a splitter with the given chunk size in tokens.
    ///
    /// Overlap defaults to 10% of the chunk size.
    pub fn new(chunk_size: usize) -> Self {
        let chunk_size = chunk_size.max(1);
        Self {
            chunk_size,
            chunk_overlap: chunk_size / 10,
        }
    }

    /// Set a custom overlap (clamped below the chunk size).
    pub fn with_overlap(mut self, overlap: usize) -> Self {
        self.chunk_overlap = overlap.min(self.chunk_size.saturating_sub(1));
        self
    }

    /// Chunk size bound in tokens.
    pub fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    /// Split text into trimmed, non-empty chunks within the size bound.
    pub fn split(&self, text: &str) -> Vec<String> {
        self.split_level(text, 0)
            .into_iter()
            .map(|chunk| chunk.trim().to_string())
            .filter(|chunk| !chunk.is_empty())
            .collect()
    }

    fn split_level(&self, text: &str, level: usize) -> Vec<String> {
        if estimate_tokens(text) <= self.chunk_size {
            return vec![text.to_string()];
        }

        // First separator from this level on that actually divides the text.
        let mut pieces = vec![text.to_string()];
        let mut next_level = SEPARATORS.len();
        for l in level..SEPARATORS.len() {
            let candidate = split_pieces(text, l);
            if candidate.len() > 1 {
                pieces = candidate;
                next_level = l + 1;
                break;
            }
        }

        let mut chunks = Vec::new();
        let mut pending: Vec<String> = Vec::new();
        for piece in pieces {
            if estimate_tokens(&piece) <= self.chunk_size {
                pending.push(piece);
            } else {
                // Flush merged small pieces, then recurse into the big one
                // with finer separators.
                chunks.extend(self.merge_pieces(&pending));
                pending.clear();
                chunks.extend(self.split_level(&piece, next_level));
            }
        }
        chunks.extend(self.merge_pieces(&pending));
        chunks
    }

    /// Greedily pack pieces into chunks up to the size bound, seeding each
    /// new chunk with the tail of the previous one up to the overlap.
    fn merge_pieces(&self, pieces: &[String]) -> Vec<String> {
        if pieces.is_empty() {
            return Vec::new();
        }

        let mut chunks = Vec::new();
        let mut window: VecDeque<(&str, usize)> = VecDeque::new();
        let mut total = 0usize;

        for piece in pieces {
            let len = estimate_tokens(piece);
            if total + len > self.chunk_size && !window.is_empty() {
                chunks.push(join_window(&window));
                while total > self.chunk_overlap
                    || (total + len > self.chunk_size && total > 0)
                {
                    let (_, popped) = window.pop_front().expect("window not empty");
                    total -= popped;
                }
            }
            window.push_back((piece.as_str(), len));
            total += len;
        }

        if !window.is_empty() {
            chunks.push(join_window(&window));
        }
        chunks
    }
}

fn join_window(window: &VecDeque<(&str, usize)>) -> String {
    // Separators stay attached to their pieces, so plain concatenation
    // reconstructs the original character sequence.
    window.iter().map(|(piece, _)| *piece).collect()
}

/// Split text at one separator level, keeping each separator attached to
/// the piece that follows it.
fn split_pieces(text: &str, level: usize) -> Vec<String> {
    match &SEPARATORS[level] {
        Separator::Pattern(_) => {
            let re = compiled_patterns()[level]
                .as_ref()
                .expect("pattern level has a compiled regex");
            let mut pieces = Vec::new();
            let mut last = 0;
            for m in re.find_iter(text) {
                if m.start() > last {
                    pieces.push(text[last..m.start()].to_string());
                    last = m.start();
                }
            }
            pieces.push(text[last..].to_string());
            pieces
        }
        Separator::Literal(sep) => {
            let mut pieces = Vec::new();
            let mut last = 0;
            for (idx, _) in text.match_indices(sep) {
                if idx > last {
                    pieces.push(text[last..idx].to_string());
                    last = idx;
                }
            }
            pieces.push(text[last..].to_string());
            pieces
        }
        Separator::Character => text.chars().map(String::from).collect(),
    }
}
