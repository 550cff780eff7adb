//! Overlapping character chunking with natural break points.
//!
//! Each page of text is split into chunks of at most `max_chars` characters.
//! Consecutive chunks within a page share `overlap` characters so retrieval
//! keeps context across chunk boundaries. Cuts prefer a paragraph break, then
//! a line break, then a word boundary near the target length, and fall back
//! to an exact-length cut when no boundary exists inside the lookback window.
//! For a fixed input and geometry the output is exactly reproducible.

use serde::{Deserialize, Serialize};

use crate::types::IngestError;

/// Fraction of `max_chars` the splitter searches behind the target cut for a
/// natural boundary.
const LOOKBACK_DIVISOR: usize = 5;

/// Lower bound on the lookback window so small chunk sizes still snap to
/// nearby boundaries.
const MIN_LOOKBACK: usize = 16;

/// Chunk geometry, validated at construction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChunkingConfig {
    max_chars: usize,
    overlap: usize,
}

impl ChunkingConfig {
    /// Builds a config, rejecting `overlap >= max_chars` (and `max_chars == 0`)
    /// eagerly rather than at first use.
    pub fn new(max_chars: usize, overlap: usize) -> Result<Self, IngestError> {
        if max_chars == 0 || overlap >= max_chars {
            return Err(IngestError::InvalidChunking { max_chars, overlap });
        }
        Ok(Self { max_chars, overlap })
    }

    /// Maximum chunk length, in characters.
    pub fn max_chars(&self) -> usize {
        self.max_chars
    }

    /// Characters shared between consecutive chunks of the same page.
    pub fn overlap(&self) -> usize {
        self.overlap
    }
}

impl Default for ChunkingConfig {
    /// The stock geometry: 1000-character chunks with 200 characters of
    /// overlap.
    fn default() -> Self {
        Self {
            max_chars: 1000,
            overlap: 200,
        }
    }
}

/// Splits page text into overlapping chunks.
#[derive(Clone, Copy, Debug)]
pub struct TextChunker {
    config: ChunkingConfig,
}

impl TextChunker {
    pub fn new(config: ChunkingConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> ChunkingConfig {
        self.config
    }

    /// Splits one page of text into ordered chunks.
    ///
    /// The first chunk starts at offset 0; each subsequent chunk starts
    /// `overlap` characters before the (break-point-adjusted) end of its
    /// predecessor. The final chunk may be shorter than `max_chars`. Empty
    /// input yields zero chunks. A single semantic unit longer than
    /// `max_chars` is hard-cut.
    pub fn split(&self, text: &str) -> Vec<String> {
        let chars: Vec<char> = text.chars().collect();
        if chars.is_empty() {
            return Vec::new();
        }

        let max = self.config.max_chars;
        let overlap = self.config.overlap;
        let lookback = (max / LOOKBACK_DIVISOR).max(MIN_LOOKBACK);

        let mut chunks = Vec::new();
        let mut start = 0usize;
        loop {
            let exact_end = start + max;
            if exact_end >= chars.len() {
                chunks.push(chars[start..].iter().collect());
                break;
            }

            let mut end = exact_end;
            if let Some(boundary) = natural_boundary(&chars, exact_end, lookback) {
                // Only adjust when the next chunk still advances past the
                // overlap; otherwise the exact cut keeps forward progress.
                if boundary > start + overlap {
                    end = boundary;
                }
            }

            chunks.push(chars[start..end].iter().collect());
            start = end - overlap;
        }
        chunks
    }
}

/// Finds the best cut position in `(target - lookback, target]`.
///
/// A cut at position `p` keeps `chars[..p]` in the left chunk, so trailing
/// separators stay with the text they terminate. Paragraph breaks win over
/// line breaks, which win over word boundaries, regardless of which sits
/// closer to the target.
fn natural_boundary(chars: &[char], target: usize, lookback: usize) -> Option<usize> {
    let floor = target.saturating_sub(lookback);
    let mut line_break = None;
    let mut word_break = None;

    let mut pos = target;
    while pos > floor {
        let prev = chars[pos - 1];
        if prev == '\n' {
            if pos >= 2 && chars[pos - 2] == '\n' {
                return Some(pos);
            }
            if line_break.is_none() {
                line_break = Some(pos);
            }
        } else if prev.is_whitespace() && word_break.is_none() {
            word_break = Some(pos);
        }
        pos -= 1;
    }

    line_break.or(word_break)
}
