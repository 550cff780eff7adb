//! Error types shared across the ingestion pipeline.

use std::path::PathBuf;

use thiserror::Error;

/// Errors surfaced by any stage of the pipeline.
///
/// Each stage converts collaborator failures into the matching variant and
/// propagates; the run aborts at the first error. The binary decides exit
/// code and message formatting.
#[derive(Debug, Error)]
pub enum IngestError {
    /// Required configuration was missing or malformed at startup.
    #[error("configuration error: {0}")]
    Config(String),

    /// A download or remote-service request failed.
    #[error("http request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    /// The document could not be parsed into page text.
    #[error("failed to extract text from {path}: {reason}")]
    Extraction { path: PathBuf, reason: String },

    /// Chunk geometry rejected at construction: the overlap must stay
    /// strictly smaller than the maximum chunk length.
    #[error("invalid chunking configuration: overlap {overlap} must be smaller than max_chars {max_chars}")]
    InvalidChunking { max_chars: usize, overlap: usize },

    /// The embedding service answered with an error or a malformed payload.
    #[error("embedding service error: {0}")]
    Embedding(String),

    /// The vector index rejected a batch upsert.
    #[error("vector index error: {0}")]
    Index(String),

    /// A document reference that cannot be resolved (bad URL, missing file).
    #[error("invalid document reference: {0}")]
    InvalidSource(String),
}
