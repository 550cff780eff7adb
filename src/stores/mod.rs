//! Remote vector index clients.
//!
//! The [`VectorIndex`] trait is the write-only seam between the pipeline and
//! whatever index the operator points it at. A batch is upserted as a whole
//! or fails as a whole; there is no partial-batch retry and no local
//! retention after a successful send.

pub mod rest;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::types::IngestError;

pub use rest::RestVectorIndex;

/// A chunk plus provenance, ready to ship to the vector index.
///
/// Created once per chunk, immutable, transmitted, then dropped.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ChunkRecord {
    /// Unique identifier for this chunk.
    pub id: String,
    /// Source document reference (URL or local path), unchanged across all
    /// chunks of the document.
    pub source: String,
    /// 1-based physical page number the chunk came from.
    pub page: usize,
    /// Position of the chunk within its document.
    pub chunk_index: usize,
    /// The chunk text.
    pub content: String,
    /// Metadata stored alongside the vector.
    pub metadata: serde_json::Value,
}

/// Write-only client for a remote vector index.
#[async_trait]
pub trait VectorIndex: Send + Sync {
    /// Upserts the records with their embeddings into the named collection.
    ///
    /// All-or-fail: either every record of the batch is accepted or the call
    /// returns an error and nothing is retried.
    async fn upsert(
        &self,
        collection: &str,
        records: Vec<(ChunkRecord, Vec<f32>)>,
    ) -> Result<(), IngestError>;
}
