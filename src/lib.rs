//! Batch PDF ingestion pipeline for retrieval-augmented generation.
//!
//! Documents are processed strictly one at a time, in caller order:
//!
//! ```text
//! DocumentSource ──► ingestion::fetch_document ──► DocumentCache (./docs)
//!        │
//! Cached PDF ──► extract::PageExtractor ──► per-page text (page order)
//!        │
//! Page text ──► chunking::TextChunker ──► overlapping chunks
//!        │
//! Chunks ──► ingestion::records::tag_page ──► ChunkRecord batch
//!        │
//! Batch ──► embeddings::EmbeddingProvider ──► one vector per record
//!        │
//! (records, vectors) ──► stores::VectorIndex ──► remote collection upsert
//! ```
//!
//! The pipeline is write-only: it never queries the index, never deduplicates
//! across runs, and never retries a failed network call. Idempotency across
//! re-runs comes solely from the download cache keyed by filename.

pub mod chunking;
pub mod config;
pub mod embeddings;
pub mod extract;
pub mod ingestion;
pub mod pipeline;
pub mod stores;
pub mod types;

pub use chunking::{ChunkingConfig, TextChunker};
pub use config::IngestConfig;
pub use ingestion::{DocumentCache, DocumentSource, FetchOutcome, fetch_document};
pub use pipeline::{IngestReport, IngestionPipeline};
pub use stores::{ChunkRecord, VectorIndex};
pub use types::IngestError;
