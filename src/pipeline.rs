//! Sequential ingestion orchestration.
//!
//! One document is fully fetched, extracted, chunked, tagged, embedded, and
//! upserted before the next begins. Documents are processed in caller order,
//! pages in physical order, chunks left to right; nothing is reordered or
//! deduplicated.

use std::sync::Arc;

use reqwest::Client;
use tracing::{debug, info};

use crate::chunking::TextChunker;
use crate::config::IngestConfig;
use crate::embeddings::EmbeddingProvider;
use crate::extract::PageExtractor;
use crate::ingestion::records::DocumentBatch;
use crate::ingestion::{DocumentCache, DocumentSource, fetch_document};
use crate::stores::VectorIndex;
use crate::types::IngestError;

/// Totals accumulated over one ingestion run.
#[derive(Clone, Copy, Debug, Default)]
pub struct IngestReport {
    pub documents: usize,
    pub pages: usize,
    pub chunks: usize,
    pub bytes_downloaded: usize,
}

/// Wires the pipeline stages together and runs them document by document.
pub struct IngestionPipeline {
    client: Client,
    cache: DocumentCache,
    chunker: TextChunker,
    extractor: Arc<dyn PageExtractor>,
    embedder: Arc<dyn EmbeddingProvider>,
    index: Arc<dyn VectorIndex>,
    collection: String,
}

impl IngestionPipeline {
    pub fn new(
        client: Client,
        config: &IngestConfig,
        extractor: Arc<dyn PageExtractor>,
        embedder: Arc<dyn EmbeddingProvider>,
        index: Arc<dyn VectorIndex>,
    ) -> Self {
        Self {
            client,
            cache: DocumentCache::new(&config.cache_dir),
            chunker: TextChunker::new(config.chunking),
            extractor,
            embedder,
            index,
            collection: config.collection.clone(),
        }
    }

    /// Processes the sources strictly in order, one document at a time.
    ///
    /// The first error aborts the remainder of the run; documents already
    /// upserted stay upserted. Idempotency across re-runs comes only from
    /// the download cache.
    pub async fn run(&self, sources: &[DocumentSource]) -> Result<IngestReport, IngestError> {
        let mut report = IngestReport::default();
        for source in sources {
            self.ingest_document(source, &mut report).await?;
            report.documents += 1;
        }
        Ok(report)
    }

    async fn ingest_document(
        &self,
        source: &DocumentSource,
        report: &mut IngestReport,
    ) -> Result<(), IngestError> {
        info!(%source, "ingesting document");

        let path = match source {
            DocumentSource::Remote(url) => {
                let outcome = fetch_document(&self.client, url, &self.cache).await?;
                if outcome.from_cache {
                    debug!(path = %outcome.path.display(), "using cached download");
                } else {
                    debug!(bytes = outcome.bytes, "downloaded document");
                    report.bytes_downloaded += outcome.bytes;
                }
                outcome.path
            }
            DocumentSource::Local(path) => {
                if !path.is_file() {
                    return Err(IngestError::InvalidSource(format!(
                        "no such file: {}",
                        path.display()
                    )));
                }
                path.clone()
            }
        };

        let pages = self.extractor.extract_pages(&path)?;

        let mut batch = DocumentBatch::new();
        let mut page_count = 0usize;
        for (page_index, text) in pages.enumerate() {
            page_count += 1;
            let chunks = self.chunker.split(&text);
            batch.push_page(source, page_index + 1, chunks);
        }

        report.pages += page_count;
        report.chunks += batch.len();

        if batch.is_empty() {
            info!(%source, pages = page_count, "document produced no chunks, skipping upsert");
            return Ok(());
        }

        let texts: Vec<String> = batch
            .records()
            .iter()
            .map(|record| record.content.clone())
            .collect();
        let embeddings = self.embedder.embed_batch(&texts).await?;
        if embeddings.len() != texts.len() {
            return Err(IngestError::Embedding(format!(
                "provider '{}' returned {} vectors for {} chunks",
                self.embedder.name(),
                embeddings.len(),
                texts.len()
            )));
        }

        let chunk_count = batch.len();
        let records: Vec<_> = batch.into_records().into_iter().zip(embeddings).collect();
        self.index.upsert(&self.collection, records).await?;

        info!(
            %source,
            pages = page_count,
            chunks = chunk_count,
            collection = %self.collection,
            "document upserted"
        );
        Ok(())
    }
}
