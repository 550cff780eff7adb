//! Provenance tagging: page chunks become vector-index ready records.

use serde_json::json;
use uuid::Uuid;

use crate::stores::ChunkRecord;

use super::source::DocumentSource;

/// Attaches `{source, page}` to every chunk of one page.
///
/// `page` is the 1-based physical page number; it is applied unchanged to
/// every chunk of the page. Chunks never cross page boundaries, so a semantic
/// unit spanning a page break yields two records with different page numbers.
/// `base_index` is the document-wide index of the page's first chunk.
pub fn tag_page(
    source: &DocumentSource,
    page: usize,
    base_index: usize,
    chunks: Vec<String>,
) -> Vec<ChunkRecord> {
    debug_assert!(page >= 1, "pages are numbered from 1");
    let source = source.to_string();
    chunks
        .into_iter()
        .enumerate()
        .map(|(offset, content)| ChunkRecord {
            id: Uuid::new_v4().to_string(),
            source: source.clone(),
            page,
            chunk_index: base_index + offset,
            content,
            metadata: json!({ "source": source, "page": page }),
        })
        .collect()
}

/// Accumulates the records of one document across its pages.
///
/// Records keep their creation order: page order first, then left-to-right
/// chunk order within each page.
#[derive(Debug, Default)]
pub struct DocumentBatch {
    records: Vec<ChunkRecord>,
}

impl DocumentBatch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Tags and appends one page's chunks. An empty page contributes nothing.
    pub fn push_page(&mut self, source: &DocumentSource, page: usize, chunks: Vec<String>) {
        let base_index = self.records.len();
        self.records
            .extend(tag_page(source, page, base_index, chunks));
    }

    pub fn records(&self) -> &[ChunkRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Consumes the batch and yields the underlying records.
    pub fn into_records(self) -> Vec<ChunkRecord> {
        self.records
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn source() -> DocumentSource {
        DocumentSource::parse("https://example.com/docs/report.pdf").unwrap()
    }

    #[test]
    fn tag_page_attaches_source_and_page_to_every_chunk() {
        let records = tag_page(
            &source(),
            3,
            5,
            vec!["first chunk".to_string(), "second chunk".to_string()],
        );

        assert_eq!(records.len(), 2);
        for record in &records {
            assert_eq!(record.source, "https://example.com/docs/report.pdf");
            assert_eq!(record.page, 3);
            assert!(record.page >= 1);
            assert_eq!(record.metadata["page"], 3);
            assert_eq!(
                record.metadata["source"],
                "https://example.com/docs/report.pdf"
            );
        }
        assert_eq!(records[0].chunk_index, 5);
        assert_eq!(records[1].chunk_index, 6);
        assert_ne!(records[0].id, records[1].id);
    }

    #[test]
    fn empty_page_contributes_no_records() {
        let mut batch = DocumentBatch::new();
        batch.push_page(&source(), 1, vec!["page one".to_string()]);
        batch.push_page(&source(), 2, Vec::new());
        batch.push_page(&source(), 3, vec!["page three".to_string()]);

        let pages: Vec<usize> = batch.records().iter().map(|r| r.page).collect();
        assert_eq!(pages, vec![1, 3]);
    }

    #[test]
    fn chunk_indices_run_across_pages() {
        let mut batch = DocumentBatch::new();
        batch.push_page(&source(), 1, vec!["a".to_string(), "b".to_string()]);
        batch.push_page(&source(), 2, vec!["c".to_string()]);

        let indices: Vec<usize> = batch.records().iter().map(|r| r.chunk_index).collect();
        assert_eq!(indices, vec![0, 1, 2]);
    }

    #[test]
    fn local_sources_tag_with_their_path() {
        let local = DocumentSource::Local(PathBuf::from("docs/manual.pdf"));
        let records = tag_page(&local, 1, 0, vec!["content".to_string()]);
        assert_eq!(records[0].source, "docs/manual.pdf");
    }
}
