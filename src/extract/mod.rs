//! Page-aware PDF text extraction.
//!
//! Extraction preserves physical pagination: pages come back in order, and an
//! empty page yields an empty string rather than being skipped, so 1-based
//! page numbers computed downstream stay aligned with the source document.

use std::path::{Path, PathBuf};

use crate::types::IngestError;

/// A layout element found on a physical page.
///
/// Only text-bearing elements contribute to page text; images and other
/// non-text elements are ignored when a page is flattened.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PageElement {
    Text(String),
    Image,
    Other,
}

impl PageElement {
    /// Returns the element's text when it carries any.
    pub fn text(&self) -> Option<&str> {
        match self {
            PageElement::Text(text) => Some(text),
            PageElement::Image | PageElement::Other => None,
        }
    }
}

/// Concatenates the text-bearing elements of one page, in layout order.
pub fn page_text(elements: &[PageElement]) -> String {
    elements.iter().filter_map(PageElement::text).collect()
}

/// Finite, non-restartable sequence of per-page text in physical page order.
#[derive(Debug)]
pub struct PageTexts {
    pages: std::vec::IntoIter<String>,
}

impl PageTexts {
    pub fn new(pages: Vec<String>) -> Self {
        Self {
            pages: pages.into_iter(),
        }
    }

    /// Pages not yet consumed.
    pub fn remaining(&self) -> usize {
        self.pages.len()
    }
}

impl Iterator for PageTexts {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        self.pages.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.pages.size_hint()
    }
}

/// Extraction seam for the pipeline.
///
/// The production implementation reads PDFs; tests drive the pipeline with
/// fixture extractors instead of crafting PDF bytes.
pub trait PageExtractor: Send + Sync {
    /// Produces the document's pages in physical order.
    ///
    /// An unreadable or corrupt document fails as a whole; no partial pages
    /// are returned.
    fn extract_pages(&self, path: &Path) -> Result<PageTexts, IngestError>;
}

/// PDF extraction backed by `pdf-extract`.
///
/// `pdf-extract` flattens each page's layout to text, so every page surfaces
/// here as a single text-bearing element.
#[derive(Clone, Copy, Debug, Default)]
pub struct PdfExtractor;

impl PdfExtractor {
    /// Whole-document extraction for callers that do not need per-page
    /// provenance.
    pub fn extract_document_text(&self, path: &Path) -> Result<String, IngestError> {
        pdf_extract::extract_text(path).map_err(|err| extraction_error(path, &err))
    }
}

impl PageExtractor for PdfExtractor {
    fn extract_pages(&self, path: &Path) -> Result<PageTexts, IngestError> {
        let raw_pages =
            pdf_extract::extract_text_by_pages(path).map_err(|err| extraction_error(path, &err))?;
        let pages = raw_pages
            .into_iter()
            .map(|raw| page_text(&[PageElement::Text(raw)]))
            .collect();
        Ok(PageTexts::new(pages))
    }
}

fn extraction_error(path: &Path, err: &pdf_extract::OutputError) -> IngestError {
    IngestError::Extraction {
        path: PathBuf::from(path),
        reason: err.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_text_keeps_only_text_bearing_elements() {
        let elements = vec![
            PageElement::Text("first ".to_string()),
            PageElement::Image,
            PageElement::Text("second".to_string()),
            PageElement::Other,
        ];
        assert_eq!(page_text(&elements), "first second");
    }

    #[test]
    fn page_without_text_elements_flattens_to_empty_string() {
        assert_eq!(page_text(&[PageElement::Image, PageElement::Other]), "");
        assert_eq!(page_text(&[]), "");
    }

    #[test]
    fn page_texts_preserves_order_and_empty_pages() {
        let mut pages = PageTexts::new(vec![
            "page one".to_string(),
            String::new(),
            "page three".to_string(),
        ]);
        assert_eq!(pages.remaining(), 3);
        assert_eq!(pages.next().as_deref(), Some("page one"));
        assert_eq!(pages.next().as_deref(), Some(""));
        assert_eq!(pages.next().as_deref(), Some("page three"));
        assert_eq!(pages.next(), None);
    }

    #[test]
    fn extraction_fails_on_unreadable_document() {
        let err = PdfExtractor
            .extract_pages(Path::new("/nonexistent/document.pdf"))
            .unwrap_err();
        assert!(matches!(err, IngestError::Extraction { .. }));
    }

    #[test]
    fn whole_document_mode_fails_the_same_way() {
        let err = PdfExtractor
            .extract_document_text(Path::new("/nonexistent/document.pdf"))
            .unwrap_err();
        assert!(matches!(err, IngestError::Extraction { .. }));
    }
}
