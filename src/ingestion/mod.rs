//! Ingestion utilities: document references, download caching, and record
//! tagging.
//!
//! * [`source`] — the Remote/Local document reference and local discovery.
//! * [`cache`] — disk-backed caching for downloaded documents.
//! * [`records`] — provenance tagging that turns page chunks into
//!   vector-index ready records.

pub mod cache;
pub mod records;
pub mod source;

pub use cache::{DocumentCache, FetchOutcome, fetch_document};
pub use records::{DocumentBatch, tag_page};
pub use source::{DocumentSource, discover_pdfs};
