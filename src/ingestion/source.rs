//! Document references: remote URLs or local files.

use std::fmt;
use std::path::{Path, PathBuf};

use url::Url;

use crate::types::IngestError;

/// Where a source document lives.
///
/// Resolved once per run; the two variants replace a download-vs-local
/// runtime flag. The `Display` form is the provenance string stored with
/// every chunk record.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DocumentSource {
    Remote(Url),
    Local(PathBuf),
}

impl DocumentSource {
    /// Parses a reference string: anything with an http(s) scheme is remote,
    /// everything else is a local path.
    pub fn parse(reference: &str) -> Result<Self, IngestError> {
        if reference.starts_with("http://") || reference.starts_with("https://") {
            let url = Url::parse(reference)
                .map_err(|err| IngestError::InvalidSource(format!("{reference}: {err}")))?;
            Ok(DocumentSource::Remote(url))
        } else {
            Ok(DocumentSource::Local(PathBuf::from(reference)))
        }
    }
}

impl fmt::Display for DocumentSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DocumentSource::Remote(url) => write!(f, "{url}"),
            DocumentSource::Local(path) => write!(f, "{}", path.display()),
        }
    }
}

/// Lists the PDF files of a directory as local sources, sorted by path for a
/// reproducible processing order.
pub fn discover_pdfs(dir: &Path) -> Result<Vec<DocumentSource>, IngestError> {
    let mut paths = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let path = entry?.path();
        let is_pdf = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("pdf"));
        if path.is_file() && is_pdf {
            paths.push(path);
        }
    }
    paths.sort();
    Ok(paths.into_iter().map(DocumentSource::Local).collect())
}
