//! Environment-backed configuration for an ingestion run.
//!
//! Configuration is loaded once at process entry into an explicit value and
//! passed by parameter into the components that need it; nothing reads the
//! environment after startup. A missing index credential is fatal before any
//! document is touched.

use std::env;
use std::path::PathBuf;

use crate::chunking::ChunkingConfig;
use crate::types::IngestError;

/// Cache directory for downloaded documents.
pub const DEFAULT_CACHE_DIR: &str = "./docs";
/// Collection used when the operator does not name one.
pub const DEFAULT_COLLECTION: &str = "default";
const DEFAULT_EMBEDDING_URL: &str = "https://api.openai.com/v1";
const DEFAULT_EMBEDDING_MODEL: &str = "text-embedding-3-small";

/// Everything an ingestion run needs, resolved at startup.
#[derive(Clone, Debug)]
pub struct IngestConfig {
    /// Base URL of the remote vector index.
    pub index_url: String,
    /// Access credential for the remote vector index. Required.
    pub index_api_key: String,
    /// Target collection within the index.
    pub collection: String,
    /// Base URL of the embedding service.
    pub embedding_url: String,
    /// Credential for the embedding service; may be empty for local services.
    pub embedding_api_key: String,
    pub embedding_model: String,
    /// Directory holding downloaded documents.
    pub cache_dir: PathBuf,
    pub chunking: ChunkingConfig,
}

impl IngestConfig {
    /// Reads the configuration from process environment variables.
    pub fn from_env() -> Result<Self, IngestError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary key lookup.
    ///
    /// `VECTOR_INDEX_URL` and `VECTOR_INDEX_API_KEY` are required; everything
    /// else falls back to defaults.
    pub fn from_lookup(
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, IngestError> {
        let index_url = require(&lookup, "VECTOR_INDEX_URL")?;
        let index_api_key = require(&lookup, "VECTOR_INDEX_API_KEY")?;

        let collection =
            lookup("VECTOR_COLLECTION").unwrap_or_else(|| DEFAULT_COLLECTION.to_string());
        let embedding_url =
            lookup("EMBEDDING_URL").unwrap_or_else(|| DEFAULT_EMBEDDING_URL.to_string());
        let embedding_api_key = lookup("EMBEDDING_API_KEY").unwrap_or_default();
        let embedding_model =
            lookup("EMBEDDING_MODEL").unwrap_or_else(|| DEFAULT_EMBEDDING_MODEL.to_string());
        let cache_dir = lookup("DOCS_CACHE_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CACHE_DIR));

        let max_chars = parse_usize(&lookup, "CHUNK_MAX_CHARS", 1000)?;
        let overlap = parse_usize(&lookup, "CHUNK_OVERLAP", 200)?;
        let chunking = ChunkingConfig::new(max_chars, overlap)?;

        Ok(Self {
            index_url,
            index_api_key,
            collection,
            embedding_url,
            embedding_api_key,
            embedding_model,
            cache_dir,
            chunking,
        })
    }
}

fn require(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
) -> Result<String, IngestError> {
    lookup(key)
        .filter(|value| !value.is_empty())
        .ok_or_else(|| IngestError::Config(format!("missing required environment variable {key}")))
}

fn parse_usize(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
    default: usize,
) -> Result<usize, IngestError> {
    match lookup(key) {
        None => Ok(default),
        Some(raw) => raw
            .parse()
            .map_err(|err| IngestError::Config(format!("invalid {key} '{raw}': {err}"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn lookup(map: &HashMap<String, String>) -> impl Fn(&str) -> Option<String> + '_ {
        move |key| map.get(key).cloned()
    }

    #[test]
    fn missing_index_credential_is_fatal() {
        let map = env(&[("VECTOR_INDEX_URL", "http://localhost:6333")]);
        let err = IngestConfig::from_lookup(lookup(&map)).unwrap_err();
        assert!(matches!(err, IngestError::Config(_)));
        assert!(err.to_string().contains("VECTOR_INDEX_API_KEY"));
    }

    #[test]
    fn empty_credential_counts_as_missing() {
        let map = env(&[
            ("VECTOR_INDEX_URL", "http://localhost:6333"),
            ("VECTOR_INDEX_API_KEY", ""),
        ]);
        assert!(IngestConfig::from_lookup(lookup(&map)).is_err());
    }

    #[test]
    fn defaults_fill_everything_optional() {
        let map = env(&[
            ("VECTOR_INDEX_URL", "http://localhost:6333"),
            ("VECTOR_INDEX_API_KEY", "secret"),
        ]);
        let config = IngestConfig::from_lookup(lookup(&map)).unwrap();
        assert_eq!(config.collection, DEFAULT_COLLECTION);
        assert_eq!(config.cache_dir, PathBuf::from(DEFAULT_CACHE_DIR));
        assert_eq!(config.chunking.max_chars(), 1000);
        assert_eq!(config.chunking.overlap(), 200);
        assert!(config.embedding_api_key.is_empty());
    }

    #[test]
    fn invalid_chunk_geometry_is_rejected_at_load() {
        let map = env(&[
            ("VECTOR_INDEX_URL", "http://localhost:6333"),
            ("VECTOR_INDEX_API_KEY", "secret"),
            ("CHUNK_MAX_CHARS", "100"),
            ("CHUNK_OVERLAP", "100"),
        ]);
        let err = IngestConfig::from_lookup(lookup(&map)).unwrap_err();
        assert!(matches!(err, IngestError::InvalidChunking { .. }));
    }

    #[test]
    fn unparsable_numbers_are_config_errors() {
        let map = env(&[
            ("VECTOR_INDEX_URL", "http://localhost:6333"),
            ("VECTOR_INDEX_API_KEY", "secret"),
            ("CHUNK_MAX_CHARS", "lots"),
        ]);
        let err = IngestConfig::from_lookup(lookup(&map)).unwrap_err();
        assert!(matches!(err, IngestError::Config(_)));
    }
}
