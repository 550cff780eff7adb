//! HTTP client for a REST vector index.

use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use serde_json::json;

use super::{ChunkRecord, VectorIndex};
use crate::types::IngestError;

/// Upserts chunk records over the index's REST API.
///
/// The wire format is the common "points" shape: one object per record
/// carrying the id, the embedding vector, and a JSON payload with the chunk
/// text and provenance. Authentication is an `api-key` header.
#[derive(Clone, Debug)]
pub struct RestVectorIndex {
    client: Client,
    base_url: String,
    api_key: String,
}

#[derive(Debug, Serialize)]
struct UpsertPoint {
    id: String,
    vector: Vec<f32>,
    payload: serde_json::Value,
}

#[derive(Debug, Serialize)]
struct UpsertRequest {
    points: Vec<UpsertPoint>,
}

impl RestVectorIndex {
    pub fn new(
        client: Client,
        base_url: impl Into<String>,
        api_key: impl Into<String>,
    ) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            client,
            base_url,
            api_key: api_key.into(),
        }
    }

    fn upsert_url(&self, collection: &str) -> String {
        format!("{}/collections/{}/points", self.base_url, collection)
    }
}

#[async_trait]
impl VectorIndex for RestVectorIndex {
    async fn upsert(
        &self,
        collection: &str,
        records: Vec<(ChunkRecord, Vec<f32>)>,
    ) -> Result<(), IngestError> {
        if records.is_empty() {
            return Ok(());
        }

        let points = records
            .into_iter()
            .map(|(record, vector)| UpsertPoint {
                id: record.id,
                vector,
                payload: json!({
                    "source": record.source,
                    "page": record.page,
                    "chunk_index": record.chunk_index,
                    "content": record.content,
                    "metadata": record.metadata,
                }),
            })
            .collect();

        let response = self
            .client
            .put(self.upsert_url(collection))
            .header("api-key", &self.api_key)
            .json(&UpsertRequest { points })
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(IngestError::Index(format!(
                "upsert to collection '{collection}' failed with {status}: {body}"
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn upsert_url_joins_base_and_collection() {
        let index = RestVectorIndex::new(Client::new(), "http://localhost:6333/", "key");
        assert_eq!(
            index.upsert_url("papers"),
            "http://localhost:6333/collections/papers/points"
        );
    }
}
